//! JavaScript literal text for captured values.

use crate::value::RuntimeValue;
use chrono::{DateTime, TimeDelta, Utc};

/// 100ns ticks between 0001-01-01 and the Unix epoch.
const UNIX_EPOCH_TICKS: i64 = 621_355_968_000_000_000;

/// Ticks of 9999-12-31T23:59:59.9999999, the last encodable instant.
const MAX_TICKS: i64 = 3_155_378_975_999_999_999;

/// Kind bits marking a binary-encoded instant as UTC.
const KIND_UTC: i64 = 1 << 62;

/// Serialize `value` as a JavaScript literal.
///
/// Structured values render as object literals only when `allow_complex` is
/// set; otherwise (and for arrays containing such values) the result is
/// `None` and the caller decides how to fail.
///
/// String contents are emitted verbatim, without escaping: a string holding
/// a `"` produces invalid JavaScript.
pub fn serialize(value: &RuntimeValue, allow_complex: bool) -> Option<String> {
    let text = match value {
        RuntimeValue::Null => "null".to_string(),
        RuntimeValue::String(s) => format!("\"{s}\""),
        RuntimeValue::Char(c) => format!("\"{c}\""),
        RuntimeValue::Boolean(b) => b.to_string(),
        RuntimeValue::Integer(i) => i.to_string(),
        RuntimeValue::Float(f) => number(*f),
        RuntimeValue::Instant(t) => instant_to_binary(t)?.to_string(),
        RuntimeValue::Duration(d) => number(total_milliseconds(d)),
        RuntimeValue::Enum { value, .. } => value.to_string(),
        RuntimeValue::Array(items) => {
            let items = items
                .iter()
                .map(|item| serialize(item, allow_complex))
                .collect::<Option<Vec<_>>>()?;
            format!("[{}]", items.join(","))
        }
        RuntimeValue::Structured(s) => {
            if !allow_complex {
                return None;
            }
            let pairs = s
                .readable_members()
                .map(|(name, v)| serialize(v, allow_complex).map(|v| format!("{name}:{v}")))
                .collect::<Option<Vec<_>>>()?;
            format!("{{{}}}", pairs.join(","))
        }
    };
    Some(text)
}

fn number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        let text = if n > 0.0 { "Infinity" } else { "-Infinity" };
        text.to_string()
    } else {
        n.to_string()
    }
}

/// The host's binary encoding of a UTC instant: ticks with the UTC kind bit.
///
/// `None` outside years 1 through 9999.
pub fn instant_to_binary(t: &DateTime<Utc>) -> Option<i64> {
    let ticks = t
        .timestamp()
        .checked_mul(10_000_000)?
        .checked_add(UNIX_EPOCH_TICKS)?
        .checked_add(i64::from(t.timestamp_subsec_nanos() / 100))?;
    if !(0..=MAX_TICKS).contains(&ticks) {
        return None;
    }
    Some(ticks | KIND_UTC)
}

fn total_milliseconds(d: &TimeDelta) -> f64 {
    d.num_seconds() as f64 * 1000.0 + f64::from(d.subsec_nanos()) / 1_000_000.0
}
