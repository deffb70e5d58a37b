//! Captured runtime values.
//!
//! A [`RuntimeValue`] is a host value that was already evaluated by the
//! front-end: a literal, or state captured by the lambda's closure. Structured
//! values are self-describing so the translator can read members without a
//! reflection facility.

use crate::error::TranslateError;
use crate::ir::{MemberKind, MemberRef, TypeRef};
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// An already-evaluated host value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuntimeValue {
    Null,
    String(String),
    Char(char),
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Instant(DateTime<Utc>),
    Duration(#[serde(with = "duration_nanos")] TimeDelta),
    Enum { ty: TypeRef, value: i64 },
    Array(Vec<RuntimeValue>),
    Structured(StructuredValue),
}

/// An opaque object whose readable members are known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredValue {
    pub ty: TypeRef,
    #[serde(default)]
    pub members: Vec<ValueMember>,
}

/// One member of a [`StructuredValue`]. `value` is `None` for members that
/// cannot be read (write-only properties).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueMember {
    pub name: String,
    #[serde(default)]
    pub kind: MemberKind,
    #[serde(default)]
    pub value: Option<RuntimeValue>,
}

impl StructuredValue {
    pub fn new(ty: TypeRef) -> Self {
        Self {
            ty,
            members: Vec::new(),
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<RuntimeValue>) -> Self {
        self.members.push(ValueMember {
            name: name.into(),
            kind: MemberKind::Property,
            value: Some(value.into()),
        });
        self
    }

    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<RuntimeValue>) -> Self {
        self.members.push(ValueMember {
            name: name.into(),
            kind: MemberKind::Field,
            value: Some(value.into()),
        });
        self
    }

    pub fn with_write_only(mut self, name: impl Into<String>) -> Self {
        self.members.push(ValueMember {
            name: name.into(),
            kind: MemberKind::Property,
            value: None,
        });
        self
    }

    /// Read a member by name.
    pub fn read(&self, name: &str) -> Result<&RuntimeValue, TranslateError> {
        self.members
            .iter()
            .find(|m| m.name == name)
            .and_then(|m| m.value.as_ref())
            .ok_or_else(|| TranslateError::PropertyNotReadable {
                ty: self.ty.name.clone(),
                member: name.to_string(),
            })
    }

    /// Readable members in rendering order: properties, then fields.
    pub fn readable_members(&self) -> impl Iterator<Item = (&str, &RuntimeValue)> {
        let of_kind = move |kind: MemberKind| {
            self.members
                .iter()
                .filter(move |m| m.kind == kind)
                .filter_map(|m| m.value.as_ref().map(|v| (m.name.as_str(), v)))
        };
        of_kind(MemberKind::Property).chain(of_kind(MemberKind::Field))
    }
}

impl RuntimeValue {
    pub fn kind_name(&self) -> &'static str {
        match self {
            RuntimeValue::Null => "null",
            RuntimeValue::String(_) => "string",
            RuntimeValue::Char(_) => "char",
            RuntimeValue::Boolean(_) => "boolean",
            RuntimeValue::Integer(_) => "integer",
            RuntimeValue::Float(_) => "float",
            RuntimeValue::Instant(_) => "instant",
            RuntimeValue::Duration(_) => "duration",
            RuntimeValue::Enum { .. } => "enum",
            RuntimeValue::Array(_) => "array",
            RuntimeValue::Structured(_) => "structured",
        }
    }

    /// The host type of this value, used for type-level annotation lookups.
    pub fn runtime_type(&self) -> TypeRef {
        match self {
            RuntimeValue::Enum { ty, .. } => ty.clone(),
            RuntimeValue::Structured(s) => s.ty.clone(),
            RuntimeValue::Null => TypeRef::new("Object"),
            RuntimeValue::String(_) => TypeRef::new("String"),
            RuntimeValue::Char(_) => TypeRef::new("Char"),
            RuntimeValue::Boolean(_) => TypeRef::new("Boolean"),
            RuntimeValue::Integer(_) => TypeRef::new("Int64"),
            RuntimeValue::Float(_) => TypeRef::new("Double"),
            RuntimeValue::Instant(_) => TypeRef::new("DateTime"),
            RuntimeValue::Duration(_) => TypeRef::new("TimeSpan"),
            RuntimeValue::Array(_) => TypeRef::new("Array"),
        }
    }

    /// Read a declared member of this value.
    pub fn read_member(&self, member: &MemberRef) -> Result<RuntimeValue, TranslateError> {
        match self {
            RuntimeValue::Structured(s) => s.read(&member.name).cloned(),
            other => Err(TranslateError::PropertyNotReadable {
                ty: other.runtime_type().name,
                member: member.name.clone(),
            }),
        }
    }

    /// Coerce a constant to `ty`.
    pub fn convert(&self, ty: &ValueType) -> Result<RuntimeValue, TranslateError> {
        let unsupported = || TranslateError::UnsupportedConversion {
            from: self.kind_name(),
            to: format!("{ty:?}"),
        };

        let converted = match (ty, self) {
            (ValueType::Nullable(_), RuntimeValue::Null) => RuntimeValue::Null,
            (ValueType::Nullable(inner), _) => return self.convert(inner),

            (ValueType::String | ValueType::Guid, RuntimeValue::String(s)) => {
                RuntimeValue::String(s.clone())
            }
            (ValueType::String, RuntimeValue::Char(c)) => RuntimeValue::String(c.to_string()),
            (ValueType::String, RuntimeValue::Integer(i)) => RuntimeValue::String(i.to_string()),
            (ValueType::String, RuntimeValue::Float(f)) => RuntimeValue::String(f.to_string()),
            (ValueType::String, RuntimeValue::Boolean(b)) => RuntimeValue::String(b.to_string()),

            (ValueType::Char, RuntimeValue::Char(c)) => RuntimeValue::Char(*c),
            (ValueType::Char, RuntimeValue::Integer(i)) => u32::try_from(*i)
                .ok()
                .and_then(char::from_u32)
                .map(RuntimeValue::Char)
                .ok_or_else(unsupported)?,

            (ValueType::Boolean, RuntimeValue::Boolean(b)) => RuntimeValue::Boolean(*b),
            (ValueType::Boolean, RuntimeValue::Integer(i)) => RuntimeValue::Boolean(*i != 0),
            (ValueType::Boolean, RuntimeValue::Float(f)) => RuntimeValue::Boolean(*f != 0.0),
            (ValueType::Boolean, RuntimeValue::String(s)) => match s.trim() {
                t if t.eq_ignore_ascii_case("true") => RuntimeValue::Boolean(true),
                t if t.eq_ignore_ascii_case("false") => RuntimeValue::Boolean(false),
                _ => return Err(unsupported()),
            },

            (ValueType::Integer | ValueType::Enum(_), _) => {
                let value = match self {
                    RuntimeValue::Integer(i) => *i,
                    RuntimeValue::Enum { value, .. } => *value,
                    RuntimeValue::Boolean(b) => i64::from(*b),
                    RuntimeValue::Char(c) => i64::from(u32::from(*c)),
                    // Host conversions round half to even and fail on overflow.
                    RuntimeValue::Float(f) => {
                        let rounded = f.round_ties_even();
                        if !(i64::MIN as f64..i64::MAX as f64).contains(&rounded) {
                            return Err(unsupported());
                        }
                        rounded as i64
                    }
                    RuntimeValue::String(s) => s.trim().parse().map_err(|_| unsupported())?,
                    _ => return Err(unsupported()),
                };
                match ty {
                    ValueType::Enum(enum_ty) => RuntimeValue::Enum {
                        ty: enum_ty.clone(),
                        value,
                    },
                    _ => RuntimeValue::Integer(value),
                }
            }

            (ValueType::Float, RuntimeValue::Float(f)) => RuntimeValue::Float(*f),
            (ValueType::Float, RuntimeValue::Integer(i)) => RuntimeValue::Float(*i as f64),
            (ValueType::Float, RuntimeValue::Boolean(b)) => {
                RuntimeValue::Float(if *b { 1.0 } else { 0.0 })
            }
            (ValueType::Float, RuntimeValue::String(s)) => {
                RuntimeValue::Float(s.trim().parse().map_err(|_| unsupported())?)
            }

            (ValueType::Instant, RuntimeValue::Instant(t)) => RuntimeValue::Instant(*t),
            (ValueType::Duration, RuntimeValue::Duration(d)) => RuntimeValue::Duration(*d),

            _ => return Err(unsupported()),
        };
        Ok(converted)
    }
}

/// Target type of a conversion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    String,
    Char,
    Boolean,
    Integer,
    Float,
    Instant,
    Duration,
    Guid,
    Enum(TypeRef),
    Nullable(Box<ValueType>),
    Array(Box<ValueType>),
    Object(TypeRef),
}

impl ValueType {
    /// Whether this is a scalar kind whose constants can be re-serialized
    /// after conversion. Looks through one level of `Nullable`.
    pub fn is_simple(&self) -> bool {
        let ty = match self {
            ValueType::Nullable(inner) => inner.as_ref(),
            other => other,
        };
        !matches!(
            ty,
            ValueType::Array(_) | ValueType::Object(_) | ValueType::Nullable(_)
        )
    }
}

impl From<&str> for RuntimeValue {
    fn from(s: &str) -> Self {
        RuntimeValue::String(s.to_string())
    }
}

impl From<String> for RuntimeValue {
    fn from(s: String) -> Self {
        RuntimeValue::String(s)
    }
}

impl From<char> for RuntimeValue {
    fn from(c: char) -> Self {
        RuntimeValue::Char(c)
    }
}

impl From<bool> for RuntimeValue {
    fn from(b: bool) -> Self {
        RuntimeValue::Boolean(b)
    }
}

impl From<i32> for RuntimeValue {
    fn from(i: i32) -> Self {
        RuntimeValue::Integer(i64::from(i))
    }
}

impl From<i64> for RuntimeValue {
    fn from(i: i64) -> Self {
        RuntimeValue::Integer(i)
    }
}

impl From<f64> for RuntimeValue {
    fn from(f: f64) -> Self {
        RuntimeValue::Float(f)
    }
}

impl From<DateTime<Utc>> for RuntimeValue {
    fn from(t: DateTime<Utc>) -> Self {
        RuntimeValue::Instant(t)
    }
}

impl From<TimeDelta> for RuntimeValue {
    fn from(d: TimeDelta) -> Self {
        RuntimeValue::Duration(d)
    }
}

impl From<StructuredValue> for RuntimeValue {
    fn from(s: StructuredValue) -> Self {
        RuntimeValue::Structured(s)
    }
}

impl From<Vec<RuntimeValue>> for RuntimeValue {
    fn from(items: Vec<RuntimeValue>) -> Self {
        RuntimeValue::Array(items)
    }
}

/// Durations travel as whole nanoseconds.
mod duration_nanos {
    use chrono::TimeDelta;
    use serde::{Deserialize, Deserializer, Serializer, ser};

    pub fn serialize<S: Serializer>(d: &TimeDelta, serializer: S) -> Result<S::Ok, S::Error> {
        match d.num_nanoseconds() {
            Some(nanos) => serializer.serialize_i64(nanos),
            None => Err(<S::Error as ser::Error>::custom("duration out of range")),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<TimeDelta, D::Error> {
        i64::deserialize(deserializer).map(TimeDelta::nanoseconds)
    }
}
