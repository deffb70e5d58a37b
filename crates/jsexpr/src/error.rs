//! Translation errors.

/// Error that can occur while translating an expression tree.
///
/// Every variant is terminal for the current compile call; no partial output
/// is produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TranslateError {
    #[error("expression kind `{0}` is not supported")]
    UnsupportedExpressionKind(&'static str),

    #[error("operator `{0}` is not supported")]
    UnsupportedOperator(String),

    #[error("cannot convert {from} constant to {to}")]
    UnsupportedConversion { from: &'static str, to: String },

    #[error("arity mismatch in {context}: expected {expected}, got {got}")]
    ArityMismatch {
        context: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("{0} expression is not a compile-time constant")]
    RequiresConstant(&'static str),

    #[error("member `{member}` of `{ty}` cannot be read")]
    PropertyNotReadable { ty: String, member: String },

    #[error("{0} value cannot be rendered as a literal here")]
    UnsupportedValueKind(&'static str),

    #[error("runtime method `{0}` cannot be called from generated code")]
    UnsupportedRuntimeCall(String),
}
