//! Default constant evaluator.

use crate::error::TranslateError;
use crate::ir::{Expr, UnaryOp};
use crate::traits::Evaluator;
use crate::value::RuntimeValue;

/// Resolves constants and chains of captured members.
///
/// Handles `Constant`, member reads on an evaluated owner
/// (`closure.options.limit`) and conversions of evaluated constants. Anything
/// else depends on the lambda's parameters and fails with
/// [`TranslateError::RequiresConstant`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosureEvaluator;

impl Evaluator for ClosureEvaluator {
    fn evaluate(&self, expr: &Expr) -> Result<RuntimeValue, TranslateError> {
        match expr {
            Expr::Constant(value) => Ok(value.clone()),
            Expr::Member { target, member } => self.evaluate(target)?.read_member(member),
            Expr::Unary {
                op: UnaryOp::Convert(ty),
                operand,
            } => self.evaluate(operand)?.convert(ty),
            other => Err(TranslateError::RequiresConstant(other.kind_name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{MemberRef, TypeRef};
    use crate::value::{StructuredValue, ValueType};

    fn closure() -> Expr {
        let options = StructuredValue::new(TypeRef::new("Options")).with_property("Limit", 10);
        Expr::constant(
            StructuredValue::new(TypeRef::new("Closure")).with_field("options", options),
        )
    }

    #[test]
    fn test_captured_chain() {
        let options = Expr::member(
            closure(),
            MemberRef::field(TypeRef::new("Closure"), "options"),
        );
        let limit = Expr::property(options, &TypeRef::new("Options"), "Limit");
        assert_eq!(
            ClosureEvaluator.evaluate(&limit).unwrap(),
            RuntimeValue::Integer(10)
        );
    }

    #[test]
    fn test_converted_constant() {
        let expr = Expr::convert(Expr::constant(4), ValueType::Float);
        assert_eq!(
            ClosureEvaluator.evaluate(&expr).unwrap(),
            RuntimeValue::Float(4.0)
        );
    }

    #[test]
    fn test_parameter_is_not_constant() {
        let expr = Expr::property(Expr::param("p"), &TypeRef::new("Person"), "Name");
        assert_eq!(
            ClosureEvaluator.evaluate(&expr).unwrap_err(),
            TranslateError::RequiresConstant("parameter")
        );
    }
}
