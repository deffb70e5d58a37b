//! JavaScript translation of expression trees.

use super::context::{ContextResolver, RenderMode};
use super::literal;
use crate::error::TranslateError;
use crate::ir::*;
use crate::traits::Evaluator;
use crate::value::RuntimeValue;

/// Recursive-descent translator for one compile call.
///
/// Holds the call's one-shot simple-member flag, so a translator is created
/// per compile and never shared.
pub struct Translator<'a> {
    inline: bool,
    simple_member: bool,
    resolver: ContextResolver<'a>,
    evaluator: &'a dyn Evaluator,
}

impl<'a> Translator<'a> {
    pub fn new(inline: bool, resolver: ContextResolver<'a>, evaluator: &'a dyn Evaluator) -> Self {
        Self {
            inline,
            simple_member: false,
            resolver,
            evaluator,
        }
    }

    /// Arm the simple-member hint for the next member access.
    pub fn set_simple_member(&mut self, simple: bool) {
        self.simple_member = simple;
    }

    /// Translate `expr`.
    ///
    /// `None` means the node is the lambda's own parameter under inline mode:
    /// it has no text and only changes how the parent renders.
    pub fn translate(&mut self, expr: &Expr) -> Result<Option<String>, TranslateError> {
        tracing::trace!(kind = expr.kind_name(), "translate");
        let js = match expr {
            Expr::Parameter(name) => {
                if self.inline {
                    return Ok(None);
                }
                name.clone()
            }

            Expr::Index { target, args } => {
                format!("{}[{}]", self.text(target)?, self.join(args)?)
            }

            Expr::Member { target, member } => self.write_member(target, member)?,

            Expr::New(new) => self.write_new(new)?,

            Expr::MemberInit { new, bindings } => self.write_member_init(new, bindings)?,

            Expr::NewArray(items) => format!("[{}]", self.join(items)?),

            Expr::Constant(value) => literal::serialize(value, true)
                .ok_or(TranslateError::UnsupportedValueKind(value.kind_name()))?,

            Expr::Binary { op, left, right } => self.write_binary(*op, left, right)?,

            Expr::Unary { op, operand } => return self.write_unary(op, operand),

            Expr::Call {
                target,
                method,
                args,
            } => self.write_call(target.as_deref(), method, args)?,

            Expr::Conditional {
                test,
                if_true,
                if_false,
            } => {
                let mut js = format!("(({})?({})", self.text(test)?, self.text(if_true)?);
                if let Some(if_false) = if_false {
                    js.push_str(&format!(":({}))", self.text(if_false)?));
                } else {
                    js.push(')');
                }
                js
            }

            Expr::Lambda(_) | Expr::Invoke { .. } | Expr::TypeIs { .. } => {
                return Err(TranslateError::UnsupportedExpressionKind(expr.kind_name()));
            }
        };
        Ok(Some(js))
    }

    /// Translate `expr` where a textless parameter contributes nothing.
    pub fn text(&mut self, expr: &Expr) -> Result<String, TranslateError> {
        Ok(self.translate(expr)?.unwrap_or_default())
    }

    fn join(&mut self, exprs: &[Expr]) -> Result<String, TranslateError> {
        let parts = exprs
            .iter()
            .map(|e| self.text(e))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(parts.join(","))
    }

    /// Evaluate `expr` as a captured value. `Ok(None)` when it depends on the
    /// lambda's parameters.
    fn captured(&self, expr: &Expr) -> Result<Option<RuntimeValue>, TranslateError> {
        match self.evaluator.evaluate(expr) {
            Ok(value) => Ok(Some(value)),
            Err(TranslateError::RequiresConstant(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write_member(&mut self, target: &Expr, member: &MemberRef) -> Result<String, TranslateError> {
        // Only the outermost member access of the body sees the hint.
        let simple = std::mem::take(&mut self.simple_member);

        if self.inline && matches!(target, Expr::Parameter(_)) {
            return Ok(self.resolver.label(member, simple));
        }

        if let Some(owner) = self.captured(target)? {
            let resolution = self
                .resolver
                .resolve_member(member, &owner.runtime_type(), simple);
            return match resolution.mode {
                RenderMode::AsThis => Ok(format!("this.{}", resolution.label)),
                RenderMode::AsGlobalLabel => Ok(resolution.label),
                RenderMode::AsCapturedLiteral => {
                    let value = owner.read_member(member)?;
                    tracing::debug!(
                        member = %member.qualified_name(),
                        kind = value.kind_name(),
                        "captured member rendered as literal"
                    );
                    literal::serialize(&value, false)
                        .ok_or(TranslateError::UnsupportedValueKind(value.kind_name()))
                }
            };
        }

        let label = self.resolver.label(member, simple);
        Ok(match self.translate(target)? {
            Some(object) => format!("{object}.{label}"),
            None => label,
        })
    }

    fn member_pairs(&mut self, new: &NewObject) -> Result<Vec<String>, TranslateError> {
        if new.members.len() != new.args.len() {
            return Err(TranslateError::ArityMismatch {
                context: "object initializer",
                expected: new.members.len(),
                got: new.args.len(),
            });
        }
        new.members
            .iter()
            .zip(&new.args)
            .map(|(name, arg)| -> Result<String, TranslateError> {
                Ok(format!("{name}:{}", self.text(arg)?))
            })
            .collect()
    }

    fn write_new(&mut self, new: &NewObject) -> Result<String, TranslateError> {
        if new.members.len() == new.args.len() {
            Ok(format!("{{{}}}", self.member_pairs(new)?.join(",")))
        } else {
            Ok(format!(
                "new {}({})",
                new.ty.display_name(),
                self.join(&new.args)?
            ))
        }
    }

    fn write_member_init(
        &mut self,
        new: &NewObject,
        bindings: &[MemberBinding],
    ) -> Result<String, TranslateError> {
        if bindings.is_empty() {
            return self.write_new(new);
        }
        let mut pairs = bindings
            .iter()
            .map(|b| -> Result<String, TranslateError> {
                Ok(format!("{}:{}", b.member.name, self.text(&b.value)?))
            })
            .collect::<Result<Vec<_>, _>>()?;
        if !new.args.is_empty() {
            pairs.extend(self.member_pairs(new)?);
        }
        Ok(format!("{{{}}}", pairs.join(",")))
    }

    fn write_binary(
        &mut self,
        op: BinaryOp,
        left: &Expr,
        right: &Expr,
    ) -> Result<String, TranslateError> {
        match op {
            BinaryOp::Coalesce => {
                let l = self.text(left)?;
                let r = self.text(right)?;
                Ok(format!("(!({l}))?({r}):({l})"))
            }
            BinaryOp::ArrayIndex => Ok(format!("{}[{}]", self.text(left)?, self.text(right)?)),
            _ => {
                let symbol = binary_symbol(op)
                    .ok_or_else(|| TranslateError::UnsupportedOperator(format!("{op:?}")))?;
                Ok(format!("{}{symbol}{}", self.text(left)?, self.text(right)?))
            }
        }
    }

    fn write_unary(
        &mut self,
        op: &UnaryOp,
        operand: &Expr,
    ) -> Result<Option<String>, TranslateError> {
        let js = match op {
            UnaryOp::ArrayLength => format!("{}.length", self.text(operand)?),
            UnaryOp::PreIncrementAssign => format!("++{}", self.text(operand)?),
            UnaryOp::PreDecrementAssign => format!("--{}", self.text(operand)?),
            UnaryOp::PostIncrementAssign => format!("{}++", self.text(operand)?),
            UnaryOp::PostDecrementAssign => format!("{}--", self.text(operand)?),
            UnaryOp::Convert(ty) => {
                let Expr::Constant(value) = operand else {
                    // JavaScript has no static conversions; the operand stands as is.
                    return self.translate(operand);
                };
                if !ty.is_simple() {
                    return Err(TranslateError::UnsupportedConversion {
                        from: value.kind_name(),
                        to: format!("{ty:?}"),
                    });
                }
                let converted = value.convert(ty)?;
                literal::serialize(&converted, false)
                    .ok_or(TranslateError::UnsupportedValueKind(converted.kind_name()))?
            }
            other => return Err(TranslateError::UnsupportedOperator(format!("{other:?}"))),
        };
        Ok(Some(js))
    }

    fn write_call(
        &mut self,
        target: Option<&Expr>,
        method: &MethodRef,
        args: &[Expr],
    ) -> Result<String, TranslateError> {
        let instance_type = match target {
            Some(target) => self.captured(target)?.map(|v| v.runtime_type()),
            None => None,
        };

        match self.resolver.resolve_method(method, instance_type.as_ref()) {
            Some(RenderMode::AsThis) => Ok(format!("this.{}({})", method.name, self.join(args)?)),
            Some(_) => Ok(format!("{}({})", method.name, self.join(args)?)),
            None => {
                let object = match target {
                    Some(target) => self.translate(target)?,
                    None => None,
                };
                let object =
                    object.ok_or_else(|| TranslateError::UnsupportedRuntimeCall(method.qualified_name()))?;
                Ok(format!("({object}).{}({})", method.name, self.join(args)?))
            }
        }
    }
}

/// Infix text of a binary operator, `None` when it has no rendering.
///
/// `Power` shares `^` with exclusive-or; the host renders it that way.
pub fn binary_symbol(op: BinaryOp) -> Option<&'static str> {
    let symbol = match op {
        BinaryOp::Add => "+",
        BinaryOp::AddAssign => "+=",
        BinaryOp::And => "&",
        BinaryOp::AndAlso => "&&",
        BinaryOp::AndAssign => "&=",
        BinaryOp::Assign => "=",
        BinaryOp::Divide => "/",
        BinaryOp::DivideAssign => "/=",
        BinaryOp::Equal => "==",
        BinaryOp::ExclusiveOr => "^",
        BinaryOp::ExclusiveOrAssign => "^=",
        BinaryOp::GreaterThan => ">",
        BinaryOp::GreaterThanOrEqual => ">=",
        BinaryOp::LessThan => "<",
        BinaryOp::LessThanOrEqual => "<=",
        BinaryOp::Modulo => "%",
        BinaryOp::ModuloAssign => "%=",
        BinaryOp::Multiply => "*",
        BinaryOp::MultiplyAssign => "*=",
        BinaryOp::NotEqual => "!=",
        BinaryOp::Or => "|",
        BinaryOp::OrAssign => "|=",
        BinaryOp::OrElse => "||",
        BinaryOp::Power => "^",
        BinaryOp::PowerAssign => "^=",
        BinaryOp::Subtract => "-",
        BinaryOp::SubtractAssign => "-=",
        BinaryOp::Coalesce
        | BinaryOp::ArrayIndex
        | BinaryOp::AddChecked
        | BinaryOp::SubtractChecked
        | BinaryOp::MultiplyChecked
        | BinaryOp::LeftShift
        | BinaryOp::LeftShiftAssign
        | BinaryOp::RightShift
        | BinaryOp::RightShiftAssign => return None,
    };
    Some(symbol)
}
