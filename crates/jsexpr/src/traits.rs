//! Host-supplied collaborators: annotation metadata, constant evaluation and
//! member renaming.

use crate::error::TranslateError;
use crate::ir::{Expr, MemberRef, MethodRef, TypeRef};
use crate::value::RuntimeValue;
use serde::{Deserialize, Serialize};

/// How an annotated declaration is referenced from generated JavaScript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ContextAnnotation {
    /// Rendered as a bare global name, e.g. `getInfo()`. A presence-only
    /// annotation means this.
    Global,
    /// On a type: every member access on an instance renders as `this.member`.
    This,
    /// On a member or method: rendered as `this.member`.
    OnThis,
}

/// Annotation metadata attached to declarations.
///
/// Implementations must be pure; the translator may query the same
/// declaration many times.
pub trait AnnotationLookup: Send + Sync {
    fn type_annotation(&self, ty: &TypeRef) -> Option<ContextAnnotation>;

    fn member_annotation(&self, member: &MemberRef) -> Option<ContextAnnotation>;

    fn method_annotation(&self, method: &MethodRef) -> Option<ContextAnnotation>;
}

/// Lookup that reports no annotations anywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAnnotations;

impl AnnotationLookup for NoAnnotations {
    fn type_annotation(&self, _ty: &TypeRef) -> Option<ContextAnnotation> {
        None
    }

    fn member_annotation(&self, _member: &MemberRef) -> Option<ContextAnnotation> {
        None
    }

    fn method_annotation(&self, _method: &MethodRef) -> Option<ContextAnnotation> {
        None
    }
}

/// Resolves sub-expressions to captured values.
pub trait Evaluator: Send + Sync {
    /// Evaluate `expr` to a constant.
    ///
    /// Must fail with [`TranslateError::RequiresConstant`] when `expr` depends
    /// on the lambda's parameters; the translator then renders it as a
    /// property path instead.
    fn evaluate(&self, expr: &Expr) -> Result<RuntimeValue, TranslateError>;
}

/// Caller-supplied member renaming: `(member, is_simple_member) -> label`.
pub type MemberReplacement = dyn Fn(&MemberRef, bool) -> String + Send + Sync;
