//! Compile entry point.

use crate::config::TranslatorConfig;
use crate::error::TranslateError;
use crate::evaluate::ClosureEvaluator;
use crate::ir::Lambda;
use crate::output::context::ContextResolver;
use crate::output::javascript::Translator;
use crate::traits::{AnnotationLookup, Evaluator, MemberReplacement, NoAnnotations};
use std::sync::Arc;

/// A lambda prepared for translation to JavaScript.
///
/// ```
/// use jsexpr::{Expr, JavascriptExpression, Lambda, TypeRef};
///
/// let person = TypeRef::new("Person");
/// let lambda = Lambda::unary("p", Expr::property(Expr::param("p"), &person, "Name"));
///
/// let function = JavascriptExpression::new(lambda.clone()).compile().unwrap();
/// assert_eq!(function, "function (p){return (p.Name);}");
///
/// let path = JavascriptExpression::new(lambda).inline(true).compile().unwrap();
/// assert_eq!(path, "Name");
/// ```
///
/// `compile` keeps all per-call state local, so one expression can be
/// compiled from many threads at once.
#[derive(Clone)]
pub struct JavascriptExpression {
    lambda: Lambda,
    inline: bool,
    member_replacement: Option<Arc<MemberReplacement>>,
    annotations: Arc<dyn AnnotationLookup>,
    evaluator: Arc<dyn Evaluator>,
}

impl JavascriptExpression {
    pub fn new(lambda: Lambda) -> Self {
        Self {
            lambda,
            inline: false,
            member_replacement: None,
            annotations: Arc::new(NoAnnotations),
            evaluator: Arc::new(ClosureEvaluator),
        }
    }

    /// Emit a bare expression/property path instead of a function literal.
    /// Requires a single-parameter lambda.
    pub fn inline(mut self, inline: bool) -> Self {
        self.inline = inline;
        self
    }

    pub fn with_member_replacement<F>(mut self, replace: F) -> Self
    where
        F: Fn(&crate::ir::MemberRef, bool) -> String + Send + Sync + 'static,
    {
        self.member_replacement = Some(Arc::new(replace));
        self
    }

    pub fn with_annotations(mut self, annotations: impl AnnotationLookup + 'static) -> Self {
        self.annotations = Arc::new(annotations);
        self
    }

    pub fn with_evaluator(mut self, evaluator: impl Evaluator + 'static) -> Self {
        self.evaluator = Arc::new(evaluator);
        self
    }

    /// Apply the mode and annotation table from `config`.
    pub fn with_config(self, config: &TranslatorConfig) -> Self {
        self.inline(config.inline)
            .with_annotations(config.annotations.clone())
    }

    pub fn lambda(&self) -> &Lambda {
        &self.lambda
    }

    pub fn is_inline(&self) -> bool {
        self.inline
    }

    /// Translate the lambda to JavaScript.
    pub fn compile(&self) -> Result<String, TranslateError> {
        compile_lambda(
            &self.lambda,
            self.inline,
            self.annotations.as_ref(),
            self.member_replacement.as_deref(),
            self.evaluator.as_ref(),
        )
    }
}

impl From<Lambda> for JavascriptExpression {
    fn from(lambda: Lambda) -> Self {
        Self::new(lambda)
    }
}

impl std::fmt::Debug for JavascriptExpression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JavascriptExpression")
            .field("lambda", &self.lambda)
            .field("inline", &self.inline)
            .field("member_replacement", &self.member_replacement.is_some())
            .finish_non_exhaustive()
    }
}

/// Compile `lambda` with no annotations and the default evaluator.
pub fn compile(
    lambda: &Lambda,
    inline: bool,
    member_replacement: Option<&MemberReplacement>,
) -> Result<String, TranslateError> {
    compile_lambda(
        lambda,
        inline,
        &NoAnnotations,
        member_replacement,
        &ClosureEvaluator,
    )
}

#[tracing::instrument(skip_all, fields(inline = inline, params = lambda.params.len()))]
fn compile_lambda(
    lambda: &Lambda,
    inline: bool,
    annotations: &dyn AnnotationLookup,
    member_replacement: Option<&MemberReplacement>,
    evaluator: &dyn Evaluator,
) -> Result<String, TranslateError> {
    let resolver = ContextResolver::new(annotations, member_replacement);
    let mut translator = Translator::new(inline, resolver, evaluator);
    let body = &lambda.body;

    let js = if inline {
        if lambda.params.len() != 1 {
            return Err(TranslateError::ArityMismatch {
                context: "inline expression parameters",
                expected: 1,
                got: lambda.params.len(),
            });
        }
        translator.set_simple_member(body.is_simple_member());
        translator.text(body)?
    } else {
        format!(
            "function ({}){{return ({});}}",
            lambda.params.join(","),
            translator.text(body)?
        )
    };

    tracing::debug!(len = js.len(), "compiled");
    Ok(js)
}
