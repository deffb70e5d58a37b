//! Translation of typed expression trees into JavaScript source text.
//!
//! `jsexpr` takes a lambda captured as an expression tree, including values
//! it closed over, and produces either a JavaScript function literal or a
//! bare property path for data-binding attributes.
//!
//! # Architecture
//!
//! ```text
//! Lambda (ir)  ──> Translator ──────────────> "function (p){return (p.Name);}"
//!                    │  ├─ ContextResolver     "Name"            (inline)
//!                    │  │    annotations, member replacement hook
//!                    │  └─ literal::serialize  captured values
//!                    └─ Evaluator              reads closed-over values
//! ```
//!
//! # Example
//!
//! ```
//! use jsexpr::{BinaryOp, Expr, JavascriptExpression, Lambda, TypeRef};
//!
//! let person = TypeRef::new("Person");
//! let age = Expr::property(Expr::param("p"), &person, "Age");
//! let lambda = Lambda::unary("p", Expr::binary(age, BinaryOp::GreaterThan, Expr::constant(17)));
//!
//! let js = JavascriptExpression::new(lambda).compile().unwrap();
//! assert_eq!(js, "function (p){return (p.Age>17);}");
//! ```
//!
//! # Captured values
//!
//! Members of closed-over values are read at translation time and emitted
//! as literals, unless annotations say the owner lives on `this` or in the
//! global scope. See [`AnnotationTable`] and [`TranslatorConfig`].

pub mod annotations;
pub mod config;
pub mod error;
pub mod evaluate;
pub mod expression;
pub mod ir;
pub mod output;
pub mod traits;
pub mod value;

// Re-exports: entry points
pub use expression::{JavascriptExpression, compile};

// Re-exports: IR types
pub use ir::{
    BinaryOp, Expr, Lambda, MemberBinding, MemberKind, MemberRef, MethodRef, NewObject, TypeRef,
    UnaryOp,
};
pub use value::{RuntimeValue, StructuredValue, ValueType};

// Re-exports: Traits
pub use traits::{AnnotationLookup, ContextAnnotation, Evaluator, MemberReplacement, NoAnnotations};

pub use annotations::AnnotationTable;
pub use config::{ConfigError, TranslatorConfig, config_schema};
pub use error::TranslateError;
pub use evaluate::ClosureEvaluator;
