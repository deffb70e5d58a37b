//! Expression-tree IR consumed by the translator.
//!
//! A front-end lowers a host lambda into a [`Lambda`]: a list of parameter
//! names and a single body [`Expr`]. The tree is owned top-down and never
//! mutated by the translator.

mod identity;

pub use identity::{MemberKind, MemberRef, MethodRef, TypeRef};

use crate::value::{RuntimeValue, ValueType};
use serde::{Deserialize, Serialize};

/// A single-expression function: parameter names plus one body expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lambda {
    pub params: Vec<String>,
    pub body: Expr,
}

impl Lambda {
    pub fn new(params: Vec<String>, body: Expr) -> Self {
        Self { params, body }
    }

    /// Lambda with a single parameter.
    pub fn unary(param: impl Into<String>, body: Expr) -> Self {
        Self {
            params: vec![param.into()],
            body,
        }
    }
}

/// Object construction: `new T(args)`, optionally with positional member
/// names (anonymous-object style construction).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewObject {
    pub ty: TypeRef,
    /// Member names matched positionally against `args`.
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub args: Vec<Expr>,
}

/// `member = value` inside an object initializer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberBinding {
    pub member: MemberRef,
    pub value: Expr,
}

/// An expression node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// Reference to one of the lambda's parameters.
    Parameter(String),

    /// Field or property access: `target.member`.
    Member { target: Box<Expr>, member: MemberRef },

    /// Indexer access: `target[args]`.
    Index { target: Box<Expr>, args: Vec<Expr> },

    /// Object construction.
    New(NewObject),

    /// Object construction followed by member bindings.
    MemberInit {
        new: NewObject,
        bindings: Vec<MemberBinding>,
    },

    /// Array construction from element expressions.
    NewArray(Vec<Expr>),

    /// An already-evaluated value (literal or captured closure state).
    Constant(RuntimeValue),

    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    Unary { op: UnaryOp, operand: Box<Expr> },

    /// Method call; `target` is `None` for static methods.
    Call {
        target: Option<Box<Expr>>,
        method: MethodRef,
        args: Vec<Expr>,
    },

    Conditional {
        test: Box<Expr>,
        if_true: Box<Expr>,
        if_false: Option<Box<Expr>>,
    },

    /// Nested lambda. Not translatable.
    Lambda(Box<Lambda>),

    /// Delegate invocation. Not translatable.
    Invoke { target: Box<Expr>, args: Vec<Expr> },

    /// Runtime type test. Not translatable.
    TypeIs { operand: Box<Expr>, ty: TypeRef },
}

impl Expr {
    pub fn param(name: impl Into<String>) -> Self {
        Expr::Parameter(name.into())
    }

    pub fn constant(value: impl Into<RuntimeValue>) -> Self {
        Expr::Constant(value.into())
    }

    pub fn member(target: Expr, member: MemberRef) -> Self {
        Expr::Member {
            target: Box::new(target),
            member,
        }
    }

    /// Property access on `target` declared by `ty`.
    pub fn property(target: Expr, ty: &TypeRef, name: impl Into<String>) -> Self {
        Expr::member(target, MemberRef::property(ty.clone(), name))
    }

    pub fn index(target: Expr, args: Vec<Expr>) -> Self {
        Expr::Index {
            target: Box::new(target),
            args,
        }
    }

    pub fn binary(left: Expr, op: BinaryOp, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn convert(operand: Expr, ty: ValueType) -> Self {
        Expr::unary(UnaryOp::Convert(ty), operand)
    }

    pub fn call(target: Option<Expr>, method: MethodRef, args: Vec<Expr>) -> Self {
        Expr::Call {
            target: target.map(Box::new),
            method,
            args,
        }
    }

    pub fn conditional(test: Expr, if_true: Expr, if_false: Option<Expr>) -> Self {
        Expr::Conditional {
            test: Box::new(test),
            if_true: Box::new(if_true),
            if_false: if_false.map(Box::new),
        }
    }

    /// Short node-kind name used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Parameter(_) => "parameter",
            Expr::Member { .. } => "member",
            Expr::Index { .. } => "index",
            Expr::New(_) => "new",
            Expr::MemberInit { .. } => "member_init",
            Expr::NewArray(_) => "new_array",
            Expr::Constant(_) => "constant",
            Expr::Binary { .. } => "binary",
            Expr::Unary { .. } => "unary",
            Expr::Call { .. } => "call",
            Expr::Conditional { .. } => "conditional",
            Expr::Lambda(_) => "lambda",
            Expr::Invoke { .. } => "invoke",
            Expr::TypeIs { .. } => "type_is",
        }
    }

    /// True for a member access, or a conversion directly wrapping one.
    pub fn is_simple_member(&self) -> bool {
        match self {
            Expr::Member { .. } => true,
            Expr::Unary {
                op: UnaryOp::Convert(_),
                operand,
            } => matches!(operand.as_ref(), Expr::Member { .. }),
            _ => false,
        }
    }
}

/// Binary operator codes.
///
/// Mirrors the host's binary node types, including ones with no JavaScript
/// rendering (shifts, checked arithmetic) so they can be rejected explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Add,
    AddAssign,
    AddChecked,
    And,
    AndAlso,
    AndAssign,
    ArrayIndex,
    Assign,
    Coalesce,
    Divide,
    DivideAssign,
    Equal,
    ExclusiveOr,
    ExclusiveOrAssign,
    GreaterThan,
    GreaterThanOrEqual,
    LeftShift,
    LeftShiftAssign,
    LessThan,
    LessThanOrEqual,
    Modulo,
    ModuloAssign,
    Multiply,
    MultiplyAssign,
    MultiplyChecked,
    NotEqual,
    Or,
    OrAssign,
    OrElse,
    Power,
    PowerAssign,
    RightShift,
    RightShiftAssign,
    Subtract,
    SubtractAssign,
    SubtractChecked,
}

/// Unary operator codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    ArrayLength,
    /// Type conversion to the given target type.
    Convert(ValueType),
    ConvertChecked(ValueType),
    Decrement,
    Increment,
    Negate,
    NegateChecked,
    Not,
    OnesComplement,
    PostDecrementAssign,
    PostIncrementAssign,
    PreDecrementAssign,
    PreIncrementAssign,
    Quote,
    Throw,
    TypeAs(TypeRef),
    UnaryPlus,
    Unbox(TypeRef),
}
