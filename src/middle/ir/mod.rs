//! The fully typed intermediate representation produced by the analyzer,
//! rewritten by the optimizer and consumed by the code generator.
//!
//! Every expression knows its type (see [`Expression::ty`]). Variables and
//! functions are referenced through their shared [`Entity`](super::entity)
//! allocations rather than by name.

use std::{str::FromStr, sync::Arc};

use num_bigint::BigInt;

use crate::{
    frontend::ast::{BinaryOperatorKind, UnaryOperatorKind},
    middle::{
        entity::{Function, Variable},
        stdlib::Intrinsic,
        ty::Type,
    },
};

pub mod visit;

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    VariableDeclaration(VariableDeclaration),
    FunctionDeclaration(FunctionDeclaration),
    Assignment(Assignment),
    /// target++
    Increment(Expression),
    /// target--
    Decrement(Expression),
    /// A call evaluated for its side effects
    Call(Expression),
    Break,
    Return(Expression),
    ShortReturn,
    If(IfStatement),
    ShortIf(ShortIfStatement),
    While(WhileStatement),
    For(ForStatement),
    ForTurn(ForTurnStatement),
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub variable: Arc<Variable>,
    pub initializer: Expression,
}

/// The body lives with the declaration rather than the function entity, which
/// keeps the entity immutable once its type is resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub function: Arc<Function>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: Expression,
    pub source: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub test: Expression,
    pub consequent: Vec<Statement>,
    pub alternate: Alternate,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Alternate {
    /// else if ...
    If(Box<IfStatement>),
    /// else: ... (possibly empty)
    Else(Vec<Statement>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShortIfStatement {
    pub test: Expression,
    pub consequent: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStatement {
    pub test: Expression,
    pub body: Vec<Statement>,
}

/// for iterator in collection
#[derive(Debug, Clone, PartialEq)]
pub struct ForStatement {
    pub iterator: Arc<Variable>,
    pub collection: Expression,
    pub body: Vec<Statement>,
}

/// for iterator in turn(low, high, step)
#[derive(Debug, Clone, PartialEq)]
pub struct ForTurnStatement {
    pub iterator: Arc<Variable>,
    pub low: Expression,
    pub direction: TurnDirection,
    pub high: Expression,
    pub step: Expression,
    pub body: Vec<Statement>,
}

/// Decided once during analysis from the sign of a literal step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnDirection {
    Ascending,
    Descending,
}

impl TurnDirection {
    /// The comparison that keeps the loop running
    pub fn operator(self) -> BinaryOperatorKind {
        match self {
            TurnDirection::Ascending => BinaryOperatorKind::LessThan,
            TurnDirection::Descending => BinaryOperatorKind::GreaterThan,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    IntLiteral(BigInt),
    FloatLiteral(f64),
    StringLiteral(String),
    BoolLiteral(bool),
    Variable(Arc<Variable>),
    /// A function referenced by name outside of a call
    Function(Arc<Function>),
    Array(ArrayExpression),
    /// [] with its element type
    EmptyArray(Type),
    Object(ObjectExpression),
    Binary(Box<BinaryExpression>),
    Unary(Box<UnaryExpression>),
    Subscript(Box<SubscriptExpression>),
    Member(Box<MemberExpression>),
    Call(FunctionCall),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayExpression {
    pub elements: Vec<Expression>,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectExpression {
    pub members: Vec<ObjectMember>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectMember {
    pub key: String,
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpression {
    pub op: BinaryOp,
    pub left: Expression,
    pub right: Expression,
    pub ty: Type,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Operator(BinaryOperatorKind),
    /// hypot, max, min
    Intrinsic(Intrinsic),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpression {
    pub op: UnaryOp,
    pub operand: Expression,
    pub ty: Type,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Operator(UnaryOperatorKind),
    /// sqrt, sin, bytes, ...
    Intrinsic(Intrinsic),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptExpression {
    pub array: Expression,
    pub index: Expression,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpression {
    pub object: Expression,
    pub field: String,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    pub callee: Arc<Function>,
    pub args: Vec<Expression>,
    pub ty: Type,
}

impl Expression {
    pub fn ty(&self) -> Type {
        match self {
            Expression::IntLiteral(_) => Type::INT,
            Expression::FloatLiteral(_) => Type::FLOAT,
            Expression::StringLiteral(_) => Type::STRING,
            Expression::BoolLiteral(_) => Type::BOOLEAN,
            Expression::Variable(variable) => variable.ty.clone(),
            Expression::Function(function) => Type::Function(function.ty()),
            Expression::Array(array) => array.ty.clone(),
            Expression::EmptyArray(element) => Type::array(element.clone()),
            Expression::Object(_) => Type::ANY,
            Expression::Binary(binary) => binary.ty.clone(),
            Expression::Unary(unary) => unary.ty.clone(),
            Expression::Subscript(subscript) => subscript.ty.clone(),
            Expression::Member(member) => member.ty.clone(),
            Expression::Call(call) => call.ty.clone(),
        }
    }

    pub fn binary(op: impl Into<BinaryOp>, left: Expression, right: Expression, ty: Type) -> Self {
        Expression::Binary(Box::new(BinaryExpression {
            op: op.into(),
            left,
            right,
            ty,
        }))
    }

    pub fn unary(op: impl Into<UnaryOp>, operand: Expression, ty: Type) -> Self {
        Expression::Unary(Box::new(UnaryExpression {
            op: op.into(),
            operand,
            ty,
        }))
    }

    /// Negation keeps the operand's type
    pub fn negate(operand: Expression) -> Self {
        let ty = operand.ty();
        Expression::unary(UnaryOperatorKind::Negate, operand, ty)
    }

    /// The element type is taken from the first element alone
    pub fn array(elements: Vec<Expression>) -> Self {
        match elements.first() {
            None => Expression::EmptyArray(Type::ANY),
            Some(first) => Expression::Array(ArrayExpression {
                ty: Type::array(first.ty()),
                elements,
            }),
        }
    }

    pub fn subscript(array: Expression, index: Expression) -> Self {
        let ty = array.ty().element_type();
        Expression::Subscript(Box::new(SubscriptExpression { array, index, ty }))
    }

    /// Fields are untyped, so member access is always `any`
    pub fn member(object: Expression, field: impl Into<String>) -> Self {
        Expression::Member(Box::new(MemberExpression {
            object,
            field: field.into(),
            ty: Type::ANY,
        }))
    }

    /// Calls to fixed arity intrinsics become unary or binary operator nodes
    /// carrying the intrinsic, every other call stays a call.
    pub fn call(callee: Arc<Function>, mut args: Vec<Expression>) -> Self {
        let ty = callee.return_type();

        let intrinsic = callee
            .intrinsic
            .then(|| Intrinsic::from_str(&callee.name).ok())
            .flatten();

        match (intrinsic, args.len()) {
            (Some(intrinsic), 1) => {
                let operand = args.remove(0);
                Expression::unary(intrinsic, operand, ty)
            }
            (Some(intrinsic), 2) => {
                let right = args.remove(1);
                let left = args.remove(0);
                Expression::binary(intrinsic, left, right, ty)
            }
            _ => Expression::Call(FunctionCall { callee, args, ty }),
        }
    }

    pub fn is_numeric_literal(&self) -> bool {
        matches!(self, Expression::IntLiteral(_) | Expression::FloatLiteral(_))
    }

    /// Both sides are references to the same entity
    pub fn is_same_reference(&self, other: &Expression) -> bool {
        match (self, other) {
            (Expression::Variable(a), Expression::Variable(b)) => Arc::ptr_eq(a, b),
            (Expression::Function(a), Expression::Function(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<BinaryOperatorKind> for BinaryOp {
    fn from(kind: BinaryOperatorKind) -> Self {
        BinaryOp::Operator(kind)
    }
}

impl From<Intrinsic> for BinaryOp {
    fn from(intrinsic: Intrinsic) -> Self {
        BinaryOp::Intrinsic(intrinsic)
    }
}

impl From<UnaryOperatorKind> for UnaryOp {
    fn from(kind: UnaryOperatorKind) -> Self {
        UnaryOp::Operator(kind)
    }
}

impl From<Intrinsic> for UnaryOp {
    fn from(intrinsic: Intrinsic) -> Self {
        UnaryOp::Intrinsic(intrinsic)
    }
}

impl BinaryOp {
    pub fn operator(self) -> Option<BinaryOperatorKind> {
        match self {
            BinaryOp::Operator(kind) => Some(kind),
            BinaryOp::Intrinsic(_) => None,
        }
    }
}

impl core::fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BinaryOp::Operator(kind) => write!(f, "{kind}"),
            BinaryOp::Intrinsic(intrinsic) => write!(f, "{intrinsic}"),
        }
    }
}

impl core::fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnaryOp::Operator(kind) => write!(f, "{kind}"),
            UnaryOp::Intrinsic(intrinsic) => write!(f, "{intrinsic}"),
        }
    }
}
