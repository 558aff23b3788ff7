//! The concrete syntax tree handed over by the parser. Node shapes follow the
//! grammar productions one to one (`VarDecl`, `AllInVarDecl`, `FunDecl`,
//! `IfStmt_*`, `LoopStmt_*`, `TurnCall`, `Exp_*`, ...) with parenthesised
//! expressions already flattened away.

use num_bigint::BigInt;
use strum::{Display, EnumIter, EnumString};

use super::Span;

pub mod build;

#[derive(Debug, Clone, PartialEq)]
pub struct SyntaxTree {
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub span: Span,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub span: Span,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub span: Span,
    pub kind: StatementKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StatementKind {
    /// hand x = <initializer>;
    VarDecl {
        name: Identifier,
        initializer: Expression,
    },
    /// all in x = <initializer>;
    AllInVarDecl {
        name: Identifier,
        initializer: Expression,
    },
    /// deal f(a: Int, b) -> Int | Float: <body>
    FunDecl(Box<FunDecl>),
    /// x++; or x--;
    Bump {
        target: Expression,
        operator: BumpOperator,
    },
    /// x = <source>;
    Assign { target: Expression, source: Expression },
    /// f(1, 2);
    Call(Expression),
    /// break;
    Break,
    /// return <expression>;
    Return(Expression),
    /// return;
    ShortReturn,
    If(Box<IfStmt>),
    /// while <condition>: <body>
    While { condition: Expression, body: Block },
    /// for i in turn(low, high, step): <body>
    ForTurn {
        iterator: Identifier,
        turn: TurnCall,
        body: Block,
    },
    /// for i in <collection>: <body>
    ForIn {
        iterator: Identifier,
        collection: Expression,
        body: Block,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunDecl {
    pub name: Identifier,
    pub params: Params,
    pub return_annotation: Option<TypeUnion>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    pub span: Span,
    pub params: Vec<Param>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: Identifier,
    pub annotation: Option<TypeUnion>,
}

/// One or more type names joined with `|`
#[derive(Debug, Clone, PartialEq)]
pub struct TypeUnion {
    pub span: Span,
    pub members: Vec<TypeName>,
}

/// Type annotation tokens recognized by the grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
pub enum TypeName {
    Int,
    Float,
    Bool,
    String,
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum BumpOperator {
    #[strum(serialize = "++")]
    Increment,
    #[strum(serialize = "--")]
    Decrement,
}

/// `if` with an optional `else` arm. A missing alternate is the short form.
#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub span: Span,
    pub condition: Expression,
    pub consequent: Block,
    pub alternate: Option<ElseArm>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElseArm {
    /// else if ...
    If(Box<IfStmt>),
    /// else: <block>
    Block(Block),
}

/// turn(low, high, step). Arity is validated during analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnCall {
    pub span: Span,
    pub arguments: Vec<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub span: Span,
    pub kind: ExpressionKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind {
    IntLiteral(BigInt),
    FloatLiteral(f64),
    StringLiteral(String),
    BoolLiteral(bool),
    Identifier(Identifier),
    Binary {
        lhs: Box<Expression>,
        operator: BinaryOperatorKind,
        rhs: Box<Expression>,
    },
    Unary {
        operator: UnaryOperatorKind,
        operand: Box<Expression>,
    },
    Call {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },
    Subscript {
        base: Box<Expression>,
        index: Box<Expression>,
    },
    Member {
        object: Box<Expression>,
        field: Identifier,
    },
    Array(Vec<Expression>),
    Object(Vec<Member>),
}

/// key: value inside an object literal
#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub key: Identifier,
    pub value: Expression,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
pub enum BinaryOperatorKind {
    #[strum(serialize = "+")]
    Add,
    #[strum(serialize = "-")]
    Subtract,
    #[strum(serialize = "*")]
    Multiply,
    #[strum(serialize = "/")]
    Divide,
    #[strum(serialize = "%")]
    Modulus,
    #[strum(serialize = "%%")]
    FloorDivide,
    #[strum(serialize = "**")]
    Power,
    #[strum(serialize = "==")]
    Equals,
    #[strum(serialize = "!=")]
    NotEquals,
    #[strum(serialize = "<")]
    LessThan,
    #[strum(serialize = "<=")]
    LessThanOrEqualTo,
    #[strum(serialize = ">")]
    GreaterThan,
    #[strum(serialize = ">=")]
    GreaterThanOrEqualTo,
    #[strum(serialize = "and")]
    LogicalAnd,
    #[strum(serialize = "or")]
    LogicalOr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperatorClass {
    Arithmetic,
    Comparison,
    Logical,
}

impl BinaryOperatorKind {
    pub fn class(self) -> BinaryOperatorClass {
        match self {
            Self::Add
            | Self::Subtract
            | Self::Multiply
            | Self::Divide
            | Self::Modulus
            | Self::FloorDivide
            | Self::Power => BinaryOperatorClass::Arithmetic,
            Self::Equals
            | Self::NotEquals
            | Self::LessThan
            | Self::LessThanOrEqualTo
            | Self::GreaterThan
            | Self::GreaterThanOrEqualTo => BinaryOperatorClass::Comparison,
            Self::LogicalAnd | Self::LogicalOr => BinaryOperatorClass::Logical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
pub enum UnaryOperatorKind {
    #[strum(serialize = "-")]
    Negate,
    #[strum(serialize = "!")]
    LogicalNot,
}
