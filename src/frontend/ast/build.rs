//! Shorthand constructors for syntax tree nodes
//!
//! Nodes built here carry an empty [`Span`]. Parsers which track positions
//! should build the nodes directly.

use num_bigint::BigInt;

use super::{
    BinaryOperatorKind, Block, BumpOperator, ElseArm, Expression, ExpressionKind, FunDecl,
    Identifier, IfStmt, Member, Param, Params, Statement, StatementKind, SyntaxTree, TurnCall,
    TypeName, TypeUnion, UnaryOperatorKind,
};
use crate::frontend::Span;

pub fn program(statements: Vec<Statement>) -> SyntaxTree {
    SyntaxTree { statements }
}

pub fn identifier(name: &str) -> Identifier {
    Identifier {
        span: Span::default(),
        name: name.to_string(),
    }
}

pub fn block(statements: Vec<Statement>) -> Block {
    Block {
        span: Span::default(),
        statements,
    }
}

fn statement(kind: StatementKind) -> Statement {
    Statement {
        span: Span::default(),
        kind,
    }
}

fn expression(kind: ExpressionKind) -> Expression {
    Expression {
        span: Span::default(),
        kind,
    }
}

// Statements

/// hand name = initializer;
pub fn var(name: &str, initializer: Expression) -> Statement {
    statement(StatementKind::VarDecl {
        name: identifier(name),
        initializer,
    })
}

/// all in name = initializer;
pub fn all_in(name: &str, initializer: Expression) -> Statement {
    statement(StatementKind::AllInVarDecl {
        name: identifier(name),
        initializer,
    })
}

pub fn fun(
    name: &str,
    params: Vec<Param>,
    return_annotation: Option<&[TypeName]>,
    body: Vec<Statement>,
) -> Statement {
    statement(StatementKind::FunDecl(Box::new(FunDecl {
        name: identifier(name),
        params: Params {
            span: Span::default(),
            params,
        },
        return_annotation: return_annotation.map(type_union),
        body: block(body),
    })))
}

pub fn param(name: &str) -> Param {
    Param {
        name: identifier(name),
        annotation: None,
    }
}

pub fn typed_param(name: &str, annotation: &[TypeName]) -> Param {
    Param {
        name: identifier(name),
        annotation: Some(type_union(annotation)),
    }
}

pub fn type_union(members: &[TypeName]) -> TypeUnion {
    TypeUnion {
        span: Span::default(),
        members: members.to_vec(),
    }
}

pub fn increment(target: Expression) -> Statement {
    statement(StatementKind::Bump {
        target,
        operator: BumpOperator::Increment,
    })
}

pub fn decrement(target: Expression) -> Statement {
    statement(StatementKind::Bump {
        target,
        operator: BumpOperator::Decrement,
    })
}

pub fn assign(target: Expression, source: Expression) -> Statement {
    statement(StatementKind::Assign { target, source })
}

/// A call evaluated as a statement
pub fn call_statement(callee: &str, arguments: Vec<Expression>) -> Statement {
    statement(StatementKind::Call(call(callee, arguments)))
}

pub fn break_statement() -> Statement {
    statement(StatementKind::Break)
}

pub fn return_statement(expression: Expression) -> Statement {
    statement(StatementKind::Return(expression))
}

pub fn short_return() -> Statement {
    statement(StatementKind::ShortReturn)
}

/// if condition: consequent
pub fn short_if(condition: Expression, consequent: Vec<Statement>) -> Statement {
    statement(StatementKind::If(Box::new(if_stmt(
        condition, consequent, None,
    ))))
}

/// if condition: consequent else: alternate
pub fn if_else(
    condition: Expression,
    consequent: Vec<Statement>,
    alternate: Vec<Statement>,
) -> Statement {
    statement(StatementKind::If(Box::new(if_stmt(
        condition,
        consequent,
        Some(ElseArm::Block(block(alternate))),
    ))))
}

/// if condition: consequent else if ...
pub fn if_else_if(condition: Expression, consequent: Vec<Statement>, alternate: IfStmt) -> Statement {
    statement(StatementKind::If(Box::new(if_stmt(
        condition,
        consequent,
        Some(ElseArm::If(Box::new(alternate))),
    ))))
}

pub fn if_stmt(
    condition: Expression,
    consequent: Vec<Statement>,
    alternate: Option<ElseArm>,
) -> IfStmt {
    IfStmt {
        span: Span::default(),
        condition,
        consequent: block(consequent),
        alternate,
    }
}

pub fn while_loop(condition: Expression, body: Vec<Statement>) -> Statement {
    statement(StatementKind::While {
        condition,
        body: block(body),
    })
}

/// for iterator in turn(arguments...): body
pub fn for_turn(iterator: &str, arguments: Vec<Expression>, body: Vec<Statement>) -> Statement {
    statement(StatementKind::ForTurn {
        iterator: identifier(iterator),
        turn: TurnCall {
            span: Span::default(),
            arguments,
        },
        body: block(body),
    })
}

/// for iterator in collection: body
pub fn for_in(iterator: &str, collection: Expression, body: Vec<Statement>) -> Statement {
    statement(StatementKind::ForIn {
        iterator: identifier(iterator),
        collection,
        body: block(body),
    })
}

// Expressions

pub fn int(value: impl Into<BigInt>) -> Expression {
    expression(ExpressionKind::IntLiteral(value.into()))
}

pub fn float(value: f64) -> Expression {
    expression(ExpressionKind::FloatLiteral(value))
}

pub fn string(value: &str) -> Expression {
    expression(ExpressionKind::StringLiteral(value.to_string()))
}

pub fn boolean(value: bool) -> Expression {
    expression(ExpressionKind::BoolLiteral(value))
}

pub fn id(name: &str) -> Expression {
    expression(ExpressionKind::Identifier(identifier(name)))
}

pub fn binary(lhs: Expression, operator: BinaryOperatorKind, rhs: Expression) -> Expression {
    expression(ExpressionKind::Binary {
        lhs: Box::new(lhs),
        operator,
        rhs: Box::new(rhs),
    })
}

pub fn unary(operator: UnaryOperatorKind, operand: Expression) -> Expression {
    expression(ExpressionKind::Unary {
        operator,
        operand: Box::new(operand),
    })
}

pub fn negate(operand: Expression) -> Expression {
    unary(UnaryOperatorKind::Negate, operand)
}

pub fn call(callee: &str, arguments: Vec<Expression>) -> Expression {
    expression(ExpressionKind::Call {
        callee: Box::new(id(callee)),
        arguments,
    })
}

pub fn subscript(base: Expression, index: Expression) -> Expression {
    expression(ExpressionKind::Subscript {
        base: Box::new(base),
        index: Box::new(index),
    })
}

pub fn member(object: Expression, field: &str) -> Expression {
    expression(ExpressionKind::Member {
        object: Box::new(object),
        field: identifier(field),
    })
}

pub fn array(elements: Vec<Expression>) -> Expression {
    expression(ExpressionKind::Array(elements))
}

pub fn object(members: Vec<(&str, Expression)>) -> Expression {
    expression(ExpressionKind::Object(
        members
            .into_iter()
            .map(|(key, value)| Member {
                key: identifier(key),
                value,
            })
            .collect(),
    ))
}
