//! Local rewrites of the typed IR
//!
//! The optimizer makes a single bottom up pass over the program. It folds
//! constant expressions, applies algebraic identities, and drops statements
//! that can never have an effect. Statements may disappear or be replaced by
//! the statements of a taken branch, so every statement rewrites into a list
//! which is spliced into the enclosing block.
//!
//! The input is assumed to be well typed analyzer output. Nothing here can
//! fail.

use std::cmp::Ordering;

use crate::middle::ir::{
    Alternate, Assignment, Expression, ForStatement, ForTurnStatement, FunctionDeclaration,
    IfStatement, Program, ShortIfStatement, Statement, TurnDirection, VariableDeclaration,
    WhileStatement,
};

mod expression;
mod fold;

pub use expression::optimize_expression;

pub fn optimize(program: Program) -> Program {
    Program {
        statements: optimize_block(program.statements),
    }
}

fn optimize_block(statements: Vec<Statement>) -> Vec<Statement> {
    statements.into_iter().flat_map(optimize_statement).collect()
}

/// Rewrites one statement into the statements that replace it
pub fn optimize_statement(statement: Statement) -> Vec<Statement> {
    match statement {
        Statement::VariableDeclaration(declaration) => {
            vec![Statement::VariableDeclaration(VariableDeclaration {
                variable: declaration.variable,
                initializer: optimize_expression(declaration.initializer),
            })]
        }
        Statement::FunctionDeclaration(declaration) => {
            vec![Statement::FunctionDeclaration(FunctionDeclaration {
                function: declaration.function,
                body: optimize_block(declaration.body),
            })]
        }
        Statement::Assignment(assignment) => eliminate_self_assignment(assignment),
        Statement::Increment(target) => vec![Statement::Increment(optimize_expression(target))],
        Statement::Decrement(target) => vec![Statement::Decrement(optimize_expression(target))],
        Statement::Call(call) => vec![Statement::Call(optimize_expression(call))],
        Statement::Return(expression) => vec![Statement::Return(optimize_expression(expression))],
        statement @ (Statement::Break | Statement::ShortReturn) => vec![statement],
        Statement::If(statement) => optimize_if_statement(statement),
        Statement::ShortIf(statement) => optimize_short_if_statement(statement),
        Statement::While(statement) => optimize_while_statement(statement),
        Statement::For(statement) => optimize_for_statement(statement),
        Statement::ForTurn(statement) => optimize_for_turn_statement(statement),
    }
}

/// `x = x` does nothing
fn eliminate_self_assignment(assignment: Assignment) -> Vec<Statement> {
    let source = optimize_expression(assignment.source);
    let target = optimize_expression(assignment.target);

    if source.is_same_reference(&target) {
        return Vec::new();
    }

    vec![Statement::Assignment(Assignment { target, source })]
}

/// Only a literal `true` or `false` test selects a branch. Else if chains
/// are optimized as statements in their own right, and stay chained while
/// they remain a single if statement.
fn optimize_if_statement(statement: IfStatement) -> Vec<Statement> {
    let test = optimize_expression(statement.test);
    let consequent = optimize_block(statement.consequent);

    let alternate = match statement.alternate {
        Alternate::If(else_if) => {
            let mut statements = optimize_if_statement(*else_if);

            match statements.pop() {
                Some(Statement::If(else_if)) if statements.is_empty() => {
                    Alternate::If(Box::new(else_if))
                }
                last => {
                    statements.extend(last);
                    Alternate::Else(statements)
                }
            }
        }
        Alternate::Else(statements) => Alternate::Else(optimize_block(statements)),
    };

    match test {
        Expression::BoolLiteral(true) => consequent,
        Expression::BoolLiteral(false) => match alternate {
            Alternate::If(else_if) => vec![Statement::If(*else_if)],
            Alternate::Else(statements) => statements,
        },
        test => vec![Statement::If(IfStatement {
            test,
            consequent,
            alternate,
        })],
    }
}

fn optimize_short_if_statement(statement: ShortIfStatement) -> Vec<Statement> {
    let test = optimize_expression(statement.test);
    let consequent = optimize_block(statement.consequent);

    match test {
        Expression::BoolLiteral(true) => consequent,
        Expression::BoolLiteral(false) => Vec::new(),
        test => vec![Statement::ShortIf(ShortIfStatement { test, consequent })],
    }
}

/// `while false` never runs
fn optimize_while_statement(statement: WhileStatement) -> Vec<Statement> {
    let test = optimize_expression(statement.test);

    if test == Expression::BoolLiteral(false) {
        return Vec::new();
    }

    vec![Statement::While(WhileStatement {
        test,
        body: optimize_block(statement.body),
    })]
}

/// Iterating over `[]` never runs
fn optimize_for_statement(statement: ForStatement) -> Vec<Statement> {
    let collection = optimize_expression(statement.collection);

    if matches!(collection, Expression::EmptyArray(_)) {
        return Vec::new();
    }

    vec![Statement::For(ForStatement {
        iterator: statement.iterator,
        collection,
        body: optimize_block(statement.body),
    })]
}

/// A turn whose literal bounds are already past each other in the direction
/// of travel never runs
fn optimize_for_turn_statement(statement: ForTurnStatement) -> Vec<Statement> {
    let low = optimize_expression(statement.low);
    let high = optimize_expression(statement.high);
    let step = optimize_expression(statement.step);

    let never_runs = matches!(
        (statement.direction, fold::compare_literals(&low, &high)),
        (TurnDirection::Ascending, Some(Ordering::Greater))
            | (TurnDirection::Descending, Some(Ordering::Less))
    );

    if never_runs {
        return Vec::new();
    }

    vec![Statement::ForTurn(ForTurnStatement {
        iterator: statement.iterator,
        low,
        direction: statement.direction,
        high,
        step,
        body: optimize_block(statement.body),
    })]
}
