use super::fold::{self, is_one, is_zero};
use crate::{
    frontend::ast::{BinaryOperatorKind, UnaryOperatorKind},
    middle::{
        ir::{
            ArrayExpression, BinaryExpression, Expression, FunctionCall, MemberExpression,
            ObjectExpression, ObjectMember, SubscriptExpression, UnaryExpression, UnaryOp,
        },
        ty::Type,
    },
};

/// Rewrites an expression bottom up. Each node is visited once.
pub fn optimize_expression(expression: Expression) -> Expression {
    match expression {
        Expression::Variable(variable) if variable.name == "true" || variable.name == "false" => {
            Expression::BoolLiteral(variable.name == "true")
        }
        Expression::Binary(binary) => optimize_binary(*binary),
        Expression::Unary(unary) => optimize_unary(*unary),
        Expression::Array(array) => Expression::Array(ArrayExpression {
            elements: array.elements.into_iter().map(optimize_expression).collect(),
            ty: array.ty,
        }),
        Expression::Object(object) => Expression::Object(ObjectExpression {
            members: object
                .members
                .into_iter()
                .map(|member| ObjectMember {
                    key: member.key,
                    value: optimize_expression(member.value),
                })
                .collect(),
        }),
        Expression::Subscript(subscript) => {
            let SubscriptExpression { array, index, ty } = *subscript;

            Expression::Subscript(Box::new(SubscriptExpression {
                array: optimize_expression(array),
                index: optimize_expression(index),
                ty,
            }))
        }
        Expression::Member(member) => {
            let MemberExpression { object, field, ty } = *member;

            Expression::Member(Box::new(MemberExpression {
                object: optimize_expression(object),
                field,
                ty,
            }))
        }
        // The callee is never rewritten
        Expression::Call(call) => Expression::Call(FunctionCall {
            callee: call.callee,
            args: call.args.into_iter().map(optimize_expression).collect(),
            ty: call.ty,
        }),
        expression @ (Expression::IntLiteral(_)
        | Expression::FloatLiteral(_)
        | Expression::StringLiteral(_)
        | Expression::BoolLiteral(_)
        | Expression::Variable(_)
        | Expression::Function(_)
        | Expression::EmptyArray(_)) => expression,
    }
}

/// Which part of an `and`/`or` survives a literal operand
enum ShortCircuit {
    Literal(bool),
    Left,
    Right,
}

/// Looks at the unoptimized operands. `false` absorbs `and`, `true` absorbs
/// `or`, and the other literal is the identity.
fn short_circuit(
    kind: BinaryOperatorKind,
    left: &Expression,
    right: &Expression,
) -> Option<ShortCircuit> {
    let absorbing = match kind {
        BinaryOperatorKind::LogicalAnd => false,
        BinaryOperatorKind::LogicalOr => true,
        _ => return None,
    };

    match (left, right) {
        (Expression::BoolLiteral(value), _) | (_, Expression::BoolLiteral(value))
            if *value == absorbing =>
        {
            Some(ShortCircuit::Literal(absorbing))
        }
        (Expression::BoolLiteral(_), _) => Some(ShortCircuit::Right),
        (_, Expression::BoolLiteral(_)) => Some(ShortCircuit::Left),
        _ => None,
    }
}

fn optimize_binary(binary: BinaryExpression) -> Expression {
    let BinaryExpression {
        op,
        left,
        right,
        ty,
    } = binary;

    let Some(kind) = op.operator() else {
        return Expression::binary(op, optimize_expression(left), optimize_expression(right), ty);
    };

    match short_circuit(kind, &left, &right) {
        Some(ShortCircuit::Literal(value)) => return Expression::BoolLiteral(value),
        Some(ShortCircuit::Left) => return optimize_expression(left),
        Some(ShortCircuit::Right) => return optimize_expression(right),
        None => {}
    }

    let left = optimize_expression(left);
    let right = optimize_expression(right);

    if left.is_numeric_literal() && right.is_numeric_literal() {
        if let Some(folded) = fold::fold_binary(kind, &left, &right) {
            return folded;
        }
    }

    simplify_identities(kind, left, right, ty)
}

/// Strength reductions with one literal operand
fn simplify_identities(
    kind: BinaryOperatorKind,
    left: Expression,
    right: Expression,
    ty: Type,
) -> Expression {
    use BinaryOperatorKind::*;

    match kind {
        Add if is_zero(&right) => left,
        Add if is_zero(&left) => right,
        Subtract if is_zero(&right) => left,
        Subtract if is_zero(&left) => Expression::negate(right),
        Multiply if is_one(&right) => left,
        Multiply if is_one(&left) => right,
        Multiply if is_zero(&left) || is_zero(&right) => Expression::IntLiteral(0.into()),
        Divide if is_one(&right) => left,
        Divide if is_zero(&left) => Expression::IntLiteral(0.into()),
        Power if is_zero(&right) || is_one(&left) => Expression::IntLiteral(1.into()),
        Power if is_one(&right) => left,
        _ => Expression::binary(kind, left, right, ty),
    }
}

fn optimize_unary(unary: UnaryExpression) -> Expression {
    let UnaryExpression { op, operand, ty } = unary;
    let operand = optimize_expression(operand);

    if op == UnaryOp::Operator(UnaryOperatorKind::Negate) {
        if let Some(negated) = fold::negate_literal(&operand) {
            return negated;
        }
    }

    Expression::unary(op, operand, ty)
}
