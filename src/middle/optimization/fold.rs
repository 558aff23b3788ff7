//! Compile time evaluation of operators applied to numeric literals
//!
//! Two int literals fold with arbitrary precision and stay integral. As soon
//! as either side is a float the operation is carried out in `f64`. Anything
//! that would trap or produce a non finite value at runtime (division by zero,
//! negative or huge int exponents, NaN comparisons) is left alone.

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

use crate::{frontend::ast::BinaryOperatorKind, middle::ir::Expression};

/// Int powers whose result could need more bits than this stay unfolded
pub const MAX_FOLDED_POWER_BITS: u64 = 4096;

/// Evaluates `left op right` when both are numeric literals
pub fn fold_binary(
    op: BinaryOperatorKind,
    left: &Expression,
    right: &Expression,
) -> Option<Expression> {
    match (left, right) {
        (Expression::IntLiteral(a), Expression::IntLiteral(b)) => fold_ints(op, a, b),
        _ => fold_floats(op, as_float(left)?, as_float(right)?),
    }
}

/// The literal with its sign flipped
pub fn negate_literal(operand: &Expression) -> Option<Expression> {
    match operand {
        Expression::IntLiteral(value) => Some(Expression::IntLiteral(-value)),
        Expression::FloatLiteral(value) => Some(Expression::FloatLiteral(-value)),
        _ => None,
    }
}

/// Orders two numeric literals, promoting to float when their kinds differ
pub fn compare_literals(left: &Expression, right: &Expression) -> Option<Ordering> {
    match (left, right) {
        (Expression::IntLiteral(a), Expression::IntLiteral(b)) => Some(a.cmp(b)),
        _ => as_float(left)?.partial_cmp(&as_float(right)?),
    }
}

pub fn is_zero(expression: &Expression) -> bool {
    match expression {
        Expression::IntLiteral(value) => value.is_zero(),
        Expression::FloatLiteral(value) => *value == 0.0,
        _ => false,
    }
}

pub fn is_one(expression: &Expression) -> bool {
    match expression {
        Expression::IntLiteral(value) => value.is_one(),
        Expression::FloatLiteral(value) => *value == 1.0,
        _ => false,
    }
}

fn as_float(expression: &Expression) -> Option<f64> {
    match expression {
        Expression::IntLiteral(value) => value.to_f64(),
        Expression::FloatLiteral(value) => Some(*value),
        _ => None,
    }
}

fn fold_ints(op: BinaryOperatorKind, a: &BigInt, b: &BigInt) -> Option<Expression> {
    use BinaryOperatorKind::*;

    let value = match op {
        Add => a + b,
        Subtract => a - b,
        Multiply => a * b,
        Divide | Modulus | FloorDivide if b.is_zero() => return None,
        // Truncating, like the remainder
        Divide => a / b,
        Modulus => a % b,
        FloorDivide => a.div_floor(b),
        Power => {
            let exponent = b.to_u32()?;
            if a.bits().saturating_mul(u64::from(exponent)) > MAX_FOLDED_POWER_BITS {
                return None;
            }
            a.pow(exponent)
        }
        _ => return compare(op, a.cmp(b)).map(Expression::BoolLiteral),
    };

    Some(Expression::IntLiteral(value))
}

fn fold_floats(op: BinaryOperatorKind, a: f64, b: f64) -> Option<Expression> {
    use BinaryOperatorKind::*;

    let value = match op {
        Add => a + b,
        Subtract => a - b,
        Multiply => a * b,
        Divide | Modulus | FloorDivide if b == 0.0 => return None,
        Divide => a / b,
        Modulus => a % b,
        FloorDivide => (a / b).floor(),
        Power => a.powf(b),
        _ => return compare(op, a.partial_cmp(&b)?).map(Expression::BoolLiteral),
    };

    value
        .is_finite()
        .then_some(Expression::FloatLiteral(value))
}

/// Result of a comparison operator given the ordering of its operands
fn compare(op: BinaryOperatorKind, ordering: Ordering) -> Option<bool> {
    use BinaryOperatorKind::*;

    Some(match op {
        Equals => ordering.is_eq(),
        NotEquals => ordering.is_ne(),
        LessThan => ordering.is_lt(),
        LessThanOrEqualTo => ordering.is_le(),
        GreaterThan => ordering.is_gt(),
        GreaterThanOrEqualTo => ordering.is_ge(),
        _ => return None,
    })
}
