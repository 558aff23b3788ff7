use std::str::FromStr;

use super::{Analyzer, Strictness, statement::check_boolean};
use crate::{
    error::{AnalysisError, AnalysisErrorKind, ArityMismatch, NumericUsage, analysis_error},
    frontend::{
        Span,
        ast::{self, BinaryOperatorClass, BinaryOperatorKind, ExpressionKind},
    },
    middle::{
        context::Context,
        entity::Entity,
        ir::{Expression, ObjectExpression, ObjectMember},
        stdlib::Intrinsic,
        ty::{Type, promote},
    },
};

impl Analyzer<'_> {
    pub(super) fn analyze_expression(
        &self,
        cx: &Context<'_>,
        expression: &ast::Expression,
    ) -> Result<Expression, AnalysisError> {
        let span = expression.span;

        match &expression.kind {
            ExpressionKind::IntLiteral(value) => Ok(Expression::IntLiteral(value.clone())),
            ExpressionKind::FloatLiteral(value) => Ok(Expression::FloatLiteral(*value)),
            ExpressionKind::StringLiteral(value) => Ok(Expression::StringLiteral(value.clone())),
            ExpressionKind::BoolLiteral(value) => Ok(Expression::BoolLiteral(*value)),
            ExpressionKind::Identifier(identifier) => match cx.lookup(&identifier.name) {
                Some(Entity::Variable(variable)) => Ok(Expression::Variable(variable.clone())),
                Some(Entity::Function(function)) => Ok(Expression::Function(function.clone())),
                None => Err(analysis_error!(
                    AnalysisErrorKind::UndeclaredIdentifier {
                        name: identifier.name.clone()
                    },
                    identifier.span
                )),
            },
            ExpressionKind::Binary { lhs, operator, rhs } => {
                let left = self.analyze_expression(cx, lhs)?;
                let right = self.analyze_expression(cx, rhs)?;
                self.analyze_binary(*operator, left, right, span)
            }
            ExpressionKind::Unary { operator, operand } => {
                let operand = self.analyze_expression(cx, operand)?;
                let ty = operand.ty();
                Ok(Expression::unary(*operator, operand, ty))
            }
            ExpressionKind::Call { callee, arguments } => {
                self.analyze_call(cx, callee, arguments, span)
            }
            ExpressionKind::Subscript { base, index } => {
                let array = self.analyze_expression(cx, base)?;

                let ty = array.ty();
                if ty.is_scalar() {
                    return Err(analysis_error!(
                        AnalysisErrorKind::NotSubscriptable { found: ty },
                        base.span
                    ));
                }

                let index = self.analyze_expression(cx, index)?;
                Ok(Expression::subscript(array, index))
            }
            ExpressionKind::Member { object, field } => {
                let object = self.analyze_expression(cx, object)?;
                Ok(Expression::member(object, &field.name))
            }
            ExpressionKind::Array(elements) => {
                let elements = elements
                    .iter()
                    .map(|element| self.analyze_expression(cx, element))
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(Expression::array(elements))
            }
            ExpressionKind::Object(members) => {
                let members = members
                    .iter()
                    .map(|member| {
                        Ok(ObjectMember {
                            key: member.key.name.clone(),
                            value: self.analyze_expression(cx, &member.value)?,
                        })
                    })
                    .collect::<Result<Vec<_>, AnalysisError>>()?;

                Ok(Expression::Object(ObjectExpression { members }))
            }
        }
    }

    fn analyze_binary(
        &self,
        operator: BinaryOperatorKind,
        left: Expression,
        right: Expression,
        span: Span,
    ) -> Result<Expression, AnalysisError> {
        let ty = match operator.class() {
            BinaryOperatorClass::Arithmetic => {
                check_operands(&left, &right, span)?;

                let (left_ty, right_ty) = (left.ty(), right.ty());
                promote(&left_ty, &right_ty).unwrap_or(Type::ANY)
            }
            BinaryOperatorClass::Comparison => {
                check_operands(&left, &right, span)?;
                Type::BOOLEAN
            }
            BinaryOperatorClass::Logical => {
                if self.options.strictness == Strictness::Strict {
                    check_boolean(&left, span)?;
                    check_boolean(&right, span)?;
                }

                Type::BOOLEAN
            }
        };

        Ok(Expression::binary(operator, left, right, ty))
    }

    fn analyze_call(
        &self,
        cx: &Context<'_>,
        callee: &ast::Expression,
        arguments: &[ast::Expression],
        span: Span,
    ) -> Result<Expression, AnalysisError> {
        let callee = self.analyze_expression(cx, callee)?;
        let args = arguments
            .iter()
            .map(|argument| self.analyze_expression(cx, argument))
            .collect::<Result<Vec<_>, _>>()?;

        let Expression::Function(function) = callee else {
            return Err(analysis_error!(AnalysisErrorKind::NotCallable, span));
        };

        if !function.variadic && args.len() != function.arity() {
            return Err(analysis_error!(
                AnalysisErrorKind::ArityMismatch(ArityMismatch::Call {
                    expected: function.arity(),
                    actual: args.len(),
                }),
                span
            ));
        }

        if function.intrinsic {
            let intrinsic = Intrinsic::from_str(&function.name).ok();

            if let Some(intrinsic) = intrinsic.filter(|i| i.requires_numeric_arguments()) {
                let offending = arguments
                    .iter()
                    .zip(&args)
                    .find(|(_, arg)| !is_numeric_or_any(&arg.ty()));

                if let Some((argument, arg)) = offending {
                    return Err(analysis_error!(
                        AnalysisErrorKind::NotNumeric(NumericUsage::IntrinsicArgument {
                            intrinsic,
                            found: arg.ty(),
                        }),
                        argument.span
                    ));
                }
            }
        }

        Ok(Expression::call(function, args))
    }
}

fn is_numeric_or_any(ty: &Type) -> bool {
    ty.is_numeric() || ty.is_any()
}

/// Shared by arithmetic and comparison operators
fn check_operands(left: &Expression, right: &Expression, span: Span) -> Result<(), AnalysisError> {
    if matches!(left, Expression::Function(_)) || matches!(right, Expression::Function(_)) {
        return Err(analysis_error!(AnalysisErrorKind::FunctionInExpression, span));
    }

    let (left, right) = (left.ty(), right.ty());

    if left.is_compatible_with(&right) || promote(&left, &right).is_some() {
        Ok(())
    } else {
        Err(analysis_error!(
            AnalysisErrorKind::TypeMismatch { left, right },
            span
        ))
    }
}
