use std::{cmp::Ordering, sync::Arc};

use num_traits::Signed;

use super::Analyzer;
use crate::{
    error::{AnalysisError, AnalysisErrorKind, ArityMismatch, NumericUsage, analysis_error},
    frontend::{
        Span,
        ast::{self, BumpOperator, ElseArm, StatementKind, UnaryOperatorKind},
    },
    middle::{
        context::Context,
        entity::{Entity, Variable},
        ir::{
            Alternate, Assignment, Expression, ForStatement, ForTurnStatement, IfStatement,
            ShortIfStatement, Statement, TurnDirection, UnaryOp, VariableDeclaration,
            WhileStatement,
        },
        ty::{Type, promote},
    },
};

impl Analyzer<'_> {
    pub(super) fn analyze_statements(
        &self,
        cx: &mut Context<'_>,
        statements: &[ast::Statement],
    ) -> Result<Vec<Statement>, AnalysisError> {
        statements
            .iter()
            .map(|statement| self.analyze_statement(cx, statement))
            .collect()
    }

    fn analyze_statement(
        &self,
        cx: &mut Context<'_>,
        statement: &ast::Statement,
    ) -> Result<Statement, AnalysisError> {
        let span = statement.span;

        match &statement.kind {
            StatementKind::VarDecl { name, initializer } => {
                self.analyze_variable_declaration(cx, name, initializer, false)
            }
            StatementKind::AllInVarDecl { name, initializer } => {
                self.analyze_variable_declaration(cx, name, initializer, true)
            }
            StatementKind::FunDecl(declaration) => {
                self.analyze_function_declaration(cx, declaration, span)
            }
            StatementKind::Bump { target, operator } => {
                let target = self.analyze_expression(cx, target)?;

                let ty = target.ty();
                if !ty.is_numeric() && !ty.is_any() {
                    return Err(analysis_error!(
                        AnalysisErrorKind::NotNumeric(NumericUsage::Bump { found: ty }),
                        span
                    ));
                }

                check_assignable(&target, span)?;

                Ok(match operator {
                    BumpOperator::Increment => Statement::Increment(target),
                    BumpOperator::Decrement => Statement::Decrement(target),
                })
            }
            StatementKind::Assign { target, source } => {
                let target = self.analyze_expression(cx, target)?;
                check_assignable(&target, span)?;
                let source = self.analyze_expression(cx, source)?;

                Ok(Statement::Assignment(Assignment { target, source }))
            }
            StatementKind::Call(call) => Ok(Statement::Call(self.analyze_expression(cx, call)?)),
            StatementKind::Break => {
                if !cx.in_loop() {
                    return Err(analysis_error!(AnalysisErrorKind::BreakOutsideLoop, span));
                }

                Ok(Statement::Break)
            }
            StatementKind::Return(expression) => {
                if !cx.in_function() {
                    return Err(analysis_error!(AnalysisErrorKind::ReturnOutsideFunction, span));
                }

                Ok(Statement::Return(self.analyze_expression(cx, expression)?))
            }
            StatementKind::ShortReturn => {
                if !cx.in_function() {
                    return Err(analysis_error!(AnalysisErrorKind::ReturnOutsideFunction, span));
                }

                Ok(Statement::ShortReturn)
            }
            StatementKind::If(if_stmt) => {
                if if_stmt.alternate.is_none() {
                    let test = self.analyze_condition(cx, &if_stmt.condition)?;
                    let consequent = self.analyze_statements(cx, &if_stmt.consequent.statements)?;

                    return Ok(Statement::ShortIf(ShortIfStatement { test, consequent }));
                }

                Ok(Statement::If(self.analyze_if_statement(cx, if_stmt)?))
            }
            StatementKind::While { condition, body } => {
                let test = self.analyze_condition(cx, condition)?;

                let mut body_cx = cx.new_loop_scope();
                let body = self.analyze_statements(&mut body_cx, &body.statements)?;

                Ok(Statement::While(WhileStatement { test, body }))
            }
            StatementKind::ForIn {
                iterator,
                collection,
                body,
            } => {
                let collection = self.analyze_expression(cx, collection)?;
                let iterator = Arc::new(Variable::mutable(
                    &iterator.name,
                    collection.ty().element_type(),
                ));

                let mut body_cx = cx.new_loop_scope();
                body_cx.add(&iterator.name, Entity::Variable(iterator.clone()));
                let body = self.analyze_statements(&mut body_cx, &body.statements)?;

                Ok(Statement::For(ForStatement {
                    iterator,
                    collection,
                    body,
                }))
            }
            StatementKind::ForTurn {
                iterator,
                turn,
                body,
            } => self.analyze_for_turn(cx, iterator, turn, body),
        }
    }

    fn analyze_variable_declaration(
        &self,
        cx: &mut Context<'_>,
        name: &ast::Identifier,
        initializer: &ast::Expression,
        constant: bool,
    ) -> Result<Statement, AnalysisError> {
        if cx.has(&name.name) {
            return Err(analysis_error!(
                AnalysisErrorKind::DuplicateDeclaration {
                    name: name.name.clone()
                },
                name.span
            ));
        }

        let initializer = self.analyze_expression(cx, initializer)?;
        let variable = Arc::new(if constant {
            Variable::constant(&name.name, initializer.ty())
        } else {
            Variable::mutable(&name.name, initializer.ty())
        });
        cx.add(&name.name, Entity::Variable(variable.clone()));

        Ok(Statement::VariableDeclaration(VariableDeclaration {
            variable,
            initializer,
        }))
    }

    /// Branches share the enclosing scope, only function and loop bodies
    /// open a new one
    fn analyze_if_statement(
        &self,
        cx: &mut Context<'_>,
        if_stmt: &ast::IfStmt,
    ) -> Result<IfStatement, AnalysisError> {
        let test = self.analyze_condition(cx, &if_stmt.condition)?;
        let consequent = self.analyze_statements(cx, &if_stmt.consequent.statements)?;

        let alternate = match &if_stmt.alternate {
            Some(ElseArm::If(else_if)) => {
                Alternate::If(Box::new(self.analyze_if_statement(cx, else_if)?))
            }
            Some(ElseArm::Block(block)) => {
                Alternate::Else(self.analyze_statements(cx, &block.statements)?)
            }
            None => Alternate::Else(Vec::new()),
        };

        Ok(IfStatement {
            test,
            consequent,
            alternate,
        })
    }

    fn analyze_condition(
        &self,
        cx: &Context<'_>,
        condition: &ast::Expression,
    ) -> Result<Expression, AnalysisError> {
        let test = self.analyze_expression(cx, condition)?;
        check_boolean(&test, condition.span)?;
        Ok(test)
    }

    /// The bounds and step are evaluated in the enclosing scope, only the
    /// body sees the iterator
    fn analyze_for_turn(
        &self,
        cx: &mut Context<'_>,
        iterator: &ast::Identifier,
        turn: &ast::TurnCall,
        body: &ast::Block,
    ) -> Result<Statement, AnalysisError> {
        let [low, high, step] = turn.arguments.as_slice() else {
            return Err(analysis_error!(
                AnalysisErrorKind::ArityMismatch(ArityMismatch::Turn {
                    actual: turn.arguments.len()
                }),
                turn.span
            ));
        };

        let low = self.analyze_expression(cx, low)?;
        let high = self.analyze_expression(cx, high)?;
        let step_span = step.span;
        let step = self.analyze_expression(cx, step)?;

        let direction = match literal_sign(&step) {
            Some(Ordering::Equal) => {
                return Err(analysis_error!(AnalysisErrorKind::ZeroStep, step_span));
            }
            Some(Ordering::Less) => TurnDirection::Descending,
            Some(Ordering::Greater) | None => TurnDirection::Ascending,
        };

        let iterator_type = promote(&low.ty(), &high.ty())
            .filter(Type::is_numeric)
            .unwrap_or(Type::ANY);
        let iterator = Arc::new(Variable::mutable(&iterator.name, iterator_type));

        let mut body_cx = cx.new_loop_scope();
        body_cx.add(&iterator.name, Entity::Variable(iterator.clone()));
        let body = self.analyze_statements(&mut body_cx, &body.statements)?;

        Ok(Statement::ForTurn(ForTurnStatement {
            iterator,
            low,
            direction,
            high,
            step,
            body,
        }))
    }
}

/// Sign of a numeric literal, looking through negations
fn literal_sign(expression: &Expression) -> Option<Ordering> {
    match expression {
        Expression::IntLiteral(value) => Some(if value.is_negative() {
            Ordering::Less
        } else if value.is_positive() {
            Ordering::Greater
        } else {
            Ordering::Equal
        }),
        Expression::FloatLiteral(value) => Some(if *value == 0.0 {
            Ordering::Equal
        } else if *value < 0.0 {
            Ordering::Less
        } else {
            Ordering::Greater
        }),
        Expression::Unary(unary) if unary.op == UnaryOp::Operator(UnaryOperatorKind::Negate) => {
            literal_sign(&unary.operand).map(Ordering::reverse)
        }
        _ => None,
    }
}

pub(super) fn check_boolean(expression: &Expression, span: Span) -> Result<(), AnalysisError> {
    let ty = expression.ty();

    if ty.is_compatible_with(&Type::BOOLEAN) {
        Ok(())
    } else {
        Err(analysis_error!(
            AnalysisErrorKind::NotBoolean { found: ty },
            span
        ))
    }
}

/// Only variables, and elements or fields reached through one, can be
/// written to. The variable itself must be mutable.
fn check_assignable(target: &Expression, span: Span) -> Result<(), AnalysisError> {
    fn root_variable(target: &Expression) -> Option<&Arc<Variable>> {
        match target {
            Expression::Variable(variable) => Some(variable),
            Expression::Subscript(subscript) => root_variable(&subscript.array),
            Expression::Member(member) => root_variable(&member.object),
            _ => None,
        }
    }

    match root_variable(target) {
        Some(variable) if variable.mutable => Ok(()),
        Some(variable) if variable.is_constant => Err(analysis_error!(
            AnalysisErrorKind::ConstantReassignment {
                name: variable.name.clone()
            },
            span
        )),
        Some(variable) => Err(analysis_error!(
            AnalysisErrorKind::ReadOnly {
                name: variable.name.clone()
            },
            span
        )),
        None => {
            let name = match target {
                Expression::Function(function) => function.name.clone(),
                _ => "expression".to_string(),
            };

            Err(analysis_error!(AnalysisErrorKind::ReadOnly { name }, span))
        }
    }
}
