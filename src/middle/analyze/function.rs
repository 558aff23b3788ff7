use std::sync::Arc;

use hashbrown::HashSet;

use super::Analyzer;
use crate::{
    error::{AnalysisError, AnalysisErrorKind, MissingAnnotation, analysis_error},
    frontend::{Span, ast},
    middle::{
        context::Context,
        entity::{Entity, Function, Variable},
        ir::{
            Expression, FunctionCall, FunctionDeclaration, Statement,
            visit::{self, Visitor},
        },
        primitive::PrimitiveKind,
        ty::{Type, flatten_union},
    },
};

impl Analyzer<'_> {
    /// The function is bound in the enclosing scope before its body is
    /// analyzed so the body can call it. Parameters are bound in a fresh
    /// function scope that disappears with the body.
    pub(super) fn analyze_function_declaration(
        &self,
        cx: &mut Context<'_>,
        declaration: &ast::FunDecl,
        span: Span,
    ) -> Result<Statement, AnalysisError> {
        let name = &declaration.name;

        if cx.has(&name.name) {
            return Err(analysis_error!(
                AnalysisErrorKind::DuplicateDeclaration {
                    name: name.name.clone()
                },
                name.span
            ));
        }

        let params = analyze_params(&declaration.params)?;
        let return_annotation = declaration.return_annotation.as_ref().map(annotation_type);

        let function = Arc::new(Function::new(
            &name.name,
            params.clone(),
            return_annotation,
        ));
        cx.add(&name.name, Entity::Function(function.clone()));

        let body = {
            let mut body_cx = cx.new_function_scope();

            for param in &params {
                body_cx.add(&param.name, Entity::Variable(param.clone()));
            }

            self.analyze_statements(&mut body_cx, &declaration.body.statements)?
        };

        if calls_itself(&function, &body) {
            check_recursive_annotations(declaration)?;
        }

        let return_type = reconcile_return_type(&function, declaration, &body, span)?;
        function.resolve_return_type(return_type);

        Ok(Statement::FunctionDeclaration(FunctionDeclaration { function, body }))
    }
}

/// Parameters are read only, `any` unless annotated
fn analyze_params(params: &ast::Params) -> Result<Vec<Arc<Variable>>, AnalysisError> {
    let mut seen = HashSet::new();

    params
        .params
        .iter()
        .map(|param| {
            if !seen.insert(param.name.name.as_str()) {
                return Err(analysis_error!(
                    AnalysisErrorKind::DuplicateParameter {
                        name: param.name.name.clone()
                    },
                    param.name.span
                ));
            }

            let ty = param
                .annotation
                .as_ref()
                .map(annotation_type)
                .unwrap_or(Type::ANY);

            Ok(Arc::new(Variable::read_only(&param.name.name, ty)))
        })
        .collect()
}

fn annotation_type(annotation: &ast::TypeUnion) -> Type {
    Type::union(annotation_members(annotation))
}

/// The flat, deduplicated set of types an annotation admits
fn annotation_members(annotation: &ast::TypeUnion) -> Vec<Type> {
    flatten_union(
        annotation
            .members
            .iter()
            .map(|&name| Type::Primitive(PrimitiveKind::from(name))),
    )
}

/// Recursive functions must be fully annotated, parameters with something
/// narrower than `any`
fn check_recursive_annotations(declaration: &ast::FunDecl) -> Result<(), AnalysisError> {
    let function = declaration.name.name.clone();

    if declaration.return_annotation.is_none() {
        return Err(analysis_error!(
            AnalysisErrorKind::MissingRecursiveAnnotation {
                function,
                missing: MissingAnnotation::ReturnType,
            },
            declaration.name.span
        ));
    }

    let missing = declaration
        .params
        .params
        .iter()
        .filter(|param| {
            param
                .annotation
                .as_ref()
                .is_none_or(|annotation| annotation_type(annotation).is_any())
        })
        .map(|param| param.name.name.clone())
        .collect::<Vec<_>>();

    if !missing.is_empty() {
        return Err(analysis_error!(
            AnalysisErrorKind::MissingRecursiveAnnotation {
                function,
                missing: MissingAnnotation::Parameters(missing),
            },
            declaration.params.span
        ));
    }

    Ok(())
}

/// Checks every return against the annotation, or infers the return type
/// from them when there is none
fn reconcile_return_type(
    function: &Function,
    declaration: &ast::FunDecl,
    body: &[Statement],
    span: Span,
) -> Result<Type, AnalysisError> {
    let returned = collect_return_types(body);

    let Some(annotation) = &declaration.return_annotation else {
        return Ok(Type::union(returned));
    };

    let expected = annotation_members(annotation);

    for found in returned {
        let admitted = flatten_union([found.clone()])
            .iter()
            .all(|member| expected.iter().any(|ty| ty.is_compatible_with(member)));

        if !admitted {
            return Err(analysis_error!(
                AnalysisErrorKind::ReturnTypeMismatch {
                    function: function.name.clone(),
                    expected,
                    found,
                },
                span
            ));
        }
    }

    Ok(annotation_type(annotation))
}

/// Types of every `return <expression>` reachable in a body. Nested function
/// declarations are skipped, their returns belong to them.
pub(super) fn collect_return_types(body: &[Statement]) -> Vec<Type> {
    #[derive(Default)]
    struct ReturnCollector {
        types: Vec<Type>,
    }

    impl Visitor for ReturnCollector {
        fn visit_function_declaration(&mut self, _: &FunctionDeclaration) {}

        fn visit_return(&mut self, expression: &Expression) {
            self.types.push(expression.ty());
        }

        fn visit_expression(&mut self, _: &Expression) {}
    }

    let mut collector = ReturnCollector::default();
    collector.visit_block(body);
    collector.types
}

/// Looks for a direct call to `function` anywhere in its analyzed body
pub(super) fn calls_itself(function: &Arc<Function>, body: &[Statement]) -> bool {
    struct SelfCallFinder<'f> {
        function: &'f Arc<Function>,
        found: bool,
    }

    impl Visitor for SelfCallFinder<'_> {
        fn visit_function_call(&mut self, call: &FunctionCall) {
            if Arc::ptr_eq(&call.callee, self.function) {
                self.found = true;
            }

            visit::walk_function_call(self, call)
        }
    }

    let mut finder = SelfCallFinder {
        function,
        found: false,
    };
    finder.visit_block(body);
    finder.found
}
