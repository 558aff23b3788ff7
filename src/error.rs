use itertools::Itertools;
use thiserror::Error;

use crate::{
    frontend::{Span, SyntaxError},
    middle::{stdlib::Intrinsic, ty::Type},
};

/// Returned by any part of the pipeline. Syntax errors from the parser pass
/// through untouched.
#[derive(Debug, Error)]
pub enum CompileError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Analysis(#[from] AnalysisError),
}

/// The first violated rule aborts analysis with one of these
#[derive(Debug, Clone, Error)]
#[error("{kind}{}", position(.span))]
pub struct AnalysisError {
    pub kind: AnalysisErrorKind,
    /// Where in the source the offending construct is, when known
    pub span: Option<Span>,
    /// The analyzer function which raised the error
    #[cfg(feature = "error-backtrace")]
    pub origin: Option<String>,
}

impl AnalysisError {
    pub fn new(kind: AnalysisErrorKind, span: impl Into<Option<Span>>) -> Self {
        Self {
            kind,
            span: span.into(),
            #[cfg(feature = "error-backtrace")]
            origin: None,
        }
    }
}

fn position(span: &Option<Span>) -> String {
    match span {
        Some(span) => format!(" (at {span})"),
        None => String::new(),
    }
}

fn join_types(types: &[Type]) -> String {
    types.iter().join(", ")
}

/// Short name of the enclosing function
#[cfg(feature = "error-backtrace")]
macro_rules! function {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            std::any::type_name::<T>()
        }
        type_name_of(f)
            .rsplit("::")
            .find(|&part| part != "f" && part != "{{closure}}")
            .unwrap_or("<unknown>")
    }};
}

/// Builds an [`AnalysisError`], recording the raising location when the
/// `error-backtrace` feature is enabled
macro_rules! analysis_error {
    ($kind:expr, $span:expr $(,)?) => {{
        #[allow(unused_mut)]
        let mut error = $crate::error::AnalysisError::new($kind, $span);

        #[cfg(feature = "error-backtrace")]
        {
            error.origin = Some(format!(
                "{}::{} (at {}:{}:{})",
                module_path!(),
                $crate::error::function!(),
                file!(),
                line!(),
                column!()
            ));
        }

        error
    }};
}

pub(crate) use analysis_error;
#[cfg(feature = "error-backtrace")]
pub(crate) use function;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisErrorKind {
    #[error("Identifier {name} already declared")]
    DuplicateDeclaration { name: String },
    #[error("Duplicate parameter name: {name}")]
    DuplicateParameter { name: String },
    #[error("Identifier {name} not declared")]
    UndeclaredIdentifier { name: String },
    #[error("Expected a function call on a function identifier")]
    NotCallable,
    #[error(transparent)]
    ArityMismatch(ArityMismatch),
    #[error("Expected a boolean value but found {found}")]
    NotBoolean { found: Type },
    #[error(transparent)]
    NotNumeric(NumericUsage),
    #[error("Cannot subscript a value of type {found}")]
    NotSubscriptable { found: Type },
    #[error("{name} is read only")]
    ReadOnly { name: String },
    #[error("Can't back out of your all in! (redeclaration of allin(const) variable)")]
    ConstantReassignment { name: String },
    #[error("Functions cannot appear in this context")]
    FunctionInExpression,
    #[error("Expression type mismatch: {left} vs {right}")]
    TypeMismatch { left: Type, right: Type },
    #[error("Function {function} must return one of {{{}}} but returns {found}", join_types(.expected))]
    ReturnTypeMismatch {
        function: String,
        expected: Vec<Type>,
        found: Type,
    },
    #[error("Recursive function {function} requires {missing}")]
    MissingRecursiveAnnotation {
        function: String,
        missing: MissingAnnotation,
    },
    #[error("Break statement must be inside a loop")]
    BreakOutsideLoop,
    #[error("Return statement must be inside a function")]
    ReturnOutsideFunction,
    #[error("Step size must be non-zero")]
    ZeroStep,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArityMismatch {
    #[error("{expected} argument(s) required but {actual} passed")]
    Call { expected: usize, actual: usize },
    #[error("TurnCall requires exactly three parameters")]
    Turn { actual: usize },
}

/// A place where only `int` or `float` values may appear
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NumericUsage {
    #[error("Cannot bump a variable of type {found}")]
    Bump { found: Type },
    #[error("Expected a numeric argument to {intrinsic} but found {found}")]
    IntrinsicArgument { intrinsic: Intrinsic, found: Type },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MissingAnnotation {
    #[error("a return type annotation")]
    ReturnType,
    #[error("type annotations on parameters: {}", .0.join(", "))]
    Parameters(Vec<String>),
}
