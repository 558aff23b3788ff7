//! Ante Semantic Analyzer
//!
//! Analysis walks the syntax tree once, top to bottom, and does 3 things at
//! the same time:
//!
//!   1) resolves every identifier against the lexical [`Context`] chain,
//!      binding declarations as they are encountered
//!   2) computes the type of every expression and checks it against the rules
//!      of the language (promotion, boolean conditions, arity, mutability...)
//!   3) lowers each construct into the typed IR consumed by the optimizer
//!
//! The first violated rule aborts the whole analysis. Scopes are borrowed
//! frames (see [`Context`]), so a failure deep inside a body can never leave
//! a stale scope or loop/function depth behind.

use strum::{Display, EnumString};

use crate::{
    error::AnalysisError,
    frontend::ast::SyntaxTree,
    middle::{context::Context, ir::Program, stdlib::STANDARD_LIBRARY},
};

mod expression;
mod function;
mod statement;

/// How forgiving the analyzer is about loosely typed constructs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Strictness {
    /// `and`/`or` accept operands of any type
    #[default]
    Lenient,
    /// `and`/`or` require boolean operands
    Strict,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyzerOptions {
    pub strictness: Strictness,
}

impl AnalyzerOptions {
    pub fn strict() -> Self {
        Self {
            strictness: Strictness::Strict,
        }
    }
}

/// Validates a syntax tree and lowers it into a typed [`Program`]
///
/// Every call starts from a fresh scope chain rooted at the standard library,
/// so independent programs may be analyzed concurrently.
pub fn analyze(tree: &SyntaxTree, options: &AnalyzerOptions) -> Result<Program, AnalysisError> {
    let root = Context::root(&STANDARD_LIBRARY);
    let mut cx = root.new_child();

    let analyzer = Analyzer { options };
    let statements = analyzer.analyze_statements(&mut cx, &tree.statements)?;

    Ok(Program { statements })
}

#[derive(Debug)]
struct Analyzer<'options> {
    options: &'options AnalyzerOptions,
}

#[cfg(test)]
mod tests;
