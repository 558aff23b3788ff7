//! Middle end of the Ante compiler
//!
//! A parsed [`SyntaxTree`] goes through two passes:
//!
//!   1) [`analyze`](middle::analyze::analyze) resolves scopes, infers and
//!      checks types, and lowers the tree into the typed IR
//!   2) [`optimize`](middle::optimization::optimize) folds constants and
//!      removes dead code from that IR
//!
//! Parsing itself is done by an external [`Parser`].

use crate::{
    error::CompileError,
    frontend::{Parser, ast::SyntaxTree},
    middle::{
        analyze::{AnalyzerOptions, analyze},
        ir::Program,
        optimization::optimize,
    },
};

pub mod error;
pub mod frontend;
pub mod middle;

/// Analyzes and optimizes a syntax tree with the default options
pub fn compile(tree: &SyntaxTree) -> Result<Program, CompileError> {
    compile_with(tree, &AnalyzerOptions::default())
}

pub fn compile_with(tree: &SyntaxTree, options: &AnalyzerOptions) -> Result<Program, CompileError> {
    let program = analyze(tree, options)?;
    Ok(optimize(program))
}

/// Parses `source` and compiles the resulting tree
pub fn compile_source(parser: &impl Parser, source: &str) -> Result<Program, CompileError> {
    let tree = parser.parse(source)?;
    compile(&tree)
}
