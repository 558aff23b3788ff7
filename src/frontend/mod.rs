//! The boundary with the external parser. Source text is turned into a
//! [`ast::SyntaxTree`] by some implementation of [`Parser`]; everything past
//! that point lives in [`crate::middle`].

use thiserror::Error;

pub mod ast;

/// A byte range into the original source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl core::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Raised by the parser on malformed input. The middle end never creates
/// these, it only passes them through.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (at {span})")]
pub struct SyntaxError {
    pub message: String,
    pub span: Span,
}

impl SyntaxError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

/// Implemented by the grammar-driven parser which sits in front of this crate
pub trait Parser {
    fn parse(&self, source: &str) -> Result<ast::SyntaxTree, SyntaxError>;
}
