//! Canonical form for Python source.
//!
//! Two snippets that differ only in formatting (whitespace, comments, blank
//! lines, line continuations, trailing commas in calls and displays, one-line
//! versus block bodies, quote style, redundant parentheses, optional tuple
//! parentheses) produce the same canonical text. Anything that changes the
//! syntax tree produces different text.

mod emitter;
mod literals;
mod parens;
mod validate;

use complexity_common::{EvalError, Result};
use tracing::debug;
use tree_sitter::Parser;

use crate::emitter::Emitter;

pub struct Canonicalizer {
    parser: Parser,
}

impl Canonicalizer {
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .map_err(|e| EvalError::Config(format!("failed to load Python grammar: {e}")))?;
        Ok(Self { parser })
    }

    /// Parse `source` and re-emit it in canonical layout.
    ///
    /// Fails with [`EvalError::Syntax`] when the input is not valid
    /// Python 3: at the first error or missing node, at a Python 2 statement
    /// or an invalid assignment/deletion target, or at the first line that
    /// mixes tabs and spaces inconsistently.
    pub fn canonicalize(&mut self, source: &str) -> Result<String> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| EvalError::Config("parser returned no tree".to_string()))?;
        let root = tree.root_node();

        validate::check(root, source)?;

        let canonical = Emitter::new(source).emit_module(root);
        debug!(
            input_bytes = source.len(),
            output_bytes = canonical.len(),
            "Canonicalized source"
        );
        Ok(canonical)
    }

    pub fn structurally_equal(&mut self, a: &str, b: &str) -> Result<bool> {
        Ok(self.canonicalize(a)? == self.canonicalize(b)?)
    }
}

/// One-shot canonicalization with a fresh parser.
pub fn canonicalize(source: &str) -> Result<String> {
    Canonicalizer::new()?.canonicalize(source)
}

/// True when `a` and `b` have the same canonical form.
pub fn structurally_equal(a: &str, b: &str) -> Result<bool> {
    Canonicalizer::new()?.structurally_equal(a, b)
}
