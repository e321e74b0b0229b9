pub mod builder;
pub mod report;
pub mod scope;
pub mod walker;

#[cfg(test)]
mod tests;

use thiserror::Error;

use crate::parser::ast::Program;
use crate::types::Span;

pub use builder::SymbolTableBuilder;
pub use scope::{Scope, ScopeId, ScopeKind, Symbol, SymbolTable};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SemanticError {
    /// A name declared twice in the same scope. Fatal for the whole pass.
    #[error("DECLARATION ERROR {name}")]
    DuplicateDeclaration {
        name: String,
        span: Span,
        previous: Span,
    },
}

pub type SemanticResult<T> = Result<T, SemanticError>;

/// Build the symbol table of `program`, stopping at the first duplicate
/// declaration.
pub fn analyze(program: &Program) -> SemanticResult<SymbolTable> {
    let mut builder = SymbolTableBuilder::new();
    walker::walk(&mut builder, program)?;
    Ok(builder.finish())
}
