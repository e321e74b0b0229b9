use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::Serialize;

use crate::types::Span;

pub const GLOBAL_SCOPE: &str = "GLOBAL";
pub const MAIN_SCOPE: &str = "main";
pub const BLOCK_PREFIX: &str = "BLOCK";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Symbol {
    pub name: String,
    #[serde(rename = "type")]
    pub declared_type: String,
    #[serde(rename = "value", skip_serializing_if = "Option::is_none")]
    pub literal_value: Option<String>,
    #[serde(skip)]
    pub span: Span,
}

impl Symbol {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            literal_value: None,
            span,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.literal_value = Some(value.into());
        self
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "name {} type {}", self.name, self.declared_type)?;
        if let Some(value) = &self.literal_value {
            write!(f, " value {}", value)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ScopeKind {
    Global,
    Function,
    Block,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scope {
    pub name: String,
    pub kind: ScopeKind,
    pub symbols: Vec<Symbol>,
}

impl Scope {
    pub fn new(name: impl Into<String>, kind: ScopeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            symbols: Vec::new(),
        }
    }

    /// Lookup a symbol by name within this scope only.
    pub fn lookup(&self, name: &str) -> Option<&Symbol> {
        self.symbols.iter().find(|s| s.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

/// Returned by [`SymbolTable::declare`] when the name is already taken in
/// the target scope. Carries the rejected symbol and the span of the one
/// already present.
#[derive(Debug, Clone, PartialEq)]
pub struct Redeclaration {
    pub symbol: Symbol,
    pub previous: Span,
}

/// Every scope opened during one pass, in creation order.
///
/// Discarded scopes leave an empty slot so outstanding ids stay valid.
#[derive(Debug, Default)]
pub struct SymbolTable {
    slots: Vec<Option<Scope>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(&mut self, name: impl Into<String>, kind: ScopeKind) -> ScopeId {
        let id = ScopeId(self.slots.len());
        self.slots.push(Some(Scope::new(name, kind)));
        id
    }

    /// Remove a scope from the table. Its id is never reused.
    pub fn discard(&mut self, id: ScopeId) -> Option<Scope> {
        self.slots.get_mut(id.0).and_then(Option::take)
    }

    pub fn get(&self, id: ScopeId) -> Option<&Scope> {
        self.slots.get(id.0).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: ScopeId) -> Option<&mut Scope> {
        self.slots.get_mut(id.0).and_then(Option::as_mut)
    }

    /// First live scope with the given name.
    pub fn lookup(&self, name: &str) -> Option<&Scope> {
        self.iter().find(|scope| scope.name == name)
    }

    /// Append `symbol` to the scope unless its name is already declared there.
    /// Declaring into a discarded scope is a no-op.
    pub fn declare(&mut self, id: ScopeId, symbol: Symbol) -> Result<(), Redeclaration> {
        let Some(scope) = self.get_mut(id) else {
            return Ok(());
        };
        if let Some(existing) = scope.lookup(&symbol.name) {
            return Err(Redeclaration {
                previous: existing.span.clone(),
                symbol,
            });
        }
        scope.symbols.push(symbol);
        Ok(())
    }

    /// Live scopes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = &Scope> {
        self.slots.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
