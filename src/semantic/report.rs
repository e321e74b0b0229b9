use std::fmt::{Display, Formatter, Result as FmtResult};

use super::scope::{BLOCK_PREFIX, MAIN_SCOPE, Scope, SymbolTable};

/// The symbol table listing: every `BLOCK` scope ordered by name as plain
/// strings (so `BLOCK 10` precedes `BLOCK 2`), then `main` if present.
/// `GLOBAL` and other function scopes are left out.
pub struct Report<'a>(pub &'a SymbolTable);

impl Display for Report<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let mut scopes: Vec<&Scope> = self.0.iter().collect();
        scopes.sort_by(|a, b| a.name.cmp(&b.name));

        for scope in scopes.iter().filter(|s| s.name.starts_with(BLOCK_PREFIX)) {
            write_scope(f, scope)?;
        }
        if let Some(main) = self.0.lookup(MAIN_SCOPE) {
            write_scope(f, main)?;
        }
        Ok(())
    }
}

fn write_scope(f: &mut Formatter<'_>, scope: &Scope) -> FmtResult {
    writeln!(f, "Symbol table {}", scope.name)?;
    for symbol in &scope.symbols {
        writeln!(f, "{}", symbol)?;
    }
    writeln!(f)
}

pub fn render(table: &SymbolTable) -> String {
    Report(table).to_string()
}

/// Every live scope, `GLOBAL` and function scopes included, in creation order.
pub fn to_json(table: &SymbolTable) -> serde_json::Result<String> {
    let scopes: Vec<&Scope> = table.iter().collect();
    serde_json::to_string_pretty(&scopes)
}
