//! Symbol table construction driven by walker events.
//!
//! Scope rules:
//!
//! * a function opens a scope named after its identifier (so `main` gets the
//!   scope the report singles out) which stays current until its body exits;
//! * `IF`, `ELSE` and `WHILE` each open `BLOCK <n>`;
//! * a statement list opens `BLOCK <n>` too, unless it sits anywhere below an
//!   `IF`/`ELSE`/`WHILE`, whose block already covers it;
//! * closing any scope makes `GLOBAL` current again;
//! * blocks that end up without symbols are dropped from the table.
//!
//! Block numbers come from one counter shared by the whole program. It never
//! goes backwards, so two blocks never share a number.

use tracing::{debug, trace};

use super::scope::{GLOBAL_SCOPE, Redeclaration, Scope, ScopeId, ScopeKind, Symbol, SymbolTable};
use super::walker::{Listener, WalkContext};
use super::{SemanticError, SemanticResult};
use crate::parser::ast::{Body, FuncDecl, IfStmt, Param, StmtS, StringDecl, VarDecl, WhileStmt};

const STRING_TYPE: &str = "STRING";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FrameKind {
    Function,
    Control,
    StmtList,
}

#[derive(Debug)]
struct Frame {
    scope: ScopeId,
    kind: FrameKind,
}

#[derive(Debug)]
pub struct SymbolTableBuilder {
    table: SymbolTable,
    global: ScopeId,
    current: ScopeId,
    open: Vec<Frame>,
    // Only ever incremented, so block numbers are never reused.
    next_block: u32,
}

impl Default for SymbolTableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTableBuilder {
    pub fn new() -> Self {
        let mut table = SymbolTable::new();
        let global = table.open(GLOBAL_SCOPE, ScopeKind::Global);
        Self {
            table,
            global,
            current: global,
            open: Vec::new(),
            next_block: 1,
        }
    }

    pub fn current_scope(&self) -> Option<&Scope> {
        self.table.get(self.current)
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    /// Number the next `BLOCK` scope will get.
    pub fn next_block_number(&self) -> u32 {
        self.next_block
    }

    pub fn finish(self) -> SymbolTable {
        self.table
    }

    fn declare(&mut self, symbol: Symbol) -> SemanticResult<()> {
        trace!(
            name = %symbol.name,
            ty = %symbol.declared_type,
            scope = self.current_scope().map(|s| s.name.as_str()).unwrap_or_default(),
            "declare"
        );
        self.table
            .declare(self.current, symbol)
            .map_err(|Redeclaration { symbol, previous }| {
                debug!(name = %symbol.name, "duplicate declaration");
                SemanticError::DuplicateDeclaration {
                    name: symbol.name,
                    span: symbol.span,
                    previous,
                }
            })
    }

    fn enter(&mut self, name: String, kind: ScopeKind, frame: FrameKind) {
        debug!(scope = %name, %kind, "open scope");
        let id = self.table.open(name, kind);
        self.open.push(Frame { scope: id, kind: frame });
        self.current = id;
    }

    fn enter_block(&mut self, frame: FrameKind) {
        let number = self.next_block;
        self.next_block += 1;
        self.enter(format!("BLOCK {}", number), ScopeKind::Block, frame);
    }

    fn leave(&mut self, expected: FrameKind) {
        let Some(frame) = self.open.pop() else {
            return;
        };
        debug_assert_eq!(frame.kind, expected, "unbalanced scope events");
        if frame.kind != FrameKind::Function
            && self.table.get(frame.scope).is_some_and(Scope::is_empty)
        {
            if let Some(scope) = self.table.discard(frame.scope) {
                debug!(scope = %scope.name, "discard empty scope");
            }
        }
        self.current = self.global;
    }
}

impl Listener for SymbolTableBuilder {
    type Error = SemanticError;

    fn enter_func_decl(&mut self, _ctx: &WalkContext, func: &FuncDecl) -> SemanticResult<()> {
        self.enter(func.name.0.clone(), ScopeKind::Function, FrameKind::Function);
        Ok(())
    }

    fn exit_func_body(&mut self, _ctx: &WalkContext, _body: &Body) -> SemanticResult<()> {
        self.leave(FrameKind::Function);
        Ok(())
    }

    fn enter_param_decl_list(&mut self, _ctx: &WalkContext, params: &[Param]) -> SemanticResult<()> {
        for param in params {
            let (name, span) = &param.name;
            self.declare(Symbol::new(name.clone(), param.ty.to_string(), span.clone()))?;
        }
        Ok(())
    }

    fn enter_var_decl(&mut self, _ctx: &WalkContext, decl: &VarDecl) -> SemanticResult<()> {
        for (name, span) in &decl.names {
            self.declare(Symbol::new(name.clone(), decl.ty.to_string(), span.clone()))?;
        }
        Ok(())
    }

    fn enter_string_decl(&mut self, _ctx: &WalkContext, decl: &StringDecl) -> SemanticResult<()> {
        let (name, span) = &decl.name;
        self.declare(Symbol::new(name.clone(), STRING_TYPE, span.clone()).with_value(decl.value.clone()))
    }

    fn enter_stmt_list(&mut self, ctx: &WalkContext, _stmts: &[StmtS]) -> SemanticResult<()> {
        if ctx.inside_control_flow() {
            if let Some(owner) = ctx.ancestors().find(|kind| kind.is_control_flow()) {
                trace!(%owner, "statement list shares the enclosing block");
            }
            return Ok(());
        }
        self.enter_block(FrameKind::StmtList);
        Ok(())
    }

    fn exit_stmt_list(&mut self, ctx: &WalkContext, _stmts: &[StmtS]) -> SemanticResult<()> {
        if ctx.inside_control_flow() {
            return Ok(());
        }
        self.leave(FrameKind::StmtList);
        Ok(())
    }

    fn enter_if_stmt(&mut self, _ctx: &WalkContext, _stmt: &IfStmt) -> SemanticResult<()> {
        self.enter_block(FrameKind::Control);
        Ok(())
    }

    fn exit_if_stmt(&mut self, _ctx: &WalkContext, _stmt: &IfStmt) -> SemanticResult<()> {
        self.leave(FrameKind::Control);
        Ok(())
    }

    fn enter_else_stmt(&mut self, _ctx: &WalkContext, _body: Option<&Body>) -> SemanticResult<()> {
        self.enter_block(FrameKind::Control);
        Ok(())
    }

    fn exit_else_stmt(&mut self, _ctx: &WalkContext, _body: Option<&Body>) -> SemanticResult<()> {
        self.leave(FrameKind::Control);
        Ok(())
    }

    fn enter_while_stmt(&mut self, _ctx: &WalkContext, _stmt: &WhileStmt) -> SemanticResult<()> {
        self.enter_block(FrameKind::Control);
        Ok(())
    }

    fn exit_while_stmt(&mut self, _ctx: &WalkContext, _stmt: &WhileStmt) -> SemanticResult<()> {
        self.leave(FrameKind::Control);
        Ok(())
    }
}
