//! Listener-style traversal of the syntax tree.
//!
//! `walk` visits a [`Program`] depth first and reports every interesting node
//! twice: `enter_*` before its children and `exit_*` after them. The
//! [`WalkContext`] handed to each callback describes the ancestors of the node
//! being reported (the node itself is not on the path yet when it is entered
//! and no longer on it when it is exited).
//!
//! Callbacks return `Result`; the first error stops the traversal and is
//! returned from `walk`.

use crate::parser::ast::{Body, Decl, FuncDecl, IfStmt, Param, Program, Stmt, StmtS, StringDecl, VarDecl, WhileStmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum NodeKind {
    Program,
    FuncDecl,
    ParamDeclList,
    FuncBody,
    VarDecl,
    StringDecl,
    StmtList,
    IfStmt,
    ElseStmt,
    WhileStmt,
}

impl NodeKind {
    pub fn is_control_flow(self) -> bool {
        matches!(self, NodeKind::IfStmt | NodeKind::ElseStmt | NodeKind::WhileStmt)
    }
}

#[derive(Debug, Default)]
pub struct WalkContext {
    path: Vec<NodeKind>,
    control_depth: usize,
}

impl WalkContext {
    /// Ancestors from the innermost outwards.
    pub fn ancestors(&self) -> impl Iterator<Item = NodeKind> + '_ {
        self.path.iter().rev().copied()
    }

    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// True when any ancestor is an `IF`, `ELSE` or `WHILE` node.
    pub fn inside_control_flow(&self) -> bool {
        self.control_depth > 0
    }

    fn push(&mut self, kind: NodeKind) {
        if kind.is_control_flow() {
            self.control_depth += 1;
        }
        self.path.push(kind);
    }

    fn pop(&mut self) {
        if let Some(kind) = self.path.pop() {
            if kind.is_control_flow() {
                self.control_depth -= 1;
            }
        }
    }
}

#[allow(unused_variables)]
pub trait Listener {
    type Error;

    fn enter_program(&mut self, ctx: &WalkContext, program: &Program) -> Result<(), Self::Error> {
        Ok(())
    }
    fn exit_program(&mut self, ctx: &WalkContext, program: &Program) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_func_decl(&mut self, ctx: &WalkContext, func: &FuncDecl) -> Result<(), Self::Error> {
        Ok(())
    }
    fn exit_func_decl(&mut self, ctx: &WalkContext, func: &FuncDecl) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_param_decl_list(&mut self, ctx: &WalkContext, params: &[Param]) -> Result<(), Self::Error> {
        Ok(())
    }
    fn exit_param_decl_list(&mut self, ctx: &WalkContext, params: &[Param]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_func_body(&mut self, ctx: &WalkContext, body: &Body) -> Result<(), Self::Error> {
        Ok(())
    }
    fn exit_func_body(&mut self, ctx: &WalkContext, body: &Body) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_var_decl(&mut self, ctx: &WalkContext, decl: &VarDecl) -> Result<(), Self::Error> {
        Ok(())
    }
    fn exit_var_decl(&mut self, ctx: &WalkContext, decl: &VarDecl) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_string_decl(&mut self, ctx: &WalkContext, decl: &StringDecl) -> Result<(), Self::Error> {
        Ok(())
    }
    fn exit_string_decl(&mut self, ctx: &WalkContext, decl: &StringDecl) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_stmt_list(&mut self, ctx: &WalkContext, stmts: &[StmtS]) -> Result<(), Self::Error> {
        Ok(())
    }
    fn exit_stmt_list(&mut self, ctx: &WalkContext, stmts: &[StmtS]) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_if_stmt(&mut self, ctx: &WalkContext, stmt: &IfStmt) -> Result<(), Self::Error> {
        Ok(())
    }
    fn exit_if_stmt(&mut self, ctx: &WalkContext, stmt: &IfStmt) -> Result<(), Self::Error> {
        Ok(())
    }

    /// `body` is `None` for an `IF` without `ELSE`; the clause is still
    /// reported, as an empty one.
    fn enter_else_stmt(&mut self, ctx: &WalkContext, body: Option<&Body>) -> Result<(), Self::Error> {
        Ok(())
    }
    fn exit_else_stmt(&mut self, ctx: &WalkContext, body: Option<&Body>) -> Result<(), Self::Error> {
        Ok(())
    }

    fn enter_while_stmt(&mut self, ctx: &WalkContext, stmt: &WhileStmt) -> Result<(), Self::Error> {
        Ok(())
    }
    fn exit_while_stmt(&mut self, ctx: &WalkContext, stmt: &WhileStmt) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub fn walk<L: Listener + ?Sized>(listener: &mut L, program: &Program) -> Result<(), L::Error> {
    let mut walker = Walker {
        listener,
        ctx: WalkContext::default(),
    };
    walker.program(program)
}

struct Walker<'l, L: Listener + ?Sized> {
    listener: &'l mut L,
    ctx: WalkContext,
}

impl<L: Listener + ?Sized> Walker<'_, L> {
    fn program(&mut self, program: &Program) -> Result<(), L::Error> {
        self.listener.enter_program(&self.ctx, program)?;
        self.ctx.push(NodeKind::Program);
        self.decls(&program.decls)?;
        for func in &program.functions {
            self.func_decl(func)?;
        }
        self.ctx.pop();
        self.listener.exit_program(&self.ctx, program)
    }

    fn func_decl(&mut self, func: &FuncDecl) -> Result<(), L::Error> {
        self.listener.enter_func_decl(&self.ctx, func)?;
        self.ctx.push(NodeKind::FuncDecl);

        self.listener.enter_param_decl_list(&self.ctx, &func.params)?;
        self.listener.exit_param_decl_list(&self.ctx, &func.params)?;

        self.listener.enter_func_body(&self.ctx, &func.body)?;
        self.ctx.push(NodeKind::FuncBody);
        self.body(&func.body)?;
        self.ctx.pop();
        self.listener.exit_func_body(&self.ctx, &func.body)?;

        self.ctx.pop();
        self.listener.exit_func_decl(&self.ctx, func)
    }

    fn body(&mut self, body: &Body) -> Result<(), L::Error> {
        self.decls(&body.decls)?;
        self.stmt_list(&body.stmts)
    }

    fn decls(&mut self, decls: &[Decl]) -> Result<(), L::Error> {
        for decl in decls {
            match decl {
                Decl::Var(var) => {
                    self.listener.enter_var_decl(&self.ctx, var)?;
                    self.listener.exit_var_decl(&self.ctx, var)?;
                }
                Decl::Str(string) => {
                    self.listener.enter_string_decl(&self.ctx, string)?;
                    self.listener.exit_string_decl(&self.ctx, string)?;
                }
            }
        }
        Ok(())
    }

    fn stmt_list(&mut self, stmts: &[StmtS]) -> Result<(), L::Error> {
        self.listener.enter_stmt_list(&self.ctx, stmts)?;
        self.ctx.push(NodeKind::StmtList);
        for (stmt, _) in stmts {
            match stmt {
                Stmt::If(if_stmt) => self.if_stmt(if_stmt)?,
                Stmt::While(while_stmt) => self.while_stmt(while_stmt)?,
                Stmt::Assign { .. } | Stmt::Read(_) | Stmt::Write(_) | Stmt::Return(_) => {}
            }
        }
        self.ctx.pop();
        self.listener.exit_stmt_list(&self.ctx, stmts)
    }

    fn if_stmt(&mut self, stmt: &IfStmt) -> Result<(), L::Error> {
        self.listener.enter_if_stmt(&self.ctx, stmt)?;
        self.ctx.push(NodeKind::IfStmt);
        self.body(&stmt.then_body)?;

        let else_body = stmt.else_body.as_ref();
        self.listener.enter_else_stmt(&self.ctx, else_body)?;
        self.ctx.push(NodeKind::ElseStmt);
        if let Some(body) = else_body {
            self.body(body)?;
        }
        self.ctx.pop();
        self.listener.exit_else_stmt(&self.ctx, else_body)?;

        self.ctx.pop();
        self.listener.exit_if_stmt(&self.ctx, stmt)
    }

    fn while_stmt(&mut self, stmt: &WhileStmt) -> Result<(), L::Error> {
        self.listener.enter_while_stmt(&self.ctx, stmt)?;
        self.ctx.push(NodeKind::WhileStmt);
        self.body(&stmt.body)?;
        self.ctx.pop();
        self.listener.exit_while_stmt(&self.ctx, stmt)
    }
}
