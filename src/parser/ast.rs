use crate::types::Span;

pub type IdentS = (String, Span);
pub type ExprS = (Expr, Span);
pub type StmtS = (Stmt, Span);

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum VarType {
    Int,
    Float,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnType {
    Void,
    Value(VarType),
}

/// Numeric literal as written. Values are never evaluated, so any digit
/// string is accepted.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(String),
    Float(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CompOp {
    Less,
    Greater,
    Equal,
    NotEqual,
    LessEqual,
    GreaterEqual,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Variable(String),
    Binary {
        op: BinaryOp,
        left: Box<ExprS>,
        right: Box<ExprS>,
    },
    Call {
        func_name: String,
        args: Vec<ExprS>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Cond {
    pub left: ExprS,
    pub op: CompOp,
    pub right: ExprS,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VarDecl {
    pub ty: VarType,
    pub names: Vec<IdentS>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StringDecl {
    pub name: IdentS,
    /// Literal exactly as written, quotes included.
    pub value: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Decl {
    Var(VarDecl),
    Str(StringDecl),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub ty: VarType,
    pub name: IdentS,
}

/// Declarations followed by statements; the shape of function bodies and of
/// every `IF`/`ELSE`/`WHILE` body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Body {
    pub decls: Vec<Decl>,
    pub stmts: Vec<StmtS>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStmt {
    pub condition: Cond,
    pub then_body: Body,
    pub else_body: Option<Body>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileStmt {
    pub condition: Cond,
    pub body: Body,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Assign { target: IdentS, value: ExprS },
    Read(Vec<IdentS>),
    Write(Vec<IdentS>),
    Return(ExprS),
    If(IfStmt),
    While(WhileStmt),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FuncDecl {
    pub return_type: ReturnType,
    pub name: IdentS,
    pub params: Vec<Param>,
    pub body: Body,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub name: IdentS,
    pub decls: Vec<Decl>,
    pub functions: Vec<FuncDecl>,
}
