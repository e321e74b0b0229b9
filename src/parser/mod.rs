pub mod ast;

use crate::lexer::Token;
use ast::*;
use chumsky::Parser;
use chumsky::input::ValueInput;
use chumsky::prelude::*;

pub use chumsky::span::SimpleSpan;

pub(crate) type RichTokenError<'a> = Rich<'a, Token>;
type ParserExtra<'a> = extra::Err<RichTokenError<'a>>;

fn ident_parser<'tokens, I>() -> impl Parser<'tokens, I, IdentS, ParserExtra<'tokens>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = SimpleSpan> + 'tokens,
{
    select! { Token::Identifier(s) => s }
        .map_with(|name: String, e| {
            let s: I::Span = e.span();
            (name, s.into_range())
        })
        .labelled("identifier")
}

fn var_type_parser<'tokens, I>() -> impl Parser<'tokens, I, VarType, ParserExtra<'tokens>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = SimpleSpan> + 'tokens,
{
    select! {
        Token::IntType => VarType::Int,
        Token::FloatType => VarType::Float,
    }
    .labelled("type")
}

fn fold_binary(left: ExprS, (op, right): (BinaryOp, ExprS)) -> ExprS {
    let span = left.1.start..right.1.end;
    (
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        },
        span,
    )
}

pub fn expr_parser<'tokens, I>() -> impl Parser<'tokens, I, ExprS, ParserExtra<'tokens>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = SimpleSpan> + 'tokens,
{
    recursive(|expr| {
        let ident = select! { Token::Identifier(s) => s }.labelled("identifier");

        // id ( expr_list )
        let call = ident
            .clone()
            .then(
                expr.clone()
                    .separated_by(just(Token::Comma))
                    .collect::<Vec<ExprS>>()
                    .delimited_by(just(Token::LParen), just(Token::RParen)),
            )
            .map(|(func_name, args)| Expr::Call { func_name, args });

        // Primary: literals, calls, variables, parenthesized expressions
        let primary = choice((
            select! {
                Token::IntLiteral(i) => Expr::Literal(Literal::Int(i)),
                Token::FloatLiteral(f) => Expr::Literal(Literal::Float(f)),
            }
            .labelled("literal"),
            call,
            ident.map(Expr::Variable),
            expr.clone()
                .delimited_by(just(Token::LParen), just(Token::RParen))
                .map(|e: ExprS| e.0),
        ))
        .map_with(|node: Expr, e| {
            let s: I::Span = e.span();
            (node, s.into_range())
        });

        let op = |t| just(t).ignored();
        let product = primary.clone().foldl(
            choice((
                op(Token::Star).to(BinaryOp::Multiply),
                op(Token::Slash).to(BinaryOp::Divide),
            ))
            .then(primary)
            .repeated(),
            fold_binary,
        );
        let sum = product.clone().foldl(
            choice((
                op(Token::Plus).to(BinaryOp::Add),
                op(Token::Minus).to(BinaryOp::Subtract),
            ))
            .then(product)
            .repeated(),
            fold_binary,
        );

        sum.labelled("expression")
    })
    .boxed()
}

pub fn decl_parser<'tokens, I>() -> impl Parser<'tokens, I, Decl, ParserExtra<'tokens>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = SimpleSpan> + 'tokens,
{
    let ident = ident_parser();

    // INT a, b, c;
    let var_decl = var_type_parser()
        .then(
            ident
                .clone()
                .separated_by(just(Token::Comma))
                .at_least(1)
                .collect::<Vec<IdentS>>(),
        )
        .then_ignore(just(Token::Semicolon))
        .map(|(ty, names)| Decl::Var(VarDecl { ty, names }))
        .labelled("variable declaration");

    // STRING s := "literal";
    let string_decl = just(Token::StringType)
        .ignore_then(ident)
        .then_ignore(just(Token::Assign))
        .then(select! { Token::StringLiteral(s) => s }.labelled("string literal"))
        .then_ignore(just(Token::Semicolon))
        .map(|(name, value)| Decl::Str(StringDecl { name, value }))
        .labelled("string declaration");

    choice((var_decl, string_decl)).boxed()
}

pub fn stmt_parser<'tokens, I>() -> impl Parser<'tokens, I, StmtS, ParserExtra<'tokens>> + Clone
where
    I: ValueInput<'tokens, Token = Token, Span = SimpleSpan> + 'tokens,
{
    let expr = expr_parser().boxed();
    let decl = decl_parser().boxed();

    recursive(|stmt| {
        let ident = ident_parser();
        let semicolon = just(Token::Semicolon);

        let id_list = ident
            .clone()
            .separated_by(just(Token::Comma))
            .at_least(1)
            .collect::<Vec<IdentS>>()
            .delimited_by(just(Token::LParen), just(Token::RParen));

        let comp_op = select! {
            Token::Less => CompOp::Less,
            Token::Greater => CompOp::Greater,
            Token::Equal => CompOp::Equal,
            Token::NotEqual => CompOp::NotEqual,
            Token::LessEqual => CompOp::LessEqual,
            Token::GreaterEqual => CompOp::GreaterEqual,
        }
        .labelled("comparison operator");

        let condition = expr
            .clone()
            .then(comp_op)
            .then(expr.clone())
            .map(|((left, op), right)| Cond { left, op, right })
            .delimited_by(just(Token::LParen), just(Token::RParen))
            .labelled("condition");

        // Declarations always precede the statements of a body.
        let body = decl
            .clone()
            .repeated()
            .collect::<Vec<Decl>>()
            .then(stmt.clone().repeated().collect::<Vec<StmtS>>())
            .map(|(decls, stmts)| Body { decls, stmts })
            .boxed();

        let assign_stmt = ident
            .clone()
            .then_ignore(just(Token::Assign))
            .then(expr.clone())
            .then_ignore(semicolon.clone())
            .map(|(target, value)| Stmt::Assign { target, value })
            .labelled("assignment");

        let read_stmt = just(Token::Read)
            .ignore_then(id_list.clone())
            .then_ignore(semicolon.clone())
            .map(Stmt::Read)
            .labelled("READ statement");

        let write_stmt = just(Token::Write)
            .ignore_then(id_list)
            .then_ignore(semicolon.clone())
            .map(Stmt::Write)
            .labelled("WRITE statement");

        let return_stmt = just(Token::Return)
            .ignore_then(expr.clone())
            .then_ignore(semicolon)
            .map(Stmt::Return)
            .labelled("RETURN statement");

        let if_stmt = just(Token::If)
            .ignore_then(condition.clone())
            .then(body.clone())
            .then(just(Token::Else).ignore_then(body.clone()).or_not())
            .then_ignore(just(Token::EndIf))
            .map(|((condition, then_body), else_body)| {
                Stmt::If(IfStmt {
                    condition,
                    then_body,
                    else_body,
                })
            })
            .labelled("IF statement");

        let while_stmt = just(Token::While)
            .ignore_then(condition)
            .then(body)
            .then_ignore(just(Token::EndWhile))
            .map(|(condition, body)| Stmt::While(WhileStmt { condition, body }))
            .labelled("WHILE statement");

        choice((
            assign_stmt,
            read_stmt,
            write_stmt,
            return_stmt,
            if_stmt,
            while_stmt,
        ))
        .map_with(|node: Stmt, e| {
            let s: I::Span = e.span();
            (node, s.into_range())
        })
    })
    .boxed()
}

pub fn program_parser<'tokens, I>() -> impl Parser<'tokens, I, Program, ParserExtra<'tokens>>
where
    I: ValueInput<'tokens, Token = Token, Span = SimpleSpan> + 'tokens,
{
    let ident = ident_parser();
    let decl = decl_parser().boxed();
    let stmt = stmt_parser().boxed();

    let body = decl
        .clone()
        .repeated()
        .collect::<Vec<Decl>>()
        .then(stmt.repeated().collect::<Vec<StmtS>>())
        .map(|(decls, stmts)| Body { decls, stmts });

    let return_type = choice((
        just(Token::VoidType).to(ReturnType::Void),
        var_type_parser().map(ReturnType::Value),
    ))
    .labelled("return type");

    let params = var_type_parser()
        .then(ident.clone())
        .map(|(ty, name)| Param { ty, name })
        .separated_by(just(Token::Comma))
        .collect::<Vec<Param>>()
        .delimited_by(just(Token::LParen), just(Token::RParen));

    // FUNCTION <type> id ( params ) BEGIN body END
    let func_decl = just(Token::Function)
        .ignore_then(return_type)
        .then(ident.clone())
        .then(params)
        .then_ignore(just(Token::Begin))
        .then(body)
        .then_ignore(just(Token::End))
        .map_with(|(((return_type, name), params), body), e| {
            let s: I::Span = e.span();
            FuncDecl {
                return_type,
                name,
                params,
                body,
                span: s.into_range(),
            }
        })
        .labelled("function declaration");

    just(Token::Program)
        .ignore_then(ident)
        .then_ignore(just(Token::Begin))
        .then(decl.repeated().collect::<Vec<Decl>>())
        .then(func_decl.repeated().collect::<Vec<FuncDecl>>())
        .then_ignore(just(Token::End))
        .then_ignore(end())
        .map(|((name, decls), functions)| Program {
            name,
            decls,
            functions,
        })
        .boxed()
}
