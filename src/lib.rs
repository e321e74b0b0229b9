pub mod error;
pub mod lexer;
pub mod parser;
pub mod semantic;
pub mod types;

use ariadne::{Color, Label, Report, ReportKind, Source};
use chumsky::Parser;
use chumsky::input::{Input, Stream};
use chumsky::span::SimpleSpan;
use tracing::debug;

use crate::lexer::token::Token;
use crate::semantic::{SemanticError, SymbolTable};

pub use error::{Error, Result};

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub message: String,
    pub span: std::ops::Range<usize>,
    /// Secondary location, e.g. the first declaration of a duplicated name.
    pub related: Option<(String, std::ops::Range<usize>)>,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, span: std::ops::Range<usize>) -> Self {
        Self {
            message: message.into(),
            span,
            related: None,
        }
    }

    pub fn with_related(mut self, message: impl Into<String>, span: std::ops::Range<usize>) -> Self {
        self.related = Some((message.into(), span));
        self
    }

    pub fn format(&self, path: &str, src: &str, kind: &str, code: usize) -> String {
        let mut buffer = Vec::new();
        let mut report = Report::build(ReportKind::Error, (path, self.span.clone()))
            .with_config(ariadne::Config::new().with_index_type(ariadne::IndexType::Byte))
            .with_code(code)
            .with_message(kind)
            .with_label(
                Label::new((path, self.span.clone()))
                    .with_message(&self.message)
                    .with_color(Color::Red),
            );
        if let Some((message, span)) = &self.related {
            report = report.with_label(
                Label::new((path, span.clone()))
                    .with_message(message)
                    .with_color(Color::Blue),
            );
        }
        report
            .finish()
            .write((path, Source::from(src)), &mut buffer)
            .ok();
        String::from_utf8_lossy(&buffer).to_string()
    }
}

impl From<&SemanticError> for Diagnostic {
    fn from(err: &SemanticError) -> Self {
        match err {
            SemanticError::DuplicateDeclaration {
                name,
                span,
                previous,
            } => Diagnostic::new(format!("'{}' is already declared in this scope", name), span.clone())
                .with_related("first declared here", previous.clone()),
        }
    }
}

fn tokenize(src: &str) -> std::result::Result<Vec<(Token, SimpleSpan)>, Vec<Diagnostic>> {
    let mut lexer = lexer::Lexer::new(src);
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    loop {
        match lexer.next_token_with_span() {
            (Token::Eof, _) => break,
            (Token::Error(message, span), _) => errors.push(Diagnostic::new(message, span)),
            (t, span) => tokens.push((t, SimpleSpan::new(span.start, span.end))),
        }
    }
    debug!(tokens = tokens.len(), errors = errors.len(), "lexed source");
    if errors.is_empty() {
        Ok(tokens)
    } else {
        Err(errors)
    }
}

/// Lex and parse a whole program. Lexical errors are reported on their own,
/// before any parsing is attempted.
pub fn parse_source(src: &str) -> std::result::Result<parser::ast::Program, Vec<Diagnostic>> {
    let tokens = tokenize(src)?;
    let eoi_span = parser::SimpleSpan::new(src.len(), src.len());
    let token_stream = Stream::from_iter(tokens).map(eoi_span, |(t, s)| (t, s));
    match parser::program_parser().parse(token_stream).into_result() {
        Ok(program) => Ok(program),
        Err(errors) => {
            let mut errors = errors;
            errors.sort_by(|x1, x2| {
                let x1 = (x1.span().start, x1.span().end);
                let x2 = (x2.span().start, x2.span().end);
                x1.cmp(&x2)
            });
            let diagnostics = errors
                .into_iter()
                .map(|e| Diagnostic::new(e.reason().to_string(), e.span().into_range()))
                .collect();
            Err(diagnostics)
        }
    }
}

pub fn analyze(program: &parser::ast::Program) -> std::result::Result<SymbolTable, SemanticError> {
    semantic::analyze(program)
}

/// Parse, analyze and render the symbol table report for `src`.
pub fn symbol_table_report(src: &str) -> Result<String> {
    let program = parse_source(src).map_err(Error::Parse)?;
    let table = analyze(&program)?;
    Ok(semantic::report::render(&table))
}
