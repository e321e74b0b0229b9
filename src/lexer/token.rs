use std::fmt::{Display, Formatter, Result as FmtResult};
use std::ops::Range;

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Keywords
    Program,
    Begin,
    End,
    Function,
    Read,
    Write,
    If,
    Else,
    EndIf,
    While,
    EndWhile,
    Return,
    IntType,
    VoidType,
    StringType,
    FloatType,
    // Identifiers and literals
    Identifier(String),
    /// Literal text; numeric values are never range checked.
    IntLiteral(String),
    FloatLiteral(String),
    /// Raw literal text, surrounding quotes included.
    StringLiteral(String),
    // Operators and punctuation
    Assign,
    Plus,
    Minus,
    Star,
    Slash,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    LParen,
    RParen,
    Semicolon,
    Comma,
    // Special tokens
    Eof,

    Error(String, Range<usize>),
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            // Keywords
            Token::Program => write!(f, "PROGRAM"),
            Token::Begin => write!(f, "BEGIN"),
            Token::End => write!(f, "END"),
            Token::Function => write!(f, "FUNCTION"),
            Token::Read => write!(f, "READ"),
            Token::Write => write!(f, "WRITE"),
            Token::If => write!(f, "IF"),
            Token::Else => write!(f, "ELSE"),
            Token::EndIf => write!(f, "ENDIF"),
            Token::While => write!(f, "WHILE"),
            Token::EndWhile => write!(f, "ENDWHILE"),
            Token::Return => write!(f, "RETURN"),
            Token::IntType => write!(f, "INT"),
            Token::VoidType => write!(f, "VOID"),
            Token::StringType => write!(f, "STRING"),
            Token::FloatType => write!(f, "FLOAT"),

            // Identifiers and literals
            Token::Identifier(name) => write!(f, "{}", name),
            Token::IntLiteral(text) => write!(f, "{}", text),
            Token::FloatLiteral(text) => write!(f, "{}", text),
            Token::StringLiteral(s) => write!(f, "{}", s),

            // Operators and punctuation
            Token::Assign => write!(f, ":="),
            Token::Plus => write!(f, "+"),
            Token::Minus => write!(f, "-"),
            Token::Star => write!(f, "*"),
            Token::Slash => write!(f, "/"),
            Token::Equal => write!(f, "="),
            Token::NotEqual => write!(f, "!="),
            Token::Less => write!(f, "<"),
            Token::LessEqual => write!(f, "<="),
            Token::Greater => write!(f, ">"),
            Token::GreaterEqual => write!(f, ">="),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Semicolon => write!(f, ";"),
            Token::Comma => write!(f, ","),

            // Special tokens
            Token::Eof => write!(f, "<EOF>"),

            Token::Error(msg, _) => write!(f, "<ERROR: {}>", msg),
        }
    }
}
