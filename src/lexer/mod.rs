mod raw_token;
pub mod token;

use logos::{Lexer as LogosLexer, Logos};
use raw_token::RawToken;
use std::ops::Range;
pub(crate) use token::Token;

pub struct Lexer<'source> {
    inner: LogosLexer<'source, RawToken>,
    finished: bool,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Self {
        Lexer {
            inner: RawToken::lexer(source),
            finished: false,
        }
    }

    pub fn next_token(&mut self) -> Token {
        let (tok, _) = self.next_token_with_span();
        tok
    }

    pub fn next_token_with_span(&mut self) -> (Token, Range<usize>) {
        if self.finished {
            let pos = self.inner.span().end;
            return (Token::Eof, pos..pos);
        }

        match self.inner.next() {
            Some(Ok(raw_token)) => {
                let span = self.inner.span();
                let token = Self::convert_token(raw_token);
                (token, span)
            }
            Some(Err(_)) => {
                let span = self.inner.span();
                let error_msg = format!("Invalid token '{}'", self.inner.slice());
                (Token::Error(error_msg, span.clone()), span)
            }
            None => {
                self.finished = true;
                let pos = self.inner.span().end;
                (Token::Eof, pos..pos)
            }
        }
    }

    fn convert_token(raw: RawToken) -> Token {
        match raw {
            RawToken::Program => Token::Program,
            RawToken::Begin => Token::Begin,
            RawToken::End => Token::End,
            RawToken::Function => Token::Function,
            RawToken::Read => Token::Read,
            RawToken::Write => Token::Write,
            RawToken::If => Token::If,
            RawToken::Else => Token::Else,
            RawToken::EndIf => Token::EndIf,
            RawToken::While => Token::While,
            RawToken::EndWhile => Token::EndWhile,
            RawToken::Return => Token::Return,
            RawToken::IntType => Token::IntType,
            RawToken::VoidType => Token::VoidType,
            RawToken::StringType => Token::StringType,
            RawToken::FloatType => Token::FloatType,

            RawToken::Identifier(name) => Token::Identifier(name),
            RawToken::IntLiteral(text) => Token::IntLiteral(text),
            RawToken::FloatLiteral(text) => Token::FloatLiteral(text),
            RawToken::StringLiteral(text) => Token::StringLiteral(text),

            RawToken::Assign => Token::Assign,
            RawToken::Plus => Token::Plus,
            RawToken::Minus => Token::Minus,
            RawToken::Star => Token::Star,
            RawToken::Slash => Token::Slash,
            RawToken::Equal => Token::Equal,
            RawToken::NotEqual => Token::NotEqual,
            RawToken::Less => Token::Less,
            RawToken::LessEqual => Token::LessEqual,
            RawToken::Greater => Token::Greater,
            RawToken::GreaterEqual => Token::GreaterEqual,
            RawToken::LParen => Token::LParen,
            RawToken::RParen => Token::RParen,
            RawToken::Semicolon => Token::Semicolon,
            RawToken::Comma => Token::Comma,
        }
    }
}
