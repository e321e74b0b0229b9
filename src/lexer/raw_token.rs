use logos::Logos;

#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(skip r"--[^\n]*")]
pub enum RawToken {
    // Keywords
    #[token("PROGRAM")]
    Program,
    #[token("BEGIN")]
    Begin,
    #[token("END")]
    End,
    #[token("FUNCTION")]
    Function,
    #[token("READ")]
    Read,
    #[token("WRITE")]
    Write,
    #[token("IF")]
    If,
    #[token("ELSE")]
    Else,
    #[token("ENDIF")]
    EndIf,
    #[token("WHILE")]
    While,
    #[token("ENDWHILE")]
    EndWhile,
    #[token("RETURN")]
    Return,
    #[token("INT")]
    IntType,
    #[token("VOID")]
    VoidType,
    #[token("STRING")]
    StringType,
    #[token("FLOAT")]
    FloatType,

    // Identifiers and literals
    #[regex(r"[A-Za-z][A-Za-z0-9]*", lex_text)]
    Identifier(String),
    #[regex(r"[0-9]+", lex_text)]
    IntLiteral(String),
    #[regex(r"[0-9]*\.[0-9]+", lex_text)]
    FloatLiteral(String),
    #[regex(r#""[^"]*""#, lex_text)]
    StringLiteral(String),

    // Operators and punctuation
    #[token(":=")]
    Assign,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("=")]
    Equal,
    #[token("!=")]
    NotEqual,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEqual,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEqual,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
}

// Literals keep their source text. String literals keep their quotes.
fn lex_text(lexer: &mut logos::Lexer<RawToken>) -> String {
    lexer.slice().to_string()
}
