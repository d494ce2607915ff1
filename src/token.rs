use std::fmt::Display;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenType {
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comma,
    Dot,
    Minus,
    Plus,
    Semicolon,
    Slash,
    Star,
    Question,
    Colon,

    Bang,
    BangEqual,
    Equal,
    EqualEqual,
    Greater,
    GreaterEqual,
    Less,
    LessEqual,

    Identifier,
    String,
    Number,

    And,
    Class,
    Else,
    False,
    Fun,
    For,
    If,
    Nil,
    Or,
    Print,
    Return,
    Super,
    This,
    True,
    Var,
    While,

    EOF,
}

impl TokenType {
    pub fn keyword(text: &str) -> Option<TokenType> {
        use TokenType::*;
        let keyword = match text {
            "and" => And,
            "class" => Class,
            "else" => Else,
            "false" => False,
            "fun" => Fun,
            "for" => For,
            "if" => If,
            "nil" => Nil,
            "or" => Or,
            "print" => Print,
            "return" => Return,
            "super" => Super,
            "this" => This,
            "true" => True,
            "var" => Var,
            "while" => While,
            _ => return None,
        };

        Some(keyword)
    }
}

/// Decoded value carried by NUMBER and STRING tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Number(f64),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub t_type: TokenType,
    pub lexeme: String,
    pub literal: Option<Literal>,
    pub line: usize,
}

impl Token {
    pub fn new(t_type: TokenType, lexeme: &str, literal: Option<Literal>, line: usize) -> Token {
        Token {
            t_type,
            lexeme: lexeme.to_string(),
            literal,
            line,
        }
    }

    pub fn eof(line: usize) -> Token {
        Token::new(TokenType::EOF, "", None, line)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.literal {
            Some(Literal::String(s)) => write!(f, "{:?} {} {}", self.t_type, self.lexeme, s),
            Some(Literal::Number(n)) => write!(f, "{:?} {} {:?}", self.t_type, self.lexeme, n),
            None => write!(f, "{:?} {}", self.t_type, self.lexeme),
        }
    }
}
