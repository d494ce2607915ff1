use std::io;

use thiserror::Error;

use crate::token::{Token, TokenType};

#[derive(Debug, Clone, PartialEq, Error)]
#[error("[line {line}] Error: {message}")]
pub struct LexError {
    pub line: usize,
    pub message: String,
}

impl LexError {
    pub fn new(line: usize, message: &str) -> LexError {
        LexError {
            line,
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("[line {}] Error{}: {message}", .token.line, location(.token))]
pub struct ParseError {
    pub token: Token,
    pub message: String,
}

impl ParseError {
    pub fn new(token: &Token, message: &str) -> ParseError {
        ParseError {
            token: token.clone(),
            message: message.to_string(),
        }
    }

    pub fn location(&self) -> String {
        location(&self.token)
    }
}

fn location(token: &Token) -> String {
    match token.t_type {
        TokenType::EOF => " at end".to_string(),
        _ => format!(" at '{}'", token.lexeme),
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}\n[line {}]", .token.line)]
pub struct RuntimeError {
    pub token: Token,
    pub message: String,
}

impl RuntimeError {
    pub fn new(token: &Token, message: &str) -> RuntimeError {
        RuntimeError {
            token: token.clone(),
            message: message.to_string(),
        }
    }
}

/// Errors found before evaluation starts. Kept in source order so they can be
/// reported the way they were encountered.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StaticError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl StaticError {
    pub fn line(&self) -> usize {
        match self {
            StaticError::Lex(e) => e.line,
            StaticError::Parse(e) => e.token.line,
        }
    }
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error("couldn't read the source: {0}")]
    Io(#[from] io::Error),
    #[error("{} static error(s)", .0.len())]
    Static(Vec<StaticError>),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl RunError {
    pub fn exit_code(&self) -> u8 {
        match self {
            RunError::Static(_) => 65,
            RunError::Runtime(_) => 70,
            RunError::Io(_) => 74,
        }
    }
}
