use crate::{
    error::LexError,
    token::{Literal, Token, TokenType},
};

/// Output of a scan. Tokens are produced even when errors were found so the
/// caller decides whether to go on.
#[derive(Debug)]
pub struct Scanned {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

impl Scanned {
    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }
}

pub fn scan_tokens(source: &str) -> Scanned {
    Scanner::new(source).scan_tokens()
}

pub struct Scanner<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    errors: Vec<LexError>,
    // byte offsets into source, always on a char boundary
    start: usize,
    current: usize,
    line: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            errors: Vec::new(),
            start: 0,
            current: 0,
            line: 1,
        }
    }

    pub fn scan_tokens(mut self) -> Scanned {
        while let Some(character) = self.advance() {
            self.scan_token(character);
            self.start = self.current;
        }

        self.tokens.push(Token::eof(self.line));

        Scanned {
            tokens: self.tokens,
            errors: self.errors,
        }
    }

    fn scan_token(&mut self, character: char) {
        use TokenType::*;

        match character {
            '(' => self.add_token(LeftParen),
            ')' => self.add_token(RightParen),
            '{' => self.add_token(LeftBrace),
            '}' => self.add_token(RightBrace),
            ',' => self.add_token(Comma),
            '.' => self.add_token(Dot),
            '-' => self.add_token(Minus),
            '+' => self.add_token(Plus),
            ';' => self.add_token(Semicolon),
            '*' => self.add_token(Star),
            '?' => self.add_token(Question),
            ':' => self.add_token(Colon),
            '!' if self.peek_and_match('=') => self.add_token(BangEqual),
            '!' => self.add_token(Bang),
            '=' if self.peek_and_match('=') => self.add_token(EqualEqual),
            '=' => self.add_token(Equal),
            '<' if self.peek_and_match('=') => self.add_token(LessEqual),
            '<' => self.add_token(Less),
            '>' if self.peek_and_match('=') => self.add_token(GreaterEqual),
            '>' => self.add_token(Greater),
            '/' if self.peek_and_match('/') => {
                while self.peek().is_some_and(|x| x != '\n') {
                    self.advance();
                }
            }
            '/' if self.peek_and_match('*') => self.block_comment(),
            '/' => self.add_token(Slash),

            ' ' | '\r' | '\t' => (),
            '\n' => self.line += 1,

            '"' => self.string(),
            c if c.is_ascii_digit() => self.number(),
            c if is_alpha(c) => self.identifier(),

            _ => self.error("Unexpected character."),
        }
    }

    fn block_comment(&mut self) {
        loop {
            match self.advance() {
                Some('*') if self.peek_and_match('/') => return,
                Some('\n') => self.line += 1,
                Some(_) => (),
                None => {
                    self.error("Unterminated block comment.");
                    return;
                }
            }
        }
    }

    fn string(&mut self) {
        while let Some(c) = self.peek() {
            if c == '"' {
                break;
            }
            if c == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        // the token is still emitted so the parser sees a value where one was meant
        if self.peek().is_none() {
            self.error("Unterminated string.");
            let value = &self.source[self.start + 1..self.current];
            self.add_token_literal(TokenType::String, Some(Literal::String(value.to_string())));
            return;
        }

        // closing quote
        self.advance();

        let value = &self.source[self.start + 1..self.current - 1];
        self.add_token_literal(TokenType::String, Some(Literal::String(value.to_string())));
    }

    fn number(&mut self) {
        self.consume_digits();

        if self.peek() == Some('.') && self.peek_next().is_some_and(|x| x.is_ascii_digit()) {
            self.advance();
            self.consume_digits();
        }

        // only ascii digits and at most one inner '.' were consumed
        match self.lexeme().parse::<f64>() {
            Ok(value) => self.add_token_literal(TokenType::Number, Some(Literal::Number(value))),
            Err(_) => self.error("Invalid number literal."),
        }
    }

    fn consume_digits(&mut self) {
        while self.peek().is_some_and(|x| x.is_ascii_digit()) {
            self.advance();
        }
    }

    fn identifier(&mut self) {
        while self.peek().is_some_and(is_alphanumeric) {
            self.advance();
        }

        let t_type = TokenType::keyword(self.lexeme()).unwrap_or(TokenType::Identifier);
        self.add_token(t_type);
    }

    fn advance(&mut self) -> Option<char> {
        let character = self.peek()?;
        self.current += character.len_utf8();
        Some(character)
    }

    fn peek(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        self.source[self.current..].chars().nth(1)
    }

    fn peek_and_match(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            return true;
        }

        false
    }

    fn lexeme(&self) -> &'a str {
        &self.source[self.start..self.current]
    }

    fn add_token(&mut self, t_type: TokenType) {
        self.add_token_literal(t_type, None)
    }

    fn add_token_literal(&mut self, t_type: TokenType, literal: Option<Literal>) {
        let lexeme = self.lexeme();
        self.tokens
            .push(Token::new(t_type, lexeme, literal, self.line));
    }

    fn error(&mut self, message: &str) {
        self.errors.push(LexError::new(self.line, message));
    }
}

fn is_alpha(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_alphanumeric(c: char) -> bool {
    is_alpha(c) || c.is_ascii_digit()
}
