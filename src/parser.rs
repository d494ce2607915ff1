use crate::{
    ast::Expr,
    error::ParseError,
    token::{Token, TokenType},
    value::Value,
};

/// Result of parsing a single expression.
#[derive(Debug)]
pub struct Parsed {
    pub expr: Option<Expr>,
    pub errors: Vec<ParseError>,
}

impl Parsed {
    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Result of parsing a `;` separated run of expressions.
#[derive(Debug)]
pub struct ParsedAll {
    pub exprs: Vec<Expr>,
    pub errors: Vec<ParseError>,
}

impl ParsedAll {
    pub fn had_error(&self) -> bool {
        !self.errors.is_empty()
    }
}

// grammar rules entered through `(`, unary operators and ternaries
const MAX_NESTING: usize = 128;
// height of the tree handed to the evaluator and the printers
const MAX_DEPTH: usize = 512;

const TOO_DEEP: &str = "Expression nested too deeply.";

pub struct Parser<'a> {
    tokens: &'a [Token],
    current: usize,
    // stands in for a missing EOF so the cursor never runs off the slice
    eof: Token,
    nesting: usize,
    // height of the expression the last rule returned
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token]) -> Parser<'a> {
        let line = tokens.last().map_or(1, |t| t.line);
        Parser {
            tokens,
            current: 0,
            eof: Token::eof(line),
            nesting: 0,
            depth: 0,
        }
    }

    // unit -> expression ";"? EOF
    pub fn parse(&mut self) -> Parsed {
        match self.unit() {
            Ok(expr) => Parsed {
                expr: Some(expr),
                errors: Vec::new(),
            },
            Err(e) => {
                self.synchronize();
                Parsed {
                    expr: None,
                    errors: vec![e],
                }
            }
        }
    }

    // program -> (expression ";"?)* EOF
    pub fn parse_all(&mut self) -> ParsedAll {
        let mut exprs = Vec::new();
        let mut errors = Vec::new();

        while !self.is_at_end() {
            match self.program_unit() {
                Ok(expr) => exprs.push(expr),
                Err(e) => {
                    errors.push(e);
                    self.synchronize();
                }
            }
        }

        ParsedAll { exprs, errors }
    }

    fn unit(&mut self) -> Result<Expr, ParseError> {
        let expr = self.expression()?;
        self.match_token(&[TokenType::Semicolon]);

        if !self.is_at_end() {
            return Err(ParseError::new(self.peek(), "Expect end of expression."));
        }

        Ok(expr)
    }

    fn program_unit(&mut self) -> Result<Expr, ParseError> {
        let expr = self.expression()?;

        if !self.match_token(&[TokenType::Semicolon]) && !self.is_at_end() {
            return Err(ParseError::new(
                self.peek(),
                "Expect ';' between expressions.",
            ));
        }

        Ok(expr)
    }

    fn expression(&mut self) -> Result<Expr, ParseError> {
        self.comma()
    }

    // comma has the lowest precedence
    // comma -> ternary ("," ternary)*
    fn comma(&mut self) -> Result<Expr, ParseError> {
        use TokenType::*;
        self.left_association_binary(&[Comma], Self::ternary)
    }

    // ternary -> equality ("?" expression ":" ternary)?
    fn ternary(&mut self) -> Result<Expr, ParseError> {
        use TokenType::*;
        let condition = self.equality()?;

        if self.match_token(&[Question]) {
            let question = self.previous().clone();
            let mut depth = self.depth;
            let then_branch = self.nested(&question, Self::expression)?;
            depth = depth.max(self.depth);
            self.consume(
                Colon,
                "Expect ':' after then branch of conditional expression.",
            )?;
            let else_branch = self.nested(&question, Self::ternary)?;
            self.depth = depth.max(self.depth);
            self.deepen(&question)?;
            return Ok(Expr::ternary(condition, then_branch, else_branch));
        }

        Ok(condition)
    }

    fn equality(&mut self) -> Result<Expr, ParseError> {
        use TokenType::*;
        self.left_association_binary(&[BangEqual, EqualEqual], Self::comparison)
    }

    fn comparison(&mut self) -> Result<Expr, ParseError> {
        use TokenType::*;
        self.left_association_binary(&[Greater, GreaterEqual, Less, LessEqual], Self::term)
    }

    fn term(&mut self) -> Result<Expr, ParseError> {
        use TokenType::*;
        self.left_association_binary(&[Minus, Plus], Self::factor)
    }

    fn factor(&mut self) -> Result<Expr, ParseError> {
        use TokenType::*;
        self.left_association_binary(&[Slash, Star], Self::unary)
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        use TokenType::*;
        if self.match_token(&[Bang, Minus]) {
            let op = self.previous().clone();
            let right = self.nested(&op, Self::unary)?;
            self.deepen(&op)?;
            return Ok(Expr::unary(op, right));
        }

        self.primary()
    }

    /* error productions, a binary operator with nothing on its left:
      "," ternary
    | ("!=" | "==") comparison
    | (">" | ">=" | "<" | "<=") term
    | "+" factor
    | ("/" | "*") unary ; */
    fn primary(&mut self) -> Result<Expr, ParseError> {
        use TokenType::*;
        self.depth = 1;

        if self.match_token(&[False]) {
            return Ok(Expr::literal(Value::Bool(false)));
        }

        if self.match_token(&[True]) {
            return Ok(Expr::literal(Value::Bool(true)));
        }

        if self.match_token(&[Nil]) {
            return Ok(Expr::literal(Value::Nil));
        }

        if self.match_token(&[Number, String]) {
            let token = self.previous();
            return match &token.literal {
                Some(literal) => Ok(Expr::literal(literal.clone().into())),
                None => Err(ParseError::new(token, "Expect literal value.")),
            };
        }

        if self.match_token(&[LeftParen]) {
            let paren = self.previous().clone();
            let expr = self.nested(&paren, Self::expression)?;
            self.consume(RightParen, "Expect ')' after expression.")?;
            self.deepen(&paren)?;
            return Ok(Expr::grouping(expr));
        }

        let operand: Option<fn(&mut Self) -> Result<Expr, ParseError>> =
            match self.peek().t_type {
                Comma => Some(Self::ternary),
                BangEqual | EqualEqual => Some(Self::comparison),
                Greater | GreaterEqual | Less | LessEqual => Some(Self::term),
                Plus => Some(Self::factor),
                Slash | Star => Some(Self::unary),
                _ => None,
            };

        if let Some(operand) = operand {
            let op = self.advance().clone();
            // the right operand is parsed only to skip it, its own errors are dropped
            let _ = self.nested(&op, operand);
            return Err(ParseError::new(&op, "Missing left-hand operand."));
        }

        Err(ParseError::new(self.peek(), "Expect expression."))
    }

    fn consume(&mut self, t_type: TokenType, err_msg: &str) -> Result<Token, ParseError> {
        if self.check(t_type) {
            return Ok(self.advance().clone());
        }

        Err(ParseError::new(self.peek(), err_msg))
    }

    // used for error recovery
    fn synchronize(&mut self) {
        use TokenType::*;
        self.advance();

        while !self.is_at_end() {
            if self.previous().t_type == Semicolon {
                return;
            }

            if let Class | Fun | Var | For | If | While | Print | Return = self.peek().t_type {
                return;
            }
            self.advance();
        }
    }

    fn left_association_binary(
        &mut self,
        types: &[TokenType],
        expr_fn: fn(&mut Self) -> Result<Expr, ParseError>,
    ) -> Result<Expr, ParseError> {
        let mut expr = expr_fn(self)?;
        while self.match_token(types) {
            let op = self.previous().clone();
            let depth = self.depth;
            let right = expr_fn(self)?;
            self.depth = depth.max(self.depth);
            self.deepen(&op)?;
            expr = Expr::binary(expr, op, right);
        }

        Ok(expr)
    }

    // runs a rule one level further down, refusing to recurse past MAX_NESTING
    fn nested(
        &mut self,
        token: &Token,
        rule: fn(&mut Self) -> Result<Expr, ParseError>,
    ) -> Result<Expr, ParseError> {
        if self.nesting >= MAX_NESTING {
            return Err(ParseError::new(token, TOO_DEEP));
        }

        self.nesting += 1;
        let expr = rule(self);
        self.nesting -= 1;
        expr
    }

    // wraps the last returned expression in one more node
    fn deepen(&mut self, token: &Token) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ParseError::new(token, TOO_DEEP));
        }

        Ok(())
    }

    fn match_token(&mut self, types: &[TokenType]) -> bool {
        for t_type in types {
            if self.check(*t_type) {
                self.advance();
                return true;
            }
        }

        false
    }

    fn check(&self, t_type: TokenType) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.peek().t_type == t_type
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek().t_type, TokenType::EOF)
    }

    fn peek(&self) -> &Token {
        self.tokens.get(self.current).unwrap_or(&self.eof)
    }

    fn previous(&self) -> &Token {
        match self.current.checked_sub(1) {
            Some(index) => &self.tokens[index],
            None => self.peek(),
        }
    }
}
