use crate::{
    ast::{Expr, Visitor},
    error::RuntimeError,
    token::{Token, TokenType},
    value::Value,
};

/// Tree-walking evaluator. Holds no state between expressions.
#[derive(Debug, Default)]
pub struct Interpreter;

impl Interpreter {
    pub fn new() -> Self {
        Interpreter
    }

    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        expr.accept(self)
    }
}

impl Visitor<Result<Value, RuntimeError>> for Interpreter {
    // only the taken branch is evaluated
    fn visit_ternary(
        &mut self,
        condition: &Expr,
        then_branch: &Expr,
        else_branch: &Expr,
    ) -> Result<Value, RuntimeError> {
        if self.evaluate(condition)?.is_truthy() {
            return self.evaluate(then_branch);
        }
        self.evaluate(else_branch)
    }

    fn visit_binary(&mut self, left: &Expr, op: &Token, right: &Expr) -> Result<Value, RuntimeError> {
        let left = self.evaluate(left)?;
        let right = self.evaluate(right)?;
        binary(left, right, op)
    }

    fn visit_grouping(&mut self, expression: &Expr) -> Result<Value, RuntimeError> {
        self.evaluate(expression)
    }

    fn visit_literal(&mut self, value: &Value) -> Result<Value, RuntimeError> {
        Ok(value.clone())
    }

    fn visit_unary(&mut self, op: &Token, right: &Expr) -> Result<Value, RuntimeError> {
        let right = self.evaluate(right)?;
        unary(right, op)
    }
}

fn binary(left: Value, right: Value, op: &Token) -> Result<Value, RuntimeError> {
    use TokenType::{
        BangEqual, Comma, EqualEqual, Greater, GreaterEqual, Less, LessEqual, Minus, Plus, Slash,
        Star,
    };
    use Value::{Bool, Number, String};

    match (op.t_type, &left, &right) {
        (Greater, Number(left), Number(right)) => Ok(Bool(left > right)),
        (GreaterEqual, Number(left), Number(right)) => Ok(Bool(left >= right)),
        (Less, Number(left), Number(right)) => Ok(Bool(left < right)),
        (LessEqual, Number(left), Number(right)) => Ok(Bool(left <= right)),
        (BangEqual, _, _) => Ok(Bool(!left.is_equal(&right))),
        (EqualEqual, _, _) => Ok(Bool(left.is_equal(&right))),
        (Minus, Number(left), Number(right)) => Ok(Number(left - right)),
        (Plus, Number(left), Number(right)) => Ok(Number(left + right)),
        (Plus, String(left), String(right)) => Ok(String(format!("{left}{right}"))),
        (Slash, Number(left), Number(right)) => Ok(Number(left / right)),
        (Star, Number(left), Number(right)) => Ok(Number(left * right)),
        // the left operand was evaluated for its effect only
        (Comma, _, _) => Ok(right),
        (Greater | GreaterEqual | Less | LessEqual | Minus | Slash | Star, _, _) => {
            Err(RuntimeError::new(op, "Operands must be numbers."))
        }
        (Plus, _, _) => Err(RuntimeError::new(
            op,
            "Operands must be two numbers or 2 strings.",
        )),
        _ => Err(RuntimeError::new(op, "Unknown binary operator.")),
    }
}

fn unary(right: Value, op: &Token) -> Result<Value, RuntimeError> {
    match (op.t_type, &right) {
        (TokenType::Minus, Value::Number(num)) => Ok(Value::Number(-num)),
        (TokenType::Minus, _) => Err(RuntimeError::new(op, "Operand must be a number.")),
        (TokenType::Bang, _) => Ok(Value::Bool(!right.is_truthy())),
        _ => Err(RuntimeError::new(op, "Unknown unary operator.")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parser::Parser, scanner::scan_tokens};

    fn eval(source: &str) -> Result<Value, RuntimeError> {
        let tokens = scan_tokens(source).tokens;
        let parsed = Parser::new(&tokens).parse();
        assert!(!parsed.had_error(), "{:?}", parsed.errors);
        let expr = parsed.expr.unwrap();
        Interpreter::new().evaluate(&expr)
    }

    fn num(n: f64) -> Result<Value, RuntimeError> {
        Ok(Value::Number(n))
    }

    #[test]
    fn arithmetic_precedence_and_associativity() {
        assert_eq!(eval("1 + 2 * 3"), num(7.0));
        assert_eq!(eval("8 - 4 - 2"), num(2.0));
        assert_eq!(eval("(1 + 2) * 3"), num(9.0));
        assert_eq!(eval("-2 * -3"), num(6.0));
        assert_eq!(eval("12 / 4 / 3"), num(1.0));
    }

    #[test]
    fn string_concatenation() {
        assert_eq!(
            eval("\"foo\" + \"bar\""),
            Ok(Value::String("foobar".to_string()))
        );
    }

    #[test]
    fn comparisons() {
        assert_eq!(eval("1 < 2"), Ok(Value::Bool(true)));
        assert_eq!(eval("2 <= 2"), Ok(Value::Bool(true)));
        assert_eq!(eval("1 > 2"), Ok(Value::Bool(false)));
        assert_eq!(eval("3 >= 4"), Ok(Value::Bool(false)));
    }

    #[test]
    fn equality_never_fails() {
        assert_eq!(eval("nil == nil"), Ok(Value::Bool(true)));
        assert_eq!(eval("nil == false"), Ok(Value::Bool(false)));
        assert_eq!(eval("1 == \"1\""), Ok(Value::Bool(false)));
        assert_eq!(eval("\"a\" != \"b\""), Ok(Value::Bool(true)));
        assert_eq!(eval("(0 / 0) == (0 / 0)"), Ok(Value::Bool(false)));
    }

    #[test]
    fn bang_uses_truthiness() {
        assert_eq!(eval("!nil"), Ok(Value::Bool(true)));
        assert_eq!(eval("!0"), Ok(Value::Bool(false)));
        assert_eq!(eval("!\"\""), Ok(Value::Bool(false)));
    }

    #[test]
    fn ternary_skips_untaken_branch() {
        assert_eq!(eval("true ? 1 : (1/0)"), num(1.0));
        assert_eq!(eval("nil ? -\"x\" : 2"), num(2.0));
        assert_eq!(eval("false ? 1 : true ? 2 : 3"), num(2.0));
    }

    #[test]
    fn comma_yields_right_operand() {
        assert_eq!(eval("1, 2, 3"), num(3.0));
        // the left side is still evaluated, so its errors surface
        assert!(eval("-\"a\", 2").is_err());
    }

    #[test]
    fn division_by_zero_is_not_an_error() {
        assert_eq!(eval("1 / 0"), num(f64::INFINITY));
    }

    #[test]
    fn type_errors() {
        let err = eval("\"a\" - 1").unwrap_err();
        assert_eq!(err.message, "Operands must be numbers.");
        assert_eq!(err.token.lexeme, "-");

        let err = eval("1 + \"a\"").unwrap_err();
        assert_eq!(err.message, "Operands must be two numbers or 2 strings.");

        let err = eval("\n-true").unwrap_err();
        assert_eq!(err.to_string(), "Operand must be a number.\n[line 2]");

        let err = eval("nil < 1").unwrap_err();
        assert_eq!(err.message, "Operands must be numbers.");
    }

    #[test]
    fn literal_evaluates_to_itself() {
        let literal = Expr::literal(Value::String("x".to_string()));
        assert_eq!(
            Interpreter::new().evaluate(&literal),
            Ok(Value::String("x".to_string()))
        );

        let nested = Expr::grouping(Expr::grouping(literal.clone()));
        assert_eq!(
            Interpreter::new().evaluate(&nested),
            Interpreter::new().evaluate(&literal)
        );
    }

    #[test]
    fn stringified_results() {
        assert_eq!(eval("6 / 2").unwrap().to_string(), "3");
        assert_eq!(eval("1 / 3").unwrap().to_string(), "0.3333333333333333");
    }
}
