use crate::{
    ast::{Expr, Visitor},
    token::{Token, TokenType},
    value::Value,
};

/// Renders a tree in fully parenthesized prefix form, e.g. `( * ( - 123) ( group 45.67))`.
pub struct AstPrinter;

impl AstPrinter {
    pub fn print(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }

    fn parenthesize(&mut self, name: &str, exprs: &[&Expr]) -> String {
        let mut parenthesized = format!("( {name}");

        for expr in exprs {
            parenthesized.push(' ');
            parenthesized.push_str(&self.print(expr));
        }

        parenthesized.push(')');

        parenthesized
    }
}

impl Visitor<String> for AstPrinter {
    fn visit_ternary(
        &mut self,
        condition: &Expr,
        then_branch: &Expr,
        else_branch: &Expr,
    ) -> String {
        self.parenthesize("?:", &[condition, then_branch, else_branch])
    }

    fn visit_binary(&mut self, left: &Expr, op: &Token, right: &Expr) -> String {
        self.parenthesize(&op.lexeme, &[left, right])
    }

    fn visit_grouping(&mut self, expression: &Expr) -> String {
        self.parenthesize("group", &[expression])
    }

    fn visit_literal(&mut self, value: &Value) -> String {
        value.to_string()
    }

    fn visit_unary(&mut self, op: &Token, right: &Expr) -> String {
        self.parenthesize(&op.lexeme, &[right])
    }
}

/// Renders a tree in reverse polish notation. Grouping disappears since
/// postfix order already encodes it.
pub struct RpnPrinter;

impl RpnPrinter {
    pub fn print(&mut self, expr: &Expr) -> String {
        expr.accept(self)
    }
}

impl Visitor<String> for RpnPrinter {
    fn visit_ternary(
        &mut self,
        condition: &Expr,
        then_branch: &Expr,
        else_branch: &Expr,
    ) -> String {
        format!(
            "{} {} {} ?:",
            self.print(condition),
            self.print(then_branch),
            self.print(else_branch)
        )
    }

    fn visit_binary(&mut self, left: &Expr, op: &Token, right: &Expr) -> String {
        format!("{} {} {}", self.print(left), self.print(right), op.lexeme)
    }

    fn visit_grouping(&mut self, expression: &Expr) -> String {
        self.print(expression)
    }

    fn visit_literal(&mut self, value: &Value) -> String {
        value.to_string()
    }

    // `neg` keeps unary minus apart from the binary one
    fn visit_unary(&mut self, op: &Token, right: &Expr) -> String {
        let name = match op.t_type {
            TokenType::Minus => "neg",
            _ => op.lexeme.as_str(),
        };
        format!("{} {name}", self.print(right))
    }
}
