use crate::{token::Token, value::Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ternary {
        condition: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: Token,
        right: Box<Expr>,
    },
    Grouping {
        expression: Box<Expr>,
    },
    Literal {
        value: Value,
    },
    Unary {
        op: Token,
        right: Box<Expr>,
    },
}

/// One method per node kind. Consumers of the tree implement this instead of
/// matching on [`Expr`] themselves.
pub trait Visitor<R> {
    fn visit_ternary(&mut self, condition: &Expr, then_branch: &Expr, else_branch: &Expr) -> R;
    fn visit_binary(&mut self, left: &Expr, op: &Token, right: &Expr) -> R;
    fn visit_grouping(&mut self, expression: &Expr) -> R;
    fn visit_literal(&mut self, value: &Value) -> R;
    fn visit_unary(&mut self, op: &Token, right: &Expr) -> R;
}

impl Expr {
    pub fn accept<R, V: Visitor<R>>(&self, visitor: &mut V) -> R {
        match self {
            Expr::Ternary {
                condition,
                then_branch,
                else_branch,
            } => visitor.visit_ternary(condition, then_branch, else_branch),
            Expr::Binary { left, op, right } => visitor.visit_binary(left, op, right),
            Expr::Grouping { expression } => visitor.visit_grouping(expression),
            Expr::Literal { value } => visitor.visit_literal(value),
            Expr::Unary { op, right } => visitor.visit_unary(op, right),
        }
    }

    pub fn ternary(condition: Expr, then_branch: Expr, else_branch: Expr) -> Expr {
        Expr::Ternary {
            condition: Box::new(condition),
            then_branch: Box::new(then_branch),
            else_branch: Box::new(else_branch),
        }
    }

    pub fn binary(left: Expr, op: Token, right: Expr) -> Expr {
        Expr::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn grouping(expression: Expr) -> Expr {
        Expr::Grouping {
            expression: Box::new(expression),
        }
    }

    pub fn literal(value: Value) -> Expr {
        Expr::Literal { value }
    }

    pub fn unary(op: Token, right: Expr) -> Expr {
        Expr::Unary {
            op,
            right: Box::new(right),
        }
    }
}
