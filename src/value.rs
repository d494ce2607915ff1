use std::fmt::Display;

use crate::token::Literal;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Number(f64),
    String(String),
}

impl Value {
    /// `nil` and `false` are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(val) => *val,
            _ => true,
        }
    }

    // values of different kinds are never equal, so nil only equals nil
    pub fn is_equal(&self, other: &Value) -> bool {
        self == other
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::String(s) => Value::String(s),
            Literal::Number(n) => Value::Number(n),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => {
                let text = format!("{n:?}");
                write!(f, "{}", text.strip_suffix(".0").unwrap_or(&text))
            }
            Value::String(s) => write!(f, "{s}"),
        }
    }
}
