use crate::Span;

use super::ast::{Expr, Operator};

// LITERALS

/// The value of a literal leaf.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Boolean(bool),
    Integer(i32),
    Float(f64),
    Character(char),
    String(String),
}

impl Literal {
    /// Numeric value of an integer or float literal.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Literal::Integer(value) => Some(*value as f64),
            Literal::Float(value) => Some(*value),
            _ => None,
        }
    }
}

/// Literal Expression
/// `lexeme` keeps the source text the literal was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpr {
    pub value: Literal,
    pub lexeme: String,
    pub span: Span,
}

/// Identifier Expression
/// A name, either being declared or referring to an earlier declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierExpr {
    pub name: String,
    pub span: Span,
}

// OPERATORS

/// Binary Expression
/// e.g. `a + b`, `x >= 3`
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: Operator,
    pub right: Box<Expr>,
    /// Where the operator token sits, for diagnostics.
    pub operator_span: Span,
    pub span: Span,
}

/// Unary Expression
/// e.g. `-a`, `!flag`
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub operator: Operator,
    pub operand: Box<Expr>,
    pub span: Span,
}
