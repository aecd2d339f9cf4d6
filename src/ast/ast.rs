use std::fmt::Display;

use crate::{lexer::tokens::TokenKind, Span};

use super::{
    expressions::{BinaryExpr, IdentifierExpr, LiteralExpr, UnaryExpr},
    statements::{DeclarationStmt, LetStmt, PrintStmt},
};

/// Root of a parsed Grouse program: `exec { ... }`.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub main: MainBlock,
    pub span: Span,
}

/// The `{ ... }` body following `exec`.
#[derive(Debug, Clone, PartialEq)]
pub struct MainBlock {
    pub body: Vec<Stmt>,
    pub span: Span,
}

/// Statement kinds
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Declaration(DeclarationStmt),
    Let(LetStmt),
    Print(PrintStmt),
}

impl Stmt {
    pub fn get_span(&self) -> &Span {
        match self {
            Stmt::Declaration(stmt) => &stmt.span,
            Stmt::Let(stmt) => &stmt.span,
            Stmt::Print(stmt) => &stmt.span,
        }
    }
}

/// Expression kinds
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(LiteralExpr),
    Identifier(IdentifierExpr),
    Binary(BinaryExpr),
    Unary(UnaryExpr),
}

impl Expr {
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Literal(expr) => &expr.span,
            Expr::Identifier(expr) => &expr.span,
            Expr::Binary(expr) => &expr.span,
            Expr::Unary(expr) => &expr.span,
        }
    }
}

/// Operators shared by binary and unary expressions.
///
/// `Subtract` doubles as unary negation; the arity of the operand tuple
/// picks the overload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Greater,
    GreaterOrEqual,
    Equal,
    NotEqual,
    Lesser,
    LesserOrEqual,
    Not,
}

impl Operator {
    pub fn from_token_kind(kind: TokenKind) -> Option<Operator> {
        match kind {
            TokenKind::Plus => Some(Operator::Add),
            TokenKind::Dash => Some(Operator::Subtract),
            TokenKind::Star => Some(Operator::Multiply),
            TokenKind::Slash => Some(Operator::Divide),
            TokenKind::Greater => Some(Operator::Greater),
            TokenKind::GreaterEquals => Some(Operator::GreaterOrEqual),
            TokenKind::Equals => Some(Operator::Equal),
            TokenKind::NotEquals => Some(Operator::NotEqual),
            TokenKind::Less => Some(Operator::Lesser),
            TokenKind::LessEquals => Some(Operator::LesserOrEqual),
            TokenKind::Not => Some(Operator::Not),
            _ => None,
        }
    }

    pub fn lexeme(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Greater => ">",
            Operator::GreaterOrEqual => ">=",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::Lesser => "<",
            Operator::LesserOrEqual => "<=",
            Operator::Not => "!",
        }
    }

    pub fn is_comparison(&self) -> bool {
        matches!(
            self,
            Operator::Greater
                | Operator::GreaterOrEqual
                | Operator::Equal
                | Operator::NotEqual
                | Operator::Lesser
                | Operator::LesserOrEqual
        )
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.lexeme())
    }
}
