//! Typed Abstract Syntax Tree definitions.
//!
//! The typed AST mirrors `ast` one node for one node. Every expression
//! carries its resolved `Type`, and every identifier carries the `Binding`
//! it refers to (absent only when the name was never declared, in which case
//! the expression is typed `Error`). This tree is what the code generator
//! consumes.

use crate::{
    ast::{ast::Operator, expressions::Literal},
    Span,
};

use super::{scope::Binding, scope::Scope, types::Type};

#[derive(Debug)]
pub struct TypedProgram {
    pub main: TypedMainBlock,
    /// The program scope, closed after analysis.
    pub scope: Scope,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedMainBlock {
    pub body: Vec<TypedStmt>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypedStmt {
    Declaration(TypedDeclarationStmt),
    Let(TypedLetStmt),
    Print(TypedPrintStmt),
}

impl TypedStmt {
    pub fn get_span(&self) -> &Span {
        match self {
            TypedStmt::Declaration(stmt) => &stmt.span,
            TypedStmt::Let(stmt) => &stmt.span,
            TypedStmt::Print(stmt) => &stmt.span,
        }
    }
}

/// `const x := <initializer>.`
///
/// `ty` is the initializer's type, which is also the identifier's.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedDeclarationStmt {
    pub identifier: TypedIdentifierExpr,
    pub initializer: TypedExpr,
    pub ty: Type,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedLetStmt {
    pub identifier: TypedIdentifierExpr,
    pub initializer: TypedExpr,
    pub ty: Type,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypedPrintItem {
    Expr(TypedExpr),
    Newline(Span),
    Separator(Span),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedPrintStmt {
    pub items: Vec<TypedPrintItem>,
    pub span: Span,
}

/// An expression with its resolved type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedExpr {
    pub kind: TypedExprKind,
    pub ty: Type,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypedExprKind {
    Literal(TypedLiteralExpr),
    Identifier(TypedIdentifierExpr),
    Binary(TypedBinaryExpr),
    Unary(TypedUnaryExpr),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedLiteralExpr {
    pub value: Literal,
    pub lexeme: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedIdentifierExpr {
    pub name: String,
    pub binding: Option<Binding>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedBinaryExpr {
    pub left: Box<TypedExpr>,
    pub operator: Operator,
    pub right: Box<TypedExpr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedUnaryExpr {
    pub operator: Operator,
    pub operand: Box<TypedExpr>,
}

impl TypedExpr {
    pub fn is_error(&self) -> bool {
        self.ty.is_error()
    }

    /// The literal value when this expression is a literal leaf.
    pub fn as_literal(&self) -> Option<&Literal> {
        match &self.kind {
            TypedExprKind::Literal(literal) => Some(&literal.value),
            _ => None,
        }
    }
}
