use crate::Span;

use super::{ast::Expr, expressions::IdentifierExpr};

/// Declaration Statement
/// `const x := <initializer>.`
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarationStmt {
    pub identifier: IdentifierExpr,
    pub initializer: Expr,
    pub span: Span,
}

/// Let Statement
/// `let x := <initializer>.` Rebinds a name that must already be declared.
#[derive(Debug, Clone, PartialEq)]
pub struct LetStmt {
    pub identifier: IdentifierExpr,
    pub initializer: Expr,
    pub span: Span,
}

/// One entry of a print list.
#[derive(Debug, Clone, PartialEq)]
pub enum PrintItem {
    Expr(Expr),
    /// `;`
    Newline(Span),
    /// `,`
    Separator(Span),
}

/// Print Statement
/// `print a, b; .`
#[derive(Debug, Clone, PartialEq)]
pub struct PrintStmt {
    pub items: Vec<PrintItem>,
    pub span: Span,
}
