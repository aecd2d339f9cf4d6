use crate::{
    ast::{
        ast::{Expr, MainBlock, Program, Stmt},
        expressions::IdentifierExpr,
        statements::{DeclarationStmt, LetStmt, PrintItem, PrintStmt},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
    Span,
};

use super::parser::Parser;

/// `exec { ... }` followed by end of input.
pub fn parse_program(parser: &mut Parser) -> Result<Program, Error> {
    let error = parser.unexpected("a program starts with `exec`");
    let start = parser.expect_error(TokenKind::Exec, Some(error))?.span.start;

    let main = parse_main_block(parser)?;

    let error = parser.unexpected("expected end of input after the main block");
    parser.expect_error(TokenKind::EOF, Some(error))?;

    Ok(Program {
        span: Span {
            start,
            end: main.span.end.clone(),
        },
        main,
    })
}

pub fn parse_main_block(parser: &mut Parser) -> Result<MainBlock, Error> {
    let error = parser.unexpected("expected `{` to open the main block");
    let start = parser.expect_error(TokenKind::OpenCurly, Some(error))?.span.start;

    let mut body = Vec::new();
    while parser.current_token_kind() != TokenKind::CloseCurly {
        if parser.current_token_kind() == TokenKind::EOF {
            return Err(parser.unexpected("expected `}` to close the main block"));
        }
        body.push(parse_stmt(parser)?);
    }

    let end = parser.expect(TokenKind::CloseCurly)?.span.end;

    Ok(MainBlock {
        body,
        span: Span { start, end },
    })
}

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    match parser.get_stmt_lookup().get(&parser.current_token_kind()).copied() {
        Some(stmt_fn) => stmt_fn(parser),
        None => Err(parser.unexpected("expected `const`, `let` or `print`")),
    }
}

/// Shared shape of `const` and `let`: keyword, identifier, `:=`, initializer, `.`
fn parse_binding_parts(parser: &mut Parser) -> Result<(Span, IdentifierExpr, Expr), Error> {
    let start = parser.advance().span.start.clone();

    let error = parser.unexpected("expected identifier during variable declaration");
    let identifier = parser.expect_error(TokenKind::Identifier, Some(error))?;

    let error = parser.unexpected("expected `:=` after the identifier");
    parser.expect_error(TokenKind::Assign, Some(error))?;

    let initializer = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Dot)?;

    Ok((
        Span {
            start,
            end: parser.previous_end(),
        },
        IdentifierExpr {
            name: identifier.value,
            span: identifier.span,
        },
        initializer,
    ))
}

pub fn parse_declaration_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let (span, identifier, initializer) = parse_binding_parts(parser)?;

    Ok(Stmt::Declaration(DeclarationStmt {
        identifier,
        initializer,
        span,
    }))
}

pub fn parse_let_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let (span, identifier, initializer) = parse_binding_parts(parser)?;

    Ok(Stmt::Let(LetStmt {
        identifier,
        initializer,
        span,
    }))
}

pub fn parse_print_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.advance().span.start.clone();

    let mut items = vec![];
    loop {
        match parser.current_token_kind() {
            TokenKind::Dot => break,
            TokenKind::Comma => items.push(PrintItem::Separator(parser.advance().span.clone())),
            TokenKind::Semicolon => items.push(PrintItem::Newline(parser.advance().span.clone())),
            TokenKind::EOF => return Err(parser.unexpected("expected `.` to end the print statement")),
            _ => items.push(PrintItem::Expr(parse_expr(parser, BindingPower::Default)?)),
        }
    }

    parser.expect(TokenKind::Dot)?;

    Ok(Stmt::Print(PrintStmt {
        items,
        span: Span {
            start,
            end: parser.previous_end(),
        },
    }))
}
