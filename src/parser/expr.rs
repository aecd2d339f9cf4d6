use crate::{
    ast::{
        ast::{Expr, Operator},
        expressions::{BinaryExpr, IdentifierExpr, Literal, LiteralExpr, UnaryExpr},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{lookups::BindingPower, parser::Parser};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud_fn) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.unexpected("expected an expression"));
    };

    let mut left = nud_fn(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let token_kind = parser.current_token_kind();
        let current_bp = *parser
            .get_bp_lookup()
            .get(&token_kind)
            .unwrap_or(&BindingPower::Default);

        if current_bp <= bp {
            break;
        }

        let Some(led_fn) = parser.get_led_lookup().get(&token_kind).copied() else {
            break;
        };

        left = led_fn(parser, left, current_bp)?;
    }

    Ok(left)
}

pub fn parse_literal_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.current_token().clone();

    let value = match token.kind {
        TokenKind::Integer => Literal::Integer(token.value.parse().map_err(|_| {
            Error::new(
                ErrorImpl::NumberParseError { token: token.value.clone() },
                token.span.start.clone(),
            )
        })?),
        TokenKind::Float => Literal::Float(token.value.parse().map_err(|_| {
            Error::new(
                ErrorImpl::NumberParseError { token: token.value.clone() },
                token.span.start.clone(),
            )
        })?),
        TokenKind::Character => match token.value.chars().next() {
            Some(character) => Literal::Character(character),
            None => return Err(parser.unexpected("expected a character")),
        },
        TokenKind::String => Literal::String(token.value.clone()),
        TokenKind::True => Literal::Boolean(true),
        TokenKind::False => Literal::Boolean(false),
        _ => return Err(parser.unexpected("expected a literal")),
    };

    parser.advance();

    Ok(Expr::Literal(LiteralExpr {
        value,
        lexeme: token.value,
        span: token.span,
    }))
}

pub fn parse_identifier_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.expect(TokenKind::Identifier)?;

    Ok(Expr::Identifier(IdentifierExpr {
        name: token.value,
        span: token.span,
    }))
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let Some(operator) = Operator::from_token_kind(operator_token.kind) else {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken { token: operator_token.value },
            operator_token.span.start,
        ));
    };

    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary(BinaryExpr {
        span: Span {
            start: left.get_span().start.clone(),
            end: right.get_span().end.clone(),
        },
        left: Box::new(left),
        operator,
        right: Box::new(right),
        operator_span: operator_token.span,
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance().clone();
    let Some(operator) = Operator::from_token_kind(operator_token.kind) else {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken { token: operator_token.value },
            operator_token.span.start,
        ));
    };

    let rhs = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Unary(UnaryExpr {
        span: Span {
            start: operator_token.span.start.clone(),
            end: rhs.get_span().end.clone(),
        },
        operator,
        operand: Box::new(rhs),
    }))
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Default)?;

    let error = parser.unexpected("expected `)` to close the group");
    parser.expect_error(TokenKind::CloseParen, Some(error))?;

    Ok(expr)
}
