//! Unit tests for the parser module.

use std::rc::Rc;

use crate::{
    ast::{
        ast::{Expr, Operator, Program, Stmt},
        expressions::Literal,
        statements::PrintItem,
    },
    errors::errors::Error,
    lexer::lexer::tokenize,
};

use super::parser::parse;

fn parse_source(source: &str) -> Result<Program, Error> {
    let tokens = tokenize(source.to_string(), Some("test.grouse".to_string())).unwrap();
    parse(tokens, Rc::new("test.grouse".to_string()))
}

fn first_initializer(program: &Program) -> &Expr {
    match &program.main.body[0] {
        Stmt::Declaration(stmt) => &stmt.initializer,
        Stmt::Let(stmt) => &stmt.initializer,
        Stmt::Print(_) => panic!("Expected a declaration"),
    }
}

#[test]
fn test_parse_empty_program() {
    let program = parse_source("exec { }").unwrap();
    assert!(program.main.body.is_empty());
}

#[test]
fn test_parse_const_declaration() {
    let program = parse_source("exec { const half := 2.5. }").unwrap();

    match &program.main.body[0] {
        Stmt::Declaration(stmt) => {
            assert_eq!(stmt.identifier.name, "half");
            match &stmt.initializer {
                Expr::Literal(literal) => {
                    assert_eq!(literal.value, Literal::Float(2.5));
                    assert_eq!(literal.lexeme, "2.5");
                }
                other => panic!("Expected literal, got {:?}", other),
            }
        }
        other => panic!("Expected declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_let_statement() {
    let program = parse_source("exec { let count := 'a'. }").unwrap();

    match &program.main.body[0] {
        Stmt::Let(stmt) => assert_eq!(stmt.identifier.name, "count"),
        other => panic!("Expected let, got {:?}", other),
    }
}

#[test]
fn test_parse_precedence() {
    let program = parse_source("exec { const x := 1 + 2 * 3. }").unwrap();

    let Expr::Binary(add) = first_initializer(&program) else {
        panic!("Expected binary expression");
    };
    assert_eq!(add.operator, Operator::Add);
    let Expr::Binary(multiply) = add.right.as_ref() else {
        panic!("Expected nested multiply");
    };
    assert_eq!(multiply.operator, Operator::Multiply);
}

#[test]
fn test_parse_left_associative() {
    let program = parse_source("exec { const x := 8 - 4 - 2. }").unwrap();

    let Expr::Binary(outer) = first_initializer(&program) else {
        panic!("Expected binary expression");
    };
    assert!(matches!(outer.left.as_ref(), Expr::Binary(_)));
    assert!(matches!(outer.right.as_ref(), Expr::Literal(_)));
}

#[test]
fn test_parse_relational_below_arithmetic() {
    let program = parse_source("exec { const b := 1 + 1 >= 2. }").unwrap();

    let Expr::Binary(compare) = first_initializer(&program) else {
        panic!("Expected binary expression");
    };
    assert_eq!(compare.operator, Operator::GreaterOrEqual);
    assert!(matches!(compare.left.as_ref(), Expr::Binary(_)));
}

#[test]
fn test_parse_prefix_binds_tighter_than_binary() {
    let program = parse_source("exec { const x := -1 + 2. }").unwrap();

    let Expr::Binary(add) = first_initializer(&program) else {
        panic!("Expected binary expression");
    };
    assert!(matches!(add.left.as_ref(), Expr::Unary(unary) if unary.operator == Operator::Subtract));
}

#[test]
fn test_parse_grouping() {
    let program = parse_source("exec { const x := (1 + 2) * 3. }").unwrap();

    let Expr::Binary(multiply) = first_initializer(&program) else {
        panic!("Expected binary expression");
    };
    assert_eq!(multiply.operator, Operator::Multiply);
    assert!(matches!(multiply.left.as_ref(), Expr::Binary(_)));
}

#[test]
fn test_parse_print_list() {
    let program = parse_source("exec { print x, true; \"s\". }").unwrap();

    let Stmt::Print(print) = &program.main.body[0] else {
        panic!("Expected print statement");
    };
    assert_eq!(print.items.len(), 5);
    assert!(matches!(print.items[0], PrintItem::Expr(Expr::Identifier(_))));
    assert!(matches!(print.items[1], PrintItem::Separator(_)));
    assert!(matches!(print.items[2], PrintItem::Expr(Expr::Literal(_))));
    assert!(matches!(print.items[3], PrintItem::Newline(_)));
    assert!(matches!(print.items[4], PrintItem::Expr(Expr::Literal(_))));
}

#[test]
fn test_missing_terminator_is_an_error() {
    let error = parse_source("exec { const x := 1 }").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedToken");
}

#[test]
fn test_missing_exec_is_an_error() {
    let error = parse_source("{ const x := 1. }").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_unclosed_block_is_an_error() {
    let error = parse_source("exec { print 1.").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_integer_overflow_is_a_parse_error() {
    let error = parse_source("exec { const x := 99999999999. }").unwrap_err();
    assert_eq!(error.get_error_name(), "NumberParseError");
}

#[test]
fn test_trailing_tokens_are_an_error() {
    assert!(parse_source("exec { } print").is_err());
}
