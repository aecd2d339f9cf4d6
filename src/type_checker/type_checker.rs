use tracing::debug;

use crate::{
    ast::{
        ast::{Expr, Program, Stmt},
        expressions::{BinaryExpr, IdentifierExpr, Literal, LiteralExpr, UnaryExpr},
        statements::PrintItem,
    },
    errors::errors::{Diagnostic, DiagnosticSink, Error, ErrorImpl},
    CompileOptions, Position,
};

use super::{
    scope::Scope,
    signatures::Signatures,
    typed_ast::{
        TypedBinaryExpr, TypedDeclarationStmt, TypedExpr, TypedExprKind, TypedIdentifierExpr,
        TypedLetStmt, TypedLiteralExpr, TypedMainBlock, TypedPrintItem, TypedPrintStmt,
        TypedProgram, TypedStmt, TypedUnaryExpr,
    },
    types::Type,
};

/// State of one semantic analysis pass: the open scope, the options it was
/// started with and where diagnostics go.
pub struct TypeChecker<'a> {
    pub scope: Scope,
    pub options: CompileOptions,
    sink: &'a mut dyn DiagnosticSink,
}

impl<'a> TypeChecker<'a> {
    pub fn new(options: CompileOptions, sink: &'a mut dyn DiagnosticSink) -> Self {
        TypeChecker {
            scope: Scope::program(),
            options,
            sink,
        }
    }

    pub fn report(&mut self, error: ErrorImpl, position: Position) {
        self.sink.report(Diagnostic::error(Error::new(error, position)));
    }
}

/// Decorates `program` with types and bindings.
///
/// Always returns a fully typed tree. Problems are reported to `sink` and the
/// offending nodes are typed `Error`; callers must check the sink before
/// generating code.
pub fn type_check(
    program: &Program,
    options: CompileOptions,
    sink: &mut dyn DiagnosticSink,
) -> TypedProgram {
    let mut type_checker = TypeChecker::new(options, sink);
    debug!("entering program scope");

    let body = program
        .main
        .body
        .iter()
        .map(|stmt| type_check_stmt(&mut type_checker, stmt))
        .collect();

    let scope = type_checker.scope;
    debug!(allocated = scope.allocated_size(), "left program scope");

    TypedProgram {
        main: TypedMainBlock {
            body,
            span: program.main.span.clone(),
        },
        scope,
        span: program.span.clone(),
    }
}

pub fn type_check_stmt(type_checker: &mut TypeChecker, stmt: &Stmt) -> TypedStmt {
    match stmt {
        Stmt::Declaration(declaration) => {
            let (identifier, initializer) = type_check_binding(
                type_checker,
                &declaration.identifier,
                &declaration.initializer,
                true,
            );

            TypedStmt::Declaration(TypedDeclarationStmt {
                ty: initializer.ty,
                identifier,
                initializer,
                span: declaration.span.clone(),
            })
        }
        Stmt::Let(let_stmt) => {
            let (identifier, initializer) = type_check_binding(
                type_checker,
                &let_stmt.identifier,
                &let_stmt.initializer,
                false,
            );

            TypedStmt::Let(TypedLetStmt {
                ty: initializer.ty,
                identifier,
                initializer,
                span: let_stmt.span.clone(),
            })
        }
        Stmt::Print(print) => TypedStmt::Print(TypedPrintStmt {
            items: print
                .items
                .iter()
                .map(|item| match item {
                    PrintItem::Expr(expr) => TypedPrintItem::Expr(type_check_expr(type_checker, expr)),
                    PrintItem::Newline(span) => TypedPrintItem::Newline(span.clone()),
                    PrintItem::Separator(span) => TypedPrintItem::Separator(span.clone()),
                })
                .collect(),
            span: print.span.clone(),
        }),
    }
}

/// Shared by `const` and `let`: the initializer is analyzed first, then the
/// name is bound to its type in the current scope. A `let` target must
/// already resolve.
fn type_check_binding(
    type_checker: &mut TypeChecker,
    identifier: &IdentifierExpr,
    initializer: &Expr,
    declaring: bool,
) -> (TypedIdentifierExpr, TypedExpr) {
    let initializer = type_check_expr(type_checker, initializer);
    let position = identifier.span.start.clone();

    if !declaring {
        let lookup = type_checker.scope.find_binding(&identifier.name).map(|_| ());
        if let Err(error) = lookup {
            type_checker.report(error, position.clone());
        }
    } else if type_checker.options.reject_redeclarations
        && type_checker.scope.declares(&identifier.name)
    {
        type_checker.report(
            ErrorImpl::VariableAlreadyDeclared {
                variable: identifier.name.clone(),
            },
            position.clone(),
        );
    }

    let binding = type_checker
        .scope
        .create_binding(&identifier.name, initializer.ty, position);

    (
        TypedIdentifierExpr {
            name: identifier.name.clone(),
            binding: Some(binding),
            span: identifier.span.clone(),
        },
        initializer,
    )
}

pub fn type_check_expr(type_checker: &mut TypeChecker, expr: &Expr) -> TypedExpr {
    match expr {
        Expr::Literal(literal) => type_check_literal(literal),
        Expr::Identifier(identifier) => type_check_identifier(type_checker, identifier),
        Expr::Binary(binary) => type_check_binary(type_checker, binary),
        Expr::Unary(unary) => type_check_unary(type_checker, unary),
    }
}

fn type_check_literal(literal: &LiteralExpr) -> TypedExpr {
    let ty = match literal.value {
        Literal::Boolean(_) => Type::Boolean,
        Literal::Integer(_) => Type::Integer,
        Literal::Float(_) => Type::Float,
        Literal::Character(_) => Type::Character,
        Literal::String(_) => Type::String,
    };

    TypedExpr {
        kind: TypedExprKind::Literal(TypedLiteralExpr {
            value: literal.value.clone(),
            lexeme: literal.lexeme.clone(),
        }),
        ty,
        span: literal.span.clone(),
    }
}

fn type_check_identifier(type_checker: &mut TypeChecker, identifier: &IdentifierExpr) -> TypedExpr {
    let lookup = type_checker.scope.find_binding(&identifier.name).cloned();

    let (binding, ty) = match lookup {
        Ok(binding) => {
            let ty = binding.ty;
            (Some(binding), ty)
        }
        Err(error) => {
            type_checker.report(error, identifier.span.start.clone());
            (None, Type::Error)
        }
    };

    TypedExpr {
        kind: TypedExprKind::Identifier(TypedIdentifierExpr {
            name: identifier.name.clone(),
            binding,
            span: identifier.span.clone(),
        }),
        ty,
        span: identifier.span.clone(),
    }
}

/// Resolves `operands` against the operator's overload set. An operand that
/// is already `Error` silences the check.
fn resolve_operator(
    type_checker: &mut TypeChecker,
    signatures: &Signatures,
    operands: &[Type],
    position: Position,
) -> Type {
    if operands.iter().any(Type::is_error) {
        return Type::Error;
    }

    match signatures.resolve(operands) {
        Ok(ty) => ty,
        Err(error) => {
            type_checker.report(error, position);
            Type::Error
        }
    }
}

fn type_check_binary(type_checker: &mut TypeChecker, binary: &BinaryExpr) -> TypedExpr {
    let left = type_check_expr(type_checker, &binary.left);
    let right = type_check_expr(type_checker, &binary.right);

    let ty = resolve_operator(
        type_checker,
        Signatures::signatures_of(binary.operator),
        &[left.ty, right.ty],
        binary.operator_span.start.clone(),
    );

    TypedExpr {
        kind: TypedExprKind::Binary(TypedBinaryExpr {
            left: Box::new(left),
            operator: binary.operator,
            right: Box::new(right),
        }),
        ty,
        span: binary.span.clone(),
    }
}

fn type_check_unary(type_checker: &mut TypeChecker, unary: &UnaryExpr) -> TypedExpr {
    let operand = type_check_expr(type_checker, &unary.operand);

    let ty = resolve_operator(
        type_checker,
        Signatures::signatures_of(unary.operator),
        &[operand.ty],
        unary.span.start.clone(),
    );

    TypedExpr {
        kind: TypedExprKind::Unary(TypedUnaryExpr {
            operator: unary.operator,
            operand: Box::new(operand),
        }),
        ty,
        span: unary.span.clone(),
    }
}
