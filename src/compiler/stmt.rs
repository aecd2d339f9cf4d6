use crate::type_checker::{
    typed_ast::{TypedExpr, TypedIdentifierExpr, TypedPrintItem, TypedPrintStmt, TypedStmt},
    types::Type,
};

use super::{
    compiler::{AccessWidth, CodeGenerator},
    expr::{gen_identifier, gen_value},
    fragment::{CodeFragment, Opcode, Operand},
    runtime::{
        self, BOOLEAN_FALSE_STRING, BOOLEAN_TRUE_STRING, NEWLINE_PRINT_FORMAT,
        SEPARATOR_PRINT_FORMAT,
    },
};

pub fn gen_statement(generator: &mut CodeGenerator, statement: &TypedStmt) -> CodeFragment {
    match statement {
        TypedStmt::Declaration(declaration) => gen_store(
            generator,
            &declaration.identifier,
            &declaration.initializer,
            declaration.ty,
        ),
        TypedStmt::Let(let_stmt) => {
            gen_store(generator, &let_stmt.identifier, &let_stmt.initializer, let_stmt.ty)
        }
        TypedStmt::Print(print) => gen_print_stmt(generator, print),
    }
}

/// Address of the identifier, value of the initializer, then a store sized
/// to `ty`.
fn gen_store(
    generator: &mut CodeGenerator,
    identifier: &TypedIdentifierExpr,
    initializer: &TypedExpr,
    ty: Type,
) -> CodeFragment {
    let mut code = CodeFragment::void();

    let lvalue = gen_identifier(identifier);
    assert!(lvalue.is_address());
    code.append(lvalue);
    code.append(gen_value(generator, initializer));
    code.add(AccessWidth::of(ty).store());

    code
}

fn gen_print_stmt(generator: &mut CodeGenerator, print: &TypedPrintStmt) -> CodeFragment {
    let mut code = CodeFragment::void();

    for item in &print.items {
        match item {
            TypedPrintItem::Expr(expr) => code.append(gen_print_value(generator, expr)),
            TypedPrintItem::Newline(_) => code.append(gen_print_marker(NEWLINE_PRINT_FORMAT)),
            TypedPrintItem::Separator(_) => code.append(gen_print_marker(SEPARATOR_PRINT_FORMAT)),
        }
    }

    code
}

fn gen_print_marker(format: &str) -> CodeFragment {
    let mut code = CodeFragment::void();
    code.add_with(Opcode::PushD, Operand::Label(format.to_string()));
    code.add(Opcode::Printf);
    code
}

fn gen_print_value(generator: &mut CodeGenerator, expr: &TypedExpr) -> CodeFragment {
    let mut code = CodeFragment::void();

    code.append(gen_value(generator, expr));
    if expr.ty == Type::Boolean {
        code.append(boolean_to_string(generator));
    }
    code.add_with(
        Opcode::PushD,
        Operand::Label(runtime::print_format(expr.ty).to_string()),
    );
    code.add(Opcode::Printf);

    code
}

/// Replaces the boolean on top of the stack with the address of "true" or
/// "false".
fn boolean_to_string(generator: &mut CodeGenerator) -> CodeFragment {
    let true_label = generator.labeller.new_label("print-boolean-true");
    let join_label = generator.labeller.same_number("print-boolean-join");

    let mut code = CodeFragment::void();
    code.add_with(Opcode::JumpTrue, Operand::Label(true_label.clone()));
    code.add_with(Opcode::PushD, Operand::Label(BOOLEAN_FALSE_STRING.to_string()));
    code.add_with(Opcode::Jump, Operand::Label(join_label.clone()));
    code.add_with(Opcode::Label, Operand::Label(true_label));
    code.add_with(Opcode::PushD, Operand::Label(BOOLEAN_TRUE_STRING.to_string()));
    code.add_with(Opcode::Label, Operand::Label(join_label));

    code
}
