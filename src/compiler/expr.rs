use crate::{
    ast::{ast::Operator, expressions::Literal},
    type_checker::{
        typed_ast::{
            TypedBinaryExpr, TypedExpr, TypedExprKind, TypedIdentifierExpr, TypedUnaryExpr,
        },
        types::Type,
    },
};

use super::{
    compiler::{AccessWidth, CodeGenerator},
    fragment::{CodeFragment, Opcode, Operand},
    runtime::NUMBER_DIVIDE_BY_ZERO_RUNTIME_ERROR,
};

/// Code for `expr`, leaving either its address (identifiers) or its value
/// on the stack.
pub fn gen_expression(generator: &mut CodeGenerator, expr: &TypedExpr) -> CodeFragment {
    if expr.is_error() {
        panic!("Attempted to generate code for an expression typed error");
    }

    match &expr.kind {
        TypedExprKind::Literal(literal) => gen_literal(generator, &literal.value),
        TypedExprKind::Identifier(identifier) => gen_identifier(identifier),
        TypedExprKind::Binary(binary) if binary.operator.is_comparison() => {
            gen_comparison(generator, binary)
        }
        TypedExprKind::Binary(binary) => gen_arithmetic(generator, binary),
        TypedExprKind::Unary(unary) => gen_unary(generator, unary),
    }
}

/// Code for `expr` that always leaves its value on the stack. The only place
/// an address is turned into a value.
pub fn gen_value(generator: &mut CodeGenerator, expr: &TypedExpr) -> CodeFragment {
    gen_expression(generator, expr).make_value(AccessWidth::of(expr.ty).load())
}

pub fn gen_identifier(identifier: &TypedIdentifierExpr) -> CodeFragment {
    let Some(binding) = &identifier.binding else {
        panic!("Identifier `{}` reached code generation unbound", identifier.name);
    };

    let mut code = CodeFragment::address();
    binding.emit_address(&mut code);
    code
}

fn gen_literal(generator: &mut CodeGenerator, literal: &Literal) -> CodeFragment {
    let mut code = CodeFragment::value();

    match literal {
        Literal::Boolean(value) => code.add_with(Opcode::PushI, Operand::Integer(*value as i32)),
        Literal::Integer(value) => code.add_with(Opcode::PushI, Operand::Integer(*value)),
        Literal::Character(value) => code.add_with(Opcode::PushI, Operand::Integer(*value as i32)),
        Literal::Float(value) => code.add_with(Opcode::PushF, Operand::Float(*value)),
        Literal::String(value) => {
            let label = match generator.string_constants.get(value) {
                Some(label) => label.clone(),
                None => {
                    let label = generator.labeller.new_label("str-constant");
                    code.add_with(Opcode::DLabel, Operand::Label(label.clone()));
                    code.add_with(Opcode::DataS, Operand::Text(value.clone()));
                    generator.string_constants.insert(value.clone(), label.clone());
                    label
                }
            };
            code.add_with(Opcode::PushD, Operand::Label(label));
        }
    }

    code
}

fn gen_arithmetic(generator: &mut CodeGenerator, binary: &TypedBinaryExpr) -> CodeFragment {
    let mut code = CodeFragment::value();

    code.append(gen_value(generator, &binary.left));
    code.append(gen_value(generator, &binary.right));

    let divides_by_literal_zero = binary.operator == Operator::Divide
        && binary.right.as_literal().and_then(Literal::as_number) == Some(0.0);

    if divides_by_literal_zero {
        code.add_with(
            Opcode::Jump,
            Operand::Label(NUMBER_DIVIDE_BY_ZERO_RUNTIME_ERROR.to_string()),
        );
    } else {
        code.add(arithmetic_opcode(binary.operator, binary.left.ty));
    }

    code
}

fn arithmetic_opcode(operator: Operator, operand: Type) -> Opcode {
    match (operand, operator) {
        (Type::Integer, Operator::Add) => Opcode::Add,
        (Type::Integer, Operator::Subtract) => Opcode::Subtract,
        (Type::Integer, Operator::Multiply) => Opcode::Multiply,
        (Type::Integer, Operator::Divide) => Opcode::Divide,
        (Type::Float, Operator::Add) => Opcode::FAdd,
        (Type::Float, Operator::Subtract) => Opcode::FSubtract,
        (Type::Float, Operator::Multiply) => Opcode::FMultiply,
        (Type::Float, Operator::Divide) => Opcode::FDivide,
        _ => unreachable!("no arithmetic instruction for {} on {}", operator, operand),
    }
}

fn gen_unary(generator: &mut CodeGenerator, unary: &TypedUnaryExpr) -> CodeFragment {
    let mut code = CodeFragment::value();

    code.append(gen_value(generator, &unary.operand));
    code.add(match (unary.operator, unary.operand.ty) {
        (Operator::Subtract, Type::Integer) => Opcode::Negate,
        (Operator::Subtract, Type::Float) => Opcode::FNegate,
        (Operator::Not, Type::Boolean) => Opcode::BNegate,
        (operator, ty) => unreachable!("no unary instruction for {} on {}", operator, ty),
    });

    code
}

/// Labels of one comparison, all sharing a number.
struct ComparisonLabels {
    arg1: String,
    arg2: String,
    sub: String,
    on_true: String,
    on_false: String,
    join: String,
}

impl ComparisonLabels {
    fn mint(generator: &mut CodeGenerator) -> Self {
        let labeller = &mut generator.labeller;
        ComparisonLabels {
            arg1: labeller.new_label("compare-arg1"),
            arg2: labeller.same_number("compare-arg2"),
            sub: labeller.same_number("compare-sub"),
            on_true: labeller.same_number("compare-true"),
            on_false: labeller.same_number("compare-false"),
            join: labeller.same_number("compare-join"),
        }
    }
}

/// Difference instruction and the jumps testing its sign.
struct SignTests {
    subtract: Opcode,
    zero: Opcode,
    positive: Opcode,
    negative: Opcode,
}

const INTEGER_TESTS: SignTests = SignTests {
    subtract: Opcode::Subtract,
    zero: Opcode::JumpFalse,
    positive: Opcode::JumpPos,
    negative: Opcode::JumpNeg,
};

const FLOAT_TESTS: SignTests = SignTests {
    subtract: Opcode::FSubtract,
    zero: Opcode::JumpFZero,
    positive: Opcode::JumpFPos,
    negative: Opcode::JumpFNeg,
};

fn gen_comparison(generator: &mut CodeGenerator, binary: &TypedBinaryExpr) -> CodeFragment {
    let arg1 = gen_value(generator, &binary.left);
    let arg2 = gen_value(generator, &binary.right);
    let labels = ComparisonLabels::mint(generator);

    let mut code = CodeFragment::value();
    code.add_with(Opcode::Label, label(&labels.arg1));
    code.append(arg1);
    code.add_with(Opcode::Label, label(&labels.arg2));
    code.append(arg2);
    code.add_with(Opcode::Label, label(&labels.sub));

    match binary.left.ty {
        Type::Integer | Type::Character => {
            sign_comparison(&mut code, binary, &INTEGER_TESTS, &labels)
        }
        Type::Float => sign_comparison(&mut code, binary, &FLOAT_TESTS, &labels),
        Type::String | Type::Boolean => equality_comparison(&mut code, binary.operator, &labels),
        Type::Error => unreachable!("comparison of error operands"),
    }

    code.add_with(Opcode::Label, label(&labels.on_true));
    code.add_with(Opcode::PushI, Operand::Integer(1));
    code.add_with(Opcode::Jump, label(&labels.join));
    code.add_with(Opcode::Label, label(&labels.on_false));
    code.add_with(Opcode::PushI, Operand::Integer(0));
    code.add_with(Opcode::Jump, label(&labels.join));
    code.add_with(Opcode::Label, label(&labels.join));

    code
}

fn sign_comparison(
    code: &mut CodeFragment,
    binary: &TypedBinaryExpr,
    tests: &SignTests,
    labels: &ComparisonLabels,
) {
    let on_true = || label(&labels.on_true);
    let on_false = || label(&labels.on_false);

    code.add(tests.subtract);

    match binary.operator {
        Operator::Greater => {
            code.add_with(tests.positive, on_true());
            code.add_with(Opcode::Jump, on_false());
        }
        Operator::Lesser => {
            code.add_with(tests.negative, on_true());
            code.add_with(Opcode::Jump, on_false());
        }
        Operator::Equal => {
            code.add_with(tests.zero, on_true());
            code.add_with(Opcode::Jump, on_false());
        }
        Operator::NotEqual => {
            code.add_with(tests.zero, on_false());
            code.add_with(Opcode::Jump, on_true());
        }
        Operator::GreaterOrEqual | Operator::LesserOrEqual => {
            let greater = binary.operator == Operator::GreaterOrEqual;
            let (towards, away) = if greater {
                (tests.positive, tests.negative)
            } else {
                (tests.negative, tests.positive)
            };

            match literal_operands_equal(binary) {
                Some(true) => {
                    code.add_with(tests.zero, on_true());
                    code.add_with(Opcode::Jump, on_false());
                }
                Some(false) => {
                    code.add_with(towards, on_true());
                    code.add_with(Opcode::Jump, on_false());
                }
                None => {
                    code.add_with(away, on_false());
                    code.add_with(Opcode::Jump, on_true());
                }
            }
        }
        operator => unreachable!("{} is not a comparison", operator),
    }
}

/// `BEqual` leaves 1 when the two operands are identical.
fn equality_comparison(code: &mut CodeFragment, operator: Operator, labels: &ComparisonLabels) {
    code.add(Opcode::BEqual);

    match operator {
        Operator::Equal => code.add_with(Opcode::JumpTrue, label(&labels.on_true)),
        Operator::NotEqual => code.add_with(Opcode::JumpFalse, label(&labels.on_true)),
        operator => unreachable!("{} is not an equality", operator),
    }
    code.add_with(Opcode::Jump, label(&labels.on_false));
}

/// `Some(equal)` when both operands are literal leaves, `None` otherwise.
fn literal_operands_equal(binary: &TypedBinaryExpr) -> Option<bool> {
    let left = literal_magnitude(binary.left.as_literal()?)?;
    let right = literal_magnitude(binary.right.as_literal()?)?;
    Some(left == right)
}

fn literal_magnitude(literal: &Literal) -> Option<f64> {
    match literal {
        Literal::Character(value) => Some(*value as u32 as f64),
        other => other.as_number(),
    }
}

fn label(name: &str) -> Operand {
    Operand::Label(name.to_string())
}
