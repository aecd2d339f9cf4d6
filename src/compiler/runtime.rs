//! Fixed labels and the preamble every generated program starts with.
//!
//! The preamble jumps over the data it defines to `$$main`, lays out the
//! print formats and boolean strings, and provides the run-time error
//! handlers the generated code can jump to.

use crate::type_checker::types::Type;

use super::fragment::{CodeFragment, Opcode, Operand};

pub const MAIN_PROGRAM_LABEL: &str = "$$main";
pub const GLOBAL_MEMORY_BLOCK: &str = "$global-memory-block";
pub const EAT_LOCATION_ZERO: &str = "$eat-location-zero";

pub const INTEGER_PRINT_FORMAT: &str = "$print-format-integer";
pub const FLOAT_PRINT_FORMAT: &str = "$print-format-float";
pub const BOOLEAN_PRINT_FORMAT: &str = "$print-format-boolean";
pub const CHARACTER_PRINT_FORMAT: &str = "$print-format-character";
pub const STRING_PRINT_FORMAT: &str = "$print-format-string";
pub const NEWLINE_PRINT_FORMAT: &str = "$print-format-newline";
pub const SEPARATOR_PRINT_FORMAT: &str = "$print-format-separator";

pub const BOOLEAN_TRUE_STRING: &str = "$boolean-true-string";
pub const BOOLEAN_FALSE_STRING: &str = "$boolean-false-string";

pub const GENERAL_RUNTIME_ERROR: &str = "$$general-runtime-error";
pub const NUMBER_DIVIDE_BY_ZERO_RUNTIME_ERROR: &str = "$$number-divide-by-zero";

const GENERAL_ERROR_MESSAGE: &str = "$errors-general-message";
const DIVIDE_BY_ZERO_MESSAGE: &str = "$errors-number-divide-by-zero";

/// Label of the format string used to print a value of type `ty`.
///
/// # Panics
///
/// Panics on `Type::Error`; erroneous programs never reach code generation.
pub fn print_format(ty: Type) -> &'static str {
    match ty {
        Type::Integer => INTEGER_PRINT_FORMAT,
        Type::Float => FLOAT_PRINT_FORMAT,
        Type::Boolean => BOOLEAN_PRINT_FORMAT,
        Type::Character => CHARACTER_PRINT_FORMAT,
        Type::String => STRING_PRINT_FORMAT,
        Type::Error => panic!("No print format for the error type"),
    }
}

/// The run-time support code placed before the program's own data.
pub fn environment() -> CodeFragment {
    let mut code = CodeFragment::void();

    code.add_with(Opcode::Jump, label(MAIN_PROGRAM_LABEL));
    code.append(strings_for_printf());
    code.append(runtime_errors());

    code
}

fn label(name: &str) -> Operand {
    Operand::Label(name.to_string())
}

fn data_string(code: &mut CodeFragment, name: &str, text: &str) {
    code.add_with(Opcode::DLabel, label(name));
    code.add_with(Opcode::DataS, Operand::Text(text.to_string()));
}

fn strings_for_printf() -> CodeFragment {
    let mut code = CodeFragment::void();

    // Keeps every real data label away from address zero.
    code.add_with(Opcode::DLabel, label(EAT_LOCATION_ZERO));
    code.add_with(Opcode::DataZ, Operand::Integer(8));

    data_string(&mut code, INTEGER_PRINT_FORMAT, "%d");
    data_string(&mut code, FLOAT_PRINT_FORMAT, "%g");
    data_string(&mut code, BOOLEAN_PRINT_FORMAT, "%s");
    data_string(&mut code, CHARACTER_PRINT_FORMAT, "%c");
    data_string(&mut code, STRING_PRINT_FORMAT, "%s");
    data_string(&mut code, NEWLINE_PRINT_FORMAT, "\n");
    data_string(&mut code, SEPARATOR_PRINT_FORMAT, " ");
    data_string(&mut code, BOOLEAN_TRUE_STRING, "true");
    data_string(&mut code, BOOLEAN_FALSE_STRING, "false");

    code
}

fn runtime_errors() -> CodeFragment {
    let mut code = CodeFragment::void();

    data_string(&mut code, GENERAL_ERROR_MESSAGE, "Runtime error: %s\n");
    code.add_with(Opcode::Label, label(GENERAL_RUNTIME_ERROR));
    code.add_with(Opcode::PushD, label(GENERAL_ERROR_MESSAGE));
    code.add(Opcode::Printf);
    code.add(Opcode::Halt);

    data_string(&mut code, DIVIDE_BY_ZERO_MESSAGE, "number divide by zero");
    code.add_with(Opcode::Label, label(NUMBER_DIVIDE_BY_ZERO_RUNTIME_ERROR));
    code.add_with(Opcode::PushD, label(DIVIDE_BY_ZERO_MESSAGE));
    code.add_with(Opcode::Jump, label(GENERAL_RUNTIME_ERROR));

    code
}
