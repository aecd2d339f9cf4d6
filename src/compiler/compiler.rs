//! Main code generator.
//!
//! Lowers a fully typed program into one instruction stream for the stack
//! machine: the runtime preamble, the global data block sized from the
//! program scope, then `$$main` with the program body and `Halt`.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::type_checker::{typed_ast::TypedProgram, types::Type};

use super::{
    fragment::{CodeFragment, Opcode, Operand},
    labeller::Labeller,
    runtime::{self, GLOBAL_MEMORY_BLOCK, MAIN_PROGRAM_LABEL},
    stmt::gen_statement,
};

/// State of one generation pass.
///
/// Each `CodeGenerator` numbers its labels from one, so generating the same
/// program twice yields identical output.
#[derive(Debug, Default)]
pub struct CodeGenerator {
    pub labeller: Labeller,
    /// Data label of each string literal already emitted, keyed by its text.
    pub string_constants: FxHashMap<String, String>,
}

impl CodeGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generates the complete program.
    pub fn gen_program(&mut self, program: &TypedProgram) -> CodeFragment {
        let mut code = CodeFragment::void();

        code.append(runtime::environment());
        code.append(self.global_variable_block(program));
        code.append(self.main_program(program));

        code
    }

    fn global_variable_block(&self, program: &TypedProgram) -> CodeFragment {
        let size = program.scope.allocated_size();
        debug!(size, "global memory block");

        let mut code = CodeFragment::void();
        code.add_with(Opcode::DLabel, Operand::Label(GLOBAL_MEMORY_BLOCK.to_string()));
        code.add_with(Opcode::DataZ, Operand::Integer(size as i32));
        code
    }

    fn main_program(&mut self, program: &TypedProgram) -> CodeFragment {
        let mut code = CodeFragment::void();

        code.add_with(Opcode::Label, Operand::Label(MAIN_PROGRAM_LABEL.to_string()));
        for statement in &program.main.body {
            code.append(gen_statement(self, statement));
        }
        code.add(Opcode::Halt);

        code
    }
}

/// Memory access width of a type, shared by loads and stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessWidth {
    Integer,
    Float,
    Character,
}

impl AccessWidth {
    /// # Panics
    ///
    /// Panics on `Type::Error`, which has no storage.
    pub fn of(ty: Type) -> AccessWidth {
        match ty {
            Type::Integer | Type::String => AccessWidth::Integer,
            Type::Float => AccessWidth::Float,
            Type::Boolean | Type::Character => AccessWidth::Character,
            Type::Error => panic!("Attempted to access storage of the error type"),
        }
    }

    pub fn load(&self) -> Opcode {
        match self {
            AccessWidth::Integer => Opcode::LoadI,
            AccessWidth::Float => Opcode::LoadF,
            AccessWidth::Character => Opcode::LoadC,
        }
    }

    pub fn store(&self) -> Opcode {
        match self {
            AccessWidth::Integer => Opcode::StoreI,
            AccessWidth::Float => Opcode::StoreF,
            AccessWidth::Character => Opcode::StoreC,
        }
    }
}

/// Lowers `program` to stack machine code.
///
/// `program` must come from an analysis that recorded no diagnostics; any
/// node typed `Error` or identifier without a binding is a driver defect and
/// panics.
pub fn generate(program: &TypedProgram) -> CodeFragment {
    debug!("code generation started");
    let code = CodeGenerator::new().gen_program(program);
    debug!(instructions = code.len(), "code generation finished");
    code
}
