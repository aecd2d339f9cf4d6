//! Instruction model for the stack machine.
//!
//! A `CodeFragment` is an ordered run of instructions tagged with what it
//! leaves on the stack: an address, a value, or nothing.

use std::fmt::Display;

/// Stack machine operation codes.
///
/// Operands are popped from the stack and results pushed back. Directives
/// (`Label`, `DLabel`, `DataZ`, `DataS`) emit no run-time behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Directives
    Label,
    DLabel,
    DataZ,
    DataS,

    // Stack
    PushI,
    PushF,
    PushD,

    // Integer arithmetic
    Add,
    Subtract,
    Multiply,
    Divide,
    Negate,

    // Float arithmetic
    FAdd,
    FSubtract,
    FMultiply,
    FDivide,
    FNegate,

    // Boolean
    BEqual,
    BNegate,

    // Memory
    LoadI,
    LoadF,
    LoadC,
    StoreI,
    StoreF,
    StoreC,

    // Control
    Jump,
    JumpTrue,
    JumpFalse,
    JumpPos,
    JumpNeg,
    JumpFZero,
    JumpFPos,
    JumpFNeg,
    Halt,

    Printf,
}

impl Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Integer(i32),
    Float(f64),
    Label(String),
    /// Text of a `DataS` directive.
    Text(String),
}

impl Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::Integer(value) => write!(f, "{}", value),
            Operand::Float(value) => write!(f, "{:?}", value),
            Operand::Label(label) => write!(f, "{}", label),
            Operand::Text(text) => write!(f, "\"{}\"", text.escape_default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub operand: Option<Operand>,
}

impl Instruction {
    pub fn new(opcode: Opcode) -> Self {
        Instruction {
            opcode,
            operand: None,
        }
    }

    pub fn with_operand(opcode: Opcode, operand: Operand) -> Self {
        Instruction {
            opcode,
            operand: Some(operand),
        }
    }
}

impl Display for Instruction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.operand {
            Some(operand) => write!(f, "{} {}", self.opcode, operand),
            None => write!(f, "{}", self.opcode),
        }
    }
}

/// What a fragment leaves on the stack when it finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeType {
    Address,
    Value,
    Void,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CodeFragment {
    code_type: CodeType,
    instructions: Vec<Instruction>,
}

impl CodeFragment {
    pub fn new(code_type: CodeType) -> Self {
        CodeFragment {
            code_type,
            instructions: vec![],
        }
    }

    pub fn address() -> Self {
        Self::new(CodeType::Address)
    }

    pub fn value() -> Self {
        Self::new(CodeType::Value)
    }

    pub fn void() -> Self {
        Self::new(CodeType::Void)
    }

    pub fn add(&mut self, opcode: Opcode) {
        self.instructions.push(Instruction::new(opcode));
    }

    pub fn add_with(&mut self, opcode: Opcode, operand: Operand) {
        self.instructions.push(Instruction::with_operand(opcode, operand));
    }

    /// Moves every instruction of `other` onto the end of this fragment.
    pub fn append(&mut self, other: CodeFragment) {
        self.instructions.extend(other.instructions);
    }

    /// Turns an address fragment into a value fragment by appending `load`.
    /// Value fragments pass through unchanged.
    ///
    /// # Panics
    ///
    /// Panics on a void fragment, which has nothing to load.
    pub fn make_value(mut self, load: Opcode) -> CodeFragment {
        match self.code_type {
            CodeType::Address => {
                self.add(load);
                self.code_type = CodeType::Value;
                self
            }
            CodeType::Value => self,
            CodeType::Void => panic!("Attempted to take the value of void code"),
        }
    }

    pub fn code_type(&self) -> CodeType {
        self.code_type
    }

    pub fn is_address(&self) -> bool {
        self.code_type == CodeType::Address
    }

    pub fn is_void(&self) -> bool {
        self.code_type == CodeType::Void
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

impl Display for CodeFragment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for instruction in &self.instructions {
            writeln!(f, "{}", instruction)?;
        }
        Ok(())
    }
}
