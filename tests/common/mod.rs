//! A small interpreter for generated stack machine code.
//!
//! Data directives are laid out in one pass before execution starts; `Label`
//! and data directives are no-ops when reached at run time. Only the
//! instructions the compiler emits are supported.

#![allow(dead_code)]

use std::collections::HashMap;

use grouse::{
    compile_source,
    compiler::fragment::{CodeFragment, Instruction, Opcode, Operand},
    CompileOptions,
};

const STEP_LIMIT: usize = 100_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Value {
    Int(i32),
    Float(f64),
}

#[derive(Debug)]
pub struct Execution {
    pub output: String,
    pub stack: Vec<Value>,
    pub memory: Vec<u8>,
    pub data_labels: HashMap<String, usize>,
}

impl Execution {
    /// Address of a data label.
    pub fn data_address(&self, label: &str) -> usize {
        self.data_labels[label]
    }
}

struct Machine<'a> {
    instructions: &'a [Instruction],
    code_labels: HashMap<String, usize>,
    data_labels: HashMap<String, usize>,
    memory: Vec<u8>,
    stack: Vec<Value>,
    output: String,
}

pub fn compile(source: &str) -> CodeFragment {
    compile_source(source, "test.grouse", CompileOptions::default())
        .unwrap_or_else(|error| panic!("compilation failed: {}", error))
}

/// Compiles and runs `source`, returning what it printed.
pub fn run_source(source: &str) -> String {
    run(&compile(source)).output
}

pub fn run(code: &CodeFragment) -> Execution {
    let mut machine = Machine::new(code.instructions());
    machine.execute();

    Execution {
        output: machine.output,
        stack: machine.stack,
        memory: machine.memory,
        data_labels: machine.data_labels,
    }
}

fn label_of(instruction: &Instruction) -> &str {
    match &instruction.operand {
        Some(Operand::Label(label)) => label,
        other => panic!("{:?} expects a label operand, got {:?}", instruction.opcode, other),
    }
}

impl<'a> Machine<'a> {
    fn new(instructions: &'a [Instruction]) -> Self {
        let mut machine = Machine {
            instructions,
            code_labels: HashMap::new(),
            data_labels: HashMap::new(),
            memory: vec![],
            stack: vec![],
            output: String::new(),
        };
        machine.layout();
        machine
    }

    fn layout(&mut self) {
        for (index, instruction) in self.instructions.iter().enumerate() {
            match (instruction.opcode, &instruction.operand) {
                (Opcode::Label, Some(Operand::Label(label))) => {
                    self.code_labels.insert(label.clone(), index);
                }
                (Opcode::DLabel, Some(Operand::Label(label))) => {
                    self.data_labels.insert(label.clone(), self.memory.len());
                }
                (Opcode::DataZ, Some(Operand::Integer(size))) => {
                    let end = self.memory.len() + *size as usize;
                    self.memory.resize(end, 0);
                }
                (Opcode::DataS, Some(Operand::Text(text))) => {
                    self.memory.extend(text.as_bytes());
                    self.memory.push(0);
                }
                _ => {}
            }
        }
    }

    fn pop(&mut self) -> Value {
        self.stack.pop().expect("stack underflow")
    }

    fn pop_int(&mut self) -> i32 {
        match self.pop() {
            Value::Int(value) => value,
            Value::Float(value) => panic!("expected an integer, found {}", value),
        }
    }

    fn pop_float(&mut self) -> f64 {
        match self.pop() {
            Value::Float(value) => value,
            Value::Int(value) => panic!("expected a float, found {}", value),
        }
    }

    fn push_bool(&mut self, value: bool) {
        self.stack.push(Value::Int(value as i32));
    }

    fn read_string(&self, address: usize) -> String {
        let end = self.memory[address..]
            .iter()
            .position(|byte| *byte == 0)
            .map(|length| address + length)
            .unwrap_or(self.memory.len());
        String::from_utf8_lossy(&self.memory[address..end]).into_owned()
    }

    fn jump_target(&self, instruction: &Instruction) -> usize {
        let label = label_of(instruction);
        *self
            .code_labels
            .get(label)
            .unwrap_or_else(|| panic!("jump to unknown label {}", label))
    }

    fn integer_op(&mut self, op: fn(i32, i32) -> i32) {
        let right = self.pop_int();
        let left = self.pop_int();
        self.stack.push(Value::Int(op(left, right)));
    }

    fn float_op(&mut self, op: fn(f64, f64) -> f64) {
        let right = self.pop_float();
        let left = self.pop_float();
        self.stack.push(Value::Float(op(left, right)));
    }

    fn printf(&mut self) {
        let address = self.pop_int() as usize;
        let format = self.read_string(address);
        let specifiers: Vec<char> = format
            .split('%')
            .skip(1)
            .filter_map(|rest| rest.chars().next())
            .collect();

        let mut arguments: Vec<Value> = specifiers.iter().map(|_| self.pop()).collect();
        arguments.reverse();

        let mut arguments = arguments.into_iter();
        let mut chars = format.chars();
        while let Some(c) = chars.next() {
            if c != '%' {
                self.output.push(c);
                continue;
            }
            let specifier = chars.next().expect("dangling % in format");
            let argument = arguments.next().expect("missing printf argument");
            let rendered = match (specifier, argument) {
                ('d', Value::Int(value)) => value.to_string(),
                ('g', Value::Float(value)) => value.to_string(),
                ('c', Value::Int(value)) => char::from(value as u8).to_string(),
                ('s', Value::Int(address)) => self.read_string(address as usize),
                other => panic!("bad printf argument {:?}", other),
            };
            self.output.push_str(&rendered);
        }
    }

    fn execute(&mut self) {
        let instructions = self.instructions;
        let mut pc = 0;

        for _ in 0..STEP_LIMIT {
            let Some(instruction) = instructions.get(pc) else {
                panic!("ran off the end of the program");
            };
            pc += 1;

            match instruction.opcode {
                Opcode::Label
                | Opcode::DLabel
                | Opcode::DataZ
                | Opcode::DataS => {}
                Opcode::PushI => match instruction.operand {
                    Some(Operand::Integer(value)) => self.stack.push(Value::Int(value)),
                    ref other => panic!("PushI with {:?}", other),
                },
                Opcode::PushF => match instruction.operand {
                    Some(Operand::Float(value)) => self.stack.push(Value::Float(value)),
                    ref other => panic!("PushF with {:?}", other),
                },
                Opcode::PushD => {
                    let label = label_of(instruction);
                    let address = *self
                        .data_labels
                        .get(label)
                        .unwrap_or_else(|| panic!("unknown data label {}", label));
                    self.stack.push(Value::Int(address as i32));
                }
                Opcode::Add => self.integer_op(i32::wrapping_add),
                Opcode::Subtract => self.integer_op(i32::wrapping_sub),
                Opcode::Multiply => self.integer_op(i32::wrapping_mul),
                Opcode::Divide => self.integer_op(|left, right| left / right),
                Opcode::Negate => {
                    let value = self.pop_int();
                    self.stack.push(Value::Int(-value));
                }
                Opcode::FAdd => self.float_op(|left, right| left + right),
                Opcode::FSubtract => self.float_op(|left, right| left - right),
                Opcode::FMultiply => self.float_op(|left, right| left * right),
                Opcode::FDivide => self.float_op(|left, right| left / right),
                Opcode::FNegate => {
                    let value = self.pop_float();
                    self.stack.push(Value::Float(-value));
                }
                Opcode::BEqual => {
                    let right = self.pop_int();
                    let left = self.pop_int();
                    self.push_bool(left == right);
                }
                Opcode::BNegate => {
                    let value = self.pop_int();
                    self.push_bool(value == 0);
                }
                Opcode::LoadI => {
                    let address = self.pop_int() as usize;
                    let bytes = self.memory[address..address + 4].try_into().unwrap();
                    self.stack.push(Value::Int(i32::from_le_bytes(bytes)));
                }
                Opcode::LoadF => {
                    let address = self.pop_int() as usize;
                    let bytes = self.memory[address..address + 8].try_into().unwrap();
                    self.stack.push(Value::Float(f64::from_le_bytes(bytes)));
                }
                Opcode::LoadC => {
                    let address = self.pop_int() as usize;
                    self.stack.push(Value::Int(self.memory[address] as i32));
                }
                Opcode::StoreI => {
                    let value = self.pop_int();
                    let address = self.pop_int() as usize;
                    self.memory[address..address + 4].copy_from_slice(&value.to_le_bytes());
                }
                Opcode::StoreF => {
                    let value = self.pop_float();
                    let address = self.pop_int() as usize;
                    self.memory[address..address + 8].copy_from_slice(&value.to_le_bytes());
                }
                Opcode::StoreC => {
                    let value = self.pop_int();
                    let address = self.pop_int() as usize;
                    self.memory[address] = value as u8;
                }
                Opcode::Jump => pc = self.jump_target(instruction),
                Opcode::JumpTrue => {
                    if self.pop_int() != 0 {
                        pc = self.jump_target(instruction);
                    }
                }
                Opcode::JumpFalse => {
                    if self.pop_int() == 0 {
                        pc = self.jump_target(instruction);
                    }
                }
                Opcode::JumpPos => {
                    if self.pop_int() > 0 {
                        pc = self.jump_target(instruction);
                    }
                }
                Opcode::JumpNeg => {
                    if self.pop_int() < 0 {
                        pc = self.jump_target(instruction);
                    }
                }
                Opcode::JumpFZero => {
                    if self.pop_float() == 0.0 {
                        pc = self.jump_target(instruction);
                    }
                }
                Opcode::JumpFPos => {
                    if self.pop_float() > 0.0 {
                        pc = self.jump_target(instruction);
                    }
                }
                Opcode::JumpFNeg => {
                    if self.pop_float() < 0.0 {
                        pc = self.jump_target(instruction);
                    }
                }
                Opcode::Printf => self.printf(),
                Opcode::Halt => return,
            }
        }

        panic!("step limit exceeded");
    }
}
