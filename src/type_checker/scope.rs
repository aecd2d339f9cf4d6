//! Storage-allocating symbol table.
//!
//! A `Scope` maps names to `Binding`s and hands out byte offsets within a
//! static memory block. The program scope owns `$global-memory-block`;
//! subscopes keep allocating in their parent's block after the parent's
//! cursor, so leaving a subscope only has to raise the parent's high-water
//! mark.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{
    compiler::{
        fragment::{CodeFragment, Opcode, Operand},
        runtime::GLOBAL_MEMORY_BLOCK,
    },
    errors::errors::ErrorImpl,
    Position,
};

use super::types::Type;

/// A declared name together with where its value lives at run time.
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: String,
    pub ty: Type,
    /// Label of the memory block holding the value.
    pub base: String,
    /// Byte offset within `base`.
    pub offset: u32,
    /// Where the name was declared.
    pub position: Position,
}

impl Binding {
    /// Appends the instructions that leave this binding's absolute address on
    /// the stack.
    pub fn emit_address(&self, code: &mut CodeFragment) {
        code.add_with(Opcode::PushD, Operand::Label(self.base.clone()));
        code.add_with(Opcode::PushI, Operand::Integer(self.offset as i32));
        code.add(Opcode::Add);
    }
}

#[derive(Debug)]
pub struct Scope {
    bindings: FxHashMap<String, Binding>,
    base: String,
    /// First offset this scope allocated from.
    start: u32,
    /// Next free offset.
    cursor: u32,
    /// Furthest offset used by this scope or any subscope it has left.
    high_water: u32,
    parent: Option<Box<Scope>>,
}

impl Scope {
    /// The root scope, allocating in the global memory block.
    pub fn program() -> Self {
        Scope {
            bindings: FxHashMap::default(),
            base: GLOBAL_MEMORY_BLOCK.to_string(),
            start: 0,
            cursor: 0,
            high_water: 0,
            parent: None,
        }
    }

    /// Opens a child scope that allocates after this scope's cursor.
    pub fn create_subscope(self) -> Scope {
        Scope {
            bindings: FxHashMap::default(),
            base: self.base.clone(),
            start: self.cursor,
            cursor: self.cursor,
            high_water: self.cursor,
            parent: Some(Box::new(self)),
        }
    }

    /// Closes this scope and returns its parent, or `None` for the program
    /// scope.
    pub fn leave(self) -> Option<Scope> {
        let used = self.high_water.max(self.cursor);

        self.parent.map(|parent| {
            let mut parent = *parent;
            parent.high_water = parent.high_water.max(used);
            parent
        })
    }

    pub fn is_program_scope(&self) -> bool {
        self.parent.is_none()
    }

    /// Whether `name` is declared directly in this scope.
    pub fn declares(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// Allocates storage for `name` and registers it. A name already declared
    /// in this scope is replaced; its old storage stays allocated.
    pub fn create_binding(&mut self, name: &str, ty: Type, position: Position) -> Binding {
        let binding = Binding {
            name: name.to_string(),
            ty,
            base: self.base.clone(),
            offset: self.cursor,
            position,
        };

        debug!(
            variable = name,
            ty = %ty,
            offset = binding.offset,
            size = ty.size(),
            "allocated binding"
        );

        self.cursor += ty.size();
        self.bindings.insert(name.to_string(), binding.clone());

        binding
    }

    /// Looks `name` up from this scope outwards.
    pub fn find_binding(&self, name: &str) -> Result<&Binding, ErrorImpl> {
        let mut scope = Some(self);

        while let Some(current) = scope {
            if let Some(binding) = current.bindings.get(name) {
                return Ok(binding);
            }
            scope = current.parent.as_deref();
        }

        Err(ErrorImpl::VariableNotDeclared {
            variable: name.to_string(),
        })
    }

    /// Bytes of storage this scope and its left subscopes occupy.
    pub fn allocated_size(&self) -> u32 {
        self.high_water.max(self.cursor) - self.start
    }
}
