use std::fmt::Display;

/// Static types of the language.
///
/// `Error` marks a node whose type could not be determined. It never matches
/// a signature, so one bad operand does not cascade into more diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Type {
    Integer,
    Float,
    Boolean,
    Character,
    String,
    Error,
}

impl Type {
    /// Storage width in bytes. Strings are stored as an address.
    pub fn size(&self) -> u32 {
        match self {
            Type::Integer => 4,
            Type::Float => 8,
            Type::Boolean => 1,
            Type::Character => 1,
            Type::String => 4,
            Type::Error => 0,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Type::Error)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Type::Integer => "integer",
            Type::Float => "float",
            Type::Boolean => "boolean",
            Type::Character => "character",
            Type::String => "string",
            Type::Error => "error",
        }
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
