//! Abstract Syntax Tree definitions.
//!
//! The node taxonomy is closed: a program holds a main block of declaration,
//! let and print statements over literal, identifier, binary and unary
//! expressions. Every pass matches these enums exhaustively.

pub mod ast;
pub mod expressions;
pub mod statements;
