//! Code generation for the stack machine.
//!
//! This module lowers the typed AST into a flat instruction stream. It
//! handles:
//!
//! - The instruction and fragment model (`fragment`)
//! - Label minting (`labeller`)
//! - The runtime preamble and fixed labels (`runtime`)
//! - Statement and expression lowering with type-directed instruction
//!   selection

pub mod compiler;
pub mod expr;
pub mod fragment;
pub mod labeller;
pub mod runtime;
pub mod stmt;
