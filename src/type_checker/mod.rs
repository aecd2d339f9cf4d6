//! Semantic analysis.
//!
//! Walks the AST once, post-order, and produces the typed AST:
//!
//! - Resolves every operator against its overload set
//! - Binds declared names to storage in the program scope
//! - Resolves identifier references through the scope chain
//!
//! Problems become diagnostics rather than errors; the pass always finishes
//! and marks the offending nodes with the `Error` type.

pub mod scope;
pub mod signatures;
pub mod type_checker;
pub mod typed_ast;
pub mod types;
