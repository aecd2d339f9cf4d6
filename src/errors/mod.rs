//! Error types and diagnostics for the compiler.
//!
//! This module defines:
//!
//! - Error structures with source position information
//! - Specific error variants for the lexer, parser and semantic analyzer
//! - Helpful error messages and suggestions
//! - The diagnostic sink the semantic analyzer reports into

pub mod errors;
