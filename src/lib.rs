#![allow(clippy::module_inception)]

use std::rc::Rc;

use thiserror::Error as ThisError;
use tracing::debug;

use crate::{
    ast::ast::Program,
    compiler::{compiler::generate, fragment::CodeFragment},
    errors::errors::{Diagnostics, Error, ErrorTip},
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::{type_checker::type_check, typed_ast::TypedProgram},
};

pub mod ast;
pub mod compiler;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position(pub u32, pub Rc<String>);

impl Position {
    pub fn null() -> Self {
        Position(0, Rc::new(String::from("<null>")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

/// Knobs for a single compilation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompileOptions {
    /// Record a diagnostic when a name is declared twice in one scope.
    /// Off by default: the later declaration silently wins.
    pub reject_redeclarations: bool,
}

#[derive(ThisError, Debug)]
pub enum CompileError {
    #[error("syntax error: {0}")]
    Syntax(Error),
    #[error("{} semantic error(s)", .0.error_count())]
    Semantic(Diagnostics),
}

/// Analyzes `program` and, when no diagnostics were recorded, lowers it to a
/// single instruction stream.
///
/// Each call builds its own analyzer and generator, so label numbering and
/// storage allocation start fresh every time.
pub fn compile(program: &Program, options: CompileOptions) -> Result<CodeFragment, Diagnostics> {
    let mut diagnostics = Diagnostics::new();
    let typed_program = type_check(program, options, &mut diagnostics);

    generate_if_clean(&typed_program, diagnostics)
}

/// Lowers `program` only when `diagnostics` is empty. Any recorded
/// diagnostic, warnings included, means the tree may hold `Error` nodes.
pub fn generate_if_clean(
    program: &TypedProgram,
    diagnostics: Diagnostics,
) -> Result<CodeFragment, Diagnostics> {
    if !diagnostics.is_empty() {
        debug!(
            recorded = diagnostics.len(),
            errors = diagnostics.error_count(),
            "skipping code generation"
        );
        return Err(diagnostics);
    }

    Ok(generate(program))
}

/// Runs the whole pipeline over source text.
pub fn compile_source(
    source: &str,
    file_name: &str,
    options: CompileOptions,
) -> Result<CodeFragment, CompileError> {
    let tokens = tokenize(source.to_string(), Some(file_name.to_string()))
        .map_err(CompileError::Syntax)?;
    let program = parse(tokens, Rc::new(file_name.to_string())).map_err(CompileError::Syntax)?;

    compile(&program, options).map_err(CompileError::Semantic)
}

/// Finds the 1-based line containing byte offset `position`, returning the
/// line number, its text and the offset within it.
pub fn get_line_at_position(content: &str, position: u32) -> Option<(usize, String, usize)> {
    let pos = position as usize;
    let mut start = 0;

    for (index, line) in content.split_inclusive('\n').enumerate() {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return Some((index + 1, line.to_string(), pos - start));
        }

        start = end;
    }

    None
}

pub fn display_error(error: &Error, source: &str, file: &str) -> String {
    /*
        Error: VariableNotDeclared (Variable `y` not declared)
        -> final.grouse
           |
         3 |     print y.
           | ----------^
    */
    let mut output = String::new();

    if let ErrorTip::None = error.get_tip() {
        output.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        output.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    output.push_str(&format!("-> {}\n", file));

    let Some((line, line_text, line_pos)) = get_line_at_position(source, error.get_position().0)
    else {
        return output;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    output.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    output.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    output.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    output
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.chars().take_while(|c| *c == ' ').count();

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use crate::{
        errors::errors::{Diagnostic, DiagnosticSink, Diagnostics, Error, ErrorImpl},
        lexer::lexer::tokenize,
        parser::parser::parse,
        type_checker::type_checker::type_check,
        CompileOptions, Position,
    };

    #[test]
    fn test_any_diagnostic_blocks_generation() {
        let tokens = tokenize("exec { const x := 1. }".to_string(), None).unwrap();
        let program = parse(tokens, Rc::new(String::from("test.grouse"))).unwrap();

        let mut diagnostics = Diagnostics::new();
        let typed = type_check(&program, CompileOptions::default(), &mut diagnostics);
        assert!(super::generate_if_clean(&typed, diagnostics.clone()).is_ok());

        diagnostics.report(Diagnostic::warning(Error::new(
            ErrorImpl::VariableAlreadyDeclared {
                variable: String::from("x"),
            },
            Position(13, Rc::new(String::from("test.grouse"))),
        )));
        let rejected = super::generate_if_clean(&typed, diagnostics).unwrap_err();
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected.error_count(), 0);
    }

    #[test]
    fn test_get_line_at_position() {
        let content = "Hello, world!\nline two\n\nTesting { }\n";

        let (line_number, line, line_pos) = super::get_line_at_position(content, 10).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(content, 32).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }\n");
        assert_eq!(line_pos, 8);

        assert!(super::get_line_at_position(content, 500).is_none());
    }

    #[test]
    fn test_display_error_points_at_offset() {
        let source = "exec {\n  print y.\n}\n";
        let error = Error::new(
            ErrorImpl::VariableNotDeclared {
                variable: String::from("y"),
            },
            Position(15, Rc::new(String::from("test.grouse"))),
        );

        let rendered = super::display_error(&error, source, "test.grouse");

        assert!(rendered.starts_with("Error: VariableNotDeclared (Variable `y` not declared)\n"));
        assert!(rendered.contains("-> test.grouse\n"));
        assert!(rendered.contains("2 | print y.\n"));
        assert!(rendered.contains("| ------^\n"));
    }
}
