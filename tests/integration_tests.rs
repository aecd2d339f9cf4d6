//! Integration tests for end-to-end compilation.
//!
//! These tests compile source text through the whole pipeline and run the
//! generated code on the interpreter in `common`, checking what it prints.

mod common;

use common::{compile, run, run_source};
use grouse::{compile_source, display_error, CompileError, CompileOptions};

fn print_result(expression: &str) -> String {
    run_source(&format!("exec {{ print {}. }}", expression))
}

#[test]
fn test_literal_comparisons() {
    let cases = [
        ("3 > 2", "true"),
        ("2 > 3", "false"),
        ("1 < 2", "true"),
        ("2 < 1", "false"),
        ("2 >= 2", "true"),
        ("3 >= 2", "true"),
        ("1 >= 2", "false"),
        ("2 <= 2", "true"),
        ("1 <= 2", "true"),
        ("3 <= 2", "false"),
        ("2 == 2", "true"),
        ("2 == 3", "false"),
        ("2 != 2", "false"),
        ("1 != 2", "true"),
        ("1.5 < 2.5", "true"),
        ("2.5 > 1.5", "true"),
        ("2.5 <= 2.5", "true"),
        ("2.5 >= 3.5", "false"),
        ("1.0 == 1.0", "true"),
        ("1.0 != 1.0", "false"),
        ("'a' < 'b'", "true"),
        ("'b' >= 'a'", "true"),
        ("'c' <= 'c'", "true"),
        ("'x' == 'y'", "false"),
        ("true == true", "true"),
        ("false == true", "false"),
        ("true != false", "true"),
    ];

    for (expression, expected) in cases {
        assert_eq!(print_result(expression), expected, "{}", expression);
    }
}

#[test]
fn test_comparison_pushes_one_or_zero() {
    let execution = run(&compile("exec { const yes := 3 > 2. const no := 2 > 3. }"));
    let block = execution.data_address("$global-memory-block");

    assert_eq!(execution.memory[block], 1);
    assert_eq!(execution.memory[block + 1], 0);
}

#[test]
fn test_or_equal_comparisons_on_variables() {
    let output = run_source(
        "exec {
            const a := 2.
            const f := 2.5.
            const c := 'm'.
            print a >= 2, a >= 3, a <= 1, a <= 2, f >= 2.5, f <= 1.0, c >= 'a', c <= 'a'.
        }",
    );

    assert_eq!(output, "true false false true true false true false");
}

#[test]
fn test_declared_constant_prints_like_its_literal() {
    for literal in ["42", "2.5", "'q'", "\"hello\"", "true", "false"] {
        let direct = run_source(&format!("exec {{ print {}. }}", literal));
        let through_constant =
            run_source(&format!("exec {{ const x := {}. print x. }}", literal));

        assert_eq!(direct, through_constant, "{}", literal);
    }
}

#[test]
fn test_booleans_print_as_words() {
    assert_eq!(run_source("exec { print true, false. }"), "true false");
    assert_eq!(run_source("exec { const b := true. let b := !b. print b. }"), "false");
}

#[test]
fn test_divide_by_literal_zero_is_a_runtime_error() {
    let output = run_source("exec { print 1;. print 7 / 0. print 2. }");
    assert_eq!(output, "1\nRuntime error: number divide by zero\n");

    let output = run_source("exec { print 1.5 / 0.0. }");
    assert_eq!(output, "Runtime error: number divide by zero\n");
}

#[test]
fn test_arithmetic() {
    assert_eq!(run_source("exec { print 7 / 2, 1.5 * 2.0, -3 + 1, 10 - 2 * 3. }"), "3 3 -2 4");
    assert_eq!(run_source("exec { const a := 6. const b := 0. let b := a * a. print b - a. }"), "30");
    assert_eq!(run_source("exec { print (1 + 2) * 3; -0.5. }"), "9\n-0.5");
}

#[test]
fn test_strings_and_characters() {
    assert_eq!(
        run_source("exec { const greeting := \"hello\". print greeting, 'w'; . }"),
        "hello w\n"
    );
    assert_eq!(run_source("exec { const s := \"a\". print s == s, s != s. }"), "true false");
}

#[test]
fn test_string_literals_compare_by_text() {
    assert_eq!(
        run_source("exec { print \"a\" == \"a\", \"a\" != \"b\", \"a\" != \"a\", \"a\" == \"b\". }"),
        "true true false false"
    );
    assert_eq!(
        run_source("exec { const x := \"hi\". const y := \"hi\". print x == y, x != y. }"),
        "true false"
    );
}

#[test]
fn test_escaped_quote_prints() {
    assert_eq!(run_source(r#"exec { print "say \"hi\"". }"#), "say \"hi\"");
}

#[test]
fn test_global_block_size_is_sum_of_widths() {
    let code = compile(
        "exec {
            const i := 1.
            const f := 1.0.
            const b := true.
            const c := 'c'.
            const s := \"s\".
        }",
    );
    let text = code.to_string();

    assert!(text.contains("DLabel $global-memory-block\nDataZ 18\n"));
}

#[test]
fn test_redeclaration_still_allocates() {
    let code = compile("exec { const x := 1. const x := 2.5. print x. }");
    let text = code.to_string();

    assert!(text.contains("DataZ 12\n"));
    assert_eq!(run(&code).output, "2.5");
}

#[test]
fn test_output_is_deterministic() {
    let source = "exec { const a := \"x\". print a, 1 < 2, 2.5 >= 1.5, true; . }";

    let first = compile(source).to_string();
    let second = compile(source).to_string();

    assert_eq!(first, second);
}

#[test]
fn test_incompatible_operands_stop_before_code_generation() {
    let result = compile_source("exec { print 1 + true. }", "test.grouse", CompileOptions::default());

    match result {
        Err(CompileError::Semantic(diagnostics)) => {
            assert_eq!(diagnostics.error_count(), 1);
            let diagnostic = diagnostics.iter().next().unwrap();
            assert_eq!(diagnostic.error.get_error_name(), "IncompatibleOperands");
            assert_eq!(
                diagnostic.message(),
                "operator + not defined for types [integer, boolean]"
            );
        }
        other => panic!("Expected a semantic error, got {:?}", other.map(|code| code.len())),
    }
}

#[test]
fn test_undeclared_identifier_is_rendered() {
    let source = "exec {\n  print y.\n}\n";
    let Err(CompileError::Semantic(diagnostics)) =
        compile_source(source, "test.grouse", CompileOptions::default())
    else {
        panic!("Expected a semantic error");
    };

    let diagnostic = diagnostics.iter().next().unwrap();
    let rendered = display_error(&diagnostic.error, source, "test.grouse");
    assert!(rendered.starts_with("Error: VariableNotDeclared"));
    assert!(rendered.contains("2 | print y."));
}

#[test]
fn test_redeclaration_option() {
    let source = "exec { const x := 1. const x := 2. }";

    assert!(compile_source(source, "test.grouse", CompileOptions::default()).is_ok());

    let rejected = compile_source(
        source,
        "test.grouse",
        CompileOptions {
            reject_redeclarations: true,
        },
    );
    assert!(matches!(rejected, Err(CompileError::Semantic(diagnostics)) if diagnostics.error_count() == 1));
}

#[test]
fn test_syntax_errors_are_reported() {
    let result = compile_source("exec { const x := . }", "test.grouse", CompileOptions::default());
    assert!(matches!(result, Err(CompileError::Syntax(_))));

    let result = compile_source("exec { print @. }", "test.grouse", CompileOptions::default());
    match result {
        Err(CompileError::Syntax(error)) => assert_eq!(error.get_error_name(), "UnrecognisedToken"),
        _ => panic!("Expected an unrecognised token"),
    }
}
