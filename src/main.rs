use std::{env, fs, path::PathBuf, rc::Rc, time::Instant};

use anyhow::{bail, Context, Result};
use grouse::{
    compile, display_error, lexer::lexer::tokenize, parser::parser::parse, CompileOptions,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: grouse <input> [output] [--reject-redeclarations]";

struct Arguments {
    input: PathBuf,
    output: PathBuf,
    options: CompileOptions,
}

fn parse_arguments(args: impl Iterator<Item = String>) -> Result<Arguments> {
    let mut options = CompileOptions::default();
    let mut paths = vec![];

    for arg in args {
        match arg.as_str() {
            "--reject-redeclarations" => options.reject_redeclarations = true,
            flag if flag.starts_with("--") => bail!("unknown flag `{}`\n{}", flag, USAGE),
            _ => paths.push(PathBuf::from(arg)),
        }
    }

    let mut paths = paths.into_iter();
    let Some(input) = paths.next() else {
        bail!(USAGE);
    };
    let output = paths.next().unwrap_or_else(|| input.with_extension("asm"));
    if paths.next().is_some() {
        bail!(USAGE);
    }

    Ok(Arguments {
        input,
        output,
        options,
    })
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("GROUSE_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let arguments = parse_arguments(env::args().skip(1))?;
    let file_name = arguments
        .input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| arguments.input.to_string_lossy().into_owned());

    let start = Instant::now();
    let source = fs::read_to_string(&arguments.input)
        .with_context(|| format!("failed to read {}", arguments.input.display()))?;

    let tokens = match tokenize(source.clone(), Some(file_name.clone())) {
        Ok(tokens) => tokens,
        Err(error) => {
            eprint!("{}", display_error(&error, &source, &file_name));
            bail!("tokenizing {} failed", file_name);
        }
    };
    info!(elapsed = ?start.elapsed(), "tokenized");

    let program = match parse(tokens, Rc::new(file_name.clone())) {
        Ok(program) => program,
        Err(error) => {
            eprint!("{}", display_error(&error, &source, &file_name));
            bail!("parsing {} failed", file_name);
        }
    };
    info!(elapsed = ?start.elapsed(), "parsed");

    let code = match compile(&program, arguments.options) {
        Ok(code) => code,
        Err(diagnostics) => {
            for diagnostic in &diagnostics {
                eprint!("{}", display_error(&diagnostic.error, &source, &file_name));
            }
            bail!(
                "{} semantic error(s) in {}",
                diagnostics.error_count(),
                file_name
            );
        }
    };
    info!(elapsed = ?start.elapsed(), "generated code");

    fs::write(&arguments.output, code.to_string())
        .with_context(|| format!("failed to write {}", arguments.output.display()))?;
    info!(output = %arguments.output.display(), total = ?start.elapsed(), "done");

    Ok(())
}
