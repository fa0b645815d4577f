//! `l0c`: the command-line driver (§6).
//!
//! `l0c [-v|-vv] [--eval] <input.l0> [output.c]` parses, macro-expands, and
//! either evaluates the program directly (`--eval`, useful for bootstrap
//! testing without a C toolchain) or emits a C translation unit to
//! `output.c` (defaulting to `input.l0`'s path with its extension replaced).

use clap::Parser as _;
use l0_mem::Arena;
use l0_syntax::{L0Error, Parser as L0Parser, Value};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(clap::Parser, Debug)]
#[command(name = "l0c", about = "L0 compiler core driver")]
struct Cli {
    /// Raise the log level: `-v` for Debug, `-vv` for Trace.
    #[arg(short = 'v', action = clap::ArgAction::Count)]
    verbose: u8,

    /// Evaluate the program directly instead of emitting C.
    #[arg(long)]
    eval: bool,

    /// L0 source file.
    input: PathBuf,

    /// Output C file (defaults to `input` with its extension replaced).
    output: Option<PathBuf>,

    /// Everything after `input`/`output` is handed to the L0 program as
    /// `command-line-args`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    program_args: Vec<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => l0_log::Level::Info,
        1 => l0_log::Level::Debug,
        _ => l0_log::Level::Trace,
    };
    l0_log::set_level(level);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), L0Error> {
    let source = std::fs::read_to_string(&cli.input)
        .map_err(|err| L0Error::runtime_io(format!("cannot read {}: {err}", cli.input.display())))?;

    l0_primitives::set_command_line_args(cli.program_args.clone());

    let arena = Arena::with_defaults();
    let env = l0_env::create_global(&arena)?;
    l0_primitives::register_primitives(env, &arena)?;

    let program = L0Parser::parse_string_all(&source, &arena)?;
    let forms = program
        .list_to_vec()
        .expect("parse_string_all always returns a proper list");

    let expanded = forms
        .into_iter()
        .map(|form| l0_eval::macroexpand(form, env, &arena))
        .collect::<Result<Vec<Value<'_>>, L0Error>>()?;

    if cli.eval {
        for form in expanded {
            l0_eval::eval(form, env, &arena)?;
        }
        return Ok(());
    }

    let c_source = l0_codegen::emit_program(&expanded, &arena)?;
    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.input.with_extension("c"));
    std::fs::write(&output_path, c_source)
        .map_err(|err| L0Error::runtime_io(format!("cannot write {}: {err}", output_path.display())))?;
    Ok(())
}

fn report_error(err: &L0Error) {
    let label = match err {
        L0Error::ParseInvalidSyntax { .. } | L0Error::ParseUnexpectedEOF { .. } | L0Error::ParseMemory { .. } => {
            "Parse Error"
        }
        _ => "Runtime Error",
    };
    match err.position() {
        Some(position) => eprintln!("{label}: {} at {position}", err.message()),
        None => eprintln!("{label}: {}", err.message()),
    }
}
