//! Quill Language CLI
//!
//! Command-line interface for the Quill compiler front end.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use quill_lang::{compile, CompileOptions, QuillError, QuillResult, Renderer, VERSION};

/// Check a Quill program and report every problem found in it.
#[derive(Parser, Debug)]
#[command(name = "quill", version, about, long_about = None)]
struct Cli {
    /// Source file to compile
    file: Option<PathBuf>,

    /// Print the token stream after a successful compile
    #[arg(short, long)]
    tokens: bool,

    /// Print the syntax tree after a successful compile
    #[arg(short, long)]
    ast: bool,

    /// When to use colors in diagnostics
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Log pipeline stages to stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn apply(self) {
        match self {
            // colored already honours NO_COLOR and tty detection
            ColorChoice::Auto => {}
            ColorChoice::Always => colored::control::set_override(true),
            ColorChoice::Never => colored::control::set_override(false),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    cli.color.apply();

    let Some(path) = cli.file.as_deref() else {
        eprintln!("Error: No input file specified");
        print_usage();
        return ExitCode::FAILURE;
    };

    match compile_file(path, &cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{}{} {}", "error".red().bold(), ":".bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_usage() {
    eprintln!("Quill v{}", VERSION);
    eprintln!("Usage: quill [OPTIONS] <FILE>");
    eprintln!("       quill --help");
}

/// Compile a file, printing diagnostics and any requested dumps.
/// Returns whether compilation succeeded.
fn compile_file(path: &Path, cli: &Cli) -> QuillResult<bool> {
    let source = fs::read_to_string(path).map_err(|source| QuillError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let options = CompileOptions::new().with_filename(path.display().to_string());
    let result = compile(&source, &options);

    if !result.diagnostics.is_empty() {
        let renderer = Renderer::with_source(&source);
        eprint!("{}", renderer.format_all(&result.diagnostics));
    }

    if !result.succeeded() {
        return Ok(false);
    }

    println!("{}", "Compilation successful".green().bold());
    if cli.tokens {
        print!("{}", result.token_stream());
    }
    if cli.ast {
        print!("{}", result.ast_dump());
    }

    Ok(true)
}
