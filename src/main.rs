use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::{debug, info};

use littlec::semantic::report;
use littlec::{Diagnostic, Error, Result};

#[derive(Parser, Debug)]
#[command(name = "littlec")]
#[command(about = "Build and print the symbol tables of a Little program")]
#[command(version)]
struct Cli {
    /// Source file to analyze; standard input when omitted or `-`
    input: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Emit::Report)]
    emit: Emit,

    /// Print a source-annotated report to stderr on declaration errors
    #[arg(long)]
    explain: bool,

    /// Enable verbose logging (repeat for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Explicit log level, overrides -v/-q and RUST_LOG
    #[arg(long, value_enum)]
    log: Option<LogLevel>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Emit {
    /// Sorted `Symbol table` listing
    Report,
    /// Every scope as pretty JSON
    Json,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

fn setup_logging(verbose: u8, quiet: bool, log_level: Option<LogLevel>) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = if let Some(level) = log_level {
        EnvFilter::new(match level {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        })
    } else if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // stdout carries the report only
    let formatter = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    tracing_subscriber::registry()
        .with(formatter)
        .with(filter)
        .init();
}

enum InputSource {
    File(PathBuf),
    Stdin,
}

impl InputSource {
    fn from_arg(arg: Option<&PathBuf>) -> Self {
        match arg {
            Some(path) if path.as_os_str() != "-" => InputSource::File(path.clone()),
            _ => InputSource::Stdin,
        }
    }

    fn name(&self) -> String {
        match self {
            InputSource::File(path) => path.display().to_string(),
            InputSource::Stdin => "<stdin>".to_string(),
        }
    }

    fn read(&self) -> Result<String> {
        match self {
            InputSource::File(path) => {
                std::fs::read_to_string(path).map_err(|e| Error::io(path, e))
            }
            InputSource::Stdin => {
                let mut src = String::new();
                std::io::stdin()
                    .read_to_string(&mut src)
                    .map_err(|e| Error::io("<stdin>", e))?;
                Ok(src)
            }
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let source = InputSource::from_arg(cli.input.as_ref());
    let path = source.name();
    let src = source.read()?;
    info!(%path, bytes = src.len(), "analyzing");

    let program = match littlec::parse_source(&src) {
        Ok(program) => program,
        Err(diagnostics) => {
            for diag in &diagnostics {
                eprint!("{}", diag.format(&path, &src, "Parsing failed", 3));
            }
            return Err(Error::Parse(diagnostics));
        }
    };
    debug!(
        program = %program.name.0,
        functions = program.functions.len(),
        "parsed"
    );

    let table = match littlec::analyze(&program) {
        Ok(table) => table,
        Err(err) => {
            println!("{}", err);
            if cli.explain {
                let diag = Diagnostic::from(&err);
                eprint!("{}", diag.format(&path, &src, "Declaration error", 4));
            }
            return Err(err.into());
        }
    };
    info!(scopes = table.len(), "symbol table built");

    match cli.emit {
        Emit::Report => print!("{}", report::render(&table)),
        Emit::Json => println!("{}", report::to_json(&table)?),
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet, cli.log);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(Error::Semantic(_)) => ExitCode::from(1),
        Err(Error::Parse(diagnostics)) => {
            debug!(count = diagnostics.len(), "parse failed");
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::from(2)
        }
    }
}
