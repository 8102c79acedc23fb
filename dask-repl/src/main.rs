mod error;
mod file;
mod menu;
mod report;

use clap::Parser;
use dask_compute::Registry;
use error::Error;
use menu::{Editor, Options, Script, Session};
use std::{io::{self, IsTerminal}, path::PathBuf, process::ExitCode};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Bind, evaluate, simplify and differentiate fully-parenthesized expressions.
#[derive(Parser, Debug)]
#[command(name = "dask", version, about)]
struct Args {
    /// File of `name=expression` lines to load before showing the menu.
    file: Option<PathBuf>,

    /// Default file that sorted expressions are written to.
    #[arg(short, long, default_value = "sorted.txt")]
    output: PathBuf,

    /// Log filter, in `RUST_LOG` syntax. Overrides the `RUST_LOG` environment variable.
    #[arg(long, value_name = "FILTER")]
    log: Option<String>,

    /// Disable colors in error reports.
    #[arg(long)]
    no_color: bool,
}

/// Initializes logging to stderr, so it never mixes with the menu output.
fn init_logging(filter: Option<&str>) {
    let filter = match filter {
        Some(filter) => EnvFilter::new(filter),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("warn,dask=info,dask_compute=info")),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Loads the startup file, if any, and runs the menu on the terminal or on piped stdin.
fn run(args: Args) -> Result<(), Error> {
    let color = !args.no_color && io::stderr().is_terminal();
    let mut registry = Registry::new();

    if let Some(path) = &args.file {
        let loaded = file::load_file(&mut registry, path)?;
        for file::LineError { line, text, error } in loaded.errors {
            eprintln!("Skipped line {} of {}:", line, path.display());
            Error::from(error).report_to_stderr(&text, color);
        }
        info!(path = %path.display(), bound = loaded.bound, "loaded startup file");
    }

    let options = Options { output: args.output, color };
    let stdout = io::stdout().lock();
    if io::stdin().is_terminal() {
        Session::new(registry, Editor::new()?, stdout, options).run()
    } else {
        Session::new(registry, Script(io::stdin().lock()), stdout, options).run()
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.log.as_deref());

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            err.report_to_stderr("", false);
            ExitCode::FAILURE
        },
    }
}
