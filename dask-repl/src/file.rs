//! Reading expressions from, and writing sorted expressions to, plain text files.

use crate::report;
use dask_compute::Registry;
use dask_parser::parser::{error::Error as ParseError, validate::parse_binding};
use std::{fs, io, path::Path};
use tracing::{debug, warn};

/// A line of an input file that could not be bound.
#[derive(Debug)]
pub struct LineError {
    /// The line number, starting from 1.
    pub line: usize,

    /// The text that the error's spans point into.
    pub text: String,

    /// The error.
    pub error: ParseError,
}

/// The outcome of loading a file into the registry.
#[derive(Debug, Default)]
pub struct Loaded {
    /// The number of expressions that were bound.
    pub bound: usize,

    /// The lines that were skipped because they are invalid.
    pub errors: Vec<LineError>,
}

/// Binds every `name=expression` line of the given text. Blank lines and lines starting with `#`
/// are ignored; invalid lines are collected and skipped, so one bad line does not prevent the
/// rest of the file from loading.
pub fn load(registry: &mut Registry, text: &str) -> Loaded {
    let mut loaded = Loaded::default();

    for (i, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let result = parse_binding(line)
            .map_err(|error| (line.to_string(), error))
            .and_then(|binding| {
                registry.bind(&binding).map_err(|error| (binding.source.to_string(), error))
            });

        match result {
            Ok(_) => loaded.bound += 1,
            Err((text, error)) => {
                warn!(line = i + 1, "skipping invalid line");
                loaded.errors.push(LineError { line: i + 1, text, error });
            },
        }
    }

    debug!(bound = loaded.bound, skipped = loaded.errors.len(), "loaded expressions");
    loaded
}

/// Reads the file at the given path and binds its expressions.
pub fn load_file(registry: &mut Registry, path: &Path) -> io::Result<Loaded> {
    let text = fs::read_to_string(path)?;
    Ok(load(registry, &text))
}

/// Writes the expressions, grouped by value, to the file at the given path.
pub fn write_sorted(registry: &Registry, path: &Path) -> io::Result<()> {
    fs::write(path, report::sorted(registry))
}
