use dask_compute::registry::RegistryError;
use dask_parser::parser::error::Error as ParseError;
use rustyline::error::ReadlineError;
use std::{fmt::{Display, Formatter}, io};

/// Utility enum to package errors that can occur while running the menu.
#[derive(Debug)]
pub enum Error {
    /// Error that occurred while validating or parsing an expression.
    ParseError(ParseError),

    /// Error that occurred while deriving a new variable.
    RegistryError(RegistryError),

    /// Error that occurred while reading or writing a file.
    Io(io::Error),

    /// Error that occurred while reading a line of input.
    Readline(ReadlineError),
}

impl Error {
    /// Renders this error. Parse errors are rendered as a report pointing into `input`; all other
    /// errors are rendered as a single line.
    pub fn render(&self, input: &str, color: bool) -> String {
        match self {
            Self::ParseError(err) => {
                let rendered = err.render("input", input)
                    .unwrap_or_else(|io_err| format!("error: {}\n", io_err));
                if color {
                    rendered
                } else {
                    String::from_utf8_lossy(&strip_ansi_escapes::strip(rendered)).into_owned()
                }
            },
            other => format!("error: {}\n", other),
        }
    }

    /// Report this error to stderr.
    pub fn report_to_stderr(&self, input: &str, color: bool) {
        eprint!("{}", self.render(input, color));
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ParseError(err) => write!(f, "invalid expression: {}", err),
            Self::RegistryError(err) => write!(f, "{}", err),
            Self::Io(err) => write!(f, "{}", err),
            Self::Readline(err) => write!(f, "{}", err),
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::ParseError(err)
    }
}

impl From<RegistryError> for Error {
    fn from(err: RegistryError) -> Self {
        Self::RegistryError(err)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<ReadlineError> for Error {
    fn from(err: ReadlineError) -> Self {
        Self::Readline(err)
    }
}
