//! The interactive menu.

use crate::{error::Error, file, report};
use dask_compute::{symbolic::simplify_with_steps, Registry};
use dask_parser::parser::validate::parse_binding;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{io::{BufRead, Write}, path::{Path, PathBuf}};
use tracing::info;

/// The text of the main menu.
const MENU: &str = "\
Please select your choice ('1', '2', '3', '4', '5', '6', '7', '8'):
\t1. Add/Modify DASK expression
\t2. Display current DASK expressions
\t3. Evaluate a single DASK variable
\t4. Read DASK expressions from file
\t5. Sort DASK expressions
\t6. Simplify a DASK expression
\t7. Differentiate a DASK expression
\t8. Exit
";

/// A source of input lines.
pub trait Input {
    /// Reads one line, showing the given prompt. Returns [`None`] at the end of the input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, Error>;
}

/// Reads lines interactively from the terminal.
pub struct Editor(DefaultEditor);

impl Editor {
    /// Creates a line editor on the terminal.
    pub fn new() -> Result<Self, Error> {
        Ok(Self(DefaultEditor::new()?))
    }
}

impl Input for Editor {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, Error> {
        match self.0.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.0.add_history_entry(&line)?;
                }
                Ok(Some(line))
            },
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Reads lines from a non-interactive source, such as piped stdin. Prompts are not shown.
pub struct Script<R>(pub R);

impl<R: BufRead> Input for Script<R> {
    fn read_line(&mut self, _: &str) -> Result<Option<String>, Error> {
        let mut line = String::new();
        if self.0.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Options controlling the behavior of the menu.
#[derive(Debug, Clone)]
pub struct Options {
    /// The file that sorted expressions are written to when no other file is given.
    pub output: PathBuf,

    /// Whether error reports are colored.
    pub color: bool,
}

/// Whether the menu should keep running after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// A menu session, holding the registry of expressions and the input and output streams.
pub struct Session<I, W> {
    registry: Registry,
    input: I,
    out: W,
    options: Options,
}

impl<I: Input, W: Write> Session<I, W> {
    /// Creates a session with the given registry.
    pub fn new(registry: Registry, input: I, out: W, options: Options) -> Self {
        Self { registry, input, out, options }
    }

    /// Returns the registry of expressions.
    #[cfg(test)]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Runs the menu until the user exits or the input ends.
    pub fn run(&mut self) -> Result<(), Error> {
        loop {
            self.out.write_all(MENU.as_bytes())?;
            let Some(choice) = self.input.read_line("Enter choice: ")? else {
                break;
            };

            let flow = match choice.trim() {
                "1" => self.add(),
                "2" => self.display(),
                "3" => self.evaluate(),
                "4" => self.read_file(),
                "5" => self.sort(),
                "6" => self.simplify(),
                "7" => self.differentiate(),
                "8" => Ok(Flow::Exit),
                other => {
                    writeln!(self.out, "Invalid choice `{}`, please enter a number from 1 to 8.", other)?;
                    Ok(Flow::Continue)
                },
            };

            match flow {
                Ok(Flow::Continue) => writeln!(self.out)?,
                Ok(Flow::Exit) => break,
                // input errors end the session, everything else is reported and the menu shown
                // again
                Err(err @ Error::Readline(_)) => return Err(err),
                Err(err) => err.report_to_stderr("", self.options.color),
            }
        }

        writeln!(self.out, "Bye, thanks for using DASK")?;
        Ok(())
    }

    /// Reads a line, returning it trimmed, or [`None`] if the input ended or the line is empty.
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>, Error> {
        Ok(self.input.read_line(prompt)?
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty()))
    }

    /// Writes the "did you mean" hint for an unknown variable.
    fn unknown_variable(&mut self, name: &str) -> Result<(), Error> {
        writeln!(self.out, "Variable \"{}\" is not defined.", name)?;
        let similar = self.registry.similar_names(name);
        if !similar.is_empty() {
            writeln!(self.out, "Did you mean: {}?", similar.join(", "))?;
        }
        Ok(())
    }

    /// `1`: add or modify an expression. Invalid input is reported and the user asked again,
    /// until a valid expression or an empty line is entered.
    fn add(&mut self) -> Result<Flow, Error> {
        loop {
            let Some(line) = self.prompt(
                "Enter the DASK expression you want to add/modify:\nFor example, a=(1+2)\n",
            )? else {
                return Ok(Flow::Continue);
            };

            let binding = match parse_binding(&line) {
                Ok(binding) => binding,
                Err(err) => {
                    Error::from(err).report_to_stderr(&line, self.options.color);
                    continue;
                },
            };

            match self.registry.bind(&binding) {
                Ok(previous) => {
                    let verb = if previous.is_some() { "modified" } else { "added" };
                    info!(name = binding.name, "{} expression", verb);
                    writeln!(self.out, "Expression {}: {}={}", verb, binding.name, binding.source)?;
                    return Ok(Flow::Continue);
                },
                Err(err) => Error::from(err).report_to_stderr(binding.source, self.options.color),
            }
        }
    }

    /// `2`: display all expressions.
    fn display(&mut self) -> Result<Flow, Error> {
        writeln!(self.out, "CURRENT EXPRESSIONS:")?;
        write!(self.out, "{}", report::listing(&self.registry))?;
        Ok(Flow::Continue)
    }

    /// `3`: evaluate a single variable.
    fn evaluate(&mut self) -> Result<Flow, Error> {
        let Some(name) = self.prompt("Please enter the variable you want to evaluate:\n")? else {
            return Ok(Flow::Continue);
        };

        match self.registry.get(&name) {
            Some(expr) => write!(self.out, "{}", report::evaluation(expr))?,
            None => self.unknown_variable(&name)?,
        }
        Ok(Flow::Continue)
    }

    /// `4`: read expressions from a file.
    fn read_file(&mut self) -> Result<Flow, Error> {
        let Some(path) = self.prompt("Please enter input file: ")? else {
            writeln!(self.out, "Please enter a file name.")?;
            return Ok(Flow::Continue);
        };

        let file::Loaded { bound, errors } = file::load_file(&mut self.registry, Path::new(&path))?;
        for file::LineError { line, text, error } in errors {
            writeln!(self.out, "Skipped line {} of {}:", line, path)?;
            Error::from(error).report_to_stderr(&text, self.options.color);
        }
        writeln!(self.out, "Read {} expressions from {}.", bound, path)?;

        self.display()
    }

    /// `5`: sort expressions by value, print them and write them to a file.
    fn sort(&mut self) -> Result<Flow, Error> {
        let prompt = format!(
            "Please enter output file (default: {}): ",
            self.options.output.display(),
        );
        let path = self.prompt(&prompt)?
            .map(PathBuf::from)
            .unwrap_or_else(|| self.options.output.clone());

        write!(self.out, "{}", report::sorted(&self.registry))?;
        file::write_sorted(&self.registry, &path)?;
        writeln!(self.out, "Sorted expressions written to {}.", path.display())?;
        Ok(Flow::Continue)
    }

    /// `6`: simplify an expression, showing the steps taken and the cost report.
    fn simplify(&mut self) -> Result<Flow, Error> {
        let Some(name) = self.prompt("Please enter the variable you want to simplify:\n")? else {
            return Ok(Flow::Continue);
        };

        let Some(expr) = self.registry.get(&name) else {
            self.unknown_variable(&name)?;
            return Ok(Flow::Continue);
        };

        let tree = expr.tree();
        if let Some(original) = tree.original() {
            let (simplified, steps) = simplify_with_steps(original);
            writeln!(self.out, "Original:   {}", original)?;
            writeln!(self.out, "Simplified: {}", simplified)?;
            write!(self.out, "{}", report::steps(&steps))?;
        }
        write!(self.out, "{}", report::cost(&tree.cost()))?;
        Ok(Flow::Continue)
    }

    /// `7`: differentiate an expression and store the result as a new variable.
    fn differentiate(&mut self) -> Result<Flow, Error> {
        let Some(name) = self.prompt("Please enter the variable you want to differentiate:\n")? else {
            return Ok(Flow::Continue);
        };
        if !self.registry.contains(&name) {
            self.unknown_variable(&name)?;
            return Ok(Flow::Continue);
        }

        let Some(var) = self.prompt("Differentiate with respect to:\n")? else {
            return Ok(Flow::Continue);
        };

        let derived = self.registry.bind_derivative(&name, &var)?;
        let line = report::binding(derived);
        writeln!(self.out, "Stored derivative: {}", line)?;
        Ok(Flow::Continue)
    }
}
