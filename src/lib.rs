use std::{
    fs,
    io::{self, BufRead, Write},
    path::Path,
    str::FromStr,
};

use ast::Expr;
use config::Config;
use error::StaticError;
use interpreter::Interpreter;
use parser::Parser;
use printer::{AstPrinter, RpnPrinter};

pub use error::{LexError, ParseError, RunError, RuntimeError};
pub use value::Value;

pub mod ast;
pub mod cli;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod interpreter;
pub mod parser;
pub mod printer;
pub mod scanner;
pub mod token;
pub mod value;

/// What a run prints for each expression it reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Emit {
    #[default]
    Value,
    Ast,
    Rpn,
    Tokens,
}

impl FromStr for Emit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "value" => Ok(Emit::Value),
            "ast" => Ok(Emit::Ast),
            "rpn" => Ok(Emit::Rpn),
            "tokens" => Ok(Emit::Tokens),
            _ => Err(format!(
                "Invalid emit mode: {}. Must be 'value', 'ast', 'rpn', or 'tokens'",
                s
            )),
        }
    }
}

/// Wires scanner, parser and interpreter together for one source at a time.
pub struct Session {
    emit: Emit,
    interpreter: Interpreter,
}

impl Session {
    pub fn new(emit: Emit) -> Self {
        Session {
            emit,
            interpreter: Interpreter::new(),
        }
    }

    /// Runs `source` and writes one line per result to `out`.
    ///
    /// Static errors stop the run before anything is evaluated. A runtime
    /// error stops it at the failing expression, earlier results are already
    /// written.
    pub fn run<W: Write>(&mut self, source: &str, out: &mut W) -> Result<(), RunError> {
        let scanned = scanner::scan_tokens(source);

        if self.emit == Emit::Tokens {
            if scanned.had_error() {
                return Err(static_errors(scanned.errors, Vec::new()));
            }
            for token in &scanned.tokens {
                writeln!(out, "{token}")?;
            }
            return Ok(());
        }

        let parsed = Parser::new(&scanned.tokens).parse_all();
        if scanned.had_error() || parsed.had_error() {
            return Err(static_errors(scanned.errors, parsed.errors));
        }

        for expr in &parsed.exprs {
            let line = self.render(expr)?;
            writeln!(out, "{line}")?;
        }

        Ok(())
    }

    fn render(&mut self, expr: &Expr) -> Result<String, RuntimeError> {
        match self.emit {
            Emit::Ast => Ok(AstPrinter.print(expr)),
            Emit::Rpn => Ok(RpnPrinter.print(expr)),
            Emit::Value | Emit::Tokens => Ok(self.interpreter.evaluate(expr)?.to_string()),
        }
    }
}

fn static_errors(lex: Vec<LexError>, parse: Vec<ParseError>) -> RunError {
    let mut errors: Vec<StaticError> = lex
        .into_iter()
        .map(StaticError::from)
        .chain(parse.into_iter().map(StaticError::from))
        .collect();
    // stable, so errors on one line keep scanner-then-parser order
    errors.sort_by_key(StaticError::line);

    RunError::Static(errors)
}

/// Runs `source` and returns everything it printed.
pub fn run(source: &str, emit: Emit) -> Result<String, RunError> {
    let mut out = Vec::new();
    Session::new(emit).run(source, &mut out)?;

    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Runs a whole file, printing results to stdout. Errors are returned
/// unreported, see [`diagnostic::report`].
pub fn run_file(path: &Path, config: &Config) -> Result<(), RunError> {
    let source = fs::read_to_string(path)?;
    run_source(&source, config)
}

pub fn run_source(source: &str, config: &Config) -> Result<(), RunError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let result = Session::new(config.emit).run(source, &mut out);
    out.flush()?;

    result
}

/// Interactive prompt. Every line is its own run, errors are reported and the
/// loop goes on until stdin is closed.
pub fn run_prompt(config: &Config) -> Result<(), RunError> {
    let stdin = io::stdin();
    let mut session = Session::new(config.emit);
    let mut input = String::new();

    loop {
        print!("> ");
        io::stdout().flush()?;

        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            println!();
            return Ok(());
        }

        let line = input.trim_end_matches(['\n', '\r']);
        let mut out = io::stdout().lock();
        if let Err(e) = session.run(line, &mut out) {
            diagnostic::report(&e, config.color_enabled);
        }
    }
}
