use std::path::PathBuf;

use clap::Parser;

use crate::Emit;

#[derive(Parser, Debug)]
#[command(name = "tsukuyomi")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Scan, parse and evaluate expressions", long_about = None)]
pub struct Args {
    /// Script to run. Starts an interactive prompt when omitted
    #[arg(value_name = "SCRIPT")]
    pub script: Option<PathBuf>,

    /// Evaluate an expression instead of reading a file
    #[arg(short = 'e', long = "eval", value_name = "EXPR", conflicts_with = "script")]
    pub eval: Option<String>,

    /// What to print for each expression: value, ast, rpn or tokens
    #[arg(long = "emit", value_name = "MODE", default_value = "value")]
    pub emit: Emit,

    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl std::str::FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(format!(
                "Invalid color choice: {}. Must be 'auto', 'always', or 'never'",
                s
            )),
        }
    }
}
