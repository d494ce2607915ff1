use std::io::IsTerminal;

use crate::{
    cli::{Args, ColorChoice},
    Emit,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct Config {
    pub color_enabled: bool,
    pub emit: Emit,
}

impl Config {
    pub fn from_args(args: &Args) -> Self {
        let color_enabled = match args.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => std::io::stderr().is_terminal(),
        };

        Config {
            color_enabled,
            emit: args.emit,
        }
    }
}
