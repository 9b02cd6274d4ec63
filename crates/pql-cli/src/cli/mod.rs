mod args;
mod commands;
mod dispatch;

#[cfg(test)]
mod dispatch_tests;

use std::io::IsTerminal;

use clap::ValueEnum;

pub use commands::build_cli;
pub use dispatch::{AstParams, CheckParams, CompileParams, FilterParams};

/// `--color` setting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    /// Diagnostics go to stderr, so `Auto` follows stderr alone.
    pub fn enabled(self) -> bool {
        match self {
            Self::Auto => std::io::stderr().is_terminal(),
            Self::Always => true,
            Self::Never => false,
        }
    }
}
