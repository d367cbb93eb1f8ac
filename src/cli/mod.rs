pub mod check;
pub mod completions;
pub mod generate;
pub mod props;

use clap::{ArgAction, Parser, Subcommand};

use crate::output::{Printer, Verbosity};

/// skingen - Skin texture generator for extracted Borderlands 2 packages
#[derive(Parser, Debug)]
#[command(name = "skingen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Less output; repeat to also hide warnings
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Show debug output (colour matrices, resolved paths)
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// A printer honouring `-q` and `--debug`.
    pub fn printer(&self) -> Printer {
        Printer::with_verbosity(Verbosity::from_flags(self.quiet, self.debug))
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate head and body textures from a skin package
    Generate(generate::GenerateArgs),

    /// Check a skin package without rendering
    Check(check::CheckArgs),

    /// Print the unified parameters of a props file
    Props(props::PropsArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
