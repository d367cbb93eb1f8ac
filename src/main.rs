use clap::Parser;
use miette::Result;
use skingen::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = cli.printer();

    match cli.command {
        Commands::Generate(args) => skingen::cli::generate::run(args, &printer)?,
        Commands::Check(args) => skingen::cli::check::run(args, &printer)?,
        Commands::Props(args) => skingen::cli::props::run(args, &printer)?,
        Commands::Completions(args) => skingen::cli::completions::run(args)?,
    }

    Ok(())
}
