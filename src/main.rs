use clap::Parser;
use memecut::cli::{Cli, Commands};
use memecut::output::Printer;
use miette::Result;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let printer = Printer::new();

    match cli.command {
        Commands::Split(args) => {
            memecut::cli::split::run(args, &printer)?;
        }
        Commands::Grid(args) => {
            memecut::cli::grid::run(args, &printer)?;
        }
        Commands::Init(args) => {
            memecut::cli::init::run(args, &printer)?;
        }
        Commands::Completions(args) => memecut::cli::completions::run(args)?,
    }

    Ok(())
}
