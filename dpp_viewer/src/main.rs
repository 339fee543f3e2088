//! Terminal front-end for the DPP viewer
//!
//! Loads a passport catalog, loads its model in the background and shows one
//! text panel per passport. Hover events are typed on stdin.

mod commands;
mod terminal;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "dpp_viewer", about = "Digital Product Passport viewer")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a catalog and its model, then react to hover commands on stdin
    View(commands::view::ViewArgs),
    /// Print the record id of material names
    Hash(commands::hash::HashArgs),
    /// List the materials of a model file
    Materials(commands::materials::MaterialsArgs),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        dpp_core::foundation::logging::init();
    }

    match &cli.command {
        Commands::View(args) => commands::view::run(args),
        Commands::Hash(args) => {
            commands::hash::run(args);
            Ok(())
        }
        Commands::Materials(args) => commands::materials::run(args),
    }
}
