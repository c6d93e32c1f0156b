mod common;
mod corpus;
mod input;
mod pairs;
mod run_build;
mod run_delta;
mod run_dendrogram;
mod run_stat;

use crate::run_build::*;
use crate::run_delta::*;
use crate::run_dendrogram::*;
use crate::run_stat::*;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(version, about, long_about, term_width = 80)]
struct Cli {
    #[command(subcommand)]
    commands: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build citation, co-citation, and co-occurrence graphs from a
    /// document table.
    Build(BuildArgs),

    /// Evaluate named statistics on an edge-list graph.
    Stat(StatArgs),

    /// Change-statistic matrix over every node pair of a graph.
    Delta(DeltaArgs),

    /// Nested community dendrogram of a graph.
    Dendrogram(DendrogramArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.commands {
        Commands::Build(args) => {
            run_build(args.clone())?;
        }
        Commands::Stat(args) => {
            run_stat(args.clone())?;
        }
        Commands::Delta(args) => {
            run_delta(args.clone())?;
        }
        Commands::Dendrogram(args) => {
            run_dendrogram(args.clone())?;
        }
    }

    Ok(())
}
