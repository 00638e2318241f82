//! MedKG CLI - medical question answering over a knowledge graph.

mod commands;
mod config;
mod setup;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(name = "medkg")]
#[command(author, version, about = "MedKG - Medical question answering over a knowledge graph", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a new MedKG project
    Init {
        /// Project directory (default: current directory)
        #[arg(short, long)]
        path: Option<String>,
    },

    /// Import disease records (JSON lines) into the local graph
    Import {
        /// JSONL file, one disease record per line
        path: String,

        /// Add to the existing graph instead of replacing it
        #[arg(short, long)]
        append: bool,
    },

    /// Ask a medical question
    Ask {
        /// The question
        question: String,

        /// Generate a final answer with the configured LLM
        #[arg(short, long)]
        generate: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the query template for every intent
    Templates,

    /// Show graph statistics
    Stats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { path } => commands::init::run(path),
        Commands::Import { path, append } => commands::import::run(&path, append),
        Commands::Ask {
            question,
            generate,
            json,
        } => commands::ask::run(&question, generate, json),
        Commands::Templates => commands::templates::run(),
        Commands::Stats => commands::stats::run(),
    }
}
