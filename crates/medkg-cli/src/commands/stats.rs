//! Show graph statistics.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use medkg::graph::load_snapshot;

use crate::config::{Config, GraphBackend};

pub fn run() -> Result<()> {
    let config = Config::load()?;
    if config.graph.backend == GraphBackend::Neo4j {
        bail!("Statistics are only available for the memory backend.");
    }

    let path = config.snapshot_path()?;
    if !path.exists() {
        bail!("No graph found. Run {} first.", "medkg import".cyan());
    }

    let snapshot = load_snapshot(&path).with_context(|| format!("Failed to load {}", path.display()))?;
    let store = snapshot.restore();

    println!("{}", "MedKG Graph Statistics".white().bold());
    println!("{}", "═".repeat(40).dimmed());
    println!();

    println!("{}", "Graph Structure".blue().bold());
    println!("  Total nodes:       {}", store.node_count().to_string().cyan());
    println!("  Total edges:       {}", store.edge_count().to_string().cyan());
    println!();

    println!("{}", "Node Labels".blue().bold());
    for (label, count) in store.count_by_label() {
        println!("  {:<18} {}", format!("{label}:"), count.to_string().cyan());
    }
    println!();

    if !snapshot.metadata.sources.is_empty() {
        println!("{}", "Sources".blue().bold());
        for source in &snapshot.metadata.sources {
            println!("  {}", source);
        }
        println!();
    }

    println!("{}", "═".repeat(40).dimmed());

    Ok(())
}
