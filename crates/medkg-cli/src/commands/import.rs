//! Import disease records into the local graph snapshot.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use medkg::graph::load_snapshot;
use medkg::prelude::*;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::config::{Config, GraphBackend};

pub fn run(path: &str, append: bool) -> Result<()> {
    let path = Path::new(path);
    if !path.is_file() {
        bail!("File does not exist: {}", path.display());
    }

    let config = Config::load()?;
    if config.graph.backend == GraphBackend::Neo4j {
        println!(
            "{} Configured backend is neo4j; records go to the local snapshot only.",
            "•".yellow()
        );
    }

    let snapshot_path = config.snapshot_path()?;
    let (mut store, mut sources) = if append && snapshot_path.exists() {
        println!("{} Loading existing graph...", "→".blue());
        let snapshot = load_snapshot(&snapshot_path)
            .with_context(|| format!("Failed to load {}", snapshot_path.display()))?;
        (snapshot.restore(), snapshot.metadata.sources)
    } else {
        (MemoryGraphStore::new(), Vec::new())
    };

    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let size = file.metadata().map(|m| m.len()).unwrap_or(0);

    println!("{} Importing {}...", "→".blue(), path.display().to_string().cyan());

    let pb = ProgressBar::new(size);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} {msg}")
            .context("Invalid progress template")?
            .progress_chars("#>-"),
    );

    let report = import_jsonl(&mut store, BufReader::new(pb.wrap_read(file)))
        .with_context(|| format!("Failed to import {}", path.display()))?;
    pb.finish_with_message("done");

    let source = path.display().to_string();
    if !sources.contains(&source) {
        sources.push(source);
    }
    save_snapshot(&store, &snapshot_path, &sources)
        .with_context(|| format!("Failed to save {}", snapshot_path.display()))?;

    println!();
    println!("{} Import complete!", "✓".green().bold());
    println!("  Records: {}", report.records.to_string().cyan());
    if report.skipped > 0 {
        println!("  Skipped: {}", report.skipped.to_string().yellow());
    }
    println!("  Nodes:   {}", report.nodes.to_string().cyan());
    println!("  Edges:   {}", report.edges.to_string().cyan());
    println!("  Saved:   {}", snapshot_path.display());

    Ok(())
}
