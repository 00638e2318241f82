//! Ask a question against the knowledge graph.

use anyhow::{Context, Result};
use colored::Colorize;
use medkg::prelude::*;
use serde::Serialize;

use crate::config::Config;
use crate::setup::{build_generator, build_qa};

#[derive(Serialize)]
struct Answer {
    #[serde(flatten)]
    context: QaContext,
    #[serde(skip_serializing_if = "Option::is_none")]
    final_answer: Option<String>,
}

pub fn run(question: &str, generate: bool, json: bool) -> Result<()> {
    let config = Config::load()?;
    let qa = build_qa(&config)?;

    // Retrieval may use a blocking HTTP client, so it runs before the runtime exists.
    let context = qa.answer_context(question);

    let final_answer = if generate {
        let generator = build_generator(&config.llm)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to start async runtime")?;
        Some(runtime.block_on(generator.generate(&context.query, &context.kg_context)))
    } else {
        None
    };

    let answer = Answer {
        context,
        final_answer,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&answer)?);
        return Ok(());
    }

    print_answer(&answer);
    Ok(())
}

fn print_answer(answer: &Answer) {
    let ctx = &answer.context;

    println!("{} {}", "→".blue(), ctx.query.white().bold());
    println!("  Intent:   {}", ctx.intent.to_string().cyan());
    if ctx.entities.is_empty() {
        println!("  Entities: {}", "none".dimmed());
    } else {
        let entities: Vec<String> = ctx
            .entities
            .iter()
            .map(|e| format!("{} ({})", e.name, e.entity_type))
            .collect();
        println!("  Entities: {}", entities.join(", ").cyan());
    }
    println!();

    let marker = if ctx.satisfied { "✓".green() } else { "•".yellow() };
    println!("{} {}", marker, ctx.kg_context);

    if let Some(final_answer) = &answer.final_answer {
        println!();
        println!("{}", "Answer".blue().bold());
        println!("{}", final_answer);
    }
}
