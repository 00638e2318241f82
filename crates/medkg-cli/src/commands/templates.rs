//! List the query template registered for each intent.

use anyhow::Result;
use colored::Colorize;
use medkg::prelude::*;
use medkg::rag::formatter::label_for;

pub fn run() -> Result<()> {
    let registry = TemplateRegistry::standard();
    registry.validate()?;

    println!("{}", "Query Templates".white().bold());
    println!("{}", "═".repeat(60).dimmed());

    for template in registry.iter() {
        let shape = match template.shape {
            QueryShape::Traverse(relation) => format!("Disease -[{}]-> {}", relation, relation.target()),
            QueryShape::Property(property) => format!("Disease.{}", property.as_str()),
            QueryShape::SymptomConjunction => "Disease -[HAS_SYMPTOM]-> every Symptom".to_string(),
        };
        println!(
            "  {:<24} {:<44} needs {}",
            template.intent.to_string().cyan(),
            shape,
            template.required.to_string().yellow()
        );
        if let Some(label) = label_for(template.intent) {
            println!("  {:<24} {}", "", label.dimmed());
        }
    }

    println!("{}", "═".repeat(60).dimmed());
    println!("{} {} templates", "✓".green(), registry.len().to_string().cyan());

    Ok(())
}
