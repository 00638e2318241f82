//! Assemble the question-answering pipeline from configuration.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use medkg::llm::{AnswerGenerator, ContextEcho, LlmAnswerGenerator, LlmConfig, OllamaBackend, OpenAiBackend};
use medkg::prelude::*;
use std::sync::Arc;

use crate::config::{Config, GraphBackend, LlmProvider, LlmSection};

const OLLAMA_ENDPOINT: &str = "http://localhost:11434";

/// An opened graph store and the entity names it knows about.
pub struct OpenedGraph {
    pub store: Arc<dyn GraphStore>,
    pub vocabulary: Vec<(String, EntityType)>,
}

pub fn open_graph(config: &Config) -> Result<OpenedGraph> {
    match config.graph.backend {
        GraphBackend::Memory => {
            let path = config.snapshot_path()?;
            if !path.exists() {
                bail!("No graph found at {}. Run {} first.", path.display(), "medkg import".cyan());
            }
            let store = load_store(&path).with_context(|| format!("Failed to load {}", path.display()))?;
            let vocabulary = store.nodes().map(|n| (n.name.clone(), n.label)).collect();
            Ok(OpenedGraph {
                store: Arc::new(store),
                vocabulary,
            })
        }
        GraphBackend::Neo4j => open_neo4j(config),
    }
}

#[cfg(feature = "neo4j")]
fn open_neo4j(config: &Config) -> Result<OpenedGraph> {
    let store = Neo4jStore::connect(config.graph.neo4j()).context("Failed to configure Neo4j store")?;
    // Entity vocabulary comes from the lexicon only.
    Ok(OpenedGraph {
        store: Arc::new(store),
        vocabulary: Vec::new(),
    })
}

#[cfg(not(feature = "neo4j"))]
fn open_neo4j(_config: &Config) -> Result<OpenedGraph> {
    bail!("This build has no Neo4j support. Rebuild medkg-cli with --features neo4j.")
}

pub fn load_lexicon(config: &Config) -> Result<Lexicon> {
    match &config.lexicon.path {
        Some(path) => Lexicon::load(path).with_context(|| format!("Failed to load lexicon {}", path.display())),
        None => Ok(Lexicon::builtin()?),
    }
}

/// Graph, extractor, classifier and dispatcher wired together.
pub fn build_qa(config: &Config) -> Result<MedicalQa> {
    let graph = open_graph(config)?;
    let lexicon = load_lexicon(config)?;

    let mut extractor = DictionaryEntityExtractor::from_typed(graph.vocabulary);
    // Graph names first, then lexicon terms; the first type seen wins.
    for term in lexicon.symptom_terms() {
        extractor.add(term, EntityType::Symptom);
    }
    for term in lexicon.disease_terms() {
        extractor.add(term, EntityType::Disease);
    }
    tracing::debug!(terms = extractor.len(), "entity dictionary built");

    let classifier = TemplateIntentClassifier::builtin()?
        .with_aggregation(config.intent.aggregation)
        .with_threshold(config.intent.threshold);

    let dispatcher = Dispatcher::new(graph.store, TemplateRegistry::standard(), lexicon)?;
    Ok(MedicalQa::new(Arc::new(extractor), Arc::new(classifier), dispatcher))
}

fn llm_config(base: LlmConfig, section: &LlmSection) -> LlmConfig {
    let mut config = base
        .with_temperature(section.temperature)
        .with_max_tokens(section.max_tokens);
    if let Some(model) = &section.model {
        config = config.with_model(model.as_str());
    }
    if let Some(timeout) = section.timeout_secs {
        config = config.with_timeout(timeout);
    }
    config
}

pub fn build_generator(section: &LlmSection) -> Result<Box<dyn AnswerGenerator>> {
    match section.backend {
        LlmProvider::Ollama => {
            let endpoint = section.endpoint.as_deref().unwrap_or(OLLAMA_ENDPOINT);
            let backend = OllamaBackend::with_config(endpoint, llm_config(LlmConfig::ollama(), section))?;
            Ok(Box::new(LlmAnswerGenerator::new(backend)))
        }
        LlmProvider::Openai => {
            let api_key = match &section.api_key {
                Some(key) => key.clone(),
                None => std::env::var("OPENAI_API_KEY")
                    .context("No API key: set llm.api_key or OPENAI_API_KEY")?,
            };
            let mut backend = OpenAiBackend::with_config(&api_key, llm_config(LlmConfig::openai(), section))?;
            if let Some(endpoint) = &section.endpoint {
                backend = backend.with_endpoint(endpoint);
            }
            Ok(Box::new(LlmAnswerGenerator::new(backend)))
        }
        LlmProvider::None => Ok(Box::new(ContextEcho)),
    }
}
