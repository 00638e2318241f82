//! # MedKG LLM
//!
//! Answer generation from knowledge-graph context.
//!
//! The retrieval pipeline produces a context string; this crate turns
//! (question, context) into a patient-facing answer through an LLM backend,
//! using a prompt that pins the model to the supplied facts and appends a
//! medical disclaimer.
//!
//! ## Features
//!
//! - `api`: OpenAI-compatible chat completion backends
//! - `local`: Local backends (Ollama)
//! - `full`: All backends
//!
//! ## Usage
//!
//! ```rust,ignore
//! use medkg_llm::{AnswerGenerator, LlmAnswerGenerator, OllamaBackend};
//!
//! let generator = LlmAnswerGenerator::new(OllamaBackend::localhost()?);
//! let answer = generator.generate("高血压有什么症状", "主要症状：头晕 、乏力").await;
//! ```

mod backend;
mod generator;
mod prompt;

pub use backend::{LlmBackend, LlmConfig, LlmError, LlmResult, MockBackend};
pub use generator::{AnswerGenerator, ContextEcho, LlmAnswerGenerator, GENERATION_FAILED};
pub use prompt::{MedicalAnswerPrompt, PromptTemplate, DISCLAIMER};

#[cfg(feature = "local")]
mod ollama;
#[cfg(feature = "local")]
pub use ollama::OllamaBackend;

#[cfg(feature = "api")]
mod openai;
#[cfg(feature = "api")]
pub use openai::OpenAiBackend;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{AnswerGenerator, ContextEcho, LlmAnswerGenerator};
    pub use crate::{LlmBackend, LlmConfig, LlmError, LlmResult};
    pub use crate::{MedicalAnswerPrompt, PromptTemplate};

    #[cfg(feature = "local")]
    pub use crate::OllamaBackend;

    #[cfg(feature = "api")]
    pub use crate::OpenAiBackend;
}
