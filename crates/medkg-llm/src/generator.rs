//! Answer generation over an LLM backend.
//!
//! Generation never fails from the caller's point of view: backend errors
//! and empty completions are logged and replaced by a fixed apology.

use crate::backend::{LlmBackend, LlmResult};
use crate::prompt::{MedicalAnswerPrompt, PromptTemplate};
use async_trait::async_trait;

/// Returned when the backend could not produce an answer.
pub const GENERATION_FAILED: &str = "抱歉，生成答案时遇到了技术问题。";

/// (question, context) → answer text.
#[async_trait]
pub trait AnswerGenerator: Send + Sync {
    async fn generate(&self, query: &str, context: &str) -> String;
}

/// Generator that prompts an LLM backend with the medical answer prompt.
pub struct LlmAnswerGenerator<B: LlmBackend> {
    backend: B,
}

impl<B: LlmBackend> LlmAnswerGenerator<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Like [`AnswerGenerator::generate`] but surfaces backend errors.
    pub async fn try_generate(&self, query: &str, context: &str) -> LlmResult<String> {
        let prompt = MedicalAnswerPrompt::new(query, context);
        let system = prompt.system_prompt();
        tracing::debug!(backend = self.backend.name(), model = %self.backend.config().model, "generating answer");
        let answer = self.backend.complete(&prompt.generate(), system.as_deref()).await?;
        Ok(answer.trim().to_string())
    }
}

#[async_trait]
impl<B: LlmBackend> AnswerGenerator for LlmAnswerGenerator<B> {
    async fn generate(&self, query: &str, context: &str) -> String {
        match self.try_generate(query, context).await {
            Ok(answer) if !answer.is_empty() => answer,
            Ok(_) => {
                tracing::warn!(backend = self.backend.name(), "backend returned an empty answer");
                GENERATION_FAILED.to_string()
            }
            Err(err) => {
                tracing::error!(backend = self.backend.name(), error = %err, "answer generation failed");
                GENERATION_FAILED.to_string()
            }
        }
    }
}

/// Generator that hands back the knowledge-graph context unchanged. Used when
/// no LLM backend is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct ContextEcho;

#[async_trait]
impl AnswerGenerator for ContextEcho {
    async fn generate(&self, _query: &str, context: &str) -> String {
        context.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MockBackend;
    use crate::prompt::DISCLAIMER;

    #[tokio::test]
    async fn answer_comes_from_the_backend() {
        let generator = LlmAnswerGenerator::new(
            MockBackend::new().with_response("主要症状", "  高血压常见头晕、乏力。  "),
        );
        let answer = generator.generate("高血压有什么症状", "主要症状：头晕 、乏力").await;
        assert_eq!(answer, "高血压常见头晕、乏力。");

        let prompts = generator.backend().prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains(DISCLAIMER));
    }

    #[tokio::test]
    async fn backend_errors_become_the_apology() {
        let generator = LlmAnswerGenerator::new(MockBackend::failing("model crashed"));
        assert_eq!(generator.generate("q", "c").await, GENERATION_FAILED);
        assert!(generator.try_generate("q", "c").await.is_err());
    }

    #[tokio::test]
    async fn empty_answers_become_the_apology() {
        let generator = LlmAnswerGenerator::new(MockBackend::new().with_response("q", "   "));
        assert_eq!(generator.generate("q", "c").await, GENERATION_FAILED);
    }

    #[tokio::test]
    async fn echo_returns_context() {
        assert_eq!(ContextEcho.generate("q", "忌食：辣椒").await, "忌食：辣椒");
    }
}
