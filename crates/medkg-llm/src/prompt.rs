//! Prompt templates for answer generation.

/// Closing line every answer must carry.
pub const DISCLAIMER: &str = "我只是一个语言模型，具体情况请您咨询医生，提供的方案仅供参考。";

/// A prompt template for LLM requests.
pub trait PromptTemplate {
    /// Generate the prompt text.
    fn generate(&self) -> String;

    /// Get the system prompt (if any).
    fn system_prompt(&self) -> Option<String> {
        None
    }
}

/// Prompt that asks for an answer grounded in knowledge-graph context.
#[derive(Debug, Clone)]
pub struct MedicalAnswerPrompt {
    pub query: String,
    pub context: String,
}

impl MedicalAnswerPrompt {
    pub fn new(query: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            context: context.into(),
        }
    }
}

impl PromptTemplate for MedicalAnswerPrompt {
    fn system_prompt(&self) -> Option<String> {
        Some("你是一名专业医学助手。".to_string())
    }

    fn generate(&self) -> String {
        format!(
            r#"你是一名专业医学助手。请严格遵循以下规则作答：
- 若[知识库信息]中包含与问题直接相关的内容，必须严格依据其内容回答，不要编造或引入未提供的事实。
- 若知识库信息不足或不相关，请明确说明“我未在知识库中找到足够的信息”，必要时仅给出谨慎的通用性建议。
- 回答应准确、简洁、可执行，可按要点分条说明。
- 回答结尾必须追加：{DISCLAIMER}

[知识库信息]
{context}

[用户提问]
{query}

[你的回答]
"#,
            context = self.context,
            query = self.query,
        )
    }
}
