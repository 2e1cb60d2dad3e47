//! Question generation — the optional collaborator that supplies a question
//! when the fixed bank cannot. All LLM calls go through llm_client.
//!
//! The contract is two-branch: a generator returns a question or
//! `Unavailable`, and the session state machine recovers from `Unavailable`
//! with the static fallback question. Generation failures never reach a
//! caller.

pub mod prompts;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::llm_client::LlmClient;
use crate::models::question::{GeneratedQuestion, QuestionCategory};

/// Signalled when the collaborator cannot produce a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unavailable;

/// What the generator is told about the session when asked for a question.
#[derive(Debug, Clone, Copy)]
pub struct GenerationContext {
    pub questions_asked: usize,
    pub technical_asked: usize,
    pub soft_asked: usize,
}

impl GenerationContext {
    /// Keeps the interview balanced: lean technical while technical
    /// questions trail soft ones.
    pub fn next_category(&self) -> QuestionCategory {
        if self.technical_asked < self.soft_asked {
            QuestionCategory::Technical
        } else {
            QuestionCategory::Soft
        }
    }
}

#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate(&self, ctx: &GenerationContext) -> Result<GeneratedQuestion, Unavailable>;
}

/// Shape the model is asked to return. Category and keywords are optional;
/// missing values fall back to what the context already decided.
#[derive(Debug, Deserialize)]
struct QuestionDraft {
    text: String,
    #[serde(default)]
    category: Option<QuestionCategory>,
    #[serde(default)]
    keywords: Vec<String>,
}

/// LLM-backed generator. Every failure (HTTP, rate limit, bad JSON) maps to
/// `Unavailable` after a warning; callers only ever see the two branches.
pub struct LlmQuestionGenerator {
    llm: LlmClient,
}

impl LlmQuestionGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }
}

#[async_trait]
impl QuestionGenerator for LlmQuestionGenerator {
    async fn generate(&self, ctx: &GenerationContext) -> Result<GeneratedQuestion, Unavailable> {
        let category = ctx.next_category();
        let prompt = prompts::build_question_prompt(category, ctx.questions_asked);

        let draft: QuestionDraft = self
            .llm
            .call_json(&prompt, prompts::SYSTEM)
            .await
            .map_err(|e| {
                warn!("question generation failed: {e}");
                Unavailable
            })?;

        let keywords = if draft.keywords.is_empty() {
            vec![
                "experience".to_string(),
                "team".to_string(),
                "work".to_string(),
            ]
        } else {
            draft.keywords
        };

        Ok(GeneratedQuestion {
            id: format!(
                "gen_q_{}_{}",
                ctx.questions_asked + 1,
                Uuid::new_v4().simple()
            ),
            text: draft.text,
            category: draft.category.unwrap_or(category),
            keywords,
        })
    }
}

/// Deterministic fallback issued when generation is unavailable.
pub fn fallback_question() -> GeneratedQuestion {
    GeneratedQuestion {
        id: "fallback_q_1".to_string(),
        text: "Tell us about a project you are proud of and the part you played in it."
            .to_string(),
        category: QuestionCategory::Soft,
        keywords: vec![
            "project".to_string(),
            "role".to_string(),
            "result".to_string(),
            "team".to_string(),
        ],
    }
}
