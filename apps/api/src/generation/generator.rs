//! Content Generation — the four façade operations the browser client calls.
//!
//! Flow per operation: system prompt + profile-derived user prompt → LlmClient::call
//! → type-specific validation → content. Any `LlmError` is matched at this boundary
//! and replaced by the matching fallback generator. These functions never fail.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::generation::fallback::{
    fallback_cover_letter, fallback_interview_questions, fallback_market_insights,
    fallback_resume,
};
use crate::generation::prompts::{
    cover_letter_prompt, interview_prompt, market_insights_prompt, resume_prompt,
    COVER_LETTER_SYSTEM, INTERVIEW_SYSTEM, MARKET_INSIGHTS_SYSTEM, RESUME_SYSTEM,
};
use crate::llm_client::validate::parse_json_array;
use crate::llm_client::{LlmClient, LlmError, Message};
use crate::models::profile::UserProfile;

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// One interview question with a suggested answer.
///
/// Fields default to empty so loosely-shaped live output still deserializes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterviewQaPair {
    pub question: String,
    pub answer: String,
}

impl InterviewQaPair {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Where a piece of generated content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    Live,
    Fallback,
}

/// Display-ready content plus its provenance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Generated {
    pub content: String,
    pub source: ContentSource,
}

impl Generated {
    fn live(content: String) -> Self {
        Self {
            content,
            source: ContentSource::Live,
        }
    }

    fn fallback(content: String) -> Self {
        Self {
            content,
            source: ContentSource::Fallback,
        }
    }

    #[cfg(test)]
    pub fn is_fallback(&self) -> bool {
        self.source == ContentSource::Fallback
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Façade
// ────────────────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct ContentGenerator {
    llm: LlmClient,
}

impl ContentGenerator {
    pub fn new(llm: LlmClient) -> Self {
        Self { llm }
    }

    /// Markdown resume for the profile's target role.
    pub async fn resume(&self, profile: &UserProfile) -> Generated {
        let messages = [
            Message::system(RESUME_SYSTEM),
            Message::user(resume_prompt(profile)),
        ];
        let result = self.llm.call(&messages, false).await;
        settle("resume", result, || fallback_resume(profile))
    }

    pub async fn cover_letter(&self, profile: &UserProfile, job_description: &str) -> Generated {
        let messages = [
            Message::system(COVER_LETTER_SYSTEM),
            Message::user(cover_letter_prompt(profile, job_description)),
        ];
        let result = self.llm.call(&messages, false).await;
        settle("cover letter", result, || fallback_cover_letter(profile))
    }

    /// JSON array text of `{question, answer}` objects.
    ///
    /// A transport success whose extracted array is empty or unparseable still
    /// falls back: the caller always receives a non-empty array.
    pub async fn interview_questions(&self, profile: &UserProfile) -> Generated {
        let messages = [
            Message::system(INTERVIEW_SYSTEM),
            Message::user(interview_prompt(profile)),
        ];
        let result = self
            .llm
            .call(&messages, true)
            .await
            .and_then(|text| parse_json_array(&text).map(str::to_string));
        settle("interview questions", result, || {
            fallback_interview_questions(profile)
        })
    }

    pub async fn market_insights(&self, profile: &UserProfile) -> Generated {
        let messages = [
            Message::system(MARKET_INSIGHTS_SYSTEM),
            Message::user(market_insights_prompt(profile)),
        ];
        let result = self.llm.call(&messages, false).await;
        settle("market insights", result, || fallback_market_insights(profile))
    }
}

fn settle(
    kind: &str,
    result: Result<String, LlmError>,
    fallback: impl FnOnce() -> String,
) -> Generated {
    match result {
        Ok(content) => {
            info!("Generated {kind} ({} chars)", content.len());
            Generated::live(content)
        }
        Err(e) if e.is_transport() => {
            warn!("Upstream unavailable for {kind}, using template: {e}");
            Generated::fallback(fallback())
        }
        Err(e) => {
            warn!("Unusable {kind} output, using template: {e}");
            Generated::fallback(fallback())
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
