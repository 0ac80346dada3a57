// Content generation: resume, cover letter, interview questions, market insights.
// All LLM calls go through llm_client; every operation has a template fallback.

pub mod fallback;
pub mod generator;
pub mod handlers;
pub mod prompts;
