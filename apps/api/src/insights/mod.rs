// Insight Generator Adapter.
// Wraps the text-generation service behind a total interface: callers always
// get well-shaped insight lists, whether they came from the generator or
// from the fixed fallback set. All generative calls go through llm_client.

pub mod generator;
pub mod prompts;

pub use generator::{
    AiInsights, CandidateSnapshot, GeminiInsightGenerator, InsightGenerator, InterviewProfile,
};
