//! The adapter itself: structured prompt in, validated insight lists out,
//! fixed fallback on any failure. Fallback is returned as success — callers
//! treat generated and fallback output identically at the type level.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::insights::prompts::{INSIGHTS_PROMPT_TEMPLATE, INTERVIEW_PROMPT_TEMPLATE};
use crate::llm_client::{extract_first_json_object, LlmClient};
use crate::scoring::Skills;

/// Hard cap on interview questions, generated or otherwise.
pub const MAX_QUESTIONS: usize = 8;

pub const FALLBACK_QUESTIONS: [&str; MAX_QUESTIONS] = [
    "Walk me through the architecture of your most complex project.",
    "How do you approach debugging a production issue under time pressure?",
    "Describe a time you had to learn a new technology quickly for a project.",
    "How do you balance shipping features fast vs. maintaining code quality?",
    "Explain your testing strategy — what do you test and why?",
    "How would you design a system to handle 10x the current traffic?",
    "Tell me about a time you disagreed with a technical decision. How did you handle it?",
    "What's a technical mistake you made and what did you learn from it?",
];

/// Narrative insight lists. Every list is always present and non-empty,
/// fallback-filled if necessary — downstream rendering needs no null-guards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiInsights {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub risks: Vec<String>,
    pub questions: Vec<String>,
}

impl AiInsights {
    pub fn fallback() -> Self {
        AiInsights {
            strengths: vec!["Active GitHub contributions".to_string()],
            weaknesses: vec!["Limited test coverage".to_string()],
            risks: vec!["Possible shallow project depth".to_string()],
            questions: vec!["Explain your most complex project in detail".to_string()],
        }
    }
}

/// Structured candidate data sent with the narrative insight prompt.
#[derive(Debug, Clone, Serialize)]
pub struct CandidateSnapshot {
    pub name: String,
    pub username: String,
    pub score: u32,
    pub skills: Skills,
    pub languages: Vec<String>,
    pub repo_count: u32,
    pub estimated_commit_volume: u32,
}

/// Structured candidate data sent with the interview-question prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewProfile {
    pub name: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
}

/// The insight generation seam. Both operations are total — implementations
/// must substitute fallback output rather than surface errors.
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    async fn generate_insights(&self, snapshot: &CandidateSnapshot) -> AiInsights;
    async fn generate_interview_questions(&self, profile: &InterviewProfile) -> Vec<String>;
}

/// Gemini-backed generator. A missing API key short-circuits straight to
/// fallback without attempting the call.
pub struct GeminiInsightGenerator {
    client: Option<LlmClient>,
}

impl GeminiInsightGenerator {
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: api_key.map(LlmClient::new),
        }
    }
}

#[async_trait]
impl InsightGenerator for GeminiInsightGenerator {
    async fn generate_insights(&self, snapshot: &CandidateSnapshot) -> AiInsights {
        let Some(client) = &self.client else {
            info!("No generation credential configured — using fallback insights");
            return AiInsights::fallback();
        };

        let candidate_json = match serde_json::to_string(snapshot) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize candidate snapshot: {e}");
                return AiInsights::fallback();
            }
        };
        let prompt = INSIGHTS_PROMPT_TEMPLATE.replace("{candidate_json}", &candidate_json);

        match client.generate(&prompt).await {
            Ok(text) => parse_insights(&text).unwrap_or_else(|| {
                warn!("Insight response failed validation — using fallback");
                AiInsights::fallback()
            }),
            Err(e) => {
                warn!("Insight generation failed — using fallback: {e}");
                AiInsights::fallback()
            }
        }
    }

    async fn generate_interview_questions(&self, profile: &InterviewProfile) -> Vec<String> {
        let fallback = || FALLBACK_QUESTIONS.iter().map(|q| q.to_string()).collect();

        let Some(client) = &self.client else {
            info!("No generation credential configured — using fallback questions");
            return fallback();
        };

        let candidate_json = match serde_json::to_string_pretty(profile) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize interview profile: {e}");
                return fallback();
            }
        };
        let prompt = INTERVIEW_PROMPT_TEMPLATE.replace("{candidate_json}", &candidate_json);

        match client.generate(&prompt).await {
            Ok(text) => match parse_questions(&text) {
                Some(questions) => {
                    info!("Generated {} interview questions", questions.len());
                    questions
                }
                None => {
                    warn!("Question response failed validation — using fallback");
                    fallback()
                }
            },
            Err(e) => {
                warn!("Question generation failed — using fallback: {e}");
                fallback()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct InsightsPayload {
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    weaknesses: Vec<String>,
    #[serde(default)]
    risks: Vec<String>,
    #[serde(default)]
    questions: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct QuestionsPayload {
    #[serde(default)]
    questions: Vec<String>,
}

/// Extracts and validates the insight payload from raw generator output.
/// Returns `None` (⇒ fallback) when no JSON object is present or any
/// expected list is missing/empty.
fn parse_insights(text: &str) -> Option<AiInsights> {
    let json = extract_first_json_object(text)?;
    let payload: InsightsPayload = serde_json::from_str(json).ok()?;

    if payload.strengths.is_empty()
        || payload.weaknesses.is_empty()
        || payload.risks.is_empty()
        || payload.questions.is_empty()
    {
        return None;
    }

    let mut questions = payload.questions;
    questions.truncate(MAX_QUESTIONS);

    Some(AiInsights {
        strengths: payload.strengths,
        weaknesses: payload.weaknesses,
        risks: payload.risks,
        questions,
    })
}

/// Extracts and validates the question list; capped to exactly
/// `MAX_QUESTIONS` entries when the generator returns more.
fn parse_questions(text: &str) -> Option<Vec<String>> {
    let json = extract_first_json_object(text)?;
    let payload: QuestionsPayload = serde_json::from_str(json).ok()?;

    if payload.questions.is_empty() {
        return None;
    }

    let mut questions = payload.questions;
    questions.truncate(MAX_QUESTIONS);
    Some(questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> InterviewProfile {
        InterviewProfile {
            name: "Ada".to_string(),
            skills: vec!["backend".to_string()],
            score: 72,
            strengths: vec!["ships consistently".to_string()],
            weaknesses: vec![],
        }
    }

    #[tokio::test]
    async fn test_missing_credential_short_circuits_to_fallback() {
        let generator = GeminiInsightGenerator::new(None);

        let insights = generator
            .generate_insights(&CandidateSnapshot {
                name: "Ada".to_string(),
                username: "ada".to_string(),
                score: 72,
                skills: Skills {
                    frontend: 5,
                    backend: 7,
                    dsa: 4,
                    system: 6,
                    testing: 3,
                },
                languages: vec!["Rust".to_string()],
                repo_count: 9,
                estimated_commit_volume: 120,
            })
            .await;

        assert_eq!(insights, AiInsights::fallback());

        let questions = generator.generate_interview_questions(&profile()).await;
        assert_eq!(questions.len(), MAX_QUESTIONS);
    }

    #[test]
    fn test_fallback_insights_have_every_list_populated() {
        let fallback = AiInsights::fallback();
        assert!(!fallback.strengths.is_empty());
        assert!(!fallback.weaknesses.is_empty());
        assert!(!fallback.risks.is_empty());
        assert!(!fallback.questions.is_empty());
    }

    #[test]
    fn test_parse_insights_from_prose_wrapped_json() {
        let text = r#"Here you go:
{"strengths": ["s"], "weaknesses": ["w"], "risks": ["r"], "questions": ["q"]}
Let me know if you need more."#;
        let insights = parse_insights(text).unwrap();
        assert_eq!(insights.strengths, vec!["s"]);
        assert_eq!(insights.questions, vec!["q"]);
    }

    #[test]
    fn test_parse_insights_rejects_missing_field() {
        let text = r#"{"strengths": ["s"], "weaknesses": ["w"], "risks": ["r"]}"#;
        assert!(parse_insights(text).is_none());
    }

    #[test]
    fn test_parse_insights_rejects_empty_list() {
        let text = r#"{"strengths": [], "weaknesses": ["w"], "risks": ["r"], "questions": ["q"]}"#;
        assert!(parse_insights(text).is_none());
    }

    #[test]
    fn test_parse_questions_caps_at_eight() {
        let many: Vec<String> = (0..12).map(|i| format!("\"q{i}\"")).collect();
        let text = format!("{{\"questions\": [{}]}}", many.join(","));
        let questions = parse_questions(&text).unwrap();
        assert_eq!(questions.len(), MAX_QUESTIONS);
        assert_eq!(questions[0], "q0");
    }

    #[test]
    fn test_parse_questions_rejects_plain_prose() {
        assert!(parse_questions("I would ask about their projects.").is_none());
    }
}
