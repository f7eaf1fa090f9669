// All LLM prompt constants for the insights module.

/// Narrative insight prompt template. Replace `{candidate_json}` before sending.
pub const INSIGHTS_PROMPT_TEMPLATE: &str = r#"You are an AI hiring intelligence system.

Based on this candidate data:
{candidate_json}

Return ONLY valid JSON in this exact format (no extra fields, no prose):

{
  "strengths": ["..."],
  "weaknesses": ["..."],
  "risks": ["..."],
  "questions": ["..."]
}

Every list must contain at least one entry. Ground every claim in the data
provided — do not invent repositories, employers, or metrics."#;

/// Interview question prompt template. Replace `{candidate_json}` before sending.
pub const INTERVIEW_PROMPT_TEMPLATE: &str = r#"You are a senior engineering interviewer at a top tech company.

Generate exactly 8 personalized interview questions for this candidate.

Candidate data:
{candidate_json}

Rules:
- Mix technical, project-based, and system design questions
- Tailor questions to the candidate's skills and weaknesses
- Questions should probe depth, not just surface knowledge
- Be specific — reference their actual skills where possible

Return ONLY valid JSON in this exact format:
{ "questions": ["question1", "question2", ...] }"#;
