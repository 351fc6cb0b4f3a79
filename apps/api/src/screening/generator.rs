//! Question generation seam. `ScreeningSession` only sees the `QuestionGenerator`
//! trait; `LlmClient` is the production backend.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::llm_client::{extract_json_object, strip_json_fences, LlmClient, LlmError};
use crate::screening::questions::{QuestionSet, MAX_QUESTIONS_PER_TECH};

#[async_trait]
pub trait QuestionGenerator: Send + Sync {
    async fn generate_greeting(&self) -> Result<String, LlmError>;

    /// Best-effort: malformed model output yields an empty or partial set, not an error.
    async fn generate_questions(
        &self,
        techs: &[String],
        cap_total: usize,
    ) -> Result<QuestionSet, LlmError>;
}

#[async_trait]
impl QuestionGenerator for LlmClient {
    async fn generate_greeting(&self) -> Result<String, LlmError> {
        self.greeting().await
    }

    async fn generate_questions(
        &self,
        techs: &[String],
        cap_total: usize,
    ) -> Result<QuestionSet, LlmError> {
        let raw = self.question_json(techs, cap_total).await?;
        let set = parse_question_set(&raw, cap_total);
        if set.is_empty() {
            warn!("Model returned no usable questions for {:?}", techs);
            return Ok(set);
        }
        debug!(
            "Parsed {} questions for {} of {} technologies",
            set.total_questions(),
            set.len(),
            techs.len()
        );
        Ok(set)
    }
}

/// Parses a `{"tech": ["q", ...]}` completion.
///
/// Accepts fenced JSON or JSON embedded in prose. Anything unparseable yields an
/// empty set. Non-list values, non-string items and blank questions are ignored;
/// each list keeps at most `MAX_QUESTIONS_PER_TECH`, and the whole set at most
/// `cap_total`. Technologies left without questions are dropped.
pub fn parse_question_set(raw: &str, cap_total: usize) -> QuestionSet {
    let Some(Value::Object(map)) = parse_loose_json(raw) else {
        return QuestionSet::default();
    };

    let mut set = QuestionSet::default();
    let mut remaining = cap_total;

    for (tech, value) in map {
        if remaining == 0 {
            break;
        }
        let tech = tech.trim();
        let Value::Array(items) = value else {
            continue;
        };
        if tech.is_empty() {
            continue;
        }

        let questions: Vec<String> = items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .take(MAX_QUESTIONS_PER_TECH.min(remaining))
            .map(str::to_string)
            .collect();

        if questions.is_empty() {
            continue;
        }
        remaining -= questions.len();
        set.insert(tech, questions);
    }

    set
}

fn parse_loose_json(raw: &str) -> Option<Value> {
    let text = strip_json_fences(raw);
    serde_json::from_str(text).ok().or_else(|| {
        extract_json_object(text).and_then(|object| serde_json::from_str(object).ok())
    })
}
