/// LLM Client — the single point of entry for all model calls in TalentScout.
///
/// ARCHITECTURAL RULE: No other module may call the model server directly.
/// All LLM interactions MUST go through this module.
///
/// Talks to an Ollama-compatible `/api/generate` endpoint. Chat turns are
/// flattened into a single `ROLE: content` prompt ending in `ASSISTANT:`.
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

use prompts::{GREETING_INSTRUCTION, QUESTION_JSON_PROMPT_TEMPLATE, SYSTEM_PROMPT};

const GENERATE_PATH: &str = "/api/generate";
const TEMPERATURE: f32 = 0.2;
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,

    #[error("LLM call timed out after {0:?}")]
    Timeout(Duration),
}

/// One chat turn prior to flattening.
#[derive(Debug, Clone, Copy)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
    #[serde(default)]
    pub prompt_eval_count: Option<u32>,
    #[serde(default)]
    pub eval_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OllamaError {
    error: String,
}

/// The single LLM client used by the screening flow.
/// Wraps the generate API with retry logic and prompt helpers.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    base_url: String,
    model: String,
}

impl LlmClient {
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Makes a raw generate call, returning the full response object.
    /// Retries on 429 (rate limit), 5xx and transport errors with exponential backoff.
    pub async fn call(&self, prompt: &str) -> Result<GenerateResponse, LlmError> {
        let request_body = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: TEMPERATURE,
            },
        };
        let url = format!("{}{}", self.base_url, GENERATE_PATH);

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = match self.client.post(&url).json(&request_body).send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<OllamaError>(&body)
                    .map(|e| e.error)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let generated: GenerateResponse = response.json().await?;

            debug!(
                "LLM call succeeded: prompt_tokens={:?}, output_tokens={:?}",
                generated.prompt_eval_count, generated.eval_count
            );

            return Ok(generated);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }

    /// Flattens the conversation into one prompt and returns the trimmed completion.
    pub async fn chat(&self, messages: &[ChatMessage<'_>]) -> Result<String, LlmError> {
        let prompt = flatten_messages(messages);
        let response = self.call(&prompt).await?;
        Ok(response.response.trim().to_string())
    }

    /// Short greeting explaining the assistant's purpose.
    pub async fn greeting(&self) -> Result<String, LlmError> {
        let text = self
            .chat(&[
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: GREETING_INSTRUCTION,
                },
            ])
            .await?;

        if text.is_empty() {
            return Err(LlmError::EmptyContent);
        }
        Ok(text)
    }

    /// Asks for a JSON object mapping each technology to interview questions.
    /// Returns the raw completion; callers decide how tolerant to be when parsing it.
    pub async fn question_json(&self, techs: &[String], cap_total: usize) -> Result<String, LlmError> {
        let tech_csv = techs
            .iter()
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        let prompt = QUESTION_JSON_PROMPT_TEMPLATE
            .replace("{tech_csv}", &tech_csv)
            .replace("{cap_total}", &cap_total.to_string());

        self.chat(&[
            ChatMessage {
                role: "system",
                content: SYSTEM_PROMPT,
            },
            ChatMessage {
                role: "user",
                content: &prompt,
            },
        ])
        .await
    }
}

fn flatten_messages(messages: &[ChatMessage<'_>]) -> String {
    let mut prompt = String::new();
    for message in messages {
        prompt.push_str(&message.role.to_uppercase());
        prompt.push_str(": ");
        prompt.push_str(message.content);
        prompt.push('\n');
    }
    prompt.push_str("ASSISTANT:");
    prompt
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

/// Returns the span from the first `{` to the last `}`, for completions that
/// wrap the JSON object in prose.
pub fn extract_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> LlmClient {
        LlmClient::new(&server.uri(), "llama3.2", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_extract_json_object_from_prose() {
        let input = "Sure! Here you go:\n{\"Rust\": [\"q\"]}\nGood luck.";
        assert_eq!(extract_json_object(input), Some("{\"Rust\": [\"q\"]}"));
    }

    #[test]
    fn test_extract_json_object_spans_nested_braces() {
        let input = "x {\"a\": {\"b\": 1}} y";
        assert_eq!(extract_json_object(input), Some("{\"a\": {\"b\": 1}}"));
    }

    #[test]
    fn test_extract_json_object_none_without_braces() {
        assert_eq!(extract_json_object("no json here"), None);
        assert_eq!(extract_json_object("} backwards {"), None);
    }

    #[test]
    fn test_flatten_messages_uppercases_roles() {
        let prompt = flatten_messages(&[
            ChatMessage {
                role: "system",
                content: "be brief",
            },
            ChatMessage {
                role: "user",
                content: "hi",
            },
        ]);
        assert_eq!(prompt, "SYSTEM: be brief\nUSER: hi\nASSISTANT:");
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let client =
            LlmClient::new("http://localhost:11434/", "llama3.2", Duration::from_secs(1)).unwrap();
        assert_eq!(client.base_url, "http://localhost:11434");
        assert_eq!(client.model(), "llama3.2");
    }

    #[tokio::test]
    async fn test_greeting_returns_trimmed_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .and(body_partial_json(serde_json::json!({
                "model": "llama3.2",
                "stream": false
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "response": "  Hello! I screen candidates.  ",
                "eval_count": 7
            })))
            .mount(&server)
            .await;

        let greeting = client_for(&server).greeting().await.unwrap();
        assert_eq!(greeting, "Hello! I screen candidates.");
    }

    #[tokio::test]
    async fn test_greeting_empty_response_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "response": "   " })),
            )
            .mount(&server)
            .await;

        let err = client_for(&server).greeting().await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyContent));
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({ "error": "model 'llama3.2' not found" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let err = client_for(&server).call("hi").await.unwrap_err();
        match err {
            LlmError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "model 'llama3.2' not found");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_server_error_exhausts_retries() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
            .expect(3)
            .mount(&server)
            .await;

        let err = client_for(&server).call("hi").await.unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_question_json_sends_tech_list() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "response": "{\"Rust\": [\"What is ownership?\"]}"
            })))
            .mount(&server)
            .await;

        let techs = vec!["Rust".to_string(), "  ".to_string()];
        let raw = client_for(&server).question_json(&techs, 15).await.unwrap();
        assert_eq!(raw, "{\"Rust\": [\"What is ownership?\"]}");

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
        let prompt = body["prompt"].as_str().unwrap();
        assert!(prompt.contains("Given a list of technologies: Rust\n"));
        assert!(prompt.contains("must be <= 15"));
        assert!(prompt.ends_with("ASSISTANT:"));
    }
}
