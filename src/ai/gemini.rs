use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::error::RefineError;

/// Structured reason Google attaches to a rejected key.
const INVALID_KEY_REASON: &str = "API_KEY_INVALID";

/// Message fragment for the same case. Only a fallback: the wording is not a
/// documented contract and may change without notice.
const INVALID_KEY_MESSAGE: &str = "API key not valid";

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    error: GoogleError,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    #[serde(default)]
    message: String,
    status: Option<String>,
    #[serde(default)]
    details: Vec<GoogleErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorDetail {
    reason: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_base: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_base: &str, model: &str) -> Self {
        Self {
            client: Client::new(),
            api_base: api_base.trim_end_matches('/').to_string(),
            model: model.to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.gemini_api_base, &config.gemini_model)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base, self.model
        )
    }

    /// One `generateContent` call. No retry, no timeout beyond the transport's own.
    pub async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, RefineError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| classify_message(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_failure(status, &body));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| RefineError::Remote(format!("Failed to parse Gemini response: {}", e)))?;

        extract_text(body)
    }
}

fn extract_text(body: GenerateContentResponse) -> Result<String, RefineError> {
    let blocked = body.prompt_feedback.and_then(|f| f.block_reason);

    let Some(candidate) = body.candidates.into_iter().next() else {
        return Err(RefineError::Remote(match blocked {
            Some(reason) => format!("Gemini blocked the prompt ({})", reason),
            None => "Gemini returned no candidates".to_string(),
        }));
    };

    let text: String = candidate
        .content
        .unwrap_or_default()
        .parts
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    if text.is_empty() {
        return Err(RefineError::Remote(format!(
            "Gemini returned no text (finish reason: {})",
            candidate.finish_reason.as_deref().unwrap_or("unknown")
        )));
    }

    Ok(text)
}

/// Maps a non-success response onto the error taxonomy, preferring the
/// structured reason over the message text.
fn classify_failure(status: StatusCode, body: &str) -> RefineError {
    match serde_json::from_str::<GoogleErrorBody>(body) {
        Ok(parsed) => {
            let err = parsed.error;
            if err
                .details
                .iter()
                .any(|d| d.reason.as_deref() == Some(INVALID_KEY_REASON))
            {
                return RefineError::InvalidApiKey;
            }
            let label = err.status.unwrap_or_else(|| status.to_string());
            classify_message(format!("Gemini API error ({}): {}", label, err.message))
        }
        Err(_) => classify_message(format!("Gemini API error ({}): {}", status, body)),
    }
}

fn classify_message(message: String) -> RefineError {
    if message.contains(INVALID_KEY_MESSAGE) {
        RefineError::InvalidApiKey
    } else {
        RefineError::Remote(message)
    }
}
