//! Gemini generation client
//!
//! One call in, one completion out. The prompt is opaque to this module and
//! the response text is passed through unmodified.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde::Serialize;
use tracing::debug;

use crate::errors::Result;
use crate::errors::ViviRagError;

/// Client for the Gemini `generateContent` API.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    /// Create a new client.
    ///
    /// # Errors
    /// - HTTP client build errors (invalid configuration)
    pub fn new(api_key: String, model: String, endpoint: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| ViviRagError::Http(e.to_string()))?;

        Ok(Self {
            client,
            api_key,
            model,
            endpoint,
        })
    }

    /// Send a single text prompt and return the completion text.
    ///
    /// The API key travels in a request header, never in the URL, so it
    /// cannot leak through request logging.
    pub async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        );
        debug!("Calling Gemini API: {url} ({} prompt chars)", prompt.chars().count());

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ViviRagError::Http(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ViviRagError::Generation(format!(
                "Gemini API error ({status}): {error_text}"
            )));
        }

        let result: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ViviRagError::Generation(format!("Failed to parse response: {e}")))?;

        let text: String = result
            .candidates
            .into_iter()
            .next()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .into_iter()
                    .map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.is_empty() {
            return Err(ViviRagError::Generation(
                "No candidates in response".to_string(),
            ));
        }

        Ok(text)
    }
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Content,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_parts_are_concatenated() {
        let body = r#"{
            "candidates": [
                {
                    "content": {
                        "role": "model",
                        "parts": [{"text": "Vamos ao que interessa..."}, {"text": " Tudo certo."}]
                    }
                }
            ]
        }"#;

        let response: GenerateResponse = serde_json::from_str(body).unwrap();
        let text: String = response
            .candidates
            .into_iter()
            .next()
            .map(|c| c.content.parts.into_iter().map(|p| p.text).collect::<Vec<_>>().join(""))
            .unwrap_or_default();

        assert_eq!(text, "Vamos ao que interessa... Tudo certo.");
    }

    #[test]
    fn request_body_matches_the_generate_content_shape() {
        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: "pergunta".to_string(),
                }],
            }],
        };
        let json = serde_json::to_string(&request).unwrap();
        assert_eq!(json, r#"{"contents":[{"parts":[{"text":"pergunta"}]}]}"#);
    }
}
