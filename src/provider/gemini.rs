use serde::Deserialize;
use serde_json::{Value, json};

use crate::provider::ProviderError;
use crate::provider::image::EssayImage;

#[cfg(feature = "network")]
pub use backend::GeminiBackend;

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

pub fn endpoint(base_url: &str, model: &str) -> String {
    format!(
        "{}/models/{}:generateContent",
        base_url.trim_end_matches('/'),
        model
    )
}

pub fn json_request(prompt: &str, schema: &Value, temperature: f32) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
        "generationConfig": {
            "responseMimeType": "application/json",
            "responseSchema": schema,
            "temperature": temperature,
        }
    })
}

pub fn text_request(prompt: &str) -> Value {
    json!({
        "contents": [{ "parts": [{ "text": prompt }] }]
    })
}

pub fn image_request(prompt: &str, image: &EssayImage) -> Value {
    json!({
        "contents": [{
            "parts": [
                { "inlineData": { "mimeType": image.mime_type, "data": image.data } },
                { "text": prompt }
            ]
        }]
    })
}

/// Concatenate the text parts of the first candidate.
pub fn extract_text(body: &str) -> Result<String, ProviderError> {
    let response: GenerateResponse = serde_json::from_str(body)?;
    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    if text.trim().is_empty() {
        Err(ProviderError::EmptyResponse)
    } else {
        Ok(text)
    }
}

#[cfg(feature = "network")]
mod backend {
    use std::time::Duration;

    use serde_json::Value;
    use tracing::debug;

    use super::{endpoint, extract_text, image_request, json_request, text_request};
    use crate::config::Config;
    use crate::provider::image::EssayImage;
    use crate::provider::{AiBackend, ProviderError};

    pub struct GeminiBackend {
        client: reqwest::blocking::Client,
        endpoint: String,
        api_key: String,
    }

    impl GeminiBackend {
        pub fn new(config: &Config, api_key: String) -> Result<Self, ProviderError> {
            let client = reqwest::blocking::Client::builder()
                .timeout(Duration::from_secs(config.request_timeout_secs))
                .build()?;
            Ok(Self {
                client,
                endpoint: endpoint(&config.api_base_url, &config.model),
                api_key,
            })
        }

        fn post(&self, body: &Value) -> Result<String, ProviderError> {
            debug!(endpoint = %self.endpoint, "calling generateContent");
            let response = self
                .client
                .post(&self.endpoint)
                .header("x-goog-api-key", &self.api_key)
                .json(body)
                .send()?;
            let status = response.status();
            let text = response.text()?;
            if !status.is_success() {
                return Err(ProviderError::Status {
                    status: status.as_u16(),
                    body: text,
                });
            }
            extract_text(&text)
        }
    }

    impl AiBackend for GeminiBackend {
        fn generate_json(
            &self,
            prompt: &str,
            schema: &Value,
            temperature: f32,
        ) -> Result<String, ProviderError> {
            self.post(&json_request(prompt, schema, temperature))
        }

        fn generate_text(&self, prompt: &str) -> Result<String, ProviderError> {
            self.post(&text_request(prompt))
        }

        fn generate_with_image(
            &self,
            prompt: &str,
            image: &EssayImage,
        ) -> Result<String, ProviderError> {
            self.post(&image_request(prompt, image))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_joins_parts_of_first_candidate() {
        let body = r#"{"candidates":[
            {"content":{"parts":[{"text":"Olá, "},{"text":"mundo"}]}},
            {"content":{"parts":[{"text":"ignorado"}]}}
        ]}"#;
        assert_eq!(extract_text(body).unwrap(), "Olá, mundo");
    }

    #[test]
    fn test_extract_text_without_candidates_is_empty_response() {
        assert!(matches!(
            extract_text(r#"{"candidates":[]}"#),
            Err(ProviderError::EmptyResponse)
        ));
        assert!(matches!(
            extract_text(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#),
            Err(ProviderError::EmptyResponse)
        ));
    }

    #[test]
    fn test_extract_text_rejects_non_json() {
        assert!(matches!(extract_text("<html>"), Err(ProviderError::Json(_))));
    }

    #[test]
    fn test_endpoint_joins_model() {
        assert_eq!(
            endpoint("https://example.test/v1beta/", "gemini-2.5-flash"),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_json_request_carries_schema_and_temperature() {
        let body = json_request("p", &json!({"type": "OBJECT"}), 0.5);
        let config = &body["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["responseSchema"]["type"], "OBJECT");
        assert_eq!(config["temperature"], 0.5);
        assert_eq!(body["contents"][0]["parts"][0]["text"], "p");
    }

    #[test]
    fn test_image_request_inlines_data_before_prompt() {
        let image = EssayImage {
            mime_type: "image/png".into(),
            data: "aGVsbG8=".into(),
        };
        let body = image_request("corrija", &image);
        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], "aGVsbG8=");
        assert_eq!(parts[1]["text"], "corrija");
    }
}
