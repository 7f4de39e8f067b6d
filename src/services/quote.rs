//! Motivational quotes from the Gemini `generateContent` API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use super::ServiceError;
use crate::clock::TimeOfDay;
use crate::config::ServiceConfig;
use crate::types::QuoteData;

/// Used when the model omits a field.
const DEFAULT_TEXT: &str = "Time creates all things.";
const DEFAULT_AUTHOR: &str = "Chronos";

/// Used when the request fails.
const FALLBACK_TEXT: &str = "The future depends on what you do today.";
const FALLBACK_AUTHOR: &str = "Mahatma Gandhi";

/// Source of short quotes tailored to the time of day and weather.
#[allow(async_fn_in_trait)]
pub trait QuoteProvider {
    async fn quote(&self, time_of_day: TimeOfDay, weather: &str)
        -> Result<QuoteData, ServiceError>;
}

/// Quote shown when the provider fails.
pub fn fallback_quote() -> QuoteData {
    QuoteData::new(FALLBACK_TEXT, FALLBACK_AUTHOR)
}

/// Builds the generation prompt.
pub fn quote_prompt(time_of_day: TimeOfDay, weather: &str) -> String {
    format!(
        "Generate a short, inspiring motivational quote for someone. \
         Context: It is currently {} and the weather is {}. \
         Keep it under 30 words. Be unique.",
        time_of_day.as_str(),
        weather
    )
}

// ============================================================================
// Response shapes
// ============================================================================

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteBody {
    text: Option<String>,
    author: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, if any.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|part| part.text.as_deref())
            .collect();
        (!text.is_empty()).then_some(text)
    }
}

/// Parses the model's JSON answer. Missing or empty fields take defaults;
/// an empty answer counts as `{}`.
fn parse_quote(text: Option<&str>) -> Result<QuoteData, ServiceError> {
    let body: QuoteBody = match text {
        Some(text) => serde_json::from_str(text)
            .map_err(|e| ServiceError::InvalidResponse(format!("quote is not JSON: {}", e)))?,
        None => QuoteBody::default(),
    };

    let pick = |value: Option<String>, default: &str| {
        value
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string())
    };
    Ok(QuoteData::new(
        pick(body.text, DEFAULT_TEXT),
        pick(body.author, DEFAULT_AUTHOR),
    ))
}

// ============================================================================
// GeminiQuoteClient
// ============================================================================

/// Gemini REST client asking for a `{text, author}` JSON object.
#[derive(Debug, Clone)]
pub struct GeminiQuoteClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl GeminiQuoteClient {
    /// Creates a client for `base_url`
    /// (e.g. `https://generativelanguage.googleapis.com`).
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, ServiceError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key,
        })
    }

    /// Creates a client from the service configuration, reading the API key
    /// from the environment.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, ServiceError> {
        Self::new(
            config.quote_url.clone(),
            config.quote_model.clone(),
            config.api_key(),
            Duration::from_secs(config.timeout_seconds),
        )
    }

    fn request_body(prompt: &str) -> serde_json::Value {
        json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "text": { "type": "STRING" },
                        "author": {
                            "type": "STRING",
                            "description": "A generated name or 'Unknown'"
                        }
                    },
                    "required": ["text", "author"]
                }
            }
        })
    }
}

impl QuoteProvider for GeminiQuoteClient {
    async fn quote(
        &self,
        time_of_day: TimeOfDay,
        weather: &str,
    ) -> Result<QuoteData, ServiceError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| ServiceError::MissingApiKey("set the configured key variable".into()))?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        debug!("Requesting quote from model {}", self.model);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&Self::request_body(&quote_prompt(time_of_day, weather)))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ServiceError::Status {
                service: "gemini",
                status: response.status().as_u16(),
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))?;
        parse_quote(body.text().as_deref())
    }
}

/// Fetches a quote, substituting [`fallback_quote`] on failure.
pub async fn fetch_quote_or_fallback<P: QuoteProvider>(
    provider: &P,
    time_of_day: TimeOfDay,
    weather: &str,
) -> QuoteData {
    match provider.quote(time_of_day, weather).await {
        Ok(quote) => quote,
        Err(e) => {
            warn!("Failed to generate quote, using fallback: {}", e);
            fallback_quote()
        }
    }
}

// ============================================================================
// Mock Implementation (for testing)
// ============================================================================

/// Quote provider returning a fixed result and recording its inputs.
#[derive(Debug)]
pub struct MockQuoteProvider {
    result: Option<QuoteData>,
    calls: AtomicUsize,
    last_context: Mutex<Option<(TimeOfDay, String)>>,
}

impl MockQuoteProvider {
    pub fn returning(quote: QuoteData) -> Self {
        Self {
            result: Some(quote),
            calls: AtomicUsize::new(0),
            last_context: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            result: None,
            calls: AtomicUsize::new(0),
            last_context: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Time of day and weather description of the last request.
    pub fn last_context(&self) -> Option<(TimeOfDay, String)> {
        self.last_context
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or(None)
    }
}

impl QuoteProvider for MockQuoteProvider {
    async fn quote(
        &self,
        time_of_day: TimeOfDay,
        weather: &str,
    ) -> Result<QuoteData, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_context.lock() {
            *last = Some((time_of_day, weather.to_string()));
        }
        self.result
            .clone()
            .ok_or_else(|| ServiceError::InvalidResponse("mock failure".into()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod parse_tests {
        use super::*;

        #[test]
        fn test_full_answer() {
            let quote = parse_quote(Some(r#"{"text":"Rain feeds roots.","author":"Ada"}"#)).unwrap();
            assert_eq!(quote, QuoteData::new("Rain feeds roots.", "Ada"));
        }

        #[test]
        fn test_missing_fields_take_defaults() {
            let quote = parse_quote(Some(r#"{"text":"Only text"}"#)).unwrap();
            assert_eq!(quote.author, "Chronos");

            let quote = parse_quote(Some("{}")).unwrap();
            assert_eq!(quote, QuoteData::new("Time creates all things.", "Chronos"));
        }

        #[test]
        fn test_empty_strings_take_defaults() {
            let quote = parse_quote(Some(r#"{"text":"","author":""}"#)).unwrap();
            assert_eq!(quote, QuoteData::new("Time creates all things.", "Chronos"));
        }

        #[test]
        fn test_empty_answer_takes_defaults() {
            let quote = parse_quote(None).unwrap();
            assert_eq!(quote.text, "Time creates all things.");
        }

        #[test]
        fn test_non_json_answer_is_error() {
            assert!(parse_quote(Some("Carpe diem")).is_err());
        }

        #[test]
        fn test_candidate_text_joins_parts() {
            let body: GenerateResponse = serde_json::from_value(json!({
                "candidates": [{ "content": { "parts": [{ "text": "{\"text\":" }, { "text": "\"x\"}" }] } }]
            }))
            .unwrap();
            assert_eq!(body.text().as_deref(), Some("{\"text\":\"x\"}"));
        }

        #[test]
        fn test_no_candidates() {
            let body: GenerateResponse = serde_json::from_value(json!({})).unwrap();
            assert!(body.text().is_none());
        }
    }

    mod prompt_tests {
        use super::*;

        #[test]
        fn test_prompt_includes_context() {
            let prompt = quote_prompt(TimeOfDay::Night, "Snow");
            assert!(prompt.contains("It is currently Night and the weather is Snow."));
            assert!(prompt.contains("under 30 words"));
        }

        #[test]
        fn test_request_body_schema() {
            let body = GeminiQuoteClient::request_body("hi");
            assert_eq!(body["contents"][0]["parts"][0]["text"], "hi");
            assert_eq!(
                body["generationConfig"]["responseMimeType"],
                "application/json"
            );
            assert_eq!(
                body["generationConfig"]["responseSchema"]["required"],
                json!(["text", "author"])
            );
        }
    }

    mod fallback_tests {
        use super::*;

        #[tokio::test]
        async fn test_missing_api_key_uses_fallback() {
            let client = GeminiQuoteClient::new(
                "http://127.0.0.1:9",
                "gemini-2.5-flash",
                None,
                Duration::from_millis(500),
            )
            .unwrap();

            let err = client.quote(TimeOfDay::Morning, "Clear sky").await.unwrap_err();
            assert!(err.is_configuration_error());

            let quote = fetch_quote_or_fallback(&client, TimeOfDay::Morning, "Clear sky").await;
            assert_eq!(quote, fallback_quote());
        }

        #[tokio::test]
        async fn test_mock_records_context() {
            let provider = MockQuoteProvider::returning(QuoteData::new("a", "b"));

            let quote = fetch_quote_or_fallback(&provider, TimeOfDay::Afternoon, "Rain").await;
            assert_eq!(quote, QuoteData::new("a", "b"));
            assert_eq!(provider.call_count(), 1);
            assert_eq!(
                provider.last_context(),
                Some((TimeOfDay::Afternoon, "Rain".to_string()))
            );
        }

        #[tokio::test]
        async fn test_mock_failure_uses_fallback() {
            let provider = MockQuoteProvider::failing();
            let quote = fetch_quote_or_fallback(&provider, TimeOfDay::Night, "Foggy").await;
            assert_eq!(quote.author, "Mahatma Gandhi");
        }
    }
}
