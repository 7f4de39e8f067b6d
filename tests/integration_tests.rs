//! Integration tests for the HTTP service adapters.
//!
//! The weather and quote clients run against a local mock server; every
//! failure mode must end in the documented fallback values.

use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;
use tokio::sync::mpsc;

use clockdeck::clock::TimeOfDay;
use clockdeck::services::{
    fallback_quote, fetch_quote_or_fallback, fetch_weather_or_fallback, load_panels,
    ConfiguredLocation, GeminiQuoteClient, OpenMeteoClient, PanelUpdate, QuoteProvider,
    ServiceError, WeatherProvider,
};
use clockdeck::types::{Coordinates, QuoteData, WeatherData};

const TIMEOUT: Duration = Duration::from_secs(5);
const QUOTE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

fn weather_client(server: &MockServer) -> OpenMeteoClient {
    OpenMeteoClient::new(server.base_url(), TIMEOUT).unwrap()
}

fn quote_client(server: &MockServer, api_key: Option<&str>) -> GeminiQuoteClient {
    GeminiQuoteClient::new(
        server.base_url(),
        "gemini-2.5-flash",
        api_key.map(str::to_string),
        TIMEOUT,
    )
    .unwrap()
}

/// Wraps a quote JSON string in a `generateContent` response.
fn generate_response(text: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": { "role": "model", "parts": [{ "text": text }] },
            "finishReason": "STOP"
        }]
    })
}

// ============================================================================
// Weather
// ============================================================================

mod weather_integration {
    use super::*;

    #[tokio::test]
    async fn test_current_weather_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v1/forecast")
                    .query_param("latitude", "51.5074")
                    .query_param("longitude", "-0.1278")
                    .query_param("current_weather", "true");
                then.status(200).json_body(json!({
                    "latitude": 51.5,
                    "longitude": -0.12,
                    "current_weather": {
                        "temperature": 12.4,
                        "windspeed": 9.7,
                        "weathercode": 61,
                        "is_day": 0
                    }
                }));
            })
            .await;

        let weather = weather_client(&server)
            .current(Coordinates::DEFAULT)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(
            weather,
            WeatherData {
                temperature: 12.4,
                condition_code: 61,
                is_day: false,
            }
        );
    }

    #[tokio::test]
    async fn test_missing_current_weather_falls_back() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/forecast");
                then.status(200).json_body(json!({ "latitude": 0.0 }));
            })
            .await;

        let client = weather_client(&server);
        let err = client.current(Coordinates::DEFAULT).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidResponse(_)));

        let weather = fetch_weather_or_fallback(&client, Coordinates::DEFAULT).await;
        assert_eq!(weather, WeatherData::FALLBACK);
    }

    #[tokio::test]
    async fn test_server_error_falls_back() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/forecast");
                then.status(503);
            })
            .await;

        let client = weather_client(&server);
        let err = client.current(Coordinates::DEFAULT).await.unwrap_err();
        assert!(matches!(err, ServiceError::Status { status: 503, .. }));

        let weather = fetch_weather_or_fallback(&client, Coordinates::DEFAULT).await;
        assert_eq!(weather, WeatherData::FALLBACK);
    }

    #[tokio::test]
    async fn test_malformed_body_falls_back() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/forecast");
                then.status(200).body("<html>maintenance</html>");
            })
            .await;

        let weather = fetch_weather_or_fallback(&weather_client(&server), Coordinates::DEFAULT).await;
        assert_eq!(weather, WeatherData::FALLBACK);
    }
}

// ============================================================================
// Quote
// ============================================================================

mod quote_integration {
    use super::*;

    #[tokio::test]
    async fn test_quote_success() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(QUOTE_PATH)
                    .header("x-goog-api-key", "test-key")
                    .body_contains("It is currently Morning and the weather is Clear sky.")
                    .body_contains("\"responseMimeType\":\"application/json\"");
                then.status(200).json_body(generate_response(
                    r#"{"text":"Dawn rewards the early.","author":"Mira"}"#,
                ));
            })
            .await;

        let quote = quote_client(&server, Some("test-key"))
            .quote(TimeOfDay::Morning, "Clear sky")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(quote, QuoteData::new("Dawn rewards the early.", "Mira"));
    }

    #[tokio::test]
    async fn test_missing_fields_use_defaults() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(QUOTE_PATH);
                then.status(200).json_body(generate_response(r#"{"author":""}"#));
            })
            .await;

        let quote = quote_client(&server, Some("k"))
            .quote(TimeOfDay::Night, "Snow")
            .await
            .unwrap();
        assert_eq!(quote, QuoteData::new("Time creates all things.", "Chronos"));
    }

    #[tokio::test]
    async fn test_empty_candidates_use_defaults() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(QUOTE_PATH);
                then.status(200).json_body(json!({ "candidates": [] }));
            })
            .await;

        let quote = quote_client(&server, Some("k"))
            .quote(TimeOfDay::Afternoon, "Rain")
            .await
            .unwrap();
        assert_eq!(quote.author, "Chronos");
    }

    #[tokio::test]
    async fn test_rejected_key_falls_back() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(QUOTE_PATH);
                then.status(403).json_body(json!({ "error": { "code": 403 } }));
            })
            .await;

        let quote =
            fetch_quote_or_fallback(&quote_client(&server, Some("bad")), TimeOfDay::Night, "Foggy")
                .await;
        assert_eq!(quote, fallback_quote());
    }

    #[tokio::test]
    async fn test_no_api_key_makes_no_request() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path(QUOTE_PATH);
                then.status(200).json_body(generate_response("{}"));
            })
            .await;

        let quote =
            fetch_quote_or_fallback(&quote_client(&server, None), TimeOfDay::Morning, "Rain").await;

        assert_eq!(mock.hits_async().await, 0);
        assert_eq!(quote.author, "Mahatma Gandhi");
    }
}

// ============================================================================
// Panel loading
// ============================================================================

#[tokio::test]
async fn test_load_panels_feeds_weather_into_quote() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/forecast")
                .query_param("latitude", "35.68")
                .query_param("longitude", "139.69");
            then.status(200).json_body(json!({
                "current_weather": { "temperature": 8.0, "weathercode": 45, "is_day": 1 }
            }));
        })
        .await;
    let quote_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(QUOTE_PATH)
                .body_contains("It is currently Night and the weather is Foggy.");
            then.status(200).json_body(generate_response(
                r#"{"text":"Fog hides nothing forever.","author":"Ren"}"#,
            ));
        })
        .await;

    let (tx, mut rx) = mpsc::unbounded_channel();
    load_panels(
        &ConfiguredLocation(Some(Coordinates::new(35.68, 139.69))),
        &weather_client(&server),
        &quote_client(&server, Some("k")),
        22,
        &tx,
    )
    .await;

    quote_mock.assert_async().await;
    assert_eq!(
        rx.recv().await,
        Some(PanelUpdate::Weather(WeatherData {
            temperature: 8.0,
            condition_code: 45,
            is_day: true,
        }))
    );
    assert_eq!(
        rx.recv().await,
        Some(PanelUpdate::Quote(QuoteData::new(
            "Fog hides nothing forever.",
            "Ren"
        )))
    );
}
