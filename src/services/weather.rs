//! Current weather from the Open-Meteo forecast API.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::ServiceError;
use crate::config::ServiceConfig;
use crate::types::{Coordinates, WeatherData};

/// Source of current weather conditions.
#[allow(async_fn_in_trait)]
pub trait WeatherProvider {
    async fn current(&self, coords: Coordinates) -> Result<WeatherData, ServiceError>;
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current_weather: Option<CurrentWeather>,
}

#[derive(Debug, Deserialize)]
struct CurrentWeather {
    temperature: f64,
    weathercode: i32,
    is_day: i32,
}

/// Open-Meteo client. No API key is required.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

impl OpenMeteoClient {
    /// Creates a client for `base_url` (e.g. `https://api.open-meteo.com`).
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ServiceError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Creates a client from the service configuration.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, ServiceError> {
        Self::new(
            config.weather_url.clone(),
            Duration::from_secs(config.timeout_seconds),
        )
    }
}

impl WeatherProvider for OpenMeteoClient {
    async fn current(&self, coords: Coordinates) -> Result<WeatherData, ServiceError> {
        let url = format!("{}/v1/forecast", self.base_url);
        debug!(
            "Requesting weather for ({}, {})",
            coords.latitude, coords.longitude
        );

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", coords.latitude.to_string()),
                ("longitude", coords.longitude.to_string()),
                ("current_weather", "true".to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ServiceError::Status {
                service: "open-meteo",
                status: response.status().as_u16(),
            });
        }

        let body: ForecastResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))?;
        let current = body
            .current_weather
            .ok_or_else(|| ServiceError::InvalidResponse("missing current_weather".into()))?;

        Ok(WeatherData {
            temperature: current.temperature,
            condition_code: current.weathercode,
            is_day: current.is_day == 1,
        })
    }
}

/// Fetches the weather, substituting [`WeatherData::FALLBACK`] on failure.
pub async fn fetch_weather_or_fallback<P: WeatherProvider>(
    provider: &P,
    coords: Coordinates,
) -> WeatherData {
    match provider.current(coords).await {
        Ok(weather) => weather,
        Err(e) => {
            warn!("Failed to fetch weather, using fallback: {}", e);
            WeatherData::FALLBACK
        }
    }
}

/// Short description of a WMO weather interpretation code.
pub fn describe_weather(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1..=3 => "Partly cloudy",
        45..=48 => "Foggy",
        51..=55 => "Drizzle",
        61..=65 => "Rain",
        71..=77 => "Snow",
        80..=82 => "Showers",
        c if c >= 95 => "Thunderstorm",
        _ => "Unknown",
    }
}

/// Weather line of the info bar, e.g. `18°C • Rain`.
pub fn weather_summary(weather: &WeatherData) -> String {
    format!(
        "{}°C • {}",
        weather.temperature.round() as i64,
        describe_weather(weather.condition_code)
    )
}

// ============================================================================
// Mock Implementation (for testing)
// ============================================================================

/// Weather provider returning a fixed result.
#[derive(Debug)]
pub struct MockWeatherProvider {
    result: Option<WeatherData>,
    calls: AtomicUsize,
}

impl MockWeatherProvider {
    /// A provider that always succeeds with `weather`.
    pub fn returning(weather: WeatherData) -> Self {
        Self {
            result: Some(weather),
            calls: AtomicUsize::new(0),
        }
    }

    /// A provider that always fails.
    pub fn failing() -> Self {
        Self {
            result: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl WeatherProvider for MockWeatherProvider {
    async fn current(&self, _coords: Coordinates) -> Result<WeatherData, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result
            .ok_or_else(|| ServiceError::InvalidResponse("mock failure".into()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod describe_tests {
        use super::*;

        #[test]
        fn test_code_ranges() {
            assert_eq!(describe_weather(0), "Clear sky");
            assert_eq!(describe_weather(1), "Partly cloudy");
            assert_eq!(describe_weather(3), "Partly cloudy");
            assert_eq!(describe_weather(45), "Foggy");
            assert_eq!(describe_weather(48), "Foggy");
            assert_eq!(describe_weather(53), "Drizzle");
            assert_eq!(describe_weather(63), "Rain");
            assert_eq!(describe_weather(75), "Snow");
            assert_eq!(describe_weather(81), "Showers");
            assert_eq!(describe_weather(95), "Thunderstorm");
            assert_eq!(describe_weather(99), "Thunderstorm");
        }

        #[test]
        fn test_gaps_are_unknown() {
            assert_eq!(describe_weather(4), "Unknown");
            assert_eq!(describe_weather(50), "Unknown");
            assert_eq!(describe_weather(66), "Unknown");
            assert_eq!(describe_weather(90), "Unknown");
            assert_eq!(describe_weather(-1), "Unknown");
        }

        #[test]
        fn test_summary_rounds_temperature() {
            let weather = WeatherData {
                temperature: 17.6,
                condition_code: 61,
                is_day: false,
            };
            assert_eq!(weather_summary(&weather), "18°C • Rain");
        }
    }

    mod fallback_tests {
        use super::*;

        #[tokio::test]
        async fn test_success_passes_through() {
            let weather = WeatherData {
                temperature: -3.5,
                condition_code: 71,
                is_day: false,
            };
            let provider = MockWeatherProvider::returning(weather);

            let result = fetch_weather_or_fallback(&provider, Coordinates::DEFAULT).await;
            assert_eq!(result, weather);
            assert_eq!(provider.call_count(), 1);
        }

        #[tokio::test]
        async fn test_failure_uses_fallback() {
            let provider = MockWeatherProvider::failing();

            let result = fetch_weather_or_fallback(&provider, Coordinates::DEFAULT).await;
            assert_eq!(result, WeatherData::FALLBACK);
        }

        #[tokio::test]
        async fn test_unreachable_server_uses_fallback() {
            let client =
                OpenMeteoClient::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();

            let result = fetch_weather_or_fallback(&client, Coordinates::DEFAULT).await;
            assert_eq!(result, WeatherData::FALLBACK);
        }
    }
}
