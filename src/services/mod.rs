//! External services feeding the info panels.
//!
//! - `weather`: current conditions from Open-Meteo
//! - `quote`: a short motivational quote from Gemini
//! - `location`: coordinates for the weather lookup
//!
//! Every failure is recovered with a fixed fallback value; see
//! [`load_panels`].

mod error;
pub mod location;
pub mod quote;
pub mod weather;

pub use error::ServiceError;
pub use location::{resolve_location, ConfiguredLocation, LocationSource};
pub use quote::{
    fallback_quote, fetch_quote_or_fallback, quote_prompt, GeminiQuoteClient, MockQuoteProvider,
    QuoteProvider,
};
pub use weather::{
    describe_weather, fetch_weather_or_fallback, weather_summary, MockWeatherProvider,
    OpenMeteoClient, WeatherProvider,
};

use tokio::sync::mpsc;

use crate::clock::TimeOfDay;
use crate::types::{QuoteData, WeatherData};

/// Result of one panel lookup.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelUpdate {
    Weather(WeatherData),
    Quote(QuoteData),
}

/// Locates the user, fetches the weather and then a quote tailored to the
/// weather and `hour`. Each result is sent as soon as it is known.
pub async fn load_panels<L, W, Q>(
    location: &L,
    weather: &W,
    quotes: &Q,
    hour: u32,
    tx: &mpsc::UnboundedSender<PanelUpdate>,
) where
    L: LocationSource,
    W: WeatherProvider,
    Q: QuoteProvider,
{
    let coords = resolve_location(location).await;
    let current = fetch_weather_or_fallback(weather, coords).await;
    let _ = tx.send(PanelUpdate::Weather(current));

    let description = describe_weather(current.condition_code);
    let quote = fetch_quote_or_fallback(quotes, TimeOfDay::from_hour(hour), description).await;
    let _ = tx.send(PanelUpdate::Quote(quote));
}
