//! # NWS Product Fetching
//!
//! This module handles all network operations: the four plain-text coastal
//! waters bulletins, the combined forecast carrying the SYNOPSIS block, and
//! the api.weather.gov gridpoint forecast JSON used for the rain probability.
//!
//! ## Data Sources
//!
//! ### tgftp.nws.noaa.gov text products
//! - **Format**: plain text, one product per zone, no authentication
//! - **Zones**: AMZ711 (Atlantic), AMZ712 (north PR), AMZ726 (east PR),
//!   AMZ733 (Caribbean); FZCA52 is the combined PR/USVI product
//!
//! ### api.weather.gov gridpoint forecast
//! - **Format**: GeoJSON; only `probabilityOfPrecipitation` of the first
//!   period is consumed
//!
//! ## Error Handling
//!
//! A fetch failure is never fatal. Each helper has a `*_or_empty` shape at
//! the call site: the error is logged to stderr as a warning and the value
//! degrades to empty text (or `None` for the rain probability), leaving the
//! extractors to fill in their sentinel defaults. There are no retries and
//! no caching; the card is generated once a day and stale marine data is
//! worse than a "Check NWS" placeholder.

use crate::config::EndpointConfig;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// User agent sent with every request. NWS asks automated clients to
/// identify themselves.
const USER_AGENT: &str = "RabirubiaWeather/1.0";

/// Errors that can occur while fetching NWS products.
#[derive(Error, Debug)]
pub enum FetchError {
    /// HTTP request failed (network, timeout, protocol, or non-2xx status)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Raw bulletin text per zone, for the duration of one run.
///
/// Zones that failed to fetch hold the empty string; the extractor turns
/// those into all-default records.
#[derive(Clone, Debug, Default)]
pub struct Bulletins {
    pub atlantic: String,
    pub north_pr: String,
    pub east_pr: String,
    pub caribbean: String,
}

/// Build the HTTP client used for every request in a run.
pub fn client(endpoints: &EndpointConfig) -> Result<reqwest::Client, FetchError> {
    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(endpoints.timeout_secs))
        .build()?;
    Ok(client)
}

/// Fetch one URL as text. Non-2xx statuses are errors.
async fn fetch_text(client: &reqwest::Client, url: &str) -> Result<String, FetchError> {
    let body = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    Ok(body)
}

/// Fetch one URL as text, degrading to the empty string on any failure.
/// The failure is logged to stderr and processing continues.
pub async fn fetch_text_or_empty(client: &reqwest::Client, url: &str) -> String {
    match fetch_text(client, url).await {
        Ok(body) => body,
        Err(error) => {
            eprintln!("  WARNING: Could not fetch {}: {}", url, error);
            String::new()
        }
    }
}

/// Fetch the four zone bulletins.
pub async fn fetch_bulletins(client: &reqwest::Client, endpoints: &EndpointConfig) -> Bulletins {
    Bulletins {
        atlantic: fetch_text_or_empty(client, &endpoints.atlantic).await,
        north_pr: fetch_text_or_empty(client, &endpoints.north_pr).await,
        east_pr: fetch_text_or_empty(client, &endpoints.east_pr).await,
        caribbean: fetch_text_or_empty(client, &endpoints.caribbean).await,
    }
}

/// Fetch the raw text that carries the SYNOPSIS block: the combined PR/USVI
/// product, falling back to the Atlantic zone product when that fails.
pub async fn fetch_synopsis_text(client: &reqwest::Client, endpoints: &EndpointConfig) -> String {
    let text = fetch_text_or_empty(client, &endpoints.combined).await;
    if !text.is_empty() {
        return text;
    }
    fetch_text_or_empty(client, &endpoints.atlantic).await
}

/// Fetch today's precipitation probability from the gridpoint forecast.
/// Any failure (network, JSON shape, missing value) degrades to `None`.
pub async fn fetch_rain_probability(
    client: &reqwest::Client,
    endpoints: &EndpointConfig,
) -> Option<u8> {
    let forecast = match fetch_gridpoint(client, &endpoints.gridpoint).await {
        Ok(forecast) => forecast,
        Err(error) => {
            eprintln!(
                "  WARNING: Could not fetch {}: {}",
                endpoints.gridpoint, error
            );
            return None;
        }
    };
    rain_probability(&forecast)
}

async fn fetch_gridpoint(
    client: &reqwest::Client,
    url: &str,
) -> Result<GridpointForecast, FetchError> {
    let forecast = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json::<GridpointForecast>()
        .await?;
    Ok(forecast)
}

/// Rain probability of the first forecast period, as a whole percentage.
fn rain_probability(forecast: &GridpointForecast) -> Option<u8> {
    let value = forecast
        .properties
        .periods
        .first()?
        .probability_of_precipitation
        .as_ref()?
        .value?;
    Some(value.clamp(0.0, 100.0).round() as u8)
}

/// Subset of the api.weather.gov gridpoint forecast response.
#[derive(Debug, Deserialize)]
struct GridpointForecast {
    properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    periods: Vec<ForecastPeriod>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForecastPeriod {
    probability_of_precipitation: Option<QuantitativeValue>,
}

#[derive(Debug, Deserialize)]
struct QuantitativeValue {
    value: Option<f64>,
}
