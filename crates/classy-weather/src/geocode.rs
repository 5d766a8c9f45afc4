//! Forward geocoding: turn a place name into coordinates and a display name.
//! Uses the Open-Meteo geocoding API - free, no API key required.

use serde::Deserialize;
use url::Url;

use crate::flag::{country_flag, is_country_code};
use crate::provider::WeatherProvider;
use crate::types::{check_query, ResolvedLocation, WeatherError};

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    timezone: String,
    country_code: Option<String>,
}

impl GeocodingResult {
    fn into_location(self) -> ResolvedLocation {
        let display_name = match self.country_code.as_deref() {
            Some(code) if is_country_code(code) => format!("{} {}", self.name, country_flag(code)),
            Some(code) => {
                tracing::debug!("Ignoring malformed country code {:?}", code);
                self.name
            }
            None => self.name,
        };

        ResolvedLocation {
            display_name,
            latitude: self.latitude,
            longitude: self.longitude,
            timezone: self.timezone,
        }
    }
}

impl WeatherProvider {
    /// Resolve a place name using the first geocoding match.
    ///
    /// # Errors
    /// `QueryTooShort` without any request for queries under two characters,
    /// `LocationNotFound` when the service returns no results, otherwise
    /// network, HTTP status and decoding failures.
    #[tracing::instrument(skip(self), level = "info")]
    pub async fn geocode(&self, query: &str) -> Result<ResolvedLocation, WeatherError> {
        check_query(query)?;

        let url = Url::parse_with_params(&self.endpoints.geocoding, &[("name", query)])
            .map_err(|e| WeatherError::Network(format!("invalid geocoding URL: {}", e)))?;

        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Http {
                service: "geocoding",
                status: status.as_u16(),
            });
        }

        let body: GeocodingResponse = response.json().await?;

        let first = body
            .results
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| WeatherError::LocationNotFound(query.to_string()))?;

        let location = first.into_location();
        tracing::info!(
            "Resolved {:?} to {} ({}, {})",
            query,
            location.display_name,
            location.latitude,
            location.longitude
        );
        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(country_code: Option<&str>) -> GeocodingResult {
        GeocodingResult {
            name: "London".to_string(),
            latitude: 51.5,
            longitude: -0.12,
            timezone: "Europe/London".to_string(),
            country_code: country_code.map(str::to_string),
        }
    }

    #[test]
    fn test_display_name_includes_flag() {
        let location = result(Some("GB")).into_location();
        assert_eq!(location.display_name, "London \u{1F1EC}\u{1F1E7}");
        assert_eq!(location.timezone, "Europe/London");
    }

    #[test]
    fn test_display_name_without_country_code() {
        assert_eq!(result(None).into_location().display_name, "London");
        assert_eq!(result(Some("GBR")).into_location().display_name, "London");
    }

    #[test]
    fn test_missing_results_field_deserializes() {
        let body: GeocodingResponse =
            serde_json::from_value(serde_json::json!({ "generationtime_ms": 0.5 })).unwrap();
        assert!(body.results.is_none());
    }
}
