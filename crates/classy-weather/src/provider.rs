//! Open-Meteo daily forecast client.

use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use crate::types::{Forecast, ResolvedLocation, WeatherError};

const USER_AGENT: &str = concat!("classy-weather/", env!("CARGO_PKG_VERSION"));
const DAILY_SERIES: &str = "weathercode,temperature_2m_max,temperature_2m_min";

/// Base URLs of the two services. Defaults live in `classy_core::WeatherConfig`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub geocoding: String,
    pub forecast: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: DailyBlock,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Vec<NaiveDate>,
    weathercode: Vec<i32>,
    temperature_2m_max: Vec<f64>,
    temperature_2m_min: Vec<f64>,
}

/// HTTP client for geocoding and forecast lookups
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    pub(crate) client: Arc<Client>,
    pub(crate) endpoints: Endpoints,
}

impl WeatherProvider {
    /// # Errors
    /// Fails if the HTTP client cannot be built.
    pub fn with_endpoints(endpoints: Endpoints, timeout: Duration) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            endpoints,
        })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Fetch the daily forecast for a resolved location.
    ///
    /// # Errors
    /// Network, HTTP status and decoding failures, plus `InvalidForecast` when
    /// the daily series are misaligned or empty.
    #[tracing::instrument(skip(self, location), fields(place = %location.display_name), level = "info")]
    pub async fn forecast(&self, location: &ResolvedLocation) -> Result<Forecast, WeatherError> {
        let url = Url::parse_with_params(
            &self.endpoints.forecast,
            &[
                ("latitude", location.latitude.to_string()),
                ("longitude", location.longitude.to_string()),
                ("timezone", location.timezone.clone()),
                ("daily", DAILY_SERIES.to_string()),
            ],
        )
        .map_err(|e| WeatherError::Network(format!("invalid forecast URL: {}", e)))?;

        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Http {
                service: "forecast",
                status: status.as_u16(),
            });
        }

        let body: ForecastResponse = response.json().await?;
        let daily = body.daily;

        let forecast = Forecast::new(
            daily.time,
            daily.temperature_2m_max,
            daily.temperature_2m_min,
            daily.weathercode,
        )?;

        tracing::info!("Fetched {}-day forecast", forecast.len());
        Ok(forecast)
    }
}
