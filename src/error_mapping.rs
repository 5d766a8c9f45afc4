//! Maps weather lookup errors to classy_core::AppError for user-facing messages.

use classy_core::{AppError, NetworkError, WeatherError as CoreWeatherError};
use classy_weather::WeatherError;

pub fn to_app_error(e: &WeatherError) -> AppError {
    match e {
        WeatherError::LocationNotFound(q) => {
            AppError::Weather(CoreWeatherError::LocationNotFound(q.clone()))
        }
        WeatherError::Timeout => AppError::Network(NetworkError::Timeout),
        WeatherError::Network(s) => AppError::Network(NetworkError::ConnectionFailed(s.clone())),
        WeatherError::Http { service, status } if *status == 503 => {
            tracing::debug!("{} unavailable", service);
            AppError::Weather(CoreWeatherError::ServiceUnavailable)
        }
        WeatherError::Http { service, status } => AppError::Network(NetworkError::ServerError {
            status: *status,
            message: format!("{} request failed", service),
        }),
        WeatherError::Parse(s) => AppError::Network(NetworkError::InvalidResponse(s.clone())),
        WeatherError::InvalidForecast(s) => AppError::Weather(CoreWeatherError::ApiError(s.clone())),
        WeatherError::QueryTooShort(_) | WeatherError::StaleResult(_) => {
            AppError::Service(e.to_string())
        }
    }
}
