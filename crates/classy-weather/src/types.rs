use chrono::NaiveDate;

/// Minimum number of characters a query needs before it is looked up.
pub const MIN_QUERY_LEN: usize = 2;

/// Reject queries too short to be looked up.
///
/// # Errors
/// `QueryTooShort` when `query` has fewer than [`MIN_QUERY_LEN`] characters.
pub fn check_query(query: &str) -> Result<(), WeatherError> {
    if query.chars().count() < MIN_QUERY_LEN {
        return Err(WeatherError::QueryTooShort(query.to_string()));
    }
    Ok(())
}

/// A place resolved from the first geocoding result
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    /// Place name followed by the country flag, e.g. "London 🇬🇧"
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

/// Multi-day forecast with positionally aligned daily series.
///
/// Index 0 is always today. The series can only be built through
/// [`Forecast::new`], which rejects mismatched or empty input.
#[derive(Debug, Clone, PartialEq)]
pub struct Forecast {
    dates: Vec<NaiveDate>,
    daily_max: Vec<f64>,
    daily_min: Vec<f64>,
    weather_codes: Vec<i32>,
}

impl Forecast {
    pub fn new(
        dates: Vec<NaiveDate>,
        daily_max: Vec<f64>,
        daily_min: Vec<f64>,
        weather_codes: Vec<i32>,
    ) -> Result<Self, WeatherError> {
        let len = dates.len();
        if daily_max.len() != len || daily_min.len() != len || weather_codes.len() != len {
            return Err(WeatherError::InvalidForecast(format!(
                "series lengths differ: time={}, max={}, min={}, codes={}",
                len,
                daily_max.len(),
                daily_min.len(),
                weather_codes.len()
            )));
        }
        if len == 0 {
            return Err(WeatherError::InvalidForecast("no days returned".to_string()));
        }

        Ok(Self {
            dates,
            daily_max,
            daily_min,
            weather_codes,
        })
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Always false for a constructed forecast
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn daily_max(&self) -> &[f64] {
        &self.daily_max
    }

    pub fn daily_min(&self) -> &[f64] {
        &self.daily_min
    }

    pub fn weather_codes(&self) -> &[i32] {
        &self.weather_codes
    }

    /// Iterate the forecast one day at a time
    pub fn days(&self) -> impl Iterator<Item = DayForecast> + '_ {
        (0..self.len()).map(move |i| DayForecast {
            date: self.dates[i],
            max: self.daily_max[i],
            min: self.daily_min[i],
            code: self.weather_codes[i],
            is_today: i == 0,
        })
    }
}

/// One row of a [`Forecast`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayForecast {
    pub date: NaiveDate,
    pub max: f64,
    pub min: f64,
    pub code: i32,
    pub is_today: bool,
}

/// Weather lookup errors.
///
/// Cloneable so a failure can be held in [`crate::WorkflowState::Failed`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WeatherError {
    #[error("Query too short: {0:?}")]
    QueryTooShort(String),
    #[error("Location not found: {0}")]
    LocationNotFound(String),
    #[error("Request timed out")]
    Timeout,
    #[error("Network error: {0}")]
    Network(String),
    #[error("{service} returned HTTP {status}")]
    Http { service: &'static str, status: u16 },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid forecast: {0}")]
    InvalidForecast(String),
    #[error("Result for {0:?} was superseded by a newer query")]
    StaleResult(String),
}

impl From<reqwest::Error> for WeatherError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            WeatherError::Timeout
        } else if e.is_decode() {
            WeatherError::Parse(e.to_string())
        } else {
            WeatherError::Network(e.to_string())
        }
    }
}
