//! Weather lookup for Classy Weather
//!
//! Resolves a place name via the Open-Meteo geocoding API, fetches its daily
//! forecast and publishes the result as a [`WorkflowState`]. The last accepted
//! place name is persisted through a [`PreferenceStore`].

pub mod day;
pub mod flag;
pub mod geocode;
pub mod icon;
pub mod preferences;
pub mod provider;
pub mod types;
pub mod workflow;

pub use day::{format_day, format_day_str};
pub use flag::country_flag;
pub use icon::{weather_icon, WeatherGlyph, ICON_NOT_FOUND};
pub use preferences::{FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, LOCATION_KEY};
pub use provider::{Endpoints, WeatherProvider};
pub use types::*;
pub use workflow::{ForecastWorkflow, PendingLookup, WorkflowState};
