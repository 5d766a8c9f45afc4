//! Terminal presentation of workflow states.

use classy_weather::{format_day, weather_icon, Forecast, ResolvedLocation, WorkflowState};

use crate::error_mapping::to_app_error;

pub const TITLE: &str = "Classy Weather";
pub const LOADING: &str = "Loading ...";

/// Text for a state, or `None` when there is nothing to show.
pub fn render_state(state: &WorkflowState) -> Option<String> {
    match state {
        WorkflowState::Idle | WorkflowState::Empty => None,
        WorkflowState::Loading => Some(LOADING.to_string()),
        WorkflowState::Ready { location, forecast } => Some(render_forecast(location, forecast)),
        WorkflowState::Failed(e) => Some(format!("Error: {}", to_app_error(e).user_message())),
    }
}

/// Heading plus one line per day: icon, day label, floored min/max, raw date.
pub fn render_forecast(location: &ResolvedLocation, forecast: &Forecast) -> String {
    let mut out = format!("Weather {}", location.display_name);
    for day in forecast.days() {
        out.push_str(&format!(
            "\n  {}  {:<5}  {}\u{b0} - {}\u{b0}  {}",
            weather_icon(day.code),
            format_day(day.date, day.is_today),
            day.min.floor() as i64,
            day.max.floor() as i64,
            day.date
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use classy_weather::{WeatherError, ICON_NOT_FOUND};

    fn london() -> ResolvedLocation {
        ResolvedLocation {
            display_name: "London \u{1F1EC}\u{1F1E7}".to_string(),
            latitude: 51.5,
            longitude: -0.12,
            timezone: "Europe/London".to_string(),
        }
    }

    fn forecast() -> Forecast {
        let d = |day| NaiveDate::from_ymd_opt(2026, 10, day).unwrap();
        Forecast::new(
            vec![d(19), d(20), d(21)],
            vec![14.7, 15.2, 0.4],
            vec![8.9, -0.5, -3.0],
            vec![0, 61, 42],
        )
        .unwrap()
    }

    #[test]
    fn test_render_forecast_lines() {
        let text = render_forecast(&london(), &forecast());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Weather London \u{1F1EC}\u{1F1E7}");
        assert!(lines[1].contains("Today"));
        assert!(lines[1].contains("8\u{b0} - 14\u{b0}"));
        assert!(lines[1].ends_with("2026-10-19"));
        assert!(lines[2].contains("Tue"));
        assert!(lines[2].contains("-1\u{b0} - 15\u{b0}"));
        assert!(lines[3].contains(ICON_NOT_FOUND));
        assert!(lines[3].contains("Wed"));
    }

    #[test]
    fn test_render_state_variants() {
        assert_eq!(render_state(&WorkflowState::Idle), None);
        assert_eq!(render_state(&WorkflowState::Empty), None);
        assert_eq!(render_state(&WorkflowState::Loading).as_deref(), Some(LOADING));

        let ready = WorkflowState::Ready {
            location: london(),
            forecast: forecast(),
        };
        assert!(render_state(&ready).unwrap().starts_with("Weather London"));
    }

    #[test]
    fn test_failed_is_distinct_from_empty_and_loading() {
        let failed = WorkflowState::Failed(WeatherError::LocationNotFound("atlantis".into()));
        let text = render_state(&failed).unwrap();
        assert_eq!(text, "Error: Location not found. Check and try again.");
    }
}
