//! WMO weather code to icon glyph mapping.

/// Placeholder rendered for codes outside the rule table.
pub const ICON_NOT_FOUND: &str = "NOT FOUND";

/// Icon categories for WMO weather codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherGlyph {
    ClearSky,
    MostlyClear,
    PartlyCloudy,
    Overcast,
    Fog,
    LightRain,
    Rain,
    Snow,
    Thunderstorm,
    ThunderstormHail,
}

/// Code sets are disjoint, so rule order does not affect the result.
const RULES: &[(&[i32], WeatherGlyph)] = &[
    (&[0], WeatherGlyph::ClearSky),
    (&[1], WeatherGlyph::MostlyClear),
    (&[2], WeatherGlyph::PartlyCloudy),
    (&[3], WeatherGlyph::Overcast),
    (&[45, 48], WeatherGlyph::Fog),
    (&[51, 56, 61, 66, 80], WeatherGlyph::LightRain),
    (&[53, 55, 57, 63, 65, 67, 81, 82], WeatherGlyph::Rain),
    (&[71, 73, 75, 77, 85, 86], WeatherGlyph::Snow),
    (&[95], WeatherGlyph::Thunderstorm),
    (&[96, 99], WeatherGlyph::ThunderstormHail),
];

impl WeatherGlyph {
    /// Look up the glyph for a WMO weather code.
    /// See: https://open-meteo.com/en/docs#weathervariables
    pub fn from_wmo_code(code: i32) -> Option<Self> {
        RULES
            .iter()
            .find(|(codes, _)| codes.contains(&code))
            .map(|(_, glyph)| *glyph)
    }

    pub fn glyph(&self) -> &'static str {
        match self {
            Self::ClearSky => "\u{2600}\u{FE0F}",
            Self::MostlyClear => "\u{1F324}",
            Self::PartlyCloudy => "\u{26C5}\u{FE0F}",
            Self::Overcast => "\u{2601}\u{FE0F}",
            Self::Fog => "\u{1F32B}",
            Self::LightRain => "\u{1F326}",
            Self::Rain => "\u{1F327}",
            Self::Snow => "\u{1F328}",
            Self::Thunderstorm => "\u{1F329}",
            Self::ThunderstormHail => "\u{26C8}",
        }
    }
}

/// Icon for a weather code, or [`ICON_NOT_FOUND`] when the code is unknown.
pub fn weather_icon(code: i32) -> &'static str {
    WeatherGlyph::from_wmo_code(code).map_or(ICON_NOT_FOUND, |g| g.glyph())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_code_rules() {
        assert_eq!(weather_icon(0), "\u{2600}\u{FE0F}");
        assert_eq!(weather_icon(1), "\u{1F324}");
        assert_eq!(weather_icon(2), "\u{26C5}\u{FE0F}");
        assert_eq!(weather_icon(3), "\u{2601}\u{FE0F}");
        assert_eq!(weather_icon(95), "\u{1F329}");
    }

    #[test]
    fn test_fog() {
        for code in [45, 48] {
            assert_eq!(WeatherGlyph::from_wmo_code(code), Some(WeatherGlyph::Fog));
            assert_eq!(weather_icon(code), "\u{1F32B}");
        }
    }

    #[test]
    fn test_light_rain() {
        for code in [51, 56, 61, 66, 80] {
            assert_eq!(weather_icon(code), "\u{1F326}", "code {}", code);
        }
    }

    #[test]
    fn test_rain() {
        for code in [53, 55, 57, 63, 65, 67, 81, 82] {
            assert_eq!(weather_icon(code), "\u{1F327}", "code {}", code);
        }
    }

    #[test]
    fn test_snow() {
        for code in [71, 73, 75, 77, 85, 86] {
            assert_eq!(weather_icon(code), "\u{1F328}", "code {}", code);
        }
    }

    #[test]
    fn test_thunderstorm_hail() {
        for code in [96, 99] {
            assert_eq!(weather_icon(code), "\u{26C8}", "code {}", code);
        }
    }

    #[test]
    fn test_unknown_codes_are_not_found() {
        for code in [-1, 4, 44, 50, 60, 90, 98, 100, 999] {
            assert_eq!(WeatherGlyph::from_wmo_code(code), None);
            assert_eq!(weather_icon(code), ICON_NOT_FOUND);
        }
    }

    #[test]
    fn test_code_sets_are_disjoint() {
        let mut seen = std::collections::HashSet::new();
        for (codes, _) in RULES {
            for code in *codes {
                assert!(seen.insert(*code), "code {} listed twice", code);
            }
        }
        assert_eq!(seen.len(), 28);
    }
}
