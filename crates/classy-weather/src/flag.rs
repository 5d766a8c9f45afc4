//! Country code to flag emoji conversion.

/// Distance from an ASCII uppercase letter to its regional indicator symbol.
const REGIONAL_INDICATOR_OFFSET: u32 = 127_397;

/// Convert a two-letter ISO country code (any case) into its flag emoji.
///
/// Each letter becomes a regional indicator symbol; two adjacent indicators
/// render as a flag. Input that is not two ASCII letters is a caller error and
/// yields an unspecified string.
pub fn country_flag(country_code: &str) -> String {
    country_code
        .to_uppercase()
        .chars()
        .filter_map(|c| char::from_u32(c as u32 + REGIONAL_INDICATOR_OFFSET))
        .collect()
}

/// True when `code` can be passed to [`country_flag`].
pub fn is_country_code(code: &str) -> bool {
    code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gb_flag() {
        assert_eq!(country_flag("GB"), "\u{1F1EC}\u{1F1E7}");
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(country_flag("us"), country_flag("US"));
        assert_eq!(country_flag("pT"), "\u{1F1F5}\u{1F1F9}");
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(country_flag("de"), country_flag("de"));
        assert_ne!(country_flag("de"), country_flag("ed"));
    }

    #[test]
    fn test_flag_is_two_code_points() {
        let flag = country_flag("jp");
        assert_eq!(flag.chars().count(), 2);
        assert!(flag
            .chars()
            .all(|c| ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)));
    }

    #[test]
    fn test_is_country_code() {
        assert!(is_country_code("GB"));
        assert!(is_country_code("gb"));
        assert!(!is_country_code("G"));
        assert!(!is_country_code("GBR"));
        assert!(!is_country_code("G1"));
        assert!(!is_country_code(""));
    }
}
