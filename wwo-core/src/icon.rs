//! Keyword to glyph lookup for weather descriptions.

/// Shown when no keyword matches.
pub const FALLBACK_ICON: &str = "🌡️";

/// Checked top to bottom, first hit wins. More specific phrases must sit
/// above the general words they contain ("partly cloudy" before "cloudy").
const ICONS: &[(&str, &str)] = &[
    ("sunny", "☀️"),
    ("clear", "🌙"),
    ("partly cloudy", "⛅"),
    ("cloudy", "☁️"),
    ("overcast", "☁️"),
    ("mist", "🌫️"),
    ("fog", "🌫️"),
    ("rain", "🌧️"),
    ("drizzle", "🌦️"),
    ("snow", "❄️"),
    ("sleet", "🌨️"),
    ("thunder", "⛈️"),
    ("blizzard", "🌨️"),
];

pub fn icon_for(description: &str) -> &'static str {
    let desc = description.to_lowercase();
    ICONS
        .iter()
        .find(|(keyword, _)| desc.contains(keyword))
        .map(|(_, icon)| *icon)
        .unwrap_or(FALLBACK_ICON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partly_cloudy_is_not_shadowed_by_cloudy() {
        assert_eq!(icon_for("Partly cloudy"), "⛅");
        assert_eq!(icon_for("PARTLY CLOUDY with late sun"), "⛅");
        assert_ne!(icon_for("partly cloudy"), icon_for("cloudy"));
    }

    #[test]
    fn specific_phrases_precede_their_substrings() {
        for (i, (keyword, _)) in ICONS.iter().enumerate() {
            for (general, _) in &ICONS[..i] {
                assert!(
                    !keyword.contains(general),
                    "{keyword:?} is shadowed by earlier {general:?}"
                );
            }
        }
    }

    #[test]
    fn unknown_description_gets_fallback() {
        assert_eq!(icon_for("tornado"), FALLBACK_ICON);
        assert_eq!(icon_for(""), FALLBACK_ICON);
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        assert_eq!(icon_for("Sunny"), "☀️");
        assert_eq!(icon_for("Light rain shower"), "🌧️");
        assert_eq!(icon_for("Patchy light drizzle"), "🌦️");
        assert_eq!(icon_for("Thundery outbreaks possible"), "⛈️");
        assert_eq!(icon_for("Freezing fog"), "🌫️");
    }
}
