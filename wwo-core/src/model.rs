use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

use crate::icon::icon_for;

/// Number of forecast days the provider is asked for. Always within 1..=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ForecastDays(u8);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("day count must be between 1 and 7, got {0}")]
pub struct InvalidDays(pub String);

impl ForecastDays {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 7;

    pub fn new(days: u8) -> Result<Self, InvalidDays> {
        if (Self::MIN..=Self::MAX).contains(&days) {
            Ok(Self(days))
        } else {
            Err(InvalidDays(days.to_string()))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for ForecastDays {
    fn default() -> Self {
        Self(5)
    }
}

impl TryFrom<u8> for ForecastDays {
    type Error = InvalidDays;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ForecastDays> for u8 {
    fn from(days: ForecastDays) -> Self {
        days.0
    }
}

impl FromStr for ForecastDays {
    type Err = InvalidDays;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u8>().map_err(|_| InvalidDays(s.to_string())).and_then(Self::new)
    }
}

impl fmt::Display for ForecastDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
pub struct ForecastRequest {
    /// Free-text place name or a `"lat,lon"` pair.
    pub location: String,
    pub days: ForecastDays,
}

/// Weather right now, as reported by the provider. Values are kept as the
/// provider's numeric strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub description: String,
    pub temp_c: String,
    pub temp_f: String,
    pub feels_like_c: String,
    pub humidity: String,
    pub wind_mph: String,
    pub wind_dir_16pt: String,
    pub uv_index: String,
    pub visibility_km: String,
}

impl CurrentConditions {
    pub fn icon(&self) -> &'static str {
        icon_for(&self.description)
    }
}

/// One calendar day of the forecast, taken from the day's single 24h slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub max_temp_c: String,
    pub min_temp_c: String,
    pub description: String,
    pub chance_of_rain: Option<String>,
    pub wind_mph: String,
    pub humidity: String,
}

impl ForecastDay {
    /// e.g. `Sat 24 Feb`.
    pub fn formatted_date(&self) -> String {
        self.date.format("%a %d %b").to_string()
    }

    pub fn icon(&self) -> &'static str {
        icon_for(&self.description)
    }
}

/// Display name for the queried place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationLabel(String);

impl LocationLabel {
    /// Prefer `"area, country"` from the provider's reverse geocode; fall back
    /// to what the user typed when either part is missing or blank.
    pub fn resolve(area: Option<&str>, country: Option<&str>, requested: &str) -> Self {
        match (area.map(str::trim), country.map(str::trim)) {
            (Some(area), Some(country)) if !area.is_empty() && !country.is_empty() => {
                Self(format!("{area}, {country}"))
            }
            _ => Self(requested.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything one request produces, ready for rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReport {
    pub location: LocationLabel,
    pub current: CurrentConditions,
    pub days: Vec<ForecastDay>,
}
