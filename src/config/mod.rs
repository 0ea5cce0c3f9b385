/// Per-widget configuration: the host-persisted control values and the
/// typed config parsed from them.
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Control names, matching the keys of the host's persisted state.
pub const CONTROL_DISPLAY_NAME: &str = "displayName";
pub const CONTROL_TIMEZONE: &str = "timezone";
pub const CONTROL_FORMAT: &str = "format";

/// The opaque per-widget key/value map owned by the host. The core only
/// reads and writes it through these accessors, never as a file format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlValues(BTreeMap<String, String>);

impl ControlValues {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, control: &str) -> Option<&str> {
        self.0.get(control).map(String::as_str)
    }

    pub fn set(&mut self, control: &str, value: impl Into<String>) {
        self.0.insert(control.to_string(), value.into());
    }

    /// True when the control has no stored value or an empty one.
    pub fn is_unset(&self, control: &str) -> bool {
        self.get(control).is_none_or(str::is_empty)
    }
}

/// Time display format. The wire indices are a fixed contract of the
/// widget: 0 = "12", 1 = "24", never derived from locale or catalog state.
/// Persisted state carries the index string, never this enum directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeFormat {
    TwelveHour,
    #[default]
    TwentyFourHour,
}

impl TimeFormat {
    pub const fn wire_index(self) -> usize {
        match self {
            TimeFormat::TwelveHour => 0,
            TimeFormat::TwentyFourHour => 1,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            TimeFormat::TwelveHour => "12",
            TimeFormat::TwentyFourHour => "24",
        }
    }

    /// Format a zone-local instant as the displayed time text. Seconds are
    /// truncated, never rounded.
    pub fn time_text<Tz: TimeZone>(self, local: &DateTime<Tz>) -> String
    where
        Tz::Offset: fmt::Display,
    {
        match self {
            TimeFormat::TwelveHour => local.format("%-I:%M %p").to_string(),
            TimeFormat::TwentyFourHour => local.format("%H:%M").to_string(),
        }
    }
}

impl fmt::Display for TimeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for TimeFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" | "12" => Ok(TimeFormat::TwelveHour),
            "1" | "24" => Ok(TimeFormat::TwentyFourHour),
            other => Err(ConfigError::InvalidFormat {
                value: other.to_string(),
            }),
        }
    }
}

/// Typed configuration for one widget instance. Built fresh from the
/// stored control values on every render; the core never mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockConfig {
    /// Optional header text above the time. Trimmed; never empty.
    pub label: Option<String>,
    /// Positional index into the timezone catalog, resolved against the
    /// live database at render time.
    pub timezone_index: usize,
    pub format: TimeFormat,
}

impl ClockConfig {
    /// Parse a widget's stored control values. The timezone control is
    /// required; a missing format means the instance predates the format
    /// control and renders 24-hour.
    pub fn from_values(values: &ControlValues) -> Result<Self, ConfigError> {
        let label = values
            .get(CONTROL_DISPLAY_NAME)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let raw_zone = values
            .get(CONTROL_TIMEZONE)
            .filter(|s| !s.trim().is_empty())
            .ok_or(ConfigError::MissingControl(CONTROL_TIMEZONE))?;
        let timezone_index = raw_zone
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidTimezone {
                value: raw_zone.to_string(),
            })?;

        let format = match values.get(CONTROL_FORMAT) {
            Some(s) if !s.trim().is_empty() => s.parse()?,
            _ => TimeFormat::default(),
        };

        Ok(Self {
            label,
            timezone_index,
            format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    use crate::catalog::TimezoneCatalog;

    fn values(pairs: &[(&str, &str)]) -> ControlValues {
        let mut v = ControlValues::new();
        for (control, value) in pairs {
            v.set(control, *value);
        }
        v
    }

    #[test]
    fn test_parse_full_config() {
        let v = values(&[
            (CONTROL_DISPLAY_NAME, " London "),
            (CONTROL_TIMEZONE, "42"),
            (CONTROL_FORMAT, "0"),
        ]);
        let config = ClockConfig::from_values(&v).unwrap();
        assert_eq!(config.label.as_deref(), Some("London"));
        assert_eq!(config.timezone_index, 42);
        assert_eq!(config.format, TimeFormat::TwelveHour);
    }

    #[test]
    fn test_whitespace_label_is_absent() {
        let v = values(&[(CONTROL_DISPLAY_NAME, "   "), (CONTROL_TIMEZONE, "0")]);
        let config = ClockConfig::from_values(&v).unwrap();
        assert_eq!(config.label, None);
    }

    #[test]
    fn test_missing_timezone_is_error() {
        let v = values(&[(CONTROL_FORMAT, "1")]);
        let err = ClockConfig::from_values(&v).unwrap_err();
        assert_eq!(err, ConfigError::MissingControl(CONTROL_TIMEZONE));
    }

    #[test]
    fn test_missing_format_defaults_to_24h() {
        let v = values(&[(CONTROL_TIMEZONE, "3")]);
        let config = ClockConfig::from_values(&v).unwrap();
        assert_eq!(config.format, TimeFormat::TwentyFourHour);
    }

    #[test]
    fn test_bad_format_is_error() {
        let v = values(&[(CONTROL_TIMEZONE, "3"), (CONTROL_FORMAT, "7")]);
        let err = ClockConfig::from_values(&v).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFormat { .. }));
    }

    #[test]
    fn test_non_numeric_timezone_is_error() {
        let v = values(&[(CONTROL_TIMEZONE, "soon")]);
        let err = ClockConfig::from_values(&v).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimezone { .. }));
    }

    #[test]
    fn test_format_parses_index_and_label() {
        assert_eq!("0".parse::<TimeFormat>().unwrap(), TimeFormat::TwelveHour);
        assert_eq!("12".parse::<TimeFormat>().unwrap(), TimeFormat::TwelveHour);
        assert_eq!("1".parse::<TimeFormat>().unwrap(), TimeFormat::TwentyFourHour);
        assert_eq!("24".parse::<TimeFormat>().unwrap(), TimeFormat::TwentyFourHour);
    }

    #[test]
    fn test_is_unset() {
        let mut v = ControlValues::new();
        assert!(v.is_unset(CONTROL_TIMEZONE));
        v.set(CONTROL_TIMEZONE, "");
        assert!(v.is_unset(CONTROL_TIMEZONE));
        v.set(CONTROL_TIMEZONE, "5");
        assert!(!v.is_unset(CONTROL_TIMEZONE));
    }

    #[test]
    fn test_time_text_fixed_vectors() {
        let catalog = TimezoneCatalog::new();
        let instant = Utc.with_ymd_and_hms(2024, 6, 15, 13, 45, 0).unwrap();

        let london = catalog
            .resolve(catalog.index_of("Europe/London").unwrap())
            .unwrap();
        let local = instant.with_timezone(&london);
        assert_eq!(TimeFormat::TwentyFourHour.time_text(&local), "14:45");
        assert_eq!(TimeFormat::TwelveHour.time_text(&local), "2:45 PM");

        let new_york = catalog
            .resolve(catalog.index_of("America/New_York").unwrap())
            .unwrap();
        let local = instant.with_timezone(&new_york);
        assert_eq!(TimeFormat::TwentyFourHour.time_text(&local), "09:45");
        assert_eq!(TimeFormat::TwelveHour.time_text(&local), "9:45 AM");
    }

    #[test]
    fn test_time_text_truncates_seconds() {
        let instant = Utc.with_ymd_and_hms(2024, 6, 15, 13, 45, 59).unwrap();
        assert_eq!(TimeFormat::TwentyFourHour.time_text(&instant), "13:45");
    }

    fn is_24h_pattern(s: &str) -> bool {
        let b = s.as_bytes();
        b.len() == 5
            && b[0].is_ascii_digit()
            && b[1].is_ascii_digit()
            && b[2] == b':'
            && b[3].is_ascii_digit()
            && b[4].is_ascii_digit()
    }

    fn is_12h_pattern(s: &str) -> bool {
        let Some((time, suffix)) = s.rsplit_once(' ') else {
            return false;
        };
        if suffix != "AM" && suffix != "PM" {
            return false;
        }
        let Some((hour, minute)) = time.split_once(':') else {
            return false;
        };
        (1..=2).contains(&hour.len())
            && hour.bytes().all(|b| b.is_ascii_digit())
            && minute.len() == 2
            && minute.bytes().all(|b| b.is_ascii_digit())
    }

    #[test]
    fn test_time_text_patterns_for_every_zone() {
        let catalog = TimezoneCatalog::new();
        let instant = Utc.with_ymd_and_hms(2024, 6, 15, 13, 45, 0).unwrap();
        for (index, _) in catalog.entries() {
            let zone = catalog.resolve(index).unwrap();
            let local = instant.with_timezone(&zone);
            let t24 = TimeFormat::TwentyFourHour.time_text(&local);
            assert!(is_24h_pattern(&t24), "bad 24h text '{t24}'");
            let t12 = TimeFormat::TwelveHour.time_text(&local);
            assert!(is_12h_pattern(&t12), "bad 12h text '{t12}'");
        }
    }
}
