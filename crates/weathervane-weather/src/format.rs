//! Display formatting and coarse descriptive buckets for raw readings.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

const HPA_TO_MMHG: f64 = 0.750_062;

const LOW_PRESSURE_BELOW_HPA: f64 = 1000.0;
const HIGH_PRESSURE_ABOVE_HPA: f64 = 1025.0;

/// Round half up, the way browsers do (`-20.5` becomes `-20`).
fn round_half_up(value: f64) -> f64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor + 1.0
    } else {
        floor
    }
}

/// Whole-degree temperature, e.g. `"21°"` for 20.5.
pub fn format_temperature(celsius: f64) -> String {
    if !celsius.is_finite() {
        return "--°".to_string();
    }
    // `as i64` also folds -0.0 into 0
    format!("{}°", round_half_up(celsius) as i64)
}

/// Pressure shown in millimetres of mercury.
pub fn format_pressure(hpa: f64) -> String {
    if !hpa.is_finite() {
        return "-- mm Hg".to_string();
    }
    format!("{} mm Hg", round_half_up(hpa * HPA_TO_MMHG) as i64)
}

pub fn format_wind_speed(meters_per_second: f64) -> String {
    format!("{:.1} m/s", meters_per_second)
}

/// Eight-point compass direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WindDirection {
    #[default]
    North,
    Northeast,
    East,
    Southeast,
    South,
    Southwest,
    West,
    Northwest,
}

impl WindDirection {
    const COMPASS: [WindDirection; 8] = [
        Self::North,
        Self::Northeast,
        Self::East,
        Self::Southeast,
        Self::South,
        Self::Southwest,
        Self::West,
        Self::Northwest,
    ];

    /// Bucket a bearing as `round(deg / 45) mod 8`; wraps negative and
    /// over-360 bearings, non-finite input reads as north.
    pub fn from_degrees(degrees: f64) -> Self {
        if !degrees.is_finite() {
            return Self::North;
        }
        let index = round_half_up(degrees / 45.0).rem_euclid(8.0) as usize;
        Self::COMPASS[index % 8]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::North => "north",
            Self::Northeast => "northeast",
            Self::East => "east",
            Self::Southeast => "southeast",
            Self::South => "south",
            Self::Southwest => "southwest",
            Self::West => "west",
            Self::Northwest => "northwest",
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Self::North => "N",
            Self::Northeast => "NE",
            Self::East => "E",
            Self::Southeast => "SE",
            Self::South => "S",
            Self::Southwest => "SW",
            Self::West => "W",
            Self::Northwest => "NW",
        }
    }
}

impl std::fmt::Display for WindDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

pub fn wind_direction(degrees: f64) -> WindDirection {
    WindDirection::from_degrees(degrees)
}

/// Qualitative pressure level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PressureLevel {
    Low,
    Normal,
    High,
}

impl PressureLevel {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::High => "high",
        }
    }
}

/// Bucket a pressure reading in hPa.
pub fn pressure_description(hpa: f64) -> PressureLevel {
    if hpa < LOW_PRESSURE_BELOW_HPA {
        PressureLevel::Low
    } else if hpa > HIGH_PRESSURE_ABOVE_HPA {
        PressureLevel::High
    } else {
        PressureLevel::Normal
    }
}

/// Wind strength on a condensed Beaufort scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WindStrength {
    Calm,
    Light,
    Moderate,
    Strong,
    Gale,
}

impl WindStrength {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Calm => "calm",
            Self::Light => "light",
            Self::Moderate => "moderate",
            Self::Strong => "strong",
            Self::Gale => "gale",
        }
    }
}

/// Bucket a wind speed in m/s.
pub fn wind_description(meters_per_second: f64) -> WindStrength {
    match meters_per_second {
        s if s < 0.5 => WindStrength::Calm,
        s if s < 5.5 => WindStrength::Light,
        s if s < 10.8 => WindStrength::Moderate,
        s if s < 17.2 => WindStrength::Strong,
        s if s.is_nan() => WindStrength::Calm,
        _ => WindStrength::Gale,
    }
}

/// Weekday name for forecast headings. Russian names are lowercase.
pub fn weekday_name(weekday: Weekday, lang: &str) -> &'static str {
    if lang.eq_ignore_ascii_case("ru") {
        match weekday {
            Weekday::Mon => "понедельник",
            Weekday::Tue => "вторник",
            Weekday::Wed => "среда",
            Weekday::Thu => "четверг",
            Weekday::Fri => "пятница",
            Weekday::Sat => "суббота",
            Weekday::Sun => "воскресенье",
        }
    } else {
        match weekday {
            Weekday::Mon => "Monday",
            Weekday::Tue => "Tuesday",
            Weekday::Wed => "Wednesday",
            Weekday::Thu => "Thursday",
            Weekday::Fri => "Friday",
            Weekday::Sat => "Saturday",
            Weekday::Sun => "Sunday",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_temperature_integers() {
        assert_eq!(format_temperature(20.0), "20°");
        assert_eq!(format_temperature(0.0), "0°");
        assert_eq!(format_temperature(-7.0), "-7°");
    }

    #[test]
    fn test_format_temperature_rounds_half_up() {
        assert_eq!(format_temperature(20.5), "21°");
        assert_eq!(format_temperature(20.49), "20°");
        assert_eq!(format_temperature(-20.5), "-20°");
        assert_eq!(format_temperature(-20.51), "-21°");
    }

    #[test]
    fn test_format_temperature_no_negative_zero() {
        assert_eq!(format_temperature(-0.2), "0°");
        assert_eq!(format_temperature(-0.0), "0°");
    }

    #[test]
    fn test_format_temperature_just_below_half() {
        assert_eq!(format_temperature(0.499_999_999_999_999_94), "0°");
        assert_eq!(format_temperature(-0.500_000_000_000_000_1), "-1°");
    }

    #[test]
    fn test_format_temperature_non_finite() {
        assert_eq!(format_temperature(f64::NAN), "--°");
    }

    #[test]
    fn test_format_pressure_in_mm_hg() {
        assert_eq!(format_pressure(1013.25), "760 mm Hg");
        assert_eq!(format_pressure(1000.0), "750 mm Hg");
    }

    #[test]
    fn test_format_wind_speed() {
        assert_eq!(format_wind_speed(3.0), "3.0 m/s");
        assert_eq!(format_wind_speed(4.26), "4.3 m/s");
    }

    #[test]
    fn test_wind_direction_cardinals() {
        assert_eq!(wind_direction(0.0), WindDirection::North);
        assert_eq!(wind_direction(90.0), WindDirection::East);
        assert_eq!(wind_direction(180.0), WindDirection::South);
        assert_eq!(wind_direction(270.0), WindDirection::West);
        assert_eq!(wind_direction(360.0), WindDirection::North);
    }

    #[test]
    fn test_wind_direction_labels() {
        assert_eq!(wind_direction(0.0).label(), "north");
        assert_eq!(wind_direction(360.0).label(), "north");
        assert_eq!(wind_direction(90.0).label(), "east");
        assert_eq!(wind_direction(225.0).label(), "southwest");
    }

    #[test]
    fn test_wind_direction_bucket_edges() {
        assert_eq!(wind_direction(22.4), WindDirection::North);
        assert_eq!(wind_direction(22.5), WindDirection::Northeast);
        assert_eq!(wind_direction(337.4), WindDirection::Northwest);
        assert_eq!(wind_direction(337.5), WindDirection::North);
    }

    #[test]
    fn test_wind_direction_wraps() {
        assert_eq!(wind_direction(-90.0), WindDirection::West);
        assert_eq!(wind_direction(450.0), WindDirection::East);
        assert_eq!(wind_direction(f64::NAN), WindDirection::North);
    }

    #[test]
    fn test_pressure_description() {
        assert_eq!(pressure_description(990.0), PressureLevel::Low);
        assert_eq!(pressure_description(1000.0), PressureLevel::Normal);
        assert_eq!(pressure_description(1013.0), PressureLevel::Normal);
        assert_eq!(pressure_description(1025.0), PressureLevel::Normal);
        assert_eq!(pressure_description(1030.0), PressureLevel::High);
    }

    #[test]
    fn test_wind_description() {
        assert_eq!(wind_description(0.0), WindStrength::Calm);
        assert_eq!(wind_description(3.0), WindStrength::Light);
        assert_eq!(wind_description(7.5), WindStrength::Moderate);
        assert_eq!(wind_description(12.0), WindStrength::Strong);
        assert_eq!(wind_description(25.0), WindStrength::Gale);
        assert_eq!(wind_description(f64::NAN), WindStrength::Calm);
    }

    #[test]
    fn test_weekday_names() {
        assert_eq!(weekday_name(Weekday::Mon, "ru"), "понедельник");
        assert_eq!(weekday_name(Weekday::Sun, "RU"), "воскресенье");
        assert_eq!(weekday_name(Weekday::Fri, "en"), "Friday");
    }
}
