//! Temperature-driven condition labels.
//!
//! Thresholds (°C): above 30 is hot, above 20 warm, above 10 cool,
//! everything else (including NaN) cold.

use serde::{Deserialize, Serialize};

const HOT_ABOVE: f64 = 30.0;
const WARM_ABOVE: f64 = 20.0;
const COOL_ABOVE: f64 = 10.0;

/// Coarse condition category, ordered from coldest to hottest
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ConditionLabel {
    #[default]
    Cold,
    Cool,
    Warm,
    Hot,
}

impl ConditionLabel {
    /// Every label, coldest first
    pub const ALL: [ConditionLabel; 4] = [Self::Cold, Self::Cool, Self::Warm, Self::Hot];

    /// Stable lowercase identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cold => "cold",
            Self::Cool => "cool",
            Self::Warm => "warm",
            Self::Hot => "hot",
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Cold => "Cold",
            Self::Cool => "Cool",
            Self::Warm => "Warm",
            Self::Hot => "Hot",
        }
    }

    /// Icon name for the front end
    pub fn icon_name(&self) -> &'static str {
        match self {
            Self::Cold => "snowflake",
            Self::Cool => "cloud",
            Self::Warm => "cloud_sun",
            Self::Hot => "sun",
        }
    }
}

impl std::fmt::Display for ConditionLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a temperature in °C.
pub fn classify(temperature_celsius: f64) -> ConditionLabel {
    if temperature_celsius > HOT_ABOVE {
        ConditionLabel::Hot
    } else if temperature_celsius > WARM_ABOVE {
        ConditionLabel::Warm
    } else if temperature_celsius > COOL_ABOVE {
        ConditionLabel::Cool
    } else {
        ConditionLabel::Cold
    }
}
