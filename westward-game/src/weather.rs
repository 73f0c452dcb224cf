//! Daily weather derived from the calendar month.
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{WEATHER_EXTREME_PENALTY, WEATHER_OVERRIDE_CHANCE};
use crate::rng::{TrailRng, pick};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    Cold,
    Chilly,
    Mild,
    Warm,
    Hot,
    Cool,
    Rain,
    Windy,
    VeryCold,
    VeryHot,
}

/// Labels that may replace the seasonal weather on an unusual day.
const OVERRIDES: [Weather; 4] = [
    Weather::Rain,
    Weather::Windy,
    Weather::VeryCold,
    Weather::VeryHot,
];

impl Weather {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cold => "cold",
            Self::Chilly => "chilly",
            Self::Mild => "mild",
            Self::Warm => "warm",
            Self::Hot => "hot",
            Self::Cool => "cool",
            Self::Rain => "rain",
            Self::Windy => "windy",
            Self::VeryCold => "very cold",
            Self::VeryHot => "very hot",
        }
    }

    /// Conditions that cut daily mileage.
    #[must_use]
    pub const fn slows_travel(self) -> bool {
        matches!(self, Self::Rain | Self::VeryCold | Self::VeryHot)
    }

    /// Extreme temperatures that raise the illness chance.
    #[must_use]
    pub const fn is_extreme(self) -> bool {
        matches!(self, Self::VeryCold | Self::VeryHot)
    }
}

impl fmt::Display for Weather {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The day's weather plus its health modifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub condition: Weather,
    pub health_modifier: i32,
}

/// Seasonal weather for the month of `date`, before any random override.
#[must_use]
pub const fn seasonal_weather(month: u32) -> WeatherReport {
    let (condition, health_modifier) = match month {
        3 => (Weather::Cold, -2),
        4 => (Weather::Chilly, -1),
        6 => (Weather::Warm, -1),
        7 | 8 => (Weather::Hot, -2),
        9 => (Weather::Cool, -1),
        10 => (Weather::Cold, -2),
        _ => (Weather::Mild, 0),
    };
    WeatherReport {
        condition,
        health_modifier,
    }
}

/// Roll the weather for `date`.
///
/// One chance draw decides the override; when it fires a second draw picks
/// the replacement label. Extreme replacements worsen the modifier by one.
pub fn roll_weather<R>(date: NaiveDate, rng: &mut R) -> WeatherReport
where
    R: TrailRng + ?Sized,
{
    let mut report = seasonal_weather(date.month());
    if rng.chance(WEATHER_OVERRIDE_CHANCE)
        && let Some(&condition) = pick(rng, &OVERRIDES)
    {
        log::debug!(
            "weather override on {date}: {} -> {condition}",
            report.condition
        );
        report.condition = condition;
        if condition.is_extreme() {
            report.health_modifier -= WEATHER_EXTREME_PENALTY;
        }
    }
    report
}
