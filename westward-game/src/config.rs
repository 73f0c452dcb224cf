//! Route, calendar, and fee configuration for a journey.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::state::Landmark;

const DEFAULT_TRAIL_DATA: &str = include_str!("../data/trail.json");

const TOTAL_MILES_MIN: u32 = 500;
const TOTAL_MILES_MAX: u32 = 10_000;

/// Tunable journey parameters loaded from JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailConfig {
    #[serde(default = "TrailConfig::default_total_miles")]
    pub total_miles: u32,
    #[serde(default = "TrailConfig::default_start_date")]
    pub start_date: NaiveDate,
    #[serde(default = "TrailConfig::default_winter_cutoff")]
    pub winter_cutoff: NaiveDate,
    #[serde(default = "TrailConfig::default_ferry_fee_cents")]
    pub ferry_fee_cents: u32,
    /// Days a party may wait at one river before Wait stops being offered.
    ///
    /// Waiting is otherwise open-ended. The limit only stops a player that
    /// always answers Wait from looping forever. The winter cutoff is only
    /// checked between actions, so it cannot end a wait on its own.
    #[serde(default = "TrailConfig::default_crossing_wait_limit")]
    pub crossing_wait_limit: u32,
    #[serde(default)]
    pub landmarks: Vec<Landmark>,
}

/// Errors raised when a trail configuration is malformed or violates its bounds.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("trail config is not valid JSON: {message}")]
    Parse { message: String },
    #[error("total_miles must be between {min} and {max} (got {value})")]
    TotalMilesRange { min: u32, max: u32, value: u32 },
    #[error("landmark {name:?} at mile {mile} does not come after mile {previous}")]
    LandmarkOrder {
        name: String,
        mile: u32,
        previous: u32,
    },
    #[error("landmark {name:?} at mile {mile} is not before the destination at mile {total}")]
    LandmarkBeyondDestination { name: String, mile: u32, total: u32 },
    #[error("river {name:?} depth range invalid (min {min} > max {max})")]
    RiverDepthRange { name: String, min: u32, max: u32 },
    #[error("winter cutoff {cutoff} must fall after the start date {start}")]
    CutoffBeforeStart { start: NaiveDate, cutoff: NaiveDate },
}

impl TrailConfig {
    const fn default_total_miles() -> u32 {
        2_000
    }

    fn default_start_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(1848, 3, 1).unwrap_or(NaiveDate::MIN)
    }

    fn default_winter_cutoff() -> NaiveDate {
        NaiveDate::from_ymd_opt(1848, 12, 1).unwrap_or(NaiveDate::MAX)
    }

    const fn default_ferry_fee_cents() -> u32 {
        500
    }

    const fn default_crossing_wait_limit() -> u32 {
        60
    }

    /// Parse and validate a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and any validation
    /// error reported by [`TrailConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|err| ConfigError::Parse {
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load the embedded trail definition, falling back to the built-in route.
    #[must_use]
    pub fn load_from_static() -> Self {
        Self::from_json(DEFAULT_TRAIL_DATA).unwrap_or_else(|err| {
            log::warn!("embedded trail data rejected, using built-in route: {err}");
            Self::builtin()
        })
    }

    #[must_use]
    pub fn default_config() -> Self {
        Self::load_from_static()
    }

    /// # Errors
    ///
    /// Returns `ConfigError` when any field violates the documented bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_total_miles()?;
        self.validate_calendar()?;
        self.validate_landmarks()?;
        Ok(())
    }

    fn validate_total_miles(&self) -> Result<(), ConfigError> {
        if !(TOTAL_MILES_MIN..=TOTAL_MILES_MAX).contains(&self.total_miles) {
            return Err(ConfigError::TotalMilesRange {
                min: TOTAL_MILES_MIN,
                max: TOTAL_MILES_MAX,
                value: self.total_miles,
            });
        }
        Ok(())
    }

    fn validate_calendar(&self) -> Result<(), ConfigError> {
        if self.winter_cutoff <= self.start_date {
            return Err(ConfigError::CutoffBeforeStart {
                start: self.start_date,
                cutoff: self.winter_cutoff,
            });
        }
        Ok(())
    }

    fn validate_landmarks(&self) -> Result<(), ConfigError> {
        let mut previous: Option<u32> = None;
        for landmark in &self.landmarks {
            if let Some(previous) = previous
                && landmark.mile <= previous
            {
                return Err(ConfigError::LandmarkOrder {
                    name: landmark.name.clone(),
                    mile: landmark.mile,
                    previous,
                });
            }
            if landmark.mile >= self.total_miles {
                return Err(ConfigError::LandmarkBeyondDestination {
                    name: landmark.name.clone(),
                    mile: landmark.mile,
                    total: self.total_miles,
                });
            }
            if let Some(depth) = landmark.river
                && depth.min_ft > depth.max_ft
            {
                return Err(ConfigError::RiverDepthRange {
                    name: landmark.name.clone(),
                    min: depth.min_ft,
                    max: depth.max_ft,
                });
            }
            previous = Some(landmark.mile);
        }
        Ok(())
    }

    /// The Oregon Trail route, kept in code so the engine always has a valid default.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            total_miles: Self::default_total_miles(),
            start_date: Self::default_start_date(),
            winter_cutoff: Self::default_winter_cutoff(),
            ferry_fee_cents: Self::default_ferry_fee_cents(),
            crossing_wait_limit: Self::default_crossing_wait_limit(),
            landmarks: vec![
                Landmark::river("Kaw River Crossing", 102, 2, 6),
                Landmark::new("Fort Kearny", 623),
                Landmark::new("Chimney Rock", 664),
                Landmark::new("Fort Laramie", 788),
                Landmark::new("Independence Rock", 940),
                Landmark::new("South Pass", 1_092),
                Landmark::river("Green River Crossing", 1_195, 3, 8),
                Landmark::new("Fort Hall", 1_403),
                Landmark::river("Snake River Crossing", 1_640, 4, 10),
                Landmark::new("Fort Boise", 1_753),
                Landmark::new("The Dalles", 1_965),
            ],
        }
    }
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_data_matches_builtin_route() {
        let config = TrailConfig::load_from_static();
        assert_eq!(config, TrailConfig::builtin());
        assert!(config.validate().is_ok());
        assert_eq!(config.landmarks.len(), 11);
        assert_eq!(
            config
                .landmarks
                .iter()
                .filter(|landmark| landmark.is_river_crossing())
                .count(),
            3
        );
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config = TrailConfig::from_json("{}").expect("defaults are valid");
        assert_eq!(config.total_miles, 2_000);
        assert_eq!(config.ferry_fee_cents, 500);
        assert_eq!(config.crossing_wait_limit, 60);
        assert!(config.landmarks.is_empty());
    }

    #[test]
    fn rejects_out_of_range_distance() {
        let err = TrailConfig::from_json(r#"{"total_miles": 120}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::TotalMilesRange { value: 120, .. }
        ));
    }

    #[test]
    fn rejects_unordered_landmarks() {
        let mut config = TrailConfig::builtin();
        config.landmarks.swap(1, 2);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::LandmarkOrder { mile: 623, previous: 664, .. })
        ));
    }

    #[test]
    fn rejects_landmark_past_destination() {
        let mut config = TrailConfig::builtin();
        config.total_miles = 1_900;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::LandmarkBeyondDestination { mile: 1_965, .. })
        ));
    }

    #[test]
    fn rejects_inverted_depth_and_calendar() {
        let mut config = TrailConfig::builtin();
        config.landmarks[0] = Landmark::river("Kaw River Crossing", 102, 6, 2);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::RiverDepthRange { min: 6, max: 2, .. })
        ));

        let mut config = TrailConfig::builtin();
        config.winter_cutoff = config.start_date;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::CutoffBeforeStart { .. })
        ));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            TrailConfig::from_json("{ not json"),
            Err(ConfigError::Parse { .. })
        ));
    }
}
