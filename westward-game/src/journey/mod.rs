//! Day-loop orchestration: actions, the day ledger, and the journey session.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub mod event;
mod session;

pub use event::{DeathCause, StatusReport, TrailEvent};
pub use session::JourneySession;

/// Prompt used when asking for the day's action.
pub const PROMPT_ACTION: &str = "What do you want to do today?";
pub const PROMPT_PACE: &str = "Choose new pace:";
pub const PROMPT_RATIONS: &str = "Choose new rations:";
pub const PROMPT_CROSSING: &str = "How will you cross?";
pub const PROMPT_ACCEPT_TRADE: &str = "Accept the trade?";
pub const PROMPT_CAMP_NIGHT: &str = "Camp for the night? (advance one day)";
pub const PROMPT_QUIT: &str = "Are you sure you want to quit?";

/// The fixed set of things a party can do on a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Travel,
    Rest,
    Hunt,
    ChangeRations,
    ChangePace,
    Trade,
    Quit,
}

impl Action {
    pub const ALL: [Self; 7] = [
        Self::Travel,
        Self::Rest,
        Self::Hunt,
        Self::ChangeRations,
        Self::ChangePace,
        Self::Trade,
        Self::Quit,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Travel => "travel",
            Self::Rest => "rest",
            Self::Hunt => "hunt",
            Self::ChangeRations => "rations",
            Self::ChangePace => "pace",
            Self::Trade => "trade",
            Self::Quit => "quit",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Travel => "Travel",
            Self::Rest => "Rest",
            Self::Hunt => "Hunt",
            Self::ChangeRations => "Change rations",
            Self::ChangePace => "Change pace",
            Self::Trade => "Trade",
            Self::Quit => "Quit game",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Action {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == s)
            .ok_or(())
    }
}

/// Errors surfaced by the journey session.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("collaborator answered {key:?} to {prompt:?}, which was not one of the offered options")]
    InvalidChoice { prompt: String, key: String },
}

/// Tag describing why a particular day ended up in its recorded state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayTag(pub String);

impl DayTag {
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self(value.trim().to_string())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

pub type DayTagSet = SmallVec<[DayTag; 4]>;

/// How a recorded day was spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayKind {
    /// The wagon moved.
    Travel,
    /// Rest, hunt, or a night camped after trading.
    Camp,
    /// Lost to repairs, a lost trail, waiting at a river, or floating a wagon.
    Delay,
}

/// Ledger entry for a single simulated day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRecord {
    /// Zero-based index of the day since departure.
    pub day_index: u32,
    pub date: NaiveDate,
    pub kind: DayKind,
    pub miles: u32,
    #[serde(default)]
    pub tags: DayTagSet,
}

impl DayRecord {
    #[must_use]
    pub fn new(day_index: u32, date: NaiveDate, kind: DayKind, miles: u32) -> Self {
        Self {
            day_index,
            date,
            kind,
            miles,
            tags: DayTagSet::new(),
        }
    }

    /// Adds a tag if it is not already present.
    pub fn push_tag(&mut self, tag: DayTag) {
        if tag.is_empty() || self.tags.contains(&tag) {
            return;
        }
        self.tags.push(tag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actions_round_trip_through_keys() {
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>(), Ok(action));
        }
        assert!("status".parse::<Action>().is_err());
    }

    #[test]
    fn day_record_deduplicates_tags() {
        let date = NaiveDate::from_ymd_opt(1848, 3, 1).unwrap();
        let mut record = DayRecord::new(0, date, DayKind::Delay, 0);
        record.push_tag(DayTag::new("repair"));
        record.push_tag(DayTag::new(" repair "));
        record.push_tag(DayTag::new("   "));
        assert_eq!(record.tags.len(), 1);
    }
}
