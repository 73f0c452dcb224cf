//! Final scoring and the serializable end-of-journey summary.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::{SCORE_CENTS_PER_POINT, SCORE_FOOD_LBS_PER_POINT, SCORE_PER_SURVIVOR};
use crate::numbers::count_to_u32;
use crate::state::{JourneyState, JourneyStatus};

/// money / 100 + food / 5 + 50 per survivor, using integer division.
#[must_use]
pub const fn final_score(money_cents: u32, food_lbs: u32, survivors: u32) -> u32 {
    (money_cents / SCORE_CENTS_PER_POINT)
        .saturating_add(food_lbs / SCORE_FOOD_LBS_PER_POINT)
        .saturating_add(SCORE_PER_SURVIVOR.saturating_mul(survivors))
}

/// What a finished (or abandoned) journey looked like.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JourneySummary {
    pub status: JourneyStatus,
    pub score: u32,
    pub survivors: Vec<String>,
    pub party_size: u32,
    pub miles_traveled: u32,
    pub total_miles: u32,
    pub days_elapsed: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub landmarks_reached: u32,
    pub money_cents: u32,
    pub food_lbs: u32,
}

impl JourneySummary {
    #[must_use]
    pub fn from_state(state: &JourneyState) -> Self {
        let survivors = state.party.survivor_names();
        let score = final_score(
            state.party.money_cents,
            state.supplies.food_lbs,
            count_to_u32(survivors.len()),
        );
        Self {
            status: state.status(),
            score,
            party_size: count_to_u32(state.party.members.len()),
            survivors,
            miles_traveled: state.miles_traveled(),
            total_miles: state.total_miles(),
            days_elapsed: state.days_elapsed(),
            start_date: state.start_date(),
            end_date: state.date(),
            landmarks_reached: count_to_u32(state.landmark_cursor()),
            money_cents: state.party.money_cents,
            food_lbs: state.supplies.food_lbs,
        }
    }

    #[must_use]
    pub const fn is_victory(&self) -> bool {
        matches!(self.status, JourneyStatus::Victory)
    }
}
