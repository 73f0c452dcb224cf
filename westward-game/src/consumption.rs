//! Daily food draw-down and starvation.
use serde::{Deserialize, Serialize};

use crate::constants::{OUNCES_PER_POUND, STARVATION_BASE_PENALTY, STARVATION_SHARE_DIVISOR};
use crate::numbers::count_to_u32;
use crate::state::{Party, Rations, Supplies};

/// What one day of eating did to the wagon and the party.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ConsumptionOutcome {
    pub needed_lbs: u32,
    pub eaten_lbs: u32,
    /// Pounds that could not be served; zero on a fed day.
    pub shortage_lbs: u32,
    /// Health lost by each living member when starving.
    pub starvation_penalty: u32,
    pub deaths: Vec<String>,
}

impl ConsumptionOutcome {
    #[must_use]
    pub const fn starved(&self) -> bool {
        self.shortage_lbs > 0
    }
}

/// Whole pounds of food the living party needs today, rounded up.
#[must_use]
pub const fn daily_food_need(rations: Rations, living: u32) -> u32 {
    let ounces = rations.ounces_per_person() * living;
    ounces.div_ceil(OUNCES_PER_POUND)
}

/// Feed the party for one day.
///
/// A party with nobody alive eats nothing and nothing changes.
pub fn consume_daily_food(party: &mut Party, supplies: &mut Supplies) -> ConsumptionOutcome {
    let living = count_to_u32(party.living_size());
    if living == 0 {
        return ConsumptionOutcome::default();
    }
    let needed_lbs = daily_food_need(party.rations, living);
    if supplies.food_lbs >= needed_lbs {
        supplies.food_lbs -= needed_lbs;
        return ConsumptionOutcome {
            needed_lbs,
            eaten_lbs: needed_lbs,
            ..ConsumptionOutcome::default()
        };
    }

    let eaten_lbs = supplies.food_lbs;
    let shortage_lbs = needed_lbs - eaten_lbs;
    supplies.food_lbs = 0;
    let share = (STARVATION_SHARE_DIVISOR * living).max(1);
    let starvation_penalty = STARVATION_BASE_PENALTY + shortage_lbs / share;
    let deaths = party
        .living_mut()
        .filter_map(|member| {
            member
                .damage(starvation_penalty)
                .then(|| member.name().to_string())
        })
        .collect::<Vec<_>>();
    log::debug!(
        "party short {shortage_lbs} lb of food; each member loses {starvation_penalty} health"
    );
    ConsumptionOutcome {
        needed_lbs,
        eaten_lbs,
        shortage_lbs,
        starvation_penalty,
        deaths,
    }
}
