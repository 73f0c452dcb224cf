//! Resting and hunting while camped.
use serde::{Deserialize, Serialize};

use crate::constants::{
    HUNT_AMMO_SPENT_MAX, HUNT_AMMO_SPENT_MIN, HUNT_GAME_MAX, HUNT_GAME_MIN, HUNT_LARGE_KILL_LBS,
    HUNT_MIN_AMMO, HUNT_SMALL_PARTY, HUNT_SMALL_PARTY_SPOIL_MAX, HUNT_SMALL_PARTY_SPOIL_MIN,
    HUNT_SPOIL_MAX, HUNT_SPOIL_MIN, REST_HEAL_MAX, REST_HEAL_MIN,
};
use crate::numbers::non_negative_u32;
use crate::rng::TrailRng;
use crate::state::{Party, Supplies};

/// Heal every living member by a fresh 3..=7 draw each.
///
/// Returns the total health restored.
pub fn camp_rest<R>(party: &mut Party, rng: &mut R) -> u32
where
    R: TrailRng + ?Sized,
{
    let mut restored = 0;
    for member in party.living_mut() {
        let before = u32::from(member.health());
        member.heal(non_negative_u32(rng.int_in(REST_HEAL_MIN, REST_HEAL_MAX)));
        restored += u32::from(member.health()) - before;
    }
    restored
}

/// A completed hunt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HuntOutcome {
    pub ammo_spent: u32,
    pub game_lbs: u32,
    pub spoiled_lbs: u32,
    pub food_gained_lbs: u32,
}

/// Whether the party carries enough bullets to hunt at all.
#[must_use]
pub const fn can_hunt(supplies: &Supplies) -> bool {
    supplies.ammo >= HUNT_MIN_AMMO
}

/// Hunt for game. Returns `None` without touching anything when ammo is short.
pub fn camp_hunt<R>(party: &Party, supplies: &mut Supplies, rng: &mut R) -> Option<HuntOutcome>
where
    R: TrailRng + ?Sized,
{
    if !can_hunt(supplies) {
        return None;
    }
    let ammo_spent =
        non_negative_u32(rng.int_in(HUNT_AMMO_SPENT_MIN, HUNT_AMMO_SPENT_MAX)).min(supplies.ammo);
    supplies.ammo -= ammo_spent;

    let game_lbs = non_negative_u32(rng.int_in(HUNT_GAME_MIN, HUNT_GAME_MAX));
    let (spoil_lo, spoil_hi) =
        if party.living_size() <= HUNT_SMALL_PARTY && game_lbs > HUNT_LARGE_KILL_LBS {
            (HUNT_SMALL_PARTY_SPOIL_MIN, HUNT_SMALL_PARTY_SPOIL_MAX)
        } else {
            (HUNT_SPOIL_MIN, HUNT_SPOIL_MAX)
        };
    let spoiled_lbs = non_negative_u32(rng.int_in(spoil_lo, spoil_hi));
    let food_gained_lbs = game_lbs.saturating_sub(spoiled_lbs);
    supplies.food_lbs = supplies.food_lbs.saturating_add(food_gained_lbs);
    log::debug!("hunt: spent {ammo_spent} bullets, kept {food_gained_lbs} of {game_lbs} lb");
    Some(HuntOutcome {
        ammo_spent,
        game_lbs,
        spoiled_lbs,
        food_gained_lbs,
    })
}
