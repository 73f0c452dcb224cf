//! River crossing resolution.
//!
//! The interactive wait loop lives in the journey session; this module rolls
//! river conditions, prices each method, and applies the single risk draw.
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    CROSSING_DEPTH_FREE_FT, FERRY_BASE_RISK_BP, FERRY_RISK_PER_FT_BP, FLOAT_BASE_RISK_BP,
    FLOAT_EXTRA_DAYS, FLOAT_RISK_PER_FT_BP, FORD_BASE_RISK_BP, FORD_RISK_PER_FT_BP,
    RISK_BASIS_POINTS, RIVER_WIDTH_MAX_FT, RIVER_WIDTH_MIN_FT, SWAMP_AMMO_LOSS_CHANCE,
    SWAMP_AMMO_LOSS_MAX, SWAMP_AMMO_LOSS_MIN, SWAMP_FOOD_LOSS_MAX, SWAMP_FOOD_LOSS_MIN,
    SWAMP_INJURY_CHANCE, SWAMP_INJURY_MAX, SWAMP_INJURY_MIN,
};
use crate::numbers::non_negative_u32;
use crate::rng::TrailRng;
use crate::state::{Party, RiverDepth, Supplies};

/// What the collaborator can pick at the riverbank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossingChoice {
    Wait,
    Ford,
    Float,
    Ferry,
}

impl CrossingChoice {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wait => "wait",
            Self::Ford => "ford",
            Self::Float => "float",
            Self::Ferry => "ferry",
        }
    }

    #[must_use]
    pub const fn method(self) -> Option<CrossingMethod> {
        match self {
            Self::Wait => None,
            Self::Ford => Some(CrossingMethod::Ford),
            Self::Float => Some(CrossingMethod::Float),
            Self::Ferry => Some(CrossingMethod::Ferry),
        }
    }
}

impl fmt::Display for CrossingChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CrossingChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wait" => Ok(Self::Wait),
            "ford" => Ok(Self::Ford),
            "float" => Ok(Self::Float),
            "ferry" => Ok(Self::Ferry),
            _ => Err(()),
        }
    }
}

/// A way of getting the wagon across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossingMethod {
    Ford,
    Float,
    Ferry,
}

impl CrossingMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ford => "ford",
            Self::Float => "float",
            Self::Ferry => "ferry",
        }
    }

    /// Swamping risk in basis points for a river `depth_ft` deep, capped at certainty.
    #[must_use]
    pub const fn risk_basis_points(self, depth_ft: u32) -> u32 {
        let (base, per_ft) = match self {
            Self::Ford => (FORD_BASE_RISK_BP, FORD_RISK_PER_FT_BP),
            Self::Float => (FLOAT_BASE_RISK_BP, FLOAT_RISK_PER_FT_BP),
            Self::Ferry => (FERRY_BASE_RISK_BP, FERRY_RISK_PER_FT_BP),
        };
        let excess = depth_ft.saturating_sub(CROSSING_DEPTH_FREE_FT);
        let risk = base.saturating_add(per_ft.saturating_mul(excess));
        if risk > RISK_BASIS_POINTS {
            RISK_BASIS_POINTS
        } else {
            risk
        }
    }
}

impl fmt::Display for CrossingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Swamping probability for `method` at `depth_ft`.
#[must_use]
pub fn crossing_risk(method: CrossingMethod, depth_ft: u32) -> f64 {
    f64::from(method.risk_basis_points(depth_ft)) / f64::from(RISK_BASIS_POINTS)
}

/// Today's river, rolled when the party arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiverConditions {
    pub depth_ft: u32,
    /// Informational only.
    pub width_ft: u32,
}

/// Roll depth within the landmark's range, then width.
pub fn survey_river<R>(depth: RiverDepth, rng: &mut R) -> RiverConditions
where
    R: TrailRng + ?Sized,
{
    let lo = i32::try_from(depth.min_ft).unwrap_or(i32::MAX);
    let hi = i32::try_from(depth.max_ft).unwrap_or(i32::MAX);
    RiverConditions {
        depth_ft: non_negative_u32(rng.int_in(lo, hi)),
        width_ft: non_negative_u32(rng.int_in(RIVER_WIDTH_MIN_FT, RIVER_WIDTH_MAX_FT)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossingInjury {
    pub member: String,
    pub damage: u32,
    pub drowned: bool,
}

/// Losses from a swamped wagon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct SwampLosses {
    pub food_lost_lbs: u32,
    pub ammo_lost: u32,
    pub injuries: Vec<CrossingInjury>,
}

impl SwampLosses {
    #[must_use]
    pub fn drowned(&self) -> Vec<String> {
        self.injuries
            .iter()
            .filter(|injury| injury.drowned)
            .map(|injury| injury.member.clone())
            .collect()
    }
}

/// Result of one crossing attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossingResolution {
    /// What the party asked for.
    pub requested: CrossingMethod,
    /// Whose risk applied; a ferry the party cannot pay for fords instead.
    pub applied: CrossingMethod,
    pub fee_paid_cents: u32,
    pub risk_basis_points: u32,
    pub extra_days: u32,
    pub swamped: Option<SwampLosses>,
}

impl CrossingResolution {
    #[must_use]
    pub const fn ferry_refused(&self) -> bool {
        matches!(self.requested, CrossingMethod::Ferry)
            && matches!(self.applied, CrossingMethod::Ford)
    }
}

/// Attempt the crossing with a single risk draw.
pub fn resolve_crossing<R>(
    requested: CrossingMethod,
    conditions: RiverConditions,
    ferry_fee_cents: u32,
    party: &mut Party,
    supplies: &mut Supplies,
    rng: &mut R,
) -> CrossingResolution
where
    R: TrailRng + ?Sized,
{
    let (applied, fee_paid_cents) = match requested {
        CrossingMethod::Ferry if party.money_cents >= ferry_fee_cents => {
            party.money_cents -= ferry_fee_cents;
            (CrossingMethod::Ferry, ferry_fee_cents)
        }
        CrossingMethod::Ferry => (CrossingMethod::Ford, 0),
        other => (other, 0),
    };
    let extra_days = if applied == CrossingMethod::Float {
        FLOAT_EXTRA_DAYS
    } else {
        0
    };
    let risk_basis_points = applied.risk_basis_points(conditions.depth_ft);
    let risk = crossing_risk(applied, conditions.depth_ft);
    let swamped = rng
        .chance(risk)
        .then(|| swamp_wagon(party, supplies, rng));
    log::debug!(
        "crossing by {applied} at {} ft (risk {risk:.2}): swamped={}",
        conditions.depth_ft,
        swamped.is_some()
    );
    CrossingResolution {
        requested,
        applied,
        fee_paid_cents,
        risk_basis_points,
        extra_days,
        swamped,
    }
}

fn swamp_wagon<R>(party: &mut Party, supplies: &mut Supplies, rng: &mut R) -> SwampLosses
where
    R: TrailRng + ?Sized,
{
    let food_lost_lbs = non_negative_u32(rng.int_in(SWAMP_FOOD_LOSS_MIN, SWAMP_FOOD_LOSS_MAX))
        .min(supplies.food_lbs);
    supplies.food_lbs -= food_lost_lbs;

    let mut ammo_lost = 0;
    if supplies.ammo > 0 && rng.chance(SWAMP_AMMO_LOSS_CHANCE) {
        ammo_lost = non_negative_u32(rng.int_in(SWAMP_AMMO_LOSS_MIN, SWAMP_AMMO_LOSS_MAX))
            .min(supplies.ammo);
        supplies.ammo -= ammo_lost;
    }

    let mut injuries = Vec::new();
    for member in party.living_mut() {
        if !rng.chance(SWAMP_INJURY_CHANCE) {
            continue;
        }
        let damage = non_negative_u32(rng.int_in(SWAMP_INJURY_MIN, SWAMP_INJURY_MAX));
        let drowned = member.damage(damage);
        injuries.push(CrossingInjury {
            member: member.name().to_string(),
            damage,
            drowned,
        });
    }

    SwampLosses {
        food_lost_lbs,
        ammo_lost,
        injuries,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;

    fn river(depth_ft: u32) -> RiverConditions {
        RiverConditions {
            depth_ft,
            width_ft: 300,
        }
    }

    #[test]
    fn risk_grows_past_three_feet() {
        assert_eq!(CrossingMethod::Ford.risk_basis_points(2), 2_500);
        assert_eq!(CrossingMethod::Ford.risk_basis_points(5), 3_500);
        assert_eq!(CrossingMethod::Float.risk_basis_points(8), 2_500);
        assert_eq!(CrossingMethod::Ferry.risk_basis_points(10), 1_800);
        assert_eq!(CrossingMethod::Ford.risk_basis_points(1_000), RISK_BASIS_POINTS);
        assert!((crossing_risk(CrossingMethod::Ford, 5) - 0.35).abs() < f64::EPSILON);
    }

    #[test]
    fn survey_stays_in_range() {
        let mut rng = ScriptedRng::new().with_ints([9, 500]);
        let conditions = survey_river(
            RiverDepth {
                min_ft: 4,
                max_ft: 10,
            },
            &mut rng,
        );
        assert_eq!(conditions, RiverConditions { depth_ft: 9, width_ft: 400 });
    }

    #[test]
    fn unaffordable_ferry_fords_without_fee() {
        let mut party = Party::new("Lead", Vec::<String>::new(), 499);
        let mut supplies = Supplies::default();
        let mut rng = ScriptedRng::new();
        let resolution = resolve_crossing(
            CrossingMethod::Ferry,
            river(5),
            500,
            &mut party,
            &mut supplies,
            &mut rng,
        );
        assert!(resolution.ferry_refused());
        assert_eq!(resolution.fee_paid_cents, 0);
        assert_eq!(resolution.risk_basis_points, 3_500);
        assert_eq!(party.money_cents, 499);
    }

    #[test]
    fn ferry_charges_fee() {
        let mut party = Party::new("Lead", Vec::<String>::new(), 1_000);
        let mut supplies = Supplies::default();
        let mut rng = ScriptedRng::new();
        let resolution = resolve_crossing(
            CrossingMethod::Ferry,
            river(3),
            500,
            &mut party,
            &mut supplies,
            &mut rng,
        );
        assert_eq!(resolution.applied, CrossingMethod::Ferry);
        assert_eq!(party.money_cents, 500);
        assert!(resolution.swamped.is_none());
    }

    #[test]
    fn float_costs_an_extra_day() {
        let mut party = Party::new("Lead", Vec::<String>::new(), 0);
        let mut supplies = Supplies::default();
        let mut rng = ScriptedRng::new().with_units([0.9]);
        let resolution = resolve_crossing(
            CrossingMethod::Float,
            river(4),
            500,
            &mut party,
            &mut supplies,
            &mut rng,
        );
        assert_eq!(resolution.extra_days, 1);
        assert!(resolution.swamped.is_none());
    }

    #[test]
    fn swamping_losses_are_clamped() {
        let mut party = Party::new("Lead", ["A"], 0);
        let mut supplies = Supplies {
            food_lbs: 30,
            ammo: 12,
            ..Supplies::default()
        };
        let mut rng = ScriptedRng::new()
            .with_units([0.1, 0.2, 0.1, 0.9])
            .with_ints([100, 50, 15]);
        let resolution = resolve_crossing(
            CrossingMethod::Ford,
            river(3),
            500,
            &mut party,
            &mut supplies,
            &mut rng,
        );
        let losses = resolution.swamped.unwrap();
        assert_eq!(losses.food_lost_lbs, 30);
        assert_eq!(losses.ammo_lost, 12);
        assert_eq!(losses.injuries.len(), 1);
        assert_eq!(losses.injuries[0].member, "Lead");
        assert_eq!(party.members[0].health(), 85);
        assert_eq!(supplies.food_lbs, 0);
        assert_eq!(supplies.ammo, 0);
        assert!(losses.drowned().is_empty());
    }
}
