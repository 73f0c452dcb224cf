//! Randomized illness and mishap resolution.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    BAD_WATER_DAMAGE, BREAKDOWN_DELAY_DAYS, ILLNESS_BASE_CHANCE, ILLNESS_DAMAGE_MAX,
    ILLNESS_DAMAGE_MIN, ILLNESS_EXTREME_WEATHER_BONUS, ILLNESS_GRUELING_BONUS,
    ILLNESS_POOR_RATIONS_BONUS, LOST_TRAIL_DAYS_MAX, LOST_TRAIL_DAYS_MIN, MISHAP_BASE_CHANCE,
    MISHAP_GRUELING_BONUS, THEFT_FOOD_MAX, THEFT_FOOD_MIN,
};
use crate::numbers::non_negative_u32;
use crate::rng::{TrailRng, pick};
use crate::state::{Pace, Party, Rations, Supplies};
use crate::weather::Weather;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Illness {
    Dysentery,
    Exhaustion,
    Cholera,
    Measles,
    Typhoid,
    BadCold,
}

impl Illness {
    pub const ALL: [Self; 6] = [
        Self::Dysentery,
        Self::Exhaustion,
        Self::Cholera,
        Self::Measles,
        Self::Typhoid,
        Self::BadCold,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dysentery => "dysentery",
            Self::Exhaustion => "exhaustion",
            Self::Cholera => "cholera",
            Self::Measles => "measles",
            Self::Typhoid => "typhoid",
            Self::BadCold => "a bad cold",
        }
    }
}

impl fmt::Display for Illness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Spare parts a wagon carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WagonPart {
    Wheel,
    Axle,
    Tongue,
}

impl WagonPart {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wheel => "wheel",
            Self::Axle => "axle",
            Self::Tongue => "tongue",
        }
    }

    const fn spares(self, supplies: &mut Supplies) -> &mut u32 {
        match self {
            Self::Wheel => &mut supplies.wheels,
            Self::Axle => &mut supplies.axles,
            Self::Tongue => &mut supplies.tongues,
        }
    }
}

impl fmt::Display for WagonPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mishap {
    BrokenWheel,
    BrokenAxle,
    BrokenTongue,
    LostTrail,
    BadWater,
    Theft,
}

impl Mishap {
    pub const ALL: [Self; 6] = [
        Self::BrokenWheel,
        Self::BrokenAxle,
        Self::BrokenTongue,
        Self::LostTrail,
        Self::BadWater,
        Self::Theft,
    ];
}

/// One member falling ill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IllnessCase {
    pub member: String,
    pub illness: Illness,
    pub damage: u32,
    pub died: bool,
}

/// How a mishap played out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MishapOutcome {
    /// A spare part replaced the broken one.
    Repaired { part: WagonPart },
    /// No spare on hand; repairs cost time.
    Stranded { part: WagonPart, delay_days: u32 },
    LostTrail { delay_days: u32 },
    BadWater { damage: u32, deaths: Vec<String> },
    Theft { food_lost_lbs: u32 },
}

impl MishapOutcome {
    #[must_use]
    pub const fn delay_days(&self) -> u32 {
        match self {
            Self::Stranded { delay_days, .. } | Self::LostTrail { delay_days } => *delay_days,
            Self::Repaired { .. } | Self::BadWater { .. } | Self::Theft { .. } => 0,
        }
    }
}

/// Everything the hazard passes did today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HazardOutcome {
    pub illnesses: Vec<IllnessCase>,
    pub mishap: Option<MishapOutcome>,
}

/// Per-member daily illness probability.
#[must_use]
pub fn illness_chance(pace: Pace, rations: Rations, weather: Weather) -> f64 {
    let mut chance = ILLNESS_BASE_CHANCE;
    if pace == Pace::Grueling {
        chance += ILLNESS_GRUELING_BONUS;
    }
    if rations.is_poor() {
        chance += ILLNESS_POOR_RATIONS_BONUS;
    }
    if weather.is_extreme() {
        chance += ILLNESS_EXTREME_WEATHER_BONUS;
    }
    chance
}

/// Daily probability of a wagon mishap.
#[must_use]
pub fn mishap_chance(pace: Pace) -> f64 {
    if pace == Pace::Grueling {
        MISHAP_BASE_CHANCE + MISHAP_GRUELING_BONUS
    } else {
        MISHAP_BASE_CHANCE
    }
}

/// Run the illness pass then the mishap pass.
pub fn roll_hazards<R>(
    party: &mut Party,
    supplies: &mut Supplies,
    weather: Weather,
    rng: &mut R,
) -> HazardOutcome
where
    R: TrailRng + ?Sized,
{
    let illnesses = roll_illnesses(party, weather, rng);
    let mishap = if rng.chance(mishap_chance(party.pace)) {
        pick(rng, &Mishap::ALL).map(|&mishap| resolve_mishap(mishap, party, supplies, rng))
    } else {
        None
    };
    HazardOutcome { illnesses, mishap }
}

fn roll_illnesses<R>(party: &mut Party, weather: Weather, rng: &mut R) -> Vec<IllnessCase>
where
    R: TrailRng + ?Sized,
{
    let chance = illness_chance(party.pace, party.rations, weather);
    let mut cases = Vec::new();
    for member in party.living_mut() {
        if !rng.chance(chance) {
            continue;
        }
        let Some(&illness) = pick(rng, &Illness::ALL) else {
            continue;
        };
        let damage = non_negative_u32(rng.int_in(ILLNESS_DAMAGE_MIN, ILLNESS_DAMAGE_MAX));
        let died = member.damage(damage);
        log::debug!("{} has {illness} (-{damage} health)", member.name());
        cases.push(IllnessCase {
            member: member.name().to_string(),
            illness,
            damage,
            died,
        });
    }
    cases
}

/// Apply a specific mishap. Exposed so scripted tests can force one.
pub fn resolve_mishap<R>(
    mishap: Mishap,
    party: &mut Party,
    supplies: &mut Supplies,
    rng: &mut R,
) -> MishapOutcome
where
    R: TrailRng + ?Sized,
{
    let outcome = match mishap {
        Mishap::BrokenWheel => repair_part(WagonPart::Wheel, supplies),
        Mishap::BrokenAxle => repair_part(WagonPart::Axle, supplies),
        Mishap::BrokenTongue => repair_part(WagonPart::Tongue, supplies),
        Mishap::LostTrail => MishapOutcome::LostTrail {
            delay_days: non_negative_u32(rng.int_in(LOST_TRAIL_DAYS_MIN, LOST_TRAIL_DAYS_MAX)),
        },
        Mishap::BadWater => {
            let damage = u32::from(BAD_WATER_DAMAGE);
            let deaths = party
                .living_mut()
                .filter_map(|member| member.damage(damage).then(|| member.name().to_string()))
                .collect();
            MishapOutcome::BadWater { damage, deaths }
        }
        Mishap::Theft => {
            let stolen = non_negative_u32(rng.int_in(THEFT_FOOD_MIN, THEFT_FOOD_MAX));
            let food_lost_lbs = stolen.min(supplies.food_lbs);
            supplies.food_lbs -= food_lost_lbs;
            MishapOutcome::Theft { food_lost_lbs }
        }
    };
    log::debug!("mishap {mishap:?}: {outcome:?}");
    outcome
}

fn repair_part(part: WagonPart, supplies: &mut Supplies) -> MishapOutcome {
    let spares = part.spares(supplies);
    if *spares > 0 {
        *spares -= 1;
        MishapOutcome::Repaired { part }
    } else {
        MishapOutcome::Stranded {
            part,
            delay_days: BREAKDOWN_DELAY_DAYS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;
    use crate::state::Person;

    #[test]
    fn chances_stack_bonuses() {
        assert!((illness_chance(Pace::Steady, Rations::Normal, Weather::Mild) - 0.02).abs() < 1e-9);
        assert!(
            (illness_chance(Pace::Grueling, Rations::Meager, Weather::VeryCold) - 0.05).abs()
                < 1e-9
        );
        assert!((illness_chance(Pace::Steady, Rations::Normal, Weather::Rain) - 0.02).abs() < 1e-9);
        assert!((mishap_chance(Pace::Grueling) - 0.05).abs() < 1e-9);
    }

    #[test]
    fn quiet_day_draws_once_per_member_plus_mishap() {
        let mut party = Party::new("Lead", ["A", "B"], 0);
        let mut supplies = Supplies::default();
        let mut rng = ScriptedRng::new();
        let outcome = roll_hazards(&mut party, &mut supplies, Weather::Mild, &mut rng);
        assert_eq!(outcome, HazardOutcome::default());
        assert_eq!(rng.draws(), 4);
    }

    #[test]
    fn illness_damages_and_can_kill() {
        let mut party = Party::new("Lead", ["A"], 0);
        party.members[1] = Person::with_health("A", 12);
        let mut supplies = Supplies::default();
        let mut rng = ScriptedRng::new()
            .with_units([0.5, 0.01])
            .with_indices([2])
            .with_ints([20]);
        let outcome = roll_hazards(&mut party, &mut supplies, Weather::Mild, &mut rng);
        assert_eq!(outcome.illnesses.len(), 1);
        assert_eq!(outcome.illnesses[0].illness, Illness::Cholera);
        assert!(outcome.illnesses[0].died);
        assert_eq!(outcome.illnesses[0].member, "A");
        assert!(!party.members[1].is_alive());
    }

    #[test]
    fn breakage_uses_spare_or_delays() {
        let mut party = Party::new("Lead", Vec::<String>::new(), 0);
        let mut supplies = Supplies {
            axles: 1,
            ..Supplies::default()
        };
        let mut rng = ScriptedRng::new();
        let first = resolve_mishap(Mishap::BrokenAxle, &mut party, &mut supplies, &mut rng);
        assert_eq!(first, MishapOutcome::Repaired { part: WagonPart::Axle });
        assert_eq!(supplies.axles, 0);
        let second = resolve_mishap(Mishap::BrokenAxle, &mut party, &mut supplies, &mut rng);
        assert_eq!(second.delay_days(), 1);
        assert_eq!(supplies.axles, 0);
    }

    #[test]
    fn lost_trail_costs_extra_days() {
        let mut party = Party::new("Lead", Vec::<String>::new(), 0);
        let mut supplies = Supplies::default();
        let mut rng = ScriptedRng::new().with_ints([3]);
        let outcome = resolve_mishap(Mishap::LostTrail, &mut party, &mut supplies, &mut rng);
        assert_eq!(outcome.delay_days(), 3);
    }

    #[test]
    fn theft_never_takes_more_than_carried() {
        let mut party = Party::new("Lead", Vec::<String>::new(), 0);
        let mut supplies = Supplies {
            food_lbs: 7,
            ..Supplies::default()
        };
        let mut rng = ScriptedRng::new().with_ints([40]);
        let outcome = resolve_mishap(Mishap::Theft, &mut party, &mut supplies, &mut rng);
        assert_eq!(outcome, MishapOutcome::Theft { food_lost_lbs: 7 });
        assert_eq!(supplies.food_lbs, 0);
    }

    #[test]
    fn bad_water_hurts_everyone_alive() {
        let mut party = Party::new("Lead", ["A"], 0);
        party.members[1] = Person::with_health("A", 5);
        let mut supplies = Supplies::default();
        let mut rng = ScriptedRng::new();
        let outcome = resolve_mishap(Mishap::BadWater, &mut party, &mut supplies, &mut rng);
        assert_eq!(party.members[0].health(), 95);
        assert_eq!(
            outcome,
            MishapOutcome::BadWater {
                damage: 5,
                deaths: vec!["A".to_string()]
            }
        );
    }
}
