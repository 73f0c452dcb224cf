//! Narration emitted to the collaborator as the journey unfolds.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::camp::HuntOutcome;
use crate::crossings::{CrossingMethod, CrossingResolution, RiverConditions};
use crate::hazards::{Illness, MishapOutcome};
use crate::result::JourneySummary;
use crate::state::{DefeatReason, JourneyState, JourneyStatus, Pace, Rations};
use crate::trade::{TradeOffer, TradeResult};
use crate::weather::WeatherReport;

/// Why a party member died.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    Starvation,
    Exhaustion,
    Illness(Illness),
    BadWater,
    Drowning,
}

impl fmt::Display for DeathCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Starvation => f.write_str("starvation"),
            Self::Exhaustion => f.write_str("exhaustion"),
            Self::Illness(illness) => write!(f, "{illness}"),
            Self::BadWater => f.write_str("bad water"),
            Self::Drowning => f.write_str("drowning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberHealth {
    pub name: String,
    pub health: u8,
}

/// Snapshot shown at the start of every day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub date: NaiveDate,
    pub weather: WeatherReport,
    pub miles_traveled: u32,
    pub total_miles: u32,
    pub pace: Pace,
    pub rations: Rations,
    pub food_lbs: u32,
    pub ammo: u32,
    pub clothing: u32,
    pub wheels: u32,
    pub axles: u32,
    pub tongues: u32,
    pub oxen: u32,
    pub money_cents: u32,
    pub living: Vec<MemberHealth>,
    /// Name of the next landmark and the miles left to it.
    pub next_landmark: Option<(String, u32)>,
}

impl StatusReport {
    #[must_use]
    pub fn capture(state: &JourneyState, weather: WeatherReport) -> Self {
        let supplies = &state.supplies;
        Self {
            date: state.date(),
            weather,
            miles_traveled: state.miles_traveled(),
            total_miles: state.total_miles(),
            pace: state.party.pace,
            rations: state.party.rations,
            food_lbs: supplies.food_lbs,
            ammo: supplies.ammo,
            clothing: supplies.clothing,
            wheels: supplies.wheels,
            axles: supplies.axles,
            tongues: supplies.tongues,
            oxen: supplies.oxen,
            money_cents: state.party.money_cents,
            living: state
                .party
                .living()
                .map(|member| MemberHealth {
                    name: member.name().to_string(),
                    health: member.health(),
                })
                .collect(),
            next_landmark: state.next_landmark().map(|landmark| {
                (
                    landmark.name.clone(),
                    landmark.mile.saturating_sub(state.miles_traveled()),
                )
            }),
        }
    }
}

/// Format cents as dollars, e.g. `$1,600.00`.
#[must_use]
pub fn format_money(cents: u32) -> String {
    let dollars = (cents / 100).to_string();
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (idx, digit) in dollars.chars().enumerate() {
        if idx > 0 && (dollars.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("${grouped}.{:02}", cents % 100)
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Date: {}   Weather: {}   Miles: {}/{}",
            self.date.format("%b %d, %Y"),
            self.weather.condition,
            self.miles_traveled,
            self.total_miles
        )?;
        writeln!(f, "Pace: {}   Rations: {}", self.pace, self.rations)?;
        writeln!(
            f,
            "Food: {} lbs   Ammo: {}   Clothing: {} sets",
            self.food_lbs, self.ammo, self.clothing
        )?;
        writeln!(
            f,
            "Parts: wheels {}, axles {}, tongues {}",
            self.wheels, self.axles, self.tongues
        )?;
        writeln!(
            f,
            "Oxen: {}   Cash: {}",
            self.oxen,
            format_money(self.money_cents)
        )?;
        let health = self
            .living
            .iter()
            .map(|member| format!("{}({})", member.name, member.health))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(f, "Party health: {health}")?;
        match &self.next_landmark {
            Some((name, miles)) => write!(f, "Next landmark: {name} in {miles} miles"),
            None => f.write_str("No more landmarks ahead."),
        }
    }
}

/// Something the collaborator should be told about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum TrailEvent {
    Status(StatusReport),
    Traveled {
        miles: u32,
    },
    Starving {
        shortage_lbs: u32,
        penalty: u32,
    },
    FellIll {
        member: String,
        illness: Illness,
        damage: u32,
    },
    Died {
        member: String,
        cause: DeathCause,
    },
    Mishap(MishapOutcome),
    LandmarkReached {
        name: String,
        mile: u32,
    },
    RiverAhead {
        name: String,
        conditions: RiverConditions,
    },
    WaitedAtRiver {
        days_waited: u32,
    },
    Crossed(CrossingResolution),
    Rested {
        restored: u32,
    },
    HuntRefused {
        ammo: u32,
    },
    Hunted(HuntOutcome),
    TradeOffered(TradeOffer),
    TradeSettled(TradeResult),
    PaceChanged(Pace),
    RationsChanged(Rations),
    QuitDeclined,
    Finished(JourneySummary),
}

impl fmt::Display for TrailEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status(report) => write!(f, "{report}"),
            Self::Traveled { miles } => write!(f, "You traveled {miles} miles today."),
            Self::Starving {
                shortage_lbs,
                penalty,
            } => write!(
                f,
                "The party is starving: {shortage_lbs} lbs short (-{penalty} health each)."
            ),
            Self::FellIll {
                member,
                illness,
                damage,
            } => write!(f, "{member} fell ill with {illness} (-{damage} health)."),
            Self::Died { member, cause } => match cause {
                DeathCause::Drowning => write!(f, "{member} drowned."),
                cause => write!(f, "{member} has died of {cause}."),
            },
            Self::Mishap(outcome) => fmt_mishap(outcome, f),
            Self::LandmarkReached { name, mile } => {
                write!(f, "=== You reached {name} (mile {mile}) ===")
            }
            Self::RiverAhead { name, conditions } => write!(
                f,
                "A river blocks your path at {name}. Estimated depth: {} ft; width: ~{} ft.",
                conditions.depth_ft, conditions.width_ft
            ),
            Self::WaitedAtRiver { days_waited } => write!(
                f,
                "You camp and wait for better conditions ({days_waited} day(s) so far)."
            ),
            Self::Crossed(resolution) => fmt_crossing(resolution, f),
            Self::Rested { restored } => {
                write!(f, "You rest for the day (+{restored} health across the party).")
            }
            Self::HuntRefused { ammo } => write!(
                f,
                "You don't have enough ammunition to hunt ({ammo} bullets; need at least 10)."
            ),
            Self::Hunted(outcome) => write!(
                f,
                "You brought back {} lbs of game, but {} lbs spoiled. (+{} lbs food, -{} bullets)",
                outcome.game_lbs, outcome.spoiled_lbs, outcome.food_gained_lbs, outcome.ammo_spent
            ),
            Self::TradeOffered(offer) => write!(f, "A trader approaches: {offer}."),
            Self::TradeSettled(result) => f.write_str(match result {
                TradeResult::Completed => "The trade is complete.",
                TradeResult::Declined => "You decline the trade.",
                TradeResult::Refused => "You don't have enough to make that trade.",
            }),
            Self::PaceChanged(pace) => write!(f, "Pace set to {pace}."),
            Self::RationsChanged(rations) => write!(f, "Rations set to {rations}."),
            Self::QuitDeclined => f.write_str("You press on."),
            Self::Finished(summary) => fmt_finish(summary, f),
        }
    }
}

fn fmt_mishap(outcome: &MishapOutcome, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match outcome {
        MishapOutcome::Repaired { part } => {
            write!(f, "A wagon {part} broke. You used a spare.")
        }
        MishapOutcome::Stranded { part, delay_days } => write!(
            f,
            "A wagon {part} broke, and you have no spare. Repairs cost {delay_days} extra day(s)."
        ),
        MishapOutcome::LostTrail { delay_days } => {
            write!(f, "You got lost. You lost {delay_days} day(s).")
        }
        MishapOutcome::BadWater { damage, .. } => {
            write!(f, "Bad water made everyone feel worse (-{damage} health).")
        }
        MishapOutcome::Theft { food_lost_lbs } => {
            write!(f, "A thief stole {food_lost_lbs} lbs of food.")
        }
    }
}

fn fmt_crossing(resolution: &CrossingResolution, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if resolution.ferry_refused() {
        f.write_str("You don't have enough money for the ferry; you must ford. ")?;
    } else if resolution.applied == CrossingMethod::Ferry {
        write!(
            f,
            "You paid {} for the ferry. ",
            format_money(resolution.fee_paid_cents)
        )?;
    }
    match &resolution.swamped {
        None => f.write_str("You crossed safely."),
        Some(losses) => {
            write!(
                f,
                "Disaster! The wagon swamped while crossing. You lost {} lbs of food",
                losses.food_lost_lbs
            )?;
            if losses.ammo_lost > 0 {
                write!(f, " and {} bullets", losses.ammo_lost)?;
            }
            f.write_str(".")?;
            for injury in &losses.injuries {
                write!(f, " {} was injured (-{} health).", injury.member, injury.damage)?;
            }
            Ok(())
        }
    }
}

fn fmt_finish(summary: &JourneySummary, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match summary.status {
        JourneyStatus::Victory => writeln!(f, "You made it to Oregon City! Congratulations!")?,
        JourneyStatus::Defeat(DefeatReason::Perished) => {
            writeln!(f, "Your entire party has perished. Game over.")?;
        }
        JourneyStatus::Defeat(DefeatReason::Winter) => writeln!(
            f,
            "Winter has arrived and you are still on the trail. The journey becomes impossible."
        )?,
        JourneyStatus::Defeat(DefeatReason::Abandoned) => {
            writeln!(f, "You abandon the journey. Game over.")?;
        }
        JourneyStatus::Active => writeln!(f, "The journey continues.")?,
    }
    if !summary.survivors.is_empty() {
        writeln!(f, "Survivors: {}", summary.survivors.join(", "))?;
    }
    write!(f, "Final score: {}", summary.score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TrailConfig;
    use crate::state::{Party, Supplies};
    use crate::weather::seasonal_weather;

    #[test]
    fn money_groups_thousands() {
        assert_eq!(format_money(160_000), "$1,600.00");
        assert_eq!(format_money(505), "$5.05");
        assert_eq!(format_money(0), "$0.00");
        assert_eq!(format_money(123_456_789), "$1,234,567.89");
    }

    #[test]
    fn status_report_names_next_landmark() {
        let mut state = JourneyState::new(
            &TrailConfig::builtin(),
            Party::new("Lead", ["A"], 80_000),
            Supplies::default(),
        );
        state.add_miles(40);
        let report = StatusReport::capture(&state, seasonal_weather(3));
        assert_eq!(
            report.next_landmark,
            Some(("Kaw River Crossing".to_string(), 62))
        );
        let text = report.to_string();
        assert!(text.contains("Date: Mar 01, 1848"));
        assert!(text.contains("Cash: $800.00"));
        assert!(text.contains("Lead(100), A(100)"));
    }

    #[test]
    fn deaths_read_naturally() {
        let drowned = TrailEvent::Died {
            member: "Ada".into(),
            cause: DeathCause::Drowning,
        };
        assert_eq!(drowned.to_string(), "Ada drowned.");
        let ill = TrailEvent::Died {
            member: "Eli".into(),
            cause: DeathCause::Illness(Illness::Cholera),
        };
        assert_eq!(ill.to_string(), "Eli has died of cholera.");
    }
}
