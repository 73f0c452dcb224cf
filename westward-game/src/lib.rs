//! Westward Game Engine
//!
//! Platform-agnostic daily simulation of an overland wagon journey: rations,
//! travel, weather, illness, wagon mishaps, river crossings, and barter.
//! Input and output go through the [`Collaborator`] trait and every random
//! draw through [`TrailRng`], so front ends and tests supply both.

pub mod camp;
pub mod config;
pub mod constants;
pub mod consumption;
pub mod crossings;
pub mod hazards;
pub mod health;
pub mod journey;
pub mod landmarks;
pub mod numbers;
pub mod outfitting;
pub mod result;
pub mod rng;
pub mod state;
pub mod trade;
pub mod travel;
pub mod weather;

// Re-export commonly used types
pub use camp::{HuntOutcome, camp_hunt, camp_rest, can_hunt};
pub use config::{ConfigError, TrailConfig};
pub use consumption::{ConsumptionOutcome, consume_daily_food, daily_food_need};
pub use crossings::{
    CrossingChoice, CrossingMethod, CrossingResolution, RiverConditions, SwampLosses,
    crossing_risk, resolve_crossing, survey_river,
};
pub use hazards::{HazardOutcome, Illness, Mishap, MishapOutcome, WagonPart, roll_hazards};
pub use health::apply_daily_health;
pub use journey::{
    Action, DayKind, DayRecord, DayTag, DayTagSet, DeathCause, EngineError, JourneySession,
    StatusReport, TrailEvent,
};
pub use landmarks::reach_next_landmark;
pub use outfitting::{
    Loadout, OutfitError, Profession, ReceiptLine, StartMonth, StoreItem, StorePrices,
    outfit_party,
};
pub use result::{JourneySummary, final_score};
pub use rng::{ScriptedRng, SeededRng, TrailRng};
pub use state::{
    DefeatReason, JourneyState, JourneyStatus, Landmark, Pace, Party, Person, Rations, RiverDepth,
    Supplies,
};
pub use trade::{Lot, ResourceKind, TradeOffer, TradeResult, roll_offer, settle_trade};
pub use travel::daily_miles;
pub use weather::{Weather, WeatherReport, roll_weather};

/// One entry in a menu offered to the collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOption {
    /// Stable key the collaborator must echo back.
    pub key: &'static str,
    pub label: String,
}

impl MenuOption {
    #[must_use]
    pub fn new(key: &'static str, label: impl Into<String>) -> Self {
        Self {
            key,
            label: label.into(),
        }
    }
}

/// The outside world as seen by the journey: a decision maker and a display.
///
/// Implemented by the interactive terminal front end, automated strategies,
/// and scripted test doubles.
pub trait Collaborator {
    /// Pick one of `options`, returning its key.
    ///
    /// Returning a key that was not offered makes the session fail with
    /// [`EngineError::InvalidChoice`].
    fn choose(&mut self, prompt: &str, options: &[MenuOption]) -> &'static str;

    /// Answer a yes/no question.
    fn confirm(&mut self, prompt: &str) -> bool;

    /// Show an event to the player.
    fn display(&mut self, event: &TrailEvent);
}

impl<C: Collaborator + ?Sized> Collaborator for &mut C {
    fn choose(&mut self, prompt: &str, options: &[MenuOption]) -> &'static str {
        (**self).choose(prompt, options)
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        (**self).confirm(prompt)
    }

    fn display(&mut self, event: &TrailEvent) {
        (**self).display(event);
    }
}
