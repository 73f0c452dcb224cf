use std::fmt;
use std::str::FromStr;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use westward_game::journey::{
    PROMPT_ACCEPT_TRADE, PROMPT_ACTION, PROMPT_CAMP_NIGHT, PROMPT_CROSSING, PROMPT_PACE,
    PROMPT_QUIT, PROMPT_RATIONS,
};
use westward_game::{
    Action, Collaborator, CrossingChoice, MenuOption, Pace, Rations, ResourceKind, StatusReport,
    TradeOffer, TrailEvent, daily_food_need,
};

/// Built-in strategies for automated runs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    Steady,
    Hustle,
    Cautious,
    Random,
}

impl Strategy {
    pub const ALL: [Self; 4] = [Self::Steady, Self::Hustle, Self::Cautious, Self::Random];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Steady => "steady",
            Self::Hustle => "hustle",
            Self::Cautious => "cautious",
            Self::Random => "random",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Steady => "Normal rations and steady pace; rests when someone is hurting",
            Self::Hustle => "Grueling pace on meager rations; fords or floats everything",
            Self::Cautious => "Filling rations, waits out deep rivers, pays for ferries",
            Self::Random => "Uniform picks among every offered option except quitting",
        }
    }

    /// Build a collaborator that plays this strategy. `seed` only matters for [`Strategy::Random`].
    #[must_use]
    pub fn create_policy(self, seed: u64) -> Box<dyn Collaborator + Send> {
        match self {
            Self::Steady => Box::new(PolicyPlayer::new(SteadyTactics)),
            Self::Hustle => Box::new(PolicyPlayer::new(HustleTactics)),
            Self::Cautious => Box::new(PolicyPlayer::new(CautiousTactics)),
            Self::Random => Box::new(RandomPlayer::new(seed)),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "steady" => Ok(Self::Steady),
            "hustle" => Ok(Self::Hustle),
            "cautious" => Ok(Self::Cautious),
            "random" => Ok(Self::Random),
            _ => Err(()),
        }
    }
}

/// What a rule-based strategy knows when it has to decide.
#[derive(Debug, Clone, Copy)]
struct Outlook {
    min_health: u8,
    days_of_food: u32,
    ammo: u32,
    money_cents: u32,
    pace: Pace,
    rations: Rations,
}

impl Outlook {
    fn from_status(report: &StatusReport) -> Self {
        let living = u32::try_from(report.living.len()).unwrap_or(u32::MAX);
        let need = daily_food_need(report.rations, living).max(1);
        Self {
            min_health: report
                .living
                .iter()
                .map(|member| member.health)
                .min()
                .unwrap_or(0),
            days_of_food: report.food_lbs / need,
            ammo: report.ammo,
            money_cents: report.money_cents,
            pace: report.pace,
            rations: report.rations,
        }
    }

    const fn can_hunt(self) -> bool {
        self.ammo >= 10
    }
}

/// The decisions that distinguish one rule-based strategy from another.
trait Tactics {
    fn pace(&self) -> Pace;

    fn rations(&self) -> Rations;

    /// Day action once pace and rations are already where the tactics want them.
    fn daily_action(&self, outlook: Outlook) -> Action;

    fn crossing(&self, outlook: Outlook, depth_ft: u32, can_wait: bool) -> CrossingChoice;

    fn accept_trade(&self, outlook: Outlook, offer: &TradeOffer) -> bool {
        let needs_food = offer.offered.kind == ResourceKind::Food && outlook.days_of_food < 20;
        let wagon_gain = matches!(offer.offered.kind, ResourceKind::Oxen | ResourceKind::Wheel)
            && offer.wanted.kind != ResourceKind::Oxen;
        needs_food || wagon_gain
    }
}

struct SteadyTactics;
struct HustleTactics;
struct CautiousTactics;

impl Tactics for SteadyTactics {
    fn pace(&self) -> Pace {
        Pace::Steady
    }

    fn rations(&self) -> Rations {
        Rations::Normal
    }

    fn daily_action(&self, outlook: Outlook) -> Action {
        if outlook.min_health < 40 {
            Action::Rest
        } else if outlook.days_of_food < 5 && outlook.can_hunt() {
            Action::Hunt
        } else {
            Action::Travel
        }
    }

    fn crossing(&self, outlook: Outlook, depth_ft: u32, _can_wait: bool) -> CrossingChoice {
        if depth_ft <= 2 {
            CrossingChoice::Ford
        } else if outlook.money_cents >= 1_000 {
            CrossingChoice::Ferry
        } else {
            CrossingChoice::Float
        }
    }
}

impl Tactics for HustleTactics {
    fn pace(&self) -> Pace {
        Pace::Grueling
    }

    fn rations(&self) -> Rations {
        Rations::Meager
    }

    fn daily_action(&self, outlook: Outlook) -> Action {
        if outlook.days_of_food == 0 && outlook.can_hunt() {
            Action::Hunt
        } else {
            Action::Travel
        }
    }

    fn crossing(&self, _outlook: Outlook, depth_ft: u32, _can_wait: bool) -> CrossingChoice {
        if depth_ft <= 3 {
            CrossingChoice::Ford
        } else {
            CrossingChoice::Float
        }
    }

    fn accept_trade(&self, _outlook: Outlook, _offer: &TradeOffer) -> bool {
        false
    }
}

impl Tactics for CautiousTactics {
    fn pace(&self) -> Pace {
        Pace::Steady
    }

    fn rations(&self) -> Rations {
        Rations::Filling
    }

    fn daily_action(&self, outlook: Outlook) -> Action {
        if outlook.min_health < 60 {
            Action::Rest
        } else if outlook.days_of_food < 10 && outlook.can_hunt() {
            Action::Hunt
        } else {
            Action::Travel
        }
    }

    fn crossing(&self, outlook: Outlook, depth_ft: u32, can_wait: bool) -> CrossingChoice {
        if depth_ft > 4 && can_wait {
            CrossingChoice::Wait
        } else if depth_ft <= 1 {
            CrossingChoice::Ford
        } else if outlook.money_cents > 0 {
            CrossingChoice::Ferry
        } else {
            CrossingChoice::Float
        }
    }
}

/// Adapts a set of [`Tactics`] to the engine's menus, tracking the latest status and river.
struct PolicyPlayer<T> {
    tactics: T,
    outlook: Option<Outlook>,
    river_depth_ft: u32,
    pending_offer: Option<TradeOffer>,
}

impl<T: Tactics> PolicyPlayer<T> {
    const fn new(tactics: T) -> Self {
        Self {
            tactics,
            outlook: None,
            river_depth_ft: 0,
            pending_offer: None,
        }
    }

    fn outlook(&self) -> Outlook {
        self.outlook.unwrap_or(Outlook {
            min_health: 100,
            days_of_food: u32::MAX,
            ammo: 0,
            money_cents: 0,
            pace: Pace::Steady,
            rations: Rations::Normal,
        })
    }

    fn next_action(&self) -> Action {
        let outlook = self.outlook();
        if outlook.pace != self.tactics.pace() {
            Action::ChangePace
        } else if outlook.rations != self.tactics.rations() {
            Action::ChangeRations
        } else {
            self.tactics.daily_action(outlook)
        }
    }
}

impl<T: Tactics> Collaborator for PolicyPlayer<T> {
    fn choose(&mut self, prompt: &str, options: &[MenuOption]) -> &'static str {
        let wanted = match prompt {
            PROMPT_ACTION => self.next_action().as_str(),
            PROMPT_PACE => self.tactics.pace().as_str(),
            PROMPT_RATIONS => self.tactics.rations().as_str(),
            PROMPT_CROSSING => {
                let can_wait = options
                    .iter()
                    .any(|option| option.key == CrossingChoice::Wait.as_str());
                self.tactics
                    .crossing(self.outlook(), self.river_depth_ft, can_wait)
                    .as_str()
            }
            _ => "",
        };
        offered_or_first(options, wanted)
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        match prompt {
            PROMPT_ACCEPT_TRADE => self
                .pending_offer
                .take()
                .is_some_and(|offer| self.tactics.accept_trade(self.outlook(), &offer)),
            PROMPT_CAMP_NIGHT => true,
            _ => false,
        }
    }

    fn display(&mut self, event: &TrailEvent) {
        match event {
            TrailEvent::Status(report) => self.outlook = Some(Outlook::from_status(report)),
            TrailEvent::RiverAhead { conditions, .. } => self.river_depth_ft = conditions.depth_ft,
            TrailEvent::TradeOffered(offer) => self.pending_offer = Some(*offer),
            _ => {}
        }
    }
}

/// Picks uniformly among the offered options, never quitting.
struct RandomPlayer {
    rng: ChaCha20Rng,
}

impl RandomPlayer {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }
}

impl Collaborator for RandomPlayer {
    fn choose(&mut self, _prompt: &str, options: &[MenuOption]) -> &'static str {
        let candidates: Vec<&MenuOption> = options
            .iter()
            .filter(|option| option.key != Action::Quit.as_str())
            .collect();
        if candidates.is_empty() {
            return offered_or_first(options, "");
        }
        candidates[self.rng.gen_range(0..candidates.len())].key
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        prompt != PROMPT_QUIT && self.rng.gen_bool(0.5)
    }

    fn display(&mut self, _event: &TrailEvent) {}
}

fn offered_or_first(options: &[MenuOption], wanted: &str) -> &'static str {
    options
        .iter()
        .find(|option| option.key == wanted)
        .or_else(|| options.first())
        .map_or("", |option| option.key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use westward_game::{JourneySession, Party, Supplies, TrailConfig};

    fn menu(keys: &[&'static str]) -> Vec<MenuOption> {
        keys.iter().map(|key| MenuOption::new(key, *key)).collect()
    }

    fn session(seed: u64) -> JourneySession {
        JourneySession::seeded(
            TrailConfig::default_config(),
            Party::new("Lead", ["Ada", "Eli", "Jo"], 60_000),
            Supplies {
                food_lbs: 900,
                ammo: 300,
                clothing: 4,
                ..Supplies::default()
            },
            seed,
        )
    }

    #[test]
    fn strategies_parse_from_their_names() {
        for strategy in Strategy::ALL {
            assert_eq!(strategy.as_str().parse::<Strategy>(), Ok(strategy));
        }
        assert_eq!(" Hustle ".parse::<Strategy>(), Ok(Strategy::Hustle));
        assert!("monte-carlo".parse::<Strategy>().is_err());
    }

    #[test]
    fn rule_based_player_fixes_pace_and_rations_first() {
        let mut player = PolicyPlayer::new(HustleTactics);
        let actions = menu(&["travel", "rest", "hunt", "rations", "pace", "trade", "quit"]);
        assert_eq!(player.choose(PROMPT_ACTION, &actions), "pace");
        assert_eq!(
            player.choose(PROMPT_PACE, &menu(&["steady", "strenuous", "grueling"])),
            "grueling"
        );
        assert!(!player.confirm(PROMPT_QUIT));
    }

    #[test]
    fn cautious_player_waits_only_while_waiting_is_offered() {
        let mut player = PolicyPlayer::new(CautiousTactics);
        player.river_depth_ft = 6;
        player.outlook = Some(Outlook {
            min_health: 90,
            days_of_food: 30,
            ammo: 50,
            money_cents: 2_000,
            pace: Pace::Steady,
            rations: Rations::Filling,
        });
        let with_wait = menu(&["ford", "float", "ferry", "wait"]);
        assert_eq!(player.choose(PROMPT_CROSSING, &with_wait), "wait");
        let without_wait = menu(&["ford", "float", "ferry"]);
        assert_eq!(player.choose(PROMPT_CROSSING, &without_wait), "ferry");
    }

    #[test]
    fn random_player_never_quits() {
        let mut player = RandomPlayer::new(9);
        let actions = menu(&["travel", "quit"]);
        for _ in 0..50 {
            assert_eq!(player.choose(PROMPT_ACTION, &actions), "travel");
            assert!(!player.confirm(PROMPT_QUIT));
        }
    }

    #[test]
    fn every_strategy_finishes_a_journey() {
        for strategy in Strategy::ALL {
            let mut game = session(2024);
            let mut policy = strategy.create_policy(2024);
            let summary = game.run(policy.as_mut()).unwrap();
            assert!(summary.status.is_terminal(), "{strategy} left the journey active");
        }
    }
}
