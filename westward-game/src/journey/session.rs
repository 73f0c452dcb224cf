use std::str::FromStr;

use crate::{Collaborator, MenuOption};
use crate::camp::{camp_hunt, camp_rest, can_hunt};
use crate::config::TrailConfig;
use crate::consumption::consume_daily_food;
use crate::crossings::{CrossingChoice, resolve_crossing, survey_river};
use crate::health::apply_daily_health;
use crate::journey::{
    Action, DayKind, DayRecord, DayTag, DayTagSet, EngineError, PROMPT_ACCEPT_TRADE,
    PROMPT_ACTION, PROMPT_CAMP_NIGHT, PROMPT_CROSSING, PROMPT_PACE, PROMPT_QUIT, PROMPT_RATIONS,
};
use crate::journey::event::{DeathCause, StatusReport, TrailEvent, format_money};
use crate::hazards::{MishapOutcome, roll_hazards};
use crate::landmarks::reach_next_landmark;
use crate::result::JourneySummary;
use crate::rng::{SeededRng, TrailRng};
use crate::state::{
    DefeatReason, JourneyState, JourneyStatus, Landmark, Pace, Party, Rations, RiverDepth,
    Supplies,
};
use crate::trade::{TradeResult, roll_offer, settle_trade};
use crate::travel::daily_miles;
use crate::weather::{WeatherReport, roll_weather};

/// Days spent by one action, committed to the calendar in a single step.
///
/// Each delay keeps its own cause so the ledger tags every lost day correctly.
#[derive(Debug, Default)]
struct DayTally {
    primary: Option<(DayKind, u32, DayTagSet)>,
    delays: Vec<(u32, DayTag)>,
}

impl DayTally {
    fn day(kind: DayKind, miles: u32, tag: &str) -> Self {
        let mut tags = DayTagSet::new();
        tags.push(DayTag::new(tag));
        Self {
            primary: Some((kind, miles, tags)),
            ..Self::default()
        }
    }

    fn delay(&mut self, days: u32, tag: &str) {
        if days > 0 {
            self.delays.push((days, DayTag::new(tag)));
        }
    }

    fn total_days(&self) -> u32 {
        let delayed: u32 = self.delays.iter().map(|(days, _)| days).sum();
        u32::from(self.primary.is_some()) + delayed
    }
}

/// One game in progress: the owned journey state, its configuration, and its random source.
#[derive(Debug, Clone)]
pub struct JourneySession<R: TrailRng = SeededRng> {
    config: TrailConfig,
    state: JourneyState,
    rng: R,
}

impl JourneySession<SeededRng> {
    /// Start a journey whose every draw derives from `seed`.
    #[must_use]
    pub fn seeded(config: TrailConfig, party: Party, supplies: Supplies, seed: u64) -> Self {
        Self::new(config, party, supplies, SeededRng::from_user_seed(seed))
    }
}

impl<R: TrailRng> JourneySession<R> {
    #[must_use]
    pub fn new(config: TrailConfig, party: Party, supplies: Supplies, rng: R) -> Self {
        let state = JourneyState::new(&config, party, supplies);
        Self { config, state, rng }
    }

    #[must_use]
    pub const fn state(&self) -> &JourneyState {
        &self.state
    }

    /// Mutable access for setup before the first day, such as picking a departure month.
    pub const fn state_mut(&mut self) -> &mut JourneyState {
        &mut self.state
    }

    #[must_use]
    pub const fn config(&self) -> &TrailConfig {
        &self.config
    }

    #[must_use]
    pub const fn rng(&self) -> &R {
        &self.rng
    }

    #[must_use]
    pub fn into_state(self) -> JourneyState {
        self.state
    }

    #[must_use]
    pub fn summary(&self) -> JourneySummary {
        JourneySummary::from_state(&self.state)
    }

    /// Play until the journey ends.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidChoice`] if the collaborator answers a
    /// menu with a key that was not offered.
    pub fn run<C>(&mut self, collaborator: &mut C) -> Result<JourneySummary, EngineError>
    where
        C: Collaborator + ?Sized,
    {
        while !self.state.status().is_terminal() {
            self.step(collaborator)?;
        }
        Ok(self.summary())
    }

    /// Run one iteration of the day loop: weather, status, terminal checks, then one action.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidChoice`] if the collaborator answers a
    /// menu with a key that was not offered.
    pub fn step<C>(&mut self, collaborator: &mut C) -> Result<JourneyStatus, EngineError>
    where
        C: Collaborator + ?Sized,
    {
        if self.state.status().is_terminal() {
            return Ok(self.state.status());
        }
        let weather = roll_weather(self.state.date(), &mut self.rng);
        collaborator.display(&TrailEvent::Status(StatusReport::capture(
            &self.state,
            weather,
        )));

        if let Some(reason) = self.defeat_before_action() {
            self.conclude(collaborator, JourneyStatus::Defeat(reason));
            return Ok(self.state.status());
        }

        let options = Action::ALL.map(|action| MenuOption::new(action.as_str(), action.label()));
        let action: Action = ask(collaborator, PROMPT_ACTION, &options)?;
        log::debug!("day {}: {action}", self.state.days_elapsed());
        match action {
            Action::Travel => self.travel(collaborator, weather)?,
            Action::Rest => self.rest(collaborator),
            Action::Hunt => self.hunt(collaborator, weather),
            Action::ChangeRations => {
                let options =
                    Rations::ALL.map(|rations| MenuOption::new(rations.as_str(), rations.label()));
                let rations: Rations = ask(collaborator, PROMPT_RATIONS, &options)?;
                self.state.party.rations = rations;
                collaborator.display(&TrailEvent::RationsChanged(rations));
            }
            Action::ChangePace => {
                let options = Pace::ALL.map(|pace| MenuOption::new(pace.as_str(), pace.label()));
                let pace: Pace = ask(collaborator, PROMPT_PACE, &options)?;
                self.state.party.pace = pace;
                collaborator.display(&TrailEvent::PaceChanged(pace));
            }
            Action::Trade => self.trade(collaborator, weather),
            Action::Quit => {
                if collaborator.confirm(PROMPT_QUIT) {
                    self.conclude(collaborator, JourneyStatus::Defeat(DefeatReason::Abandoned));
                } else {
                    collaborator.display(&TrailEvent::QuitDeclined);
                }
            }
        }
        Ok(self.state.status())
    }

    fn defeat_before_action(&self) -> Option<DefeatReason> {
        if self.state.party.is_wiped_out() {
            return Some(DefeatReason::Perished);
        }
        if self.state.date() >= self.state.winter_cutoff() && !self.state.has_arrived() {
            return Some(DefeatReason::Winter);
        }
        None
    }

    fn conclude<C>(&mut self, collaborator: &mut C, status: JourneyStatus)
    where
        C: Collaborator + ?Sized,
    {
        self.state.finish(status);
        let summary = self.summary();
        log::info!(
            "journey ended: {} after {} days at mile {} (score {})",
            summary.status,
            summary.days_elapsed,
            summary.miles_traveled,
            summary.score
        );
        collaborator.display(&TrailEvent::Finished(summary));
    }

    fn commit(&mut self, tally: DayTally) {
        let days = tally.total_days();
        let mut day_index = self.state.days_elapsed();
        let mut date = self.state.date();
        if let Some((kind, miles, tags)) = tally.primary {
            let mut record = DayRecord::new(day_index, date, kind, miles);
            record.tags = tags;
            self.state.push_day_record(record);
            day_index += 1;
            date = date.succ_opt().unwrap_or(date);
        }
        for (delay_days, tag) in tally.delays {
            for _ in 0..delay_days {
                let mut record = DayRecord::new(day_index, date, DayKind::Delay, 0);
                record.push_tag(tag.clone());
                self.state.push_day_record(record);
                day_index += 1;
                date = date.succ_opt().unwrap_or(date);
            }
        }
        self.state.spend_days(days);
    }

    fn travel<C>(&mut self, collaborator: &mut C, weather: WeatherReport) -> Result<(), EngineError>
    where
        C: Collaborator + ?Sized,
    {
        let miles = daily_miles(
            self.state.party.pace,
            weather.condition,
            self.state.supplies.oxen,
            &mut self.rng,
        );
        self.state.add_miles(miles);
        let mut tally = DayTally::day(DayKind::Travel, miles, "travel");
        collaborator.display(&TrailEvent::Traveled { miles });

        self.end_of_day(collaborator, weather, &mut tally);
        if !self.state.party.is_wiped_out()
            && let Some(landmark) = reach_next_landmark(&mut self.state)
        {
            collaborator.display(&TrailEvent::LandmarkReached {
                name: landmark.name.clone(),
                mile: landmark.mile,
            });
            if let Some(depth) = landmark.river {
                self.cross_river(collaborator, &landmark, depth, &mut tally)?;
            }
        }
        self.commit(tally);
        if self.state.has_arrived() {
            self.conclude(collaborator, JourneyStatus::Victory);
        }
        Ok(())
    }

    fn cross_river<C>(
        &mut self,
        collaborator: &mut C,
        landmark: &Landmark,
        depth: RiverDepth,
        tally: &mut DayTally,
    ) -> Result<(), EngineError>
    where
        C: Collaborator + ?Sized,
    {
        let mut days_waited = 0;
        loop {
            let conditions = survey_river(depth, &mut self.rng);
            collaborator.display(&TrailEvent::RiverAhead {
                name: landmark.name.clone(),
                conditions,
            });
            let options = self.crossing_menu(days_waited);
            let choice: CrossingChoice = ask(collaborator, PROMPT_CROSSING, &options)?;
            let Some(method) = choice.method() else {
                days_waited += 1;
                tally.delay(1, "river_wait");
                collaborator.display(&TrailEvent::WaitedAtRiver { days_waited });
                continue;
            };

            let resolution = resolve_crossing(
                method,
                conditions,
                self.config.ferry_fee_cents,
                &mut self.state.party,
                &mut self.state.supplies,
                &mut self.rng,
            );
            tally.delay(resolution.extra_days, "float");
            log::info!(
                "crossed {} by {} ({} ft deep): {}",
                landmark.name,
                resolution.applied,
                conditions.depth_ft,
                if resolution.swamped.is_some() {
                    "swamped"
                } else {
                    "safe"
                }
            );
            let drowned = resolution
                .swamped
                .as_ref()
                .map(|losses| losses.drowned())
                .unwrap_or_default();
            collaborator.display(&TrailEvent::Crossed(resolution));
            for member in drowned {
                collaborator.display(&TrailEvent::Died {
                    member,
                    cause: DeathCause::Drowning,
                });
            }
            return Ok(());
        }
    }

    fn crossing_menu(&self, days_waited: u32) -> Vec<MenuOption> {
        let mut options = vec![
            MenuOption::new(CrossingChoice::Ford.as_str(), "Attempt to ford (risky)"),
            MenuOption::new(
                CrossingChoice::Float.as_str(),
                "Caulk wagon & float (safer, lose a day)",
            ),
            MenuOption::new(
                CrossingChoice::Ferry.as_str(),
                format!(
                    "Take a ferry ({}, safest)",
                    format_money(self.config.ferry_fee_cents)
                ),
            ),
        ];
        if days_waited < self.config.crossing_wait_limit {
            options.push(MenuOption::new(
                CrossingChoice::Wait.as_str(),
                "Wait and rest a day",
            ));
        }
        options
    }

    fn rest<C>(&mut self, collaborator: &mut C)
    where
        C: Collaborator + ?Sized,
    {
        let tally = DayTally::day(DayKind::Camp, 0, "rest");
        let restored = camp_rest(&mut self.state.party, &mut self.rng);
        collaborator.display(&TrailEvent::Rested { restored });
        self.eat(collaborator);
        self.commit(tally);
    }

    fn hunt<C>(&mut self, collaborator: &mut C, weather: WeatherReport)
    where
        C: Collaborator + ?Sized,
    {
        if !can_hunt(&self.state.supplies) {
            collaborator.display(&TrailEvent::HuntRefused {
                ammo: self.state.supplies.ammo,
            });
            return;
        }
        let Some(outcome) = camp_hunt(&self.state.party, &mut self.state.supplies, &mut self.rng)
        else {
            return;
        };
        let mut tally = DayTally::day(DayKind::Camp, 0, "hunt");
        collaborator.display(&TrailEvent::Hunted(outcome));
        self.end_of_day(collaborator, weather, &mut tally);
        self.commit(tally);
    }

    fn trade<C>(&mut self, collaborator: &mut C, weather: WeatherReport)
    where
        C: Collaborator + ?Sized,
    {
        let offer = roll_offer(&mut self.rng);
        collaborator.display(&TrailEvent::TradeOffered(offer));
        let result = if collaborator.confirm(PROMPT_ACCEPT_TRADE) {
            settle_trade(&offer, &mut self.state.party, &mut self.state.supplies)
        } else {
            TradeResult::Declined
        };
        collaborator.display(&TrailEvent::TradeSettled(result));

        if collaborator.confirm(PROMPT_CAMP_NIGHT) {
            let mut tally = DayTally::day(DayKind::Camp, 0, "trade");
            self.end_of_day(collaborator, weather, &mut tally);
            self.commit(tally);
        }
    }

    fn eat<C>(&mut self, collaborator: &mut C)
    where
        C: Collaborator + ?Sized,
    {
        let outcome = consume_daily_food(&mut self.state.party, &mut self.state.supplies);
        if outcome.starved() {
            collaborator.display(&TrailEvent::Starving {
                shortage_lbs: outcome.shortage_lbs,
                penalty: outcome.starvation_penalty,
            });
        }
        for member in outcome.deaths {
            collaborator.display(&TrailEvent::Died {
                member,
                cause: DeathCause::Starvation,
            });
        }
    }

    /// Consumption, health drift, then hazards, in that order.
    fn end_of_day<C>(&mut self, collaborator: &mut C, weather: WeatherReport, tally: &mut DayTally)
    where
        C: Collaborator + ?Sized,
    {
        self.eat(collaborator);

        let exhausted = apply_daily_health(
            &mut self.state.party,
            weather.health_modifier,
            &mut self.rng,
        );
        for member in exhausted {
            collaborator.display(&TrailEvent::Died {
                member,
                cause: DeathCause::Exhaustion,
            });
        }

        let hazards = roll_hazards(
            &mut self.state.party,
            &mut self.state.supplies,
            weather.condition,
            &mut self.rng,
        );
        for case in &hazards.illnesses {
            collaborator.display(&TrailEvent::FellIll {
                member: case.member.clone(),
                illness: case.illness,
                damage: case.damage,
            });
            if case.died {
                collaborator.display(&TrailEvent::Died {
                    member: case.member.clone(),
                    cause: DeathCause::Illness(case.illness),
                });
            }
        }
        if let Some(mishap) = &hazards.mishap {
            collaborator.display(&TrailEvent::Mishap(mishap.clone()));
            match mishap {
                MishapOutcome::Stranded { .. } => tally.delay(mishap.delay_days(), "repair"),
                MishapOutcome::LostTrail { .. } => tally.delay(mishap.delay_days(), "lost_trail"),
                MishapOutcome::BadWater { deaths, .. } => {
                    for member in deaths {
                        collaborator.display(&TrailEvent::Died {
                            member: member.clone(),
                            cause: DeathCause::BadWater,
                        });
                    }
                }
                MishapOutcome::Repaired { .. } | MishapOutcome::Theft { .. } => {}
            }
        }
    }
}

/// Offer `options` and parse the collaborator's answer.
fn ask<C, T>(collaborator: &mut C, prompt: &str, options: &[MenuOption]) -> Result<T, EngineError>
where
    C: Collaborator + ?Sized,
    T: FromStr,
{
    let key = collaborator.choose(prompt, options);
    let invalid = || EngineError::InvalidChoice {
        prompt: prompt.to_string(),
        key: key.to_string(),
    };
    if !options.iter().any(|option| option.key == key) {
        return Err(invalid());
    }
    key.parse::<T>().map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;
    use std::collections::VecDeque;

    #[derive(Default)]
    struct Script {
        choices: VecDeque<&'static str>,
        confirms: VecDeque<bool>,
        events: Vec<TrailEvent>,
    }

    impl Collaborator for Script {
        fn choose(&mut self, _prompt: &str, _options: &[MenuOption]) -> &'static str {
            self.choices.pop_front().unwrap_or("quit")
        }

        fn confirm(&mut self, _prompt: &str) -> bool {
            self.confirms.pop_front().unwrap_or(true)
        }

        fn display(&mut self, event: &TrailEvent) {
            self.events.push(event.clone());
        }
    }

    fn session(rng: ScriptedRng) -> JourneySession<ScriptedRng> {
        let supplies = Supplies {
            food_lbs: 500,
            ammo: 100,
            ..Supplies::default()
        };
        JourneySession::new(
            TrailConfig::builtin(),
            Party::new("Lead", ["A"], 10_000),
            supplies,
            rng,
        )
    }

    #[test]
    fn tally_counts_primary_and_delays() {
        let mut tally = DayTally::day(DayKind::Travel, 12, "travel");
        tally.delay(0, "repair");
        tally.delay(2, "lost_trail");
        tally.delay(1, "river_wait");
        assert_eq!(tally.total_days(), 4);
        assert_eq!(tally.delays.len(), 2);
    }

    #[test]
    fn each_delay_record_carries_only_its_own_cause() {
        let mut session = session(ScriptedRng::new());
        let mut tally = DayTally::day(DayKind::Travel, 12, "travel");
        tally.delay(1, "river_wait");
        tally.delay(1, "float");
        session.commit(tally);
        let tags: Vec<Vec<&str>> = session
            .state()
            .day_records()
            .iter()
            .map(|record| record.tags.iter().map(|tag| tag.0.as_str()).collect())
            .collect();
        assert_eq!(tags, vec![vec!["travel"], vec!["river_wait"], vec!["float"]]);
        assert_eq!(session.state().days_elapsed(), 3);
    }

    #[test]
    fn pace_change_spends_no_day() {
        let mut session = session(ScriptedRng::new());
        let mut script = Script {
            choices: VecDeque::from(["pace", "grueling"]),
            ..Script::default()
        };
        session.step(&mut script).unwrap();
        assert_eq!(session.state().party.pace, Pace::Grueling);
        assert_eq!(session.state().days_elapsed(), 0);
        assert!(script.events.contains(&TrailEvent::PaceChanged(Pace::Grueling)));
    }

    #[test]
    fn unknown_key_fails_fast() {
        let mut session = session(ScriptedRng::new());
        let mut script = Script {
            choices: VecDeque::from(["status"]),
            ..Script::default()
        };
        let err = session.step(&mut script).unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidChoice {
                prompt: PROMPT_ACTION.to_string(),
                key: "status".to_string(),
            }
        );
    }

    #[test]
    fn declined_quit_keeps_journey_active() {
        let mut session = session(ScriptedRng::new());
        let mut script = Script {
            choices: VecDeque::from(["quit"]),
            confirms: VecDeque::from([false]),
            ..Script::default()
        };
        assert_eq!(session.step(&mut script).unwrap(), JourneyStatus::Active);
        assert_eq!(session.state().days_elapsed(), 0);
    }

    #[test]
    fn travel_day_records_ledger_entry() {
        let mut session = session(ScriptedRng::new().with_ints([15]));
        let mut script = Script {
            choices: VecDeque::from(["travel"]),
            ..Script::default()
        };
        session.step(&mut script).unwrap();
        let state = session.state();
        assert_eq!(state.miles_traveled(), 15);
        assert_eq!(state.days_elapsed(), 1);
        assert_eq!(state.day_records().len(), 1);
        assert_eq!(state.day_records()[0].kind, DayKind::Travel);
        assert_eq!(state.day_records()[0].miles, 15);
        assert_eq!(state.supplies.food_lbs, 496);
    }

    #[test]
    fn wait_is_withdrawn_at_the_limit() {
        let mut config = TrailConfig::builtin();
        config.crossing_wait_limit = 1;
        let session = JourneySession::new(
            config,
            Party::new("Lead", Vec::<String>::new(), 0),
            Supplies::default(),
            ScriptedRng::new(),
        );
        assert!(session.crossing_menu(0).iter().any(|o| o.key == "wait"));
        assert!(!session.crossing_menu(1).iter().any(|o| o.key == "wait"));
    }
}
