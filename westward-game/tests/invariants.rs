use proptest::prelude::*;

use westward_game::crossings::CrossingMethod;
use westward_game::travel::adjusted_miles;
use westward_game::{
    Collaborator, JourneySession, JourneyStatus, MenuOption, Pace, Party, Person, Rations,
    Supplies, TrailConfig, TrailEvent, Weather, consume_daily_food, crossing_risk, daily_food_need,
};

const WEATHERS: [Weather; 10] = [
    Weather::Cold,
    Weather::Chilly,
    Weather::Mild,
    Weather::Warm,
    Weather::Hot,
    Weather::Cool,
    Weather::Rain,
    Weather::Windy,
    Weather::VeryCold,
    Weather::VeryHot,
];

/// Picks menu entries by rotating through them, so every action gets exercised.
struct Rotor {
    turn: usize,
}

impl Collaborator for Rotor {
    fn choose(&mut self, _prompt: &str, options: &[MenuOption]) -> &'static str {
        self.turn += 1;
        let non_quit: Vec<&MenuOption> = options.iter().filter(|o| o.key != "quit").collect();
        non_quit[self.turn % non_quit.len()].key
    }

    fn confirm(&mut self, _prompt: &str) -> bool {
        self.turn % 2 == 0
    }

    fn display(&mut self, event: &TrailEvent) {
        if let TrailEvent::Status(report) = event {
            for member in &report.living {
                assert!(member.health > 0 && member.health <= 100);
            }
        }
    }
}

proptest! {
    #[test]
    fn travel_never_drops_below_floor(base in 0_u32..200, weather in 0_usize..10, oxen in 0_u32..12) {
        let miles = adjusted_miles(base, WEATHERS[weather], oxen);
        prop_assert!(miles >= 5);
        prop_assert!(miles <= base.max(5));
    }

    #[test]
    fn crossing_risk_follows_depth_formula(depth in 0_u32..40) {
        let excess = f64::from(depth.saturating_sub(3));
        let expected = [
            (CrossingMethod::Ford, 0.25 + 0.05 * excess),
            (CrossingMethod::Float, 0.10 + 0.03 * excess),
            (CrossingMethod::Ferry, 0.04 + 0.02 * excess),
        ];
        for (method, risk) in expected {
            let actual = crossing_risk(method, depth);
            prop_assert!((actual - risk.min(1.0)).abs() < 1e-9, "{method} at {depth}: {actual} vs {risk}");
        }
    }

    #[test]
    fn health_stays_in_band_and_death_is_final(deltas in proptest::collection::vec(-60_i32..60, 1..40)) {
        let mut person = Person::new("Ada");
        let mut died = 0;
        for delta in deltas {
            let was_alive = person.is_alive();
            if person.apply_health_delta(delta) {
                died += 1;
            }
            prop_assert!(person.health() <= 100);
            if !was_alive {
                prop_assert!(!person.is_alive());
                prop_assert_eq!(person.health(), 0);
            }
        }
        prop_assert!(died <= 1);
    }

    #[test]
    fn consumption_never_underflows(food in 0_u32..40, members in 1_usize..5, rations in 0_usize..4) {
        let names: Vec<String> = (1..members).map(|idx| format!("M{idx}")).collect();
        let mut party = Party::new("Lead", names, 0);
        party.rations = Rations::ALL[rations];
        let mut supplies = Supplies { food_lbs: food, ..Supplies::default() };
        let need = daily_food_need(party.rations, u32::try_from(members).unwrap());
        let outcome = consume_daily_food(&mut party, &mut supplies);
        prop_assert_eq!(outcome.starved(), food < need);
        prop_assert_eq!(supplies.food_lbs, food.saturating_sub(need));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(12))]

    #[test]
    fn seeded_journeys_respect_core_invariants(seed in any::<u64>(), pace in 0_usize..3) {
        let mut party = Party::new("Lead", ["Ada", "Eli"], 80_000);
        party.pace = Pace::ALL[pace];
        let mut session = JourneySession::seeded(
            TrailConfig::default_config(),
            party,
            Supplies { food_lbs: 800, ammo: 200, ..Supplies::default() },
            seed,
        );
        let mut rotor = Rotor { turn: 0 };
        let mut last_miles = 0;
        let mut last_cursor = 0;
        let mut last_days = 0;
        for _ in 0..2_000 {
            let status = session.step(&mut rotor).unwrap();
            let state = session.state();
            prop_assert!(state.miles_traveled() >= last_miles);
            prop_assert!(state.landmark_cursor() >= last_cursor);
            prop_assert!(state.landmark_cursor() <= last_cursor + 1);
            prop_assert!(state.days_elapsed() >= last_days);
            prop_assert_eq!(state.days_elapsed() as usize, state.day_records().len());
            for member in &state.party.members {
                prop_assert!(member.health() <= 100);
                prop_assert_eq!(member.is_alive(), member.health() > 0);
            }
            last_miles = state.miles_traveled();
            last_cursor = state.landmark_cursor();
            last_days = state.days_elapsed();
            if status.is_terminal() {
                prop_assert_eq!(status == JourneyStatus::Victory, state.has_arrived());
                break;
            }
        }
        prop_assert!(session.state().status().is_terminal());
    }
}
