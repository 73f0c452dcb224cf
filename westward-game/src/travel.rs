//! Daily distance covered by the wagon.
use crate::constants::{
    TRAVEL_LOW_OXEN_MULT, TRAVEL_MIN_MILES, TRAVEL_OXEN_THRESHOLD, TRAVEL_WEATHER_MULT,
};
use crate::numbers::{floor_f64_to_u32, non_negative_u32};
use crate::rng::TrailRng;
use crate::state::Pace;
use crate::weather::Weather;

/// Apply weather and oxen penalties to a base mileage draw.
///
/// Multipliers are applied in sequence and floored once at the end; the
/// result never drops below the minimum daily distance.
#[must_use]
pub fn adjusted_miles(base: u32, weather: Weather, oxen: u32) -> u32 {
    let mut miles = f64::from(base);
    if weather.slows_travel() {
        miles *= TRAVEL_WEATHER_MULT;
    }
    if oxen < TRAVEL_OXEN_THRESHOLD {
        miles *= TRAVEL_LOW_OXEN_MULT;
    }
    floor_f64_to_u32(miles).max(TRAVEL_MIN_MILES)
}

/// Miles covered today at `pace`.
pub fn daily_miles<R>(pace: Pace, weather: Weather, oxen: u32, rng: &mut R) -> u32
where
    R: TrailRng + ?Sized,
{
    let (lo, hi) = pace.miles_range();
    let base = non_negative_u32(rng.int_in(lo, hi));
    adjusted_miles(base, weather, oxen)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;

    #[test]
    fn clear_weather_and_full_team_is_unchanged() {
        let mut rng = ScriptedRng::new().with_ints([15]);
        assert_eq!(daily_miles(Pace::Steady, Weather::Mild, 6, &mut rng), 15);
    }

    #[test]
    fn grueling_rain_short_team_floors_once() {
        let mut rng = ScriptedRng::new().with_ints([30]);
        // 30 * 0.85 * 0.9 = 22.95
        assert_eq!(daily_miles(Pace::Grueling, Weather::Rain, 5, &mut rng), 22);
    }

    #[test]
    fn never_below_minimum() {
        assert_eq!(adjusted_miles(0, Weather::VeryCold, 0), TRAVEL_MIN_MILES);
        assert_eq!(adjusted_miles(5, Weather::VeryHot, 1), TRAVEL_MIN_MILES);
    }

    #[test]
    fn windy_does_not_slow() {
        assert_eq!(adjusted_miles(20, Weather::Windy, 6), 20);
    }
}
