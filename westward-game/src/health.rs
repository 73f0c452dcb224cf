//! Daily health drift and death detection.
use crate::rng::TrailRng;
use crate::state::Party;

/// Apply one day of weather, pace, and ration effects to every living member.
///
/// Each member draws a fatigue point in `{0, 1}`. Returns the names of members
/// who died today.
pub fn apply_daily_health<R>(party: &mut Party, weather_modifier: i32, rng: &mut R) -> Vec<String>
where
    R: TrailRng + ?Sized,
{
    let base = weather_modifier + party.pace.health_penalty() + party.rations.health_bonus();
    let mut deaths = Vec::new();
    for member in party.living_mut() {
        let fatigue = rng.int_in(0, 1);
        if member.apply_health_delta(base - fatigue) {
            log::info!("{} succumbed on the trail", member.name());
            deaths.push(member.name().to_string());
        }
    }
    deaths
}
