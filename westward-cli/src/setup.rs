use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::Path;
use westward_game::{
    JourneySession, Loadout, Party, Profession, ReceiptLine, StartMonth, StorePrices, TrailConfig,
    outfit_party,
};

use crate::seeds::split_csv;

pub const DEFAULT_LEADER: &str = "Wagon Master";
pub const DEFAULT_COMPANIONS: &str = "Mary,Jed,Sarah,Zeke";

/// Load a trail from a JSON file, or the embedded route when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<TrailConfig> {
    let Some(path) = path else {
        return Ok(TrailConfig::default_config());
    };
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read trail config {}", path.display()))?;
    TrailConfig::from_json(&raw)
        .with_context(|| format!("invalid trail config {}", path.display()))
}

pub fn parse_profession(raw: &str) -> Result<Profession> {
    raw.parse()
        .map_err(|()| anyhow!("unknown profession '{raw}' (banker, carpenter, farmer)"))
}

pub fn parse_month(raw: &str) -> Result<StartMonth> {
    raw.parse()
        .map_err(|()| anyhow!("unknown departure month '{raw}' (march through july)"))
}

/// Everything needed to put a party on the trail.
#[derive(Debug, Clone)]
pub struct PartySetup {
    pub leader: String,
    pub companions: Vec<String>,
    pub profession: Profession,
    pub month: StartMonth,
}

impl PartySetup {
    pub fn new(leader: &str, companions: &str, profession: &str, month: &str) -> Result<Self> {
        Ok(Self {
            leader: leader.to_string(),
            companions: split_csv(companions),
            profession: parse_profession(profession)?,
            month: parse_month(month)?,
        })
    }

    /// Buy the recommended loadout and start a seeded session on the departure date.
    pub fn start(
        &self,
        config: &TrailConfig,
        seed: u64,
    ) -> Result<(JourneySession, Vec<ReceiptLine>)> {
        let mut party = Party::new(
            self.leader.as_str(),
            self.companions.iter().map(String::as_str),
            self.profession.starting_cents(),
        );
        let size = u32::try_from(party.living_size()).unwrap_or(u32::MAX);
        let (supplies, receipt) =
            outfit_party(&mut party, &Loadout::recommended(size), &StorePrices::default())
                .with_context(|| format!("could not outfit a {} party", self.profession))?;
        let departure = self
            .month
            .departure_date(config.start_date)
            .with_context(|| format!("no departure date for {}", self.month))?;

        let mut session = JourneySession::seeded(config.clone(), party, supplies, seed);
        session.state_mut().depart_on(departure);
        log::debug!(
            "seed {seed}: {} party of {size} departs {departure}",
            self.profession
        );
        Ok((session, receipt))
    }
}
