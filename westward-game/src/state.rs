//! Party, supplies, and journey records.
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::config::TrailConfig;
use crate::constants::{HEALTH_MAX, MAX_PARTY_SIZE};
use crate::journey::DayRecord;
use crate::numbers::clamp_health;

/// Travel aggressiveness; faster paces cost health.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Pace {
    #[default]
    Steady,
    Strenuous,
    Grueling,
}

impl Pace {
    pub const ALL: [Self; 3] = [Self::Steady, Self::Strenuous, Self::Grueling];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Steady => "steady",
            Self::Strenuous => "strenuous",
            Self::Grueling => "grueling",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Steady => "Steady (slow & safe)",
            Self::Strenuous => "Strenuous (faster)",
            Self::Grueling => "Grueling (fast but risky)",
        }
    }

    /// Inclusive daily mileage range before weather and oxen penalties.
    #[must_use]
    pub const fn miles_range(self) -> (i32, i32) {
        match self {
            Self::Steady => (12, 18),
            Self::Strenuous => (16, 24),
            Self::Grueling => (20, 30),
        }
    }

    /// Daily health adjustment for keeping this pace.
    #[must_use]
    pub const fn health_penalty(self) -> i32 {
        match self {
            Self::Steady => 0,
            Self::Strenuous => -1,
            Self::Grueling => -2,
        }
    }
}

impl fmt::Display for Pace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Pace {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "steady" => Ok(Self::Steady),
            "strenuous" => Ok(Self::Strenuous),
            "grueling" => Ok(Self::Grueling),
            _ => Err(()),
        }
    }
}

/// Food-consumption setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Rations {
    BareBones,
    Meager,
    #[default]
    Normal,
    Filling,
}

impl Rations {
    pub const ALL: [Self; 4] = [Self::BareBones, Self::Meager, Self::Normal, Self::Filling];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BareBones => "bare_bones",
            Self::Meager => "meager",
            Self::Normal => "normal",
            Self::Filling => "filling",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BareBones => "Bare bones (least food)",
            Self::Meager => "Meager",
            Self::Normal => "Normal",
            Self::Filling => "Filling (most food)",
        }
    }

    /// Per-person ounces eaten each day: the base need scaled by 1/2, 3/4, 1, or 5/4.
    #[must_use]
    pub const fn ounces_per_person(self) -> u32 {
        let base = crate::constants::BASE_OUNCES_PER_DAY;
        match self {
            Self::BareBones => base / 2,
            Self::Meager => base * 3 / 4,
            Self::Normal => base,
            Self::Filling => base * 5 / 4,
        }
    }

    #[must_use]
    pub const fn health_bonus(self) -> i32 {
        match self {
            Self::BareBones => -2,
            Self::Meager => -1,
            Self::Normal => 0,
            Self::Filling => 1,
        }
    }

    /// Lean rations raise the illness chance.
    #[must_use]
    pub const fn is_poor(self) -> bool {
        matches!(self, Self::BareBones | Self::Meager)
    }
}

impl fmt::Display for Rations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rations {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bare_bones" => Ok(Self::BareBones),
            "meager" => Ok(Self::Meager),
            "normal" => Ok(Self::Normal),
            "filling" => Ok(Self::Filling),
            _ => Err(()),
        }
    }
}

/// A party member. Death is permanent: once `alive` is false nothing changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    name: String,
    alive: bool,
    health: u8,
}

impl Person {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alive: true,
            health: HEALTH_MAX,
        }
    }

    /// Build a living member with a specific starting health.
    #[must_use]
    pub fn with_health(name: impl Into<String>, health: u8) -> Self {
        let mut person = Self::new(name);
        person.health = health.min(HEALTH_MAX);
        person.alive = person.health > 0;
        person
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.alive
    }

    #[must_use]
    pub const fn health(&self) -> u8 {
        self.health
    }

    /// Shift health by `delta`, clamped to `0..=100`.
    ///
    /// Returns true only on the call that kills the member; dead members are
    /// left untouched.
    pub fn apply_health_delta(&mut self, delta: i32) -> bool {
        if !self.alive {
            return false;
        }
        self.health = clamp_health(i32::from(self.health).saturating_add(delta));
        if self.health == 0 {
            self.alive = false;
            return true;
        }
        false
    }

    /// Subtract `amount` health; see [`Person::apply_health_delta`].
    pub fn damage(&mut self, amount: u32) -> bool {
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        self.apply_health_delta(-amount)
    }

    /// Add `amount` health to a living member.
    pub fn heal(&mut self, amount: u32) {
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        let _ = self.apply_health_delta(amount);
    }
}

/// The travelling party and its settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Party {
    pub leader: String,
    /// Members in join order; the leader is always first.
    pub members: Vec<Person>,
    pub money_cents: u32,
    pub pace: Pace,
    pub rations: Rations,
}

impl Party {
    /// Create a party led by `leader`. Companions beyond the wagon's capacity are ignored.
    #[must_use]
    pub fn new<I, S>(leader: impl Into<String>, companions: I, money_cents: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let leader = leader.into();
        let mut members = vec![Person::new(leader.clone())];
        members.extend(
            companions
                .into_iter()
                .map(Into::into)
                .filter(|name: &String| !name.trim().is_empty())
                .take(MAX_PARTY_SIZE - 1)
                .map(Person::new),
        );
        Self {
            leader,
            members,
            money_cents,
            pace: Pace::default(),
            rations: Rations::default(),
        }
    }

    pub fn living(&self) -> impl Iterator<Item = &Person> {
        self.members.iter().filter(|member| member.is_alive())
    }

    pub fn living_mut(&mut self) -> impl Iterator<Item = &mut Person> {
        self.members.iter_mut().filter(|member| member.is_alive())
    }

    #[must_use]
    pub fn living_size(&self) -> usize {
        self.living().count()
    }

    #[must_use]
    pub fn is_wiped_out(&self) -> bool {
        self.living_size() == 0
    }

    #[must_use]
    pub fn survivor_names(&self) -> Vec<String> {
        self.living().map(|member| member.name().to_string()).collect()
    }
}

/// Wagon contents. Every count is unsigned, so shortfalls clamp instead of going negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplies {
    pub oxen: u32,
    pub food_lbs: u32,
    pub ammo: u32,
    pub clothing: u32,
    pub wheels: u32,
    pub axles: u32,
    pub tongues: u32,
}

impl Default for Supplies {
    fn default() -> Self {
        Self {
            oxen: 6,
            food_lbs: 0,
            ammo: 0,
            clothing: 0,
            wheels: 2,
            axles: 2,
            tongues: 2,
        }
    }
}

/// Inclusive depth range for a river crossing, in feet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiverDepth {
    pub min_ft: u32,
    pub max_ft: u32,
}

/// A waypoint along the route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Landmark {
    pub name: String,
    pub mile: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub river: Option<RiverDepth>,
}

impl Landmark {
    #[must_use]
    pub fn new(name: impl Into<String>, mile: u32) -> Self {
        Self {
            name: name.into(),
            mile,
            river: None,
        }
    }

    #[must_use]
    pub fn river(name: impl Into<String>, mile: u32, min_ft: u32, max_ft: u32) -> Self {
        Self {
            name: name.into(),
            mile,
            river: Some(RiverDepth { min_ft, max_ft }),
        }
    }

    #[must_use]
    pub const fn is_river_crossing(&self) -> bool {
        self.river.is_some()
    }
}

/// Why a journey ended in defeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefeatReason {
    /// Every party member died.
    Perished,
    /// The winter cutoff arrived before the destination.
    Winter,
    /// The player quit.
    Abandoned,
}

impl DefeatReason {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Perished => "party perished",
            Self::Winter => "winter",
            Self::Abandoned => "abandoned",
        }
    }
}

impl fmt::Display for DefeatReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal flags for a journey.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum JourneyStatus {
    #[default]
    Active,
    Victory,
    Defeat(DefeatReason),
}

impl JourneyStatus {
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Active)
    }
}

impl fmt::Display for JourneyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Active => f.write_str("active"),
            Self::Victory => f.write_str("victory"),
            Self::Defeat(reason) => write!(f, "defeat ({reason})"),
        }
    }
}

/// Everything about one game. Owned by a single session and passed by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyState {
    pub party: Party,
    pub supplies: Supplies,
    miles_traveled: u32,
    total_miles: u32,
    start_date: NaiveDate,
    date: NaiveDate,
    winter_cutoff: NaiveDate,
    days_elapsed: u32,
    landmarks: Vec<Landmark>,
    next_landmark: usize,
    status: JourneyStatus,
    #[serde(default)]
    day_records: Vec<DayRecord>,
}

impl JourneyState {
    /// Start a journey on the configured route and calendar.
    #[must_use]
    pub fn new(config: &TrailConfig, party: Party, supplies: Supplies) -> Self {
        Self {
            party,
            supplies,
            miles_traveled: 0,
            total_miles: config.total_miles,
            start_date: config.start_date,
            date: config.start_date,
            winter_cutoff: config.winter_cutoff,
            days_elapsed: 0,
            landmarks: config.landmarks.clone(),
            next_landmark: 0,
            status: JourneyStatus::Active,
            day_records: Vec::new(),
        }
    }

    /// Move the departure date, e.g. when the player picks a later start month.
    ///
    /// Only valid before the first day is spent.
    pub fn depart_on(&mut self, date: NaiveDate) {
        if self.days_elapsed == 0 {
            self.start_date = date;
            self.date = date;
        }
    }

    #[must_use]
    pub const fn miles_traveled(&self) -> u32 {
        self.miles_traveled
    }

    #[must_use]
    pub const fn total_miles(&self) -> u32 {
        self.total_miles
    }

    #[must_use]
    pub const fn has_arrived(&self) -> bool {
        self.miles_traveled >= self.total_miles
    }

    /// Progress never regresses.
    pub fn add_miles(&mut self, miles: u32) {
        self.miles_traveled = self.miles_traveled.saturating_add(miles);
    }

    #[must_use]
    pub const fn date(&self) -> NaiveDate {
        self.date
    }

    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    #[must_use]
    pub const fn winter_cutoff(&self) -> NaiveDate {
        self.winter_cutoff
    }

    #[must_use]
    pub const fn days_elapsed(&self) -> u32 {
        self.days_elapsed
    }

    /// Advance the calendar. This is the only way time passes.
    pub fn spend_days(&mut self, days: u32) {
        if days == 0 {
            return;
        }
        self.date = self
            .date
            .checked_add_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MAX);
        self.days_elapsed = self.days_elapsed.saturating_add(days);
    }

    #[must_use]
    pub fn landmarks(&self) -> &[Landmark] {
        &self.landmarks
    }

    /// Index of the nearest landmark not yet reached.
    #[must_use]
    pub const fn landmark_cursor(&self) -> usize {
        self.next_landmark
    }

    #[must_use]
    pub fn next_landmark(&self) -> Option<&Landmark> {
        self.landmarks.get(self.next_landmark)
    }

    pub(crate) fn advance_landmark_cursor(&mut self) {
        if self.next_landmark < self.landmarks.len() {
            self.next_landmark += 1;
        }
    }

    #[must_use]
    pub const fn status(&self) -> JourneyStatus {
        self.status
    }

    /// Record a terminal outcome. The first terminal status wins.
    pub(crate) fn finish(&mut self, status: JourneyStatus) {
        if !self.status.is_terminal() {
            self.status = status;
        }
    }

    #[must_use]
    pub fn day_records(&self) -> &[DayRecord] {
        &self.day_records
    }

    pub(crate) fn push_day_record(&mut self, record: DayRecord) {
        self.day_records.push(record);
    }
}
