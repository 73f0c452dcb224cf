//! Centralized balance and tuning constants for the Westward simulation.
//!
//! Every probability and draw range used by the daily pipeline lives here so
//! that gameplay can only be adjusted through reviewed code changes.

// Party ---------------------------------------------------------------------
pub const HEALTH_MAX: u8 = 100;
pub const HEALTH_MIN: u8 = 0;
pub const MAX_PARTY_SIZE: usize = 5;

// Weather -------------------------------------------------------------------
pub const WEATHER_OVERRIDE_CHANCE: f64 = 0.15;
pub const WEATHER_EXTREME_PENALTY: i32 = 1;

// Consumption ---------------------------------------------------------------
pub const OUNCES_PER_POUND: u32 = 16;
/// Daily per-person food at normal rations, in ounces (two pounds).
pub const BASE_OUNCES_PER_DAY: u32 = 32;
pub const STARVATION_BASE_PENALTY: u32 = 10;
/// Divisor applied per living member when spreading a shortfall.
pub const STARVATION_SHARE_DIVISOR: u32 = 2;

// Travel --------------------------------------------------------------------
pub const TRAVEL_MIN_MILES: u32 = 5;
pub const TRAVEL_WEATHER_MULT: f64 = 0.85;
pub const TRAVEL_LOW_OXEN_MULT: f64 = 0.9;
pub const TRAVEL_OXEN_THRESHOLD: u32 = 6;

// Hazards -------------------------------------------------------------------
pub const ILLNESS_BASE_CHANCE: f64 = 0.02;
pub const ILLNESS_GRUELING_BONUS: f64 = 0.01;
pub const ILLNESS_POOR_RATIONS_BONUS: f64 = 0.01;
pub const ILLNESS_EXTREME_WEATHER_BONUS: f64 = 0.01;
pub const ILLNESS_DAMAGE_MIN: i32 = 10;
pub const ILLNESS_DAMAGE_MAX: i32 = 25;
pub const MISHAP_BASE_CHANCE: f64 = 0.04;
pub const MISHAP_GRUELING_BONUS: f64 = 0.01;
pub const BREAKDOWN_DELAY_DAYS: u32 = 1;
pub const LOST_TRAIL_DAYS_MIN: i32 = 1;
pub const LOST_TRAIL_DAYS_MAX: i32 = 3;
pub const BAD_WATER_DAMAGE: u8 = 5;
pub const THEFT_FOOD_MIN: i32 = 10;
pub const THEFT_FOOD_MAX: i32 = 40;

// Crossings -----------------------------------------------------------------
pub const RIVER_WIDTH_MIN_FT: i32 = 200;
pub const RIVER_WIDTH_MAX_FT: i32 = 400;
/// Depth above which every crossing method grows riskier.
pub const CROSSING_DEPTH_FREE_FT: u32 = 3;
/// Crossing risks are kept in basis points so the formula stays exact.
pub const RISK_BASIS_POINTS: u32 = 10_000;
pub const FORD_BASE_RISK_BP: u32 = 2_500;
pub const FORD_RISK_PER_FT_BP: u32 = 500;
pub const FLOAT_BASE_RISK_BP: u32 = 1_000;
pub const FLOAT_RISK_PER_FT_BP: u32 = 300;
pub const FLOAT_EXTRA_DAYS: u32 = 1;
pub const FERRY_BASE_RISK_BP: u32 = 400;
pub const FERRY_RISK_PER_FT_BP: u32 = 200;
pub const SWAMP_FOOD_LOSS_MIN: i32 = 20;
pub const SWAMP_FOOD_LOSS_MAX: i32 = 100;
pub const SWAMP_AMMO_LOSS_CHANCE: f64 = 0.5;
pub const SWAMP_AMMO_LOSS_MIN: i32 = 10;
pub const SWAMP_AMMO_LOSS_MAX: i32 = 50;
pub const SWAMP_INJURY_CHANCE: f64 = 0.3;
pub const SWAMP_INJURY_MIN: i32 = 5;
pub const SWAMP_INJURY_MAX: i32 = 20;

// Camp ----------------------------------------------------------------------
pub const REST_HEAL_MIN: i32 = 3;
pub const REST_HEAL_MAX: i32 = 7;
pub const HUNT_MIN_AMMO: u32 = 10;
pub const HUNT_AMMO_SPENT_MIN: i32 = 8;
pub const HUNT_AMMO_SPENT_MAX: i32 = 20;
pub const HUNT_GAME_MIN: i32 = 40;
pub const HUNT_GAME_MAX: i32 = 160;
/// Parties at or below this size cannot carry a large kill before it spoils.
pub const HUNT_SMALL_PARTY: usize = 2;
pub const HUNT_LARGE_KILL_LBS: u32 = 100;
pub const HUNT_SMALL_PARTY_SPOIL_MIN: i32 = 10;
pub const HUNT_SMALL_PARTY_SPOIL_MAX: i32 = 40;
pub const HUNT_SPOIL_MIN: i32 = 0;
pub const HUNT_SPOIL_MAX: i32 = 20;

// Trade ---------------------------------------------------------------------
pub const TRADE_BULLETS_FOR_FOOD_MIN: i32 = 20;
pub const TRADE_BULLETS_FOR_FOOD_MAX: i32 = 60;
pub const TRADE_FOOD_FOR_CASH_MIN: i32 = 30;
pub const TRADE_FOOD_FOR_CASH_MAX: i32 = 80;
pub const TRADE_FOOD_FOR_CASH_PRICE_CENTS: u32 = 500;
pub const TRADE_CLOTHES_FOOD_PRICE: u32 = 40;
pub const TRADE_WHEEL_AMMO_PRICE: u32 = 50;

// Scoring -------------------------------------------------------------------
pub const SCORE_CENTS_PER_POINT: u32 = 100;
pub const SCORE_FOOD_LBS_PER_POINT: u32 = 5;
pub const SCORE_PER_SURVIVOR: u32 = 50;
