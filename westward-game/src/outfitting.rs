//! Professions, departure months, and the general store at the trailhead.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::state::{Party, Supplies};

/// Occupation chosen before departure; sets the starting purse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Profession {
    Banker,
    #[default]
    Carpenter,
    Farmer,
}

impl Profession {
    pub const ALL: [Self; 3] = [Self::Banker, Self::Carpenter, Self::Farmer];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Banker => "banker",
            Self::Carpenter => "carpenter",
            Self::Farmer => "farmer",
        }
    }

    #[must_use]
    pub const fn starting_cents(self) -> u32 {
        match self {
            Self::Banker => 160_000,
            Self::Carpenter => 80_000,
            Self::Farmer => 40_000,
        }
    }
}

impl fmt::Display for Profession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Profession {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "banker" => Ok(Self::Banker),
            "carpenter" => Ok(Self::Carpenter),
            "farmer" => Ok(Self::Farmer),
            _ => Err(()),
        }
    }
}

/// Months a wagon may leave the trailhead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StartMonth {
    #[default]
    March,
    April,
    May,
    June,
    July,
}

impl StartMonth {
    pub const ALL: [Self; 5] = [
        Self::March,
        Self::April,
        Self::May,
        Self::June,
        Self::July,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::March => "march",
            Self::April => "april",
            Self::May => "may",
            Self::June => "june",
            Self::July => "july",
        }
    }

    #[must_use]
    pub const fn number(self) -> u32 {
        match self {
            Self::March => 3,
            Self::April => 4,
            Self::May => 5,
            Self::June => 6,
            Self::July => 7,
        }
    }

    /// First day of this month in the year of `season`.
    #[must_use]
    pub fn departure_date(self, season: NaiveDate) -> Option<NaiveDate> {
        use chrono::Datelike;
        NaiveDate::from_ymd_opt(season.year(), self.number(), 1)
    }
}

impl fmt::Display for StartMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StartMonth {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "march" | "mar" | "3" => Ok(Self::March),
            "april" | "apr" | "4" => Ok(Self::April),
            "may" | "5" => Ok(Self::May),
            "june" | "jun" | "6" => Ok(Self::June),
            "july" | "jul" | "7" => Ok(Self::July),
            _ => Err(()),
        }
    }
}

/// Goods sold at the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreItem {
    Oxen,
    Food,
    Ammo,
    Clothing,
    Wheel,
    Axle,
    Tongue,
}

impl StoreItem {
    pub const ALL: [Self; 7] = [
        Self::Oxen,
        Self::Food,
        Self::Ammo,
        Self::Clothing,
        Self::Wheel,
        Self::Axle,
        Self::Tongue,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Oxen => "oxen",
            Self::Food => "food",
            Self::Ammo => "ammo",
            Self::Clothing => "clothing",
            Self::Wheel => "wheel",
            Self::Axle => "axle",
            Self::Tongue => "tongue",
        }
    }
}

/// Unit prices in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorePrices {
    pub oxen: u32,
    pub food_lb: u32,
    pub ammo: u32,
    pub clothing: u32,
    pub wheel: u32,
    pub axle: u32,
    pub tongue: u32,
}

impl Default for StorePrices {
    fn default() -> Self {
        Self {
            oxen: 2_500,
            food_lb: 20,
            ammo: 5,
            clothing: 1_000,
            wheel: 1_500,
            axle: 1_500,
            tongue: 1_500,
        }
    }
}

impl StorePrices {
    #[must_use]
    pub const fn price(&self, item: StoreItem) -> u32 {
        match item {
            StoreItem::Oxen => self.oxen,
            StoreItem::Food => self.food_lb,
            StoreItem::Ammo => self.ammo,
            StoreItem::Clothing => self.clothing,
            StoreItem::Wheel => self.wheel,
            StoreItem::Axle => self.axle,
            StoreItem::Tongue => self.tongue,
        }
    }
}

pub const OXEN_MIN: u32 = 6;
pub const OXEN_MAX: u32 = 12;
pub const FOOD_PER_MEMBER_MIN_LBS: u32 = 200;
pub const FOOD_MAX_LBS: u32 = 3_000;
pub const AMMO_MAX: u32 = 500;
pub const CLOTHING_MAX: u32 = 10;
pub const SPARE_PARTS_MAX: u32 = 3;

/// Quantities the party asks the storekeeper for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Loadout {
    pub oxen: u32,
    pub food_lbs: u32,
    pub ammo: u32,
    pub clothing: u32,
    pub wheels: u32,
    pub axles: u32,
    pub tongues: u32,
}

impl Loadout {
    /// A sensible shopping list for a party of `party_size`.
    #[must_use]
    pub fn recommended(party_size: u32) -> Self {
        Self {
            oxen: 8,
            food_lbs: (FOOD_PER_MEMBER_MIN_LBS * party_size.max(1)).min(FOOD_MAX_LBS),
            ammo: 300,
            clothing: party_size.clamp(1, CLOTHING_MAX),
            wheels: 1,
            axles: 1,
            tongues: 1,
        }
    }

    const fn quantity(&self, item: StoreItem) -> u32 {
        match item {
            StoreItem::Oxen => self.oxen,
            StoreItem::Food => self.food_lbs,
            StoreItem::Ammo => self.ammo,
            StoreItem::Clothing => self.clothing,
            StoreItem::Wheel => self.wheels,
            StoreItem::Axle => self.axles,
            StoreItem::Tongue => self.tongues,
        }
    }
}

/// Errors raised when a shopping list cannot be filled.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OutfitError {
    #[error("{item} quantity must be between {min} and {max} (got {value})")]
    QuantityRange {
        item: &'static str,
        min: u32,
        max: u32,
        value: u32,
    },
    #[error("cannot afford {oxen} oxen at {price} cents each with {money} cents")]
    CannotAffordOxen { oxen: u32, price: u32, money: u32 },
}

/// One line of the store receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub item: StoreItem,
    pub requested: u32,
    pub bought: u32,
    pub cost_cents: u32,
}

/// Largest quantity up to `requested` that `money_cents` covers at `price`.
#[must_use]
pub const fn affordable_quantity(requested: u32, price: u32, money_cents: u32) -> u32 {
    if price == 0 {
        return requested;
    }
    let affordable = money_cents / price;
    if requested < affordable {
        requested
    } else {
        affordable
    }
}

fn check_range(item: StoreItem, value: u32, min: u32, max: u32) -> Result<(), OutfitError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(OutfitError::QuantityRange {
            item: item.as_str(),
            min,
            max,
            value,
        })
    }
}

/// Buy the starting loadout, debiting the party purse.
///
/// Oxen must be affordable outright; every other line is clamped to what the
/// remaining money covers. Spare parts are added on top of the wagon's own.
///
/// # Errors
///
/// Returns [`OutfitError`] when a requested quantity is out of range or the
/// oxen cannot be paid for. The party is untouched on error.
pub fn outfit_party(
    party: &mut Party,
    loadout: &Loadout,
    prices: &StorePrices,
) -> Result<(Supplies, Vec<ReceiptLine>), OutfitError> {
    let living = crate::numbers::count_to_u32(party.living_size());
    let food_min = (FOOD_PER_MEMBER_MIN_LBS * living).min(FOOD_MAX_LBS);
    check_range(StoreItem::Oxen, loadout.oxen, OXEN_MIN, OXEN_MAX)?;
    check_range(StoreItem::Food, loadout.food_lbs, food_min, FOOD_MAX_LBS)?;
    check_range(StoreItem::Ammo, loadout.ammo, 0, AMMO_MAX)?;
    check_range(StoreItem::Clothing, loadout.clothing, 0, CLOTHING_MAX)?;
    for item in [StoreItem::Wheel, StoreItem::Axle, StoreItem::Tongue] {
        check_range(item, loadout.quantity(item), 0, SPARE_PARTS_MAX)?;
    }
    let oxen_cost = loadout.oxen.saturating_mul(prices.oxen);
    if oxen_cost > party.money_cents {
        return Err(OutfitError::CannotAffordOxen {
            oxen: loadout.oxen,
            price: prices.oxen,
            money: party.money_cents,
        });
    }

    let mut supplies = Supplies::default();
    let mut receipt = Vec::with_capacity(StoreItem::ALL.len());
    for item in StoreItem::ALL {
        let requested = loadout.quantity(item);
        let price = prices.price(item);
        let bought = affordable_quantity(requested, price, party.money_cents);
        let cost_cents = bought * price;
        party.money_cents -= cost_cents;
        match item {
            StoreItem::Oxen => supplies.oxen = bought,
            StoreItem::Food => supplies.food_lbs += bought,
            StoreItem::Ammo => supplies.ammo += bought,
            StoreItem::Clothing => supplies.clothing += bought,
            StoreItem::Wheel => supplies.wheels += bought,
            StoreItem::Axle => supplies.axles += bought,
            StoreItem::Tongue => supplies.tongues += bought,
        }
        if bought < requested {
            log::info!("could only afford {bought} of {requested} {}", item.as_str());
        }
        receipt.push(ReceiptLine {
            item,
            requested,
            bought,
            cost_cents,
        });
    }
    Ok((supplies, receipt))
}
