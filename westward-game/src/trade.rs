//! One-shot barter with a passing trader.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::constants::{
    TRADE_BULLETS_FOR_FOOD_MAX, TRADE_BULLETS_FOR_FOOD_MIN, TRADE_CLOTHES_FOOD_PRICE,
    TRADE_FOOD_FOR_CASH_MAX, TRADE_FOOD_FOR_CASH_MIN, TRADE_FOOD_FOR_CASH_PRICE_CENTS,
    TRADE_WHEEL_AMMO_PRICE,
};
use crate::journey::event::format_money;
use crate::numbers::non_negative_u32;
use crate::rng::TrailRng;
use crate::state::{Party, Supplies};

/// Every tradeable quantity the party holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Ammo,
    Food,
    Clothing,
    Wheel,
    Axle,
    Tongue,
    Oxen,
    Money,
}

impl ResourceKind {
    const fn slot<'a>(self, party: &'a mut Party, supplies: &'a mut Supplies) -> &'a mut u32 {
        match self {
            Self::Ammo => &mut supplies.ammo,
            Self::Food => &mut supplies.food_lbs,
            Self::Clothing => &mut supplies.clothing,
            Self::Wheel => &mut supplies.wheels,
            Self::Axle => &mut supplies.axles,
            Self::Tongue => &mut supplies.tongues,
            Self::Oxen => &mut supplies.oxen,
            Self::Money => &mut party.money_cents,
        }
    }
}

/// A quantity of one resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lot {
    pub kind: ResourceKind,
    pub quantity: u32,
}

impl Lot {
    #[must_use]
    pub const fn new(kind: ResourceKind, quantity: u32) -> Self {
        Self { kind, quantity }
    }
}

impl fmt::Display for Lot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let qty = self.quantity;
        match self.kind {
            ResourceKind::Money => f.write_str(&format_money(qty)),
            ResourceKind::Ammo => write!(f, "{qty} bullets"),
            ResourceKind::Food => write!(f, "{qty} lbs of food"),
            ResourceKind::Clothing if qty == 1 => f.write_str("1 set of clothing"),
            ResourceKind::Clothing => write!(f, "{qty} sets of clothing"),
            ResourceKind::Wheel if qty == 1 => f.write_str("1 wagon wheel"),
            ResourceKind::Wheel => write!(f, "{qty} wagon wheels"),
            ResourceKind::Axle => write!(f, "{qty} wagon axle(s)"),
            ResourceKind::Tongue => write!(f, "{qty} wagon tongue(s)"),
            ResourceKind::Oxen => write!(f, "{qty} oxen"),
        }
    }
}

/// The trader hands over `offered` in exchange for the party's `wanted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeOffer {
    pub offered: Lot,
    pub wanted: Lot,
}

impl fmt::Display for TradeOffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "they'll give you {} for {}",
            self.offered, self.wanted
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeResult {
    Completed,
    Declined,
    /// The party did not hold the wanted quantity; nothing changed.
    Refused,
}

/// Pick one of the four trader offers, then roll its quantities.
pub fn roll_offer<R>(rng: &mut R) -> TradeOffer
where
    R: TrailRng + ?Sized,
{
    match rng.index(4) {
        0 => {
            let bullets = rng.int_in(TRADE_BULLETS_FOR_FOOD_MIN, TRADE_BULLETS_FOR_FOOD_MAX);
            let food = rng.int_in(TRADE_BULLETS_FOR_FOOD_MIN, TRADE_BULLETS_FOR_FOOD_MAX);
            TradeOffer {
                offered: Lot::new(ResourceKind::Ammo, non_negative_u32(bullets)),
                wanted: Lot::new(ResourceKind::Food, non_negative_u32(food)),
            }
        }
        1 => {
            let food = rng.int_in(TRADE_FOOD_FOR_CASH_MIN, TRADE_FOOD_FOR_CASH_MAX);
            TradeOffer {
                offered: Lot::new(ResourceKind::Food, non_negative_u32(food)),
                wanted: Lot::new(ResourceKind::Money, TRADE_FOOD_FOR_CASH_PRICE_CENTS),
            }
        }
        2 => TradeOffer {
            offered: Lot::new(ResourceKind::Clothing, 1),
            wanted: Lot::new(ResourceKind::Food, TRADE_CLOTHES_FOOD_PRICE),
        },
        _ => TradeOffer {
            offered: Lot::new(ResourceKind::Wheel, 1),
            wanted: Lot::new(ResourceKind::Ammo, TRADE_WHEEL_AMMO_PRICE),
        },
    }
}

/// Settle an accepted offer: debit and credit together, or change nothing.
pub fn settle_trade(offer: &TradeOffer, party: &mut Party, supplies: &mut Supplies) -> TradeResult {
    let wanted = offer.wanted.kind.slot(party, supplies);
    let Some(remaining) = wanted.checked_sub(offer.wanted.quantity) else {
        log::debug!("trade refused: party lacks {}", offer.wanted);
        return TradeResult::Refused;
    };
    *wanted = remaining;
    let offered = offer.offered.kind.slot(party, supplies);
    *offered = offered.saturating_add(offer.offered.quantity);
    TradeResult::Completed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedRng;

    #[test]
    fn rolls_quantities_after_picking() {
        let mut rng = ScriptedRng::new().with_indices([0]).with_ints([25, 45]);
        let offer = roll_offer(&mut rng);
        assert_eq!(offer.offered, Lot::new(ResourceKind::Ammo, 25));
        assert_eq!(offer.wanted, Lot::new(ResourceKind::Food, 45));
        assert_eq!(rng.draws(), 3);

        let mut rng = ScriptedRng::new().with_indices([3]);
        let offer = roll_offer(&mut rng);
        assert_eq!(offer.wanted, Lot::new(ResourceKind::Ammo, 50));
        assert_eq!(rng.draws(), 1);
    }

    #[test]
    fn completed_trade_moves_both_sides() {
        let mut party = Party::new("Lead", Vec::<String>::new(), 0);
        let mut supplies = Supplies {
            food_lbs: 100,
            ..Supplies::default()
        };
        let offer = TradeOffer {
            offered: Lot::new(ResourceKind::Clothing, 1),
            wanted: Lot::new(ResourceKind::Food, 40),
        };
        assert_eq!(settle_trade(&offer, &mut party, &mut supplies), TradeResult::Completed);
        assert_eq!(supplies.food_lbs, 60);
        assert_eq!(supplies.clothing, 1);
    }

    #[test]
    fn short_party_is_refused_without_change() {
        let mut party = Party::new("Lead", Vec::<String>::new(), 499);
        let mut supplies = Supplies::default();
        let before = (party.clone(), supplies.clone());
        let offer = TradeOffer {
            offered: Lot::new(ResourceKind::Food, 50),
            wanted: Lot::new(ResourceKind::Money, 500),
        };
        assert_eq!(settle_trade(&offer, &mut party, &mut supplies), TradeResult::Refused);
        assert_eq!((party, supplies), before);
    }

    #[test]
    fn offers_describe_themselves() {
        let offer = TradeOffer {
            offered: Lot::new(ResourceKind::Wheel, 1),
            wanted: Lot::new(ResourceKind::Ammo, 50),
        };
        assert_eq!(offer.to_string(), "they'll give you 1 wagon wheel for 50 bullets");
        assert_eq!(Lot::new(ResourceKind::Money, 500).to_string(), "$5.00");
        assert_eq!(Lot::new(ResourceKind::Money, 123_456).to_string(), "$1,234.56");
    }
}
