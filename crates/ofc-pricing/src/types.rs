use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::Cents;

/// Tax rate applied to the pre-tax sum: 20%.
pub const TAX_RATE_BPS: i64 = 2_000;

/// Catalogue item types. The string key is what the row selector carries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemType {
    #[serde(rename = "demijour")]
    HalfDay,
    #[serde(rename = "jour")]
    FullDay,
    #[serde(rename = "repas")]
    Meal,
}

impl ItemType {
    pub const ALL: [ItemType; 3] = [ItemType::HalfDay, ItemType::FullDay, ItemType::Meal];

    pub fn key(&self) -> &'static str {
        match self {
            ItemType::HalfDay => "demijour",
            ItemType::FullDay => "jour",
            ItemType::Meal => "repas",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        ItemType::ALL.into_iter().find(|t| t.key() == key)
    }
}

/// Fixed mapping from item type to unit price.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TariffTable {
    prices: BTreeMap<ItemType, Cents>,
}

impl TariffTable {
    /// The catalogue tariffs: half-day 8, full-day 15, meal 7.
    pub fn standard() -> Self {
        let prices = BTreeMap::from([
            (ItemType::HalfDay, Cents::units(8)),
            (ItemType::FullDay, Cents::units(15)),
            (ItemType::Meal, Cents::units(7)),
        ]);
        Self { prices }
    }

    pub fn price(&self, item: ItemType) -> Cents {
        self.prices.get(&item).copied().unwrap_or(Cents::ZERO)
    }

    /// Price for a raw selector key. Unknown keys cost nothing.
    pub fn price_for_key(&self, key: &str) -> Cents {
        ItemType::from_key(key)
            .map(|t| self.price(t))
            .unwrap_or(Cents::ZERO)
    }
}

impl Default for TariffTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// One row of user input, as read from the form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineInput {
    /// Selected item-type key (may be unknown or empty).
    pub item_key: String,
    /// Raw quantity text.
    pub qty_text: String,
}

impl LineInput {
    pub fn new<K: Into<String>, Q: Into<String>>(item_key: K, qty_text: Q) -> Self {
        Self {
            item_key: item_key.into(),
            qty_text: qty_text.into(),
        }
    }
}

/// Why a quantity was refused.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum QtyRejection {
    /// No leading digits.
    NotANumber,
    Negative,
    /// Digits (or the resulting subtotal) do not fit in `i64`.
    Overflow,
}

/// Result of pricing one line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LineOutcome {
    Priced { qty: i64, subtotal: Cents },
    Invalid { reason: QtyRejection },
}

impl LineOutcome {
    /// Subtotal as displayed: zero for invalid lines.
    pub fn subtotal(&self) -> Cents {
        match self {
            LineOutcome::Priced { subtotal, .. } => *subtotal,
            LineOutcome::Invalid { .. } => Cents::ZERO,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, LineOutcome::Invalid { .. })
    }
}

/// Output of a full recomputation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderTotals {
    /// One outcome per input line, same order.
    pub lines: Vec<LineOutcome>,
    pub pre_tax: Cents,
    pub total: Cents,
}

impl OrderTotals {
    pub fn all_lines_valid(&self) -> bool {
        self.lines.iter().all(|l| !l.is_invalid())
    }

    pub fn invalid_rows(&self) -> Vec<usize> {
        self.lines
            .iter()
            .enumerate()
            .filter(|(_, l)| l.is_invalid())
            .map(|(i, _)| i)
            .collect()
    }
}
