//! Fixed-point money type.
//!
//! # Motivation
//!
//! Every amount on the order form (unit price, line subtotal, pre-tax sum,
//! tax-inclusive total) is held as an integer number of cents in an `i64`.
//! Floating point would make `51 × 1.20` render as `61,199999…` on some
//! paths; raw `i64` would allow quantities to be mixed up with amounts.
//!
//! `Cents` wraps the raw `i64` so the type system prevents:
//! - Implicit construction from raw `i64` (no `From<i64>` impl).
//! - Mixing `Cents` with quantities in arithmetic.
//!
//! # Scale
//!
//! 1 EUR = `Cents(100)`. Quantities stay plain `i64`.
//!
//! # Arithmetic
//!
//! - `Add`, `Sub`, `AddAssign` are closed over `Cents` and saturate, like
//!   `saturating_add`, at `i64::MAX` / `i64::MIN`.
//! - `checked_mul_qty(qty)` multiplies a unit price by a quantity and returns
//!   `None` on overflow.
//! - `checked_apply_rate_bps(bps)` scales by `(10_000 + bps) / 10_000`,
//!   rounding half away from zero to the cent.

use std::ops::{Add, AddAssign, Sub};

use serde::{Deserialize, Serialize};

/// Basis-point denominator (100% = 10_000 bps).
pub const BPS_SCALE: i64 = 10_000;

/// Separator between digit groups in `fr-FR` formatting (U+202F NARROW NO-BREAK SPACE).
pub const GROUP_SEPARATOR: char = '\u{202F}';

/// Decimal separator in `fr-FR` formatting.
pub const DECIMAL_SEPARATOR: char = ',';

/// A monetary amount in cents.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Cents(i64);

impl Cents {
    pub const ZERO: Cents = Cents(0);
    pub const MAX: Cents = Cents(i64::MAX);
    pub const MIN: Cents = Cents(i64::MIN);

    /// Construct from a raw cent count.
    #[inline]
    pub const fn new(raw: i64) -> Self {
        Cents(raw)
    }

    /// Construct from whole currency units (`Cents::units(8)` is 8,00).
    #[inline]
    pub const fn units(units: i64) -> Self {
        Cents(units * 100)
    }

    #[inline]
    pub const fn raw(self) -> i64 {
        self.0
    }

    #[inline]
    pub fn saturating_add(self, rhs: Cents) -> Cents {
        Cents(self.0.saturating_add(rhs.0))
    }

    #[inline]
    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Multiply a unit price by an integer quantity.
    ///
    /// Returns `None` if the product does not fit in `i64`.
    #[inline]
    pub fn checked_mul_qty(self, qty: i64) -> Option<Cents> {
        self.0.checked_mul(qty).map(Cents)
    }

    /// Add a rate expressed in basis points: `self × (1 + bps / 10_000)`.
    ///
    /// Rounds half away from zero to the nearest cent. Returns `None` on
    /// overflow of the intermediate product.
    pub fn checked_apply_rate_bps(self, bps: i64) -> Option<Cents> {
        let factor = BPS_SCALE.checked_add(bps)?;
        let num = i128::from(self.0) * i128::from(factor);
        let den = i128::from(BPS_SCALE);
        let half = den / 2;
        let rounded = if num >= 0 {
            (num + half) / den
        } else {
            (num - half) / den
        };
        i64::try_from(rounded).ok().map(Cents)
    }
}

impl Add for Cents {
    type Output = Cents;
    #[inline]
    fn add(self, rhs: Cents) -> Cents {
        Cents(self.0.saturating_add(rhs.0))
    }
}

impl Sub for Cents {
    type Output = Cents;
    #[inline]
    fn sub(self, rhs: Cents) -> Cents {
        Cents(self.0.saturating_sub(rhs.0))
    }
}

impl AddAssign for Cents {
    #[inline]
    fn add_assign(&mut self, rhs: Cents) {
        self.0 = self.0.saturating_add(rhs.0);
    }
}

impl std::iter::Sum for Cents {
    fn sum<I: Iterator<Item = Cents>>(iter: I) -> Cents {
        iter.fold(Cents::ZERO, Cents::saturating_add)
    }
}

// ---------------------------------------------------------------------------
// fr-FR display
// ---------------------------------------------------------------------------

/// `fr-FR` rendering with exactly two fraction digits: `1 234,50`.
impl std::fmt::Display for Cents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let frac = abs % 100;

        let digits = units.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(GROUP_SEPARATOR);
            }
            grouped.push(ch);
        }

        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{sign}{grouped}{DECIMAL_SEPARATOR}{frac:02}")
    }
}

/// Format an optional amount; a missing value renders as `0,00`.
pub fn format_amount(amount: Option<Cents>) -> String {
    amount.unwrap_or(Cents::ZERO).to_string()
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
