//! ofc-pricing
//!
//! Pricing engine for the order form:
//! - Fixed tariff table (half-day, full-day, meal)
//! - `parseInt`-compatible quantity parsing
//! - Line subtotals, pre-tax sum, tax-inclusive total (20%)
//! - `fr-FR` money formatting
//!
//! Pure deterministic logic. No IO; the form layer reads rows and writes
//! the formatted results back.

mod engine;
mod fixedpoint;
mod types;

pub use engine::{compute_totals, parse_quantity, price_line, tax_inclusive};
pub use fixedpoint::{format_amount, Cents, BPS_SCALE, DECIMAL_SEPARATOR, GROUP_SEPARATOR};
pub use types::*;
