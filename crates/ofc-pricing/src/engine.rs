use crate::{Cents, LineInput, LineOutcome, OrderTotals, QtyRejection, TariffTable, TAX_RATE_BPS};

// ---------------------------------------------------------------------------
// Quantity parsing
// ---------------------------------------------------------------------------

/// Parse a quantity the way a base-10 `parseInt` does.
///
/// Leading whitespace (including a byte-order mark) is skipped, one optional sign is accepted, then the
/// longest run of ASCII digits is taken. Anything after the digits is
/// ignored (`"3 places"` -> 3, `"2.5"` -> 2).
pub fn parse_quantity(text: &str) -> Result<i64, QtyRejection> {
    let s = text.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}');
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return Err(QtyRejection::NotANumber);
    }

    let magnitude: i64 = match digits.parse() {
        Ok(v) => v,
        // A negative out-of-range number is still negative first.
        Err(_) if negative => return Err(QtyRejection::Negative),
        Err(_) => return Err(QtyRejection::Overflow),
    };

    // "-0" parses as zero, which is a valid quantity.
    if negative && magnitude != 0 {
        return Err(QtyRejection::Negative);
    }
    Ok(magnitude)
}

// ---------------------------------------------------------------------------
// Line and order computation
// ---------------------------------------------------------------------------

/// Price a single line. Unknown item types cost zero; bad quantities
/// produce an invalid line with a zero subtotal.
pub fn price_line(table: &TariffTable, line: &LineInput) -> LineOutcome {
    let qty = match parse_quantity(&line.qty_text) {
        Ok(q) => q,
        Err(reason) => return LineOutcome::Invalid { reason },
    };

    match table.price_for_key(&line.item_key).checked_mul_qty(qty) {
        Some(subtotal) => LineOutcome::Priced { qty, subtotal },
        None => LineOutcome::Invalid {
            reason: QtyRejection::Overflow,
        },
    }
}

/// Tax-inclusive total for a pre-tax sum. Saturates on overflow.
pub fn tax_inclusive(pre_tax: Cents) -> Cents {
    pre_tax
        .checked_apply_rate_bps(TAX_RATE_BPS)
        .unwrap_or(if pre_tax.is_negative() {
            Cents::MIN
        } else {
            Cents::MAX
        })
}

/// Recompute every line and both aggregate totals from scratch.
///
/// Deterministic: the same inputs always yield the same `OrderTotals`.
pub fn compute_totals(table: &TariffTable, lines: &[LineInput]) -> OrderTotals {
    let outcomes: Vec<LineOutcome> = lines.iter().map(|l| price_line(table, l)).collect();
    let pre_tax: Cents = outcomes.iter().map(LineOutcome::subtotal).sum();
    let total = tax_inclusive(pre_tax);

    OrderTotals {
        lines: outcomes,
        pre_tax,
        total,
    }
}
