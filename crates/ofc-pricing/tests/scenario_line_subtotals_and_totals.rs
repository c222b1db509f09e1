//! Scenario: line subtotals, pre-tax sum and tax-inclusive total.
//!
//! # Invariants under test
//!
//! 1. Valid line subtotal = qty × tariff for every catalogue item.
//! 2. Pre-tax sum = Σ valid line subtotals.
//! 3. Total = pre-tax × 1.20 to the cent, whatever mix of valid/invalid lines.
//! 4. Reference order (full-day × 2, meal × 3) renders 30,00 / 21,00 / 51,00 / 61,20.

use ofc_pricing::*;

fn lines(rows: &[(&str, &str)]) -> Vec<LineInput> {
    rows.iter().map(|(k, q)| LineInput::new(*k, *q)).collect()
}

#[test]
fn reference_order_formats_as_expected() {
    let totals = compute_totals(
        &TariffTable::standard(),
        &lines(&[("jour", "2"), ("repas", "3")]),
    );

    let subtotals: Vec<String> = totals.lines.iter().map(|l| l.subtotal().to_string()).collect();
    assert_eq!(subtotals, vec!["30,00", "21,00"]);
    assert_eq!(totals.pre_tax.to_string(), "51,00");
    assert_eq!(totals.total.to_string(), "61,20");
    assert!(totals.all_lines_valid());
}

#[test]
fn subtotal_is_qty_times_tariff_for_every_item() {
    let table = TariffTable::standard();
    for item in ItemType::ALL {
        for qty in [0_i64, 1, 2, 7, 250] {
            let out = price_line(&table, &LineInput::new(item.key(), qty.to_string()));
            let expected = table.price(item).checked_mul_qty(qty).unwrap();
            assert_eq!(
                out,
                LineOutcome::Priced {
                    qty,
                    subtotal: expected
                },
                "item={} qty={}",
                item.key(),
                qty
            );
        }
    }
}

#[test]
fn catalogue_prices_are_fixed() {
    let t = TariffTable::standard();
    assert_eq!(t.price(ItemType::HalfDay), Cents::units(8));
    assert_eq!(t.price(ItemType::FullDay), Cents::units(15));
    assert_eq!(t.price(ItemType::Meal), Cents::units(7));
    assert_eq!(t.price_for_key(""), Cents::ZERO);
}

#[test]
fn total_is_pre_tax_times_one_twenty_with_mixed_lines() {
    let table = TariffTable::standard();
    let mixes = [
        lines(&[("demijour", "1")]),
        lines(&[("demijour", "1"), ("jour", "-4"), ("repas", "x")]),
        lines(&[("jour", "13"), ("repas", "abc"), ("demijour", "9")]),
        lines(&[("repas", "-1")]),
    ];
    for mix in mixes {
        let totals = compute_totals(&table, &mix);
        let expected_pre: Cents = totals
            .lines
            .iter()
            .filter(|l| !l.is_invalid())
            .map(|l| l.subtotal())
            .sum();
        assert_eq!(totals.pre_tax, expected_pre);
        // All tariffs are whole units so × 1.20 is exact in cents.
        assert_eq!(totals.total.raw() * 100, totals.pre_tax.raw() * 120);
    }
}

#[test]
fn recomputation_is_idempotent() {
    let table = TariffTable::standard();
    let input = lines(&[("jour", "2"), ("repas", "-3"), ("inconnu", "5")]);
    let a = compute_totals(&table, &input);
    let b = compute_totals(&table, &input);
    assert_eq!(a, b);
}
