//! Scenario: row edits recompute totals on the surface.
//!
//! # Invariants under test
//!
//! 1. Load writes formatted subtotals and totals.
//! 2. A negative/non-numeric quantity marks only that row and zeroes it.
//! 3. Correcting the quantity clears its marker.
//! 4. Switching the item type reprices the row; unknown types cost zero.

use ofc_form::*;

fn boot() -> OrderForm<MemoryForm, RecordingHost> {
    let mut f = OrderForm::new(
        MemoryForm::new(
            vec![
                MemoryRow::new("jour", "2"),
                MemoryRow::new("repas", "3"),
                MemoryRow::new("demijour", "0"),
            ],
            ContactValues::default(),
        ),
        RecordingHost::default(),
    );
    f.dispatch(FormEvent::Loaded);
    f
}

#[test]
fn load_writes_formatted_totals() {
    let f = boot();
    let s = f.surface();
    assert_eq!(s.rows[0].subtotal, "30,00");
    assert_eq!(s.rows[1].subtotal, "21,00");
    assert_eq!(s.rows[2].subtotal, "0,00");
    assert_eq!(s.pre_tax, "51,00");
    assert_eq!(s.total, "61,20");
    assert!(!s.has_any_marker());
}

#[test]
fn bad_quantity_marks_row_and_fixing_clears_it() {
    let mut f = boot();

    f.surface_mut().set_quantity(0, "-1");
    f.dispatch(FormEvent::QuantityInput(0));
    assert!(f.surface().rows[0].qty_invalid);
    assert!(!f.surface().rows[1].qty_invalid);
    assert_eq!(f.surface().rows[0].subtotal, "0,00");
    assert_eq!(f.surface().pre_tax, "21,00");
    assert_eq!(f.surface().total, "25,20");

    f.surface_mut().set_quantity(0, "abc");
    f.dispatch(FormEvent::QuantityInput(0));
    assert!(f.surface().rows[0].qty_invalid);

    f.surface_mut().set_quantity(0, "4");
    f.dispatch(FormEvent::QuantityInput(0));
    assert!(!f.surface().rows[0].qty_invalid);
    assert_eq!(f.surface().rows[0].subtotal, "60,00");
    assert_eq!(f.surface().pre_tax, "81,00");
    assert_eq!(f.surface().total, "97,20");
}

#[test]
fn item_type_change_reprices_row() {
    let mut f = boot();

    f.surface_mut().set_item(1, "demijour");
    f.dispatch(FormEvent::ItemTypeChanged(1));
    assert_eq!(f.surface().rows[1].subtotal, "24,00");

    f.surface_mut().set_item(1, "inconnu");
    f.dispatch(FormEvent::ItemTypeChanged(1));
    assert_eq!(f.surface().rows[1].subtotal, "0,00");
    assert!(!f.surface().rows[1].qty_invalid);
    assert_eq!(f.surface().pre_tax, "30,00");
}

#[test]
fn recompute_is_idempotent() {
    let mut f = boot();
    let a = f.recompute_totals();
    let snap = f.surface().clone();
    let b = f.recompute_totals();
    assert_eq!(a, b);
    assert_eq!(&snap, f.surface());
}
