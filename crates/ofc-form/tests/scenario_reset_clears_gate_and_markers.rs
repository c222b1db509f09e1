//! Scenario: reset closes the gate and clears every marker, after the
//! native reset has restored defaults.
//!
//! # Invariants under test
//!
//! 1. After `Reset`, the gate is `Unverified { FormReset }`.
//! 2. Every invalid marker and the "validation attempted" flag are gone.
//! 3. Totals reflect the restored default rows.
//! 4. Cleanup runs strictly after the native reset (observed call order).
//! 5. Reset on a clean form is harmless.

use ofc_form::*;
use ofc_pricing::LineInput;
use ofc_validate::ContactField;

fn rows() -> Vec<MemoryRow> {
    vec![MemoryRow::new("jour", "1"), MemoryRow::new("demijour", "0")]
}

#[test]
fn reset_after_verify_closes_gate_and_clears_markers() {
    let mut f = OrderForm::new(
        MemoryForm::new(rows(), ContactValues::default()),
        RecordingHost::default(),
    );
    f.dispatch(FormEvent::Loaded);

    f.surface_mut().set_quantity(1, "-3");
    f.dispatch(FormEvent::QuantityInput(1));
    f.dispatch(FormEvent::Verify);
    assert!(f.surface().has_any_marker());
    assert!(f.surface().was_validated);

    f.dispatch(FormEvent::Reset);

    assert_eq!(
        f.gate(),
        VerificationState::Unverified {
            reason: UnverifiedReason::FormReset
        }
    );
    assert!(!f.surface().has_any_marker());
    assert!(!f.surface().was_validated);
    assert_eq!(f.surface().rows[1].qty, "0");
    assert_eq!(f.surface().rows[0].subtotal, "15,00");
    assert_eq!(f.surface().pre_tax, "15,00");
    assert_eq!(f.surface().total, "18,00");
    assert_eq!(f.pending_tasks(), 0);
}

#[test]
fn reset_after_successful_verify_blocks_send() {
    let contact = ContactValues {
        nom: "Durand".into(),
        prenom: "Paul".into(),
        tel: "0612345678".into(),
        mail: "paul@durand.fr".into(),
        cg: true,
    };
    let mut f = OrderForm::new(MemoryForm::new(rows(), contact), RecordingHost::default());
    f.dispatch(FormEvent::Verify);
    assert!(f.is_verified());

    f.dispatch(FormEvent::Reset);
    f.dispatch(FormEvent::Send);
    assert!(f.surface().submissions.is_empty());
}

#[test]
fn reset_on_clean_form_is_harmless() {
    let mut f = OrderForm::new(
        MemoryForm::new(rows(), ContactValues::default()),
        RecordingHost::default(),
    );
    f.dispatch(FormEvent::Reset);
    f.dispatch(FormEvent::Reset);
    assert!(!f.is_verified());
    assert!(!f.surface().has_any_marker());
    assert!(f.host().notices.is_empty());
}

// ---------------------------------------------------------------------------
// Call-order probe
// ---------------------------------------------------------------------------

/// Wraps `MemoryForm` and logs the order of reset-related calls.
struct ProbeForm {
    inner: MemoryForm,
    log: Vec<&'static str>,
}

impl FormSurface for ProbeForm {
    fn line_inputs(&self) -> Vec<LineInput> {
        self.inner.line_inputs()
    }
    fn write_subtotal(&mut self, row: usize, text: &str) {
        self.inner.write_subtotal(row, text)
    }
    fn write_pre_tax(&mut self, text: &str) {
        self.log.push("write_pre_tax");
        self.inner.write_pre_tax(text)
    }
    fn write_total(&mut self, text: &str) {
        self.inner.write_total(text)
    }
    fn field_value(&self, field: ContactField) -> String {
        self.inner.field_value(field)
    }
    fn set_field_value(&mut self, field: ContactField, value: &str) {
        self.inner.set_field_value(field, value)
    }
    fn consent_checked(&self) -> bool {
        self.inner.consent_checked()
    }
    fn set_invalid(&mut self, marker: Marker, message: Option<&str>) {
        self.inner.set_invalid(marker, message)
    }
    fn clear_invalid(&mut self, marker: Marker) {
        self.inner.clear_invalid(marker)
    }
    fn is_invalid(&self, marker: Marker) -> bool {
        self.inner.is_invalid(marker)
    }
    fn clear_all_invalid(&mut self) {
        self.log.push("clear_all_invalid");
        self.inner.clear_all_invalid()
    }
    fn check_validity(&self) -> bool {
        self.inner.check_validity()
    }
    fn set_validation_attempted(&mut self, attempted: bool) {
        self.inner.set_validation_attempted(attempted)
    }
    fn native_submit(&mut self) {
        self.inner.native_submit()
    }
    fn native_reset(&mut self) {
        self.log.push("native_reset");
        self.inner.native_reset()
    }
}

#[test]
fn cleanup_runs_after_native_reset() {
    let probe = ProbeForm {
        inner: MemoryForm::new(rows(), ContactValues::default()),
        log: Vec::new(),
    };
    let mut f = OrderForm::new(probe, RecordingHost::default());

    f.dispatch(FormEvent::Reset);

    assert_eq!(
        f.surface().log,
        vec!["native_reset", "clear_all_invalid", "write_pre_tax"]
    );
}
