use std::collections::VecDeque;

use ofc_pricing::{compute_totals, OrderTotals, TariffTable};
use ofc_validate::{
    validate_consent, validate_email, validate_first_name, validate_phone, validate_surname,
    ContactField, FieldVerdict,
};
use tracing::{debug, info, warn};

use crate::{FormSurface, Host, Marker, NoticeKind, NoticeTexts, VerificationState};

/// User and system events the controller reacts to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormEvent {
    /// Page finished loading.
    Loaded,
    ItemTypeChanged(usize),
    QuantityInput(usize),
    Print,
    Verify,
    Send,
    /// The form's reset was triggered.
    Reset,
}

/// Work that must run after the current event has been fully applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeferredTask {
    /// Cleanup after the native reset restored default values.
    AfterReset,
}

/// Outcome of [`OrderForm::verify`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifyReport {
    /// One verdict per contact field, in verification order.
    pub fields: Vec<FieldVerdict>,
    pub totals: OrderTotals,
    /// No quantity input is marked invalid.
    pub quantities_ok: bool,
    pub ok: bool,
}

impl VerifyReport {
    pub fn failed_fields(&self) -> Vec<ContactField> {
        self.fields
            .iter()
            .filter(|v| !v.ok)
            .map(|v| v.field)
            .collect()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Handed off to the native submission.
    Submitted,
    /// Gate closed; the user was told to verify first.
    Blocked,
}

/// Order-form controller.
///
/// Owns the surface, the host and the submission gate. Every operation runs
/// to completion synchronously; only [`DeferredTask`]s wait, and they are
/// drained by [`OrderForm::dispatch`] once the triggering event is done.
pub struct OrderForm<S, H> {
    surface: S,
    host: H,
    tariffs: TariffTable,
    notices: NoticeTexts,
    gate: VerificationState,
    deferred: VecDeque<DeferredTask>,
}

impl<S: FormSurface, H: Host> OrderForm<S, H> {
    pub fn new(surface: S, host: H) -> Self {
        Self {
            surface,
            host,
            tariffs: TariffTable::standard(),
            notices: NoticeTexts::default(),
            gate: VerificationState::boot(),
            deferred: VecDeque::new(),
        }
    }

    pub fn with_notices(mut self, notices: NoticeTexts) -> Self {
        self.notices = notices;
        self
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Direct access for edits that have no controller handler (contact fields).
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn gate(&self) -> VerificationState {
        self.gate
    }

    pub fn is_verified(&self) -> bool {
        self.gate.is_verified()
    }

    pub fn pending_tasks(&self) -> usize {
        self.deferred.len()
    }

    pub fn into_parts(self) -> (S, H) {
        (self.surface, self.host)
    }

    // -----------------------------------------------------------------------
    // Pricing
    // -----------------------------------------------------------------------

    /// Recompute every line subtotal and both totals, writing them back to
    /// the surface and refreshing quantity markers.
    pub fn recompute_totals(&mut self) -> OrderTotals {
        let lines = self.surface.line_inputs();
        let totals = compute_totals(&self.tariffs, &lines);

        for (row, outcome) in totals.lines.iter().enumerate() {
            if outcome.is_invalid() {
                self.surface.set_invalid(Marker::Quantity(row), None);
            } else {
                self.surface.clear_invalid(Marker::Quantity(row));
            }
            self.surface
                .write_subtotal(row, &outcome.subtotal().to_string());
        }

        self.surface.write_pre_tax(&totals.pre_tax.to_string());
        self.surface.write_total(&totals.total.to_string());

        debug!(pre_tax = %totals.pre_tax, total = %totals.total, "totals recomputed");
        totals
    }

    // -----------------------------------------------------------------------
    // Verification
    // -----------------------------------------------------------------------

    fn check_field(&self, field: ContactField) -> FieldVerdict {
        match field {
            ContactField::Surname => validate_surname(&self.surface.field_value(field)),
            ContactField::FirstName => validate_first_name(&self.surface.field_value(field)),
            ContactField::Phone => validate_phone(&self.surface.field_value(field)),
            ContactField::Email => validate_email(self.surface.native_email_check()),
            ContactField::Consent => validate_consent(self.surface.consent_checked()),
        }
    }

    fn apply_verdict(&mut self, verdict: &FieldVerdict) {
        let marker = Marker::Field(verdict.field);
        if verdict.ok {
            if let Some(value) = &verdict.normalized {
                self.surface.set_field_value(verdict.field, value);
            }
            self.surface.clear_invalid(marker);
        } else {
            self.surface.set_invalid(marker, verdict.message);
        }
    }

    /// Full check: all five field rules (no short-circuit), then totals,
    /// then the gate and a single notification.
    pub fn verify(&mut self) -> VerifyReport {
        if !self.surface.check_validity() {
            self.surface.set_validation_attempted(true);
        }

        let mut fields = Vec::with_capacity(ContactField::ALL.len());
        for field in ContactField::ALL {
            let verdict = self.check_field(field);
            self.apply_verdict(&verdict);
            fields.push(verdict);
        }

        let totals = self.recompute_totals();
        let quantities_ok = (0..totals.lines.len())
            .all(|row| !self.surface.is_invalid(Marker::Quantity(row)));

        let ok = fields.iter().all(|v| v.ok) && quantities_ok;
        self.gate = VerificationState::from_check(ok);

        let kind = if ok {
            NoticeKind::Confirmed
        } else {
            NoticeKind::Corrective
        };
        self.host.notify(&self.notices.notice(kind));

        debug!(ok, quantities_ok, "verification complete");
        VerifyReport {
            fields,
            totals,
            quantities_ok,
            ok,
        }
    }

    // -----------------------------------------------------------------------
    // Submission / print / reset
    // -----------------------------------------------------------------------

    /// Submit if the last verification passed. Does not re-validate.
    pub fn submit(&mut self) -> SubmitOutcome {
        if !self.gate.is_verified() {
            warn!(gate = ?self.gate, "submission blocked: form not verified");
            self.host
                .notify(&self.notices.notice(NoticeKind::VerifyFirst));
            return SubmitOutcome::Blocked;
        }
        info!("submitting order form");
        self.surface.native_submit();
        SubmitOutcome::Submitted
    }

    pub fn print(&mut self) {
        self.host.print();
    }

    /// Post-reset cleanup: close the gate, drop every marker and recompute.
    ///
    /// Must run after the native reset has restored default values; use
    /// `dispatch(FormEvent::Reset)` to get that ordering.
    pub fn reset(&mut self) {
        self.gate = VerificationState::form_reset();
        self.surface.set_validation_attempted(false);
        self.surface.clear_all_invalid();
        self.recompute_totals();
        info!("form reset");
    }

    // -----------------------------------------------------------------------
    // Event dispatch
    // -----------------------------------------------------------------------

    /// Handle one event to completion, then drain deferred work.
    pub fn dispatch(&mut self, event: FormEvent) {
        self.handle(event);
        self.run_deferred();
    }

    fn handle(&mut self, event: FormEvent) {
        match event {
            FormEvent::Loaded | FormEvent::ItemTypeChanged(_) | FormEvent::QuantityInput(_) => {
                self.recompute_totals();
            }
            FormEvent::Print => self.print(),
            FormEvent::Verify => {
                self.verify();
            }
            FormEvent::Send => {
                self.submit();
            }
            FormEvent::Reset => {
                self.surface.native_reset();
                self.deferred.push_back(DeferredTask::AfterReset);
            }
        }
    }

    fn run_deferred(&mut self) {
        while let Some(task) = self.deferred.pop_front() {
            match task {
                DeferredTask::AfterReset => self.reset(),
            }
        }
    }
}
