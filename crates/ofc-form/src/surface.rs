//! Seams between the controller and its environment.
//!
//! [`FormSurface`] is the rendered form: rows, outputs, contact fields,
//! invalid markers and the native validity/submit/reset facilities. It is
//! queried fresh on every operation; the controller keeps no copy of it.
//!
//! [`Host`] is everything outside the form: blocking notifications and
//! the print facility.

use ofc_pricing::LineInput;
use ofc_validate::{email_format_ok, ContactField};
use serde::{Deserialize, Serialize};

/// An element that can carry the "invalid" marking.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Marker {
    /// Quantity input of the given row.
    Quantity(usize),
    Field(ContactField),
}

pub trait FormSurface {
    /// Current rows, top to bottom.
    fn line_inputs(&self) -> Vec<LineInput>;

    fn write_subtotal(&mut self, row: usize, text: &str);
    fn write_pre_tax(&mut self, text: &str);
    fn write_total(&mut self, text: &str);

    /// Text value of a contact field (empty for the consent checkbox).
    fn field_value(&self, field: ContactField) -> String;
    fn set_field_value(&mut self, field: ContactField, value: &str);
    fn consent_checked(&self) -> bool;

    /// The form's built-in email check.
    fn native_email_check(&self) -> bool {
        email_format_ok(&self.field_value(ContactField::Email))
    }

    /// Mark an element invalid, optionally replacing its feedback text.
    fn set_invalid(&mut self, marker: Marker, message: Option<&str>);
    fn clear_invalid(&mut self, marker: Marker);
    fn is_invalid(&self, marker: Marker) -> bool;
    /// Remove every invalid marking currently present.
    fn clear_all_invalid(&mut self);

    /// Native constraint check over the whole form.
    fn check_validity(&self) -> bool;
    /// "Validation attempted" styling flag on the form.
    fn set_validation_attempted(&mut self, attempted: bool);

    fn native_submit(&mut self);
    /// Restore every input to its default value. Markers are left alone.
    fn native_reset(&mut self);
}

/// Kinds of blocking notification.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// Verification failed; fields need correcting.
    Corrective,
    /// Verification passed.
    Confirmed,
    /// Send attempted before a successful verification.
    VerifyFirst,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

/// User-facing notification texts.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoticeTexts {
    pub corrective: String,
    pub confirmed: String,
    pub verify_first: String,
}

impl Default for NoticeTexts {
    fn default() -> Self {
        Self {
            corrective: "Merci de corriger les champs indiqués en rouge.".to_string(),
            confirmed: "✅ Formulaire vérifié, vous pouvez envoyer votre commande.".to_string(),
            verify_first: "Veuillez d'abord cliquer sur \"Vérifier avant envoi\".".to_string(),
        }
    }
}

impl NoticeTexts {
    pub fn notice(&self, kind: NoticeKind) -> Notice {
        let text = match kind {
            NoticeKind::Corrective => &self.corrective,
            NoticeKind::Confirmed => &self.confirmed,
            NoticeKind::VerifyFirst => &self.verify_first,
        };
        Notice {
            kind,
            text: text.clone(),
        }
    }
}

pub trait Host {
    /// Show a blocking notification.
    fn notify(&mut self, notice: &Notice);
    /// Hand off to the print facility. Fire-and-forget.
    fn print(&mut self);
}
