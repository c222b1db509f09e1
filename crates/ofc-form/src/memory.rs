//! In-memory form surface and recording host.
//!
//! `MemoryForm` stands in for the rendered form in the CLI and in tests.
//! It deserializes from a snapshot (YAML/JSON), remembers default values
//! for reset, and logs native submissions instead of posting them.

use std::collections::{BTreeMap, BTreeSet};

use ofc_pricing::{parse_quantity, LineInput};
use ofc_validate::{email_format_ok, ContactField};
use serde::{Deserialize, Serialize};

use crate::{FormSurface, Host, Marker, Notice};

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryRow {
    /// Selected item-type key.
    pub item: String,
    /// Quantity text as typed.
    pub qty: String,
    #[serde(default)]
    pub subtotal: String,
    #[serde(default)]
    pub qty_invalid: bool,
}

impl MemoryRow {
    pub fn new<I: Into<String>, Q: Into<String>>(item: I, qty: Q) -> Self {
        Self {
            item: item.into(),
            qty: qty.into(),
            subtotal: String::new(),
            qty_invalid: false,
        }
    }
}

/// Contact field values, keyed by their element ids.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactValues {
    pub nom: String,
    pub prenom: String,
    pub tel: String,
    pub mail: String,
    pub cg: bool,
}

/// Values the native reset restores.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDefaults {
    /// (item, qty) per row.
    pub rows: Vec<(String, String)>,
    pub contact: ContactValues,
}

/// What a native submission carried.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub contact: ContactValues,
    pub rows: Vec<LineInput>,
    pub pre_tax: String,
    pub total: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryForm {
    pub rows: Vec<MemoryRow>,
    pub contact: ContactValues,
    pub pre_tax: String,
    pub total: String,
    pub invalid_fields: BTreeSet<ContactField>,
    /// Feedback text shown under each field.
    pub feedback: BTreeMap<ContactField, String>,
    pub was_validated: bool,
    pub defaults: Option<FormDefaults>,
    pub submissions: Vec<Submission>,
}

impl MemoryForm {
    /// Build a form whose current values are also its reset defaults.
    pub fn new(rows: Vec<MemoryRow>, contact: ContactValues) -> Self {
        Self {
            rows,
            contact,
            ..Default::default()
        }
        .with_captured_defaults()
    }

    /// Record the current values as reset defaults unless some are already set.
    pub fn with_captured_defaults(mut self) -> Self {
        if self.defaults.is_none() {
            self.defaults = Some(FormDefaults {
                rows: self
                    .rows
                    .iter()
                    .map(|r| (r.item.clone(), r.qty.clone()))
                    .collect(),
                contact: self.contact.clone(),
            });
        }
        self
    }

    pub fn set_item(&mut self, row: usize, item: &str) -> bool {
        match self.rows.get_mut(row) {
            Some(r) => {
                r.item = item.to_string();
                true
            }
            None => false,
        }
    }

    pub fn set_quantity(&mut self, row: usize, qty: &str) -> bool {
        match self.rows.get_mut(row) {
            Some(r) => {
                r.qty = qty.to_string();
                true
            }
            None => false,
        }
    }

    pub fn set_consent(&mut self, checked: bool) {
        self.contact.cg = checked;
    }

    pub fn feedback_for(&self, field: ContactField) -> Option<&str> {
        self.feedback.get(&field).map(String::as_str)
    }

    /// Any marker at all, rows or fields.
    pub fn has_any_marker(&self) -> bool {
        !self.invalid_fields.is_empty() || self.rows.iter().any(|r| r.qty_invalid)
    }

    fn text_slot(&mut self, field: ContactField) -> Option<&mut String> {
        match field {
            ContactField::Surname => Some(&mut self.contact.nom),
            ContactField::FirstName => Some(&mut self.contact.prenom),
            ContactField::Phone => Some(&mut self.contact.tel),
            ContactField::Email => Some(&mut self.contact.mail),
            ContactField::Consent => None,
        }
    }
}

impl FormSurface for MemoryForm {
    fn line_inputs(&self) -> Vec<LineInput> {
        self.rows
            .iter()
            .map(|r| LineInput::new(r.item.clone(), r.qty.clone()))
            .collect()
    }

    fn write_subtotal(&mut self, row: usize, text: &str) {
        if let Some(r) = self.rows.get_mut(row) {
            r.subtotal = text.to_string();
        }
    }

    fn write_pre_tax(&mut self, text: &str) {
        self.pre_tax = text.to_string();
    }

    fn write_total(&mut self, text: &str) {
        self.total = text.to_string();
    }

    fn field_value(&self, field: ContactField) -> String {
        match field {
            ContactField::Surname => self.contact.nom.clone(),
            ContactField::FirstName => self.contact.prenom.clone(),
            ContactField::Phone => self.contact.tel.clone(),
            ContactField::Email => self.contact.mail.clone(),
            ContactField::Consent => String::new(),
        }
    }

    fn set_field_value(&mut self, field: ContactField, value: &str) {
        if let Some(slot) = self.text_slot(field) {
            *slot = value.to_string();
        }
    }

    fn consent_checked(&self) -> bool {
        self.contact.cg
    }

    fn set_invalid(&mut self, marker: Marker, message: Option<&str>) {
        match marker {
            Marker::Quantity(row) => {
                if let Some(r) = self.rows.get_mut(row) {
                    r.qty_invalid = true;
                }
            }
            Marker::Field(field) => {
                self.invalid_fields.insert(field);
                if let Some(msg) = message {
                    self.feedback.insert(field, msg.to_string());
                }
            }
        }
    }

    fn clear_invalid(&mut self, marker: Marker) {
        match marker {
            Marker::Quantity(row) => {
                if let Some(r) = self.rows.get_mut(row) {
                    r.qty_invalid = false;
                }
            }
            Marker::Field(field) => {
                self.invalid_fields.remove(&field);
            }
        }
    }

    fn is_invalid(&self, marker: Marker) -> bool {
        match marker {
            Marker::Quantity(row) => self.rows.get(row).is_some_and(|r| r.qty_invalid),
            Marker::Field(field) => self.invalid_fields.contains(&field),
        }
    }

    fn clear_all_invalid(&mut self) {
        self.invalid_fields.clear();
        for r in &mut self.rows {
            r.qty_invalid = false;
        }
    }

    /// Constraints the markup declares: every contact field required, email
    /// well-formed, consent ticked, quantities non-negative integers.
    fn check_validity(&self) -> bool {
        let c = &self.contact;
        !c.nom.is_empty()
            && !c.prenom.is_empty()
            && !c.tel.is_empty()
            && email_format_ok(&c.mail)
            && c.cg
            && self.rows.iter().all(|r| parse_quantity(&r.qty).is_ok())
    }

    fn set_validation_attempted(&mut self, attempted: bool) {
        self.was_validated = attempted;
    }

    fn native_submit(&mut self) {
        self.submissions.push(Submission {
            contact: self.contact.clone(),
            rows: self.line_inputs(),
            pre_tax: self.pre_tax.clone(),
            total: self.total.clone(),
        });
    }

    fn native_reset(&mut self) {
        let defaults = self.defaults.clone().unwrap_or_default();
        for (i, row) in self.rows.iter_mut().enumerate() {
            let (item, qty) = defaults.rows.get(i).cloned().unwrap_or_default();
            row.item = item;
            row.qty = qty;
            row.subtotal.clear();
        }
        self.contact = defaults.contact;
        self.pre_tax.clear();
        self.total.clear();
    }
}

/// Host that records notifications and print requests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RecordingHost {
    pub notices: Vec<Notice>,
    pub prints: usize,
}

impl RecordingHost {
    pub fn last_notice(&self) -> Option<&Notice> {
        self.notices.last()
    }
}

impl Host for RecordingHost {
    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }

    fn print(&mut self) {
        self.prints += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MemoryForm {
        MemoryForm::new(
            vec![MemoryRow::new("jour", "1"), MemoryRow::new("repas", "0")],
            ContactValues::default(),
        )
    }

    #[test]
    fn native_reset_restores_defaults_but_keeps_markers() {
        let mut f = sample();
        f.set_quantity(0, "-4");
        f.set_item(1, "demijour");
        f.contact.nom = "x".into();
        f.set_invalid(Marker::Quantity(0), None);
        f.set_invalid(Marker::Field(ContactField::Phone), Some("bad"));

        f.native_reset();

        assert_eq!(f.rows[0].qty, "1");
        assert_eq!(f.rows[1].item, "repas");
        assert_eq!(f.contact.nom, "");
        assert!(f.is_invalid(Marker::Quantity(0)));
        assert!(f.is_invalid(Marker::Field(ContactField::Phone)));
    }

    #[test]
    fn set_invalid_without_message_keeps_previous_feedback() {
        let mut f = sample();
        f.set_invalid(Marker::Field(ContactField::Email), Some("first"));
        f.set_invalid(Marker::Field(ContactField::Email), None);
        assert_eq!(f.feedback_for(ContactField::Email), Some("first"));
    }

    #[test]
    fn out_of_range_rows_are_ignored() {
        let mut f = sample();
        assert!(!f.set_quantity(9, "1"));
        f.set_invalid(Marker::Quantity(9), None);
        assert!(!f.is_invalid(Marker::Quantity(9)));
    }

    #[test]
    fn snapshot_deserializes_with_defaults() {
        let raw = r#"{"rows":[{"item":"jour","qty":"2"}],"contact":{"nom":"dupont"}}"#;
        let f: MemoryForm = serde_json::from_str(raw).unwrap();
        let f = f.with_captured_defaults();
        assert_eq!(f.rows[0].qty, "2");
        assert!(!f.contact.cg);
        assert_eq!(
            f.defaults.unwrap().rows,
            vec![("jour".to_string(), "2".to_string())]
        );
    }

    #[test]
    fn native_validity_requires_every_constraint() {
        let mut f = MemoryForm::new(
            vec![MemoryRow::new("jour", "2")],
            ContactValues {
                nom: "Dupont".into(),
                prenom: "Marie".into(),
                tel: "0123456789".into(),
                mail: "marie@example.fr".into(),
                cg: true,
            },
        );
        assert!(f.check_validity());
        f.set_quantity(0, "-1");
        assert!(!f.check_validity());
        f.set_quantity(0, "2");
        f.set_consent(false);
        assert!(!f.check_validity());
    }
}
