use serde::{Deserialize, Serialize};

/// The five contact fields, in verification order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactField {
    Surname,
    FirstName,
    Phone,
    Email,
    Consent,
}

impl ContactField {
    /// Verification order: surname, first name, phone, email, consent.
    pub const ALL: [ContactField; 5] = [
        ContactField::Surname,
        ContactField::FirstName,
        ContactField::Phone,
        ContactField::Email,
        ContactField::Consent,
    ];

    /// Element id of the field in the rendered form.
    pub fn element_id(&self) -> &'static str {
        match self {
            ContactField::Surname => "nom",
            ContactField::FirstName => "prenom",
            ContactField::Phone => "tel",
            ContactField::Email => "mail",
            ContactField::Consent => "cg",
        }
    }

    pub fn from_element_id(id: &str) -> Option<Self> {
        ContactField::ALL.into_iter().find(|f| f.element_id() == id)
    }

    /// Message shown next to the field when its rule fails.
    pub fn failure_message(&self) -> Option<&'static str> {
        match self {
            ContactField::Surname => Some(MSG_SURNAME_REQUIRED),
            ContactField::FirstName => Some(MSG_FIRST_NAME_REQUIRED),
            ContactField::Phone => Some(MSG_PHONE_INVALID),
            ContactField::Email => Some(MSG_EMAIL_INVALID),
            ContactField::Consent => None,
        }
    }
}

pub const MSG_SURNAME_REQUIRED: &str = "Le nom est obligatoire.";
pub const MSG_FIRST_NAME_REQUIRED: &str = "Le prénom est obligatoire (≥ 2 caractères).";
pub const MSG_PHONE_INVALID: &str = "Numéro invalide (ex: 01 23 45 67 89).";
pub const MSG_EMAIL_INVALID: &str = "Adresse e-mail invalide.";

/// Outcome of one field predicate.
///
/// The caller applies it to the form: set or clear the invalid marker,
/// show `message` on failure, write back `normalized` on success.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldVerdict {
    pub field: ContactField,
    pub ok: bool,
    pub message: Option<&'static str>,
    /// Replacement value for the field (surname uppercasing).
    pub normalized: Option<String>,
}

impl FieldVerdict {
    pub fn pass(field: ContactField) -> Self {
        Self {
            field,
            ok: true,
            message: None,
            normalized: None,
        }
    }

    pub fn fail(field: ContactField) -> Self {
        Self {
            field,
            ok: false,
            message: field.failure_message(),
            normalized: None,
        }
    }

    pub fn with_normalized(mut self, value: impl Into<String>) -> Self {
        self.normalized = Some(value.into());
        self
    }
}
