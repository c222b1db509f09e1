//! ofc-validate
//!
//! Contact-field rules for the order form: surname, first name, French
//! phone number, email, consent. Each rule returns a [`FieldVerdict`];
//! nothing here touches the form or panics on odd input.

mod rules;
mod types;

pub use rules::{
    email_format_ok, validate_consent, validate_email, validate_first_name, validate_phone,
    validate_surname, EMAIL_PATTERN, PHONE_PATTERN,
};
pub use types::*;
