use std::sync::LazyLock;

use regex::Regex;

use crate::{ContactField, FieldVerdict};

// ---------------------------------------------------------------------------
// Patterns
// ---------------------------------------------------------------------------

/// French phone numbers.
///
/// National: `0` + non-zero digit + four digit pairs.
/// International: `+33` / `0033`, non-zero digit, four digit pairs.
/// Pairs may be separated by one space, dot or hyphen. Digits are ASCII only.
pub const PHONE_PATTERN: &str =
    r"^(?:0[1-9](?:[ .-]?[0-9]{2}){4}|(?:\+33|0033)[ .-]?[1-9](?:[ .-]?[0-9]{2}){4})$";

/// HTML "valid e-mail address" grammar (what `<input type=email>` checks).
pub const EMAIL_PATTERN: &str = r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$";

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PHONE_PATTERN).expect("phone pattern compiles"));

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("email pattern compiles"));

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Browser-style trim: Unicode whitespace plus the byte-order mark.
fn trim_input(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// Surname: required. On success the value is uppercased.
pub fn validate_surname(value: &str) -> FieldVerdict {
    if value.is_empty() {
        return FieldVerdict::fail(ContactField::Surname);
    }
    FieldVerdict::pass(ContactField::Surname).with_normalized(value.to_uppercase())
}

/// First name: required, at least two UTF-16 units once trimmed
/// (an astral character such as an emoji counts as two).
pub fn validate_first_name(value: &str) -> FieldVerdict {
    if !value.is_empty() && trim_input(value).encode_utf16().count() >= 2 {
        FieldVerdict::pass(ContactField::FirstName)
    } else {
        FieldVerdict::fail(ContactField::FirstName)
    }
}

/// Phone: trimmed value must match [`PHONE_PATTERN`].
pub fn validate_phone(value: &str) -> FieldVerdict {
    if PHONE_RE.is_match(trim_input(value)) {
        FieldVerdict::pass(ContactField::Phone)
    } else {
        FieldVerdict::fail(ContactField::Phone)
    }
}

/// Email: the outcome of the form's native email check.
pub fn validate_email(native_check_ok: bool) -> FieldVerdict {
    if native_check_ok {
        FieldVerdict::pass(ContactField::Email)
    } else {
        FieldVerdict::fail(ContactField::Email)
    }
}

/// Consent: the checkbox must be ticked.
pub fn validate_consent(checked: bool) -> FieldVerdict {
    if checked {
        FieldVerdict::pass(ContactField::Consent)
    } else {
        FieldVerdict::fail(ContactField::Consent)
    }
}

/// Required + well-formed email, as a browser checks a required
/// `<input type=email>`. Surrounding whitespace is stripped first.
pub fn email_format_ok(value: &str) -> bool {
    let v = value.trim();
    !v.is_empty() && EMAIL_RE.is_match(v)
}
