//! Submission gate.
//!
//! # Invariants
//!
//! - **Load is always unverified**: a fresh controller starts in
//!   `Unverified { BootDefault }`. Nothing carries over from a previous page.
//!
//! - **Every verify overwrites the gate**: a passing check yields `Verified`,
//!   a failing one `Unverified { CheckFailed }`, whatever the prior state was.
//!
//! - **Reset always closes the gate**: `Unverified { FormReset }`.
//!
//! - **Submit only reads it**: the gate is never re-derived at submit time,
//!   so edits made after a passing verify go out unchecked.

use serde::{Deserialize, Serialize};

/// Why the form is not currently verified.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnverifiedReason {
    /// Nothing has been verified since load.
    BootDefault,
    /// The last verification found at least one failing check.
    CheckFailed,
    /// The form was reset after the last verification.
    FormReset,
}

/// Result of the last full verification.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum VerificationState {
    Verified,
    Unverified { reason: UnverifiedReason },
}

impl VerificationState {
    pub fn boot() -> Self {
        VerificationState::Unverified {
            reason: UnverifiedReason::BootDefault,
        }
    }

    pub fn from_check(ok: bool) -> Self {
        if ok {
            VerificationState::Verified
        } else {
            VerificationState::Unverified {
                reason: UnverifiedReason::CheckFailed,
            }
        }
    }

    pub fn form_reset() -> Self {
        VerificationState::Unverified {
            reason: UnverifiedReason::FormReset,
        }
    }

    /// `true` if submission is permitted.
    pub fn is_verified(&self) -> bool {
        matches!(self, VerificationState::Verified)
    }
}

impl Default for VerificationState {
    fn default() -> Self {
        Self::boot()
    }
}
