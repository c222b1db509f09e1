//! ofc-form
//!
//! Order-form controller:
//! - `FormSurface` / `Host` seams to the rendered form and its environment
//! - Submission gate (`VerificationState`), unverified on load and on reset
//! - `verify` runs every field rule plus totals, then sets the gate
//! - `submit` is gated on the last verify and never re-validates
//! - `dispatch` runs one event to completion, then deferred work
//!   (post-reset cleanup always sees the restored defaults)

mod controller;
mod gate;
mod memory;
mod surface;

pub use controller::{DeferredTask, FormEvent, OrderForm, SubmitOutcome, VerifyReport};
pub use gate::{UnverifiedReason, VerificationState};
pub use memory::{ContactValues, FormDefaults, MemoryForm, MemoryRow, RecordingHost, Submission};
pub use surface::{FormSurface, Host, Marker, Notice, NoticeKind, NoticeTexts};
