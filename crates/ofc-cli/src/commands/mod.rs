//! Command handlers for the `ofc` binary.
//!
//! Output is one `key=value` fact per line so scripts and tests can grep it.

mod config;
mod form;
mod run;

pub use config::config_hash;
pub use form::{load_form, totals};
pub use run::run_script;
