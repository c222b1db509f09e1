use anyhow::{Context, Result};
use ofc_form::{MemoryForm, OrderForm, RecordingHost};
use ofc_pricing::LineOutcome;
use std::fs;

/// Read a form snapshot (YAML or JSON). Its values become the reset defaults
/// unless the snapshot carries explicit `defaults`.
pub fn load_form(path: &str) -> Result<MemoryForm> {
    let bytes = fs::read(path).with_context(|| format!("read form snapshot failed: {path}"))?;
    // Strip UTF-8 BOM if present.
    let bytes = bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]).unwrap_or(&bytes);
    let raw = std::str::from_utf8(bytes).context("form snapshot must be UTF-8 text")?;

    let form: MemoryForm = serde_yaml::from_str(raw)
        .with_context(|| format!("FORM_SNAPSHOT_INVALID: {path}"))?;
    Ok(form.with_captured_defaults())
}

/// Execute `ofc totals`.
pub fn totals(path: &str) -> Result<()> {
    let form = load_form(path)?;
    let mut ctl = OrderForm::new(form, RecordingHost::default());
    let totals = ctl.recompute_totals();

    for (i, (row, outcome)) in ctl.surface().rows.iter().zip(&totals.lines).enumerate() {
        let qty_ok = !outcome.is_invalid();
        let reason = match outcome {
            LineOutcome::Priced { .. } => String::new(),
            LineOutcome::Invalid { reason } => format!(" reason={reason:?}"),
        };
        println!(
            "line={} type={} qty={:?} qty_ok={} subtotal={}{}",
            i, row.item, row.qty, qty_ok, row.subtotal, reason
        );
    }
    println!("pre_tax={}", ctl.surface().pre_tax);
    println!("total={}", ctl.surface().total);
    Ok(())
}
