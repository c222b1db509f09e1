use anyhow::{bail, Context, Result};
use ofc_config::FormConfig;
use ofc_form::{
    FormEvent, FormSurface, MemoryForm, NoticeKind, NoticeTexts, OrderForm, RecordingHost,
    UnverifiedReason, VerificationState,
};
use ofc_validate::ContactField;
use std::fs;

use super::load_form;

/// One scripted step of `ofc run`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ScriptStep {
    Event(FormEvent),
    SetQuantity { row: usize, text: String },
    SetItem { row: usize, key: String },
    SetField { field: ContactField, text: String },
    SetConsent(bool),
}

/// Parse `verify`, `qty:1=3`, `field:nom=dupont`, `consent=true`, ...
pub fn parse_step(raw: &str) -> Result<ScriptStep> {
    let step = match raw.trim() {
        "print" => ScriptStep::Event(FormEvent::Print),
        "verify" => ScriptStep::Event(FormEvent::Verify),
        "send" => ScriptStep::Event(FormEvent::Send),
        "reset" => ScriptStep::Event(FormEvent::Reset),
        other => {
            let (lhs, value) = other
                .split_once('=')
                .with_context(|| format!("unknown event: {other}"))?;
            match lhs.split_once(':') {
                Some(("qty", row)) => ScriptStep::SetQuantity {
                    row: parse_row(row)?,
                    text: value.to_string(),
                },
                Some(("type", row)) => ScriptStep::SetItem {
                    row: parse_row(row)?,
                    key: value.to_string(),
                },
                Some(("field", id)) => {
                    let field = ContactField::from_element_id(id)
                        .filter(|f| *f != ContactField::Consent)
                        .with_context(|| format!("unknown text field: {id}"))?;
                    ScriptStep::SetField {
                        field,
                        text: value.to_string(),
                    }
                }
                None if lhs == "consent" => ScriptStep::SetConsent(
                    value
                        .parse()
                        .with_context(|| format!("consent must be true|false, got: {value}"))?,
                ),
                _ => bail!("unknown event: {other}"),
            }
        }
    };
    Ok(step)
}

fn parse_row(s: &str) -> Result<usize> {
    s.parse()
        .with_context(|| format!("row must be a non-negative integer, got: {s}"))
}

fn notice_texts(cfg: &FormConfig) -> NoticeTexts {
    let mut texts = NoticeTexts::default();
    if let Some(s) = &cfg.notices.corrective {
        texts.corrective = s.clone();
    }
    if let Some(s) = &cfg.notices.confirmed {
        texts.confirmed = s.clone();
    }
    if let Some(s) = &cfg.notices.verify_first {
        texts.verify_first = s.clone();
    }
    texts
}

fn apply_step(ctl: &mut OrderForm<MemoryForm, RecordingHost>, step: ScriptStep) -> Result<()> {
    match step {
        ScriptStep::Event(ev) => ctl.dispatch(ev),
        ScriptStep::SetQuantity { row, text } => {
            if !ctl.surface_mut().set_quantity(row, &text) {
                bail!("no such row: {row}");
            }
            ctl.dispatch(FormEvent::QuantityInput(row));
        }
        ScriptStep::SetItem { row, key } => {
            if !ctl.surface_mut().set_item(row, &key) {
                bail!("no such row: {row}");
            }
            ctl.dispatch(FormEvent::ItemTypeChanged(row));
        }
        ScriptStep::SetField { field, text } => ctl.surface_mut().set_field_value(field, &text),
        ScriptStep::SetConsent(checked) => ctl.surface_mut().set_consent(checked),
    }
    Ok(())
}

fn kind_str(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Corrective => "corrective",
        NoticeKind::Confirmed => "confirmed",
        NoticeKind::VerifyFirst => "verify_first",
    }
}

fn gate_str(gate: VerificationState) -> String {
    match gate {
        VerificationState::Verified => "verified".to_string(),
        VerificationState::Unverified { reason } => {
            let r = match reason {
                UnverifiedReason::BootDefault => "boot_default",
                UnverifiedReason::CheckFailed => "check_failed",
                UnverifiedReason::FormReset => "form_reset",
            };
            format!("unverified reason={r}")
        }
    }
}

fn invalid_list(form: &MemoryForm) -> String {
    let mut items: Vec<String> = form
        .invalid_fields
        .iter()
        .map(|f| f.element_id().to_string())
        .collect();
    items.extend(
        form.rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.qty_invalid)
            .map(|(i, _)| format!("qty:{i}")),
    );
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(",")
    }
}

/// Execute `ofc run`.
pub fn run_script(path: &str, events: &[String], out: Option<&str>, cfg: &FormConfig) -> Result<()> {
    // Parse everything first so a typo never runs half a script.
    let steps = events
        .iter()
        .map(|e| parse_step(e))
        .collect::<Result<Vec<_>>>()?;

    let form = load_form(path)?;
    let mut ctl =
        OrderForm::new(form, RecordingHost::default()).with_notices(notice_texts(cfg));
    ctl.dispatch(FormEvent::Loaded);

    let mut seen = 0;
    for (raw, step) in events.iter().zip(steps) {
        apply_step(&mut ctl, step)?;
        println!("step={}", raw.trim());
        for n in &ctl.host().notices[seen..] {
            println!("notice kind={} text={:?}", kind_str(n.kind), n.text);
        }
        seen = ctl.host().notices.len();
    }

    let s = ctl.surface();
    println!("gate={}", gate_str(ctl.gate()));
    println!("submitted={}", s.submissions.len());
    println!("prints={}", ctl.host().prints);
    println!("pre_tax={}", s.pre_tax);
    println!("total={}", s.total);
    println!("invalid={}", invalid_list(s));
    println!("nom={:?}", s.field_value(ContactField::Surname));

    if let Some(p) = out {
        let json = serde_json::to_string_pretty(s).context("serialize form state failed")?;
        fs::write(p, json).with_context(|| format!("write form state failed: {p}"))?;
        println!("out={p}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_events() {
        assert_eq!(parse_step("verify").unwrap(), ScriptStep::Event(FormEvent::Verify));
        assert_eq!(parse_step(" send ").unwrap(), ScriptStep::Event(FormEvent::Send));
    }

    #[test]
    fn parses_edits() {
        assert_eq!(
            parse_step("qty:1=-3").unwrap(),
            ScriptStep::SetQuantity {
                row: 1,
                text: "-3".into()
            }
        );
        assert_eq!(
            parse_step("field:tel=01 23 45 67 89").unwrap(),
            ScriptStep::SetField {
                field: ContactField::Phone,
                text: "01 23 45 67 89".into()
            }
        );
        assert_eq!(parse_step("consent=false").unwrap(), ScriptStep::SetConsent(false));
        assert_eq!(
            parse_step("type:0=repas").unwrap(),
            ScriptStep::SetItem {
                row: 0,
                key: "repas".into()
            }
        );
    }

    #[test]
    fn rejects_unknown_steps() {
        assert!(parse_step("submit").is_err());
        assert!(parse_step("qty:x=1").is_err());
        assert!(parse_step("field:cg=1").is_err());
        assert!(parse_step("field:adresse=x").is_err());
        assert!(parse_step("consent=maybe").is_err());
    }
}
