//! Plain-text rendering of the wizard snapshot.

use std::fmt::Write;

use pb_core::registration::{RegistrationSnapshot, WizardStep};

pub fn step_title(step: WizardStep) -> &'static str {
    match step {
        WizardStep::Identity => "Personal data",
        WizardStep::Credentials => "Access",
        WizardStep::Verification => "E-mail verification",
        WizardStep::Address => "Address",
        WizardStep::Account => "Account",
    }
}

/// Renders the current step: its fields, their errors and the step-level
/// error. Secret fields are masked.
pub fn render_snapshot(snapshot: &RegistrationSnapshot) -> String {
    let mut out = String::new();
    let step = snapshot.step;
    let _ = writeln!(out, "== Step {step} · {} ==", step_title(step));

    for field in step.fields() {
        let value = snapshot.record.get(*field);
        let shown = if field.is_secret() && !value.is_empty() {
            "*".repeat(value.chars().count())
        } else {
            value.to_string()
        };
        let _ = writeln!(out, "  {:<30} {}", field.label(), shown);
        if let Some(message) = snapshot.errors.get(*field) {
            let _ = writeln!(out, "    ! {message}");
        }
    }

    if step == WizardStep::Account {
        let _ = writeln!(out, "  {:<30} {}", "Account kind", snapshot.record.account_kind);
    }

    if step == WizardStep::Verification {
        match snapshot.resend_cooldown {
            Some(0) => {
                let _ = writeln!(out, "  Didn't get the code? Type `resend`.");
            }
            Some(secs) => {
                let _ = writeln!(out, "  Resend available in {secs}s.");
            }
            None => {}
        }
    }

    if let Some(message) = snapshot.errors.form_error() {
        let _ = writeln!(out, "  ! {message}");
    }
    out
}
