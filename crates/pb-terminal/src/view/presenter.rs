use std::io::{self, Write};
use std::sync::Mutex;

use async_trait::async_trait;
use pb_core::ports::RegistrationEventPort;
use pb_core::registration::{FieldErrorMap, RegistrationSnapshot, WizardStep};
use tracing::warn;

use super::render::render_snapshot;

#[derive(Default)]
struct Rendered {
    step: Option<WizardStep>,
    errors: FieldErrorMap,
    loading: bool,
}

/// Writes the wizard to a terminal as it changes.
///
/// Field edits alone are not echoed; the step is redrawn when it changes or
/// when its errors change, and a short notice marks the start of a check.
pub struct TerminalPresenter<W: Write + Send> {
    out: Mutex<W>,
    rendered: Mutex<Rendered>,
}

impl TerminalPresenter<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> TerminalPresenter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            rendered: Mutex::new(Rendered::default()),
        }
    }

    /// Gives back the writer.
    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self, text: &str) {
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        if let Err(err) = out.write_all(text.as_bytes()).and_then(|_| out.flush()) {
            warn!(error = %err, "failed to write to terminal");
        }
    }

    fn present(&self, snapshot: &RegistrationSnapshot) {
        let mut rendered = self.rendered.lock().unwrap_or_else(|e| e.into_inner());

        if snapshot.loading {
            if !rendered.loading {
                rendered.loading = true;
                self.write("  ... checking\n");
            }
            return;
        }
        rendered.loading = false;

        if rendered.step == Some(snapshot.step) && rendered.errors == snapshot.errors {
            return;
        }
        rendered.step = Some(snapshot.step);
        rendered.errors = snapshot.errors.clone();
        self.write(&render_snapshot(snapshot));
    }
}

#[async_trait]
impl<W: Write + Send> RegistrationEventPort for TerminalPresenter<W> {
    async fn emit_registration_changed(&self, snapshot: RegistrationSnapshot) {
        self.present(&snapshot);
    }
}
