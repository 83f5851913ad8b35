//! Line-oriented command loop driving the registration wizard.

use std::io::Write;

use pb_app::{RegistrationFlowError, RegistrationOrchestrator, RegistrationOutcome, StepOutcome};
use pb_core::auth::Route;
use pb_core::registration::WizardStep;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use super::command::{Command, CommandError, HELP};
use super::render::render_snapshot;

/// Reads commands from `input` until the account is created, the user
/// quits or the input ends. Quitting or running out of input abandons the
/// wizard and returns `None`.
pub async fn run_registration<R, W>(
    wizard: &RegistrationOrchestrator,
    input: R,
    out: &mut W,
) -> anyhow::Result<Option<RegistrationOutcome>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "PocketBank - open your account. Type `help` for commands.")?;
    write!(out, "{}", render_snapshot(&wizard.snapshot().await))?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(CommandError::Empty) => continue,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };

        match command {
            Command::Set { field, value } => wizard.update_field(field, &value).await,
            Command::Account(kind) => wizard.select_account_kind(kind).await,
            Command::Next => match wizard.next_step().await {
                Ok(StepOutcome::Submitted(outcome)) => {
                    report_created(&outcome, out)?;
                    return Ok(Some(outcome));
                }
                Ok(StepOutcome::Rejected { .. }) | Ok(StepOutcome::SubmissionFailed) => {
                    writeln!(out, "Fix the fields above and type `next` again.")?;
                }
                Ok(StepOutcome::Advanced { .. }) => {}
                Err(RegistrationFlowError::Busy) => {
                    writeln!(out, "Still checking, please wait.")?;
                }
            },
            Command::Back => {
                if let Err(RegistrationFlowError::Busy) = wizard.prev_step().await {
                    writeln!(out, "Still checking, please wait.")?;
                }
            }
            Command::Resend => match wizard.resend_code().await {
                Ok(true) => writeln!(out, "A new code is on its way.")?,
                Ok(false) => {
                    let snapshot = wizard.snapshot().await;
                    match (snapshot.step, snapshot.resend_cooldown) {
                        (WizardStep::Verification, Some(secs)) => {
                            writeln!(out, "You can ask for a new code in {secs}s.")?
                        }
                        _ => writeln!(out, "There is no code to resend on this step.")?,
                    }
                }
                Err(RegistrationFlowError::Busy) => {
                    writeln!(out, "Still checking, please wait.")?;
                }
            },
            Command::Show => write!(out, "{}", render_snapshot(&wizard.snapshot().await))?,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => break,
        }
    }

    wizard.abandon().await;
    writeln!(out, "Registration abandoned.")?;
    Ok(None)
}

fn report_created<W: Write>(outcome: &RegistrationOutcome, out: &mut W) -> anyhow::Result<()> {
    match &outcome.account_id {
        Some(id) => writeln!(out, "Account {id} created.")?,
        None => writeln!(out, "Account created.")?,
    }
    match outcome.next_route {
        Route::Home => writeln!(out, "You are signed in.")?,
        Route::Login => writeln!(out, "Sign in with `pocketbank login --cpf <CPF>`.")?,
    }
    Ok(())
}
