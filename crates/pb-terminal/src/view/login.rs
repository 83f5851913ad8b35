use std::io::Write;

use pb_app::SignIn;
use pb_core::auth::Route;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::warn;

/// Prompts for the password on `input` and signs in with `document`.
pub async fn run_login<R, W>(
    sign_in: &SignIn,
    document: &str,
    input: R,
    out: &mut W,
) -> anyhow::Result<Option<Route>>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    write!(out, "Password: ")?;
    out.flush()?;
    let password = input.lines().next_line().await?.unwrap_or_default();

    match sign_in.execute(document, password.trim_end()).await {
        Ok(route) => {
            writeln!(out, "Welcome back!")?;
            Ok(Some(route))
        }
        Err(err) => {
            warn!(error = %err, "sign-in failed");
            writeln!(out, "{}", err.user_message())?;
            Ok(None)
        }
    }
}
