//! Terminal presentation of the registration wizard and sign-in.

mod command;
mod login;
mod presenter;
mod render;
mod session;

pub use command::{Command, CommandError, HELP};
pub use login::run_login;
pub use presenter::TerminalPresenter;
pub use render::{render_snapshot, step_title};
pub use session::run_registration;
