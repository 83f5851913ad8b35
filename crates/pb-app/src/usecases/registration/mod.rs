//! Registration use cases.
//!
//! This module exposes the registration orchestrator and the pieces it is
//! built from.

mod context;
pub mod orchestrator;
mod policy;
mod resend_timer;
mod submit;
mod validators;

pub use context::RegistrationContext;
pub use orchestrator::{RegistrationFlowError, RegistrationOrchestrator, StepOutcome};
pub use policy::{RegistrationPolicy, DEFAULT_DOCUMENT_CHECK_TIMEOUT};
pub use resend_timer::ResendTimer;
pub use submit::{RegistrationOutcome, SubmitRegistration};
pub use validators::{StepValidator, StepVerdict};
