pub mod auth;
pub mod registration;

pub use auth::{SignIn, SignInError};
pub use registration::{
    RegistrationFlowError, RegistrationOrchestrator, RegistrationOutcome, RegistrationPolicy,
    StepOutcome,
};
