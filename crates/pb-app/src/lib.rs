//! PocketBank Application Layer
//!
//! This crate contains the registration wizard and sign-in use cases. It
//! depends only on `pb-core` ports; adapters are injected by the caller.

pub mod usecases;

#[cfg(test)]
pub(crate) mod mocks;

pub use usecases::{
    RegistrationFlowError, RegistrationOrchestrator, RegistrationOutcome, RegistrationPolicy,
    SignIn, SignInError, StepOutcome,
};
