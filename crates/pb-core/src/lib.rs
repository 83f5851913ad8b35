//! # pb-core
//!
//! Core domain models and ports for the PocketBank client.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

// Public module exports
pub mod auth;
pub mod config;
pub mod ports;
pub mod registration;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use registration::{
    AccountKind, FieldErrorMap, RegistrationError, RegistrationField, RegistrationRecord,
    RegistrationSnapshot, RemoteCheck, ResendCooldown, ValidationIssue, VerificationFlags,
    WizardStep,
};
