//! Port interfaces for the application layer
//!
//! Ports define the contract between the application logic (use cases)
//! and infrastructure implementations. This follows Hexagonal Architecture
//! principles, allowing the core business logic to remain independent of
//! external dependencies.
//!
//! ## Port Placement Guidelines
//!
//! Before adding a new port to `pb-core/ports`, ask yourself three questions:
//!
//! 1. **Does this port represent a business capability?**
//! 2. **Will it be depended upon by multiple use cases or domains?**
//! 3. **Is it implemented by the infrastructure or adapter layer?**
//!
//! If all three answers are **yes**, place it in `pb-core/ports`.
//! Otherwise, place it in the relevant domain submodule.

mod api_error;
pub mod auth_api;
pub mod registration_api;
pub mod registration_event;
pub mod session_store;

pub use api_error::ApiError;
pub use auth_api::AuthApiPort;
pub use registration_api::{
    AccountCreationResponse, CodeDispatchResponse, CodeVerificationResponse,
    RegistrationApiPort, UniquenessResponse,
};
pub use registration_event::RegistrationEventPort;
pub use session_store::{SessionStoreError, SessionStorePort};
