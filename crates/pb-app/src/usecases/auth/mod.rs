//! Sign-in use cases.

mod sign_in;

pub use sign_in::{SignIn, SignInError};
