pub mod config;
pub mod tracing;
pub mod wiring;

pub use config::{fill_missing, load_config};
pub use self::tracing::init_tracing_subscriber;
pub use wiring::{wire_dependencies, AppDeps, WiringError};
