//! PocketBank Terminal Adapter Layer
//!
//! Bootstrap (tracing, config, wiring) and the line-oriented terminal view.

pub mod bootstrap;
pub mod view;
