//! PocketBank Infrastructure Layer
//!
//! Adapters implementing the `pb-core` ports: the HTTP banking API client
//! and the file-backed session store.

pub mod fs;
pub mod http;
pub mod storage;

pub use http::HttpBankingApi;
pub use storage::FileSessionStore;
