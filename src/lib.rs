//! WebFinger Server
//!
//! Resolves WebFinger resource identifiers (`acct:`, `mailto:`) to local
//! accounts and answers `/.well-known/webfinger` with a JSON Resource
//! Descriptor.

pub mod api;
pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod jrd;
pub mod lookup;
pub mod server;

pub use context::AppContext;
pub use error::{FingerError, FingerResult};
