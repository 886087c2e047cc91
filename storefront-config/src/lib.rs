//! Shared configuration library for Storefront.
//!
//! Loads the search tuning knobs from the environment, an explicit file or a
//! well-known default file, then runs guard rails over the result so that a
//! misconfigured deployment fails at startup instead of on the first request.
#![allow(missing_docs)]

pub mod loader;
pub mod models;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoader, ConfigMetadata, error::ConfigLoadError};
pub use models::{SearchConfig, SearchConfigSource};
pub use storefront_core::QueryLimits;
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings, apply_guard_rails};
