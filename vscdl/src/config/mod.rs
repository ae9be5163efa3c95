//! Configuration
//!
//! [`Settings`] is the optional on-disk file; [`ApiConfig`] is the immutable
//! object handed to the API client once settings, environment and command
//! line have been merged.

pub mod api;
pub mod settings;

pub use api::ApiConfig;
pub use settings::Settings;
