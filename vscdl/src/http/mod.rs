//! Provider REST API client

pub mod client;
pub mod content;
pub mod deployments;
pub mod endpoint;
pub mod projects;
pub mod teams;

pub use client::ApiClient;
pub use content::ContentEncoding;
pub use endpoint::Endpoint;
