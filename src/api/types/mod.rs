//! Request and response types shared by the HTTP handlers

pub mod error;
pub mod json;

pub use error::ApiError;
pub use json::Json;
