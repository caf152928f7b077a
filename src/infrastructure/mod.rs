//! Infrastructure layer - adapters behind the domain traits

pub mod api_key;
pub mod logging;
pub mod notification;
pub mod session;
pub mod storage;
