//! Session gate and marker stores

mod file_store;
mod gate;
mod memory_store;

pub use file_store::FileMarkerStore;
pub use gate::{SessionGate, NO_VALID_KEY_MESSAGE};
pub use memory_store::InMemoryMarkerStore;
