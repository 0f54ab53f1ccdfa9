//! Shared types and rules for Clima
//!
//! This crate contains types shared between the backend and the browser
//! controller (via WASM): request/response models, the static clothing
//! suggestion table and the numeric extraction used on rendered text.

pub mod models;
pub mod suggestion;
pub mod types;
pub mod validation;

pub use models::*;
pub use suggestion::*;
pub use types::*;
pub use validation::*;
