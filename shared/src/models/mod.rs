//! Request and response models for the Clima API

mod suggestion;
mod weather;

pub use suggestion::*;
pub use weather::*;
