//! HTTP handlers for the Clima API

pub mod health;
pub mod suggestion;
pub mod weather;

pub use health::health_check;
pub use suggestion::suggest_clothing;
pub use weather::get_current_weather;
