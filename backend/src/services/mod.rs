//! Business logic services for the Clima API

pub mod suggestion;

pub use suggestion::SuggestionService;
