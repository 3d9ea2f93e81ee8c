//! Configuration module for the crossover scout.

pub mod binance;
pub mod search;

mod debug; // Private: files use crate::config::DEBUG_FLAGS not crate::config::debug::DEBUG_FLAGS
pub use debug::DEBUG_FLAGS;

pub mod plot;

// Re-export commonly used items
pub use binance::BINANCE;
pub use plot::PLOT_CONFIG;
pub use search::SEARCH;
