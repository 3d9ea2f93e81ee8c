// Domain types and value objects
pub mod average_kind;
pub mod price_series;
pub mod window_pair;

// Re-export commonly used types
pub use average_kind::AverageKind;
pub use price_series::{PriceBar, PriceSeries};
pub use window_pair::WindowPair;
