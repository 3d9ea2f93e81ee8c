// Price loading ahead of the search
pub mod pre_main_async;
pub mod prices;

// Re-export commonly used types
pub use pre_main_async::{
    fetch_price_series, price_request, require_benchmark_warm_up, require_rows,
};
pub use prices::{CreatePriceSeries, PriceRequest, get_price_series_async};
