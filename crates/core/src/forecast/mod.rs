pub mod advice;
pub mod provider;
pub mod rng;
pub mod series;

pub use provider::{build_forecasting_mock, generate_forecast};
pub use series::{generate_series, SeriesParams};
