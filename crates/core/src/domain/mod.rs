pub mod contract;
pub mod forecast;
