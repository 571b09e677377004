use crate::domain::forecast::{ForecastFilters, ForecastPoint, ForecastResponse};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SellingAdvice {
    #[serde(rename = "Sell now")]
    SellNow,
    #[serde(rename = "Delay selling")]
    DelaySelling,
}

impl SellingAdvice {
    pub fn label(self) -> &'static str {
        match self {
            SellingAdvice::SellNow => "Sell now",
            SellingAdvice::DelaySelling => "Delay selling",
        }
    }
}

impl fmt::Display for SellingAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// "Sell now" only when the price ends at or above both its start and its average, and demand
/// does not end lower than it started. `None` when either series is empty.
pub fn selling_advice(resp: &ForecastResponse) -> Option<SellingAdvice> {
    let price = SeriesStats::of(&resp.price_forecast)?;
    let demand = SeriesStats::of(&resp.demand_forecast)?;

    let price_favorable = price.last >= price.first && price.last >= price.mean;
    let demand_not_down = demand.last >= demand.first;

    Some(if price_favorable && demand_not_down {
        SellingAdvice::SellNow
    } else {
        SellingAdvice::DelaySelling
    })
}

/// `Last run: 30 day(s) starting 2026-01-01 | NPK: N=42 P=18 K=33`
pub fn run_summary(resp: &ForecastResponse) -> Option<String> {
    let first = resp.price_forecast.first()?;
    let days = resp.price_forecast.len();
    Some(format!(
        "Last run: {days} day(s) starting {} | NPK: {}",
        first.date,
        npk_label(&resp.filters)
    ))
}

fn npk_label(filters: &ForecastFilters) -> String {
    let fmt_reading = |v: Option<f64>| v.map_or_else(|| "--".to_string(), |n| n.to_string());
    format!(
        "N={} P={} K={}",
        fmt_reading(filters.nitrogen_n),
        fmt_reading(filters.phosphorus_p),
        fmt_reading(filters.potassium_k)
    )
}

struct SeriesStats {
    first: f64,
    last: f64,
    mean: f64,
}

impl SeriesStats {
    fn of(points: &[ForecastPoint]) -> Option<Self> {
        let values: Vec<f64> = points
            .iter()
            .map(|p| p.value)
            .filter(|v| v.is_finite())
            .collect();
        let first = *values.first()?;
        let last = *values.last()?;
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        Some(Self { first, last, mean })
    }
}
