use crate::domain::forecast::{ForecastPoint, SeriesKey};
use crate::forecast::rng::Mulberry32;
use crate::time::start_date::format_iso_date;
use chrono::{Days, NaiveDate};

// Spread of the opening value around `base`, as a fraction of volatility.
const OPENING_SPREAD: f64 = 0.6;
// Largest single random-walk step, as a fraction of `walk_scale * volatility`.
const WALK_DAMPING: f64 = 0.25;
const SHOCK_FLOOR: f64 = 0.6;

// Upper bound for up-front allocation; longer horizons grow the vec as usual.
const MAX_PREALLOC: i64 = 366;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesParams {
    pub horizon_days: i64,
    pub base: f64,
    pub volatility: f64,
    pub key: SeriesKey,
    pub start_date: NaiveDate,
    pub drift_scale: f64,
    /// `+1.0` trends up, `-1.0` trends down.
    pub drift_direction: f64,
    pub walk_scale: f64,
    pub shock_chance: f64,
    pub shock_scale: f64,
    pub mean_reversion: f64,
}

impl SeriesParams {
    /// `key|start|base|volatility|horizon`, the string the seed is hashed from.
    pub fn seed_key(&self) -> String {
        format!(
            "{}|{}|{}|{}|{}",
            self.key.as_str(),
            format_iso_date(self.start_date),
            self.base,
            self.volatility,
            self.horizon_days
        )
    }
}

/// Produces exactly `horizon_days` daily points starting at `start_date`; a non-positive horizon
/// yields an empty series. Output is fully determined by the params. The start date must leave
/// room for the whole horizon (see [`covers_horizon`](crate::time::start_date::covers_horizon)).
pub fn generate_series(params: &SeriesParams) -> Vec<ForecastPoint> {
    if params.horizon_days <= 0 {
        return Vec::new();
    }

    let steps = params.horizon_days;
    let steps_f = steps as f64;
    let vol = params.volatility;
    let mut rng = Mulberry32::from_key(&params.seed_key());

    let mut current = params.base + (rng.next_f64() - 0.5) * vol * OPENING_SPREAD;
    let mut out = Vec::with_capacity(steps.min(MAX_PREALLOC) as usize);

    for i in 1..=steps {
        let progress = i as f64 / steps_f;
        let drift =
            params.drift_direction * params.drift_scale * vol * progress * 2.0 / steps_f;
        let walk = (rng.next_f64() * 2.0 - 1.0) * params.walk_scale * vol * WALK_DAMPING;

        let shock = if rng.next_f64() < params.shock_chance {
            let sign = if rng.next_f64() < 0.5 { -1.0 } else { 1.0 };
            sign * vol * params.shock_scale * (SHOCK_FLOOR + rng.next_f64())
        } else {
            0.0
        };

        let revert = (params.base - current) * params.mean_reversion;
        current += drift + walk + shock + revert;

        let Some(date) = params.start_date.checked_add_days(Days::new((i - 1) as u64)) else {
            tracing::warn!(start_date = %params.start_date, i, "forecast date out of range; truncating series");
            break;
        };

        out.push(ForecastPoint {
            t: format!("D{i}"),
            date,
            key: params.key,
            value: round1(current),
        });
    }

    out
}

/// One-decimal rounding with halves going up, like `Math.round(x * 10) / 10`.
pub fn round1(x: f64) -> f64 {
    (x * 10.0 + 0.5).floor() / 10.0
}
