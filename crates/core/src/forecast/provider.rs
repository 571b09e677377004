use crate::domain::forecast::{
    region_factor, variety_factor, ForecastFilters, ForecastRequest, ForecastResponse,
    SeriesKey, Sentiment, SentimentNote,
};
use crate::forecast::series::{generate_series, SeriesParams};
use crate::time::start_date::{resolve_start_date, today_local};
use chrono::NaiveDate;

const SENTIMENT_BASE: i32 = 62;
const SENTIMENT_MIN: i32 = 10;
const SENTIMENT_MAX: i32 = 95;

// Mean NPK reading treated as neutral soil.
const NUTRIENT_REFERENCE: f64 = 40.0;
const NUTRIENT_DELTA_LIMIT: f64 = 0.35;
const NUTRIENT_PRICE_SHIFT: f64 = 6.0;
const NUTRIENT_DEMAND_SHIFT: f64 = 8.0;

/// Per-series knobs; `volatility` is indexed by horizon bucket (<= 7, <= 30, longer).
#[derive(Debug, Clone, Copy)]
struct SeriesTuning {
    volatility: [f64; 3],
    drift_scale: f64,
    drift_direction: f64,
    walk_scale: f64,
    shock_chance: f64,
    shock_scale: f64,
    mean_reversion: f64,
}

const PRICE_TUNING: SeriesTuning = SeriesTuning {
    volatility: [2.2, 4.8, 7.5],
    drift_scale: 0.28,
    drift_direction: 1.0,
    walk_scale: 0.85,
    shock_chance: 0.06,
    shock_scale: 0.9,
    mean_reversion: 0.09,
};

const DEMAND_TUNING: SeriesTuning = SeriesTuning {
    volatility: [1.6, 3.2, 5.2],
    drift_scale: 0.22,
    drift_direction: -1.0,
    walk_scale: 0.7,
    shock_chance: 0.04,
    shock_scale: 0.75,
    mean_reversion: 0.12,
};

const SENTIMENT_DRIVERS: [&str; 3] = ["Policy", "Weather", "Supply chain"];

const SENTIMENT_NOTES: [(&str, &str, &str); 3] = [
    ("s1", "2026-01-02", "Policy chatter improved market outlook."),
    ("s2", "2026-01-01", "Weather uncertainty adds mild downside risk."),
    ("s3", "2025-12-31", "Supply chain constraints easing in major hubs."),
];

impl SeriesTuning {
    fn volatility_for(&self, horizon_days: i64) -> f64 {
        if horizon_days <= 7 {
            self.volatility[0]
        } else if horizon_days <= 30 {
            self.volatility[1]
        } else {
            self.volatility[2]
        }
    }

    fn params(
        &self,
        key: SeriesKey,
        base: f64,
        horizon_days: i64,
        start_date: NaiveDate,
    ) -> SeriesParams {
        SeriesParams {
            horizon_days,
            base,
            volatility: self.volatility_for(horizon_days),
            key,
            start_date,
            drift_scale: self.drift_scale,
            drift_direction: self.drift_direction,
            walk_scale: self.walk_scale,
            shock_chance: self.shock_chance,
            shock_scale: self.shock_scale,
            mean_reversion: self.mean_reversion,
        }
    }
}

/// Synthetic price/demand forecast for `request`, with `today` anchoring the default start date.
pub fn build_forecasting_mock(request: &ForecastRequest, today: NaiveDate) -> ForecastResponse {
    let filters = request.coerced();

    let region_f = region_factor(&filters.region);
    let variety_f = variety_factor(&filters.variety);
    let delta = nutrient_delta(&filters);
    let (price_base, demand_base) = series_bases(region_f, variety_f, delta);

    let horizon_days = filters.horizon_days;
    let start_date = resolve_start_date(filters.start_date.as_deref(), today, horizon_days);

    let price_forecast = generate_series(&PRICE_TUNING.params(
        SeriesKey::Price,
        price_base,
        horizon_days,
        start_date,
    ));
    let demand_forecast = generate_series(&DEMAND_TUNING.params(
        SeriesKey::Demand,
        demand_base,
        horizon_days,
        start_date,
    ));

    tracing::debug!(
        region = %filters.region,
        variety = %filters.variety,
        horizon_days,
        %start_date,
        nutrient_delta = delta,
        "built mock forecast"
    );

    ForecastResponse {
        filters,
        price_forecast,
        demand_forecast,
        sentiment: mock_sentiment(sentiment_score(region_f, variety_f)),
    }
}

/// [`build_forecasting_mock`] anchored on the local calendar date.
pub fn generate_forecast(request: &ForecastRequest) -> ForecastResponse {
    build_forecasting_mock(request, today_local())
}

/// Opening levels for the price and demand series.
pub fn series_bases(region_factor: usize, variety_factor: usize, nutrient_delta: f64) -> (f64, f64) {
    let rf = region_factor as f64;
    let vf = variety_factor as f64;
    let price = 88.0 + rf * 2.0 + vf * 1.5 - nutrient_delta * NUTRIENT_PRICE_SHIFT;
    let demand = 62.0 + rf * 1.2 + vf * 1.0 + nutrient_delta * NUTRIENT_DEMAND_SHIFT;
    (price, demand)
}

/// Relative NPK surplus (positive) or deficit (negative), clamped to +/-0.35.
pub fn nutrient_delta(filters: &ForecastFilters) -> f64 {
    let (sum, count) = filters
        .npk_values()
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        return 0.0;
    }

    let mean = sum / count as f64;
    ((mean - NUTRIENT_REFERENCE) / NUTRIENT_REFERENCE)
        .clamp(-NUTRIENT_DELTA_LIMIT, NUTRIENT_DELTA_LIMIT)
}

pub fn sentiment_score(region_factor: usize, variety_factor: usize) -> i32 {
    let raw = SENTIMENT_BASE + region_factor as i32 * 3 - variety_factor as i32 * 2;
    raw.clamp(SENTIMENT_MIN, SENTIMENT_MAX)
}

pub fn mock_sentiment(score: i32) -> Sentiment {
    Sentiment {
        score: score.clamp(SENTIMENT_MIN, SENTIMENT_MAX),
        drivers: SENTIMENT_DRIVERS.iter().map(|s| s.to_string()).collect(),
        notes: SENTIMENT_NOTES
            .iter()
            .map(|(id, date, text)| SentimentNote {
                id: id.to_string(),
                date: date.to_string(),
                text: text.to_string(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::forecast::{REGIONS, VARIETIES};
    use crate::time::start_date::format_iso_date;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()
    }

    fn request(horizon_days: i64) -> ForecastRequest {
        ForecastRequest {
            horizon_days,
            start_date: Some("2026-01-01".to_string()),
            ..ForecastRequest::default()
        }
    }

    #[test]
    fn both_series_cover_the_horizon() {
        let resp = build_forecasting_mock(&request(30), today());
        assert_eq!(resp.price_forecast.len(), 30);
        assert_eq!(resp.demand_forecast.len(), 30);
        assert_eq!(resp.price_forecast[0].key, SeriesKey::Price);
        assert_eq!(resp.demand_forecast[0].key, SeriesKey::Demand);
        assert_eq!(
            resp.price_forecast[29].date,
            NaiveDate::from_ymd_opt(2026, 1, 30).unwrap()
        );
    }

    #[test]
    fn repeated_calls_are_identical() {
        let req = ForecastRequest {
            nitrogen_n: Some(42.0),
            phosphorus_p: Some(18.0),
            potassium_k: Some(33.0),
            ..request(90)
        };
        assert_eq!(
            build_forecasting_mock(&req, today()),
            build_forecasting_mock(&req, today())
        );
    }

    #[test]
    fn missing_start_date_begins_tomorrow() {
        let req = ForecastRequest {
            start_date: None,
            ..request(7)
        };
        let resp = build_forecasting_mock(&req, today());
        assert_eq!(
            resp.price_forecast[0].date,
            NaiveDate::from_ymd_opt(2026, 1, 11).unwrap()
        );
        assert_eq!(resp.filters.start_date, None);
    }

    #[test]
    fn start_date_near_calendar_end_keeps_full_length() {
        let near_end = NaiveDate::MAX.checked_sub_days(chrono::Days::new(2)).unwrap();
        let req = ForecastRequest {
            start_date: Some(format_iso_date(near_end)),
            ..request(10)
        };
        let resp = build_forecasting_mock(&req, today());
        assert_eq!(resp.price_forecast.len(), 10);
        assert_eq!(resp.demand_forecast.len(), 10);
        assert_eq!(
            resp.price_forecast[0].date,
            NaiveDate::from_ymd_opt(2026, 1, 11).unwrap()
        );
    }

    #[test]
    fn zero_horizon_yields_empty_forecasts() {
        let resp = build_forecasting_mock(&request(0), today());
        assert!(resp.price_forecast.is_empty());
        assert!(resp.demand_forecast.is_empty());
        assert_eq!(resp.filters.horizon_days, 0);
    }

    #[test]
    fn sentiment_score_stays_in_range() {
        let mut regions: Vec<&str> = REGIONS.to_vec();
        regions.push("Atlantis");
        let mut varieties: Vec<&str> = VARIETIES.to_vec();
        varieties.push("unknown");

        for region in &regions {
            for variety in &varieties {
                let req = ForecastRequest {
                    region: region.to_string(),
                    variety: variety.to_string(),
                    ..request(7)
                };
                let score = build_forecasting_mock(&req, today()).sentiment.score;
                assert!((10..=95).contains(&score), "{region}/{variety}: {score}");
            }
        }

        assert_eq!(sentiment_score(0, 0), 62);
        assert_eq!(sentiment_score(4, 0), 74);
        assert_eq!(sentiment_score(1000, 0), 95);
        assert_eq!(sentiment_score(0, 1000), 10);
    }

    #[test]
    fn lowercase_region_is_unknown() {
        let req = ForecastRequest {
            region: "north".to_string(),
            variety: "BG-352".to_string(),
            ..request(7)
        };
        assert_eq!(build_forecasting_mock(&req, today()).sentiment.score, 65);
    }

    #[test]
    fn nutrient_delta_is_clamped_and_optional() {
        let mut filters = request(7).coerced();
        assert_eq!(nutrient_delta(&filters), 0.0);

        filters.nitrogen_n = Some(40.0);
        assert_eq!(nutrient_delta(&filters), 0.0);

        filters.nitrogen_n = Some(400.0);
        assert_eq!(nutrient_delta(&filters), 0.35);

        filters.nitrogen_n = Some(0.0);
        filters.phosphorus_p = Some(0.0);
        assert_eq!(nutrient_delta(&filters), -0.35);
    }

    #[test]
    fn rich_soil_lowers_price_and_raises_demand() {
        let (price, demand) = series_bases(4, 0, 0.0);
        assert!((price - 96.0).abs() < 1e-9);
        assert!((demand - 66.8).abs() < 1e-9);

        let (rich_price, rich_demand) = series_bases(4, 0, 0.35);
        assert!(rich_price < price);
        assert!(rich_demand > demand);

        let (lean_price, lean_demand) = series_bases(4, 0, -0.35);
        assert!(lean_price > price);
        assert!(lean_demand < demand);
    }

    #[test]
    fn sentiment_carries_fixed_drivers_and_notes() {
        let resp = build_forecasting_mock(&request(7), today());
        assert_eq!(resp.sentiment.drivers, ["Policy", "Weather", "Supply chain"]);
        assert_eq!(resp.sentiment.notes.len(), 3);
        assert_eq!(resp.sentiment.notes[0].id, "s1");
    }

    #[test]
    fn response_serializes_in_camel_case() {
        let v = serde_json::to_value(build_forecasting_mock(&request(2), today())).unwrap();
        assert!(v["priceForecast"][0]["price"].is_number());
        assert!(v["demandForecast"][1]["demand"].is_number());
        assert_eq!(v["filters"]["horizonDays"], 2);
        assert_eq!(v["filters"]["startDate"], "2026-01-01");
        assert!(v["filters"]["nitrogenN"].is_null());
    }
}
