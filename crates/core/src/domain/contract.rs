use crate::domain::forecast::{
    region_factor, variety_factor, ForecastFilters, ForecastPoint, ForecastRequest,
    ForecastResponse, SeriesKey, Sentiment,
};
use crate::forecast::provider::{mock_sentiment, sentiment_score};
use anyhow::ensure;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Forecast JSON as returned by a remote backend, before validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendForecastResponse {
    #[serde(default)]
    pub filters: Option<ForecastFilters>,
    #[serde(default)]
    pub price_forecast: Vec<BackendForecastPoint>,
    #[serde(default)]
    pub demand_forecast: Vec<BackendForecastPoint>,
    #[serde(default)]
    pub sentiment: Option<Sentiment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendForecastPoint {
    #[serde(default)]
    pub t: Option<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub demand: Option<f64>,
}

impl BackendForecastResponse {
    pub fn validate_and_into_response(
        self,
        request: &ForecastRequest,
    ) -> anyhow::Result<ForecastResponse> {
        let expected_len = request.horizon_days.max(0) as usize;

        let price_forecast = into_series(self.price_forecast, SeriesKey::Price, expected_len)?;
        let demand_forecast = into_series(self.demand_forecast, SeriesKey::Demand, expected_len)?;

        if let (Some(p), Some(d)) = (price_forecast.first(), demand_forecast.first()) {
            ensure!(
                p.date == d.date,
                "price and demand forecasts start on different dates ({} vs {})",
                p.date,
                d.date
            );
        }

        let filters = self.filters.unwrap_or_else(|| request.coerced());

        // The backend may omit sentiment entirely; fill it the same way the mock does.
        let sentiment = match self.sentiment {
            Some(mut s) => {
                s.score = s.score.clamp(10, 95);
                s
            }
            None => mock_sentiment(sentiment_score(
                region_factor(&filters.region),
                variety_factor(&filters.variety),
            )),
        };

        Ok(ForecastResponse {
            filters,
            price_forecast,
            demand_forecast,
            sentiment,
        })
    }
}

fn into_series(
    points: Vec<BackendForecastPoint>,
    key: SeriesKey,
    expected_len: usize,
) -> anyhow::Result<Vec<ForecastPoint>> {
    ensure!(
        points.len() == expected_len,
        "{} forecast must contain exactly {expected_len} points (got {})",
        key.as_str(),
        points.len()
    );

    let mut out: Vec<ForecastPoint> = Vec::with_capacity(points.len());
    for (idx, point) in points.into_iter().enumerate() {
        let value = match key {
            SeriesKey::Price => point.price,
            SeriesKey::Demand => point.demand,
        };
        let Some(value) = value.filter(|v| v.is_finite()) else {
            anyhow::bail!(
                "{} forecast point {} ({}) has no numeric value",
                key.as_str(),
                idx + 1,
                point.date
            );
        };

        if let Some(prev) = out.last() {
            ensure!(
                prev.date.succ_opt() == Some(point.date),
                "{} forecast dates are not consecutive: {} then {}",
                key.as_str(),
                prev.date,
                point.date
            );
        }

        let t = point
            .t
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| format!("D{}", idx + 1));

        out.push(ForecastPoint {
            t,
            date: point.date,
            key,
            value,
        });
    }
    Ok(out)
}
