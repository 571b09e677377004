use chrono::{Days, NaiveDate};

const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// First forecast day: the given ISO date, or tomorrow when it is absent, unparseable, or too
/// close to the end of the calendar to fit `horizon_days` days.
pub fn resolve_start_date(
    start_date: Option<&str>,
    today: NaiveDate,
    horizon_days: i64,
) -> NaiveDate {
    start_date
        .and_then(parse_iso_date)
        .filter(|start| covers_horizon(*start, horizon_days))
        .unwrap_or_else(|| tomorrow(today))
}

/// Whether every day of a `horizon_days` forecast starting at `start` is a representable date.
pub fn covers_horizon(start: NaiveDate, horizon_days: i64) -> bool {
    let last_offset = u64::try_from(horizon_days.saturating_sub(1)).unwrap_or(0);
    start.checked_add_days(Days::new(last_offset)).is_some()
}

/// Accepts `YYYY-MM-DD`, ignoring any time-of-day suffix (`2026-01-01T08:00:00Z`).
pub fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    let day = s.split_once('T').map_or(s, |(day, _)| day);
    NaiveDate::parse_from_str(day, ISO_DATE_FORMAT).ok()
}

pub fn tomorrow(today: NaiveDate) -> NaiveDate {
    today.checked_add_days(Days::new(1)).unwrap_or(today)
}

pub fn today_local() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn format_iso_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}
