use anyhow::bail;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NpkReading {
    pub nitrogen_n: f64,
    pub phosphorus_p: f64,
    pub potassium_k: f64,
}

impl NpkReading {
    pub const fn new(nitrogen_n: f64, phosphorus_p: f64, potassium_k: f64) -> Self {
        Self {
            nitrogen_n,
            phosphorus_p,
            potassium_k,
        }
    }
}

pub const MOCK_READINGS: [NpkReading; 4] = [
    NpkReading::new(42.0, 18.0, 33.0),
    NpkReading::new(55.0, 24.0, 40.0),
    NpkReading::new(38.0, 14.0, 28.0),
    NpkReading::new(61.0, 29.0, 46.0),
];

/// Stand-in for the serial NPK probe: hands out a fixed table of readings in order, wrapping
/// around. Each instance keeps its own position.
#[derive(Debug, Default)]
pub struct MockNpkSensor {
    next: AtomicUsize,
}

impl MockNpkSensor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn read(&self) -> NpkReading {
        let idx = self.next.fetch_add(1, Ordering::Relaxed);
        MOCK_READINGS[idx % MOCK_READINGS.len()]
    }
}

/// Collects one full reading from probe output lines such as `Nitrogen: 42`.
///
/// Lines without a recognised label or with an unparseable value are skipped; later lines win.
pub fn parse_npk_lines<'a, I>(lines: I) -> anyhow::Result<NpkReading>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut n = None;
    let mut p = None;
    let mut k = None;

    for line in lines {
        let line = line.trim();
        let Some((label, value)) = line.split_once(':') else {
            continue;
        };
        let Ok(value) = value.trim().parse::<f64>() else {
            continue;
        };

        if label.contains("Nitrogen") {
            n = Some(value);
        } else if label.contains("Phosphorus") {
            p = Some(value);
        } else if label.contains("Potassium") {
            k = Some(value);
        }

        if let (Some(n), Some(p), Some(k)) = (n, p, k) {
            return Ok(NpkReading::new(n, p, k));
        }
    }

    let missing: Vec<&str> = [("nitrogenN", n), ("phosphorusP", p), ("potassiumK", k)]
        .into_iter()
        .filter(|(_, v)| v.is_none())
        .map(|(name, _)| name)
        .collect();
    bail!("incomplete NPK reading; missing {}", missing.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_sensor_cycles_through_table() {
        let sensor = MockNpkSensor::new();
        let seen: Vec<NpkReading> = (0..6).map(|_| sensor.read()).collect();
        assert_eq!(seen[0], MOCK_READINGS[0]);
        assert_eq!(seen[3], MOCK_READINGS[3]);
        assert_eq!(seen[4], MOCK_READINGS[0]);
        assert_eq!(seen[5], MOCK_READINGS[1]);
    }

    #[test]
    fn sensors_do_not_share_position() {
        let a = MockNpkSensor::new();
        let b = MockNpkSensor::new();
        a.read();
        a.read();
        assert_eq!(b.read(), MOCK_READINGS[0]);
    }

    #[test]
    fn parses_labelled_lines() {
        let out = "boot ok\nNitrogen: 42\nPhosphorus: 18 \nnoise: x\nPotassium:33.5\n";
        let reading = parse_npk_lines(out.lines()).unwrap();
        assert_eq!(reading, NpkReading::new(42.0, 18.0, 33.5));
    }

    #[test]
    fn reports_missing_values() {
        let err = parse_npk_lines(["Nitrogen: 42", "Potassium: abc"]).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("phosphorusP"), "{msg}");
        assert!(msg.contains("potassiumK"), "{msg}");
        assert!(!msg.contains("nitrogenN"), "{msg}");
    }

    #[test]
    fn reading_uses_camel_case_keys() {
        let v = serde_json::to_value(MOCK_READINGS[0]).unwrap();
        assert_eq!(v["nitrogenN"], 42.0);
        assert_eq!(v["potassiumK"], 33.0);
    }
}
