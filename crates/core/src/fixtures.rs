//! Static dashboard payloads served when no backend answers.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationData {
    pub crop_plan: Vec<CropPlanStep>,
    pub resource_recommendations: Vec<ResourceRecommendation>,
    pub risks: Vec<Risk>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropPlanStep {
    pub id: String,
    pub day: String,
    pub action: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceRecommendation {
    pub id: String,
    pub action: String,
    pub reason: String,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Risk {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: String,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportsData {
    pub report_cards: Vec<ReportCard>,
    pub preview: ReportPreview,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportCard {
    pub id: String,
    pub title: String,
    pub subtitle: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportPreview {
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsData {
    pub languages: Vec<Language>,
    pub defaults: UserDefaults,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDefaults {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub language: String,
    pub notifications: NotificationPrefs,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationPrefs {
    pub weather: bool,
    pub market: bool,
    pub operations: bool,
    pub sustainability: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FertilizerRecommendations {
    pub top3: Vec<FertilizerOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FertilizerOption {
    pub rank: u32,
    pub fertilizer: String,
    /// kg per hectare.
    pub quantity: u32,
    /// t/ha.
    pub predicted_yield: f64,
    /// Percent.
    pub confidence: u32,
    pub note: String,
}

pub fn optimization() -> OptimizationData {
    let step = |id: &str, day: &str, action: &str, detail: &str| CropPlanStep {
        id: id.to_string(),
        day: day.to_string(),
        action: action.to_string(),
        detail: detail.to_string(),
    };
    let rec = |id: &str, action: &str, reason: &str, confidence: f64| ResourceRecommendation {
        id: id.to_string(),
        action: action.to_string(),
        reason: reason.to_string(),
        confidence,
    };
    let risk = |id: &str, kind: &str, severity: &str, note: &str| Risk {
        id: id.to_string(),
        kind: kind.to_string(),
        severity: severity.to_string(),
        note: note.to_string(),
    };

    OptimizationData {
        crop_plan: vec![
            step("w1", "Mon", "Seedling nursery check", "Inspect germination and tray moisture."),
            step("w2", "Tue", "Irrigation", "Maintain shallow water level (2–3 cm)."),
            step("w3", "Wed", "Fertilizer (N)", "Apply split dose based on leaf color chart."),
            step("w4", "Thu", "Weed management", "Mechanical weeding in rows; spot-check edges."),
            step("w5", "Fri", "Pest scouting", "Check for stem borer and blast symptoms."),
            step("w6", "Sat", "Irrigation", "Adjust based on rainfall; avoid over-flooding."),
            step("w7", "Sun", "Record update", "Log operations and sensor readings."),
        ],
        resource_recommendations: vec![
            rec(
                "r1",
                "Reduce irrigation frequency by 1 cycle/week",
                "Soil moisture remains within target band; rainfall probability is elevated.",
                0.78,
            ),
            rec(
                "r2",
                "Shift nitrogen split by +3 days",
                "Forecast suggests cloudy period; better uptake expected after sunlight improves.",
                0.66,
            ),
            rec(
                "r3",
                "Prioritize scouting in Block C",
                "Microclimate + humidity trend increases disease risk.",
                0.72,
            ),
        ],
        risks: vec![
            risk("k1", "Pest", "High", "Blast risk rising with humidity spikes."),
            risk("k2", "Drought", "Low", "Reservoir levels stable; short dry spell possible."),
            risk("k3", "Flood", "Medium", "Localized heavy rainfall risk in lowlands."),
        ],
    }
}

pub fn reports() -> ReportsData {
    let card = |id: &str, title: &str, subtitle: &str, description: &str| ReportCard {
        id: id.to_string(),
        title: title.to_string(),
        subtitle: subtitle.to_string(),
        description: description.to_string(),
    };

    ReportsData {
        report_cards: vec![
            card(
                "rep1",
                "Weekly Report",
                "Operations & risk summary",
                "KPIs, alerts, and actions for the last 7 days.",
            ),
            card(
                "rep2",
                "Monthly Report",
                "Yield & cost overview",
                "Aggregated performance, resource usage, and trends.",
            ),
            card(
                "rep3",
                "Region Summary",
                "Comparative insights",
                "Regional benchmarks and forecast deltas.",
            ),
        ],
        preview: ReportPreview {
            title: "Report Preview (Dummy)".to_string(),
            body: [
                "This is a placeholder preview. A production report would be rendered from analytics \
                 outputs (yield forecasts, risk signals, sustainability metrics, and market insights).",
                "",
                "Highlights:",
                "- Expected yield remains stable with moderate weather risk.",
                "- Reduce irrigation cycles where soil moisture allows.",
                "- Increase scouting intensity during high-humidity windows.",
                "",
                "Next Steps:",
                "- Validate sensor calibrations in affected blocks.",
                "- Re-check nitrogen split schedule after cloudy period.",
            ]
            .join("\n"),
        },
    }
}

pub fn settings() -> SettingsData {
    let lang = |code: &str, label: &str| Language {
        code: code.to_string(),
        label: label.to_string(),
    };

    SettingsData {
        languages: vec![lang("en", "English"), lang("si", "Sinhala"), lang("ta", "Tamil")],
        defaults: UserDefaults {
            full_name: "Admin User".to_string(),
            email: "admin@example.com".to_string(),
            phone: "+94 77 000 0000".to_string(),
            language: "en".to_string(),
            notifications: NotificationPrefs {
                weather: true,
                market: true,
                operations: false,
                sustainability: true,
            },
        },
    }
}

pub fn fertilizer_recommendations() -> FertilizerRecommendations {
    let option = |rank, fertilizer: &str, quantity, predicted_yield, confidence, note: &str| {
        FertilizerOption {
            rank,
            fertilizer: fertilizer.to_string(),
            quantity,
            predicted_yield,
            confidence,
            note: note.to_string(),
        }
    };

    FertilizerRecommendations {
        top3: vec![
            option(
                1,
                "NPK 16-16-16",
                140,
                7.2,
                92,
                "Best for balanced growth and high yield. Recommended for current soil conditions.",
            ),
            option(
                2,
                "Urea + DAP Mix",
                100,
                6.8,
                87,
                "Good alternative with lower initial cost. Suitable for budget-conscious farmers.",
            ),
            option(
                3,
                "Organic Compost Blend",
                200,
                6.5,
                82,
                "Sustainable option for long-term soil health. Lower yield but better soil quality.",
            ),
        ],
    }
}
