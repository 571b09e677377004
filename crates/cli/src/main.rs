use clap::Parser;
use paddy_core::client::{DashboardClient, DataSource};
use paddy_core::domain::forecast::{
    ForecastRequest, DEFAULT_HORIZON_DAYS, DEFAULT_REGION, DEFAULT_VARIETY, MAX_HORIZON_DAYS,
};
use paddy_core::forecast::advice::{run_summary, selling_advice};
use paddy_core::sensor::npk::MockNpkSensor;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "paddy_cli", about = "Generate a paddy price/demand forecast")]
struct Args {
    /// Number of days to forecast (1 to 365).
    #[arg(
        long,
        default_value_t = DEFAULT_HORIZON_DAYS,
        value_parser = clap::value_parser!(i64).range(1..=MAX_HORIZON_DAYS)
    )]
    horizon_days: i64,

    /// First forecast day (YYYY-MM-DD). Defaults to tomorrow.
    #[arg(long)]
    start_date: Option<String>,

    #[arg(long, default_value = DEFAULT_REGION)]
    region: String,

    #[arg(long, default_value = DEFAULT_VARIETY)]
    variety: String,

    #[arg(long)]
    nitrogen: Option<f64>,

    #[arg(long)]
    phosphorus: Option<f64>,

    #[arg(long)]
    potassium: Option<f64>,

    /// Take N/P/K from the mock sensor when any reading is missing.
    #[arg(long)]
    sensor: bool,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = paddy_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();

    if let Err(err) = run(&settings, args).await {
        sentry_anyhow::capture_anyhow(&err);
        tracing::error!(error = %err, "forecast run failed");
        return Err(err);
    }
    Ok(())
}

async fn run(settings: &paddy_core::config::Settings, args: Args) -> anyhow::Result<()> {
    let client = DashboardClient::from_settings(settings)?;
    let pretty = args.pretty;
    let req = build_request(args, &MockNpkSensor::new());

    let today = paddy_core::time::start_date::today_local();
    let fetched = client.get_forecasting(&req, today).await;
    let resp = fetched.data;

    let source = match fetched.source {
        DataSource::Backend => "backend",
        DataSource::Mock => "mock",
    };
    let advice = selling_advice(&resp).map(|a| a.label()).unwrap_or("--");
    match run_summary(&resp) {
        Some(summary) => tracing::info!(source, %advice, "{summary}"),
        None => tracing::info!(source, horizon_days = req.horizon_days, "empty forecast"),
    }

    let out = if pretty {
        serde_json::to_string_pretty(&resp)?
    } else {
        serde_json::to_string(&resp)?
    };
    println!("{out}");
    Ok(())
}

fn build_request(args: Args, sensor: &MockNpkSensor) -> ForecastRequest {
    let mut req = ForecastRequest {
        region: args.region,
        variety: args.variety,
        horizon_days: args.horizon_days,
        start_date: args.start_date,
        nitrogen_n: args.nitrogen,
        phosphorus_p: args.phosphorus,
        potassium_k: args.potassium,
    };

    if args.sensor && !req.has_npk() {
        let reading = sensor.read();
        tracing::info!(?reading, "using mock sensor sample");
        req.nitrogen_n = Some(reading.nitrogen_n);
        req.phosphorus_p = Some(reading.phosphorus_p);
        req.potassium_k = Some(reading.potassium_k);
    }

    req
}

fn init_sentry(settings: &paddy_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
