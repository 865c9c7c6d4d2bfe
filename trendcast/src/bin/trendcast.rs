use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use trendcast::forecast::DEFAULT_PROFILE_WINDOW;
use trendcast::metrics::truncate_to_common_length;
use trendcast::{
    AccuracyEvaluator, AnomalyDetector, DataLoader, EvaluatorConfig, ForecastConfig,
    HistoricalProfile, TimeSeries, TrendForecaster, ZeroActualPolicy,
};

/// Forecast, evaluate and scan dashboard time series
#[derive(Parser, Debug)]
#[command(name = "trendcast", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project a linear trend forward with confidence bands
    Forecast {
        /// Historical series (.csv with date,value header or .json array)
        #[arg(long)]
        input: PathBuf,
        /// Number of days to forecast
        #[arg(long, default_value_t = 90)]
        horizon: usize,
        /// JSON file with forecaster settings
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Score predicted values against actuals
    Evaluate {
        #[arg(long)]
        actual: PathBuf,
        #[arg(long)]
        predicted: PathBuf,
        /// Ignore zero actuals in MAPE instead of failing
        #[arg(long, default_value_t = false)]
        skip_zero_actuals: bool,
    },
    /// Flag points whose z-score reaches the threshold
    Anomalies {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value_t = trendcast::anomaly::DEFAULT_THRESHOLD)]
        threshold: f64,
    },
    /// Summarize the recent history of a series
    Profile {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value_t = DEFAULT_PROFILE_WINDOW)]
        window: usize,
    },
}

fn load(path: &Path) -> Result<TimeSeries> {
    let series = DataLoader::from_path(path)
        .with_context(|| format!("Failed to load series from {}", path.display()))?;
    info!("Loaded {} points from {}", series.len(), path.display());
    Ok(series)
}

fn load_config(path: &Path) -> Result<ForecastConfig> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open config {}", path.display()))?;
    let config = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    Ok(config)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Forecast {
            input,
            horizon,
            config,
        } => {
            let config = match config {
                Some(path) => load_config(&path)?,
                None => ForecastConfig::default(),
            };
            let series = load(&input)?;
            let forecaster = TrendForecaster::new_with_config(config)?;
            let forecast = forecaster.forecast(series.points(), horizon)?;
            info!("Generated {} day forecast", forecast.len());
            print_json(&forecast)
        }
        Command::Evaluate {
            actual,
            predicted,
            skip_zero_actuals,
        } => {
            let actual = load(&actual)?.values();
            let predicted = load(&predicted)?.values();
            let (actual, predicted) = truncate_to_common_length(&actual, &predicted);

            let zero_actuals = if skip_zero_actuals {
                ZeroActualPolicy::Skip
            } else {
                ZeroActualPolicy::Reject
            };
            let evaluator = AccuracyEvaluator::new_with_config(EvaluatorConfig {
                zero_actuals,
                ..EvaluatorConfig::default()
            })?;
            let assessment = evaluator.assess(actual, predicted)?;
            info!(
                "Evaluated {} points: grade {}",
                assessment.sample_size, assessment.grade
            );
            print_json(&assessment)
        }
        Command::Anomalies { input, threshold } => {
            let series = load(&input)?;
            let anomalies = AnomalyDetector::with_threshold(threshold)?.detect(series.points())?;
            info!("Detected {} anomalies", anomalies.len());
            print_json(&anomalies)
        }
        Command::Profile { input, window } => {
            let series = load(&input)?;
            let profile = HistoricalProfile::compute(series.points(), window)?;
            print_json(&profile)
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    run(Cli::parse())
}
