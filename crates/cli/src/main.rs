//! DTFE CLI - developmental progress trend and forecasting reports.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, Level};

use dtfe_core::{
    CaseId, CaseRecord, ConsentKind, DtfeConfig, EngineError, ProgressEntry, ProgressPoint,
    StoredReport,
};
use dtfe_engine::{DtfeEngine, ForecastEngine, TrendAnalyzer};
use dtfe_storage::{JsonStorage, Storage};

#[derive(Parser)]
#[command(name = "dtfe")]
#[command(about = "Developmental trajectory forecasting engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new case
    NewCase {
        /// Child's age in months
        #[arg(long)]
        age_months: u32,
        /// Intake notes
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// List all cases
    ListCases,
    /// Grant or revoke a consent flag
    Consent {
        /// Case ID
        case: CaseId,
        /// Consent kind: data-storage or forecasting
        #[arg(long)]
        kind: String,
        /// Revoke instead of grant
        #[arg(long)]
        revoke: bool,
    },
    /// Log a weekly progress observation
    Log {
        /// Case ID
        case: CaseId,
        /// Week number (starting at 1)
        #[arg(long)]
        week: u32,
        /// Progress score (0-100)
        #[arg(long)]
        score: f64,
        /// Clinician notes
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Classify the progress trend for a case
    Trend {
        /// Case ID
        case: CaseId,
    },
    /// Check whether clinician attention is warranted
    Attention {
        /// Case ID
        case: CaseId,
    },
    /// Forecast future progress
    Forecast {
        /// Case ID
        case: CaseId,
        /// Forecast horizon in weeks
        #[arg(long, default_value = "8")]
        horizon: u32,
    },
    /// Run the full DTFE analysis and persist the report
    Report {
        /// Case ID
        case: CaseId,
    },
    /// Show the most recently stored report for a case
    Latest {
        /// Case ID
        case: CaseId,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();

    // Open storage
    let storage_path = std::path::PathBuf::from(".dtfe");
    let mut storage = JsonStorage::new(&storage_path).await?;
    let config = DtfeConfig::default();

    match cli.command {
        Commands::NewCase { age_months, notes } => {
            let case = CaseRecord::new(age_months, notes);
            storage.save_case(&case).await?;
            println!("Created case: {}", case.id);
        }
        Commands::ListCases => {
            let cases = storage.list_cases().await?;
            for case in cases {
                println!(
                    "{}  age {:>3} months  created {}",
                    case.id,
                    case.child_age_months,
                    case.created_at.format("%Y-%m-%d")
                );
            }
        }
        Commands::Consent { case, kind, revoke } => {
            let kind = parse_consent_kind(&kind)?;
            storage.set_consent(case, kind, !revoke).await?;
            info!(case_id = %case, %kind, granted = !revoke, "consent updated");
            println!(
                "Consent {} {} for case {}",
                kind,
                if revoke { "revoked" } else { "granted" },
                case
            );
        }
        Commands::Log { case, week, score, notes } => {
            anyhow::ensure!(week >= 1, "week numbers start at 1");
            storage.require_consent(case, ConsentKind::DataStorage).await?;
            let entry = ProgressEntry {
                week,
                score,
                notes,
                logged_at: chrono::Utc::now(),
            };
            storage.add_progress_entry(case, &entry).await?;
            println!("Logged week {} for case {}", week, case);
        }
        Commands::Trend { case } => {
            let series = snapshot(&storage, case).await?;
            let analyzer = TrendAnalyzer::new(config);
            match analyzer.compute_trend(&series) {
                Ok(trend) => println!("{}", serde_json::to_string_pretty(&trend)?),
                Err(e) => print_notice(&e)?,
            }
        }
        Commands::Attention { case } => {
            let series = snapshot(&storage, case).await?;
            let analyzer = TrendAnalyzer::new(config);
            let flagged = analyzer.needs_attention(&series)?;
            println!(
                "{}",
                if flagged {
                    "Clinician review recommended."
                } else {
                    "No review recommended at this time."
                }
            );
        }
        Commands::Forecast { case, horizon } => {
            storage.require_consent(case, ConsentKind::Forecasting).await?;
            let series = snapshot(&storage, case).await?;
            let engine = ForecastEngine::new(config);
            match engine.forecast_with_horizon(&series, horizon) {
                Ok(forecast) => println!("{}", serde_json::to_string_pretty(&forecast)?),
                Err(e) => print_notice(&e)?,
            }
        }
        Commands::Report { case } => {
            storage.require_consent(case, ConsentKind::Forecasting).await?;
            let series = snapshot(&storage, case).await?;
            let engine = DtfeEngine::new(config);
            match engine.run(&series) {
                Ok(report) => {
                    let stored = StoredReport {
                        case_id: case,
                        report: report.clone(),
                        created_at: chrono::Utc::now(),
                    };
                    storage.save_report(&stored).await?;
                    println!("{}", serde_json::to_string_pretty(&report)?);
                }
                Err(e) => print_notice(&e)?,
            }
        }
        Commands::Latest { case } => match storage.latest_report(case).await? {
            Some(stored) => println!("{}", serde_json::to_string_pretty(&stored)?),
            None => println!("No stored report for case {}", case),
        },
    }

    Ok(())
}

/// Read the full history once and hand the engine an owned snapshot.
async fn snapshot(storage: &JsonStorage, case: CaseId) -> Result<Vec<ProgressPoint>> {
    let history = storage.get_progress_history(case).await?;
    Ok(history.iter().map(ProgressEntry::to_point).collect())
}

/// Insufficient data is an informational outcome for the clinician, not a
/// process failure; other engine errors propagate as real failures.
fn print_notice(error: &EngineError) -> Result<()> {
    match error {
        EngineError::InsufficientData(msg) => {
            println!(
                "{}",
                serde_json::json!({ "status": "insufficient_data", "detail": msg })
            );
            Ok(())
        }
        other => Err(anyhow::anyhow!("{other}")),
    }
}

fn parse_consent_kind(s: &str) -> Result<ConsentKind> {
    match s {
        "data-storage" | "data_storage" => Ok(ConsentKind::DataStorage),
        "forecasting" => Ok(ConsentKind::Forecasting),
        other => anyhow::bail!("unknown consent kind: {other}"),
    }
}
