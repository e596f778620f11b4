//! Mission Gate CLI
//!
//! Usage:
//!   mission-gate assess missions/survey.json
//!   mission-gate plan requests/survey.json
//!   mission-gate design --target-weight 210
//!   mission-gate monitor requests/survey.json telemetry/run1.json
//!   mission-gate geofence 39.0 -98.0
//!   mission-gate boundary --geojson
//!
//! Results are written to stdout as pretty JSON; logs go to stderr.

use airframe::{FlyingWingBuilder, HardwareCatalog, WeightBalanceCalculator};
use anyhow::Result;
use clap::{Parser, Subcommand};
use mission_gate::{loader, DesignReport, MissionGate, MissionGateConfig};
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(
    name = "mission-gate",
    about = "Go/no-go authorization for small UAV missions"
)]
struct Args {
    /// Configuration JSON (thresholds, boundary file)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Boundary JSON replacing the packaged operational area
    #[arg(short, long, global = true)]
    boundary: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a mission record and recommend GO / CAUTION / NO-GO
    Assess { mission: PathBuf },

    /// Build a flight plan, decide go/no-go and run the preflight checklist
    Plan { request: PathBuf },

    /// Weight & balance for an aircraft design
    Balance { design: PathBuf },

    /// Design a flying wing from the hardware catalog and certify it
    Design {
        /// All-up weight to size the battery against (grams)
        #[arg(long, default_value_t = 200.0)]
        target_weight: f64,

        /// Hardware catalog JSON (built-in catalog when omitted)
        #[arg(long)]
        catalog: Option<PathBuf>,
    },

    /// Plan a request, then check telemetry samples against it
    Monitor { request: PathBuf, telemetry: PathBuf },

    /// Validate a position against the operational area
    Geofence {
        #[arg(allow_hyphen_values = true)]
        latitude: f64,
        #[arg(allow_hyphen_values = true)]
        longitude: f64,

        /// Simulation mode (boundary not enforced)
        #[arg(long)]
        sim: bool,
    },

    /// Print the active operational boundary
    Boundary {
        /// Emit a GeoJSON feature instead of the vertex list
        #[arg(long)]
        geojson: bool,
    },
}

fn init_tracing(verbose: bool) -> Result<()> {
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
        return Ok(());
    }

    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn emit<T: Serialize>(value: &T) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose)?;

    let mut config = match &args.config {
        Some(path) => loader::load_config(path)?,
        None => MissionGateConfig::default(),
    };
    if let Some(boundary) = args.boundary {
        config.boundary = Some(boundary);
    }

    let gate = MissionGate::from_config(&config)?;

    match args.command {
        Command::Assess { mission } => {
            let params = loader::load_mission(&mission)?;
            let assessment = gate.aggregator().assess(&params);
            info!(
                "Confidence {:.2}% -> {:?}",
                assessment.ai_confidence, assessment.recommendation
            );
            emit(&assessment)?;
        }
        Command::Plan { request } => {
            let request = loader::load_request(&request)?;
            let report = gate.plan(&request);
            info!(
                "Mission {}: go={} preflight={}",
                report.plan.mission_id, report.plan.decision.go, report.preflight.all_passed
            );
            emit(&report)?;
        }
        Command::Balance { design } => {
            let design = loader::load_design(&design)?;
            let report = WeightBalanceCalculator::default().compute(&design);
            info!(
                "{}: margin {:.3} ({})",
                design.name,
                report.stability_margin,
                if report.is_stable { "stable" } else { "unstable" }
            );
            emit(&report)?;
        }
        Command::Design {
            target_weight,
            catalog,
        } => {
            let catalog = match catalog {
                Some(path) => loader::load_catalog(&path)?,
                None => HardwareCatalog::with_defaults(),
            };
            let design = FlyingWingBuilder::new(target_weight).design(&catalog)?;
            let report = DesignReport::certify(design, &WeightBalanceCalculator::default());
            emit(&report)?;
        }
        Command::Monitor { request, telemetry } => {
            let request = loader::load_request(&request)?;
            let samples = loader::load_telemetry(&telemetry)?;
            let reports = gate.monitor(&request, &samples);
            emit(&reports)?;
        }
        Command::Geofence {
            latitude,
            longitude,
            sim,
        } => {
            let confirmation = gate.validator().check(latitude, longitude, sim);
            emit(&serde_json::json!({
                "confirmation": confirmation,
                "status": gate.validator().status(),
            }))?;
        }
        Command::Boundary { geojson } => {
            let boundary = gate.validator().boundary();
            if geojson {
                emit(&boundary.to_geojson())?;
            } else {
                emit(boundary)?;
            }
        }
    }

    Ok(())
}
