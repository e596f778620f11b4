//! Data loading from JSON files

use crate::{MissionGateConfig, Result};
use airframe::{AircraftDesign, HardwareCatalog};
use decision_engine::FlightRequest;
use flight_monitor::TelemetrySample;
use geofence::Boundary;
use mission_scoring::MissionParameters;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use tracing::info;

pub fn load_config(path: impl AsRef<Path>) -> Result<MissionGateConfig> {
    let path = path.as_ref();
    info!("Loading configuration from {:?}", path);
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

pub fn load_mission(path: impl AsRef<Path>) -> Result<MissionParameters> {
    let path = path.as_ref();
    info!("Loading mission from {:?}", path);
    Ok(MissionParameters::from_json(&fs::read_to_string(path)?)?)
}

pub fn load_design(path: impl AsRef<Path>) -> Result<AircraftDesign> {
    let path = path.as_ref();
    info!("Loading aircraft design from {:?}", path);
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

pub fn load_catalog(path: impl AsRef<Path>) -> Result<HardwareCatalog> {
    let path = path.as_ref();
    info!("Loading hardware catalog from {:?}", path);
    Ok(HardwareCatalog::from_json(&fs::read_to_string(path)?)?)
}

pub fn load_request(path: impl AsRef<Path>) -> Result<FlightRequest> {
    let path = path.as_ref();
    info!("Loading flight request from {:?}", path);
    Ok(FlightRequest::from_json(&fs::read_to_string(path)?)?)
}

/// A single sample or an array of samples
pub fn load_telemetry(path: impl AsRef<Path>) -> Result<Vec<TelemetrySample>> {
    let path = path.as_ref();
    info!("Loading telemetry from {:?}", path);
    Ok(TelemetrySample::parse_many(&fs::read_to_string(path)?)?)
}

pub fn load_boundary(path: impl AsRef<Path>) -> Result<Boundary> {
    let path = path.as_ref();
    info!("Loading boundary from {:?}", path);
    Ok(Boundary::from_json(&fs::read_to_string(path)?)?)
}
