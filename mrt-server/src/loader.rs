//! Network file loading.
//!
//! Decodes the JSON network description into validated domain records and
//! builds the [`NetworkModel`]. The wire shape is:
//!
//! ```json
//! {
//!   "stations": [{"id": "BGS", "name": {"en": "...", "zh": "...", "ta": "..."},
//!                 "lines": ["EW12", "DT14"]}],
//!   "lines": [{"id": "EW", "name": "East West Line", "stations": ["EW1", "..."]}]
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::domain::{
    InvalidLineId, InvalidStationId, InvalidStopCode, Line, LineId, LocalizedName, Station,
    StationId, StopCode,
};
use crate::network::{NetworkError, NetworkModel};

/// Error from reading or decoding a network file.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read
    #[error("failed to read network file: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid JSON of the expected shape
    #[error("failed to decode network file: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    StationId(#[from] InvalidStationId),

    #[error(transparent)]
    StopCode(#[from] InvalidStopCode),

    #[error(transparent)]
    LineId(#[from] InvalidLineId),

    /// The records decoded but contradict each other
    #[error("inconsistent network data: {0}")]
    Network(#[from] NetworkError),
}

#[derive(Debug, Deserialize)]
struct NetworkFile {
    stations: Vec<StationRecord>,
    lines: Vec<LineRecord>,
}

#[derive(Debug, Deserialize)]
struct StationRecord {
    id: String,
    name: NameRecord,
    lines: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct NameRecord {
    en: String,
    zh: String,
    ta: String,
}

#[derive(Debug, Deserialize)]
struct LineRecord {
    id: String,
    name: String,
    stations: Vec<String>,
}

/// Loads and validates a network description from a file.
///
/// # Errors
///
/// Fails with [`LoadError`] on IO errors, malformed JSON, invalid
/// identifiers, or data that fails [`NetworkModel::build`] validation.
pub fn load_network(path: impl AsRef<Path>) -> Result<NetworkModel, LoadError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path)?;
    let network = parse_network(&raw)?;

    info!(
        path = %path.display(),
        stations = network.stations().len(),
        lines = network.lines().len(),
        "network loaded"
    );

    Ok(network)
}

/// Decodes and validates a network description from a JSON string.
pub fn parse_network(json: &str) -> Result<NetworkModel, LoadError> {
    let file: NetworkFile = serde_json::from_str(json)?;

    let stations = file
        .stations
        .into_iter()
        .map(station_from_record)
        .collect::<Result<Vec<_>, LoadError>>()?;

    let lines = file
        .lines
        .into_iter()
        .map(line_from_record)
        .collect::<Result<Vec<_>, LoadError>>()?;

    Ok(NetworkModel::build(stations, lines)?)
}

fn station_from_record(record: StationRecord) -> Result<Station, LoadError> {
    let id = StationId::parse(&record.id)?;
    let name = LocalizedName::new(record.name.en, record.name.zh, record.name.ta);
    let codes = record
        .lines
        .iter()
        .map(|code| StopCode::parse(code))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Station::new(id, name, codes))
}

fn line_from_record(record: LineRecord) -> Result<Line, LoadError> {
    let id = LineId::parse(&record.id)?;
    let stops = record
        .stations
        .iter()
        .map(|code| StopCode::parse(code))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Line::new(id, record.name, stops))
}
