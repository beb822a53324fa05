//! Network model: validated stations, lines, and lookup indices.
//!
//! [`NetworkModel::build`] checks that the two representations of the
//! network (station → stop codes, line → stop codes) agree with each other
//! and builds the lookup indices in one pass. Callers never see a
//! partially-built network: construction either succeeds completely or
//! fails with a [`NetworkError`].

mod graph;

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use crate::domain::{Line, LineId, Station, StationId, StopCode};

pub use graph::{EdgeKind, GraphEdge, RouteGraph};

/// Error found while validating network data at build time.
///
/// Any of these means the station and line descriptions contradict each
/// other. The build is abandoned; there is nothing to retry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NetworkError {
    /// Two stations share the same id
    #[error("duplicate station id {0}")]
    DuplicateStation(StationId),

    /// Two lines share the same id
    #[error("duplicate line id {0}")]
    DuplicateLine(LineId),

    /// Two stations both claim the same stop code
    #[error("stop code {code} is claimed by stations {first} and {second}")]
    SharedStopCode {
        code: StopCode,
        first: StationId,
        second: StationId,
    },

    /// A line stops at a code no station carries
    #[error("line {line} stops at {code}, which no station owns")]
    UnownedStop { line: LineId, code: StopCode },

    /// Two lines both list the same stop code
    #[error("stop code {code} is listed by lines {first} and {second}")]
    StopOnMultipleLines {
        code: StopCode,
        first: LineId,
        second: LineId,
    },

    /// A station carries a code that appears on no line
    #[error("station {station} lists {code}, which belongs to no line")]
    StopWithoutLine {
        station: StationId,
        code: StopCode,
    },
}

/// Error returned when a requested station id is not in the network.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("station {0} is not in the network")]
pub struct UnknownStation(pub StationId);

/// The full network: stations, lines, and lookup indices.
///
/// Built once from static input and read-only thereafter. Stations and
/// lines are `Arc`-shared so the indices, the derived graph, and query
/// results can all reference them without copying.
#[derive(Debug)]
pub struct NetworkModel {
    stations: Vec<Arc<Station>>,
    lines: Vec<Arc<Line>>,
    by_id: HashMap<StationId, Arc<Station>>,
    station_by_code: HashMap<StopCode, Arc<Station>>,
    line_by_code: HashMap<StopCode, Arc<Line>>,
}

impl NetworkModel {
    /// Builds the network from station and line records.
    ///
    /// # Errors
    ///
    /// Fails with [`NetworkError`] if ids or stop codes are duplicated, a
    /// line references a code no station owns, or a station carries a code
    /// that is not listed by exactly one line.
    pub fn build(stations: Vec<Station>, lines: Vec<Line>) -> Result<Self, NetworkError> {
        let stations: Vec<Arc<Station>> = stations.into_iter().map(Arc::new).collect();
        let lines: Vec<Arc<Line>> = lines.into_iter().map(Arc::new).collect();

        let mut by_id: HashMap<StationId, Arc<Station>> = HashMap::new();
        let mut station_by_code: HashMap<StopCode, Arc<Station>> = HashMap::new();

        for station in &stations {
            match by_id.entry(station.id.clone()) {
                Entry::Occupied(_) => {
                    return Err(NetworkError::DuplicateStation(station.id.clone()));
                }
                Entry::Vacant(slot) => {
                    slot.insert(Arc::clone(station));
                }
            }

            for code in &station.codes {
                match station_by_code.entry(code.clone()) {
                    Entry::Occupied(existing) => {
                        return Err(NetworkError::SharedStopCode {
                            code: code.clone(),
                            first: existing.get().id.clone(),
                            second: station.id.clone(),
                        });
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(Arc::clone(station));
                    }
                }
            }
        }

        let mut line_ids: HashSet<LineId> = HashSet::new();
        let mut line_by_code: HashMap<StopCode, Arc<Line>> = HashMap::new();

        for line in &lines {
            if !line_ids.insert(line.id.clone()) {
                return Err(NetworkError::DuplicateLine(line.id.clone()));
            }

            for code in &line.stops {
                if !station_by_code.contains_key(code) {
                    return Err(NetworkError::UnownedStop {
                        line: line.id.clone(),
                        code: code.clone(),
                    });
                }

                match line_by_code.entry(code.clone()) {
                    Entry::Occupied(existing) => {
                        return Err(NetworkError::StopOnMultipleLines {
                            code: code.clone(),
                            first: existing.get().id.clone(),
                            second: line.id.clone(),
                        });
                    }
                    Entry::Vacant(slot) => {
                        slot.insert(Arc::clone(line));
                    }
                }
            }
        }

        // The reverse direction: every station code must belong to a line.
        for station in &stations {
            for code in &station.codes {
                if !line_by_code.contains_key(code) {
                    return Err(NetworkError::StopWithoutLine {
                        station: station.id.clone(),
                        code: code.clone(),
                    });
                }
            }
        }

        debug!(
            stations = stations.len(),
            lines = lines.len(),
            stop_codes = station_by_code.len(),
            "network model built"
        );

        Ok(Self {
            stations,
            lines,
            by_id,
            station_by_code,
            line_by_code,
        })
    }

    /// Looks up a station by its public id.
    ///
    /// # Errors
    ///
    /// Fails with [`UnknownStation`] if the id is absent.
    pub fn station(&self, id: &StationId) -> Result<&Arc<Station>, UnknownStation> {
        self.by_id.get(id).ok_or_else(|| UnknownStation(id.clone()))
    }

    /// The station that owns a stop code, if any.
    pub fn station_at(&self, code: &StopCode) -> Option<&Arc<Station>> {
        self.station_by_code.get(code)
    }

    /// The line a stop code belongs to, if any.
    pub fn line_at(&self, code: &StopCode) -> Option<&Arc<Line>> {
        self.line_by_code.get(code)
    }

    /// All stations in input order.
    pub fn stations(&self) -> &[Arc<Station>] {
        &self.stations
    }

    /// All lines in input order.
    pub fn lines(&self) -> &[Arc<Line>] {
        &self.lines
    }
}
