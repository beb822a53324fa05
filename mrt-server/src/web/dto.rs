//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::Station;
use crate::network::NetworkModel;
use crate::planner::{PlannedRoute, Segment};

/// Request to plan a route.
#[derive(Debug, Deserialize)]
pub struct RouteRequest {
    /// Start station id
    pub from: String,

    /// Destination station id
    pub to: String,
}

/// Response to a route query.
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    /// Start station id, echoed back
    pub from: String,

    /// Destination station id, echoed back
    pub to: String,

    /// The planned route, or `null` when the network does not connect
    /// the stations
    pub route: Option<RouteResult>,
}

/// A planned route in a response.
#[derive(Debug, Serialize)]
pub struct RouteResult {
    /// Human-readable itinerary, one line per segment
    pub description: String,

    /// Total number of edges (rides and transfers) in the path
    pub edge_count: usize,

    /// Itinerary segments in order
    pub segments: Vec<SegmentResult>,
}

impl RouteResult {
    /// Builds the response shape from a planned route.
    pub fn from_planned(route: &PlannedRoute) -> Self {
        Self {
            description: route.description.clone(),
            edge_count: route.path.len(),
            segments: route.segments.iter().map(SegmentResult::from_segment).collect(),
        }
    }
}

/// One itinerary segment in a response.
#[derive(Debug, Serialize)]
pub struct SegmentResult {
    /// `"ride"` or `"change"`
    pub kind: &'static str,

    /// Stop code the segment starts at
    pub from: String,

    /// Stop code the segment ends at
    pub to: String,

    /// Line name, for ride segments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<String>,

    /// Number of stops ridden, for ride segments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stops: Option<usize>,
}

impl SegmentResult {
    /// Builds the response shape from a segment.
    pub fn from_segment(segment: &Segment) -> Self {
        match segment {
            Segment::Ride {
                from,
                to,
                line,
                stops,
            } => Self {
                kind: "ride",
                from: from.to_string(),
                to: to.to_string(),
                line: Some(line.display_name().to_string()),
                stops: Some(*stops),
            },
            Segment::Change { from, to } => Self {
                kind: "change",
                from: from.to_string(),
                to: to.to_string(),
                line: None,
                stops: None,
            },
        }
    }
}

/// A station in a listing response.
#[derive(Debug, Serialize)]
pub struct StationResult {
    /// Station id
    pub id: String,

    /// Localized names
    pub name: NameResult,

    /// Stop codes the station carries
    pub codes: Vec<String>,

    /// Names of the lines through this station
    pub lines: Vec<String>,
}

impl StationResult {
    /// Builds the response shape for a station, resolving its lines
    /// through the network indices.
    pub fn from_station(network: &NetworkModel, station: &Station) -> Self {
        let lines = station
            .codes
            .iter()
            .filter_map(|code| network.line_at(code))
            .map(|line| line.display_name().to_string())
            .collect();

        Self {
            id: station.id.to_string(),
            name: NameResult {
                en: station.name.en.clone(),
                zh: station.name.zh.clone(),
                ta: station.name.ta.clone(),
            },
            codes: station.codes.iter().map(|c| c.to_string()).collect(),
            lines,
        }
    }
}

/// Localized names in a response.
#[derive(Debug, Serialize)]
pub struct NameResult {
    pub en: String,
    pub zh: String,
    pub ta: String,
}

/// Station listing response.
#[derive(Debug, Serialize)]
pub struct StationsResponse {
    pub stations: Vec<StationResult>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Line, LineId, LocalizedName, StationId, StopCode};
    use std::sync::Arc;

    fn code(s: &str) -> StopCode {
        StopCode::parse(s).unwrap()
    }

    fn network() -> NetworkModel {
        NetworkModel::build(
            vec![
                Station::new(
                    StationId::parse("BGS").unwrap(),
                    LocalizedName::new("Bugis", "武吉士", "பூகிஸ்"),
                    vec![code("EW12"), code("DT14")],
                ),
                Station::new(
                    StationId::parse("LVR").unwrap(),
                    LocalizedName::new("Lavender", "劳明达", "லவண்டர்"),
                    vec![code("EW11")],
                ),
                Station::new(
                    StationId::parse("PMN").unwrap(),
                    LocalizedName::new("Promenade", "宝门廊", "புரொமனேட்"),
                    vec![code("DT15")],
                ),
            ],
            vec![
                Line::new(
                    LineId::parse("EW").unwrap(),
                    "East West Line",
                    vec![code("EW11"), code("EW12")],
                ),
                Line::new(
                    LineId::parse("DT").unwrap(),
                    "Downtown Line",
                    vec![code("DT14"), code("DT15")],
                ),
            ],
        )
        .unwrap()
    }

    #[test]
    fn segment_result_for_ride() {
        let line = Arc::new(Line::new(
            LineId::parse("EW").unwrap(),
            "East West Line",
            vec![code("EW11"), code("EW12")],
        ));
        let segment = Segment::Ride {
            from: code("EW11"),
            to: code("EW12"),
            line,
            stops: 1,
        };

        let result = SegmentResult::from_segment(&segment);

        assert_eq!(result.kind, "ride");
        assert_eq!(result.from, "EW11");
        assert_eq!(result.to, "EW12");
        assert_eq!(result.line.as_deref(), Some("East West Line"));
        assert_eq!(result.stops, Some(1));
    }

    #[test]
    fn segment_result_for_change() {
        let segment = Segment::Change {
            from: code("EW12"),
            to: code("DT14"),
        };

        let result = SegmentResult::from_segment(&segment);

        assert_eq!(result.kind, "change");
        assert_eq!(result.line, None);
        assert_eq!(result.stops, None);
    }

    #[test]
    fn change_segment_omits_null_fields() {
        let segment = Segment::Change {
            from: code("EW12"),
            to: code("DT14"),
        };

        let json = serde_json::to_value(SegmentResult::from_segment(&segment)).unwrap();

        assert!(json.get("line").is_none());
        assert!(json.get("stops").is_none());
    }

    #[test]
    fn station_result_resolves_lines() {
        let network = network();
        let bugis = network
            .station(&StationId::parse("BGS").unwrap())
            .unwrap();

        let result = StationResult::from_station(&network, bugis);

        assert_eq!(result.id, "BGS");
        assert_eq!(result.name.en, "Bugis");
        assert_eq!(result.codes, vec!["EW12", "DT14"]);
        assert_eq!(result.lines, vec!["East West Line", "Downtown Line"]);
    }
}
