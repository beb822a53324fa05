//! Route summarizer: collapse an edge path into itinerary segments.
//!
//! A raw path is one edge per hop. Riders think in runs: "take this line
//! for five stops, then change". The summarizer folds consecutive
//! same-line ride edges into one segment and renders each segment as a
//! line of text with a stop count and the direction of travel.

use std::sync::Arc;

use crate::domain::{Line, StopCode};
use crate::network::{EdgeKind, GraphEdge, NetworkModel};

/// Error from summarizing a malformed edge path.
///
/// These indicate a bug in graph construction or search, not bad user
/// input. Callers must not catch one and retry the request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SummaryError {
    /// The path has no edges
    #[error("cannot summarize an empty route")]
    EmptyRoute,

    /// An edge does not start where the previous edge ended
    #[error("route is discontinuous: edge starts at {found}, previous edge ended at {expected}")]
    Discontinuous { expected: StopCode, found: StopCode },
}

/// One itinerary step: a run of stops ridden on a single line, or a line
/// change within a station.
///
/// A `Ride` covers one or more contiguous same-line edges; `stops` counts
/// them. A `Change` is always a single transfer edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Ride `line` from `from` to `to`, passing `stops` stops
    Ride {
        from: StopCode,
        to: StopCode,
        line: Arc<Line>,
        stops: usize,
    },
    /// Change lines on foot, from one code of a station to another
    Change { from: StopCode, to: StopCode },
}

impl Segment {
    fn open(edge: &GraphEdge) -> Self {
        match edge.kind() {
            EdgeKind::Ride(line) => Segment::Ride {
                from: edge.origin().clone(),
                to: edge.destination().clone(),
                line: Arc::clone(line),
                stops: 1,
            },
            EdgeKind::Transfer => Segment::Change {
                from: edge.origin().clone(),
                to: edge.destination().clone(),
            },
        }
    }

    /// The code this segment starts at.
    pub fn origin(&self) -> &StopCode {
        match self {
            Segment::Ride { from, .. } | Segment::Change { from, .. } => from,
        }
    }

    /// The code this segment ends at.
    pub fn destination(&self) -> &StopCode {
        match self {
            Segment::Ride { to, .. } | Segment::Change { to, .. } => to,
        }
    }

    /// Returns true if this segment is a line change.
    pub fn is_change(&self) -> bool {
        matches!(self, Segment::Change { .. })
    }
}

/// Folds an edge path into maximal same-line segments.
///
/// A ride segment extends only when the next edge rides the same line and
/// starts at the segment's end code. Any other edge closes the segment and
/// opens a new one.
///
/// # Errors
///
/// Fails with [`SummaryError`] on an empty path or one whose edges do not
/// chain (each edge must start where the previous one ended).
pub fn summarize_route(path: &[GraphEdge]) -> Result<Vec<Segment>, SummaryError> {
    let Some((first, rest)) = path.split_first() else {
        return Err(SummaryError::EmptyRoute);
    };

    let mut segments = Vec::new();
    let mut current = Segment::open(first);

    for edge in rest {
        if edge.origin() != current.destination() {
            return Err(SummaryError::Discontinuous {
                expected: current.destination().clone(),
                found: edge.origin().clone(),
            });
        }

        current = match (current, edge.kind()) {
            (Segment::Ride { from, line, stops, .. }, EdgeKind::Ride(next)) if line == *next => {
                Segment::Ride {
                    from,
                    to: edge.destination().clone(),
                    line,
                    stops: stops + 1,
                }
            }
            (closed, _) => {
                segments.push(closed);
                Segment::open(edge)
            }
        };
    }

    segments.push(current);
    Ok(segments)
}

/// Renders segments as text, one line per segment, newline-joined.
pub fn describe_route(network: &NetworkModel, segments: &[Segment]) -> String {
    segments
        .iter()
        .map(|segment| describe_segment(network, segment))
        .collect::<Vec<_>>()
        .join("\n")
}

fn describe_segment(network: &NetworkModel, segment: &Segment) -> String {
    match segment {
        Segment::Change { .. } => "Change Lines".to_string(),
        Segment::Ride {
            from,
            to,
            line,
            stops,
        } => {
            let mut text = format!(
                "{} to {} on {}",
                stop_description(network, from),
                stop_description(network, to),
                line.display_name()
            );

            if let Some(terminus) = travel_terminus(line, from, to) {
                if terminus != to {
                    text.push_str(" - towards ");
                    text.push_str(&terminus_name(network, terminus));
                }
            }

            let noun = if *stops == 1 { "stop" } else { "stops" };
            text.push_str(&format!(" - {stops} {noun}"));
            text
        }
    }
}

/// `CODE (English name)`, or the bare code when the network cannot
/// resolve it.
fn stop_description(network: &NetworkModel, code: &StopCode) -> String {
    match network.station_at(code) {
        Some(station) => format!("{} ({})", code, station.name.en),
        None => code.to_string(),
    }
}

fn terminus_name(network: &NetworkModel, terminus: &StopCode) -> String {
    match network.station_at(terminus) {
        Some(station) => station.name.en.clone(),
        None => terminus.to_string(),
    }
}

/// The end of the line the segment is heading towards: riding forward in
/// stop order means the last stop, backwards means the first. `None` when
/// either code is not on the line (a foreign edge; the caller renders no
/// direction rather than guessing).
fn travel_terminus<'a>(line: &'a Line, from: &StopCode, to: &StopCode) -> Option<&'a StopCode> {
    let from_position = line.position_of(from)?;
    let to_position = line.position_of(to)?;

    if from_position < to_position {
        line.last_stop()
    } else {
        line.first_stop()
    }
}
