//! Line types.

use std::fmt;

use super::StopCode;

/// Error returned when parsing an invalid line identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid line id {value:?}: {reason}")]
pub struct InvalidLineId {
    value: String,
    reason: &'static str,
}

/// A line's identifier (e.g. `EW` for the East West Line).
///
/// Line ids are non-empty sequences of uppercase ASCII letters and digits.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct LineId(String);

impl LineId {
    /// Parse a line id from a string.
    pub fn parse(s: &str) -> Result<Self, InvalidLineId> {
        if s.is_empty() {
            return Err(InvalidLineId {
                value: s.to_string(),
                reason: "must not be empty",
            });
        }

        for b in s.bytes() {
            if !b.is_ascii_uppercase() && !b.is_ascii_digit() {
                return Err(InvalidLineId {
                    value: s.to_string(),
                    reason: "must be uppercase ASCII letters and digits",
                });
            }
        }

        Ok(LineId(s.to_string()))
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineId({})", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A line: its id, display name, and stop codes in physical stop order.
///
/// The index order of `stops` is meaningful. It determines which stations
/// are adjacent (one ride apart) and which end of the line a rider is
/// heading towards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// Line identifier
    pub id: LineId,
    /// Display name. May be empty in source data; use [`Line::display_name`]
    /// for rendering.
    pub name: String,
    /// Stop codes in stop order along the line
    pub stops: Vec<StopCode>,
}

impl Line {
    /// Creates a line from its parts.
    pub fn new(id: LineId, name: impl Into<String>, stops: Vec<StopCode>) -> Self {
        Self {
            id,
            name: name.into(),
            stops,
        }
    }

    /// The name to render for this line: the display name, or the id when
    /// the source data left the name blank.
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            self.id.as_str()
        } else {
            &self.name
        }
    }

    /// Position of a stop code in this line's stop order.
    pub fn position_of(&self, code: &StopCode) -> Option<usize> {
        self.stops.iter().position(|c| c == code)
    }

    /// The first stop in stop order, if the line has any stops.
    pub fn first_stop(&self) -> Option<&StopCode> {
        self.stops.first()
    }

    /// The last stop in stop order, if the line has any stops.
    pub fn last_stop(&self) -> Option<&StopCode> {
        self.stops.last()
    }
}
