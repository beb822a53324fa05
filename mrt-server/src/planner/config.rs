//! Search configuration.

use crate::network::EdgeKind;

/// Cost weights for the route search.
///
/// Both weights default to 1, making the search a plain breadth-first
/// search that minimizes total edge count, where a line change and a
/// one-stop ride cost the same. Raising `transfer_weight` biases the
/// search towards routes with fewer line changes at the expense of more
/// stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Cost of riding one stop.
    pub ride_weight: u32,

    /// Cost of changing lines within a station.
    pub transfer_weight: u32,
}

impl SearchConfig {
    /// Create a configuration with the given weights.
    pub fn new(ride_weight: u32, transfer_weight: u32) -> Self {
        Self {
            ride_weight,
            transfer_weight,
        }
    }

    /// The cost of traversing an edge of the given kind.
    pub fn edge_weight(&self, kind: &EdgeKind) -> u32 {
        match kind {
            EdgeKind::Ride(_) => self.ride_weight,
            EdgeKind::Transfer => self.transfer_weight,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            ride_weight: 1,
            transfer_weight: 1,
        }
    }
}
