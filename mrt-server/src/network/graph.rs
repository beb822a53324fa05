//! Directed edge set derived from the network model.
//!
//! Two edge kinds exist: riding a line one stop, and transferring between
//! lines inside a station. Both cost one edge to traverse, which is what
//! makes the search minimize transfers as well as stops.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::domain::{Line, StopCode};

use super::NetworkModel;

/// What traversing an edge means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdgeKind {
    /// Ride the given line one stop.
    Ride(Arc<Line>),
    /// Change lines on foot within the same station.
    Transfer,
}

/// A directed edge between two stop codes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    from: StopCode,
    to: StopCode,
    kind: EdgeKind,
}

impl GraphEdge {
    /// Creates a ride edge: one stop along `line`.
    pub fn ride(from: StopCode, to: StopCode, line: Arc<Line>) -> Self {
        Self {
            from,
            to,
            kind: EdgeKind::Ride(line),
        }
    }

    /// Creates a transfer edge between two codes of the same station.
    pub fn transfer(from: StopCode, to: StopCode) -> Self {
        Self {
            from,
            to,
            kind: EdgeKind::Transfer,
        }
    }

    /// The code this edge leaves from.
    pub fn origin(&self) -> &StopCode {
        &self.from
    }

    /// The code this edge arrives at.
    pub fn destination(&self) -> &StopCode {
        &self.to
    }

    /// What traversing this edge means.
    pub fn kind(&self) -> &EdgeKind {
        &self.kind
    }

    /// The line ridden, for ride edges.
    pub fn line(&self) -> Option<&Arc<Line>> {
        match &self.kind {
            EdgeKind::Ride(line) => Some(line),
            EdgeKind::Transfer => None,
        }
    }

    /// Returns true if this is a transfer edge.
    pub fn is_transfer(&self) -> bool {
        matches!(self.kind, EdgeKind::Transfer)
    }

    /// The same edge traversed in the opposite direction.
    pub fn reversed(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
            kind: self.kind.clone(),
        }
    }
}

/// The full directed edge set for a network, with a per-origin index.
///
/// Building is pure: the same network always yields the same edges in the
/// same order (lines then stations, each in input order; per adjacent pair,
/// forward then reverse). The per-origin index lists outgoing edges in
/// insertion order, so expansion during search is deterministic too.
#[derive(Debug)]
pub struct RouteGraph {
    edges: Vec<GraphEdge>,
    by_origin: HashMap<StopCode, Vec<usize>>,
}

impl RouteGraph {
    /// Derives the edge set from a network model.
    pub fn build(network: &NetworkModel) -> Self {
        let mut edges = Vec::new();

        for line in network.lines() {
            for pair in line.stops.windows(2) {
                edges.push(GraphEdge::ride(
                    pair[0].clone(),
                    pair[1].clone(),
                    Arc::clone(line),
                ));
                edges.push(GraphEdge::ride(
                    pair[1].clone(),
                    pair[0].clone(),
                    Arc::clone(line),
                ));
            }
        }

        // Transfers chain a station's codes pairwise in list order. A
        // station on three lines gets X1-X2 and X2-X3, not a clique; the
        // cost of any transfer stays one edge per hop along the chain.
        for station in network.stations() {
            for pair in station.codes.windows(2) {
                edges.push(GraphEdge::transfer(pair[0].clone(), pair[1].clone()));
                edges.push(GraphEdge::transfer(pair[1].clone(), pair[0].clone()));
            }
        }

        let mut by_origin: HashMap<StopCode, Vec<usize>> = HashMap::new();
        for (index, edge) in edges.iter().enumerate() {
            by_origin.entry(edge.from.clone()).or_default().push(index);
        }

        debug!(edges = edges.len(), "route graph built");

        Self { edges, by_origin }
    }

    /// All edges in insertion order.
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Outgoing edges of a code, in insertion order.
    pub fn outgoing(&self, code: &StopCode) -> impl Iterator<Item = &GraphEdge> + '_ {
        self.by_origin
            .get(code)
            .into_iter()
            .flatten()
            .map(|&index| &self.edges[index])
    }
}
