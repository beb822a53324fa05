//! Breadth-first route search over the station graph.
//!
//! The search walks the derived edge set from any stop code of the start
//! station to any stop code of the destination station. With the default
//! uniform weights the frontier pops in strict first-in-first-out order,
//! which is classic BFS: the first path to reach the destination has the
//! fewest edges. Transfers and rides each cost one edge, so the result
//! minimizes line changes as well as stops. Non-uniform weights run the
//! same loop as a cost-ordered search with ties resolved in insertion
//! order, keeping results deterministic.

use std::cmp::Ordering;
use std::collections::hash_map::Entry;
use std::collections::{BinaryHeap, HashMap};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use tracing::{debug, trace};

use crate::domain::{StationId, StopCode};
use crate::network::{GraphEdge, NetworkModel, RouteGraph, UnknownStation};

use super::config::SearchConfig;
use super::summary::{Segment, SummaryError, describe_route, summarize_route};

/// Error from route search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// A requested station id is absent from the network
    #[error("station {0} is not in the network")]
    UnknownStation(StationId),

    /// An external cancellation signal fired mid-search
    #[error("route search was cancelled")]
    Cancelled,
}

impl From<UnknownStation> for SearchError {
    fn from(e: UnknownStation) -> Self {
        SearchError::UnknownStation(e.0)
    }
}

/// Error from planning a route end to end.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error(transparent)]
    Search(#[from] SearchError),

    /// The search produced a path the summarizer rejects. This is a bug in
    /// graph construction, not bad input; do not catch and retry.
    #[error(transparent)]
    Summary(#[from] SummaryError),
}

/// Cooperative cancellation signal for an in-flight search.
///
/// Clones share the same flag. The search checks it between
/// queue-expansion steps, so a pathological network cannot run unbounded
/// work once the flag fires.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Creates a flag that has not fired.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires the flag. All clones observe the cancellation.
    pub fn cancel(&self) {
        self.0.store(true, AtomicOrdering::Relaxed);
    }

    /// Returns true once [`CancelFlag::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(AtomicOrdering::Relaxed)
    }
}

/// A fully planned route: the raw edge path plus its rendered itinerary.
#[derive(Debug, Clone)]
pub struct PlannedRoute {
    /// The hop-by-hop edge path found by the search
    pub path: Vec<GraphEdge>,
    /// The path collapsed into itinerary segments
    pub segments: Vec<Segment>,
    /// The segments rendered as text, one line each
    pub description: String,
}

/// Route planner over an immutable network and its derived graph.
///
/// The planner holds only shared read-only state; every query builds its
/// own queue and visited set, so concurrent queries need no locks.
pub struct Planner {
    network: Arc<NetworkModel>,
    graph: Arc<RouteGraph>,
    config: SearchConfig,
}

/// A path waiting in the frontier, ordered by (cost, insertion sequence).
struct QueuedPath {
    cost: u32,
    seq: usize,
    path: Vec<GraphEdge>,
}

impl PartialEq for QueuedPath {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.seq == other.seq
    }
}

impl Eq for QueuedPath {}

impl Ord for QueuedPath {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; invert so the cheapest, oldest entry
        // pops first. Equal costs pop in insertion order, i.e. FIFO.
        (other.cost, other.seq).cmp(&(self.cost, self.seq))
    }
}

impl PartialOrd for QueuedPath {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Planner {
    /// Creates a planner over a network, its graph, and search weights.
    pub fn new(network: Arc<NetworkModel>, graph: Arc<RouteGraph>, config: SearchConfig) -> Self {
        Self {
            network,
            graph,
            config,
        }
    }

    /// The network this planner searches.
    pub fn network(&self) -> &Arc<NetworkModel> {
        &self.network
    }

    /// Finds a minimum-cost edge path between two stations.
    ///
    /// Returns `Ok(None)` when the network does not connect the stations;
    /// a disconnected network is a valid outcome, not a fault. A query
    /// from a station to itself also reports no route.
    ///
    /// # Errors
    ///
    /// Fails with [`SearchError::UnknownStation`] if either id is absent.
    pub fn find_route(
        &self,
        start: &StationId,
        destination: &StationId,
    ) -> Result<Option<Vec<GraphEdge>>, SearchError> {
        self.find_route_cancellable(start, destination, &CancelFlag::new())
    }

    /// [`Planner::find_route`] with an external cancellation signal,
    /// checked between queue-expansion steps.
    pub fn find_route_cancellable(
        &self,
        start: &StationId,
        destination: &StationId,
        cancel: &CancelFlag,
    ) -> Result<Option<Vec<GraphEdge>>, SearchError> {
        let start = self.network.station(start)?;
        let destination = self.network.station(destination)?;

        let mut frontier: BinaryHeap<QueuedPath> = BinaryHeap::new();
        let mut best: HashMap<StopCode, u32> = HashMap::new();
        let mut seq = 0usize;

        // Every start code is reached at cost zero before the search
        // begins, which keeps expansion from ever walking back into the
        // start station.
        for code in &start.codes {
            best.insert(code.clone(), 0);
        }

        // Seed with ride edges only: a route always begins by boarding a
        // line. Transfers within the start station are never useful as a
        // first step, because all of its codes are start codes already.
        for code in &start.codes {
            for edge in self.graph.outgoing(code) {
                if edge.is_transfer() {
                    continue;
                }
                let cost = self.config.edge_weight(edge.kind());
                if relax(&mut best, edge.destination(), cost) {
                    frontier.push(QueuedPath {
                        cost,
                        seq,
                        path: vec![edge.clone()],
                    });
                    seq += 1;
                }
            }
        }

        let mut expanded = 0usize;

        while let Some(QueuedPath { cost, path, .. }) = frontier.pop() {
            if cancel.is_cancelled() {
                return Err(SearchError::Cancelled);
            }

            // Safe: paths are seeded and extended with at least one edge.
            let tail = path.last().unwrap().destination();

            // A cheaper path to this code may have been queued after this
            // entry; skip the stale one. Never happens with uniform
            // weights, where each code is enqueued at most once.
            if best.get(tail).is_some_and(|&reached| cost > reached) {
                continue;
            }

            if destination.owns(tail) {
                debug!(
                    start = %start.id,
                    destination = %destination.id,
                    edges = path.len(),
                    cost,
                    expanded,
                    "route found"
                );
                return Ok(Some(path));
            }

            expanded += 1;
            trace!(code = %tail, depth = path.len(), "expanding");

            for edge in self.graph.outgoing(tail) {
                let next_cost = cost + self.config.edge_weight(edge.kind());
                if relax(&mut best, edge.destination(), next_cost) {
                    let mut extended = path.clone();
                    extended.push(edge.clone());
                    frontier.push(QueuedPath {
                        cost: next_cost,
                        seq,
                        path: extended,
                    });
                    seq += 1;
                }
            }
        }

        debug!(
            start = %start.id,
            destination = %destination.id,
            expanded,
            "no route"
        );
        Ok(None)
    }

    /// Finds a route and renders its itinerary in one step.
    ///
    /// # Errors
    ///
    /// Fails with [`PlanError::Search`] for unknown stations or
    /// cancellation, and [`PlanError::Summary`] if the found path is
    /// malformed (a programming error).
    pub fn plan(
        &self,
        start: &StationId,
        destination: &StationId,
    ) -> Result<Option<PlannedRoute>, PlanError> {
        let Some(path) = self.find_route(start, destination)? else {
            return Ok(None);
        };

        let segments = summarize_route(&path)?;
        let description = describe_route(&self.network, &segments);

        Ok(Some(PlannedRoute {
            path,
            segments,
            description,
        }))
    }
}

/// Record `cost` for `code` if it beats the best known cost. Returns true
/// if the code should be enqueued.
fn relax(best: &mut HashMap<StopCode, u32>, code: &StopCode, cost: u32) -> bool {
    match best.entry(code.clone()) {
        Entry::Occupied(mut existing) => {
            if cost < *existing.get() {
                existing.insert(cost);
                true
            } else {
                false
            }
        }
        Entry::Vacant(slot) => {
            slot.insert(cost);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Line, LineId, LocalizedName, Station};
    use crate::network::EdgeKind;

    fn code(s: &str) -> StopCode {
        StopCode::parse(s).unwrap()
    }

    fn id(s: &str) -> StationId {
        StationId::parse(s).unwrap()
    }

    fn station(station_id: &str, name: &str, codes: &[&str]) -> Station {
        Station::new(
            id(station_id),
            LocalizedName::new(name, name, name),
            codes.iter().map(|c| code(c)).collect(),
        )
    }

    fn line(line_id: &str, name: &str, stops: &[&str]) -> Line {
        Line::new(
            LineId::parse(line_id).unwrap(),
            name,
            stops.iter().map(|c| code(c)).collect(),
        )
    }

    fn planner_for(stations: Vec<Station>, lines: Vec<Line>) -> Planner {
        let network = Arc::new(NetworkModel::build(stations, lines).unwrap());
        let graph = Arc::new(RouteGraph::build(&network));
        Planner::new(network, graph, SearchConfig::default())
    }

    /// Two lines crossing at one interchange:
    /// EW: AAA(EW1) - INT(EW2) - BBB(EW3)
    /// NS: CCC(NS1) - INT(NS2) - DDD(NS3)
    fn crossing_planner() -> Planner {
        planner_for(
            vec![
                station("AAA", "Alpha", &["EW1"]),
                station("INT", "Interchange", &["EW2", "NS2"]),
                station("BBB", "Beta", &["EW3"]),
                station("CCC", "Gamma", &["NS1"]),
                station("DDD", "Delta", &["NS3"]),
            ],
            vec![
                line("EW", "East West Line", &["EW1", "EW2", "EW3"]),
                line("NS", "North South Line", &["NS1", "NS2", "NS3"]),
            ],
        )
    }

    /// Every simple edge path from a ride edge out of `start` to a code of
    /// `destination`, for checking minimality exhaustively.
    fn all_path_lengths(planner: &Planner, start: &StationId, destination: &StationId) -> Vec<usize> {
        let start = planner.network.station(start).unwrap();
        let destination = planner.network.station(destination).unwrap();

        let mut lengths = Vec::new();
        let mut stack: Vec<Vec<GraphEdge>> = Vec::new();

        for code in &start.codes {
            for edge in planner.graph.outgoing(code) {
                if !edge.is_transfer() {
                    stack.push(vec![edge.clone()]);
                }
            }
        }

        while let Some(path) = stack.pop() {
            let tail = path.last().unwrap().destination().clone();
            if destination.owns(&tail) {
                lengths.push(path.len());
                continue;
            }
            if path.len() > 12 {
                continue; // fixture networks are small; cap runaway paths
            }
            for edge in planner.graph.outgoing(&tail) {
                let revisits = start.codes.contains(edge.destination())
                    || path.iter().any(|e| {
                        e.origin() == edge.destination() || e.destination() == edge.destination()
                    });
                if !revisits {
                    let mut extended = path.clone();
                    extended.push(edge.clone());
                    stack.push(extended);
                }
            }
        }

        lengths
    }

    #[test]
    fn ride_along_one_line() {
        let planner = crossing_planner();

        let path = planner.find_route(&id("AAA"), &id("BBB")).unwrap().unwrap();

        assert_eq!(path.len(), 2);
        assert_eq!(path[0].origin(), &code("EW1"));
        assert_eq!(path[1].destination(), &code("EW3"));
        assert!(path.iter().all(|e| !e.is_transfer()));
    }

    #[test]
    fn transfer_at_interchange() {
        let planner = crossing_planner();

        let path = planner.find_route(&id("AAA"), &id("DDD")).unwrap().unwrap();

        assert_eq!(path.len(), 3);
        assert!(matches!(path[0].kind(), EdgeKind::Ride(_)));
        assert!(path[1].is_transfer());
        assert_eq!(path[1].origin(), &code("EW2"));
        assert_eq!(path[1].destination(), &code("NS2"));
        assert!(matches!(path[2].kind(), EdgeKind::Ride(_)));
        assert_eq!(path[2].destination(), &code("NS3"));
    }

    #[test]
    fn shared_station_needs_no_transfer() {
        // AAA owns codes on both lines, so the route to CCC is the single
        // L2 ride; a transfer first would only add an edge.
        let planner = planner_for(
            vec![
                station("AAA", "Alpha", &["L1-1", "L2-1"]),
                station("BBB", "Beta", &["L1-2"]),
                station("CCC", "Gamma", &["L2-2"]),
            ],
            vec![
                line("L1", "Line One", &["L1-1", "L1-2"]),
                line("L2", "Line Two", &["L2-1", "L2-2"]),
            ],
        );

        let path = planner.find_route(&id("AAA"), &id("CCC")).unwrap().unwrap();

        assert_eq!(path.len(), 1);
        assert_eq!(path[0].origin(), &code("L2-1"));
        assert_eq!(path[0].destination(), &code("L2-2"));
        assert!(!path[0].is_transfer());
    }

    #[test]
    fn found_path_is_minimal() {
        let planner = crossing_planner();

        for destination in ["BBB", "CCC", "DDD", "INT"] {
            let path = planner
                .find_route(&id("AAA"), &id(destination))
                .unwrap()
                .unwrap();
            let shortest = all_path_lengths(&planner, &id("AAA"), &id(destination))
                .into_iter()
                .min()
                .unwrap();
            assert_eq!(path.len(), shortest, "destination {destination}");
        }
    }

    #[test]
    fn path_is_chained_and_never_revisits() {
        let planner = crossing_planner();

        let path = planner.find_route(&id("CCC"), &id("BBB")).unwrap().unwrap();

        for pair in path.windows(2) {
            assert_eq!(pair[0].destination(), pair[1].origin());
        }

        let mut seen = std::collections::HashSet::new();
        for edge in &path {
            assert!(seen.insert(edge.destination().clone()), "revisited code");
        }
    }

    #[test]
    fn disconnected_station_has_no_route() {
        let planner = planner_for(
            vec![
                station("AAA", "Alpha", &["EW1"]),
                station("BBB", "Beta", &["EW2"]),
                station("DDD", "Delta", &[]),
            ],
            vec![line("EW", "East West Line", &["EW1", "EW2"])],
        );

        assert_eq!(planner.find_route(&id("AAA"), &id("DDD")).unwrap(), None);
        assert_eq!(planner.find_route(&id("DDD"), &id("AAA")).unwrap(), None);
    }

    #[test]
    fn disconnected_lines_have_no_route() {
        let planner = planner_for(
            vec![
                station("AAA", "Alpha", &["EW1"]),
                station("BBB", "Beta", &["EW2"]),
                station("CCC", "Gamma", &["NS1"]),
                station("DDD", "Delta", &["NS2"]),
            ],
            vec![
                line("EW", "East West Line", &["EW1", "EW2"]),
                line("NS", "North South Line", &["NS1", "NS2"]),
            ],
        );

        assert_eq!(planner.find_route(&id("AAA"), &id("CCC")).unwrap(), None);
    }

    #[test]
    fn same_station_has_no_route() {
        let planner = crossing_planner();

        assert_eq!(planner.find_route(&id("AAA"), &id("AAA")).unwrap(), None);
        assert_eq!(planner.find_route(&id("INT"), &id("INT")).unwrap(), None);
    }

    #[test]
    fn unknown_station_is_an_error() {
        let planner = crossing_planner();

        let err = planner.find_route(&id("ZZZ"), &id("AAA")).unwrap_err();
        assert_eq!(err, SearchError::UnknownStation(id("ZZZ")));

        let err = planner.find_route(&id("AAA"), &id("ZZZ")).unwrap_err();
        assert_eq!(err, SearchError::UnknownStation(id("ZZZ")));
    }

    #[test]
    fn cancellation_stops_the_search() {
        let planner = crossing_planner();

        let cancel = CancelFlag::new();
        cancel.cancel();

        let err = planner
            .find_route_cancellable(&id("AAA"), &id("DDD"), &cancel)
            .unwrap_err();
        assert_eq!(err, SearchError::Cancelled);
    }

    #[test]
    fn heavier_transfers_prefer_the_long_ride() {
        // Two ways from SSS to TTT: four stops along line AA with no
        // change, or two stops with a change in the middle.
        let stations = vec![
            station("SSS", "Source", &["AA1", "BB1"]),
            station("AAA", "MidA", &["AA2"]),
            station("BBB", "MidB", &["AA3"]),
            station("CCC", "MidC", &["AA4"]),
            station("MMM", "Middle", &["BB2", "CC1"]),
            station("TTT", "Target", &["AA5", "CC2"]),
        ];
        let lines = vec![
            line("AA", "Long Line", &["AA1", "AA2", "AA3", "AA4", "AA5"]),
            line("BB", "Short One", &["BB1", "BB2"]),
            line("CC", "Short Two", &["CC1", "CC2"]),
        ];

        let network = Arc::new(NetworkModel::build(stations, lines).unwrap());
        let graph = Arc::new(RouteGraph::build(&network));

        let uniform = Planner::new(
            Arc::clone(&network),
            Arc::clone(&graph),
            SearchConfig::default(),
        );
        let path = uniform.find_route(&id("SSS"), &id("TTT")).unwrap().unwrap();
        assert_eq!(path.len(), 3);
        assert_eq!(path.iter().filter(|e| e.is_transfer()).count(), 1);

        let transfer_averse = Planner::new(network, graph, SearchConfig::new(1, 3));
        let path = transfer_averse
            .find_route(&id("SSS"), &id("TTT"))
            .unwrap()
            .unwrap();
        assert_eq!(path.len(), 4);
        assert!(path.iter().all(|e| !e.is_transfer()));
    }

    #[test]
    fn plan_renders_an_itinerary() {
        let planner = crossing_planner();

        let planned = planner.plan(&id("AAA"), &id("DDD")).unwrap().unwrap();

        assert_eq!(planned.path.len(), 3);
        assert_eq!(planned.segments.len(), 3);
        assert_eq!(planned.description.lines().count(), 3);
        assert!(planned.description.lines().all(|l| !l.is_empty()));
    }

    #[test]
    fn plan_passes_no_route_through() {
        let planner = crossing_planner();

        assert!(planner.plan(&id("AAA"), &id("AAA")).unwrap().is_none());
    }
}
