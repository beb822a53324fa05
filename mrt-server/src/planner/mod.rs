//! Route planning: breadth-first search and itinerary summarization.
//!
//! This module answers the core question of the server: "how do I get
//! from station A to station B, and where do I change lines?" The search
//! finds a fewest-edges path over the derived graph; the summarizer
//! collapses it into human-readable line segments.

mod config;
mod search;
mod summary;

pub use config::SearchConfig;
pub use search::{CancelFlag, PlanError, PlannedRoute, Planner, SearchError};
pub use summary::{Segment, SummaryError, describe_route, summarize_route};
