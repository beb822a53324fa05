//! Domain types for the MRT route planner.
//!
//! This module contains the core domain model types that represent
//! validated network data. Identifier types enforce their invariants at
//! construction time, so code that receives them can trust their validity.

mod line;
mod name;
mod station;

pub use line::{InvalidLineId, Line, LineId};
pub use name::LocalizedName;
pub use station::{InvalidStationId, InvalidStopCode, Station, StationId, StopCode};
