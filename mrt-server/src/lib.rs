//! MRT route planner server.
//!
//! A web application that answers: "how do I get from this station
//! to that one, and where do I change lines?" over a static metro
//! network description.

pub mod cache;
pub mod domain;
pub mod loader;
pub mod network;
pub mod planner;
pub mod web;
