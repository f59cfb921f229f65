//! Route and fare engine.
//!
//! Answers "what is the shortest way from station A to station B, and what
//! does it cost?" over the whole network. A fresh [`NetworkGraph`] is built
//! from every segment on every line for each query; nothing is cached
//! between calls.

mod error;
mod fare;
mod graph;
mod ordering;
mod service;

pub use error::RouteError;
pub use fare::{AgeDiscount, FareCalculator, FareError, FarePolicy};
pub use graph::{NetworkGraph, ShortestPath};
pub use ordering::{MissingStation, order_stations};
pub use service::{Route, RouteService};
