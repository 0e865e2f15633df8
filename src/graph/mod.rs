//! Outlet graph: temporal similarity edges, aggregation and classification.

pub mod classify;
pub mod edges;
pub mod types;

pub use classify::{classify_nodes, degree_table, log_ratio, median, Classification};
pub use edges::{aggregate_edges, find_raw_edges};
pub use types::*;
