pub mod base_graph;
pub mod config;
pub mod constants;
pub mod distance;
pub mod edge_direction;
pub mod error;
pub mod geopoint;
pub mod graph;
pub mod hermes;
pub mod json;
pub mod location_index;
pub mod properties;
pub mod routing;
pub mod snap;
pub mod stopwatch;
pub mod types;
pub mod utils;
pub mod weighting;

#[cfg(test)]
mod test_graph_utils;
