use jiff::Timestamp;
use thiserror::Error;

use crate::{
    types::{EdgeId, NodeId},
    weighting::Milliseconds,
};

/// Rejected setup: raised while building the graph, a weighting or the
/// router, before any query runs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("Speed profile has no breakpoints")]
    EmptySpeedProfile,
    #[error("Speed profile must start at 00:00, first breakpoint is at {0} ms")]
    SpeedProfileStart(Milliseconds),
    #[error("Speed profile breakpoint {index} at {start_ms} ms is not after the previous one")]
    UnorderedBreakpoint { index: usize, start_ms: Milliseconds },
    #[error("Speed profile breakpoint {index} at {start_ms} ms is outside of the day")]
    BreakpointOutsideDay { index: usize, start_ms: Milliseconds },
    #[error("Speed factor {factor} at breakpoint {index} must be finite and positive")]
    InvalidSpeedFactor { index: usize, factor: f64 },
    #[error("Maximum speed must be finite and positive, got {0} km/h")]
    InvalidMaxSpeed(f64),
    #[error("Weighting is not FIFO, it can only be used with the label-correcting strategy")]
    NonFifoWeighting,
    #[error("Maximum snap distance must be finite and non-negative, got {0} m")]
    InvalidSnapDistance(f64),
    #[error("Profile {0} is already registered")]
    DuplicateProfile(String),
    #[error("Edge {edge_id} references unknown node {node_id}")]
    UnknownNode { edge_id: EdgeId, node_id: NodeId },
    #[error("Node {node_id} has invalid coordinates")]
    InvalidCoordinates { node_id: NodeId },
    #[error("Edge {edge_id} has an invalid length of {distance} m")]
    InvalidEdgeLength { edge_id: EdgeId, distance: f64 },
}

/// A request that cannot be answered as asked.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RequestError {
    #[error("No routable node within {max_snap_distance} m of ({lat}, {lng})")]
    UnresolvableCoordinate {
        lat: f64,
        lng: f64,
        max_snap_distance: f64,
    },
    #[error("Unknown path detail {0}")]
    UnknownPathDetail(String),
    #[error("No profile found for {0}")]
    UnknownProfile(String),
    #[error("Departure time {0} is before the earliest supported time")]
    InvalidDepartureTime(Timestamp),
    #[error("Node {0} does not exist")]
    InvalidNode(NodeId),
}

/// Broken invariant between the search and the extracted path. These are
/// defects, never user errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InternalError {
    #[error("Search reported {search} ms but the extracted path takes {path} ms")]
    TimeMismatch {
        search: Milliseconds,
        path: Milliseconds,
    },
    #[error("Edge {edge_id} of the extracted path cannot be traversed at {time} ms")]
    InaccessibleEdge { edge_id: EdgeId, time: Milliseconds },
    #[error("Edge {edge_id} of the extracted path does not start at node {node_id}")]
    DisconnectedPath { edge_id: EdgeId, node_id: NodeId },
    #[error("Search found a meeting point but the extracted path is empty")]
    EmptyPath,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoutingError {
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error("Internal routing error: {0}")]
    Internal(#[from] InternalError),
    #[error("Routing query was cancelled")]
    Cancelled,
    #[error("Routing query visited more than {0} nodes")]
    VisitedNodesExceeded(usize),
}
