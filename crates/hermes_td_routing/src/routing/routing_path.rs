use serde::Serialize;

use crate::distance::{Distance, Meters};
use crate::edge_direction::EdgeDirection;
use crate::types::EdgeId;
use crate::weighting::Milliseconds;

/// One edge of a path with the times it is entered and left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PathSegment {
    pub edge_id: EdgeId,
    pub direction: EdgeDirection,
    pub distance: Distance<Meters>,
    pub entry_time: Milliseconds,
    pub exit_time: Milliseconds,
}

impl PathSegment {
    pub fn time(&self) -> Milliseconds {
        self.exit_time - self.entry_time
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoutingPath {
    segments: Vec<PathSegment>,
    distance: Distance<Meters>,
    departure: Milliseconds,
    arrival: Milliseconds,
}

impl RoutingPath {
    /// `segments` must be contiguous in time, starting at `departure`.
    pub fn new(segments: Vec<PathSegment>, departure: Milliseconds) -> RoutingPath {
        let distance = segments.iter().map(|segment| segment.distance).sum();
        let arrival = segments.last().map_or(departure, |segment| segment.exit_time);

        RoutingPath {
            segments,
            distance,
            departure,
            arrival,
        }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn distance(&self) -> Distance<Meters> {
        self.distance
    }

    pub fn time(&self) -> Milliseconds {
        self.arrival - self.departure
    }

    pub fn departure(&self) -> Milliseconds {
        self.departure
    }

    pub fn arrival(&self) -> Milliseconds {
        self.arrival
    }
}
