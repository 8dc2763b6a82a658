use tracing::{debug, warn};

use crate::constants::MAX_DURATION;
use crate::edge_direction::EdgeDirection;
use crate::graph::Graph;
use crate::types::NodeId;
use crate::weighting::{Milliseconds, Weighting};

/// Shrinks beeline estimates slightly below the fastest possible travel time
/// so that floating point noise never makes them overestimate.
const ESTIMATE_SLACK: f64 = 1e-5;

pub trait AStarHeuristic {
    /// Lower bound of the travel time from `start` to `end`.
    fn estimate(&self, graph: &impl Graph, start: NodeId, end: NodeId) -> Milliseconds;
}

/// Beeline distance driven at the fastest pace found on any edge.
///
/// Edge times are truncated to whole milliseconds, so the pace is measured
/// on the truncated lower bound of every edge rather than derived from the
/// maximum speed alone. The estimate then never drops by more than the cost
/// of an edge along it.
#[derive(Debug, Clone, Copy)]
pub struct BeelineHeuristic {
    ms_per_meter: f64,
}

impl BeelineHeuristic {
    pub fn new(graph: &impl Graph, weighting: &dyn Weighting) -> Self {
        if !graph.is_beeline_consistent() {
            warn!("Graph has edges shorter than their beeline, falling back to a zero estimate");
            return BeelineHeuristic { ms_per_meter: 0.0 };
        }

        let mut ms_per_meter = 3600.0 / weighting.max_speed();
        for edge_id in 0..graph.edge_count() {
            let edge = graph.edge(edge_id);
            let distance = edge.distance().value();
            if distance <= 0.0 {
                continue;
            }

            for direction in [EdgeDirection::Forward, EdgeDirection::Backward] {
                let edge_ms = weighting.min_edge_ms(edge, direction);
                if edge_ms != MAX_DURATION {
                    ms_per_meter = ms_per_meter.min(edge_ms as f64 / distance);
                }
            }
        }

        debug!(ms_per_meter, "Beeline pace");

        BeelineHeuristic {
            ms_per_meter: ms_per_meter * (1.0 - ESTIMATE_SLACK),
        }
    }
}

impl AStarHeuristic for BeelineHeuristic {
    fn estimate(&self, graph: &impl Graph, start: NodeId, end: NodeId) -> Milliseconds {
        if self.ms_per_meter == 0.0 {
            return 0;
        }

        let distance = graph
            .node_geometry(start)
            .haversine_distance(graph.node_geometry(end))
            .value();

        (distance * self.ms_per_meter).floor() as Milliseconds
    }
}

/// Turns the search into a bidirectional Dijkstra.
pub struct ZeroHeuristic;

impl AStarHeuristic for ZeroHeuristic {
    fn estimate(&self, _graph: &impl Graph, _start: NodeId, _end: NodeId) -> Milliseconds {
        0
    }
}
