use crate::base_graph::GraphEdge;
use crate::edge_direction::EdgeDirection;
use crate::graph::Graph;
use crate::types::{EdgeId, NodeId};
use crate::weighting::{Milliseconds, Weighting};

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum SearchDirection {
    Forward,
    Backward,
}

/// What differs between growing a search from the origin and growing it
/// from the destination.
pub(crate) trait TraversalDirection {
    const DIRECTION: SearchDirection;

    /// Direction in which `edge_id` is driven along the final path when the
    /// search crosses it from `node`.
    fn path_direction(graph: &impl Graph, edge_id: EdgeId, node: NodeId) -> EdgeDirection;

    /// Cost of crossing `edge` when the label being expanded sits at
    /// `time` (absolute).
    fn edge_ms(
        weighting: &dyn Weighting,
        edge: &GraphEdge,
        direction: EdgeDirection,
        time: Milliseconds,
    ) -> Milliseconds;
}

/// Follows outgoing arcs with exact time-dependent costs.
pub(crate) struct Forward;

/// Follows incoming arcs with static lower bounds, the arrival time at the
/// destination being unknown.
pub(crate) struct Backward;

impl TraversalDirection for Forward {
    const DIRECTION: SearchDirection = SearchDirection::Forward;

    fn path_direction(graph: &impl Graph, edge_id: EdgeId, node: NodeId) -> EdgeDirection {
        graph.edge_direction(edge_id, node)
    }

    fn edge_ms(
        weighting: &dyn Weighting,
        edge: &GraphEdge,
        direction: EdgeDirection,
        time: Milliseconds,
    ) -> Milliseconds {
        weighting.calc_edge_ms(edge, direction, time)
    }
}

impl TraversalDirection for Backward {
    const DIRECTION: SearchDirection = SearchDirection::Backward;

    fn path_direction(graph: &impl Graph, edge_id: EdgeId, node: NodeId) -> EdgeDirection {
        graph.edge_direction(edge_id, node).opposite()
    }

    fn edge_ms(
        weighting: &dyn Weighting,
        edge: &GraphEdge,
        direction: EdgeDirection,
        _time: Milliseconds,
    ) -> Milliseconds {
        weighting.min_edge_ms(edge, direction)
    }
}
