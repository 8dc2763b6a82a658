use crate::{
    base_graph::GraphEdge,
    edge_direction::EdgeDirection,
    geopoint::GeoPoint,
    types::{EdgeId, NodeId},
};

/// Read-only access to a road graph. Every edge is listed in the adjacency
/// of both its end nodes; whether it can be used leaving or entering a node
/// is decided by the weighting from the traversal direction.
pub trait Graph {
    type EdgeIterator<'a>: Iterator<Item = EdgeId>
    where
        Self: 'a;

    fn node_count(&self) -> usize;

    fn edge_count(&self) -> usize;

    fn node_edges_iter(&self, node: NodeId) -> Self::EdgeIterator<'_>;

    fn edge(&self, edge: EdgeId) -> &GraphEdge;

    fn node_geometry(&self, node: NodeId) -> &GeoPoint;

    /// Direction in which `edge_id` is traversed when leaving `start`.
    ///
    /// Panics if `start` is not an end of the edge.
    fn edge_direction(&self, edge_id: EdgeId, start: NodeId) -> EdgeDirection {
        let edge = self.edge(edge_id);

        if edge.start_node() == start {
            return EdgeDirection::Forward;
        }

        if edge.end_node() == start {
            return EdgeDirection::Backward;
        }

        panic!(
            "Node {} is neither the start nor the end of edge {}",
            start, edge_id
        )
    }

    /// Whether the great-circle distance between the ends of every edge is
    /// at most its length, which makes beeline estimates admissible.
    fn is_beeline_consistent(&self) -> bool;
}
