use crate::constants::MAX_DURATION;
use crate::edge_direction::EdgeDirection;
use crate::error::InternalError;
use crate::graph::Graph;
use crate::types::{EdgeId, NodeId};
use crate::weighting::Weighting;

use super::label::LabelArena;
use super::routing_path::{PathSegment, RoutingPath};
use super::td_bidirectional_astar::Meeting;

/// Joins the two search trees at a meeting node and replays the weighting
/// along the resulting edges.
pub struct RoutingPathBuilder<'a, G: Graph> {
    graph: &'a G,
    weighting: &'a dyn Weighting,
}

impl<'a, G: Graph> RoutingPathBuilder<'a, G> {
    pub fn new(graph: &'a G, weighting: &'a dyn Weighting) -> Self {
        RoutingPathBuilder { graph, weighting }
    }

    pub fn build(
        &self,
        start: NodeId,
        end: NodeId,
        forward_labels: &LabelArena,
        backward_labels: &LabelArena,
        meeting: &Meeting,
    ) -> Result<RoutingPath, InternalError> {
        let mut edges: Vec<(EdgeId, EdgeDirection)> = forward_labels
            .chain(meeting.forward_label)
            .take_while(|label| !label.is_root())
            .map(|label| (label.edge_id, label.direction))
            .collect();
        edges.reverse();

        edges.extend(
            backward_labels
                .chain(meeting.backward_label)
                .take_while(|label| !label.is_root())
                .map(|label| (label.edge_id, label.direction)),
        );

        if edges.is_empty() && start != end {
            return Err(InternalError::EmptyPath);
        }

        let mut segments = Vec::with_capacity(edges.len());
        let mut node = start;
        let mut time = meeting.departure;

        for (edge_id, direction) in edges {
            let edge = self.graph.edge(edge_id);
            let (from, to) = match direction {
                EdgeDirection::Forward => (edge.start_node(), edge.end_node()),
                EdgeDirection::Backward => (edge.end_node(), edge.start_node()),
            };

            if from != node {
                return Err(InternalError::DisconnectedPath {
                    edge_id,
                    node_id: node,
                });
            }

            let edge_ms = self.weighting.calc_edge_ms(edge, direction, time);
            if edge_ms == MAX_DURATION {
                return Err(InternalError::InaccessibleEdge { edge_id, time });
            }

            segments.push(PathSegment {
                edge_id,
                direction,
                distance: edge.distance(),
                entry_time: time,
                exit_time: time + edge_ms,
            });

            node = to;
            time += edge_ms;
        }

        if node != end {
            return Err(InternalError::DisconnectedPath {
                edge_id: segments.last().map_or(usize::MAX, |segment| segment.edge_id),
                node_id: node,
            });
        }

        let path = RoutingPath::new(segments, meeting.departure);

        debug_assert_eq!(
            path.time(),
            meeting.time(),
            "extracted path time differs from the search result"
        );
        if path.time() != meeting.time() {
            return Err(InternalError::TimeMismatch {
                search: meeting.time(),
                path: path.time(),
            });
        }

        Ok(path)
    }
}
