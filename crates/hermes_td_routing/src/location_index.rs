use rstar::primitives::GeomWithData;
use rstar::{RStarInsertionStrategy, RTree, RTreeParams};
use tracing::debug;

use crate::base_graph::BaseGraph;
use crate::edge_direction::EdgeDirection;
use crate::geopoint::GeoPoint;
use crate::graph::Graph;
use crate::snap::Snap;
use crate::types::NodeId;
use crate::weighting::Weighting;

/// Nodes are indexed on the unit sphere, where the straight-line distance
/// orders points like the great-circle distance does.
type LocationIndexObject = GeomWithData<[f64; 3], NodeId>;

struct LocationIndexTreeParams;

impl RTreeParams for LocationIndexTreeParams {
    type DefaultInsertionStrategy = RStarInsertionStrategy;

    const MAX_SIZE: usize = 64;
    const MIN_SIZE: usize = 28;
    const REINSERTION_COUNT: usize = 5;
}

fn unit_sphere_point(coordinates: &GeoPoint) -> [f64; 3] {
    let lat = coordinates.lat().to_radians();
    let lng = coordinates.lng().to_radians();
    [lat.cos() * lng.cos(), lat.cos() * lng.sin(), lat.sin()]
}

pub struct LocationIndex {
    tree: RTree<LocationIndexObject, LocationIndexTreeParams>,
}

impl LocationIndex {
    pub fn build_from_graph(graph: &BaseGraph) -> LocationIndex {
        let tree = RTree::bulk_load_with_params(
            (0..graph.node_count())
                .filter(|node| graph.node_edges_iter(*node).next().is_some())
                .map(|node| {
                    LocationIndexObject::new(unit_sphere_point(graph.node_geometry(node)), node)
                })
                .collect(),
        );

        debug!(nodes = tree.size(), "Built location index");

        LocationIndex { tree }
    }

    /// Closest node with an edge usable by `weighting`, at most
    /// `max_snap_distance` metres away. A distance of zero only accepts a
    /// node at exactly `coordinates`.
    pub fn snap(
        &self,
        graph: &BaseGraph,
        weighting: &dyn Weighting,
        coordinates: &GeoPoint,
        max_snap_distance: f64,
    ) -> Option<Snap> {
        let point = unit_sphere_point(coordinates);
        let is_routable = |node: NodeId| {
            graph.node_edges_iter(node).any(|edge_id| {
                let edge = graph.edge(edge_id);
                weighting.can_access_edge(edge, EdgeDirection::Forward)
                    || weighting.can_access_edge(edge, EdgeDirection::Backward)
            })
        };

        if max_snap_distance == 0.0 {
            return self
                .tree
                .locate_all_at_point(&point)
                .map(|object| object.data)
                .filter(|node| graph.node_geometry(*node) == coordinates)
                .find(|node| is_routable(*node))
                .map(|node| Snap::new(node, *coordinates, Default::default()));
        }

        self.tree
            .nearest_neighbor_iter(&point)
            .map(|object| {
                let node_coordinates = graph.node_geometry(object.data);
                (object.data, coordinates.haversine_distance(node_coordinates))
            })
            .take_while(|(_, distance)| distance.value() <= max_snap_distance)
            .find(|(node, _)| is_routable(*node))
            .map(|(node, distance)| Snap::new(node, *graph.node_geometry(node), distance))
    }
}
