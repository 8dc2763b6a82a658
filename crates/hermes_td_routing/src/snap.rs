use crate::{
    distance::{Distance, Meters},
    geopoint::GeoPoint,
    types::NodeId,
};

/// Graph node a coordinate was resolved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snap {
    pub node_id: NodeId,
    pub coordinates: GeoPoint,
    distance: Distance<Meters>,
}

impl Snap {
    pub fn new(node_id: NodeId, coordinates: GeoPoint, distance: Distance<Meters>) -> Self {
        Snap {
            node_id,
            coordinates,
            distance,
        }
    }

    /// Distance between the requested coordinate and the node.
    pub fn distance(&self) -> Distance<Meters> {
        self.distance
    }
}
