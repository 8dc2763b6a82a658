use serde::{Deserialize, Serialize};
use tracing::info;

use crate::base_graph::{BaseGraph, BaseGraphBuilder};
use crate::distance::{Distance, Meters};
use crate::edge_direction::EdgeDirection;
use crate::error::ConfigurationError;
use crate::geopoint::GeoPoint;
use crate::graph::Graph;
use crate::properties::{property::Property, property_map::EdgePropertyMap};
use crate::types::NodeId;

/// Road network export. Nodes are referenced by their position in `nodes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename = "Graph")]
pub struct JsonGraph {
    pub nodes: Vec<GeoPoint>,
    pub edges: Vec<JsonEdge>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename = "Edge")]
pub struct JsonEdge {
    pub start: NodeId,
    pub end: NodeId,
    /// Metres. Defaults to the great-circle distance between the ends.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<f64>,
    /// Average car speed in km/h from `start` to `end`, absent when cars
    /// cannot drive that way.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_speed: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backward_speed: Option<f32>,
    /// Legal speed limit in km/h, both directions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_speed: Option<f32>,
}

impl JsonEdge {
    fn properties(&self) -> EdgePropertyMap {
        let mut properties = EdgePropertyMap::car(self.forward_speed, self.backward_speed);

        if let Some(max_speed) = self.max_speed {
            for direction in [EdgeDirection::Forward, EdgeDirection::Backward] {
                properties.insert_f32(Property::MaxSpeed, direction, max_speed);
            }
        }

        properties
    }
}

impl JsonGraph {
    pub fn build_graph(self) -> Result<BaseGraph, ConfigurationError> {
        let mut builder = BaseGraphBuilder::with_capacity(self.nodes.len(), self.edges.len());

        for node in self.nodes {
            builder.add_node(node);
        }

        for edge in &self.edges {
            let properties = edge.properties();
            match edge.distance {
                Some(distance) => builder.add_edge(
                    edge.start,
                    edge.end,
                    Distance::<Meters>::from(distance),
                    properties,
                )?,
                None => builder.add_straight_edge(edge.start, edge.end, properties)?,
            };
        }

        let graph = builder.build()?;
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Imported graph"
        );

        Ok(graph)
    }
}
