use tracing::{debug, warn};

use crate::distance::{Distance, Meters};
use crate::error::ConfigurationError;
use crate::geopoint::GeoPoint;
use crate::graph::Graph;
use crate::properties::property_map::EdgePropertyMap;
use crate::types::{EdgeId, NodeId};

/// Relative tolerance when comparing an edge length with the beeline
/// between its ends.
const BEELINE_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone)]
pub struct GraphEdge {
    id: EdgeId,
    start_node: NodeId,
    end_node: NodeId,
    distance: Distance<Meters>,
    pub properties: EdgePropertyMap,
}

impl GraphEdge {
    pub fn new(
        id: EdgeId,
        start_node: NodeId,
        end_node: NodeId,
        distance: Distance<Meters>,
        properties: EdgePropertyMap,
    ) -> Self {
        GraphEdge {
            id,
            start_node,
            end_node,
            distance,
            properties,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    pub fn distance(&self) -> Distance<Meters> {
        self.distance
    }

    pub fn start_node(&self) -> NodeId {
        self.start_node
    }

    pub fn end_node(&self) -> NodeId {
        self.end_node
    }

    pub fn adj_node(&self, node: NodeId) -> NodeId {
        if self.start_node == node {
            self.end_node
        } else {
            self.start_node
        }
    }

    pub fn properties(&self) -> &EdgePropertyMap {
        &self.properties
    }
}

/// Immutable road graph. Built once through [`BaseGraphBuilder`] and shared
/// read-only between queries.
#[derive(Debug, Default)]
pub struct BaseGraph {
    nodes: Vec<GeoPoint>,
    edges: Vec<GraphEdge>,
    adjacency_list: Vec<Vec<EdgeId>>,
    beeline_consistent: bool,
}

impl BaseGraph {
    pub fn builder() -> BaseGraphBuilder {
        BaseGraphBuilder::default()
    }
}

impl Graph for BaseGraph {
    type EdgeIterator<'a> = std::iter::Copied<std::slice::Iter<'a, EdgeId>>;

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn node_edges_iter(&self, node: NodeId) -> Self::EdgeIterator<'_> {
        self.adjacency_list[node].iter().copied()
    }

    fn edge(&self, edge: EdgeId) -> &GraphEdge {
        &self.edges[edge]
    }

    fn node_geometry(&self, node: NodeId) -> &GeoPoint {
        &self.nodes[node]
    }

    fn is_beeline_consistent(&self) -> bool {
        self.beeline_consistent
    }
}

/// Assembles a [`BaseGraph`]. Map ingestion lives outside of this crate and
/// feeds its nodes and road segments through here.
#[derive(Default)]
pub struct BaseGraphBuilder {
    nodes: Vec<GeoPoint>,
    edges: Vec<GraphEdge>,
}

impl BaseGraphBuilder {
    pub fn with_capacity(nodes: usize, edges: usize) -> Self {
        BaseGraphBuilder {
            nodes: Vec::with_capacity(nodes),
            edges: Vec::with_capacity(edges),
        }
    }

    pub fn add_node(&mut self, coordinates: GeoPoint) -> NodeId {
        self.nodes.push(coordinates);
        self.nodes.len() - 1
    }

    pub fn add_edge(
        &mut self,
        start_node: NodeId,
        end_node: NodeId,
        distance: Distance<Meters>,
        properties: EdgePropertyMap,
    ) -> Result<EdgeId, ConfigurationError> {
        let edge_id = self.edges.len();

        for node_id in [start_node, end_node] {
            if node_id >= self.nodes.len() {
                return Err(ConfigurationError::UnknownNode { edge_id, node_id });
            }
        }

        if distance < Distance::<Meters>::zero() {
            return Err(ConfigurationError::InvalidEdgeLength {
                edge_id,
                distance: distance.value(),
            });
        }

        self.edges.push(GraphEdge::new(
            edge_id, start_node, end_node, distance, properties,
        ));

        Ok(edge_id)
    }

    /// Adds an edge whose length is the great-circle distance between its
    /// end nodes.
    pub fn add_straight_edge(
        &mut self,
        start_node: NodeId,
        end_node: NodeId,
        properties: EdgePropertyMap,
    ) -> Result<EdgeId, ConfigurationError> {
        let distance = match (self.nodes.get(start_node), self.nodes.get(end_node)) {
            (Some(start), Some(end)) => start.haversine_distance(end),
            _ => Distance::zero(),
        };

        self.add_edge(start_node, end_node, distance, properties)
    }

    pub fn build(self) -> Result<BaseGraph, ConfigurationError> {
        if let Some(node_id) = self.nodes.iter().position(|node| !node.is_valid()) {
            return Err(ConfigurationError::InvalidCoordinates { node_id });
        }

        let mut adjacency_list: Vec<Vec<EdgeId>> = vec![Vec::new(); self.nodes.len()];
        let mut inconsistent_edges = 0;

        for edge in &self.edges {
            adjacency_list[edge.start_node].push(edge.id);
            if edge.end_node != edge.start_node {
                adjacency_list[edge.end_node].push(edge.id);
            }

            let beeline = self.nodes[edge.start_node].haversine_distance(&self.nodes[edge.end_node]);
            if edge.distance.value() < beeline.value() * (1.0 - BEELINE_TOLERANCE) {
                inconsistent_edges += 1;
            }
        }

        if inconsistent_edges > 0 {
            warn!(
                inconsistent_edges,
                "Some edges are shorter than the beeline between their nodes, beeline estimates are disabled"
            );
        }

        debug!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            "Built base graph"
        );

        Ok(BaseGraph {
            nodes: self.nodes,
            edges: self.edges,
            adjacency_list,
            beeline_consistent: inconsistent_edges == 0,
        })
    }
}
