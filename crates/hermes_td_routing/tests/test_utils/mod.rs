#![allow(dead_code)]

use std::{
    cmp::Reverse,
    collections::{BinaryHeap, HashSet},
};

use hermes_td_routing::{
    base_graph::BaseGraph,
    constants::MAX_DURATION,
    geopoint::GeoPoint,
    graph::Graph,
    properties::property_map::EdgePropertyMap,
    types::NodeId,
    weighting::{Milliseconds, Weighting},
};
use jiff::Timestamp;
use rand::{Rng, SeedableRng, rngs::SmallRng};

pub const ORIGIN: GeoPoint = GeoPoint {
    lat: 43.70,
    lng: 7.40,
};

/// 2024-03-04T00:00:00Z, a Monday.
pub const MONDAY_MS: Milliseconds = 1_709_510_400_000;

const SPEEDS: [f32; 5] = [20.0, 30.0, 50.0, 70.0, 90.0];

pub fn rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

pub fn timestamp(ms: Milliseconds) -> Timestamp {
    Timestamp::from_millisecond(ms as i64).unwrap()
}

//
//  Node ids of a 3x4 grid:
//
//   8 -- 9 -- 10 -- 11
//   |    |    |     |
//   4 -- 5 -- 6  -- 7
//   |    |    |     |
//   0 -- 1 -- 2  -- 3
//
// Every street gets a random speed, some are one-way and a few are closed
// to cars.
pub fn create_grid_graph(rows: usize, cols: usize, rng: &mut SmallRng) -> BaseGraph {
    let mut builder = BaseGraph::builder();

    for y in 0..rows {
        for x in 0..cols {
            // Slight jitter so that beeline estimates differ between nodes.
            let lat = ORIGIN.lat + y as f64 * 0.004 + rng.random_range(-0.0005..0.0005);
            let lng = ORIGIN.lng + x as f64 * 0.005 + rng.random_range(-0.0005..0.0005);
            builder.add_node(GeoPoint::new(lat, lng));
        }
    }

    for y in 0..rows {
        for x in 0..cols {
            let node = y * cols + x;
            if x + 1 < cols {
                builder
                    .add_straight_edge(node, node + 1, random_street(rng))
                    .unwrap();
            }
            if y + 1 < rows {
                builder
                    .add_straight_edge(node, node + cols, random_street(rng))
                    .unwrap();
            }
        }
    }

    builder.build().unwrap()
}

/// Grid of two-way streets all driven at `speed` km/h, laid out like
/// [`create_grid_graph`] without jitter.
pub fn create_uniform_grid_graph(rows: usize, cols: usize, speed: f32) -> BaseGraph {
    let mut builder = BaseGraph::builder();

    for y in 0..rows {
        for x in 0..cols {
            builder.add_node(GeoPoint::new(
                ORIGIN.lat + y as f64 * 0.004,
                ORIGIN.lng + x as f64 * 0.005,
            ));
        }
    }

    for y in 0..rows {
        for x in 0..cols {
            let node = y * cols + x;
            let street = EdgePropertyMap::car(Some(speed), Some(speed));
            if x + 1 < cols {
                builder
                    .add_straight_edge(node, node + 1, street.clone())
                    .unwrap();
            }
            if y + 1 < rows {
                builder.add_straight_edge(node, node + cols, street).unwrap();
            }
        }
    }

    builder.build().unwrap()
}

fn random_street(rng: &mut SmallRng) -> EdgePropertyMap {
    let speed = SPEEDS[rng.random_range(0..SPEEDS.len())];

    match rng.random_range(0..10) {
        0 => EdgePropertyMap::car(Some(speed), None),
        1 => EdgePropertyMap::car(None, Some(speed)),
        2 if rng.random_bool(0.3) => EdgePropertyMap::new(),
        _ => EdgePropertyMap::car(Some(speed), Some(speed)),
    }
}

/// Two grids side by side without any road between them.
pub fn create_disconnected_graph(rng: &mut SmallRng) -> (BaseGraph, NodeId, NodeId) {
    let mut builder = BaseGraph::builder();
    let mut add_square = |lng: f64| {
        let nodes: Vec<NodeId> = [(0.0, 0.0), (0.0, 0.004), (0.004, 0.004), (0.004, 0.0)]
            .iter()
            .map(|(lat, offset)| builder.add_node(GeoPoint::new(ORIGIN.lat + lat, lng + offset)))
            .collect();
        for (index, node) in nodes.iter().enumerate() {
            let speed = SPEEDS[rng.random_range(0..SPEEDS.len())];
            builder
                .add_straight_edge(
                    *node,
                    nodes[(index + 1) % nodes.len()],
                    EdgePropertyMap::car(Some(speed), Some(speed)),
                )
                .unwrap();
        }
        nodes[0]
    };

    let left = add_square(ORIGIN.lng);
    let right = add_square(ORIGIN.lng + 0.02);

    (builder.build().unwrap(), left, right)
}

/// Earliest arrival time at `end` found by a forward-only time-dependent
/// Dijkstra, as a duration from `departure`.
pub fn reference_travel_time(
    graph: &BaseGraph,
    weighting: &dyn Weighting,
    start: NodeId,
    end: NodeId,
    departure: Milliseconds,
) -> Option<Milliseconds> {
    let mut arrival = vec![MAX_DURATION; graph.node_count()];
    let mut heap = BinaryHeap::new();

    arrival[start] = departure;
    heap.push(Reverse((departure, start)));

    while let Some(Reverse((time, node))) = heap.pop() {
        if node == end {
            return Some(time - departure);
        }

        if time > arrival[node] {
            continue;
        }

        for edge_id in graph.node_edges_iter(node) {
            let edge = graph.edge(edge_id);
            let adj_node = edge.adj_node(node);
            let edge_ms =
                weighting.calc_edge_ms(edge, graph.edge_direction(edge_id, node), time);

            if edge_ms == MAX_DURATION {
                continue;
            }

            let adj_time = time + edge_ms;
            if adj_time < arrival[adj_node] {
                arrival[adj_node] = adj_time;
                heap.push(Reverse((adj_time, adj_node)));
            }
        }
    }

    None
}

/// Static lower bound of the travel time from every node to `end`.
fn lower_bounds_to(graph: &BaseGraph, weighting: &dyn Weighting, end: NodeId) -> Vec<Milliseconds> {
    let mut bounds = vec![MAX_DURATION; graph.node_count()];
    let mut heap = BinaryHeap::new();

    bounds[end] = 0;
    heap.push(Reverse((0, end)));

    while let Some(Reverse((bound, node))) = heap.pop() {
        if bound > bounds[node] {
            continue;
        }

        for edge_id in graph.node_edges_iter(node) {
            let edge = graph.edge(edge_id);
            let adj_node = edge.adj_node(node);
            let edge_ms = weighting.min_edge_ms(edge, graph.edge_direction(edge_id, adj_node));

            if edge_ms == MAX_DURATION {
                continue;
            }

            let adj_bound = bound + edge_ms;
            if adj_bound < bounds[adj_node] {
                bounds[adj_node] = adj_bound;
                heap.push(Reverse((adj_bound, adj_node)));
            }
        }
    }

    bounds
}

/// Earliest arrival at `end` over every walk, nodes and edges being driven
/// as often as needed. Stays exact when entering an edge later can make one
/// leave it earlier, unlike [`reference_travel_time`].
pub fn reference_walk_time(
    graph: &BaseGraph,
    weighting: &dyn Weighting,
    start: NodeId,
    end: NodeId,
    departure: Milliseconds,
) -> Option<Milliseconds> {
    // The earliest arrival per node is itself a walk.
    let limit = reference_travel_time(graph, weighting, start, end, departure)?;
    let bounds = lower_bounds_to(graph, weighting, end);
    let mut expanded = HashSet::new();
    let mut heap = BinaryHeap::new();

    heap.push(Reverse((0, start)));

    while let Some(Reverse((time, node))) = heap.pop() {
        if node == end {
            return Some(time);
        }

        if !expanded.insert((node, time)) {
            continue;
        }

        for edge_id in graph.node_edges_iter(node) {
            let edge = graph.edge(edge_id);
            let adj_node = edge.adj_node(node);
            let edge_ms = weighting.calc_edge_ms(
                edge,
                graph.edge_direction(edge_id, node),
                departure + time,
            );

            if edge_ms == MAX_DURATION {
                continue;
            }

            let adj_time = time + edge_ms;
            if adj_time.saturating_add(bounds[adj_node]) <= limit {
                heap.push(Reverse((adj_time, adj_node)));
            }
        }
    }

    None
}

/// Fastest path from `start` to `end` that visits no node twice, found by
/// enumerating them.
pub fn best_simple_path_time(
    graph: &BaseGraph,
    weighting: &dyn Weighting,
    start: NodeId,
    end: NodeId,
    departure: Milliseconds,
) -> Option<Milliseconds> {
    let mut paths = SimplePaths {
        graph,
        weighting,
        bounds: lower_bounds_to(graph, weighting, end),
        end,
        departure,
        on_path: vec![false; graph.node_count()],
        best: None,
    };

    paths.visit(start, 0);
    paths.best
}

struct SimplePaths<'a> {
    graph: &'a BaseGraph,
    weighting: &'a dyn Weighting,
    bounds: Vec<Milliseconds>,
    end: NodeId,
    departure: Milliseconds,
    on_path: Vec<bool>,
    best: Option<Milliseconds>,
}

impl SimplePaths<'_> {
    fn visit(&mut self, node: NodeId, time: Milliseconds) {
        if node == self.end {
            self.best = Some(self.best.map_or(time, |best| best.min(time)));
            return;
        }

        let graph = self.graph;
        self.on_path[node] = true;

        for edge_id in graph.node_edges_iter(node) {
            let edge = graph.edge(edge_id);
            let adj_node = edge.adj_node(node);
            if self.on_path[adj_node] {
                continue;
            }

            let edge_ms = self.weighting.calc_edge_ms(
                edge,
                graph.edge_direction(edge_id, node),
                self.departure + time,
            );
            if edge_ms == MAX_DURATION {
                continue;
            }

            let adj_time = time + edge_ms;
            let bound = adj_time.saturating_add(self.bounds[adj_node]);
            if self.best.is_some_and(|best| bound >= best) || bound == MAX_DURATION {
                continue;
            }

            self.visit(adj_node, adj_time);
        }

        self.on_path[node] = false;
    }
}

/// Random pairs of distinct nodes.
pub fn random_pairs(graph: &BaseGraph, count: usize, rng: &mut SmallRng) -> Vec<(NodeId, NodeId)> {
    (0..count)
        .map(|_| {
            let start = rng.random_range(0..graph.node_count());
            let mut end = rng.random_range(0..graph.node_count());
            while end == start {
                end = rng.random_range(0..graph.node_count());
            }
            (start, end)
        })
        .collect()
}
