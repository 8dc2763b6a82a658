use serde::Serialize;
use tracing::debug;

use crate::constants::MAX_DURATION;
use crate::error::{ConfigurationError, RequestError, RoutingError};
use crate::graph::Graph;
use crate::stopwatch::Stopwatch;
use crate::types::NodeId;
use crate::weighting::{Milliseconds, Weighting};

use super::astar_heuristic::AStarHeuristic;
use super::directional_search::DirectionalSearch;
use super::label::{Label, LabelArena, LabelId};
use super::search_direction::{Backward, Forward, SearchDirection, TraversalDirection};
use super::search_options::{CancellationToken, SearchOptions, SearchStrategy};

/// Time-dependent bidirectional A*.
///
/// The forward search runs from the origin with exact costs, entering every
/// edge at the time it is reached. The arrival time at the destination is
/// unknown, so the backward search runs with the static lower bounds of the
/// weighting. It provides candidate continuations, evaluated exactly from
/// the forward arrival time whenever the searches meet, and lower bounds
/// used to prune forward labels.
///
/// The query stops once the smallest forward key reaches the best known
/// arrival. For a time-invariant weighting both searches are exact and the
/// backward frontier may stop it as well.
///
/// A non-FIFO weighting requires [`SearchStrategy::LabelCorrecting`]. The
/// forward search then keeps every arrival time at a node, since a later
/// arrival may still continue into a faster period.
pub struct TdBidirectionalAStar<'a, G: Graph, H: AStarHeuristic> {
    graph: &'a G,
    weighting: &'a dyn Weighting,
    heuristic: H,
    options: SearchOptions,
    state: SearchState,

    // Per query
    start: NodeId,
    end: NodeId,
    departure: Milliseconds,
    best_time: Milliseconds,
    best_meeting: Option<Meeting>,
    meeting_candidates: usize,
}

/// Reusable heaps and label arenas of both directions.
#[derive(Debug)]
pub struct SearchState {
    forward: DirectionalSearch,
    backward: DirectionalSearch,
}

impl SearchState {
    pub fn with_capacity(capacity: usize) -> Self {
        SearchState {
            forward: DirectionalSearch::with_capacity(capacity),
            backward: DirectionalSearch::with_capacity(capacity),
        }
    }

    fn split(&mut self, dir: SearchDirection) -> (&mut DirectionalSearch, &mut DirectionalSearch) {
        match dir {
            SearchDirection::Forward => (&mut self.forward, &mut self.backward),
            SearchDirection::Backward => (&mut self.backward, &mut self.forward),
        }
    }
}

impl Default for SearchState {
    fn default() -> Self {
        Self::with_capacity(SearchOptions::default().capacity_hint)
    }
}

/// Node where the best forward label and a backward chain were joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Meeting {
    pub node: NodeId,
    pub forward_label: LabelId,
    pub backward_label: LabelId,
    pub departure: Milliseconds,
    pub arrival: Milliseconds,
}

impl Meeting {
    pub fn time(&self) -> Milliseconds {
        self.arrival - self.departure
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Meeting),
    NotFound,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SearchStatistics {
    pub forward_settled_nodes: usize,
    pub backward_settled_nodes: usize,
    pub reopened_nodes: usize,
    pub meeting_candidates: usize,
}

impl SearchStatistics {
    pub fn settled_nodes(&self) -> usize {
        self.forward_settled_nodes + self.backward_settled_nodes
    }
}

impl<'a, G: Graph, H: AStarHeuristic> TdBidirectionalAStar<'a, G, H> {
    pub fn new(
        graph: &'a G,
        weighting: &'a dyn Weighting,
        heuristic: H,
        options: SearchOptions,
    ) -> Result<Self, ConfigurationError> {
        let state = SearchState::with_capacity(options.capacity_hint);
        Self::with_state(graph, weighting, heuristic, options, state)
    }

    /// Reuses the allocations of a previous query.
    pub fn with_state(
        graph: &'a G,
        weighting: &'a dyn Weighting,
        heuristic: H,
        options: SearchOptions,
        state: SearchState,
    ) -> Result<Self, ConfigurationError> {
        if options.strategy == SearchStrategy::LabelSetting && !weighting.is_fifo() {
            return Err(ConfigurationError::NonFifoWeighting);
        }

        Ok(TdBidirectionalAStar {
            graph,
            weighting,
            heuristic,
            options,
            state,
            start: 0,
            end: 0,
            departure: 0,
            best_time: MAX_DURATION,
            best_meeting: None,
            meeting_candidates: 0,
        })
    }

    pub fn into_state(self) -> SearchState {
        self.state
    }

    pub fn forward_labels(&self) -> &LabelArena {
        self.state.forward.labels()
    }

    pub fn backward_labels(&self) -> &LabelArena {
        self.state.backward.labels()
    }

    pub fn statistics(&self) -> SearchStatistics {
        SearchStatistics {
            forward_settled_nodes: self.state.forward.settled_nodes(),
            backward_settled_nodes: self.state.backward.settled_nodes(),
            reopened_nodes: self.state.forward.reopened_nodes(),
            meeting_candidates: self.meeting_candidates,
        }
    }

    /// Earliest arrival at `end` leaving `start` at `departure` (ms since
    /// the Unix epoch).
    pub fn calc_path(
        &mut self,
        start: NodeId,
        end: NodeId,
        departure: Milliseconds,
        cancellation: &CancellationToken,
    ) -> Result<SearchOutcome, RoutingError> {
        let stopwatch = Stopwatch::new("td_bidirectional_astar/calc_path");

        for node in [start, end] {
            if node >= self.graph.node_count() {
                return Err(RequestError::InvalidNode(node).into());
            }
        }

        self.init(start, end, departure);

        loop {
            if cancellation.is_cancelled() {
                return Err(RoutingError::Cancelled);
            }

            let Some(forward_key) = self.state.forward.peek_key() else {
                break;
            };

            if forward_key >= self.best_time {
                break;
            }

            let backward_key = self.backward_key();
            if backward_key.is_none()
                && self.weighting.is_time_invariant()
                && self.best_meeting.is_some()
            {
                break;
            }

            if let Some(max_visited_nodes) = self.options.max_visited_nodes {
                if self.statistics().settled_nodes() >= max_visited_nodes {
                    return Err(RoutingError::VisitedNodesExceeded(max_visited_nodes));
                }
            }

            match backward_key {
                Some(backward_key) if backward_key < forward_key => {
                    self.expand::<Backward>()
                }
                _ => self.expand::<Forward>(),
            }
        }

        let statistics = self.statistics();
        debug!(
            forward_settled_nodes = statistics.forward_settled_nodes,
            backward_settled_nodes = statistics.backward_settled_nodes,
            reopened_nodes = statistics.reopened_nodes,
            meeting_candidates = statistics.meeting_candidates,
            found = self.best_meeting.is_some(),
            "Time-dependent search finished"
        );
        stopwatch.report();

        Ok(match self.best_meeting {
            Some(meeting) => SearchOutcome::Found(meeting),
            None => SearchOutcome::NotFound,
        })
    }

    fn init(&mut self, start: NodeId, end: NodeId, departure: Milliseconds) {
        self.start = start;
        self.end = end;
        self.departure = departure;
        self.best_time = MAX_DURATION;
        self.best_meeting = None;
        self.meeting_candidates = 0;

        let keep_every_arrival = self.options.strategy == SearchStrategy::LabelCorrecting
            && !self.weighting.is_fifo();

        let key = self.heuristic.estimate(self.graph, start, end);
        self.state.forward.init(start, key, keep_every_arrival);
        self.state.backward.init(end, key, false);
    }

    /// Smallest key of the backward frontier while it can still improve the
    /// result. Once it cannot, the backward search is deactivated.
    fn backward_key(&mut self) -> Option<Milliseconds> {
        if !self.state.backward.is_active() {
            return None;
        }

        match self.state.backward.peek_key() {
            Some(key) if key < self.best_time => Some(key),
            _ => {
                debug!(
                    settled_nodes = self.state.backward.settled_nodes(),
                    "Backward search stopped"
                );
                self.state.backward.deactivate();
                None
            }
        }
    }

    fn expand<D: TraversalDirection>(&mut self) {
        let is_forward = D::DIRECTION == SearchDirection::Forward;
        let reopen_settled =
            is_forward && self.options.strategy == SearchStrategy::LabelCorrecting;

        let (search, opposite) = self.state.split(D::DIRECTION);
        let Some(label_id) = search.settle_next() else {
            return;
        };
        let label = *search.label(label_id);
        let node = label.node;
        let opposite_labels = opposite.labels_at(node).to_vec();

        for opposite_label in opposite_labels {
            let (forward_label, backward_label) = if is_forward {
                (label_id, opposite_label)
            } else {
                (opposite_label, label_id)
            };
            self.update_meeting(node, forward_label, backward_label);
        }

        if is_forward && self.is_pruned(node, label.time) {
            return;
        }

        let entry_time = if is_forward {
            self.departure.saturating_add(label.time)
        } else {
            0
        };

        let (search, _) = self.state.split(D::DIRECTION);
        for edge_id in self.graph.node_edges_iter(node) {
            let edge = self.graph.edge(edge_id);
            let adj_node = edge.adj_node(node);

            if adj_node == node {
                continue;
            }

            let direction = D::path_direction(self.graph, edge_id, node);
            let edge_ms = D::edge_ms(self.weighting, edge, direction, entry_time);

            if edge_ms == MAX_DURATION {
                continue;
            }

            let time = label.time.saturating_add(edge_ms);
            let estimate = if is_forward {
                self.heuristic.estimate(self.graph, adj_node, self.end)
            } else {
                self.heuristic.estimate(self.graph, self.start, adj_node)
            };
            let key = time.saturating_add(estimate);

            if key >= self.best_time {
                continue;
            }

            search.relax(
                adj_node,
                time,
                key,
                Label::step(adj_node, label_id, edge_id, direction, label.hops + 1),
                reopen_settled,
            );
        }
    }

    /// Whether no path through the forward label at `node` can beat the
    /// best known arrival.
    fn is_pruned(&self, node: NodeId, time: Milliseconds) -> bool {
        let backward = &self.state.backward;

        match backward.node(node) {
            Some(data) if data.settled => time.saturating_add(data.time) >= self.best_time,
            // Every node left unsettled by a deactivated backward search is at
            // least the best time away from the origin.
            _ => !backward.is_active(),
        }
    }

    fn update_meeting(&mut self, node: NodeId, forward_label: LabelId, backward_label: LabelId) {
        let forward_time = self.state.forward.label(forward_label).time;
        let lower_bound = self.state.backward.label(backward_label).time;

        if forward_time.saturating_add(lower_bound) >= self.best_time {
            return;
        }

        self.meeting_candidates += 1;

        let Some(arrival) = self.follow_backward_chain(
            self.departure.saturating_add(forward_time),
            backward_label,
        ) else {
            return;
        };

        let time = arrival - self.departure;
        if time < self.best_time {
            self.best_time = time;
            self.best_meeting = Some(Meeting {
                node,
                forward_label,
                backward_label,
                departure: self.departure,
                arrival,
            });
        }
    }

    /// Exact arrival at the destination when driving the backward chain of
    /// `backward_label` from `entry_time`.
    fn follow_backward_chain(
        &self,
        entry_time: Milliseconds,
        backward_label: LabelId,
    ) -> Option<Milliseconds> {
        let mut time = entry_time;

        for label in self
            .state
            .backward
            .labels()
            .chain(backward_label)
            .take_while(|label| !label.is_root())
        {
            let edge = self.graph.edge(label.edge_id);
            let edge_ms = self.weighting.calc_edge_ms(edge, label.direction, time);

            if edge_ms == MAX_DURATION {
                return None;
            }

            time = time.saturating_add(edge_ms);
        }

        Some(time)
    }
}
