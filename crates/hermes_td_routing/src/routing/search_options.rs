use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// A settled node is final. Requires a FIFO weighting.
    #[default]
    LabelSetting,
    /// A settled node is reopened whenever a strictly earlier arrival is
    /// found. Under a non-FIFO weighting every distinct arrival time at a
    /// node is expanded instead.
    LabelCorrecting,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeuristicKind {
    #[default]
    Beeline,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub strategy: SearchStrategy,
    pub heuristic: HeuristicKind,
    /// Abandons a query once this many nodes have been settled.
    pub max_visited_nodes: Option<usize>,
    /// Initial capacity of the per-direction heaps and label arenas.
    pub capacity_hint: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            strategy: SearchStrategy::default(),
            heuristic: HeuristicKind::default(),
            max_visited_nodes: None,
            capacity_hint: 20_000,
        }
    }
}

/// Shared flag to abandon running queries from another thread.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken(Arc<AtomicBool>);

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
