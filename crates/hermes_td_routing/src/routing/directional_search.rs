use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use fxhash::{FxBuildHasher, FxHashMap};

use crate::types::NodeId;
use crate::weighting::Milliseconds;

use super::label::{Label, LabelArena, LabelId};

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub(crate) struct HeapItem {
    /// Time from the root plus the estimate of the remaining time.
    pub key: Milliseconds,
    pub hops: u32,
    pub node_id: NodeId,
    pub label: LabelId,
}

impl PartialOrd for HeapItem {
    fn partial_cmp(&self, other: &HeapItem) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeapItem {
    fn cmp(&self, other: &Self) -> Ordering {
        // Flip to make this a min-heap
        other
            .key
            .cmp(&self.key)
            .then_with(|| other.hops.cmp(&self.hops))
            .then_with(|| other.node_id.cmp(&self.node_id))
            .then_with(|| other.label.cmp(&self.label))
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct NodeData {
    pub label: LabelId,
    pub time: Milliseconds,
    pub hops: u32,
    pub settled: bool,
}

/// Frontier and search tree of one direction of the bidirectional search.
///
/// By default a node keeps only its earliest label. When arrivals are not
/// comparable, as under a non-FIFO weighting, every label with a distinct
/// arrival time is kept and expanded on its own.
#[derive(Debug)]
pub(crate) struct DirectionalSearch {
    heap: BinaryHeap<HeapItem>,
    labels: LabelArena,
    node_data: FxHashMap<NodeId, NodeData>,
    node_labels: FxHashMap<NodeId, Vec<LabelId>>,
    keep_every_arrival: bool,
    active: bool,
    settled_nodes: usize,
    reopened_nodes: usize,
}

impl DirectionalSearch {
    pub fn with_capacity(capacity: usize) -> Self {
        DirectionalSearch {
            heap: BinaryHeap::with_capacity(capacity),
            labels: LabelArena::with_capacity(capacity),
            node_data: HashMap::with_capacity_and_hasher(capacity, FxBuildHasher::default()),
            node_labels: FxHashMap::default(),
            keep_every_arrival: false,
            active: true,
            settled_nodes: 0,
            reopened_nodes: 0,
        }
    }

    pub fn reset(&mut self) {
        self.heap.clear();
        self.labels.clear();
        self.node_data.clear();
        self.node_labels.clear();
        self.active = true;
        self.settled_nodes = 0;
        self.reopened_nodes = 0;
    }

    pub fn init(&mut self, root: NodeId, key: Milliseconds, keep_every_arrival: bool) {
        self.reset();
        self.keep_every_arrival = keep_every_arrival;
        self.relax(root, 0, key, Label::root(root), false);
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Smallest pending key, skipping entries superseded by a better label.
    pub fn peek_key(&mut self) -> Option<Milliseconds> {
        while let Some(item) = self.heap.peek() {
            if self.is_current(item) {
                return Some(item.key);
            }
            self.heap.pop();
        }

        None
    }

    /// Pops the next label to expand and settles its node.
    pub fn settle_next(&mut self) -> Option<LabelId> {
        while let Some(item) = self.heap.pop() {
            if !self.is_current(&item) {
                continue;
            }

            if let Some(data) = self.node_data.get_mut(&item.node_id) {
                data.settled = true;
            }
            self.settled_nodes += 1;

            return Some(item.label);
        }

        None
    }

    fn is_current(&self, item: &HeapItem) -> bool {
        if self.keep_every_arrival {
            return true;
        }

        self.node_data
            .get(&item.node_id)
            .is_some_and(|data| !data.settled && data.label == item.label)
    }

    /// Records `label` if it is better than the best one known at its node.
    /// Equal times are broken by the number of hops. Settled nodes are only
    /// reopened when `reopen_settled` is set and the time strictly improves.
    ///
    /// When every arrival is kept, `label` is only rejected if another label
    /// reaches the node at the same time.
    pub fn relax(
        &mut self,
        node: NodeId,
        time: Milliseconds,
        key: Milliseconds,
        label: Label,
        reopen_settled: bool,
    ) -> bool {
        if self.keep_every_arrival {
            return self.add_arrival(node, time, key, label);
        }

        if let Some(data) = self.node_data.get(&node) {
            if data.settled {
                if !reopen_settled || time >= data.time {
                    return false;
                }
                self.reopened_nodes += 1;
            } else if time > data.time || (time == data.time && label.hops >= data.hops) {
                return false;
            }
        }

        let hops = label.hops;
        let label = self.labels.push(Label { time, ..label });
        self.node_data.insert(
            node,
            NodeData {
                label,
                time,
                hops,
                settled: false,
            },
        );
        self.heap.push(HeapItem {
            key,
            hops,
            node_id: node,
            label,
        });

        true
    }

    fn add_arrival(
        &mut self,
        node: NodeId,
        time: Milliseconds,
        key: Milliseconds,
        label: Label,
    ) -> bool {
        let arena = &self.labels;
        let known = self.node_labels.entry(node).or_default();

        if known.iter().any(|id| arena.get(*id).time == time) {
            return false;
        }

        if !known.is_empty() {
            self.reopened_nodes += 1;
        }

        let hops = label.hops;
        let label = self.labels.push(Label { time, ..label });
        known.push(label);

        let earliest = self
            .node_data
            .get(&node)
            .is_none_or(|data| time < data.time);
        if earliest {
            self.node_data.insert(
                node,
                NodeData {
                    label,
                    time,
                    hops,
                    settled: false,
                },
            );
        }

        self.heap.push(HeapItem {
            key,
            hops,
            node_id: node,
            label,
        });

        true
    }

    pub fn node(&self, node: NodeId) -> Option<&NodeData> {
        self.node_data.get(&node)
    }

    /// Labels of `node` that may still lead to a better route.
    pub fn labels_at(&self, node: NodeId) -> &[LabelId] {
        if self.keep_every_arrival {
            return self.node_labels.get(&node).map_or(&[][..], Vec::as_slice);
        }

        self.node_data
            .get(&node)
            .map_or(&[][..], |data| std::slice::from_ref(&data.label))
    }

    pub fn labels(&self) -> &LabelArena {
        &self.labels
    }

    pub fn label(&self, id: LabelId) -> &Label {
        self.labels.get(id)
    }

    pub fn settled_nodes(&self) -> usize {
        self.settled_nodes
    }

    pub fn reopened_nodes(&self) -> usize {
        self.reopened_nodes
    }
}
