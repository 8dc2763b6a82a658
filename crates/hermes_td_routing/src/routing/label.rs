use crate::constants::INVALID_EDGE;
use crate::define_index_newtype;
use crate::edge_direction::EdgeDirection;
use crate::types::{EdgeId, NodeId};
use crate::weighting::Milliseconds;

define_index_newtype!(LabelId, Label);

/// Parent of a search root.
pub const INVALID_LABEL: LabelId = LabelId::INVALID;

/// One step of a search tree. Labels are never mutated once pushed: a better
/// arrival at a node creates a new label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Label {
    pub node: NodeId,
    /// Milliseconds from the root of the search to `node`.
    pub time: Milliseconds,
    pub parent: LabelId,
    /// Edge between `node` and the parent node.
    pub edge_id: EdgeId,
    /// Direction in which `edge_id` is driven from origin to destination.
    pub direction: EdgeDirection,
    pub hops: u32,
}

impl Label {
    pub(crate) fn root(node: NodeId) -> Self {
        Label {
            node,
            time: 0,
            parent: INVALID_LABEL,
            edge_id: INVALID_EDGE,
            direction: EdgeDirection::Forward,
            hops: 0,
        }
    }

    /// Label reached from `parent` through `edge_id`. Its time is set when
    /// it is recorded.
    pub(crate) fn step(
        node: NodeId,
        parent: LabelId,
        edge_id: EdgeId,
        direction: EdgeDirection,
        hops: u32,
    ) -> Self {
        Label {
            node,
            time: 0,
            parent,
            edge_id,
            direction,
            hops,
        }
    }

    pub fn is_root(&self) -> bool {
        !self.parent.is_valid()
    }
}

#[derive(Debug, Default)]
pub struct LabelArena {
    labels: Vec<Label>,
}

impl LabelArena {
    pub fn with_capacity(capacity: usize) -> Self {
        LabelArena {
            labels: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, label: Label) -> LabelId {
        self.labels.push(label);
        LabelId::new(self.labels.len() - 1)
    }

    pub fn get(&self, id: LabelId) -> &Label {
        &self.labels[id]
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }

    /// Labels from `id` up to and including the root of its tree.
    pub fn chain(&self, id: LabelId) -> LabelChain<'_> {
        LabelChain {
            arena: self,
            current: id,
        }
    }
}

pub struct LabelChain<'a> {
    arena: &'a LabelArena,
    current: LabelId,
}

impl<'a> Iterator for LabelChain<'a> {
    type Item = &'a Label;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.current.is_valid() {
            return None;
        }

        let label = self.arena.get(self.current);
        self.current = label.parent;
        Some(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(node: NodeId, parent: LabelId) -> Label {
        match parent.is_valid() {
            true => Label::step(node, parent, 0, EdgeDirection::Forward, 1),
            false => Label::root(node),
        }
    }

    #[test]
    fn chain_walks_to_the_root() {
        let mut arena = LabelArena::with_capacity(4);
        let root = arena.push(label(3, INVALID_LABEL));
        let middle = arena.push(label(5, root));
        let _sibling = arena.push(label(9, root));
        let leaf = arena.push(label(7, middle));

        let nodes: Vec<NodeId> = arena.chain(leaf).map(|label| label.node).collect();

        assert_eq!(nodes, vec![7, 5, 3]);
        assert!(arena.get(root).is_root());
    }

    #[test]
    fn clear_keeps_nothing() {
        let mut arena = LabelArena::default();
        arena.push(label(1, INVALID_LABEL));
        arena.clear();

        assert!(arena.is_empty());
        assert_eq!(arena.chain(INVALID_LABEL).count(), 0);
    }
}
