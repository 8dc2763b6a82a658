use serde::{Deserialize, Serialize};

/// Orientation in which a stored edge is traversed: `Forward` goes from its
/// start node to its end node.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeDirection {
    Forward,
    Backward,
}

impl EdgeDirection {
    pub fn opposite(&self) -> Self {
        match self {
            EdgeDirection::Forward => EdgeDirection::Backward,
            EdgeDirection::Backward => EdgeDirection::Forward,
        }
    }
}
