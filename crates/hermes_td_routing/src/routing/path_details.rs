use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RequestError;

use super::routing_path::{PathSegment, RoutingPath};

/// Per-edge attribute that can be reported along a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathDetailKind {
    /// Travel time of the edge in milliseconds.
    Time,
    EdgeId,
    /// Length of the edge in metres.
    Distance,
}

impl PathDetailKind {
    pub const ALL: [PathDetailKind; 3] = [
        PathDetailKind::Time,
        PathDetailKind::EdgeId,
        PathDetailKind::Distance,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PathDetailKind::Time => "time",
            PathDetailKind::EdgeId => "edge_id",
            PathDetailKind::Distance => "distance",
        }
    }

    fn value(&self, segment: &PathSegment) -> PathDetailValue {
        match self {
            PathDetailKind::Time => PathDetailValue::Integer(segment.time()),
            PathDetailKind::EdgeId => PathDetailValue::Integer(segment.edge_id as u64),
            PathDetailKind::Distance => PathDetailValue::Float(segment.distance.value()),
        }
    }
}

impl fmt::Display for PathDetailKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PathDetailKind {
    type Err = RequestError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        PathDetailKind::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .ok_or_else(|| RequestError::UnknownPathDetail(name.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathDetailValue {
    Integer(u64),
    Float(f64),
}

impl PathDetailValue {
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            PathDetailValue::Integer(value) => Some(*value),
            PathDetailValue::Float(_) => None,
        }
    }

    pub fn as_f64(&self) -> f64 {
        match self {
            PathDetailValue::Integer(value) => *value as f64,
            PathDetailValue::Float(value) => *value,
        }
    }
}

/// Consecutive edges `first..=last` sharing `value`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PathDetailRun {
    pub first: usize,
    pub last: usize,
    pub value: PathDetailValue,
}

impl PathDetailRun {
    pub fn edge_count(&self) -> usize {
        self.last - self.first + 1
    }
}

pub fn parse_path_details<S: AsRef<str>>(
    names: &[S],
) -> Result<Vec<PathDetailKind>, RequestError> {
    let mut kinds = Vec::with_capacity(names.len());

    for name in names {
        let kind = name.as_ref().parse()?;
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }

    Ok(kinds)
}

/// Runs of the requested details along `path`.
///
/// Edges are merged into the current run only when every requested detail
/// keeps its value, so the i-th run of each detail covers the same edges.
pub fn build_path_details(
    path: &RoutingPath,
    kinds: &[PathDetailKind],
) -> BTreeMap<PathDetailKind, Vec<PathDetailRun>> {
    let mut details: BTreeMap<PathDetailKind, Vec<PathDetailRun>> =
        kinds.iter().map(|kind| (*kind, Vec::new())).collect();

    if details.is_empty() {
        return details;
    }

    let mut previous: Option<Vec<PathDetailValue>> = None;

    for (index, segment) in path.segments().iter().enumerate() {
        let values: Vec<PathDetailValue> = kinds.iter().map(|kind| kind.value(segment)).collect();

        if previous.as_ref() == Some(&values) {
            for kind in kinds {
                if let Some(run) = details.get_mut(kind).and_then(|runs| runs.last_mut()) {
                    run.last = index;
                }
            }
        } else {
            for (kind, value) in kinds.iter().zip(&values) {
                if let Some(runs) = details.get_mut(kind) {
                    runs.push(PathDetailRun {
                        first: index,
                        last: index,
                        value: *value,
                    });
                }
            }
            previous = Some(values);
        }
    }

    details
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{edge_direction::EdgeDirection, meters, types::EdgeId};

    fn path(edges: &[(EdgeId, u64)]) -> RoutingPath {
        let mut time = 0;
        let segments = edges
            .iter()
            .map(|&(edge_id, edge_ms)| {
                let segment = PathSegment {
                    edge_id,
                    direction: EdgeDirection::Forward,
                    distance: meters!(100),
                    entry_time: time,
                    exit_time: time + edge_ms,
                };
                time += edge_ms;
                segment
            })
            .collect();

        RoutingPath::new(segments, 0)
    }

    fn spans(runs: &[PathDetailRun]) -> Vec<(usize, usize)> {
        runs.iter().map(|run| (run.first, run.last)).collect()
    }

    #[test]
    fn parses_known_names() {
        assert_eq!(
            parse_path_details(&["time", "edge_id", "time"]),
            Ok(vec![PathDetailKind::Time, PathDetailKind::EdgeId])
        );
        assert_eq!(
            parse_path_details(&["speed"]),
            Err(RequestError::UnknownPathDetail("speed".to_string()))
        );
    }

    #[test]
    fn single_detail_merges_equal_values() {
        let path = path(&[(4, 10), (5, 10), (6, 20), (7, 20), (8, 10)]);
        let details = build_path_details(&path, &[PathDetailKind::Time]);

        assert_eq!(
            spans(&details[&PathDetailKind::Time]),
            vec![(0, 1), (2, 3), (4, 4)]
        );
    }

    #[test]
    fn requested_details_stay_aligned() {
        // Alone, time would merge edges 0-1 and distance all edges.
        let path = path(&[(4, 10), (5, 10), (6, 20), (7, 20)]);
        let details = build_path_details(
            &path,
            &[
                PathDetailKind::Time,
                PathDetailKind::EdgeId,
                PathDetailKind::Distance,
            ],
        );

        let time = spans(&details[&PathDetailKind::Time]);
        assert_eq!(time, vec![(0, 0), (1, 1), (2, 2), (3, 3)]);
        assert_eq!(spans(&details[&PathDetailKind::EdgeId]), time);
        assert_eq!(spans(&details[&PathDetailKind::Distance]), time);
    }

    #[test]
    fn runs_sum_to_the_path_time() {
        let path = path(&[(4, 10), (4, 10), (6, 25), (7, 5)]);
        let details = build_path_details(&path, &[PathDetailKind::Time, PathDetailKind::Distance]);

        let total: u64 = details[&PathDetailKind::Time]
            .iter()
            .map(|run| run.value.as_u64().unwrap() * run.edge_count() as u64)
            .sum();

        assert_eq!(total, path.time());
        assert_eq!(details[&PathDetailKind::Time].len(), 3);
    }

    #[test]
    fn empty_path_has_empty_details() {
        let path = path(&[]);
        let details = build_path_details(&path, &[PathDetailKind::EdgeId]);

        assert!(details[&PathDetailKind::EdgeId].is_empty());
    }
}
