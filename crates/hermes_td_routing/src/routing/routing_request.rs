use std::collections::BTreeMap;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::geopoint::GeoPoint;
use crate::weighting::Milliseconds;

use super::path_details::{PathDetailKind, PathDetailRun};
use super::routing_path::{PathSegment, RoutingPath};

fn default_profile() -> String {
    String::from("car")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingRequest {
    pub start: GeoPoint,
    pub end: GeoPoint,
    #[serde(default = "default_profile")]
    pub profile: String,
    /// Defaults to the reference departure of the router.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure: Option<Timestamp>,
    #[serde(default)]
    pub details: Vec<String>,
}

impl RoutingRequest {
    pub fn new(start: GeoPoint, end: GeoPoint) -> Self {
        RoutingRequest {
            start,
            end,
            profile: default_profile(),
            departure: None,
            details: Vec::new(),
        }
    }

    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = profile.into();
        self
    }

    pub fn with_departure(mut self, departure: Timestamp) -> Self {
        self.departure = Some(departure);
        self
    }

    pub fn with_details<S: Into<String>>(mut self, details: impl IntoIterator<Item = S>) -> Self {
        self.details = details.into_iter().map(Into::into).collect();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteResponse {
    /// Metres.
    pub distance: f64,
    pub time: Milliseconds,
    /// Milliseconds since the Unix epoch.
    pub departure: Milliseconds,
    pub arrival: Milliseconds,
    pub edges: Vec<PathSegment>,
    pub details: BTreeMap<String, Vec<PathDetailRun>>,
}

impl RouteResponse {
    pub fn new(path: &RoutingPath, details: BTreeMap<PathDetailKind, Vec<PathDetailRun>>) -> Self {
        RouteResponse {
            distance: path.distance().value(),
            time: path.time(),
            departure: path.departure(),
            arrival: path.arrival(),
            edges: path.segments().to_vec(),
            details: details
                .into_iter()
                .map(|(kind, runs)| (kind.name().to_string(), runs))
                .collect(),
        }
    }
}

/// No path is an answer, not an error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RouteResult {
    Found(RouteResponse),
    NotFound,
}

impl RouteResult {
    pub fn found(self) -> Option<RouteResponse> {
        match self {
            RouteResult::Found(response) => Some(response),
            RouteResult::NotFound => None,
        }
    }
}
