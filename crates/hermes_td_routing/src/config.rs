use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::routing::search_options::SearchOptions;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Metres between a requested coordinate and the node it resolves to.
    /// Zero only accepts nodes at exactly the requested coordinate.
    pub max_snap_distance: f64,
    /// Departure of requests that do not set one.
    pub reference_departure: Timestamp,
    pub search: SearchOptions,
}

impl Default for RouterConfig {
    fn default() -> Self {
        RouterConfig {
            max_snap_distance: 1_000.0,
            reference_departure: Timestamp::UNIX_EPOCH,
            search: SearchOptions::default(),
        }
    }
}

impl RouterConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if !self.max_snap_distance.is_finite() || self.max_snap_distance < 0.0 {
            return Err(ConfigurationError::InvalidSnapDistance(
                self.max_snap_distance,
            ));
        }

        Ok(())
    }
}
