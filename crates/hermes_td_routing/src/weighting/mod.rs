mod car_weighting;
mod speed_profile;
mod time_dependent_weighting;

pub use car_weighting::CarWeighting;
pub use speed_profile::{SpeedBreakpoint, SpeedProfile};
pub use time_dependent_weighting::{TimeDependentCarWeighting, TravelTimeModel};

use crate::base_graph::GraphEdge;
use crate::constants::MAX_DURATION;
use crate::edge_direction::EdgeDirection;
use crate::error::ConfigurationError;

/// Absolute times are milliseconds since the Unix epoch, durations are
/// plain milliseconds.
pub type Milliseconds = u64;

/// Cost model of a routing profile.
///
/// Implementations must be causal: the traversal time only depends on the
/// static attributes of the edge and on the entry time. An edge that cannot
/// be traversed in a direction returns [`MAX_DURATION`].
pub trait Weighting: Send + Sync {
    /// Time needed to traverse `edge` in `direction` when entering it at
    /// `entry_time`.
    fn calc_edge_ms(
        &self,
        edge: &GraphEdge,
        direction: EdgeDirection,
        entry_time: Milliseconds,
    ) -> Milliseconds;

    /// Lower bound of [`Weighting::calc_edge_ms`] over every entry time.
    fn min_edge_ms(&self, edge: &GraphEdge, direction: EdgeDirection) -> Milliseconds;

    /// Upper bound of every speed this weighting produces, in km/h.
    fn max_speed(&self) -> f64;

    /// Whether `calc_edge_ms` ignores the entry time.
    fn is_time_invariant(&self) -> bool {
        false
    }

    /// Whether entering an edge later never makes one leave it earlier.
    fn is_fifo(&self) -> bool {
        true
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        validate_max_speed(self.max_speed())
    }

    fn can_access_edge(&self, edge: &GraphEdge, direction: EdgeDirection) -> bool {
        self.min_edge_ms(edge, direction) != MAX_DURATION
    }
}

pub(crate) fn validate_max_speed(max_speed: f64) -> Result<(), ConfigurationError> {
    if !max_speed.is_finite() || max_speed <= 0.0 {
        return Err(ConfigurationError::InvalidMaxSpeed(max_speed));
    }

    Ok(())
}

/// Whole milliseconds needed to drive `distance_meters` at `speed_kmh`,
/// truncated like the per-edge times of GraphHopper.
pub(crate) fn travel_ms(distance_meters: f64, speed_kmh: f64) -> Milliseconds {
    if distance_meters <= 0.0 {
        return 0;
    }

    (distance_meters * 3600.0 / speed_kmh) as Milliseconds
}
