use crate::base_graph::GraphEdge;
use crate::constants::{DEFAULT_MAX_SPEED_KMH, MAX_DURATION};
use crate::edge_direction::EdgeDirection;
use crate::properties::property::Property;

use super::{Milliseconds, Weighting, travel_ms};

/// Time-invariant car profile: every edge is driven at its average speed,
/// capped by its speed limit and by the profile maximum.
#[derive(Debug, Clone, Copy)]
pub struct CarWeighting {
    max_speed: f64,
}

impl CarWeighting {
    pub fn new() -> Self {
        CarWeighting {
            max_speed: DEFAULT_MAX_SPEED_KMH,
        }
    }

    pub fn with_max_speed(max_speed: f64) -> Self {
        CarWeighting { max_speed }
    }

    /// Speed of a car on `edge` in km/h, `None` when cars cannot use this
    /// direction.
    pub(crate) fn speed(edge: &GraphEdge, direction: EdgeDirection, max_speed: f64) -> Option<f64> {
        let access = edge
            .properties()
            .get_bool(Property::CarAccess, direction)
            .unwrap_or(false);

        if !access {
            return None;
        }

        let mut speed = edge
            .properties()
            .get_f32(Property::CarAverageSpeed, direction)
            .map(f64::from)
            .filter(|speed| speed.is_finite() && *speed > 0.0)?;

        if let Some(limit) = edge
            .properties()
            .get_f32(Property::MaxSpeed, direction)
            .map(f64::from)
            .filter(|limit| *limit > 0.0)
        {
            speed = speed.min(limit);
        }

        Some(speed.min(max_speed))
    }
}

impl Default for CarWeighting {
    fn default() -> Self {
        Self::new()
    }
}

impl Weighting for CarWeighting {
    fn calc_edge_ms(
        &self,
        edge: &GraphEdge,
        direction: EdgeDirection,
        _entry_time: Milliseconds,
    ) -> Milliseconds {
        self.min_edge_ms(edge, direction)
    }

    fn min_edge_ms(&self, edge: &GraphEdge, direction: EdgeDirection) -> Milliseconds {
        match Self::speed(edge, direction, self.max_speed) {
            Some(speed) => travel_ms(edge.distance().value(), speed),
            None => MAX_DURATION,
        }
    }

    fn max_speed(&self) -> f64 {
        self.max_speed
    }

    fn is_time_invariant(&self) -> bool {
        true
    }
}
