use serde::{Deserialize, Serialize};

use crate::base_graph::GraphEdge;
use crate::constants::{DEFAULT_MAX_SPEED_KMH, MAX_DURATION};
use crate::edge_direction::EdgeDirection;
use crate::error::ConfigurationError;

use super::{CarWeighting, Milliseconds, SpeedProfile, Weighting, travel_ms, validate_max_speed};

/// How the speed profile is applied to an edge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelTimeModel {
    /// The speed changes while driving through the edge.
    #[default]
    Integrated,
    /// The speed at the entry time is kept for the whole edge. Entering
    /// just before a slowdown can then overtake an earlier vehicle.
    EntrySampled,
}

/// Car profile whose speeds are scaled by a daily [`SpeedProfile`].
#[derive(Debug, Clone)]
pub struct TimeDependentCarWeighting {
    profile: SpeedProfile,
    model: TravelTimeModel,
    max_speed: f64,
}

impl TimeDependentCarWeighting {
    pub fn new(profile: SpeedProfile) -> Result<Self, ConfigurationError> {
        Self::with_model(profile, TravelTimeModel::Integrated, DEFAULT_MAX_SPEED_KMH)
    }

    pub fn with_model(
        profile: SpeedProfile,
        model: TravelTimeModel,
        max_speed: f64,
    ) -> Result<Self, ConfigurationError> {
        let weighting = TimeDependentCarWeighting {
            profile,
            model,
            max_speed,
        };
        weighting.validate()?;
        Ok(weighting)
    }

    fn scaled_speed(&self, base_speed: f64, factor: f64) -> f64 {
        (base_speed * factor).min(self.max_speed)
    }
}

impl Weighting for TimeDependentCarWeighting {
    fn calc_edge_ms(
        &self,
        edge: &GraphEdge,
        direction: EdgeDirection,
        entry_time: Milliseconds,
    ) -> Milliseconds {
        let Some(base_speed) = CarWeighting::speed(edge, direction, f64::INFINITY) else {
            return MAX_DURATION;
        };
        let distance = edge.distance().value();

        match self.model {
            TravelTimeModel::Integrated => self.profile.travel_ms(distance, entry_time, |factor| {
                self.scaled_speed(base_speed, factor)
            }),
            TravelTimeModel::EntrySampled => travel_ms(
                distance,
                self.scaled_speed(base_speed, self.profile.factor_at(entry_time)),
            ),
        }
    }

    fn min_edge_ms(&self, edge: &GraphEdge, direction: EdgeDirection) -> Milliseconds {
        match CarWeighting::speed(edge, direction, f64::INFINITY) {
            Some(base_speed) => travel_ms(
                edge.distance().value(),
                self.scaled_speed(base_speed, self.profile.max_factor()),
            ),
            None => MAX_DURATION,
        }
    }

    fn max_speed(&self) -> f64 {
        self.max_speed
    }

    fn is_fifo(&self) -> bool {
        self.model == TravelTimeModel::Integrated
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        validate_max_speed(self.max_speed)?;
        self.profile.validate()
    }
}
