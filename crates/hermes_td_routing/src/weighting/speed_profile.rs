use serde::{Deserialize, Serialize};

use crate::constants::DAY_MS;
use crate::error::ConfigurationError;

use super::Milliseconds;

const HOUR_MS: Milliseconds = 60 * 60 * 1000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeedBreakpoint {
    /// Milliseconds since midnight UTC at which `factor` starts to apply.
    pub start_ms: Milliseconds,
    /// Multiplier of the base speed of an edge.
    pub factor: f64,
}

impl SpeedBreakpoint {
    pub fn new(start_ms: Milliseconds, factor: f64) -> Self {
        SpeedBreakpoint { start_ms, factor }
    }
}

/// Daily periodic speed factor, constant between two breakpoints. The last
/// breakpoint applies until midnight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SpeedBreakpoint>", into = "Vec<SpeedBreakpoint>")]
pub struct SpeedProfile {
    breakpoints: Vec<SpeedBreakpoint>,
}

impl SpeedProfile {
    pub fn new(breakpoints: Vec<SpeedBreakpoint>) -> Result<Self, ConfigurationError> {
        let profile = SpeedProfile { breakpoints };
        profile.validate()?;
        Ok(profile)
    }

    /// A profile that never changes speeds.
    pub fn constant() -> Self {
        SpeedProfile {
            breakpoints: vec![SpeedBreakpoint::new(0, 1.0)],
        }
    }

    /// Weekday city traffic: morning and evening peaks at half speed.
    pub fn urban_rush_hours() -> Self {
        SpeedProfile {
            breakpoints: vec![
                SpeedBreakpoint::new(0, 1.0),
                SpeedBreakpoint::new(7 * HOUR_MS, 0.5),
                SpeedBreakpoint::new(9 * HOUR_MS + HOUR_MS / 2, 0.8),
                SpeedBreakpoint::new(16 * HOUR_MS, 0.5),
                SpeedBreakpoint::new(19 * HOUR_MS, 0.9),
                SpeedBreakpoint::new(21 * HOUR_MS, 1.0),
            ],
        }
    }

    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let first = self
            .breakpoints
            .first()
            .ok_or(ConfigurationError::EmptySpeedProfile)?;

        if first.start_ms != 0 {
            return Err(ConfigurationError::SpeedProfileStart(first.start_ms));
        }

        for (index, breakpoint) in self.breakpoints.iter().enumerate() {
            if breakpoint.start_ms >= DAY_MS {
                return Err(ConfigurationError::BreakpointOutsideDay {
                    index,
                    start_ms: breakpoint.start_ms,
                });
            }

            if index > 0 && breakpoint.start_ms <= self.breakpoints[index - 1].start_ms {
                return Err(ConfigurationError::UnorderedBreakpoint {
                    index,
                    start_ms: breakpoint.start_ms,
                });
            }

            if !breakpoint.factor.is_finite() || breakpoint.factor <= 0.0 {
                return Err(ConfigurationError::InvalidSpeedFactor {
                    index,
                    factor: breakpoint.factor,
                });
            }
        }

        Ok(())
    }

    pub fn factor_at(&self, time: Milliseconds) -> f64 {
        self.breakpoints[self.index_at(time)].factor
    }

    pub fn max_factor(&self) -> f64 {
        self.breakpoints
            .iter()
            .map(|breakpoint| breakpoint.factor)
            .fold(0.0, f64::max)
    }

    fn index_at(&self, time: Milliseconds) -> usize {
        let time_of_day = time % DAY_MS;
        self.breakpoints
            .partition_point(|breakpoint| breakpoint.start_ms <= time_of_day)
            .saturating_sub(1)
    }

    fn period_length(&self, index: usize) -> Milliseconds {
        let end = self
            .breakpoints
            .get(index + 1)
            .map_or(DAY_MS, |next| next.start_ms);
        end - self.breakpoints[index].start_ms
    }

    /// Time needed to drive `distance_meters` from `entry_time`, where
    /// `speed_kmh` maps the factor of each period to the driven speed.
    ///
    /// The vehicle advances period by period, so a later entry never
    /// results in an earlier exit.
    pub fn travel_ms(
        &self,
        distance_meters: f64,
        entry_time: Milliseconds,
        speed_kmh: impl Fn(f64) -> f64,
    ) -> Milliseconds {
        if distance_meters <= 0.0 {
            return 0;
        }

        let periods = self.breakpoints.len();
        let mut now = entry_time;
        let mut remaining = distance_meters;

        loop {
            let mut index = self.index_at(now);
            let speed = speed_kmh(self.breakpoints[index].factor);
            let mut chunk_end = now - now % DAY_MS + self.breakpoints[index].start_ms
                + self.period_length(index);

            // Consecutive periods driven at the same speed form one chunk.
            let mut merged = 1;
            while merged < periods {
                let next = (index + 1) % periods;
                if speed_kmh(self.breakpoints[next].factor) != speed {
                    break;
                }
                chunk_end += self.period_length(next);
                index = next;
                merged += 1;
            }

            let needed_ms = (remaining * 3600.0 / speed).max(0.0);
            if merged == periods || now as f64 + needed_ms <= chunk_end as f64 {
                return (now - entry_time) + needed_ms as Milliseconds;
            }

            remaining -= (chunk_end - now) as f64 * speed / 3600.0;
            now = chunk_end;
        }
    }
}

impl TryFrom<Vec<SpeedBreakpoint>> for SpeedProfile {
    type Error = ConfigurationError;

    fn try_from(breakpoints: Vec<SpeedBreakpoint>) -> Result<Self, Self::Error> {
        SpeedProfile::new(breakpoints)
    }
}

impl From<SpeedProfile> for Vec<SpeedBreakpoint> {
    fn from(profile: SpeedProfile) -> Self {
        profile.breakpoints
    }
}
