use crate::types::EdgeId;
use crate::weighting::Milliseconds;

pub(crate) const INVALID_EDGE: EdgeId = usize::MAX;

/// Travel time of an edge that cannot be traversed.
pub const MAX_DURATION: Milliseconds = u64::MAX;

pub const DAY_MS: Milliseconds = 24 * 60 * 60 * 1000;

/// Speed used to bound every weighting when none is configured, in km/h.
pub const DEFAULT_MAX_SPEED_KMH: f64 = 140.0;
