#[derive(Eq, Hash, PartialEq, Clone, Copy, Debug)]
pub enum Property {
    CarAccess,
    /// Average speed in km/h.
    CarAverageSpeed,
    /// Legal speed limit in km/h.
    MaxSpeed,
}
