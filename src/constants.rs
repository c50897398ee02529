/// Centre of the logical map plane; every derived coordinate orbits this point.
pub const ORIGIN: f64 = 50.0;

/// Number of distinct angles (whole degrees) an id can be placed at.
pub const ANGLE_BUCKETS: u64 = 360;

/// Closest a derived coordinate can sit to the origin.
pub const MIN_RADIUS: f64 = 5.0;

/// Number of distinct radii above `MIN_RADIUS` (so the farthest is 44).
pub const RADIUS_BUCKETS: u64 = 40;

/// Minimum zoom level (1.0 = whole plane in view).
pub const ZOOM_MIN: f64 = 1.0;

/// Maximum zoom level.
pub const ZOOM_MAX: f64 = 4.0;

/// Zoom change per zoom-in/zoom-out command.
pub const ZOOM_STEP: f64 = 0.5;

/// Pan change per directional command, in plane units.
pub const PAN_STEP: f64 = 20.0;

/// Band outside `[0, 100]` in which pins still count as visible.
pub const VISIBILITY_TOLERANCE: f64 = 5.0;

/// Nominal viewport extent on both axes.
pub const VIEWPORT_SIZE: f64 = 100.0;
