pub const DEG_TO_RAD: f64 = std::f64::consts::PI / 180.0;

pub const ARCMIN_PER_DEGREE: f32 = 60.0;

/// Hours of right ascension to degrees.
pub const HOURS_TO_DEG: f64 = 15.0;

/// Multiplicative margin applied to the angular size when framing an object
/// on approach, so the whole disc stays inside the field of view.
pub const CLOSE_FOV_MARGIN: f64 = 4.0;

/// Field of view used when the angular size is unknown, in degrees.
pub const MIN_CLOSE_FOV_DEG: f64 = 1.0;

/// Magnitude assigned when ranking objects whose photometry is unknown or
/// fainter than any hinted object.
pub const FAINT_MAG_LIMIT: f32 = 15.0;

/// Angular size above this no longer improves the selection rank, degrees.
pub const SIZE_BONUS_CAP_DEG: f32 = 2.0;

/// Magnitudes of selection bonus per degree of angular size.
pub const SIZE_BONUS_WEIGHT: f32 = 0.5;

/// Offset keeping hinted objects ahead of unlabeled field objects.
pub const SELECT_PRIORITY_OFFSET: f32 = 10.0;

/// Fixed penalty pushing cross-reference entries behind their canonical
/// counterparts when both overlap a selection point.
pub const CROSS_REFERENCE_PENALTY: f32 = 5.0;
