//! Unit-vector helpers for catalog positions.

use crate::constants::DEG_TO_RAD;

/// Arc stepped from the object centre when deriving the orientation axis,
/// in degrees. Small enough that the flat-sky offset stays accurate.
const AXIS_STEP_DEG: f64 = 0.1;

/// Converts equatorial spherical coordinates to a unit Cartesian direction.
#[inline]
pub fn unit_from_spherical(ra_deg: f64, dec_deg: f64) -> [f64; 3] {
    let (sin_ra, cos_ra) = libm::sincos(ra_deg * DEG_TO_RAD);
    let (sin_dec, cos_dec) = libm::sincos(dec_deg * DEG_TO_RAD);
    [cos_ra * cos_dec, sin_ra * cos_dec, sin_dec]
}

/// Normalizes a vector to unit length. A zero vector is returned unchanged.
#[inline]
pub fn normalize(v: [f64; 3]) -> [f64; 3] {
    let norm = libm::sqrt(v[0] * v[0] + v[1] * v[1] + v[2] * v[2]);
    if norm > 0.0 {
        [v[0] / norm, v[1] / norm, v[2] / norm]
    } else {
        v
    }
}

/// Unit direction a short arc from the object centre along the major-axis
/// position angle (degrees east of north). With no position angle the axis
/// points due north of the centre.
pub fn orientation_axis(ra_deg: f64, dec_deg: f64, position_angle_deg: f64) -> [f64; 3] {
    let (sin_pa, cos_pa) = libm::sincos(position_angle_deg * DEG_TO_RAD);
    let dec2 = dec_deg + AXIS_STEP_DEG * cos_pa;
    let cos_dec = libm::cos(dec_deg * DEG_TO_RAD);
    let ra2 = if libm::fabs(cos_dec) > 1e-10 {
        ra_deg + AXIS_STEP_DEG * sin_pa / cos_dec
    } else {
        ra_deg
    };
    unit_from_spherical(ra2, dec2)
}
