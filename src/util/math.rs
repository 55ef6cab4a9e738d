//! Angle helpers shared by the orientation and matching code.

/// Converts degrees to radians.
pub(crate) fn deg_to_rad(angle_deg: f64) -> f64 {
    angle_deg.to_radians()
}

/// Rotation angle in radians of a unit quaternion with scalar part `w`.
///
/// Uses `|w|` so that `q` and `-q` give the same angle in `[0, pi]`.
pub(crate) fn rotation_angle(w: f64) -> f64 {
    2.0 * w.abs().clamp(0.0, 1.0).acos()
}
