//! Crystal orientations and the disorientation angle between them.
//!
//! An `Orientation` is a unit quaternion that rotates the crystal frame into
//! the sample frame. Because the crystal frame is only defined up to its
//! symmetry group `G`, orientations `q` and `q * s` for `s` in `G` are
//! physically identical. The disorientation angle between `a` and `b` is the
//! smallest rotation angle of `a^-1 * b * s` over all `s` in `G`.

use nalgebra::{Quaternion, UnitQuaternion, Vector3};

use crate::util::math::rotation_angle;
use crate::util::{IsrError, IsrResult};

pub mod symmetry;

pub use symmetry::Symmetry;

/// Crystal orientation with its symmetry group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orientation {
    rotation: UnitQuaternion<f64>,
    symmetry: Symmetry,
}

impl Orientation {
    /// Wraps an existing unit quaternion.
    pub fn new(rotation: UnitQuaternion<f64>, symmetry: Symmetry) -> Self {
        Self { rotation, symmetry }
    }

    /// Builds an orientation from Bunge (ZXZ) Euler angles in radians.
    pub fn from_bunge_euler(
        phi1: f64,
        big_phi: f64,
        phi2: f64,
        symmetry: Symmetry,
    ) -> IsrResult<Self> {
        if !phi1.is_finite() || !big_phi.is_finite() || !phi2.is_finite() {
            return Err(IsrError::config("non-finite Euler angle"));
        }
        let z = Vector3::z_axis();
        let x = Vector3::x_axis();
        let rotation = UnitQuaternion::from_axis_angle(&z, phi1)
            * UnitQuaternion::from_axis_angle(&x, big_phi)
            * UnitQuaternion::from_axis_angle(&z, phi2);
        Ok(Self { rotation, symmetry })
    }

    /// Builds an orientation from quaternion components, normalizing them.
    pub fn from_quaternion(w: f64, x: f64, y: f64, z: f64, symmetry: Symmetry) -> IsrResult<Self> {
        let q = Quaternion::new(w, x, y, z);
        let norm = q.norm();
        if !norm.is_finite() || norm <= f64::EPSILON {
            return Err(IsrError::config("quaternion must be finite and non-zero"));
        }
        Ok(Self {
            rotation: UnitQuaternion::from_quaternion(q),
            symmetry,
        })
    }

    pub fn rotation(&self) -> &UnitQuaternion<f64> {
        &self.rotation
    }

    pub fn symmetry(&self) -> Symmetry {
        self.symmetry
    }

    /// Disorientation angle to `other` in radians, in `[0, pi]`.
    ///
    /// The symmetry group of `self` is used for both sides.
    pub fn angle_to(&self, other: &Orientation) -> f64 {
        let delta = self.rotation.inverse() * other.rotation;
        self.symmetry
            .operators()
            .iter()
            .map(|op| rotation_angle((delta * op).scalar()))
            .fold(f64::INFINITY, f64::min)
    }

    /// Returns true if the disorientation to `other` is strictly below `threshold_rad`.
    pub fn within(&self, other: &Orientation, threshold_rad: f64) -> bool {
        self.angle_to(other) < threshold_rad
    }
}

/// Disorientation between two possibly non-indexed pixels.
///
/// Returns NaN when either side is `None`, so any `<` comparison against a
/// threshold is false for that pair.
pub fn misorientation_rad(a: Option<&Orientation>, b: Option<&Orientation>) -> f64 {
    match (a, b) {
        (Some(a), Some(b)) => a.angle_to(b),
        _ => f64::NAN,
    }
}
