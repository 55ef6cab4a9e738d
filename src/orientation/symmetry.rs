//! Proper rotation groups for the supported crystal symmetries.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use nalgebra::{Unit, UnitQuaternion, Vector3};

use crate::util::IsrError;

/// Crystal symmetry used to fold equivalent orientations together.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Symmetry {
    /// No symmetry; only the identity.
    Triclinic,
    /// Point group 622 (12 operators).
    Hexagonal,
    /// Point group 432 (24 operators).
    #[default]
    Cubic,
}

impl Symmetry {
    /// Returns the rotation operators of the group, identity first.
    pub fn operators(self) -> &'static [UnitQuaternion<f64>] {
        static TRICLINIC: OnceLock<Vec<UnitQuaternion<f64>>> = OnceLock::new();
        static HEXAGONAL: OnceLock<Vec<UnitQuaternion<f64>>> = OnceLock::new();
        static CUBIC: OnceLock<Vec<UnitQuaternion<f64>>> = OnceLock::new();
        match self {
            Symmetry::Triclinic => TRICLINIC.get_or_init(|| vec![UnitQuaternion::identity()]),
            Symmetry::Hexagonal => HEXAGONAL.get_or_init(hexagonal_operators),
            Symmetry::Cubic => CUBIC.get_or_init(cubic_operators),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Symmetry::Triclinic => "triclinic",
            Symmetry::Hexagonal => "hexagonal",
            Symmetry::Cubic => "cubic",
        }
    }
}

impl fmt::Display for Symmetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Symmetry {
    type Err = IsrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "triclinic" | "none" => Ok(Symmetry::Triclinic),
            "hexagonal" | "622" => Ok(Symmetry::Hexagonal),
            "cubic" | "432" => Ok(Symmetry::Cubic),
            other => Err(IsrError::config(format!("unknown symmetry `{other}`"))),
        }
    }
}

fn axis(x: f64, y: f64, z: f64) -> Unit<Vector3<f64>> {
    Unit::new_normalize(Vector3::new(x, y, z))
}

fn cubic_operators() -> Vec<UnitQuaternion<f64>> {
    use std::f64::consts::{FRAC_PI_2, PI};

    let mut ops = vec![UnitQuaternion::identity()];
    for a in [Vector3::x_axis(), Vector3::y_axis(), Vector3::z_axis()] {
        for k in 1..=3 {
            ops.push(UnitQuaternion::from_axis_angle(&a, k as f64 * FRAC_PI_2));
        }
    }
    let third = 2.0 * PI / 3.0;
    for (x, y, z) in [
        (1.0, 1.0, 1.0),
        (-1.0, 1.0, 1.0),
        (1.0, -1.0, 1.0),
        (1.0, 1.0, -1.0),
    ] {
        for k in 1..=2 {
            ops.push(UnitQuaternion::from_axis_angle(&axis(x, y, z), k as f64 * third));
        }
    }
    for (x, y, z) in [
        (1.0, 1.0, 0.0),
        (1.0, -1.0, 0.0),
        (1.0, 0.0, 1.0),
        (1.0, 0.0, -1.0),
        (0.0, 1.0, 1.0),
        (0.0, 1.0, -1.0),
    ] {
        ops.push(UnitQuaternion::from_axis_angle(&axis(x, y, z), PI));
    }
    ops
}

fn hexagonal_operators() -> Vec<UnitQuaternion<f64>> {
    use std::f64::consts::PI;

    let mut ops = Vec::with_capacity(12);
    for k in 0..6 {
        ops.push(UnitQuaternion::from_axis_angle(
            &Vector3::z_axis(),
            k as f64 * PI / 3.0,
        ));
    }
    for k in 0..6 {
        let theta = k as f64 * PI / 6.0;
        ops.push(UnitQuaternion::from_axis_angle(
            &axis(theta.cos(), theta.sin(), 0.0),
            PI,
        ));
    }
    ops
}
