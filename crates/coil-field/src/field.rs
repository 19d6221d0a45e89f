//! Magnetic field on the axis of circular current loops
//!
//! Closed-form Biot-Savart solution for a single loop, superposed over the
//! two coils of a bifilar pair. All lengths in meters, field in tesla.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::params::CoilParams;

pub const MU0: f64 = 4.0 * PI * 1e-7; // Permeability of free space (T·m/A)

/// A circular current loop coaxial with the z axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrentLoop {
    pub center: f64,  // Axial position (m)
    pub radius: f64,  // Radius (m)
    pub current: f64, // Current (A)
}

impl CurrentLoop {
    pub fn axial_bz(&self, z: f64) -> f64 {
        loop_axial_bz(self.current, self.radius, self.center, z)
    }
}

/// How the identical per-turn contributions are combined
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Summation {
    /// Add both coil terms once per turn into a zeroed buffer
    #[default]
    Accumulate,
    /// Multiply the summed coil terms by the turn count
    Scale,
}

/// Axial field of one loop at position `z`:
///
/// B(z) = μ0·I·R² / (2·(R² + (z − z0)²)^(3/2))
pub fn loop_axial_bz(current: f64, radius: f64, z0: f64, z: f64) -> f64 {
    let r2 = radius * radius;
    let dz = z - z0;
    (MU0 * current * r2) / (2.0 * (r2 + dz * dz).powf(1.5))
}

/// Elementwise [`loop_axial_bz`] over a slice of positions
pub fn loop_axial_bz_along(current: f64, radius: f64, z0: f64, z: &[f64]) -> Vec<f64> {
    z.iter().map(|&z| loop_axial_bz(current, radius, z0, z)).collect()
}

/// Total axial field of the coil pair centered at ±spacing/2
pub fn total_axial_bz(z: &[f64], params: &CoilParams, summation: Summation) -> Vec<f64> {
    let (z1, z2) = params.coil_centers();
    let lower = CurrentLoop { center: z1, radius: params.radius, current: params.current };
    let upper = CurrentLoop { center: z2, radius: params.radius, current: params.current };

    match summation {
        Summation::Accumulate => {
            // Same evaluation order as the reference program, so results
            // match it bit for bit.
            let mut bz = vec![0.0; z.len()];
            for _ in 0..params.turns {
                for (b, &zi) in bz.iter_mut().zip(z) {
                    *b += lower.axial_bz(zi);
                }
                for (b, &zi) in bz.iter_mut().zip(z) {
                    *b += upper.axial_bz(zi);
                }
            }
            bz
        }
        Summation::Scale => {
            let turns = params.turns as f64;
            z.iter()
                .map(|&zi| turns * (lower.axial_bz(zi) + upper.axial_bz(zi)))
                .collect()
        }
    }
}
