//! coil-field: on-axis magnetic field of a bifilar coil pair
//!
//! This crate provides:
//! - The closed-form axial field of a circular current loop
//! - Superposition over two matched coils at ±spacing/2 with N turns each
//! - A controller that recomputes the curve whenever a control changes
//! - CSV / JSON / binary output of the resulting curve
//!
//! Lengths are in meters, currents in amperes, fields in tesla.

pub mod config;
pub mod controller;
pub mod curve;
pub mod error;
pub mod field;
pub mod grid;
pub mod panel;
pub mod params;

pub use config::SessionConfig;
pub use controller::{ControlEvent, Controller};
pub use curve::{CurveExtent, FieldCurve};
pub use error::FieldError;
pub use field::{loop_axial_bz, loop_axial_bz_along, total_axial_bz, Summation, MU0};
pub use grid::{GridSpec, SampleGrid};
pub use panel::render_panel;
pub use params::{CoilParams, Param, ParamRange};

/// Main entry point: total axial field of the coil pair on every grid point
///
/// Pure and unvalidated; see [`CoilParams::validate`] for domain checks.
pub fn compute_field(params: &CoilParams, grid: &SampleGrid) -> FieldCurve {
    compute_field_with(params, grid, Summation::default())
}

/// [`compute_field`] with an explicit per-turn summation strategy
pub fn compute_field_with(params: &CoilParams, grid: &SampleGrid, summation: Summation) -> FieldCurve {
    FieldCurve {
        params: *params,
        z: grid.positions().to_vec(),
        bz: total_axial_bz(grid.positions(), params, summation),
    }
}
