//! Field curve: the (z, Bz) result of one evaluation and its output formats

use serde::Serialize;
use std::io::{self, Write};

use crate::params::CoilParams;

/// Fraction of the data range added on each side when autoscaling
pub const AUTOSCALE_MARGIN: f64 = 0.05;

/// Axial field sampled on a grid
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldCurve {
    pub params: CoilParams,
    pub z: Vec<f64>,  // m
    pub bz: Vec<f64>, // T
}

/// Display window that fits a curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurveExtent {
    pub z_min: f64,
    pub z_max: f64,
    pub b_min: f64,
    pub b_max: f64,
}

fn padded(lo: f64, hi: f64, margin: f64) -> (f64, f64) {
    let span = hi - lo;
    if span > 0.0 {
        (lo - span * margin, hi + span * margin)
    } else if lo != 0.0 {
        // Flat data: widen around the value so the window keeps a height
        let pad = lo.abs() * margin;
        (lo - pad, hi + pad)
    } else {
        (-1e-3, 1e-3)
    }
}

impl FieldCurve {
    pub fn len(&self) -> usize {
        self.bz.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bz.is_empty()
    }

    /// Sample with the largest |Bz| as (z, Bz)
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.z
            .iter()
            .zip(&self.bz)
            .max_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))
            .map(|(&z, &b)| (z, b))
    }

    /// Data limits plus [`AUTOSCALE_MARGIN`] on both axes
    pub fn extent(&self) -> Option<CurveExtent> {
        if self.is_empty() {
            return None;
        }
        let (z_lo, z_hi) = min_max(&self.z);
        let (b_lo, b_hi) = min_max(&self.bz);
        let (z_min, z_max) = padded(z_lo, z_hi, AUTOSCALE_MARGIN);
        let (b_min, b_max) = padded(b_lo, b_hi, AUTOSCALE_MARGIN);
        Some(CurveExtent { z_min, z_max, b_min, b_max })
    }

    /// Binary frame for streaming to the viewer
    pub fn to_binary(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(28 + self.len() * 8);

        // Header: type marker
        data.extend_from_slice(b"CURVE\0\0\0");

        data.extend_from_slice(&(self.len() as u32).to_le_bytes());

        let extent = self.extent().unwrap_or(CurveExtent {
            z_min: 0.0,
            z_max: 0.0,
            b_min: 0.0,
            b_max: 0.0,
        });
        for v in [extent.z_min, extent.z_max, extent.b_min, extent.b_max] {
            data.extend_from_slice(&(v as f32).to_le_bytes());
        }

        for &v in &self.z {
            data.extend_from_slice(&(v as f32).to_le_bytes());
        }
        for &v in &self.bz {
            data.extend_from_slice(&(v as f32).to_le_bytes());
        }

        data
    }

    /// CSV with a commented header describing the run
    pub fn write_csv<W: Write>(&self, mut out: W) -> io::Result<()> {
        writeln!(out, "# coil-field axial Bz")?;
        writeln!(out, "# generated: {}", chrono::Utc::now().to_rfc3339())?;
        writeln!(
            out,
            "# spacing_m={} turns={} radius_m={} current_a={}",
            self.params.spacing, self.params.turns, self.params.radius, self.params.current
        )?;
        writeln!(out, "z_m,bz_t")?;
        for (z, b) in self.z.iter().zip(&self.bz) {
            writeln!(out, "{:e},{:e}", z, b)?;
        }
        Ok(())
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "params": self.params,
            "z": self.z,
            "bz": self.bz,
            "extent": self.extent(),
        })
    }
}

fn min_max(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)))
}
