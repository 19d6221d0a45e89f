//! Axial sample positions

use serde::{Deserialize, Serialize};

/// Window and resolution of a sample grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSpec {
    pub z_min: f64, // m
    pub z_max: f64, // m
    pub samples: usize,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            z_min: -0.2,
            z_max: 0.2,
            samples: 1000,
        }
    }
}

/// Fixed, ordered axial positions (m), constant for a session
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    z: Vec<f64>,
}

impl SampleGrid {
    /// Evenly spaced points over [start, end], both endpoints included.
    ///
    /// Point `i` is `start + i * step` and the last point is pinned to
    /// `end`, so the grid is identical to `numpy.linspace(start, end, n)`.
    pub fn linspace(start: f64, end: f64, n: usize) -> Self {
        let z = match n {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let step = (end - start) / (n - 1) as f64;
                let mut z: Vec<f64> = (0..n).map(|i| i as f64 * step + start).collect();
                z[n - 1] = end;
                z
            }
        };
        Self { z }
    }

    pub fn from_spec(spec: &GridSpec) -> Self {
        Self::linspace(spec.z_min, spec.z_max, spec.samples)
    }

    /// Wrap arbitrary positions
    pub fn from_positions(z: Vec<f64>) -> Self {
        Self { z }
    }

    pub fn positions(&self) -> &[f64] {
        &self.z
    }

    pub fn len(&self) -> usize {
        self.z.len()
    }

    pub fn is_empty(&self) -> bool {
        self.z.is_empty()
    }
}

impl Default for SampleGrid {
    fn default() -> Self {
        Self::from_spec(&GridSpec::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_window() {
        let grid = SampleGrid::default();
        assert_eq!(grid.len(), 1000);
        assert_eq!(grid.positions()[0], -0.2);
        assert_eq!(grid.positions()[999], 0.2);

        let step = grid.positions()[1] - grid.positions()[0];
        assert!((step - 0.4 / 999.0).abs() < 1e-15);
    }

    #[test]
    fn test_degenerate_counts() {
        assert!(SampleGrid::linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(SampleGrid::linspace(0.5, 1.0, 1).positions(), &[0.5]);
        assert_eq!(SampleGrid::linspace(0.0, 1.0, 3).positions(), &[0.0, 0.5, 1.0]);
    }
}
