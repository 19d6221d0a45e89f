//! Interactive session: holds the current parameters and recomputes the
//! full curve after every change.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::SessionConfig;
use crate::curve::FieldCurve;
use crate::error::Result;
use crate::field::Summation;
use crate::grid::SampleGrid;
use crate::params::{CoilParams, Param};
use crate::compute_field_with;

/// Input from a control surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ControlEvent {
    /// Slider moved
    Set { param: Param, value: f64 },
    /// Restore every control to its starting value
    Reset,
    /// Replace the whole snapshot (e.g. from a watched file). Every control
    /// must lie within its slider range.
    Load { params: CoilParams },
}

pub struct Controller {
    grid: SampleGrid,
    summation: Summation,
    /// Reset target
    initial: CoilParams,
    params: CoilParams,
    curve: FieldCurve,
}

impl Controller {
    /// Start a session. Initial parameters outside the slider ranges are
    /// clamped into them.
    pub fn new(config: &SessionConfig) -> Self {
        let grid = SampleGrid::from_spec(&config.grid);
        let initial = config.params.constrained();
        let curve = compute_field_with(&initial, &grid, config.summation);
        Self {
            grid,
            summation: config.summation,
            initial,
            params: initial,
            curve,
        }
    }

    pub fn initial_params(&self) -> &CoilParams {
        &self.initial
    }

    pub fn params(&self) -> &CoilParams {
        &self.params
    }

    pub fn curve(&self) -> &FieldCurve {
        &self.curve
    }

    /// Apply one event and recompute. On error nothing changes.
    pub fn apply(&mut self, event: ControlEvent) -> Result<&FieldCurve> {
        let next = match event {
            ControlEvent::Set { param, value } => self.params.with(param, value)?,
            ControlEvent::Reset => self.initial,
            ControlEvent::Load { params } => {
                params.validate()?;
                params.check_ranges()?;
                params
            }
        };
        self.params = next;
        self.recompute();
        Ok(&self.curve)
    }

    pub fn set(&mut self, param: Param, value: f64) -> Result<&FieldCurve> {
        self.apply(ControlEvent::Set { param, value })
    }

    pub fn reset(&mut self) -> &FieldCurve {
        self.params = self.initial;
        self.recompute();
        &self.curve
    }

    fn recompute(&mut self) {
        self.curve = compute_field_with(&self.params, &self.grid, self.summation);
        if let Some((z, b)) = self.curve.peak() {
            debug!("Recomputed {}: peak {:.4e} T at z={:.4} m", self.params, b, z);
        }
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}
