//! Coil parameter snapshot and the bounded controls that edit it

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{FieldError, Result};

/// One of the four controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Param {
    Spacing,
    Turns,
    Radius,
    Current,
}

impl Param {
    pub const ALL: [Param; 4] = [Param::Spacing, Param::Turns, Param::Radius, Param::Current];

    /// Label shown next to the control
    pub fn label(&self) -> &'static str {
        match self {
            Param::Spacing => "Coil Spacing (m)",
            Param::Turns => "Turns",
            Param::Radius => "Radius (m)",
            Param::Current => "Current (A)",
        }
    }

    /// Allowed range of the control
    pub fn range(&self) -> ParamRange {
        match self {
            Param::Spacing => SPACING_RANGE,
            Param::Turns => TURNS_RANGE,
            Param::Radius => RADIUS_RANGE,
            Param::Current => CURRENT_RANGE,
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Param::Spacing => "spacing",
            Param::Turns => "turns",
            Param::Radius => "radius",
            Param::Current => "current",
        };
        f.write_str(name)
    }
}

impl FromStr for Param {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "spacing" | "s" => Ok(Param::Spacing),
            "turns" | "n" => Ok(Param::Turns),
            "radius" | "r" => Ok(Param::Radius),
            "current" | "i" => Ok(Param::Current),
            _ => Err(FieldError::UnknownParameter(s.to_string())),
        }
    }
}

/// Bounds of a slider-style control
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
    /// Quantization step measured from `min`
    pub step: Option<f64>,
}

impl ParamRange {
    /// Snap to the step grid (if any), then clamp into [min, max]
    pub fn constrain(&self, value: f64) -> f64 {
        let snapped = match self.step {
            Some(step) => self.min + ((value - self.min) / step).round() * step,
            None => value,
        };
        snapped.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

pub const SPACING_RANGE: ParamRange = ParamRange { min: 0.01, max: 0.2, step: None };
pub const TURNS_RANGE: ParamRange = ParamRange { min: 1.0, max: 50.0, step: Some(1.0) };
pub const RADIUS_RANGE: ParamRange = ParamRange { min: 0.01, max: 0.1, step: None };
pub const CURRENT_RANGE: ParamRange = ParamRange { min: 0.1, max: 10.0, step: None };

/// Parameters of the coil pair for one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoilParams {
    /// Distance between the two coil centers (m)
    pub spacing: f64,
    /// Turns per coil
    pub turns: u32,
    /// Loop radius (m)
    pub radius: f64,
    /// Current (A); negative reverses the flow
    pub current: f64,
}

impl Default for CoilParams {
    fn default() -> Self {
        Self {
            spacing: 0.1,
            turns: 10,
            radius: 0.05,
            current: 1.0,
        }
    }
}

impl CoilParams {
    pub fn get(&self, param: Param) -> f64 {
        match param {
            Param::Spacing => self.spacing,
            Param::Turns => self.turns as f64,
            Param::Radius => self.radius,
            Param::Current => self.current,
        }
    }

    /// Copy of `self` with one control moved to `value`, constrained the way
    /// the slider would constrain it.
    pub fn with(&self, param: Param, value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(FieldError::InvalidParameter {
                param,
                value,
                reason: "not a finite number",
            });
        }

        let value = param.range().constrain(value);
        let mut next = *self;
        match param {
            Param::Spacing => next.spacing = value,
            Param::Turns => next.turns = value as u32,
            Param::Radius => next.radius = value,
            Param::Current => next.current = value,
        }
        Ok(next)
    }

    /// Reject geometries the field model is not meant for. The control
    /// ranges are not enforced here.
    pub fn validate(&self) -> Result<()> {
        let invalid = |param: Param, value: f64, reason: &'static str| -> Result<()> {
            Err(FieldError::InvalidParameter { param, value, reason })
        };

        if !self.spacing.is_finite() || self.spacing <= 0.0 {
            return invalid(Param::Spacing, self.spacing, "must be a positive length");
        }
        if self.turns < 1 {
            return invalid(Param::Turns, self.turns as f64, "need at least one turn");
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return invalid(Param::Radius, self.radius, "must be a positive length");
        }
        if !self.current.is_finite() {
            return invalid(Param::Current, self.current, "not a finite number");
        }
        Ok(())
    }

    /// Reject any control outside its slider range
    pub fn check_ranges(&self) -> Result<()> {
        for param in Param::ALL {
            let value = self.get(param);
            if !param.range().contains(value) {
                return Err(FieldError::InvalidParameter {
                    param,
                    value,
                    reason: "outside control range",
                });
            }
        }
        Ok(())
    }

    /// Every control moved into its slider range
    pub fn constrained(&self) -> Self {
        Self {
            spacing: SPACING_RANGE.constrain(self.spacing),
            turns: TURNS_RANGE.constrain(self.turns as f64) as u32,
            radius: RADIUS_RANGE.constrain(self.radius),
            current: CURRENT_RANGE.constrain(self.current),
        }
    }

    /// Axial positions of the two coil centers (m)
    pub fn coil_centers(&self) -> (f64, f64) {
        (-self.spacing / 2.0, self.spacing / 2.0)
    }
}

impl fmt::Display for CoilParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "s={:.4}m N={} R={:.4}m I={:.3}A",
            self.spacing, self.turns, self.radius, self.current
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_instance() {
        let p = CoilParams::default();
        assert_eq!(p.spacing, 0.1);
        assert_eq!(p.turns, 10);
        assert_eq!(p.radius, 0.05);
        assert_eq!(p.current, 1.0);
    }

    #[test]
    fn test_constrain_clamps_and_snaps() {
        assert_eq!(SPACING_RANGE.constrain(0.5), 0.2);
        assert_eq!(SPACING_RANGE.constrain(-1.0), 0.01);
        assert_eq!(TURNS_RANGE.constrain(7.4), 7.0);
        assert_eq!(TURNS_RANGE.constrain(7.6), 8.0);
        assert_eq!(TURNS_RANGE.constrain(0.0), 1.0);
        assert_eq!(TURNS_RANGE.constrain(99.0), 50.0);
        assert_eq!(CURRENT_RANGE.constrain(2.5), 2.5);
    }

    #[test]
    fn test_with_updates_single_control() {
        let p = CoilParams::default().with(Param::Turns, 23.2).unwrap();
        assert_eq!(p.turns, 23);
        assert_eq!(p.get(Param::Turns), 23.0);
        assert_eq!(p.spacing, 0.1);

        let p = p.with(Param::Radius, 1.0).unwrap();
        assert_eq!(p.radius, 0.1);

        assert!(p.with(Param::Current, f64::NAN).is_err());
    }

    #[test]
    fn test_validate_rejects_degenerate_geometry() {
        assert!(CoilParams::default().validate().is_ok());

        let bad_radius = CoilParams { radius: 0.0, ..Default::default() };
        assert!(matches!(
            bad_radius.validate(),
            Err(FieldError::InvalidParameter { param: Param::Radius, .. })
        ));

        let bad_spacing = CoilParams { spacing: -0.1, ..Default::default() };
        assert!(bad_spacing.validate().is_err());

        let no_turns = CoilParams { turns: 0, ..Default::default() };
        assert!(no_turns.validate().is_err());

        // Reversed current is physical
        let reversed = CoilParams { current: -2.0, ..Default::default() };
        assert!(reversed.validate().is_ok());
    }

    #[test]
    fn test_check_ranges() {
        assert!(CoilParams::default().check_ranges().is_ok());

        let many_turns = CoilParams { turns: u32::MAX, ..Default::default() };
        assert!(many_turns.validate().is_ok());
        assert!(matches!(
            many_turns.check_ranges(),
            Err(FieldError::InvalidParameter { param: Param::Turns, .. })
        ));

        let wide = CoilParams { spacing: 5.0, ..Default::default() };
        assert!(wide.check_ranges().is_err());

        let reversed = CoilParams { current: -500.0, ..Default::default() };
        assert!(reversed.check_ranges().is_err());
    }

    #[test]
    fn test_constrained_clamps_every_control() {
        let p = CoilParams { spacing: 5.0, turns: 100_000, radius: 3.0, current: -500.0 }.constrained();
        assert_eq!(p, CoilParams { spacing: 0.2, turns: 50, radius: 0.1, current: 0.1 });
        assert_eq!(CoilParams::default().constrained(), CoilParams::default());
    }

    #[test]
    fn test_param_names() {
        assert_eq!("Spacing".parse::<Param>().unwrap(), Param::Spacing);
        assert_eq!("R".parse::<Param>().unwrap(), Param::Radius);
        assert_eq!("I".parse::<Param>().unwrap(), Param::Current);
        assert!("width".parse::<Param>().is_err());
        assert_eq!(Param::Turns.to_string(), "turns");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let p: CoilParams = serde_json::from_str(r#"{"turns": 3}"#).unwrap();
        assert_eq!(p.turns, 3);
        assert_eq!(p.radius, 0.05);
    }
}
