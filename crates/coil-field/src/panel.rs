//! Static informational panel: formulas, constants and control ranges

use anyhow::Result;
use minijinja::{context, Environment};

use crate::field::MU0;
use crate::params::Param;

const PANEL_TEMPLATE: &str = r#"Magnetic Field from Single Loop:
  Bz = mu0 * I * R^2 / (2 * (R^2 + (z - z0)^2)^(3/2))

Total Field from Two Coils:
  B_total(z) = N * (Bz(z1) + Bz(z2)),  z1 = -s/2,  z2 = +s/2

Where:
  mu0 = 4*pi x 10^-7 T*m/A ({{ mu0 }})
  I   = Current (A)
  R   = Radius (m)
  z0  = Coil Center (m)
  N   = Number of Turns
  s   = Coil Spacing (m)

Controls:
{% for c in controls %}  {{ c.label }}: {{ c.min }} .. {{ c.max }}{% if c.step %} (step {{ c.step }}){% endif %}
{% endfor %}"#;

/// Render the panel text. The output only depends on constants, so callers
/// render it once per session.
pub fn render_panel() -> Result<String> {
    let mut env = Environment::new();
    env.add_template("panel", PANEL_TEMPLATE)?;
    let template = env.get_template("panel")?;

    let controls: Vec<_> = Param::ALL
        .iter()
        .map(|p| {
            let range = p.range();
            serde_json::json!({
                "label": p.label(),
                "min": range.min,
                "max": range.max,
                "step": range.step,
            })
        })
        .collect();

    let text = template.render(context! {
        mu0 => format!("{:.6e}", MU0),
        controls => controls,
    })?;

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_lists_formulas_and_controls() {
        let text = render_panel().unwrap();
        assert!(text.contains("Magnetic Field from Single Loop"));
        assert!(text.contains("1.256637e-6"));
        assert!(text.contains("Coil Spacing (m): 0.01 .. 0.2"));
        assert!(text.contains("Turns: 1.0 .. 50.0 (step 1.0)"));
        assert!(text.contains("Current (A): 0.1 .. 10.0"));
    }
}
