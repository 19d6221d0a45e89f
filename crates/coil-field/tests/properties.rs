// tests/properties.rs
//
// Physics sanity checks on the bifilar axial field.
// Run with: cargo test -p coil-field --test properties

use coil_field::{
    compute_field, compute_field_with, CoilParams, ControlEvent, Controller, Param, SampleGrid,
    Summation, MU0,
};

fn rel_close(a: f64, b: f64, tol: f64) -> bool {
    (a - b).abs() <= tol * b.abs().max(f64::MIN_POSITIVE)
}

fn configurations() -> Vec<CoilParams> {
    vec![
        CoilParams::default(),
        CoilParams { spacing: 0.01, turns: 1, radius: 0.1, current: 0.1 },
        CoilParams { spacing: 0.2, turns: 50, radius: 0.01, current: 10.0 },
        CoilParams { spacing: 0.07, turns: 13, radius: 0.033, current: 3.3 },
    ]
}

#[test]
fn n_turns_is_n_times_single_turn() {
    let grid = SampleGrid::default();
    for params in configurations() {
        let single = compute_field(&CoilParams { turns: 1, ..params }, &grid);
        for summation in [Summation::Accumulate, Summation::Scale] {
            let full = compute_field_with(&params, &grid, summation);
            let n = params.turns as f64;
            for (b, b1) in full.bz.iter().zip(&single.bz) {
                assert!(rel_close(*b, n * b1, 1e-12), "{params}: {b} vs {}", n * b1);
            }
        }
    }
}

#[test]
fn field_is_symmetric_about_midpoint() {
    let grid = SampleGrid::default();
    for params in configurations() {
        let curve = compute_field(&params, &grid);
        let n = curve.len();
        for i in 0..n / 2 {
            let (b_neg, b_pos) = (curve.bz[i], curve.bz[n - 1 - i]);
            assert!(rel_close(b_neg, b_pos, 1e-12), "{params}: z={} {b_neg} vs {b_pos}", curve.z[i]);
        }
    }
}

#[test]
fn midpoint_field_matches_closed_form() {
    let grid = SampleGrid::from_positions(vec![0.0]);
    for s in [0.01, 0.1, 0.2] {
        for r in [0.01, 0.05, 0.1] {
            let params = CoilParams { spacing: s, turns: 1, radius: r, current: 1.0 };
            let b0 = compute_field(&params, &grid).bz[0];

            let half = s / 2.0;
            let expected = MU0 * r * r / (2.0 * (r * r + half * half).powf(1.5)) * 2.0;
            assert!(rel_close(b0, expected, 1e-12), "s={s} R={r}: {b0} vs {expected}");
        }
    }
}

#[test]
fn field_falls_off_beyond_coils() {
    let grid = SampleGrid::default();
    for params in configurations() {
        let curve = compute_field(&params, &grid);
        let start = params.radius.max(params.spacing / 2.0);

        let tail: Vec<f64> = curve
            .z
            .iter()
            .zip(&curve.bz)
            .filter(|(z, _)| **z > start)
            .map(|(_, b)| b.abs())
            .collect();

        for pair in tail.windows(2) {
            assert!(pair[1] < pair[0], "{params}: |B| not decreasing: {pair:?}");
        }
    }
}

#[test]
fn far_field_tends_to_zero() {
    let grid = SampleGrid::from_positions(vec![0.0, 10.0, 100.0]);
    let curve = compute_field(&CoilParams::default(), &grid);
    assert!(curve.bz[1] < curve.bz[0] * 1e-3);
    assert!(curve.bz[2] < curve.bz[1] * 1e-2);
}

#[test]
fn doubling_current_doubles_every_sample_exactly() {
    let grid = SampleGrid::default();
    for params in configurations() {
        let base = compute_field(&params, &grid);
        let doubled = compute_field(&CoilParams { current: params.current * 2.0, ..params }, &grid);
        for (b, b2) in base.bz.iter().zip(&doubled.bz) {
            assert_eq!(*b2, 2.0 * b);
        }
    }
}

#[test]
fn reset_reproduces_initial_curve_bit_for_bit() {
    let mut controller = Controller::default();
    let initial = controller.curve().clone();

    controller.set(Param::Spacing, 0.15).unwrap();
    controller.set(Param::Turns, 42.0).unwrap();
    controller.set(Param::Radius, 0.09).unwrap();
    controller.set(Param::Current, 0.3).unwrap();
    assert_ne!(controller.curve().bz, initial.bz);

    controller.apply(ControlEvent::Reset).unwrap();
    let p = controller.params();
    assert_eq!(p.spacing, 0.1);
    assert_eq!(p.turns, 10);
    assert_eq!(p.radius, 0.05);
    assert_eq!(p.current, 1.0);

    let bits = |v: &[f64]| v.iter().map(|b| b.to_bits()).collect::<Vec<_>>();
    assert_eq!(bits(&controller.curve().bz), bits(&initial.bz));
}

#[test]
fn evaluation_is_deterministic() {
    let grid = SampleGrid::default();
    let params = CoilParams { turns: 33, ..Default::default() };
    assert_eq!(compute_field(&params, &grid), compute_field(&params, &grid));
}
