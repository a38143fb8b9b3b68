//! Drives the ODE stepper the way the physics loop does: full stage
//! sweeps with caller-side adaptive step control.

use alpine_core::ode::{Ode23, OdeSolver};
use alpine_tests::init_tracing;

/// One full stage sweep; returns the refined value and error estimate.
fn sweep(solver: &Ode23, t: f64, y: f64, h: f64, f: impl Fn(f64, f64) -> f64) -> (f64, f64) {
    let mut step = solver.init(y, h);
    for stage in 0..solver.stages() {
        let st = t + solver.stage_time(&step, stage);
        let sy = solver.stage_value(&step, stage);
        let d = f(st, sy);
        solver.store_stage(&mut step, stage, d);
    }
    (solver.final_estimate(&step), solver.error_estimate(&step))
}

#[test]
fn adaptive_integration_of_exponential_growth() {
    init_tracing();
    let solver = Ode23;
    let tol = 1e-7;

    let mut t = 0.0;
    let mut y = 1.0;
    let mut h = 0.2;

    while 1.0 - t > 1e-12 {
        if t + h > 1.0 {
            h = 1.0 - t;
        }
        let (val, err) = sweep(&solver, t, y, h, |_, y| y);
        if err > tol {
            // Reject and shrink by the scheme's order.
            h *= 0.9 * (tol / err).powf(solver.timestep_exponent());
            continue;
        }
        y = val;
        t += h;
        if err > 0.0 {
            h = (h * 0.9 * (tol / err).powf(solver.timestep_exponent())).min(0.25);
        }
    }

    assert!((y - 1.0_f64.exp()).abs() < 1e-5, "y(1) = {y}");
}

#[test]
fn adaptive_integration_of_a_cosine_drive() {
    init_tracing();
    let solver = Ode23;
    let tol = 1e-8;
    let end = 2.0;

    let mut t = 0.0;
    let mut y = 0.0;
    let mut h = 0.1;

    while end - t > 1e-12 {
        if t + h > end {
            h = end - t;
        }
        let (val, err) = sweep(&solver, t, y, h, |t, _| t.cos());
        if err > tol {
            h *= 0.9 * (tol / err).powf(solver.timestep_exponent());
            continue;
        }
        y = val;
        t += h;
        if err > 0.0 {
            h = (h * 0.9 * (tol / err).powf(solver.timestep_exponent())).min(0.25);
        }
    }

    assert!((y - end.sin()).abs() < 1e-6, "y(2) = {y}");
}

#[test]
fn fixed_steps_converge_at_third_order() {
    init_tracing();
    let solver = Ode23;

    // Halving the step should cut the one-step error by about 2^4
    // (local truncation error is O(h^4) for a 3rd-order scheme).
    let f = |_: f64, y: f64| y;
    let err_at = |h: f64| {
        let (val, _) = sweep(&solver, 0.0, 1.0, h, f);
        (val - h.exp()).abs()
    };

    let e1 = err_at(0.2);
    let e2 = err_at(0.1);
    let ratio = e1 / e2;
    assert!(
        (8.0..32.0).contains(&ratio),
        "unexpected convergence ratio {ratio}"
    );
}
