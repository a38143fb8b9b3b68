//! Embedded Runge-Kutta stepping.
//!
//! The stepper is callback-free: callers drive the stage loop themselves,
//! querying each stage's time offset and running estimate, evaluating
//! their derivative function, and storing the slope back. After the last
//! stage the refined estimate and the embedded error estimate are read
//! off, and the caller decides whether to accept the step or shrink `h`
//! using [`OdeSolver::timestep_exponent`].
//!
//! The tableau sits behind a trait so a different scheme can slot in;
//! [`Ode23`] is the one the engine ships.

/// Per-step scratch state: initial value, step size, and the stage
/// slopes. One stepping sequence must complete before the value is
/// reused; the state is not reentrant.
#[derive(Debug, Clone)]
pub struct OdeStep {
    pub init_val: f64,
    pub h: f64,
    k: Vec<f64>,
}

/// An embedded Runge-Kutta scheme.
pub trait OdeSolver {
    /// Number of derivative evaluations per step.
    fn stages(&self) -> usize;

    /// Fresh scratch state for one step of size `h` from `init_val`.
    fn init(&self, init_val: f64, h: f64) -> OdeStep;

    /// Time offset of a stage, relative to the step start.
    fn stage_time(&self, step: &OdeStep, stage: usize) -> f64;

    /// Running estimate to evaluate the derivative at for a stage.
    fn stage_value(&self, step: &OdeStep, stage: usize) -> f64;

    /// Stores the derivative evaluated for a stage.
    fn store_stage(&self, step: &mut OdeStep, stage: usize, derivative: f64);

    /// The high-order estimate after all stages are stored.
    fn final_estimate(&self, step: &OdeStep) -> f64;

    /// Local truncation error estimate for the step.
    fn error_estimate(&self, step: &OdeStep) -> f64;

    /// Exponent for step-size adaptation (`h_new ~ h * (tol/err)^exp`).
    fn timestep_exponent(&self) -> f64;
}

const TIME_STEPS: [f64; 4] = [0.0, 1.0 / 2.0, 3.0 / 4.0, 1.0];

// Column `s` holds the weights applied to earlier slopes when forming
// stage `s`'s value; the last column is the 3rd-order solution weights.
const COEFFS: [[f64; 4]; 4] = [
    [0.0, 1.0 / 2.0, 0.0, 2.0 / 9.0],
    [0.0, 0.0, 3.0 / 4.0, 1.0 / 3.0],
    [0.0, 0.0, 0.0, 4.0 / 9.0],
    [0.0, 0.0, 0.0, 0.0],
];

const ERROR_WEIGHTS: [f64; 4] = [-5.0 / 72.0, 1.0 / 12.0, 1.0 / 9.0, -1.0 / 8.0];

const TIME_STEP_EXP: f64 = 1.0 / 3.0;

/// Bogacki-Shampine-style 3rd-order scheme with an embedded 2nd-order
/// error estimate, four stages per step.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ode23;

impl OdeSolver for Ode23 {
    fn stages(&self) -> usize {
        TIME_STEPS.len()
    }

    fn init(&self, init_val: f64, h: f64) -> OdeStep {
        OdeStep {
            init_val,
            h,
            k: vec![0.0; TIME_STEPS.len()],
        }
    }

    fn stage_time(&self, step: &OdeStep, stage: usize) -> f64 {
        TIME_STEPS[stage] * step.h
    }

    fn stage_value(&self, step: &OdeStep, stage: usize) -> f64 {
        let mut val = step.init_val;
        for i in 0..stage {
            val += COEFFS[i][stage] * step.k[i];
        }
        val
    }

    fn store_stage(&self, step: &mut OdeStep, stage: usize, derivative: f64) {
        step.k[stage] = step.h * derivative;
    }

    fn final_estimate(&self, step: &OdeStep) -> f64 {
        let mut val = step.init_val;
        for i in 0..3 {
            val += COEFFS[i][3] * step.k[i];
        }
        val
    }

    fn error_estimate(&self, step: &OdeStep) -> f64 {
        let mut err = 0.0;
        for i in 0..self.stages() {
            err += ERROR_WEIGHTS[i] * step.k[i];
        }
        err.abs()
    }

    fn timestep_exponent(&self) -> f64 {
        TIME_STEP_EXP
    }
}
