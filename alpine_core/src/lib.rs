//! `alpine_core`
//!
//! Core math for the alpine racing engine: vector/matrix/quaternion
//! algebra, dense linear solving, collision geometry, and the embedded
//! Runge-Kutta stepper that drives physics and animation.
//!
//! Design goals:
//! - Deterministic and modular where practical.
//! - Pure value computations; no IO, no blocking, no shared state.
//! - Traits for abstraction where a strategy may swap (ODE tableau).
//! - No `unsafe`.

pub mod geom;
pub mod math;
pub mod matrix;
pub mod ode;
pub mod quat;
pub mod solver;
pub mod util;

pub mod prelude {
    //! Commonly used exports.

    pub use crate::geom::*;
    pub use crate::math::*;
    pub use crate::matrix::*;
    pub use crate::ode::*;
    pub use crate::quat::*;
    pub use crate::solver::*;
}
