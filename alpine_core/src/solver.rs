//! Dense linear solving via Gauss elimination with partial pivoting.
//!
//! [`LinearSystem`] owns a row-major augmented matrix: `n` equations over
//! `n` unknowns plus the right-hand side in column `n`. Solving reduces
//! the matrix in place; a solution only materializes when every pivot
//! clears the [`EPS`] threshold, so a singular or near-singular system
//! never leaks a partial result.

use crate::math::EPS;

/// An `n x (n+1)` augmented coefficient matrix.
#[derive(Debug, Clone)]
pub struct LinearSystem {
    n: usize,
    a: Vec<f64>,
}

impl LinearSystem {
    /// A zeroed system of `n` equations.
    pub fn new(n: usize) -> Self {
        Self {
            n,
            a: vec![0.0; n * (n + 1)],
        }
    }

    /// Number of equations/unknowns.
    pub fn n(&self) -> usize {
        self.n
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        debug_assert!(row < self.n, "row {row} out of range");
        debug_assert!(col <= self.n, "col {col} out of range");
        row * (self.n + 1) + col
    }

    /// Element at `(row, col)`; column `n` is the right-hand side.
    pub fn at(&self, row: usize, col: usize) -> f64 {
        self.a[self.idx(row, col)]
    }

    /// Sets the element at `(row, col)`; column `n` is the right-hand side.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        let i = self.idx(row, col);
        self.a[i] = value;
    }

    /// Solves the system, consuming it.
    ///
    /// Returns `None` when no pivot of sufficient magnitude exists in some
    /// column, i.e. the system is singular or near-singular and has no
    /// unique solution.
    pub fn solve(mut self) -> Option<Vec<f64>> {
        for pivot in 0..self.n {
            if !self.order(pivot) {
                return None;
            }
            if pivot + 1 < self.n {
                self.eliminate(pivot);
            }
        }
        Some(self.back_substitute())
    }

    /// Swaps the largest-magnitude candidate of column `pivot` into the
    /// pivot row. False when even the best candidate is effectively zero.
    fn order(&mut self, pivot: usize) -> bool {
        let mut rmax = pivot;
        for row in pivot + 1..self.n {
            if self.at(row, pivot).abs() > self.at(rmax, pivot).abs() {
                rmax = row;
            }
        }

        if self.at(rmax, pivot).abs() < EPS {
            return false;
        }
        if rmax != pivot {
            for col in 0..=self.n {
                let tmp = self.at(rmax, col);
                let val = self.at(pivot, col);
                self.set(rmax, col, val);
                self.set(pivot, col, tmp);
            }
        }
        true
    }

    /// Clears column `pivot` from every row below the pivot row.
    fn eliminate(&mut self, pivot: usize) {
        for row in pivot + 1..self.n {
            let factor = self.at(row, pivot) / self.at(pivot, pivot);
            self.set(row, pivot, 0.0);
            for col in pivot + 1..=self.n {
                let val = self.at(row, col) - self.at(pivot, col) * factor;
                self.set(row, col, val);
            }
        }
    }

    /// Back substitution from the last row up; pivots are known nonzero.
    fn back_substitute(&self) -> Vec<f64> {
        let mut soln = vec![0.0; self.n];
        for row in (0..self.n).rev() {
            let mut rhs = self.at(row, self.n);
            for col in row + 1..self.n {
                rhs -= soln[col] * self.at(row, col);
            }
            soln[row] = rhs / self.at(row, row);
        }
        soln
    }
}
