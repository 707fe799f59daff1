//! This module contains the density engine that turns an atom and a radial grid into shell-resolved
//! densities and their radial derivatives.
//!
//! It includes the `DensityCalculator` and the `DensityOptions` that configure it. The per-shell
//! kernel lives in [`crate::math::derivatives`]; this module decides which shells to evaluate, runs
//! them (optionally in parallel), sums them in slot order and reports unbound shells.

mod implementation;
mod options;

pub use implementation::DensityCalculator;
pub use options::{ComponentPolicy, DensityOptions};
