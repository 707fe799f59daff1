//! This module provides the mathematical core of the slater library.
//!
//! It contains unit conversions and grid defaults, a Lanczos Gamma function for the orbital
//! normalization with non-integer quantum numbers, and Slater's screening rules together with the
//! normalized Slater-type orbitals built on them.

/// Physical constants, unit conversions and numerical defaults.
pub mod constants;

/// The Gamma function via the Lanczos approximation.
///
/// Needed for `Γ(2n* + 1)` with Slater's non-integer effective quantum numbers.
pub mod gamma;

/// Slater's shielding rules and the normalized Slater-type orbitals.
///
/// Shielding constants are summed group by group from the occupancy list; the effective charge
/// `Z − s` then fixes the exponent and normalization of each shell's orbital.
pub mod shielding;

/// Closed-form radial derivatives of shell densities and the radial differential operators.
pub mod derivatives;
