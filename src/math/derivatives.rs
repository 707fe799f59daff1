//! Closed-form radial derivatives of Slater-type shell densities.
//!
//! A shell density has the form `ρ = C r^(2a) exp(−2ζr/n*)` with `a = n* − 1`, so its logarithmic
//! derivative `g = 2(a/r − ζ/n*)` is elementary and every higher derivative follows from Leibniz's
//! rule applied to `ρ' = gρ`:
//!
//! ```text
//! ρ''   = g'ρ + gρ'
//! ρ'''  = g''ρ + 2g'ρ' + gρ''
//! ρ'''' = g'''ρ + 3g''ρ' + 3g'ρ'' + gρ'''
//! ```
//!
//! with `g' = −2a/r²`, `g'' = 4a/r³` and `g''' = −12a/r⁴`.

use super::shielding::{effective_principal_quantum_number, normalization_constant, orbital_with_norm};
use crate::error::SlaterError;
use crate::shells::ShellDescriptor;
use crate::types::{DensityProfile, RadialOperators};

/// Density of one shell and its first four radial derivatives on the points `r`.
///
/// An empty shell short-circuits to five zero arrays without evaluating the orbital, whatever its
/// principal quantum number. An unbound shell (`Z − s ≤ 0`) is evaluated as is and yields NaN.
///
/// # Errors
///
/// Returns `SlaterError::MissingEffectiveQuantumNumber` if the shell is occupied and its principal
/// quantum number has no tabulated `n*`.
pub fn shell_density(
    shell: ShellDescriptor,
    shielding: f64,
    nuclear_charge: f64,
    occupancy: u32,
    r: &[f64],
) -> Result<DensityProfile, SlaterError> {
    if occupancy == 0 {
        return Ok(DensityProfile::zeros(r.len()));
    }

    let n_star = effective_principal_quantum_number(shell.principal).ok_or_else(|| {
        SlaterError::MissingEffectiveQuantumNumber {
            shell: shell.to_string(),
            principal: shell.principal,
        }
    })?;

    let norm = normalization_constant(shielding, n_star, nuclear_charge);
    let zeta = nuclear_charge - shielding;
    let a2 = 2.0 * (n_star - 1.0);
    let electrons = occupancy as f64;

    let mut profile = DensityProfile::zeros(r.len());
    for (i, &radius) in r.iter().enumerate() {
        let phi = orbital_with_norm(norm, shielding, n_star, nuclear_charge, radius);
        let inv = 1.0 / radius;

        let g = a2 * inv - 2.0 * zeta / n_star;
        let g1 = a2 * -inv * inv;
        let g2 = a2 * 2.0 * inv * inv * inv;
        let g3 = a2 * -6.0 * inv * inv * inv * inv;

        let d0 = electrons * phi * phi;
        let d1 = g * d0;
        let d2 = g1 * d0 + g * d1;
        let d3 = g2 * d0 + 2.0 * g1 * d1 + g * d2;
        let d4 = g3 * d0 + 3.0 * g2 * d1 + 3.0 * g1 * d2 + g * d3;

        profile.value[i] = d0;
        profile.d1[i] = d1;
        profile.d2[i] = d2;
        profile.d3[i] = d3;
        profile.d4[i] = d4;
    }
    Ok(profile)
}

/// Gradient, Laplacian and their compositions for a spherically symmetric density.
///
/// # Errors
///
/// Returns `SlaterError::LengthMismatch` if `r` and the profile differ in length.
pub fn radial_operators(profile: &DensityProfile, r: &[f64]) -> Result<RadialOperators, SlaterError> {
    if r.len() != profile.len() {
        return Err(SlaterError::LengthMismatch {
            expected: profile.len(),
            found: r.len(),
        });
    }

    let n = r.len();
    let mut laplacian = Vec::with_capacity(n);
    let mut grad_laplacian = Vec::with_capacity(n);
    let mut lapl_laplacian = Vec::with_capacity(n);

    for i in 0..n {
        let inv = 1.0 / r[i];
        laplacian.push(profile.d2[i] + 2.0 * profile.d1[i] * inv);
        grad_laplacian.push(profile.d3[i] + 2.0 * profile.d2[i] * inv - 2.0 * profile.d1[i] * inv * inv);
        lapl_laplacian.push(profile.d4[i] + 4.0 * profile.d3[i] * inv);
    }

    Ok(RadialOperators {
        density: profile.value.clone(),
        gradient: profile.d1.clone(),
        laplacian,
        grad_laplacian,
        lapl_laplacian,
    })
}
