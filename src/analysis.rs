//! Numerical utilities for checking densities against each other or against reference data.
//!
//! These routines work on plain slices sampled on an arbitrary, possibly non-uniform, grid. Every
//! function that takes parallel arrays checks their lengths first.

use crate::error::SlaterError;
use std::f64::consts::PI;

fn check_len(expected: &[f64], other: &[f64]) -> Result<(), SlaterError> {
    if expected.len() != other.len() {
        return Err(SlaterError::LengthMismatch {
            expected: expected.len(),
            found: other.len(),
        });
    }
    Ok(())
}

fn check_points(x: &[f64], needed: usize) -> Result<(), SlaterError> {
    if x.len() < needed {
        return Err(SlaterError::InsufficientPoints {
            needed,
            found: x.len(),
        });
    }
    Ok(())
}

/// Trapezoid-rule integral of `f` over the points `x`.
///
/// A single point integrates to zero.
pub fn integrate(x: &[f64], f: &[f64]) -> Result<f64, SlaterError> {
    check_len(x, f)?;
    Ok(x.windows(2)
        .zip(f.windows(2))
        .map(|(xs, fs)| (xs[1] - xs[0]) * (fs[1] + fs[0]) * 0.5)
        .sum())
}

/// Integral of `4πr²ρ` over the grid, i.e. the number of electrons inside the outer radius.
pub fn radial_integral(r: &[f64], density: &[f64]) -> Result<f64, SlaterError> {
    check_len(r, density)?;
    let weighted: Vec<f64> = r
        .iter()
        .zip(density)
        .map(|(r, rho)| 4.0 * PI * r * r * rho)
        .collect();
    integrate(r, &weighted)
}

/// Centered first derivative, with one-sided differences at both ends.
pub fn approximate_derivative(x: &[f64], f: &[f64]) -> Result<Vec<f64>, SlaterError> {
    check_len(x, f)?;
    check_points(x, 2)?;
    let n = x.len();

    let mut derivative = Vec::with_capacity(n);
    derivative.push((f[1] - f[0]) / (x[1] - x[0]));
    for i in 1..n - 1 {
        derivative.push((f[i + 1] - f[i - 1]) / (x[i + 1] - x[i - 1]));
    }
    derivative.push((f[n - 1] - f[n - 2]) / (x[n - 1] - x[n - 2]));
    Ok(derivative)
}

/// Second derivative from differences of neighbouring slopes.
///
/// The end points use a three-point one-sided formula and are markedly less accurate than the
/// interior.
pub fn approximate_second_derivative(x: &[f64], f: &[f64]) -> Result<Vec<f64>, SlaterError> {
    check_len(x, f)?;
    check_points(x, 3)?;
    let n = x.len();

    let mut second = Vec::with_capacity(n);
    second.push(
        (f[2] - f[0]) / ((x[2] - x[0]) * (x[1] - x[0])) - (f[1] - f[0]) / (x[1] - x[0]).powi(2),
    );
    for i in 1..n - 1 {
        let right = (f[i + 1] - f[i]) / (x[i + 1] - x[i]);
        let left = (f[i] - f[i - 1]) / (x[i] - x[i - 1]);
        second.push((right - left) / ((x[i + 1] - x[i - 1]) / 2.0));
    }
    second.push(
        (f[n - 1] - f[n - 2]) / (x[n - 1] - x[n - 2]).powi(2)
            - (f[n - 1] - f[n - 3]) / ((x[n - 1] - x[n - 3]) * (x[n - 1] - x[n - 2])),
    );
    Ok(second)
}

/// Root-mean-square difference between two arrays.
pub fn rms_error(approx: &[f64], exact: &[f64]) -> Result<f64, SlaterError> {
    check_len(approx, exact)?;
    check_points(approx, 1)?;
    let sum: f64 = approx
        .iter()
        .zip(exact)
        .map(|(a, e)| (a - e).powi(2))
        .sum();
    Ok((sum / approx.len() as f64).sqrt())
}

/// Root-mean-square difference with per-point weights, normalized by the weight sum.
pub fn weighted_rms_error(weight: &[f64], approx: &[f64], exact: &[f64]) -> Result<f64, SlaterError> {
    check_len(approx, weight)?;
    check_len(approx, exact)?;
    let sum: f64 = weight
        .iter()
        .zip(approx.iter().zip(exact))
        .map(|(w, (a, e))| w * (a - e).powi(2))
        .sum();
    Ok((sum / weight.iter().sum::<f64>()).sqrt())
}

/// Weighted mean absolute error `Σ w|a − e| / Σ w`.
pub fn mare(weight: &[f64], approx: &[f64], exact: &[f64]) -> Result<f64, SlaterError> {
    check_len(approx, weight)?;
    check_len(approx, exact)?;
    let numerator: f64 = weight
        .iter()
        .zip(approx.iter().zip(exact))
        .map(|(w, (a, e))| w * (a - e).abs())
        .sum();
    Ok(numerator / weight.iter().sum::<f64>())
}

/// [`mare`] weighted by `r²ρ`, emphasising the regions that hold the electrons.
pub fn radial_mare(
    r: &[f64],
    density: &[f64],
    approx: &[f64],
    exact: &[f64],
) -> Result<f64, SlaterError> {
    check_len(r, density)?;
    let weight: Vec<f64> = r.iter().zip(density).map(|(r, rho)| r * r * rho).collect();
    mare(&weight, approx, exact)
}

/// Pointwise relative error `|e − a| / e`.
pub fn percentage_error(exact: &[f64], approx: &[f64]) -> Result<Vec<f64>, SlaterError> {
    check_len(exact, approx)?;
    Ok(exact
        .iter()
        .zip(approx)
        .map(|(e, a)| (e - a).abs() / e)
        .collect())
}
