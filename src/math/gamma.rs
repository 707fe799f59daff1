//! Lanczos approximation of the Gamma function.
//!
//! The normalization of a Slater-type orbital with a non-integer effective quantum number needs
//! `Γ(2n* + 1)` at arguments such as 8.4 or 9.4, so a factorial table is not enough. The evaluation
//! works over complex arguments and uses the reflection formula for the left half plane.

use num_complex::Complex64;
use std::f64::consts::PI;

const LANCZOS_G: f64 = 7.0;

const LANCZOS_COEFFICIENTS: [f64; 9] = [
    0.999_999_999_999_809_93,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_13,
    -176.615_029_162_140_59,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_571_6e-6,
    1.505_632_735_149_311_6e-7,
];

/// Evaluates `Γ(z)` for a complex argument.
///
/// Arguments with `Re(z) < 0.5` go through the reflection formula
/// `Γ(z) = π / (sin(πz) Γ(1 − z))`; all others are evaluated with the `g = 7`, nine-term Lanczos
/// series. The result agrees with tabulated values to better than 1e-10 relative error on the
/// positive real axis.
///
/// Non-positive integers are poles. They are not intercepted: the reflection formula divides by
/// `sin(πz) = 0` there and the result carries infinite or NaN components.
///
/// # Examples
///
/// ```
/// use num_complex::Complex64;
/// use slater::math::gamma::gamma;
///
/// let value = gamma(Complex64::new(4.0, 0.0));
/// assert!((value.re - 6.0).abs() < 1e-9);
/// ```
pub fn gamma(z: Complex64) -> Complex64 {
    if z.re < 0.5 {
        let pi = Complex64::new(PI, 0.0);
        return pi / ((pi * z).sin() * gamma(Complex64::new(1.0, 0.0) - z));
    }

    let z = z - 1.0;
    let series = LANCZOS_COEFFICIENTS
        .iter()
        .enumerate()
        .skip(1)
        .fold(Complex64::new(LANCZOS_COEFFICIENTS[0], 0.0), |acc, (i, &c)| {
            acc + c / (z + i as f64)
        });
    let t = z + LANCZOS_G + 0.5;

    (2.0 * PI).sqrt() * t.powc(z + 0.5) * (-t).exp() * series
}

/// Evaluates `Γ(x)` for a real argument.
///
/// This is the real part of [`gamma`] on the real axis, where the imaginary part vanishes.
#[inline]
pub fn gamma_real(x: f64) -> f64 {
    gamma(Complex64::new(x, 0.0)).re
}
