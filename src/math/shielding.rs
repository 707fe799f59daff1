use super::gamma::gamma_real;
use crate::shells::{self, Azimuthal};
use std::f64::consts::PI;

/// Screening by the other electron of a `1s` pair.
pub const ONE_S_SCREENING: f64 = 0.30;
/// Screening by another electron of the same group.
pub const SAME_GROUP_SCREENING: f64 = 0.35;
/// Screening of an `sp` electron by electrons one principal quantum number further in.
pub const SEMICORE_SCREENING: f64 = 0.85;
/// Screening by electrons of every other inner group.
pub const CORE_SCREENING: f64 = 1.0;

/// Contribution of the electrons of group `screening` to the shielding felt by group `shell`.
///
/// Only `screening <= shell` contributes; outer groups do not screen inner ones.
#[inline]
pub fn screening_contribution(occupancy: &[u32], shell: usize, screening: usize) -> f64 {
    if screening > shell {
        return 0.0;
    }
    let own = occupancy[shell] as f64;
    if shell == 0 {
        return ONE_S_SCREENING * (own - 1.0);
    }
    if screening == shell {
        return SAME_GROUP_SCREENING * (own - 1.0);
    }

    let outer = shells::SHELL_TABLE[shell];
    let inner = shells::SHELL_TABLE[screening];
    let count = occupancy[screening] as f64;

    if outer.azimuthal == Azimuthal::Sp && inner.principal + 1 == outer.principal {
        SEMICORE_SCREENING * count
    } else {
        CORE_SCREENING * count
    }
}

/// Shielding constant `s` of slot `shell`, summing over every group `j <= shell`.
#[inline]
pub fn shielding_constant(occupancy: &[u32], shell: usize) -> f64 {
    (0..=shell)
        .map(|screening| screening_contribution(occupancy, shell, screening))
        .sum()
}

/// Shielding constants for every slot of an occupancy list.
///
/// The caller guarantees `occupancy.len() <= shells::SHELL_COUNT`.
pub fn shielding_constants(occupancy: &[u32]) -> Vec<f64> {
    (0..occupancy.len())
        .map(|shell| shielding_constant(occupancy, shell))
        .collect()
}

/// Slater's effective principal quantum number `n*` for an integer principal quantum number.
///
/// The values for `N = 4` and `N = 6` are Slater's empirical corrections. No value is defined
/// beyond `N = 6`.
#[inline]
pub fn effective_principal_quantum_number(principal: u8) -> Option<f64> {
    match principal {
        1 => Some(1.0),
        2 => Some(2.0),
        3 => Some(3.0),
        4 => Some(3.7),
        5 => Some(4.0),
        6 => Some(4.2),
        _ => None,
    }
}

/// Normalization constant of a Slater-type orbital,
/// `A = sqrt[(2ζ)^(2n*+1) / (4π n*^(2n*+1) Γ(2n*+1))]` with `ζ = Z − s`.
///
/// An unbound shell (`Z − s < 0`) is not intercepted here; the result is then NaN.
#[inline]
pub fn normalization_constant(shielding: f64, n_star: f64, nuclear_charge: f64) -> f64 {
    let effective_charge = nuclear_charge - shielding;
    let exponent = 2.0 * n_star + 1.0;
    ((2.0 * effective_charge).powf(exponent)
        / (4.0 * PI * n_star.powf(exponent) * gamma_real(exponent)))
    .sqrt()
}

/// Slater-type orbital `φ(r) = A r^(n*−1) exp(−(Z − s) r / n*)`.
#[inline]
pub fn orbital_wavefunction(shielding: f64, n_star: f64, nuclear_charge: f64, r: f64) -> f64 {
    let norm = normalization_constant(shielding, n_star, nuclear_charge);
    orbital_with_norm(norm, shielding, n_star, nuclear_charge, r)
}

/// Orbital evaluation with a precomputed normalization constant, for use over whole grids.
#[inline]
pub(crate) fn orbital_with_norm(
    norm: f64,
    shielding: f64,
    n_star: f64,
    nuclear_charge: f64,
    r: f64,
) -> f64 {
    norm * r.powf(n_star - 1.0) * (-(nuclear_charge - shielding) * r / n_star).exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_one_s_pair_shielding() {
        assert_relative_eq!(shielding_constant(&[2], 0), 0.3, epsilon = 1e-12);
        assert_relative_eq!(shielding_constant(&[1], 0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_second_row_shielding() {
        // carbon 2sp: 0.35 * 3 + 0.85 * 2
        let shielding = shielding_constants(&[2, 4]);
        assert_relative_eq!(shielding[1], 2.75, epsilon = 1e-12);
    }

    #[test]
    fn test_d_group_is_fully_screened_by_inner_groups() {
        // zinc 3d: 0.35 * 9 + 1.0 * (2 + 8 + 8)
        let shielding = shielding_constants(&[2, 8, 8, 10, 2]);
        assert_relative_eq!(shielding[3], 21.15, epsilon = 1e-12);
        // zinc 4sp: 0.35 * 1 + 0.85 * (8 + 10) + 1.0 * (2 + 8)
        assert_relative_eq!(shielding[4], 25.65, epsilon = 1e-12);
    }

    #[test]
    fn test_outer_groups_do_not_screen_inner_ones() {
        assert_eq!(screening_contribution(&[2, 8, 1], 1, 2), 0.0);
        let without_outer = shielding_constants(&[2, 8]);
        let with_outer = shielding_constants(&[2, 8, 1]);
        assert_eq!(without_outer[..], with_outer[..2]);
    }

    #[test]
    fn test_effective_principal_quantum_numbers() {
        assert_eq!(effective_principal_quantum_number(1), Some(1.0));
        assert_eq!(effective_principal_quantum_number(4), Some(3.7));
        assert_eq!(effective_principal_quantum_number(6), Some(4.2));
        assert_eq!(effective_principal_quantum_number(7), None);
        assert_eq!(effective_principal_quantum_number(0), None);
    }

    #[test]
    fn test_hydrogen_normalization_is_one_over_sqrt_pi() {
        let norm = normalization_constant(0.0, 1.0, 1.0);
        assert_relative_eq!(norm, 1.0 / PI.sqrt(), max_relative = 1e-12);
        let phi = orbital_wavefunction(0.0, 1.0, 1.0, 0.5);
        assert_relative_eq!(phi, (-0.5f64).exp() / PI.sqrt(), max_relative = 1e-12);
    }

    #[test]
    fn test_unbound_shell_normalization_is_not_finite() {
        let norm = normalization_constant(3.0, 2.0, 2.0);
        assert!(norm.is_nan());
    }
}
