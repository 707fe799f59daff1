//! This module defines the core types of the slater library: atoms and density results.
//!
//! It includes the `AtomView` trait for reading an atomic configuration out of any data source, the
//! immutable `Atom` value that carries its derived shielding constants and total energy, and the
//! result types produced by the density engine. An `Atom` never changes after construction;
//! configuration transforms build a new one, so derived data cannot go stale.

use crate::error::{ConfigurationError, SlaterError};
use crate::math::shielding;
use crate::shells::{self, Azimuthal, ShellDescriptor};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::fmt;

/// A trait for viewing an atomic configuration without owning it.
///
/// Element tables, JSON records and user types can all describe an atom by its nuclear charge and
/// shell occupancies. Implementing this trait lets any of them be turned into an [`Atom`] with
/// [`Atom::from_view`].
pub trait AtomView {
    /// Returns the nuclear charge `Z`.
    fn atomic_number(&self) -> u32;

    /// Returns the electron count of every shell slot, in shell-table order.
    fn occupancy(&self) -> &[u32];
}

/// An atom described by its nuclear charge and the occupancy of each Slater shell group.
///
/// Construction validates the configuration and derives the shielding constant of every slot and
/// the total energy. The fields are private so that these derived values always match the
/// occupancy they were computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    atomic_number: u32,
    occupancy: Vec<u32>,
    shielding: Vec<f64>,
    total_energy: f64,
}

impl Atom {
    /// Creates an atom from a nuclear charge and an occupancy list.
    ///
    /// # Errors
    ///
    /// Returns `SlaterError::InvalidConfiguration` if the atomic number is zero, the occupancy list
    /// is empty or longer than the shell table, or any shell holds more electrons than its group
    /// capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use slater::Atom;
    ///
    /// let helium = Atom::new(2, vec![2]).unwrap();
    /// assert!((helium.shielding_constants()[0] - 0.3).abs() < 1e-12);
    /// assert!((helium.total_energy() + 1.445).abs() < 1e-12);
    /// ```
    pub fn new(atomic_number: u32, occupancy: Vec<u32>) -> Result<Self, SlaterError> {
        validate_configuration(atomic_number, &occupancy)?;

        let shielding = shielding::shielding_constants(&occupancy);
        let total_energy = compute_total_energy(atomic_number, &occupancy, &shielding);

        Ok(Self {
            atomic_number,
            occupancy,
            shielding,
            total_energy,
        })
    }

    /// Creates an atom from any [`AtomView`].
    pub fn from_view<A: AtomView + ?Sized>(view: &A) -> Result<Self, SlaterError> {
        Self::new(view.atomic_number(), view.occupancy().to_vec())
    }

    /// Returns a new atom with the same nuclear charge and a different occupancy.
    ///
    /// All derived quantities are recomputed for the new occupancy.
    pub fn with_occupancy(&self, occupancy: Vec<u32>) -> Result<Self, SlaterError> {
        Self::new(self.atomic_number, occupancy)
    }

    /// Returns the nuclear charge `Z`.
    pub fn atomic_number(&self) -> u32 {
        self.atomic_number
    }

    /// Returns the electron count of every shell slot, in shell-table order.
    pub fn occupancy(&self) -> &[u32] {
        &self.occupancy
    }

    /// Shielding constant `s` of every slot, parallel to [`Atom::occupancy`].
    pub fn shielding_constants(&self) -> &[f64] {
        &self.shielding
    }

    /// Effective nuclear charge `Z − s` felt by slot `shell`.
    pub fn effective_charge(&self, shell: usize) -> Option<f64> {
        self.shielding
            .get(shell)
            .map(|s| self.atomic_number as f64 - s)
    }

    /// Effective nuclear charges of every slot.
    pub fn effective_charges(&self) -> Vec<f64> {
        self.shielding
            .iter()
            .map(|s| self.atomic_number as f64 - s)
            .collect()
    }

    /// Total energy in Hartree, summed over occupied shells.
    pub fn total_energy(&self) -> f64 {
        self.total_energy
    }

    /// Energy contribution of slot `shell` in Hartree; zero for an empty or missing slot.
    pub fn shell_energy(&self, shell: usize) -> f64 {
        match (self.occupancy.get(shell), self.shielding.get(shell)) {
            (Some(&n), Some(&s)) => shell_energy(self.atomic_number, n, s),
            _ => 0.0,
        }
    }

    /// Number of electrons over all shells.
    pub fn electron_count(&self) -> u32 {
        self.occupancy.iter().sum()
    }

    /// Net ionic charge `Z − electrons`.
    pub fn net_charge(&self) -> i64 {
        self.atomic_number as i64 - self.electron_count() as i64
    }

    /// The shell-table descriptors of this atom's slots.
    pub fn shells(&self) -> &'static [ShellDescriptor] {
        shells::descriptors(self.occupancy.len())
    }

    /// Integer principal quantum number of every slot.
    pub fn principal_quantum_numbers(&self) -> Vec<u8> {
        self.shells().iter().map(|d| d.principal).collect()
    }

    /// Azimuthal group of every slot.
    pub fn azimuthal_labels(&self) -> Vec<Azimuthal> {
        self.shells().iter().map(|d| d.azimuthal).collect()
    }

    /// Legend labels of every slot, e.g. `"2sp subshell"`.
    pub fn subshell_labels(&self) -> Vec<String> {
        self.shells().iter().map(|d| d.subshell_label()).collect()
    }

    /// Index of the highest occupied slot.
    pub fn outermost_shell(&self) -> Option<usize> {
        self.occupancy.iter().rposition(|&n| n > 0)
    }

    /// Occupied shells whose shielding is not smaller than the nuclear charge.
    pub fn unbound_shells(&self) -> Vec<UnboundShell> {
        self.occupancy
            .iter()
            .zip(&self.shielding)
            .zip(self.shells())
            .enumerate()
            .filter(|(_, ((n, s), _))| **n > 0 && self.atomic_number as f64 - **s <= 0.0)
            .map(|(index, ((_, &shielding), &shell))| UnboundShell {
                index,
                shell,
                shielding,
                nuclear_charge: self.atomic_number,
            })
            .collect()
    }

    /// Returns `true` if every occupied shell feels a positive effective charge.
    pub fn is_bound(&self) -> bool {
        self.unbound_shells().is_empty()
    }
}

impl AtomView for Atom {
    #[inline(always)]
    fn atomic_number(&self) -> u32 {
        self.atomic_number
    }

    #[inline(always)]
    fn occupancy(&self) -> &[u32] {
        &self.occupancy
    }
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text: Vec<String> = self.occupancy.iter().map(u32::to_string).collect();
        write!(
            f,
            "Z = {}, occupancy = {}, total energy = {:.6} Ha",
            self.atomic_number,
            text.join("."),
            self.total_energy
        )
    }
}

fn validate_configuration(atomic_number: u32, occupancy: &[u32]) -> Result<(), ConfigurationError> {
    if atomic_number == 0 {
        return Err(ConfigurationError::ZeroAtomicNumber);
    }
    if occupancy.is_empty() {
        return Err(ConfigurationError::EmptyOccupancy);
    }
    if occupancy.len() > shells::SHELL_COUNT {
        return Err(ConfigurationError::TooManyShells {
            len: occupancy.len(),
            max: shells::SHELL_COUNT,
        });
    }
    for (index, (&n, shell)) in occupancy.iter().zip(shells::SHELL_TABLE.iter()).enumerate() {
        if n > shell.capacity() {
            return Err(ConfigurationError::ShellOverfilled {
                index,
                label: shell.to_string(),
                occupancy: n,
                capacity: shell.capacity(),
            });
        }
    }
    Ok(())
}

/// Hydrogenic energy of one shell, `N ((Z − s) / N)² (−1 Ha)`.
fn shell_energy(atomic_number: u32, occupancy: u32, shielding: f64) -> f64 {
    if occupancy == 0 {
        return 0.0;
    }
    let n = occupancy as f64;
    n * ((atomic_number as f64 - shielding) / n).powi(2) * -1.0
}

fn compute_total_energy(atomic_number: u32, occupancy: &[u32], shielding: &[f64]) -> f64 {
    occupancy
        .iter()
        .zip(shielding)
        .map(|(&n, &s)| shell_energy(atomic_number, n, s))
        .sum()
}

/// An occupied shell whose shielding reaches the nuclear charge.
///
/// The density of such a shell is physically meaningless; the engine still evaluates it and the
/// numbers come out as NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnboundShell {
    /// Slot index in the occupancy list.
    pub index: usize,
    /// Descriptor of the slot.
    pub shell: ShellDescriptor,
    /// Shielding constant of the slot.
    pub shielding: f64,
    /// Nuclear charge of the atom.
    pub nuclear_charge: u32,
}

impl UnboundShell {
    /// Effective charge `Z − s`, zero or negative for an unbound shell.
    pub fn effective_charge(&self) -> f64 {
        self.nuclear_charge as f64 - self.shielding
    }
}

impl fmt::Display for UnboundShell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unbound atom: shell {} shielding {:.4} reaches nuclear charge {}",
            self.shell, self.shielding, self.nuclear_charge
        )
    }
}

/// A density and its first four radial derivatives, sampled on a radial grid.
///
/// The five arrays always have the grid's length. The serialized field names are the exchange
/// schema used by JSON records; non-finite samples (from unbound shells) are written as the strings
/// `"NaN"`, `"Infinity"` and `"-Infinity"` so that records read back unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DensityProfile {
    /// `ρ(r)`.
    #[serde(with = "float_array")]
    pub value: Vec<f64>,
    /// `ρ'(r)`.
    #[serde(with = "float_array")]
    pub d1: Vec<f64>,
    /// `ρ''(r)`.
    #[serde(with = "float_array")]
    pub d2: Vec<f64>,
    /// `ρ'''(r)`.
    #[serde(with = "float_array")]
    pub d3: Vec<f64>,
    /// `ρ''''(r)`.
    #[serde(with = "float_array")]
    pub d4: Vec<f64>,
}

impl DensityProfile {
    /// A profile of `len` zeros, as produced by an empty shell.
    pub fn zeros(len: usize) -> Self {
        Self {
            value: vec![0.0; len],
            d1: vec![0.0; len],
            d2: vec![0.0; len],
            d3: vec![0.0; len],
            d4: vec![0.0; len],
        }
    }

    /// Number of grid points sampled.
    pub fn len(&self) -> usize {
        self.value.len()
    }

    /// Returns `true` if the profile holds no samples.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// The array of derivative order `order` (0 is the density itself).
    pub fn order(&self, order: usize) -> Option<&[f64]> {
        match order {
            0 => Some(&self.value),
            1 => Some(&self.d1),
            2 => Some(&self.d2),
            3 => Some(&self.d3),
            4 => Some(&self.d4),
            _ => None,
        }
    }

    /// All five arrays, ordered by derivative order.
    pub fn arrays(&self) -> [&[f64]; 5] {
        [&self.value, &self.d1, &self.d2, &self.d3, &self.d4]
    }

    /// Adds another profile of the same length point by point.
    pub fn accumulate(&mut self, other: &DensityProfile) {
        let targets = [
            &mut self.value,
            &mut self.d1,
            &mut self.d2,
            &mut self.d3,
            &mut self.d4,
        ];
        for (target, source) in targets.into_iter().zip(other.arrays()) {
            for (t, s) in target.iter_mut().zip(source) {
                *t += s;
            }
        }
    }

    /// Multiplies every array by the shell volume factor `4πr²`.
    ///
    /// This is a display weighting: each derivative array is scaled as-is, it is not the derivative
    /// of `4πr²ρ`.
    pub fn shell_volume_weighted(&self, radii: &[f64]) -> Result<Self, SlaterError> {
        if radii.len() != self.len() {
            return Err(SlaterError::LengthMismatch {
                expected: self.len(),
                found: radii.len(),
            });
        }
        let weight = |values: &[f64]| -> Vec<f64> {
            values
                .iter()
                .zip(radii)
                .map(|(v, r)| 4.0 * PI * r * r * v)
                .collect()
        };
        Ok(Self {
            value: weight(&self.value),
            d1: weight(&self.d1),
            d2: weight(&self.d2),
            d3: weight(&self.d3),
            d4: weight(&self.d4),
        })
    }
}

/// The density contribution of one shell slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ShellComponent {
    /// Slot index in the atom's occupancy list.
    pub index: usize,
    pub shell: ShellDescriptor,
    pub occupancy: u32,
    pub shielding: f64,
    pub profile: DensityProfile,
}

impl ShellComponent {
    /// Legend label, e.g. `"3d subshell"`.
    pub fn label(&self) -> String {
        self.shell.subshell_label()
    }
}

/// The output of a density calculation on one atom and grid.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityResult {
    /// Sum of every shell's density and derivatives.
    pub total: DensityProfile,
    /// Per-shell contributions in slot order.
    pub components: Vec<ShellComponent>,
    /// Total energy of the atom in Hartree.
    pub total_energy: f64,
    /// Occupied shells that are not bound; their contributions are NaN.
    pub warnings: Vec<UnboundShell>,
}

impl DensityResult {
    /// Legend labels of the components, in component order.
    pub fn component_labels(&self) -> Vec<String> {
        self.components.iter().map(ShellComponent::label).collect()
    }

    /// Returns `true` if no shell was reported unbound.
    pub fn is_bound(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Radial differential operators applied to a spherically symmetric density.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadialOperators {
    /// `ρ`.
    #[serde(serialize_with = "float_array::serialize")]
    pub density: Vec<f64>,
    /// `ρ'`.
    #[serde(serialize_with = "float_array::serialize")]
    pub gradient: Vec<f64>,
    /// `ρ'' + 2ρ'/r`.
    #[serde(serialize_with = "float_array::serialize")]
    pub laplacian: Vec<f64>,
    /// `ρ''' + 2ρ''/r − 2ρ'/r²`.
    #[serde(serialize_with = "float_array::serialize")]
    pub grad_laplacian: Vec<f64>,
    /// `ρ'''' + 4ρ'''/r`.
    #[serde(serialize_with = "float_array::serialize")]
    pub lapl_laplacian: Vec<f64>,
}

/// Serde adapter for sampled arrays that may hold NaN or infinities.
///
/// JSON has no literal for non-finite numbers and `serde_json` writes them as `null`, which does not
/// read back into an `f64`. Finite samples stay numbers; the others become strings.
mod float_array {
    use serde::de::{self, Deserializer};
    use serde::ser::{SerializeSeq, Serializer};
    use serde::{Deserialize, Serialize};

    const NAN: &str = "NaN";
    const INFINITY: &str = "Infinity";
    const NEG_INFINITY: &str = "-Infinity";

    #[derive(Serialize, Deserialize)]
    #[serde(untagged)]
    enum Sample {
        Number(f64),
        Text(String),
    }

    impl Sample {
        fn from_f64(value: f64) -> Self {
            if value.is_finite() {
                Sample::Number(value)
            } else if value.is_nan() {
                Sample::Text(NAN.to_string())
            } else if value > 0.0 {
                Sample::Text(INFINITY.to_string())
            } else {
                Sample::Text(NEG_INFINITY.to_string())
            }
        }

        fn into_f64(self) -> Result<f64, String> {
            match self {
                Sample::Number(value) => Ok(value),
                Sample::Text(text) => match text.as_str() {
                    NAN => Ok(f64::NAN),
                    INFINITY => Ok(f64::INFINITY),
                    NEG_INFINITY => Ok(f64::NEG_INFINITY),
                    _ => Err(format!("'{}' is not a density sample", text)),
                },
            }
        }
    }

    pub fn serialize<S: Serializer>(values: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for &value in values {
            seq.serialize_element(&Sample::from_f64(value))?;
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        Vec::<Sample>::deserialize(deserializer)?
            .into_iter()
            .map(|sample| sample.into_f64().map_err(de::Error::custom))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_helium_golden_values() {
        let helium = Atom::new(2, vec![2]).unwrap();
        assert_relative_eq!(helium.shielding_constants()[0], 0.3, epsilon = 1e-12);
        assert_relative_eq!(helium.effective_charge(0).unwrap(), 1.7, epsilon = 1e-12);
        // 2 * (1.7 / 2)^2 * -1
        assert_relative_eq!(helium.total_energy(), -1.445, epsilon = 1e-12);
    }

    #[test]
    fn test_energy_skips_empty_shells() {
        let potassium = Atom::new(19, vec![2, 8, 8, 0, 1]).unwrap();
        assert_eq!(potassium.shell_energy(3), 0.0);
        let summed: f64 = (0..5).map(|i| potassium.shell_energy(i)).sum();
        assert_relative_eq!(potassium.total_energy(), summed, epsilon = 1e-12);
        assert!(potassium.total_energy().is_finite());
    }

    #[test]
    fn test_rejects_invalid_configurations() {
        assert!(matches!(
            Atom::new(0, vec![1]),
            Err(SlaterError::InvalidConfiguration(ConfigurationError::ZeroAtomicNumber))
        ));
        assert!(matches!(
            Atom::new(1, vec![]),
            Err(SlaterError::InvalidConfiguration(ConfigurationError::EmptyOccupancy))
        ));
        assert!(matches!(
            Atom::new(3, vec![3]),
            Err(SlaterError::InvalidConfiguration(
                ConfigurationError::ShellOverfilled { index: 0, capacity: 2, .. }
            ))
        ));
        assert!(matches!(
            Atom::new(200, vec![0; shells::SHELL_COUNT + 1]),
            Err(SlaterError::InvalidConfiguration(ConfigurationError::TooManyShells { .. }))
        ));
    }

    #[test]
    fn test_labels_follow_shell_table() {
        let iron = Atom::new(26, vec![2, 8, 8, 6, 2]).unwrap();
        assert_eq!(iron.principal_quantum_numbers(), vec![1, 2, 3, 3, 4]);
        assert_eq!(
            iron.azimuthal_labels(),
            vec![Azimuthal::S, Azimuthal::Sp, Azimuthal::Sp, Azimuthal::D, Azimuthal::Sp]
        );
        assert_eq!(iron.subshell_labels()[3], "3d subshell");
        assert_eq!(iron.electron_count(), 26);
        assert_eq!(iron.net_charge(), 0);
        assert_eq!(iron.outermost_shell(), Some(4));
    }

    #[test]
    fn test_unbound_shell_detection() {
        // a bare 2sp electron cloud around a proton: 0.85 * 2 + 0.35 * 7 > 1
        let atom = Atom::new(1, vec![2, 8]).unwrap();
        let unbound = atom.unbound_shells();
        assert!(!atom.is_bound());
        assert_eq!(unbound.len(), 1);
        assert_eq!(unbound[0].index, 1);
        assert!(unbound[0].effective_charge() < 0.0);
        assert!(unbound[0].to_string().contains("2sp"));
    }

    #[test]
    fn test_with_occupancy_recomputes_derived_values() {
        let sodium = Atom::new(11, vec![2, 8, 1]).unwrap();
        let cation = sodium.with_occupancy(vec![2, 8]).unwrap();
        assert_eq!(cation.shielding_constants().len(), 2);
        assert_ne!(cation.total_energy(), sodium.total_energy());
        assert_eq!(cation.net_charge(), 1);
    }

    #[test]
    fn test_profile_accumulate_and_weighting() {
        let mut total = DensityProfile::zeros(2);
        let mut part = DensityProfile::zeros(2);
        part.value = vec![1.0, 2.0];
        part.d4 = vec![-1.0, 0.5];
        total.accumulate(&part);
        total.accumulate(&part);
        assert_eq!(total.value, vec![2.0, 4.0]);
        assert_eq!(total.order(4).unwrap(), &[-2.0, 1.0]);
        assert!(total.order(5).is_none());

        let weighted = total.shell_volume_weighted(&[1.0, 0.5]).unwrap();
        assert_relative_eq!(weighted.value[0], 8.0 * PI, epsilon = 1e-12);
        assert_relative_eq!(weighted.value[1], 4.0 * PI, epsilon = 1e-12);
        assert!(total.shell_volume_weighted(&[1.0]).is_err());
    }
}
