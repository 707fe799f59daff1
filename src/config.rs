//! Configuration transforms that derive a new atom from an existing one.
//!
//! Each transform is a pure function of the input atom and returns a freshly constructed [`Atom`],
//! so shielding constants and energies are always recomputed for the new occupancy.

use crate::error::{ConfigurationError, SlaterError};
use crate::shells;
use crate::types::Atom;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kinds of electronic configuration that can be derived from a neutral atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Configuration {
    /// The atom as given.
    #[default]
    Normal,
    /// Only the outermost occupied shell is kept.
    Valence,
    /// One electron removed from the outermost occupied shell.
    PositiveIon,
    /// One electron added to the outermost shell, or to the next slot when it is full.
    NegativeIon,
    /// The helium-like `1s²` core alone.
    InnerShell,
}

impl Configuration {
    /// Applies the transform to `atom`, returning a new atom.
    ///
    /// # Errors
    ///
    /// `PositiveIon` fails with `NoElectronsToRemove` on an atom without electrons and
    /// `NegativeIon` fails with `NoVacancy` when no slot can take another electron.
    ///
    /// # Examples
    ///
    /// ```
    /// use slater::{Atom, Configuration};
    ///
    /// let potassium = Atom::new(19, vec![2, 8, 8, 0, 1]).unwrap();
    /// let valence = Configuration::Valence.apply(&potassium).unwrap();
    /// assert_eq!(valence.occupancy(), &[0, 0, 0, 0, 1]);
    /// ```
    pub fn apply(self, atom: &Atom) -> Result<Atom, SlaterError> {
        match self {
            Configuration::Normal => Ok(atom.clone()),
            Configuration::Valence => atom.with_occupancy(valence_occupancy(atom.occupancy())),
            Configuration::PositiveIon => {
                atom.with_occupancy(positive_ion_occupancy(atom.occupancy())?)
            }
            Configuration::NegativeIon => {
                atom.with_occupancy(negative_ion_occupancy(atom.occupancy())?)
            }
            Configuration::InnerShell => atom.with_occupancy(vec![2]),
        }
    }

    /// Human-readable name used in reports.
    pub fn description(self) -> &'static str {
        match self {
            Configuration::Normal => "Normal",
            Configuration::Valence => "Valence Shell",
            Configuration::PositiveIon => "Positive Ion",
            Configuration::NegativeIon => "Negative Ion",
            Configuration::InnerShell => "1s^2 Shell",
        }
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

fn valence_occupancy(occupancy: &[u32]) -> Vec<u32> {
    let mut valence = vec![0; occupancy.len()];
    if let Some(outermost) = occupancy.iter().rposition(|&n| n > 0) {
        valence[outermost] = occupancy[outermost];
    }
    valence
}

fn positive_ion_occupancy(occupancy: &[u32]) -> Result<Vec<u32>, ConfigurationError> {
    let outermost = occupancy
        .iter()
        .rposition(|&n| n > 0)
        .ok_or(ConfigurationError::NoElectronsToRemove)?;

    let mut ion = occupancy.to_vec();
    ion[outermost] -= 1;
    while ion.len() > 1 && ion.last() == Some(&0) {
        ion.pop();
    }
    Ok(ion)
}

fn negative_ion_occupancy(occupancy: &[u32]) -> Result<Vec<u32>, ConfigurationError> {
    let mut ion = occupancy.to_vec();
    let Some(outermost) = occupancy.iter().rposition(|&n| n > 0) else {
        ion[0] += 1;
        return Ok(ion);
    };

    if ion[outermost] < shells::SHELL_TABLE[outermost].capacity() {
        ion[outermost] += 1;
        return Ok(ion);
    }

    let next = outermost + 1;
    if next >= shells::SHELL_COUNT {
        return Err(ConfigurationError::NoVacancy);
    }
    if next < ion.len() {
        ion[next] += 1;
    } else {
        ion.push(1);
    }
    Ok(ion)
}
