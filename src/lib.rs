//! Radial electron densities of atoms from Slater's shielding rules.
//!
//! An [`Atom`] is built from a nuclear charge and the occupancy of each Slater shell group; its
//! shielding constants and total energy are derived once at construction. The
//! [`DensityCalculator`] then evaluates the normalized Slater-type orbital of every shell on a
//! [`RadialGrid`] and returns the total density, its first four radial derivatives and the
//! shell-by-shell decomposition.
//!
//! ```
//! use slater::{get_default_elements, DensityCalculator, RadialGrid};
//!
//! let carbon = get_default_elements().atom("C").unwrap();
//! let grid = RadialGrid::exponential(0.01, 5.0, 0.01).unwrap();
//! let result = DensityCalculator::new().compute(&carbon, &grid).unwrap();
//!
//! assert_eq!(result.components.len(), 2);
//! assert!(result.total.value.iter().all(|&rho| rho >= 0.0));
//! ```

pub mod analysis;
pub mod config;
pub mod density;
pub mod elements;
pub mod error;
pub mod grid;
pub mod math;
pub mod record;
pub mod shells;
pub mod types;

pub use config::Configuration;
pub use density::{ComponentPolicy, DensityCalculator, DensityOptions};
pub use elements::{ElementData, ElementTable};
pub use error::{ConfigurationError, GridError, SlaterError};
pub use grid::{GridScale, GridSpec, RadialGrid};
pub use record::{AtomRecord, ComponentRecord, DensityRequest, PlotType};
pub use shells::{Azimuthal, ShellDescriptor};
pub use types::{
    Atom, AtomView, DensityProfile, DensityResult, RadialOperators, ShellComponent, UnboundShell,
};

use std::sync::OnceLock;

static DEFAULT_ELEMENTS: OnceLock<ElementTable> = OnceLock::new();

/// The built-in periodic table, hydrogen through radium, parsed on first use.
pub fn get_default_elements() -> &'static ElementTable {
    DEFAULT_ELEMENTS.get_or_init(|| {
        const DEFAULT_ELEMENTS_TOML: &str = include_str!("../resources/elements.toml");
        ElementTable::load_from_str(DEFAULT_ELEMENTS_TOML)
            .expect("Failed to parse embedded element table. This is a library bug.")
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_default_elements() {
        let table1 = get_default_elements();
        assert_eq!(table1.len(), 88);
        assert_eq!(table1.lookup("H").unwrap().occupancy, vec![1]);
        assert_eq!(table1.lookup("Ra").unwrap().atomic_number, 88);

        let table2 = get_default_elements();
        assert_eq!(
            table1 as *const _, table2 as *const _,
            "Subsequent calls should return a cached reference"
        );
    }

    #[test]
    fn test_default_elements_are_neutral_and_valid() {
        for element in get_default_elements().iter() {
            let atom = element.to_atom().unwrap();
            assert_eq!(
                atom.net_charge(),
                0,
                "{} should be neutral",
                element.symbol().unwrap_or("?")
            );
        }
    }
}
