//! This module implements the `DensityCalculator`, which evaluates Slater-model densities.
//!
//! The calculator evaluates every selected shell of an [`Atom`] on a [`RadialGrid`] with the
//! closed-form kernel of [`crate::math::derivatives`], then sums the shell profiles in slot order.
//! Unbound shells are logged and attached to the result as warnings; their NaN values propagate into
//! the total unchanged.

use super::options::{ComponentPolicy, DensityOptions};
use crate::{
    error::SlaterError,
    grid::RadialGrid,
    math::derivatives,
    types::{Atom, AtomView, DensityProfile, DensityResult, RadialOperators, ShellComponent},
};
use rayon::prelude::*;

/// The density engine.
///
/// The calculator holds only its options, so one instance can serve any number of atoms and grids.
#[derive(Debug, Clone, Default)]
pub struct DensityCalculator {
    options: DensityOptions,
}

impl DensityCalculator {
    /// Creates a calculator with default options.
    ///
    /// # Examples
    ///
    /// ```
    /// use slater::{Atom, DensityCalculator, RadialGrid};
    ///
    /// let helium = Atom::new(2, vec![2]).unwrap();
    /// let grid = RadialGrid::uniform(0.01, 5.0, 0.01).unwrap();
    /// let result = DensityCalculator::new().compute(&helium, &grid).unwrap();
    ///
    /// assert_eq!(result.total.len(), grid.point_count());
    /// assert_eq!(result.components.len(), 1);
    /// ```
    pub fn new() -> Self {
        Self {
            options: DensityOptions::default(),
        }
    }

    /// Configures the calculator with custom options.
    ///
    /// # Examples
    ///
    /// ```
    /// use slater::{ComponentPolicy, DensityCalculator, DensityOptions};
    ///
    /// let calculator = DensityCalculator::new().with_options(DensityOptions {
    ///     component_policy: ComponentPolicy::OccupiedOnly,
    ///     parallel: true,
    /// });
    /// ```
    pub fn with_options(mut self, options: DensityOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the current options.
    pub fn options(&self) -> &DensityOptions {
        &self.options
    }

    /// Computes the total density, its first four radial derivatives and the shell decomposition.
    ///
    /// # Errors
    ///
    /// Returns `SlaterError::MissingEffectiveQuantumNumber` if an occupied shell has a principal
    /// quantum number beyond the tabulated effective values. Unbound shells are not errors; they
    /// are listed in [`DensityResult::warnings`].
    pub fn compute(&self, atom: &Atom, grid: &RadialGrid) -> Result<DensityResult, SlaterError> {
        let warnings = atom.unbound_shells();
        for warning in &warnings {
            log::warn!("Z = {}: {}", atom.atomic_number(), warning);
        }

        let slots = self.selected_slots(atom);
        let evaluate = |&index: &usize| evaluate_shell(atom, index, grid.points());

        let components: Vec<ShellComponent> = if self.options.parallel {
            slots.par_iter().map(evaluate).collect::<Result<_, _>>()?
        } else {
            slots.iter().map(evaluate).collect::<Result<_, _>>()?
        };

        let mut total = DensityProfile::zeros(grid.point_count());
        for component in &components {
            total.accumulate(&component.profile);
        }

        log::debug!(
            "Density for Z = {} summed over {} components on {} points",
            atom.atomic_number(),
            components.len(),
            grid.point_count()
        );

        Ok(DensityResult {
            total,
            components,
            total_energy: atom.total_energy(),
            warnings,
        })
    }

    /// Builds an [`Atom`] from any [`AtomView`] and computes its density.
    pub fn compute_view<A: AtomView + ?Sized>(
        &self,
        atom: &A,
        grid: &RadialGrid,
    ) -> Result<DensityResult, SlaterError> {
        self.compute(&Atom::from_view(atom)?, grid)
    }

    /// Computes densities for several atoms on one grid, preserving input order.
    pub fn compute_batch(
        &self,
        atoms: &[Atom],
        grid: &RadialGrid,
    ) -> Result<Vec<DensityResult>, SlaterError> {
        if self.options.parallel {
            atoms.par_iter().map(|atom| self.compute(atom, grid)).collect()
        } else {
            atoms.iter().map(|atom| self.compute(atom, grid)).collect()
        }
    }

    /// Gradient, Laplacian and their compositions of the total density.
    pub fn radial_operators(
        &self,
        atom: &Atom,
        grid: &RadialGrid,
    ) -> Result<RadialOperators, SlaterError> {
        let result = self.compute(atom, grid)?;
        derivatives::radial_operators(&result.total, grid.points())
    }

    fn selected_slots(&self, atom: &Atom) -> Vec<usize> {
        let occupancy = atom.occupancy();
        match self.options.component_policy {
            ComponentPolicy::AllShells => (0..occupancy.len()).collect(),
            ComponentPolicy::OccupiedOnly => (0..occupancy.len())
                .filter(|&index| occupancy[index] > 0)
                .collect(),
        }
    }
}

fn evaluate_shell(atom: &Atom, index: usize, r: &[f64]) -> Result<ShellComponent, SlaterError> {
    let shell = atom.shells()[index];
    let occupancy = atom.occupancy()[index];
    let shielding = atom.shielding_constants()[index];

    log::debug!(
        "Shell {} of Z = {}: occupancy {}, shielding {:.4}",
        shell,
        atom.atomic_number(),
        occupancy,
        shielding
    );

    let profile = derivatives::shell_density(
        shell,
        shielding,
        atom.atomic_number() as f64,
        occupancy,
        r,
    )?;

    Ok(ShellComponent {
        index,
        shell,
        occupancy,
        shielding,
        profile,
    })
}
