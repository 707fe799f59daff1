//! This module defines the physical constants and numerical defaults used throughout the slater library.
//!
//! Lengths are carried in Bohr radii and energies in Hartree internally. The conversion factors below
//! are only applied at presentation boundaries, and the grid defaults mirror the sampling that the
//! density plots have traditionally been produced on.

/// Conversion factor from Bohr radii to angstroms.
///
/// The value is approximately 0.529 Å per Bohr radius.
pub const BOHR_TO_ANGSTROM: f64 = 0.529_177_210_903;

/// Conversion factor from Hartree energy units to electron volts.
///
/// Total energies are reported in Hartree; this factor is used when a report also wants eV.
pub const HARTREE_TO_EV: f64 = 27.211_386_245_988;

/// Smallest radius accepted as the first point of a radial grid.
///
/// Every density derivative divides by `r`, so grids must stay strictly away from the origin.
pub const MIN_GRID_RADIUS_BOHR: f64 = 1e-12;

/// Default first radius of generated grids, in Bohr.
pub const DEFAULT_GRID_START_BOHR: f64 = 0.01;

/// Default spacing of uniform grids, in Bohr.
pub const DEFAULT_GRID_STEP_BOHR: f64 = 0.01;

/// Default outer radius of generated grids, in Bohr.
pub const DEFAULT_GRID_MAX_RADIUS_BOHR: f64 = 5.0;

/// Default ratio between neighbouring points of a geometric grid.
pub const DEFAULT_GRID_GROWTH: f64 = 1.05;

/// Largest number of points a grid generator will produce.
///
/// Every shell allocates five arrays of the grid's length, so parameters asking for more points are
/// rejected instead of allocated.
pub const MAX_GRID_POINTS: usize = 1_000_000;
