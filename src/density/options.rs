//! This module defines configuration options for the density engine.

/// Which shell slots appear as entries of [`DensityResult::components`].
///
/// The total density is the same under both policies; only the decomposition changes.
///
/// [`DensityResult::components`]: crate::types::DensityResult::components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ComponentPolicy {
    /// Every slot of the occupancy list, with empty slots as zero profiles, so that component `i`
    /// always belongs to slot `i`.
    #[default]
    AllShells,
    /// Only slots holding at least one electron.
    OccupiedOnly,
}

/// Configuration parameters for the density calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DensityOptions {
    /// Which slots are reported as components.
    pub component_policy: ComponentPolicy,
    /// Evaluate shells on the rayon thread pool.
    ///
    /// Shell profiles are always summed in slot order, so the result does not depend on this flag.
    pub parallel: bool,
}
