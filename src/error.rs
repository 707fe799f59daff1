use std::path::PathBuf;
use thiserror::Error;

/// The primary error type for all fallible operations in the `slater` library.
///
/// Numerical trouble inside the density engine (an unbound shell, a Gamma pole) is not reported
/// through this type: it propagates as NaN or infinity, and unbound shells are attached to the
/// result as warnings. Everything the caller can fix up front is reported here.
#[derive(Error, Debug)]
pub enum SlaterError {
    /// The atomic number or occupancy list does not describe a valid atom.
    #[error("Invalid atomic configuration: {0}")]
    InvalidConfiguration(#[from] ConfigurationError),

    /// The radial grid cannot be used by the density engine.
    #[error("Invalid radial grid: {0}")]
    InvalidGrid(#[from] GridError),

    /// An occupied shell has a principal quantum number with no effective value `n*`.
    ///
    /// Slater's rules only tabulate `n*` up to `N = 6`; occupied shells beyond that cannot be
    /// turned into orbitals, although their shielding and energy are still defined.
    #[error("No effective principal quantum number for occupied shell {shell} (N = {principal})")]
    MissingEffectiveQuantumNumber {
        /// The label of the offending shell, e.g. `"7sp"`.
        shell: String,
        /// Its integer principal quantum number.
        principal: u8,
    },

    /// An element symbol or atomic number was not found in the element table.
    #[error("Element not found in the element table: '{0}'")]
    UnknownElement(String),

    /// Two arrays that must run in parallel have different lengths.
    #[error("Array length mismatch: expected {expected}, found {found}")]
    LengthMismatch {
        /// The length of the reference array.
        expected: usize,
        /// The length of the array that did not match.
        found: usize,
    },

    /// A finite-difference or integration routine was given too few points.
    #[error("Need at least {needed} points, found {found}")]
    InsufficientPoints { needed: usize, found: usize },

    /// An I/O error that occurred while reading an element table or request file.
    #[error("I/O error at path '{path}': {source}")]
    IoError {
        /// The path of the file that caused the I/O error.
        path: PathBuf,
        /// The underlying `std::io::Error`.
        #[source]
        source: std::io::Error,
    },

    /// An element table could not be parsed.
    #[error("Failed to deserialize TOML element table: {0}")]
    DeserializationError(#[from] toml::de::Error),

    /// A JSON record or request could not be parsed or written.
    #[error("Failed to process JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Reasons an atomic number and occupancy list are rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// The nuclear charge must be at least one.
    #[error("atomic number must be positive")]
    ZeroAtomicNumber,

    /// At least one shell slot is required.
    #[error("occupancy list is empty")]
    EmptyOccupancy,

    /// The occupancy list is longer than the shell table.
    #[error("occupancy lists {len} shells but the shell table only has {max}")]
    TooManyShells { len: usize, max: usize },

    /// A shell holds more electrons than its group allows.
    #[error("shell {label} holds {occupancy} electrons but its capacity is {capacity}")]
    ShellOverfilled {
        index: usize,
        label: String,
        occupancy: u32,
        capacity: u32,
    },

    /// A textual occupancy could not be parsed.
    #[error("malformed occupancy '{text}': {reason}")]
    MalformedOccupancy { text: String, reason: String },

    /// A positive ion was requested from an atom with no electrons.
    #[error("no electron left to remove")]
    NoElectronsToRemove,

    /// A negative ion was requested but every shell slot is full.
    #[error("no vacancy left to place an extra electron")]
    NoVacancy,
}

/// Reasons a radial grid is rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GridError {
    #[error("grid has no points")]
    Empty,

    /// The density formulas divide by `r`, so the origin must be excluded.
    #[error("first grid point {0} is not strictly positive")]
    NonPositiveStart(f64),

    #[error("grid point {index} is not finite")]
    NonFinite { index: usize },

    #[error("grid point {index} does not increase on its predecessor")]
    NotIncreasing { index: usize },

    /// A generator was called with parameters that cannot produce a grid.
    #[error("invalid grid parameters: {0}")]
    InvalidParameters(String),
}
