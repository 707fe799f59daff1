//! The process-wide table of Slater shell groups.
//!
//! Slater's screening rules treat the s and p orbitals of one principal quantum number as a single
//! group ("sp"), while d, f and higher orbitals each form their own group. An occupancy list is
//! indexed by position in this table: slot 0 is `1s`, slot 1 is `2sp`, slot 2 is `3sp`, slot 3 is
//! `3d`, and so on up to `16sp`. The table is immutable static data shared by every [`Atom`].
//!
//! [`Atom`]: crate::types::Atom

use serde::{Deserialize, Serialize};
use std::fmt;

/// The azimuthal label of a shell group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Azimuthal {
    /// The lone `1s` group.
    S,
    /// The merged s and p orbitals of one principal quantum number.
    Sp,
    D,
    F,
    G,
    H,
    I,
    J,
    K,
}

impl Azimuthal {
    /// Returns the spectroscopic label, e.g. `"sp"` or `"d"`.
    pub const fn label(self) -> &'static str {
        match self {
            Azimuthal::S => "s",
            Azimuthal::Sp => "sp",
            Azimuthal::D => "d",
            Azimuthal::F => "f",
            Azimuthal::G => "g",
            Azimuthal::H => "h",
            Azimuthal::I => "i",
            Azimuthal::J => "j",
            Azimuthal::K => "k",
        }
    }

    /// Maximum number of electrons the group can hold.
    ///
    /// An `sp` group holds `2 + 6`; every other group with azimuthal quantum number `l` holds
    /// `2(2l + 1)`.
    pub const fn capacity(self) -> u32 {
        match self {
            Azimuthal::S => 2,
            Azimuthal::Sp => 8,
            Azimuthal::D => 10,
            Azimuthal::F => 14,
            Azimuthal::G => 18,
            Azimuthal::H => 22,
            Azimuthal::I => 26,
            Azimuthal::J => 30,
            Azimuthal::K => 34,
        }
    }
}

impl fmt::Display for Azimuthal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One slot of the shell table: a principal quantum number and an azimuthal group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShellDescriptor {
    /// The integer principal quantum number `N` of the group.
    pub principal: u8,
    /// The azimuthal group label.
    pub azimuthal: Azimuthal,
}

impl ShellDescriptor {
    const fn new(principal: u8, azimuthal: Azimuthal) -> Self {
        Self {
            principal,
            azimuthal,
        }
    }

    /// Maximum occupancy of this group.
    #[inline]
    pub const fn capacity(&self) -> u32 {
        self.azimuthal.capacity()
    }

    /// Returns the label used for plot legends, e.g. `"2sp subshell"`.
    pub fn subshell_label(&self) -> String {
        format!("{} subshell", self)
    }
}

impl fmt::Display for ShellDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.principal, self.azimuthal)
    }
}

use Azimuthal::{D, F, G, H, I, J, K, S, Sp};

/// Number of slots in the shell table.
pub const SHELL_COUNT: usize = 65;

/// The shell table, ordered by principal quantum number and then by azimuthal group.
pub static SHELL_TABLE: [ShellDescriptor; SHELL_COUNT] = [
    ShellDescriptor::new(1, S),
    ShellDescriptor::new(2, Sp),
    ShellDescriptor::new(3, Sp),
    ShellDescriptor::new(3, D),
    ShellDescriptor::new(4, Sp),
    ShellDescriptor::new(4, D),
    ShellDescriptor::new(4, F),
    ShellDescriptor::new(5, Sp),
    ShellDescriptor::new(5, D),
    ShellDescriptor::new(5, F),
    ShellDescriptor::new(5, G),
    ShellDescriptor::new(6, Sp),
    ShellDescriptor::new(6, D),
    ShellDescriptor::new(6, F),
    ShellDescriptor::new(6, G),
    ShellDescriptor::new(6, H),
    ShellDescriptor::new(7, Sp),
    ShellDescriptor::new(7, D),
    ShellDescriptor::new(7, F),
    ShellDescriptor::new(7, G),
    ShellDescriptor::new(7, H),
    ShellDescriptor::new(7, I),
    ShellDescriptor::new(8, Sp),
    ShellDescriptor::new(8, D),
    ShellDescriptor::new(8, F),
    ShellDescriptor::new(8, G),
    ShellDescriptor::new(8, H),
    ShellDescriptor::new(8, I),
    ShellDescriptor::new(8, J),
    ShellDescriptor::new(9, Sp),
    ShellDescriptor::new(9, D),
    ShellDescriptor::new(9, F),
    ShellDescriptor::new(9, G),
    ShellDescriptor::new(9, H),
    ShellDescriptor::new(9, I),
    ShellDescriptor::new(9, J),
    ShellDescriptor::new(9, K),
    ShellDescriptor::new(10, Sp),
    ShellDescriptor::new(10, D),
    ShellDescriptor::new(10, F),
    ShellDescriptor::new(10, G),
    ShellDescriptor::new(10, H),
    ShellDescriptor::new(10, I),
    ShellDescriptor::new(10, J),
    ShellDescriptor::new(11, Sp),
    ShellDescriptor::new(11, D),
    ShellDescriptor::new(11, F),
    ShellDescriptor::new(11, G),
    ShellDescriptor::new(11, H),
    ShellDescriptor::new(11, I),
    ShellDescriptor::new(12, Sp),
    ShellDescriptor::new(12, D),
    ShellDescriptor::new(12, F),
    ShellDescriptor::new(12, G),
    ShellDescriptor::new(12, H),
    ShellDescriptor::new(13, Sp),
    ShellDescriptor::new(13, D),
    ShellDescriptor::new(13, F),
    ShellDescriptor::new(13, G),
    ShellDescriptor::new(14, Sp),
    ShellDescriptor::new(14, D),
    ShellDescriptor::new(14, F),
    ShellDescriptor::new(15, Sp),
    ShellDescriptor::new(15, D),
    ShellDescriptor::new(16, Sp),
];

/// Returns the descriptor of slot `index`, or `None` past the end of the table.
#[inline]
pub fn descriptor(index: usize) -> Option<&'static ShellDescriptor> {
    SHELL_TABLE.get(index)
}

/// Returns the first `len` descriptors, clamped to the table length.
#[inline]
pub fn descriptors(len: usize) -> &'static [ShellDescriptor] {
    &SHELL_TABLE[..len.min(SHELL_COUNT)]
}
