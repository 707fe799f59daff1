//! This module provides the periodic-table lookup and utilities for loading it from TOML files.
//!
//! It defines the `ElementData` struct holding the neutral-atom occupancy of one element and the
//! `ElementTable` struct for managing collections of them. Keys in TOML tables can be either atomic
//! numbers or element symbols, and occupancies can be written as integer lists or as the
//! period-delimited text form (`"2.8.8.0.1"`) accepted everywhere an occupancy is read.

use crate::error::{ConfigurationError, SlaterError};
use crate::types::{Atom, AtomView};
use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

/// Element symbols ordered by atomic number, starting at hydrogen.
pub const SYMBOLS: [&str; 118] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl",
    "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As",
    "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb",
    "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl",
    "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk",
    "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh",
    "Fl", "Mc", "Lv", "Ts", "Og",
];

/// Converts a case-sensitive element symbol to its atomic number.
pub fn symbol_to_atomic_number(symbol: &str) -> Option<u32> {
    SYMBOLS
        .iter()
        .position(|&s| s == symbol)
        .map(|index| index as u32 + 1)
}

/// Converts an atomic number to its element symbol.
pub fn atomic_number_to_symbol(atomic_number: u32) -> Option<&'static str> {
    let index = (atomic_number as usize).checked_sub(1)?;
    SYMBOLS.get(index).copied()
}

/// The neutral ground-state configuration of one element.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ElementData {
    pub atomic_number: u32,
    /// Electron count of every Slater shell group, in shell-table order.
    pub occupancy: Vec<u32>,
}

impl ElementData {
    /// Returns the element symbol, e.g. `"Fe"`.
    pub fn symbol(&self) -> Option<&'static str> {
        atomic_number_to_symbol(self.atomic_number)
    }

    /// Builds the validated [`Atom`] for this element.
    pub fn to_atom(&self) -> Result<Atom, SlaterError> {
        Atom::from_view(self)
    }
}

impl AtomView for ElementData {
    fn atomic_number(&self) -> u32 {
        self.atomic_number
    }

    fn occupancy(&self) -> &[u32] {
        &self.occupancy
    }
}

/// A periodic table of neutral-atom occupancies.
///
/// Elements are indexed by atomic number. The built-in table covering hydrogen through radium is
/// available through [`crate::get_default_elements`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ElementTable {
    #[serde(deserialize_with = "deserialize_element_map")]
    pub elements: BTreeMap<u32, ElementData>,
}

impl ElementTable {
    /// Loads an element table from a TOML file.
    ///
    /// The file should contain an `[elements]` table whose keys are atomic numbers or element
    /// symbols and whose values are occupancies.
    ///
    /// # Errors
    ///
    /// Returns a `SlaterError::IoError` if the file cannot be read, or a
    /// `SlaterError::DeserializationError` if the TOML content is invalid, names an unknown element
    /// or holds a malformed occupancy.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use slater::ElementTable;
    /// use std::path::Path;
    ///
    /// let table = ElementTable::load_from_file(Path::new("elements.toml")).unwrap();
    /// ```
    pub fn load_from_file(path: &Path) -> Result<Self, SlaterError> {
        let content = std::fs::read_to_string(path).map_err(|io_error| SlaterError::IoError {
            path: path.to_path_buf(),
            source: io_error,
        })?;

        Self::load_from_str(&content)
    }

    /// Parses an element table from a TOML string.
    ///
    /// # Examples
    ///
    /// ```
    /// use slater::ElementTable;
    ///
    /// let toml_data = r#"
    /// [elements]
    /// "1" = [1]
    /// K = "2.8.8.0.1"
    /// "#;
    ///
    /// let table = ElementTable::load_from_str(toml_data).unwrap();
    /// assert_eq!(table.elements.len(), 2);
    /// assert_eq!(table.elements[&19].occupancy, vec![2, 8, 8, 0, 1]);
    /// ```
    pub fn load_from_str(toml_str: &str) -> Result<Self, SlaterError> {
        toml::from_str(toml_str).map_err(SlaterError::from)
    }

    /// Creates an empty table.
    pub fn new() -> Self {
        ElementTable {
            elements: BTreeMap::new(),
        }
    }

    /// Number of elements in the table.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the table holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the element with the given atomic number, if present.
    pub fn get(&self, atomic_number: u32) -> Option<&ElementData> {
        self.elements.get(&atomic_number)
    }

    /// Looks an element up by symbol (`"Fe"`) or by atomic number (`"26"`).
    ///
    /// # Errors
    ///
    /// Returns `SlaterError::UnknownElement` if the key is neither, or names an element missing
    /// from this table.
    pub fn lookup(&self, key: &str) -> Result<&ElementData, SlaterError> {
        let key = key.trim();
        parse_element_key(key)
            .and_then(|atomic_number| self.elements.get(&atomic_number))
            .ok_or_else(|| SlaterError::UnknownElement(key.to_string()))
    }

    /// Looks an element up and builds its neutral [`Atom`].
    pub fn atom(&self, key: &str) -> Result<Atom, SlaterError> {
        self.lookup(key)?.to_atom()
    }

    /// Iterates over the elements in ascending atomic number.
    pub fn iter(&self) -> impl Iterator<Item = &ElementData> {
        self.elements.values()
    }
}

impl Default for ElementTable {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_element_key(key: &str) -> Option<u32> {
    key.parse::<u32>()
        .ok()
        .filter(|&z| z > 0)
        .or_else(|| symbol_to_atomic_number(key))
}

/// Deserializes a map of element occupancies with flexible key types.
///
/// Keys can be atomic numbers (as strings) or element symbols; symbols are converted to atomic
/// numbers for storage.
fn deserialize_element_map<'de, D>(deserializer: D) -> Result<BTreeMap<u32, ElementData>, D::Error>
where
    D: Deserializer<'de>,
{
    struct ElementMapVisitor;

    impl<'de> Visitor<'de> for ElementMapVisitor {
        type Value = BTreeMap<u32, ElementData>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a map from atomic number or symbol to an occupancy")
        }

        fn visit_map<M>(self, mut map: M) -> Result<Self::Value, M::Error>
        where
            M: MapAccess<'de>,
        {
            let mut elements = BTreeMap::new();
            while let Some((key, value)) = map.next_entry::<String, OccupancyRepr>()? {
                let atomic_number = parse_element_key(&key)
                    .ok_or_else(|| de::Error::custom(format!("invalid element key: '{}'", key)))?;
                let occupancy = value.into_occupancy().map_err(de::Error::custom)?;
                elements.insert(
                    atomic_number,
                    ElementData {
                        atomic_number,
                        occupancy,
                    },
                );
            }
            Ok(elements)
        }
    }

    deserializer.deserialize_map(ElementMapVisitor)
}

/// The two written forms of an occupancy.
#[derive(Deserialize)]
#[serde(untagged)]
enum OccupancyRepr {
    List(Vec<u32>),
    Text(String),
}

impl OccupancyRepr {
    fn into_occupancy(self) -> Result<Vec<u32>, ConfigurationError> {
        match self {
            OccupancyRepr::List(list) => Ok(list),
            OccupancyRepr::Text(text) => parse_occupancy(&text),
        }
    }
}

/// Deserializes an occupancy written either as an integer list or as period-delimited text.
pub(crate) fn deserialize_occupancy<'de, D>(deserializer: D) -> Result<Vec<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    OccupancyRepr::deserialize(deserializer)?
        .into_occupancy()
        .map_err(de::Error::custom)
}

/// Parses the period-delimited occupancy form, e.g. `"2.8.8.0.1"`.
///
/// A single trailing period is tolerated and dropped with a warning.
///
/// # Errors
///
/// Returns `ConfigurationError::MalformedOccupancy` for empty text, empty segments, or segments
/// that are not non-negative integers.
///
/// # Examples
///
/// ```
/// use slater::elements::parse_occupancy;
///
/// assert_eq!(parse_occupancy("2.8.1").unwrap(), vec![2, 8, 1]);
/// assert_eq!(parse_occupancy("2.8.1.").unwrap(), vec![2, 8, 1]);
/// assert!(parse_occupancy("2..1").is_err());
/// ```
pub fn parse_occupancy(text: &str) -> Result<Vec<u32>, ConfigurationError> {
    let malformed = |reason: String| ConfigurationError::MalformedOccupancy {
        text: text.to_string(),
        reason,
    };

    let mut body = text.trim();
    if let Some(stripped) = body.strip_suffix('.') {
        log::warn!("Dropping trailing period from occupancy '{}'", text);
        body = stripped;
    }
    if body.is_empty() {
        return Err(malformed("no shell counts given".to_string()));
    }

    body.split('.')
        .enumerate()
        .map(|(position, segment)| {
            let segment = segment.trim();
            if segment.is_empty() {
                return Err(malformed(format!("empty shell count at position {}", position)));
            }
            segment.parse::<u32>().map_err(|_| {
                malformed(format!("'{}' is not a non-negative integer", segment))
            })
        })
        .collect()
}

/// Formats an occupancy in the period-delimited form.
pub fn format_occupancy(occupancy: &[u32]) -> String {
    occupancy
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_test_toml_string() -> String {
        r#"
        [elements]
        "1" = [1]
        "Fe" = [2, 8, 8, 6, 2]
        "O" = "2.6"
        "#
        .to_string()
    }

    fn get_expected_table() -> ElementTable {
        let mut elements = BTreeMap::new();
        for (atomic_number, occupancy) in [(1, vec![1]), (26, vec![2, 8, 8, 6, 2]), (8, vec![2, 6])] {
            elements.insert(
                atomic_number,
                ElementData {
                    atomic_number,
                    occupancy,
                },
            );
        }
        ElementTable { elements }
    }

    #[test]
    fn test_load_from_str_valid() {
        let table = ElementTable::load_from_str(&create_test_toml_string()).unwrap();
        assert_eq!(table, get_expected_table());
    }

    #[test]
    fn test_load_from_str_invalid_toml() {
        let result = ElementTable::load_from_str("this is not valid toml");
        assert!(matches!(result, Err(SlaterError::DeserializationError(_))));
    }

    #[test]
    fn test_load_from_str_invalid_element_key() {
        let toml_str = r#"
        [elements]
        "InvalidKey" = [1]
        "#;
        let error_string = ElementTable::load_from_str(toml_str)
            .unwrap_err()
            .to_string();
        assert!(error_string.contains("invalid element key: 'InvalidKey'"));
    }

    #[test]
    fn test_load_from_str_malformed_occupancy() {
        let toml_str = r#"
        [elements]
        "Na" = "2.x.1"
        "#;
        let error_string = ElementTable::load_from_str(toml_str)
            .unwrap_err()
            .to_string();
        assert!(error_string.contains("'x' is not a non-negative integer"));
    }

    #[test]
    fn test_load_from_file_valid() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "{}", create_test_toml_string()).unwrap();

        let table = ElementTable::load_from_file(temp_file.path()).unwrap();
        assert_eq!(table, get_expected_table());
    }

    #[test]
    fn test_load_from_file_not_found() {
        let result = ElementTable::load_from_file(Path::new("non_existent_file.toml"));
        assert!(matches!(result, Err(SlaterError::IoError { .. })));
    }

    #[test]
    fn test_lookup_by_symbol_or_number() {
        let table = get_expected_table();
        assert_eq!(table.lookup("Fe").unwrap().atomic_number, 26);
        assert_eq!(table.lookup(" 8 ").unwrap().occupancy, vec![2, 6]);
        assert!(matches!(
            table.lookup("fe"),
            Err(SlaterError::UnknownElement(key)) if key == "fe"
        ));
        assert!(matches!(table.lookup("0"), Err(SlaterError::UnknownElement(_))));
        // a valid symbol that the table does not contain
        assert!(matches!(table.lookup("Zn"), Err(SlaterError::UnknownElement(_))));

        let iron = table.atom("Fe").unwrap();
        assert_eq!(iron.electron_count(), 26);
    }

    #[test]
    fn test_new_and_default() {
        assert!(ElementTable::new().is_empty());
        assert_eq!(ElementTable::new(), ElementTable::default());
    }

    #[test]
    fn test_symbol_conversions() {
        assert_eq!(symbol_to_atomic_number("H"), Some(1));
        assert_eq!(symbol_to_atomic_number("Fe"), Some(26));
        assert_eq!(symbol_to_atomic_number("Og"), Some(118));
        assert_eq!(symbol_to_atomic_number("Xx"), None);
        assert_eq!(symbol_to_atomic_number("h"), None);
        assert_eq!(atomic_number_to_symbol(88), Some("Ra"));
        assert_eq!(atomic_number_to_symbol(0), None);
        assert_eq!(atomic_number_to_symbol(119), None);
    }

    #[test]
    fn test_parse_occupancy_forms() {
        assert_eq!(parse_occupancy("2.8.8.0.1").unwrap(), vec![2, 8, 8, 0, 1]);
        assert_eq!(parse_occupancy(" 2.8 ").unwrap(), vec![2, 8]);
        assert_eq!(parse_occupancy("2.8.").unwrap(), vec![2, 8]);
        assert_eq!(parse_occupancy("1").unwrap(), vec![1]);
        for bad in ["", ".", "2..8", "2.-1", "2.8..", "two"] {
            assert!(
                matches!(
                    parse_occupancy(bad),
                    Err(ConfigurationError::MalformedOccupancy { .. })
                ),
                "'{}' should be rejected",
                bad
            );
        }
        assert_eq!(format_occupancy(&[2, 8, 1]), "2.8.1");
    }
}
