//! JSON exchange records for computed densities and batch requests.
//!
//! An [`AtomRecord`] is the persisted form of one atom and, once computed, its density. Older
//! documents name the occupancy `shellOccupation` and may write it as period-delimited text; both
//! spellings are accepted on input and normalized to an integer list, which is the only form
//! written back out.

use crate::config::Configuration;
use crate::density::DensityCalculator;
use crate::elements::{atomic_number_to_symbol, deserialize_occupancy};
use crate::error::SlaterError;
use crate::grid::{GridScale, GridSpec, RadialGrid};
use crate::types::{Atom, AtomView, DensityProfile, DensityResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One shell's contribution in a persisted record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentRecord {
    /// Legend label, e.g. `"2sp subshell"`.
    pub label: String,
    #[serde(flatten)]
    pub profile: DensityProfile,
}

/// A persisted atom, optionally carrying its computed density.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AtomRecord {
    pub atomic_number: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(alias = "shellOccupation", deserialize_with = "deserialize_occupancy")]
    pub occupancy: Vec<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_energy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub density: Option<DensityProfile>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub components: Vec<ComponentRecord>,
}

impl AtomRecord {
    /// A record holding only the configuration of `atom`.
    pub fn from_atom(atom: &Atom) -> Self {
        Self {
            atomic_number: atom.atomic_number(),
            symbol: atomic_number_to_symbol(atom.atomic_number()).map(str::to_string),
            occupancy: atom.occupancy().to_vec(),
            total_energy: Some(atom.total_energy()),
            density: None,
            components: Vec::new(),
        }
    }

    /// A record holding `atom` together with its computed density and shell decomposition.
    pub fn from_result(atom: &Atom, result: &DensityResult) -> Self {
        Self {
            density: Some(result.total.clone()),
            components: result
                .components
                .iter()
                .map(|component| ComponentRecord {
                    label: component.label(),
                    profile: component.profile.clone(),
                })
                .collect(),
            ..Self::from_atom(atom)
        }
    }

    /// Builds the validated [`Atom`] this record describes.
    pub fn to_atom(&self) -> Result<Atom, SlaterError> {
        Atom::from_view(self)
    }

    /// Serializes the record as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String, SlaterError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a record from JSON.
    pub fn from_json_str(json: &str) -> Result<Self, SlaterError> {
        Ok(serde_json::from_str(json)?)
    }
}

impl AtomView for AtomRecord {
    fn atomic_number(&self) -> u32 {
        self.atomic_number
    }

    fn occupancy(&self) -> &[u32] {
        &self.occupancy
    }
}

/// What a batch run keeps of each computed density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotType {
    /// Only the total density.
    Cumulative,
    /// Only the shell decomposition.
    Components,
    #[default]
    Both,
}

fn default_plot_radius() -> f64 {
    5.0
}

fn default_weighted() -> bool {
    true
}

/// A batch request: several atoms computed on one grid.
///
/// # Examples
///
/// ```
/// use slater::{DensityCalculator, DensityRequest};
///
/// let request = DensityRequest::from_json_str(r#"{
///     "scaleType": "Exponential",
///     "plotRadius": 4,
///     "atoms": [{ "atomicNumber": 3, "shellOccupation": "2.1" }]
/// }"#).unwrap();
///
/// let records = request.run(&DensityCalculator::new()).unwrap();
/// assert_eq!(records[0].occupancy, vec![2, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DensityRequest {
    #[serde(default)]
    pub scale_type: GridScale,
    /// Outer radius of the grid in Bohr.
    #[serde(default = "default_plot_radius")]
    pub plot_radius: f64,
    #[serde(default)]
    pub plot_type: PlotType,
    /// Configuration transform applied to every atom before computing.
    #[serde(default)]
    pub configuration: Configuration,
    /// Scale every array by `4πr²` before storing it.
    #[serde(default = "default_weighted")]
    pub weighted: bool,
    pub atoms: Vec<AtomRecord>,
}

impl DensityRequest {
    /// Reads a request from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self, SlaterError> {
        let content = std::fs::read_to_string(path).map_err(|io_error| SlaterError::IoError {
            path: path.to_path_buf(),
            source: io_error,
        })?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(json: &str) -> Result<Self, SlaterError> {
        Ok(serde_json::from_str(json)?)
    }

    /// The grid described by the request's scale and radius.
    pub fn grid(&self) -> Result<RadialGrid, SlaterError> {
        let params = GridSpec {
            scale: self.scale_type,
            max_radius: self.plot_radius,
            ..GridSpec::default()
        };
        Ok(params.build()?)
    }

    /// Validated atoms of the request after the configuration transform.
    pub fn atoms(&self) -> Result<Vec<Atom>, SlaterError> {
        self.atoms
            .iter()
            .map(|record| self.configuration.apply(&record.to_atom()?))
            .collect()
    }

    /// Computes every atom of the request and returns one output record per atom, in order.
    pub fn run(&self, calculator: &DensityCalculator) -> Result<Vec<AtomRecord>, SlaterError> {
        let grid = self.grid()?;
        let atoms = self.atoms()?;
        let results = calculator.compute_batch(&atoms, &grid)?;

        atoms
            .iter()
            .zip(results)
            .map(|(atom, result)| self.to_record(atom, result, &grid))
            .collect()
    }

    fn to_record(
        &self,
        atom: &Atom,
        mut result: DensityResult,
        grid: &RadialGrid,
    ) -> Result<AtomRecord, SlaterError> {
        if self.weighted {
            result.total = result.total.shell_volume_weighted(grid)?;
            for component in &mut result.components {
                component.profile = component.profile.shell_volume_weighted(grid)?;
            }
        }

        let mut record = AtomRecord::from_result(atom, &result);
        match self.plot_type {
            PlotType::Cumulative => record.components.clear(),
            PlotType::Components => record.density = None,
            PlotType::Both => {}
        }
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_record_accepts_legacy_field_and_text_occupancy() {
        let legacy = AtomRecord::from_json_str(
            r#"{ "atomicNumber": 19, "shellOccupation": "2.8.8.0.1." }"#,
        )
        .unwrap();
        let canonical =
            AtomRecord::from_json_str(r#"{ "atomicNumber": 19, "occupancy": [2, 8, 8, 0, 1] }"#)
                .unwrap();
        assert_eq!(legacy, canonical);
        assert_eq!(legacy.to_atom().unwrap().electron_count(), 19);
    }

    #[test]
    fn test_record_rejects_malformed_text() {
        let result = AtomRecord::from_json_str(r#"{ "atomicNumber": 3, "shellOccupation": "2..1" }"#);
        assert!(matches!(result, Err(SlaterError::JsonError(_))));
    }

    #[test]
    fn test_record_from_result_writes_canonical_schema() {
        let helium = Atom::new(2, vec![2]).unwrap();
        let grid = RadialGrid::uniform(0.1, 1.0, 0.1).unwrap();
        let result = DensityCalculator::new().compute(&helium, &grid).unwrap();
        let record = AtomRecord::from_result(&helium, &result);

        let json: serde_json::Value =
            serde_json::from_str(&record.to_json_string().unwrap()).unwrap();
        assert_eq!(json["atomicNumber"], 2);
        assert_eq!(json["symbol"], "He");
        assert_eq!(json["occupancy"], serde_json::json!([2]));
        assert!(json.get("shellOccupation").is_none());
        assert_eq!(json["density"]["value"].as_array().unwrap().len(), 9);
        assert_eq!(json["components"][0]["label"], "1s subshell");
        assert!(json["components"][0]["d4"].is_array());

        let reread = AtomRecord::from_json_str(&record.to_json_string().unwrap()).unwrap();
        assert_eq!(reread, record);
    }

    #[test]
    fn test_unbound_record_reads_back_with_non_finite_samples() {
        let atom = Atom::new(1, vec![2, 8]).unwrap();
        let grid = RadialGrid::uniform(0.1, 0.5, 0.1).unwrap();
        let result = DensityCalculator::new().compute(&atom, &grid).unwrap();
        assert!(!result.is_bound());

        let record = AtomRecord::from_result(&atom, &result);
        let json = record.to_json_string().unwrap();
        assert!(json.contains("\"NaN\""));
        assert!(!json.contains("null"));

        let reread = AtomRecord::from_json_str(&json).unwrap();
        let density = reread.density.as_ref().unwrap();
        assert_eq!(density.len(), grid.point_count());
        assert!(density.value.iter().all(|v| v.is_nan()));
        // the bound 1s shell keeps its finite samples
        assert_eq!(reread.components[0], record.components[0]);
        assert!(reread.components[1].profile.d4.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_infinite_samples_and_unknown_text() {
        let json = r#"{
            "atomicNumber": 1,
            "occupancy": [1],
            "density": {
                "value": [1.5, "Infinity", "-Infinity"],
                "d1": [], "d2": [], "d3": [], "d4": []
            }
        }"#;
        let record = AtomRecord::from_json_str(json).unwrap();
        let value = &record.density.as_ref().unwrap().value;
        assert_eq!(value, &vec![1.5, f64::INFINITY, f64::NEG_INFINITY]);
        let written = record.to_json_string().unwrap();
        assert_eq!(AtomRecord::from_json_str(&written).unwrap(), record);

        let bad = json.replace("\"-Infinity\"", "\"lots\"");
        assert!(matches!(
            AtomRecord::from_json_str(&bad),
            Err(SlaterError::JsonError(_))
        ));
    }

    #[test]
    fn test_request_defaults_and_weighting() {
        let request = DensityRequest::from_json_str(
            r#"{ "scaleType": "Uniform", "plotRadius": 2, "atoms": [{ "atomicNumber": 1, "shellOccupation": [1] }] }"#,
        )
        .unwrap();
        assert_eq!(request.plot_type, PlotType::Both);
        assert_eq!(request.configuration, Configuration::Normal);
        assert!(request.weighted);

        let grid = request.grid().unwrap();
        assert_eq!(grid.point_count(), 199);

        let records = request.run(&DensityCalculator::new()).unwrap();
        let density = records[0].density.as_ref().unwrap();
        let r = grid[9];
        let expected = 4.0 * PI * r * r * (-2.0 * r).exp() / PI;
        assert_relative_eq!(density.value[9], expected, max_relative = 1e-12);
        assert_eq!(records[0].components.len(), 1);
    }

    #[test]
    fn test_request_plot_type_and_configuration() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "plotType": "cumulative",
                "configuration": "positive-ion",
                "weighted": false,
                "atoms": [{{ "atomicNumber": 11, "occupancy": "2.8.1" }}]
            }}"#
        )
        .unwrap();

        let request = DensityRequest::load_from_file(file.path()).unwrap();
        assert_eq!(request.scale_type, GridScale::Exponential);
        let records = request.run(&DensityCalculator::new()).unwrap();
        assert_eq!(records[0].occupancy, vec![2, 8]);
        assert!(records[0].components.is_empty());
        assert!(records[0].density.is_some());
    }

    #[test]
    fn test_request_file_not_found() {
        let result = DensityRequest::load_from_file(Path::new("missing_request.json"));
        assert!(matches!(result, Err(SlaterError::IoError { .. })));
    }
}
