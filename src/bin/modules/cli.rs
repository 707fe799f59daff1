use clap::{ArgAction, Args, Parser, ValueEnum};
use slater::{Configuration, GridScale};
use std::path::PathBuf;

const ABOUT: &str = "A command-line tool for computing radial electron densities and their derivatives from Slater's shielding rules.";
const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser)]
#[command(version, about = ABOUT, help_template = HELP_TEMPLATE)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Element symbol or atomic number to look up in the element table.
    ///
    /// Case-sensitive: "Fe", "26". Mutually exclusive with a manual configuration (-z with
    /// --occupancy) and with --batch.
    #[arg(value_name = "ELEMENT", conflicts_with_all = ["atomic_number", "batch"])]
    pub element: Option<String>,

    /// Nuclear charge of a manually specified atom.
    #[arg(short = 'z', long, value_name = "Z", requires = "occupancy", conflicts_with = "batch")]
    pub atomic_number: Option<u32>,

    /// Shell occupancies of a manually specified atom, period-delimited.
    ///
    /// Slots follow the shell table: 1s, 2sp, 3sp, 3d, 4sp, 4d, 4f, 5sp, ... For example,
    /// potassium is "2.8.8.0.1".
    #[arg(long, value_name = "TEXT", requires = "atomic_number")]
    pub occupancy: Option<String>,

    /// JSON batch request listing several atoms to compute on one grid.
    ///
    /// The result is one record per atom; grid and configuration options are taken from the
    /// request instead of the command line.
    #[arg(short, long, value_name = "FILE")]
    pub batch: Option<PathBuf>,

    /// Configuration transform applied to the atom before computing.
    #[arg(short, long, value_enum, default_value_t = ConfigurationArg::Normal)]
    pub configuration: ConfigurationArg,

    /// Increase logging verbosity (-v for info, -vv for debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(flatten)]
    pub grid: GridOptions,

    #[command(flatten)]
    pub engine: EngineOptions,

    #[command(flatten)]
    pub output: OutputOptions,
}

/// Options for controlling the radial grid.
#[derive(Args)]
#[command(next_help_heading = "Grid Options")]
pub struct GridOptions {
    /// Spacing of the radial grid.
    #[arg(long, value_enum, default_value_t = ScaleArg::Exponential)]
    pub scale: ScaleArg,

    /// Outer radius in Bohr.
    #[arg(short = 'r', long, default_value_t = 5.0)]
    pub max_radius: f64,

    /// First grid point in Bohr. Must be strictly positive.
    #[arg(long, default_value_t = 0.01)]
    pub start: f64,

    /// Point spacing in Bohr for uniform and exponential grids.
    #[arg(long, default_value_t = 0.01)]
    pub step: f64,

    /// Ratio between neighbouring points of a geometric grid.
    #[arg(long, default_value_t = 1.05)]
    pub growth: f64,
}

/// Options for controlling the density engine.
#[derive(Args)]
#[command(next_help_heading = "Engine Options")]
pub struct EngineOptions {
    /// Custom element table in TOML format.
    ///
    /// If not specified, the built-in table (H through Ra) is used.
    #[arg(short = 'E', long, value_name = "FILE")]
    pub elements: Option<PathBuf>,

    /// Report only occupied shells in the decomposition.
    #[arg(long)]
    pub occupied_only: bool,

    /// Evaluate shells in parallel.
    #[arg(long)]
    pub parallel: bool,
}

/// Options for controlling the output format and destination.
#[derive(Args)]
#[command(next_help_heading = "Output Options")]
pub struct OutputOptions {
    /// Output file path.
    ///
    /// If not specified, results are written to standard output.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format for the results.
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,

    /// Number of decimal places to display for floating-point values.
    #[arg(short, long, default_value_t = 6)]
    pub precision: usize,

    /// Derivative order of the density columns (0 is the density itself).
    #[arg(short, long, default_value_t = 0, value_parser = clap::value_parser!(u8).range(0..=4))]
    pub derivative: u8,

    /// Add gradient, Laplacian, gradient of the Laplacian and Laplacian of the Laplacian columns.
    #[arg(long)]
    pub operators: bool,

    /// Scale every density array by 4πr² before output.
    #[arg(short, long)]
    pub weighted: bool,

    /// Print every n-th grid point in the pretty table.
    #[arg(long, default_value_t = 25, value_parser = clap::value_parser!(u64).range(1..))]
    pub stride: u64,
}

/// Output format for the calculation results.
#[derive(Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed summary, shell table and sampled density rows.
    Pretty,
    /// Comma-separated values with one row per grid point.
    Csv,
    /// JSON record with the full density, components and metadata.
    Json,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ScaleArg {
    Uniform,
    Exponential,
    Geometric,
}

impl From<ScaleArg> for GridScale {
    fn from(scale: ScaleArg) -> Self {
        match scale {
            ScaleArg::Uniform => GridScale::Uniform,
            ScaleArg::Exponential => GridScale::Exponential,
            ScaleArg::Geometric => GridScale::Geometric,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ConfigurationArg {
    Normal,
    Valence,
    PositiveIon,
    NegativeIon,
    InnerShell,
}

impl From<ConfigurationArg> for Configuration {
    fn from(configuration: ConfigurationArg) -> Self {
        match configuration {
            ConfigurationArg::Normal => Configuration::Normal,
            ConfigurationArg::Valence => Configuration::Valence,
            ConfigurationArg::PositiveIon => Configuration::PositiveIon,
            ConfigurationArg::NegativeIon => Configuration::NegativeIon,
            ConfigurationArg::InnerShell => Configuration::InnerShell,
        }
    }
}
