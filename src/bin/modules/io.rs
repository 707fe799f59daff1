use super::cli::OutputFormat;
use super::error::CliError;
use prettytable::*;
use serde::Serialize;
use slater::elements::{atomic_number_to_symbol, format_occupancy};
use slater::math::constants::HARTREE_TO_EV;
use slater::{
    Atom, AtomRecord, Configuration, DensityResult, RadialGrid, RadialOperators, ShellComponent,
};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

const DERIVATIVE_NAMES: [&str; 5] = ["ρ", "ρ'", "ρ''", "ρ'''", "ρ''''"];

/// Everything a single-atom run prints.
pub struct Report<'a> {
    pub atom: &'a Atom,
    pub configuration: Configuration,
    pub grid: &'a RadialGrid,
    pub result: &'a DensityResult,
    pub operators: Option<&'a RadialOperators>,
    pub derivative: usize,
    pub weighted: bool,
}

impl Report<'_> {
    fn symbol(&self) -> &'static str {
        atomic_number_to_symbol(self.atom.atomic_number()).unwrap_or("??")
    }

    /// Components worth a column: occupied shells only, whatever the engine policy.
    fn columns(&self) -> Vec<&ShellComponent> {
        self.result
            .components
            .iter()
            .filter(|component| component.occupancy > 0)
            .collect()
    }

    fn total(&self) -> &[f64] {
        self.result.total.arrays()[self.derivative]
    }
}

pub fn get_writer(output_path: &Option<PathBuf>) -> Result<Box<dyn Write>, CliError> {
    match output_path {
        Some(path) => {
            let file = std::fs::File::create(path).map_err(|e| CliError::Io {
                path: path.clone(),
                source: e,
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

pub fn write_results(
    mut writer: Box<dyn Write>,
    report: &Report,
    format: &OutputFormat,
    precision: usize,
    stride: usize,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Pretty => write_pretty_table(&mut writer, report, precision, stride),
        OutputFormat::Csv => write_csv(&mut writer, report, precision),
        OutputFormat::Json => write_json(&mut writer, report),
    }?;
    writer.flush()?;
    Ok(())
}

fn box_format() -> format::TableFormat {
    format::FormatBuilder::new()
        .column_separator('│')
        .borders('│')
        .separators(
            &[format::LinePosition::Top],
            format::LineSeparator::new('─', '┬', '╭', '╮'),
        )
        .separators(
            &[format::LinePosition::Title],
            format::LineSeparator::new('═', '╪', '╞', '╡'),
        )
        .separators(
            &[format::LinePosition::Bottom],
            format::LineSeparator::new('─', '┴', '╰', '╯'),
        )
        .padding(1, 1)
        .build()
}

fn summary_format() -> format::TableFormat {
    format::FormatBuilder::new()
        .column_separator('│')
        .borders('│')
        .separators(
            &[format::LinePosition::Top],
            format::LineSeparator::new('─', '┬', '╭', '╮'),
        )
        .separators(
            &[format::LinePosition::Bottom],
            format::LineSeparator::new('─', '┴', '╰', '╯'),
        )
        .padding(1, 1)
        .build()
}

fn title(writer: &mut dyn Write, text: &str) -> Result<(), CliError> {
    let mut title_table = Table::new();
    title_table.set_format(box_format());
    title_table.add_row(row![bc->text]);
    title_table.print(writer)?;
    writeln!(writer)?;
    Ok(())
}

fn write_pretty_table(
    writer: &mut dyn Write,
    report: &Report,
    precision: usize,
    stride: usize,
) -> Result<(), CliError> {
    let atom = report.atom;
    let energy = atom.total_energy();

    title(writer, "Slater Shielding Density Results")?;

    let mut summary_table = Table::new();
    summary_table.set_format(summary_format());
    summary_table.add_row(row![b->"Element:", format!("{} (Z = {})", report.symbol(), atom.atomic_number())]);
    summary_table.add_row(row![b->"Configuration:", report.configuration]);
    summary_table.add_row(row![b->"Occupancy:", format_occupancy(atom.occupancy())]);
    summary_table.add_row(row![b->"Electrons:", format!("{} (net charge {:+})", atom.electron_count(), atom.net_charge())]);
    summary_table.add_row(row![b->"Total Energy:", format!(
        "{:.prec$} Ha ({:.prec$} eV)",
        energy,
        energy * HARTREE_TO_EV,
        prec = precision
    )]);
    summary_table.add_row(row![b->"Grid:", format!(
        "{} points, {:.4} to {:.4} Bohr",
        report.grid.point_count(),
        report.grid.first(),
        report.grid.last()
    )]);
    summary_table.add_row(row![b->"Warnings:", report.result.warnings.len()]);
    summary_table.print(writer)?;
    writeln!(writer)?;

    for warning in &report.result.warnings {
        writeln!(writer, "warning: {}", warning)?;
    }
    if !report.result.warnings.is_empty() {
        writeln!(writer)?;
    }

    let mut shell_table = Table::new();
    shell_table.set_format(box_format());
    shell_table.set_titles(
        row![bc->"Slot", bc->"Shell", bc->"Occupancy", bc->"Shielding", bc->"Z_eff", bc->"Energy (Ha)"],
    );
    for (i, shell) in atom.shells().iter().enumerate() {
        let [shielding, effective_charge, energy] = shell_fields(atom, i, precision);
        shell_table.add_row(row![
            r->i,
            l->shell,
            r->atom.occupancy()[i],
            r->shielding,
            r->effective_charge,
            r->energy
        ]);
    }
    shell_table.print(writer)?;
    writeln!(writer)?;

    let prefix = if report.weighted { "4πr²" } else { "" };
    let name = DERIVATIVE_NAMES[report.derivative];
    let columns = report.columns();

    let mut data_table = Table::new();
    data_table.set_format(box_format());
    let mut titles = Row::empty();
    titles.add_cell(cell!(bc->"r (Bohr)"));
    titles.add_cell(cell!(bc->format!("Total {}{}", prefix, name)));
    for component in &columns {
        titles.add_cell(cell!(bc->component.shell));
    }
    if report.operators.is_some() {
        for heading in ["∇ρ", "∇²ρ", "∇∇²ρ", "∇²∇²ρ"] {
            titles.add_cell(cell!(bc->heading));
        }
    }
    data_table.set_titles(titles);

    let points = report.grid.points();
    let last = points.len() - 1;
    for i in (0..points.len()).filter(|&i| i % stride == 0 || i == last) {
        let mut row = Row::empty();
        row.add_cell(cell!(r->format!("{:.4}", points[i])));
        row.add_cell(cell!(r->format!("{:.prec$e}", report.total()[i], prec = precision)));
        for component in &columns {
            let value = component.profile.arrays()[report.derivative][i];
            row.add_cell(cell!(r->format!("{:.prec$e}", value, prec = precision)));
        }
        if let Some(ops) = report.operators {
            for values in [&ops.gradient, &ops.laplacian, &ops.grad_laplacian, &ops.lapl_laplacian] {
                row.add_cell(cell!(r->format!("{:.prec$e}", values[i], prec = precision)));
            }
        }
        data_table.add_row(row);
    }
    data_table.print(writer)?;

    Ok(())
}

/// Shielding, effective charge and energy cells of one shell-table row.
///
/// An empty slot screens nothing and its self-screening term `0.35 (N - 1)` is negative, so all
/// three cells are shown as `-`.
fn shell_fields(atom: &Atom, index: usize, precision: usize) -> [String; 3] {
    if atom.occupancy()[index] == 0 {
        return ["-".to_string(), "-".to_string(), "-".to_string()];
    }
    let shielding = atom.shielding_constants()[index];
    [
        format!("{:.4}", shielding),
        format!("{:.4}", atom.atomic_number() as f64 - shielding),
        format!("{:.prec$}", atom.shell_energy(index), prec = precision),
    ]
}

fn write_csv(writer: &mut dyn Write, report: &Report, precision: usize) -> Result<(), CliError> {
    let columns = report.columns();

    let mut header = vec!["r".to_string(), "total".to_string()];
    header.extend(columns.iter().map(|component| component.shell.to_string()));
    if report.operators.is_some() {
        header.extend(
            ["gradient", "laplacian", "grad_laplacian", "lapl_laplacian"].map(String::from),
        );
    }
    writeln!(writer, "{}", header.join(","))?;

    for (i, r) in report.grid.points().iter().enumerate() {
        let mut fields = vec![
            format!("{:.*}", precision, r),
            format!("{:.*e}", precision, report.total()[i]),
        ];
        for component in &columns {
            fields.push(format!(
                "{:.*e}",
                precision,
                component.profile.arrays()[report.derivative][i]
            ));
        }
        if let Some(ops) = report.operators {
            for values in [&ops.gradient, &ops.laplacian, &ops.grad_laplacian, &ops.lapl_laplacian] {
                fields.push(format!("{:.*e}", precision, values[i]));
            }
        }
        writeln!(writer, "{}", fields.join(","))?;
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonReport<'a> {
    #[serde(flatten)]
    record: AtomRecord,
    configuration: Configuration,
    weighted: bool,
    radii: &'a [f64],
    warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    operators: Option<&'a RadialOperators>,
}

fn write_json(writer: &mut dyn Write, report: &Report) -> Result<(), CliError> {
    let json = JsonReport {
        record: AtomRecord::from_result(report.atom, report.result),
        configuration: report.configuration,
        weighted: report.weighted,
        radii: report.grid.points(),
        warnings: report.result.warnings.iter().map(ToString::to_string).collect(),
        operators: report.operators,
    };
    serde_json::to_writer_pretty(&mut *writer, &json)?;
    writeln!(writer)?;
    Ok(())
}

#[derive(Serialize)]
struct BatchOutput<'a> {
    atoms: &'a [AtomRecord],
}

pub fn write_batch(
    mut writer: Box<dyn Write>,
    records: &[AtomRecord],
    format: &OutputFormat,
    precision: usize,
    source_name: &str,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut writer, &BatchOutput { atoms: records })?;
            writeln!(writer)?;
        }
        OutputFormat::Csv => {
            writeln!(writer, "index,atomic_number,symbol,occupancy,total_energy")?;
            for (i, record) in records.iter().enumerate() {
                writeln!(
                    writer,
                    "{},{},{},{},{:.*}",
                    i,
                    record.atomic_number,
                    record.symbol.as_deref().unwrap_or("??"),
                    format_occupancy(&record.occupancy),
                    precision,
                    record.total_energy.unwrap_or(f64::NAN)
                )?;
            }
        }
        OutputFormat::Pretty => {
            title(&mut writer, "Slater Shielding Batch Results")?;

            let mut summary_table = Table::new();
            summary_table.set_format(summary_format());
            summary_table.add_row(row![b->"Request File:", source_name]);
            summary_table.add_row(row![b->"Total Atoms:", records.len()]);
            summary_table.print(&mut writer)?;
            writeln!(writer)?;

            let mut data_table = Table::new();
            data_table.set_format(box_format());
            data_table.set_titles(
                row![bc->"Index", bc->"Element", bc->"Z", bc->"Occupancy", bc->"Energy (Ha)", bc->"Points"],
            );
            for (i, record) in records.iter().enumerate() {
                let points = record
                    .density
                    .as_ref()
                    .map(|d| d.len())
                    .or_else(|| record.components.first().map(|c| c.profile.len()))
                    .unwrap_or(0);
                data_table.add_row(row![
                    r->i,
                    l->record.symbol.as_deref().unwrap_or("??"),
                    r->record.atomic_number,
                    l->format_occupancy(&record.occupancy),
                    r->format!("{:.prec$}", record.total_energy.unwrap_or(f64::NAN), prec = precision),
                    r->points
                ]);
            }
            data_table.print(&mut writer)?;
        }
    }
    writer.flush()?;
    Ok(())
}
