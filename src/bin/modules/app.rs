use super::cli::Cli;
use super::error::CliError;
use super::io::{self, Report};
use indicatif::{ProgressBar, ProgressStyle};
use slater::elements::parse_occupancy;
use slater::math::derivatives;
use slater::{
    Atom, ComponentPolicy, Configuration, DensityCalculator, DensityOptions, DensityRequest,
    ElementTable, GridSpec, SlaterError, get_default_elements,
};
use std::borrow::Cow;

pub fn run(args: Cli) -> Result<(), CliError> {
    let calculator = DensityCalculator::new().with_options(DensityOptions {
        component_policy: if args.engine.occupied_only {
            ComponentPolicy::OccupiedOnly
        } else {
            ComponentPolicy::AllShells
        },
        parallel: args.engine.parallel,
    });

    if let Some(batch_path) = &args.batch {
        return run_batch(&args, &calculator, batch_path);
    }

    let table: Cow<'static, ElementTable> = match &args.engine.elements {
        Some(path) => Cow::Owned(ElementTable::load_from_file(path)?),
        None => Cow::Borrowed(get_default_elements()),
    };

    let atom = resolve_atom(&args, &table)?;
    let configuration = Configuration::from(args.configuration);
    let atom = configuration.apply(&atom)?;
    log::info!("Computing {} ({})", atom, configuration);

    let grid = GridSpec {
        scale: args.grid.scale.into(),
        start: args.grid.start,
        max_radius: args.grid.max_radius,
        step: args.grid.step,
        growth: args.grid.growth,
    }
    .build()
    .map_err(SlaterError::from)?;

    let pb = spinner("Computing Slater densities...");
    let mut result = calculator.compute(&atom, &grid)?;
    pb.finish_and_clear();

    let operators = if args.output.operators {
        Some(derivatives::radial_operators(&result.total, grid.points())?)
    } else {
        None
    };

    if args.output.weighted {
        result.total = result.total.shell_volume_weighted(grid.points())?;
        for component in &mut result.components {
            component.profile = component.profile.shell_volume_weighted(grid.points())?;
        }
    }

    let report = Report {
        atom: &atom,
        configuration,
        grid: &grid,
        result: &result,
        operators: operators.as_ref(),
        derivative: args.output.derivative as usize,
        weighted: args.output.weighted,
    };

    let writer = io::get_writer(&args.output.output)?;
    io::write_results(
        writer,
        &report,
        &args.output.format,
        args.output.precision,
        args.output.stride as usize,
    )?;

    Ok(())
}

fn resolve_atom(args: &Cli, table: &ElementTable) -> Result<Atom, CliError> {
    if let Some(key) = &args.element {
        return Ok(table.atom(key)?);
    }
    match (args.atomic_number, &args.occupancy) {
        (Some(atomic_number), Some(text)) => {
            let occupancy = parse_occupancy(text).map_err(SlaterError::from)?;
            Ok(Atom::new(atomic_number, occupancy)?)
        }
        _ => Err(CliError::MissingTarget),
    }
}

fn run_batch(
    args: &Cli,
    calculator: &DensityCalculator,
    path: &std::path::Path,
) -> Result<(), CliError> {
    let request = DensityRequest::load_from_file(path)?;
    log::info!(
        "Batch request from '{}': {} atoms on a {:?} grid to {} Bohr",
        path.display(),
        request.atoms.len(),
        request.scale_type,
        request.plot_radius
    );

    let pb = spinner(&format!("Computing {} atoms...", request.atoms.len()));
    let records = request.run(calculator)?;
    pb.finish_and_clear();

    let writer = io::get_writer(&args.output.output)?;
    io::write_batch(
        writer,
        &records,
        &args.output.format,
        args.output.precision,
        &path.display().to_string(),
    )
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
