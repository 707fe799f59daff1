#![allow(dead_code)]

use slater::analysis::radial_integral;
use slater::{Atom, DensityCalculator, RadialGrid, get_default_elements};

pub struct TestCase<'a> {
    pub name: &'a str,
    /// Slot index and the textbook effective charge `Z − s` of that slot.
    pub expected: Vec<(usize, f64)>,
}

pub fn element(name: &str) -> Atom {
    get_default_elements()
        .atom(name)
        .unwrap_or_else(|e| panic!("{} should be in the default table: {}", name, e))
}

/// A grid fine enough near the nucleus for heavy 1s shells and long enough for diffuse valence
/// shells.
pub fn integration_grid() -> RadialGrid {
    RadialGrid::geometric(1e-6, 60.0, 1.005).expect("valid geometric grid")
}

/// Electrons inside the grid, from the trapezoid integral of `4πr²ρ`.
pub fn integrated_electrons(atom: &Atom, grid: &RadialGrid) -> f64 {
    let result = DensityCalculator::new()
        .compute(atom, grid)
        .expect("density calculation failed");
    radial_integral(grid.points(), &result.total.value).expect("matching lengths")
}

pub fn run_group_test(
    group_name: &str,
    cases: Vec<TestCase>,
    group_avg_limit: f64,
    group_max_limit: f64,
) {
    let mut group_total_error = 0.0;
    let mut group_max_error = 0.0;
    let mut total_data_points = 0;

    println!("\nRunning Group Test: {}", group_name);
    println!("{:-<80}", "");
    println!(
        "{:<10} | {:<10} | {:<10} | {:<10}",
        "Element", "Shell", "Expected", "Calculated"
    );

    for case in cases {
        let atom = element(case.name);

        for (index, expected_zeff) in &case.expected {
            let calculated_zeff = atom
                .effective_charge(*index)
                .unwrap_or_else(|| panic!("{} has no slot {}", case.name, index));
            let error = (calculated_zeff - expected_zeff).abs();

            println!(
                "{:<10} | {:<10} | {:<10.4} | {:<10.4} (Err: {:.2e})",
                case.name,
                atom.shells()[*index],
                expected_zeff,
                calculated_zeff,
                error
            );

            group_total_error += error;
            if error > group_max_error {
                group_max_error = error;
            }
            total_data_points += 1;
        }
    }

    let group_avg_error = if total_data_points > 0 {
        group_total_error / total_data_points as f64
    } else {
        0.0
    };

    println!("{:-<80}", "");
    println!("Group Statistics for '{}':", group_name);
    println!("  Total Data Points: {}", total_data_points);
    println!(
        "  Group Avg Error:   {:.2e} (Limit: {:.2e})",
        group_avg_error, group_avg_limit
    );
    println!(
        "  Group Max Error:   {:.2e} (Limit: {:.2e})",
        group_max_error, group_max_limit
    );
    println!("{:-<80}\n", "");

    assert!(
        group_avg_error <= group_avg_limit,
        "Group average error {:.2e} exceeds limit {:.2e}",
        group_avg_error,
        group_avg_limit
    );

    assert!(
        group_max_error <= group_max_limit,
        "Group maximum error {:.2e} exceeds limit {:.2e}",
        group_max_error,
        group_max_limit
    );
}

/// Integrates the total density of each element and compares it with its electron count.
pub fn run_electron_count_test(group_name: &str, names: &[&str], relative_limit: f64) {
    let grid = integration_grid();

    println!("\nRunning Electron Count Test: {}", group_name);
    println!("{:-<80}", "");
    println!("{:<10} | {:<10} | {:<12}", "Element", "Electrons", "Integrated");

    let mut worst: f64 = 0.0;
    for &name in names {
        let atom = element(name);
        let expected = atom.electron_count() as f64;
        let integrated = integrated_electrons(&atom, &grid);
        let relative = (integrated - expected).abs() / expected;
        worst = worst.max(relative);

        println!(
            "{:<10} | {:<10} | {:<12.6} (Rel Err: {:.2e})",
            name, expected, integrated, relative
        );
    }
    println!("{:-<80}\n", "");

    assert!(
        worst <= relative_limit,
        "Worst relative electron count error {:.2e} exceeds limit {:.2e}",
        worst,
        relative_limit
    );
}
