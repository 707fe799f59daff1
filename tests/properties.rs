use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use slater::math::shielding::{screening_contribution, shielding_constants};
use slater::shells::SHELL_TABLE;
use slater::{Atom, ComponentPolicy, DensityCalculator, DensityOptions, RadialGrid};

const SAMPLES: usize = 200;

/// A random neutral atom over the shells with a tabulated n* (the first 16 slots).
fn random_neutral_atom(rng: &mut StdRng) -> Atom {
    let len = rng.gen_range(1..=16);
    let occupancy: Vec<u32> = SHELL_TABLE[..len]
        .iter()
        .map(|shell| rng.gen_range(0..=shell.capacity()))
        .collect();
    let electrons: u32 = occupancy.iter().sum();
    Atom::new(electrons.max(1), occupancy).expect("occupancies are within capacity")
}

#[test]
fn test_bound_densities_are_non_negative() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let grid = RadialGrid::exponential(0.01, 10.0, 0.05).unwrap();
    let calculator = DensityCalculator::new();

    let mut checked = 0;
    for _ in 0..SAMPLES {
        let atom = random_neutral_atom(&mut rng);
        let result = calculator.compute(&atom, &grid).unwrap();
        if !result.is_bound() {
            continue;
        }
        checked += 1;
        for component in &result.components {
            assert!(
                component.profile.value.iter().all(|&rho| rho >= 0.0),
                "negative density in {} of {}",
                component.shell,
                atom
            );
        }
        assert!(result.total.value.iter().all(|&rho| rho >= 0.0 && rho.is_finite()));
    }
    assert!(checked > SAMPLES / 2, "too few bound samples: {}", checked);
}

#[test]
fn test_neutral_atom_energies_are_negative() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..SAMPLES {
        let atom = random_neutral_atom(&mut rng);
        if atom.electron_count() > 0 {
            assert!(atom.total_energy() < 0.0, "{}", atom);
        }
        let summed: f64 = (0..atom.occupancy().len()).map(|i| atom.shell_energy(i)).sum();
        assert!((summed - atom.total_energy()).abs() <= 1e-9 * summed.abs().max(1.0));
    }
}

#[test]
fn test_shielding_only_depends_on_inner_shells() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..SAMPLES {
        let atom = random_neutral_atom(&mut rng);
        let occupancy = atom.occupancy();
        let cut = rng.gen_range(1..=occupancy.len());
        let truncated = shielding_constants(&occupancy[..cut]);
        assert_eq!(truncated[..], atom.shielding_constants()[..cut]);
    }
}

#[test]
fn test_shielding_sum_is_order_independent() {
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..SAMPLES {
        let atom = random_neutral_atom(&mut rng);
        let occupancy = atom.occupancy();
        for (shell, &ascending) in atom.shielding_constants().iter().enumerate() {
            let descending: f64 = (0..=shell)
                .rev()
                .map(|screening| screening_contribution(occupancy, shell, screening))
                .sum();
            assert!(
                (ascending - descending).abs() <= 1e-12 * ascending.abs().max(1.0),
                "slot {} of {}: {} vs {}",
                shell,
                atom,
                ascending,
                descending
            );
        }
    }
}

#[test]
fn test_component_policies_agree_on_total() {
    let mut rng = StdRng::seed_from_u64(2024);
    let grid = RadialGrid::uniform(0.05, 5.0, 0.05).unwrap();
    let all = DensityCalculator::new();
    let occupied = DensityCalculator::new().with_options(DensityOptions {
        component_policy: ComponentPolicy::OccupiedOnly,
        parallel: true,
    });

    for _ in 0..50 {
        let atom = random_neutral_atom(&mut rng);
        let a = all.compute(&atom, &grid).unwrap();
        let b = occupied.compute(&atom, &grid).unwrap();
        if a.is_bound() {
            assert_eq!(a.total, b.total);
        }
        assert_eq!(a.components.len(), atom.occupancy().len());
        assert_eq!(
            b.components.len(),
            atom.occupancy().iter().filter(|&&n| n > 0).count()
        );
    }
}
