use slater::analysis::{approximate_derivative, approximate_second_derivative, rms_error};
use slater::{Atom, DensityCalculator, RadialGrid, get_default_elements};

fn carbon() -> Atom {
    get_default_elements().atom("C").unwrap()
}

fn fine_grid() -> RadialGrid {
    RadialGrid::uniform(0.2, 6.0, 1e-3).unwrap()
}

fn assert_close(analytic: f64, numeric: f64, scale: f64, what: &str, r: f64) {
    assert!(
        (analytic - numeric).abs() <= 1e-4 * scale,
        "{} at r = {:.3}: analytic {:e} vs numeric {:e}",
        what,
        r,
        analytic,
        numeric
    );
}

#[test]
fn test_laplacian_matches_finite_differences() {
    let grid = fine_grid();
    let r = grid.points();
    let calculator = DensityCalculator::new();
    let total = calculator.compute(&carbon(), &grid).unwrap().total;
    let ops = calculator.radial_operators(&carbon(), &grid).unwrap();

    let second = approximate_second_derivative(r, &total.value).unwrap();
    for i in (100..r.len() - 100).step_by(250) {
        let numeric = second[i] + 2.0 * total.d1[i] / r[i];
        let scale = total.d2[i].abs() + (2.0 * total.d1[i] / r[i]).abs();
        assert_close(ops.laplacian[i], numeric, scale, "laplacian", r[i]);
    }
}

#[test]
fn test_gradient_of_laplacian_is_derivative_of_laplacian() {
    let grid = fine_grid();
    let r = grid.points();
    let ops = DensityCalculator::new()
        .radial_operators(&carbon(), &grid)
        .unwrap();

    let numeric = approximate_derivative(r, &ops.laplacian).unwrap();
    for i in (100..r.len() - 100).step_by(250) {
        let scale = ops.grad_laplacian[i].abs() + ops.laplacian[i].abs() / r[i];
        assert_close(ops.grad_laplacian[i], numeric[i], scale, "grad laplacian", r[i]);
    }
}

#[test]
fn test_laplacian_of_laplacian_is_radial_laplacian_of_laplacian() {
    let grid = fine_grid();
    let r = grid.points();
    let ops = DensityCalculator::new()
        .radial_operators(&carbon(), &grid)
        .unwrap();

    // ∇²L = L'' + 2L'/r with L' given analytically by the gradient of the Laplacian
    let l2 = approximate_derivative(r, &ops.grad_laplacian).unwrap();
    for i in (100..r.len() - 100).step_by(250) {
        let numeric = l2[i] + 2.0 * ops.grad_laplacian[i] / r[i];
        let scale = l2[i].abs() + (2.0 * ops.grad_laplacian[i] / r[i]).abs();
        assert_close(ops.lapl_laplacian[i], numeric, scale, "lapl laplacian", r[i]);
    }
}

#[test]
fn test_finite_difference_gradient_has_small_rms_error() {
    let grid = fine_grid();
    let r = grid.points();
    let ops = DensityCalculator::new()
        .radial_operators(&carbon(), &grid)
        .unwrap();

    let numeric = approximate_derivative(r, &ops.density).unwrap();
    let interior = 1..r.len() - 1;
    let rms = rms_error(&numeric[interior.clone()], &ops.gradient[interior]).unwrap();
    let peak = ops.gradient.iter().fold(0.0f64, |m, g| m.max(g.abs()));
    assert!(rms < 1e-4 * peak, "rms {:e} vs peak gradient {:e}", rms, peak);
}
