//! Radial grids on which densities are sampled.
//!
//! A [`RadialGrid`] is a strictly increasing sequence of positive radii in Bohr. Every density
//! derivative divides by `r`, so the origin is rejected here, at the grid boundary, rather than
//! inside the density engine.

use crate::error::GridError;
use crate::math::constants::{
    DEFAULT_GRID_GROWTH, DEFAULT_GRID_MAX_RADIUS_BOHR, DEFAULT_GRID_START_BOHR,
    DEFAULT_GRID_STEP_BOHR, MAX_GRID_POINTS, MIN_GRID_RADIUS_BOHR,
};
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// How grid points are spaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridScale {
    /// Equal spacing.
    #[serde(alias = "Uniform")]
    Uniform,
    /// A uniform grid stretched geometrically, keeping its point count and both endpoints.
    #[default]
    #[serde(alias = "Exponential")]
    Exponential,
    /// Successive points multiplied by a constant growth factor until the outer radius is passed.
    #[serde(alias = "Geometric")]
    Geometric,
}

/// A validated radial grid.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGrid {
    points: Vec<f64>,
}

impl RadialGrid {
    /// Wraps a list of radii after checking that it is usable by the density engine.
    ///
    /// # Errors
    ///
    /// Returns a `GridError` if the list is empty, its first point is not strictly positive, or any
    /// point is non-finite or fails to increase on its predecessor.
    pub fn from_points(points: Vec<f64>) -> Result<Self, GridError> {
        let first = *points.first().ok_or(GridError::Empty)?;
        if let Some(index) = points.iter().position(|r| !r.is_finite()) {
            return Err(GridError::NonFinite { index });
        }
        if first < MIN_GRID_RADIUS_BOHR {
            return Err(GridError::NonPositiveStart(first));
        }
        if let Some(index) = points.windows(2).position(|pair| pair[1] <= pair[0]) {
            return Err(GridError::NotIncreasing { index: index + 1 });
        }
        Ok(Self { points })
    }

    /// Equally spaced radii `start, start + step, …` strictly below `max_radius`.
    pub fn uniform(start: f64, max_radius: f64, step: f64) -> Result<Self, GridError> {
        check_span(start, max_radius)?;
        if !(step > 0.0) {
            return Err(GridError::InvalidParameters(format!(
                "step must be positive, got {step}"
            )));
        }
        let count = check_count(((max_radius - start) / step - 1e-9).ceil().max(1.0))?;
        let points = (0..count).map(|i| start + i as f64 * step).collect();
        Self::from_points(points)
    }

    /// The uniform grid of the same parameters, stretched geometrically.
    ///
    /// Point `i` of `N + 1` becomes `x₀ exp(i ln(x_N / x₀) / N)`, so the count and both endpoints
    /// are unchanged while points crowd towards the nucleus.
    pub fn exponential(start: f64, max_radius: f64, step: f64) -> Result<Self, GridError> {
        Ok(Self::uniform(start, max_radius, step)?.stretched())
    }

    /// Radii `start, start·growth, start·growth², …` up to the first point at or past `max_radius`.
    pub fn geometric(start: f64, max_radius: f64, growth: f64) -> Result<Self, GridError> {
        check_span(start, max_radius)?;
        if !(growth > 1.0) || !growth.is_finite() {
            return Err(GridError::InvalidParameters(format!(
                "growth factor must exceed 1, got {growth}"
            )));
        }
        let expected = check_count((max_radius / start).ln() / growth.ln() + 2.0)?;
        let mut points = Vec::with_capacity(expected);
        points.push(start);
        let mut r = start;
        while r < max_radius {
            r *= growth;
            points.push(r);
        }
        Self::from_points(points)
    }

    /// A grid of the given scale out to `max_radius` with the default start, step and growth.
    pub fn from_scale(scale: GridScale, max_radius: f64) -> Result<Self, GridError> {
        GridSpec {
            scale,
            max_radius,
            ..GridSpec::default()
        }
        .build()
    }

    /// Geometric stretch of this grid that keeps its count and endpoints.
    pub fn stretched(&self) -> Self {
        let n = self.points.len() - 1;
        if n == 0 {
            return self.clone();
        }
        let x0 = self.points[0];
        let log_ratio = (self.points[n] / x0).ln() / n as f64;
        let mut points: Vec<f64> = (0..=n).map(|i| x0 * (i as f64 * log_ratio).exp()).collect();
        points[n] = self.points[n];
        Self { points }
    }

    /// Returns the radii in Bohr.
    pub fn points(&self) -> &[f64] {
        &self.points
    }

    /// Returns the number of points.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Returns the innermost radius.
    pub fn first(&self) -> f64 {
        self.points[0]
    }

    /// Returns the outermost radius.
    pub fn last(&self) -> f64 {
        self.points[self.points.len() - 1]
    }

    /// Consumes the grid and returns its radii.
    pub fn into_points(self) -> Vec<f64> {
        self.points
    }
}

impl Deref for RadialGrid {
    type Target = [f64];

    fn deref(&self) -> &[f64] {
        &self.points
    }
}

impl TryFrom<Vec<f64>> for RadialGrid {
    type Error = GridError;

    fn try_from(points: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_points(points)
    }
}

/// Converts an estimated point count, rejecting counts above [`MAX_GRID_POINTS`].
fn check_count(count: f64) -> Result<usize, GridError> {
    if !(count <= MAX_GRID_POINTS as f64) {
        return Err(GridError::InvalidParameters(format!(
            "parameters ask for about {count:.3e} points, more than the limit of {MAX_GRID_POINTS}"
        )));
    }
    Ok(count as usize)
}

fn check_span(start: f64, max_radius: f64) -> Result<(), GridError> {
    if !(start >= MIN_GRID_RADIUS_BOHR) || !start.is_finite() {
        return Err(GridError::NonPositiveStart(start));
    }
    if !(max_radius > start) || !max_radius.is_finite() {
        return Err(GridError::InvalidParameters(format!(
            "outer radius {max_radius} must exceed the first point {start}"
        )));
    }
    Ok(())
}

/// Parameters of a generated grid.
///
/// Missing fields fall back to the defaults of [`GridSpec::default`], so a request only needs to
/// name what it changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridSpec {
    pub scale: GridScale,
    /// First radius in Bohr.
    pub start: f64,
    /// Outer radius in Bohr.
    pub max_radius: f64,
    /// Spacing of the uniform grid, also the base of the exponential stretch.
    pub step: f64,
    /// Growth factor of geometric grids.
    pub growth: f64,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            scale: GridScale::Exponential,
            start: DEFAULT_GRID_START_BOHR,
            max_radius: DEFAULT_GRID_MAX_RADIUS_BOHR,
            step: DEFAULT_GRID_STEP_BOHR,
            growth: DEFAULT_GRID_GROWTH,
        }
    }
}

impl GridSpec {
    /// Generates the grid these parameters describe.
    pub fn build(&self) -> Result<RadialGrid, GridError> {
        let grid = match self.scale {
            GridScale::Uniform => RadialGrid::uniform(self.start, self.max_radius, self.step),
            GridScale::Exponential => {
                RadialGrid::exponential(self.start, self.max_radius, self.step)
            }
            GridScale::Geometric => RadialGrid::geometric(self.start, self.max_radius, self.growth),
        }?;
        log::debug!(
            "built {:?} grid: {} points from {:.3e} to {:.3} Bohr",
            self.scale,
            grid.point_count(),
            grid.first(),
            grid.last()
        );
        Ok(grid)
    }
}
