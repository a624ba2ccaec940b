//! Location generators over a rectangular area.

use pdp_core::{Point, SimRng};

use crate::{ScenarioError, ScenarioResult};

/// Produces points inside a bounded area.
pub trait LocationGenerator: Send + Sync {
    /// `count` points, fully determined by `seed`.
    fn generate(&self, seed: u64, count: usize) -> Vec<Point>;
    fn center(&self) -> Point;
    fn min(&self) -> Point;
    fn max(&self) -> Point;
}

/// Independent uniform draws inside the rectangle `[min, max]`.
///
/// Each point consumes two draws, `x` first.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct UniformLocations {
    min: Point,
    max: Point,
}

impl Default for UniformLocations {
    /// A square of side 5 centred at the origin.
    fn default() -> Self {
        Self { min: Point::new(-2.5, -2.5), max: Point::new(2.5, 2.5) }
    }
}

impl LocationGenerator for UniformLocations {
    fn generate(&self, seed: u64, count: usize) -> Vec<Point> {
        let mut rng = SimRng::new(seed);
        let (w, h) = (self.max.x - self.min.x, self.max.y - self.min.y);
        (0..count)
            .map(|_| {
                let x = self.min.x + rng.next_f64() * w;
                let y = self.min.y + rng.next_f64() * h;
                Point::new(x, y)
            })
            .collect()
    }

    fn center(&self) -> Point {
        self.min.midpoint(self.max)
    }

    fn min(&self) -> Point {
        self.min
    }

    fn max(&self) -> Point {
        self.max
    }
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Describes the area either as a square around a centre or by explicit
/// corners.  Explicit corners win when both are given.
#[derive(Clone, Debug, Default)]
pub struct LocationsBuilder {
    center: Point,
    side:   Option<f64>,
    min:    Option<Point>,
    max:    Option<Point>,
}

impl LocationsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn square(mut self, side: f64) -> Self {
        self.side = Some(side);
        self
    }

    pub fn center(mut self, center: Point) -> Self {
        self.center = center;
        self
    }

    pub fn min(mut self, min: Point) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: Point) -> Self {
        self.max = Some(max);
        self
    }

    pub fn uniform(self) -> ScenarioResult<UniformLocations> {
        let (min, max) = self.bounds()?;
        Ok(UniformLocations { min, max })
    }

    fn bounds(&self) -> ScenarioResult<(Point, Point)> {
        let (min, max) = match (self.min, self.max, self.side) {
            (Some(min), Some(max), _) => (min, max),
            (None, None, Some(side)) => {
                if !(side.is_finite() && side >= 0.0) {
                    return Err(ScenarioError::Config(format!(
                        "square side must be non-negative and finite, got {side}"
                    )));
                }
                let half = side / 2.0;
                (
                    Point::new(self.center.x - half, self.center.y - half),
                    Point::new(self.center.x + half, self.center.y + half),
                )
            }
            (Some(_), None, _) | (None, Some(_), _) => {
                return Err(ScenarioError::Config(
                    "both min and max must be given for an explicit area".into(),
                ));
            }
            (None, None, None) => {
                return Err(ScenarioError::Config("location area is not set".into()));
            }
        };
        if min.x > max.x || min.y > max.y {
            return Err(ScenarioError::Config(format!(
                "area min {min} exceeds max {max}"
            )));
        }
        Ok((min, max))
    }
}
