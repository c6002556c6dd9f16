// src/layout/forces.rs
//! Fruchterman-Reingold force terms.

use crate::graph::VertexId;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

/// Distances below this count as exact overlap.
pub const OVERLAP_EPSILON: f64 = 1e-9;
/// Displacements below this are not applied.
pub const MIN_DISPLACEMENT: f64 = 1e-12;
/// Jitter components are drawn from `[-JITTER/2, JITTER/2)`.
const JITTER: f64 = 1e-3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;
    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

/// Repulsive magnitude: inverse-linear in distance.
#[must_use]
pub fn repulsive(distance: f64, k: f64) -> f64 {
    k * k / distance
}

/// Attractive magnitude: quadratic in distance.
#[must_use]
pub fn attractive(distance: f64, k: f64) -> f64 {
    distance * distance / k
}

/// Which force pass a jitter stream belongs to.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Phase {
    Repulsion = 0,
    Attraction = 1,
}

/// Lazily created jitter source for one vertex in one force pass.
///
/// Streams are keyed by (seed, iteration, vertex, phase) so the result does
/// not depend on the order vertices are processed in.
pub(crate) struct Jitter {
    seed: u64,
    iteration: u64,
    vertex: VertexId,
    phase: Phase,
    rng: Option<ChaCha8Rng>,
}

impl Jitter {
    pub(crate) fn new(seed: u64, iteration: usize, vertex: VertexId, phase: Phase) -> Self {
        Self {
            seed,
            iteration: iteration as u64,
            vertex,
            phase,
            rng: None,
        }
    }

    fn next(&mut self) -> Point {
        let (seed, iteration, vertex, phase) = (self.seed, self.iteration, self.vertex, self.phase);
        let rng = self.rng.get_or_insert_with(|| {
            let mut rng =
                ChaCha8Rng::seed_from_u64(seed ^ iteration.wrapping_mul(0x9E37_79B9_7F4A_7C15));
            rng.set_stream((u64::from(vertex) << 1) | phase as u64);
            rng
        });
        Point::new(
            (rng.gen::<f64>() - 0.5) * JITTER,
            (rng.gen::<f64>() - 0.5) * JITTER,
        )
    }

    /// Returns `(unit direction, length)` of `delta`, replacing an exact
    /// overlap with a random nudge. `None` if the nudge is degenerate too.
    pub(crate) fn separate(&mut self, delta: Point) -> Option<(Point, f64)> {
        let mut delta = delta;
        let mut distance = delta.length();
        if distance < OVERLAP_EPSILON {
            delta = self.next();
            distance = delta.length();
            if distance < OVERLAP_EPSILON {
                return None;
            }
        }
        Some((delta * (1.0 / distance), distance))
    }
}

/// Total repulsion acting on `v` from every other vertex.
pub(crate) fn repulsion_on(
    v: usize,
    positions: &[Point],
    k: f64,
    seed: u64,
    iteration: usize,
) -> Point {
    let mut jitter = Jitter::new(seed, iteration, v as VertexId, Phase::Repulsion);
    let here = positions[v];
    let mut total = Point::ORIGIN;

    for (u, &there) in positions.iter().enumerate() {
        if u == v {
            continue;
        }
        let Some((unit, distance)) = jitter.separate(here - there) else {
            continue;
        };
        total += unit * repulsive(distance, k);
    }
    total
}
