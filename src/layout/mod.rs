// src/layout/mod.rs
//! Force-directed layout (Fruchterman-Reingold spring embedder).
//!
//! A [`Layout`] borrows a [`Graph`] for one run: it places vertices at random
//! inside the canvas, then every [`Layout::step`] applies all-pairs
//! repulsion, per-edge attraction and a weak pull toward the origin. Movement
//! is capped by a temperature that cools linearly to zero over the iteration
//! budget, and the layout is recentred on the origin after every step.

pub mod forces;
pub mod snapshot;

pub use forces::Point;
pub use snapshot::{EdgeRecord, LayoutSnapshot, NodeRecord, SnapshotOptions};

use crate::error::LayoutError;
use crate::graph::{Graph, GraphType, VertexId};
use forces::{attractive, Jitter, Phase, MIN_DISPLACEMENT};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use tracing::{debug, trace};

pub const DEFAULT_CANVAS: f64 = 128.0;
pub const DEFAULT_MAX_ITERATIONS: usize = 250;
pub const DEFAULT_GRAVITY: f64 = 0.01;

#[derive(Debug, Clone)]
pub struct LayoutParams {
    pub width: f64,
    pub height: f64,
    pub max_iterations: usize,
    pub gravity: f64,
    /// Defaults to a tenth of the canvas height.
    pub initial_temperature: Option<f64>,
    /// Drawn at random when unset.
    pub seed: Option<u64>,
    pub parallel_repulsion: bool,
    pub clamp_to_canvas: bool,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS,
            height: DEFAULT_CANVAS,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            gravity: DEFAULT_GRAVITY,
            initial_temperature: None,
            seed: None,
            parallel_repulsion: false,
            clamp_to_canvas: false,
        }
    }
}

impl LayoutParams {
    #[must_use]
    pub fn start_temperature(&self) -> f64 {
        self.initial_temperature.unwrap_or(self.height / 10.0)
    }

    /// Checks the parameters can drive a simulation.
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidParameter`] for a non-positive canvas,
    /// a zero iteration budget, negative gravity or a non-positive
    /// temperature.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.width) || !positive(self.height) {
            return Err(LayoutError::InvalidParameter(format!(
                "canvas must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.max_iterations == 0 {
            return Err(LayoutError::InvalidParameter(
                "max_iterations must be at least 1".into(),
            ));
        }
        if !self.gravity.is_finite() || self.gravity < 0.0 {
            return Err(LayoutError::InvalidParameter(format!(
                "gravity must be non-negative, got {}",
                self.gravity
            )));
        }
        if !positive(self.start_temperature()) {
            return Err(LayoutError::InvalidParameter(format!(
                "initial temperature must be positive, got {}",
                self.start_temperature()
            )));
        }
        Ok(())
    }
}

/// What happened during one iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterationStats {
    /// 1-based iteration number.
    pub iteration: usize,
    /// Movement cap in force during this iteration.
    pub temperature: f64,
    /// Cap for the next iteration after cooling.
    pub next_temperature: f64,
    /// Largest distance any vertex moved before recentring.
    pub max_step: f64,
    /// Centroid that recentring removed.
    pub centroid_shift: Point,
}

pub struct Layout<'g> {
    graph: &'g Graph,
    adjacency: Vec<&'g [VertexId]>,
    params: LayoutParams,
    seed: u64,
    positions: Vec<Point>,
    displacements: Vec<Point>,
    k: f64,
    initial_temperature: f64,
    temperature: f64,
    iteration: usize,
}

impl<'g> Layout<'g> {
    /// Places every vertex uniformly at random inside
    /// `[-W/2, W/2] x [-H/2, H/2]` and derives `k = sqrt(W*H / V)`.
    ///
    /// # Errors
    /// Returns [`LayoutError::EmptyGraph`] for a graph without vertices and
    /// [`LayoutError::InvalidParameter`] if `params` fail validation.
    #[allow(clippy::cast_precision_loss)]
    pub fn new(graph: &'g Graph, params: LayoutParams) -> Result<Self, LayoutError> {
        params.validate()?;
        let n = graph.vertex_count();
        if n == 0 {
            return Err(LayoutError::EmptyGraph);
        }

        let seed = params.seed.unwrap_or_else(rand::random);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let (half_w, half_h) = (params.width / 2.0, params.height / 2.0);
        let positions = (0..n)
            .map(|_| {
                Point::new(
                    rng.gen_range(-half_w..=half_w),
                    rng.gen_range(-half_h..=half_h),
                )
            })
            .collect();

        let k = (params.width * params.height / n as f64).sqrt();
        let initial_temperature = params.start_temperature();
        debug!(vertices = n, k, temperature = initial_temperature, seed, "layout initialised");

        Ok(Self {
            graph,
            adjacency: graph.adjacency_list(),
            params,
            seed,
            positions,
            displacements: vec![Point::ORIGIN; n],
            k,
            initial_temperature,
            temperature: initial_temperature,
            iteration: 0,
        })
    }

    /// Replaces the random initial placement.
    ///
    /// # Errors
    /// Returns [`LayoutError::InvalidParameter`] if `positions` does not hold
    /// exactly one point per vertex.
    pub fn with_positions(mut self, positions: Vec<Point>) -> Result<Self, LayoutError> {
        if positions.len() != self.positions.len() {
            return Err(LayoutError::InvalidParameter(format!(
                "expected {} positions, got {}",
                self.positions.len(),
                positions.len()
            )));
        }
        self.positions = positions;
        Ok(self)
    }

    #[must_use]
    pub fn positions(&self) -> &[Point] {
        &self.positions
    }

    #[must_use]
    pub fn k(&self) -> f64 {
        self.k
    }

    #[must_use]
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    #[must_use]
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn max_iterations(&self) -> usize {
        self.params.max_iterations
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.iteration >= self.params.max_iterations
    }

    #[must_use]
    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    /// Runs every remaining iteration.
    pub fn run(&mut self) {
        self.run_with(|_| {});
    }

    /// Runs every remaining iteration, reporting each one to `on_iteration`.
    pub fn run_with<F: FnMut(&IterationStats)>(&mut self, mut on_iteration: F) {
        while let Some(stats) = self.step() {
            on_iteration(&stats);
        }
        debug!(iterations = self.iteration, "layout finished");
    }

    /// Advances the simulation by one iteration; `None` once the budget is
    /// spent.
    pub fn step(&mut self) -> Option<IterationStats> {
        if self.is_done() {
            return None;
        }
        self.iteration += 1;
        let temperature = self.temperature;

        self.displacements.fill(Point::ORIGIN);
        self.apply_repulsion();
        self.apply_attraction();
        self.apply_gravity();
        let max_step = self.move_vertices();
        let centroid_shift = self.recenter();
        if self.params.clamp_to_canvas {
            self.clamp();
        }
        self.cool();

        let stats = IterationStats {
            iteration: self.iteration,
            temperature,
            next_temperature: self.temperature,
            max_step,
            centroid_shift,
        };
        trace!(?stats, "layout iteration");
        Some(stats)
    }

    fn apply_repulsion(&mut self) {
        let (positions, k, seed, iteration) = (&self.positions, self.k, self.seed, self.iteration);
        if self.params.parallel_repulsion {
            self.displacements
                .par_iter_mut()
                .enumerate()
                .for_each(|(v, disp)| *disp += forces::repulsion_on(v, positions, k, seed, iteration));
        } else {
            for (v, disp) in self.displacements.iter_mut().enumerate() {
                *disp += forces::repulsion_on(v, positions, k, seed, iteration);
            }
        }
    }

    /// Each stored adjacency entry pulls its endpoints together. Undirected
    /// graphs store every edge twice, so they get half the force per entry.
    fn apply_attraction(&mut self) {
        let scale = match self.graph.graph_type() {
            GraphType::Undirected => 0.5,
            GraphType::Directed => 1.0,
        };

        for (v, neighbours) in self.adjacency.iter().enumerate() {
            let mut jitter = Jitter::new(self.seed, self.iteration, v as VertexId, Phase::Attraction);
            for &u in *neighbours {
                let u = u as usize;
                if u == v {
                    continue;
                }
                let delta = self.positions[v] - self.positions[u];
                let Some((unit, distance)) = jitter.separate(delta) else {
                    continue;
                };
                let pull = unit * (attractive(distance, self.k) * scale);
                self.displacements[v] -= pull;
                self.displacements[u] += pull;
            }
        }
    }

    fn apply_gravity(&mut self) {
        let gravity = self.params.gravity;
        for (disp, &pos) in self.displacements.iter_mut().zip(&self.positions) {
            *disp -= pos * gravity;
        }
    }

    /// Moves each vertex at most `temperature` along its displacement.
    /// Returns the largest step taken.
    fn move_vertices(&mut self) -> f64 {
        let mut max_step: f64 = 0.0;
        for (pos, &disp) in self.positions.iter_mut().zip(&self.displacements) {
            let length = disp.length();
            if length < MIN_DISPLACEMENT {
                continue;
            }
            let step = length.min(self.temperature);
            *pos += disp * (step / length);
            max_step = max_step.max(step);
        }
        max_step
    }

    #[allow(clippy::cast_precision_loss)]
    fn recenter(&mut self) -> Point {
        let n = self.positions.len() as f64;
        let sum = self
            .positions
            .iter()
            .fold(Point::ORIGIN, |acc, &p| acc + p);
        let centroid = sum * (1.0 / n);
        for pos in &mut self.positions {
            *pos -= centroid;
        }
        centroid
    }

    fn clamp(&mut self) {
        let (half_w, half_h) = (self.params.width / 2.0, self.params.height / 2.0);
        for pos in &mut self.positions {
            pos.x = pos.x.clamp(-half_w, half_w);
            pos.y = pos.y.clamp(-half_h, half_h);
        }
    }

    /// Linear schedule: reaches zero after the final iteration.
    #[allow(clippy::cast_precision_loss)]
    fn cool(&mut self) {
        let progress = self.iteration as f64 / self.params.max_iterations as f64;
        self.temperature = (self.initial_temperature * (1.0 - progress)).max(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(seed: u64) -> LayoutParams {
        LayoutParams {
            seed: Some(seed),
            ..LayoutParams::default()
        }
    }

    #[test]
    fn k_uses_vertex_count_not_edges() {
        let g = Graph::from_edges(GraphType::Undirected, 4, &[(0, 1)]).expect("valid edges");
        let layout = Layout::new(&g, params(1)).expect("layout");
        assert!((layout.k() - 64.0).abs() < 1e-12);
        assert!((layout.temperature() - 12.8).abs() < 1e-12);
    }

    #[test]
    fn initial_positions_lie_inside_canvas() {
        let g = Graph::from_edges(GraphType::Undirected, 50, &[]).expect("valid edges");
        let layout = Layout::new(&g, params(3)).expect("layout");
        for p in layout.positions() {
            assert!(p.x.abs() <= 64.0 && p.y.abs() <= 64.0);
        }
    }

    #[test]
    fn empty_graph_is_rejected() {
        let g = Graph::from_edges(GraphType::Undirected, 0, &[]).expect("valid edges");
        assert!(matches!(
            Layout::new(&g, params(1)),
            Err(LayoutError::EmptyGraph)
        ));
    }

    #[test]
    fn invalid_params_are_rejected() {
        let g = Graph::from_edges(GraphType::Undirected, 2, &[(0, 1)]).expect("valid edges");
        let bad = LayoutParams {
            max_iterations: 0,
            ..params(1)
        };
        assert!(matches!(
            Layout::new(&g, bad),
            Err(LayoutError::InvalidParameter(_))
        ));
    }

    #[test]
    fn step_stops_after_budget() {
        let g = Graph::from_edges(GraphType::Undirected, 3, &[(0, 1), (1, 2)]).expect("valid edges");
        let mut layout = Layout::new(
            &g,
            LayoutParams {
                max_iterations: 5,
                ..params(2)
            },
        )
        .expect("layout");
        let mut count = 0;
        layout.run_with(|_| count += 1);
        assert_eq!(count, 5);
        assert!(layout.is_done());
        assert!(layout.step().is_none());
        assert!(layout.temperature().abs() < 1e-12);
    }

    #[test]
    fn directed_attraction_is_twice_undirected_per_entry() {
        let pos = vec![Point::new(-5.0, 0.0), Point::new(5.0, 0.0)];
        let directed = Graph::from_edges(GraphType::Directed, 2, &[(0, 1)]).expect("valid edges");
        let undirected =
            Graph::from_edges(GraphType::Undirected, 2, &[(0, 1)]).expect("valid edges");

        let pull = |g: &Graph| {
            let mut layout = Layout::new(g, params(1))
                .and_then(|l| l.with_positions(pos.clone()))
                .expect("layout");
            layout.apply_attraction();
            layout.displacements[0]
        };
        // one stored entry at full force vs two stored entries at half force
        let d = pull(&directed);
        let u = pull(&undirected);
        assert!((d.x - u.x).abs() < 1e-9);
        assert!(d.x > 0.0, "vertex 0 is pulled toward vertex 1");
    }

    #[test]
    fn parallel_and_sequential_repulsion_agree() {
        let edges = [(0, 1), (1, 2), (2, 3), (3, 4), (4, 0), (0, 2)];
        let g = Graph::from_edges(GraphType::Undirected, 5, &edges).expect("valid edges");

        let mut seq = Layout::new(&g, params(11)).expect("layout");
        let mut par = Layout::new(
            &g,
            LayoutParams {
                parallel_repulsion: true,
                ..params(11)
            },
        )
        .expect("layout");
        for _ in 0..20 {
            seq.step();
            par.step();
        }
        assert_eq!(seq.positions(), par.positions());
    }

    #[test]
    fn overlapping_vertices_are_separated() {
        let g = Graph::from_edges(GraphType::Undirected, 2, &[(0, 1)]).expect("valid edges");
        let mut layout = Layout::new(&g, params(5))
            .and_then(|l| l.with_positions(vec![Point::ORIGIN; 2]))
            .expect("layout");
        layout.step();
        let [a, b] = [layout.positions()[0], layout.positions()[1]];
        assert!((a - b).length() > 0.0);
        assert!(a.x.is_finite() && a.y.is_finite());
    }

    #[test]
    fn clamp_keeps_vertices_on_canvas() {
        let g = Graph::from_edges(GraphType::Undirected, 30, &[]).expect("valid edges");
        let mut layout = Layout::new(
            &g,
            LayoutParams {
                width: 10.0,
                height: 10.0,
                clamp_to_canvas: true,
                ..params(8)
            },
        )
        .expect("layout");
        layout.run();
        for p in layout.positions() {
            assert!(p.x.abs() <= 5.0 + 1e-12 && p.y.abs() <= 5.0 + 1e-12);
        }
    }
}
