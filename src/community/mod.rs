// src/community/mod.rs
//! Label propagation community detection.
//!
//! Every vertex repeatedly adopts the label held by most of its neighbours.
//! Sweeps run in increasing vertex order and update labels in place, so a
//! vertex sees the labels its predecessors already chose in the same sweep.
//! Ties are broken uniformly at random.

use crate::graph::{Graph, VertexId};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

/// Default pass budget.
pub const DEFAULT_MAX_PASSES: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropagationReport {
    pub passes_run: usize,
    pub labels_changed_last_pass: usize,
    /// True when the last sweep changed nothing and drew no random tie-break.
    pub converged: bool,
}

pub struct LabelPropagation {
    max_passes: usize,
    stop_when_stable: bool,
    rng: ChaCha8Rng,
}

/// Outcome of voting on a single vertex.
enum Vote {
    Unanimous(VertexId),
    Tied(Vec<VertexId>),
}

impl LabelPropagation {
    /// Creates an engine with a random seed.
    #[must_use]
    pub fn new(max_passes: usize) -> Self {
        Self::with_rng(max_passes, ChaCha8Rng::from_entropy())
    }

    #[must_use]
    pub fn seeded(max_passes: usize, seed: u64) -> Self {
        Self::with_rng(max_passes, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(max_passes: usize, rng: ChaCha8Rng) -> Self {
        Self {
            max_passes,
            stop_when_stable: true,
            rng,
        }
    }

    /// Stopping early only happens on a true fixed point, so results are the
    /// same as running the full budget.
    #[must_use]
    pub fn stop_when_stable(mut self, enabled: bool) -> Self {
        self.stop_when_stable = enabled;
        self
    }

    /// Runs up to `max_passes` sweeps over `graph`, rewriting its labels.
    pub fn run(&mut self, graph: &mut Graph) -> PropagationReport {
        let mut report = PropagationReport {
            passes_run: 0,
            labels_changed_last_pass: 0,
            converged: false,
        };

        for pass in 1..=self.max_passes {
            let (changed, ties) = self.sweep(graph);
            report.passes_run = pass;
            report.labels_changed_last_pass = changed;
            report.converged = changed == 0 && ties == 0;
            trace!(pass, changed, ties, "label propagation sweep");

            if report.converged && self.stop_when_stable {
                break;
            }
        }

        debug!(
            passes = report.passes_run,
            communities = graph.community_count(),
            converged = report.converged,
            "label propagation finished"
        );
        report
    }

    /// One in-place sweep. Returns (labels changed, random tie-breaks drawn).
    fn sweep(&mut self, graph: &mut Graph) -> (usize, usize) {
        let mut changed = 0;
        let mut ties = 0;
        let mut scratch = Vec::new();

        for v in 0..graph.vertex_count() as VertexId {
            let Some(vote) = neighbour_vote(graph, v, &mut scratch) else {
                continue;
            };
            let label = match vote {
                Vote::Unanimous(label) => label,
                Vote::Tied(candidates) => {
                    ties += 1;
                    candidates[self.rng.gen_range(0..candidates.len())]
                }
            };
            if graph.community(v) != label {
                graph.set_community(v, label);
                changed += 1;
            }
        }
        (changed, ties)
    }
}

/// Finds the most frequent label among `v`'s neighbours; `None` when `v` is
/// isolated.
fn neighbour_vote(graph: &Graph, v: VertexId, labels: &mut Vec<VertexId>) -> Option<Vote> {
    let neighbours = graph.neighbors(v);
    if neighbours.is_empty() {
        return None;
    }

    labels.clear();
    labels.extend(neighbours.iter().map(|&u| graph.community(u)));
    labels.sort_unstable();

    let mut best = 0;
    let mut winners: Vec<VertexId> = Vec::new();
    let mut start = 0;
    while start < labels.len() {
        let label = labels[start];
        let run = labels[start..].iter().take_while(|&&l| l == label).count();
        if run > best {
            best = run;
            winners.clear();
            winners.push(label);
        } else if run == best {
            winners.push(label);
        }
        start += run;
    }

    Some(if winners.len() == 1 {
        Vote::Unanimous(winners[0])
    } else {
        Vote::Tied(winners)
    })
}
