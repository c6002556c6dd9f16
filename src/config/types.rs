use crate::community::DEFAULT_MAX_PASSES;
use crate::ingest::DEFAULT_MAX_VERTICES;
use crate::layout::{DEFAULT_CANVAS, DEFAULT_GRAVITY, DEFAULT_MAX_ITERATIONS};
use crate::rank::pagerank::{DAMPING, ITERATIONS};
use crate::rank::RankingAlgorithm;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    #[serde(default = "default_canvas")]
    pub width: f64,
    #[serde(default = "default_canvas")]
    pub height: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default = "default_gravity")]
    pub gravity: f64,
    /// Falls back to `height / 10`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_temperature: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default)]
    pub parallel_repulsion: bool,
    #[serde(default)]
    pub clamp_to_canvas: bool,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            width: default_canvas(),
            height: default_canvas(),
            max_iterations: default_max_iterations(),
            gravity: default_gravity(),
            initial_temperature: None,
            seed: None,
            parallel_repulsion: false,
            clamp_to_canvas: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelPropConfig {
    #[serde(default = "default_max_passes")]
    pub max_passes: usize,
    #[serde(default = "default_true")]
    pub stop_when_stable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for LabelPropConfig {
    fn default() -> Self {
        Self {
            max_passes: default_max_passes(),
            stop_when_stable: true,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    #[serde(default = "default_algorithm")]
    pub algorithm: RankingAlgorithm,
    #[serde(default = "default_rank_iterations")]
    pub iterations: usize,
    #[serde(default = "default_damping")]
    pub damping: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            iterations: default_rank_iterations(),
            damping: default_damping(),
        }
    }
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub show_isolated: bool,
    #[serde(default = "default_true")]
    pub include_neighbours: bool,
    #[serde(default = "default_true")]
    pub include_rank: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            show_isolated: false,
            include_neighbours: true,
            include_rank: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Largest vertex count a text edge list may imply.
    #[serde(default = "default_max_vertices")]
    pub max_vertices: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_vertices: default_max_vertices(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default = "default_true")]
    pub progress_bars: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self { progress_bars: true }
    }
}

const fn default_true() -> bool { true }
const fn default_canvas() -> f64 { DEFAULT_CANVAS }
const fn default_max_iterations() -> usize { DEFAULT_MAX_ITERATIONS }
const fn default_gravity() -> f64 { DEFAULT_GRAVITY }
const fn default_max_passes() -> usize { DEFAULT_MAX_PASSES }
const fn default_algorithm() -> RankingAlgorithm { RankingAlgorithm::Neighbourhood }
const fn default_rank_iterations() -> usize { ITERATIONS }
const fn default_damping() -> f64 { DAMPING }
const fn default_max_vertices() -> usize { DEFAULT_MAX_VERTICES }

/// On-disk shape of `fdlgraph.toml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FdlToml {
    #[serde(default)]
    pub layout: LayoutConfig,
    #[serde(default)]
    pub labelprop: LabelPropConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
    #[serde(default)]
    pub preferences: Preferences,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub labelprop: LabelPropConfig,
    pub ranking: RankingConfig,
    pub export: ExportConfig,
    pub ingest: IngestConfig,
    pub preferences: Preferences,
}
