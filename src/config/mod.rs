// src/config/mod.rs
pub mod io;
pub mod types;

pub use self::io::CONFIG_FILE;
pub use self::types::{
    Config, ExportConfig, FdlToml, IngestConfig, LabelPropConfig, LayoutConfig, Preferences,
    RankingConfig,
};

use crate::error::ConfigError;
use crate::graph::GraphType;
use crate::ingest::IngestOptions;
use crate::layout::{LayoutParams, SnapshotOptions};
use crate::rank::PageRankParams;
use std::path::Path;

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config from `fdlgraph.toml` in the working directory, if any.
    ///
    /// # Errors
    /// Returns [`ConfigError::Toml`] if the file exists but does not parse,
    /// or [`ConfigError::Io`] if it exists but cannot be read.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Like [`Config::load`] but reads `path`.
    ///
    /// # Errors
    /// See [`Config::load`].
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::new();
        io::load_toml_config(&mut config, path)?;
        Ok(config)
    }

    /// Replaces every section with the contents of `content`.
    ///
    /// # Errors
    /// Returns the TOML error if `content` is not a valid config.
    pub fn parse_toml(&mut self, content: &str) -> Result<(), toml::de::Error> {
        io::parse_toml(self, content)
    }

    /// Validates configuration.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] for values the simulation cannot run
    /// with: a non-positive canvas or temperature, zero iterations, negative
    /// gravity, a damping factor outside `[0, 1)`, or a zero vertex limit.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout_params()
            .validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        let damping = self.ranking.damping;
        if !(0.0..1.0).contains(&damping) {
            return Err(ConfigError::Invalid(format!(
                "ranking.damping must be in [0, 1), got {damping}"
            )));
        }
        if self.ingest.max_vertices == 0 {
            return Err(ConfigError::Invalid(
                "ingest.max_vertices must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Saves the current configuration to `path`.
    ///
    /// # Errors
    /// Returns error if serialization or the file write fails.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        io::save_to_file(self, path)
    }

    #[must_use]
    pub fn layout_params(&self) -> LayoutParams {
        let l = &self.layout;
        LayoutParams {
            width: l.width,
            height: l.height,
            max_iterations: l.max_iterations,
            gravity: l.gravity,
            initial_temperature: l.initial_temperature,
            seed: l.seed,
            parallel_repulsion: l.parallel_repulsion,
            clamp_to_canvas: l.clamp_to_canvas,
        }
    }

    #[must_use]
    pub fn snapshot_options(&self) -> SnapshotOptions {
        SnapshotOptions {
            show_isolated: self.export.show_isolated,
            include_neighbours: self.export.include_neighbours,
            include_rank: self.export.include_rank,
        }
    }

    #[must_use]
    pub fn ingest_options(&self, graph_type: GraphType) -> IngestOptions {
        IngestOptions::new(graph_type).max_vertices(self.ingest.max_vertices)
    }

    #[must_use]
    pub fn pagerank_params(&self) -> PageRankParams {
        PageRankParams {
            damping: self.ranking.damping,
            iterations: self.ranking.iterations,
        }
    }
}
