//! Configuration types for diagram reconstruction.
//!
//! This module provides configuration structures that tune the spatial
//! heuristics of the reconstruction engine. All types implement
//! [`serde::Deserialize`] so they can be loaded from external sources.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining every section.
//! - [`LinkingConfig`] - Tolerances used when attaching arrows to elements.
//! - [`TextConfig`] - Limits for attaching OCR words to elements.
//! - [`PoolConfig`] - Pool boundary repair settings.
//! - [`IdConfig`] - Identifier generation settings.
//!
//! # Example
//!
//! ```
//! # use bpmn_recon::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.linking().containment_margin(), 4.0);
//! assert_eq!(config.pool().boundary_margin(), 20.0);
//! assert_eq!(config.text().max_distance(), None);
//! ```

use serde::Deserialize;

/// Default padding around an element box when testing arrow endpoints.
const DEFAULT_CONTAINMENT_MARGIN: f32 = 4.0;

/// Default margin added around elements when a pool is grown.
const DEFAULT_BOUNDARY_MARGIN: f32 = 20.0;

/// Top-level configuration combining all sections.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Flow linking section.
    #[serde(default)]
    linking: LinkingConfig,

    /// Text association section.
    #[serde(default)]
    text: TextConfig,

    /// Pool partitioning section.
    #[serde(default)]
    pool: PoolConfig,

    /// Identifier generation section.
    #[serde(default)]
    ids: IdConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] from its sections.
    pub fn new(linking: LinkingConfig, text: TextConfig, pool: PoolConfig, ids: IdConfig) -> Self {
        Self {
            linking,
            text,
            pool,
            ids,
        }
    }

    /// Returns the linking configuration.
    pub fn linking(&self) -> &LinkingConfig {
        &self.linking
    }

    /// Returns the text association configuration.
    pub fn text(&self) -> &TextConfig {
        &self.text
    }

    /// Returns the pool configuration.
    pub fn pool(&self) -> &PoolConfig {
        &self.pool
    }

    /// Returns the identifier configuration.
    pub fn ids(&self) -> &IdConfig {
        &self.ids
    }

    /// Returns a copy with the identifier seed replaced.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.ids.seed = seed;
        self
    }
}

/// Tolerances used when resolving arrow endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct LinkingConfig {
    /// Padding added to every element box before testing whether an arrow
    /// endpoint falls inside it.
    #[serde(default = "default_containment_margin")]
    containment_margin: f32,
}

impl LinkingConfig {
    pub fn new(containment_margin: f32) -> Self {
        Self { containment_margin }
    }

    pub fn containment_margin(&self) -> f32 {
        self.containment_margin
    }
}

impl Default for LinkingConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CONTAINMENT_MARGIN)
    }
}

/// Limits for OCR word attachment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextConfig {
    /// Words farther than this from every candidate are discarded.
    /// Unlimited when unset.
    #[serde(default)]
    max_distance: Option<f32>,
}

impl TextConfig {
    pub fn new(max_distance: Option<f32>) -> Self {
        Self { max_distance }
    }

    pub fn max_distance(&self) -> Option<f32> {
        self.max_distance
    }
}

/// Pool boundary repair settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PoolConfig {
    /// Space left between a grown pool border and the elements it was grown
    /// to cover.
    #[serde(default = "default_boundary_margin")]
    boundary_margin: f32,
}

impl PoolConfig {
    pub fn new(boundary_margin: f32) -> Self {
        Self { boundary_margin }
    }

    pub fn boundary_margin(&self) -> f32 {
        self.boundary_margin
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BOUNDARY_MARGIN)
    }
}

/// Identifier generation settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdConfig {
    /// Fixed seed for identifier suffixes. Each reconstruction pass still
    /// gets its own registry; the seed only makes the output reproducible.
    #[serde(default)]
    seed: Option<u64>,
}

impl IdConfig {
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

fn default_containment_margin() -> f32 {
    DEFAULT_CONTAINMENT_MARGIN
}

fn default_boundary_margin() -> f32 {
    DEFAULT_BOUNDARY_MARGIN
}
