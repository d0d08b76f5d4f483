//! Engine configuration.
//!
//! All fields have defaults, so an empty JSON object (or no config file at all)
//! yields the standard behaviour. Field names are camelCase on the wire.
//!
//! ```
//! use roommate_engine::config::EngineConfig;
//!
//! let config: EngineConfig = serde_json::from_str(r#"{ "nInit": 4 }"#).unwrap();
//! assert_eq!(config.n_init, 4);
//! assert_eq!(config.seed, 42);
//! ```

use serde::{Deserialize, Serialize};

use crate::cluster::ClusterCount;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Seed of the first k-means restart; restart `r` uses `seed + r`.
    pub seed: u64,
    /// Number of independent k-means restarts.
    pub n_init: usize,
    /// Lloyd iteration limit per restart.
    pub max_iterations: usize,
    /// Total squared centroid movement below which a restart has converged.
    pub tolerance: f64,
    /// Lower bound of the automatic cluster count.
    pub min_clusters: usize,
    /// Upper bound of the automatic cluster count.
    pub max_clusters: usize,
    /// Fixed cluster count; `None` picks one from the batch size.
    pub clusters: Option<usize>,
    /// Lowest compatibility score a match may have.
    pub min_match_score: u8,
    pub default_top_k: usize,
    pub default_room_capacity: usize,
    pub default_min_group_score: i64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            n_init: 10,
            max_iterations: 300,
            tolerance: 1e-4,
            min_clusters: 2,
            max_clusters: 10,
            clusters: None,
            min_match_score: 50,
            default_top_k: 5,
            default_room_capacity: 2,
            default_min_group_score: 60,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn cluster_count(&self) -> ClusterCount {
        self.clusters.map_or(ClusterCount::Auto, ClusterCount::Fixed)
    }
}
