//! K-means clustering of standardized feature vectors.
//!
//! Students are partitioned into `k` groups by Lloyd's algorithm, minimizing the
//! within-cluster sum of squared Euclidean distances (the inertia):
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! # Determinism
//!
//! Each restart seeds its own [`Pcg32`] from `seed + restart`, picks initial centroids
//! with k-means++, and iterates until assignments stop changing, the centroids stop
//! moving, or the iteration limit is hit. The restart with the lowest inertia wins,
//! the earliest one on ties. The same batch and cluster count therefore always give
//! the same labels.
//!
//! # Labels
//!
//! Labels are renumbered in order of first appearance, so the first student is always
//! in cluster 0 and every label in `0..k` has at least one member. When the batch
//! contains fewer distinct points than the requested `k`, the reported `k` is the
//! number of non-empty clusters.
//!
//! # Example
//!
//! ```
//! use roommate_engine::{
//!     cluster::{ClusterCount, KMeans},
//!     config::EngineConfig,
//!     feature::FeatureVector,
//! };
//!
//! let data = [
//!     FeatureVector::new([-1.0, -1.0, -1.0, -1.0, -1.0]),
//!     FeatureVector::new([-1.1, -0.9, -1.0, -1.0, -1.0]),
//!     FeatureVector::new([1.0, 1.0, 1.0, 1.0, 1.0]),
//!     FeatureVector::new([1.1, 0.9, 1.0, 1.0, 1.0]),
//! ];
//! let assignment = KMeans::new(&EngineConfig::default())
//!     .fit(&data, ClusterCount::Fixed(2))
//!     .unwrap();
//! assert_eq!(assignment.labels(), &[0, 0, 1, 1]);
//! ```

use std::collections::HashMap;

use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg32;

use crate::{
    config::EngineConfig,
    feature::{FEATURE_DIM, FeatureVector},
};

/// How many clusters to ask for.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ClusterCount {
    /// `round(sqrt(n / 2))`, clamped to the configured bounds.
    #[default]
    Auto,
    Fixed(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ClusterError {
    #[display("cannot cluster an empty batch")]
    EmptyInput,
    #[display("cluster count must be at least 1")]
    ZeroClusters,
}

/// Cluster label of every student in a batch.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterAssignment {
    labels: Vec<usize>,
    k: usize,
    inertia: f64,
}

impl ClusterAssignment {
    #[must_use]
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    #[must_use]
    pub fn label(&self, index: usize) -> usize {
        self.labels[index]
    }

    /// Number of clusters; every label lies in `0..k`.
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Within-cluster sum of squared distances of the winning restart.
    #[must_use]
    pub fn inertia(&self) -> f64 {
        self.inertia
    }

    /// Indices of the students labelled `label`, in input order.
    pub fn members(&self, label: usize) -> impl Iterator<Item = usize> + '_ {
        self.labels
            .iter()
            .enumerate()
            .filter(move |&(_, &l)| l == label)
            .map(|(i, _)| i)
    }

    /// Members of every cluster, indexed by label.
    #[must_use]
    pub fn clusters(&self) -> Vec<Vec<usize>> {
        let mut clusters = vec![vec![]; self.k];
        for (index, &label) in self.labels.iter().enumerate() {
            clusters[label].push(index);
        }
        clusters
    }
}

#[derive(Debug)]
struct Run {
    labels: Vec<usize>,
    inertia: f64,
}

/// Seeded, multi-restart k-means.
#[derive(Debug, Clone)]
pub struct KMeans {
    seed: u64,
    n_init: usize,
    max_iterations: usize,
    tolerance: f64,
    min_clusters: usize,
    max_clusters: usize,
}

impl KMeans {
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            seed: config.seed,
            n_init: config.n_init,
            max_iterations: config.max_iterations,
            tolerance: config.tolerance,
            min_clusters: config.min_clusters,
            max_clusters: config.max_clusters,
        }
    }

    /// Number of clusters to fit for a batch of `n` students.
    ///
    /// Never exceeds `n`, so a single student always forms a single cluster.
    #[expect(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn resolve_k(&self, n: usize, count: ClusterCount) -> Result<usize, ClusterError> {
        if n == 0 {
            return Err(ClusterError::EmptyInput);
        }
        let k = match count {
            ClusterCount::Auto => {
                let heuristic = (n as f64 / 2.0).sqrt().round() as usize;
                heuristic
                    .max(self.min_clusters)
                    .min(self.max_clusters)
                    .max(1)
            }
            ClusterCount::Fixed(0) => return Err(ClusterError::ZeroClusters),
            ClusterCount::Fixed(k) => k,
        };
        Ok(k.min(n))
    }

    /// Clusters `data` and returns one label per row.
    pub fn fit(
        &self,
        data: &[FeatureVector],
        count: ClusterCount,
    ) -> Result<ClusterAssignment, ClusterError> {
        let k = self.resolve_k(data.len(), count)?;
        log::info!(
            "Performing k-means clustering with {k} clusters for {} students",
            data.len()
        );

        let first = self.fit_single(data, k, self.seed);
        let best = (1..self.n_init.max(1))
            .map(|restart| self.fit_single(data, k, self.seed.wrapping_add(restart as u64)))
            .fold(first, |best, run| {
                if run.inertia < best.inertia { run } else { best }
            });
        log::debug!("Best k-means inertia: {:.6}", best.inertia);

        let (labels, k) = relabel_by_first_appearance(&best.labels);
        Ok(ClusterAssignment {
            labels,
            k,
            inertia: best.inertia,
        })
    }

    fn fit_single(&self, data: &[FeatureVector], k: usize, seed: u64) -> Run {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut centroids = init_plus_plus(data, k, &mut rng);
        let mut labels = vec![0; data.len()];
        assign(data, &centroids, &mut labels);

        for _ in 0..self.max_iterations {
            let updated = update_centroids(data, &labels, &centroids);
            let shift = centroids
                .iter()
                .zip(&updated)
                .map(|(old, new)| old.squared_distance(new))
                .sum::<f64>();
            centroids = updated;
            let changed = assign(data, &centroids, &mut labels);
            if !changed || shift <= self.tolerance {
                break;
            }
        }

        let inertia = data
            .iter()
            .zip(&labels)
            .map(|(point, &label)| point.squared_distance(&centroids[label]))
            .sum();
        log::debug!("k-means restart with seed {seed}: inertia {inertia:.6}");
        Run { labels, inertia }
    }
}

/// k-means++ seeding: each next centroid is drawn with probability proportional to
/// its squared distance from the nearest centroid chosen so far.
fn init_plus_plus<R>(data: &[FeatureVector], k: usize, rng: &mut R) -> Vec<FeatureVector>
where
    R: Rng + ?Sized,
{
    let mut centroids = Vec::with_capacity(k);
    let first = data[rng.random_range(0..data.len())];
    centroids.push(first);
    let mut nearest = data
        .iter()
        .map(|point| point.squared_distance(&first))
        .collect::<Vec<_>>();

    while centroids.len() < k {
        let total = nearest.iter().sum::<f64>();
        let chosen = if total > 0.0 {
            let threshold = rng.random::<f64>() * total;
            let mut cumulative = 0.0;
            nearest
                .iter()
                .position(|&d| {
                    cumulative += d;
                    cumulative > threshold
                })
                .unwrap_or(data.len() - 1)
        } else {
            // every point already coincides with a centroid
            rng.random_range(0..data.len())
        };
        let centroid = data[chosen];
        for (d, point) in nearest.iter_mut().zip(data) {
            *d = d.min(point.squared_distance(&centroid));
        }
        centroids.push(centroid);
    }
    centroids
}

fn nearest_centroid(point: &FeatureVector, centroids: &[FeatureVector]) -> usize {
    let mut best = (0, f64::INFINITY);
    for (index, centroid) in centroids.iter().enumerate() {
        let distance = point.squared_distance(centroid);
        if distance < best.1 {
            best = (index, distance);
        }
    }
    best.0
}

/// Moves every point to its nearest centroid. Returns whether any label changed.
fn assign(data: &[FeatureVector], centroids: &[FeatureVector], labels: &mut [usize]) -> bool {
    let mut changed = false;
    for (point, label) in data.iter().zip(labels.iter_mut()) {
        let nearest = nearest_centroid(point, centroids);
        if nearest != *label {
            *label = nearest;
            changed = true;
        }
    }
    changed
}

/// Recomputes centroids as cluster means. An empty cluster takes over the point
/// farthest from its current centroid, or keeps its old position if there is none.
#[expect(clippy::cast_precision_loss)]
fn update_centroids(
    data: &[FeatureVector],
    labels: &[usize],
    previous: &[FeatureVector],
) -> Vec<FeatureVector> {
    let k = previous.len();
    let mut sums = vec![[0.0; FEATURE_DIM]; k];
    let mut counts = vec![0_usize; k];
    for (point, &label) in data.iter().zip(labels) {
        counts[label] += 1;
        for (sum, value) in sums[label].iter_mut().zip(point.components()) {
            *sum += value;
        }
    }

    let mut distances = data
        .iter()
        .zip(labels)
        .map(|(point, &label)| point.squared_distance(&previous[label]))
        .collect::<Vec<_>>();

    sums.into_iter()
        .zip(counts)
        .enumerate()
        .map(|(cluster, (sum, count))| {
            if count > 0 {
                let n = count as f64;
                FeatureVector::new(sum.map(|s| s / n))
            } else {
                take_farthest_point(data, &mut distances).unwrap_or(previous[cluster])
            }
        })
        .collect()
}

fn take_farthest_point(data: &[FeatureVector], distances: &mut [f64]) -> Option<FeatureVector> {
    let (index, distance) = distances
        .iter()
        .copied()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(&b.1))?;
    if distance <= 0.0 {
        return None;
    }
    distances[index] = 0.0;
    Some(data[index])
}

fn relabel_by_first_appearance(labels: &[usize]) -> (Vec<usize>, usize) {
    let mut mapping = HashMap::new();
    let relabeled = labels
        .iter()
        .map(|&label| {
            let next = mapping.len();
            *mapping.entry(label).or_insert(next)
        })
        .collect();
    (relabeled, mapping.len())
}
