//! Fixed-length feature vectors.
//!
//! Every student is described by exactly [`FEATURE_DIM`] numeric components, one per
//! [`Axis`], in the fixed order sleep, cleanliness, study, noise, lifestyle. The
//! dimension is part of the type, so a vector of the wrong length cannot be built.

use std::ops::Index;

/// Number of components in a [`FeatureVector`].
pub const FEATURE_DIM: usize = 5;

/// One compatibility-relevant dimension of dorm life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum Axis {
    #[display("sleep")]
    Sleep,
    #[display("cleanliness")]
    Cleanliness,
    #[display("study")]
    Study,
    #[display("noise")]
    Noise,
    #[display("lifestyle")]
    Lifestyle,
}

impl Axis {
    /// All axes in vector order.
    pub const ALL: [Self; FEATURE_DIM] = [
        Self::Sleep,
        Self::Cleanliness,
        Self::Study,
        Self::Noise,
        Self::Lifestyle,
    ];

    /// Position of this axis inside a [`FeatureVector`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Sleep => 0,
            Self::Cleanliness => 1,
            Self::Study => 2,
            Self::Noise => 3,
            Self::Lifestyle => 4,
        }
    }
}

/// A student's preferences as a point in feature space.
///
/// Vectors produced by [`PreferenceEncoder`](crate::preference::PreferenceEncoder) have
/// every component in `[0, 1]`. After standardization the components are z-scores and
/// may take any sign.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FeatureVector([f64; FEATURE_DIM]);

impl FeatureVector {
    #[must_use]
    pub const fn new(components: [f64; FEATURE_DIM]) -> Self {
        Self(components)
    }

    #[must_use]
    pub const fn components(&self) -> &[f64; FEATURE_DIM] {
        &self.0
    }

    /// Builds a vector by evaluating `f` once per axis.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(Axis) -> f64,
    {
        Self(Axis::ALL.map(&mut f))
    }

    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.0.iter().zip(&other.0).map(|(a, b)| a * b).sum()
    }

    #[must_use]
    pub fn squared_norm(&self) -> f64 {
        self.dot(self)
    }

    #[must_use]
    pub fn squared_distance(&self, other: &Self) -> f64 {
        self.0
            .iter()
            .zip(&other.0)
            .map(|(a, b)| (a - b).powi(2))
            .sum()
    }
}

impl From<[f64; FEATURE_DIM]> for FeatureVector {
    fn from(components: [f64; FEATURE_DIM]) -> Self {
        Self(components)
    }
}

impl Index<Axis> for FeatureVector {
    type Output = f64;

    fn index(&self, axis: Axis) -> &Self::Output {
        &self.0[axis.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_order_matches_index() {
        for (i, axis) in Axis::ALL.iter().enumerate() {
            assert_eq!(axis.index(), i);
        }
    }

    #[test]
    fn test_from_fn_and_index() {
        let v = FeatureVector::from_fn(|axis| axis.index() as f64);
        assert_eq!(v[Axis::Sleep], 0.0);
        assert_eq!(v[Axis::Lifestyle], 4.0);
    }

    #[test]
    fn test_distance_and_norm() {
        let a = FeatureVector::new([1.0, 0.0, 0.0, 0.0, 0.0]);
        let b = FeatureVector::new([0.0, 1.0, 0.0, 0.0, 0.0]);
        assert_eq!(a.dot(&b), 0.0);
        assert_eq!(a.squared_norm(), 1.0);
        assert_eq!(a.squared_distance(&b), 2.0);
    }
}
