//! Cosine similarity and the 0-100 compatibility score derived from it.

use crate::feature::FeatureVector;

/// Highest possible compatibility score.
pub const MAX_SCORE: u8 = 100;

/// Similarity between two students.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Similarity {
    /// Cosine of the angle between the two feature vectors, in `[-1, 1]`.
    pub cosine: f64,
    /// `floor((cosine + 1) * 50)`, in `[0, 100]`.
    pub score: u8,
}

impl Similarity {
    /// Scores two feature vectors.
    ///
    /// A zero vector has no direction; its cosine with anything is defined as `0`,
    /// which scores `50`.
    ///
    /// # Example
    ///
    /// ```
    /// use roommate_engine::{feature::FeatureVector, similarity::Similarity};
    ///
    /// let a = FeatureVector::new([1.0, 0.0, 0.0, 0.0, 0.0]);
    /// let b = FeatureVector::new([-2.0, 0.0, 0.0, 0.0, 0.0]);
    /// assert_eq!(Similarity::between(&a, &a).score, 100);
    /// assert_eq!(Similarity::between(&a, &b).score, 0);
    /// ```
    #[must_use]
    pub fn between(a: &FeatureVector, b: &FeatureVector) -> Self {
        Self::from_cosine(cosine(a, b))
    }

    /// Rescales a cosine (or an average of cosines) onto the score range.
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn from_cosine(cosine: f64) -> Self {
        let cosine = cosine.clamp(-1.0, 1.0);
        let score = ((cosine + 1.0) * 50.0).floor() as u8;
        Self { cosine, score }
    }
}

/// Cosine similarity of two vectors, `0` if either has zero length.
#[must_use]
pub fn cosine(a: &FeatureVector, b: &FeatureVector) -> f64 {
    let norms = (a.squared_norm() * b.squared_norm()).sqrt();
    if norms == 0.0 {
        return 0.0;
    }
    a.dot(b) / norms
}
