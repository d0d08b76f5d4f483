//! The per-request computation context.
//!
//! A [`MatchContext`] runs the shared part of both operations once: encode every
//! student, standardize the batch, cluster it, and index the identifiers. It is built
//! by [`MatchContext::build`] and read-only afterwards, so the selection and grouping
//! policies take it by reference and cannot disturb each other.

use std::collections::HashMap;

use crate::{
    cluster::{ClusterAssignment, ClusterCount, ClusterError, KMeans},
    feature::FeatureVector,
    preference::{PreferenceEncoder, StudentPreference},
    similarity::Similarity,
    standardize::{FeatureStandardizer, StandardizedMatrix},
};

#[derive(Debug)]
pub struct MatchContext<'a> {
    students: Vec<&'a StudentPreference>,
    raw_features: Vec<FeatureVector>,
    standardized: StandardizedMatrix,
    assignment: ClusterAssignment,
    index: HashMap<&'a str, usize>,
}

impl<'a> MatchContext<'a> {
    /// Encodes, standardizes and clusters `students`.
    ///
    /// Positions in `students` are the indices used by every accessor. When two
    /// students share an identifier the first one is indexed.
    pub fn build<I>(students: I, kmeans: &KMeans, count: ClusterCount) -> Result<Self, ClusterError>
    where
        I: IntoIterator<Item = &'a StudentPreference>,
    {
        let students = students.into_iter().collect::<Vec<_>>();
        let raw_features = PreferenceEncoder::encode_all(students.iter().copied());
        let standardized = FeatureStandardizer::standardize(&raw_features);
        let assignment = kmeans.fit(standardized.rows(), count)?;

        let mut index = HashMap::with_capacity(students.len());
        for (position, &student) in students.iter().enumerate() {
            if let Some(id) = student.identifier() {
                index.entry(id).or_insert(position);
            }
        }

        Ok(Self {
            students,
            raw_features,
            standardized,
            assignment,
            index,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    #[must_use]
    pub fn student(&self, index: usize) -> &'a StudentPreference {
        self.students[index]
    }

    /// Encoded features before standardization.
    #[must_use]
    pub fn raw_features(&self, index: usize) -> &FeatureVector {
        &self.raw_features[index]
    }

    #[must_use]
    pub fn standardized(&self) -> &StandardizedMatrix {
        &self.standardized
    }

    #[must_use]
    pub fn assignment(&self) -> &ClusterAssignment {
        &self.assignment
    }

    #[must_use]
    pub fn label(&self, index: usize) -> usize {
        self.assignment.label(index)
    }

    /// Position of the first student whose identifier is `id`.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Similarity between two students' standardized vectors.
    #[must_use]
    pub fn similarity(&self, a: usize, b: usize) -> Similarity {
        Similarity::between(self.standardized.row(a), self.standardized.row(b))
    }
}
