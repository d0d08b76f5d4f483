//! Per-axis z-score standardization.
//!
//! Encoded axes all live in `[0, 1]`, but their spread differs from batch to batch.
//! Left as is, the axis with the widest spread would dominate Euclidean clustering.
//! [`FeatureStandardizer::standardize`] rescales each axis to zero mean and unit
//! population variance over exactly the batch it is given. There is no fitted model
//! to keep: fitting and applying are the same call.
//!
//! An axis on which every student is identical has no spread to divide by, and is
//! mapped to all zeros.

use roommate_stats::descriptive::DescriptiveStats;

use crate::feature::{Axis, FEATURE_DIM, FeatureVector};

/// A batch of feature vectors after standardization.
#[derive(Debug, Clone, PartialEq)]
pub struct StandardizedMatrix {
    rows: Vec<FeatureVector>,
    column_stats: Option<[DescriptiveStats; FEATURE_DIM]>,
}

impl StandardizedMatrix {
    /// Standardized rows, in input order.
    #[must_use]
    pub fn rows(&self) -> &[FeatureVector] {
        &self.rows
    }

    #[must_use]
    pub fn row(&self, index: usize) -> &FeatureVector {
        &self.rows[index]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Statistics of the raw column for `axis`, or `None` for an empty batch.
    #[must_use]
    pub fn column_stats(&self, axis: Axis) -> Option<&DescriptiveStats> {
        self.column_stats.as_ref().map(|stats| &stats[axis.index()])
    }
}

/// Computes z-scores per axis over one batch.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureStandardizer;

impl FeatureStandardizer {
    /// Standardizes `raw` column by column.
    ///
    /// # Example
    ///
    /// ```
    /// use roommate_engine::{feature::{Axis, FeatureVector}, standardize::FeatureStandardizer};
    ///
    /// let raw = [
    ///     FeatureVector::new([0.2, 0.5, 0.5, 0.1, 0.5]),
    ///     FeatureVector::new([0.8, 0.5, 0.5, 0.3, 0.5]),
    /// ];
    /// let matrix = FeatureStandardizer::standardize(&raw);
    /// assert!((matrix.row(0)[Axis::Sleep] + 1.0).abs() < 1e-9);
    /// assert!((matrix.row(1)[Axis::Sleep] - 1.0).abs() < 1e-9);
    /// // identical column
    /// assert_eq!(matrix.row(0)[Axis::Cleanliness], 0.0);
    /// ```
    #[must_use]
    pub fn standardize(raw: &[FeatureVector]) -> StandardizedMatrix {
        let column_stats: Option<[DescriptiveStats; FEATURE_DIM]> = Axis::ALL
            .iter()
            .map(|&axis| DescriptiveStats::new(raw.iter().map(|row| row[axis])))
            .collect::<Option<Vec<_>>>()
            .and_then(|stats| stats.try_into().ok());

        let rows = match &column_stats {
            Some(stats) => raw
                .iter()
                .map(|row| FeatureVector::from_fn(|axis| stats[axis.index()].z_score(row[axis])))
                .collect(),
            None => vec![],
        };

        StandardizedMatrix { rows, column_stats }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column_mean(matrix: &StandardizedMatrix, axis: Axis) -> f64 {
        matrix.rows().iter().map(|r| r[axis]).sum::<f64>() / matrix.len() as f64
    }

    fn column_variance(matrix: &StandardizedMatrix, axis: Axis) -> f64 {
        let mean = column_mean(matrix, axis);
        matrix
            .rows()
            .iter()
            .map(|r| (r[axis] - mean).powi(2))
            .sum::<f64>()
            / matrix.len() as f64
    }

    #[test]
    fn test_empty_batch() {
        let matrix = FeatureStandardizer::standardize(&[]);
        assert!(matrix.is_empty());
        assert!(matrix.column_stats(Axis::Sleep).is_none());
    }

    #[test]
    fn test_zero_mean_unit_variance() {
        let raw = [
            FeatureVector::new([0.2, 0.9, 0.2, 0.2, 0.2]),
            FeatureVector::new([0.5, 0.4, 0.8, 0.6, 0.5]),
            FeatureVector::new([0.8, 0.1, 0.5, 0.9, 0.8]),
            FeatureVector::new([0.2, 0.7, 0.2, 0.3, 0.5]),
        ];
        let matrix = FeatureStandardizer::standardize(&raw);
        assert_eq!(matrix.len(), raw.len());
        for axis in Axis::ALL {
            assert!(column_mean(&matrix, axis).abs() < 1e-9, "{axis}");
            assert!((column_variance(&matrix, axis) - 1.0).abs() < 1e-9, "{axis}");
        }
    }

    #[test]
    fn test_constant_columns_become_zero() {
        let raw = [
            FeatureVector::new([0.5; FEATURE_DIM]),
            FeatureVector::new([0.5; FEATURE_DIM]),
            FeatureVector::new([0.5; FEATURE_DIM]),
        ];
        let matrix = FeatureStandardizer::standardize(&raw);
        for row in matrix.rows() {
            assert_eq!(row, &FeatureVector::default());
        }
    }

    #[test]
    fn test_single_row_is_all_zero() {
        let matrix =
            FeatureStandardizer::standardize(&[FeatureVector::new([0.2, 0.9, 0.2, 0.2, 0.2])]);
        assert_eq!(matrix.row(0), &FeatureVector::default());
        assert_eq!(matrix.column_stats(Axis::Cleanliness).unwrap().mean, 0.9);
    }
}
