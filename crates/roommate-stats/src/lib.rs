//! Statistical helpers for the roommate matching engine.
//!
//! This crate provides descriptive statistics over `f64` samples. The matching
//! engine uses them to compute per-axis z-scores over the students of a single
//! request.
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing a column of values
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use roommate_stats::descriptive::DescriptiveStats;
//!
//! let values = [0.2, 0.5, 0.8];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert!((stats.mean - 0.5).abs() < 1e-12);
//! assert!(!stats.is_constant());
//! ```
//!
//! ## Standardizing a value
//!
//! ```
//! use roommate_stats::descriptive::DescriptiveStats;
//!
//! let stats = DescriptiveStats::new([1.0, 3.0]).unwrap();
//! assert_eq!(stats.z_score(3.0), 1.0);
//! assert_eq!(stats.z_score(1.0), -1.0);
//! ```

pub mod descriptive;
