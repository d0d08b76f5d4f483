//! Roommate matching engine.
//!
//! This crate turns students' lifestyle preferences into compatibility scores and
//! uses them to rank roommates for one student or to fill rooms for a whole roster.
//! Every call recomputes everything from the students it is given; nothing is kept
//! between calls.
//!
//! # Pipeline
//!
//! ```text
//! StudentPreference ─▶ PreferenceEncoder ─▶ FeatureVector (5 axes, [0, 1])
//!                                              │
//!                               FeatureStandardizer (z-score per axis)
//!                                              │
//!                                     KMeans (cluster labels)
//!                                              │
//!                     ┌────────────────────────┴───────────────────────┐
//!               MatchSelector                                     GroupFormer
//!      (rank cluster-mates of one target)           (cut each cluster into full rooms)
//! ```
//!
//! The shared stages run once per call inside a [`context::MatchContext`]. Scores are
//! cosine similarities of standardized vectors rescaled to `0..=100` by
//! [`similarity::Similarity`].
//!
//! # Modules
//!
//! - [`preference`]: Student records and the keyword-based [`preference::PreferenceEncoder`]
//! - [`feature`]: Fixed-length [`feature::FeatureVector`] and its [`feature::Axis`] order
//! - [`standardize`]: Per-axis z-scores over one batch
//! - [`cluster`]: Seeded multi-restart k-means
//! - [`similarity`]: Cosine similarity and compatibility score
//! - [`context`]: The immutable per-call computation context
//! - [`matching`]: Roommate ranking for one target student
//! - [`grouping`]: Room formation for a roster
//! - [`config`]: Tunable parameters and request defaults
//!
//! # Examples
//!
//! ## Ranking roommates
//!
//! ```
//! use roommate_engine::{
//!     config::EngineConfig, matching::MatchSelector, preference::StudentPreference,
//! };
//!
//! let student = |id: &str, sleep: &str, lifestyle: &str| StudentPreference {
//!     record_id: Some(id.to_owned()),
//!     sleep_schedule: Some(sleep.to_owned()),
//!     lifestyle: Some(lifestyle.to_owned()),
//!     ..StudentPreference::default()
//! };
//! let target = student("t", "Early", "Quiet");
//! let candidates = [
//!     student("a", "Early", "Reserved"),
//!     student("b", "Late", "Party"),
//!     student("c", "10 PM", "Introvert"),
//! ];
//!
//! let report = MatchSelector::new(&EngineConfig::default())
//!     .select_matches(&target, &candidates, 5)?;
//! for m in &report.matches {
//!     assert!(m.score >= 50);
//!     assert_ne!(m.student.identifier(), Some("b"));
//! }
//! # Ok::<(), roommate_engine::matching::MatchError>(())
//! ```
//!
//! ## Forming rooms
//!
//! ```
//! use roommate_engine::{
//!     config::EngineConfig, grouping::GroupFormer, preference::StudentPreference,
//! };
//!
//! let roster = vec![StudentPreference::default(); 5];
//! let groups = GroupFormer::new(&EngineConfig::default()).form_groups(&roster, 2, 0)?;
//! assert_eq!(groups.len(), 2);
//! assert!(groups.iter().all(|g| g.members.len() == 2));
//! # Ok::<(), roommate_engine::grouping::GroupError>(())
//! ```

pub mod cluster;
pub mod config;
pub mod context;
pub mod feature;
pub mod grouping;
pub mod matching;
pub mod preference;
pub mod similarity;
pub mod standardize;
