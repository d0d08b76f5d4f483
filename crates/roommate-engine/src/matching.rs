//! Ranking compatible roommates for one target student.
//!
//! # Algorithm
//!
//! 1. Put the target in front of the candidates and build a [`MatchContext`]
//! 2. Find the target's cluster; the candidate pool is everyone else in it
//! 3. If the target is alone in its cluster, the pool is every other student
//! 4. Score the pool against the target and drop anything below the minimum score
//! 5. Sort by score, highest first, keeping candidate order among equal scores
//! 6. Keep the first `top_k`
//!
//! An empty candidate list returns an empty report without clustering anything.

use std::iter;

use crate::{
    cluster::{ClusterCount, ClusterError, KMeans},
    config::EngineConfig,
    context::MatchContext,
    preference::StudentPreference,
    similarity::MAX_SCORE,
};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MatchError {
    #[display("clustering failed during match selection: {_0}")]
    Cluster(ClusterError),
    #[display("target student '{id}' not found among the students being matched")]
    TargetNotFound { id: String },
}

/// One candidate that qualified as a roommate.
#[derive(Debug, Clone, PartialEq)]
pub struct CompatibilityMatch<'a> {
    pub student: &'a StudentPreference,
    /// Position in the candidate list.
    pub candidate_index: usize,
    /// Compatibility score in `[min_match_score, 100]`.
    pub score: u8,
    /// Cosine similarity with the target.
    pub similarity: f64,
    pub cluster: usize,
}

/// Result of a match selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchReport<'a> {
    /// Cluster of the target, `None` when nothing was clustered.
    pub target_cluster: Option<usize>,
    /// Qualified matches, best first.
    pub matches: Vec<CompatibilityMatch<'a>>,
}

#[derive(Debug, Clone)]
pub struct MatchSelector {
    kmeans: KMeans,
    count: ClusterCount,
    min_score: u8,
}

impl MatchSelector {
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            kmeans: KMeans::new(config),
            count: config.cluster_count(),
            min_score: config.min_match_score,
        }
    }

    /// Finds up to `top_k` compatible roommates for `target` among `candidates`.
    ///
    /// # Example
    ///
    /// ```
    /// use roommate_engine::{config::EngineConfig, matching::MatchSelector, preference::StudentPreference};
    ///
    /// let target = StudentPreference { record_id: Some("t".to_owned()), ..Default::default() };
    /// let selector = MatchSelector::new(&EngineConfig::default());
    /// let report = selector.select_matches(&target, &[], 5).unwrap();
    /// assert!(report.matches.is_empty());
    /// assert_eq!(report.target_cluster, None);
    /// ```
    pub fn select_matches<'a>(
        &self,
        target: &'a StudentPreference,
        candidates: &'a [StudentPreference],
        top_k: usize,
    ) -> Result<MatchReport<'a>, MatchError> {
        if candidates.is_empty() {
            return Ok(MatchReport::default());
        }

        let context = MatchContext::build(
            iter::once(target).chain(candidates),
            &self.kmeans,
            self.count,
        )
        .map_err(MatchError::Cluster)?;
        let target_index = Self::locate_target(&context, target)?;
        Ok(self.rank(&context, target_index, top_k))
    }

    fn locate_target(
        context: &MatchContext<'_>,
        target: &StudentPreference,
    ) -> Result<usize, MatchError> {
        // an anonymous target can only be found by position
        let Some(id) = target.identifier() else {
            return Ok(0);
        };
        context.index_of(id).ok_or_else(|| {
            log::warn!("Target student {id} not found in student list");
            MatchError::TargetNotFound { id: id.to_owned() }
        })
    }

    fn rank<'a>(
        &self,
        context: &MatchContext<'a>,
        target_index: usize,
        top_k: usize,
    ) -> MatchReport<'a> {
        let target_cluster = context.label(target_index);
        log::info!("Target student is in cluster {target_cluster}");

        let mut pool = context
            .assignment()
            .members(target_cluster)
            .filter(|&i| i != target_index)
            .collect::<Vec<_>>();
        if pool.is_empty() {
            log::warn!(
                "No other students found in cluster {target_cluster}, searching all clusters"
            );
            pool = (0..context.len()).filter(|&i| i != target_index).collect();
        }

        let mut matches = pool
            .into_iter()
            .filter_map(|index| {
                let similarity = context.similarity(target_index, index);
                (self.min_score..=MAX_SCORE)
                    .contains(&similarity.score)
                    .then(|| CompatibilityMatch {
                        student: context.student(index),
                        // the target occupies position 0 of the context
                        candidate_index: index - 1,
                        score: similarity.score,
                        similarity: similarity.cosine,
                        cluster: context.label(index),
                    })
            })
            .collect::<Vec<_>>();
        matches.sort_by(|a, b| b.score.cmp(&a.score));
        matches.truncate(top_k);

        MatchReport {
            target_cluster: Some(target_cluster),
            matches,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(
        id: &str,
        sleep: &str,
        cleanliness: f64,
        study: &str,
        noise: f64,
        lifestyle: &str,
    ) -> StudentPreference {
        StudentPreference {
            record_id: Some(id.to_owned()),
            sleep_schedule: Some(sleep.to_owned()),
            cleanliness: Some(cleanliness),
            study_habits: Some(study.to_owned()),
            noise_tolerance: Some(noise),
            lifestyle: Some(lifestyle.to_owned()),
            ..StudentPreference::default()
        }
    }

    fn early_bird(id: &str) -> StudentPreference {
        student(id, "Early (10 PM)", 9.0, "Quiet Library", 2.0, "Reserved")
    }

    fn night_owl(id: &str) -> StudentPreference {
        student(id, "Late (3 AM)", 2.0, "Group music study", 9.0, "Outgoing party")
    }

    fn selector() -> MatchSelector {
        MatchSelector::new(&EngineConfig::default())
    }

    #[test]
    fn test_similar_candidate_matches_opposite_is_dropped() {
        let target = early_bird("target");
        let candidates = [
            student("twin", "Early riser", 8.0, "Quiet", 3.0, "Reserved"),
            night_owl("owl"),
        ];
        let report = selector().select_matches(&target, &candidates, 5).unwrap();
        assert_eq!(report.target_cluster, Some(0));
        assert_eq!(report.matches.len(), 1);
        let best = &report.matches[0];
        assert_eq!(best.student.identifier(), Some("twin"));
        assert_eq!(best.candidate_index, 0);
        assert!(best.score >= 90, "score = {}", best.score);
        assert!(best.similarity > 0.8);
    }

    #[test]
    fn test_empty_candidates_short_circuit() {
        let target = early_bird("target");
        let report = selector().select_matches(&target, &[], 5).unwrap();
        assert_eq!(report, MatchReport::default());
    }

    #[test]
    fn test_scores_sorted_and_truncated() {
        let target = early_bird("target");
        let candidates = [
            early_bird("a"),
            student("b", "Early", 7.0, "Quiet", 4.0, "Balanced"),
            early_bird("c"),
            night_owl("d"),
            student("e", "Normal", 6.0, "Flexible", 5.0, "Quiet"),
        ];
        let report = selector().select_matches(&target, &candidates, 2).unwrap();
        assert!(report.matches.len() <= 2);
        assert!(report.matches.windows(2).all(|w| w[0].score >= w[1].score));
        for m in &report.matches {
            assert!((50..=100).contains(&m.score));
            assert_eq!(&candidates[m.candidate_index], m.student);
        }
    }

    #[test]
    fn test_ties_keep_candidate_order() {
        let target = early_bird("target");
        let candidates = [early_bird("a"), early_bird("b"), night_owl("c"), early_bird("d")];
        let report = selector().select_matches(&target, &candidates, 10).unwrap();
        let ids = report
            .matches
            .iter()
            .map(|m| m.student.identifier().unwrap())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["a", "b", "d"]);
        assert!(report.matches.iter().all(|m| m.score == 100));
    }

    #[test]
    fn test_singleton_cluster_falls_back_to_everyone() {
        // with k = n every student is alone in its cluster
        let config = EngineConfig {
            clusters: Some(3),
            ..EngineConfig::default()
        };
        let target = early_bird("target");
        let candidates = [
            student("a", "Early", 8.0, "Quiet", 3.0, "Reserved"),
            student("b", "Early", 9.0, "Silent", 1.0, "Introvert"),
        ];
        let report = MatchSelector::new(&config)
            .select_matches(&target, &candidates, 5)
            .unwrap();
        assert_eq!(report.target_cluster, Some(0));
        assert!(!report.matches.is_empty());
        assert!(report.matches.iter().all(|m| m.cluster != 0));
    }

    #[test]
    fn test_anonymous_target_is_found_by_position() {
        let target = StudentPreference {
            record_id: None,
            ..early_bird("unused")
        };
        let candidates = [early_bird("a"), night_owl("b")];
        let report = selector().select_matches(&target, &candidates, 5).unwrap();
        assert_eq!(report.target_cluster, Some(0));
    }

    #[test]
    fn test_idempotent() {
        let target = early_bird("target");
        let candidates = [
            student("a", "Normal", 5.0, "Moderate", 5.0, "Balanced"),
            early_bird("b"),
            night_owl("c"),
            student("d", "Late", 3.0, "Quiet", 6.0, "Ambivert"),
        ];
        let first = selector().select_matches(&target, &candidates, 5).unwrap();
        let second = selector().select_matches(&target, &candidates, 5).unwrap();
        assert_eq!(first, second);
    }
}
