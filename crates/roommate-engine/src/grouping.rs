//! Partitioning a roster into rooms of fixed capacity.
//!
//! The roster is clustered once. Each cluster is then cut, in roster order, into
//! consecutive rooms of exactly `room_capacity` students; a short tail is left
//! ungrouped. A room is kept when the average compatibility over all pairs of its
//! members reaches the minimum group score.
//!
//! This is a greedy partition local to each cluster. Rooms never mix clusters, and no
//! attempt is made to find the best global pairing.
//!
//! Members are tracked by their position in the roster, so two students with
//! identical records are still two distinct people.

use crate::{
    cluster::{ClusterCount, ClusterError, KMeans},
    config::EngineConfig,
    context::MatchContext,
    preference::StudentPreference,
    similarity::{MAX_SCORE, Similarity},
};

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GroupError {
    #[display("clustering failed during group formation: {_0}")]
    Cluster(ClusterError),
    #[display("room capacity must be at least 1")]
    InvalidRoomCapacity,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupMember<'a> {
    /// Position in the roster.
    pub index: usize,
    pub student: &'a StudentPreference,
}

/// One filled room.
#[derive(Debug, Clone, PartialEq)]
pub struct RoommateGroup<'a> {
    /// Exactly `room_capacity` members, in roster order.
    pub members: Vec<GroupMember<'a>>,
    /// Compatibility score of the average pairwise cosine similarity.
    pub average_score: u8,
    /// Average pairwise cosine similarity.
    pub average_similarity: f64,
    pub cluster: usize,
}

#[derive(Debug, Clone)]
pub struct GroupFormer {
    kmeans: KMeans,
    count: ClusterCount,
}

impl GroupFormer {
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            kmeans: KMeans::new(config),
            count: config.cluster_count(),
        }
    }

    /// Forms rooms of `room_capacity` students whose average score is at least
    /// `min_group_score`.
    ///
    /// A roster smaller than one room yields no groups without clustering.
    ///
    /// # Example
    ///
    /// ```
    /// use roommate_engine::{config::EngineConfig, grouping::GroupFormer, preference::StudentPreference};
    ///
    /// let roster = vec![StudentPreference::default()];
    /// let former = GroupFormer::new(&EngineConfig::default());
    /// assert!(former.form_groups(&roster, 2, 60).unwrap().is_empty());
    /// ```
    pub fn form_groups<'a>(
        &self,
        students: &'a [StudentPreference],
        room_capacity: usize,
        min_group_score: i64,
    ) -> Result<Vec<RoommateGroup<'a>>, GroupError> {
        if room_capacity == 0 {
            return Err(GroupError::InvalidRoomCapacity);
        }
        if students.len() < room_capacity {
            log::info!(
                "Not enough students ({}) for room capacity {room_capacity}",
                students.len()
            );
            return Ok(vec![]);
        }

        log::info!(
            "Forming groups for {} students with capacity {room_capacity}",
            students.len()
        );
        let context =
            MatchContext::build(students, &self.kmeans, self.count).map_err(GroupError::Cluster)?;

        let mut groups = vec![];
        for (cluster, members) in context.assignment().clusters().into_iter().enumerate() {
            for room in members.chunks_exact(room_capacity) {
                let group = score_room(&context, cluster, room);
                let accepted = (min_group_score..=i64::from(MAX_SCORE))
                    .contains(&i64::from(group.average_score));
                if accepted {
                    groups.push(group);
                } else {
                    log::debug!(
                        "Rejected room {room:?} in cluster {cluster} with score {}",
                        group.average_score
                    );
                }
            }
        }

        log::info!("Formed {} groups", groups.len());
        Ok(groups)
    }
}

/// Averages the cosine similarity over every pair in `room`. A room of one has no
/// pairs and averages to `0`.
#[expect(clippy::cast_precision_loss)]
fn score_room<'a>(context: &MatchContext<'a>, cluster: usize, room: &[usize]) -> RoommateGroup<'a> {
    let mut total = 0.0;
    let mut pairs = 0_usize;
    for (i, &a) in room.iter().enumerate() {
        for &b in &room[i + 1..] {
            total += context.similarity(a, b).cosine;
            pairs += 1;
        }
    }
    let average = if pairs == 0 { 0.0 } else { total / pairs as f64 };
    let similarity = Similarity::from_cosine(average);

    RoommateGroup {
        members: room
            .iter()
            .map(|&index| GroupMember {
                index,
                student: context.student(index),
            })
            .collect(),
        average_score: similarity.score,
        average_similarity: similarity.cosine,
        cluster,
    }
}
