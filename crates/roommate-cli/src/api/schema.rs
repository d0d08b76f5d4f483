//! JSON request and response bodies.

use roommate_engine::{
    grouping::RoommateGroup, matching::CompatibilityMatch, preference::StudentPreference,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MatchRequest {
    pub(crate) target_student: Option<StudentPreference>,
    pub(crate) candidates: Option<Vec<StudentPreference>>,
    pub(crate) top_k: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GroupRequest {
    pub(crate) students: Option<Vec<StudentPreference>>,
    pub(crate) room_capacity: Option<usize>,
    pub(crate) min_group_score: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MatchResponse {
    pub(crate) target_student: TargetSummary,
    pub(crate) matches: Vec<MatchEntry>,
    pub(crate) total_candidates: usize,
    pub(crate) matches_found: usize,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct TargetSummary {
    #[serde(rename = "_id")]
    pub(crate) id: Option<String>,
    pub(crate) name: Option<Value>,
    pub(crate) cluster: usize,
}

impl TargetSummary {
    pub(crate) fn new(student: &StudentPreference, cluster: usize) -> Self {
        Self {
            id: student.identifier().map(str::to_owned),
            name: student.name.clone(),
            cluster,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MatchEntry {
    pub(crate) student: CandidateSummary,
    pub(crate) compatibility_score: u8,
    pub(crate) similarity: f64,
    pub(crate) cluster: usize,
}

impl From<&CompatibilityMatch<'_>> for MatchEntry {
    fn from(m: &CompatibilityMatch<'_>) -> Self {
        Self {
            student: CandidateSummary::from(m.student),
            compatibility_score: m.score,
            similarity: m.similarity,
            cluster: m.cluster,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CandidateSummary {
    #[serde(rename = "_id")]
    pub(crate) id: Option<String>,
    pub(crate) name: Option<Value>,
    pub(crate) student_id: Option<Value>,
    pub(crate) email: Option<Value>,
    pub(crate) course: Option<Value>,
    pub(crate) year: Option<Value>,
}

impl From<&StudentPreference> for CandidateSummary {
    fn from(student: &StudentPreference) -> Self {
        Self {
            id: student.identifier().map(str::to_owned),
            name: student.name.clone(),
            student_id: student.student_id.clone(),
            email: student.email.clone(),
            course: student.course.clone(),
            year: student.year.clone(),
        }
    }
}

/// Reply for requests that legitimately produce no matches.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct EmptyMatchResponse {
    pub(crate) matches: Vec<MatchEntry>,
    pub(crate) message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GroupResponse {
    pub(crate) groups: Vec<GroupEntry>,
    pub(crate) total_groups: usize,
    pub(crate) room_capacity: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GroupEntry {
    pub(crate) students: Vec<MemberSummary>,
    pub(crate) average_score: u8,
    pub(crate) cluster: usize,
}

impl From<&RoommateGroup<'_>> for GroupEntry {
    fn from(group: &RoommateGroup<'_>) -> Self {
        Self {
            students: group
                .members
                .iter()
                .map(|member| MemberSummary::from(member.student))
                .collect(),
            average_score: group.average_score,
            cluster: group.cluster,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct MemberSummary {
    #[serde(rename = "_id")]
    pub(crate) id: Option<String>,
    pub(crate) name: Option<Value>,
    pub(crate) student_id: Option<Value>,
}

impl From<&StudentPreference> for MemberSummary {
    fn from(student: &StudentPreference) -> Self {
        Self {
            id: student.identifier().map(str::to_owned),
            name: student.name.clone(),
            student_id: student.student_id.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EmptyGroupResponse {
    pub(crate) groups: Vec<GroupEntry>,
    pub(crate) message: String,
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct HealthResponse {
    pub(crate) status: &'static str,
    pub(crate) service: &'static str,
}
