//! The match, group and health operations over JSON values.
//!
//! Handlers never fail: every outcome, including invalid requests and engine errors,
//! becomes a [`Reply`] carrying a [`Status`] and the JSON body to send back.

use std::{fmt::Display, process::ExitCode};

use roommate_engine::{
    config::EngineConfig,
    grouping::GroupFormer,
    matching::{MatchError, MatchSelector},
};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::{Value, json};

use self::schema::{
    EmptyGroupResponse, EmptyMatchResponse, GroupEntry, GroupRequest, GroupResponse,
    HealthResponse, MatchEntry, MatchRequest, MatchResponse, TargetSummary,
};

mod schema;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Status {
    Success,
    /// The request was rejected before any computation.
    ClientError,
    /// The computation itself failed.
    ServerError,
}

impl Status {
    pub(crate) fn exit_code(self) -> ExitCode {
        match self {
            Status::Success => ExitCode::SUCCESS,
            Status::ServerError => ExitCode::from(1),
            Status::ClientError => ExitCode::from(2),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Reply {
    pub(crate) status: Status,
    pub(crate) body: Value,
}

impl Reply {
    fn success<T>(body: &T) -> Self
    where
        T: Serialize,
    {
        match serde_json::to_value(body) {
            Ok(body) => Self {
                status: Status::Success,
                body,
            },
            Err(err) => Self::server_error(&err),
        }
    }

    fn client_error(message: impl Display) -> Self {
        Self {
            status: Status::ClientError,
            body: json!({ "error": message.to_string() }),
        }
    }

    fn server_error(error: &dyn Display) -> Self {
        Self {
            status: Status::ServerError,
            body: json!({ "error": error.to_string() }),
        }
    }
}

/// Parses a raw request body. Blank input is treated as an absent body.
pub(crate) fn parse_body(text: &str) -> Result<Value, Reply> {
    if text.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(text)
        .map_err(|err| Reply::client_error(format_args!("Invalid JSON body: {err}")))
}

fn is_empty_object(value: Option<&Value>) -> bool {
    value
        .and_then(Value::as_object)
        .is_some_and(serde_json::Map::is_empty)
}

fn parse_request<T>(body: &Value) -> Result<T, Reply>
where
    T: DeserializeOwned,
{
    if body.is_null() {
        return Err(Reply::client_error("No data provided"));
    }
    T::deserialize(body).map_err(|err| Reply::client_error(format_args!("Invalid request: {err}")))
}

pub(crate) fn health() -> Reply {
    Reply::success(&HealthResponse {
        status: "healthy",
        service: "ai-matching",
    })
}

/// Ranks compatible roommates for `targetStudent` among `candidates`.
pub(crate) fn handle_match(config: &EngineConfig, body: &Value) -> Reply {
    if is_empty_object(Some(body)) {
        return Reply::client_error("No data provided");
    }
    if is_empty_object(body.get("targetStudent")) {
        return Reply::client_error("targetStudent is required");
    }
    let request = match parse_request::<MatchRequest>(body) {
        Ok(request) => request,
        Err(reply) => return reply,
    };
    let Some(target) = request.target_student else {
        return Reply::client_error("targetStudent is required");
    };
    let candidates = request.candidates.unwrap_or_default();
    let top_k = request.top_k.unwrap_or(config.default_top_k);
    let target_id = target.identifier().unwrap_or("<anonymous>").to_owned();

    if candidates.is_empty() {
        return Reply::success(&EmptyMatchResponse {
            matches: vec![],
            message: "No candidates provided for matching".to_owned(),
        });
    }

    log::info!(
        "Processing matching request for student {target_id} with {} candidates",
        candidates.len()
    );
    let selector = MatchSelector::new(config);
    match selector.select_matches(&target, &candidates, top_k) {
        Ok(report) => {
            let matches = report
                .matches
                .iter()
                .map(MatchEntry::from)
                .collect::<Vec<_>>();
            log::info!("Found {} matches for student {target_id}", matches.len());
            Reply::success(&MatchResponse {
                target_student: TargetSummary::new(&target, report.target_cluster.unwrap_or(0)),
                total_candidates: candidates.len(),
                matches_found: matches.len(),
                matches,
            })
        }
        Err(MatchError::TargetNotFound { id }) => {
            log::warn!("Returning no matches: target student {id} was not found");
            Reply::success(&EmptyMatchResponse {
                matches: vec![],
                message: "Target student not found among candidates".to_owned(),
            })
        }
        Err(err) => {
            log::error!("Error in match_roommates: {err}");
            Reply::server_error(&err)
        }
    }
}

/// Cuts `students` into rooms of `roomCapacity`.
pub(crate) fn handle_groups(config: &EngineConfig, body: &Value) -> Reply {
    let request = match parse_request::<GroupRequest>(body) {
        Ok(request) => request,
        Err(reply) => return reply,
    };
    let students = request.students.unwrap_or_default();
    let room_capacity = request
        .room_capacity
        .unwrap_or(config.default_room_capacity);
    let min_group_score = request
        .min_group_score
        .unwrap_or(config.default_min_group_score);

    if room_capacity == 0 {
        return Reply::client_error("roomCapacity must be at least 1");
    }
    if students.len() < room_capacity {
        return Reply::success(&EmptyGroupResponse {
            groups: vec![],
            message: format!(
                "Not enough students ({}) for room capacity {room_capacity}",
                students.len()
            ),
        });
    }

    let former = GroupFormer::new(config);
    match former.form_groups(&students, room_capacity, min_group_score) {
        Ok(groups) => {
            let groups = groups.iter().map(GroupEntry::from).collect::<Vec<_>>();
            Reply::success(&GroupResponse {
                total_groups: groups.len(),
                groups,
                room_capacity,
            })
        }
        Err(err) => {
            log::error!("Error in match_roommate_groups: {err}");
            Reply::server_error(&err)
        }
    }
}
