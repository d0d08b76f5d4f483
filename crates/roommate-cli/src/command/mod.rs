use std::{
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::{Parser, Subcommand};
use env_logger::Env;

use crate::{
    api::{self, Reply, Status},
    util::{self, Output},
};

use self::{health::HealthArg, match_groups::MatchGroupsArg, match_roommates::MatchArg};

mod health;
mod match_groups;
mod match_roommates;

const LOG_ENV: &str = "ROOMMATE_LOG";
const DEFAULT_LOG_FILTER: &str = "warn,roommate=info";

#[derive(Debug, Clone, Parser)]
#[command(name = "roommate", author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Engine configuration JSON file
    #[arg(long, global = true, env = "ROOMMATE_CONFIG")]
    config: Option<PathBuf>,
    /// Fixed number of k-means clusters, overriding the configuration
    #[arg(long, global = true)]
    clusters: Option<usize>,
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Rank the most compatible roommates for a target student
    Match(#[clap(flatten)] MatchArg),
    /// Split a roster into rooms of compatible students
    #[command(name = "match-groups")]
    MatchGroups(#[clap(flatten)] MatchGroupsArg),
    /// Report service health
    Health(#[clap(flatten)] HealthArg),
}

pub fn run() -> anyhow::Result<ExitCode> {
    env_logger::Builder::from_env(Env::default().filter_or(LOG_ENV, DEFAULT_LOG_FILTER))
        .format_timestamp_millis()
        .init();

    let args = CommandArgs::parse();
    let mut config = util::read_engine_config(args.config.as_deref())?;
    if let Some(clusters) = args.clusters {
        config.clusters = Some(clusters);
    }
    log::debug!("Engine configuration: {config:?}");

    let status = match &args.mode {
        Mode::Match(arg) => match_roommates::run(arg, &config)?,
        Mode::MatchGroups(arg) => match_groups::run(arg, &config)?,
        Mode::Health(arg) => health::run(arg)?,
    };
    Ok(status.exit_code())
}

/// Parses the raw request and hands it to `handler`, unless it is not JSON at all.
fn dispatch<F>(text: &str, handler: F) -> Reply
where
    F: FnOnce(&serde_json::Value) -> Reply,
{
    match api::parse_body(text) {
        Ok(body) => handler(&body),
        Err(reply) => reply,
    }
}

/// Writes the reply body and returns its status.
fn respond(reply: &Reply, output: Option<&Path>) -> anyhow::Result<Status> {
    Output::save_json(&reply.body, output)?;
    if reply.status != Status::Success {
        log::warn!("Request failed: {}", reply.body["error"]);
    }
    Ok(reply.status)
}
