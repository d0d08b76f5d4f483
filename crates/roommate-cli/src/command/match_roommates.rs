use std::path::PathBuf;

use roommate_engine::config::EngineConfig;

use crate::{api, api::Status, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct MatchArg {
    /// Request JSON file; stdin when omitted
    #[arg(long)]
    input: Option<PathBuf>,
    /// Response JSON file; stdout when omitted
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &MatchArg, config: &EngineConfig) -> anyhow::Result<Status> {
    let text = util::read_request(arg.input.as_deref())?;
    let reply = super::dispatch(&text, |body| api::handle_match(config, body));
    super::respond(&reply, arg.output.as_deref())
}
