use std::path::PathBuf;

use crate::{api, api::Status};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct HealthArg {
    /// Response JSON file; stdout when omitted
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &HealthArg) -> anyhow::Result<Status> {
    super::respond(&api::health(), arg.output.as_deref())
}
