use std::process::ExitCode;

mod api;
mod command;
mod util;

fn main() -> anyhow::Result<ExitCode> {
    command::run()
}
