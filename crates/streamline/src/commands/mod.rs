//! Command dispatch: bridges CLI args -> core Commands -> output formatting.

pub mod clients;
pub mod config_cmd;
pub mod dashboard;
pub mod seed;
pub mod tools;
pub mod util;

use std::path::Path;

use crate::cli::{Command, GlobalOpts};
use crate::config::Config;
use crate::error::CliError;

/// Dispatch a data-bound command to the appropriate handler.
pub fn dispatch(
    cmd: Command,
    data_file: &Path,
    cfg: &Config,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        Command::Clients(args) => clients::handle(args, data_file, cfg, global),
        Command::Dashboard(args) => dashboard::handle(args, data_file, cfg, global),
        Command::Seed(args) => seed::handle(args, data_file, global),
        Command::Tools(args) => tools::handle(args, global),
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => unreachable!(),
    }
}
