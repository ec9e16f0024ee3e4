use anyhow::Result;

use glide_node::dispatch::NodeCommand;

use crate::cmd::project::{run_interactive, Project};
use crate::ui;

pub fn cmd_install(log: &ui::Logger, p: &Project, args: &[String]) -> Result<i32> {
    Ok(run_interactive(log, p, NodeCommand::Install, args))
}
