use anyhow::Result;

use glide_node::dispatch::NodeCommand;

use crate::cmd::project::{run_interactive, Project};
use crate::ui;

pub fn cmd_run(log: &ui::Logger, p: &Project, args: &[String]) -> Result<i32> {
    if let Some(script) = args.first() {
        let known = p
            .detection
            .scripts
            .as_ref()
            .is_some_and(|s| s.contains_key(script));
        if p.detection.detected && !known {
            log::debug!("script '{script}' is not in package.json; passing it on anyway");
        }
    }
    Ok(run_interactive(log, p, NodeCommand::Run, args))
}
