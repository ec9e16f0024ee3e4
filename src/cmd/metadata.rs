use anyhow::Result;
use std::io::Write;

use glide_node::plugin;

pub fn cmd_metadata() -> Result<i32> {
    let mut out = serde_json::to_vec_pretty(&plugin::metadata())?;
    out.push(b'\n');
    std::io::stdout().write_all(&out)?;
    Ok(0)
}
