use anyhow::{Context, Result};
use std::io::{self, Read, Write};
use std::path::Path;

use glide_node::plugin::{self, ExecuteRequest};

use crate::cmd::project::load_config;
use crate::ui;

pub fn cmd_exec(log: &ui::Logger, root: &Path) -> Result<i32> {
    let mut s = String::new();
    io::stdin()
        .read_to_string(&mut s)
        .context("read execute request")?;

    let mut req: ExecuteRequest = match serde_json::from_str(&s) {
        Ok(r) => r,
        Err(e) => {
            log.errorf(&format!("execute request is not valid JSON: {e}"));
            return Ok(2);
        }
    };
    if req.work_dir.as_os_str().is_empty() {
        req.work_dir = root.to_path_buf();
    }

    let cfg = load_config(log, &req.work_dir);
    let resp = plugin::handle(&req, &cfg);

    let mut out = serde_json::to_vec_pretty(&resp)?;
    out.push(b'\n');
    io::stdout().write_all(&out)?;
    Ok(0)
}
