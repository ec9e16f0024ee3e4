use anyhow::Result;
use std::io::Write;
use std::path::{Path, PathBuf};

use glide_node::detect::{self, DetectionResult, Detector};
use glide_node::plugin::ContextResponse;

use crate::cmd::project::load_config;
use crate::ui;

pub fn cmd_detect(log: &ui::Logger, root: &Path, dirs: &[PathBuf], context: bool) -> Result<i32> {
    let scan: Vec<&Path> = if dirs.is_empty() {
        vec![root]
    } else {
        dirs.iter().map(|d| d.as_path()).collect()
    };

    let mut merged: Option<DetectionResult> = None;
    for dir in scan {
        let r = Detector::new(load_config(log, dir)).detect(dir);
        log::debug!("{}: detected={}", dir.display(), r.detected);
        merged = detect::merge(merged, Some(r));
    }
    let result = merged.unwrap_or_default();

    let mut out = if context {
        serde_json::to_vec_pretty(&ContextResponse::from_detection(&result))?
    } else {
        serde_json::to_vec_pretty(&result)?
    };
    out.push(b'\n');
    std::io::stdout().write_all(&out)?;
    Ok(0)
}
