use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use glide_node::config::Config;
use glide_node::detect::{DetectionResult, Detector};
use glide_node::dispatch::{self, DispatchRequest, NodeCommand, StdioMode};
use glide_node::error::Error;
use glide_node::pm::{self, PackageManagerKind};

use crate::ui;

/// The directory a command operates on, with its detection already done.
#[derive(Clone, Debug)]
pub struct Project {
    pub root: PathBuf,
    pub cfg: Config,
    pub detection: DetectionResult,
}

impl Project {
    pub fn open(root: PathBuf, cfg: Config) -> Project {
        let detection = Detector::new(cfg.clone()).detect(&root);
        Project {
            root,
            cfg,
            detection,
        }
    }

    pub fn package_manager(&self) -> PackageManagerKind {
        // An unreadable manifest leaves the detection without a manager.
        self.detection.package_manager.unwrap_or_else(|| {
            pm::lockfile(&self.root)
                .map(|(kind, _)| kind)
                .unwrap_or_else(|| self.cfg.fallback_manager())
        })
    }
}

pub fn load_config(log: &ui::Logger, dir: &Path) -> Config {
    match Config::load(dir) {
        Ok(c) => c,
        Err(e) => {
            log.infof(&format!("{e}; using default settings"));
            Config::default()
        }
    }
}

/// Runs `cmd` in the project with the terminal attached and maps the result
/// to an exit code.
pub fn run_interactive(log: &ui::Logger, p: &Project, cmd: NodeCommand, args: &[String]) -> i32 {
    if !p.detection.detected {
        log.errorf(&format!("no package.json in {}", p.root.display()));
        return 2;
    }

    let package_manager = p.package_manager();
    match cmd {
        NodeCommand::Install => {
            log.infof(&format!("installing dependencies with {package_manager}"))
        }
        NodeCommand::Run => {
            if let Some(script) = args.first() {
                log.infof(&format!("running script '{script}' with {package_manager}"));
            }
        }
    }

    let env = BTreeMap::new();
    let res = dispatch::dispatch(&DispatchRequest {
        command: cmd,
        package_manager,
        args,
        work_dir: &p.root,
        env: &env,
        mode: StdioMode::Inherit,
    });

    match res {
        Ok(out) => out.exit_code,
        Err(e @ Error::InvalidArgument(_)) => {
            log.errorf(&format!("{e}"));
            log.errorf("usage: glide-node run <script> [args...]");
            2
        }
        Err(e) => {
            log.errorf(&format!("{cmd} failed: {e}"));
            1
        }
    }
}
