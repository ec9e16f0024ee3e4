use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::config::Config;
use crate::frameworks::{self, ES_MODULES};
use crate::manifest::Manifest;
use crate::pm::{self, PackageManagerKind};

pub const PARSE_ERROR_DIAGNOSTIC: &str = "failed to parse package.json";

/// What detection learned about a directory.
///
/// Optional fields are omitted (not empty) when they do not apply, and
/// `detected == false` leaves every other field unset.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectionResult {
    #[serde(rename = "node_detected")]
    pub detected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_manager: Option<PackageManagerKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub node_version: Option<String>,
    #[serde(default, rename = "private", skip_serializing_if = "Option::is_none")]
    pub is_private: Option<bool>,
    #[serde(default, rename = "monorepo", skip_serializing_if = "Option::is_none")]
    pub is_monorepo: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scripts: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frameworks: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DetectionResult {
    pub fn not_detected() -> Self {
        DetectionResult::default()
    }

    /// A manifest exists but its contents could not be used.
    pub fn unreadable() -> Self {
        DetectionResult {
            detected: true,
            error: Some(PARSE_ERROR_DIAGNOSTIC.to_string()),
            ..DetectionResult::default()
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Detector {
    cfg: Config,
}

impl Detector {
    pub fn new(cfg: Config) -> Self {
        Detector { cfg }
    }

    pub fn detect(&self, root: &Path) -> DetectionResult {
        let path = Manifest::path_in(root);
        let m = match Manifest::read(&path) {
            Ok(Some(m)) => m,
            Ok(None) => {
                log::debug!("no {} in {}", path.display(), root.display());
                return DetectionResult::not_detected();
            }
            Err(e) => {
                log::debug!("{e}");
                return DetectionResult::unreadable();
            }
        };

        log::debug!(
            "manifest {}@{} (main: {})",
            m.name,
            m.version,
            if m.main_entry.is_empty() { "-" } else { m.main_entry.as_str() }
        );

        let package_manager = match pm::lockfile(root) {
            Some((kind, file)) => {
                log::debug!("package manager {kind} from {file}");
                kind
            }
            None => {
                let kind = self.cfg.fallback_manager();
                log::debug!("no lock file, using {kind}");
                kind
            }
        };

        let mut frameworks = frameworks::classify_with(&m, &self.cfg);
        if m.is_es_module() {
            frameworks.insert(ES_MODULES.to_string());
        }

        DetectionResult {
            detected: true,
            package_manager: Some(package_manager),
            project_name: Some(m.name.clone()),
            project_version: Some(m.version.clone()),
            module_type: Some(m.module_type.clone()).filter(|t| !t.is_empty()),
            node_version: m.node_engine().map(str::to_string),
            is_private: m.is_private.then_some(true),
            is_monorepo: m.has_workspaces().then_some(true),
            scripts: Some(m.scripts),
            frameworks: Some(frameworks),
            error: None,
        }
    }
}

/// Detects `root` with default configuration.
pub fn detect(root: &Path) -> DetectionResult {
    Detector::default().detect(root)
}

/// Shallow last-write-wins merge: every field `b` sets replaces `a`'s.
/// Collections are replaced wholesale, never unioned.
///
/// An undetected operand counts as absent, so a project found in `a` is
/// never masked by a later directory without a package.json.
pub fn merge(a: Option<DetectionResult>, b: Option<DetectionResult>) -> Option<DetectionResult> {
    let (a, b) = match (a, b) {
        (None, b) => return b,
        (a, None) => return a,
        (Some(a), Some(b)) if !b.detected => return Some(a),
        (Some(a), Some(b)) if !a.detected => return Some(b),
        (Some(a), Some(b)) => (a, b),
    };

    Some(DetectionResult {
        detected: b.detected,
        package_manager: b.package_manager.or(a.package_manager),
        project_name: b.project_name.or(a.project_name),
        project_version: b.project_version.or(a.project_version),
        module_type: b.module_type.or(a.module_type),
        node_version: b.node_version.or(a.node_version),
        is_private: b.is_private.or(a.is_private),
        is_monorepo: b.is_monorepo.or(a.is_monorepo),
        scripts: b.scripts.or(a.scripts),
        frameworks: b.frameworks.or(a.frameworks),
        error: b.error.or(a.error),
    })
}
