use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::config::Config;
use crate::detect::DetectionResult;
use crate::dispatch::{self, DispatchRequest, NodeCommand, StdioMode};
use crate::error::Error;
use crate::pm;

pub const EXTENSION_NAME: &str = "node";

#[derive(Clone, Debug, Serialize)]
pub struct Metadata {
    pub name: &'static str,
    pub version: &'static str,
    pub author: &'static str,
    pub description: &'static str,
    pub homepage: &'static str,
    pub license: &'static str,
    pub tags: Vec<&'static str>,
    pub aliases: Vec<&'static str>,
    pub namespaced: bool,
    pub commands: Vec<CommandInfo>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CommandInfo {
    pub name: &'static str,
    pub description: &'static str,
    pub category: &'static str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<&'static str>,
    pub visibility: &'static str,
}

pub fn metadata() -> Metadata {
    Metadata {
        name: EXTENSION_NAME,
        version: env!("CARGO_PKG_VERSION"),
        author: "Glide Team",
        description: "Node.js and package manager integration for Glide",
        homepage: "https://github.com/ivannovak/glide-plugin-node",
        license: "MIT",
        tags: vec!["language", "node", "nodejs", "javascript", "typescript"],
        aliases: vec!["nodejs", "js", "ts"],
        namespaced: false,
        commands: commands(),
    }
}

pub fn commands() -> Vec<CommandInfo> {
    vec![
        CommandInfo {
            name: "install",
            description: "Install Node.js dependencies",
            category: "dependencies",
            aliases: vec!["i"],
            visibility: "project-only",
        },
        CommandInfo {
            name: "run",
            description: "Run a package.json script",
            category: "run",
            aliases: vec![],
            visibility: "project-only",
        },
    ]
}

/// Detection as the host's context extension expects it: flat string
/// metadata plus frameworks and tools lists.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextResponse {
    pub extension_name: String,
    pub detected: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub frameworks: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<String>,
}

impl ContextResponse {
    pub fn from_detection(r: &DetectionResult) -> Self {
        let mut resp = ContextResponse {
            extension_name: EXTENSION_NAME.to_string(),
            detected: r.detected,
            ..ContextResponse::default()
        };
        if !r.detected {
            return resp;
        }

        let md = &mut resp.metadata;
        if let Some(pm) = r.package_manager {
            md.insert("package_manager".into(), pm.to_string());
            resp.tools.push(pm.to_string());
        }
        let strings = [
            ("project_name", &r.project_name),
            ("project_version", &r.project_version),
            ("module_type", &r.module_type),
            ("node_version", &r.node_version),
            ("error", &r.error),
        ];
        for (k, v) in strings {
            if let Some(v) = v {
                md.insert(k.into(), v.clone());
            }
        }
        if let Some(p) = r.is_private {
            md.insert("private".into(), p.to_string());
        }
        if let Some(m) = r.is_monorepo {
            md.insert("workspaces".into(), m.to_string());
            md.insert("monorepo".into(), m.to_string());
        }

        resp.version = r.node_version.clone();
        resp.frameworks = r.frameworks.iter().flatten().cloned().collect();
        resp
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ExecuteRequest {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub work_dir: PathBuf,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ExecuteResponse {
    pub success: bool,
    pub exit_code: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stdout: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stderr: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecuteResponse {
    fn failed(e: &Error) -> Self {
        ExecuteResponse {
            success: false,
            exit_code: 1,
            error: Some(e.to_string()),
            ..ExecuteResponse::default()
        }
    }
}

/// Runs a host execute request with captured output. Every failure is
/// folded into the response; the host relays it.
pub fn handle(req: &ExecuteRequest, cfg: &Config) -> ExecuteResponse {
    let command = match req.command.parse::<NodeCommand>() {
        Ok(c) => c,
        Err(e) => return ExecuteResponse::failed(&e),
    };

    let work_dir = if req.work_dir.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        req.work_dir.clone()
    };
    let package_manager = pm::lockfile(&work_dir)
        .map(|(kind, _)| kind)
        .unwrap_or_else(|| cfg.fallback_manager());

    let res = dispatch::dispatch(&DispatchRequest {
        command,
        package_manager,
        args: &req.args,
        work_dir: &work_dir,
        env: &req.env,
        mode: StdioMode::Capture,
    });

    match res {
        Ok(out) => ExecuteResponse {
            success: out.success,
            exit_code: out.exit_code,
            stdout: String::from_utf8_lossy(&out.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
            error: None,
        },
        Err(e) => {
            log::debug!("{command} failed: {e}");
            ExecuteResponse::failed(&e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pm::PackageManagerKind;
    use std::collections::BTreeSet;

    #[test]
    fn metadata_lists_both_commands() {
        let m = metadata();
        assert_eq!(m.name, "node");
        let names: Vec<&str> = m.commands.iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["install", "run"]);
        assert_eq!(m.commands[0].aliases, vec!["i"]);

        let v = serde_json::to_value(&m).unwrap();
        assert!(v["commands"][1].get("aliases").is_none());
    }

    #[test]
    fn context_for_undetected_is_bare() {
        let resp = ContextResponse::from_detection(&DetectionResult::not_detected());
        assert_eq!(
            serde_json::to_value(&resp).unwrap(),
            serde_json::json!({"extension_name": "node", "detected": false})
        );
    }

    #[test]
    fn context_flattens_detection() {
        let r = DetectionResult {
            detected: true,
            package_manager: Some(PackageManagerKind::Yarn),
            project_name: Some("app".into()),
            project_version: Some("1.2.3".into()),
            module_type: Some("module".into()),
            node_version: Some(">=18".into()),
            is_private: Some(true),
            is_monorepo: Some(true),
            scripts: Some(BTreeMap::from([("dev".to_string(), "vite".to_string())])),
            frameworks: Some(BTreeSet::from(["Vite".to_string(), "ES Modules".to_string()])),
            error: None,
        };

        let resp = ContextResponse::from_detection(&r);
        assert!(resp.detected);
        assert_eq!(resp.version.as_deref(), Some(">=18"));
        assert_eq!(resp.tools, vec!["yarn"]);
        assert_eq!(resp.frameworks, vec!["ES Modules", "Vite"]);
        let md = &resp.metadata;
        assert_eq!(md["package_manager"], "yarn");
        assert_eq!(md["project_name"], "app");
        assert_eq!(md["private"], "true");
        assert_eq!(md["workspaces"], "true");
        assert_eq!(md["monorepo"], "true");
        assert!(!md.contains_key("scripts"));
    }

    #[test]
    fn context_keeps_parse_diagnostic() {
        let resp = ContextResponse::from_detection(&DetectionResult::unreadable());
        assert!(resp.detected);
        assert_eq!(resp.metadata["error"], "failed to parse package.json");
        assert!(resp.tools.is_empty());
    }

    #[test]
    fn run_without_script_fails_in_response() {
        let req = ExecuteRequest {
            command: "run".into(),
            ..ExecuteRequest::default()
        };
        let resp = handle(&req, &Config::default());
        assert!(!resp.success);
        assert_eq!(resp.exit_code, 1);
        assert_eq!(resp.error.as_deref(), Some("script name required"));
    }

    #[test]
    fn unknown_command_fails_in_response() {
        let req = ExecuteRequest {
            command: "publish".into(),
            ..ExecuteRequest::default()
        };
        let resp = handle(&req, &Config::default());
        assert!(!resp.success);
        assert_eq!(resp.error.as_deref(), Some("unknown command: publish"));
    }

    #[test]
    fn request_defaults_optional_fields() {
        let req: ExecuteRequest = serde_json::from_str(r#"{"command": "install"}"#).unwrap();
        assert!(req.args.is_empty());
        assert!(req.env.is_empty());
        assert!(req.work_dir.as_os_str().is_empty());
    }
}
