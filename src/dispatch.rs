use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::process::{Command, Stdio};
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::pm::PackageManagerKind;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeCommand {
    Install,
    Run,
}

impl NodeCommand {
    pub fn name(self) -> &'static str {
        match self {
            NodeCommand::Install => "install",
            NodeCommand::Run => "run",
        }
    }
}

impl fmt::Display for NodeCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NodeCommand {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "install" | "i" => Ok(NodeCommand::Install),
            "run" => Ok(NodeCommand::Run),
            other => Err(Error::InvalidArgument(format!("unknown command: {other}"))),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StdioMode {
    /// Child shares our terminal.
    Inherit,
    /// stdout/stderr are collected and returned in the outcome.
    Capture,
}

/// A resolved package-manager command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Outcome {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl Invocation {
    pub fn new(cmd: NodeCommand, pm: PackageManagerKind, args: &[String]) -> Result<Invocation> {
        let mut argv: Vec<String> = Vec::with_capacity(args.len() + 2);
        match cmd {
            NodeCommand::Install => {
                argv.push("install".into());
                argv.extend(args.iter().cloned());
            }
            NodeCommand::Run => {
                let Some((script, rest)) = args.split_first() else {
                    return Err(Error::InvalidArgument("script name required".into()));
                };
                match pm {
                    PackageManagerKind::Npm | PackageManagerKind::Bun => argv.push("run".into()),
                    PackageManagerKind::Yarn | PackageManagerKind::Pnpm => {}
                }
                argv.push(script.clone());
                argv.extend(rest.iter().cloned());
            }
        }

        Ok(Invocation {
            program: pm.binary().to_string(),
            args: argv,
        })
    }

    pub fn execute(
        &self,
        work_dir: &Path,
        env: &BTreeMap<String, String>,
        mode: StdioMode,
    ) -> Result<Outcome> {
        let dir = if work_dir.as_os_str().is_empty() {
            Path::new(".")
        } else {
            work_dir
        };

        log::debug!("exec {} (in {})", self, dir.display());

        let mut c = Command::new(&self.program);
        c.args(&self.args).current_dir(dir).envs(env);

        let launch_err = |e: std::io::Error| Error::Execution {
            program: self.program.clone(),
            source: e,
        };

        match mode {
            StdioMode::Inherit => {
                c.stdout(Stdio::inherit())
                    .stderr(Stdio::inherit())
                    .stdin(Stdio::inherit());
                let status = c.status().map_err(launch_err)?;
                Ok(Outcome::from_code(status.code(), Vec::new(), Vec::new()))
            }
            StdioMode::Capture => {
                c.stdin(Stdio::null());
                let out = c.output().map_err(launch_err)?;
                Ok(Outcome::from_code(out.status.code(), out.stdout, out.stderr))
            }
        }
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for a in &self.args {
            write!(f, " {a}")?;
        }
        Ok(())
    }
}

impl Outcome {
    fn from_code(code: Option<i32>, stdout: Vec<u8>, stderr: Vec<u8>) -> Outcome {
        // Killed by a signal: no code to relay.
        let exit_code = code.unwrap_or(1);
        Outcome {
            success: exit_code == 0,
            exit_code,
            stdout,
            stderr,
        }
    }
}

#[derive(Clone, Debug)]
pub struct DispatchRequest<'a> {
    pub command: NodeCommand,
    pub package_manager: PackageManagerKind,
    pub args: &'a [String],
    pub work_dir: &'a Path,
    pub env: &'a BTreeMap<String, String>,
    pub mode: StdioMode,
}

/// Builds the package-manager command line and runs it.
///
/// A non-zero exit is reported in the [`Outcome`]; only a failure to launch
/// the binary is an error.
pub fn dispatch(req: &DispatchRequest<'_>) -> Result<Outcome> {
    let inv = Invocation::new(req.command, req.package_manager, req.args)?;
    inv.execute(req.work_dir, req.env, req.mode)
}
