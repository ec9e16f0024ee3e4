use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const USAGE_TEXT: &str = r#"glide-node: Node.js project detection and package manager integration

Usage:
  glide-node [-C <dir>] [--debug] <command>

  glide-node install [args...]          (alias: i)
  glide-node run <script> [args...]
  glide-node detect [--context] [<dir>...]
  glide-node metadata
  glide-node exec < request.json

Conventions:
  - A directory is a Node.js project when it has a package.json.
  - The package manager comes from the lock file, checked in this order:
    pnpm-lock.yaml, yarn.lock, bun.lockb, package-lock.json. Without one, npm
    is used unless .glide.yml sets plugins.node.preferPnpm / preferYarn.
  - detect with several dirs merges the results; later dirs win field by field.
"#;

#[derive(Parser, Debug)]
#[command(name = "glide-node")]
#[command(disable_version_flag = true)]
#[command(disable_help_subcommand = true)]
pub struct Cli {
    /// Project root (defaults to the current directory)
    #[arg(short = 'C', long = "dir", value_name = "DIR", global = true)]
    pub dir: Option<PathBuf>,

    /// Log detection and dispatch details to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub cmd: Option<Cmd>,
}

#[derive(Subcommand, Debug)]
pub enum Cmd {
    /// Print usage
    Help,

    /// Install dependencies with the detected package manager
    #[command(visible_alias = "i", trailing_var_arg = true)]
    Install {
        #[arg(value_name = "ARGS", num_args = 0.., allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Run a package.json script with the detected package manager
    ///
    /// Everything after the script name is passed through unchanged.
    #[command(trailing_var_arg = true)]
    Run {
        #[arg(value_name = "SCRIPT", num_args = 0.., allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Print what detection found, as JSON
    Detect {
        /// Print the host context response instead of the raw result
        #[arg(long)]
        context: bool,
        /// Directories to scan in order (defaults to the project root)
        #[arg(value_name = "DIR")]
        dirs: Vec<PathBuf>,
    },

    /// Print plugin metadata and commands, as JSON
    Metadata,

    /// Run an execute request read from stdin and print the response
    Exec,
}
