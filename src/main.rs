use anyhow::Result;
use clap::Parser;
use std::env;
use std::process::ExitCode;

mod cli;
mod cmd;
mod ui;

use cli::{Cli, Cmd, USAGE_TEXT};
use cmd::{cmd_detect, cmd_exec, cmd_install, cmd_metadata, cmd_run, load_config, Project};

fn main() -> ExitCode {
    match run() {
        Ok(code) => ExitCode::from(code as u8),
        Err(e) => {
            eprintln!("[glide-node] ERROR: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn initialize_logger(debug: bool) -> Result<()> {
    let filter = if debug {
        simplelog::LevelFilter::Debug
    } else {
        simplelog::LevelFilter::Info
    };

    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("glide_node")
        .build();

    // stdout carries JSON for detect/metadata/exec, so logs go to stderr only.
    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

fn run() -> Result<i32> {
    let log = ui::Logger;

    let cli = Cli::parse();
    initialize_logger(cli.debug)?;

    let Some(cmd) = cli.cmd else {
        eprintln!("{USAGE_TEXT}");
        return Ok(2);
    };

    let root = match cli.dir {
        Some(d) => d,
        None => env::current_dir()?,
    };

    match cmd {
        Cmd::Help => {
            print!("{USAGE_TEXT}");
            Ok(0)
        }

        Cmd::Install { args } => {
            let cfg = load_config(&log, &root);
            cmd_install(&log, &Project::open(root, cfg), &args)
        }

        Cmd::Run { args } => {
            let cfg = load_config(&log, &root);
            cmd_run(&log, &Project::open(root, cfg), &args)
        }

        Cmd::Detect { context, dirs } => cmd_detect(&log, &root, &dirs, context),

        Cmd::Metadata => cmd_metadata(),

        Cmd::Exec => cmd_exec(&log, &root),
    }
}
