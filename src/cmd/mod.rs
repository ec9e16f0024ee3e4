mod detect;
mod exec;
mod install;
mod metadata;
mod project;
mod run;

pub use detect::cmd_detect;
pub use exec::cmd_exec;
pub use install::cmd_install;
pub use metadata::cmd_metadata;
pub use project::{load_config, Project};
pub use run::cmd_run;
