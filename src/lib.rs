//! Node.js project detection and package-manager dispatch for the Glide
//! plugin host.
//!
//! [`detect::Detector`] turns a directory into a [`detect::DetectionResult`];
//! [`dispatch::dispatch`] forwards `install`/`run` to npm, yarn, pnpm or bun.

pub mod config;
pub mod detect;
pub mod dispatch;
pub mod error;
pub mod frameworks;
pub mod manifest;
pub mod plugin;
pub mod pm;
