use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::pm::PackageManagerKind;

const CONFIG_FILE_NAME: &str = ".glide.yml";

/// Settings read from `plugins.node` in the project's `.glide.yml`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Use yarn instead of npm when no lock file decides
    pub prefer_yarn: bool,
    /// Use pnpm instead of npm when no lock file decides; wins over yarn
    pub prefer_pnpm: bool,
    pub enable_type_script: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            prefer_yarn: false,
            prefer_pnpm: false,
            enable_type_script: true,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GlideFile {
    #[serde(default)]
    plugins: Plugins,
}

#[derive(Debug, Default, Deserialize)]
struct Plugins {
    #[serde(default)]
    node: Option<Config>,
}

impl Config {
    pub fn load(root: &Path) -> Result<Config> {
        let p = file_path(root);
        let s = match fs::read_to_string(&p) {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(source) => return Err(Error::ConfigRead { path: p, source }),
        };

        if s.trim().is_empty() {
            return Ok(Config::default());
        }

        let f: GlideFile =
            serde_yaml::from_str(&s).map_err(|source| Error::ConfigParse { path: p, source })?;
        Ok(f.plugins.node.unwrap_or_default())
    }

    /// Manager to use when the project has no lock file.
    pub fn fallback_manager(&self) -> PackageManagerKind {
        if self.prefer_pnpm {
            PackageManagerKind::Pnpm
        } else if self.prefer_yarn {
            PackageManagerKind::Yarn
        } else {
            PackageManagerKind::Npm
        }
    }
}

fn file_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let td = TempDir::new().unwrap();
        let c = Config::load(td.path()).unwrap();
        assert_eq!(c, Config::default());
        assert!(c.enable_type_script);
        assert_eq!(c.fallback_manager(), PackageManagerKind::Npm);
    }

    #[test]
    fn reads_node_section() {
        let td = TempDir::new().unwrap();
        fs::write(
            td.path().join(CONFIG_FILE_NAME),
            "project: demo\nplugins:\n  node:\n    preferYarn: true\n    enableTypeScript: false\n",
        )
        .unwrap();

        let c = Config::load(td.path()).unwrap();
        assert!(c.prefer_yarn);
        assert!(!c.prefer_pnpm);
        assert!(!c.enable_type_script);
        assert_eq!(c.fallback_manager(), PackageManagerKind::Yarn);
    }

    #[test]
    fn pnpm_preference_wins_over_yarn() {
        let c = Config {
            prefer_yarn: true,
            prefer_pnpm: true,
            ..Config::default()
        };
        assert_eq!(c.fallback_manager(), PackageManagerKind::Pnpm);
    }

    #[test]
    fn file_without_node_section_gives_defaults() {
        let td = TempDir::new().unwrap();
        fs::write(
            td.path().join(CONFIG_FILE_NAME),
            "plugins:\n  php:\n    version: 8\n",
        )
        .unwrap();
        assert_eq!(Config::load(td.path()).unwrap(), Config::default());
    }

    #[test]
    fn malformed_yaml_is_config_error() {
        let td = TempDir::new().unwrap();
        fs::write(td.path().join(CONFIG_FILE_NAME), "plugins: [unclosed\n").unwrap();
        let err = Config::load(td.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn unreadable_config_is_read_error() {
        let td = TempDir::new().unwrap();
        fs::create_dir(td.path().join(CONFIG_FILE_NAME)).unwrap();
        let err = Config::load(td.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigRead { .. }));
        assert!(std::error::Error::source(&err).is_some());
    }
}
