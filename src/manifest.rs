use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const MANIFEST_FILE_NAME: &str = "package.json";

/// The subset of package.json the plugin cares about.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Manifest {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub version: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub scripts: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dependencies: BTreeMap<String, String>,
    #[serde(
        default,
        rename = "devDependencies",
        deserialize_with = "null_as_default"
    )]
    pub dev_dependencies: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub engines: BTreeMap<String, String>,
    #[serde(default, rename = "type", deserialize_with = "null_as_default")]
    pub module_type: String,
    #[serde(default, rename = "main", deserialize_with = "null_as_default")]
    pub main_entry: String,
    #[serde(default, rename = "private", deserialize_with = "null_as_default")]
    pub is_private: bool,
    // Only presence matters; npm, yarn and pnpm all spell it differently.
    #[serde(default)]
    pub workspaces: Option<serde_json::Value>,
}

impl Manifest {
    pub fn path_in(root: &Path) -> PathBuf {
        root.join(MANIFEST_FILE_NAME)
    }

    /// Reads the manifest at `path`.
    ///
    /// `Ok(None)` means there is no manifest at all, which callers treat as
    /// "not a Node.js project" rather than a failure.
    pub fn read(path: &Path) -> Result<Option<Manifest>> {
        let b = match fs::read(path) {
            Ok(b) => b,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(Error::ManifestRead {
                    path: path.to_path_buf(),
                    source: e,
                })
            }
        };

        let m = serde_json::from_slice(&b).map_err(|e| Error::ManifestParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Some(m))
    }

    pub fn has_workspaces(&self) -> bool {
        self.workspaces.is_some()
    }

    pub fn node_engine(&self) -> Option<&str> {
        self.engines.get("node").map(|s| s.as_str())
    }

    pub fn is_es_module(&self) -> bool {
        self.module_type == "module"
    }

    /// Dependency names from both `dependencies` and `devDependencies`.
    pub fn dependency_names(&self) -> impl Iterator<Item = &str> {
        self.dependencies
            .keys()
            .chain(self.dev_dependencies.keys())
            .map(|s| s.as_str())
    }
}

fn null_as_default<'de, D, T>(d: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}
