use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackageManagerKind {
    #[default]
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl PackageManagerKind {
    pub fn binary(self) -> &'static str {
        match self {
            PackageManagerKind::Npm => "npm",
            PackageManagerKind::Yarn => "yarn",
            PackageManagerKind::Pnpm => "pnpm",
            PackageManagerKind::Bun => "bun",
        }
    }
}

impl fmt::Display for PackageManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary())
    }
}

/// Lock files in priority order. When several coexist the first one wins.
pub const LOCKFILES: &[(&str, PackageManagerKind)] = &[
    ("pnpm-lock.yaml", PackageManagerKind::Pnpm),
    ("yarn.lock", PackageManagerKind::Yarn),
    ("bun.lockb", PackageManagerKind::Bun),
    ("package-lock.json", PackageManagerKind::Npm),
];

pub fn lockfile(root: &Path) -> Option<(PackageManagerKind, &'static str)> {
    LOCKFILES
        .iter()
        .find(|(name, _)| root.join(name).exists())
        .map(|&(name, kind)| (kind, name))
}

/// Package manager for `root`, falling back to npm when no lock file exists.
pub fn resolve(root: &Path) -> PackageManagerKind {
    lockfile(root).map(|(kind, _)| kind).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn project_with(lockfiles: &[&str]) -> TempDir {
        let td = TempDir::new().unwrap();
        fs::write(td.path().join("package.json"), "{}").unwrap();
        for l in lockfiles {
            fs::write(td.path().join(l), "").unwrap();
        }
        td
    }

    #[test]
    fn defaults_to_npm_without_lockfile() {
        let td = project_with(&[]);
        assert_eq!(resolve(td.path()), PackageManagerKind::Npm);
        assert_eq!(lockfile(td.path()), None);
    }

    #[test]
    fn defaults_to_npm_without_manifest_either() {
        let td = TempDir::new().unwrap();
        assert_eq!(resolve(td.path()), PackageManagerKind::Npm);
    }

    #[test]
    fn each_lockfile_alone_selects_its_manager() {
        for (name, kind) in LOCKFILES {
            let td = project_with(&[*name]);
            assert_eq!(resolve(td.path()), *kind, "{name}");
            assert_eq!(lockfile(td.path()), Some((*kind, *name)));
        }
    }

    #[test]
    fn pairwise_conflicts_follow_priority_order() {
        for (i, (hi, hi_kind)) in LOCKFILES.iter().enumerate() {
            for (lo, _) in &LOCKFILES[i + 1..] {
                let td = project_with(&[*lo, *hi]);
                assert_eq!(resolve(td.path()), *hi_kind, "{hi} vs {lo}");
            }
        }
    }

    #[test]
    fn pnpm_beats_everything() {
        let td = project_with(&["yarn.lock", "bun.lockb", "package-lock.json", "pnpm-lock.yaml"]);
        assert_eq!(resolve(td.path()), PackageManagerKind::Pnpm);
    }

    #[test]
    fn serializes_lowercase() {
        let v = serde_json::to_string(&PackageManagerKind::Pnpm).unwrap();
        assert_eq!(v, "\"pnpm\"");
        assert_eq!(PackageManagerKind::Bun.to_string(), "bun");
    }
}
