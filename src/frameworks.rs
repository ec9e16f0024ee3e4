use std::collections::{BTreeSet, HashSet};

use crate::config::Config;
use crate::manifest::Manifest;

/// Marker added for `"type": "module"` packages. Not a framework, but it
/// travels in the same list.
pub const ES_MODULES: &str = "ES Modules";

const TYPESCRIPT_DEP: &str = "typescript";

/// Dependency key to display name.
pub const CATALOG: &[(&str, &str)] = &[
    ("react", "React"),
    ("next", "Next.js"),
    ("vue", "Vue"),
    ("nuxt", "Nuxt"),
    ("@angular/core", "Angular"),
    ("express", "Express"),
    ("@nestjs/core", "NestJS"),
    (TYPESCRIPT_DEP, "TypeScript"),
    ("svelte", "Svelte"),
    ("@remix-run/react", "Remix"),
    ("gatsby", "Gatsby"),
    ("vite", "Vite"),
];

pub fn classify(m: &Manifest) -> BTreeSet<String> {
    classify_with(m, &Config::default())
}

pub fn classify_with(m: &Manifest, cfg: &Config) -> BTreeSet<String> {
    let deps: HashSet<&str> = m.dependency_names().collect();

    CATALOG
        .iter()
        .filter(|(dep, _)| cfg.enable_type_script || *dep != TYPESCRIPT_DEP)
        .filter(|(dep, _)| deps.contains(dep))
        .map(|(_, name)| name.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn deps(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn matches_across_dependencies_and_dev_dependencies() {
        let m = Manifest {
            dependencies: deps(&[("react", "^18.0.0")]),
            dev_dependencies: deps(&[("typescript", "^5.0.0")]),
            ..Manifest::default()
        };
        assert_eq!(classify(&m), set(&["React", "TypeScript"]));
    }

    #[test]
    fn ignores_unknown_and_near_miss_keys() {
        let m = Manifest {
            dependencies: deps(&[("lodash", "4"), ("react-dom", "18"), ("@angular/cli", "17")]),
            ..Manifest::default()
        };
        assert!(classify(&m).is_empty());
    }

    #[test]
    fn scoped_packages_match_exactly() {
        let m = Manifest {
            dependencies: deps(&[("@nestjs/core", "10"), ("@remix-run/react", "2")]),
            dev_dependencies: deps(&[("@angular/core", "17")]),
            ..Manifest::default()
        };
        assert_eq!(classify(&m), set(&["NestJS", "Remix", "Angular"]));
    }

    #[test]
    fn duplicate_entries_appear_once() {
        let m = Manifest {
            dependencies: deps(&[("vite", "5")]),
            dev_dependencies: deps(&[("vite", "5")]),
            ..Manifest::default()
        };
        assert_eq!(classify(&m), set(&["Vite"]));
    }

    #[test]
    fn typescript_can_be_disabled() {
        let m = Manifest {
            dependencies: deps(&[("express", "4")]),
            dev_dependencies: deps(&[("typescript", "5")]),
            ..Manifest::default()
        };
        let cfg = Config {
            enable_type_script: false,
            ..Config::default()
        };
        assert_eq!(classify_with(&m, &cfg), set(&["Express"]));
    }

    #[test]
    fn catalog_has_unique_keys() {
        let keys: HashSet<&str> = CATALOG.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys.len(), CATALOG.len());
    }
}
