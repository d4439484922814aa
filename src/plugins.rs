//! Rename table for Nx plugin packages.
//!
//! Two static tables feed one lookup map:
//!
//! - **renamed**: the package keeps its scope but changes its local name
//! - **rescoped**: the package moves to another scope (Nx 16 moved every
//!   official `@nrwl/*` plugin to `@nx/*`), sometimes changing its local
//!   name as well
//!
//! The merged map is built once on first use and never mutated afterwards.

use std::collections::HashMap;
use std::sync::LazyLock;

/// Old package name to new package name.
pub type PluginMap = HashMap<&'static str, &'static str>;

/// Community plugins renamed within their own scope.
pub const RENAMED_PLUGINS: &[(&str, &str)] = &[
    ("@nx-tools/nx-docker", "@nx-tools/nx-container"),
    ("@nx-tools/docker-metadata", "@nx-tools/container-metadata"),
];

/// Official plugins moved from `@nrwl` to `@nx` (and `nx-cloud`).
pub const RESCOPED_PLUGINS: &[(&str, &str)] = &[
    ("@nrwl/angular", "@nx/angular"),
    ("@nrwl/cypress", "@nx/cypress"),
    ("@nrwl/detox", "@nx/detox"),
    ("@nrwl/devkit", "@nx/devkit"),
    ("@nrwl/esbuild", "@nx/esbuild"),
    ("@nrwl/eslint-plugin-nx", "@nx/eslint-plugin"),
    ("@nrwl/expo", "@nx/expo"),
    ("@nrwl/express", "@nx/express"),
    ("@nrwl/jest", "@nx/jest"),
    ("@nrwl/js", "@nx/js"),
    ("@nrwl/linter", "@nx/linter"),
    ("@nrwl/nest", "@nx/nest"),
    ("@nrwl/next", "@nx/next"),
    ("@nrwl/node", "@nx/node"),
    ("@nrwl/nx-cloud", "nx-cloud"),
    ("@nrwl/nx-plugin", "@nx/plugin"),
    ("@nrwl/react", "@nx/react"),
    ("@nrwl/react-native", "@nx/react-native"),
    ("@nrwl/rollup", "@nx/rollup"),
    ("@nrwl/storybook", "@nx/storybook"),
    ("@nrwl/vite", "@nx/vite"),
    ("@nrwl/web", "@nx/web"),
    ("@nrwl/webpack", "@nx/webpack"),
    ("@nrwl/workspace", "@nx/workspace"),
];

static PLUGIN_MAP: LazyLock<PluginMap> =
    LazyLock::new(|| build_plugin_map(RENAMED_PLUGINS, RESCOPED_PLUGINS));

/// Returns the merged rename table.
pub fn plugin_map() -> &'static PluginMap {
    &PLUGIN_MAP
}

/// Merges the two tables; entries of `rescoped` win on key collision.
pub fn build_plugin_map(
    renamed: &[(&'static str, &'static str)],
    rescoped: &[(&'static str, &'static str)],
) -> PluginMap {
    renamed.iter().chain(rescoped.iter()).copied().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_self_mapping() {
        for (old, new) in plugin_map() {
            assert_ne!(old, new, "{} maps to itself", old);
        }
    }

    #[test]
    fn test_targets_are_not_sources() {
        let map = plugin_map();
        for new in map.values() {
            assert!(
                !map.contains_key(new),
                "{} is both a target and a source",
                new
            );
        }
    }

    #[test]
    fn test_map_contains_both_tables() {
        let map = plugin_map();
        assert_eq!(map.len(), RENAMED_PLUGINS.len() + RESCOPED_PLUGINS.len());
        assert_eq!(map.get("@nrwl/workspace"), Some(&"@nx/workspace"));
        assert_eq!(
            map.get("@nx-tools/nx-docker"),
            Some(&"@nx-tools/nx-container")
        );
    }

    #[test]
    fn test_rescoped_wins_on_collision() {
        let map = build_plugin_map(&[("a", "b")], &[("a", "c")]);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a"), Some(&"c"));
    }
}
