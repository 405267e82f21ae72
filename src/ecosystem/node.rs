//! npm packages, listed with `npm view <name> --json`.
//!
//! npm reports `versions` in semver order, but mirrors replay in publish
//! order, so versions are re-ordered by their `time` entry.

use super::{dedup_preserving_order, lookup_error, Ecosystem};
use crate::error::Result;
use log::debug;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::process::Command;

/// `versions` is a bare string when a package has a single release.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Versions {
    One(String),
    Many(Vec<String>),
}

#[derive(Debug, Deserialize)]
struct PackageView {
    versions: Versions,
    #[serde(default)]
    time: HashMap<String, Value>,
}

/// Packages published on the npm registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct Node;

impl Ecosystem for Node {
    fn key(&self) -> &str {
        "node"
    }

    fn list_versions(&self, package_name: &str) -> Result<Vec<String>> {
        debug!("Running npm view {} --json", package_name);

        let output = Command::new("npm")
            .args(["view", package_name, "--json"])
            .output()
            .map_err(|e| {
                lookup_error(self.key(), package_name, format!("failed to run npm: {}", e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(lookup_error(
                self.key(),
                package_name,
                format!("npm view exited with {}: {}", output.status, stderr.trim()),
            ));
        }

        let view: PackageView = serde_json::from_slice(&output.stdout).map_err(|e| {
            lookup_error(self.key(), package_name, format!("invalid npm output: {}", e))
        })?;
        Ok(versions_by_publish_time(view))
    }

    fn additional_dependencies(&self, package_name: &str, version: &str) -> Option<Vec<String>> {
        Some(vec![format!("{}@{}", package_name, version)])
    }
}

/// Order versions by their publish timestamp.
///
/// Timestamps are ISO 8601 in UTC, so text order is time order. A version
/// without a timestamp sorts first; ties keep npm's order.
fn versions_by_publish_time(view: PackageView) -> Vec<String> {
    let mut versions = match view.versions {
        Versions::One(version) => vec![version],
        Versions::Many(versions) => versions,
    };
    let published = |version: &String| view.time.get(version).and_then(Value::as_str);
    versions.sort_by(|a, b| published(a).cmp(&published(b)));
    dedup_preserving_order(versions)
}
