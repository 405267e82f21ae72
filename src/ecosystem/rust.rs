//! crates.io: `https://crates.io/api/v1/crates/<name>`.

use super::{dedup_preserving_order, http, lookup_error, Ecosystem};
use crate::error::Result;
use serde::Deserialize;

const API_BASE: &str = "https://crates.io/api/v1/crates";

#[derive(Debug, Deserialize)]
struct CrateResponse {
    versions: Vec<CrateVersion>,
}

#[derive(Debug, Deserialize)]
struct CrateVersion {
    num: String,
}

/// Crates published on crates.io, installed by the hook runner as CLIs.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rust;

impl Ecosystem for Rust {
    fn key(&self) -> &str {
        "rust"
    }

    fn list_versions(&self, package_name: &str) -> Result<Vec<String>> {
        let url = http::build_url(API_BASE, &[package_name])
            .map_err(|e| lookup_error(self.key(), package_name, e))?;
        let response: CrateResponse =
            http::get_json(url.as_str()).map_err(|e| lookup_error(self.key(), package_name, e))?;
        Ok(versions_oldest_first(response))
    }

    fn additional_dependencies(&self, package_name: &str, version: &str) -> Option<Vec<String>> {
        Some(vec![format!("cli:{}:{}", package_name, version)])
    }
}

/// crates.io lists newest first.
fn versions_oldest_first(response: CrateResponse) -> Vec<String> {
    dedup_preserving_order(response.versions.into_iter().rev().map(|v| v.num).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_versions_are_reversed() {
        let response: CrateResponse = serde_json::from_str(
            r#"{
                "crate": {"name": "shellharden"},
                "versions": [
                    {"num": "4.1.0", "yanked": false},
                    {"num": "4.0.0", "yanked": false},
                    {"num": "3.1.0", "yanked": true}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(
            versions_oldest_first(response),
            vec!["3.1.0", "4.0.0", "4.1.0"]
        );
    }

    #[test]
    #[cfg_attr(not(feature = "integration-tests"), ignore)]
    fn test_list_versions_clap() {
        if std::env::var("SKIP_NETWORK_TESTS").is_ok() {
            return;
        }
        let versions = Rust.list_versions("clap").unwrap();
        assert!(versions.iter().any(|v| v == "2.33.0"));
    }
}
