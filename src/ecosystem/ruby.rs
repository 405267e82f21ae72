//! RubyGems: `https://rubygems.org/api/v1/versions/<name>.json`.

use super::{dedup_preserving_order, http, lookup_error, Ecosystem};
use crate::error::Result;
use serde::Deserialize;

const API_BASE: &str = "https://rubygems.org/api/v1/versions";

#[derive(Debug, Deserialize)]
struct GemVersion {
    number: String,
}

/// Gems published on rubygems.org.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ruby;

impl Ecosystem for Ruby {
    fn key(&self) -> &str {
        "ruby"
    }

    fn list_versions(&self, package_name: &str) -> Result<Vec<String>> {
        let segment = format!("{}.json", package_name);
        let url = http::build_url(API_BASE, &[segment.as_str()])
            .map_err(|e| lookup_error(self.key(), package_name, e))?;
        let versions: Vec<GemVersion> =
            http::get_json(url.as_str()).map_err(|e| lookup_error(self.key(), package_name, e))?;
        Ok(versions_oldest_first(versions))
    }
}

/// The API lists newest first.
fn versions_oldest_first(versions: Vec<GemVersion>) -> Vec<String> {
    dedup_preserving_order(versions.into_iter().rev().map(|v| v.number).collect())
}
