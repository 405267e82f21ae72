//! Go modules, listed through the module proxy.
//!
//! The package name is a package import path, which may be longer than the
//! module path that owns it (`mvdan.cc/sh/v3/cmd/shfmt` lives in module
//! `mvdan.cc/sh/v3`). The proxy is asked for successively shorter prefixes
//! until one is not a 404, as `go` itself resolves packages.

use super::http::{self, HttpError};
use super::{dedup_preserving_order, lookup_error, Ecosystem};
use crate::error::Result;
use log::{debug, warn};
use semver::Version;

const PROXY_BASE: &str = "https://proxy.golang.org";

/// Go packages installed with `go install`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Golang;

impl Ecosystem for Golang {
    fn key(&self) -> &str {
        "golang"
    }

    fn list_versions(&self, package_name: &str) -> Result<Vec<String>> {
        let mut path = escape_module_path(package_name);

        while !path.is_empty() {
            let url = format!("{}/{}/@v/list", PROXY_BASE, path);
            match http::get_text(&url) {
                Ok(body) => return Ok(sort_versions(&body)),
                Err(HttpError::NotFound { .. }) => {
                    debug!("No module at {}, trying parent path", path);
                    path = parent_path(&path).to_string();
                }
                Err(e) => return Err(lookup_error(self.key(), package_name, e)),
            }
        }

        Err(lookup_error(
            self.key(),
            package_name,
            format!("Cannot find package name {} on proxy.golang.org", package_name),
        ))
    }

    fn additional_dependencies(&self, package_name: &str, version: &str) -> Option<Vec<String>> {
        Some(vec![format!("{}@v{}", package_name, version)])
    }
}

/// Module proxy case encoding: every upper-case letter becomes `!` followed by
/// its lower-case form.
pub(crate) fn escape_module_path(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len());
    for c in path.chars() {
        if c.is_ascii_uppercase() {
            escaped.push('!');
            escaped.push(c.to_ascii_lowercase());
        } else {
            escaped.push(c);
        }
    }
    escaped
}

fn parent_path(path: &str) -> &str {
    path.rfind('/').map_or("", |idx| &path[..idx])
}

/// Parse a `@v/list` body into versions without the `v` prefix, oldest first.
fn sort_versions(body: &str) -> Vec<String> {
    let mut versions: Vec<(Version, String)> = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let stripped = line.strip_prefix('v').unwrap_or(line);
            match Version::parse(stripped) {
                Ok(version) => Some((version, stripped.to_string())),
                Err(e) => {
                    warn!("Skipping unparsable module version {}: {}", line, e);
                    None
                }
            }
        })
        .collect();

    versions.sort_by(|(a, _), (b, _)| a.cmp(b));
    dedup_preserving_order(versions.into_iter().map(|(_, v)| v).collect())
}
