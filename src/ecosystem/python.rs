//! PyPI: `https://pypi.org/pypi/<name>/json`.
//!
//! The package name may be a full requirement (`bandit[yaml]`); only the
//! distribution name is used for the lookup. Release keys come back
//! unordered and are sorted by PEP 440 precedence.

use super::{dedup_preserving_order, http, lookup_error, Ecosystem};
use crate::error::Result;
use log::warn;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::BTreeMap;

const API_BASE: &str = "https://pypi.org/pypi";

const VERSION_PATTERN: &str = r"(?x)^
    v?
    (?:(?P<epoch>[0-9]+)!)?
    (?P<release>[0-9]+(?:\.[0-9]+)*)
    (?:[-_.]?(?P<pre_l>a|b|c|rc|alpha|beta|pre|preview)[-_.]?(?P<pre_n>[0-9]+)?)?
    (?:-(?P<post_n1>[0-9]+)|[-_.]?(?P<post_l>post|rev|r)[-_.]?(?P<post_n2>[0-9]+)?)?
    (?:[-_.]?(?P<dev_l>dev)[-_.]?(?P<dev_n>[0-9]+)?)?
    (?:\+(?P<local>[a-z0-9]+(?:[-_.][a-z0-9]+)*))?
$";

#[derive(Debug, Deserialize)]
struct ProjectResponse {
    releases: BTreeMap<String, Value>,
}

/// Distributions published on PyPI.
#[derive(Debug, Clone, Copy, Default)]
pub struct Python;

impl Ecosystem for Python {
    fn key(&self) -> &str {
        "python"
    }

    fn list_versions(&self, package_name: &str) -> Result<Vec<String>> {
        let name = distribution_name(package_name);
        let url = http::build_url(API_BASE, &[name, "json"])
            .map_err(|e| lookup_error(self.key(), package_name, e))?;
        let response: ProjectResponse =
            http::get_json(url.as_str()).map_err(|e| lookup_error(self.key(), package_name, e))?;
        sort_versions(response.releases.into_keys().collect())
    }
}

/// The distribution name of a requirement string.
///
/// `bandit[yaml]` and `flake8>=3; python_version>"3"` reduce to `bandit` and
/// `flake8`.
pub(crate) fn distribution_name(requirement: &str) -> &str {
    let requirement = requirement.trim();
    let end = requirement
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.')))
        .unwrap_or(requirement.len());
    &requirement[..end]
}

/// Pre-release position. Variant order is precedence order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Pre {
    /// `1.0.dev1` sorts before `1.0a1`
    DevOfFinal,
    Release(u8, u64),
    Final,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Pep440Key {
    epoch: u64,
    release: Vec<u64>,
    pre: Pre,
    post: Option<u64>,
    /// `(false, n)` for `.devN`, `(true, 0)` without a dev segment
    dev: (bool, u64),
    local: Option<String>,
}

fn parse_number(caps: &regex::Captures<'_>, name: &str) -> Option<Option<u64>> {
    match caps.name(name) {
        None => Some(None),
        Some(m) => m.as_str().parse().ok().map(Some),
    }
}

fn parse_key(pattern: &Regex, version: &str) -> Option<Pep440Key> {
    let lowered = version.trim().to_ascii_lowercase();
    let caps = pattern.captures(&lowered)?;

    let epoch = parse_number(&caps, "epoch")?.unwrap_or(0);

    let mut release = caps
        .name("release")?
        .as_str()
        .split('.')
        .map(|part| part.parse::<u64>().ok())
        .collect::<Option<Vec<_>>>()?;
    while release.len() > 1 && release.last() == Some(&0) {
        release.pop();
    }

    let pre_number = parse_number(&caps, "pre_n")?.unwrap_or(0);
    let pre_letter = caps.name("pre_l").map(|m| match m.as_str() {
        "a" | "alpha" => 0,
        "b" | "beta" => 1,
        _ => 2,
    });

    let post = match parse_number(&caps, "post_n1")? {
        Some(n) => Some(n),
        None if caps.name("post_l").is_some() => Some(parse_number(&caps, "post_n2")?.unwrap_or(0)),
        None => None,
    };

    let has_dev = caps.name("dev_l").is_some();
    let dev = if has_dev {
        (false, parse_number(&caps, "dev_n")?.unwrap_or(0))
    } else {
        (true, 0)
    };

    let pre = match pre_letter {
        Some(letter) => Pre::Release(letter, pre_number),
        None if post.is_none() && has_dev => Pre::DevOfFinal,
        None => Pre::Final,
    };

    Some(Pep440Key {
        epoch,
        release,
        pre,
        post,
        dev,
        local: caps.name("local").map(|m| m.as_str().to_string()),
    })
}

/// Sort versions by PEP 440 precedence, oldest first.
///
/// Versions that are not valid PEP 440 sort before every valid one, in their
/// original order.
pub(crate) fn sort_versions(versions: Vec<String>) -> Result<Vec<String>> {
    let pattern = Regex::new(VERSION_PATTERN)?;

    let mut keyed: Vec<(Option<Pep440Key>, String)> = versions
        .into_iter()
        .map(|v| {
            let key = parse_key(&pattern, &v);
            if key.is_none() {
                warn!("Not a PEP 440 version, sorting first: {}", v);
            }
            (key, v)
        })
        .collect();

    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    Ok(dedup_preserving_order(
        keyed.into_iter().map(|(_, v)| v).collect(),
    ))
}
