//! # Version Replay
//!
//! The replay engine brings a mirror repository up to date with its upstream
//! package, one commit and one tag per published version, oldest first.
//!
//! ## Process
//!
//! 1.  **Precondition**: the target must already be a git repository.
//!
//! 2.  **Version Listing**: the ecosystem registered under the hook's
//!     language lists every published version, oldest first.
//!
//! 3.  **Outstanding Versions**: what still needs applying.
//!     - An explicit target version is applied on its own and the mirror
//!       marker is left alone.
//!     - Otherwise, if the marker file exists, every version after the one it
//!       records.
//!     - Otherwise, every version.
//!
//! 4.  **Commit Step**, for each outstanding version in order: render the
//!     shared and ecosystem templates into the repository, drop the legacy
//!     `hooks.yaml`, then `git add .`, commit `Mirror: <version>` and tag
//!     `v<version>`.
//!
//! A failure at any point aborts the run. Versions committed before the
//! failure stay committed. The files of the version that failed, marker
//! included, are left uncommitted in the working tree; once the tree is reset
//! to `HEAD`, running again resumes where the failed run stopped.

use crate::defaults::{LEGACY_HOOKS_FILE, MARKER_FILE, SHARED_TEMPLATE_SET};
use crate::ecosystem::{Ecosystem, EcosystemRegistry};
use crate::error::{Error, Result};
use crate::git::{GitOperations, SystemGit};
use crate::hook::HookConfig;
use crate::template::{TemplateSet, TemplateSource};
use log::{debug, info};
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Per-run options that are not part of the hook definition.
#[derive(Debug, Clone, Default)]
pub struct ReplayOptions {
    /// Apply exactly this version and leave the marker untouched.
    pub target_version: Option<String>,
    /// Skip versions matching this pattern during incremental replay. See
    /// [`exclude_pattern`] for whole-version matching.
    pub version_exclude: Option<Regex>,
}

/// Read the mirror marker, `None` when the repository has none yet.
pub fn read_marker(repo: &Path) -> Result<Option<String>> {
    let path = repo.join(MARKER_FILE);
    if !path.exists() {
        return Ok(None);
    }
    Ok(Some(fs::read_to_string(path)?.trim().to_string()))
}

/// Compute the versions a run must apply, in order.
///
/// `all_versions` must already be oldest first.
pub fn outstanding_versions(
    package_name: &str,
    all_versions: &[String],
    marker: Option<&str>,
    options: &ReplayOptions,
) -> Result<Vec<String>> {
    if let Some(target) = &options.target_version {
        if !all_versions.contains(target) {
            return Err(Error::UnknownVersion {
                package: package_name.to_string(),
                version: target.clone(),
            });
        }
        return Ok(vec![target.clone()]);
    }

    let remaining = match marker {
        Some(previous) => {
            let index = all_versions
                .iter()
                .position(|v| v == previous)
                .ok_or_else(|| Error::MarkerNotFound {
                    package: package_name.to_string(),
                    version: previous.to_string(),
                })?;
            &all_versions[index + 1..]
        }
        None => all_versions,
    };

    Ok(remaining
        .iter()
        .filter(|v| match &options.version_exclude {
            Some(pattern) => !pattern.is_match(v),
            None => true,
        })
        .cloned()
        .collect())
}

/// Compile a version exclusion pattern that must match the whole version.
pub fn exclude_pattern(pattern: &str) -> Result<Regex> {
    Ok(Regex::new(&format!("^(?:{})$", pattern))?)
}

/// The replay engine.
pub struct Mirror {
    registry: EcosystemRegistry,
    templates: TemplateSource,
    git_ops: Box<dyn GitOperations>,
}

impl Mirror {
    /// Creates a `Mirror` that drives the system `git` binary.
    pub fn new(registry: EcosystemRegistry, templates: TemplateSource) -> Self {
        Self::with_git_operations(registry, templates, Box::new(SystemGit))
    }

    /// Creates a `Mirror` with a custom `GitOperations` implementation.
    pub fn with_git_operations(
        registry: EcosystemRegistry,
        templates: TemplateSource,
        git_ops: Box<dyn GitOperations>,
    ) -> Self {
        Self {
            registry,
            templates,
            git_ops,
        }
    }

    /// Bring `repo` up to date with `hook`'s package.
    ///
    /// Returns the versions committed by this run, oldest first.
    pub fn apply(
        &self,
        repo: &Path,
        hook: &HookConfig,
        options: &ReplayOptions,
    ) -> Result<Vec<String>> {
        self.git_ops.ensure_repository(repo)?;

        let ecosystem = self.registry.get(&hook.language)?;
        let all_versions = ecosystem.list_versions(&hook.package_name)?;
        debug!(
            "{} lists {} versions of {}",
            hook.language,
            all_versions.len(),
            hook.package_name
        );

        let marker = match options.target_version {
            Some(_) => None,
            None => read_marker(repo)?,
        };
        let outstanding =
            outstanding_versions(&hook.package_name, &all_versions, marker.as_deref(), options)?;
        debug!("Outstanding versions: {:?}", outstanding);

        if outstanding.is_empty() {
            info!("{} is up to date", hook.package_name);
            return Ok(outstanding);
        }

        let shared = self.templates.load(SHARED_TEMPLATE_SET)?;
        let specific = self.templates.load(&hook.language)?;
        let skip_marker = options.target_version.is_some();

        for (index, version) in outstanding.iter().enumerate() {
            info!(
                "Mirroring {} {} ({}/{})",
                hook.package_name,
                version,
                index + 1,
                outstanding.len()
            );
            self.commit_version(repo, hook, ecosystem, [&shared, &specific], version, skip_marker)?;
        }

        Ok(outstanding)
    }

    fn commit_version(
        &self,
        repo: &Path,
        hook: &HookConfig,
        ecosystem: &dyn Ecosystem,
        template_sets: [&TemplateSet; 2],
        version: &str,
        skip_marker: bool,
    ) -> Result<()> {
        let additional_dependencies = ecosystem
            .additional_dependencies(&hook.package_name, version)
            .unwrap_or_default();
        let vars = hook.template_vars(version, &additional_dependencies)?;

        let ignored: &[&str] = if skip_marker { &[MARKER_FILE] } else { &[] };
        let mut rendered = BTreeMap::new();
        for set in template_sets {
            // Later sets replace files of the same name
            rendered.extend(set.render_all(&vars, ignored)?);
        }
        write_rendered(repo, rendered)?;

        let legacy = repo.join(LEGACY_HOOKS_FILE);
        if legacy.exists() {
            debug!("Removing legacy {}", legacy.display());
            fs::remove_file(legacy)?;
        }

        self.git_ops.add_all(repo)?;
        self.git_ops.commit(repo, &format!("Mirror: {}", version))?;
        self.git_ops.tag(repo, &format!("v{}", version))?;
        Ok(())
    }
}

/// Write rendered files into `repo`, the marker last so that it never names
/// a version whose other files failed to land.
fn write_rendered(repo: &Path, mut rendered: BTreeMap<String, String>) -> Result<()> {
    let marker = rendered.remove(MARKER_FILE);
    for (name, contents) in &rendered {
        fs::write(repo.join(name), contents)?;
    }
    if let Some(contents) = marker {
        fs::write(repo.join(MARKER_FILE), contents)?;
    }
    Ok(())
}
