//! # Template Rendering
//!
//! Scaffold files for a mirror repository are plain text with `${name}`
//! placeholders. This module loads those files into an in-memory
//! [`TemplateSet`] and renders them into the target repository with a
//! [`TemplateVars`] mapping.
//!
//! ## Sources
//!
//! Templates come either from the set compiled into the binary
//! ([`TemplateSource::Builtin`]) or from a directory on disk
//! ([`TemplateSource::Directory`]) laid out as:
//!
//! ```text
//! <root>/all/...          rendered for every ecosystem
//! <root>/<ecosystem>/...  rendered after `all`, replacing files of the same name
//! ```
//!
//! Only top-level regular files of each set are used; subdirectories are
//! skipped.
//!
//! ## Placeholders
//!
//! `${name}` is replaced by the value of `name`. A placeholder without a
//! value is an error rather than an empty string. `$${` produces a literal
//! `${`.

use crate::error::{Error, Result};
use log::debug;
use regex::Regex;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// `$${` escape, or a `${name}` placeholder capturing `name`.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\$\{|\$\{([^}]*)\}").expect("constant regex pattern is valid")
});

/// Built-in templates, keyed by set name then file name.
const BUILTIN_TEMPLATES: &[(&str, &str, &str)] = &[
    (
        "all",
        ".pre-commit-hooks.yaml",
        include_str!("../templates/all/.pre-commit-hooks.yaml"),
    ),
    ("all", ".version", include_str!("../templates/all/.version")),
    (
        "docker_image",
        ".pre-commit-hooks.yaml",
        include_str!("../templates/docker_image/.pre-commit-hooks.yaml"),
    ),
    ("golang", "go.mod", include_str!("../templates/golang/go.mod")),
    (
        "node",
        "package.json",
        include_str!("../templates/node/package.json"),
    ),
    ("python", "setup.py", include_str!("../templates/python/setup.py")),
    (
        "ruby",
        "pre_commit_placeholder_package.gemspec",
        include_str!("../templates/ruby/pre_commit_placeholder_package.gemspec"),
    ),
    ("rust", "Cargo.toml", include_str!("../templates/rust/Cargo.toml")),
    ("rust", "main.rs", include_str!("../templates/rust/main.rs")),
];

/// Variable name to value mapping used to fill placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateVars {
    vars: BTreeMap<String, String>,
}

impl TemplateVars {
    /// Create an empty variable set
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, replacing any previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Look up a variable
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    /// Number of variables
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Whether no variable is set
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Replace every `${name}` in `text` with its value from `vars`.
pub fn render(text: &str, vars: &TemplateVars) -> Result<String> {
    let mut output = String::with_capacity(text.len());
    let mut last = 0;

    for caps in PLACEHOLDER.captures_iter(text) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        output.push_str(&text[last..whole.start()]);
        last = whole.end();

        match caps.get(1) {
            // `$${` escape
            None => output.push_str("${"),
            Some(name) => {
                let name = name.as_str().trim();
                let value = vars.get(name).ok_or_else(|| Error::Template {
                    message: "No value supplied for placeholder".to_string(),
                    variable: Some(name.to_string()),
                })?;
                output.push_str(value);
            }
        }
    }

    output.push_str(&text[last..]);
    Ok(output)
}

/// A flat collection of template files, file name to contents.
#[derive(Debug, Clone, Default)]
pub struct TemplateSet {
    files: BTreeMap<String, String>,
}

impl TemplateSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file
    pub fn add_file(&mut self, name: impl Into<String>, contents: impl Into<String>) {
        self.files.insert(name.into(), contents.into());
    }

    /// Get a file's contents by name
    pub fn get_file(&self, name: &str) -> Option<&str> {
        self.files.get(name).map(String::as_str)
    }

    /// File names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    /// Number of files
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the set has no files
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// The compiled-in templates for `set_name`; empty when none exist.
    pub fn builtin(set_name: &str) -> Self {
        let mut set = Self::new();
        for (set_key, name, contents) in BUILTIN_TEMPLATES {
            if *set_key == set_name {
                set.add_file(*name, *contents);
            }
        }
        set
    }

    /// Load the top-level regular files of `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self> {
        let mut set = Self::new();

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();

            // Flat layout: nested directories are not templates
            if !path.is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            let contents = fs::read_to_string(&path)?;
            set.add_file(name, contents);
        }

        Ok(set)
    }

    /// Render every file in memory, skipping the names in `ignored`.
    ///
    /// Returns `(name, rendered)` pairs in name order. Nothing is written, so
    /// a failure leaves the destination untouched.
    pub fn render_all(
        &self,
        vars: &TemplateVars,
        ignored: &[&str],
    ) -> Result<Vec<(String, String)>> {
        let mut rendered = Vec::with_capacity(self.files.len());

        for (name, contents) in &self.files {
            if ignored.contains(&name.as_str()) {
                debug!("Skipping template {}", name);
                continue;
            }

            let text = render(contents, vars).map_err(|e| match e {
                Error::Template { message, variable } => Error::Template {
                    message: format!("{} in {}", message, name),
                    variable,
                },
                other => other,
            })?;
            rendered.push((name.clone(), text));
        }

        Ok(rendered)
    }
}

/// Where template sets are loaded from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TemplateSource {
    /// Templates compiled into the binary
    #[default]
    Builtin,
    /// A directory holding one subdirectory per template set
    Directory(PathBuf),
}

impl TemplateSource {
    /// Load one named template set.
    ///
    /// A set with no files (no built-ins, or no subdirectory on disk) loads
    /// as an empty set. A template directory that does not exist at all is
    /// an error.
    pub fn load(&self, set_name: &str) -> Result<TemplateSet> {
        match self {
            TemplateSource::Builtin => Ok(TemplateSet::builtin(set_name)),
            TemplateSource::Directory(root) => {
                if !root.is_dir() {
                    return Err(Error::Template {
                        message: format!("Template directory not found: {}", root.display()),
                        variable: None,
                    });
                }

                let dir = root.join(set_name);
                if dir.is_dir() {
                    TemplateSet::from_dir(&dir)
                } else {
                    debug!("No template set at {}", dir.display());
                    Ok(TemplateSet::new())
                }
            }
        }
    }
}
