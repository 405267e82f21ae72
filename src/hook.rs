//! # Hook Definition
//!
//! A mirror repository exposes one hook. This module turns the user's hook
//! options into a validated [`HookConfig`] and, for each version being
//! replayed, into the [`TemplateVars`] that fill the scaffold templates.
//!
//! Values that end up inside YAML (`description`, the `files` regex, `args`,
//! `additional_dependencies`) are emitted as JSON literals, which YAML reads
//! back unchanged.

use crate::defaults;
use crate::error::{Error, Result};
use crate::template::TemplateVars;

/// How the hook selects the files it runs on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchSelector {
    /// `files: <regex>`
    Files(String),
    /// `types: [<tag>]`, every tag must match
    Types(String),
    /// `types_or: [<tag>, ...]`, any tag may match
    TypesOr(Vec<String>),
}

impl MatchSelector {
    /// Key used in the hook descriptor
    pub fn key(&self) -> &'static str {
        match self {
            MatchSelector::Files(_) => "files",
            MatchSelector::Types(_) => "types",
            MatchSelector::TypesOr(_) => "types_or",
        }
    }

    /// Value as it is written into the hook descriptor
    pub fn value(&self) -> Result<String> {
        Ok(match self {
            MatchSelector::Files(regex) => serde_json::to_string(regex)?,
            MatchSelector::Types(tag) => format!("[{}]", tag),
            MatchSelector::TypesOr(tags) => format!("[{}]", tags.join(", ")),
        })
    }

    /// Oldest pre-commit release that understands this selector
    pub fn minimum_pre_commit_version(&self) -> &'static str {
        match self {
            MatchSelector::TypesOr(_) => defaults::TYPES_OR_MINIMUM_PRE_COMMIT_VERSION,
            _ => defaults::DEFAULT_MINIMUM_PRE_COMMIT_VERSION,
        }
    }
}

/// Hook options as the user gave them, before defaults are applied.
#[derive(Debug, Clone)]
pub struct HookOptions {
    pub package_name: String,
    pub language: String,
    pub description: String,
    pub id: Option<String>,
    pub entry: Option<String>,
    pub selector: MatchSelector,
    pub args: Vec<String>,
    pub require_serial: bool,
}

/// A validated hook definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HookConfig {
    pub package_name: String,
    pub language: String,
    pub description: String,
    pub id: String,
    pub entry: String,
    pub selector: MatchSelector,
    pub args: Vec<String>,
    pub require_serial: bool,
}

impl HookConfig {
    /// Apply defaults and validate.
    ///
    /// `entry` defaults to the package name and `id` to the entry. The
    /// resulting id must not contain whitespace.
    pub fn from_options(options: HookOptions) -> Result<Self> {
        let entry = options
            .entry
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| options.package_name.clone());
        let id = options
            .id
            .filter(|i| !i.is_empty())
            .unwrap_or_else(|| entry.clone());

        if id.chars().any(char::is_whitespace) {
            return Err(Error::Argument {
                message: format!(
                    "hook id should not contain spaces, perhaps specify --id?\n\n-   id: {}",
                    id
                ),
            });
        }

        Ok(Self {
            package_name: options.package_name,
            language: options.language,
            description: options.description,
            id,
            entry,
            selector: options.selector,
            args: options.args,
            require_serial: options.require_serial,
        })
    }

    /// Template variables for one version of the package.
    pub fn template_vars(
        &self,
        version: &str,
        additional_dependencies: &[String],
    ) -> Result<TemplateVars> {
        Ok(TemplateVars::new()
            .with("id", self.id.as_str())
            .with("name", self.package_name.as_str())
            .with("description", serde_json::to_string(&self.description)?)
            .with("entry", self.entry.as_str())
            .with("language", self.language.as_str())
            .with("match_key", self.selector.key())
            .with("match_val", self.selector.value()?)
            .with("args", serde_json::to_string(&self.args)?)
            .with("require_serial", self.require_serial.to_string())
            .with(
                "minimum_pre_commit_version",
                self.selector.minimum_pre_commit_version(),
            )
            .with(
                "additional_dependencies",
                serde_json::to_string(additional_dependencies)?,
            )
            .with("version", version))
    }
}

/// Split a comma separated list, honouring `\,` as a literal comma.
///
/// An absent or empty input yields no items.
pub fn split_by_commas(input: Option<&str>) -> Vec<String> {
    let Some(input) = input.filter(|s| !s.is_empty()) else {
        return Vec::new();
    };

    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&',') => {
                chars.next();
                current.push(',');
            }
            ',' => parts.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    parts.push(current);

    parts
}
