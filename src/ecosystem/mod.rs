//! # Ecosystems
//!
//! An ecosystem is a package-hosting platform that can list every published
//! version of a package. Each one implements the [`Ecosystem`] trait and is
//! registered under its key in an [`EcosystemRegistry`], which the replay
//! engine consults by name at run time.
//!
//! ## Contract
//!
//! [`Ecosystem::list_versions`] returns every published version, oldest
//! first, without duplicates. The ordering is the ecosystem's own: semantic
//! for some, registry order or publish time for others. Callers never
//! re-sort.
//!
//! [`Ecosystem::additional_dependencies`] optionally expresses "install this
//! exact version" in the hook runner's dependency syntax for the ecosystem.
//!
//! ## Built-in Ecosystems
//!
//! | key            | source                                   |
//! |----------------|------------------------------------------|
//! | `docker_image` | Docker Hub tag listing (paginated)       |
//! | `golang`       | Go module proxy                          |
//! | `node`         | `npm view --json`                        |
//! | `python`       | PyPI JSON API                            |
//! | `ruby`         | RubyGems API                             |
//! | `rust`         | crates.io API                            |

mod docker;
mod golang;
pub(crate) mod http;
mod node;
mod python;
mod ruby;
mod rust;

pub use docker::DockerImage;
pub use golang::Golang;
pub use node::Node;
pub use python::Python;
pub use ruby::Ruby;
pub use rust::Rust;

use crate::error::{Error, Result};
use std::collections::{BTreeMap, HashSet};

/// Keys of the ecosystems registered by [`EcosystemRegistry::with_defaults`].
pub const BUILTIN_KEYS: &[&str] = &["docker_image", "golang", "node", "python", "ruby", "rust"];

/// A package registry that the mirror can replay versions from.
pub trait Ecosystem: Send + Sync {
    /// The key the ecosystem is registered under; also the hook `language`.
    fn key(&self) -> &str;

    /// Every published version of `package_name`, oldest first.
    fn list_versions(&self, package_name: &str) -> Result<Vec<String>>;

    /// Dependencies that pin the hook to `version`, if the ecosystem has them.
    fn additional_dependencies(&self, _package_name: &str, _version: &str) -> Option<Vec<String>> {
        None
    }
}

/// Ecosystems by key.
#[derive(Default)]
pub struct EcosystemRegistry {
    ecosystems: BTreeMap<String, Box<dyn Ecosystem>>,
}

impl EcosystemRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in ecosystem
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(DockerImage));
        registry.register(Box::new(Golang));
        registry.register(Box::new(Node));
        registry.register(Box::new(Python));
        registry.register(Box::new(Ruby));
        registry.register(Box::new(Rust));
        registry
    }

    /// Register an ecosystem under its key, replacing any previous entry.
    pub fn register(&mut self, ecosystem: Box<dyn Ecosystem>) {
        self.ecosystems.insert(ecosystem.key().to_string(), ecosystem);
    }

    /// Look up an ecosystem by key.
    pub fn get(&self, name: &str) -> Result<&dyn Ecosystem> {
        self.ecosystems
            .get(name)
            .map(|e| e.as_ref())
            .ok_or_else(|| Error::UnknownEcosystem {
                name: name.to_string(),
                available: self.keys().join(", "),
            })
    }

    /// Registered keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        self.ecosystems.keys().map(String::as_str).collect()
    }
}

/// Drop repeated versions, keeping the first occurrence.
pub(crate) fn dedup_preserving_order(versions: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    versions
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}

/// Build a [`Error::Lookup`] for `ecosystem`/`package`.
pub(crate) fn lookup_error(ecosystem: &str, package: &str, message: impl ToString) -> Error {
    Error::Lookup {
        ecosystem: ecosystem.to_string(),
        package: package.to_string(),
        message: message.to_string(),
    }
}
