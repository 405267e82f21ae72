//! # Hook Mirror Library
//!
//! Maintains "mirror" repositories that publish a package from a language
//! ecosystem (rubygems, npm, PyPI, crates.io, the Go module proxy, Docker Hub)
//! as a pre-commit hook. Every published version of the package becomes one
//! commit and one `v<version>` tag in the mirror, oldest first.
//!
//! ## Quick Example
//!
//! ```
//! use hook_mirror::hook::{split_by_commas, HookConfig, HookOptions, MatchSelector};
//!
//! let hook = HookConfig::from_options(HookOptions {
//!     package_name: "scss-lint".to_string(),
//!     language: "ruby".to_string(),
//!     description: String::new(),
//!     id: None,
//!     entry: None,
//!     selector: MatchSelector::Files(r"\.scss$".to_string()),
//!     args: split_by_commas(Some(r"--format,json\,pretty")),
//!     require_serial: false,
//! })
//! .unwrap();
//!
//! assert_eq!(hook.id, "scss-lint");
//! assert_eq!(hook.args, vec!["--format", "json,pretty"]);
//! ```
//!
//! ## Core Concepts
//!
//! - **Ecosystems (`ecosystem`)**: one adapter per package registry, each
//!   listing a package's published versions oldest first.
//! - **Hook definition (`hook`)**: the user's hook options, validated and
//!   turned into template variables.
//! - **Templates (`template`)**: the scaffold files written into the mirror
//!   for each version, shared ones plus one set per ecosystem.
//! - **Replay (`replay`)**: works out which versions are missing from the
//!   mirror and commits and tags them one at a time.
//! - **Git (`git`)**: the `git` invocations the replay needs.

pub mod defaults;
pub mod ecosystem;
pub mod error;
pub mod git;
pub mod hook;
pub mod output;
pub mod replay;
pub mod template;
