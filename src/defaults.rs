//! Default values for hook-mirror.
//!
//! This module provides centralized constants used across the library and
//! the CLI, ensuring consistency and avoiding duplication.

/// File inside the mirror repository that records the last applied version.
pub const MARKER_FILE: &str = ".version";

/// Hook descriptor written by older mirror layouts. Removed on every commit.
pub const LEGACY_HOOKS_FILE: &str = "hooks.yaml";

/// Name of the template set rendered for every ecosystem.
pub const SHARED_TEMPLATE_SET: &str = "all";

/// Minimum pre-commit version when no newer feature is used.
pub const DEFAULT_MINIMUM_PRE_COMMIT_VERSION: &str = "0";

/// Minimum pre-commit version that understands `types_or`.
pub const TYPES_OR_MINIMUM_PRE_COMMIT_VERSION: &str = "2.9.2";

/// Environment variable that points at an on-disk template directory.
pub const TEMPLATE_DIR_ENV: &str = "HOOK_MIRROR_TEMPLATES";

/// Returns the `User-Agent` sent to package registries.
///
/// crates.io rejects requests that do not identify the client.
pub fn user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_identifies_crate() {
        let agent = user_agent();
        assert!(agent.starts_with("hook-mirror/"));
        assert!(agent.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_marker_is_hidden_file() {
        assert!(MARKER_FILE.starts_with('.'));
        assert_ne!(MARKER_FILE, LEGACY_HOOKS_FILE);
    }
}
