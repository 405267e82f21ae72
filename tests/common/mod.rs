//! Shared test utilities for integration and E2E tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_git_repo();
//!     fixture.command().arg("--help").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::env;
use std::path::Path;
use std::process::Command;

use hook_mirror::ecosystem::Ecosystem;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    #[allow(unused_imports)]
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::should_skip_network_tests;
    #[allow(unused_imports)]
    pub use super::FixedVersions;
    pub use super::TestFixture;
}

/// Check if network tests should be skipped.
///
/// Returns `true` if the `SKIP_NETWORK_TESTS` environment variable is set.
#[allow(dead_code)]
pub fn should_skip_network_tests() -> bool {
    env::var("SKIP_NETWORK_TESTS").is_ok()
}

/// An ecosystem with a fixed version list, for replaying without a registry.
#[allow(dead_code)]
pub struct FixedVersions {
    pub key: &'static str,
    pub versions: Vec<&'static str>,
    pub pin_dependencies: bool,
}

#[allow(dead_code)]
impl FixedVersions {
    /// A `ruby` ecosystem listing `versions` oldest first.
    pub fn ruby(versions: &[&'static str]) -> Self {
        Self {
            key: "ruby",
            versions: versions.to_vec(),
            pin_dependencies: false,
        }
    }
}

impl Ecosystem for FixedVersions {
    fn key(&self) -> &str {
        self.key
    }

    fn list_versions(&self, _package_name: &str) -> hook_mirror::error::Result<Vec<String>> {
        Ok(self.versions.iter().map(|v| v.to_string()).collect())
    }

    fn additional_dependencies(&self, package_name: &str, version: &str) -> Option<Vec<String>> {
        self.pin_dependencies
            .then(|| vec![format!("{}@{}", package_name, version)])
    }
}

/// A test fixture that provides a temporary directory, optionally a git
/// repository ready to receive mirror commits.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Initialize a git repository with a local identity and signing off.
    pub fn with_git_repo(self) -> Self {
        self.git(&["init", "--quiet"]);
        self.git(&["config", "user.name", "Mirror Test"]);
        self.git(&["config", "user.email", "mirror@example.com"]);
        self.git(&["config", "commit.gpgsign", "false"]);
        self.git(&["config", "tag.gpgsign", "false"]);
        self
    }

    /// Add a file with the given path and content.
    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.temp_dir
            .child(path)
            .write_str(content)
            .expect("Failed to write file");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Create a child path in the temp directory.
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// Read a file from the fixture, trimmed.
    pub fn read(&self, path: &str) -> String {
        std::fs::read_to_string(self.path().join(path))
            .expect("Failed to read file")
            .trim()
            .to_string()
    }

    /// Run git in the fixture and return its trimmed stdout.
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .arg("-C")
            .arg(self.path())
            .args(args)
            .output()
            .expect("Failed to run git");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }

    /// Tags sorted by name.
    pub fn tags(&self) -> Vec<String> {
        self.git(&["tag", "-l"])
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Commit subjects, newest first.
    pub fn commit_subjects(&self) -> Vec<String> {
        self.git(&["log", "--format=%s"])
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[allow(dead_code)]
impl TestFixture {
    /// Create a `hook-mirror` command running in this fixture's directory.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("hook-mirror");
        cmd.current_dir(self.path());
        cmd.env_remove("HOOK_MIRROR_TEMPLATES");
        cmd
    }
}
