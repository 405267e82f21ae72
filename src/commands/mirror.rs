//! # Mirror Command Implementation
//!
//! Builds the hook definition from the command line, then replays every
//! outstanding version of the package into the mirror repository.

use anyhow::Result;
use clap::builder::PossibleValuesParser;
use clap::{ArgGroup, Args};
use log::warn;
use std::path::PathBuf;

use hook_mirror::defaults::TEMPLATE_DIR_ENV;
use hook_mirror::ecosystem::{EcosystemRegistry, BUILTIN_KEYS};
use hook_mirror::error::Error;
use hook_mirror::hook::{split_by_commas, HookConfig, HookOptions, MatchSelector};
use hook_mirror::output::{emoji, OutputConfig};
use hook_mirror::replay::{exclude_pattern, Mirror, ReplayOptions};
use hook_mirror::template::TemplateSource;

/// Arguments for mirroring a package into a hook repository
#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("selector")
        .required(true)
        .args(["files_regex", "types", "types_or"]),
))]
pub struct MirrorArgs {
    /// Mirror repository, already initialized with `git init`
    #[arg(value_name = "REPO_PATH")]
    pub repo_path: PathBuf,

    /// Ecosystem the package is published in
    #[arg(
        long,
        visible_alias = "ecosystem",
        value_name = "LANGUAGE",
        value_parser = PossibleValuesParser::new(BUILTIN_KEYS.iter().copied())
    )]
    pub language: String,

    /// Package name as the ecosystem knows it
    #[arg(long, value_name = "NAME")]
    pub package_name: String,

    /// Regex of the files the hook runs on
    #[arg(long, value_name = "REGEX")]
    pub files_regex: Option<String>,

    /// File type the hook runs on
    #[arg(long, value_name = "TYPE")]
    pub types: Option<String>,

    /// File types the hook runs on, any may match (repeatable)
    #[arg(long, value_name = "TYPE")]
    pub types_or: Vec<String>,

    /// Hook description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Hook id (defaults to the entry)
    #[arg(long)]
    pub id: Option<String>,

    /// Hook entry point (defaults to the package name)
    #[arg(long)]
    pub entry: Option<String>,

    /// Comma separated hook arguments, `\,` for a literal comma
    #[arg(long, allow_hyphen_values = true)]
    pub args: Option<String>,

    /// Mark the hook as `require_serial`
    #[arg(long)]
    pub require_serial: bool,

    /// Apply only this version, leaving the mirror marker alone
    #[arg(long, value_name = "VERSION")]
    pub target_version: Option<String>,

    /// Skip versions whose whole version string matches this regex
    #[arg(long, value_name = "REGEX")]
    pub version_exclude: Option<String>,

    /// Directory holding `all/` and per-ecosystem template directories
    #[arg(long, value_name = "DIR", env = TEMPLATE_DIR_ENV)]
    pub template_dir: Option<PathBuf>,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl MirrorArgs {
    fn selector(&self) -> MatchSelector {
        if let Some(regex) = &self.files_regex {
            MatchSelector::Files(regex.clone())
        } else if let Some(tag) = &self.types {
            MatchSelector::Types(tag.clone())
        } else {
            MatchSelector::TypesOr(self.types_or.clone())
        }
    }

    fn hook_options(&self) -> HookOptions {
        HookOptions {
            package_name: self.package_name.clone(),
            language: self.language.clone(),
            description: self.description.clone(),
            id: self.id.clone(),
            entry: self.entry.clone(),
            selector: self.selector(),
            args: split_by_commas(self.args.as_deref()),
            require_serial: self.require_serial,
        }
    }

    fn replay_options(&self) -> Result<ReplayOptions> {
        let version_exclude = self
            .version_exclude
            .as_deref()
            .map(exclude_pattern)
            .transpose()?;
        Ok(ReplayOptions {
            target_version: self.target_version.clone(),
            version_exclude,
        })
    }

    fn template_source(&self) -> TemplateSource {
        match &self.template_dir {
            Some(dir) => TemplateSource::Directory(dir.clone()),
            None => TemplateSource::Builtin,
        }
    }
}

/// Execute the mirror command.
///
/// # Arguments
/// * `args` - The command arguments
/// * `color_flag` - The value of the global --color flag ("always", "never", or "auto")
pub fn execute(args: MirrorArgs, color_flag: &str) -> Result<()> {
    let out = OutputConfig::from_env_and_flag(color_flag);
    let hook = HookConfig::from_options(args.hook_options())?;
    let options = args.replay_options()?;

    let mirror = Mirror::new(EcosystemRegistry::with_defaults(), args.template_source());
    let applied = match mirror.apply(&args.repo_path, &hook, &options) {
        Ok(applied) => applied,
        Err(e @ Error::VcsCommand { .. }) => {
            warn!(
                "{} may hold uncommitted files from the failed version; \
                 reset it before running again",
                args.repo_path.display()
            );
            return Err(e.into());
        }
        Err(e) => return Err(e.into()),
    };

    if args.quiet {
        return Ok(());
    }

    match applied.last() {
        None => println!(
            "{} {} is already up to date",
            emoji(&out, "✨", "[OK]"),
            hook.package_name
        ),
        Some(latest) => println!(
            "{} Mirrored {} version(s) of {}, now at {}",
            emoji(&out, "✅", "[OK]"),
            applied.len(),
            hook.package_name,
            out.version(latest)
        ),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(repo_path: PathBuf) -> MirrorArgs {
        MirrorArgs {
            repo_path,
            language: "ruby".to_string(),
            package_name: "scss-lint".to_string(),
            files_regex: None,
            types: Some("scss".to_string()),
            types_or: Vec::new(),
            description: String::new(),
            id: None,
            entry: None,
            args: None,
            require_serial: false,
            target_version: None,
            version_exclude: None,
            template_dir: None,
            quiet: true,
        }
    }

    #[test]
    fn test_selector_from_flags() {
        let temp = TempDir::new().unwrap();
        let mut mirror_args = args(temp.path().to_path_buf());
        assert_eq!(mirror_args.selector(), MatchSelector::Types("scss".to_string()));

        mirror_args.types = None;
        mirror_args.types_or = vec!["c".to_string(), "c++".to_string()];
        assert_eq!(
            mirror_args.selector(),
            MatchSelector::TypesOr(vec!["c".to_string(), "c++".to_string()])
        );
    }

    #[test]
    fn test_args_are_split() {
        let temp = TempDir::new().unwrap();
        let mirror_args = MirrorArgs {
            args: Some(r"-i,--ignore=E265\,E501".to_string()),
            ..args(temp.path().to_path_buf())
        };
        assert_eq!(
            mirror_args.hook_options().args,
            vec!["-i", "--ignore=E265,E501"]
        );
    }

    #[test]
    fn test_execute_rejects_non_repository() {
        let temp = TempDir::new().unwrap();
        let err = execute(args(temp.path().to_path_buf()), "never").unwrap_err();
        assert!(err.to_string().contains("not a git repository"));
    }

    #[test]
    fn test_execute_rejects_hook_id_with_spaces() {
        let temp = TempDir::new().unwrap();
        let mirror_args = MirrorArgs {
            entry: Some("scss-lint --color".to_string()),
            ..args(temp.path().to_path_buf())
        };
        let err = execute(mirror_args, "never").unwrap_err();
        assert!(err
            .to_string()
            .starts_with("hook id should not contain spaces"));
    }

    #[test]
    fn test_execute_rejects_invalid_exclude_pattern() {
        let temp = TempDir::new().unwrap();
        let mirror_args = MirrorArgs {
            version_exclude: Some("(".to_string()),
            ..args(temp.path().to_path_buf())
        };
        assert!(execute(mirror_args, "never").is_err());
    }

    #[test]
    fn test_template_source() {
        let temp = TempDir::new().unwrap();
        let mirror_args = MirrorArgs {
            template_dir: Some(temp.path().join("templates")),
            ..args(temp.path().to_path_buf())
        };
        assert_eq!(
            mirror_args.template_source(),
            TemplateSource::Directory(temp.path().join("templates"))
        );
    }
}
