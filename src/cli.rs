//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use crate::commands;

/// Hook Mirror - Publish a package's versions as a pre-commit hook repository
#[derive(Parser, Debug)]
#[command(name = "hook-mirror")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    mirror: commands::mirror::MirrorArgs,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "info")]
    log_level: LevelFilter,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(self.log_level);
        commands::mirror::execute(self.mirror, &self.color)
    }
}

/// `RUST_LOG` refines the `--log-level` default.
fn init_logging(level: LevelFilter) {
    // Already initialized when called twice in one process
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    const REQUIRED: &[&str] = &[
        "hook-mirror",
        "repo",
        "--language",
        "python",
        "--package-name",
        "yapf",
    ];

    fn parse(extra: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(REQUIRED.iter().chain(extra).copied())
    }

    #[test]
    fn test_parse_minimal() {
        let cli = parse(&["--files-regex", r"\.py$"]).unwrap();
        assert_eq!(cli.color, "auto");
        assert_eq!(cli.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_match_selector_is_required() {
        let err = parse(&[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_match_selectors_are_mutually_exclusive() {
        let err = parse(&["--types", "c", "--types-or", "c++"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_unknown_language_rejected() {
        let err = Cli::try_parse_from([
            "hook-mirror",
            "repo",
            "--language",
            "cobol",
            "--package-name",
            "x",
            "--types",
            "c",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn test_log_level_parsed() {
        let cli = parse(&["--types", "python", "--log-level", "debug"]).unwrap();
        assert_eq!(cli.log_level, LevelFilter::Debug);

        let err = parse(&["--types", "python", "--log-level", "loud"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
    }
}
