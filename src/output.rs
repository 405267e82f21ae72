//! # Output Configuration
//!
//! Decides whether the run summary printed by `hook-mirror` uses colors and
//! emoji. `--color always` and `--color never` win outright. Under
//! `--color auto` the environment decides, in this order:
//!
//! - `NO_COLOR` set to anything (https://no-color.org/): plain
//! - `CLICOLOR=0`: plain
//! - `CLICOLOR_FORCE` set and not `0`: colored, even when not a TTY
//! - `TERM=dumb`: plain
//! - otherwise whatever the `console` crate detects for stdout

use std::env;

/// Output configuration for the run summary.
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Whether colors and emojis should be used in output.
    pub use_color: bool,
}

impl OutputConfig {
    /// Build from the `--color` flag value ("always", "never" or "auto").
    pub fn from_env_and_flag(color_flag: &str) -> Self {
        let use_color = match color_flag.to_ascii_lowercase().as_str() {
            "always" => true,
            "never" => false,
            _ => auto_color(|name| env::var_os(name).map(|v| v.to_string_lossy().into_owned())),
        };
        Self { use_color }
    }

    #[cfg(test)]
    pub fn with_color() -> Self {
        Self { use_color: true }
    }

    #[cfg(test)]
    pub fn without_color() -> Self {
        Self { use_color: false }
    }

    /// Style `text` as a version number when colors are enabled.
    pub fn version(&self, text: &str) -> String {
        if self.use_color {
            console::style(text).cyan().bold().force_styling(true).to_string()
        } else {
            text.to_string()
        }
    }
}

/// `--color auto`, reading the environment through `var`.
fn auto_color(var: impl Fn(&str) -> Option<String>) -> bool {
    if var("NO_COLOR").is_some() || var("CLICOLOR").as_deref() == Some("0") {
        return false;
    }
    if var("CLICOLOR_FORCE").is_some_and(|v| !v.is_empty() && v != "0") {
        return true;
    }
    if var("TERM").as_deref() == Some("dumb") {
        return false;
    }
    console::Term::stdout().features().colors_supported()
}

/// The emoji when colors are enabled, `plain` otherwise.
pub fn emoji<'a>(config: &OutputConfig, emoji_str: &'a str, plain: &'a str) -> &'a str {
    if config.use_color {
        emoji_str
    } else {
        plain
    }
}
