//! CLI argument definitions for the Lectern console.
//!
//! Priority resolution: CLI args > env vars > config file > defaults.

use clap::Parser;
use std::path::PathBuf;

/// Lectern: a research-portfolio assistant for the terminal.
#[derive(Parser, Debug)]
#[command(name = "lectern", version, about)]
pub struct CliArgs {
    /// Path to the configuration file.
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Directory holding the conversation history.
    #[arg(short = 'd', long = "data-dir")]
    pub data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short = 'l', long = "log-level")]
    pub log_level: Option<String>,

    /// Personality: professional, friendly, expert.
    #[arg(short = 'p', long = "personality")]
    pub personality: Option<String>,

    /// Reply immediately instead of simulating thinking time.
    #[arg(long = "no-delay")]
    pub no_delay: bool,

    /// Seed for reproducible response selection.
    #[arg(long = "seed")]
    pub seed: Option<u64>,

    /// Answer a single message and exit.
    #[arg(short = 'm', long = "message")]
    pub message: Option<String>,
}

impl CliArgs {
    /// Resolve the configuration file path.
    ///
    /// Priority: --config flag > LECTERN_CONFIG env var > ~/.lectern/config.toml.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(ref p) = self.config {
            return p.clone();
        }
        if let Ok(p) = std::env::var("LECTERN_CONFIG") {
            return PathBuf::from(p);
        }
        default_config_path()
    }

    /// Resolve the data directory path.
    ///
    /// Returns `None` if not overridden (use config value).
    pub fn resolve_data_dir(&self) -> Option<String> {
        self.data_dir
            .as_ref()
            .map(|p| p.to_string_lossy().to_string())
    }

    /// Resolve the log level.
    ///
    /// Returns `None` if not overridden.
    pub fn resolve_log_level(&self) -> Option<String> {
        self.log_level.clone()
    }

    /// Resolve the personality name.
    ///
    /// Priority: --personality flag > LECTERN_PERSONALITY env var > config file value.
    pub fn resolve_personality(&self) -> Option<String> {
        if let Some(ref p) = self.personality {
            return Some(p.clone());
        }
        std::env::var("LECTERN_PERSONALITY").ok()
    }
}

/// Default config file path for the current platform.
fn default_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    if let Ok(home) = std::env::var("USERPROFILE") {
        return PathBuf::from(home).join(".lectern").join("config.toml");
    }
    #[cfg(not(target_os = "windows"))]
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".lectern").join("config.toml");
    }
    PathBuf::from("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_flags() {
        let args = CliArgs::try_parse_from([
            "lectern",
            "--config",
            "/tmp/lectern.toml",
            "--data-dir",
            "/tmp/data",
            "--log-level",
            "debug",
            "--personality",
            "expert",
            "--no-delay",
            "--seed",
            "42",
            "--message",
            "hello",
        ])
        .unwrap();

        assert_eq!(args.resolve_config_path(), PathBuf::from("/tmp/lectern.toml"));
        assert_eq!(args.resolve_data_dir().as_deref(), Some("/tmp/data"));
        assert_eq!(args.resolve_log_level().as_deref(), Some("debug"));
        assert_eq!(args.resolve_personality().as_deref(), Some("expert"));
        assert!(args.no_delay);
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.message.as_deref(), Some("hello"));
    }

    #[test]
    fn test_defaults() {
        let args = CliArgs::try_parse_from(["lectern"]).unwrap();
        assert!(args.resolve_data_dir().is_none());
        assert!(args.resolve_log_level().is_none());
        assert!(!args.no_delay);
        assert!(args.seed.is_none());
        assert!(args.message.is_none());
    }

    #[test]
    fn test_invalid_seed_rejected() {
        assert!(CliArgs::try_parse_from(["lectern", "--seed", "abc"]).is_err());
    }
}
