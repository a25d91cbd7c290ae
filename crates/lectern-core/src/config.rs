use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{LecternError, Result};

/// Top-level configuration for Lectern.
///
/// Loaded from `~/.lectern/config.toml` by default. Missing sections and
/// fields fall back to their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LecternConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
}

impl LecternConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: LecternConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| LecternError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Full path of the conversation history file.
    pub fn history_path(&self) -> PathBuf {
        self.general
            .resolved_data_dir()
            .join(&self.assistant.history_file)
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory holding the conversation history.
    pub data_dir: String,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "~/.lectern/data".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl GeneralConfig {
    /// `data_dir` with a leading `~` expanded to the home directory.
    pub fn resolved_data_dir(&self) -> PathBuf {
        expand_home(&self.data_dir)
    }
}

/// Research assistant behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Personality used for greetings: professional, friendly, expert.
    pub personality: String,
    /// A topic must score strictly above this to be used for a research answer.
    pub relevance_threshold: f32,
    /// Number of recent turns inspected when summarising conversation topics.
    pub context_turns: usize,
    /// Longer input is truncated before classification.
    pub max_message_chars: usize,
    /// Lower bound of the cosmetic "thinking" delay.
    pub thinking_delay_min_ms: u64,
    /// Upper bound of the cosmetic "thinking" delay.
    pub thinking_delay_max_ms: u64,
    /// Persist the conversation log between runs.
    pub persist_history: bool,
    /// File name of the history, relative to `general.data_dir`.
    pub history_file: String,
    /// Optional TOML file replacing the built-in knowledge base.
    pub knowledge_base_path: Option<String>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            personality: "friendly".to_string(),
            relevance_threshold: 0.3,
            context_turns: 5,
            max_message_chars: 2000,
            thinking_delay_min_ms: 1000,
            thinking_delay_max_ms: 3000,
            persist_history: true,
            history_file: "conversation_history.json".to_string(),
            knowledge_base_path: None,
        }
    }
}

/// Expand `~/` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/").or_else(|| path.strip_prefix("~\\")) {
        #[cfg(target_os = "windows")]
        let home = std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string());
        #[cfg(not(target_os = "windows"))]
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
        PathBuf::from(home).join(rest)
    } else {
        PathBuf::from(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn create_temp_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_config_default_values() {
        let config = LecternConfig::default();

        assert_eq!(config.general.data_dir, "~/.lectern/data");
        assert_eq!(config.general.log_level, "info");

        assert_eq!(config.assistant.personality, "friendly");
        assert!((config.assistant.relevance_threshold - 0.3).abs() < f32::EPSILON);
        assert_eq!(config.assistant.context_turns, 5);
        assert_eq!(config.assistant.max_message_chars, 2000);
        assert_eq!(config.assistant.thinking_delay_min_ms, 1000);
        assert_eq!(config.assistant.thinking_delay_max_ms, 3000);
        assert!(config.assistant.persist_history);
        assert_eq!(config.assistant.history_file, "conversation_history.json");
        assert!(config.assistant.knowledge_base_path.is_none());
    }

    #[test]
    fn test_config_load_partial_file() {
        let content = r#"
[assistant]
personality = "expert"
relevance_threshold = 0.5
"#;
        let file = create_temp_config(content);
        let config = LecternConfig::load(file.path()).unwrap();

        assert_eq!(config.assistant.personality, "expert");
        assert!((config.assistant.relevance_threshold - 0.5).abs() < f32::EPSILON);
        // Untouched fields keep defaults
        assert_eq!(config.assistant.context_turns, 5);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_config_empty_toml_uses_all_defaults() {
        let file = create_temp_config("");
        let config = LecternConfig::load(file.path()).unwrap();
        assert_eq!(config.general.data_dir, "~/.lectern/data");
        assert_eq!(config.assistant.personality, "friendly");
    }

    #[test]
    fn test_config_load_invalid_toml() {
        let file = create_temp_config("this is {{ not valid TOML");
        let result = LecternConfig::load(file.path());
        assert!(matches!(result, Err(LecternError::Config(_))));
    }

    #[test]
    fn test_config_load_or_default_missing_file() {
        let config = LecternConfig::load_or_default(Path::new("/does/not/exist/config.toml"));
        assert_eq!(config.assistant.personality, "friendly");
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn test_config_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("dir").join("config.toml");

        let mut config = LecternConfig::default();
        config.assistant.knowledge_base_path = Some("/srv/topics.toml".to_string());
        config.save(&path).unwrap();

        assert!(path.exists());
        let reloaded = LecternConfig::load(&path).unwrap();
        assert_eq!(
            reloaded.assistant.knowledge_base_path.as_deref(),
            Some("/srv/topics.toml")
        );
    }

    #[test]
    fn test_history_path_joins_data_dir() {
        let mut config = LecternConfig::default();
        config.general.data_dir = "/var/lib/lectern".to_string();
        assert_eq!(
            config.history_path(),
            PathBuf::from("/var/lib/lectern/conversation_history.json")
        );
    }

    #[test]
    fn test_expand_home_leaves_absolute_paths() {
        assert_eq!(expand_home("/tmp/data"), PathBuf::from("/tmp/data"));
        assert_eq!(expand_home("relative/dir"), PathBuf::from("relative/dir"));
    }

    #[test]
    fn test_expand_home_replaces_tilde() {
        let expanded = expand_home("~/.lectern/data");
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.ends_with(".lectern/data"));
    }
}
