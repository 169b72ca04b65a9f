//! Chat configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use valence_core::DialogueConfig;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub dialogue: DialogueConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Language of the template set
    #[serde(default = "default_lang")]
    pub lang: String,

    /// Directory holding `<lang>/verbalisations.txt`
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Directory transcripts are written under, per language
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            lang: default_lang(),
            static_dir: default_static_dir(),
            data_dir: default_data_dir(),
        }
    }
}

impl ChatConfig {
    /// Template file for the configured language.
    pub fn templates_path(&self) -> PathBuf {
        self.static_dir.join(&self.lang).join("verbalisations.txt")
    }

    /// Transcript directory for the configured language.
    pub fn transcript_dir(&self) -> PathBuf {
        self.data_dir.join(&self.lang)
    }
}

impl Config {
    /// Load from a TOML file, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(toml::from_str(&content)?)
        } else {
            tracing::info!(path = %path.display(), "Config file not found, using defaults");
            Ok(Self::default())
        }
    }
}

// Defaults
fn default_lang() -> String { "en".to_string() }
fn default_static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static")
}
fn default_data_dir() -> PathBuf { PathBuf::from("data") }

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.chat.lang, "en");
        assert!(config
            .chat
            .templates_path()
            .ends_with("static/en/verbalisations.txt"));
        assert_eq!(config.chat.transcript_dir(), PathBuf::from("data/en"));
        assert_eq!(config.dialogue.max_goal_attempts, 10);
    }

    #[test]
    fn test_load_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[chat]\nlang = \"nl\"\n\n[dialogue]\nseed = 9\ndisallow_repeats = false\n"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.chat.lang, "nl");
        assert_eq!(config.chat.data_dir, PathBuf::from("data"));
        assert_eq!(config.dialogue.seed, Some(9));
        assert!(!config.dialogue.disallow_repeats);
        assert_eq!(config.dialogue.end_sentinel, "q");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load(Path::new("/nonexistent/valence-chat.toml")).unwrap();
        assert_eq!(config.chat.lang, "en");
    }
}
