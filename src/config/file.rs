//! TOML configuration file loading
//!
//! Supports `~/.config/giratempo/config.toml` as a persistent config source.
//! All fields are optional; the file is a partial overlay on top of defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::Result;

/// Top-level TOML configuration file schema
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GiratempoConfigFile {
    /// Remote speech and rhyme generation
    #[serde(default)]
    pub gemini: GeminiFileConfig,

    /// Game defaults
    #[serde(default)]
    pub game: GameFileConfig,

    /// Audio behavior
    #[serde(default)]
    pub audio: AudioFileConfig,

    /// Storage locations
    #[serde(default)]
    pub storage: StorageFileConfig,
}

/// Gemini service configuration
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeminiFileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Speech model (e.g. "gemini-2.5-flash-preview-tts")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tts_model: Option<String>,
    /// Text model used for rhymes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_model: Option<String>,
    /// Prebuilt voice name (e.g. "Erinome")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voice: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Game defaults
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GameFileConfig {
    /// "IT" or "EN"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Audio behavior
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AudioFileConfig {
    /// Start muted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub muted: Option<bool>,
    /// Silence tick/spin/success/error cues while muted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cues_honor_mute: Option<bool>,
}

/// Storage locations
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct StorageFileConfig {
    /// Directory holding `audio.db`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
}

/// Load the TOML config file from the standard path
///
/// Returns `GiratempoConfigFile::default()` if the file doesn't exist or can't be parsed.
pub fn load_config_file() -> GiratempoConfigFile {
    let Some(path) = config_file_path() else {
        return GiratempoConfigFile::default();
    };

    if !path.exists() {
        return GiratempoConfigFile::default();
    }

    match std::fs::read_to_string(&path) {
        Ok(content) => match toml::from_str(&content) {
            Ok(config) => {
                tracing::info!(path = %path.display(), "loaded config file");
                config
            }
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "failed to parse config file, using defaults"
                );
                GiratempoConfigFile::default()
            }
        },
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "failed to read config file"
            );
            GiratempoConfigFile::default()
        }
    }
}

/// Serialize and write the config file, creating its directory
///
/// # Errors
///
/// Returns error if the directory or file cannot be written
pub fn write_config_file(path: &Path, config: &GiratempoConfigFile) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = toml::to_string_pretty(config)
        .map_err(|e| crate::Error::Config(format!("failed to serialize config: {e}")))?;
    std::fs::write(path, content)?;

    Ok(())
}

/// Return the config file path: `~/.config/giratempo/config.toml`
pub fn config_file_path() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|d| d.config_dir().join("giratempo").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_parses() {
        let config: GiratempoConfigFile = toml::from_str(
            r#"
            [gemini]
            voice = "Kore"

            [audio]
            cues_honor_mute = true
            "#,
        )
        .unwrap();

        assert_eq!(config.gemini.voice.as_deref(), Some("Kore"));
        assert!(config.gemini.api_key.is_none());
        assert_eq!(config.audio.cues_honor_mute, Some(true));
        assert!(config.game.language.is_none());
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("giratempo").join("config.toml");

        let mut config = GiratempoConfigFile::default();
        config.game.language = Some("EN".to_string());
        config.gemini.temperature = Some(0.3);
        write_config_file(&path, &config).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: GiratempoConfigFile = toml::from_str(&content).unwrap();
        assert_eq!(parsed.game.language.as_deref(), Some("EN"));
        assert_eq!(parsed.gemini.temperature, Some(0.3));
        assert!(!content.contains("api_key"));
    }
}
