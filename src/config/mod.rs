//! Configuration management for Giratempo
//!
//! Precedence is env > toml > default for every setting.

pub mod file;

use std::path::PathBuf;

use secrecy::SecretString;

use crate::game::Language;
use file::GiratempoConfigFile;

/// Default Gemini REST endpoint
pub const DEFAULT_GEMINI_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default speech model
pub const DEFAULT_TTS_MODEL: &str = "gemini-2.5-flash-preview-tts";

/// Default text model for rhymes
pub const DEFAULT_TEXT_MODEL: &str = "gemini-3-flash-preview";

/// Default prebuilt voice
pub const DEFAULT_VOICE: &str = "Erinome";

/// Default sampling temperature for speech
pub const DEFAULT_TEMPERATURE: f32 = 0.25;

/// Credential value some build setups inject when the key is unset
const CREDENTIAL_PLACEHOLDER: &str = "undefined";

/// Giratempo configuration
#[derive(Debug)]
pub struct Config {
    /// Directory holding the persistent audio store
    pub data_dir: PathBuf,

    /// Remote service configuration
    pub gemini: GeminiConfig,

    /// Audio behavior
    pub audio: AudioConfig,

    /// Default game language
    pub language: Language,
}

/// Gemini service configuration
#[derive(Debug)]
pub struct GeminiConfig {
    /// API key; `None` disables every remote call
    pub api_key: Option<SecretString>,

    /// REST base URL
    pub base_url: String,

    /// Speech model identifier
    pub tts_model: String,

    /// Text model identifier (rhymes)
    pub text_model: String,

    /// Prebuilt voice name
    pub voice: String,

    /// Sampling temperature for speech
    pub temperature: f32,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_GEMINI_URL.to_string(),
            tts_model: DEFAULT_TTS_MODEL.to_string(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            voice: DEFAULT_VOICE.to_string(),
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

/// Audio behavior
#[derive(Debug, Clone, Copy, Default)]
pub struct AudioConfig {
    /// Start muted
    pub muted: bool,

    /// Silence sound cues while muted (they play regardless by default)
    pub cues_honor_mute: bool,
}

impl Config {
    /// Load configuration from the environment and the config file
    #[must_use]
    pub fn load() -> Self {
        Self::from_sources(|key| std::env::var(key).ok(), file::load_config_file())
    }

    /// Build configuration from an environment lookup and a parsed file
    #[must_use]
    pub fn from_sources<F>(env: F, fc: GiratempoConfigFile) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = credential(env("GEMINI_API_KEY"))
            .or_else(|| credential(env("API_KEY")))
            .or_else(|| credential(fc.gemini.api_key));

        if api_key.is_none() {
            tracing::info!("no Gemini API key configured, using local speech and rhymes");
        }

        let gemini = GeminiConfig {
            api_key,
            base_url: env("GIRATEMPO_GEMINI_URL")
                .or(fc.gemini.base_url)
                .unwrap_or_else(|| DEFAULT_GEMINI_URL.to_string()),
            tts_model: env("GIRATEMPO_TTS_MODEL")
                .or(fc.gemini.tts_model)
                .unwrap_or_else(|| DEFAULT_TTS_MODEL.to_string()),
            text_model: env("GIRATEMPO_TEXT_MODEL")
                .or(fc.gemini.text_model)
                .unwrap_or_else(|| DEFAULT_TEXT_MODEL.to_string()),
            voice: env("GIRATEMPO_VOICE")
                .or(fc.gemini.voice)
                .unwrap_or_else(|| DEFAULT_VOICE.to_string()),
            temperature: fc.gemini.temperature.unwrap_or(DEFAULT_TEMPERATURE),
        };

        let language = env("GIRATEMPO_LANGUAGE")
            .or(fc.game.language)
            .and_then(|s| match s.parse() {
                Ok(language) => Some(language),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring configured language");
                    None
                }
            })
            .unwrap_or_default();

        let audio = AudioConfig {
            muted: fc.audio.muted.unwrap_or(false),
            cues_honor_mute: fc.audio.cues_honor_mute.unwrap_or(false),
        };

        let data_dir = env("GIRATEMPO_DATA_DIR")
            .or(fc.storage.data_dir)
            .map_or_else(default_data_dir, PathBuf::from);

        Self {
            data_dir,
            gemini,
            audio,
            language,
        }
    }

    /// Path of the persistent audio database
    #[must_use]
    pub fn audio_db_path(&self) -> PathBuf {
        self.data_dir.join(crate::db::AUDIO_DB_FILE)
    }
}

/// Treat empty and placeholder values as "no credential"
fn credential(value: Option<String>) -> Option<SecretString> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != CREDENTIAL_PLACEHOLDER)
        .map(SecretString::from)
}

/// Default data directory: `~/.local/share/giratempo` on Linux
fn default_data_dir() -> PathBuf {
    directories::BaseDirs::new().map_or_else(
        || PathBuf::from(".local/share/giratempo"),
        |d| d.data_dir().join("giratempo"),
    )
}
