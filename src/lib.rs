//! Giratempo - spinning-wheel game for learning days and months
//!
//! This library provides the pieces behind the `giratempo` binary:
//! - Vocabulary catalog, wheel, neighbor quiz and game session
//! - Cached speech narration (memory + SQLite tiers over Gemini TTS)
//! - System speech fallback and procedural sound cues
//! - Rhyme rewards with a built-in rhyme table
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │              CLI  (play / speak / preload)           │
//! └────────────────────┬────────────────────────────────┘
//!                      │
//! ┌────────────────────▼────────────────────────────────┐
//! │   GameSession   │   AudioCache    │  RhymeGenerator  │
//! └────────┬────────┴───┬─────┬───────┴────────┬────────┘
//!          │            │     │                │
//!     memory tier   SQLite  Narrator     Gemini client
//!                    tier   (spd-say)    (TTS + text)
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod game;
pub mod gemini;
pub mod play;
pub mod rhyme;
pub mod setup;
pub mod voice;

use std::sync::Arc;

pub use config::Config;
pub use db::{DbConn, DbPool};
pub use error::{Error, Result};
pub use game::{GameDifficulty, GameItem, GameMode, GameSession, GameState, Language};
pub use gemini::GeminiClient;
pub use rhyme::{RhymeGenerator, RhymeSource};
pub use voice::{AudioCache, AudioSettings, CacheKey, Cue, PreloadOutcome, SpeakOutcome};

/// Everything the game needs, wired from configuration
#[derive(Debug, Clone)]
pub struct Services {
    pub audio: AudioCache,
    pub rhymes: Arc<RhymeGenerator>,
    pub settings: AudioSettings,
}

impl Services {
    /// Open the audio store and connect the audio and rhyme services
    ///
    /// # Errors
    ///
    /// Returns error only if not even an in-memory audio store can be created
    pub fn from_config(config: &Config) -> Result<Self> {
        let settings = AudioSettings::new(config.audio.muted, config.audio.cues_honor_mute);
        let client = GeminiClient::new(&config.gemini);

        let pool = match db::init(config.audio_db_path()) {
            Ok(pool) => pool,
            Err(e) => {
                tracing::warn!(
                    path = %config.audio_db_path().display(),
                    error = %e,
                    "audio store unavailable, caching in memory only"
                );
                db::init_memory()?
            }
        };
        let audio = AudioCache::new(
            Arc::new(db::AudioRepo::new(pool)),
            Arc::new(voice::GeminiTts::new(client.clone(), &config.gemini)),
            Arc::new(voice::AudioPlayback::new()),
            Arc::new(voice::SystemNarrator::new(settings.clone())),
            settings.clone(),
        );

        let rhymes = Arc::new(RhymeGenerator::new(client, config.gemini.text_model.clone()));

        Ok(Self {
            audio,
            rhymes,
            settings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::file::GiratempoConfigFile;

    #[tokio::test]
    async fn test_unusable_data_dir_falls_back_to_memory() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let data_dir = file.path().join("sub").display().to_string();

        let config = Config::from_sources(
            |key| (key == "GIRATEMPO_DATA_DIR").then(|| data_dir.clone()),
            GiratempoConfigFile::default(),
        );

        let services = Services::from_config(&config).unwrap();
        assert_eq!(
            services.audio.preload("Lunedì", Language::It).await,
            PreloadOutcome::Unavailable
        );
        assert_eq!(
            services.rhymes.rhyme("Lunedì", Language::It).await,
            rhyme::fallback_rhyme("Lunedì", Language::It)
        );
    }
}
