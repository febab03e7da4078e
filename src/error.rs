//! Error types for Giratempo

use thiserror::Error;

/// Result type alias for Giratempo operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in Giratempo
///
/// Most of these never reach the game layer: the audio cache and the rhyme
/// generator log them and fall back to the next tier.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// No service credential configured; remote calls are skipped
    #[error("no Gemini API key configured")]
    MissingCredential,

    /// Audio device or playback error
    #[error("audio error: {0}")]
    Audio(String),

    /// Text-to-speech error
    #[error("TTS error: {0}")]
    Tts(String),

    /// Rhyme generation error
    #[error("rhyme error: {0}")]
    Rhyme(String),

    /// System speech command error
    #[error("narrator error: {0}")]
    Narrator(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Base64 payload error
    #[error("base64 error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Database error
    #[error("database error: {0}")]
    Database(String),

    /// `SQLite` error
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}
