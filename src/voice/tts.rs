//! Text-to-speech (TTS) via Gemini

use async_trait::async_trait;

use crate::Result;
use crate::config::GeminiConfig;
use crate::game::Language;
use crate::gemini::{GeminiClient, GenerateRequest};

/// Remote speech generation
///
/// Returns raw 16-bit little-endian mono PCM at 24 kHz. Callers treat every
/// error as a soft failure.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Synthesize `text` spoken in `language`
    async fn synthesize(&self, text: &str, language: Language) -> Result<Vec<u8>>;
}

/// Synthesizes speech with a Gemini TTS model
#[derive(Debug, Clone)]
pub struct GeminiTts {
    client: GeminiClient,
    model: String,
    voice: String,
    temperature: f32,
}

impl GeminiTts {
    /// Create a synthesizer sharing `client`
    #[must_use]
    pub fn new(client: GeminiClient, config: &GeminiConfig) -> Self {
        Self {
            client,
            model: config.tts_model.clone(),
            voice: config.voice.clone(),
            temperature: config.temperature,
        }
    }

    /// Configured model identifier
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Wrap the phrase in an imperative so the model reads it out plainly
#[must_use]
pub fn speech_prompt(text: &str, language: Language) -> String {
    match language {
        Language::It => format!("Dì chiaramente: {text}"),
        Language::En => format!("Say clearly: {text}"),
    }
}

#[async_trait]
impl SpeechSynthesizer for GeminiTts {
    async fn synthesize(&self, text: &str, language: Language) -> Result<Vec<u8>> {
        let prompt = speech_prompt(text, language);
        let request = GenerateRequest::speech(&prompt, &self.voice, self.temperature);

        let response = self.client.generate(&self.model, &request).await?;
        let audio = response.audio()?;

        tracing::debug!(
            text,
            language = %language,
            bytes = audio.len(),
            "synthesized speech"
        );
        Ok(audio)
    }
}
