//! Gemini `generateContent` client
//!
//! Shared by speech synthesis and rhyme generation. Every call short-circuits
//! with [`Error::MissingCredential`] before touching the network when no API
//! key is configured.

use std::sync::Arc;

use base64::Engine;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::config::GeminiConfig;
use crate::{Error, Result};

/// Thin REST client for the Gemini API
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: Option<Arc<SecretString>>,
    base_url: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("has_api_key", &self.api_key.is_some())
            .finish_non_exhaustive()
    }
}

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [TextPart<'a>; 1],
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_modalities: [&'static str; 1],
    temperature: f32,
    speech_config: SpeechConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SpeechConfig<'a> {
    voice_config: VoiceConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct VoiceConfig<'a> {
    prebuilt_voice_config: PrebuiltVoiceConfig<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PrebuiltVoiceConfig<'a> {
    voice_name: &'a str,
}

impl<'a> GenerateRequest<'a> {
    /// Plain text generation
    #[must_use]
    pub const fn text(prompt: &'a str) -> Self {
        Self {
            contents: [Content {
                parts: [TextPart { text: prompt }],
            }],
            generation_config: None,
        }
    }

    /// Audio generation with a prebuilt voice
    #[must_use]
    pub const fn speech(prompt: &'a str, voice: &'a str, temperature: f32) -> Self {
        Self {
            contents: [Content {
                parts: [TextPart { text: prompt }],
            }],
            generation_config: Some(GenerationConfig {
                response_modalities: ["AUDIO"],
                temperature,
                speech_config: SpeechConfig {
                    voice_config: VoiceConfig {
                        prebuilt_voice_config: PrebuiltVoiceConfig { voice_name: voice },
                    },
                },
            }),
        }
    }
}

/// Response body from `generateContent`
#[derive(Debug, Default, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[serde(default)]
    data: String,
}

impl GenerateResponse {
    /// Parse a raw response body
    ///
    /// # Errors
    ///
    /// Returns [`Error::Serialization`] if the body is not a valid response
    pub fn parse(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    fn parts(&self) -> impl Iterator<Item = &Part> {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .into_iter()
            .flat_map(|c| c.parts.iter())
    }

    /// Concatenated text of the first candidate, if any
    #[must_use]
    pub fn text(&self) -> Option<String> {
        let text: String = self.parts().filter_map(|p| p.text.as_deref()).collect();
        (!text.is_empty()).then_some(text)
    }

    /// Decoded inline audio payload of the first candidate
    ///
    /// # Errors
    ///
    /// Returns error if no audio part is present or it is not valid base64
    pub fn audio(&self) -> Result<Vec<u8>> {
        let data = self
            .parts()
            .filter_map(|p| p.inline_data.as_ref())
            .map(|d| d.data.as_str())
            .find(|d| !d.is_empty())
            .ok_or_else(|| Error::Tts("response carried no audio payload".to_string()))?;

        Ok(base64::engine::general_purpose::STANDARD.decode(data)?)
    }
}

impl GeminiClient {
    /// Create a client from configuration
    #[must_use]
    pub fn new(config: &GeminiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: config
                .api_key
                .as_ref()
                .map(|k| Arc::new(SecretString::from(k.expose_secret().to_owned()))),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Whether a credential is configured
    #[must_use]
    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    /// Call `generateContent` on a model
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingCredential`] without a network call when no key
    /// is configured, or an HTTP/TTS error if the request fails
    pub async fn generate(&self, model: &str, request: &GenerateRequest<'_>) -> Result<GenerateResponse> {
        let api_key = self.api_key.as_ref().ok_or(Error::MissingCredential)?;

        let url = format!("{}/models/{model}:generateContent", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key.expose_secret())
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Tts(format!("Gemini error {status}: {body}")));
        }

        let body = response.bytes().await?;
        GenerateResponse::parse(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speech_request_shape() {
        let request = GenerateRequest::speech("Say clearly: Monday", "Erinome", 0.25);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["contents"][0]["parts"][0]["text"], "Say clearly: Monday");
        let config = &json["generationConfig"];
        assert_eq!(config["responseModalities"][0], "AUDIO");
        assert_eq!(config["temperature"], 0.25);
        assert_eq!(
            config["speechConfig"]["voiceConfig"]["prebuiltVoiceConfig"]["voiceName"],
            "Erinome"
        );
    }

    #[test]
    fn test_text_request_has_no_generation_config() {
        let json = serde_json::to_value(GenerateRequest::text("hi")).unwrap();
        assert!(json.get("generationConfig").is_none());
    }

    #[test]
    fn test_audio_payload_extracted() {
        let response: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": {
                    "parts": [{ "inlineData": { "mimeType": "audio/L16;rate=24000", "data": "AAEAAg==" } }]
                }
            }]
        }))
        .unwrap();

        assert_eq!(response.audio().unwrap(), vec![0, 1, 0, 2]);
        assert!(response.text().is_none());
    }

    #[test]
    fn test_missing_audio_is_error() {
        let response: GenerateResponse =
            serde_json::from_value(serde_json::json!({ "candidates": [] })).unwrap();
        assert!(response.audio().is_err());

        let response: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "no audio here" }] } }]
        }))
        .unwrap();
        assert!(response.audio().is_err());
        assert_eq!(response.text().as_deref(), Some("no audio here"));
    }

    #[test]
    fn test_bad_base64_is_error() {
        let response: GenerateResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "inlineData": { "data": "!!not base64!!" } }] } }]
        }))
        .unwrap();
        assert!(matches!(response.audio(), Err(Error::Base64(_))));
    }

    #[test]
    fn test_malformed_body_is_serialization_error() {
        assert!(matches!(
            GenerateResponse::parse(b"<html>quota exceeded</html>"),
            Err(Error::Serialization(_))
        ));

        let response = GenerateResponse::parse(br#"{"candidates":[]}"#).unwrap();
        assert!(response.text().is_none());
    }

    #[tokio::test]
    async fn test_no_credential_short_circuits() {
        let config = GeminiConfig {
            // Unroutable: any attempted request would fail with an HTTP error instead
            base_url: "http://127.0.0.1:9".to_string(),
            ..GeminiConfig::default()
        };
        let client = GeminiClient::new(&config);

        assert!(!client.has_credential());
        let result = client.generate("any", &GenerateRequest::text("hi")).await;
        assert!(matches!(result, Err(Error::MissingCredential)));
    }
}
