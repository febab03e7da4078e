//! Voice module
//!
//! Cached speech narration: a memory tier of decoded buffers over a
//! persistent tier of raw PCM, filled from Gemini TTS, with the system speech
//! command as fallback. Also hosts the procedural sound cues.

mod cache;
mod cues;
mod key;
mod narrator;
mod pcm;
mod playback;
mod settings;
mod store;
mod tts;

pub use cache::{AudioCache, PreloadOutcome, SpeakOutcome, WarmUpReport};
pub use cues::Cue;
pub use key::CacheKey;
pub use narrator::{Narrator, SystemNarrator};
pub use pcm::{AudioBuffer, SAMPLE_RATE, decode_pcm16};
pub use playback::{AudioPlayback, AudioSink};
pub use settings::AudioSettings;
pub use store::AudioStore;
pub use tts::{GeminiTts, SpeechSynthesizer, speech_prompt};
