//! Shared test utilities

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use giratempo::db::{self, AudioRepo};
use giratempo::voice::{AudioBuffer, AudioSink, AudioStore, Narrator, SpeechSynthesizer};
use giratempo::{AudioCache, AudioSettings, CacheKey, DbPool, Error, Language, Result, RhymeSource};

/// Set up an in-memory audio database
#[must_use]
pub fn setup_test_db() -> DbPool {
    db::init_memory().expect("failed to init test db")
}

/// Synthesizer returning fixed PCM, or failing, and counting calls
#[derive(Default)]
pub struct FakeSynth {
    calls: AtomicUsize,
    bytes: Option<Vec<u8>>,
    delay: Option<Duration>,
}

impl FakeSynth {
    /// Always succeeds with `bytes`
    pub fn returning(bytes: Vec<u8>) -> Self {
        Self {
            bytes: Some(bytes),
            ..Self::default()
        }
    }

    /// Always fails with a TTS error
    pub fn failing() -> Self {
        Self::default()
    }

    /// Waits before answering
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpeechSynthesizer for FakeSynth {
    async fn synthesize(&self, _text: &str, _language: Language) -> Result<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.bytes
            .clone()
            .ok_or_else(|| Error::Tts("synthesis unavailable".to_string()))
    }
}

/// Sink that records the length of every buffer it plays
#[derive(Default)]
pub struct RecordingSink {
    played: Mutex<Vec<usize>>,
    broken: bool,
    playback_fails: bool,
}

impl RecordingSink {
    /// Sink whose device never starts
    pub fn broken() -> Self {
        Self {
            broken: true,
            ..Self::default()
        }
    }

    /// Sink that starts but errors on every buffer
    pub fn failing_playback() -> Self {
        Self {
            playback_fails: true,
            ..Self::default()
        }
    }

    pub fn played(&self) -> Vec<usize> {
        self.played.lock().unwrap().clone()
    }
}

#[async_trait]
impl AudioSink for RecordingSink {
    async fn ensure_running(&self) -> Result<()> {
        if self.broken {
            return Err(Error::Audio("no output device".to_string()));
        }
        Ok(())
    }

    async fn play(&self, buffer: &AudioBuffer) -> Result<()> {
        if self.playback_fails {
            return Err(Error::Audio("stream stalled".to_string()));
        }
        self.played.lock().unwrap().push(buffer.len());
        Ok(())
    }
}

/// Narrator that records (text, locale) pairs
#[derive(Default)]
pub struct RecordingNarrator {
    spoken: Mutex<Vec<(String, String)>>,
}

impl RecordingNarrator {
    pub fn spoken(&self) -> Vec<(String, String)> {
        self.spoken.lock().unwrap().clone()
    }
}

impl Narrator for RecordingNarrator {
    fn say(&self, text: &str, language: Language) {
        self.spoken
            .lock()
            .unwrap()
            .push((text.to_string(), language.locale().to_string()));
    }
}

/// Store that loses every write and never finds anything
pub struct FailingStore;

impl AudioStore for FailingStore {
    fn get(&self, _key: &CacheKey) -> Option<Vec<u8>> {
        None
    }

    fn put(&self, _key: &CacheKey, _bytes: &[u8]) {}
}

/// Rhyme source with a canned answer
pub struct FixedRhymes(pub &'static str);

#[async_trait]
impl RhymeSource for FixedRhymes {
    async fn rhyme(&self, _label: &str, _language: Language) -> String {
        self.0.to_string()
    }
}

/// Cache wired to fakes, plus handles to inspect them
pub struct Harness {
    pub cache: AudioCache,
    pub repo: AudioRepo,
    pub synth: Arc<FakeSynth>,
    pub sink: Arc<RecordingSink>,
    pub narrator: Arc<RecordingNarrator>,
    pub settings: AudioSettings,
}

/// Build a cache over an in-memory SQLite store
pub fn build_cache(synth: FakeSynth) -> Harness {
    build_cache_with(synth, RecordingSink::default(), setup_test_db())
}

/// Build a cache over a given pool and sink
pub fn build_cache_with(synth: FakeSynth, sink: RecordingSink, pool: DbPool) -> Harness {
    let repo = AudioRepo::new(pool);
    let synth = Arc::new(synth);
    let sink = Arc::new(sink);
    let narrator = Arc::new(RecordingNarrator::default());
    let settings = AudioSettings::default();

    let cache = AudioCache::new(
        Arc::new(repo.clone()),
        synth.clone(),
        sink.clone(),
        narrator.clone(),
        settings.clone(),
    );

    Harness {
        cache,
        repo,
        synth,
        sink,
        narrator,
        settings,
    }
}

/// Eight bytes of PCM: four samples
pub fn pcm_bytes() -> Vec<u8> {
    vec![0x00, 0x40, 0x00, 0xC0, 0xFF, 0x7F, 0x00, 0x80]
}
