//! Two-tier audio cache in front of remote speech generation
//!
//! Lookup order is memory → persistent store → remote synthesis. Every
//! boundary (store, network, device) degrades to the next tier instead of
//! failing; the caller only ever sees which path was taken.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use super::{
    AudioBuffer, AudioSettings, AudioSink, AudioStore, CacheKey, Cue, Narrator, SpeechSynthesizer,
    decode_pcm16,
};
use crate::game::Language;

/// Which tier satisfied a preload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloadOutcome {
    /// Already decoded in memory
    Memory,
    /// Decoded from the persistent store
    Persistent,
    /// Fetched remotely, persisted and decoded
    Fetched,
    /// Remote fetch failed or was skipped; nothing cached
    Unavailable,
}

/// What a call to [`AudioCache::speak`] did
#[derive(Debug)]
pub enum SpeakOutcome {
    /// Mute was on; nothing happened
    Muted,
    /// Cached audio was played to completion
    Played,
    /// The fallback narrator spoke the text
    Narrated {
        /// Background backfill started on a cache miss. Dropping it abandons
        /// interest without cancelling the fetch.
        backfill: Option<JoinHandle<PreloadOutcome>>,
    },
}

/// Totals from a bulk warm-up sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WarmUpReport {
    pub memory: usize,
    pub persistent: usize,
    pub fetched: usize,
    pub unavailable: usize,
}

impl WarmUpReport {
    fn record(&mut self, outcome: PreloadOutcome) {
        match outcome {
            PreloadOutcome::Memory => self.memory += 1,
            PreloadOutcome::Persistent => self.persistent += 1,
            PreloadOutcome::Fetched => self.fetched += 1,
            PreloadOutcome::Unavailable => self.unavailable += 1,
        }
    }

    /// Number of phrases now playable from cache
    #[must_use]
    pub const fn cached(&self) -> usize {
        self.memory + self.persistent + self.fetched
    }
}

struct Inner {
    memory: RwLock<HashMap<CacheKey, Arc<AudioBuffer>>>,
    store: Arc<dyn AudioStore>,
    synthesizer: Arc<dyn SpeechSynthesizer>,
    sink: Arc<dyn AudioSink>,
    narrator: Arc<dyn Narrator>,
    settings: AudioSettings,
}

/// Cached speech playback with narrator fallback
///
/// Cheap to clone; clones share both tiers.
#[derive(Clone)]
pub struct AudioCache {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for AudioCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AudioCache")
            .field("settings", &self.inner.settings)
            .finish_non_exhaustive()
    }
}

impl AudioCache {
    /// Assemble the cache from its collaborators
    #[must_use]
    pub fn new(
        store: Arc<dyn AudioStore>,
        synthesizer: Arc<dyn SpeechSynthesizer>,
        sink: Arc<dyn AudioSink>,
        narrator: Arc<dyn Narrator>,
        settings: AudioSettings,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                memory: RwLock::new(HashMap::new()),
                store,
                synthesizer,
                sink,
                narrator,
                settings,
            }),
        }
    }

    /// Shared audio settings (mute flag)
    #[must_use]
    pub fn settings(&self) -> &AudioSettings {
        &self.inner.settings
    }

    /// Decoded buffer held in the memory tier
    pub async fn cached(&self, key: &CacheKey) -> Option<Arc<AudioBuffer>> {
        self.inner.memory.read().await.get(key).cloned()
    }

    /// Number of decoded phrases in memory
    pub async fn memory_len(&self) -> usize {
        self.inner.memory.read().await.len()
    }

    async fn remember(&self, key: CacheKey, raw: &[u8]) -> Arc<AudioBuffer> {
        let buffer = Arc::new(decode_pcm16(raw));
        self.inner
            .memory
            .write()
            .await
            .insert(key, Arc::clone(&buffer));
        buffer
    }

    /// Memory tier, then persistent tier with decode-and-populate
    async fn lookup(&self, key: &CacheKey) -> Option<Arc<AudioBuffer>> {
        if let Some(buffer) = self.cached(key).await {
            return Some(buffer);
        }

        let raw = self.inner.store.get(key)?;
        tracing::trace!(key = %key, bytes = raw.len(), "audio restored from store");
        Some(self.remember(key.clone(), &raw).await)
    }

    /// Make `text` playable from both tiers
    ///
    /// Idempotent. Never fails: a remote failure leaves the caches untouched
    /// and the next call tries again from scratch.
    pub async fn preload(&self, text: &str, language: Language) -> PreloadOutcome {
        let key = CacheKey::new(text, language);

        if self.cached(&key).await.is_some() {
            return PreloadOutcome::Memory;
        }

        if let Some(raw) = self.inner.store.get(&key) {
            self.remember(key, &raw).await;
            return PreloadOutcome::Persistent;
        }

        match self.inner.synthesizer.synthesize(text, language).await {
            Ok(raw) => {
                self.inner.store.put(&key, &raw);
                let buffer = self.remember(key.clone(), &raw).await;
                tracing::debug!(key = %key, samples = buffer.len(), "audio fetched and cached");
                PreloadOutcome::Fetched
            }
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "audio generation failed");
                PreloadOutcome::Unavailable
            }
        }
    }

    /// Run [`Self::preload`] in the background
    #[must_use = "drop the handle to abandon the task"]
    pub fn spawn_preload(&self, text: &str, language: Language) -> JoinHandle<PreloadOutcome> {
        let cache = self.clone();
        let text = text.to_string();
        tokio::spawn(async move { cache.preload(&text, language).await })
    }

    /// Preload every phrase in turn
    pub async fn warm_up<'a, I>(&self, phrases: I) -> WarmUpReport
    where
        I: IntoIterator<Item = (&'a str, Language)>,
    {
        let mut report = WarmUpReport::default();
        for (text, language) in phrases {
            report.record(self.preload(text, language).await);
        }

        tracing::info!(
            memory = report.memory,
            persistent = report.persistent,
            fetched = report.fetched,
            unavailable = report.unavailable,
            "audio warm-up finished"
        );
        report
    }

    /// Speak `text`, from cache when possible
    ///
    /// Resolves after cached audio finishes playing. On a miss the narrator
    /// speaks right away and a backfill is started alongside it; neither
    /// waits for the other.
    pub async fn speak(&self, text: &str, language: Language) -> SpeakOutcome {
        if self.inner.settings.is_muted() {
            return SpeakOutcome::Muted;
        }

        let output_ready = match self.inner.sink.ensure_running().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "audio output unavailable");
                false
            }
        };

        let key = CacheKey::new(text, language);
        let buffer = self.lookup(&key).await;

        if let Some(buffer) = buffer.as_ref().filter(|_| output_ready) {
            match self.inner.sink.play(buffer).await {
                Ok(()) => return SpeakOutcome::Played,
                Err(e) => tracing::warn!(key = %key, error = %e, "cached playback failed"),
            }
        }

        let backfill = buffer.is_none().then(|| {
            tracing::debug!(key = %key, "cache miss, narrating while backfilling");
            self.spawn_preload(text, language)
        });
        self.inner.narrator.say(text, language);

        SpeakOutcome::Narrated { backfill }
    }

    /// Play a sound cue in the background
    ///
    /// Cues ignore mute unless the settings say otherwise.
    pub fn play_cue(&self, cue: Cue) -> Option<JoinHandle<()>> {
        if self.inner.settings.cues_silenced() {
            return None;
        }

        let sink = Arc::clone(&self.inner.sink);
        Some(tokio::spawn(async move {
            if let Err(e) = sink.ensure_running().await {
                tracing::debug!(error = %e, cue = ?cue, "skipping cue");
                return;
            }
            if let Err(e) = sink.play(&cue.buffer()).await {
                tracing::debug!(error = %e, cue = ?cue, "cue playback failed");
            }
        }))
    }
}
