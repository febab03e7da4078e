//! Audio playback to speakers

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleRate, StreamConfig};

use super::{AudioBuffer, SAMPLE_RATE};
use crate::{Error, Result};

/// Output side of the audio subsystem
#[async_trait]
pub trait AudioSink: Send + Sync {
    /// Make sure the output is ready to play, opening it if needed
    async fn ensure_running(&self) -> Result<()>;

    /// Play a buffer, resolving once playback has finished
    async fn play(&self, buffer: &AudioBuffer) -> Result<()>;
}

/// Plays audio to the default output device
///
/// The device is opened lazily by [`AudioSink::ensure_running`], so a
/// machine without speakers can still construct one and fall back to the
/// narrator.
#[derive(Debug, Default)]
pub struct AudioPlayback {
    config: Mutex<Option<StreamConfig>>,
}

impl AudioPlayback {
    /// Create a new audio playback instance
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn stream_config(&self) -> Result<StreamConfig> {
        let mut guard = self
            .config
            .lock()
            .map_err(|_| Error::Audio("playback state poisoned".to_string()))?;

        if let Some(config) = guard.as_ref() {
            return Ok(config.clone());
        }

        let config = open_output_config()?;
        *guard = Some(config.clone());
        Ok(config)
    }
}

/// Find an output config at the speech sample rate, preferring mono
fn open_output_config() -> Result<StreamConfig> {
    let host = cpal::default_host();

    let device = host
        .default_output_device()
        .ok_or_else(|| Error::Audio("no output device available".to_string()))?;

    let rate = SampleRate(SAMPLE_RATE);
    let supports = |channels: u16| {
        device.supported_output_configs().ok().and_then(|mut configs| {
            configs.find(|c| {
                c.channels() == channels && c.min_sample_rate() <= rate && c.max_sample_rate() >= rate
            })
        })
    };

    let supported = supports(1)
        .or_else(|| supports(2))
        .ok_or_else(|| Error::Audio("no suitable output config found".to_string()))?;

    let config = supported.with_sample_rate(rate).config();

    tracing::debug!(
        device = device.name().unwrap_or_default(),
        sample_rate = SAMPLE_RATE,
        channels = config.channels,
        "audio playback initialized"
    );

    Ok(config)
}

#[async_trait]
impl AudioSink for AudioPlayback {
    async fn ensure_running(&self) -> Result<()> {
        self.stream_config().map(|_| ())
    }

    async fn play(&self, buffer: &AudioBuffer) -> Result<()> {
        if buffer.is_empty() {
            return Ok(());
        }

        let config = self.stream_config()?;
        let samples: Arc<[f32]> = Arc::from(buffer.samples.as_slice());
        let duration = Duration::from_millis(buffer.duration_ms());

        // cpal streams are not Send; keep the whole stream lifetime on one thread
        tokio::task::spawn_blocking(move || play_samples_blocking(&config, &samples, duration))
            .await
            .map_err(|e| Error::Audio(format!("playback task failed: {e}")))?
    }
}

/// Play samples and block until they have been consumed
fn play_samples_blocking(config: &StreamConfig, samples: &Arc<[f32]>, duration: Duration) -> Result<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| Error::Audio("no output device".to_string()))?;

    let channels = usize::from(config.channels);
    let position = Arc::new(AtomicUsize::new(0));
    let finished = Arc::new(AtomicBool::new(false));

    let stream = {
        let samples = Arc::clone(samples);
        let position = Arc::clone(&position);
        let finished = Arc::clone(&finished);

        device
            .build_output_stream(
                config,
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    for frame in data.chunks_mut(channels) {
                        let pos = position.load(Ordering::Relaxed);
                        let sample = samples.get(pos).copied().unwrap_or_else(|| {
                            finished.store(true, Ordering::Relaxed);
                            0.0
                        });

                        frame.fill(sample);

                        if pos < samples.len() {
                            position.store(pos + 1, Ordering::Relaxed);
                        }
                    }
                },
                |err| {
                    tracing::error!(error = %err, "audio playback error");
                },
                None,
            )
            .map_err(|e| Error::Audio(e.to_string()))?
    };

    stream.play().map_err(|e| Error::Audio(e.to_string()))?;

    // Poll for completion with timeout
    let start = Instant::now();
    let timeout = duration + Duration::from_millis(500);

    while !finished.load(Ordering::Relaxed) {
        if start.elapsed() > timeout {
            break;
        }
        std::thread::sleep(Duration::from_millis(50));
    }

    // Let the device drain its last period
    std::thread::sleep(Duration::from_millis(100));

    drop(stream);
    tracing::debug!(samples = samples.len(), "playback complete");

    Ok(())
}
