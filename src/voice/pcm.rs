//! Raw PCM decoding

/// Sample rate of generated speech and of cue synthesis
pub const SAMPLE_RATE: u32 = 24_000;

/// Decoded, playable audio
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    /// Mono samples in `[-1, 1]`
    pub samples: Vec<f32>,
    /// Samples per second
    pub sample_rate: u32,
}

impl AudioBuffer {
    /// Wrap mono samples at the default sample rate
    #[must_use]
    pub const fn new(samples: Vec<f32>) -> Self {
        Self {
            samples,
            sample_rate: SAMPLE_RATE,
        }
    }

    /// Number of samples
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the buffer holds no audio
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Playback length in milliseconds
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        (self.samples.len() as u64 * 1000) / u64::from(self.sample_rate.max(1))
    }
}

/// Decode 16-bit signed little-endian mono PCM
///
/// A trailing odd byte is dropped rather than rejected.
#[must_use]
pub fn decode_pcm16(raw: &[u8]) -> AudioBuffer {
    let samples = raw
        .chunks_exact(2)
        .map(|pair| f32::from(i16::from_le_bytes([pair[0], pair[1]])) / 32768.0)
        .collect();
    AudioBuffer::new(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_known_values() {
        let raw = [0x00, 0x00, 0xFF, 0x7F, 0x00, 0x80, 0x00, 0x40];
        let buffer = decode_pcm16(&raw);

        assert_eq!(buffer.len(), 4);
        assert!((buffer.samples[0] - 0.0).abs() < f32::EPSILON);
        assert!((buffer.samples[1] - 32767.0 / 32768.0).abs() < 1e-6);
        assert!((buffer.samples[2] + 1.0).abs() < f32::EPSILON);
        assert!((buffer.samples[3] - 0.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_decode_truncates_odd_byte() {
        let buffer = decode_pcm16(&[0x00, 0x40, 0x12]);
        assert_eq!(buffer.len(), 1);
    }

    #[test]
    fn test_decode_empty() {
        assert!(decode_pcm16(&[]).is_empty());
        assert!(decode_pcm16(&[0x01]).is_empty());
    }

    #[test]
    fn test_decode_samples_in_range() {
        let raw: Vec<u8> = (0..=u8::MAX).collect();
        let buffer = decode_pcm16(&raw);

        assert_eq!(buffer.len(), raw.len() / 2);
        assert!(buffer.samples.iter().all(|s| (-1.0..1.0).contains(s)));
    }

    #[test]
    fn test_duration() {
        let buffer = AudioBuffer::new(vec![0.0; 12_000]);
        assert_eq!(buffer.duration_ms(), 500);
    }
}
