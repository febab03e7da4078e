//! Procedurally synthesized sound cues

use std::f32::consts::TAU;

use super::{AudioBuffer, SAMPLE_RATE};

/// Short game sound effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Cue {
    /// Wheel stopped on a segment
    Tick,
    /// One beat of the spinning loop
    Spin,
    /// Three rising tones for a correct answer
    Success,
    /// Falling sweep for a wrong answer
    Error,
}

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

impl Waveform {
    /// Sample at `phase` (in cycles, fractional part used)
    fn sample(self, phase: f32) -> f32 {
        let p = phase.fract();
        match self {
            Self::Sine => (TAU * p).sin(),
            Self::Square => {
                if p < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            Self::Triangle => 1.0 - 4.0 * (p - 0.5).abs(),
            Self::Sawtooth => 2.0 * p - 1.0,
        }
    }
}

/// Volume at which exponential envelopes end
const ENVELOPE_FLOOR: f32 = 0.01;

/// A tone with an exponential decay envelope
#[derive(Debug, Clone, Copy)]
struct Tone {
    frequency: f32,
    waveform: Waveform,
    start: f32,
    duration: f32,
    volume: f32,
}

impl Tone {
    const fn new(frequency: f32, waveform: Waveform, start: f32, duration: f32, volume: f32) -> Self {
        Self {
            frequency,
            waveform,
            start,
            duration,
            volume,
        }
    }

    fn end(&self) -> f32 {
        self.start + self.duration
    }

    /// Mix this tone into `out`
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn render_into(&self, out: &mut [f32], sample_rate: u32) {
        let rate = sample_rate as f32;
        let first = (self.start * rate) as usize;
        let count = (self.duration * rate) as usize;
        let ratio = ENVELOPE_FLOOR / self.volume;

        for (i, slot) in out.iter_mut().skip(first).take(count).enumerate() {
            let t = i as f32 / rate;
            let gain = self.volume * ratio.powf(t / self.duration);
            *slot += gain * self.waveform.sample(self.frequency * t);
        }
    }
}

impl Cue {
    fn tones(self) -> &'static [Tone] {
        const TICK: [Tone; 1] = [Tone::new(800.0, Waveform::Sine, 0.0, 0.1, 0.1)];
        const SPIN: [Tone; 1] = [Tone::new(150.0, Waveform::Square, 0.0, 0.5, 0.05)];
        const SUCCESS: [Tone; 3] = [
            Tone::new(523.25, Waveform::Triangle, 0.0, 0.2, 0.1),
            Tone::new(659.25, Waveform::Triangle, 0.1, 0.2, 0.1),
            Tone::new(783.99, Waveform::Triangle, 0.2, 0.4, 0.1),
        ];

        match self {
            Self::Tick => &TICK,
            Self::Spin => &SPIN,
            Self::Success => &SUCCESS,
            Self::Error => &[],
        }
    }

    /// Synthesize the cue at `sample_rate`
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn render(self, sample_rate: u32) -> AudioBuffer {
        if self == Self::Error {
            return render_error_sweep(sample_rate);
        }

        let tones = self.tones();
        let length = tones.iter().map(Tone::end).fold(0.0_f32, f32::max);
        let mut samples = vec![0.0; (length * sample_rate as f32).round() as usize];

        for tone in tones {
            tone.render_into(&mut samples, sample_rate);
        }

        AudioBuffer {
            samples,
            sample_rate,
        }
    }

    /// Synthesize at the speech sample rate
    #[must_use]
    pub fn buffer(self) -> AudioBuffer {
        self.render(SAMPLE_RATE)
    }
}

/// Sawtooth gliding 200 → 50 Hz over half a second with a linear fade
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn render_error_sweep(sample_rate: u32) -> AudioBuffer {
    const DURATION: f32 = 0.5;
    const START_HZ: f32 = 200.0;
    const END_HZ: f32 = 50.0;
    const VOLUME: f32 = 0.1;

    let rate = sample_rate as f32;
    let count = (DURATION * rate) as usize;
    let mut phase = 0.0_f32;

    let samples = (0..count)
        .map(|i| {
            let t = i as f32 / rate;
            let frequency = START_HZ * (END_HZ / START_HZ).powf(t / DURATION);
            let gain = VOLUME * (1.0 - t / DURATION);
            let sample = gain * Waveform::Sawtooth.sample(phase);
            phase = (phase + frequency / rate).fract();
            sample
        })
        .collect();

    AudioBuffer {
        samples,
        sample_rate,
    }
}
