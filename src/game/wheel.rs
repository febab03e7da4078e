//! Wheel rotation and pointer resolution

use rand::Rng;

/// Minimum rotation per spin (five full turns)
const BASE_SPIN_DEGREES: f64 = 1800.0;

/// Angle of the pointer relative to the wheel's zero
const POINTER_ANGLE: f64 = 180.0;

/// Cumulative wheel rotation across spins
#[derive(Debug, Clone, Copy, Default)]
pub struct Wheel {
    rotation: f64,
}

impl Wheel {
    /// Create a wheel at rest
    #[must_use]
    pub const fn new() -> Self {
        Self { rotation: 0.0 }
    }

    /// Current cumulative rotation in degrees
    #[must_use]
    pub const fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Spin the wheel and return the index of the winning segment
    pub fn spin<R: Rng + ?Sized>(&mut self, segments: usize, rng: &mut R) -> usize {
        let extra = f64::from(rng.gen_range(0..360_u32));
        self.rotation += BASE_SPIN_DEGREES + extra;
        winning_index(self.rotation, segments)
    }
}

/// Segment under the pointer for a given rotation
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
pub fn winning_index(rotation: f64, segments: usize) -> usize {
    if segments == 0 {
        return 0;
    }
    let actual = rotation.rem_euclid(360.0);
    let winning_angle = (POINTER_ANGLE - actual + 360.0).rem_euclid(360.0);
    let per_segment = 360.0 / segments as f64;
    let index = (winning_angle / per_segment).floor().max(0.0) as usize;
    index.min(segments - 1)
}
