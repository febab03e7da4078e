//! Runtime audio settings shared by the audio components

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Mute state and cue policy
///
/// Clones share the same mute flag, so the settings screen and every audio
/// entry point observe one value.
#[derive(Debug, Clone, Default)]
pub struct AudioSettings {
    muted: Arc<AtomicBool>,
    cues_honor_mute: bool,
}

impl AudioSettings {
    /// Create settings with an initial mute state
    #[must_use]
    pub fn new(muted: bool, cues_honor_mute: bool) -> Self {
        Self {
            muted: Arc::new(AtomicBool::new(muted)),
            cues_honor_mute,
        }
    }

    /// Whether speech is muted
    #[must_use]
    pub fn is_muted(&self) -> bool {
        self.muted.load(Ordering::Relaxed)
    }

    /// Set the mute flag
    pub fn set_muted(&self, muted: bool) {
        self.muted.store(muted, Ordering::Relaxed);
        tracing::debug!(muted, "mute toggled");
    }

    /// Flip the mute flag, returning the new value
    pub fn toggle_muted(&self) -> bool {
        !self.muted.fetch_xor(true, Ordering::Relaxed)
    }

    /// Whether sound cues should currently be silenced
    #[must_use]
    pub fn cues_silenced(&self) -> bool {
        self.cues_honor_mute && self.is_muted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_flag() {
        let settings = AudioSettings::default();
        let other = settings.clone();

        settings.set_muted(true);
        assert!(other.is_muted());
        assert!(!other.toggle_muted());
        assert!(!settings.is_muted());
    }

    #[test]
    fn test_cue_policy() {
        let always = AudioSettings::new(true, false);
        assert!(!always.cues_silenced());

        let honoring = AudioSettings::new(true, true);
        assert!(honoring.cues_silenced());
        honoring.set_muted(false);
        assert!(!honoring.cues_silenced());
    }
}
