//! One player's game: menu → spin → quiz → reward

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::task::JoinHandle;

use super::{GameDifficulty, GameItem, GameMode, Language, Wheel, check_answer, items, quiz_options, strings};
use crate::rhyme::{RhymeSource, fallback_rhyme};
use crate::voice::{AudioCache, Cue, SpeakOutcome};

/// Beats of the spin loop cue
const SPIN_BEATS: u32 = 7;

/// Interval between spin loop beats
const SPIN_BEAT_INTERVAL: Duration = Duration::from_millis(500);

/// Screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    Menu,
    Spinning,
    Question,
    Success,
}

/// Drives a game round and its narration
pub struct GameSession {
    audio: AudioCache,
    rhymes: Arc<dyn RhymeSource>,
    language: Language,
    mode: GameMode,
    difficulty: GameDifficulty,
    state: GameState,
    wheel: Wheel,
    selected: Option<GameItem>,
    pending_rhyme: Option<JoinHandle<String>>,
    rhyme: Option<String>,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("language", &self.language)
            .field("mode", &self.mode)
            .field("difficulty", &self.difficulty)
            .field("state", &self.state)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// Create a session on the menu screen
    #[must_use]
    pub fn new(audio: AudioCache, rhymes: Arc<dyn RhymeSource>, language: Language) -> Self {
        Self {
            audio,
            rhymes,
            language,
            mode: GameMode::default(),
            difficulty: GameDifficulty::default(),
            state: GameState::Menu,
            wheel: Wheel::new(),
            selected: None,
            pending_rhyme: None,
            rhyme: None,
        }
    }

    #[must_use]
    pub const fn state(&self) -> GameState {
        self.state
    }

    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }

    #[must_use]
    pub const fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub const fn selected(&self) -> Option<GameItem> {
        self.selected
    }

    /// Items on the wheel for the current mode and language
    #[must_use]
    pub fn items(&self) -> &'static [GameItem] {
        items(self.mode, self.language)
    }

    /// Audio cache used for narration
    #[must_use]
    pub const fn audio(&self) -> &AudioCache {
        &self.audio
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    pub fn set_difficulty(&mut self, difficulty: GameDifficulty) {
        self.difficulty = difficulty;
    }

    /// Flip mute for narration, returning whether it is now muted
    pub fn toggle_mute(&self) -> bool {
        let muted = self.audio.settings().toggle_muted();
        tracing::info!(muted, "mute switched");
        muted
    }

    /// Switch vocabulary and announce it
    pub async fn choose_mode(&mut self, mode: GameMode) -> SpeakOutcome {
        self.mode = mode;
        let name = strings(self.language).mode_name(mode);
        self.audio.speak(name, self.language).await
    }

    /// Leave the menu for the wheel
    pub fn start(&mut self) {
        self.state = GameState::Spinning;
        self.selected = None;
        self.pending_rhyme = None;
        self.rhyme = None;
    }

    /// Spin the wheel, announce the winner and start writing its rhyme
    pub async fn spin<R: Rng + ?Sized>(&mut self, rng: &mut R) -> GameItem {
        drop(self.spin_sound());

        let items = self.items();
        let winner = items[self.wheel.spin(items.len(), rng)];

        self.audio.play_cue(Cue::Tick);
        self.selected = Some(winner);

        let rhymes = Arc::clone(&self.rhymes);
        let language = self.language;
        self.pending_rhyme = Some(tokio::spawn(async move {
            rhymes.rhyme(winner.label, language).await
        }));

        tracing::debug!(label = winner.label, "wheel stopped");
        self.audio.speak(winner.label, self.language).await;

        self.state = GameState::Question;
        winner
    }

    /// Looping spin cue while the wheel turns
    fn spin_sound(&self) -> JoinHandle<()> {
        let audio = self.audio.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(SPIN_BEAT_INTERVAL);
            for _ in 0..SPIN_BEATS {
                interval.tick().await;
                audio.play_cue(Cue::Spin);
            }
        })
    }

    /// Quiz options around the selected item
    pub fn options<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<GameItem> {
        self.selected
            .map(|current| quiz_options(&current, self.items(), self.difficulty, rng))
            .unwrap_or_default()
    }

    /// A quiz option was chosen: tick and read it out
    pub async fn pick(&self, label: &str) -> SpeakOutcome {
        self.audio.play_cue(Cue::Tick);
        self.audio.speak(label, self.language).await
    }

    /// The chosen options were cleared
    pub fn clear_picks(&self) {
        self.audio.play_cue(Cue::Tick);
    }

    /// Check the chosen neighbors
    pub fn answer(&mut self, prev: &str, next: &str) -> bool {
        let Some(current) = self.selected else {
            return false;
        };

        if check_answer(&current, self.items(), prev, next) {
            self.state = GameState::Success;
            self.audio.play_cue(Cue::Success);
            true
        } else {
            self.audio.play_cue(Cue::Error);
            false
        }
    }

    /// Speak and return the rhyme for the selected item
    pub async fn reward(&mut self) -> Option<String> {
        let current = self.selected?;

        let rhyme = match self.pending_rhyme.take() {
            Some(task) => task.await.unwrap_or_else(|e| {
                tracing::warn!(error = %e, "rhyme task failed");
                fallback_rhyme(current.label, self.language)
            }),
            None => self.rhymes.rhyme(current.label, self.language).await,
        };

        self.audio.speak(&rhyme, self.language).await;
        self.rhyme = Some(rhyme.clone());
        Some(rhyme)
    }

    /// Read the last reward rhyme again
    pub async fn replay_rhyme(&self) -> Option<SpeakOutcome> {
        let rhyme = self.rhyme.as_deref()?;
        Some(self.audio.speak(rhyme, self.language).await)
    }

    /// Back to the menu; any rhyme still being written is abandoned
    pub fn reset(&mut self) {
        self.state = GameState::Menu;
        self.selected = None;
        self.pending_rhyme = None;
        self.rhyme = None;
    }
}
