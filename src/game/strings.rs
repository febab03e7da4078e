//! Localized user-facing strings

use super::{GameMode, Language};

/// Strings for one language
#[derive(Debug, Clone, Copy)]
pub struct Strings {
    pub days: &'static str,
    pub months: &'static str,
    pub spin: &'static str,
    pub before: &'static str,
    pub after: &'static str,
    pub correct: &'static str,
    pub wrong: &'static str,
    pub writing_magic: &'static str,
    pub play_again: &'static str,
    pub listen_again: &'static str,
    pub stop: &'static str,
    pub mute: &'static str,
    pub unmute: &'static str,
    /// Prefix of the templated rhyme used when nothing better exists
    pub rhyme_fallback: &'static str,
}

const IT: Strings = Strings {
    days: "Giorni",
    months: "Mesi",
    spin: "Gira la ruota!",
    before: "Prima",
    after: "Dopo",
    correct: "Bravissimo!",
    wrong: "Riprova!",
    writing_magic: "Sto scrivendo una magia...",
    play_again: "Giochiamo ancora?",
    listen_again: "Ascolta di nuovo",
    stop: "Basta così",
    mute: "Silenzia la voce",
    unmute: "Riattiva la voce",
    rhyme_fallback: "Evviva",
};

const EN: Strings = Strings {
    days: "Days",
    months: "Months",
    spin: "Spin the wheel!",
    before: "Before",
    after: "After",
    correct: "Well done!",
    wrong: "Try again!",
    writing_magic: "Writing some magic...",
    play_again: "Play again?",
    listen_again: "Listen again",
    stop: "Stop",
    mute: "Mute voice",
    unmute: "Unmute voice",
    rhyme_fallback: "Hooray for",
};

/// Strings for a language
#[must_use]
pub const fn strings(language: Language) -> &'static Strings {
    match language {
        Language::It => &IT,
        Language::En => &EN,
    }
}

impl Strings {
    /// Spoken name of a game mode
    #[must_use]
    pub const fn mode_name(&self, mode: GameMode) -> &'static str {
        match mode {
            GameMode::Days => self.days,
            GameMode::Months => self.months,
        }
    }
}
