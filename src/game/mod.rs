//! Game engine: vocabulary catalog, quiz logic, wheel and session state
//!
//! Everything here is pure data or small state transitions. Sound and speech
//! go through [`crate::voice::AudioCache`]; rhymes through
//! [`crate::rhyme::RhymeGenerator`].

mod quiz;
mod session;
pub mod strings;
mod wheel;

use std::fmt;
use std::str::FromStr;

pub use quiz::{check_answer, neighbors, quiz_options};
pub use session::{GameSession, GameState};
pub use strings::{Strings, strings};
pub use wheel::{Wheel, winning_index};

/// Language of the vocabulary, narration and rhymes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    /// Italian
    #[default]
    It,
    /// English
    En,
}

impl Language {
    /// Every supported language, in warm-up order
    pub const ALL: [Self; 2] = [Self::It, Self::En];

    /// Short tag used in cache keys (`it`, `en`)
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::It => "it",
            Self::En => "en",
        }
    }

    /// Locale for the system speech fallback
    #[must_use]
    pub const fn locale(self) -> &'static str {
        match self {
            Self::It => "it-IT",
            Self::En => "en-US",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::It => "IT",
            Self::En => "EN",
        })
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "it" | "it-it" | "italian" | "italiano" => Ok(Self::It),
            "en" | "en-us" | "en-gb" | "english" => Ok(Self::En),
            other => Err(format!("unsupported language: {other}")),
        }
    }
}

/// Which vocabulary the wheel shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum GameMode {
    /// Days of the week
    #[default]
    Days,
    /// Months of the year
    Months,
}

impl GameMode {
    /// Both modes, in warm-up order
    pub const ALL: [Self; 2] = [Self::Days, Self::Months];
}

/// Quiz difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum GameDifficulty {
    /// Options listed in calendar order
    #[default]
    Easy,
    /// Options shuffled
    Medium,
}

/// One day or month on the wheel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameItem {
    /// Ordinal position (0 = Monday / January)
    pub id: usize,
    /// Localized label
    pub label: &'static str,
    /// Segment color (`#RRGGBB`)
    pub color: &'static str,
}

const DAYS_COLORS: [&str; 7] = [
    "#FF4757", "#2ED573", "#FFA502", "#1E90FF", "#ECCC68", "#3742FA", "#FF7F50",
];

const MONTHS_COLORS: [&str; 12] = [
    "#81ECEC", "#74B9FF", "#A29BFE", "#55E6C1", "#FDCB6E", "#FAB1A0", "#FF7675", "#D63031",
    "#E17055", "#F0932B", "#6C5CE7", "#0984E3",
];

macro_rules! catalog {
    ($colors:ident; $($id:literal => $label:literal),+ $(,)?) => {
        [$(GameItem { id: $id, label: $label, color: $colors[$id] }),+]
    };
}

static DAYS_IT: [GameItem; 7] = catalog![DAYS_COLORS;
    0 => "Lunedì", 1 => "Martedì", 2 => "Mercoledì", 3 => "Giovedì",
    4 => "Venerdì", 5 => "Sabato", 6 => "Domenica",
];

static DAYS_EN: [GameItem; 7] = catalog![DAYS_COLORS;
    0 => "Monday", 1 => "Tuesday", 2 => "Wednesday", 3 => "Thursday",
    4 => "Friday", 5 => "Saturday", 6 => "Sunday",
];

static MONTHS_IT: [GameItem; 12] = catalog![MONTHS_COLORS;
    0 => "Gennaio", 1 => "Febbraio", 2 => "Marzo", 3 => "Aprile",
    4 => "Maggio", 5 => "Giugno", 6 => "Luglio", 7 => "Agosto",
    8 => "Settembre", 9 => "Ottobre", 10 => "Novembre", 11 => "Dicembre",
];

static MONTHS_EN: [GameItem; 12] = catalog![MONTHS_COLORS;
    0 => "January", 1 => "February", 2 => "March", 3 => "April",
    4 => "May", 5 => "June", 6 => "July", 7 => "August",
    8 => "September", 9 => "October", 10 => "November", 11 => "December",
];

/// Items shown on the wheel for a mode and language
#[must_use]
pub fn items(mode: GameMode, language: Language) -> &'static [GameItem] {
    match (mode, language) {
        (GameMode::Days, Language::It) => &DAYS_IT,
        (GameMode::Days, Language::En) => &DAYS_EN,
        (GameMode::Months, Language::It) => &MONTHS_IT,
        (GameMode::Months, Language::En) => &MONTHS_EN,
    }
}

/// Every (label, language) pair in the vocabulary, for bulk audio warm-up
#[must_use]
pub fn vocabulary() -> Vec<(&'static str, Language)> {
    Language::ALL
        .iter()
        .flat_map(|&language| {
            GameMode::ALL
                .iter()
                .flat_map(move |&mode| items(mode, language).iter().map(move |i| (i.label, language)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_sizes() {
        for language in Language::ALL {
            assert_eq!(items(GameMode::Days, language).len(), 7);
            assert_eq!(items(GameMode::Months, language).len(), 12);
        }
    }

    #[test]
    fn test_ids_are_ordinal() {
        for item in items(GameMode::Months, Language::En).iter().enumerate() {
            assert_eq!(item.0, item.1.id);
        }
    }

    #[test]
    fn test_colors_shared_across_languages() {
        let it = items(GameMode::Days, Language::It);
        let en = items(GameMode::Days, Language::En);
        assert!(it.iter().zip(en).all(|(a, b)| a.color == b.color));
    }

    #[test]
    fn test_vocabulary_covers_matrix() {
        let vocab = vocabulary();
        assert_eq!(vocab.len(), 38);
        assert!(vocab.contains(&("Lunedì", Language::It)));
        assert!(vocab.contains(&("December", Language::En)));
    }

    #[test]
    fn test_language_parse() {
        assert_eq!("IT".parse::<Language>(), Ok(Language::It));
        assert_eq!("en-US".parse::<Language>(), Ok(Language::En));
        assert!("fr".parse::<Language>().is_err());
    }

    #[test]
    fn test_language_tags() {
        assert_eq!(Language::It.tag(), "it");
        assert_eq!(Language::En.locale(), "en-US");
        assert_eq!(Language::It.to_string(), "IT");
    }
}
