//! Neighbor quiz: "what comes before and after?"

use rand::Rng;
use rand::seq::SliceRandom;

use super::{GameDifficulty, GameItem};

/// Number of options offered when the vocabulary is larger than a week
const MAX_OPTIONS: usize = 6;

/// Vocabularies up to this size show every item as an option
const SHOW_ALL_THRESHOLD: usize = 7;

/// Previous and next item around `index`, wrapping at both ends
///
/// # Panics
///
/// Panics if `items` is empty
#[must_use]
pub fn neighbors(index: usize, items: &[GameItem]) -> (GameItem, GameItem) {
    let len = items.len();
    let prev = (index + len - 1) % len;
    let next = (index + 1) % len;
    (items[prev], items[next])
}

/// Answer options for the quiz around `current`
///
/// Small vocabularies show every item. Larger ones always include both
/// correct neighbors, padded with random distinct items that are never the
/// current one. Easy keeps calendar order; medium shuffles.
pub fn quiz_options<R: Rng + ?Sized>(
    current: &GameItem,
    items: &[GameItem],
    difficulty: GameDifficulty,
    rng: &mut R,
) -> Vec<GameItem> {
    let mut options: Vec<GameItem> = if items.len() <= SHOW_ALL_THRESHOLD {
        items.to_vec()
    } else {
        let index = items.iter().position(|i| i.id == current.id).unwrap_or(0);
        let (prev, next) = neighbors(index, items);
        let mut subset = vec![prev];
        if next.id != prev.id {
            subset.push(next);
        }

        let candidates = items.len() - 1;
        while subset.len() < MAX_OPTIONS.min(candidates) {
            let pick = items[rng.gen_range(0..items.len())];
            if pick.id != current.id && !subset.iter().any(|o| o.id == pick.id) {
                subset.push(pick);
            }
        }
        subset
    };

    match difficulty {
        GameDifficulty::Easy => options.sort_by_key(|o| o.id),
        GameDifficulty::Medium => options.shuffle(rng),
    }

    options
}

/// Whether the chosen labels match the true neighbors of `current`
#[must_use]
pub fn check_answer(current: &GameItem, items: &[GameItem], prev: &str, next: &str) -> bool {
    let Some(index) = items.iter().position(|i| i.id == current.id) else {
        return false;
    };
    let (correct_prev, correct_next) = neighbors(index, items);
    correct_prev.label == prev && correct_next.label == next
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::game::{GameMode, Language, items};

    #[test]
    fn test_neighbors_wrap() {
        let days = items(GameMode::Days, Language::En);

        let (prev, next) = neighbors(0, days);
        assert_eq!(prev.label, "Sunday");
        assert_eq!(next.label, "Tuesday");

        let (prev, next) = neighbors(6, days);
        assert_eq!(prev.label, "Saturday");
        assert_eq!(next.label, "Monday");
    }

    #[test]
    fn test_days_show_all_options_in_order() {
        let days = items(GameMode::Days, Language::It);
        let mut rng = StdRng::seed_from_u64(7);

        let options = quiz_options(&days[3], days, GameDifficulty::Easy, &mut rng);
        assert_eq!(options, days.to_vec());
    }

    #[test]
    fn test_months_options_contain_neighbors() {
        let months = items(GameMode::Months, Language::It);

        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let current = months[0];
            let options = quiz_options(&current, months, GameDifficulty::Medium, &mut rng);

            assert_eq!(options.len(), MAX_OPTIONS);
            assert!(options.iter().any(|o| o.label == "Dicembre"));
            assert!(options.iter().any(|o| o.label == "Febbraio"));
            assert!(options.iter().all(|o| o.id != current.id));

            let mut ids: Vec<_> = options.iter().map(|o| o.id).collect();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), MAX_OPTIONS);
        }
    }

    #[test]
    fn test_easy_options_sorted() {
        let months = items(GameMode::Months, Language::En);
        let mut rng = StdRng::seed_from_u64(42);

        let options = quiz_options(&months[5], months, GameDifficulty::Easy, &mut rng);
        assert!(options.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_check_answer() {
        let days = items(GameMode::Days, Language::En);

        assert!(check_answer(&days[2], days, "Tuesday", "Thursday"));
        assert!(!check_answer(&days[2], days, "Thursday", "Tuesday"));
        assert!(!check_answer(&days[2], days, "tuesday", "Thursday"));
    }
}
