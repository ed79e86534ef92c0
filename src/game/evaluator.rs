use tracing::debug;

use super::deck::Deck;
use super::guess_log::{GuessLog, GuessRecord};
use super::tile::Tile;

/// Year recorded for a guess that is not a number; always outside every interval
pub const UNPARSEABLE_YEAR: i32 = -1;
/// Guesses must be longer than this many characters to count as an attempt
pub const MIN_GUESS_CHARS: usize = 3;
/// Edit distance must stay below this for a fuzzy match
pub const MAX_EDIT_DISTANCE: usize = 8;

/// Per-field result of one round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GuessOutcome {
    pub year: bool,
    pub name: bool,
    pub artist: bool,
}

impl GuessOutcome {
    /// Both the song name and the artist were guessed
    pub fn is_bonus(&self) -> bool {
        self.name && self.artist
    }

    pub fn as_array(&self) -> [bool; 3] {
        [self.year, self.name, self.artist]
    }
}

impl From<GuessOutcome> for (bool, bool, bool) {
    fn from(outcome: GuessOutcome) -> Self {
        (outcome.year, outcome.name, outcome.artist)
    }
}

/// Guess evaluation rules, as static helpers
pub struct GuessEvaluator;

impl GuessEvaluator {
    /// Parse a year guess, falling back to [`UNPARSEABLE_YEAR`]
    pub fn parse_year_guess(raw: &str) -> i32 {
        raw.trim().parse::<i32>().unwrap_or(UNPARSEABLE_YEAR)
    }

    /// Approximate comparison of a guess against the real name or artist.
    ///
    /// Short guesses never match. Otherwise a guess matches when it is within
    /// a small edit distance of the truth (compared as typed), or when one
    /// lower-cased string contains the other.
    pub fn fuzzy_match(guess: &str, truth: &str) -> bool {
        if guess.chars().count() <= MIN_GUESS_CHARS {
            return false;
        }

        if strsim::levenshtein(guess, truth) < MAX_EDIT_DISTANCE {
            return true;
        }

        let guess_lower = guess.to_lowercase();
        let truth_lower = truth.to_lowercase();
        truth_lower.contains(&guess_lower) || guess_lower.contains(&truth_lower)
    }

    /// Evaluate one round against the current deck and record it in `log`
    pub fn evaluate(
        deck: &Deck,
        tile: &Tile,
        year_guess: &str,
        name_guess: &str,
        artist_guess: &str,
        log: &mut GuessLog,
    ) -> GuessOutcome {
        let year = Self::parse_year_guess(year_guess);
        let interval = deck.interval_for(tile);

        let outcome = GuessOutcome {
            year: interval.contains(year),
            name: Self::fuzzy_match(name_guess, tile.name()),
            artist: Self::fuzzy_match(artist_guess, tile.artist()),
        };

        debug!(
            tile_id = tile.id(),
            year_guess = year,
            lower = interval.lower,
            upper = interval.upper,
            ?outcome,
            "Evaluated guess"
        );

        log.push(GuessRecord::new(tile, year, name_guess, artist_guess, outcome));
        outcome
    }
}
