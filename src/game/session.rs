use std::io::{BufRead, Write};

use rand::Rng;
use tracing::{debug, info, warn};

use super::catalog::Catalog;
use super::deck::Deck;
use super::evaluator::GuessEvaluator;
use super::guess_log::GuessLog;
use crate::display;
use crate::error::{GameError, Result};
use crate::playback::Playback;

/// Number of tiles a deck needs for the game to end
pub const DEFAULT_DECK_SIZE: usize = 10;

#[derive(Debug, Clone, Copy)]
pub struct GameSettings {
    pub deck_size: usize,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            deck_size: DEFAULT_DECK_SIZE,
        }
    }
}

/// Result of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameSummary {
    pub deck_size: usize,
    pub rounds: usize,
    pub failures: usize,
    pub score: usize,
}

/// A single player's game: the remaining catalog, their deck and every guess
pub struct GameSession<R: Rng> {
    catalog: Catalog,
    deck: Deck,
    log: GuessLog,
    rng: R,
    settings: GameSettings,
    rounds: usize,
    failures: usize,
    score: usize,
}

impl<R: Rng> GameSession<R> {
    /// Draw the initial tile and set up the deck
    pub fn start(mut catalog: Catalog, mut rng: R, settings: GameSettings) -> Result<Self> {
        let initial = catalog.draw(&mut rng).ok_or(GameError::EmptyCatalog)?;
        debug!(tile_id = initial.id(), year = initial.year(), "Initial tile drawn");

        Ok(Self {
            catalog,
            deck: Deck::new(initial),
            log: GuessLog::new(),
            rng,
            settings,
            rounds: 0,
            failures: 0,
            score: 0,
        })
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn log(&self) -> &GuessLog {
        &self.log
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn failures(&self) -> usize {
        self.failures
    }

    pub fn score(&self) -> usize {
        self.score
    }

    /// Play rounds until the deck is full.
    ///
    /// Guesses are read line by line from `input`. Running out of catalog
    /// tiles or input ends the game with an error; the guesses made so far
    /// stay in [`GameSession::log`].
    pub fn play<P, I, O>(&mut self, playback: &P, input: &mut I, output: &mut O) -> Result<GameSummary>
    where
        P: Playback + ?Sized,
        I: BufRead,
        O: Write,
    {
        if let Some(initial) = self.deck.tiles().first() {
            writeln!(
                output,
                "{}",
                display::tile_line("You've taken the initial tile with", initial)
            )?;
        }

        while self.deck.len() < self.settings.deck_size {
            self.play_round(playback, input, output)?;
        }

        let summary = GameSummary {
            deck_size: self.deck.len(),
            rounds: self.rounds,
            failures: self.failures,
            score: self.score,
        };
        info!(?summary, "Game finished");
        writeln!(output, "\n{}", display::summary_line(&summary))?;

        Ok(summary)
    }

    fn play_round<P, I, O>(&mut self, playback: &P, input: &mut I, output: &mut O) -> Result<()>
    where
        P: Playback + ?Sized,
        I: BufRead,
        O: Write,
    {
        let tile = self
            .catalog
            .draw(&mut self.rng)
            .ok_or(GameError::CatalogExhausted {
                needed: self.settings.deck_size,
                placed: self.deck.len(),
            })?;
        self.rounds += 1;
        debug!(round = self.rounds, tile_id = tile.id(), "New tile drawn");

        writeln!(
            output,
            "\n{}",
            display::info("You've taken a new tile. The song should start playing...")
        )?;

        if let Err(e) = playback.play(tile.url()) {
            warn!(url = tile.url(), error = %e, "Playback failed");
            writeln!(output, "{}", display::fail(&format!("✗ Playback failed: {e}")))?;
        }

        let year_guess = prompt(input, output, "\n> Guess the year: ")?;
        let name_guess = prompt(input, output, "\n> Guess the name of the song: ")?;
        let artist_guess = prompt(input, output, "\n> Guess the artist: ")?;

        let outcome = GuessEvaluator::evaluate(
            &self.deck,
            &tile,
            &year_guess,
            &name_guess,
            &artist_guess,
            &mut self.log,
        );

        if outcome.year {
            let text = format!(
                "\n{} You turn the tile over; it is in range! Namely",
                display::success("[SUCCESS]")
            );
            writeln!(output, "{}", display::tile_line(&text, &tile))?;
            self.deck.insert(tile);
        } else {
            self.failures += 1;
            let text = format!(
                "\n{} You turn the tile over; it is",
                display::fail(&format!("[FAIL ({})]", self.failures))
            );
            writeln!(output, "{}", display::tile_line(&text, &tile))?;
        }

        if outcome.is_bonus() {
            self.score += 1;
            writeln!(
                output,
                "\n{}",
                display::success(&format!(
                    "[SUCCESS] You've guessed the name and title right. (Score = {})",
                    self.score
                ))
            )?;
        }

        writeln!(output, "Your full deck:")?;
        for placed in self.deck.iter() {
            writeln!(output, "{}", display::tile_line("- ", placed))?;
        }

        Ok(())
    }
}

/// Show `question` and read one answer line without its line ending
fn prompt<I: BufRead, O: Write>(input: &mut I, output: &mut O, question: &str) -> Result<String> {
    write!(output, "{question}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(GameError::InputClosed);
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}
