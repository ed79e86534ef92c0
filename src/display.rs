//! Terminal presentation of tiles and round results.

use crossterm::style::Stylize;

use crate::game::{GameSummary, Tile};

/// "<text> 1985. It is <name> from <artist>."
pub fn tile_line(text: &str, tile: &Tile) -> String {
    format!(
        "{text} {}. It is {} from {}.",
        tile.year().to_string().magenta(),
        tile.name().blue(),
        tile.artist().blue()
    )
}

pub fn info(text: &str) -> String {
    text.yellow().to_string()
}

pub fn success(text: &str) -> String {
    text.green().to_string()
}

pub fn fail(text: &str) -> String {
    text.red().to_string()
}

pub fn summary_line(summary: &GameSummary) -> String {
    format!(
        "{}{} and {}",
        info(&format!(
            "The game is over! You finished getting {} tiles, with ",
            summary.deck_size
        )),
        fail(&format!("{} failures", summary.failures)),
        success(&format!("{} extra score points", summary.score))
    )
}
