use std::path::Path;

use chrono::{DateTime, Datelike, NaiveDate};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::tile::{Tile, TileId};
use crate::error::Result;

/// One row of the playlist cache, as fetched from the streaming service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRow {
    #[serde(rename = "Song Name")]
    pub song_name: String,
    #[serde(rename = "Artist(s)")]
    pub artists: String,
    #[serde(rename = "Release")]
    pub release: String,
    #[serde(rename = "Url")]
    pub url: String,
}

/// Derive a release year from a release date string.
///
/// Plain four digit years are taken as is, anything else must parse as a
/// date. Returns `None` when no year can be read.
pub fn release_year(release: &str) -> Option<i32> {
    let release = release.trim();
    if release.len() == 4 && release.chars().all(|c| c.is_ascii_digit()) {
        return release.parse().ok();
    }

    if let Ok(date) = NaiveDate::parse_from_str(release, "%Y-%m-%d") {
        return Some(date.year());
    }
    // Month precision dates such as "1999-05"
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{release}-01"), "%Y-%m-%d") {
        return Some(date.year());
    }
    if let Ok(date) = NaiveDate::parse_from_str(release, "%Y/%m/%d") {
        return Some(date.year());
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(release) {
        return Some(dt.year());
    }

    None
}

/// Pool of tiles still available to draw in a session
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    tiles: Vec<Tile>,
}

impl Catalog {
    /// Build a catalog from cached rows. Row indices become tile ids; rows
    /// without a readable release year are left out.
    pub fn from_rows(rows: Vec<CatalogRow>) -> Self {
        let total = rows.len();
        let tiles: Vec<Tile> = rows
            .into_iter()
            .enumerate()
            .filter_map(|(id, row)| match release_year(&row.release) {
                Some(year) => Some(Tile::new(id, row.song_name, row.artists, year, row.url)),
                None => {
                    warn!(
                        song = %row.song_name,
                        release = %row.release,
                        "Skipping song with unparseable release date"
                    );
                    None
                }
            })
            .collect();

        if tiles.len() < total {
            warn!(
                skipped = total - tiles.len(),
                total, "Some songs have no usable release year"
            );
        }
        info!(tiles = tiles.len(), "Catalog ready");

        Self { tiles }
    }

    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.tiles.iter().any(|tile| tile.id() == id)
    }

    /// Pick a tile uniformly at random without removing it
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Tile> {
        self.tiles.choose(rng)
    }

    pub fn remove(&mut self, id: TileId) -> Option<Tile> {
        let position = self.tiles.iter().position(|tile| tile.id() == id)?;
        Some(self.tiles.remove(position))
    }

    /// Pick a tile at random and take it out of the pool
    pub fn draw<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<Tile> {
        let id = self.sample(rng)?.id();
        self.remove(id)
    }
}

/// Read cached playlist rows from a CSV file
pub fn read_rows_csv(path: impl AsRef<Path>) -> Result<Vec<CatalogRow>> {
    let mut reader = csv::Reader::from_path(path)?;
    let rows = reader
        .deserialize()
        .collect::<std::result::Result<Vec<CatalogRow>, csv::Error>>()?;
    Ok(rows)
}

/// Write playlist rows to a CSV file, replacing any previous cache
pub fn write_rows_csv(path: impl AsRef<Path>, rows: &[CatalogRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
