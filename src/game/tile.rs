use std::cmp::Ordering;

/// Catalog key of a tile: the row index of the song in the catalog source
pub type TileId = usize;

/// A card from the Hitster game: one song with its release year
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    id: TileId,
    name: String,
    artist: String,
    year: i32,
    url: String,
}

impl Tile {
    pub fn new(
        id: TileId,
        name: impl Into<String>,
        artist: impl Into<String>,
        year: i32,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            artist: artist.into(),
            year,
            url: url.into(),
        }
    }

    pub fn id(&self) -> TileId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn artist(&self) -> &str {
        &self.artist
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Order two tiles by release year only
pub fn compare_tiles(a: &Tile, b: &Tile) -> Ordering {
    a.year.cmp(&b.year)
}

/// Check whether a raw year lies in the closed interval `[lower, upper]`
pub fn year_in_interval(year: i32, lower: i32, upper: i32) -> bool {
    lower <= year && year <= upper
}
