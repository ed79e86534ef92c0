use super::tile::{Tile, compare_tiles, year_in_interval};

/// Lower bound used when no deck tile is older than the new tile
pub const OPEN_LOWER_BOUND: i32 = 0;
/// Upper bound used when no deck tile is newer than the new tile
pub const OPEN_UPPER_BOUND: i32 = 9999;

/// The closed range of years a guess must fall in to place a tile correctly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearInterval {
    pub lower: i32,
    pub upper: i32,
}

impl YearInterval {
    pub fn contains(&self, year: i32) -> bool {
        year_in_interval(year, self.lower, self.upper)
    }
}

/// The player's timeline of correctly placed tiles, always sorted by year
#[derive(Debug, Clone)]
pub struct Deck {
    tiles: Vec<Tile>,
}

impl Deck {
    /// Start a deck from the initial tile
    pub fn new(initial: Tile) -> Self {
        Self {
            tiles: vec![initial],
        }
    }

    /// Insert a tile keeping the deck sorted. Tiles sharing a year keep
    /// their insertion order.
    pub fn insert(&mut self, tile: Tile) {
        let position = self
            .tiles
            .partition_point(|placed| compare_tiles(placed, &tile).is_le());
        self.tiles.insert(position, tile);
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Years of the nearest older and newer deck tiles around `tile`.
    ///
    /// Deck tiles from the same year as `tile` bound neither side, and the
    /// ends of the timeline stay open at [`OPEN_LOWER_BOUND`] and
    /// [`OPEN_UPPER_BOUND`].
    pub fn interval_for(&self, tile: &Tile) -> YearInterval {
        let lower = self
            .tiles
            .iter()
            .filter(|placed| placed.year() < tile.year())
            .map(Tile::year)
            .max()
            .unwrap_or(OPEN_LOWER_BOUND);
        let upper = self
            .tiles
            .iter()
            .filter(|placed| placed.year() > tile.year())
            .map(Tile::year)
            .min()
            .unwrap_or(OPEN_UPPER_BOUND);

        YearInterval { lower, upper }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tile(id: usize, year: i32) -> Tile {
        Tile::new(id, format!("Song {id}"), format!("Artist {id}"), year, format!("url-{id}"))
    }

    fn deck_of(years: &[i32]) -> Deck {
        let mut deck = Deck::new(tile(0, years[0]));
        for (i, year) in years.iter().enumerate().skip(1) {
            deck.insert(tile(i, *year));
        }
        deck
    }

    fn years(deck: &Deck) -> Vec<i32> {
        deck.iter().map(Tile::year).collect()
    }

    #[test]
    fn test_insert_keeps_deck_sorted() {
        let deck = deck_of(&[2001, 1975, 1999, 1960, 2020]);
        assert_eq!(years(&deck), vec![1960, 1975, 1999, 2001, 2020]);
        assert_eq!(deck.len(), 5);
    }

    #[test]
    fn test_equal_years_keep_insertion_order() {
        let deck = deck_of(&[1990, 1990, 1980, 1990]);
        let ids: Vec<usize> = deck.iter().map(Tile::id).collect();
        assert_eq!(ids, vec![2, 0, 1, 3]);
    }

    #[test]
    fn test_interval_between_neighbours() {
        let deck = deck_of(&[1990, 2005]);
        let interval = deck.interval_for(&tile(9, 1998));

        assert_eq!(interval, YearInterval { lower: 1990, upper: 2005 });
        assert!(interval.contains(1998));
        assert!(!interval.contains(2006));
    }

    #[test]
    fn test_interval_open_below_single_tile() {
        let deck = deck_of(&[2000]);
        let interval = deck.interval_for(&tile(9, 1980));

        assert_eq!(interval, YearInterval { lower: 0, upper: 2000 });
        assert!(interval.contains(0));
        assert!(!interval.contains(2001));
    }

    #[test]
    fn test_interval_open_above() {
        let deck = deck_of(&[1970, 1985]);
        let interval = deck.interval_for(&tile(9, 2010));

        assert_eq!(interval, YearInterval { lower: 1985, upper: OPEN_UPPER_BOUND });
    }

    #[test]
    fn test_equal_year_tiles_do_not_bound() {
        let deck = deck_of(&[1980, 1995, 2010]);
        let interval = deck.interval_for(&tile(9, 1995));

        assert_eq!(interval, YearInterval { lower: 1980, upper: 2010 });
        assert!(interval.contains(1981));
        assert!(interval.contains(2009));
    }

    #[test]
    fn test_lower_never_exceeds_upper() {
        let deck = deck_of(&[1955, 1968, 1968, 1979, 1991, 2003, 2017]);
        for year in 1940..2030 {
            let interval = deck.interval_for(&tile(99, year));
            assert!(
                interval.lower <= interval.upper,
                "year {year}: {interval:?}"
            );
        }
    }

    #[test]
    fn test_inserting_tiles_never_widens_interval() {
        let candidate = tile(99, 1987);
        let mut deck = deck_of(&[2015]);
        let mut previous = deck.interval_for(&candidate);

        for (i, year) in [1960, 1999, 1975, 1987, 1990, 1986].into_iter().enumerate() {
            deck.insert(tile(i + 1, year));
            let current = deck.interval_for(&candidate);
            assert!(current.lower >= previous.lower, "{current:?} vs {previous:?}");
            assert!(current.upper <= previous.upper, "{current:?} vs {previous:?}");
            previous = current;
        }

        assert_eq!(previous, YearInterval { lower: 1986, upper: 1990 });
    }
}
