use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::evaluator::GuessOutcome;
use super::tile::Tile;
use crate::error::Result;

/// Year, name and artist as either the real answer or the player's guess
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessEntry {
    pub year: i32,
    pub name: String,
    pub artist: String,
}

/// One round of guessing: the answer, what the player typed and how it scored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRecord {
    #[serde(rename = "answers", alias = "answer")]
    answer: GuessEntry,
    guess: GuessEntry,
    #[serde(with = "results_format")]
    results: GuessOutcome,
}

impl GuessRecord {
    pub fn new(tile: &Tile, year: i32, name: &str, artist: &str, results: GuessOutcome) -> Self {
        Self {
            answer: GuessEntry {
                year: tile.year(),
                name: tile.name().to_string(),
                artist: tile.artist().to_string(),
            },
            guess: GuessEntry {
                year,
                name: name.to_string(),
                artist: artist.to_string(),
            },
            results,
        }
    }

    pub fn answer(&self) -> &GuessEntry {
        &self.answer
    }

    pub fn guess(&self) -> &GuessEntry {
        &self.guess
    }

    pub fn outcome(&self) -> GuessOutcome {
        self.results
    }
}

/// Results are stored as `["True", "False", "True"]` for (year, name, artist)
mod results_format {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::GuessOutcome;

    fn render(value: bool) -> &'static str {
        if value { "True" } else { "False" }
    }

    fn parse<E: Error>(value: &str) -> Result<bool, E> {
        match value.to_ascii_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            other => Err(E::custom(format!("invalid result flag '{other}'"))),
        }
    }

    pub fn serialize<S: Serializer>(outcome: &GuessOutcome, serializer: S) -> Result<S::Ok, S::Error> {
        let [year, name, artist] = outcome.as_array();
        serializer.collect_seq([render(year), render(name), render(artist)])
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<GuessOutcome, D::Error> {
        let [year, name, artist] = <[String; 3]>::deserialize(deserializer)?;
        Ok(GuessOutcome {
            year: parse(&year)?,
            name: parse(&name)?,
            artist: parse(&artist)?,
        })
    }
}

/// Summary of a guess log
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GuessStats {
    pub rounds: usize,
    pub year_hits: usize,
    pub name_hits: usize,
    pub artist_hits: usize,
    pub bonus_rounds: usize,
    pub year_accuracy: f32,
}

/// Append-only record of every guess made in a session
#[derive(Debug, Clone, Default)]
pub struct GuessLog {
    records: Vec<GuessRecord>,
}

impl GuessLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: GuessRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[GuessRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.records)?)
    }

    /// Write the whole log to `path`, replacing whatever was there
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        info!(records = self.len(), path = %path.display(), "Saved guess log");
        Ok(())
    }

    /// Read a previously saved log. A missing file is an empty log.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "No guess log found");
            return Ok(Self::new());
        }

        let content = std::fs::read_to_string(path)?;
        let records: Vec<GuessRecord> = serde_json::from_str(&content)?;
        Ok(Self { records })
    }

    pub fn stats(&self) -> GuessStats {
        let count = |hit: fn(&GuessOutcome) -> bool| {
            self.records.iter().filter(|r| hit(&r.results)).count()
        };

        let rounds = self.records.len();
        let year_hits = count(|o| o.year);
        let year_accuracy = if rounds == 0 {
            0.0
        } else {
            year_hits as f32 / rounds as f32
        };

        GuessStats {
            rounds,
            year_hits,
            name_hits: count(|o| o.name),
            artist_hits: count(|o| o.artist),
            bonus_rounds: count(GuessOutcome::is_bonus),
            year_accuracy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn record(year_guess: i32, outcome: (bool, bool, bool)) -> GuessRecord {
        let tile = Tile::new(3, "Dancing Queen", "ABBA", 1976, "https://open.spotify.com/track/abc");
        let (year, name, artist) = outcome;
        GuessRecord::new(
            &tile,
            year_guess,
            "Dancing Queen",
            "Abba",
            GuessOutcome { year, name, artist },
        )
    }

    #[test]
    fn test_record_json_shape() {
        let mut log = GuessLog::new();
        log.push(record(-1, (false, true, false)));

        let value: serde_json::Value = serde_json::from_str(&log.to_json().unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "answers": {"year": 1976, "name": "Dancing Queen", "artist": "ABBA"},
                "guess": {"year": -1, "name": "Dancing Queen", "artist": "Abba"},
                "results": ["False", "True", "False"]
            }])
        );
    }

    #[test]
    fn test_save_overwrites_and_load_reads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guess_data.json");

        let mut first = GuessLog::new();
        first.push(record(1970, (false, false, false)));
        first.push(record(1976, (true, true, true)));
        first.save(&path).unwrap();

        let mut second = GuessLog::new();
        second.push(record(1980, (true, false, true)));
        second.save(&path).unwrap();

        let loaded = GuessLog::load(&path).unwrap();
        assert_eq!(loaded.records(), second.records());
    }

    #[test]
    fn test_load_preserves_insertion_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guesses.json");

        let mut log = GuessLog::new();
        for year in [1990, 1960, 2010] {
            log.push(record(year, (false, false, false)));
        }
        log.save(&path).unwrap();

        let years: Vec<i32> = GuessLog::load(&path)
            .unwrap()
            .records()
            .iter()
            .map(|r| r.guess().year)
            .collect();
        assert_eq!(years, vec![1990, 1960, 2010]);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log = GuessLog::load(dir.path().join("missing.json")).unwrap();
        assert!(log.is_empty());
    }

    #[test]
    fn test_load_accepts_answer_alias_and_lowercase_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guesses.json");
        std::fs::write(
            &path,
            r#"[{"answer": {"year": 2000, "name": "A", "artist": "B"},
                 "guess": {"year": 1999, "name": "", "artist": ""},
                 "results": ["true", "false", "false"]}]"#,
        )
        .unwrap();

        let log = GuessLog::load(&path).unwrap();
        assert_eq!(log.records()[0].answer().year, 2000);
        assert!(log.records()[0].outcome().year);
    }

    #[test]
    fn test_load_rejects_bad_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guesses.json");
        std::fs::write(
            &path,
            r#"[{"answers": {"year": 2000, "name": "A", "artist": "B"},
                 "guess": {"year": 1999, "name": "", "artist": ""},
                 "results": ["yes", "no", "no"]}]"#,
        )
        .unwrap();

        assert!(GuessLog::load(&path).is_err());
    }

    #[test]
    fn test_stats() {
        let mut log = GuessLog::new();
        log.push(record(1976, (true, true, true)));
        log.push(record(1950, (false, true, false)));
        log.push(record(1977, (true, false, true)));
        log.push(record(-1, (false, true, true)));

        let stats = log.stats();
        assert_eq!(stats.rounds, 4);
        assert_eq!(stats.year_hits, 2);
        assert_eq!(stats.name_hits, 3);
        assert_eq!(stats.artist_hits, 3);
        assert_eq!(stats.bonus_rounds, 2);
        assert_relative_eq!(stats.year_accuracy, 0.5);
    }

    #[test]
    fn test_stats_empty_log() {
        let stats = GuessLog::new().stats();
        assert_eq!(stats.rounds, 0);
        assert_relative_eq!(stats.year_accuracy, 0.0);
    }
}
