use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Rating – ESRB age rating
// ---------------------------------------------------------------------------

/// Age rating category as written in the source `Rating` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Rating {
    #[serde(rename = "RP")]
    RatingPending,
    #[serde(rename = "E")]
    Everyone,
    #[serde(rename = "E10+")]
    Everyone10Plus,
    #[serde(rename = "T")]
    Teen,
    #[serde(rename = "M")]
    Mature,
    #[serde(rename = "AO")]
    AdultsOnly,
}

impl Rating {
    pub const ALL: [Rating; 6] = [
        Rating::RatingPending,
        Rating::Everyone,
        Rating::Everyone10Plus,
        Rating::Teen,
        Rating::Mature,
        Rating::AdultsOnly,
    ];

    /// Fixed numeric scale: RP=0, E=1, E10+=2, T=3, M=4, AO=5.
    pub fn numeric(self) -> u8 {
        match self {
            Rating::RatingPending => 0,
            Rating::Everyone => 1,
            Rating::Everyone10Plus => 2,
            Rating::Teen => 3,
            Rating::Mature => 4,
            Rating::AdultsOnly => 5,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Rating::RatingPending => "RP",
            Rating::Everyone => "E",
            Rating::Everyone10Plus => "E10+",
            Rating::Teen => "T",
            Rating::Mature => "M",
            Rating::AdultsOnly => "AO",
        }
    }
}

impl FromStr for Rating {
    type Err = ();

    /// Exact, case-sensitive match against the six known codes.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rating::ALL
            .into_iter()
            .find(|r| r.code() == s)
            .ok_or(())
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ---------------------------------------------------------------------------
// GameRecord – one cleaned row of the source CSV
// ---------------------------------------------------------------------------

/// A single game after load-time cleaning. Every field is present.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub name: String,
    pub platform: String,
    pub year_of_release: i32,
    pub genre: String,
    /// 0–10 scale.
    pub user_score: f64,
    /// 0–10 scale (normalised from 0–100 at load time when needed).
    pub critic_score: f64,
    pub rating: Rating,
}

impl GameRecord {
    /// Always derived from `rating`, never stored.
    pub fn numeric_rating(&self) -> u8 {
        self.rating.numeric()
    }
}

// ---------------------------------------------------------------------------
// GameTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Immutable in-memory table built once by the loader.
#[derive(Debug, Clone, Default)]
pub struct GameTable {
    records: Vec<GameRecord>,
    /// Sorted distinct platforms, for the filter controls.
    platforms: BTreeSet<String>,
    /// Sorted distinct genres, for the filter controls.
    genres: BTreeSet<String>,
}

impl GameTable {
    /// Build the distinct-value indices from the cleaned records.
    pub fn from_records(records: Vec<GameRecord>) -> Self {
        let mut platforms = BTreeSet::new();
        let mut genres = BTreeSet::new();
        for rec in &records {
            platforms.insert(rec.platform.clone());
            genres.insert(rec.genre.clone());
        }
        GameTable {
            records,
            platforms,
            genres,
        }
    }

    pub fn records(&self) -> &[GameRecord] {
        &self.records
    }

    pub fn platforms(&self) -> &BTreeSet<String> {
        &self.platforms
    }

    pub fn genres(&self) -> &BTreeSet<String> {
        &self.genres
    }

    /// Number of games.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn record(
    platform: &str,
    genre: &str,
    year: i32,
    user: f64,
    critic: f64,
    rating: Rating,
) -> GameRecord {
    GameRecord {
        name: format!("{genre} on {platform} ({year})"),
        platform: platform.to_string(),
        year_of_release: year,
        genre: genre.to_string(),
        user_score: user,
        critic_score: critic,
        rating,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_numeric_mapping() {
        let expected = [("RP", 0), ("E", 1), ("E10+", 2), ("T", 3), ("M", 4), ("AO", 5)];
        for (code, value) in expected {
            let rating: Rating = code.parse().unwrap();
            assert_eq!(rating.numeric(), value);
            assert_eq!(rating.to_string(), code);
        }
    }

    #[test]
    fn test_rating_rejects_unknown_codes() {
        assert!("K-A".parse::<Rating>().is_err());
        assert!("".parse::<Rating>().is_err());
        assert!("m".parse::<Rating>().is_err());
        assert!(" M".parse::<Rating>().is_err());
    }

    #[test]
    fn test_numeric_rating_follows_rating() {
        let rec = record("PS4", "Action", 2015, 8.0, 7.5, Rating::Teen);
        assert_eq!(rec.numeric_rating(), 3);
    }

    #[test]
    fn test_table_distinct_values_sorted() {
        let table = GameTable::from_records(vec![
            record("X360", "Shooter", 2010, 7.0, 8.0, Rating::Mature),
            record("PS3", "Action", 2011, 7.5, 7.0, Rating::Teen),
            record("PS3", "Shooter", 2012, 6.0, 6.5, Rating::Mature),
        ]);
        assert_eq!(table.len(), 3);
        assert_eq!(
            table.platforms().iter().collect::<Vec<_>>(),
            vec!["PS3", "X360"]
        );
        assert_eq!(
            table.genres().iter().collect::<Vec<_>>(),
            vec!["Action", "Shooter"]
        );
    }
}
