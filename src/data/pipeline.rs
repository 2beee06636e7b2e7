use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::Serialize;

use super::filter::{filtered, FilterSelection};
use super::model::{GameRecord, GameTable};

// ---------------------------------------------------------------------------
// Snapshot types
// ---------------------------------------------------------------------------

/// Number of games released on `platform` in `year`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearPlatformCount {
    pub year: i32,
    pub platform: String,
    pub count: usize,
}

/// One scatter point.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorePoint {
    pub user_score: f64,
    pub critic_score: f64,
    pub genre: String,
}

/// Mean numeric age rating of one genre.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreRating {
    pub genre: String,
    pub average_rating: f64,
}

/// Everything the dashboard shows for one filter selection.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DashboardSnapshot {
    pub total_games: usize,
    /// `None` when no game matches.
    pub average_user_score: Option<f64>,
    /// `None` when no game matches.
    pub average_critic_score: Option<f64>,
    /// Sorted by platform, then year.
    pub games_by_year_platform: Vec<YearPlatformCount>,
    /// Table order.
    pub user_vs_critic: Vec<ScorePoint>,
    /// Genres in the order first encountered.
    pub average_rating_by_genre: Vec<GenreRating>,
}

/// Per-platform release counts aligned on a shared year axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackedSeries {
    pub years: Vec<i32>,
    /// platform → counts, one per entry of `years` (zero-filled).
    pub series: BTreeMap<String, Vec<usize>>,
}

impl DashboardSnapshot {
    /// Reshape `games_by_year_platform` for a stacked-area chart.
    pub fn stacked_series(&self) -> StackedSeries {
        let years: Vec<i32> = self
            .games_by_year_platform
            .iter()
            .map(|row| row.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let position: HashMap<i32, usize> =
            years.iter().enumerate().map(|(i, &y)| (y, i)).collect();

        let mut series: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for row in &self.games_by_year_platform {
            let counts = series
                .entry(row.platform.clone())
                .or_insert_with(|| vec![0; years.len()]);
            counts[position[&row.year]] = row.count;
        }
        StackedSeries { years, series }
    }
}

// ---------------------------------------------------------------------------
// evaluate – the filter/aggregate pipeline
// ---------------------------------------------------------------------------

/// Filter `table` by `selection` and aggregate the result.
///
/// Pure: reads nothing but its arguments, so it can be called from any thread
/// against the same table.
pub fn evaluate(table: &GameTable, selection: &FilterSelection) -> DashboardSnapshot {
    let rows: Vec<&GameRecord> = filtered(table, selection).collect();

    let snapshot = DashboardSnapshot {
        total_games: rows.len(),
        average_user_score: mean(rows.iter().map(|r| r.user_score)).map(round1),
        average_critic_score: mean(rows.iter().map(|r| r.critic_score)).map(round1),
        games_by_year_platform: count_by_year_platform(&rows),
        user_vs_critic: rows
            .iter()
            .map(|r| ScorePoint {
                user_score: r.user_score,
                critic_score: r.critic_score,
                genre: r.genre.clone(),
            })
            .collect(),
        average_rating_by_genre: average_rating_by_genre(&rows),
    };

    log::debug!(
        "Evaluated {:?}: {} of {} games",
        selection,
        snapshot.total_games,
        table.len()
    );
    snapshot
}

fn count_by_year_platform(rows: &[&GameRecord]) -> Vec<YearPlatformCount> {
    let mut counts: BTreeMap<(&str, i32), usize> = BTreeMap::new();
    for rec in rows {
        *counts
            .entry((rec.platform.as_str(), rec.year_of_release))
            .or_default() += 1;
    }
    counts
        .into_iter()
        .map(|((platform, year), count)| YearPlatformCount {
            year,
            platform: platform.to_string(),
            count,
        })
        .collect()
}

fn average_rating_by_genre(rows: &[&GameRecord]) -> Vec<GenreRating> {
    // (genre, sum, count) in encounter order.
    let mut groups: Vec<(&str, u64, u64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for rec in rows {
        let slot = *index.entry(rec.genre.as_str()).or_insert_with(|| {
            groups.push((rec.genre.as_str(), 0, 0));
            groups.len() - 1
        });
        groups[slot].1 += u64::from(rec.numeric_rating());
        groups[slot].2 += 1;
    }
    groups
        .into_iter()
        .map(|(genre, sum, count)| GenreRating {
            genre: genre.to_string(),
            average_rating: sum as f64 / count as f64,
        })
        .collect()
}

/// Arithmetic mean; `None` for an empty input.
fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Round to one decimal place, ties to even.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
