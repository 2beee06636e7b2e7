use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use csv::StringRecord;
use thiserror::Error;

use super::model::{GameRecord, GameTable, Rating};

/// Inclusive range of release years kept at load time.
pub const FIRST_YEAR: i32 = 2000;
pub const LAST_YEAR: i32 = 2022;

/// Critic scores on a 0–100 scale are brought down to 0–10.
const SCORE_SCALE_MAX: f64 = 10.0;

// ---------------------------------------------------------------------------
// Row-level defects
// ---------------------------------------------------------------------------

/// Why a source row was excluded from the table. Never fatal.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowDefect {
    #[error("missing value in '{0}'")]
    Missing(&'static str),

    #[error("'{value}' in '{column}' is not numeric")]
    NotNumeric { column: &'static str, value: String },

    #[error("release year {0} outside 2000..=2022")]
    YearOutOfRange(i32),

    #[error("critic score {0} above 10 after normalisation")]
    CriticOutOfRange(f64),

    #[error("unknown rating '{0}'")]
    UnknownRating(String),
}

/// Outcome counters for a single load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub rows_read: usize,
    pub rows_dropped: usize,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and clean the games CSV at `path`.
///
/// Fails when the file cannot be opened, a required column is missing or a
/// record is malformed. Rows with defective values are dropped silently.
pub fn load_file(path: &Path) -> Result<(GameTable, LoadReport)> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    load_reader(file).with_context(|| format!("loading {}", path.display()))
}

/// Same as [`load_file`] over any byte source.
pub fn load_reader<R: Read>(source: R) -> Result<(GameTable, LoadReport)> {
    load_csv(csv::Reader::from_reader(source))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Column positions of the fields used downstream.
struct Columns {
    name: usize,
    platform: usize,
    year: usize,
    genre: usize,
    user_score: usize,
    critic_score: usize,
    rating: usize,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| h == column)
                .with_context(|| format!("CSV missing '{column}' column"))
        };
        Ok(Columns {
            name: find("Name")?,
            platform: find("Platform")?,
            year: find("Year_of_Release")?,
            genre: find("Genre")?,
            user_score: find("User_Score")?,
            critic_score: find("Critic_Score")?,
            rating: find("Rating")?,
        })
    }
}

fn load_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<(GameTable, LoadReport)> {
    let headers = reader.headers().context("reading CSV headers")?.clone();
    let columns = Columns::locate(&headers)?;

    let mut records = Vec::new();
    let mut report = LoadReport::default();

    // 1-based data row, header excluded.
    for (data_row, result) in (1usize..).zip(reader.records()) {
        let row = result.with_context(|| format!("CSV data row {data_row}"))?;
        report.rows_read += 1;

        match parse_row(&row, &columns) {
            Ok(rec) => records.push(rec),
            Err(defect) => {
                report.rows_dropped += 1;
                let line = row.position().map_or(0, |p| p.line());
                log::debug!("Dropping CSV data row {data_row} (line {line}): {defect}");
            }
        }
    }

    if report.rows_dropped > 0 {
        log::warn!(
            "Dropped {} of {} rows with missing or invalid values",
            report.rows_dropped,
            report.rows_read
        );
    }

    Ok((GameTable::from_records(records), report))
}

/// Clean one source row into a [`GameRecord`].
fn parse_row(row: &StringRecord, columns: &Columns) -> Result<GameRecord, RowDefect> {
    let user_score = parse_number(cell(row, columns.user_score), "User_Score");
    let critic_score =
        parse_number(cell(row, columns.critic_score), "Critic_Score").map(normalize_critic);

    let year_of_release = parse_year(cell(row, columns.year), "Year_of_Release")?;
    if !(FIRST_YEAR..=LAST_YEAR).contains(&year_of_release) {
        return Err(RowDefect::YearOutOfRange(year_of_release));
    }

    let name = required(row, columns.name, "Name")?;
    let platform = required(row, columns.platform, "Platform")?;
    let genre = required(row, columns.genre, "Genre")?;
    let user_score = user_score?;
    let critic_score = on_critic_scale(critic_score?)?;

    let rating_code = required(row, columns.rating, "Rating")?;
    let rating = rating_code
        .parse::<Rating>()
        .map_err(|()| RowDefect::UnknownRating(rating_code))?;

    Ok(GameRecord {
        name,
        platform,
        year_of_release,
        genre,
        user_score,
        critic_score,
        rating,
    })
}

fn cell(row: &StringRecord, idx: usize) -> &str {
    row.get(idx).unwrap_or("").trim()
}

fn required(row: &StringRecord, idx: usize, column: &'static str) -> Result<String, RowDefect> {
    match cell(row, idx) {
        "" => Err(RowDefect::Missing(column)),
        value => Ok(value.to_string()),
    }
}

/// Parse a finite float, treating blanks as missing.
fn parse_number(s: &str, column: &'static str) -> Result<f64, RowDefect> {
    if s.is_empty() {
        return Err(RowDefect::Missing(column));
    }
    s.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RowDefect::NotNumeric {
            column,
            value: s.to_string(),
        })
}

/// Years may be written as `2006` or `2006.0`.
fn parse_year(s: &str, column: &'static str) -> Result<i32, RowDefect> {
    if let Ok(year) = s.parse::<i32>() {
        return Ok(year);
    }
    let value = parse_number(s, column)?;
    if value.fract() != 0.0 || value < i32::MIN as f64 || value > i32::MAX as f64 {
        return Err(RowDefect::NotNumeric {
            column,
            value: s.to_string(),
        });
    }
    Ok(value as i32)
}

/// Inputs above 100 are still off the 0–10 scale after one division.
fn on_critic_scale(value: f64) -> Result<f64, RowDefect> {
    if value <= SCORE_SCALE_MAX {
        Ok(value)
    } else {
        Err(RowDefect::CriticOutOfRange(value))
    }
}

/// Bring a 0–100 critic score onto the 0–10 user-score scale.
pub fn normalize_critic(score: f64) -> f64 {
    if score > SCORE_SCALE_MAX {
        score / 10.0
    } else {
        score
    }
}
