use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

/// Write a synthetic games CSV for trying out the dashboard.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Output CSV path.
    #[arg(default_value = "games.csv")]
    out: PathBuf,

    /// Number of data rows to write.
    #[arg(long, default_value_t = 2000)]
    rows: usize,

    /// Generator seed; the same seed writes the same file.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

const PLATFORMS: [&str; 8] = ["PS2", "PS3", "PS4", "X360", "XOne", "Wii", "DS", "PC"];
const GENRES: [&str; 8] = [
    "Action", "Sports", "Shooter", "Racing", "Role-Playing", "Platform", "Puzzle", "Strategy",
];
const RATINGS: [&str; 6] = ["E", "E10+", "T", "M", "AO", "RP"];

/// One output row, in the column layout of the public games dataset.
#[derive(Serialize)]
struct Row {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Platform")]
    platform: &'static str,
    #[serde(rename = "Year_of_Release")]
    year_of_release: String,
    #[serde(rename = "Genre")]
    genre: &'static str,
    #[serde(rename = "NA_sales")]
    na_sales: String,
    #[serde(rename = "Critic_Score")]
    critic_score: String,
    #[serde(rename = "User_Score")]
    user_score: String,
    #[serde(rename = "Rating")]
    rating: &'static str,
}

/// Small deterministic generator (splitmix64); enough for sample rows.
struct SampleRng(u64);

impl SampleRng {
    fn next_u64(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[self.below(items.len())]
    }

    /// True with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }
}

fn generate_row(i: usize, rng: &mut SampleRng) -> Row {
    let platform = rng.pick(&PLATFORMS);
    let genre = rng.pick(&GENRES);
    // A few releases fall outside the dashboard's 2000–2022 window.
    let year = 1995 + rng.below(30);
    let user = 3.0 + rng.unit() * 6.5;
    let critic = (user + rng.unit() * 2.0 - 1.0).clamp(1.0, 9.9);

    // Defects the loader must drop or repair, mirroring the real dataset.
    let user_score = if rng.chance(0.08) {
        "tbd".to_string()
    } else {
        format!("{user:.1}")
    };
    let critic_score = if rng.chance(0.05) {
        String::new()
    } else if rng.chance(0.7) {
        format!("{:.0}", critic * 10.0)
    } else {
        format!("{critic:.1}")
    };
    let rating = if rng.chance(0.05) {
        ""
    } else if rng.chance(0.01) {
        "K-A"
    } else {
        rng.pick(&RATINGS)
    };

    Row {
        name: format!("{genre} Game {i}"),
        platform,
        year_of_release: format!("{year}.0"),
        genre,
        na_sales: format!("{:.2}", rng.unit() * 5.0),
        critic_score,
        user_score,
        rating,
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut rng = SampleRng(args.seed);
    let mut writer = csv::Writer::from_path(&args.out)
        .with_context(|| format!("creating {}", args.out.display()))?;
    for i in 0..args.rows {
        writer
            .serialize(generate_row(i, &mut rng))
            .with_context(|| format!("writing row {i}"))?;
    }
    writer.flush().context("flushing CSV")?;

    log::info!("Wrote {} games to {}", args.rows, args.out.display());
    println!("Wrote {} games to {}", args.rows, args.out.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults_and_overrides() {
        let args = Args::parse_from(["generate_sample"]);
        assert_eq!(args.out, PathBuf::from("games.csv"));
        assert_eq!(args.rows, 2000);
        assert_eq!(args.seed, 42);

        let args = Args::parse_from(["generate_sample", "small.csv", "--rows", "50", "--seed", "7"]);
        assert_eq!(args.out, PathBuf::from("small.csv"));
        assert_eq!(args.rows, 50);
        assert_eq!(args.seed, 7);
    }

    #[test]
    fn test_same_seed_same_rows() {
        let render = |seed| {
            let mut rng = SampleRng(seed);
            let mut writer = csv::Writer::from_writer(Vec::new());
            for i in 0..100 {
                writer.serialize(generate_row(i, &mut rng)).unwrap();
            }
            writer.into_inner().unwrap()
        };
        assert_eq!(render(42), render(42));
        assert_ne!(render(42), render(43));
    }

    #[test]
    fn test_unit_stays_in_range() {
        let mut rng = SampleRng(1);
        assert!((0..1000).map(|_| rng.unit()).all(|v| (0.0..1.0).contains(&v)));
    }
}
