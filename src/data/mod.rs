/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///   games.csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + clean rows → GameTable (once per file)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ GameTable │  Vec<GameRecord>, distinct platforms / genres
///   └──────────┘
///        │  + FilterSelection
///        ▼
///   ┌──────────┐
///   │ pipeline  │  filter → DashboardSnapshot (metrics + chart tables)
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod pipeline;
