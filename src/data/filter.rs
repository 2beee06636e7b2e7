use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::loader::{FIRST_YEAR, LAST_YEAR};
use super::model::{GameRecord, GameTable};

// ---------------------------------------------------------------------------
// Filter selection: what the user picked in the controls
// ---------------------------------------------------------------------------

/// Current control values. An empty platform or genre set means "no filter".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSelection {
    pub platforms: BTreeSet<String>,
    pub genres: BTreeSet<String>,
    /// Inclusive `(first, last)`. `first > last` matches nothing.
    pub year_range: (i32, i32),
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            platforms: BTreeSet::new(),
            genres: BTreeSet::new(),
            year_range: (FIRST_YEAR, LAST_YEAR),
        }
    }
}

impl FilterSelection {
    /// Whether `rec` passes all three predicates.
    pub fn matches(&self, rec: &GameRecord) -> bool {
        let (first, last) = self.year_range;
        (self.platforms.is_empty() || self.platforms.contains(&rec.platform))
            && (self.genres.is_empty() || self.genres.contains(&rec.genre))
            && first <= rec.year_of_release
            && rec.year_of_release <= last
    }

    /// True when nothing restricts the default year window.
    pub fn is_unrestricted(&self) -> bool {
        *self == Self::default()
    }
}

/// Toggle membership of `value` in a selection set.
pub fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}

/// Iterate the records that pass `selection`, in table order.
pub fn filtered<'a>(
    table: &'a GameTable,
    selection: &'a FilterSelection,
) -> impl Iterator<Item = &'a GameRecord> + 'a {
    table.records().iter().filter(move |rec| selection.matches(rec))
}

/// Return indices of records that pass `selection`.
pub fn filtered_indices(table: &GameTable, selection: &FilterSelection) -> Vec<usize> {
    table
        .records()
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{record, Rating};

    fn table() -> GameTable {
        GameTable::from_records(vec![
            record("PS4", "Action", 2015, 8.0, 7.5, Rating::Mature),
            record("PS4", "Action", 2016, 6.0, 6.0, Rating::Teen),
            record("XOne", "Shooter", 2015, 7.0, 8.0, Rating::Mature),
            record("Wii", "Sports", 2006, 8.0, 7.6, Rating::Everyone),
        ])
    }

    fn names(set: &[&str]) -> BTreeSet<String> {
        set.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_default_selection_keeps_everything() {
        let table = table();
        let selection = FilterSelection::default();
        assert!(selection.is_unrestricted());
        assert_eq!(filtered_indices(&table, &selection), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_predicates_are_conjunctive() {
        let table = table();
        let selection = FilterSelection {
            platforms: names(&["PS4", "XOne"]),
            genres: names(&["Action"]),
            year_range: (2015, 2015),
        };
        assert_eq!(filtered_indices(&table, &selection), vec![0]);
    }

    #[test]
    fn test_year_range_is_inclusive() {
        let table = table();
        let selection = FilterSelection {
            year_range: (2006, 2015),
            ..Default::default()
        };
        assert_eq!(filtered_indices(&table, &selection), vec![0, 2, 3]);
    }

    #[test]
    fn test_inverted_year_range_matches_nothing() {
        let table = table();
        let selection = FilterSelection {
            year_range: (2016, 2015),
            ..Default::default()
        };
        assert!(filtered_indices(&table, &selection).is_empty());
    }

    #[test]
    fn test_unknown_platform_matches_nothing() {
        let table = table();
        let selection = FilterSelection {
            platforms: names(&["Dreamcast"]),
            ..Default::default()
        };
        assert_eq!(filtered(&table, &selection).count(), 0);
    }

    #[test]
    fn test_toggle() {
        let mut set = BTreeSet::new();
        toggle(&mut set, "PS4");
        assert!(set.contains("PS4"));
        toggle(&mut set, "PS4");
        assert!(set.is_empty());
    }
}
