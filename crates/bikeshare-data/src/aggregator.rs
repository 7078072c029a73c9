//! Frequency counting over columns of the trip dataset.

use std::collections::HashMap;
use std::hash::Hash;

// ── FrequencyTable ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct Tally {
    count: usize,
    first_seen: usize,
}

/// Occurrence counts for the distinct values of one column.
///
/// Remembers where each value first appeared so that ties can be broken in
/// favour of the earliest value.
#[derive(Debug, Clone)]
pub struct FrequencyTable<T> {
    tallies: HashMap<T, Tally>,
    total: usize,
}

impl<T: Eq + Hash + Clone> FrequencyTable<T> {
    /// Count every item yielded by `values`.
    pub fn from_values<I: IntoIterator<Item = T>>(values: I) -> Self {
        let mut tallies: HashMap<T, Tally> = HashMap::new();
        let mut total = 0usize;
        for (idx, value) in values.into_iter().enumerate() {
            tallies
                .entry(value)
                .or_insert(Tally {
                    count: 0,
                    first_seen: idx,
                })
                .count += 1;
            total += 1;
        }
        Self { tallies, total }
    }

    /// Number of items counted (not distinct values).
    pub fn total(&self) -> usize {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Distinct values with their counts, most frequent first.
    ///
    /// Values with equal counts keep the order in which they first appeared.
    pub fn descending(&self) -> Vec<(T, usize)> {
        let mut rows: Vec<(&T, Tally)> = self.tallies.iter().map(|(v, t)| (v, *t)).collect();
        rows.sort_by(|a, b| {
            b.1.count
                .cmp(&a.1.count)
                .then(a.1.first_seen.cmp(&b.1.first_seen))
        });
        rows.into_iter().map(|(v, t)| (v.clone(), t.count)).collect()
    }

    /// The most frequent value; ties go to the one encountered first.
    ///
    /// Returns `None` when nothing was counted.
    pub fn mode(&self) -> Option<T> {
        self.tallies
            .iter()
            .min_by(|a, b| {
                b.1.count
                    .cmp(&a.1.count)
                    .then(a.1.first_seen.cmp(&b.1.first_seen))
            })
            .map(|(v, _)| v.clone())
    }
}

/// Shorthand for `FrequencyTable::from_values(values).mode()`.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    FrequencyTable::from_values(values).mode()
}

/// Shorthand for `FrequencyTable::from_values(values).descending()`.
pub fn value_counts<T, I>(values: I) -> Vec<(T, usize)>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    FrequencyTable::from_values(values).descending()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── mode ──────────────────────────────────────────────────────────────────

    #[test]
    fn test_mode_picks_most_frequent() {
        assert_eq!(mode(vec![3, 1, 3, 2, 3, 1]), Some(3));
    }

    #[test]
    fn test_mode_tie_goes_to_first_encountered() {
        assert_eq!(mode(vec!["b", "a", "a", "b"]), Some("b"));
        assert_eq!(mode(vec![17, 8, 8, 17]), Some(17));
    }

    #[test]
    fn test_mode_empty_is_none() {
        assert_eq!(mode(Vec::<u32>::new()), None);
    }

    #[test]
    fn test_mode_single_value() {
        assert_eq!(mode(vec!["only".to_string()]), Some("only".to_string()));
    }

    // ── value_counts ──────────────────────────────────────────────────────────

    #[test]
    fn test_value_counts_descending() {
        let counts = value_counts(vec!["Subscriber", "Customer", "Subscriber", "Dependent", "Subscriber", "Customer"]);
        assert_eq!(
            counts,
            vec![("Subscriber", 3), ("Customer", 2), ("Dependent", 1)]
        );
    }

    #[test]
    fn test_value_counts_ties_keep_first_seen_order() {
        let counts = value_counts(vec!["Male", "Female", "Female", "Male"]);
        assert_eq!(counts, vec![("Male", 2), ("Female", 2)]);
    }

    #[test]
    fn test_value_counts_empty() {
        assert!(value_counts(Vec::<String>::new()).is_empty());
    }

    // ── FrequencyTable ────────────────────────────────────────────────────────

    #[test]
    fn test_frequency_table_total_counts_items() {
        let table = FrequencyTable::from_values(vec![1, 1, 2]);
        assert_eq!(table.total(), 3);
        assert!(!table.is_empty());
        assert!(FrequencyTable::<u8>::from_values(vec![]).is_empty());
    }
}
