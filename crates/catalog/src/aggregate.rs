//! Cross-source deduplication by a stable identity key.
//!
//! Objects are compared only by their key (e.g. NORAD catalog number). No
//! source is preferred over another; [`merge`] keeps the first occurrence in
//! contribution order, and the counts do not depend on that order.

use std::collections::HashSet;
use std::hash::Hash;

use serde::Serialize;

/// Counts describing one merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AggregateResult {
    /// Distinct identity keys across all contributions.
    pub total_sats: usize,
    /// Sum of per-source object counts minus `total_sats`.
    pub dups_removed: usize,
}

/// Merged object list together with its counts.
#[derive(Debug, Clone, PartialEq)]
pub struct Merged<T> {
    pub objects: Vec<T>,
    pub result: AggregateResult,
}

/// Count distinct keys across per-source key lists.
pub fn count_identities<I, S, K>(per_source: I) -> AggregateResult
where
    I: IntoIterator<Item = S>,
    S: IntoIterator<Item = K>,
    K: Eq + Hash,
{
    let mut seen = HashSet::new();
    let mut contributed = 0usize;
    for keys in per_source {
        for key in keys {
            contributed += 1;
            seen.insert(key);
        }
    }
    AggregateResult {
        total_sats: seen.len(),
        dups_removed: contributed - seen.len(),
    }
}

/// Merge per-source object lists, dropping objects whose key was already
/// seen.
pub fn merge<'a, T, K, I, F>(per_source: I, key_fn: F) -> Merged<T>
where
    T: Clone + 'a,
    K: Eq + Hash,
    I: IntoIterator<Item = &'a [T]>,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();
    let mut objects = Vec::new();
    let mut contributed = 0usize;

    for list in per_source {
        contributed += list.len();
        for obj in list {
            if seen.insert(key_fn(obj)) {
                objects.push(obj.clone());
            }
        }
    }

    let total_sats = objects.len();
    Merged {
        objects,
        result: AggregateResult {
            total_sats,
            dups_removed: contributed - total_sats,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Sat {
        norad: u32,
        source: &'static str,
    }

    fn sats(source: &'static str, ids: &[u32]) -> Vec<Sat> {
        ids.iter().map(|&norad| Sat { norad, source }).collect()
    }

    #[test]
    fn overlapping_sources() {
        let result = count_identities([vec![1, 2, 3], vec![2, 3, 4]]);
        assert_eq!(
            result,
            AggregateResult {
                total_sats: 4,
                dups_removed: 2
            }
        );
    }

    #[test]
    fn empty_contributions_count_zero() {
        let result = count_identities([vec![1, 2], vec![]]);
        assert_eq!(result.total_sats, 2);
        assert_eq!(result.dups_removed, 0);

        let none: Vec<Vec<u32>> = Vec::new();
        assert_eq!(count_identities(none), AggregateResult::default());
    }

    #[test]
    fn merge_keeps_first_occurrence() {
        let a = sats("a", &[1, 2, 3]);
        let b = sats("b", &[2, 3, 4]);
        let merged = merge([a.as_slice(), b.as_slice()], |s| s.norad);

        assert_eq!(merged.result.total_sats, 4);
        assert_eq!(merged.result.dups_removed, 2);
        let picked: Vec<(u32, &str)> = merged.objects.iter().map(|s| (s.norad, s.source)).collect();
        assert_eq!(picked, vec![(1, "a"), (2, "a"), (3, "a"), (4, "b")]);
    }

    #[test]
    fn counts_are_order_independent() {
        let a = sats("a", &[10, 11]);
        let b = sats("b", &[11, 12, 13]);
        let ab = merge([a.as_slice(), b.as_slice()], |s| s.norad).result;
        let ba = merge([b.as_slice(), a.as_slice()], |s| s.norad).result;
        assert_eq!(ab, ba);
    }

    #[test]
    fn repeats_within_one_source_are_duplicates() {
        let result = count_identities([vec![7, 7, 8]]);
        assert_eq!(result.total_sats, 2);
        assert_eq!(result.dups_removed, 1);
    }
}
