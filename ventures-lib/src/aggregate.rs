//! Client-side join and aggregation.
//!
//! Dashboard pages fetch related collections independently and derive their
//! metrics here: counts per foreign key, decimal sums, groups, left joins and
//! two-key pivots. Every function borrows its inputs and allocates a fresh
//! result, so they can be re-run whenever a source collection changes.
//!
//! # Example
//!
//! ```
//! use ventures_lib::aggregate::attach_counts;
//!
//! #[derive(Clone)]
//! struct Event { id: i64 }
//! struct Registration { event_id: Option<i64> }
//!
//! let events = vec![Event { id: 1 }, Event { id: 2 }];
//! let registrations = vec![
//!     Registration { event_id: Some(1) },
//!     Registration { event_id: Some(1) },
//!     Registration { event_id: None },
//! ];
//!
//! let counted = attach_counts(&events, &registrations, |e| e.id, |r| r.event_id);
//! assert_eq!(counted[0].count, 2);
//! assert_eq!(counted[1].count, 0);
//! ```

use std::collections::HashMap;
use std::hash::Hash;

use rust_decimal::Decimal;

/// A primary row with the number of secondary rows that reference it.
#[derive(Debug, Clone, PartialEq)]
pub struct Counted<T> {
    /// The primary row.
    pub row: T,
    /// Number of secondary rows whose foreign key equals this row's key.
    pub count: usize,
}

/// A left row with the first matching right row, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct Joined<L, R> {
    /// The left row.
    pub left: L,
    /// The matching right row.
    pub right: Option<R>,
}

/// Counts items per key. Items whose key is `None` are skipped.
pub fn count_by<S, K>(items: &[S], key: impl Fn(&S) -> Option<K>) -> HashMap<K, usize>
where
    K: Eq + Hash,
{
    let mut counts = HashMap::new();
    for item in items {
        if let Some(k) = key(item) {
            *counts.entry(k).or_insert(0) += 1;
        }
    }
    counts
}

/// Sums an optional decimal amount per key. Missing amounts count as zero and
/// sums saturate at the decimal bounds.
pub fn sum_by<S, K>(
    items: &[S],
    key: impl Fn(&S) -> Option<K>,
    amount: impl Fn(&S) -> Option<Decimal>,
) -> HashMap<K, Decimal>
where
    K: Eq + Hash,
{
    let mut sums = HashMap::new();
    for item in items {
        if let Some(k) = key(item) {
            let sum = sums.entry(k).or_insert(Decimal::ZERO);
            *sum = sum.saturating_add(amount(item).unwrap_or(Decimal::ZERO));
        }
    }
    sums
}

/// Sums an optional decimal amount across all items, saturating at the
/// decimal bounds.
pub fn total<S>(items: &[S], amount: impl Fn(&S) -> Option<Decimal>) -> Decimal {
    items
        .iter()
        .filter_map(amount)
        .fold(Decimal::ZERO, |acc, value| acc.saturating_add(value))
}

/// Groups items by key, keeping groups in first-seen order and items in input
/// order within each group.
pub fn group_by<'a, S, K>(items: &'a [S], key: impl Fn(&S) -> K) -> Vec<(K, Vec<&'a S>)>
where
    K: Eq + Hash + Clone,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<&'a S>)> = Vec::new();
    for item in items {
        let k = key(item);
        match index.get(&k) {
            Some(&position) => groups[position].1.push(item),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, vec![item]));
            }
        }
    }
    groups
}

/// Attaches to every primary row the number of secondary rows referencing it.
///
/// Primary rows with no references get zero. Secondary rows referencing a key
/// absent from `primary` produce nothing.
pub fn attach_counts<P, S, K>(
    primary: &[P],
    secondary: &[S],
    primary_key: impl Fn(&P) -> K,
    foreign_key: impl Fn(&S) -> Option<K>,
) -> Vec<Counted<P>>
where
    P: Clone,
    K: Eq + Hash,
{
    let counts = count_by(secondary, foreign_key);
    primary
        .iter()
        .map(|row| Counted {
            count: counts.get(&primary_key(row)).copied().unwrap_or(0),
            row: row.clone(),
        })
        .collect()
}

/// Pairs each left row with the first right row sharing its key.
pub fn left_join<L, R, K>(
    left: &[L],
    right: &[R],
    left_key: impl Fn(&L) -> Option<K>,
    right_key: impl Fn(&R) -> K,
) -> Vec<Joined<L, R>>
where
    L: Clone,
    R: Clone,
    K: Eq + Hash,
{
    let mut index: HashMap<K, &R> = HashMap::new();
    for row in right {
        index.entry(right_key(row)).or_insert(row);
    }
    left.iter()
        .map(|row| Joined {
            left: row.clone(),
            right: left_key(row).and_then(|k| index.get(&k).map(|r| (*r).clone())),
        })
        .collect()
}

/// Counts items per `(row, column)` key pair, for heat maps.
pub fn pivot_count<S, R, C>(
    items: &[S],
    row_key: impl Fn(&S) -> R,
    column_key: impl Fn(&S) -> C,
) -> HashMap<(R, C), usize>
where
    R: Eq + Hash,
    C: Eq + Hash,
{
    count_by(items, |item| Some((row_key(item), column_key(item))))
}
