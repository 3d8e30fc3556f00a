use std::collections::HashSet;
use std::hash::Hash;

use denuo_core::NaturalKey;

/// Keeps the first occurrence of every key, preserving order.
pub fn dedupe_by<T, K, F>(items: Vec<T>, key_of: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(key_of(item)))
        .collect()
}

pub fn dedupe<T: NaturalKey>(items: Vec<T>) -> Vec<T> {
    dedupe_by(items, |item| item.natural_key().to_string())
}
