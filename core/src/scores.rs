use alloc::collections::BTreeMap;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// How many best times are kept.
pub const MAX_SCORES: usize = 10;

/// Key under which the score list is stored.
pub const SCORES_KEY: &str = "scores";

/// Receives the elapsed time of every won game.
pub trait ScoreStore {
    /// Records `time` and returns its zero-based rank, or `None` when it did not make the list.
    fn append_and_rank(&mut self, time: f64) -> core::result::Result<Option<usize>, ScoreError>;
}

/// Best times in seconds, ascending, at most [`MAX_SCORES`] of them.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreList {
    times: Vec<f64>,
}

impl ScoreList {
    /// Parses the comma-separated stored form, dropping anything that is not a usable time.
    pub fn parse(text: &str) -> Self {
        let mut times: Vec<f64> = text
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .filter_map(|entry| match entry.parse::<f64>() {
                Ok(time) if is_valid_time(time) => Some(time),
                _ => {
                    log::warn!("Ignoring invalid stored score {:?}", entry);
                    None
                }
            })
            .collect();
        times.sort_by(f64::total_cmp);
        times.truncate(MAX_SCORES);
        Self { times }
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn best(&self) -> Option<f64> {
        self.times.first().copied()
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Inserts `time` in order, returning its rank if it is among the best.
    pub fn insert(&mut self, time: f64) -> core::result::Result<Option<usize>, ScoreError> {
        if !is_valid_time(time) {
            return Err(ScoreError::InvalidTime(time));
        }

        // ties rank behind the times already on the list
        let rank = self.times.partition_point(|&existing| existing <= time);
        if rank >= MAX_SCORES {
            return Ok(None);
        }
        self.times.insert(rank, time);
        self.times.truncate(MAX_SCORES);
        Ok(Some(rank))
    }

    pub fn to_text(&self) -> String {
        self.times
            .iter()
            .map(|time| format!("{time}"))
            .collect::<Vec<_>>()
            .join(",")
    }
}

fn is_valid_time(time: f64) -> bool {
    time.is_finite() && time >= 0.0
}

/// A string key-value store such as browser local storage or a directory of text files.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> core::result::Result<(), ScoreError>;
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> core::result::Result<(), ScoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Keeps the ranked [`ScoreList`] under [`SCORES_KEY`] of a [`KeyValueStore`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyedScoreStore<K> {
    store: K,
}

impl<K: KeyValueStore> KeyedScoreStore<K> {
    pub fn new(store: K) -> Self {
        Self { store }
    }

    pub fn load(&self) -> ScoreList {
        self.store
            .get(SCORES_KEY)
            .map(|text| ScoreList::parse(&text))
            .unwrap_or_default()
    }

    pub fn store(&self) -> &K {
        &self.store
    }
}

impl<K: KeyValueStore> ScoreStore for KeyedScoreStore<K> {
    fn append_and_rank(&mut self, time: f64) -> core::result::Result<Option<usize>, ScoreError> {
        let mut scores = self.load();
        let rank = scores.insert(time)?;
        if rank.is_some() {
            self.store.set(SCORES_KEY, &scores.to_text())?;
        }
        log::debug!("Recorded time {} with rank {:?}", time, rank);
        Ok(rank)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_sorts_and_skips_garbage() {
        let scores = ScoreList::parse(" 12.5, abc,3,,-1, NaN, inf, 7.25 ");

        assert_eq!(scores.times(), &[3.0, 7.25, 12.5]);
        assert_eq!(scores.best(), Some(3.0));
    }

    #[test]
    fn parse_keeps_only_the_best_ten() {
        let text = "15,14,13,12,11,10,9,8,7,6,5,4,3,2,1";

        let scores = ScoreList::parse(text);

        assert_eq!(scores.len(), MAX_SCORES);
        assert_eq!(scores.times().first(), Some(&1.0));
        assert_eq!(scores.times().last(), Some(&10.0));
    }

    #[test]
    fn parse_empty_text_is_empty() {
        assert!(ScoreList::parse("").is_empty());
    }

    #[test]
    fn insert_ranks_new_times() {
        let mut scores = ScoreList::parse("10,20,30");

        assert_eq!(scores.insert(15.0), Ok(Some(1)));
        assert_eq!(scores.insert(20.0), Ok(Some(3)));
        assert_eq!(scores.times(), &[10.0, 15.0, 20.0, 20.0, 30.0]);
    }

    #[test]
    fn insert_drops_times_outside_the_list() {
        let mut scores = ScoreList::parse("1,2,3,4,5,6,7,8,9,10");

        assert_eq!(scores.insert(11.0), Ok(None));
        assert_eq!(scores.insert(0.5), Ok(Some(0)));
        assert_eq!(scores.len(), MAX_SCORES);
        assert_eq!(scores.times().last(), Some(&9.0));
    }

    #[test]
    fn insert_rejects_invalid_times() {
        let mut scores = ScoreList::default();

        assert_eq!(scores.insert(-1.0), Err(ScoreError::InvalidTime(-1.0)));
        assert!(scores.insert(f64::NAN).is_err());
        assert!(scores.is_empty());
    }

    #[test]
    fn keyed_store_persists_the_comma_form() {
        let mut store = KeyedScoreStore::new(MemoryStore::new());

        assert_eq!(store.append_and_rank(42.5), Ok(Some(0)));
        assert_eq!(store.append_and_rank(7.0), Ok(Some(0)));
        assert_eq!(store.append_and_rank(50.0), Ok(Some(2)));

        assert_eq!(store.store().get(SCORES_KEY).as_deref(), Some("7,42.5,50"));
        assert_eq!(store.load().times(), &[7.0, 42.5, 50.0]);
    }

    #[test]
    fn keyed_store_recovers_from_corrupt_data() {
        let mut kv = MemoryStore::new();
        kv.set(SCORES_KEY, "oops,,3").unwrap();
        let mut store = KeyedScoreStore::new(kv);

        assert_eq!(store.append_and_rank(5.0), Ok(Some(1)));
        assert_eq!(store.store().get(SCORES_KEY).as_deref(), Some("3,5"));
    }
}
