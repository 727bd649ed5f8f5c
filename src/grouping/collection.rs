use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::COMPOSITE_KEY_SEPARATOR;
use crate::error::SyncError;

/// Entity identifier that records are bucketed under for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupKey(String);

impl GroupKey {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for GroupKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for GroupKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<i64> for GroupKey {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

/// Transient `entity#date` key of the first grouping pass.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeKey {
    pub entity: GroupKey,
    pub date: NaiveDate,
}

impl CompositeKey {
    pub fn new(entity: GroupKey, date: NaiveDate) -> Self {
        Self { entity, date }
    }

    pub fn into_parts(self) -> (GroupKey, NaiveDate) {
        (self.entity, self.date)
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.entity, COMPOSITE_KEY_SEPARATOR, self.date)
    }
}

impl FromStr for CompositeKey {
    type Err = SyncError;

    /// Splits on the last separator, so entity ids may themselves contain `#`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SyncError::InvalidState(format!("Invalid composite key: {s}"));
        let (entity, date) = s.rsplit_once(COMPOSITE_KEY_SEPARATOR).ok_or_else(invalid)?;
        let date = date.parse::<NaiveDate>().map_err(|_| invalid())?;
        Ok(Self::new(GroupKey::new(entity), date))
    }
}

/// Entries grouped by key, in first-seen key order.
///
/// Key order and the order of entries inside each group are the order in
/// which a target observes deliveries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupedCollection<E> {
    groups: IndexMap<GroupKey, Vec<E>>,
}

impl<E> Default for GroupedCollection<E> {
    fn default() -> Self {
        Self {
            groups: IndexMap::new(),
        }
    }
}

impl<E> GroupedCollection<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: GroupKey, entry: E) {
        self.groups.entry(key).or_default().push(entry);
    }

    /// Append `entries` to the group of `key`, keeping their order.
    pub fn extend_group(&mut self, key: GroupKey, entries: impl IntoIterator<Item = E>) {
        self.groups.entry(key).or_default().extend(entries);
    }

    pub fn get(&self, key: &GroupKey) -> Option<&[E]> {
        self.groups.get(key).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &GroupKey> {
        self.groups.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &[E])> {
        self.groups.iter().map(|(key, entries)| (key, entries.as_slice()))
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of entries across all groups.
    pub fn total_entries(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

impl<E> IntoIterator for GroupedCollection<E> {
    type Item = (GroupKey, Vec<E>);
    type IntoIter = indexmap::map::IntoIter<GroupKey, Vec<E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collection_preserves_first_seen_key_order() {
        let mut collection = GroupedCollection::new();
        collection.push(GroupKey::from("t2"), 1);
        collection.push(GroupKey::from("t1"), 2);
        collection.push(GroupKey::from("t2"), 3);

        let keys: Vec<&str> = collection.keys().map(GroupKey::as_str).collect();
        assert_eq!(keys, vec!["t2", "t1"]);
        assert_eq!(collection.get(&"t2".into()), Some(&[1, 3][..]));
        assert_eq!(collection.len(), 2);
        assert_eq!(collection.total_entries(), 3);
    }

    #[test]
    fn test_composite_key_round_trips_through_text() {
        let key = CompositeKey::new(
            GroupKey::from("team#7"),
            NaiveDate::from_ymd_opt(2021, 4, 5).unwrap(),
        );
        assert_eq!(key.to_string(), "team#7#2021-04-05");
        assert_eq!("team#7#2021-04-05".parse::<CompositeKey>().unwrap(), key);
        assert!("no-separator".parse::<CompositeKey>().is_err());
    }

    #[test]
    fn test_numeric_group_keys() {
        assert_eq!(GroupKey::from(42_i64).as_str(), "42");
        assert_eq!(serde_json::to_string(&GroupKey::from("t1")).unwrap(), "\"t1\"");
    }
}
