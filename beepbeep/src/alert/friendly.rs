//! The friends list.

use std::collections::{BTreeMap, HashMap};

use crate::models::EntityId;

/// Commander ids that downgrade an alert to the friendly tone, with optional
/// display names. Read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FriendlySet {
    names: HashMap<EntityId, Option<String>>,
}

impl FriendlySet {
    /// Build from the config's `name = id` table.
    pub fn from_named(friends: &BTreeMap<String, EntityId>) -> Self {
        let names = friends
            .iter()
            .map(|(name, id)| (*id, Some(name.clone())))
            .collect();
        Self { names }
    }

    /// Build from bare ids with no display names.
    pub fn from_ids<I: IntoIterator<Item = EntityId>>(ids: I) -> Self {
        Self {
            names: ids.into_iter().map(|id| (id, None)).collect(),
        }
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.names.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// True when every id is a friend. Vacuously true for no ids.
    pub fn all_friendly<I: IntoIterator<Item = EntityId>>(&self, ids: I) -> bool {
        ids.into_iter().all(|id| self.contains(id))
    }

    /// Configured name for a friend, falling back to the numeric id.
    pub fn display_name(&self, id: EntityId) -> String {
        match self.names.get(&id) {
            Some(Some(name)) => name.clone(),
            _ => id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn friends() -> FriendlySet {
        FriendlySet::from_named(&BTreeMap::from([
            ("St4rF0x".to_string(), 2039432),
            ("WDX".to_string(), 393577),
        ]))
    }

    #[test]
    fn test_membership() {
        let set = friends();
        assert!(set.contains(393577));
        assert!(!set.contains(1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_all_friendly() {
        let set = friends();
        assert!(set.all_friendly([393577, 2039432]));
        assert!(!set.all_friendly([393577, 5]));
        assert!(set.all_friendly([]));
    }

    #[test]
    fn test_display_name() {
        let set = friends();
        assert_eq!(set.display_name(393577), "WDX");
        assert_eq!(set.display_name(42), "42");
        assert_eq!(FriendlySet::from_ids([7]).display_name(7), "7");
    }
}
