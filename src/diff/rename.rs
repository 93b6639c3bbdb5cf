use crate::models::common::normalize_name;
use std::collections::HashMap;

/// Tracks node renames for a single diff invocation, keyed by normalized
/// original name so connection rewriting in pass two can follow a node
/// through an `updateNode` rename applied in pass one, regardless of
/// incidental whitespace differences between the rename's `from` and the
/// name used in a later connection operation.
#[derive(Debug, Default)]
pub struct RenameMap {
    old_to_new: HashMap<String, String>,
}

impl RenameMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, old_name: &str, new_name: &str) {
        let key = normalize_name(old_name);
        // If `old_name` was itself already a rename target, keep the
        // chain collapsed to its original key so later lookups resolve
        // in one hop.
        let resolved_old = self
            .old_to_new
            .iter()
            .find(|(_, v)| normalize_name(v) == key)
            .map(|(k, _)| k.clone())
            .unwrap_or(key);
        self.old_to_new.insert(resolved_old, new_name.to_string());
    }

    /// Resolve a name through the rename chain to its current form. Names
    /// never renamed this invocation pass through unchanged.
    pub fn resolve<'a>(&'a self, name: &'a str) -> &'a str {
        self.old_to_new
            .get(&normalize_name(name))
            .map(|s| s.as_str())
            .unwrap_or(name)
    }

    pub fn is_empty(&self) -> bool {
        self.old_to_new.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_unrenamed_name_passes_through() {
        let map = RenameMap::new();
        assert_eq!(map.resolve("Untouched"), "Untouched");
    }

    #[test]
    fn test_resolve_follows_single_rename() {
        let mut map = RenameMap::new();
        map.record("Old Name", "New Name");
        assert_eq!(map.resolve("Old Name"), "New Name");
        assert_eq!(map.resolve("old   name"), "New Name");
    }

    #[test]
    fn test_resolve_collapses_rename_chain() {
        let mut map = RenameMap::new();
        map.record("A", "B");
        map.record("B", "C");
        assert_eq!(map.resolve("A"), "C");
        assert_eq!(map.resolve("B"), "C");
    }
}
