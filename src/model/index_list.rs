//! IndexList — indices grouped under a caller-chosen group name.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use super::Index;

/// A named group of indices, usually every dated instance of one logical
/// index (`logs.2024.01.01`, `logs.2024.01.02`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexGroup {
    pub name: String,
    #[serde(default)]
    pub indices: Vec<Index>,
}

/// Ordered mapping from group name to the indices in that group.
///
/// Groups keep first-insertion order and indices keep push order, so every
/// walk over the list is deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<IndexGroup>", into = "Vec<IndexGroup>")]
pub struct IndexList {
    groups: Vec<IndexGroup>,
    positions: HashMap<String, usize>,
}

impl IndexList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `index` to `group`, creating the group at the end if needed.
    pub fn push(&mut self, group: impl Into<String>, index: Index) {
        let group = group.into();
        match self.positions.get(&group) {
            Some(&pos) => self.groups[pos].indices.push(index),
            None => {
                self.positions.insert(group.clone(), self.groups.len());
                self.groups.push(IndexGroup { name: group, indices: vec![index] });
            }
        }
    }

    /// Builder-style `push`.
    pub fn with_index(mut self, group: impl Into<String>, index: Index) -> Self {
        self.push(group, index);
        self
    }

    pub fn groups(&self) -> &[IndexGroup] {
        &self.groups
    }

    pub fn group(&self, name: &str) -> Option<&IndexGroup> {
        self.positions.get(name).map(|&pos| &self.groups[pos])
    }

    /// Iterate `(group_name, indices)` in group order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Index])> {
        self.groups.iter().map(|g| (g.name.as_str(), g.indices.as_slice()))
    }

    /// Every index across all groups, in walk order.
    pub fn indices(&self) -> impl Iterator<Item = &Index> {
        self.groups.iter().flat_map(|g| g.indices.iter())
    }

    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    pub fn index_count(&self) -> usize {
        self.groups.iter().map(|g| g.indices.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.index_count() == 0
    }
}

/// Groups with a repeated name are merged into the first occurrence.
impl From<Vec<IndexGroup>> for IndexList {
    fn from(groups: Vec<IndexGroup>) -> Self {
        let mut list = IndexList::new();
        for group in groups {
            if group.indices.is_empty() && list.group(&group.name).is_none() {
                list.positions.insert(group.name.clone(), list.groups.len());
                list.groups.push(group);
                continue;
            }
            for index in group.indices {
                list.push(group.name.clone(), index);
            }
        }
        list
    }
}

impl From<IndexList> for Vec<IndexGroup> {
    fn from(list: IndexList) -> Self {
        list.groups
    }
}

impl PartialEq for IndexList {
    fn eq(&self, other: &Self) -> bool {
        self.groups == other.groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_groups_in_first_seen_order() {
        let list = IndexList::new()
            .with_index("logs", Index::new("logs.2024.01.01"))
            .with_index("metrics", Index::new("metrics.2024.01.01"))
            .with_index("logs", Index::new("logs.2024.01.02"));

        let groups: Vec<&str> = list.iter().map(|(name, _)| name).collect();
        assert_eq!(groups, vec!["logs", "metrics"]);
        assert_eq!(list.group("logs").unwrap().indices.len(), 2);
        assert_eq!(list.index_count(), 3);
        assert_eq!(list.group_count(), 2);

        let names: Vec<&str> = list.indices().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["logs.2024.01.01", "logs.2024.01.02", "metrics.2024.01.01"]);
    }

    #[test]
    fn test_from_groups_merges_duplicates() {
        let list = IndexList::from(vec![
            IndexGroup { name: "a".into(), indices: vec![Index::new("a1")] },
            IndexGroup { name: "empty".into(), indices: vec![] },
            IndexGroup { name: "a".into(), indices: vec![Index::new("a2")] },
        ]);
        assert_eq!(list.group_count(), 2);
        assert_eq!(list.group("a").unwrap().indices.len(), 2);
        assert!(list.group("empty").unwrap().indices.is_empty());
    }

    #[test]
    fn test_serde_snapshot_shape() {
        let text = r#"[{"name": "logs", "indices": [{"name": "logs-1", "mapping": {"msg": {"type": "text"}}}]}]"#;
        let list: IndexList = serde_json::from_str(text).unwrap();
        assert_eq!(list.index_count(), 1);
        let back = serde_json::to_value(&list).unwrap();
        assert_eq!(back[0]["indices"][0]["mapping"]["msg"]["type"], "text");
    }
}
