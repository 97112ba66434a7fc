//! Per-field merge functions used by `GraphState::apply` implementations.

use std::collections::BTreeMap;

/// Overwrite policy: replaces `current` when the update carries a value.
pub fn overwrite<T>(current: &mut T, update: Option<T>) {
    if let Some(value) = update {
        *current = value;
    }
}

/// Accumulate policy for maps: merges entries key by key.
///
/// Existing keys not present in `update` are kept. Entries whose value is empty
/// are skipped, so an update can never blank out a previously set value.
pub fn merge_entries(current: &mut BTreeMap<String, String>, update: BTreeMap<String, String>) {
    for (key, value) in update {
        if value.is_empty() {
            continue;
        }
        current.insert(key, value);
    }
}

/// Accumulate policy for sequences: appends in order.
pub fn append<T>(current: &mut Vec<T>, update: Vec<T>) {
    current.extend(update);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrite_replaces_only_when_some() {
        let mut v = 1;
        overwrite(&mut v, None);
        assert_eq!(v, 1);
        overwrite(&mut v, Some(2));
        assert_eq!(v, 2);
    }

    /// **Scenario**: merge keeps old keys, updates given keys, ignores empty values.
    #[test]
    fn merge_entries_is_monotonic() {
        let mut current = BTreeMap::from([
            ("planner".to_string(), "done".to_string()),
            ("writer".to_string(), "pending".to_string()),
        ]);
        merge_entries(
            &mut current,
            BTreeMap::from([
                ("writer".to_string(), "done".to_string()),
                ("planner".to_string(), String::new()),
            ]),
        );
        assert_eq!(current["planner"], "done");
        assert_eq!(current["writer"], "done");
        assert_eq!(current.len(), 2);
    }

    #[test]
    fn append_preserves_order() {
        let mut v = vec![1, 2];
        append(&mut v, vec![3, 4]);
        assert_eq!(v, vec![1, 2, 3, 4]);
    }
}
