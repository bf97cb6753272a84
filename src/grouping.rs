//! Flat-row-to-nested-view folding.
//!
//! Every list screen gets flat LEFT JOIN rows back from SQLite and needs
//! them regrouped under some parent key while preserving row order. The
//! fold lives here, independent of the storage layer, so it can be tested
//! without a database.

/// Fold ordered `rows` into groups, preserving the first-seen order of
/// keys. `init` builds an empty group from the row that introduced its
/// key; `push` folds every row (including that first one) into its group.
pub fn group_ordered<R, K, G>(
    rows: Vec<R>,
    key: impl Fn(&R) -> K,
    init: impl Fn(&R) -> G,
    push: impl Fn(&mut G, R),
) -> Vec<G>
where
    K: PartialEq,
{
    let mut keys: Vec<K> = Vec::new();
    let mut groups: Vec<G> = Vec::new();

    for row in rows {
        let k = key(&row);
        let idx = match keys.iter().position(|existing| *existing == k) {
            Some(idx) => idx,
            None => {
                keys.push(k);
                groups.push(init(&row));
                groups.len() - 1
            }
        };
        push(&mut groups[idx], row);
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Group {
        key: i64,
        values: Vec<&'static str>,
    }

    fn fold(rows: Vec<(i64, &'static str)>) -> Vec<Group> {
        group_ordered(
            rows,
            |row| row.0,
            |row| Group {
                key: row.0,
                values: Vec::new(),
            },
            |group, row| group.values.push(row.1),
        )
    }

    #[test]
    fn test_groups_keep_first_seen_order() {
        let groups = fold(vec![(2, "a"), (2, "b"), (1, "c"), (3, "d")]);
        assert_eq!(
            groups,
            vec![
                Group { key: 2, values: vec!["a", "b"] },
                Group { key: 1, values: vec!["c"] },
                Group { key: 3, values: vec!["d"] },
            ]
        );
    }

    #[test]
    fn test_interleaved_rows_join_their_group() {
        let groups = fold(vec![(1, "a"), (2, "b"), (1, "c")]);
        assert_eq!(groups[0].values, vec!["a", "c"]);
        assert_eq!(groups[1].values, vec!["b"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(fold(Vec::new()).is_empty());
    }
}
