use core_db::Row;
use indexmap::IndexMap;

/// Composite identity a duplicate report partitions rows on, e.g.
/// (symbol, cell line).
pub type GroupKey = Vec<String>;

/// A group that met its report's cardinality threshold.
#[derive(Debug)]
pub struct DupGroup<'a> {
    pub key: GroupKey,
    pub cardinality: usize,
    pub members: Vec<&'a Row>,
}

/// Partition rows by key. Group membership keeps result-set order;
/// first-seen group order is preserved by the map but carries no
/// contract, see `qualifying_groups`.
pub fn group_rows<'a, F>(rows: &'a [Row], key_fn: F) -> IndexMap<GroupKey, Vec<&'a Row>>
where
    F: Fn(&Row) -> GroupKey,
{
    let mut groups: IndexMap<GroupKey, Vec<&Row>> = IndexMap::new();
    for row in rows {
        groups.entry(key_fn(row)).or_default().push(row);
    }
    groups
}

/// Groups meeting the cardinality threshold, sorted by key so emission
/// order never depends on map iteration order.
#[must_use]
pub fn qualifying_groups(
    groups: IndexMap<GroupKey, Vec<&Row>>,
    min_size: usize,
) -> Vec<DupGroup<'_>> {
    let mut qualified: Vec<DupGroup> = groups
        .into_iter()
        .filter(|(_, members)| members.len() >= min_size)
        .map(|(key, members)| DupGroup {
            key,
            cardinality: members.len(),
            members,
        })
        .collect();
    qualified.sort_by(|a, b| a.key.cmp(&b.key));
    qualified
}
