//! Ordered-sequence primitives shared by columns, sprints and task lists.
//!
//! Order is the array index; every operation here is a permutation or a
//! single insert/remove, so sequences never develop gaps.

use tracing::warn;

use crate::task::Task;

/// Anything that lives in an ordered sequence and is addressed by id.
pub trait Identified {
    fn id(&self) -> &str;
}

impl Identified for Task {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Where an inserted item ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Inserted immediately before the requested anchor, at this index.
    Before(usize),
    /// Appended because no anchor was requested.
    End,
    /// An anchor was requested but is gone; appended instead.
    AnchorMissing,
}

/// Index of the item with `id`.
pub fn index_of<T: Identified>(items: &[T], id: &str) -> Option<usize> {
    items.iter().position(|item| item.id() == id)
}

/// Insert `item` immediately before `before`, or at the end.
///
/// The anchor is looked up against `items` as it is now, so callers moving an
/// element within one sequence must remove it first.
pub fn insert_before<T: Identified>(items: &mut Vec<T>, item: T, before: Option<&str>) -> Placement {
    match before {
        None => {
            items.push(item);
            Placement::End
        }
        Some(anchor) => match index_of(items, anchor) {
            Some(idx) => {
                items.insert(idx, item);
                Placement::Before(idx)
            }
            None => {
                warn!(anchor, "insert anchor not present, appending");
                items.push(item);
                Placement::AnchorMissing
            }
        },
    }
}

/// Move the item with `id` to sit before `before` (or at the end) within the
/// same sequence. Returns `false` if `id` is absent. Moving an item before
/// itself is a no-op.
pub fn reorder<T: Identified>(items: &mut Vec<T>, id: &str, before: Option<&str>) -> bool {
    let Some(from) = index_of(items, id) else {
        return false;
    };
    if before == Some(id) {
        return true;
    }
    let item = items.remove(from);
    insert_before(items, item, before);
    true
}

/// First id that appears more than once.
pub fn first_duplicate<'a, I>(ids: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().find(|id| !seen.insert(*id))
}
