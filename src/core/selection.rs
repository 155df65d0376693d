use crate::core::ItemId;
use indexmap::IndexSet;
use serde::Serialize;

/// Checked item ids, kept in the order they were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Selection {
    ids: IndexSet<ItemId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemId> {
        self.ids.iter()
    }

    /// Flips membership of `id`. Returns `true` when the id is now checked.
    pub fn toggle(&mut self, id: impl Into<ItemId>) -> bool {
        let id = id.into();
        // shift_remove keeps the remaining ids in check order
        if self.ids.shift_remove(id.as_str()) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.ids.iter().map(|id| id.as_str().to_string()).collect()
    }
}

impl<I> FromIterator<I> for Selection
where
    I: Into<ItemId>,
{
    fn from_iter<T: IntoIterator<Item = I>>(iter: T) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}
