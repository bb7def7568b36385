//! Checklist items nested under a sub-task.
//!
//! Older files store a checklist as a bare list of item names. Those are
//! accepted on input and normalized to the name → completed mapping, so the
//! list shape never reaches the rest of the program.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Checklist(IndexMap<String, bool>);

/// Shapes a checklist may take on disk or across the card bridge.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ChecklistRepr {
    Map(IndexMap<String, bool>),
    Items(Vec<String>),
}

impl From<ChecklistRepr> for Checklist {
    fn from(repr: ChecklistRepr) -> Self {
        match repr {
            ChecklistRepr::Map(map) => Self(map),
            ChecklistRepr::Items(items) => Self::from_items(items),
        }
    }
}

impl<'de> Deserialize<'de> for Checklist {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<ChecklistRepr>::deserialize(deserializer)
            .map(|repr| repr.map(Checklist::from).unwrap_or_default())
    }
}

impl Checklist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every item starts incomplete. Blank names are dropped.
    pub fn from_items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            items
                .into_iter()
                .map(Into::into)
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .map(|name| (name, false))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.0.get(name).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.0.iter().map(|(name, done)| (name.as_str(), *done))
    }

    pub fn insert(&mut self, name: impl Into<String>, completed: bool) {
        self.0.insert(name.into(), completed);
    }

    pub fn remove(&mut self, name: &str) -> Option<bool> {
        self.0.shift_remove(name)
    }

    /// Sets an existing item. Returns false when no item has that name.
    pub fn set(&mut self, name: &str, completed: bool) -> bool {
        match self.0.get_mut(name) {
            Some(done) => {
                *done = completed;
                true
            }
            None => false,
        }
    }

    pub fn completed_count(&self) -> usize {
        self.0.values().filter(|done| **done).count()
    }
}
