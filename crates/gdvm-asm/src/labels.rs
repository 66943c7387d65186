//! Label table: append-only name → body offset mapping.

use indexmap::IndexMap;
use indexmap::map::Entry;
use rowan::TextRange;

/// A declared label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    pub offset: u32,
    /// Where the name was declared.
    pub span: TextRange,
}

/// Returned by [`LabelTable::declare`] when the name is taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("label already declared at offset {}", .first.offset)]
pub struct DuplicateLabel {
    pub first: Label,
}

/// Labels in declaration order. Lookups are exact and case-sensitive.
#[derive(Debug, Clone, Default)]
pub struct LabelTable {
    labels: IndexMap<String, Label>,
}

impl LabelTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `name` at `offset`. The first declaration always wins.
    pub fn declare(
        &mut self,
        name: &str,
        offset: u32,
        span: TextRange,
    ) -> Result<(), DuplicateLabel> {
        match self.labels.entry(name.to_string()) {
            Entry::Occupied(entry) => Err(DuplicateLabel {
                first: *entry.get(),
            }),
            Entry::Vacant(entry) => {
                entry.insert(Label { offset, span });
                Ok(())
            }
        }
    }

    pub fn resolve(&self, name: &str) -> Option<u32> {
        self.labels.get(name).map(|label| label.offset)
    }

    pub fn get(&self, name: &str) -> Option<&Label> {
        self.labels.get(name)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Label)> {
        self.labels.iter().map(|(name, label)| (name.as_str(), label))
    }
}
