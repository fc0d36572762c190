use serde::{Deserialize, Serialize};

use crate::intern::InternTable;

/// The document-wide deduplicated string table.
///
/// Cells reference entries by index. Removal shifts later entries down, so it
/// is only safe when the caller re-homes every reference above the removed
/// index — see `Document::release_shared_string`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SharedStrings {
    strings: InternTable<String>,
}

impl SharedStrings {
    pub fn intern(&mut self, text: impl Into<String>) -> u32 {
        self.strings.intern(text.into())
    }

    pub fn get(&self, index: u32) -> Option<&String> {
        self.strings.get(index)
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// The declared count attribute.
    pub fn count(&self) -> u32 {
        self.strings.count()
    }

    pub fn remove(&mut self, index: u32) -> Option<String> {
        self.strings.remove(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn interning_deduplicates() {
        let mut strings = SharedStrings::default();
        assert_eq!(strings.intern("total"), 0);
        assert_eq!(strings.intern("subtotal"), 1);
        assert_eq!(strings.intern("total"), 0);
        assert_eq!(strings.count(), 2);
    }

    #[test]
    fn removal_shifts_later_entries() {
        let mut strings = SharedStrings::default();
        strings.intern("a");
        strings.intern("b");
        strings.intern("c");
        assert_eq!(strings.remove(0), Some("a".to_string()));
        assert_eq!(strings.get(0), Some(&"b".to_string()));
        assert_eq!(strings.count(), 2);
    }
}
