use serde::{Deserialize, Deserializer, Serialize};

/// An ordered, append-only table that deduplicates by structural equality and
/// carries a declared element count.
///
/// Interning scans existing entries in order and reuses the first structural
/// match, so an entry's index is stable for the life of the table (removal is
/// reserved for the shared string table, whose consumers re-home their
/// references afterwards). The declared count always equals the number of
/// entries.
#[derive(Clone, Debug, Serialize)]
pub struct InternTable<T> {
    items: Vec<T>,
    count: u32,
}

impl<T> InternTable<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            count: 0,
        }
    }

    pub fn get(&self, index: u32) -> Option<&T> {
        self.items.get(index as usize)
    }

    pub fn get_mut(&mut self, index: u32) -> Option<&mut T> {
        self.items.get_mut(index as usize)
    }

    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The declared count attribute.
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Append without a deduplication scan, returning the new index.
    pub fn push(&mut self, item: T) -> u32 {
        let index = self.items.len() as u32;
        self.items.push(item);
        self.count += 1;
        index
    }

    /// Remove the entry at `index`, shifting later entries down by one.
    pub fn remove(&mut self, index: u32) -> Option<T> {
        if (index as usize) >= self.items.len() {
            return None;
        }
        self.count -= 1;
        Some(self.items.remove(index as usize))
    }
}

impl<T: PartialEq> InternTable<T> {
    /// Insert (or reuse) an entry, returning its index.
    pub fn intern(&mut self, candidate: T) -> u32 {
        if let Some(pos) = self.items.iter().position(|existing| *existing == candidate) {
            return pos as u32;
        }
        self.push(candidate)
    }

    pub fn position(&self, item: &T) -> Option<u32> {
        self.items.iter().position(|existing| existing == item).map(|p| p as u32)
    }
}

impl<T> Default for InternTable<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::ops::Index<u32> for InternTable<T> {
    type Output = T;

    fn index(&self, index: u32) -> &T {
        &self.items[index as usize]
    }
}

impl<'a, T> IntoIterator for &'a InternTable<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for InternTable<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper<T> {
            #[serde(default = "Vec::new")]
            items: Vec<T>,
        }

        // Recompute the count rather than trusting the serialized attribute.
        let helper = Helper::<T>::deserialize(deserializer)?;
        let count = helper.items.len() as u32;
        Ok(InternTable {
            items: helper.items,
            count,
        })
    }
}
