use std::fmt;

// /////////////////////////////////////////////////////////////////////////////////////////////////
// Element
// /////////////////////////////////////////////////////////////////////////////////////////////////

/// Elements make up the skiplist.  Each one holds a key, its value, and one forward link per lane
/// it takes part in.
///
/// Links are slot numbers in the owning list's storage rather than pointers, so an `Element` is
/// only meaningful together with the list it came from.  `links[0]` is the immediately next
/// element; `links[n]` skips ahead to the next element tall enough to reach lane `n`.
///
/// The key can never be changed once the element is in a list, as that could break the ordering.
/// The value is free to change.
#[derive(Clone, Debug)]
pub struct Element<K, V> {
    key: K,
    pub value: V,
    // One entry per lane this element reaches.  `None` means nothing follows at that lane.
    pub(crate) links: Vec<Option<usize>>,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<K, V> Element<K, V> {
    /// Create a new element reaching `level` lanes.  All links start out empty.
    pub(crate) fn new(key: K, value: V, level: usize) -> Self {
        Element {
            key,
            value,
            links: vec![None; level],
        }
    }

    /// The key this element is sorted by.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Number of lanes this element takes part in.  Stays at its original height after the
    /// element is removed from a list, unless the list's max level was lowered beforehand.
    pub fn level(&self) -> usize {
        self.links.len()
    }

    /// Consumes the element returning its key and value.
    pub fn into_inner(self) -> (K, V) {
        (self.key, self.value)
    }

    /// Cuts every forward link, leaving an element that belongs to no list.
    pub(crate) fn detach(&mut self) {
        for link in self.links.iter_mut() {
            *link = None;
        }
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<K, V> fmt::Display for Element<K, V>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.key, self.value)
    }
}
