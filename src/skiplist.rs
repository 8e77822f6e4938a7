//! The skiplist engine: lanes, the shared top-down search, and the operations built on it.

use std::fmt;
use std::iter;

use config::{Config, DEFAULT_MAX_LEVEL};
use logger::Logger;

use crate::compare;
use crate::element::Element;
use crate::level_generator::{LevelGenerator, UniformLevelGenerator};

// /////////////////////////////////////////////////////////////////////////////////////////////////
// SkipList
// /////////////////////////////////////////////////////////////////////////////////////////////////

/// An ordered map where the order is given by a comparator `F`, such that `compare(a, b)` is
/// `true` iff `a` sorts after `b`.  Keys for which neither `compare(a, b)` nor `compare(b, a)`
/// holds are the same key; setting one of them again overwrites the stored value.
///
/// The comparator must be consistent and describe a strict total order.  A comparator that is
/// not results in misplaced elements and failed lookups, never in memory unsafety.
///
/// # Examples
///
/// ```
/// use skiplist::{compare, SkipList};
///
/// let mut list = SkipList::new(compare::int64);
/// list.set(20, "Hello");
/// list.set(10, "World");
/// list.set(40, "!");
/// list.set(40, "?");
///
/// assert_eq!(list.len(), 3);
/// assert_eq!(list.get_value(&10), Some(&"World"));
/// assert!(list.get(&15).is_none());
///
/// let old = list.remove(&40).unwrap();
/// assert_eq!(old.value, "?");
///
/// list.init();
/// assert!(list.is_empty());
/// ```
pub struct SkipList<K, V, F = fn(&K, &K) -> bool> {
    // Storage, indexed by the slot numbers held in the links.  This is not sorted.
    nodes: Vec<Option<Element<K, V>>>,
    // Vacated slots, reused before the storage grows.
    free: Vec<usize>,
    // The head's links, one per lane.  Its length is the max level.
    head: Vec<Option<usize>>,
    len: usize,
    compare: F,
    level_generator: Box<dyn LevelGenerator + Send>,
    logger: Option<Logger>,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<K, V, F> SkipList<K, V, F>
where
    F: Fn(&K, &K) -> bool,
{
    /// Create a new skiplist with `DEFAULT_MAX_LEVEL` lanes.
    #[inline]
    pub fn new(compare: F) -> Self {
        Self::with_max_level(compare, DEFAULT_MAX_LEVEL)
    }

    /// Create a new skiplist with `max_level` lanes.
    ///
    /// # Panics
    ///
    /// Panics if `max_level` is zero.
    #[inline]
    pub fn with_max_level(compare: F, max_level: usize) -> Self {
        Self::with_level_generator(compare, max_level, Box::new(UniformLevelGenerator::new()))
    }

    /// Create a new skiplist with the lane count and seed found in `config`.
    pub fn with_config(compare: F, config: &Config) -> Self {
        let level_generator: Box<dyn LevelGenerator + Send> = match config.seed {
            Some(seed) => Box::new(UniformLevelGenerator::seeded(seed)),
            None => Box::new(UniformLevelGenerator::new()),
        };
        Self::with_level_generator(compare, config.max_level, level_generator)
    }

    /// Create a new skiplist drawing element heights from `level_generator`.
    ///
    /// # Panics
    ///
    /// Panics if `max_level` is zero.
    pub fn with_level_generator(
        compare: F,
        max_level: usize,
        level_generator: Box<dyn LevelGenerator + Send>,
    ) -> Self {
        if max_level == 0 {
            panic!("skiplist max level must not be zero.");
        }
        SkipList {
            nodes: Vec::new(),
            free: Vec::new(),
            head: vec![None; max_level],
            len: 0,
            compare,
            level_generator,
            logger: None,
        }
    }

    /// Sets `value` under `key`.  If the key is already present its value is replaced in place,
    /// otherwise a new element is linked in.  Either way the affected element is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::{compare, SkipList};
    ///
    /// let mut list = SkipList::new(compare::int);
    /// list.set(1, "Hello");
    /// assert_eq!(list.set(1, "World").value, "World");
    /// assert_eq!(list.len(), 1);
    /// ```
    pub fn set(&mut self, key: K, value: V) -> &mut Element<K, V> {
        let mut prevs = vec![None; self.head.len()];

        if let Some(idx) = self.search(&key, Some(&mut prevs[..])) {
            let element = self.node_mut(idx);
            element.value = value;
            return element;
        }

        let total = self.head.len();
        let mut level = self.level_generator.random(total);
        if level >= total {
            if let Some(ref logger) = self.logger {
                log!(logger, Warning, "level generator gave {} for {} lanes", level, total);
            }
            level = total - 1;
        }

        let mut element = Element::new(key, value, level + 1);
        for (lvl, link) in element.links.iter_mut().enumerate() {
            *link = self.link(prevs[lvl], lvl);
        }
        let idx = self.store(element);
        for (lvl, &prev) in prevs.iter().enumerate().take(level + 1) {
            self.set_link(prev, lvl, Some(idx));
        }

        self.len += 1;
        self.node_mut(idx)
    }

    /// Provides a reference to the element stored under `key`, or `None` if there is none.
    #[inline]
    pub fn get(&self, key: &K) -> Option<&Element<K, V>> {
        self.search(key, None).map(|idx| self.node(idx))
    }

    /// Provides a mutable reference to the element stored under `key`, or `None` if there is
    /// none.  Only the value can be changed through it.
    #[inline]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut Element<K, V>> {
        let idx = self.search(key, None)?;
        Some(self.node_mut(idx))
    }

    /// Shorthand for `get(key).map(|e| &e.value)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::{compare, SkipList};
    ///
    /// let mut list = SkipList::new(compare::int);
    /// list.set(12, 34);
    /// assert_eq!(list.get_value(&12), Some(&34));
    /// assert_eq!(list.get_value(&56), None);
    /// ```
    #[inline]
    pub fn get_value(&self, key: &K) -> Option<&V> {
        self.get(key).map(|element| &element.value)
    }

    /// Returns `true` if an element is stored under `key`.
    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.search(key, None).is_some()
    }

    /// Removes the element stored under `key` and hands it back, unlinked from the list.
    /// Returns `None`, leaving the list untouched, if there is no such element.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::{compare, SkipList};
    ///
    /// let mut list = SkipList::new(compare::int);
    /// list.set(34, 56);
    /// assert_eq!(list.remove(&34).map(|e| e.into_inner()), Some((34, 56)));
    /// assert!(list.remove(&34).is_none());
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<Element<K, V>> {
        let mut prevs = vec![None; self.head.len()];
        let idx = self.search(key, Some(&mut prevs[..]))?;

        let mut element = self.nodes[idx].take()?;
        self.free.push(idx);
        for (lvl, &next) in element.links.iter().enumerate() {
            self.set_link(prevs[lvl], lvl, next);
        }
        element.detach();

        self.len -= 1;
        Some(element)
    }

    /// Walks the lanes from the top one down to the bottom one, never backing up.  If `prevs` is
    /// given, `prevs[lvl]` is set to the last node on lane `lvl` sorting before `key`, where
    /// `None` stands for the head.
    ///
    /// Returns the slot holding `key`, if any.
    fn search(&self, key: &K, mut prevs: Option<&mut [Option<usize>]>) -> Option<usize> {
        let mut prev: Option<usize> = None;
        // Where the lane above stopped.  That node does not sort before `key`, so reaching it
        // again ends the lane without another comparison.
        let mut last: Option<usize> = None;

        let mut lvl = self.head.len();
        while lvl > 0 {
            lvl -= 1;

            let mut next = self.link(prev, lvl);
            while let Some(idx) = next {
                if next == last {
                    break;
                }
                let node = self.node(idx);
                if !(self.compare)(key, node.key()) {
                    break;
                }
                prev = next;
                next = node.links[lvl];
            }

            if let Some(prevs) = prevs.as_deref_mut() {
                prevs[lvl] = prev;
            }
            last = next;
        }

        // `last` does not sort before `key`; it is a match unless it sorts after it.
        match last {
            Some(idx) if !(self.compare)(self.node(idx).key(), key) => Some(idx),
            _ => None,
        }
    }
}

impl<K, V, F> SkipList<K, V, F> {
    /// Attaches a logger reporting structural changes (resets and max level changes).
    pub fn set_logger(&mut self, logger: Logger) {
        log!(
            logger,
            Debug,
            "skiplist with {} lanes and {} elements attached to logger",
            self.head.len(),
            self.len
        );
        self.logger = Some(logger);
    }

    /// Clears the skiplist, discarding every element but keeping the max level and comparator.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::{compare, SkipList};
    ///
    /// let mut list = SkipList::with_max_level(compare::int, 4);
    /// list.extend((0..10).map(|x| (x, x)));
    /// list.init();
    /// assert!(list.is_empty());
    /// assert!(list.front().is_none());
    /// assert_eq!(list.max_level(), 4);
    /// ```
    pub fn init(&mut self) -> &mut Self {
        self.nodes.clear();
        self.free.clear();
        for link in self.head.iter_mut() {
            *link = None;
        }
        self.len = 0;
        if let Some(ref logger) = self.logger {
            log!(logger, Verbose, "skiplist reset, {} lanes kept", self.head.len());
        }
        self
    }

    /// Returns the number of elements in the skiplist.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the skiplist contains no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Provides a reference to the first element (the one sorting before all others), or `None`
    /// if the skiplist is empty.
    #[inline]
    pub fn front(&self) -> Option<&Element<K, V>> {
        self.head[0].map(|idx| self.node(idx))
    }

    /// Provides the element directly following `element` on the bottom lane, or `None` if it is
    /// the last one.
    ///
    /// `element` must have been obtained from this list and the list must not have been changed
    /// since.  Elements returned by `remove` belong to no list and always yield `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::{compare, SkipList};
    ///
    /// let mut list = SkipList::new(compare::int);
    /// list.extend(vec![(3, "c"), (1, "a"), (2, "b")]);
    ///
    /// let mut keys = Vec::new();
    /// let mut element = list.front();
    /// while let Some(e) = element {
    ///     keys.push(*e.key());
    ///     element = list.next(e);
    /// }
    /// assert_eq!(keys, vec![1, 2, 3]);
    /// ```
    #[inline]
    pub fn next(&self, element: &Element<K, V>) -> Option<&Element<K, V>> {
        let idx = element.links.first().and_then(|link| *link)?;
        self.nodes.get(idx).and_then(Option::as_ref)
    }

    /// Returns the current number of lanes.
    #[inline]
    pub fn max_level(&self) -> usize {
        self.head.len()
    }

    /// Changes the number of lanes, returning the previous number.
    ///
    /// Growing adds empty lanes on top; existing elements keep their height, so only elements
    /// set afterwards reach the new lanes.  Shrinking drops the top lanes and cuts every element
    /// down to the new height.
    ///
    /// # Panics
    ///
    /// Panics if `level` is zero.
    pub fn set_max_level(&mut self, level: usize) -> usize {
        if level == 0 {
            panic!("skiplist max level must not be zero.");
        }

        let old = self.head.len();
        if old == level {
            return old;
        }

        if level < old {
            self.head.truncate(level);
            for node in self.nodes.iter_mut().flatten() {
                node.links.truncate(level);
            }
        } else {
            self.head.resize(level, None);
        }

        if let Some(ref logger) = self.logger {
            log!(logger, Notice, "skiplist max level changed from {} to {}", old, level);
        }
        old
    }

    /// Creates an iterator over the key/value pairs, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use skiplist::{compare, SkipList};
    ///
    /// let mut list = SkipList::new(compare::int);
    /// list.extend((0..10).rev().map(|x| (x, x * 2)));
    /// for (i, (k, v)) in list.iter().enumerate() {
    ///     assert_eq!((*k, *v), (i as isize, 2 * i as isize));
    /// }
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<K, V> {
        Iter {
            nodes: &self.nodes,
            next: self.head[0],
            size: self.len,
        }
    }

    /// Creates an iterator over the keys, in order.
    #[inline]
    pub fn keys(&self) -> Keys<K, V> {
        Keys { iter: self.iter() }
    }

    /// Creates an iterator over the values, in key order.
    #[inline]
    pub fn values(&self) -> Values<K, V> {
        Values { iter: self.iter() }
    }

    /// Renders one row per lane, top lane first.  Meant for debugging.
    ///
    /// ```text
    /// 1: <head> --> 2 --> 7
    /// 0: <head> --> 1 --> 2 --> 5 --> 7
    /// ```
    pub fn debug_structure(&self) -> String
    where
        K: fmt::Display,
    {
        let mut rows = Vec::with_capacity(self.head.len());
        for lvl in (0..self.head.len()).rev() {
            let mut row = format!("{}: <head>", lvl);
            let mut next = self.head[lvl];
            while let Some(idx) = next {
                let node = self.node(idx);
                row.push_str(&format!(" --> {}", node.key()));
                next = node.links[lvl];
            }
            rows.push(row);
        }
        rows.join("\n")
    }

    /// Reads a link of `prev`, where `None` stands for the head.
    #[inline]
    fn link(&self, prev: Option<usize>, lvl: usize) -> Option<usize> {
        match prev {
            None => self.head[lvl],
            Some(idx) => self.node(idx).links[lvl],
        }
    }

    /// Overwrites a link of `prev`, where `None` stands for the head.
    #[inline]
    fn set_link(&mut self, prev: Option<usize>, lvl: usize, to: Option<usize>) {
        match prev {
            None => self.head[lvl] = to,
            Some(idx) => self.node_mut(idx).links[lvl] = to,
        }
    }

    fn node(&self, idx: usize) -> &Element<K, V> {
        match self.nodes[idx] {
            Some(ref node) => node,
            None => panic!("Encountered a link to a vacant slot."),
        }
    }

    fn node_mut(&mut self, idx: usize) -> &mut Element<K, V> {
        match self.nodes[idx] {
            Some(ref mut node) => node,
            None => panic!("Encountered a link to a vacant slot."),
        }
    }

    /// Puts `element` in a free slot and returns the slot number.
    fn store(&mut self, element: Element<K, V>) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = Some(element);
                idx
            }
            None => {
                self.nodes.push(Some(element));
                self.nodes.len() - 1
            }
        }
    }
}

#[cfg(test)]
impl<K, V, F> SkipList<K, V, F>
where
    F: Fn(&K, &K) -> bool,
{
    /// Checks the integrity of the skiplist.
    pub(crate) fn check(&self) {
        let total = self.head.len();
        assert!(total > 0);
        assert_eq!(self.nodes.len() - self.free.len(), self.len);
        assert_eq!(self.nodes.iter().filter(|n| n.is_some()).count(), self.len);
        for &idx in self.free.iter() {
            assert!(self.nodes[idx].is_none());
        }

        // Number of elements tall enough to reach each lane.
        let mut reaching = vec![0; total];
        for node in self.nodes.iter().flatten() {
            assert!(node.level() >= 1);
            assert!(node.level() <= total);
            for count in reaching.iter_mut().take(node.level()) {
                *count += 1;
            }
        }

        for lvl in 0..total {
            let mut prev: Option<usize> = None;
            let mut next = self.head[lvl];
            let mut count = 0;
            while let Some(idx) = next {
                let node = self.node(idx);
                assert!(node.level() > lvl);
                if let Some(prev) = prev {
                    let prev_key = self.node(prev).key();
                    assert!((self.compare)(node.key(), prev_key));
                    assert!(!(self.compare)(prev_key, node.key()));
                }
                count += 1;
                prev = next;
                next = node.links[lvl];
            }
            // Every element reaching the lane is linked on it exactly once.
            assert_eq!(count, reaching[lvl]);
        }
        assert_eq!(reaching[0], self.len);
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<K: PartialOrd, V> Default for SkipList<K, V> {
    fn default() -> SkipList<K, V> {
        SkipList::new(compare::ascending::<K> as fn(&K, &K) -> bool)
    }
}

impl<K, V, F> Extend<(K, V)> for SkipList<K, V, F>
where
    F: Fn(&K, &K) -> bool,
{
    #[inline]
    fn extend<I: iter::IntoIterator<Item = (K, V)>>(&mut self, iterable: I) {
        for (key, value) in iterable {
            self.set(key, value);
        }
    }
}

impl<K: PartialOrd, V> iter::FromIterator<(K, V)> for SkipList<K, V> {
    #[inline]
    fn from_iter<I>(iter: I) -> SkipList<K, V>
    where
        I: iter::IntoIterator<Item = (K, V)>,
    {
        let mut list = SkipList::default();
        list.extend(iter);
        list
    }
}

impl<K, V, F> fmt::Debug for SkipList<K, V, F>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, F> fmt::Display for SkipList<K, V, F>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "({}, {})", k, v)?;
        }
        write!(f, "]")
    }
}

impl<K, V, F> iter::IntoIterator for SkipList<K, V, F> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(self) -> IntoIter<K, V> {
        IntoIter {
            next: self.head[0],
            size: self.len,
            nodes: self.nodes,
        }
    }
}

impl<'a, K, V, F> iter::IntoIterator for &'a SkipList<K, V, F> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

// ///////////////////////////////////////////////
// Extra structs
// ///////////////////////////////////////////////

pub struct Iter<'a, K: 'a, V: 'a> {
    nodes: &'a [Option<Element<K, V>>],
    next: Option<usize>,
    size: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        let node = self.nodes[self.next?].as_ref()?;
        self.next = node.links[0];
        self.size = self.size.saturating_sub(1);
        Some((node.key(), &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.size, Some(self.size))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}

pub struct IntoIter<K, V> {
    nodes: Vec<Option<Element<K, V>>>,
    next: Option<usize>,
    size: usize,
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        let node = self.nodes[self.next?].take()?;
        self.next = node.links[0];
        self.size = self.size.saturating_sub(1);
        Some(node.into_inner())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.size, Some(self.size))
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {}

pub struct Keys<'a, K: 'a, V: 'a> {
    iter: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.iter.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

pub struct Values<'a, K: 'a, V: 'a> {
    iter: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.iter.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

// /////////////////////////////////////////////////////////////////////////////////////////////////
// Tests
// /////////////////////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use std::sync::mpsc::channel;

    use config::Config;
    use logger::{Level, Logger};

    use super::SkipList;
    use crate::compare;
    use crate::level_generator::LevelGenerator;

    /// Hands out a fixed, repeating sequence of heights.
    struct Sequence {
        heights: Vec<usize>,
        pos: usize,
    }

    impl Sequence {
        fn boxed(heights: Vec<usize>) -> Box<Sequence> {
            Box::new(Sequence { heights, pos: 0 })
        }
    }

    impl LevelGenerator for Sequence {
        fn random(&mut self, _total: usize) -> usize {
            let h = self.heights[self.pos % self.heights.len()];
            self.pos += 1;
            h
        }
    }

    fn keys<F: Fn(&i64, &i64) -> bool>(list: &SkipList<i64, i64, F>) -> Vec<i64> {
        list.keys().cloned().collect()
    }

    #[test]
    fn basic_small() {
        let mut list = SkipList::new(compare::int64);
        list.check();
        assert!(list.remove(&1).is_none());
        list.check();
        assert_eq!(list.set(1, 0).value, 0);
        list.check();
        assert_eq!(list.set(1, 5).value, 5);
        assert_eq!(list.len(), 1);
        list.check();
        assert_eq!(list.remove(&1).map(|e| e.value), Some(5));
        list.check();
        list.set(1, 10);
        list.set(2, 20);
        list.check();
        assert_eq!(list.remove(&1).map(|e| e.value), Some(10));
        list.check();
        assert_eq!(list.remove(&2).map(|e| e.value), Some(20));
        list.check();
        assert!(list.remove(&1).is_none());
        assert!(list.is_empty());
    }

    #[test]
    fn basic_large() {
        let mut list = SkipList::new(compare::uint);
        let size = 10_000;
        assert_eq!(list.len(), 0);

        for i in 0..size {
            list.set(i, i * 10);
            assert_eq!(list.len(), i + 1);
        }
        list.check();

        for i in 0..size {
            assert_eq!(list.remove(&i).map(|e| e.into_inner()), Some((i, i * 10)));
            assert_eq!(list.len(), size - i - 1);
        }
        list.check();
    }

    #[test]
    fn hello_world() {
        let mut list: SkipList<i64, String, _> = SkipList::new(compare::int64);
        list.set(12, "hello world".to_owned());
        list.set(34, "56".to_owned());
        list.check();

        assert_eq!(list.get(&34).map(|e| e.value.as_str()), Some("56"));
        assert_eq!(list.front().map(|e| *e.key()), Some(12));

        let removed = list.remove(&34).unwrap();
        assert_eq!(*removed.key(), 34);
        assert_eq!(removed.value, "56");
        assert_eq!(list.len(), 1);
        assert!(list.get(&34).is_none());
        list.check();
    }

    #[test]
    fn overwrite_keeps_element() {
        let mut list = SkipList::with_level_generator(compare::int64, 4, Sequence::boxed(vec![2]));
        let level = list.set(7, 1).level();
        assert_eq!(level, 3);
        let element = list.set(7, 2);
        assert_eq!(element.level(), 3);
        assert_eq!(element.value, 2);
        assert_eq!(list.len(), 1);
        assert_eq!(list.get_value(&7), Some(&2));
        list.check();
    }

    #[test]
    fn get_mut_changes_value() {
        let mut list = SkipList::new(compare::int64);
        list.extend((0..10).map(|x| (x, x)));
        list.get_mut(&4).unwrap().value = 40;
        assert_eq!(list.get_value(&4), Some(&40));
        assert!(list.get_mut(&11).is_none());
        assert!(list.contains_key(&9));
        assert!(!list.contains_key(&10));
    }

    #[test]
    fn descending() {
        let mut list = SkipList::new(compare::int64_reversed);
        list.extend(vec![(3, 3), (1, 1), (4, 4), (1, 10), (5, 5), (9, 9), (2, 2), (6, 6)]);
        list.check();
        assert_eq!(keys(&list), vec![9, 6, 5, 4, 3, 2, 1]);
        assert_eq!(list.get_value(&1), Some(&10));
    }

    #[test]
    fn closure_comparator() {
        // Orders by length first, then alphabetically.
        let mut list = SkipList::new(|a: &String, b: &String| (a.len(), a) > (b.len(), b));
        for word in &["pear", "fig", "banana", "apple", "kiwi"] {
            list.set(word.to_string(), word.len());
        }
        list.check();
        let words: Vec<&str> = list.keys().map(|k| k.as_str()).collect();
        assert_eq!(words, vec!["fig", "kiwi", "pear", "apple", "banana"]);
    }

    #[test]
    fn single_lane() {
        let mut list = SkipList::with_max_level(compare::int64, 1);
        for i in (0..200).rev() {
            list.set(i * 7 % 200, i);
        }
        list.check();
        assert_eq!(list.len(), 200);
        assert_eq!(keys(&list), (0..200).collect::<Vec<_>>());
        for i in 0..100 {
            assert!(list.remove(&(i * 2)).is_some());
        }
        list.check();
        assert_eq!(keys(&list), (0..100).map(|i| i * 2 + 1).collect::<Vec<_>>());
    }

    #[test]
    #[should_panic]
    fn zero_max_level() {
        let _ = SkipList::<i64, i64, _>::with_max_level(compare::int64, 0);
    }

    #[test]
    #[should_panic]
    fn set_zero_max_level() {
        let mut list: SkipList<i64, i64, _> = SkipList::new(compare::int64);
        list.set_max_level(0);
    }

    #[test]
    fn remove_detaches() {
        let mut list = SkipList::with_level_generator(compare::int64, 4, Sequence::boxed(vec![3]));
        list.extend((0..5).map(|x| (x, x)));
        list.check();
        let removed = list.remove(&2).unwrap();
        assert_eq!(removed.level(), 4);
        assert!(list.next(&removed).is_none());
        list.check();
        assert_eq!(keys(&list), vec![0, 1, 3, 4]);
    }

    #[test]
    fn slots_are_reused() {
        let mut list = SkipList::new(compare::int64);
        list.extend((0..100).map(|x| (x, x)));
        for i in 0..50 {
            list.remove(&(i * 2));
        }
        list.extend((100..150).map(|x| (x, x)));
        assert_eq!(list.nodes.len(), 100);
        list.check();
    }

    #[test]
    fn next_walks_in_order() {
        let mut list = SkipList::new(compare::int64);
        list.extend(vec![(5, 50), (1, 10), (3, 30)]);

        let first = list.front().unwrap();
        assert_eq!(*first.key(), 1);
        let second = list.next(first).unwrap();
        assert_eq!((*second.key(), second.value), (3, 30));
        let third = list.next(second).unwrap();
        assert_eq!(*third.key(), 5);
        assert!(list.next(third).is_none());
    }

    #[test]
    fn init_is_idempotent() {
        let mut list = SkipList::with_max_level(compare::int64, 5);
        list.init();
        assert!(list.is_empty());
        assert!(list.front().is_none());
        assert_eq!(list.max_level(), 5);
        list.check();

        list.extend((0..50).map(|x| (x, x)));
        list.init().init();
        assert_eq!(list.len(), 0);
        assert!(list.front().is_none());
        assert!(list.get(&3).is_none());
        assert_eq!(list.max_level(), 5);
        list.check();

        list.set(3, 3);
        assert_eq!(keys(&list), vec![3]);
        list.check();
    }

    #[test]
    fn grow_max_level() {
        let mut list = SkipList::with_max_level(compare::int64, 2);
        list.extend((0..500).map(|x| (x, -x)));
        assert_eq!(list.set_max_level(8), 2);
        assert_eq!(list.max_level(), 8);
        list.check();
        for i in 0..500 {
            assert_eq!(list.get_value(&i), Some(&-i));
        }
        list.extend((500..1000).map(|x| (x, -x)));
        list.check();
        assert_eq!(list.set_max_level(8), 8);
    }

    #[test]
    fn shrink_max_level() {
        let mut list = SkipList::with_max_level(compare::int64, 16);
        list.extend((0..500).map(|x| (x, x)));
        assert_eq!(list.set_max_level(3), 16);
        list.check();
        for i in 0..500 {
            assert_eq!(list.get_value(&i), Some(&i));
        }
        assert!(list.iter().count() == 500);
    }

    #[test]
    fn shrink_grow_remove() {
        let mut list = SkipList::with_level_generator(compare::int64, 6, Sequence::boxed(vec![5, 0, 3]));
        list.extend((0..30).map(|x| (x, x)));
        list.set_max_level(2);
        list.set_max_level(6);
        list.extend((30..60).map(|x| (x, x)));
        list.check();
        for i in 0..60 {
            assert_eq!(list.remove(&i).map(|e| e.value), Some(i));
            list.check();
        }
        assert!(list.is_empty());
    }

    #[test]
    fn out_of_range_levels_are_clamped() {
        let mut list = SkipList::with_level_generator(compare::int64, 3, Sequence::boxed(vec![99]));
        list.extend((0..10).map(|x| (x, x)));
        list.check();
        assert!(list.front().map(|e| e.level()) == Some(3));
    }

    #[test]
    fn iter() {
        let size = 1000;
        let list: SkipList<_, _> = (0..size).rev().map(|x| (x, x)).collect();

        fn test<T>(size: usize, mut iter: T)
        where
            T: Iterator<Item = (usize, usize)>,
        {
            for i in 0..size {
                assert_eq!(iter.size_hint(), (size - i, Some(size - i)));
                assert_eq!(iter.next().unwrap(), (i, i));
            }
            assert_eq!(iter.size_hint(), (0, Some(0)));
            assert_eq!(iter.next(), None);
        }
        test(size, list.iter().map(|(&a, &b)| (a, b)));
        test(size, (&list).into_iter().map(|(&a, &b)| (a, b)));
        test(size, list.into_iter());
    }

    #[test]
    fn keys_values() {
        let list: SkipList<_, _> = vec![(2, 'b'), (1, 'a'), (3, 'c')].into_iter().collect();
        assert_eq!(list.keys().cloned().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(list.values().cloned().collect::<String>(), "abc");
    }

    #[test]
    fn formatting() {
        let mut list = SkipList::new(compare::int64);
        assert_eq!(format!("{}", list), "[]");
        list.extend(vec![(2, 20), (1, 10)]);
        assert_eq!(format!("{}", list), "[(1, 10), (2, 20)]");
        assert_eq!(format!("{:?}", list), "{1: 10, 2: 20}");
        assert_eq!(format!("{}", list.front().unwrap()), "(1, 10)");
    }

    #[test]
    fn debug_structure() {
        let mut list = SkipList::with_level_generator(compare::int64, 3, Sequence::boxed(vec![0, 2, 1]));
        list.extend((1..=3).map(|x| (x, x)));
        assert_eq!(
            list.debug_structure(),
            "2: <head> --> 2\n1: <head> --> 2 --> 3\n0: <head> --> 1 --> 2 --> 3"
        );
    }

    #[test]
    fn from_config() {
        let mut config = Config::new();
        config.parse("max-level 6\nseed 9").unwrap();
        let mut a = SkipList::with_config(compare::int64, &config);
        let mut b = SkipList::with_config(compare::int64, &config);
        assert_eq!(a.max_level(), 6);
        a.extend((0..100).map(|x| (x, x)));
        b.extend((0..100).map(|x| (x, x)));
        a.check();
        // Same seed, same shape.
        assert_eq!(a.debug_structure(), b.debug_structure());
    }

    #[test]
    fn logs_structural_changes() {
        let (tx, rx) = channel();
        let mut list = SkipList::with_max_level(compare::int64, 4);
        list.set_logger(Logger::channel(Level::Verbose, tx));
        list.set(1, 1);
        list.set_max_level(2);
        list.init();
        assert_eq!(rx.recv().unwrap(), b"skiplist max level changed from 4 to 2\n");
        assert_eq!(rx.recv().unwrap(), b"skiplist reset, 2 lanes kept\n");
        assert!(rx.try_recv().is_err());
    }
}
