//! Snapshot iteration over collections that may change mid-traversal
//!
//! A [`SnapshotIter`] captures the source length when it is created and then
//! walks indices `0..count`, fetching whatever currently sits at each index
//! in the live collection. Nothing is copied up front.
//!
//! The outcome when the traversal body mutates the collection it walks:
//! - removing an element before the cursor shifts the rest down, so one
//!   element is skipped;
//! - inserting before the cursor shifts the rest up, so one element is
//!   visited twice;
//! - changes at or after the cursor are seen as they are;
//! - appended elements are visited only if they land below the captured
//!   count;
//! - indices past the live end yield `None` rather than failing.
//!
//! Every element is therefore visited *at most* a bounded number of times
//! and the traversal always terminates after exactly `count` steps.

use crate::ecs::ContractViolation;
use std::cell::RefCell;
use std::iter::FusedIterator;

/// An ordered collection that can be read by index while it is being
/// iterated.
///
/// `fetch` must release any borrow of the collection before returning, so
/// the traversal body is free to mutate the source.
pub trait SnapshotSource {
    type Item;

    /// Current number of elements.
    fn live_len(&self) -> usize;

    /// Element currently at `index`, if any.
    fn fetch(&self, index: usize) -> Option<Self::Item>;
}

impl<T: Clone> SnapshotSource for RefCell<Vec<T>> {
    type Item = T;

    fn live_len(&self) -> usize {
        self.borrow().len()
    }

    fn fetch(&self, index: usize) -> Option<T> {
        self.borrow().get(index).cloned()
    }
}

impl<T: Clone> SnapshotSource for [T] {
    type Item = T;

    fn live_len(&self) -> usize {
        self.len()
    }

    fn fetch(&self, index: usize) -> Option<T> {
        self.get(index).cloned()
    }
}

impl<T: Clone> SnapshotSource for Vec<T> {
    type Item = T;

    fn live_len(&self) -> usize {
        self.len()
    }

    fn fetch(&self, index: usize) -> Option<T> {
        self.get(index).cloned()
    }
}

/// Count-snapshotting, live-lookup iterator.
///
/// # Example
/// ```ignore
/// let mut iter = SnapshotIter::new(&registry);
/// while let Ok(slot) = iter.get_next() {
///     if let Some(entity) = slot {
///         entity.update();
///     }
/// }
/// ```
pub struct SnapshotIter<'a, S: SnapshotSource + ?Sized> {
    source: &'a S,
    count: usize,
    index: usize,
}

impl<'a, S: SnapshotSource + ?Sized> SnapshotIter<'a, S> {
    pub fn new(source: &'a S) -> Self {
        Self {
            count: source.live_len(),
            source,
            index: 0,
        }
    }

    /// Length of the source when the iterator was created.
    pub fn snapshot_len(&self) -> usize {
        self.count
    }

    /// Number of `get_next` calls made so far.
    pub fn cursor(&self) -> usize {
        self.index
    }

    pub fn remaining(&self) -> usize {
        self.count - self.index
    }

    /// Fetch the element currently at the cursor and advance.
    ///
    /// `Ok(None)` means the live collection no longer reaches the cursor.
    /// Fails once `snapshot_len` calls have been made.
    pub fn get_next(&mut self) -> Result<Option<S::Item>, ContractViolation> {
        if self.index >= self.count {
            return Err(ContractViolation::IteratorExhausted { count: self.count });
        }
        let item = self.source.fetch(self.index);
        self.index += 1;
        Ok(item)
    }
}

impl<S: SnapshotSource + ?Sized> Iterator for SnapshotIter<'_, S> {
    type Item = S::Item;

    /// Yields every present element, skipping vacated slots.
    fn next(&mut self) -> Option<S::Item> {
        while let Ok(slot) = self.get_next() {
            if slot.is_some() {
                return slot;
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining()))
    }
}

impl<S: SnapshotSource + ?Sized> FusedIterator for SnapshotIter<'_, S> {}
