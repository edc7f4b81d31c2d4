/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

//! An ordered, copy-on-write list for handler sets, interceptor chains and selector chains.

use std::fmt::{self, Debug};
use std::sync::Arc;

use parking_lot::RwLock;

/// An insertion-ordered list whose readers work on immutable snapshots.
///
/// Every mutation clones the current vector, edits the clone and publishes it under a
/// short write lock. Readers take a snapshot (`Arc<Vec<T>>`) under a read lock and then
/// iterate without holding any lock, so they see either the old or the new contents,
/// never a partially updated list.
pub struct CopyOnWriteList<T> {
    items: RwLock<Arc<Vec<T>>>,
}

impl<T> Default for CopyOnWriteList<T> {
    fn default() -> Self {
        Self {
            items: RwLock::new(Arc::new(Vec::new())),
        }
    }
}

impl<T: Debug> Debug for CopyOnWriteList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.read().iter()).finish()
    }
}

impl<T: Clone> CopyOnWriteList<T> {
    /// Creates a list holding `items` in order.
    #[cfg(test)]
    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            items: RwLock::new(Arc::new(items)),
        }
    }

    /// Returns the current contents.
    pub fn snapshot(&self) -> Arc<Vec<T>> {
        Arc::clone(&self.items.read())
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    /// Returns `true` when the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }

    /// Appends `item`.
    pub fn push(&self, item: T) {
        self.mutate(|items| items.push(item));
    }

    /// Appends `item` unless an item considered equal by `same` is already present.
    ///
    /// Returns `true` when the list changed.
    pub fn push_unique(&self, item: T, same: impl Fn(&T, &T) -> bool) -> bool {
        let mut guard = self.items.write();
        if guard.iter().any(|existing| same(existing, &item)) {
            return false;
        }
        let mut next = Vec::clone(&guard);
        next.push(item);
        *guard = Arc::new(next);
        true
    }

    /// Removes every item matching `predicate`. Returns `true` when the list changed.
    pub fn remove_where(&self, predicate: impl Fn(&T) -> bool) -> bool {
        let mut guard = self.items.write();
        if !guard.iter().any(&predicate) {
            return false;
        }
        let next: Vec<T> = guard.iter().filter(|item| !predicate(item)).cloned().collect();
        *guard = Arc::new(next);
        true
    }

    /// Replaces the item at `index`, returning the previous one.
    ///
    /// Returns `Err(item)` when `index` is out of bounds.
    pub fn set(&self, index: usize, item: T) -> Result<T, T> {
        let mut guard = self.items.write();
        if index >= guard.len() {
            return Err(item);
        }
        let mut next = Vec::clone(&guard);
        let previous = std::mem::replace(&mut next[index], item);
        *guard = Arc::new(next);
        Ok(previous)
    }

    /// Inserts `item` at `index`, shifting later items.
    ///
    /// Returns `Err(item)` when `index` is greater than the length.
    pub fn insert(&self, index: usize, item: T) -> Result<(), T> {
        let mut guard = self.items.write();
        if index > guard.len() {
            return Err(item);
        }
        let mut next = Vec::clone(&guard);
        next.insert(index, item);
        *guard = Arc::new(next);
        Ok(())
    }

    /// Replaces the whole contents.
    pub fn replace_all(&self, items: Vec<T>) {
        *self.items.write() = Arc::new(items);
    }

    fn mutate(&self, edit: impl FnOnce(&mut Vec<T>)) {
        let mut guard = self.items.write();
        let mut next = Vec::clone(&guard);
        edit(&mut next);
        *guard = Arc::new(next);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshots_are_unaffected_by_later_mutation() {
        let list = CopyOnWriteList::from_vec(vec![1, 2]);
        let before = list.snapshot();
        list.push(3);
        assert_eq!(*before, vec![1, 2]);
        assert_eq!(*list.snapshot(), vec![1, 2, 3]);
    }

    #[test]
    fn push_unique_reports_change() {
        let list = CopyOnWriteList::default();
        assert!(list.push_unique(7, |a, b| a == b));
        assert!(!list.push_unique(7, |a, b| a == b));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn set_and_insert_respect_bounds() {
        let list = CopyOnWriteList::from_vec(vec!['a', 'b']);
        assert_eq!(list.set(1, 'z'), Ok('b'));
        assert_eq!(list.set(2, 'q'), Err('q'));
        assert_eq!(list.insert(2, 'c'), Ok(()));
        assert_eq!(list.insert(9, 'x'), Err('x'));
        assert_eq!(*list.snapshot(), vec!['a', 'z', 'c']);
    }

    #[test]
    fn remove_where_keeps_order() {
        let list = CopyOnWriteList::from_vec(vec![1, 2, 3, 4]);
        assert!(list.remove_where(|n| n % 2 == 0));
        assert!(!list.remove_where(|n| *n > 10));
        assert_eq!(*list.snapshot(), vec![1, 3]);
    }
}
