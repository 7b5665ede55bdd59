// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Slot storage: the contents of one table position.

use std::fmt;

/// A single position in the table.
///
/// A table built for a probing or custom strategy only ever holds `Empty` and `Occupied`;
/// a chaining table only ever holds `Empty` and `Chain`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Slot {
    /// Nothing stored.
    #[default]
    Empty,
    /// Exactly one key.
    Occupied(u64),
    /// One or more keys in insertion order.
    Chain(Chain),
}

impl Slot {
    /// Whether the slot holds anything.
    pub fn is_empty(&self) -> bool {
        matches!(self, Slot::Empty)
    }

    /// Number of keys held in this slot.
    pub fn len(&self) -> usize {
        match self {
            Slot::Empty => 0,
            Slot::Occupied(_) => 1,
            Slot::Chain(chain) => chain.len(),
        }
    }

    /// Iterates the keys held in this slot, in insertion order for chains.
    pub fn keys(&self) -> SlotKeys<'_> {
        match self {
            Slot::Empty => SlotKeys::Single(None),
            Slot::Occupied(key) => SlotKeys::Single(Some(*key)),
            Slot::Chain(chain) => SlotKeys::Chain(chain.iter()),
        }
    }
}

/// Iterator over the keys of a [`Slot`].
#[derive(Debug)]
pub enum SlotKeys<'a> {
    #[doc(hidden)]
    Single(Option<u64>),
    #[doc(hidden)]
    Chain(ChainIter<'a>),
}

impl Iterator for SlotKeys<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        match self {
            SlotKeys::Single(key) => key.take(),
            SlotKeys::Chain(iter) => iter.next(),
        }
    }
}

struct ChainNode {
    key: u64,
    next: Option<Box<ChainNode>>,
}

/// A singly-linked list of keys.
///
/// [`Chain::push_back`] walks to the tail before linking, so insertion costs O(length)
/// and keys keep their insertion order.
///
/// Cloning, comparing, formatting and dropping all walk the list in a loop, so chain
/// length is not bounded by stack depth.
pub struct Chain {
    head: Box<ChainNode>,
    len: usize,
}

impl Chain {
    /// Creates a one-node chain.
    pub fn new(key: u64) -> Self {
        Self {
            head: Box::new(ChainNode { key, next: None }),
            len: 1,
        }
    }

    /// Appends `key` after the current tail.
    pub fn push_back(&mut self, key: u64) {
        let mut link = &mut self.head.next;
        while let Some(node) = link {
            link = &mut node.next;
        }
        *link = Some(Box::new(ChainNode { key, next: None }));
        self.len += 1;
    }

    /// Number of keys in the chain; never zero.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Always false; a chain is created with its first key.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterates keys from head to tail.
    pub fn iter(&self) -> ChainIter<'_> {
        ChainIter {
            node: Some(&self.head),
        }
    }
}

impl Drop for Chain {
    fn drop(&mut self) {
        // Unlink iteratively; the default recursive drop can overflow the stack on long chains.
        let mut next = self.head.next.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}

impl Clone for Chain {
    fn clone(&self) -> Self {
        let mut chain = Chain::new(self.head.key);
        let mut tail = &mut chain.head;
        for key in self.iter().skip(1) {
            tail = tail.next.insert(Box::new(ChainNode { key, next: None }));
        }
        chain.len = self.len;
        chain
    }
}

impl PartialEq for Chain {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl Eq for Chain {}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a Chain {
    type Item = u64;
    type IntoIter = ChainIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the keys of a [`Chain`].
pub struct ChainIter<'a> {
    node: Option<&'a ChainNode>,
}

impl fmt::Debug for ChainIter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChainIter")
            .field("next_key", &self.node.map(|node| node.key))
            .finish()
    }
}

impl Iterator for ChainIter<'_> {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let node = self.node?;
        self.node = node.next.as_deref();
        Some(node.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_keeps_insertion_order() {
        let mut chain = Chain::new(1);
        chain.push_back(4);
        chain.push_back(7);
        assert_eq!(chain.len(), 3);
        assert_eq!(chain.iter().collect::<Vec<_>>(), vec![1, 4, 7]);
    }

    /// Builds `0..len` without push_back to keep construction linear.
    fn long_chain(len: u64) -> Chain {
        let mut chain = Chain::new(0);
        {
            let mut node = &mut chain.head;
            for key in 1..len {
                node = node.next.insert(Box::new(ChainNode { key, next: None }));
            }
        }
        chain.len = len as usize;
        chain
    }

    #[test]
    fn test_long_chain_drops() {
        let chain = long_chain(200_000);
        assert_eq!(chain.iter().last(), Some(199_999));
        drop(chain);
    }

    #[test]
    fn test_long_chain_clones_and_compares() {
        let chain = long_chain(200_000);
        let copy = chain.clone();
        assert_eq!(copy.len(), 200_000);
        assert_eq!(copy.iter().last(), Some(199_999));
        assert!(copy == chain);

        let mut longer = copy.clone();
        longer.push_back(7);
        assert!(longer != chain);

        let slot = Slot::Chain(chain);
        assert_eq!(slot.clone(), slot);
    }

    #[test]
    fn test_chain_equality_is_by_keys() {
        let mut a = Chain::new(1);
        a.push_back(2);
        let mut b = Chain::new(1);
        b.push_back(3);
        assert_ne!(a, b);
        b = a.clone();
        assert_eq!(a, b);
        assert_eq!(format!("{a:?}"), "[1, 2]");
    }

    #[test]
    fn test_slot_keys() {
        assert_eq!(Slot::Empty.keys().count(), 0);
        assert_eq!(Slot::Occupied(9).keys().collect::<Vec<_>>(), vec![9]);

        let mut chain = Chain::new(3);
        chain.push_back(8);
        let slot = Slot::Chain(chain);
        assert_eq!(slot.len(), 2);
        assert!(!slot.is_empty());
        assert_eq!(slot.keys().collect::<Vec<_>>(), vec![3, 8]);
    }
}
