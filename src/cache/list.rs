//! Recency List Module
//!
//! Arena-backed doubly-linked list that orders entries by recency of use.

use std::mem;

use crate::cache::Entry;

/// Position of a node inside the arena.
pub type NodeIndex = usize;

#[derive(Debug, Default)]
struct Node {
    entry: Entry,
    /// Neighbour towards the head (more recently used)
    prev: Option<NodeIndex>,
    /// Neighbour towards the tail (less recently used)
    next: Option<NodeIndex>,
}

// == Recency List ==
/// Orders entries from most recently used to least recently used.
///
/// Nodes live in a growable `Vec` and link to each other by index:
/// - Head = Most recently used
/// - Tail = Least recently used
///
/// Slots freed by `remove` or `evict_oldest` are recycled by the next
/// `push_front`, so a `NodeIndex` is only valid until its node is removed.
#[derive(Debug, Default)]
pub struct RecencyList {
    nodes: Vec<Node>,
    free: Vec<NodeIndex>,
    head: Option<NodeIndex>,
    tail: Option<NodeIndex>,
    len: usize,
}

impl RecencyList {
    // == Constructor ==
    /// Creates an empty list with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            ..Self::default()
        }
    }

    // == Push Front ==
    /// Inserts an entry as the most recently used and returns its index.
    pub fn push_front(&mut self, entry: Entry) -> NodeIndex {
        let node = Node {
            entry,
            prev: None,
            next: None,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        };
        self.attach_front(idx);
        self.len += 1;
        idx
    }

    // == Touch ==
    /// Marks a node as recently used (moves it to the head).
    pub fn touch(&mut self, idx: NodeIndex) {
        if self.head == Some(idx) {
            return;
        }
        self.detach(idx);
        self.attach_front(idx);
    }

    // == Remove ==
    /// Unlinks a node and returns its entry. The slot is recycled.
    pub fn remove(&mut self, idx: NodeIndex) -> Entry {
        self.detach(idx);
        self.free.push(idx);
        self.len -= 1;
        mem::take(&mut self.nodes[idx].entry)
    }

    // == Evict Oldest ==
    /// Removes and returns the least recently used entry.
    ///
    /// Returns None if the list is empty.
    pub fn evict_oldest(&mut self) -> Option<Entry> {
        let idx = self.tail?;
        Some(self.remove(idx))
    }

    // == Peek Oldest ==
    /// Returns the least recently used entry without removing it.
    pub fn peek_oldest(&self) -> Option<&Entry> {
        self.tail.map(|idx| &self.nodes[idx].entry)
    }

    pub fn get(&self, idx: NodeIndex) -> &Entry {
        &self.nodes[idx].entry
    }

    pub fn get_mut(&mut self, idx: NodeIndex) -> &mut Entry {
        &mut self.nodes[idx].entry
    }

    // == Length ==
    /// Returns the number of linked entries.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // == Clear ==
    /// Drops every entry and releases the arena.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    // == Iter ==
    /// Iterates `(index, entry)` pairs from most to least recently used.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    // == Check Links ==
    /// Walks the list and verifies that forward and backward links agree,
    /// that the walk visits exactly `len` nodes, and that every arena slot
    /// is either linked or free.
    pub fn check_links(&self) -> bool {
        let mut visited = 0;
        let mut prev = None;
        let mut cursor = self.head;

        while let Some(idx) = cursor {
            if visited >= self.nodes.len() || self.nodes[idx].prev != prev {
                return false;
            }
            visited += 1;
            prev = cursor;
            cursor = self.nodes[idx].next;
        }

        prev == self.tail
            && visited == self.len
            && visited + self.free.len() == self.nodes.len()
    }

    fn attach_front(&mut self, idx: NodeIndex) {
        self.nodes[idx].prev = None;
        self.nodes[idx].next = self.head;
        match self.head {
            Some(old_head) => self.nodes[old_head].prev = Some(idx),
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }

    fn detach(&mut self, idx: NodeIndex) {
        let prev = self.nodes[idx].prev.take();
        let next = self.nodes[idx].next.take();

        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.nodes[n].prev = prev,
            None => self.tail = prev,
        }
    }
}

// == Iterator ==
/// Borrowing iterator over a [`RecencyList`], head to tail.
pub struct Iter<'a> {
    list: &'a RecencyList,
    cursor: Option<NodeIndex>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (NodeIndex, &'a Entry);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.cursor?;
        let node = &self.list.nodes[idx];
        self.cursor = node.next;
        Some((idx, &node.entry))
    }
}
