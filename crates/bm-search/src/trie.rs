//! Prefix trie over a fixed 27-symbol alphabet.
//!
//! # Data layout
//!
//! Nodes live in a single arena (`Vec<TrieNode>`) and refer to children by
//! index.  The root is always slot 0, so a child index is never zero and
//! `Option<NonZeroU32>` packs into four bytes.  Each node carries a direct
//! table of 27 child slots: `' '` is slot 0 and `a`..`z` are slots 1..=26,
//! which puts enumeration in ASCII order.
//!
//! # Complexity
//!
//! | Operation          | Cost                                            |
//! |--------------------|-------------------------------------------------|
//! | `add`, `contains`  | O(m) for a key of length m                      |
//! | `keys_with_prefix` | O(p + t), p = prefix length, t = output length  |
//! | `clear`            | O(1); nodes have no destructors                 |
//!
//! The structure has no interior mutability.  Build it single-threaded, then
//! share `&PrefixTrie` freely; any later mutation needs exclusive access
//! (`&mut`), which the borrow checker enforces.

use std::num::NonZeroU32;

use crate::TrieError;

const ALPHABET_SIZE: usize = 27;

/// Child slot of `ch`, or `None` if `ch` is outside the alphabet.
#[inline]
fn slot_of(ch: char) -> Option<usize> {
    match ch {
        ' ' => Some(0),
        'a'..='z' => Some(ch as usize - 'a' as usize + 1),
        _ => None,
    }
}

#[derive(Clone, Debug)]
struct TrieNode {
    children: [Option<NonZeroU32>; ALPHABET_SIZE],
    /// Symbol on the edge into this node.  Unused on the root.
    symbol:   u8,
    terminal: bool,
}

impl TrieNode {
    fn new(symbol: u8) -> Self {
        Self { children: [None; ALPHABET_SIZE], symbol, terminal: false }
    }
}

/// A set of strings over `' '` and `a`–`z` with prefix enumeration.
///
/// # Example
///
/// ```
/// use bm_search::PrefixTrie;
///
/// let mut trie = PrefixTrie::new();
/// trie.add("top dog").unwrap();
/// trie.add("top").unwrap();
/// trie.add("tip").unwrap();
///
/// assert!(trie.contains("top"));
/// assert!(!trie.contains("to"));
/// assert_eq!(trie.keys_with_prefix("to"), vec!["top", "top dog"]);
/// assert!(trie.keys_with_prefix("x").is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct PrefixTrie {
    nodes: Vec<TrieNode>,
    len:   usize,
}

impl PrefixTrie {
    pub fn new() -> Self {
        Self { nodes: vec![TrieNode::new(0)], len: 0 }
    }

    /// Build a trie from `keys`, stopping at the first rejected key.
    pub fn from_keys<I, S>(keys: I) -> Result<Self, TrieError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self::new();
        for key in keys {
            trie.add(key.as_ref())?;
        }
        Ok(trie)
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of arena nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Insert `key`.
    ///
    /// Returns `Ok(true)` if the key was new and `Ok(false)` if it was already
    /// stored.  A rejected key leaves the trie untouched.
    ///
    /// # Errors
    ///
    /// [`TrieError::EmptyKey`] for `""`; [`TrieError::UnsupportedSymbol`] for
    /// any character other than `' '` or `a`–`z`.
    pub fn add(&mut self, key: &str) -> Result<bool, TrieError> {
        if key.is_empty() {
            return Err(TrieError::EmptyKey);
        }
        if let Some((position, ch)) = key.chars().enumerate().find(|&(_, c)| slot_of(c).is_none()) {
            return Err(TrieError::UnsupportedSymbol { ch, position });
        }

        let mut cur = 0usize;
        for byte in key.bytes() {
            // Validated above: every byte is ASCII and in the alphabet.
            let slot = slot_of(char::from(byte)).unwrap_or_default();
            cur = match self.nodes[cur].children[slot] {
                Some(child) => child.get() as usize,
                None => {
                    let child = self.alloc(byte);
                    self.nodes[cur].children[slot] = Some(child);
                    child.get() as usize
                }
            };
        }

        let node = &mut self.nodes[cur];
        if node.terminal {
            return Ok(false);
        }
        node.terminal = true;
        self.len += 1;
        Ok(true)
    }

    /// `true` iff `key` was added earlier.  Exact match only.
    pub fn contains(&self, key: &str) -> bool {
        !key.is_empty() && self.follow(key).is_some_and(|n| self.nodes[n].terminal)
    }

    /// Every stored key that starts with `prefix`.
    ///
    /// Keys come out depth-first: a key precedes its extensions, and
    /// siblings are visited in ASCII order.  A prefix with no path in the
    /// trie, including one with out-of-alphabet characters, yields an empty
    /// vector.  `""` yields every key.
    pub fn keys_with_prefix(&self, prefix: &str) -> Vec<String> {
        let mut keys = Vec::new();
        self.for_each_key_with_prefix(prefix, |k| keys.push(k.to_owned()));
        keys
    }

    /// Visitor form of [`keys_with_prefix`](Self::keys_with_prefix) that
    /// lends each key instead of allocating it.
    pub fn for_each_key_with_prefix<F: FnMut(&str)>(&self, prefix: &str, mut visit: F) {
        let Some(start) = self.follow(prefix) else {
            return;
        };

        let mut buf = String::from(prefix);
        if self.nodes[start].terminal {
            visit(&buf);
        }

        // (node, length of `buf` before this node's symbol is appended)
        let mut stack: Vec<(usize, usize)> = Vec::new();
        self.push_children(start, buf.len(), &mut stack);

        while let Some((node, depth)) = stack.pop() {
            buf.truncate(depth);
            buf.push(char::from(self.nodes[node].symbol));
            if self.nodes[node].terminal {
                visit(&buf);
            }
            self.push_children(node, buf.len(), &mut stack);
        }
    }

    /// Drop every key.
    pub fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[0] = TrieNode::new(0);
        self.len = 0;
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Arena index of the node spelled by `path`, or `None` if absent.
    fn follow(&self, path: &str) -> Option<usize> {
        let mut cur = 0usize;
        for ch in path.chars() {
            let slot = slot_of(ch)?;
            cur = self.nodes[cur].children[slot]?.get() as usize;
        }
        Some(cur)
    }

    /// Push children of `node` so the lowest slot is popped first.
    fn push_children(&self, node: usize, depth: usize, stack: &mut Vec<(usize, usize)>) {
        for child in self.nodes[node].children.iter().rev().flatten() {
            stack.push((child.get() as usize, depth));
        }
    }

    fn alloc(&mut self, symbol: u8) -> NonZeroU32 {
        self.nodes.push(TrieNode::new(symbol));
        // The root occupies index 0, so a freshly pushed node is never 0.
        NonZeroU32::new((self.nodes.len() - 1) as u32).unwrap_or(NonZeroU32::MIN)
    }
}

impl Default for PrefixTrie {
    fn default() -> Self {
        Self::new()
    }
}
