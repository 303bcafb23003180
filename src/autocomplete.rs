//! Case-insensitive prefix index used to drive live autocomplete.
//!
//! Every node keeps its children in a `Vec` in the order their edge letters were
//! first seen, so results come back in the order the vocabulary was loaded, not
//! alphabetically. Load a sorted vocabulary if alphabetical output is wanted.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("limit must be non-negative, got {0}")]
    NegativeLimit(i64),
}

/// Negative values are rejected rather than clamped to zero.
pub fn checked_limit(limit: i64) -> Result<usize, SearchError> {
    usize::try_from(limit).map_err(|_| SearchError::NegativeLimit(limit))
}

/// Folds letter by letter so a prefix always folds to a prefix of the folded word.
pub fn normalize(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

#[derive(Debug, Default)]
pub struct Trie {
    root: Node,
    len: usize,
}

#[derive(Debug, Default)]
pub struct Node {
    next: Vec<Node>,
    letter: Option<char>,
    value: Option<String>,
}

impl Node {
    pub fn new_root() -> Self {
        Self::default()
    }

    pub fn new(letter: char) -> Self {
        Self {
            next: vec![],
            letter: Some(letter),
            value: None,
        }
    }

    pub fn letter(&self) -> Option<char> {
        self.letter
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn is_terminal(&self) -> bool {
        self.value.is_some()
    }

    pub fn children(&self) -> &[Node] {
        &self.next
    }

    fn child(&self, letter: char) -> Option<&Node> {
        self.next.iter().find(|n| n.letter == Some(letter))
    }

    /// New children go after the existing ones.
    pub fn get_or_create_child(&mut self, letter: char) -> &mut Node {
        let idx = match self.next.iter().position(|n| n.letter == Some(letter)) {
            Some(idx) => idx,
            None => {
                self.next.push(Node::new(letter));
                self.next.len() - 1
            }
        };
        &mut self.next[idx]
    }

    pub fn mark_terminal(&mut self, original: &str) -> bool {
        self.value.replace(original.to_string()).is_none()
    }
}

impl Trie {
    pub fn new() -> Self {
        Self {
            root: Node::new_root(),
            len: 0,
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn insert<W: AsRef<str>>(&mut self, word: W) {
        let word = word.as_ref();
        let mut node = &mut self.root;
        for letter in normalize(word).chars() {
            node = node.get_or_create_child(letter);
        }
        if node.mark_terminal(word) {
            self.len += 1;
        }
    }

    pub fn extend<W: AsRef<str>>(&mut self, words: impl IntoIterator<Item = W>) {
        for word in words.into_iter() {
            self.insert(word);
        }
    }

    pub fn get<W: AsRef<str>>(&self, word: W) -> Option<&str> {
        self.find(word.as_ref()).and_then(Node::value)
    }

    pub fn contains<W: AsRef<str>>(&self, word: W) -> bool {
        self.get(word).is_some()
    }

    /// Lazily yields every value under `prefix` in pre-order, children in
    /// insertion order. An unknown prefix yields nothing.
    pub fn matches<W: AsRef<str>>(&self, prefix: W) -> Matches<'_> {
        Matches {
            stack: self.find(prefix.as_ref()).into_iter().collect(),
        }
    }

    /// Up to `limit` values whose normalized form starts with the normalized
    /// `prefix`.
    pub fn search_prefix<W: AsRef<str>>(&self, prefix: W, limit: usize) -> Vec<String> {
        self.matches(prefix)
            .take(limit)
            .map(str::to_string)
            .collect()
    }

    pub fn try_search_prefix<W: AsRef<str>>(
        &self,
        prefix: W,
        limit: i64,
    ) -> Result<Vec<String>, SearchError> {
        let limit = checked_limit(limit)?;
        Ok(self.search_prefix(prefix, limit))
    }

    fn find(&self, prefix: &str) -> Option<&Node> {
        let mut node = &self.root;
        for letter in normalize(prefix).chars() {
            node = node.child(letter)?;
        }
        Some(node)
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        // unlink iteratively, long words would otherwise recurse once per letter
        let mut stack = std::mem::take(&mut self.next);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.next);
        }
    }
}

impl<W: AsRef<str>> FromIterator<W> for Trie {
    fn from_iter<I: IntoIterator<Item = W>>(iter: I) -> Self {
        let mut trie = Trie::new();
        trie.extend(iter);
        trie
    }
}

/// Pre-order walk over a subtree, see [`Trie::matches`].
#[derive(Debug, Clone)]
pub struct Matches<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Matches<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            // reversed so the first-inserted child is popped first
            self.stack.extend(node.next.iter().rev());
            if let Some(value) = node.value() {
                return Some(value);
            }
        }
        None
    }
}
