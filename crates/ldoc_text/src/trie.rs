use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, miette::Diagnostic)]
pub enum TrieError {
    #[error("Cannot add an empty word")]
    EmptyWord,

    #[error("Character {ch:?} in {word:?} is not accepted by a {kind} trie")]
    #[diagnostic(help("use a wider trie kind such as `unicode`"))]
    UnsupportedChar {
        word: String,
        ch: char,
        kind: TrieKind,
    },
}

impl TrieError {
    pub fn unsupported(word: impl Into<String>, ch: char, kind: TrieKind) -> Self {
        Self::UnsupportedChar {
            word: word.into(),
            ch,
            kind,
        }
    }
}

/// Alphabet accepted by a [`Trie`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrieKind {
    /// Lower-case English letters and the space character.
    Alpha,
    /// [`TrieKind::Alpha`] plus the digits `0` to `9`.
    AlphaNumeric,
    /// Any ASCII character.
    Ascii,
    /// Any character.
    #[default]
    Unicode,
}

impl TrieKind {
    /// Returns true if `ch` belongs to this alphabet.
    pub fn accepts(self, ch: char) -> bool {
        match self {
            Self::Alpha => ch.is_ascii_lowercase() || ch == ' ',
            Self::AlphaNumeric => ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == ' ',
            Self::Ascii => ch.is_ascii(),
            Self::Unicode => true,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Alpha => "alpha",
            Self::AlphaNumeric => "alpha-numeric",
            Self::Ascii => "ascii",
            Self::Unicode => "unicode",
        }
    }
}

impl std::fmt::Display for TrieKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Data attached to a word stored in a [`Trie`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Annotation {
    /// Caller-defined category.
    pub category: u16,
    /// Caller-defined payload.
    pub payload: u64,
}

impl Annotation {
    pub const fn new(category: u16, payload: u64) -> Self {
        Self { category, payload }
    }
}

/// One node of a [`Trie`]: the path to it spells a prefix of stored words.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrieNode {
    annotation: Option<Annotation>,
    children: BTreeMap<char, TrieNode>,
}

impl TrieNode {
    /// Annotation of the word ending here, if a word ends here.
    pub fn annotation(&self) -> Option<&Annotation> {
        self.annotation.as_ref()
    }

    /// Returns true if a stored word ends at this node.
    pub fn is_word(&self) -> bool {
        self.annotation.is_some()
    }

    pub fn child(&self, ch: char) -> Option<&TrieNode> {
        self.children.get(&ch)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn dump_into(&self, ch: char, level: usize, out: &mut String) {
        let indent = level * 2;
        let _ = match &self.annotation {
            Some(a) => writeln!(
                out,
                "{:indent$}{ch}, category {}, payload {:08x}",
                "", a.category, a.payload
            ),
            None => writeln!(out, "{:indent$}{ch}", ""),
        };
        for (next, child) in &self.children {
            child.dump_into(*next, level + 1, out);
        }
    }

    fn collect_words(&self, prefix: &mut String, out: &mut Vec<(String, Annotation)>) {
        if let Some(annotation) = self.annotation {
            out.push((prefix.clone(), annotation));
        }
        for (ch, child) in &self.children {
            prefix.push(*ch);
            child.collect_words(prefix, out);
            prefix.pop();
        }
    }

    /// Removes the word spelled by `rest` below this node, pruning nodes
    /// that no longer lead to a word.
    fn remove(&mut self, mut rest: std::str::Chars<'_>) -> Option<Annotation> {
        match rest.next() {
            None => self.annotation.take(),
            Some(ch) => {
                let child = self.children.get_mut(&ch)?;
                let removed = child.remove(rest)?;
                if child.annotation.is_none() && child.children.is_empty() {
                    self.children.remove(&ch);
                }
                Some(removed)
            }
        }
    }
}

/// Character trie mapping words to [`Annotation`]s.
///
/// # Example
///
/// ```rust
/// use ldoc_text::{Annotation, Trie, TrieKind};
///
/// let mut trie = Trie::new(TrieKind::Alpha);
/// trie.add("cat", Annotation::new(2, 123)).unwrap();
/// trie.add("catnip", Annotation::new(1, 0)).unwrap();
///
/// assert_eq!(trie.get("cat"), Some(&Annotation::new(2, 123)));
/// assert_eq!(trie.get("ca"), None);
/// assert!(trie.contains_prefix("ca"));
/// assert_eq!(trie.prefixes_of("catnipped").len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trie {
    kind: TrieKind,
    root: TrieNode,
    len: usize,
    min_len: usize,
    max_len: usize,
}

impl Trie {
    pub fn new(kind: TrieKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn kind(&self) -> TrieKind {
        self.kind
    }

    /// Number of stored words.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Length in characters of the shortest stored word, 0 when empty.
    pub fn min_len(&self) -> usize {
        self.min_len
    }

    /// Length in characters of the longest stored word, 0 when empty.
    pub fn max_len(&self) -> usize {
        self.max_len
    }

    /// Stores `word` with `annotation`, replacing any previous annotation.
    pub fn add(&mut self, word: &str, annotation: Annotation) -> Result<(), TrieError> {
        if word.is_empty() {
            return Err(TrieError::EmptyWord);
        }
        if let Some(ch) = word.chars().find(|ch| !self.kind.accepts(*ch)) {
            return Err(TrieError::unsupported(word, ch, self.kind));
        }

        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
        }
        if node.annotation.replace(annotation).is_none() {
            let chars = word.chars().count();
            self.min_len = if self.len == 0 {
                chars
            } else {
                self.min_len.min(chars)
            };
            self.max_len = self.max_len.max(chars);
            self.len += 1;
        }
        Ok(())
    }

    /// Walks the path spelled by `word`.
    ///
    /// With `prefixes` unset only nodes where a stored word ends are
    /// returned. With `prefixes` set any node on a stored path is returned.
    pub fn lookup(&self, word: &str, prefixes: bool) -> Option<&TrieNode> {
        let mut node = &self.root;
        for ch in word.chars() {
            node = node.child(ch)?;
        }
        (prefixes || node.is_word()).then_some(node)
    }

    /// Annotation of `word`, if it is stored.
    pub fn get(&self, word: &str) -> Option<&Annotation> {
        self.lookup(word, false).and_then(TrieNode::annotation)
    }

    /// Returns true if some stored word starts with `prefix`.
    pub fn contains_prefix(&self, prefix: &str) -> bool {
        self.lookup(prefix, true).is_some()
    }

    /// Removes `word`, returning its annotation.
    pub fn remove(&mut self, word: &str) -> Option<Annotation> {
        let removed = self.root.remove(word.chars())?;
        self.len -= 1;
        self.recompute_bounds();
        Some(removed)
    }

    /// Stored words that are prefixes of `text`, shortest first.
    pub fn prefixes_of<'t>(&self, text: &'t str) -> Vec<(&'t str, Annotation)> {
        let mut found = Vec::new();
        let mut node = &self.root;
        for (offset, ch) in text.char_indices() {
            let Some(next) = node.child(ch) else {
                break;
            };
            node = next;
            if let Some(annotation) = node.annotation {
                found.push((&text[..offset + ch.len_utf8()], annotation));
            }
        }
        found
    }

    /// All stored words in character order.
    pub fn words(&self) -> Vec<(String, Annotation)> {
        let mut out = Vec::with_capacity(self.len);
        self.root.collect_words(&mut String::new(), &mut out);
        out
    }

    /// Renders the trie one node per line, two spaces per level. The root
    /// is printed as `*`.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        self.root.dump_into('*', 0, &mut out);
        out
    }

    fn recompute_bounds(&mut self) {
        let lengths = self.words().into_iter().map(|(word, _)| word.chars().count());
        let (min, max) = lengths.fold((usize::MAX, 0), |(lo, hi), n| (lo.min(n), hi.max(n)));
        self.min_len = if self.len == 0 { 0 } else { min };
        self.max_len = max;
    }
}
