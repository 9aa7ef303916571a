mod trie;

pub use trie::{Annotation, Trie, TrieError, TrieKind, TrieNode};
