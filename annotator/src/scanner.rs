//! Literal multi-marker scanner.
//!
//! A char trie over every marker of a mapping. Scanning is leftmost, then longest: at each
//! position the longest marker starting there wins, and matches never overlap.

use std::collections::BTreeMap;
use std::ops::Range;

#[derive(Debug, Clone)]
pub struct MarkerScanner {
    nodes: Vec<TrieNode>,
}

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: BTreeMap<char, usize>,
    terminal: bool,
}

/// One marker occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerMatch<'t> {
    pub marker: &'t str,
    /// Byte range in the scanned text.
    pub range: Range<usize>,
    /// Char offset of the match start in the scanned text.
    pub char_start: usize,
}

impl MarkerScanner {
    pub fn new<'a>(markers: impl IntoIterator<Item = &'a str>) -> Self {
        let mut scanner = Self {
            nodes: vec![TrieNode::default()],
        };
        for marker in markers {
            scanner.add(marker);
        }
        scanner
    }

    fn add(&mut self, marker: &str) {
        if marker.is_empty() {
            return;
        }

        let mut node = 0;
        for ch in marker.chars() {
            node = match self.nodes[node].children.get(&ch) {
                Some(&next) => next,
                None => {
                    let next = self.nodes.len();
                    self.nodes.push(TrieNode::default());
                    self.nodes[node].children.insert(ch, next);
                    next
                }
            };
        }
        self.nodes[node].terminal = true;
    }

    /// Byte length of the longest marker starting at `byte`.
    fn longest_at(&self, text: &str, byte: usize) -> Option<usize> {
        let mut node = 0;
        let mut longest = None;
        for (i, ch) in text[byte..].char_indices() {
            let Some(&next) = self.nodes[node].children.get(&ch) else {
                break;
            };
            node = next;
            if self.nodes[node].terminal {
                longest = Some(i + ch.len_utf8());
            }
        }
        longest
    }

    pub fn find_iter<'s, 't>(&'s self, text: &'t str) -> MarkerMatches<'s, 't> {
        MarkerMatches {
            scanner: self,
            text,
            byte: 0,
            chars: 0,
        }
    }

    pub fn count(&self, text: &str) -> usize {
        self.find_iter(text).count()
    }

    /// Removes every marker occurrence, keeping all other chars in order.
    pub fn strip(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for m in self.find_iter(text) {
            out.push_str(&text[last..m.range.start]);
            last = m.range.end;
        }
        out.push_str(&text[last..]);
        out
    }
}

impl Default for MarkerScanner {
    fn default() -> Self {
        Self::new(std::iter::empty())
    }
}

pub struct MarkerMatches<'s, 't> {
    scanner: &'s MarkerScanner,
    text: &'t str,
    byte: usize,
    chars: usize,
}

impl<'t> Iterator for MarkerMatches<'_, 't> {
    type Item = MarkerMatch<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.byte < self.text.len() {
            if let Some(len) = self.scanner.longest_at(self.text, self.byte) {
                let range = self.byte..self.byte + len;
                let marker = &self.text[range.clone()];
                let char_start = self.chars;
                self.byte = range.end;
                self.chars += marker.chars().count();
                return Some(MarkerMatch {
                    marker,
                    range,
                    char_start,
                });
            }

            let ch = self.text[self.byte..].chars().next()?;
            self.byte += ch.len_utf8();
            self.chars += 1;
        }
        None
    }
}
