use std::iter;

use serde::Serialize;

/// Half-open span of one syllable, counted in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SyllableBoundary {
    pub start: usize,
    pub end: usize,
}

impl SyllableBoundary {
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    pub const fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Walks `text` from its start, use a [`CharIndex`] to slice many boundaries.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        char_slice(text, self.start, self.end)
    }
}

/// Byte offset of every char in a text, built once so that any number of
/// char spans can be sliced without walking the text again.
#[derive(Debug)]
pub struct CharIndex<'a> {
    text: &'a str,
    byte_offsets: Vec<usize>,
}

impl<'a> CharIndex<'a> {
    pub fn new(text: &'a str) -> Self {
        let byte_offsets = text
            .char_indices()
            .map(|(i, _)| i)
            .chain(iter::once(text.len()))
            .collect();
        CharIndex { text, byte_offsets }
    }

    fn byte_offset(&self, char_offset: usize) -> usize {
        self.byte_offsets
            .get(char_offset)
            .copied()
            .unwrap_or(self.text.len())
    }

    /// Substring between two char offsets, clamped to the end of the text.
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        let byte_start = self.byte_offset(start);
        let byte_end = self.byte_offset(end).max(byte_start);
        &self.text[byte_start..byte_end]
    }

    pub fn syllable(&self, boundary: &SyllableBoundary) -> &'a str {
        self.slice(boundary.start, boundary.end)
    }
}

/// Substring between two char offsets, clamped to the end of `text`.
pub fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let mut byte_offsets = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(iter::once(text.len()));
    let byte_start = byte_offsets.nth(start).unwrap_or(text.len());
    let byte_end = if end > start {
        byte_offsets.nth(end - start - 1).unwrap_or(text.len())
    } else {
        byte_start
    };
    &text[byte_start..byte_end]
}
