use itertools::Itertools;

use crate::config::{
    APOSTROPHE, continues_syllable, is_aoe_vowel, is_apostrophe_exempt, is_basic_vowel,
};
use crate::pinyin::{lowercase_char, normalize_umlaut, tone_mark_char};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkOptions {
    /// Insert `'` in front of syllables starting with a, o or e
    pub apostrophes: bool,
}

impl Default for MarkOptions {
    fn default() -> Self {
        Self { apostrophes: true }
    }
}

/// Collects the letters of one syllable until a tone digit arrives.
///
/// `vowels_seen` counts the plain vowels since the last tone digit. Once it is
/// non-zero, any character outside of `aeiouvüngr` ends the current word and
/// starts a new one, which separates Pinyin from surrounding text without
/// knowing where the syllables are.
#[derive(Debug)]
struct ToneMarker {
    output: String,
    word: Vec<char>,
    vowels_seen: usize,
    apostrophes: bool,
}

impl ToneMarker {
    fn new(options: &MarkOptions, capacity: usize) -> Self {
        ToneMarker {
            output: String::with_capacity(capacity),
            word: vec![],
            vowels_seen: 0,
            apostrophes: options.apostrophes,
        }
    }

    fn push(&mut self, c: char) {
        if let Some(tone) = c.to_digit(10).filter(|d| (1..=5).contains(d)) {
            self.commit_syllable(c, tone);
            return;
        }
        if is_basic_vowel(c) {
            self.vowels_seen += 1;
        }
        if self.vowels_seen > 0 && !continues_syllable(c) {
            self.flush();
        }
        self.word.push(c);
    }

    fn flush(&mut self) {
        self.output.extend(self.word.drain(..));
    }

    fn finish(mut self) -> String {
        self.flush();
        self.output
    }

    /// 1 for the first vowel, 2 for the second one after a medial
    fn tone_vowel_ordinal(&self) -> usize {
        let on_second = self
            .word
            .iter()
            .map(|c| lowercase_char(*c))
            .tuple_windows()
            .any(|pair: (char, char)| {
                matches!(
                    pair,
                    ('i', 'a' | 'e' | 'o' | 'u') | ('u', 'a' | 'e' | 'i' | 'o') | ('v' | 'ü', 'e')
                )
            });
        if on_second { 2 } else { 1 }
    }

    fn needs_apostrophe(&self) -> bool {
        let follows_text = self
            .output
            .chars()
            .next_back()
            .is_some_and(|prev| !is_apostrophe_exempt(prev));
        follows_text && self.word.first().is_some_and(|c| is_aoe_vowel(*c))
    }

    fn commit_syllable(&mut self, digit: char, tone: u32) {
        self.vowels_seen = 0;

        // without a vowel there is nothing to mark, keep the number
        if !self.word.iter().any(|c| is_basic_vowel(*c)) {
            self.flush();
            self.output.push(digit);
            return;
        }

        let ordinal = self.tone_vowel_ordinal();
        if self.apostrophes && self.needs_apostrophe() {
            self.output.push(APOSTROPHE);
        }

        let mut mark_at = None;
        for (i, c) in self.word.iter().enumerate() {
            if is_basic_vowel(*c) {
                self.vowels_seen += 1;
                if self.vowels_seen >= ordinal {
                    mark_at = Some(i);
                    break;
                }
            }
        }
        let Some(mark_at) = mark_at else {
            return;
        };
        for (i, c) in self.word.drain(..).enumerate() {
            if i == mark_at {
                self.output.push(tone_mark_char(c, tone).unwrap_or(c));
            } else {
                self.output.push(normalize_umlaut(c));
            }
        }
    }
}

/// Converts tone numbers to tone marks, `ni3hao3` becomes `nǐhǎo`.
///
/// Text that is not followed by a tone digit is copied unchanged, as is any
/// syllable without a vowel (together with its digit).
pub fn to_tone_marks(text: &str, options: &MarkOptions) -> String {
    let mut marker = ToneMarker::new(options, text.len() + text.len() / 2);
    for c in text.chars() {
        marker.push(c);
    }
    marker.finish()
}
