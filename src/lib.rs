//! Conversion between tone-numbered (`ni3hao3`) and tone-marked (`nǐhǎo`)
//! Pinyin, and segmentation of Pinyin words into syllables.

pub mod common;
pub mod config;
pub mod pinyin;
pub mod syllable_parser;
pub mod tone_marks;
pub mod tone_numbers;

pub use common::{CharIndex, SyllableBoundary};
pub use syllable_parser::find_syllable_boundaries;
pub use tone_marks::{MarkOptions, to_tone_marks};
pub use tone_numbers::{ErhuaTone, NumberOptions, is_non_pinyin_word, to_tone_numbers};
