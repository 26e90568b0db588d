use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::common::{CharIndex, SyllableBoundary};
use crate::config::{APOSTROPHE, TONE_MARKED_VOWELS};
use crate::pinyin::{extract_tone_number, strip_tones};
use crate::syllable_parser::find_syllable_boundaries;

/// Separators between words: whitespace, or anything that is neither a letter
/// nor a number. Whitespace is preferred so that "a ,b" splits into " " and ",".
static WORD_SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"\s+|[^\p{{L}}\p{{N}}{TONE_MARKED_VOWELS}]+"))
        .expect("word split pattern is valid")
});

static WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^[\p{{L}}\p{{N}}{TONE_MARKED_VOWELS}]+$"))
        .expect("word pattern is valid")
});

/// Where the tone number goes for a syllable with erhua
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErhuaTone {
    /// `huar4`
    #[default]
    AfterR,
    /// `hua4r`
    BeforeR,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberOptions {
    pub erhua_tone: ErhuaTone,
    /// Keep apostrophes between syllables, they are dropped by default
    pub preserve_apostrophes: bool,
    /// Write 5 for syllables without tone mark
    pub show_neutral_tone: bool,
}

impl Default for NumberOptions {
    fn default() -> Self {
        Self {
            erhua_tone: ErhuaTone::AfterR,
            preserve_apostrophes: false,
            show_neutral_tone: true,
        }
    }
}

fn covers_word(boundaries: &[SyllableBoundary], word: &str) -> bool {
    if boundaries.is_empty() {
        return false;
    }
    let syllable_chars: usize = boundaries.iter().map(SyllableBoundary::len).sum();
    syllable_chars >= word.chars().count()
}

/// Rough check whether `word` is clearly not Pinyin: either no syllable was
/// found, or some of its characters are not part of any syllable.
pub fn is_non_pinyin_word(word: &str) -> bool {
    !covers_word(&find_syllable_boundaries(word), word)
}

fn number_syllable(syllable: &str, options: &NumberOptions, result: &mut String) {
    let tone = extract_tone_number(syllable);
    let base = strip_tones(syllable);
    match base.strip_suffix('r') {
        Some(without_r) if !without_r.is_empty() => {
            result.push_str(without_r);
            match options.erhua_tone {
                ErhuaTone::AfterR => {
                    result.push('r');
                    result.push_str(&tone.to_string());
                }
                ErhuaTone::BeforeR => {
                    result.push_str(&tone.to_string());
                    result.push('r');
                }
            }
        }
        _ => {
            result.push_str(&base);
            result.push_str(&tone.to_string());
        }
    }
}

fn number_word(word: &str, options: &NumberOptions) -> String {
    if !WORD.is_match(word) {
        return word.to_owned();
    }
    let boundaries = find_syllable_boundaries(word);
    if !covers_word(&boundaries, word) {
        debug!("not Pinyin, copied unchanged: {word:?}");
        return word.to_owned();
    }

    let index = CharIndex::new(word);
    let mut result = String::with_capacity(word.len() + boundaries.len());
    let mut last_end = 0;
    for boundary in &boundaries {
        if boundary.start > last_end {
            let gap = index.slice(last_end, boundary.start);
            result.push_str(gap.strip_suffix(APOSTROPHE).unwrap_or(gap));
        }
        number_syllable(index.syllable(boundary), options, &mut result);
        last_end = boundary.end;
    }
    result.push_str(index.slice(last_end, usize::MAX));

    if !options.show_neutral_tone {
        result.retain(|c| c != '5');
    }
    result
}

/// Converts tone marks to tone numbers, `nǐhǎo` becomes `ni3hao3`.
///
/// The text is split into words at whitespace and punctuation, separators are
/// kept as they are. Words which can't be read as Pinyin are copied unchanged.
pub fn to_tone_numbers(text: &str, options: &NumberOptions) -> String {
    let mut output = String::with_capacity(text.len() + text.len() / 2);
    let mut word_start = 0;
    for separator in WORD_SPLIT.find_iter(text) {
        output.push_str(&number_word(&text[word_start..separator.start()], options));
        // a lone apostrophe only marks a syllable boundary
        if options.preserve_apostrophes || separator.as_str() != "'" {
            output.push_str(separator.as_str());
        }
        word_start = separator.end();
    }
    output.push_str(&number_word(&text[word_start..], options));
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbers(text: &str) -> String {
        to_tone_numbers(text, &NumberOptions::default())
    }

    #[test]
    fn test_get_number() {
        assert_eq!(numbers("nǐhǎo"), "ni3hao3");
        assert_eq!(numbers("Zhōngguó"), "Zhong1guo2");
        assert_eq!(numbers("qiènuò"), "qie4nuo4");
        assert_eq!(numbers("lǜsè"), "lü4se4");
        assert_eq!(numbers("xuésheng"), "xue2sheng5");
        assert_eq!(numbers("Ānhuī"), "An1hui1");
        assert_eq!(numbers("diànnǎo"), "dian4nao3");
        assert_eq!(numbers("ér"), "er2");
        assert_eq!(numbers(""), "");
    }

    #[test]
    fn test_get_number_reassigned_consonants() {
        assert_eq!(numbers("fāngànán"), "fan1ga4nan2");
        assert_eq!(numbers("fāngàn"), "fan1gan4");
    }

    #[test]
    fn test_get_number_long_word() {
        let word = "nǐhǎo".repeat(20_000);
        let numbered = numbers(&word);
        assert_eq!(numbered.len(), "ni3hao3".len() * 20_000);
        assert!(numbered.starts_with("ni3hao3ni3hao3"));
        assert!(numbered.ends_with("ni3hao3"));
    }

    #[test]
    fn test_get_number_apostrophes() {
        assert_eq!(numbers("xī'ān"), "xi1an1");
        assert_eq!(numbers("tiān'ānmén"), "tian1an1men2");
        let preserve = NumberOptions {
            preserve_apostrophes: true,
            ..NumberOptions::default()
        };
        assert_eq!(to_tone_numbers("xī'ān", &preserve), "xi1'an1");
        // an apostrophe next to other punctuation is not a syllable separator
        assert_eq!(numbers("xī' ān"), "xi1' an1");
    }

    #[test]
    fn test_get_number_erhua() {
        assert_eq!(numbers("huàr"), "huar4");
        let before_r = NumberOptions {
            erhua_tone: ErhuaTone::BeforeR,
            ..NumberOptions::default()
        };
        assert_eq!(to_tone_numbers("huàr", &before_r), "hua4r");
        assert_eq!(to_tone_numbers("yìdiǎnr", &before_r), "yi4dian3r");
        assert_eq!(numbers("yìdiǎnr"), "yi4dianr3");
    }

    #[test]
    fn test_get_number_neutral_tone() {
        assert_eq!(numbers("ma"), "ma5");
        assert_eq!(numbers("péngyou"), "peng2you5");
        let hidden = NumberOptions {
            show_neutral_tone: false,
            ..NumberOptions::default()
        };
        assert_eq!(to_tone_numbers("ma", &hidden), "ma");
        assert_eq!(to_tone_numbers("péngyou", &hidden), "peng2you");
        assert_eq!(to_tone_numbers("hǎo ma?", &hidden), "hao3 ma?");
    }

    #[test]
    fn test_get_number_passthrough() {
        assert_eq!(numbers("hello world"), "hello world");
        assert_eq!(numbers("Nǐ hǎo, world!"), "Ni3 hao3, world!");
        assert_eq!(numbers("ni3hao3"), "ni3hao3");
        assert_eq!(numbers("  \n"), "  \n");
        assert_eq!(numbers("nǐ 你好 hǎo"), "ni3 你好 hao3");
    }

    #[test]
    fn test_is_non_pinyin_word() {
        assert!(is_non_pinyin_word("hello"));
        assert!(is_non_pinyin_word(""));
        assert!(is_non_pinyin_word("123"));
        assert!(is_non_pinyin_word("ni3"));
        assert!(!is_non_pinyin_word("nǐhǎo"));
        assert!(!is_non_pinyin_word("xian"));
        assert!(!is_non_pinyin_word("Zhōngguó"));
    }
}
