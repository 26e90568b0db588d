/*
Syllable structure

The parser works on text without tone marks and in lower case (see
`strip_tones_and_lowercase`), one character in the normalized text for each
character in the original text.

syllable = [initial] [medial] final [erhua]
initial = "zh" | "ch" | "sh" | consonant
medial = "i" | "u" | "ü" | "v"
final = "er"                      (not directly after a vowel)
      | compound
      | vowel ("ng" | "n")        (not followed by a vowel)
      | vowel ("i" | "o" | "u")
      | vowel
compound = "iang" | "iong" | "uang" | "ueng" | "ian" | "iao" | "ing"
         | "ong" | "ang" | "eng" | "ai" | "ao" | "ei" | "ou"
erhua = "r"                       (not followed by a vowel)

Initial and medial are optional. At each position the combinations are tried
in the order initial+medial, initial, medial, none, and the first final
alternative that matches wins. Positions where no syllable starts are skipped.

After the scan, directly adjacent syllables are checked for an ambiguous
consonant: if the second syllable starts with a, o or e (or the first ends in
"ng" and the second starts with any vowel), the last consonant of the first
syllable becomes the initial of the second, so "fangan" reads "fan" + "gan".
*/

use log::{debug, trace};
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{char, one_of, satisfy},
    combinator::{not, opt, recognize, value},
    sequence::terminated,
};

use crate::common::SyllableBoundary;
use crate::config::{is_aoe_vowel, is_consonant, is_consonant_ending, is_medial, is_vowel};
use crate::pinyin::strip_tones_and_lowercase;

/// Which final alternative matched, in order of precedence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FinalKind {
    Er,
    Compound,
    Nasal,
    Glide,
    Single,
}

fn initial(input: &str) -> IResult<&str, &str> {
    alt((
        tag("zh"),
        tag("ch"),
        tag("sh"),
        recognize(satisfy(is_consonant)),
    ))
    .parse(input)
}

fn medial(input: &str) -> IResult<&str, char> {
    satisfy(is_medial).parse(input)
}

fn vowel(input: &str) -> IResult<&str, char> {
    satisfy(is_vowel).parse(input)
}

fn compound_final(input: &str) -> IResult<&str, &str> {
    alt((
        tag("iang"),
        tag("iong"),
        tag("uang"),
        tag("ueng"),
        tag("ian"),
        tag("iao"),
        tag("ing"),
        tag("ong"),
        tag("ang"),
        tag("eng"),
        tag("ai"),
        tag("ao"),
        tag("ei"),
        tag("ou"),
    ))
    .parse(input)
}

/// A nasal coda followed by a vowel is the initial of the next syllable
fn nasal_coda(input: &str) -> IResult<&str, &str> {
    alt((
        terminated(tag("ng"), not(vowel)),
        terminated(tag("n"), not(vowel)),
    ))
    .parse(input)
}

fn erhua(input: &str) -> IResult<&str, char> {
    terminated(char('r'), not(vowel)).parse(input)
}

fn syllable_final(input: &str, er_allowed: bool) -> IResult<&str, FinalKind> {
    if er_allowed {
        let er: IResult<&str, &str> = tag("er").parse(input);
        if let Ok((remainder, _)) = er {
            return Ok((remainder, FinalKind::Er));
        }
    }
    alt((
        value(FinalKind::Compound, compound_final),
        value(FinalKind::Nasal, recognize((vowel, nasal_coda))),
        value(FinalKind::Glide, recognize((vowel, one_of("iou")))),
        value(FinalKind::Single, vowel),
    ))
    .parse(input)
}

/// `er_allowed` tells whether the character before `input` permits a bare
/// "er" final, i.e. it is not a vowel.
fn syllable(input: &str, er_allowed: bool) -> IResult<&str, FinalKind> {
    let (remainder, kind) = syllable_body(input, er_allowed)?;
    let (remainder, _) = opt(erhua).parse(remainder)?;
    Ok((remainder, kind))
}

fn syllable_body(input: &str, er_allowed: bool) -> IResult<&str, FinalKind> {
    if let Ok((remainder, _)) = (initial, medial).parse(input) {
        if let Ok(found) = syllable_final(remainder, false) {
            return Ok(found);
        }
    }
    if let Ok((remainder, _)) = initial(input) {
        if let Ok(found) = syllable_final(remainder, true) {
            return Ok(found);
        }
    }
    if let Ok((remainder, _)) = medial(input) {
        if let Ok(found) = syllable_final(remainder, false) {
            return Ok(found);
        }
    }
    syllable_final(input, er_allowed)
}

/// Left to right scan over normalized text, one boundary per syllable.
fn scan_syllables(normalized: &str) -> Vec<SyllableBoundary> {
    let mut boundaries = vec![];
    let mut remainder = normalized;
    let mut position = 0;
    let mut previous: Option<char> = None;

    while let Some(c) = remainder.chars().next() {
        let er_allowed = !previous.is_some_and(is_vowel);
        if let Ok((rest, kind)) = syllable(remainder, er_allowed) {
            let matched = &remainder[..remainder.len() - rest.len()];
            let len = matched.chars().count();
            trace!("syllable {matched:?} at {position} ({kind:?})");
            boundaries.push(SyllableBoundary {
                start: position,
                end: position + len,
            });
            previous = matched.chars().next_back();
            position += len;
            remainder = rest;
        } else {
            previous = Some(c);
            position += 1;
            remainder = &remainder[c.len_utf8()..];
        }
    }
    boundaries
}

/// Moves the last consonant of a syllable to the following syllable where
/// the split between two adjacent syllables is ambiguous. A moved boundary is
/// the one compared against the next syllable.
fn reassign_ambiguous_consonants(normalized: &[char], boundaries: &mut [SyllableBoundary]) {
    for i in 1..boundaries.len() {
        let current = boundaries[i - 1];
        let next = boundaries[i];
        if current.end != next.start {
            continue;
        }
        let Some(&next_first) = normalized.get(next.start) else {
            continue;
        };
        let syllable = &normalized[current.start..current.end];
        let ends_with_ng = syllable.ends_with(&['n', 'g']);
        let ambiguous = is_aoe_vowel(next_first) || (ends_with_ng && is_vowel(next_first));
        let ends_with_consonant = syllable.last().is_some_and(|c| is_consonant_ending(*c));
        if ambiguous && syllable.len() > 1 && ends_with_consonant {
            debug!(
                "moving {:?} from syllable {:?} to the next syllable",
                syllable.last(),
                syllable.iter().collect::<String>()
            );
            boundaries[i - 1].end -= 1;
            boundaries[i].start -= 1;
        }
    }
}

/// Finds the syllables of a Pinyin text, with or without tone marks. Offsets
/// are character offsets into `text`. Characters which are not part of any
/// syllable (punctuation, digits, spaces) are skipped, so an empty result
/// means the text could not be read as Pinyin.
pub fn find_syllable_boundaries(text: &str) -> Vec<SyllableBoundary> {
    let normalized = strip_tones_and_lowercase(text);
    let mut boundaries = scan_syllables(&normalized);
    let normalized_chars: Vec<char> = normalized.chars().collect();
    reassign_ambiguous_consonants(&normalized_chars, &mut boundaries);
    boundaries
}
