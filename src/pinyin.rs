/// Tone marks for each base vowel, indexed by tone 1 to 4.
pub const TONE_MARK_TABLE: [(char, [char; 4]); 12] = [
    ('a', ['ā', 'á', 'ǎ', 'à']),
    ('e', ['ē', 'é', 'ě', 'è']),
    ('i', ['ī', 'í', 'ǐ', 'ì']),
    ('o', ['ō', 'ó', 'ǒ', 'ò']),
    ('u', ['ū', 'ú', 'ǔ', 'ù']),
    ('ü', ['ǖ', 'ǘ', 'ǚ', 'ǜ']),
    ('A', ['Ā', 'Á', 'Ǎ', 'À']),
    ('E', ['Ē', 'É', 'Ě', 'È']),
    ('I', ['Ī', 'Í', 'Ǐ', 'Ì']),
    ('O', ['Ō', 'Ó', 'Ǒ', 'Ò']),
    ('U', ['Ū', 'Ú', 'Ǔ', 'Ù']),
    ('Ü', ['Ǖ', 'Ǘ', 'Ǚ', 'Ǜ']),
];

/// `v` is the common keyboard replacement for `ü`
pub const fn normalize_umlaut(ch: char) -> char {
    match ch {
        'v' => 'ü',
        'V' => 'Ü',
        _ => ch,
    }
}

/// Returns the vowel `ch` carrying `tone`, the plain vowel for the neutral
/// tone 5, or `None` if `ch` is no vowel or `tone` is out of range.
pub fn tone_mark_char(ch: char, tone: u32) -> Option<char> {
    let ch = normalize_umlaut(ch);
    let (_, marks) = TONE_MARK_TABLE.iter().find(|(base, _)| *base == ch)?;
    match tone {
        1..=4 => marks.get(usize::try_from(tone - 1).ok()?).copied(),
        5 => Some(ch),
        _ => None,
    }
}

/// (base vowel with its case, tone) of a tone marked vowel
fn lookup_tone_mark(mark: char) -> Option<(char, u32)> {
    TONE_MARK_TABLE.iter().find_map(|(base, marks)| {
        marks
            .iter()
            .zip(1..)
            .find(|(m, _)| **m == mark)
            .map(|(_, tone)| (*base, tone))
    })
}

/// Lower case base vowel of a tone marked vowel.
pub fn tone_marked_to_base(mark: char) -> Option<char> {
    lookup_tone_mark(mark).map(|(base, _)| lowercase_char(base))
}

pub fn tone_marked_to_number(mark: char) -> Option<u32> {
    lookup_tone_mark(mark).map(|(_, tone)| tone)
}

/// Lower case mapping that never changes the number of characters, so char
/// offsets stay valid between the original and the normalized text.
pub fn lowercase_char(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}

/// Removes tone marks and folds case, the form the syllable parser works on.
pub fn strip_tones_and_lowercase(text: &str) -> String {
    text.chars()
        .map(|c| tone_marked_to_base(c).unwrap_or_else(|| lowercase_char(c)))
        .collect()
}

/// Removes tone marks but keeps the case of each letter.
pub fn strip_tones(text: &str) -> String {
    text.chars()
        .map(|c| lookup_tone_mark(c).map_or(c, |(base, _)| base))
        .collect()
}

/// Tone of the first tone marked vowel, the neutral tone if there is none.
pub fn extract_tone_number(syllable: &str) -> u32 {
    syllable
        .chars()
        .find_map(tone_marked_to_number)
        .unwrap_or(crate::config::NEUTRAL_TONE)
}
