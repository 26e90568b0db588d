/// All vowels carrying a tone mark, tones 1 to 4, lower case first.
pub const TONE_MARKED_VOWELS: &str = "āáǎàēéěèīíǐìōóǒòūúǔùǖǘǚǜĀÁǍÀĒÉĚÈĪÍǏÌŌÓǑÒŪÚǓÙǕǗǙǛ";

/// Pinyin initials that can stand alone as a single letter.
pub const CONSONANTS: &str = "bpmfdtnlgkhjqxrzcsyw";

/// Letters that may close a syllable and can therefore be handed over to the
/// next syllable as its initial.
pub const CONSONANTS_ENDING: &str = "bcdfghjklmnpqrstvwxyz";

/// Vowels which start a syllable that needs an apostrophe when it follows
/// another syllable.
pub const AOE_VOWELS: &str = "aoeAOEāáǎàēéěèōóǒòĀÁǍÀĒÉĚÈŌÓǑÒ";

/// Characters that keep a tone-numbered word going after its first vowel.
pub const VOWELS_WITH_NG: &str = "aeiouvüngrAEIOUVÜNGR";

/// Punctuation after which no apostrophe is inserted.
pub const APOSTROPHE_EXEMPT: &str = "-.,!?;:";

pub const APOSTROPHE: char = '\'';

pub const NEUTRAL_TONE: u32 = 5;

pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Plain vowels including `v` as a stand-in for `ü`.
pub const fn is_basic_vowel(c: char) -> bool {
    matches!(
        c,
        'a' | 'e' | 'i' | 'o' | 'u' | 'v' | 'ü' | 'A' | 'E' | 'I' | 'O' | 'U' | 'V' | 'Ü'
    )
}

pub fn is_vowel(c: char) -> bool {
    is_basic_vowel(c) || TONE_MARKED_VOWELS.contains(c)
}

/// Initials are only matched against lower case text.
pub fn is_consonant(c: char) -> bool {
    CONSONANTS.contains(c)
}

pub fn is_consonant_ending(c: char) -> bool {
    CONSONANTS_ENDING.contains(c.to_ascii_lowercase())
}

pub fn is_aoe_vowel(c: char) -> bool {
    AOE_VOWELS.contains(c)
}

/// The glide between initial and final, never toned.
pub const fn is_medial(c: char) -> bool {
    matches!(c, 'i' | 'u' | 'v' | 'ü')
}

pub fn continues_syllable(c: char) -> bool {
    VOWELS_WITH_NG.contains(c)
}

pub fn is_apostrophe_exempt(c: char) -> bool {
    c.is_whitespace() || APOSTROPHE_EXEMPT.contains(c)
}
