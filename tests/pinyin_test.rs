use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use pinyin_tones::{
    MarkOptions, NumberOptions, find_syllable_boundaries, to_tone_marks, to_tone_numbers,
};

fn read_pairs() -> Vec<(String, String)> {
    // Integration tests are run from the crate's root directory,
    // so the path to the test file is relative to that root.
    let path = Path::new("tests/pinyin_pairs.txt");
    let file = File::open(path).expect("Failed to open pinyin_pairs.txt");
    let reader = BufReader::new(file);

    reader
        .lines()
        .map(|line| {
            let line = line.expect("Failed to read line");
            let (pinyin_num, pinyin_mark) = line
                .split_once(';')
                .unwrap_or_else(|| panic!("Invalid line format: {line}"));
            (pinyin_num.to_owned(), pinyin_mark.to_owned())
        })
        .collect()
}

#[test]
fn test_numbers_to_marks_from_file() {
    for (pinyin_num, expected_mark) in read_pairs() {
        let result = to_tone_marks(&pinyin_num, &MarkOptions::default());
        assert_eq!(result, expected_mark, "Failed on input: {pinyin_num}");
    }
}

#[test]
fn test_marks_to_numbers_from_file() {
    for (expected_num, pinyin_mark) in read_pairs() {
        let result = to_tone_numbers(&pinyin_mark, &NumberOptions::default());
        assert_eq!(result, expected_num, "Failed on input: {pinyin_mark}");
    }
}

#[test]
fn test_round_trip_single_syllables() {
    let syllables = [
        "ba", "pao", "mian", "fou", "dui", "tong", "nüe", "lüe", "gua", "kuang", "huai", "jiang",
        "qiong", "xun", "zhuang", "chuan", "shuo", "rou", "zei", "cen", "sui", "yue", "wai",
    ];
    for syllable in syllables {
        for tone in 1..=4 {
            let pinyin_num = format!("{syllable}{tone}");
            let pinyin_mark = to_tone_marks(&pinyin_num, &MarkOptions::default());
            assert_ne!(pinyin_mark, pinyin_num, "not marked: {pinyin_num}");
            assert_eq!(
                to_tone_numbers(&pinyin_mark, &NumberOptions::default()),
                pinyin_num,
                "round trip failed via {pinyin_mark}"
            );
        }
    }
}

#[test]
fn test_segment_marked_text() {
    let text = "Wǒ xǐhuan chī jiǎozi.";
    let syllables: Vec<&str> = find_syllable_boundaries(text)
        .iter()
        .map(|b| b.slice(text))
        .collect();
    assert_eq!(syllables, vec!["Wǒ", "xǐ", "huan", "chī", "jiǎo", "zi"]);
}
