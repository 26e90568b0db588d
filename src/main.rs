use pinyin_tones::config;
use pinyin_tones::{
    CharIndex, ErhuaTone, MarkOptions, NumberOptions, SyllableBoundary, find_syllable_boundaries,
    is_non_pinyin_word, to_tone_marks, to_tone_numbers,
};

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use itertools::Itertools;
use log::info;

#[derive(Parser)]
#[command(name = "pinyin-tones")]
#[command(version)]
#[command(about = "Convert Pinyin between tone numbers and tone marks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log debug information to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Convert tone numbers to tone marks, e.g. ni3hao3 -> nǐhǎo
    Mark {
        /// Input file, reads stdin if omitted
        input_file: Option<PathBuf>,

        /// Don't insert apostrophes in front of syllables starting with a, o or e
        #[arg(long)]
        no_apostrophes: bool,
    },
    /// Convert tone marks to tone numbers, e.g. nǐhǎo -> ni3hao3
    Number {
        /// Input file, reads stdin if omitted
        input_file: Option<PathBuf>,

        /// Position of the tone number in syllables with erhua
        #[arg(long, value_enum, default_value_t = ErhuaPosition::AfterR)]
        erhua_tone: ErhuaPosition,

        /// Keep apostrophes between syllables
        #[arg(long)]
        preserve_apostrophes: bool,

        /// Leave out the 5 of neutral tone syllables
        #[arg(long)]
        hide_neutral_tone: bool,
    },
    /// Split Pinyin into syllables
    Segment {
        /// Input file, reads stdin if omitted
        input_file: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = SegmentFormat::Plain)]
        format: SegmentFormat,
    },
    /// List the words which are not Pinyin (with tone marks or without tones)
    Check {
        /// Input file, reads stdin if omitted
        input_file: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SegmentFormat {
    /// Syllables separated by spaces
    Plain,
    /// List of {start, end} character offsets
    Json,
    /// Input followed by each syllable with its offsets
    Verbose,
}

#[derive(Clone, Copy, ValueEnum)]
enum ErhuaPosition {
    /// huar4
    AfterR,
    /// hua4r
    BeforeR,
}

impl From<ErhuaPosition> for ErhuaTone {
    fn from(position: ErhuaPosition) -> Self {
        match position {
            ErhuaPosition::AfterR => ErhuaTone::AfterR,
            ErhuaPosition::BeforeR => ErhuaTone::BeforeR,
        }
    }
}

/// Reads the input file, or stdin when there is none. Nothing is read from
/// an `interactive` stdin, there would be no prompt telling the user to type.
fn read_input(path: Option<&Path>, interactive: bool) -> anyhow::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .context(format!("Could not read input file {}", path.display())),
        None if interactive => Err(anyhow!(
            "No input, give an input file or pipe text into stdin\n\n{}",
            Cli::command().render_usage()
        )),
        None => io::read_to_string(io::stdin()).context("Could not read from stdin"),
    }
}

fn write_output(text: &str) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    if !text.ends_with('\n') {
        stdout.write_all(b"\n")?;
    }
    Ok(())
}

fn format_segments(
    text: &str,
    boundaries: &[SyllableBoundary],
    format: SegmentFormat,
) -> anyhow::Result<String> {
    let index = CharIndex::new(text);
    Ok(match format {
        SegmentFormat::Plain => boundaries.iter().map(|b| index.syllable(b)).join(" "),
        SegmentFormat::Json => serde_json::to_string(boundaries)?,
        SegmentFormat::Verbose => {
            let syllables = boundaries
                .iter()
                .map(|b| format!("{}[{}..{}]", index.syllable(b), b.start, b.end))
                .join(" ");
            format!("{}\n{}", text.trim_end(), syllables)
        }
    })
}

fn check_words(text: &str) -> anyhow::Result<()> {
    let non_pinyin = text
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|word| !word.is_empty() && is_non_pinyin_word(word))
        .collect::<Vec<_>>();
    for word in &non_pinyin {
        println!("{word}");
    }
    if non_pinyin.is_empty() {
        eprintln!("All words are Pinyin!");
        Ok(())
    } else {
        Err(anyhow!("{} words are not Pinyin", non_pinyin.len()))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "debug"
    } else {
        config::DEFAULT_LOG_FILTER
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let interactive = io::stdin().is_terminal();
    match cli.command {
        Command::Mark {
            input_file,
            no_apostrophes,
        } => {
            let text = read_input(input_file.as_deref(), interactive)?;
            let options = MarkOptions {
                apostrophes: !no_apostrophes,
            };
            write_output(&to_tone_marks(&text, &options))
        }
        Command::Number {
            input_file,
            erhua_tone,
            preserve_apostrophes,
            hide_neutral_tone,
        } => {
            let text = read_input(input_file.as_deref(), interactive)?;
            let options = NumberOptions {
                erhua_tone: erhua_tone.into(),
                preserve_apostrophes,
                show_neutral_tone: !hide_neutral_tone,
            };
            write_output(&to_tone_numbers(&text, &options))
        }
        Command::Segment { input_file, format } => {
            let text = read_input(input_file.as_deref(), interactive)?;
            let boundaries = find_syllable_boundaries(&text);
            info!("found {} syllables", boundaries.len());
            write_output(&format_segments(&text, &boundaries, format)?)
        }
        Command::Check { input_file } => {
            let text = read_input(input_file.as_deref(), interactive)?;
            check_words(&text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_format_segments() {
        let text = "nǐhǎo\n";
        let boundaries = find_syllable_boundaries(text);
        assert_eq!(
            format_segments(text, &boundaries, SegmentFormat::Plain).unwrap(),
            "nǐ hǎo"
        );
        assert_eq!(
            format_segments(text, &boundaries, SegmentFormat::Json).unwrap(),
            r#"[{"start":0,"end":2},{"start":2,"end":5}]"#
        );
        assert_eq!(
            format_segments(text, &boundaries, SegmentFormat::Verbose).unwrap(),
            "nǐhǎo\nnǐ[0..2] hǎo[2..5]"
        );
    }

    #[test]
    fn test_format_segments_long_input() {
        let text = "nǐhǎo ".repeat(20_000);
        let boundaries = find_syllable_boundaries(&text);
        assert_eq!(boundaries.len(), 40_000);
        let plain = format_segments(&text, &boundaries, SegmentFormat::Plain).unwrap();
        assert_eq!(plain, vec!["nǐ hǎo"; 20_000].join(" "));
        let verbose = format_segments(&text, &boundaries, SegmentFormat::Verbose).unwrap();
        assert!(verbose.ends_with("nǐ[119994..119996] hǎo[119996..119999]"));
    }

    #[test]
    fn test_read_input() {
        let pairs = read_input(Some(Path::new("tests/pinyin_pairs.txt")), true).unwrap();
        assert!(pairs.contains("ni3hao3;nǐhǎo"));
        assert!(read_input(Some(Path::new("tests/missing.txt")), false).is_err());
    }

    #[test]
    fn test_read_input_interactive_stdin() {
        let error = read_input(None, true).unwrap_err().to_string();
        assert!(error.starts_with("No input"));
        assert!(error.contains("Usage: pinyin-tones"));
    }

    #[test]
    fn test_erhua_position() {
        assert_eq!(ErhuaTone::from(ErhuaPosition::AfterR), ErhuaTone::AfterR);
        assert_eq!(ErhuaTone::from(ErhuaPosition::BeforeR), ErhuaTone::BeforeR);
    }

    #[test]
    fn test_check_words() {
        assert!(check_words("nǐ hǎo,\nZhōngguó!").is_ok());
        assert!(check_words("...").is_ok());
        assert!(check_words("nǐ hǎo world").is_err());
    }
}
