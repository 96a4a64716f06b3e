//! Loading of multi-pattern text files.
//!
//! A pattern file holds any number of glyphs, each `rows` lines of `cols`
//! binary tokens, separated by one or more blank lines. A malformed glyph is
//! reported and skipped; it never aborts the rest of the file.

use std::path::Path;

use tracing::{info, warn};

use crate::data::label::ClassLabel;
use crate::data::pattern::Pattern;
use crate::error::{PerceptronError, Result};
use crate::train::sample::Sample;

/// A run of consecutive non-blank lines.
#[derive(Debug)]
pub(crate) struct Block<'a> {
    /// 1-based line number of the first line within the source text.
    pub first_line: usize,
    pub lines: Vec<&'a str>,
}

/// Splits text into blank-line separated blocks.
pub(crate) fn split_blocks(text: &str) -> Vec<Block<'_>> {
    let mut blocks = Vec::new();
    let mut current: Option<Block> = None;

    for (i, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            if let Some(block) = current.take() {
                blocks.push(block);
            }
            continue;
        }
        current
            .get_or_insert_with(|| Block { first_line: i + 1, lines: Vec::new() })
            .lines
            .push(line);
    }
    if let Some(block) = current {
        blocks.push(block);
    }
    blocks
}

/// Result of parsing a pattern file.
#[derive(Debug, Default)]
pub struct PatternSet {
    pub patterns: Vec<Pattern>,
    /// `(block index, error)` for every glyph that failed to parse.
    pub rejected: Vec<(usize, PerceptronError)>,
}

/// Parses every blank-line separated glyph in `text`.
///
/// Error line numbers are rewritten to be relative to the whole text.
pub fn parse_pattern_set(text: &str, rows: usize, cols: usize) -> PatternSet {
    let mut set = PatternSet::default();
    for (index, block) in split_blocks(text).into_iter().enumerate() {
        match Pattern::parse(&block.lines.join("\n"), rows, cols) {
            Ok(pattern) => set.patterns.push(pattern),
            Err(PerceptronError::Format { line, message }) => {
                let err = PerceptronError::Format { line: block.first_line + line - 1, message };
                warn!(block = index, "skipping malformed pattern: {}", err);
                set.rejected.push((index, err));
            }
            Err(err) => {
                warn!(block = index, "skipping malformed pattern: {}", err);
                set.rejected.push((index, err));
            }
        }
    }
    set
}

pub fn load_pattern_set(path: &Path, rows: usize, cols: usize) -> Result<PatternSet> {
    let text = std::fs::read_to_string(path)?;
    Ok(parse_pattern_set(&text, rows, cols))
}

/// File name holding the training glyphs for `label`, e.g. `a.txt`.
pub fn class_file_name(label: ClassLabel) -> String {
    format!("{}.txt", label.letter())
}

/// Reads one pattern file per vowel from `dir` and labels every accepted glyph.
pub fn load_training_set(dir: &Path, rows: usize, cols: usize) -> Result<Vec<Sample>> {
    let mut samples = Vec::new();
    for label in ClassLabel::ALL {
        let path = dir.join(class_file_name(label));
        let set = load_pattern_set(&path, rows, cols)?;
        info!(
            class = %label,
            accepted = set.patterns.len(),
            rejected = set.rejected.len(),
            "loaded {}", path.display()
        );
        samples.extend(set.patterns.into_iter().map(|p| Sample::new(p, label.one_hot())));
    }
    if samples.is_empty() {
        return Err(PerceptronError::InvalidConfig(format!(
            "no training patterns found in {}", dir.display()
        )));
    }
    Ok(samples)
}
