//! Markdown-subset to HTML conversion for one section's raw lines.
//!
//! The conversion is a fixed, ordered list of line-oriented stages. Each stage
//! takes the previous stage's lines and returns new lines, so any stage can be
//! exercised on its own. Order matters: emphasis runs first so that `**bold**`
//! at the start of a line is not mistaken for a list marker, tables are built
//! before lists, and paragraphs wrap whatever is left.

pub mod inline;
pub mod list;
pub mod paragraph;
pub mod table;

use std::sync::LazyLock;

use regex::Regex;

/// A single conversion stage over a block of lines.
pub type Stage = fn(Vec<String>) -> Vec<String>;

pub const STAGES: &[(&str, Stage)] = &[
    ("headings", inline::convert_headings),
    ("emphasis", inline::convert_emphasis),
    ("tables", table::build_tables),
    ("lists", list::build_lists),
    ("paragraphs", paragraph::wrap_paragraphs),
];

static BLOCK_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^</?(h[1-6]|ul|ol|li|table|thead|tbody|tr|p|div|blockquote|pre|hr)\b").unwrap()
});

/// Lines that already are block-level markup produced by an earlier stage.
pub fn is_block_markup(line: &str) -> bool {
    BLOCK_TAG_RE.is_match(line.trim_start())
}

/// Run every stage over `lines` and join the result into one markup string.
pub fn to_markup(lines: &[String]) -> String {
    STAGES
        .iter()
        .fold(lines.to_vec(), |acc, (_, stage)| stage(acc))
        .join("\n")
        .trim()
        .to_string()
}
