use std::panic::{self, AssertUnwindSafe};
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use super::classify::{self, Classification};
use super::normalize::is_horizontal_rule;
use super::sections::{Section, SectionAggregator};
use crate::error::ImportError;
use crate::markup;

static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").unwrap());

#[derive(Debug, PartialEq)]
enum LineKind<'a> {
    Topic(&'a str),
    Classification(&'a str),
    Title(&'a str),
    Rule,
    Blank,
    Content,
}

fn categorize(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if is_horizontal_rule(trimmed) {
        return LineKind::Rule;
    }
    // headings start at column 0; indented `#` lines are content
    if let Some(caps) = HEADING_RE.captures(line.trim_end()) {
        let text = caps.get(2).map_or("", |m| m.as_str().trim());
        match caps[1].len() {
            1 => return LineKind::Topic(text),
            2 => return LineKind::Classification(text),
            3 => return LineKind::Title(text),
            // h4-h6 stay in the content and are converted to markup later
            _ => {}
        }
    }
    LineKind::Content
}

/// Walks normalized lines and delimits the raw content belonging to each
/// `(topic, classification, title)` triple.
#[derive(Debug, Default)]
pub struct HeadingMachine {
    topic: Option<String>,
    classification: Option<Classification>,
    title: Option<String>,
    buffer: Vec<String>,
}

impl HeadingMachine {
    pub fn feed(&mut self, line: &str, out: &mut SectionAggregator) -> Result<(), ImportError> {
        match categorize(line) {
            LineKind::Topic(text) => {
                self.flush(out)?;
                self.topic = Some(text.to_string());
                self.classification = None;
                self.title = None;
            }
            LineKind::Classification(text) => {
                self.flush(out)?;
                let class = classify::resolve(text);
                self.classification = Some(class);
                // Sources sections are named by their `##` heading
                self.title = match class {
                    Classification::Sources => Some(text.to_string()),
                    _ => None,
                };
            }
            LineKind::Title(text) => {
                self.flush(out)?;
                self.title = Some(text.to_string());
            }
            LineKind::Rule => {}
            LineKind::Blank => {
                if self.collecting() && !self.buffer.is_empty() {
                    self.buffer.push(String::new());
                }
            }
            LineKind::Content => {
                if self.collecting() {
                    self.buffer.push(line.trim_end().to_string());
                }
            }
        }
        Ok(())
    }

    pub fn finish(mut self, out: &mut SectionAggregator) -> Result<(), ImportError> {
        self.flush(out)
    }

    fn collecting(&self) -> bool {
        self.topic.is_some() && self.classification.is_some()
    }

    /// Emit the current triple if it is complete and has content. The buffer
    /// is cleared either way.
    fn flush(&mut self, out: &mut SectionAggregator) -> Result<(), ImportError> {
        let lines = std::mem::take(&mut self.buffer);
        let (Some(topic), Some(classification), Some(title)) =
            (&self.topic, self.classification, &self.title)
        else {
            if !lines.is_empty() {
                debug!(lines = lines.len(), "dropping content without a section title");
            }
            return Ok(());
        };
        if lines.is_empty() {
            debug!(%topic, %classification, %title, "skipping section without content");
            return Ok(());
        }

        let markup = convert(title, &lines)?;
        debug!(%topic, %classification, %title, lines = lines.len(), "section complete");
        out.push(Section {
            topic: topic.clone(),
            classification,
            title: title.clone(),
            markup,
        });
        Ok(())
    }
}

fn convert(title: &str, lines: &[String]) -> Result<String, ImportError> {
    guard_conversion(title, || markup::to_markup(lines))
}

/// Runs one section conversion, turning a panic into `ImportError::Conversion`.
fn guard_conversion<F>(title: &str, conversion: F) -> Result<String, ImportError>
where
    F: FnOnce() -> String,
{
    panic::catch_unwind(AssertUnwindSafe(conversion)).map_err(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown conversion failure".to_string());
        ImportError::Conversion {
            title: title.to_string(),
            message,
        }
    })
}
