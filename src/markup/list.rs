use std::sync::LazyLock;

use regex::Regex;

use super::is_block_markup;

static UNORDERED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*[-*]\s+(.*)$").unwrap());
static ORDERED_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*\d+\.\s+(.*)$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMode {
    None,
    Unordered,
    Ordered,
}

impl ListMode {
    fn open_tag(self) -> Option<&'static str> {
        match self {
            ListMode::None => None,
            ListMode::Unordered => Some("<ul>"),
            ListMode::Ordered => Some("<ol>"),
        }
    }

    fn close_tag(self) -> Option<&'static str> {
        match self {
            ListMode::None => None,
            ListMode::Unordered => Some("</ul>"),
            ListMode::Ordered => Some("</ol>"),
        }
    }
}

#[derive(Debug, PartialEq)]
enum ListLine<'a> {
    Item(ListMode, &'a str),
    Blank,
    Markup,
    Text(&'a str),
}

fn categorize(line: &str) -> ListLine<'_> {
    if line.trim().is_empty() {
        return ListLine::Blank;
    }
    if is_block_markup(line) {
        return ListLine::Markup;
    }
    if let Some(m) = UNORDERED_RE.captures(line).and_then(|c| c.get(1)) {
        return ListLine::Item(ListMode::Unordered, m.as_str());
    }
    if let Some(m) = ORDERED_RE.captures(line).and_then(|c| c.get(1)) {
        return ListLine::Item(ListMode::Ordered, m.as_str());
    }
    ListLine::Text(line)
}

/// Merges list item lines (plus their continuation lines) into list markup.
#[derive(Debug)]
pub struct ListBuilder {
    mode: ListMode,
    pending: Option<String>,
    out: Vec<String>,
}

impl Default for ListBuilder {
    fn default() -> Self {
        Self {
            mode: ListMode::None,
            pending: None,
            out: Vec::new(),
        }
    }
}

impl ListBuilder {
    pub fn mode(&self) -> ListMode {
        self.mode
    }

    pub fn pending(&self) -> Option<&str> {
        self.pending.as_deref()
    }

    pub fn feed(&mut self, line: &str) {
        match categorize(line) {
            ListLine::Item(mode, text) => self.on_item(mode, text),
            ListLine::Blank => self.on_blank(),
            ListLine::Markup => self.on_markup(line),
            ListLine::Text(text) => self.on_text(text),
        }
    }

    pub fn finish(mut self) -> Vec<String> {
        self.close_item();
        self.close_list();
        self.out
    }

    fn on_item(&mut self, mode: ListMode, text: &str) {
        self.close_item();
        if self.mode != mode {
            self.close_list();
            self.out.extend(mode.open_tag().map(str::to_string));
            self.mode = mode;
        }
        self.pending = Some(text.trim().to_string());
    }

    /// Ends the item but keeps the list open, so blank-separated items stay in
    /// one list.
    fn on_blank(&mut self) {
        self.close_item();
        if self.mode == ListMode::None {
            self.out.push(String::new());
        }
    }

    fn on_text(&mut self, text: &str) {
        match self.pending.as_mut() {
            Some(pending) => {
                pending.push(' ');
                pending.push_str(text.trim());
            }
            None => {
                self.close_list();
                self.out.push(text.to_string());
            }
        }
    }

    fn on_markup(&mut self, line: &str) {
        self.close_item();
        self.close_list();
        self.out.push(line.to_string());
    }

    fn close_item(&mut self) {
        if let Some(text) = self.pending.take() {
            self.out.push(format!("<li>{}</li>", text));
        }
    }

    fn close_list(&mut self) {
        self.out.extend(self.mode.close_tag().map(str::to_string));
        self.mode = ListMode::None;
    }
}

pub fn build_lists(lines: Vec<String>) -> Vec<String> {
    let mut builder = ListBuilder::default();
    for line in &lines {
        builder.feed(line);
    }
    builder.finish()
}
