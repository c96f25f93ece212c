const FRONT_MATTER_DELIMITER: &str = "---";

/// Unify line endings, drop a leading front-matter block and split into lines.
pub fn normalize_lines(document: &str) -> Vec<String> {
    let unified = document.replace("\r\n", "\n").replace('\r', "\n");
    let body = strip_front_matter(&unified);
    if body.trim().is_empty() {
        return Vec::new();
    }
    body.lines().map(str::to_string).collect()
}

/// Front matter only counts when the very first line is the delimiter and a
/// closing delimiter follows. Otherwise the text is returned untouched.
fn strip_front_matter(text: &str) -> &str {
    let mut lines = text.split_inclusive('\n');
    let mut offset = match lines.next() {
        Some(first) if first.trim_end() == FRONT_MATTER_DELIMITER => first.len(),
        _ => return text,
    };

    for line in lines {
        offset += line.len();
        if line.trim_end() == FRONT_MATTER_DELIMITER {
            return &text[offset..];
        }
    }
    text
}

/// `---`, `***`, `___` and longer runs of a single rule character.
pub fn is_horizontal_rule(line: &str) -> bool {
    let trimmed = line.trim();
    let mut chars = trimmed.chars();
    let first = match chars.next() {
        Some(c @ ('-' | '*' | '_')) => c,
        _ => return false,
    };
    trimmed.len() >= 3 && chars.all(|c| c == first)
}
