use super::is_block_markup;

/// Group runs of plain lines into `<p>` blocks joined by single spaces. Blank
/// lines and block markup end the current paragraph.
pub fn wrap_paragraphs(lines: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut current: Vec<String> = Vec::new();

    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            flush(&mut current, &mut out);
        } else if is_block_markup(trimmed) {
            flush(&mut current, &mut out);
            out.push(line);
        } else {
            current.push(trimmed.to_string());
        }
    }
    flush(&mut current, &mut out);
    out
}

fn flush(current: &mut Vec<String>, out: &mut Vec<String>) {
    if current.is_empty() {
        return;
    }
    out.push(format!("<p>{}</p>", current.join(" ")));
    current.clear();
}
