use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

static SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\|[-:\s|]+\|$").unwrap());

/// A line starting with `|` that has at least one more `|` after it.
pub fn is_table_row(line: &str) -> bool {
    line.trim()
        .strip_prefix('|')
        .is_some_and(|rest| rest.contains('|'))
}

fn is_separator(line: &str) -> bool {
    SEPARATOR_RE.is_match(line.trim())
}

/// Split a row on `|`, dropping the empty outer fields of a leading/trailing
/// delimiter.
pub fn split_cells(row: &str) -> Vec<String> {
    let trimmed = row.trim();
    let inner = trimmed.strip_prefix('|').unwrap_or(trimmed);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(|cell| cell.trim().to_string()).collect()
}

/// Replace each run of consecutive table rows with one line of table markup.
pub fn build_tables(lines: Vec<String>) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut run: Vec<String> = Vec::new();

    for line in lines {
        if is_table_row(&line) {
            run.push(line);
            continue;
        }
        out.extend(render_table(&std::mem::take(&mut run)));
        out.push(line);
    }
    out.extend(render_table(&run));
    out
}

fn render_table(run: &[String]) -> Option<String> {
    let mut rows = run.iter().filter(|row| !is_separator(row)).map(|row| split_cells(row));
    let header = rows.next()?;
    let body: Vec<Vec<String>> = rows.collect();
    debug!(columns = header.len(), rows = body.len(), "table");

    let mut html = String::from("<table><thead><tr>");
    for cell in &header {
        html.push_str(&format!("<th>{}</th>", cell));
    }
    html.push_str("</tr></thead>");
    if !body.is_empty() {
        html.push_str("<tbody>");
        for row in &body {
            html.push_str("<tr>");
            for cell in row {
                html.push_str(&format!("<td>{}</td>", cell));
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody>");
    }
    html.push_str("</table>");
    Some(html)
}
