use std::sync::LazyLock;

use regex::Regex;

static DEEP_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{4,6})\s+(.+?)\s*$").unwrap());
// Spans never contain `|`, so emphasis stays inside one table cell.
static BOLD_STAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*([^\s*|](?:[^*|]*?[^\s*|])?)\*\*").unwrap());
static BOLD_UNDERSCORE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__([^\s|](?:[^|]*?[^\s|])??)__").unwrap());
static ITALIC_STAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*([^\s*|](?:[^*|]*?[^\s*|])?)\*").unwrap());

/// `####`..`######` headings. Levels 1-3 never reach this stage.
pub fn convert_headings(lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .map(|line| match DEEP_HEADING_RE.captures(&line) {
            Some(caps) => {
                let level = caps[1].len();
                format!("<h{level}>{}</h{level}>", &caps[2])
            }
            None => line,
        })
        .collect()
}

/// `**bold**`, `__bold__` and `*italic*`.
///
/// Single-underscore italics are left alone: formulas and identifiers such as
/// `c_H_3O` would otherwise be mangled.
pub fn convert_emphasis(lines: Vec<String>) -> Vec<String> {
    lines.into_iter().map(|line| emphasize(&line)).collect()
}

pub fn emphasize(text: &str) -> String {
    let text = BOLD_STAR_RE.replace_all(text, "<strong>$1</strong>");
    let text = BOLD_UNDERSCORE_RE.replace_all(&text, "<strong>$1</strong>");
    ITALIC_STAR_RE.replace_all(&text, "<em>$1</em>").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn deep_headings() {
        let out = convert_headings(lines(&["#### Vier", "##### Fünf ", "###### Sechs", "####### Sieben"]));
        assert_eq!(out[0], "<h4>Vier</h4>");
        assert_eq!(out[1], "<h5>Fünf</h5>");
        assert_eq!(out[2], "<h6>Sechs</h6>");
        assert_eq!(out[3], "####### Sieben");
    }

    #[test]
    fn shallow_headings_untouched() {
        let out = convert_headings(lines(&["### Drei", "#Kein"]));
        assert_eq!(out, ["### Drei", "#Kein"]);
        assert_eq!(convert_headings(lines(&["    #### eingerückt"])), ["    #### eingerückt"]);
    }

    #[test]
    fn bold_and_italic() {
        assert_eq!(emphasize("**fett** und *kursiv*"), "<strong>fett</strong> und <em>kursiv</em>");
        assert_eq!(emphasize("__auch fett__"), "<strong>auch fett</strong>");
        assert_eq!(emphasize("**a** b **c**"), "<strong>a</strong> b <strong>c</strong>");
    }

    #[test]
    fn several_spans_per_line() {
        assert_eq!(
            emphasize("**starke** und **schwache** Säuren"),
            "<strong>starke</strong> und <strong>schwache</strong> Säuren"
        );
        assert_eq!(
            emphasize("__Protonen__ und __Elektronen__"),
            "<strong>Protonen</strong> und <strong>Elektronen</strong>"
        );
        assert_eq!(emphasize("*eins* zwei *drei*"), "<em>eins</em> zwei <em>drei</em>");
        assert_eq!(emphasize("__c_H__ bleibt"), "<strong>c_H</strong> bleibt");
    }

    #[test]
    fn spans_stay_inside_table_cells() {
        assert_eq!(emphasize("| 2*3 | 4*5 |"), "| 2*3 | 4*5 |");
        assert_eq!(emphasize("| **a | b** |"), "| **a | b** |");
        assert_eq!(emphasize("| __a | b__ |"), "| __a | b__ |");
        assert_eq!(emphasize("| *a* | **b** |"), "| <em>a</em> | <strong>b</strong> |");
    }

    #[test]
    fn underscore_italic_disabled() {
        assert_eq!(emphasize("_nicht kursiv_"), "_nicht kursiv_");
        assert_eq!(emphasize("H_2O und x_i"), "H_2O und x_i");
    }

    #[test]
    fn list_markers_and_arithmetic_untouched() {
        assert_eq!(emphasize("* Punkt"), "* Punkt");
        assert_eq!(emphasize("* Punkt mit *Betonung*"), "* Punkt mit <em>Betonung</em>");
        assert_eq!(emphasize("2 * 3 * 4"), "2 * 3 * 4");
    }

    #[test]
    fn unmatched_markers_untouched() {
        assert_eq!(emphasize("**offen"), "**offen");
        assert_eq!(emphasize("*offen"), "*offen");
    }
}
