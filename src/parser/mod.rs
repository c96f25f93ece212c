pub mod classify;
pub mod headings;
pub mod normalize;
pub mod sections;

use tracing::debug;

use crate::error::ImportError;
use classify::Classification;
use headings::HeadingMachine;
use sections::{ParseResult, SectionAggregator};

/// Three-pass pipeline: raw text → normalized lines → heading triples →
/// converted, grouped sections.
///
/// Every call builds its own state, so `parse` is safe to run on many
/// documents in parallel.
pub fn parse(document: &str) -> Result<ParseResult, ImportError> {
    let lines = normalize::normalize_lines(document);
    if lines.is_empty() {
        return Err(ImportError::EmptyInput);
    }

    let mut machine = HeadingMachine::default();
    let mut aggregator = SectionAggregator::default();
    for line in &lines {
        machine.feed(line, &mut aggregator)?;
    }
    machine.finish(&mut aggregator)?;

    let result = aggregator.finish();
    debug!(
        lines = lines.len(),
        sections = result.stats.total,
        k1 = result.stats.by_classification[&Classification::K1],
        sources = result.stats.by_classification[&Classification::Sources],
        "document parsed"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> String {
        std::fs::read_to_string("tests/fixtures/saeuren.md").unwrap()
    }

    fn assert_consistent(result: &ParseResult) {
        assert_eq!(result.stats.total, result.sections.len());
        let grouped: usize = result.grouped.values().map(Vec::len).sum();
        assert_eq!(grouped, result.stats.total);
        for (class, sections) in &result.grouped {
            assert_eq!(result.stats.by_classification[class], sections.len());
        }
    }

    #[test]
    fn empty_input() {
        assert!(matches!(parse(""), Err(ImportError::EmptyInput)));
        assert!(matches!(parse("\r\n  \n"), Err(ImportError::EmptyInput)));
        assert!(matches!(parse("---\ntitle: x\n---\n"), Err(ImportError::EmptyInput)));
    }

    #[test]
    fn no_headings_no_sections() {
        let result = parse("Nur Text\n\n- und eine Liste\n| a | b |").unwrap();
        assert!(result.sections.is_empty());
        assert_eq!(result.stats.total, 0);
        assert_consistent(&result);
    }

    #[test]
    fn acid_example() {
        let result = parse("# Acids\n## Basiswissen\n### Definition\nAn acid donates protons.").unwrap();
        assert_eq!(result.sections.len(), 1);
        let s = &result.sections[0];
        assert_eq!(s.topic, "Acids");
        assert_eq!(s.classification, Classification::K1);
        assert_eq!(s.title, "Definition");
        assert_eq!(s.markup, "<p>An acid donates protons.</p>");
        assert_eq!(result.group(Classification::K1).len(), 1);
    }

    #[test]
    fn sources_without_title() {
        let result = parse("# Acids\n## Quellenverzeichnis\nAtkins, Chemie, 2006.").unwrap();
        assert_eq!(result.sections.len(), 1);
        assert_eq!(result.sections[0].classification, Classification::Sources);
        assert_eq!(result.sections[0].title, "Quellenverzeichnis");
    }

    #[test]
    fn crlf_and_front_matter() {
        let doc = "---\r\nautor: x\r\n---\r\n# T\r\n## Vertiefendes Wissen\r\n### A\r\nZeile\r\n";
        let result = parse(doc).unwrap();
        assert_eq!(result.sections.len(), 1);
        assert_eq!(result.sections[0].classification, Classification::K3);
        assert_eq!(result.sections[0].markup, "<p>Zeile</p>");
    }

    #[test]
    fn fixture_document() {
        let result = parse(&fixture()).unwrap();
        assert_consistent(&result);

        let titles: Vec<_> = result.sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            [
                "Definition",
                "Eigenschaften",
                "pH-Wert",
                "Säurestärke",
                "Quellenverzeichnis",
                "Protolyse",
            ]
        );
        assert_eq!(result.stats.by_classification[&Classification::K1], 4);
        assert_eq!(result.stats.by_classification[&Classification::K2], 1);
        assert_eq!(result.stats.by_classification[&Classification::K3], 0);
        assert_eq!(result.stats.by_classification[&Classification::Sources], 1);

        // second topic resets classification; "Protolyse" falls under its own "## Basis"
        let last = result.sections.last().unwrap();
        assert_eq!(last.topic, "Basen");
        assert_eq!(last.classification, Classification::K1);
    }

    #[test]
    fn fixture_markup() {
        let result = parse(&fixture()).unwrap();
        let by_title = |title: &str| {
            result
                .sections
                .iter()
                .find(|s| s.title == title)
                .map(|s| s.markup.clone())
                .unwrap()
        };

        let eigenschaften = by_title("Eigenschaften");
        assert!(eigenschaften.starts_with("<ul>\n<li>schmecken sauer</li>"));
        assert!(eigenschaften.contains("<li>leiten in wässriger Lösung den elektrischen Strom</li>"));
        assert!(eigenschaften.contains("<p>Vorsicht beim Umgang!</p>"));

        let ph = by_title("pH-Wert");
        assert!(ph.contains("<th>Lösung</th>"));
        assert!(ph.contains("<td>Zitronensaft</td>"));
        assert!(!ph.contains("|"));
        assert!(ph.contains(r"\(pH = -\log_{10} c(H_3O^+)\)"));

        let staerke = by_title("Säurestärke");
        assert!(staerke.contains("<h4>Merke</h4>"));
        assert!(staerke.contains(
            "<p>Man unterscheidet <strong>starke</strong> und <strong>schwache</strong> Säuren: \
             <strong>Salzsäure</strong> protolysiert vollständig, \
             <strong>Essigsäure</strong> nur <em>teilweise</em>.</p>"
        ));
        assert!(staerke.contains("<ol>"));

        for section in &result.sections {
            assert!(!section.markup.contains("---"), "{}", section.title);
        }
    }

    #[test]
    fn several_emphasis_spans_per_line() {
        let doc = "# T\n## Basiswissen\n### A\n**a** und **b**, __c__ und __d__\n- **e** oder *f* und *g*";
        let result = parse(doc).unwrap();
        assert_eq!(
            result.sections[0].markup,
            "<p><strong>a</strong> und <strong>b</strong>, <strong>c</strong> und <strong>d</strong></p>\n\
             <ul>\n<li><strong>e</strong> oder <em>f</em> und <em>g</em></li>\n</ul>"
        );
    }

    #[test]
    fn empty_triple_in_fixture_is_skipped() {
        let result = parse(&fixture()).unwrap();
        assert!(result.sections.iter().all(|s| s.title != "Noch leer"));
    }
}
