use std::collections::BTreeMap;

use serde::Serialize;

use super::classify::Classification;

/// One emitted content unit: a `(topic, classification, title)` triple plus
/// its converted markup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub topic: String,
    pub classification: Classification,
    pub title: String,
    pub markup: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stats {
    pub total: usize,
    pub by_classification: BTreeMap<Classification, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseResult {
    pub sections: Vec<Section>,
    pub grouped: BTreeMap<Classification, Vec<Section>>,
    pub stats: Stats,
}

impl ParseResult {
    pub fn group(&self, classification: Classification) -> &[Section] {
        self.grouped
            .get(&classification)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Collects finished sections in document order, both flat and grouped.
#[derive(Debug)]
pub struct SectionAggregator {
    sections: Vec<Section>,
    grouped: BTreeMap<Classification, Vec<Section>>,
}

impl Default for SectionAggregator {
    fn default() -> Self {
        Self {
            sections: Vec::new(),
            grouped: Classification::ALL
                .iter()
                .map(|c| (*c, Vec::new()))
                .collect(),
        }
    }
}

impl SectionAggregator {
    pub fn push(&mut self, section: Section) {
        self.grouped
            .entry(section.classification)
            .or_default()
            .push(section.clone());
        self.sections.push(section);
    }

    pub fn finish(self) -> ParseResult {
        let by_classification = self
            .grouped
            .iter()
            .map(|(class, sections)| (*class, sections.len()))
            .collect();
        let stats = Stats {
            total: self.sections.len(),
            by_classification,
        };
        ParseResult {
            sections: self.sections,
            grouped: self.grouped,
            stats,
        }
    }
}
