use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::parser::classify::Classification;

/// One stored block as reported by the block store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub identifier: String,
    pub label: String,
}

impl CatalogEntry {
    pub fn new(identifier: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            label: label.into(),
        }
    }

    fn mentions_any(&self, keywords: &[&str]) -> bool {
        let identifier = self.identifier.to_lowercase();
        let label = self.label.to_lowercase();
        keywords
            .iter()
            .any(|kw| identifier.contains(kw) || label.contains(kw))
    }
}

/// Best-guess block identifier per classification, `None` when nothing matched.
pub type SuggestionSet = BTreeMap<Classification, Option<String>>;

impl Classification {
    pub fn conventional_identifier(self) -> Option<&'static str> {
        match self {
            Classification::K1 => Some("infotext_k1"),
            Classification::K2 => Some("infotext_k2"),
            Classification::K3 => Some("infotext_k3"),
            Classification::Sources => None,
        }
    }

    fn catalog_keywords(self) -> &'static [&'static str] {
        match self {
            Classification::K1 => &["k1"],
            Classification::K2 => &["k2"],
            Classification::K3 => &["k3"],
            Classification::Sources => &["quellen", "literatur", "referenz", "bibliographie"],
        }
    }
}

/// Propose a target block for every classification from the caller's catalog.
pub fn suggest(catalog: &[CatalogEntry]) -> SuggestionSet {
    Classification::ALL
        .iter()
        .map(|class| (*class, suggest_one(*class, catalog)))
        .collect()
}

fn suggest_one(class: Classification, catalog: &[CatalogEntry]) -> Option<String> {
    let exact = class
        .conventional_identifier()
        .filter(|id| catalog.iter().any(|entry| entry.identifier == *id));
    if let Some(id) = exact {
        return Some(id.to_string());
    }

    catalog
        .iter()
        .find(|entry| entry.mentions_any(class.catalog_keywords()))
        .map(|entry| entry.identifier.clone())
}
