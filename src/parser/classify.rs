use std::fmt;

use serde::{Deserialize, Serialize};

/// Content tag assigned to a section from its enclosing `##` heading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Classification {
    K1,
    K2,
    K3,
    Sources,
}

impl Classification {
    pub const ALL: [Classification; 4] = [
        Classification::K1,
        Classification::K2,
        Classification::K3,
        Classification::Sources,
    ];

    pub fn tag(self) -> &'static str {
        match self {
            Classification::K1 => "k1",
            Classification::K2 => "k2",
            Classification::K3 => "k3",
            Classification::Sources => "sources",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.tag())
    }
}

/// Keyword table in priority order. First tag with a matching keyword wins.
const CLASSIFICATION_KEYWORDS: &[(Classification, &[&str])] = &[
    (
        Classification::K1,
        &["basiswissen", "basis", "k1", "grundwissen"],
    ),
    (
        Classification::K2,
        &["erweitertes wissen", "erweitertes", "k2", "erweitert"],
    ),
    (
        Classification::K3,
        &["vertiefendes wissen", "vertiefendes", "k3", "vertieft"],
    ),
    (
        Classification::Sources,
        &[
            "quellenverzeichnis",
            "quellen",
            "literatur",
            "literaturverzeichnis",
            "referenzen",
            "bibliographie",
        ],
    ),
];

/// Map heading text to a classification by case-insensitive keyword
/// containment. Falls back to `K1`.
pub fn resolve(heading: &str) -> Classification {
    let lower = heading.to_lowercase();
    CLASSIFICATION_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(class, _)| *class)
        .unwrap_or(Classification::K1)
}
