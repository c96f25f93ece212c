//! Structured-document importer for teaching material.
//!
//! Turns a Markdown-like document into typed content sections. `#` headings
//! name the topic, `##` headings pick a classification (K1/K2/K3/sources) and
//! `###` headings name the individual sections. Section bodies are converted
//! to HTML with a small, deliberately incomplete Markdown subset.
//!
//! ```
//! use infotext_import::{parse, Classification};
//!
//! let result = parse("# Acids\n## Basiswissen\n### Definition\nAn acid donates protons.").unwrap();
//! assert_eq!(result.sections[0].classification, Classification::K1);
//! assert_eq!(result.sections[0].markup, "<p>An acid donates protons.</p>");
//! ```

pub mod error;
pub mod markup;
pub mod parser;
pub mod suggest;

pub use error::ImportError;
pub use parser::classify::{resolve, Classification};
pub use parser::parse;
pub use parser::sections::{ParseResult, Section, Stats};
pub use suggest::{suggest, CatalogEntry, SuggestionSet};
