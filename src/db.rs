use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::Connection;

use infotext_import::{CatalogEntry, Section};

pub fn connect(path: &Path) -> Result<Connection> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create {}", dir.display()))?;
    }
    let conn = Connection::open(path)
        .with_context(|| format!("Failed to open block store {}", path.display()))?;
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;
    Ok(conn)
}

pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS blocks (
            identifier     TEXT PRIMARY KEY,
            label          TEXT NOT NULL,
            classification TEXT NOT NULL CHECK(classification IN ('k1','k2','k3','sources')),
            topic          TEXT NOT NULL,
            markup         TEXT NOT NULL,
            source         TEXT NOT NULL,
            imported_at    TEXT NOT NULL DEFAULT (datetime('now'))
        );
        CREATE INDEX IF NOT EXISTS idx_blocks_classification ON blocks(classification);
        ",
    )?;
    Ok(())
}

/// `<classification>_<slug of title>`, e.g. `k1_saeurestaerke`.
pub fn block_identifier(section: &Section) -> String {
    format!("{}_{}", section.classification.tag(), slugify(&section.title))
}

fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        match c {
            'ä' => slug.push_str("ae"),
            'ö' => slug.push_str("oe"),
            'ü' => slug.push_str("ue"),
            'ß' => slug.push_str("ss"),
            c if c.is_ascii_alphanumeric() => slug.push(c),
            _ => {
                if !slug.is_empty() && !slug.ends_with('_') {
                    slug.push('_');
                }
            }
        }
    }
    slug.trim_end_matches('_').to_string()
}

// ── Blocks ──

pub fn save_sections(conn: &Connection, source: &str, sections: &[Section]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;
    let mut count = 0;
    {
        let mut stmt = tx.prepare(
            "INSERT OR REPLACE INTO blocks (identifier, label, classification, topic, markup, source)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )?;
        for s in sections {
            count += stmt.execute(rusqlite::params![
                block_identifier(s),
                s.title,
                s.classification.tag(),
                s.topic,
                s.markup,
                source,
            ])?;
        }
    }
    tx.commit()?;
    Ok(count)
}

pub fn fetch_catalog(conn: &Connection) -> Result<Vec<CatalogEntry>> {
    let mut stmt = conn.prepare("SELECT identifier, label FROM blocks ORDER BY identifier")?;
    let rows = stmt
        .query_map([], |row| {
            Ok(CatalogEntry {
                identifier: row.get(0)?,
                label: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

// ── Stats ──

pub struct Stats {
    pub total: usize,
    pub by_classification: Vec<(String, usize)>,
}

pub fn get_stats(conn: &Connection) -> Result<Stats> {
    let total: usize = conn.query_row("SELECT COUNT(*) FROM blocks", [], |r| r.get(0))?;
    let mut stmt = conn.prepare(
        "SELECT classification, COUNT(*) FROM blocks GROUP BY classification ORDER BY classification",
    )?;
    let by_classification = stmt
        .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Stats {
        total,
        by_classification,
    })
}
