//! Book catalog: character counts per text unit.
//!
//! The built-in table covers the books of the Hebrew Bible. Counts already
//! include spaces (approximately 20% added). A JSON file can replace the table.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::constants::text::WHITESPACE_ALLOWANCE;
use crate::error::{Error, Result};

/// Character counts, spaces included, in canonical order.
const BUILTIN_CHARACTER_COUNTS: &[(&str, u64)] = &[
    ("Genesis", 93_677),
    ("Exodus", 76_442),
    ("Leviticus", 53_747),
    ("Numbers", 69_294),
    ("Deuteronomy", 62_882),
    ("Joshua", 34_053),
    ("Judges", 33_034),
    ("Ruth", 12_222),
    ("1 Samuel", 45_854),
    ("2 Samuel", 42_058),
    ("1 Kings", 41_453),
    ("2 Kings", 36_980),
    ("Isaiah", 80_242),
    ("Jeremiah", 83_238),
    ("Ezekiel", 69_086),
    ("Hosea", 14_350),
    ("Joel", 3_643),
    ("Amos", 6_353),
    ("Obadiah", 1_238),
    ("Jonah", 2_357),
    ("Micah", 5_079),
    ("Nahum", 1_943),
    ("Habakkuk", 2_620),
    ("Zephaniah", 2_972),
    ("Haggai", 1_657),
    ("Zechariah", 7_274),
    ("Malachi", 2_117),
    ("Psalms", 180_209),
    ("Proverbs", 57_924),
    ("Job", 47_882),
    ("Song of Songs", 6_822),
    ("Ecclesiastes", 27_847),
    ("Lamentations", 17_395),
    ("Daniel", 25_644),
    ("Ezra", 16_922),
    ("Nehemiah", 23_548),
    ("1 Chronicles", 44_990),
    ("2 Chronicles", 47_799),
];

lazy_static! {
    /// Book name normalization map
    static ref BOOK_ALIASES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("gen", "Genesis");
        m.insert("ex", "Exodus");
        m.insert("exod", "Exodus");
        m.insert("lev", "Leviticus");
        m.insert("num", "Numbers");
        m.insert("deut", "Deuteronomy");
        m.insert("josh", "Joshua");
        m.insert("judg", "Judges");
        m.insert("1 sam", "1 Samuel");
        m.insert("1sam", "1 Samuel");
        m.insert("2 sam", "2 Samuel");
        m.insert("2sam", "2 Samuel");
        m.insert("1 kgs", "1 Kings");
        m.insert("1kings", "1 Kings");
        m.insert("2 kgs", "2 Kings");
        m.insert("2kings", "2 Kings");
        m.insert("isa", "Isaiah");
        m.insert("jer", "Jeremiah");
        m.insert("ezek", "Ezekiel");
        m.insert("hos", "Hosea");
        m.insert("obad", "Obadiah");
        m.insert("mic", "Micah");
        m.insert("nah", "Nahum");
        m.insert("hab", "Habakkuk");
        m.insert("zeph", "Zephaniah");
        m.insert("hag", "Haggai");
        m.insert("zech", "Zechariah");
        m.insert("mal", "Malachi");
        m.insert("ps", "Psalms");
        m.insert("psalm", "Psalms");
        m.insert("prov", "Proverbs");
        m.insert("song", "Song of Songs");
        m.insert("song of solomon", "Song of Songs");
        m.insert("canticles", "Song of Songs");
        m.insert("eccl", "Ecclesiastes");
        m.insert("qoheleth", "Ecclesiastes");
        m.insert("lam", "Lamentations");
        m.insert("dan", "Daniel");
        m.insert("neh", "Nehemiah");
        m.insert("1 chr", "1 Chronicles");
        m.insert("1chronicles", "1 Chronicles");
        m.insert("2 chr", "2 Chronicles");
        m.insert("2chronicles", "2 Chronicles");
        m
    };
}

fn default_includes_whitespace() -> bool {
    true
}

/// One text unit and its size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Display name, also the lookup key.
    pub name: String,
    /// Character count as recorded.
    pub characters: u64,
    /// Whether `characters` already counts spaces.
    #[serde(default = "default_includes_whitespace")]
    pub includes_whitespace: bool,
}

impl CatalogEntry {
    /// Create an entry whose count already includes whitespace.
    pub fn new(name: impl Into<String>, characters: u64) -> Self {
        Self {
            name: name.into(),
            characters,
            includes_whitespace: true,
        }
    }

    /// Character count to lay out, whitespace allowance added when missing.
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn effective_characters(&self) -> u64 {
        if self.includes_whitespace {
            self.characters
        } else {
            (self.characters as f64 * (1.0 + WHITESPACE_ALLOWANCE)).round() as u64
        }
    }
}

/// Where a catalog's entries came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// The compiled-in table.
    Builtin,
    /// A JSON file.
    File(PathBuf),
}

impl CatalogSource {
    fn path(&self) -> Option<PathBuf> {
        match self {
            Self::Builtin => None,
            Self::File(path) => Some(path.clone()),
        }
    }
}

/// Immutable name → character count table, built once and shared by reference.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
    index: HashMap<String, usize>,
    source: CatalogSource,
}

/// Lowercase, trim, and collapse inner whitespace.
fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

impl Catalog {
    /// The built-in Hebrew Bible table.
    pub fn builtin() -> Self {
        let entries = BUILTIN_CHARACTER_COUNTS
            .iter()
            .map(|&(name, characters)| CatalogEntry::new(name, characters))
            .collect::<Vec<_>>();
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (normalize_name(&entry.name), i))
            .collect();
        Self { entries, index, source: CatalogSource::Builtin }
    }

    /// Build a catalog, rejecting empty tables, blank names and duplicates.
    pub fn from_entries(entries: Vec<CatalogEntry>, source: CatalogSource) -> Result<Self> {
        if entries.is_empty() {
            return Err(Error::catalog("catalog has no entries", source.path()));
        }

        let mut index = HashMap::with_capacity(entries.len());
        for (i, entry) in entries.iter().enumerate() {
            let key = normalize_name(&entry.name);
            if key.is_empty() {
                return Err(Error::catalog(
                    format!("entry {} has an empty name", i + 1),
                    source.path(),
                ));
            }
            if index.insert(key, i).is_some() {
                return Err(Error::catalog(
                    format!("duplicate book name '{}'", entry.name),
                    source.path(),
                ));
            }
        }

        Ok(Self { entries, index, source })
    }

    /// Parse a JSON array of entries.
    pub fn from_json_str(json: &str, source: CatalogSource) -> Result<Self> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)
            .map_err(|e| Error::catalog(format!("invalid catalog JSON: {e}"), source.path()))?;
        Self::from_entries(entries, source)
    }

    /// Load a JSON catalog file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs_err::read_to_string(path)
            .map_err(|e| Error::io(e, Some(path.to_path_buf())))?;
        let catalog = Self::from_json_str(&content, CatalogSource::File(path.to_path_buf()))?;
        tracing::info!("Loaded {} books from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// The catalog named by the configuration, or the built-in table.
    pub fn load(config: &Config) -> Result<Self> {
        match &config.catalog_path {
            Some(path) => Self::from_json_file(path),
            None => {
                tracing::info!("Using built-in catalog");
                Ok(Self::builtin())
            }
        }
    }

    /// All entries in catalog order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Entry at a catalog position.
    pub fn entry(&self, idx: usize) -> Option<&CatalogEntry> {
        self.entries.get(idx)
    }

    /// Book names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Number of books.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog has no books. Never true for a constructed catalog.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Where the entries came from.
    pub const fn source(&self) -> &CatalogSource {
        &self.source
    }

    /// Position of a book by name or common abbreviation, case-insensitive.
    pub fn position(&self, name: &str) -> Option<usize> {
        let key = normalize_name(name);
        if let Some(&idx) = self.index.get(&key) {
            return Some(idx);
        }

        let canonical = BOOK_ALIASES
            .get(key.as_str())
            .or_else(|| BOOK_ALIASES.get(key.replace(' ', "").as_str()))?;
        self.index.get(&normalize_name(canonical)).copied()
    }

    /// Entry for a book by name or common abbreviation.
    pub fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.position(name).and_then(|idx| self.entries.get(idx))
    }

    /// Like [`Catalog::get`], but unknown names are an error.
    pub fn lookup(&self, name: &str) -> Result<&CatalogEntry> {
        self.get(name).ok_or_else(|| Error::UnknownBook(name.to_string()))
    }

    /// Effective character count for a book.
    pub fn character_count(&self, name: &str) -> Option<u64> {
        self.get(name).map(CatalogEntry::effective_characters)
    }

    /// Catalog positions matching `query`, best match first.
    ///
    /// An empty query returns every position in catalog order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<usize> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return (0..self.entries.len()).take(limit).collect();
        }

        let matcher = SkimMatcherV2::default();
        let mut scored: Vec<(usize, i64)> = self
            .entries
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| {
                matcher
                    .fuzzy_match(&entry.name.to_lowercase(), &query)
                    .map(|score| (i, score))
            })
            .collect();

        // Stable sort keeps catalog order among equal scores.
        scored.sort_by(|a, b| b.1.cmp(&a.1));
        scored.into_iter().take(limit).map(|(i, _)| i).collect()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    #[test]
    fn builtin_has_all_books_in_order() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.len(), 38);
        assert_eq!(catalog.names().next(), Some("Genesis"));
        assert_eq!(catalog.names().last(), Some("2 Chronicles"));
        assert_eq!(catalog.source(), &CatalogSource::Builtin);
    }

    #[test]
    fn lookup_by_name_is_case_insensitive() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.character_count("Genesis"), Some(93_677));
        assert_eq!(catalog.character_count("  song   OF songs "), Some(6_822));
    }

    #[test]
    fn lookup_by_alias() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.get("gen").map(|e| e.name.as_str()), Some("Genesis"));
        assert_eq!(catalog.get("1 Sam").map(|e| e.name.as_str()), Some("1 Samuel"));
        assert_eq!(catalog.get("2sam").map(|e| e.name.as_str()), Some("2 Samuel"));
        assert_eq!(
            catalog.get("Song of Solomon").map(|e| e.name.as_str()),
            Some("Song of Songs")
        );
    }

    #[test]
    fn unknown_book_is_an_error() {
        let catalog = Catalog::builtin();
        assert!(matches!(catalog.lookup("Maccabees"), Err(Error::UnknownBook(_))));
    }

    #[test]
    fn whitespace_allowance_applies_to_bare_counts() {
        let entry = CatalogEntry {
            name: "Ruth".into(),
            characters: 10_000,
            includes_whitespace: false,
        };
        assert_eq!(entry.effective_characters(), 12_000);
        assert_eq!(CatalogEntry::new("Ruth", 10_000).effective_characters(), 10_000);
    }

    #[test]
    fn json_defaults_includes_whitespace() {
        let catalog = Catalog::from_json_str(
            r#"[{"name": "Tobit", "characters": 100}, {"name": "Judith", "characters": 50, "includes_whitespace": false}]"#,
            CatalogSource::Builtin,
        )
        .unwrap();
        assert_eq!(catalog.character_count("tobit"), Some(100));
        assert_eq!(catalog.character_count("Judith"), Some(60));
    }

    #[test]
    fn duplicate_names_rejected() {
        let entries = vec![CatalogEntry::new("Ruth", 1), CatalogEntry::new("ruth", 2)];
        let err = Catalog::from_entries(entries, CatalogSource::Builtin).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn empty_catalog_rejected() {
        assert!(Catalog::from_entries(Vec::new(), CatalogSource::Builtin).is_err());
        assert!(Catalog::from_json_str("[]", CatalogSource::Builtin).is_err());
    }

    #[test]
    fn blank_name_rejected() {
        let entries = vec![CatalogEntry::new("   ", 1)];
        assert!(Catalog::from_entries(entries, CatalogSource::Builtin).is_err());
    }

    #[test]
    fn search_ranks_matches() {
        let catalog = Catalog::builtin();
        let hits = catalog.search("sam", 10);
        let names: Vec<&str> = hits.iter().map(|&i| catalog.entries()[i].name.as_str()).collect();
        assert!(names.contains(&"1 Samuel"));
        assert!(names.contains(&"2 Samuel"));
        assert!(!names.contains(&"Genesis"));
    }

    #[test]
    fn empty_search_lists_everything_in_order() {
        let catalog = Catalog::builtin();
        let hits = catalog.search("", 100);
        assert_eq!(hits.len(), 38);
        assert_eq!(hits[0], 0);
        assert_eq!(catalog.search("  ", 5).len(), 5);
    }
}
