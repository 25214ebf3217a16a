//! Backup file format
//!
//! A backup directory holds a manifest with one line per collection, one
//! file per collection with one line per slot, and a file holding the schema
//! version it was written under. Everything here works on strings; reading
//! and writing the files is left to the caller.
//!
//! Every file is checked before anything is returned so a bad backup is
//! rejected as a whole.

use crate::migration::SCHEMA_VERSION;
use crate::names::{validate_name, SLASH_ESCAPE};
use crate::registry::Registry;
use crate::slot::CoinSlot;
use std::collections::HashSet;
use thiserror::Error;

pub const MANIFEST_FILE: &str = "list-of-collections.csv";
pub const VERSION_FILE: &str = "database_version.txt";

const MANIFEST_FIELDS: usize = 5;
const ROW_FIELDS: usize = 6;

/// Stand-ins for characters that cannot appear inside a field. The
/// underscore escapes itself so every token decodes back to one character.
const ESCAPES: [(char, &str); 5] = [
    (',', "_CM_"),
    ('\n', "_NL_"),
    ('[', "_LB_"),
    (']', "_RB_"),
    ('_', "_US_"),
];

/// Reasons a backup is rejected
#[derive(Error, Debug, PartialEq, Eq)]
pub enum BackupError {
    #[error("{file} line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        file: String,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{file} line {line}: invalid number '{value}'")]
    InvalidNumber { file: String, line: usize, value: String },

    #[error("Negative count in collection {name}")]
    NegativeCount { name: String },

    #[error("Collection {name} has unknown type {series}")]
    UnknownSeries { name: String, series: String },

    #[error("Duplicate collection name: {0}")]
    DuplicateName(String),

    #[error("Invalid collection name: {0}")]
    InvalidName(String),

    #[error("Collections {first} and {second} share the backup file {file}")]
    FileNameClash {
        first: String,
        second: String,
        file: String,
    },

    #[error("Collection {name} declares {declared} slots but its file has {found}")]
    RowCountMismatch { name: String, declared: u32, found: usize },

    #[error("Invalid database version: {0}")]
    InvalidVersion(String),

    #[error("Missing backup file: {0}")]
    MissingFile(String),
}

pub type BackupResult<T> = std::result::Result<T, BackupError>;

/// One manifest line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub name: String,
    pub series_type: String,
    pub collected: u32,
    pub total: u32,
    pub view_mode: u32,
}

impl ManifestEntry {
    /// Commas cannot be escaped in names, they become spaces
    pub fn to_line(&self) -> String {
        format!(
            "{},{},{},{},{}",
            self.name.replace(',', " "),
            self.series_type,
            self.collected,
            self.total,
            self.view_mode
        )
    }

    pub fn parse(line: &str, line_number: usize) -> BackupResult<Self> {
        let line = strip_brackets(line);
        let items: Vec<&str> = line.split(',').collect();
        if items.len() != MANIFEST_FIELDS {
            return Err(BackupError::FieldCount {
                file: MANIFEST_FILE.to_string(),
                line: line_number,
                expected: MANIFEST_FIELDS,
                found: items.len(),
            });
        }
        let name = items[0].to_string();
        let count = |value: &str| parse_count(MANIFEST_FILE, line_number, &name, value);
        Ok(Self {
            collected: count(items[2])?,
            total: count(items[3])?,
            view_mode: count(items[4])?,
            series_type: items[1].to_string(),
            name,
        })
    }

    /// Name of the collection's file inside the backup directory
    pub fn file_name(&self) -> String {
        collection_file_name(&self.name)
    }
}

/// One collection file line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupRow {
    pub identifier: String,
    pub mint: String,
    pub collected: bool,
    pub grade: u32,
    pub quantity: u32,
    pub notes: String,
}

impl BackupRow {
    pub fn from_slot(slot: &CoinSlot) -> Self {
        Self {
            identifier: slot.identifier.clone(),
            mint: slot.mint.clone(),
            collected: slot.collected,
            grade: slot.grade,
            quantity: slot.quantity,
            notes: slot.notes.clone(),
        }
    }

    pub fn to_line(&self) -> String {
        format!(
            "{},{},{},{},{},{}",
            escape_field(&self.identifier),
            escape_field(&self.mint),
            u8::from(self.collected),
            self.grade,
            self.quantity,
            escape_field(&self.notes)
        )
    }

    /// `name` is the owning collection, used in error messages
    pub fn parse(file: &str, name: &str, line: &str, line_number: usize) -> BackupResult<Self> {
        let line = strip_brackets(line);
        let items: Vec<&str> = line.split(',').collect();
        if items.len() != ROW_FIELDS {
            return Err(BackupError::FieldCount {
                file: file.to_string(),
                line: line_number,
                expected: ROW_FIELDS,
                found: items.len(),
            });
        }
        let count = |value: &str| parse_count(file, line_number, name, value);
        Ok(Self {
            identifier: unescape_field(items[0]),
            mint: unescape_field(items[1]),
            collected: count(items[2])? != 0,
            grade: count(items[3])?,
            quantity: count(items[4])?,
            notes: unescape_field(items[5]),
        })
    }

    /// Slot with this row's state. The image variant is left for the
    /// series catalogue to restore.
    pub fn into_slot(self, display_index: u32) -> CoinSlot {
        CoinSlot {
            identifier: self.identifier,
            mint: self.mint,
            display_index,
            image_variant: None,
            collected: self.collected,
            grade: self.grade,
            quantity: self.quantity,
            notes: self.notes,
        }
    }
}

/// Backup file name for a collection name
pub fn collection_file_name(name: &str) -> String {
    format!("{}.csv", name.replace(',', " ").replace('/', SLASH_ESCAPE))
}

pub fn escape_field(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match ESCAPES.iter().find(|(raw, _)| *raw == c) {
            Some((_, token)) => escaped.push_str(token),
            None => escaped.push(c),
        }
    }
    escaped
}

/// An underscore that does not start a token is kept as is, so files
/// written before underscores were escaped still read back.
pub fn unescape_field(value: &str) -> String {
    let mut raw = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(c) = rest.chars().next() {
        let token = ESCAPES.iter().find(|(_, token)| rest.starts_with(token));
        match token {
            Some((decoded, token)) => {
                raw.push(*decoded);
                rest = &rest[token.len()..];
            }
            None => {
                raw.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }
    raw
}

fn strip_brackets(line: &str) -> String {
    line.replace(['[', ']'], " ")
}

fn parse_count(file: &str, line: usize, name: &str, value: &str) -> BackupResult<u32> {
    let number: i64 = value.trim().parse().map_err(|_| BackupError::InvalidNumber {
        file: file.to_string(),
        line,
        value: value.to_string(),
    })?;
    if number < 0 {
        return Err(BackupError::NegativeCount {
            name: name.to_string(),
        });
    }
    u32::try_from(number).map_err(|_| BackupError::InvalidNumber {
        file: file.to_string(),
        line,
        value: value.to_string(),
    })
}

/// Lines joined without a trailing newline
pub fn format_manifest(entries: &[ManifestEntry]) -> String {
    entries
        .iter()
        .map(ManifestEntry::to_line)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parses the manifest, rejecting invalid names, unknown types and
/// duplicate names. Names are compared case-insensitively.
pub fn parse_manifest(content: &str, registry: &Registry) -> BackupResult<Vec<ManifestEntry>> {
    let mut seen = HashSet::new();
    let mut entries = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let entry = ManifestEntry::parse(line, index + 1)?;
        validate_name(&entry.name).map_err(|e| BackupError::InvalidName(e.to_string()))?;
        if !registry.contains(&entry.series_type) {
            return Err(BackupError::UnknownSeries {
                name: entry.name,
                series: entry.series_type,
            });
        }
        if !seen.insert(entry.name.to_lowercase()) {
            return Err(BackupError::DuplicateName(entry.name));
        }
        entries.push(entry);
    }
    Ok(entries)
}

pub fn format_collection(slots: &[CoinSlot]) -> String {
    slots
        .iter()
        .map(|slot| BackupRow::from_slot(slot).to_line())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parses one collection file and checks it against the manifest's total
pub fn parse_collection(entry: &ManifestEntry, content: &str) -> BackupResult<Vec<CoinSlot>> {
    let file = entry.file_name();
    let mut slots = Vec::new();
    for (index, line) in content.lines().enumerate() {
        let row = BackupRow::parse(&file, &entry.name, line, index + 1)?;
        slots.push(row.into_slot(index as u32));
    }
    if slots.len() != entry.total as usize {
        return Err(BackupError::RowCountMismatch {
            name: entry.name.clone(),
            declared: entry.total,
            found: slots.len(),
        });
    }
    Ok(slots)
}

pub fn format_version(version: u32) -> String {
    version.to_string()
}

/// Accepts versions from 1 up to the one this build writes
pub fn parse_version(content: &str) -> BackupResult<u32> {
    let text = content.lines().next().unwrap_or("").trim();
    match text.parse::<u32>() {
        Ok(version) if version >= 1 && version <= SCHEMA_VERSION => Ok(version),
        _ => Err(BackupError::InvalidVersion(text.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::registry;

    fn entry(name: &str, total: u32) -> ManifestEntry {
        ManifestEntry {
            name: name.to_string(),
            series_type: "Nickels".to_string(),
            collected: 0,
            total,
            view_mode: 0,
        }
    }

    #[test]
    fn test_manifest_line() {
        let entry = ManifestEntry {
            name: "Nickels, circulated".to_string(),
            series_type: "Nickels".to_string(),
            collected: 12,
            total: 85,
            view_mode: 1,
        };
        assert_eq!(entry.to_line(), "Nickels  circulated,Nickels,12,85,1");
    }

    #[test]
    fn test_manifest_parse() {
        let content = "My Nickels,Nickels,3,85,0\nDimes,Clad Roosevelt Dimes,0,112,1";
        let entries = parse_manifest(content, registry()).expect("valid manifest");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].series_type, "Clad Roosevelt Dimes");
        assert_eq!(entries[1].view_mode, 1);
    }

    #[test]
    fn test_manifest_field_count() {
        let error = parse_manifest("Nickels,Nickels,0,85", registry()).unwrap_err();
        assert_eq!(
            error,
            BackupError::FieldCount {
                file: MANIFEST_FILE.to_string(),
                line: 1,
                expected: 5,
                found: 4,
            }
        );
    }

    #[test]
    fn test_manifest_rejections() {
        let negative = parse_manifest("A,Nickels,-1,85,0", registry()).unwrap_err();
        assert_eq!(negative, BackupError::NegativeCount { name: "A".to_string() });

        let unknown = parse_manifest("A,Lincoln Cents,0,10,0", registry()).unwrap_err();
        assert!(matches!(unknown, BackupError::UnknownSeries { .. }));

        let duplicate = parse_manifest("A,Nickels,0,85,0\na,Nickels,0,85,0", registry()).unwrap_err();
        assert_eq!(duplicate, BackupError::DuplicateName("a".to_string()));

        let number = parse_manifest("A,Nickels,x,85,0", registry()).unwrap_err();
        assert!(matches!(number, BackupError::InvalidNumber { line: 1, .. }));
    }

    #[test]
    fn test_manifest_rejects_reserved_names() {
        for line in [
            "collection_info,Nickels,0,85,0",
            "SQLite_master,Nickels,0,85,0",
            " ,Nickels,0,85,0",
            ",Nickels,0,85,0",
            "a_SL_b,Nickels,0,85,0",
        ] {
            let error = parse_manifest(line, registry()).unwrap_err();
            assert!(matches!(error, BackupError::InvalidName(_)), "{} accepted", line);
        }
    }

    #[test]
    fn test_brackets_stripped_on_import() {
        let entries = parse_manifest("[A],Nickels,0,85,0", registry()).expect("valid manifest");
        assert_eq!(entries[0].name, " A ");
    }

    #[test]
    fn test_row_fields_are_escaped() {
        let slot = CoinSlot {
            identifier: "2004".to_string(),
            mint: "Peace Medal".to_string(),
            collected: true,
            grade: 3,
            quantity: 2,
            notes: "bought at show, [raw]\nsecond line".to_string(),
            ..Default::default()
        };
        let line = BackupRow::from_slot(&slot).to_line();
        assert_eq!(line.matches(',').count(), 5);
        assert!(!line.contains('\n'));

        let row = BackupRow::parse("n.csv", "n", &line, 1).expect("valid row");
        assert_eq!(row.into_slot(0), slot);
    }

    #[test]
    fn test_escape_tokens_in_text_survive() {
        for text in ["bag _CM_ 12", "_NL__LB__RB_", "snake_case", "_", "__US__", "a,_CM_"] {
            let escaped = escape_field(text);
            assert!(!escaped.contains(','));
            assert_eq!(unescape_field(&escaped), text, "escaped as {}", escaped);
        }
        assert_eq!(escape_field("a_b,c"), "a_US_b_CM_c");
    }

    #[test]
    fn test_unescape_keeps_bare_underscores() {
        assert_eq!(unescape_field("mint_set_CM_ proof"), "mint_set, proof");
        assert_eq!(unescape_field("_X_"), "_X_");
        assert_eq!(unescape_field("ends_"), "ends_");
    }

    #[test]
    fn test_row_empty_fields_allowed() {
        let row = BackupRow::parse("n.csv", "n", "1950,,0,0,0,", 1).expect("valid row");
        assert_eq!(row.mint, "");
        assert_eq!(row.notes, "");
        assert!(!row.collected);
    }

    #[test]
    fn test_collection_parse_checks_total() {
        let content = "1938,,1,0,0,\n1939,,0,0,0,";
        let slots = parse_collection(&entry("N", 2), content).expect("valid collection");
        assert_eq!(slots[1].display_index, 1);
        assert!(slots[0].collected);

        let error = parse_collection(&entry("N", 3), content).unwrap_err();
        assert_eq!(
            error,
            BackupError::RowCountMismatch {
                name: "N".to_string(),
                declared: 3,
                found: 2,
            }
        );
    }

    #[test]
    fn test_collection_row_field_count() {
        let error = parse_collection(&entry("a/b", 1), "1938,,1,0").unwrap_err();
        assert!(matches!(
            error,
            BackupError::FieldCount { ref file, line: 1, expected: 6, found: 4 } if file == "a_SL_b.csv"
        ));
    }

    #[test]
    fn test_empty_collection_file() {
        assert!(parse_collection(&entry("Empty", 0), "").expect("valid").is_empty());
        assert_eq!(format_collection(&[]), "");
    }

    #[test]
    fn test_no_trailing_newline() {
        let text = format_manifest(&[entry("A", 1), entry("B", 2)]);
        assert_eq!(text, "A,Nickels,0,1,0\nB,Nickels,0,2,0");
    }

    #[test]
    fn test_collection_file_name() {
        assert_eq!(collection_file_name("Dollars 1794/1885"), "Dollars 1794_SL_1885.csv");
    }

    #[test]
    fn test_version() {
        assert_eq!(parse_version("14"), Ok(14));
        assert_eq!(parse_version("6\n"), Ok(6));
        assert!(matches!(parse_version("-1"), Err(BackupError::InvalidVersion(_))));
        assert!(matches!(parse_version("0"), Err(BackupError::InvalidVersion(_))));
        assert!(parse_version(&format_version(SCHEMA_VERSION + 1)).is_err());
    }
}
