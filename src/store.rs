//! SQLite storage for collections
//!
//! One registry table lists the collections. Every collection owns a table
//! named after it holding its slots. The schema version lives in
//! `PRAGMA user_version`.

use crate::error::{CoinCollectionError, Result};
use coin_collection_common::{validate_name, CoinSlot, SlotSink};
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// How a collection is displayed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, clap::ValueEnum)]
pub enum ViewMode {
    #[default]
    Simple,
    Advanced,
}

impl ViewMode {
    pub fn as_u32(self) -> u32 {
        match self {
            ViewMode::Simple => 0,
            ViewMode::Advanced => 1,
        }
    }

    /// Unknown values fall back to the simple view
    pub fn from_u32(value: u32) -> Self {
        match value {
            1 => ViewMode::Advanced,
            _ => ViewMode::Simple,
        }
    }
}

/// One row of the registry table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionRecord {
    pub name: String,
    pub series_type: String,
    /// Cached slot count
    pub total: u32,
    pub display_order: u32,
    pub view_mode: ViewMode,
}

pub struct Database {
    conn: Connection,
    path: Option<PathBuf>,
}

fn quote(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<CollectionRecord> {
    Ok(CollectionRecord {
        name: row.get(0)?,
        series_type: row.get(1)?,
        total: row.get(2)?,
        display_order: row.get(3)?,
        view_mode: ViewMode::from_u32(row.get(4)?),
    })
}

fn slot_from_row(row: &Row<'_>) -> rusqlite::Result<CoinSlot> {
    Ok(CoinSlot {
        identifier: row.get(0)?,
        mint: row.get(1)?,
        collected: row.get(2)?,
        grade: row.get(3)?,
        quantity: row.get(4)?,
        notes: row.get(5)?,
        display_index: row.get(6)?,
        image_variant: row.get(7)?,
    })
}

const RECORD_COLUMNS: &str = "name, series_type, total, display_order, view_mode";
const SLOT_COLUMNS: &str =
    "identifier, mint, collected, grade, quantity, notes, display_index, image_id";

impl Database {
    /// Opens or creates the database file, creating parent directories
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        info!("Database opened at {}", path.display());

        let db = Database {
            conn,
            path: Some(path.to_path_buf()),
        };
        db.init_schema()?;
        Ok(db)
    }

    pub fn open_in_memory() -> Result<Self> {
        let db = Database {
            conn: Connection::open_in_memory()?,
            path: None,
        };
        db.init_schema()?;
        Ok(db)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn init_schema(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS collection_info (
                _id             INTEGER PRIMARY KEY AUTOINCREMENT,
                name            TEXT NOT NULL UNIQUE,
                series_type     TEXT NOT NULL,
                total           INTEGER NOT NULL DEFAULT 0,
                display_order   INTEGER NOT NULL DEFAULT 0,
                view_mode       INTEGER NOT NULL DEFAULT 0
            )",
            [],
        )?;
        Ok(())
    }

    /// Version stamped by the last writer, 0 for a new database
    pub fn schema_version(&self) -> Result<u32> {
        let version: u32 = self
            .conn
            .pragma_query_value(None, "user_version", |row| row.get(0))?;
        Ok(version)
    }

    pub fn set_schema_version(&self, version: u32) -> Result<()> {
        self.conn.pragma_update(None, "user_version", version)?;
        Ok(())
    }

    /// Validates a name for a new collection
    pub fn check_collection_name(&self, name: &str) -> Result<()> {
        validate_name(name).map_err(|e| CoinCollectionError::InvalidName(e.to_string()))?;
        let taken: Option<String> = self
            .conn
            .query_row(
                "SELECT name FROM collection_info WHERE name = ?1 COLLATE NOCASE",
                params![name],
                |row| row.get(0),
            )
            .optional()?;
        if let Some(existing) = taken {
            return Err(CoinCollectionError::InvalidName(format!(
                "{} is already used by {}",
                name, existing
            )));
        }
        Ok(())
    }

    fn create_table(conn: &Connection, name: &str) -> Result<()> {
        conn.execute(
            &format!(
                "CREATE TABLE {} (
                    _id             INTEGER PRIMARY KEY AUTOINCREMENT,
                    identifier      TEXT NOT NULL,
                    mint            TEXT NOT NULL DEFAULT '',
                    collected       INTEGER NOT NULL DEFAULT 0,
                    grade           INTEGER NOT NULL DEFAULT 0,
                    quantity        INTEGER NOT NULL DEFAULT 0,
                    notes           TEXT NOT NULL DEFAULT '',
                    display_index   INTEGER NOT NULL,
                    image_id        INTEGER
                )",
                quote(name)
            ),
            [],
        )?;
        Ok(())
    }

    fn insert_slot(conn: &Connection, table: &str, slot: &CoinSlot) -> Result<()> {
        conn.execute(
            &format!("INSERT INTO {} ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)", quote(table), SLOT_COLUMNS),
            params![
                slot.identifier,
                slot.mint,
                slot.collected,
                slot.grade,
                slot.quantity,
                slot.notes,
                slot.display_index,
                slot.image_variant,
            ],
        )?;
        Ok(())
    }

    fn insert_record(conn: &Connection, record: &CollectionRecord) -> Result<()> {
        conn.execute(
            &format!("INSERT INTO collection_info ({}) VALUES (?1, ?2, ?3, ?4, ?5)", RECORD_COLUMNS),
            params![
                record.name,
                record.series_type,
                record.total,
                record.display_order,
                record.view_mode.as_u32(),
            ],
        )?;
        Ok(())
    }

    /// Creates the collection table, fills it and registers it
    pub fn create_collection(&mut self, record: &CollectionRecord, slots: &[CoinSlot]) -> Result<()> {
        let tx = self.conn.transaction()?;
        Self::create_table(&tx, &record.name)?;
        for slot in slots {
            Self::insert_slot(&tx, &record.name, slot)?;
        }
        Self::insert_record(&tx, record)?;
        tx.commit()?;
        debug!("Created table for {} with {} slots", record.name, slots.len());
        Ok(())
    }

    pub fn append_slot(&self, table: &str, slot: &CoinSlot) -> Result<()> {
        Self::insert_slot(&self.conn, table, slot)
    }

    /// Writes the user state of the slot with the same identifier and mint.
    /// Returns false when no such slot exists.
    pub fn update_slot(&self, table: &str, slot: &CoinSlot) -> Result<bool> {
        let changed = self.conn.execute(
            &format!(
                "UPDATE {} SET collected = ?1, grade = ?2, quantity = ?3, notes = ?4
                 WHERE identifier = ?5 AND mint = ?6",
                quote(table)
            ),
            params![
                slot.collected,
                slot.grade,
                slot.quantity,
                slot.notes,
                slot.identifier,
                slot.mint,
            ],
        )?;
        Ok(changed > 0)
    }

    pub fn fetch_slot(&self, table: &str, identifier: &str, mint: &str) -> Result<Option<CoinSlot>> {
        let slot = self
            .conn
            .query_row(
                &format!(
                    "SELECT {} FROM {} WHERE identifier = ?1 AND mint = ?2",
                    SLOT_COLUMNS,
                    quote(table)
                ),
                params![identifier, mint],
                slot_from_row,
            )
            .optional()?;
        Ok(slot)
    }

    /// Flips the collected flag and returns the new value
    pub fn toggle_collected(&self, table: &str, identifier: &str, mint: &str) -> Result<bool> {
        let mut slot = self
            .fetch_slot(table, identifier, mint)?
            .ok_or_else(|| CoinCollectionError::SlotNotFound {
                collection: table.to_string(),
                identifier: identifier.to_string(),
                mint: mint.to_string(),
            })?;
        slot.collected = !slot.collected;
        self.update_slot(table, &slot)?;
        Ok(slot.collected)
    }

    /// Slots in display order
    pub fn fetch_slots(&self, table: &str) -> Result<Vec<CoinSlot>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM {} ORDER BY display_index",
            SLOT_COLUMNS,
            quote(table)
        ))?;
        let slots = stmt
            .query_map([], slot_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(slots)
    }

    pub fn collected_count(&self, table: &str) -> Result<u32> {
        let count: u32 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {} WHERE collected = 1", quote(table)),
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn collection(&self, name: &str) -> Result<CollectionRecord> {
        self.conn
            .query_row(
                &format!("SELECT {} FROM collection_info WHERE name = ?1", RECORD_COLUMNS),
                params![name],
                record_from_row,
            )
            .optional()?
            .ok_or_else(|| CoinCollectionError::CollectionNotFound(name.to_string()))
    }

    /// Registered collections in display order
    pub fn list_collections(&self) -> Result<Vec<CollectionRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM collection_info ORDER BY display_order, _id",
            RECORD_COLUMNS
        ))?;
        let records = stmt
            .query_map([], record_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    pub fn rename_collection(&mut self, old_name: &str, new_name: &str) -> Result<()> {
        let tx = self.conn.transaction()?;
        // SQLite table names ignore case, so a case-only rename goes through a temporary name
        if old_name.eq_ignore_ascii_case(new_name) {
            let temporary = format!("{}_renaming", old_name);
            tx.execute(
                &format!("ALTER TABLE {} RENAME TO {}", quote(old_name), quote(&temporary)),
                [],
            )?;
            tx.execute(
                &format!("ALTER TABLE {} RENAME TO {}", quote(&temporary), quote(new_name)),
                [],
            )?;
        } else {
            tx.execute(
                &format!("ALTER TABLE {} RENAME TO {}", quote(old_name), quote(new_name)),
                [],
            )?;
        }
        tx.execute(
            "UPDATE collection_info SET name = ?1 WHERE name = ?2",
            params![new_name, old_name],
        )?;
        tx.commit()?;
        Ok(())
    }

    pub fn drop_collection(&mut self, name: &str) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute(&format!("DROP TABLE IF EXISTS {}", quote(name)), [])?;
        tx.execute("DELETE FROM collection_info WHERE name = ?1", params![name])?;
        tx.commit()?;
        Ok(())
    }

    fn update_info(&self, name: &str, column: &str, value: u32) -> Result<()> {
        let changed = self.conn.execute(
            &format!("UPDATE collection_info SET {} = ?1 WHERE name = ?2", column),
            params![value, name],
        )?;
        if changed == 0 {
            return Err(CoinCollectionError::CollectionNotFound(name.to_string()));
        }
        Ok(())
    }

    pub fn set_total(&self, name: &str, total: u32) -> Result<()> {
        self.update_info(name, "total", total)
    }

    pub fn set_view_mode(&self, name: &str, view_mode: ViewMode) -> Result<()> {
        self.update_info(name, "view_mode", view_mode.as_u32())
    }

    pub fn set_display_order(&self, name: &str, display_order: u32) -> Result<()> {
        self.update_info(name, "display_order", display_order)
    }

    /// Display order for a collection added at the end of the list
    pub fn next_display_order(&self) -> Result<u32> {
        let next: u32 = self.conn.query_row(
            "SELECT COALESCE(MAX(display_order) + 1, 0) FROM collection_info",
            [],
            |row| row.get(0),
        )?;
        Ok(next)
    }

    /// Drops every collection and writes the given ones in a single transaction
    pub fn replace_all(&mut self, collections: &[(CollectionRecord, Vec<CoinSlot>)]) -> Result<()> {
        let existing = self.list_collections()?;
        let tx = self.conn.transaction()?;
        for record in &existing {
            tx.execute(&format!("DROP TABLE IF EXISTS {}", quote(&record.name)), [])?;
        }
        tx.execute("DELETE FROM collection_info", [])?;
        for (record, slots) in collections {
            Self::create_table(&tx, &record.name)?;
            for slot in slots {
                Self::insert_slot(&tx, &record.name, slot)?;
            }
            Self::insert_record(&tx, record)?;
        }
        tx.commit()?;
        info!(
            "Replaced {} collection(s) with {}",
            existing.len(),
            collections.len()
        );
        Ok(())
    }

    /// Sink appending to one collection table
    pub fn table_sink<'a>(&'a self, table: &str) -> TableSink<'a> {
        TableSink {
            db: self,
            table: table.to_string(),
        }
    }
}

/// Writes upgrade slots straight into a collection table
pub struct TableSink<'a> {
    db: &'a Database,
    table: String,
}

impl SlotSink for TableSink<'_> {
    fn append_slot(&mut self, slot: &CoinSlot) -> std::result::Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.db.append_slot(&self.table, slot)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coin_collection_common::SlotList;

    fn record(name: &str, total: u32, display_order: u32) -> CollectionRecord {
        CollectionRecord {
            name: name.to_string(),
            series_type: "Nickels".to_string(),
            total,
            display_order,
            view_mode: ViewMode::Simple,
        }
    }

    fn slots() -> Vec<CoinSlot> {
        let mut list = SlotList::new();
        list.push("1938", "");
        list.push("1938", "D");
        list.push_with_image("1939", "", 2);
        list.into_vec()
    }

    #[test]
    fn test_create_and_fetch() {
        let mut db = Database::open_in_memory().expect("open");
        db.create_collection(&record("My Nickels", 3, 0), &slots()).expect("create");

        let fetched = db.fetch_slots("My Nickels").expect("fetch");
        assert_eq!(fetched, slots());
        assert_eq!(db.collection("My Nickels").expect("record").total, 3);
    }

    #[test]
    fn test_schema_version_roundtrip() {
        let db = Database::open_in_memory().expect("open");
        assert_eq!(db.schema_version().expect("version"), 0);
        db.set_schema_version(14).expect("set");
        assert_eq!(db.schema_version().expect("version"), 14);
    }

    #[test]
    fn test_toggle_and_count() {
        let mut db = Database::open_in_memory().expect("open");
        db.create_collection(&record("N", 3, 0), &slots()).expect("create");

        assert!(db.toggle_collected("N", "1938", "D").expect("toggle"));
        assert_eq!(db.collected_count("N").expect("count"), 1);
        assert!(!db.toggle_collected("N", "1938", "D").expect("toggle"));
        assert_eq!(db.collected_count("N").expect("count"), 0);

        let missing = db.toggle_collected("N", "1938", "S").unwrap_err();
        assert!(matches!(missing, CoinCollectionError::SlotNotFound { .. }));
    }

    #[test]
    fn test_name_checks() {
        let mut db = Database::open_in_memory().expect("open");
        db.create_collection(&record("Nickels", 0, 0), &[]).expect("create");

        assert!(db.check_collection_name("Dimes").is_ok());
        for bad in [
            "",
            "  ",
            "NICKELS",
            "collection_info",
            "a[b]",
            "a,b",
            "sqlite_master",
            "SQLITE_x",
            "a_SL_b",
        ] {
            assert!(
                matches!(db.check_collection_name(bad), Err(CoinCollectionError::InvalidName(_))),
                "{:?} accepted",
                bad
            );
        }
    }

    #[test]
    fn test_quoted_names() {
        let mut db = Database::open_in_memory().expect("open");
        let name = "Dad's \"lucky\" nickels 1938-2020";
        db.create_collection(&record(name, 3, 0), &slots()).expect("create");
        assert_eq!(db.fetch_slots(name).expect("fetch").len(), 3);
    }

    #[test]
    fn test_rename_and_drop() {
        let mut db = Database::open_in_memory().expect("open");
        db.create_collection(&record("Old", 3, 0), &slots()).expect("create");

        db.rename_collection("Old", "New").expect("rename");
        assert!(db.collection("Old").is_err());
        assert_eq!(db.fetch_slots("New").expect("fetch").len(), 3);

        db.drop_collection("New").expect("drop");
        assert!(db.list_collections().expect("list").is_empty());
    }

    #[test]
    fn test_display_order() {
        let mut db = Database::open_in_memory().expect("open");
        assert_eq!(db.next_display_order().expect("next"), 0);
        db.create_collection(&record("A", 0, 0), &[]).expect("create");
        db.create_collection(&record("B", 0, 1), &[]).expect("create");
        assert_eq!(db.next_display_order().expect("next"), 2);

        db.set_display_order("A", 5).expect("order");
        let names: Vec<_> = db
            .list_collections()
            .expect("list")
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["B", "A"]);
    }

    #[test]
    fn test_update_info_unknown_collection() {
        let db = Database::open_in_memory().expect("open");
        let result = db.set_view_mode("Nope", ViewMode::Advanced);
        assert!(matches!(result, Err(CoinCollectionError::CollectionNotFound(_))));
    }

    #[test]
    fn test_table_sink() {
        let mut db = Database::open_in_memory().expect("open");
        db.create_collection(&record("N", 0, 0), &[]).expect("create");
        let mut sink = db.table_sink("N");
        sink.append_slot(&CoinSlot::new("2013", "P", 0)).expect("append");

        let mut missing = db.table_sink("Missing");
        assert!(missing.append_slot(&CoinSlot::new("2013", "P", 0)).is_err());
        assert_eq!(db.fetch_slots("N").expect("fetch").len(), 1);
    }

    #[test]
    fn test_replace_all() {
        let mut db = Database::open_in_memory().expect("open");
        db.create_collection(&record("Gone", 3, 0), &slots()).expect("create");

        db.replace_all(&[(record("Kept", 3, 0), slots())]).expect("replace");

        let names: Vec<_> = db.list_collections().expect("list").into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Kept"]);
        assert!(db.fetch_slots("Gone").is_err());
    }
}
