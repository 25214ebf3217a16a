//! Collection service operations
//!
//! Glue between the registry and the database: creation, schema upgrades
//! and the edits a user makes to a collection.

use crate::error::{CoinCollectionError, Result};
use crate::store::{CollectionRecord, Database, ViewMode};
use coin_collection_common::{
    CoinSlot, CollectionOptions, DeclaredOptions, OptionSlot, Registry, SCHEMA_VERSION,
};
use serde::Serialize;
use std::path::Path;
use tracing::{info, warn};

/// A collection with its collected count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionSummary {
    #[serde(flatten)]
    pub record: CollectionRecord,
    pub collected: u32,
}

/// Fields to change on one slot; `None` leaves a field as is
#[derive(Debug, Clone, Default)]
pub struct SlotUpdate {
    pub collected: Option<bool>,
    pub grade: Option<u32>,
    pub quantity: Option<u32>,
    pub notes: Option<String>,
}

/// Opens the database and upgrades it when it was written by an older build
pub fn open_database(path: &Path, registry: &Registry) -> Result<Database> {
    let db = Database::open(path)?;
    migrate(&db, registry)?;
    Ok(db)
}

/// Runs pending upgrades and stamps the current schema version
pub fn migrate(db: &Database, registry: &Registry) -> Result<usize> {
    let version = db.schema_version()?;
    let mut added = 0;
    if version > SCHEMA_VERSION {
        warn!(
            "Database version {} is newer than {}, leaving it untouched",
            version, SCHEMA_VERSION
        );
        return Ok(0);
    }
    if version != 0 && version < SCHEMA_VERSION {
        info!("Upgrading database from version {} to {}", version, SCHEMA_VERSION);
        added = upgrade_collections(db, registry, version)?;
    }
    if version != SCHEMA_VERSION {
        db.set_schema_version(SCHEMA_VERSION)?;
    }
    Ok(added)
}

/// Runs each collection's upgrade hook and keeps its cached total in step.
/// Returns the number of slots added across all collections.
pub fn upgrade_collections(db: &Database, registry: &Registry, old_version: u32) -> Result<usize> {
    let mut added = 0;
    for record in db.list_collections()? {
        let definition = match registry.lookup(&record.series_type) {
            Ok(definition) => definition,
            Err(e) => {
                warn!("Skipping {}: {}", record.name, e);
                continue;
            }
        };
        let existing = db.fetch_slots(&record.name)?;
        let mut sink = db.table_sink(&record.name);
        let count = definition.upgrade(old_version, &existing, &mut sink);
        if count > 0 {
            db.set_total(&record.name, record.total + count as u32)?;
            info!("Added {} slot(s) to {}", count, record.name);
        }
        added += count;
    }
    Ok(added)
}

/// Applies a toggle by its label key, e.g. `include_d`
pub fn apply_option(
    declared: &DeclaredOptions,
    options: &mut CollectionOptions,
    label: &str,
    value: bool,
) -> Result<()> {
    let slot: OptionSlot = declared
        .fields
        .iter()
        .find(|field| field.label == label)
        .map(|field| field.slot)
        .ok_or_else(|| {
            let known: Vec<_> = declared.fields.iter().map(|f| f.label).collect();
            CoinCollectionError::Config(format!(
                "Unknown option {} (expected one of: {})",
                label,
                known.join(", ")
            ))
        })?;
    options.set(slot, value);
    Ok(())
}

/// Generates and stores a new collection at the end of the list
pub fn create_collection(
    db: &mut Database,
    registry: &Registry,
    name: &str,
    series_type: &str,
    options: &CollectionOptions,
    current_year: i32,
) -> Result<CollectionRecord> {
    db.check_collection_name(name)?;
    let definition = registry.lookup(series_type)?;
    let slots = definition.create_slots(options, current_year)?;

    let record = CollectionRecord {
        name: name.to_string(),
        series_type: definition.type_name().to_string(),
        total: slots.len() as u32,
        display_order: db.next_display_order()?,
        view_mode: ViewMode::Simple,
    };
    db.create_collection(&record, &slots)?;
    info!("Created {} ({}) with {} slots", name, series_type, record.total);
    Ok(record)
}

pub fn list_collections(db: &Database) -> Result<Vec<CollectionSummary>> {
    db.list_collections()?
        .into_iter()
        .map(|record| {
            let collected = db.collected_count(&record.name)?;
            Ok(CollectionSummary { record, collected })
        })
        .collect()
}

/// Puts the named collections first, in the given order. Collections not
/// named keep their relative order after them.
pub fn reorder_collections(db: &Database, names: &[String]) -> Result<()> {
    let records = db.list_collections()?;
    for name in names {
        if !records.iter().any(|r| &r.name == name) {
            return Err(CoinCollectionError::CollectionNotFound(name.clone()));
        }
    }
    let rest = records.iter().map(|r| &r.name).filter(|name| !names.contains(*name));
    for (order, name) in names.iter().chain(rest).enumerate() {
        db.set_display_order(name, order as u32)?;
    }
    Ok(())
}

pub fn set_view_mode(db: &Database, name: &str, view_mode: ViewMode) -> Result<()> {
    db.set_view_mode(name, view_mode)
}

pub fn rename_collection(db: &mut Database, old_name: &str, new_name: &str) -> Result<()> {
    db.collection(old_name)?;
    // Changing only the case is allowed
    if !old_name.eq_ignore_ascii_case(new_name) {
        db.check_collection_name(new_name)?;
    } else if new_name == old_name {
        return Ok(());
    }
    db.rename_collection(old_name, new_name)?;
    info!("Renamed {} to {}", old_name, new_name);
    Ok(())
}

/// Drops a collection and closes the gap in display order
pub fn delete_collection(db: &mut Database, name: &str) -> Result<()> {
    db.collection(name)?;
    db.drop_collection(name)?;
    for (order, record) in db.list_collections()?.iter().enumerate() {
        if record.display_order != order as u32 {
            db.set_display_order(&record.name, order as u32)?;
        }
    }
    info!("Deleted {}", name);
    Ok(())
}

pub fn toggle_slot(db: &Database, name: &str, identifier: &str, mint: &str) -> Result<bool> {
    db.collection(name)?;
    db.toggle_collected(name, identifier, mint)
}

/// Changes the user state of one slot and returns it
pub fn update_slot(
    db: &Database,
    name: &str,
    identifier: &str,
    mint: &str,
    update: SlotUpdate,
) -> Result<CoinSlot> {
    db.collection(name)?;
    let mut slot = db
        .fetch_slot(name, identifier, mint)?
        .ok_or_else(|| CoinCollectionError::SlotNotFound {
            collection: name.to_string(),
            identifier: identifier.to_string(),
            mint: mint.to_string(),
        })?;
    if let Some(collected) = update.collected {
        slot.collected = collected;
    }
    if let Some(grade) = update.grade {
        slot.grade = grade;
    }
    if let Some(quantity) = update.quantity {
        slot.quantity = quantity;
    }
    if let Some(notes) = update.notes {
        slot.notes = notes;
    }
    db.update_slot(name, &slot)?;
    Ok(slot)
}
