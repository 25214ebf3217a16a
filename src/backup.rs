//! Backup directory export and import

use crate::error::Result;
use crate::manager;
use crate::store::{CollectionRecord, Database, ViewMode};
use coin_collection_common::backup::{self, BackupError, ManifestEntry};
use coin_collection_common::{CoinSlot, Registry, SCHEMA_VERSION};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Outcome of an import
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub collections: usize,
    pub slots: usize,
    /// Version the backup was written under
    pub version: u32,
    /// Slots added by upgrading an older backup
    pub upgraded: usize,
}

fn read_file(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(BackupError::MissingFile(path.display().to_string()).into());
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Fails when two collections would be written to the same file
fn check_file_names(records: &[CollectionRecord]) -> Result<()> {
    let mut owners: HashMap<String, &str> = HashMap::new();
    for record in records {
        let file = backup::collection_file_name(&record.name);
        if let Some(first) = owners.insert(file.to_lowercase(), &record.name) {
            return Err(BackupError::FileNameClash {
                first: first.to_string(),
                second: record.name.clone(),
                file,
            }
            .into());
        }
    }
    Ok(())
}

/// Writes every collection into `dir`. Returns the number exported.
/// Nothing is written when two collections map to the same file.
pub fn export_collections(db: &Database, dir: &Path) -> Result<usize> {
    let records = db.list_collections()?;
    check_file_names(&records)?;
    std::fs::create_dir_all(dir)?;

    let mut entries = Vec::with_capacity(records.len());
    for record in &records {
        let slots = db.fetch_slots(&record.name)?;
        let entry = ManifestEntry {
            name: record.name.clone(),
            series_type: record.series_type.clone(),
            collected: slots.iter().filter(|s| s.collected).count() as u32,
            total: slots.len() as u32,
            view_mode: record.view_mode.as_u32(),
        };
        let path = dir.join(entry.file_name());
        std::fs::write(&path, backup::format_collection(&slots))?;
        debug!("Wrote {} slots to {}", slots.len(), path.display());
        entries.push(entry);
    }

    std::fs::write(dir.join(backup::MANIFEST_FILE), backup::format_manifest(&entries))?;
    std::fs::write(
        dir.join(backup::VERSION_FILE),
        backup::format_version(SCHEMA_VERSION),
    )?;
    info!("Exported {} collection(s) to {}", entries.len(), dir.display());
    Ok(entries.len())
}

/// Reads and checks every file of a backup without touching the database
pub fn read_backup(
    registry: &Registry,
    dir: &Path,
    current_year: i32,
) -> Result<(u32, Vec<(CollectionRecord, Vec<CoinSlot>)>)> {
    let version = backup::parse_version(&read_file(&dir.join(backup::VERSION_FILE))?)?;
    let entries = backup::parse_manifest(&read_file(&dir.join(backup::MANIFEST_FILE))?, registry)?;

    let mut collections = Vec::with_capacity(entries.len());
    for (order, entry) in entries.into_iter().enumerate() {
        let path: PathBuf = dir.join(entry.file_name());
        let mut slots = backup::parse_collection(&entry, &read_file(&path)?)?;
        let definition = registry.lookup(&entry.series_type)?;
        definition.restore_image_variants(&mut slots, current_year);

        let record = CollectionRecord {
            name: entry.name,
            series_type: entry.series_type,
            total: entry.total,
            display_order: order as u32,
            view_mode: ViewMode::from_u32(entry.view_mode),
        };
        collections.push((record, slots));
    }
    Ok((version, collections))
}

/// Replaces every collection with the contents of `dir`.
///
/// Nothing is written unless the whole backup is valid. Backups from older
/// versions are upgraded after they are stored.
pub fn import_collections(
    db: &mut Database,
    registry: &Registry,
    dir: &Path,
    current_year: i32,
) -> Result<ImportSummary> {
    let (version, collections) = read_backup(registry, dir, current_year)?;
    let slots = collections.iter().map(|(_, slots)| slots.len()).sum();

    db.replace_all(&collections)?;
    let upgraded = if version < SCHEMA_VERSION {
        manager::upgrade_collections(db, registry, version)?
    } else {
        0
    };
    db.set_schema_version(SCHEMA_VERSION)?;

    info!(
        "Imported {} collection(s) from {} (version {})",
        collections.len(),
        dir.display(),
        version
    );
    Ok(ImportSummary {
        collections: collections.len(),
        slots,
        version,
        upgraded,
    })
}
