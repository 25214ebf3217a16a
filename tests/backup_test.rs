//! Backup export/import tests
//!
//! Round trips through a real directory and the rejections that must leave
//! the database untouched.

use coin_collection::backup::{export_collections, import_collections};
use coin_collection::error::CoinCollectionError;
use coin_collection::manager::{self, SlotUpdate};
use coin_collection::store::{CollectionRecord, Database, ViewMode};
use coin_collection_common::backup::{BackupError, MANIFEST_FILE, VERSION_FILE};
use coin_collection_common::{registry, CollectionOptions, OptionSlot, SCHEMA_VERSION};
use std::fs;
use tempfile::tempdir;

const YEAR: i32 = 2020;

fn sample_database() -> Database {
    let mut db = Database::open_in_memory().expect("Failed to open database");
    manager::migrate(&db, registry()).expect("Failed to stamp version");

    let nickels = CollectionOptions::new(1938, 2020)
        .with_mint_marks(true)
        .with(OptionSlot::MintMark1, true)
        .with(OptionSlot::MintMark2, true);
    manager::create_collection(&mut db, registry(), "Nickels", "Nickels", &nickels, YEAR).expect("create");

    let trimes = CollectionOptions::everything(1851, 1889);
    manager::create_collection(&mut db, registry(), "Three Cents 1851/1889", "Three Cents", &trimes, YEAR)
        .expect("create");

    manager::update_slot(
        &db,
        "Nickels",
        "1950",
        "D",
        SlotUpdate {
            collected: Some(true),
            grade: Some(7),
            quantity: Some(2),
            notes: Some("key date, [toned]\nfrom roll".to_string()),
        },
    )
    .expect("update");
    manager::toggle_slot(&db, "Three Cents 1851/1889", "1865", "Nickel").expect("toggle");
    manager::set_view_mode(&db, "Nickels", ViewMode::Advanced).expect("view");
    db
}

/// Export then import reproduces every slot and the list metadata
#[test]
fn test_roundtrip() {
    let dir = tempdir().expect("Failed to create temp dir");
    let source = sample_database();

    assert_eq!(export_collections(&source, dir.path()).expect("export"), 2);
    assert!(dir.path().join("Three Cents 1851_SL_1889.csv").is_file());

    let mut target = Database::open_in_memory().expect("Failed to open database");
    let summary = import_collections(&mut target, registry(), dir.path(), YEAR).expect("import");

    assert_eq!(summary.collections, 2);
    assert_eq!(summary.version, SCHEMA_VERSION);
    assert_eq!(summary.upgraded, 0);
    assert_eq!(target.list_collections().expect("list"), source.list_collections().expect("list"));
    for record in source.list_collections().expect("list") {
        assert_eq!(
            target.fetch_slots(&record.name).expect("fetch"),
            source.fetch_slots(&record.name).expect("fetch"),
            "slots differ for {}",
            record.name
        );
    }
}

/// Files are newline separated without a trailing newline
#[test]
fn test_export_layout() {
    let dir = tempdir().expect("Failed to create temp dir");
    export_collections(&sample_database(), dir.path()).expect("export");

    let manifest = fs::read_to_string(dir.path().join(MANIFEST_FILE)).expect("manifest");
    assert_eq!(
        manifest,
        "Nickels,Nickels,1,164,1\nThree Cents 1851/1889,Three Cents,1,49,0"
    );
    let version = fs::read_to_string(dir.path().join(VERSION_FILE)).expect("version");
    assert_eq!(version, SCHEMA_VERSION.to_string());

    let nickels = fs::read_to_string(dir.path().join("Nickels.csv")).expect("collection");
    assert!(!nickels.ends_with('\n'));
    assert!(nickels.starts_with("1938,,0,0,0,\n1938,D,0,0,0,"));
    assert!(nickels.contains("1950,D,1,7,2,key date_CM_ _LB_toned_RB__NL_from roll"));
}

/// Notes that already hold escape sequences come back unchanged
#[test]
fn test_roundtrip_notes_with_escape_sequences() {
    let dir = tempdir().expect("Failed to create temp dir");
    let source = sample_database();
    for (identifier, notes) in [("1939", "bag _CM_ 12"), ("1940", "mint_set_NL_, twice"), ("1941", "_US_")] {
        let update = SlotUpdate {
            notes: Some(notes.to_string()),
            ..Default::default()
        };
        manager::update_slot(&source, "Nickels", identifier, "D", update).expect("update");
    }
    export_collections(&source, dir.path()).expect("export");

    let mut target = Database::open_in_memory().expect("Failed to open database");
    import_collections(&mut target, registry(), dir.path(), YEAR).expect("import");

    assert_eq!(
        target.fetch_slots("Nickels").expect("fetch"),
        source.fetch_slots("Nickels").expect("fetch")
    );
    let slot = target.fetch_slot("Nickels", "1939", "D").expect("fetch").expect("present");
    assert_eq!(slot.notes, "bag _CM_ 12");
}

/// Two collections mapping to one backup file stop the export before any write
#[test]
fn test_export_refuses_shared_file_name() {
    let dir = tempdir().expect("Failed to create temp dir");
    let mut db = sample_database();
    let options = CollectionOptions::everything(1851, 1889);

    let rejected = manager::create_collection(
        &mut db,
        registry(),
        "Three Cents 1851_SL_1889",
        "Three Cents",
        &options,
        YEAR,
    )
    .unwrap_err();
    assert!(matches!(rejected, CoinCollectionError::InvalidName(_)));

    // A database written before the name rule existed can still hold one
    let record = CollectionRecord {
        name: "Three Cents 1851_SL_1889".to_string(),
        series_type: "Three Cents".to_string(),
        total: 0,
        display_order: 2,
        view_mode: ViewMode::Simple,
    };
    db.create_collection(&record, &[]).expect("create");

    let export = dir.path().join("backup");
    let error = export_collections(&db, &export).unwrap_err();
    assert!(matches!(
        backup_error(&error),
        Some(BackupError::FileNameClash { file, .. }) if file == "Three Cents 1851_SL_1889.csv"
    ));
    assert!(!export.exists());
}

/// An older backup is upgraded after import
#[test]
fn test_import_upgrades_old_backup() {
    let dir = tempdir().expect("Failed to create temp dir");
    let rows: Vec<String> = (2000..=2012).map(|year| format!("{},,0,0,0,", year)).collect();
    fs::write(dir.path().join(VERSION_FILE), "2").expect("write");
    fs::write(
        dir.path().join(MANIFEST_FILE),
        "Dollars,Sacagawea/Native American Dollars,0,13,0",
    )
    .expect("write");
    fs::write(dir.path().join("Dollars.csv"), rows.join("\n")).expect("write");

    let mut db = Database::open_in_memory().expect("Failed to open database");
    let summary = import_collections(&mut db, registry(), dir.path(), YEAR).expect("import");

    assert_eq!(summary.upgraded, 8);
    assert_eq!(db.collection("Dollars").expect("record").total, 21);
    assert_eq!(db.fetch_slots("Dollars").expect("fetch").len(), 21);
    assert_eq!(db.schema_version().expect("version"), SCHEMA_VERSION);
}

/// Image variants dropped by the file format are restored
#[test]
fn test_import_restores_image_variants() {
    let dir = tempdir().expect("Failed to create temp dir");
    let source = sample_database();
    export_collections(&source, dir.path()).expect("export");

    let mut target = Database::open_in_memory().expect("Failed to open database");
    import_collections(&mut target, registry(), dir.path(), YEAR).expect("import");

    let slot = target
        .fetch_slot("Three Cents 1851/1889", "1865", "Nickel")
        .expect("fetch")
        .expect("present");
    assert_eq!(slot.image_variant, Some(1));
}

fn assert_rejected(files: &[(&str, &str)], expected: impl Fn(&CoinCollectionError) -> bool) {
    let dir = tempdir().expect("Failed to create temp dir");
    for (name, content) in files {
        fs::write(dir.path().join(name), content).expect("write");
    }
    let mut db = sample_database();
    let before = db.list_collections().expect("list");

    let error = import_collections(&mut db, registry(), dir.path(), YEAR).unwrap_err();

    assert!(expected(&error), "unexpected error: {}", error);
    assert_eq!(db.list_collections().expect("list"), before);
    assert_eq!(db.fetch_slots("Nickels").expect("fetch").len(), 164);
}

fn backup_error(error: &CoinCollectionError) -> Option<&BackupError> {
    match error {
        CoinCollectionError::Common(coin_collection_common::Error::Backup(e)) => Some(e),
        _ => None,
    }
}

#[test]
fn test_rejects_row_count_mismatch() {
    assert_rejected(
        &[
            (VERSION_FILE, "14"),
            (MANIFEST_FILE, "Small,Three Cents,0,3,0"),
            ("Small.csv", "1851,Silver,0,0,0,\n1851,O Silver,0,0,0,"),
        ],
        |e| matches!(backup_error(e), Some(BackupError::RowCountMismatch { declared: 3, found: 2, .. })),
    );
}

#[test]
fn test_rejects_unknown_type() {
    assert_rejected(
        &[(VERSION_FILE, "14"), (MANIFEST_FILE, "Pennies,Lincoln Cents,0,0,0")],
        |e| matches!(backup_error(e), Some(BackupError::UnknownSeries { .. })),
    );
}

#[test]
fn test_rejects_duplicate_names() {
    assert_rejected(
        &[
            (VERSION_FILE, "14"),
            (MANIFEST_FILE, "A,Three Cents,0,0,0\nA,Three Cents,0,0,0"),
            ("A.csv", ""),
        ],
        |e| matches!(backup_error(e), Some(BackupError::DuplicateName(_))),
    );
}

#[test]
fn test_rejects_reserved_names() {
    for name in ["collection_info", "sqlite_master"] {
        let manifest = format!("{},Three Cents,0,0,0", name);
        let file = format!("{}.csv", name);
        assert_rejected(
            &[(VERSION_FILE, "14"), (MANIFEST_FILE, manifest.as_str()), (file.as_str(), "")],
            |e| matches!(backup_error(e), Some(BackupError::InvalidName(_))),
        );
    }
}

#[test]
fn test_rejects_negative_count() {
    assert_rejected(
        &[(VERSION_FILE, "14"), (MANIFEST_FILE, "A,Three Cents,-2,0,0")],
        |e| matches!(backup_error(e), Some(BackupError::NegativeCount { .. })),
    );
}

#[test]
fn test_rejects_bad_row() {
    assert_rejected(
        &[
            (VERSION_FILE, "14"),
            (MANIFEST_FILE, "A,Three Cents,0,1,0"),
            ("A.csv", "1851,Silver,0,0"),
        ],
        |e| matches!(backup_error(e), Some(BackupError::FieldCount { found: 4, .. })),
    );
}

#[test]
fn test_rejects_missing_files() {
    assert_rejected(&[(MANIFEST_FILE, "")], |e| {
        matches!(backup_error(e), Some(BackupError::MissingFile(_)))
    });
    assert_rejected(
        &[(VERSION_FILE, "14"), (MANIFEST_FILE, "A,Three Cents,0,1,0")],
        |e| matches!(backup_error(e), Some(BackupError::MissingFile(path)) if path.ends_with("A.csv")),
    );
}

#[test]
fn test_rejects_bad_version() {
    assert_rejected(
        &[(VERSION_FILE, "-1"), (MANIFEST_FILE, "")],
        |e| matches!(backup_error(e), Some(BackupError::InvalidVersion(_))),
    );
}
