//! Coin Collection Common Library
//!
//! Slot model, series generators, registry, migration and backup format.
//! Nothing here touches the filesystem or a database.

pub mod backup;
pub mod error;
pub mod migration;
pub mod names;
pub mod options;
pub mod reconcile;
pub mod registry;
pub mod series;
pub mod slot;

pub use backup::{BackupError, BackupRow, ManifestEntry};
pub use error::{Error, Result};
pub use migration::{MigrationStep, SlotSink, SCHEMA_VERSION};
pub use names::{validate_name, NameError};
pub use options::{CollectionOptions, DeclaredOptions, OptionField, OptionSlot, StopYear};
pub use reconcile::{reconcile, reconcile_in_place};
pub use registry::{registry, CollectionDefinition, Registry, SeriesInfo};
pub use series::{ImageContext, ImageRef, SeriesGenerator};
pub use slot::{CoinSlot, SlotKey, SlotList};
