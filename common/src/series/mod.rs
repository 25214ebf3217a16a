//! Coin series generators
//!
//! Each series is a unit struct holding no state. Its module carries the
//! historical exception tables as constants and encodes them in `generate`.

pub mod clad_dimes;
pub mod early_dimes;
pub mod early_dollars;
pub mod half_dimes;
pub mod jefferson_nickels;
pub mod native_american_dollars;
pub mod trimes;

pub use clad_dimes::CladDimes;
pub use early_dimes::EarlyDimes;
pub use early_dollars::EarlyDollars;
pub use half_dimes::HalfDimes;
pub use jefferson_nickels::JeffersonNickels;
pub use native_american_dollars::NativeAmericanDollars;
pub use trimes::Trimes;

use crate::migration::{self, MigrationStep, SlotSink};
use crate::options::{CollectionOptions, DeclaredOptions};
use crate::slot::CoinSlot;
use serde::Serialize;

/// Name of a bundled image asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ImageRef(pub &'static str);

impl ImageRef {
    /// Placeholder drawn for slots not yet collected
    pub const OPEN_SLOT: ImageRef = ImageRef("openslot");

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

/// Flags that influence image selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImageContext {
    pub in_collection: bool,
    /// Look up by identifier even when the slot carries an image variant
    pub ignore_image_id: bool,
}

impl ImageContext {
    pub fn collected(in_collection: bool) -> Self {
        Self {
            in_collection,
            ignore_image_id: false,
        }
    }
}

/// Generation rules for one coin series
pub trait SeriesGenerator: Send + Sync {
    /// Default options plus the toggles this series reads
    fn declare_options(&self, current_year: i32) -> DeclaredOptions;

    /// Ordered slot list for the given options
    fn generate(&self, options: &CollectionOptions) -> Vec<CoinSlot>;

    fn resolve_image(&self, slot: &CoinSlot, context: ImageContext) -> ImageRef;

    /// Additive content changes, oldest first
    fn migration_steps(&self) -> &'static [MigrationStep] {
        &[]
    }

    /// Brings a collection persisted under `old_version` up to date.
    /// Returns the number of slots written to `sink`.
    fn upgrade(&self, old_version: u32, existing: &[CoinSlot], sink: &mut dyn SlotSink) -> usize {
        migration::upgrade(self.migration_steps(), old_version, existing, sink)
    }
}

/// Image lookup shared by the series with a numbered image table.
///
/// The slot's image variant wins unless ignored or out of range; otherwise
/// the identifier is looked up by name and the first entry is the fallback.
pub(crate) fn table_image(
    table: &[(&'static str, ImageRef)],
    by_identifier: &[(&'static str, ImageRef)],
    slot: &CoinSlot,
    context: ImageContext,
) -> ImageRef {
    if !context.ignore_image_id {
        if let Some(image) = slot
            .image_variant
            .and_then(|variant| table.get(variant as usize))
        {
            return image.1;
        }
    }
    by_identifier
        .iter()
        .find(|(name, _)| *name == slot.identifier)
        .or_else(|| by_identifier.first())
        .map(|(_, image)| *image)
        .unwrap_or(ImageRef::OPEN_SLOT)
}

/// Collected/missing pair lookup used by the modern series
pub(crate) fn paired_image(
    pairs: &[(&'static str, ImageRef, ImageRef)],
    slot: &CoinSlot,
    context: ImageContext,
    fallback: (ImageRef, ImageRef),
) -> ImageRef {
    let (collected, missing) = pairs
        .iter()
        .find(|(name, _, _)| *name == slot.identifier)
        .map(|(_, collected, missing)| (*collected, *missing))
        .unwrap_or(fallback);
    if context.in_collection {
        collected
    } else {
        missing
    }
}
