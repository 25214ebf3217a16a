//! Schema version and the generic migration driver
//!
//! A series lists its content changes as [`MigrationStep`]s. Upgrading folds
//! the reconciler over every step newer than the persisted version, so each
//! step sees the slots appended by the steps before it.

use crate::reconcile::reconcile;
use crate::slot::CoinSlot;
use tracing::info;

/// Version written by this build
pub const SCHEMA_VERSION: u32 = 14;

/// Destination for slots added during an upgrade
pub trait SlotSink {
    fn append_slot(&mut self, slot: &CoinSlot) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

impl SlotSink for Vec<CoinSlot> {
    fn append_slot(&mut self, slot: &CoinSlot) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.push(slot.clone());
        Ok(())
    }
}

/// Adds a new year's coins to collections that already track the year before.
///
/// The step applies to collections persisted at `through_version` or older.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationStep {
    pub through_version: u32,
    pub year: i32,
}

impl MigrationStep {
    pub const fn new(through_version: u32, year: i32) -> Self {
        Self {
            through_version,
            year,
        }
    }

    /// True when upgrading from `old_version` to `new_version` crosses this step
    pub fn applies(&self, old_version: u32, new_version: u32) -> bool {
        old_version <= self.through_version && self.through_version < new_version
    }

    /// Slots for `year` mirroring every mint of the previous year present in `slots`
    pub fn fresh_slots(&self, slots: &[CoinSlot]) -> Vec<CoinSlot> {
        let previous = (self.year - 1).to_string();
        let year = self.year.to_string();
        slots
            .iter()
            .filter(|slot| slot.identifier == previous)
            .map(|slot| CoinSlot {
                identifier: year.clone(),
                mint: slot.mint.clone(),
                image_variant: slot.image_variant,
                ..Default::default()
            })
            .collect()
    }
}

/// Upgrades `existing` from `old_version` to [`SCHEMA_VERSION`].
/// Returns the number of slots written to `sink`.
pub fn upgrade(steps: &[MigrationStep], old_version: u32, existing: &[CoinSlot], sink: &mut dyn SlotSink) -> usize {
    upgrade_to(steps, old_version, SCHEMA_VERSION, existing, sink)
}

/// Upgrades `existing` across the steps between two versions
pub fn upgrade_to(
    steps: &[MigrationStep],
    old_version: u32,
    new_version: u32,
    existing: &[CoinSlot],
    sink: &mut dyn SlotSink,
) -> usize {
    let mut current = existing.to_vec();
    let mut added = 0;
    for step in steps.iter().filter(|step| step.applies(old_version, new_version)) {
        let fresh = step.fresh_slots(&current);
        let appended = reconcile(&current, &fresh, sink);
        if !appended.is_empty() {
            info!(
                "Schema {} -> {}: added {} slot(s) for {}",
                old_version,
                new_version,
                appended.len(),
                step.year
            );
        }
        added += appended.len();
        current.extend(appended);
    }
    added
}
