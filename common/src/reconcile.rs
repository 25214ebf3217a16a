//! Additive reconciliation of a persisted slot list against fresh output
//!
//! Existing slots are never removed, reordered or modified. Slots missing
//! from the persisted list are appended after it in the order they appear
//! in the fresh list.

use crate::migration::SlotSink;
use crate::slot::CoinSlot;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Appends every fresh slot whose (identifier, mint) key is absent from
/// `existing`, writing each one to `sink`.
///
/// Appended slots continue numbering after the highest existing display
/// index and carry blank user state. A slot the sink rejects is logged and
/// skipped without consuming an index. Returns the slots actually written.
pub fn reconcile(existing: &[CoinSlot], fresh: &[CoinSlot], sink: &mut dyn SlotSink) -> Vec<CoinSlot> {
    let mut known: HashSet<(&str, &str)> = existing.iter().map(CoinSlot::key_ref).collect();
    let mut next_index = existing
        .iter()
        .map(|slot| slot.display_index + 1)
        .max()
        .unwrap_or(0);

    let mut appended = Vec::new();
    for slot in fresh {
        if known.contains(&slot.key_ref()) {
            continue;
        }
        let new_slot = slot.blank_copy(next_index);
        match sink.append_slot(&new_slot) {
            Ok(()) => {
                known.insert(slot.key_ref());
                next_index += 1;
                appended.push(new_slot);
            }
            Err(e) => {
                warn!(
                    "Failed to add slot {} {}: {}",
                    new_slot.identifier, new_slot.mint, e
                );
            }
        }
    }

    if !appended.is_empty() {
        debug!("Reconciled {} new slot(s)", appended.len());
    }
    appended
}

/// In-memory form of [`reconcile`]: appends the missing slots to `slots`.
/// Returns the number appended.
pub fn reconcile_in_place(slots: &mut Vec<CoinSlot>, fresh: &[CoinSlot]) -> usize {
    let mut written: Vec<CoinSlot> = Vec::new();
    let appended = reconcile(slots, fresh, &mut written);
    slots.extend(appended);
    written.len()
}
