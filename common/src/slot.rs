//! Coin slot model
//!
//! A slot is one checklist entry of a collection. Its identity is the
//! (identifier, mint) pair; everything else is user state or presentation.

use serde::{Deserialize, Serialize};

/// One checklist entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CoinSlot {
    /// Primary key, usually the year
    pub identifier: String,
    /// Mint mark or variant label, may be empty
    pub mint: String,
    /// Position in generation order
    pub display_index: u32,
    /// Index into the series image table
    pub image_variant: Option<u32>,
    pub collected: bool,
    pub grade: u32,
    pub quantity: u32,
    pub notes: String,
}

/// Natural key used for diffing
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotKey {
    pub identifier: String,
    pub mint: String,
}

impl CoinSlot {
    pub fn new(identifier: impl Into<String>, mint: impl Into<String>, display_index: u32) -> Self {
        Self {
            identifier: identifier.into(),
            mint: mint.into(),
            display_index,
            ..Default::default()
        }
    }

    pub fn with_image(mut self, image_variant: u32) -> Self {
        self.image_variant = Some(image_variant);
        self
    }

    pub fn key(&self) -> SlotKey {
        SlotKey {
            identifier: self.identifier.clone(),
            mint: self.mint.clone(),
        }
    }

    /// Borrowed form of the key
    pub fn key_ref(&self) -> (&str, &str) {
        (&self.identifier, &self.mint)
    }

    /// True when both slots describe the same coin
    pub fn same_coin(&self, other: &CoinSlot) -> bool {
        self.key_ref() == other.key_ref()
    }

    /// Copy of this slot with the user-entered state cleared
    pub fn blank_copy(&self, display_index: u32) -> Self {
        Self {
            identifier: self.identifier.clone(),
            mint: self.mint.clone(),
            display_index,
            image_variant: self.image_variant,
            ..Default::default()
        }
    }
}

/// Builds a slot list, numbering slots in the order they are pushed
#[derive(Debug, Default)]
pub struct SlotList {
    slots: Vec<CoinSlot>,
}

impl SlotList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, identifier: impl Into<String>, mint: impl Into<String>) {
        let index = self.next_index();
        self.slots.push(CoinSlot::new(identifier, mint, index));
    }

    pub fn push_with_image(
        &mut self,
        identifier: impl Into<String>,
        mint: impl Into<String>,
        image_variant: u32,
    ) {
        let index = self.next_index();
        self.slots
            .push(CoinSlot::new(identifier, mint, index).with_image(image_variant));
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn into_vec(self) -> Vec<CoinSlot> {
        self.slots
    }

    fn next_index(&self) -> u32 {
        self.slots.len() as u32
    }
}
