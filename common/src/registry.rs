//! Collection definition registry
//!
//! Maps a collection type name to its static description and generator.
//! The built-in catalogue is assembled once and read from everywhere.

use crate::error::{Error, Result};
use crate::migration::SlotSink;
use crate::options::{CollectionOptions, DeclaredOptions, StopYear};
use crate::series::{self, ImageContext, ImageRef, SeriesGenerator};
use crate::slot::{CoinSlot, SlotKey};
use serde::Serialize;
use std::collections::HashMap;

/// Static description of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesInfo {
    /// Unique key stored with every collection
    pub type_name: &'static str,
    pub start_year: i32,
    pub stop_year: StopYear,
    /// Representative image shown in collection lists
    pub image: ImageRef,
    /// String resource crediting the image source
    pub attribution: &'static str,
}

/// A series description bound to its generator
pub struct CollectionDefinition {
    info: SeriesInfo,
    generator: Box<dyn SeriesGenerator>,
}

impl std::fmt::Debug for CollectionDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionDefinition")
            .field("info", &self.info)
            .finish_non_exhaustive()
    }
}

impl CollectionDefinition {
    pub fn new(info: SeriesInfo, generator: impl SeriesGenerator + 'static) -> Self {
        Self {
            info,
            generator: Box::new(generator),
        }
    }

    pub fn info(&self) -> &SeriesInfo {
        &self.info
    }

    pub fn type_name(&self) -> &'static str {
        self.info.type_name
    }

    /// Inclusive year bounds, resolving "still in production"
    pub fn year_bounds(&self, current_year: i32) -> (i32, i32) {
        (self.info.start_year, self.info.stop_year.resolve(current_year))
    }

    pub fn declare_options(&self, current_year: i32) -> DeclaredOptions {
        self.generator.declare_options(current_year)
    }

    /// Rejects year ranges outside the series bounds
    pub fn validate(&self, options: &CollectionOptions, current_year: i32) -> Result<()> {
        if options.start_year > options.stop_year {
            return Err(Error::InvertedYearRange {
                start: options.start_year,
                stop: options.stop_year,
            });
        }
        let (min, max) = self.year_bounds(current_year);
        if options.start_year < min || options.stop_year > max {
            return Err(Error::YearOutOfBounds {
                series: self.info.type_name.to_string(),
                start: options.start_year,
                stop: options.stop_year,
                min,
                max,
            });
        }
        Ok(())
    }

    /// Validated generation for a new collection
    pub fn create_slots(&self, options: &CollectionOptions, current_year: i32) -> Result<Vec<CoinSlot>> {
        self.validate(options, current_year)?;
        Ok(self.generator.generate(options))
    }

    /// Generation without bounds checks
    pub fn generate(&self, options: &CollectionOptions) -> Vec<CoinSlot> {
        self.generator.generate(options)
    }

    /// Fills in image variants for slots that lost them, e.g. after an import.
    /// Returns the number of slots updated.
    pub fn restore_image_variants(&self, slots: &mut [CoinSlot], current_year: i32) -> usize {
        let (start, stop) = self.year_bounds(current_year);
        let everything = CollectionOptions::everything(start, stop);
        let without_marks = everything.clone().with_mint_marks(false);

        let mut variants: HashMap<SlotKey, u32> = HashMap::new();
        for options in [everything, without_marks] {
            for slot in self.generator.generate(&options) {
                if let Some(variant) = slot.image_variant {
                    variants.entry(slot.key()).or_insert(variant);
                }
            }
        }
        if variants.is_empty() {
            return 0;
        }

        let mut restored = 0;
        for slot in slots.iter_mut().filter(|slot| slot.image_variant.is_none()) {
            if let Some(variant) = variants.get(&slot.key()) {
                slot.image_variant = Some(*variant);
                restored += 1;
            }
        }
        restored
    }

    pub fn resolve_image(&self, slot: &CoinSlot, context: ImageContext) -> ImageRef {
        self.generator.resolve_image(slot, context)
    }

    /// Runs the series' upgrade hook. Returns the number of slots added.
    pub fn upgrade(&self, old_version: u32, existing: &[CoinSlot], sink: &mut dyn SlotSink) -> usize {
        self.generator.upgrade(old_version, existing, sink)
    }
}

/// Type name to definition mapping, in display order
#[derive(Debug, Default)]
pub struct Registry {
    definitions: Vec<CollectionDefinition>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every series this build knows about
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(CollectionDefinition::new(series::jefferson_nickels::INFO, series::JeffersonNickels));
        registry.register(CollectionDefinition::new(series::trimes::INFO, series::Trimes));
        registry.register(CollectionDefinition::new(series::half_dimes::INFO, series::HalfDimes));
        registry.register(CollectionDefinition::new(series::early_dimes::INFO, series::EarlyDimes));
        registry.register(CollectionDefinition::new(series::clad_dimes::INFO, series::CladDimes));
        registry.register(CollectionDefinition::new(
            series::native_american_dollars::INFO,
            series::NativeAmericanDollars,
        ));
        registry.register(CollectionDefinition::new(series::early_dollars::INFO, series::EarlyDollars));
        registry
    }

    /// Adds a definition, replacing one with the same type name
    pub fn register(&mut self, definition: CollectionDefinition) {
        match self
            .definitions
            .iter_mut()
            .find(|d| d.type_name() == definition.type_name())
        {
            Some(existing) => *existing = definition,
            None => self.definitions.push(definition),
        }
    }

    pub fn lookup(&self, type_name: &str) -> Result<&CollectionDefinition> {
        self.definitions
            .iter()
            .find(|d| d.type_name() == type_name)
            .ok_or_else(|| Error::UnknownSeries(type_name.to_string()))
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.lookup(type_name).is_ok()
    }

    pub fn list_all(&self) -> &[CollectionDefinition] {
        &self.definitions
    }

    pub fn type_names(&self) -> Vec<&'static str> {
        self.definitions.iter().map(|d| d.type_name()).collect()
    }
}

lazy_static::lazy_static! {
    static ref BUILTIN: Registry = Registry::builtin();
}

/// Process-wide built-in registry
pub fn registry() -> &'static Registry {
    &BUILTIN
}
