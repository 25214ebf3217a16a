//! Three Cents (1851 - 1889)

use super::{table_image, ImageContext, ImageRef, SeriesGenerator};
use crate::options::{CollectionOptions, DeclaredOptions, OptionSlot, StopYear};
use crate::registry::SeriesInfo;
use crate::slot::{CoinSlot, SlotList};

pub const COLLECTION_TYPE: &str = "Three Cents";
pub const START_YEAR: i32 = 1851;
pub const STOP_YEAR: StopYear = StopYear::Year(1889);

const SILVER_IMAGE: ImageRef = ImageRef("annc_us_1854_3c_three_cent__silver__tyii_");
const NICKEL_IMAGE: ImageRef = ImageRef("annc_us_1865_3c_three_cent__nickel");

pub const INFO: SeriesInfo = SeriesInfo {
    type_name: COLLECTION_TYPE,
    start_year: START_YEAR,
    stop_year: STOP_YEAR,
    image: NICKEL_IMAGE,
    attribution: "attr_wikitrimes",
};

const SHOW_SILVER: OptionSlot = OptionSlot::Checkbox1;
const SHOW_NICKEL: OptionSlot = OptionSlot::Checkbox2;

const SILVER: u32 = 0;
const NICKEL: u32 = 1;

const IMAGE_TABLE: &[(&str, ImageRef)] = &[("Silver", SILVER_IMAGE), ("Nickel", NICKEL_IMAGE)];

/// Nickel years struck in proof only
const NICKEL_PROOF_YEARS: [i32; 3] = [1877, 1878, 1886];

pub struct Trimes;

impl SeriesGenerator for Trimes {
    fn declare_options(&self, current_year: i32) -> DeclaredOptions {
        DeclaredOptions::new(CollectionOptions::new(START_YEAR, STOP_YEAR.resolve(current_year)))
            .field(SHOW_SILVER, true, "include_silver")
            .field(SHOW_NICKEL, true, "include_nickel")
    }

    fn generate(&self, options: &CollectionOptions) -> Vec<CoinSlot> {
        let show_silver = options.get(SHOW_SILVER);
        let show_nickel = options.get(SHOW_NICKEL);
        let mut slots = SlotList::new();

        for year in options.years() {
            let id = year.to_string();
            let id = id.as_str();

            if show_silver {
                if year == 1851 {
                    slots.push_with_image(id, "Silver", SILVER);
                    slots.push_with_image(id, "O Silver", SILVER);
                }
                if year > 1851 && year < 1873 {
                    slots.push_with_image(id, "Silver", SILVER);
                }
                if year == 1873 {
                    slots.push_with_image(id, "Silver Proof", SILVER);
                }
            }
            if show_nickel && year > 1864 && year < 1890 {
                if NICKEL_PROOF_YEARS.contains(&year) {
                    slots.push_with_image(id, "Nickel Proof", NICKEL);
                } else {
                    slots.push_with_image(id, "Nickel", NICKEL);
                }
            }
        }
        slots.into_vec()
    }

    fn resolve_image(&self, slot: &CoinSlot, context: ImageContext) -> ImageRef {
        table_image(IMAGE_TABLE, IMAGE_TABLE, slot, context)
    }
}
