//! Sacagawea / Native American Dollars (2000 - present)

use super::{paired_image, ImageContext, ImageRef, SeriesGenerator};
use crate::migration::MigrationStep;
use crate::options::{CollectionOptions, DeclaredOptions, OptionSlot, StopYear};
use crate::registry::SeriesInfo;
use crate::series::jefferson_nickels;
use crate::slot::{CoinSlot, SlotList};

pub const COLLECTION_TYPE: &str = "Sacagawea/Native American Dollars";
pub const START_YEAR: i32 = 2000;
pub const STOP_YEAR: StopYear = StopYear::StillInProduction;

pub const INFO: SeriesInfo = SeriesInfo {
    type_name: COLLECTION_TYPE,
    start_year: START_YEAR,
    stop_year: STOP_YEAR,
    image: ImageRef("rev_sacagawea_unc"),
    attribution: "attr_mint",
};

const SHOW_P: OptionSlot = OptionSlot::MintMark1;
const SHOW_D: OptionSlot = OptionSlot::MintMark2;

/// Yearly reverse designs, collected and missing
const NATIVE_IMAGES: &[(&str, ImageRef, ImageRef)] = &[
    ("2009", ImageRef("native_2009_unc"), ImageRef("native_2009_unc_25")),
    ("2010", ImageRef("native_2010_unc"), ImageRef("native_2010_unc_25")),
    ("2011", ImageRef("native_2011_unc"), ImageRef("native_2011_unc_25")),
    ("2012", ImageRef("native_2012_unc"), ImageRef("native_2012_unc_25")),
    ("2013", ImageRef("native_2013_proof"), ImageRef("native_2013_proof_25")),
    ("2014", ImageRef("native_2014_unc"), ImageRef("native_2014_unc_25")),
    ("2015", ImageRef("native_2015_unc"), ImageRef("native_2015_unc_25")),
    ("2016", ImageRef("native_2016_unc"), ImageRef("native_2016_unc_25")),
    ("2017", ImageRef("native_2017_line_art"), ImageRef("native_2017_line_art_25")),
];

const OBVERSE_IMAGE_COLLECTED: ImageRef = ImageRef("obv_sacagawea_unc");
const OBVERSE_IMAGE_MISSING: ImageRef = ImageRef("obv_sacagawea_unc_25");

pub struct NativeAmericanDollars;

impl SeriesGenerator for NativeAmericanDollars {
    fn declare_options(&self, current_year: i32) -> DeclaredOptions {
        DeclaredOptions::new(CollectionOptions::new(START_YEAR, STOP_YEAR.resolve(current_year)))
            .field(SHOW_P, true, "include_p")
            .field(SHOW_D, false, "include_d")
    }

    fn generate(&self, options: &CollectionOptions) -> Vec<CoinSlot> {
        let show_p = options.get(SHOW_P);
        let show_d = options.get(SHOW_D);
        let mut slots = SlotList::new();

        for year in options.years() {
            let id = year.to_string();
            if !options.show_mint_marks {
                slots.push(id, "");
                continue;
            }
            if show_p {
                slots.push(id.as_str(), "P");
            }
            if show_d {
                slots.push(id.as_str(), "D");
            }
        }
        slots.into_vec()
    }

    fn resolve_image(&self, slot: &CoinSlot, context: ImageContext) -> ImageRef {
        paired_image(
            NATIVE_IMAGES,
            slot,
            context,
            (OBVERSE_IMAGE_COLLECTED, OBVERSE_IMAGE_MISSING),
        )
    }

    // New years arrived in the same releases as the nickels
    fn migration_steps(&self) -> &'static [MigrationStep] {
        jefferson_nickels::YEARLY_ADDITIONS
    }
}
