//! Clad Roosevelt Dimes (1965 - present)

use super::{ImageContext, ImageRef, SeriesGenerator};
use crate::options::{CollectionOptions, DeclaredOptions, OptionSlot, StopYear};
use crate::registry::SeriesInfo;
use crate::slot::{CoinSlot, SlotList};

pub const COLLECTION_TYPE: &str = "Clad Roosevelt Dimes";
pub const START_YEAR: i32 = 1965;
pub const STOP_YEAR: StopYear = StopYear::StillInProduction;

pub const INFO: SeriesInfo = SeriesInfo {
    type_name: COLLECTION_TYPE,
    start_year: START_YEAR,
    stop_year: STOP_YEAR,
    image: ImageRef("rev_roosevelt_dime_unc"),
    attribution: "attr_mint",
};

const SHOW_P: OptionSlot = OptionSlot::MintMark1;
const SHOW_D: OptionSlot = OptionSlot::MintMark2;
const SHOW_PROOFS: OptionSlot = OptionSlot::MintMark3;
const SHOW_SATIN: OptionSlot = OptionSlot::MintMark4;

const OBVERSE_IMAGE: ImageRef = ImageRef("obv_roosevelt_dime_unc");

pub struct CladDimes;

impl SeriesGenerator for CladDimes {
    fn declare_options(&self, current_year: i32) -> DeclaredOptions {
        DeclaredOptions::new(
            CollectionOptions::new(START_YEAR, STOP_YEAR.resolve(current_year)).with_mint_marks(true),
        )
        .field(SHOW_P, true, "include_p")
        .field(SHOW_D, true, "include_d")
        .field(SHOW_PROOFS, false, "include_s_proofs")
        .field(SHOW_SATIN, false, "include_satin")
    }

    fn generate(&self, options: &CollectionOptions) -> Vec<CoinSlot> {
        let show_p = options.get(SHOW_P);
        let show_d = options.get(SHOW_D);
        let show_proofs = options.get(SHOW_PROOFS);
        let show_satin = options.get(SHOW_SATIN);
        let mut slots = SlotList::new();

        // Every clad dime slot is a mint mark slot
        if !options.show_mint_marks {
            return slots.into_vec();
        }
        for year in options.years() {
            let id = year.to_string();
            if show_p {
                if year < 1980 {
                    slots.push(id.as_str(), "");
                }
                // Special Mint Sets stood in for proofs 1965-1967
                if (1965..=1967).contains(&year) {
                    slots.push(id.as_str(), "SMS");
                }
                if year > 1979 {
                    slots.push(id.as_str(), "P");
                }
            }
            if show_d && !(1965..=1967).contains(&year) {
                slots.push(id.as_str(), "D");
            }
            if show_satin && year > 2004 && year < 2011 {
                slots.push(id.as_str(), "P Satin");
                slots.push(id.as_str(), "D Satin");
            }
            if show_proofs && year > 1967 {
                slots.push(id.as_str(), "S Proof");
            }
        }
        slots.into_vec()
    }

    fn resolve_image(&self, _slot: &CoinSlot, _context: ImageContext) -> ImageRef {
        OBVERSE_IMAGE
    }
}
