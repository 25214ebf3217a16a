//! Jefferson Nickels (1938 - present)

use super::{paired_image, ImageContext, ImageRef, SeriesGenerator};
use crate::migration::MigrationStep;
use crate::registry::SeriesInfo;
use crate::options::{CollectionOptions, DeclaredOptions, OptionSlot, StopYear};
use crate::slot::{CoinSlot, SlotList};

pub const COLLECTION_TYPE: &str = "Nickels";
pub const START_YEAR: i32 = 1938;
pub const STOP_YEAR: StopYear = StopYear::StillInProduction;
pub const ATTRIBUTION: &str = "attr_mint";
pub const REVERSE_IMAGE: ImageRef = ImageRef("rev_jefferson_nickel_unc");

pub const INFO: SeriesInfo = SeriesInfo {
    type_name: COLLECTION_TYPE,
    start_year: START_YEAR,
    stop_year: STOP_YEAR,
    image: REVERSE_IMAGE,
    attribution: ATTRIBUTION,
};

const SHOW_P: OptionSlot = OptionSlot::MintMark1;
const SHOW_D: OptionSlot = OptionSlot::MintMark2;
const SHOW_S: OptionSlot = OptionSlot::MintMark3;

/// Westward Journey designs replace the plain year in 2004 and 2005
const WESTWARD_2004: [&str; 2] = ["Peace Medal", "Keelboat"];
const WESTWARD_2005: [&str; 2] = ["American Bison", "Ocean in View!"];

const WESTWARD_IMAGES: &[(&str, ImageRef, ImageRef)] = &[
    ("Peace Medal", ImageRef("westward_2004_louisiana_purchase_unc"), ImageRef("westward_2004_louisiana_purchase_unc_25")),
    ("Keelboat", ImageRef("westward_2004_keelboat_unc"), ImageRef("westward_2004_keelboat_unc_25")),
    ("American Bison", ImageRef("westward_2005_american_bison_unc"), ImageRef("westward_2005_american_bison_unc_25")),
    ("Ocean in View!", ImageRef("westward_2005_ocean_in_view_unc"), ImageRef("westward_2005_ocean_in_view_unc_25")),
];

const OBVERSE_IMAGE_COLLECTED: ImageRef = ImageRef("obv_jefferson_nickel_unc");

/// New years appended for collections that track current production
pub(crate) const YEARLY_ADDITIONS: &[MigrationStep] = &[
    MigrationStep::new(3, 2013),
    MigrationStep::new(4, 2014),
    MigrationStep::new(6, 2015),
    MigrationStep::new(7, 2016),
    MigrationStep::new(8, 2017),
    MigrationStep::new(11, 2018),
    MigrationStep::new(12, 2019),
    MigrationStep::new(13, 2020),
];

pub struct JeffersonNickels;

impl SeriesGenerator for JeffersonNickels {
    fn declare_options(&self, current_year: i32) -> DeclaredOptions {
        DeclaredOptions::new(CollectionOptions::new(START_YEAR, STOP_YEAR.resolve(current_year)))
            .field(SHOW_P, true, "include_p")
            .field(SHOW_D, false, "include_d")
            .field(SHOW_S, false, "include_s")
    }

    fn generate(&self, options: &CollectionOptions) -> Vec<CoinSlot> {
        let show_p = options.get(SHOW_P);
        let show_d = options.get(SHOW_D);
        let show_s = options.get(SHOW_S);
        let mut slots = SlotList::new();

        for year in options.years() {
            let westward = match year {
                2004 => Some(WESTWARD_2004),
                2005 => Some(WESTWARD_2005),
                _ => None,
            };
            if let Some(designs) = westward {
                for design in designs {
                    if options.show_mint_marks {
                        if show_p {
                            slots.push(design, "P");
                        }
                        if show_d {
                            slots.push(design, "D");
                        }
                    } else {
                        slots.push(design, "");
                    }
                }
                continue;
            }

            let id = year.to_string();
            if !options.show_mint_marks {
                slots.push(id, "");
                continue;
            }
            // No Philadelphia strikes 1968-1970; the P mark only appears from 1980
            if show_p && !(1968..=1970).contains(&year) {
                slots.push(id.as_str(), if year >= 1980 { "P" } else { "" });
            }
            if show_d && !(1965..=1967).contains(&year) {
                slots.push(id.as_str(), "D");
            }
            if show_s && year <= 1970 && year != 1950 && (year < 1955 || year > 1967) {
                slots.push(id.as_str(), "S");
            }
        }
        slots.into_vec()
    }

    fn resolve_image(&self, slot: &CoinSlot, context: ImageContext) -> ImageRef {
        paired_image(
            WESTWARD_IMAGES,
            slot,
            context,
            (OBVERSE_IMAGE_COLLECTED, ImageRef::OPEN_SLOT),
        )
    }

    fn migration_steps(&self) -> &'static [MigrationStep] {
        YEARLY_ADDITIONS
    }
}
