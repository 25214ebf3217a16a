//! Half Dimes (1794 - 1873)

use super::{table_image, ImageContext, ImageRef, SeriesGenerator};
use crate::options::{CollectionOptions, DeclaredOptions, OptionSlot, StopYear};
use crate::registry::SeriesInfo;
use crate::slot::{CoinSlot, SlotList};

pub const COLLECTION_TYPE: &str = "Half Dimes";
pub const START_YEAR: i32 = 1794;
pub const STOP_YEAR: StopYear = StopYear::Year(1873);

pub const INFO: SeriesInfo = SeriesInfo {
    type_name: COLLECTION_TYPE,
    start_year: START_YEAR,
    stop_year: STOP_YEAR,
    image: ImageRef("astarsdime"),
    attribution: "attr_wikihalfdimes",
};

const SHOW_BUST: OptionSlot = OptionSlot::Checkbox1;
const SHOW_SEATED: OptionSlot = OptionSlot::Checkbox2;
const SHOW_P: OptionSlot = OptionSlot::MintMark1;
const SHOW_O: OptionSlot = OptionSlot::MintMark2;
const SHOW_S: OptionSlot = OptionSlot::MintMark3;

const FLOWING_HAIR: u32 = 0;
const DRAPED_BUST: u32 = 1;
const CAPPED_BUST: u32 = 2;
const NO_STARS: u32 = 3;
const STARS: u32 = 4;
const ARROWS: u32 = 5;
const LEGEND: u32 = 6;

const IMAGE_TABLE: &[(&str, ImageRef)] = &[
    ("Flowing Hair", ImageRef("a1794_half_dime")),
    ("Draped Bust", ImageRef("a1797drapeddime")),
    ("Capped Bust", ImageRef("a1820cappeddime")),
    ("Seated No Stars", ImageRef("anostarsdime")),
    ("Seated Stars", ImageRef("astarsdime")),
    ("Seated Arrows", ImageRef("astars_arrowsdime")),
    ("Seated Legend", ImageRef("alegenddime")),
];

/// Years without a New Orleans "Stars" half dime
const NO_O_STARS_YEARS: [i32; 6] = [1843, 1845, 1846, 1847, 1854, 1855];

pub struct HalfDimes;

impl SeriesGenerator for HalfDimes {
    fn declare_options(&self, current_year: i32) -> DeclaredOptions {
        DeclaredOptions::new(
            CollectionOptions::new(START_YEAR, STOP_YEAR.resolve(current_year)).with_mint_marks(true),
        )
        .field(SHOW_BUST, true, "include_bust")
        .field(SHOW_SEATED, true, "include_seated")
        .field(SHOW_P, true, "include_p")
        .field(SHOW_O, true, "include_o")
        .field(SHOW_S, true, "include_s")
    }

    fn generate(&self, options: &CollectionOptions) -> Vec<CoinSlot> {
        let show_bust = options.get(SHOW_BUST);
        let show_seated = options.get(SHOW_SEATED);
        let show_p = options.get(SHOW_P);
        let show_o = options.get(SHOW_O);
        let show_s = options.get(SHOW_S);
        let mut slots = SlotList::new();

        for year in options.years() {
            let id = year.to_string();
            let id = id.as_str();

            if show_bust {
                if year == 1794 || year == 1795 {
                    slots.push_with_image(id, "Flowing Hair", FLOWING_HAIR);
                }
                if year > 1795 && year < 1798 {
                    slots.push_with_image(id, "Draped Bust Small Eagle", DRAPED_BUST);
                }
                if year > 1799 && year < 1806 && year != 1804 {
                    slots.push_with_image(id, "Draped Bust Heraldic Eagle", DRAPED_BUST);
                }
                if year > 1828 && year < 1838 {
                    slots.push_with_image(id, "Capped Bust", CAPPED_BUST);
                }
            }

            if !show_seated {
                continue;
            }
            if show_p {
                if year == 1837 {
                    slots.push_with_image(id, "No Stars Sm Date", NO_STARS);
                    slots.push_with_image(id, "No Stars Lg Date", NO_STARS);
                }
                if year > 1837 && year < 1841 {
                    slots.push_with_image(id, "Stars No Drapery", STARS);
                }
                if year > 1839 && year < 1860 && year != 1854 && year != 1855 {
                    slots.push_with_image(id, "Stars", STARS);
                }
                if year == 1848 {
                    slots.push_with_image(id, "Stars Lg Date", STARS);
                }
                if year == 1849 {
                    slots.push_with_image(id, "Stars 9 Over 6", STARS);
                }
                if (1853..=1855).contains(&year) {
                    slots.push_with_image(id, "Arrows", ARROWS);
                }
                if year == 1858 {
                    slots.push_with_image(id, "Stars Double Date", STARS);
                    slots.push_with_image(id, "Stars Inverted Date", STARS);
                }
                if year > 1859 {
                    slots.push_with_image(id, "Legend", LEGEND);
                }
                if year == 1861 {
                    slots.push_with_image(id, "Legend 1 Over 0", LEGEND);
                }
            }
            if show_o {
                if year == 1838 {
                    slots.push_with_image(id, "O No Stars", NO_STARS);
                }
                if year == 1839 || year == 1840 {
                    slots.push_with_image(id, "O Stars No Drapery", STARS);
                }
                if year > 1839 && year < 1861 && !NO_O_STARS_YEARS.contains(&year) {
                    slots.push_with_image(id, "O Stars", STARS);
                }
                if (1853..=1855).contains(&year) {
                    slots.push_with_image(id, "O Arrows", ARROWS);
                }
            }
            if show_s {
                if year > 1862 && year != 1870 {
                    slots.push_with_image(id, "S Legend", LEGEND);
                }
                if year == 1870 {
                    slots.push_with_image(id, "S Legend One Known", LEGEND);
                }
                if year == 1872 {
                    slots.push_with_image(id, "S Legend S Under Bow", LEGEND);
                }
            }
        }
        slots.into_vec()
    }

    fn resolve_image(&self, slot: &CoinSlot, context: ImageContext) -> ImageRef {
        table_image(IMAGE_TABLE, IMAGE_TABLE, slot, context)
    }
}
