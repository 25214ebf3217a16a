//! Early Dimes (1796 - 1891): Draped Bust, Capped Bust and Seated Liberty

use super::{table_image, ImageContext, ImageRef, SeriesGenerator};
use crate::options::{CollectionOptions, DeclaredOptions, OptionSlot, StopYear};
use crate::registry::SeriesInfo;
use crate::slot::{CoinSlot, SlotList};

pub const COLLECTION_TYPE: &str = "Early Dimes";
pub const START_YEAR: i32 = 1796;
pub const STOP_YEAR: StopYear = StopYear::Year(1891);

pub const INFO: SeriesInfo = SeriesInfo {
    type_name: COLLECTION_TYPE,
    start_year: START_YEAR,
    stop_year: STOP_YEAR,
    image: ImageRef("anostarsdime"),
    attribution: "attr_wikidimes",
};

const SHOW_TYPES: OptionSlot = OptionSlot::Checkbox1;
const SHOW_DRAPED: OptionSlot = OptionSlot::Checkbox2;
const SHOW_CAPPED: OptionSlot = OptionSlot::Checkbox3;
const SHOW_SEATED: OptionSlot = OptionSlot::Checkbox4;
const SHOW_P: OptionSlot = OptionSlot::MintMark1;
const SHOW_O: OptionSlot = OptionSlot::MintMark2;
const SHOW_S: OptionSlot = OptionSlot::MintMark3;
const SHOW_CC: OptionSlot = OptionSlot::MintMark4;

// Image variants
const DRAPED: u32 = 0;
const CAPPED: u32 = 1;
const NO_STARS: u32 = 2;
const STARS: u32 = 3;
const STARS_ARROWS: u32 = 4;
const LEGEND: u32 = 5;
const LEGEND_ARROWS: u32 = 6;

const TYPE_IMAGES: &[(&str, ImageRef)] = &[
    ("Draped Bust", ImageRef("a1797drapeddime")),
    ("Capped Bust", ImageRef("a1820cappeddime")),
    ("Seated No Stars", ImageRef("anostarsdime")),
    ("Seated Stars", ImageRef("astarsdime")),
    ("Seated Arrows", ImageRef("astars_arrowsdime")),
    ("Seated Legend", ImageRef("alegenddime")),
    ("Seated Arrows ", ImageRef("alegendarrowsdime")),
];

const IMAGE_TABLE: &[(&str, ImageRef)] = &[
    ("Draped Bust", ImageRef("a1797drapeddime")),
    ("Capped Bust", ImageRef("a1820cappeddime")),
    ("Seated No Stars", ImageRef("anostarsdime")),
    ("Seated Stars", ImageRef("astarsdime")),
    ("Seated Stars&Arrows", ImageRef("astars_arrowsdime")),
    ("Seated Legend", ImageRef("alegenddime")),
    ("Seated Legend&Arrows", ImageRef("alegendarrowsdime")),
    ("Barber", ImageRef("obv_barber_dime")),
    ("Mercury", ImageRef("obv_mercury_dime")),
    ("Roosevelt", ImageRef("obv_roosevelt_dime_unc")),
    ("1796 Draped Bust Sm Eagle Reverse", ImageRef("adi1796draped_bustr")),
    ("1807 Draped Bust Heraldic Eagle Reverse", ImageRef("adi1807draped_bustr")),
    ("1821 Capped Bust Reverse", ImageRef("adi1821r")),
    ("1838 Seated No Stars Reverse", ImageRef("adi1838r")),
    ("1843 Seated Stars Reverse", ImageRef("adi1843r")),
    ("1884 Legend Reverse", ImageRef("adi1884r")),
    ("1914 Barber Reverse", ImageRef("adi1914r")),
    ("1943 Mercury Reverse", ImageRef("adi1843r")),
    ("2016 Roosevelt Reverse", ImageRef("adi2016r")),
];

/// Seated dime years with no New Orleans issue
const NO_O_YEARS: [i32; 5] = [1844, 1846, 1847, 1848, 1855];
/// Seated dime years with no San Francisco issue
const NO_S_YEARS: [i32; 7] = [1857, 1878, 1879, 1880, 1881, 1882, 1883];

pub struct EarlyDimes;

impl SeriesGenerator for EarlyDimes {
    fn declare_options(&self, current_year: i32) -> DeclaredOptions {
        DeclaredOptions::new(
            CollectionOptions::new(START_YEAR, STOP_YEAR.resolve(current_year)).with_mint_marks(true),
        )
        .field(SHOW_TYPES, false, "include_old")
        .field(SHOW_DRAPED, false, "include_draped_bust")
        .field(SHOW_CAPPED, false, "include_capped_bust")
        .field(SHOW_SEATED, true, "include_seated")
        .field(SHOW_P, true, "include_p")
        .field(SHOW_O, true, "include_o")
        .field(SHOW_S, true, "include_s")
        .field(SHOW_CC, true, "include_cc")
    }

    fn generate(&self, options: &CollectionOptions) -> Vec<CoinSlot> {
        let show_types = options.get(SHOW_TYPES);
        let show_draped = options.get(SHOW_DRAPED);
        let show_capped = options.get(SHOW_CAPPED);
        let show_seated = options.get(SHOW_SEATED);
        let show_p = options.get(SHOW_P);
        let show_o = options.get(SHOW_O);
        let show_s = options.get(SHOW_S);
        let show_cc = options.get(SHOW_CC);
        let mut slots = SlotList::new();

        // One slot per type when the dated set isn't wanted
        if show_types && !show_draped {
            slots.push("Draped Bust", "");
        }
        if show_types && !show_capped {
            slots.push("Capped Bust", "");
        }

        for year in options.years() {
            let id = year.to_string();
            let id = id.as_str();

            if show_draped && year > 1795 && year < 1798 {
                slots.push_with_image(id, "Small Eagle", DRAPED);
            }
            if show_draped && year > 1797 && year < 1808 && year != 1799 && year != 1806 {
                slots.push_with_image(id, "Heraldic Eagle", DRAPED);
            }
            if show_capped && matches!(year, 1809 | 1811 | 1814) {
                slots.push_with_image(id, "", CAPPED);
            }
            if show_capped && year > 1819 && year < 1838 && year != 1826 {
                slots.push_with_image(id, "", CAPPED);
            }

            if !show_seated {
                continue;
            }
            if show_p {
                if year == 1837 {
                    slots.push_with_image(id, "No Stars", NO_STARS);
                }
                if year > 1837 && year < 1860 && year != 1854 && year != 1855 {
                    slots.push_with_image(id, "Stars", STARS);
                }
                if (1853..=1855).contains(&year) {
                    slots.push_with_image(id, "Arrows", STARS_ARROWS);
                }
                if year > 1859 && year < 1892 && year != 1874 {
                    slots.push_with_image(id, "Legend", LEGEND);
                }
                if year == 1873 || year == 1874 {
                    slots.push_with_image(id, "Arrows", LEGEND_ARROWS);
                }
            }
            if show_o && ((year > 1837 && year < 1861) || year == 1891) && !NO_O_YEARS.contains(&year) {
                if year == 1838 {
                    slots.push_with_image(id, "O No Stars", NO_STARS);
                }
                if year > 1838 && year < 1860 && year != 1853 && year != 1854 {
                    slots.push_with_image(id, "O Stars", STARS);
                }
                if year == 1853 || year == 1854 {
                    slots.push_with_image(id, "O Arrows", STARS_ARROWS);
                }
                if year == 1860 || year == 1891 {
                    slots.push_with_image(id, "O Legend", LEGEND);
                }
            }
            if show_s && year > 1855 && year < 1892 && !NO_S_YEARS.contains(&year) {
                if year < 1861 {
                    slots.push_with_image(id, "S Stars", STARS);
                }
                if year > 1860 && year != 1873 && year != 1874 {
                    slots.push_with_image(id, "S Legend", LEGEND);
                }
                if year == 1873 || year == 1874 {
                    slots.push_with_image(id, "S Arrows", LEGEND_ARROWS);
                }
            }
            if show_cc {
                if year > 1870 && year < 1879 && year != 1873 && year != 1874 {
                    slots.push_with_image(id, "CC Legend", LEGEND);
                }
                if year == 1873 {
                    slots.push_with_image(id, "CC Legend", LEGEND);
                    slots.push_with_image(id, "CC Arrows", LEGEND_ARROWS);
                }
                if year == 1874 {
                    slots.push_with_image(id, "CC Arrows", LEGEND_ARROWS);
                }
            }
        }
        slots.into_vec()
    }

    fn resolve_image(&self, slot: &CoinSlot, context: ImageContext) -> ImageRef {
        table_image(IMAGE_TABLE, TYPE_IMAGES, slot, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::test_support::{assert_well_formed, count, CURRENT_YEAR};

    fn options(flags: [bool; 8]) -> CollectionOptions {
        let slots = [SHOW_TYPES, SHOW_DRAPED, SHOW_CAPPED, SHOW_SEATED, SHOW_P, SHOW_O, SHOW_S, SHOW_CC];
        let mut options = EarlyDimes.declare_options(CURRENT_YEAR).defaults;
        for (slot, value) in slots.into_iter().zip(flags) {
            options.set(slot, value);
        }
        options
    }

    #[test]
    fn test_creation_counts() {
        const T: bool = true;
        const F: bool = false;
        // types, draped, capped, seated, P, O, S, CC
        let tests = [
            ([F, F, F, T, T, T, T, T], 114),
            ([T, F, F, F, F, F, F, F], 2),
            ([F, T, F, F, F, F, F, F], 10),
            ([F, F, T, F, F, F, F, F], 20),
            ([F, F, F, T, T, F, F, F], 57),
            ([F, F, F, T, F, T, F, F], 19),
            ([F, F, F, T, F, F, T, F], 29),
            ([F, F, F, T, F, F, F, T], 9),
            ([T, T, F, F, F, F, F, F], 11),
            ([F, F, F, F, T, T, T, T], 0),
            ([T, T, T, T, T, T, T, T], 10 + 20 + 57 + 19 + 29 + 9),
        ];
        for (flags, expected) in tests {
            let slots = EarlyDimes.generate(&options(flags));
            assert_eq!(slots.len(), expected, "{:?}", flags);
            assert_well_formed(&slots);
        }
    }

    #[test]
    fn test_defaults() {
        let declared = EarlyDimes.declare_options(CURRENT_YEAR);
        assert_eq!(declared.defaults.stop_year, 1891);
        assert_eq!(EarlyDimes.generate(&declared.defaults).len(), 114);
    }

    #[test]
    fn test_carson_city_1873() {
        let slots = EarlyDimes.generate(&options([false, false, false, true, false, false, false, true]));
        assert_eq!(count(&slots, "1873", "CC Legend"), 1);
        assert_eq!(count(&slots, "1873", "CC Arrows"), 1);
        assert_eq!(count(&slots, "1874", "CC Legend"), 0);
        assert_eq!(count(&slots, "1874", "CC Arrows"), 1);
    }

    #[test]
    fn test_image_variants() {
        let slots = EarlyDimes.generate(&options([true, false, false, true, true, false, false, false]));
        assert_eq!(slots[0].identifier, "Draped Bust");
        assert_eq!(slots[0].image_variant, None);
        let arrows_1874 = slots
            .iter()
            .find(|s| s.identifier == "1874" && s.mint == "Arrows")
            .expect("1874 arrows missing");
        assert_eq!(arrows_1874.image_variant, Some(LEGEND_ARROWS));
        assert_eq!(
            EarlyDimes.resolve_image(arrows_1874, ImageContext::default()),
            ImageRef("alegendarrowsdime")
        );
        assert_eq!(
            EarlyDimes.resolve_image(&slots[1], ImageContext::default()),
            ImageRef("a1820cappeddime")
        );
    }
}
