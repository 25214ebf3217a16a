//! Early Dollars (1794 - 1885)
//!
//! Keyed by design rather than year: the identifier names the design and
//! the mint column carries the date plus variety.

use super::{ImageContext, ImageRef, SeriesGenerator};
use crate::options::{CollectionOptions, DeclaredOptions, OptionSlot, StopYear};
use crate::registry::SeriesInfo;
use crate::slot::{CoinSlot, SlotList};

pub const COLLECTION_TYPE: &str = "Early Dollars";
pub const START_YEAR: i32 = 1794;
pub const STOP_YEAR: StopYear = StopYear::Year(1885);

const TRADE_IMAGE: ImageRef = ImageRef("annc1884_t_1_trade_dollar__judd_1732_");

pub const INFO: SeriesInfo = SeriesInfo {
    type_name: COLLECTION_TYPE,
    start_year: START_YEAR,
    stop_year: STOP_YEAR,
    image: TRADE_IMAGE,
    attribution: "attr_EarlyHalfs",
};

const SHOW_BUST: OptionSlot = OptionSlot::Checkbox1;
const SHOW_SEATED: OptionSlot = OptionSlot::Checkbox2;
const SHOW_TRADE: OptionSlot = OptionSlot::Checkbox3;
const SHOW_P: OptionSlot = OptionSlot::MintMark1;
const SHOW_O: OptionSlot = OptionSlot::MintMark2;
const SHOW_S: OptionSlot = OptionSlot::MintMark3;
const SHOW_CC: OptionSlot = OptionSlot::MintMark4;

const FLOWING_HAIR: &str = "Flowing Hair";
const DRAPED_BUST: &str = "Draped Bust";
const SEATED: &str = "Seated";
// The trailing space keeps the Gobrecht pattern apart from regular Seated slots
const GOBRECHT: &str = "Seated ";
const TRADE: &str = "Trade";

const DESIGN_IMAGES: &[(&str, ImageRef)] = &[
    (FLOWING_HAIR, ImageRef("a1795_half_dollar_obv")),
    (DRAPED_BUST, ImageRef("a1796_half_dollar_obverse_15_stars")),
    (SEATED, ImageRef("a1885_half_dollar_obv")),
    (GOBRECHT, ImageRef("anostarsdime")),
    (TRADE, TRADE_IMAGE),
];

const SEATED_O_YEARS: [i32; 5] = [1846, 1850, 1851, 1859, 1860];
const SEATED_S_YEARS: [i32; 4] = [1859, 1870, 1872, 1873];

pub struct EarlyDollars;

impl SeriesGenerator for EarlyDollars {
    fn declare_options(&self, current_year: i32) -> DeclaredOptions {
        DeclaredOptions::new(
            CollectionOptions::new(START_YEAR, STOP_YEAR.resolve(current_year)).with_mint_marks(true),
        )
        .field(SHOW_BUST, false, "include_bust")
        .field(SHOW_SEATED, false, "include_seated")
        .field(SHOW_TRADE, true, "include_trade")
        .field(SHOW_P, true, "include_p")
        .field(SHOW_O, true, "include_o")
        .field(SHOW_S, true, "include_s")
        .field(SHOW_CC, true, "include_cc")
    }

    fn generate(&self, options: &CollectionOptions) -> Vec<CoinSlot> {
        let show_bust = options.get(SHOW_BUST);
        let show_seated = options.get(SHOW_SEATED);
        let show_trade = options.get(SHOW_TRADE);
        let show_p = options.get(SHOW_P);
        let show_o = options.get(SHOW_O);
        let show_s = options.get(SHOW_S);
        let show_cc = options.get(SHOW_CC);
        let mut slots = SlotList::new();

        for year in options.years() {
            if show_bust {
                if year == 1794 || year == 1795 {
                    slots.push(FLOWING_HAIR, year.to_string());
                }
                if year > 1794 && year < 1799 {
                    slots.push(DRAPED_BUST, format!("{} Sm Eagle", year));
                }
                if year > 1797 && year < 1804 {
                    slots.push(DRAPED_BUST, format!("{} Heraldic Eagle", year));
                }
                if year == 1804 {
                    slots.push(DRAPED_BUST, format!("{} Rare", year));
                }
            }
            if show_seated {
                if show_p {
                    if year == 1836 {
                        slots.push(GOBRECHT, format!("{} Gobrecht", year));
                    }
                    if year == 1838 || year == 1839 {
                        slots.push(SEATED, format!("{} Gobrecht Proof", year));
                    }
                    if year > 1839 && year < 1866 && year != 1858 {
                        slots.push(SEATED, year.to_string());
                    }
                    if year > 1865 && year < 1874 {
                        slots.push(SEATED, format!("{} Motto", year));
                    }
                }
                if show_o && SEATED_O_YEARS.contains(&year) {
                    slots.push(SEATED, format!("{} O", year));
                }
                if show_s && SEATED_S_YEARS.contains(&year) {
                    slots.push(SEATED, format!("{} S", year));
                }
                if show_cc && year > 1869 && year < 1874 {
                    slots.push(SEATED, format!("{} CC", year));
                }
            }
            if show_trade {
                if show_p {
                    if year > 1872 && year < 1878 {
                        slots.push(TRADE, year.to_string());
                    }
                    // Proof only after circulation strikes ended
                    if year > 1878 && year < 1886 {
                        slots.push(TRADE, format!("{} Proof", year));
                    }
                }
                if show_s && year > 1872 && year < 1879 {
                    slots.push(TRADE, format!("{} S", year));
                }
                if show_cc && year > 1872 && year < 1879 {
                    slots.push(TRADE, format!("{} CC", year));
                }
            }
        }
        slots.into_vec()
    }

    fn resolve_image(&self, slot: &CoinSlot, _context: ImageContext) -> ImageRef {
        DESIGN_IMAGES
            .iter()
            .find(|(name, _)| *name == slot.identifier)
            .map(|(_, image)| *image)
            .unwrap_or(TRADE_IMAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::test_support::{assert_well_formed, count, CURRENT_YEAR};

    fn options(flags: [bool; 7]) -> CollectionOptions {
        let slots = [SHOW_BUST, SHOW_SEATED, SHOW_TRADE, SHOW_P, SHOW_O, SHOW_S, SHOW_CC];
        let mut options = EarlyDollars.declare_options(CURRENT_YEAR).defaults;
        for (slot, value) in slots.into_iter().zip(flags) {
            options.set(slot, value);
        }
        options
    }

    #[test]
    fn test_creation_counts() {
        const T: bool = true;
        const F: bool = false;
        // bust, seated, trade, P, O, S, CC
        let tests = [
            ([F, F, T, T, T, T, T], 24),
            ([T, F, F, F, F, F, F], 13),
            ([F, T, F, T, F, F, F], 36),
            ([F, T, F, F, T, F, F], 5),
            ([F, T, F, F, F, T, F], 4),
            ([F, T, F, F, F, F, T], 4),
            ([F, F, T, T, F, F, F], 12),
            ([F, F, T, F, F, T, F], 6),
            ([F, F, T, F, F, F, T], 6),
            ([T, T, T, T, T, T, T], 13 + 36 + 5 + 4 + 4 + 12 + 6 + 6),
        ];
        for (flags, expected) in tests {
            let slots = EarlyDollars.generate(&options(flags));
            assert_eq!(slots.len(), expected, "{:?}", flags);
            assert_well_formed(&slots);
        }
    }

    #[test]
    fn test_design_keyed_identifiers() {
        let slots = EarlyDollars.generate(&options([true, true, true, true, true, true, true]));
        assert_eq!(count(&slots, "Seated ", "1836 Gobrecht"), 1);
        assert_eq!(count(&slots, "Seated", "1858"), 0);
        assert_eq!(count(&slots, "Draped Bust", "1798 Sm Eagle"), 1);
        assert_eq!(count(&slots, "Draped Bust", "1798 Heraldic Eagle"), 1);
        assert_eq!(count(&slots, "Trade", "1878"), 0);
        assert_eq!(count(&slots, "Trade", "1878 CC"), 1);
        assert_eq!(count(&slots, "Trade", "1885 Proof"), 1);
    }

    #[test]
    fn test_images_by_design() {
        let gobrecht = CoinSlot::new(GOBRECHT, "1836 Gobrecht", 0);
        assert_eq!(EarlyDollars.resolve_image(&gobrecht, ImageContext::default()), ImageRef("anostarsdime"));
        let unknown = CoinSlot::new("Morgan", "1878", 0);
        assert_eq!(EarlyDollars.resolve_image(&unknown, ImageContext::default()), TRADE_IMAGE);
    }
}
