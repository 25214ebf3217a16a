//! Collection creation options
//!
//! Every series shares one option shape: a year range, a mint mark gate,
//! five mint mark toggles and four checkboxes. Each series declares which
//! toggles it reads and what they mean.

use serde::{Deserialize, Serialize};

pub const MINT_MARK_COUNT: usize = 5;
pub const CHECKBOX_COUNT: usize = 4;

/// Generic toggle positions shared by all series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionSlot {
    MintMark1,
    MintMark2,
    MintMark3,
    MintMark4,
    MintMark5,
    Checkbox1,
    Checkbox2,
    Checkbox3,
    Checkbox4,
}

impl OptionSlot {
    pub const ALL: [OptionSlot; MINT_MARK_COUNT + CHECKBOX_COUNT] = [
        OptionSlot::MintMark1,
        OptionSlot::MintMark2,
        OptionSlot::MintMark3,
        OptionSlot::MintMark4,
        OptionSlot::MintMark5,
        OptionSlot::Checkbox1,
        OptionSlot::Checkbox2,
        OptionSlot::Checkbox3,
        OptionSlot::Checkbox4,
    ];

    /// Mint mark toggle by 1-based number
    pub fn mint_mark(number: usize) -> Option<Self> {
        Self::ALL[..MINT_MARK_COUNT].get(number.checked_sub(1)?).copied()
    }

    /// Checkbox by 1-based number
    pub fn checkbox(number: usize) -> Option<Self> {
        Self::ALL[MINT_MARK_COUNT..].get(number.checked_sub(1)?).copied()
    }

    pub fn is_mint_mark(self) -> bool {
        !matches!(
            self,
            OptionSlot::Checkbox1
                | OptionSlot::Checkbox2
                | OptionSlot::Checkbox3
                | OptionSlot::Checkbox4
        )
    }
}

impl std::fmt::Display for OptionSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OptionSlot::MintMark1 => write!(f, "mint mark 1"),
            OptionSlot::MintMark2 => write!(f, "mint mark 2"),
            OptionSlot::MintMark3 => write!(f, "mint mark 3"),
            OptionSlot::MintMark4 => write!(f, "mint mark 4"),
            OptionSlot::MintMark5 => write!(f, "mint mark 5"),
            OptionSlot::Checkbox1 => write!(f, "checkbox 1"),
            OptionSlot::Checkbox2 => write!(f, "checkbox 2"),
            OptionSlot::Checkbox3 => write!(f, "checkbox 3"),
            OptionSlot::Checkbox4 => write!(f, "checkbox 4"),
        }
    }
}

/// Last year of a series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopYear {
    Year(i32),
    /// Extends to the current year
    StillInProduction,
}

impl StopYear {
    pub fn resolve(self, current_year: i32) -> i32 {
        match self {
            StopYear::Year(year) => year,
            StopYear::StillInProduction => current_year,
        }
    }
}

/// Options consumed by a series generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionOptions {
    pub start_year: i32,
    pub stop_year: i32,
    /// Whether the user may change the year range
    pub edit_date_range: bool,
    /// Gate for every mint mark toggle
    pub show_mint_marks: bool,
    pub mint_marks: [bool; MINT_MARK_COUNT],
    pub checkboxes: [bool; CHECKBOX_COUNT],
}

impl CollectionOptions {
    pub fn new(start_year: i32, stop_year: i32) -> Self {
        Self {
            start_year,
            stop_year,
            edit_date_range: false,
            show_mint_marks: false,
            mint_marks: [false; MINT_MARK_COUNT],
            checkboxes: [false; CHECKBOX_COUNT],
        }
    }

    pub fn get(&self, slot: OptionSlot) -> bool {
        match slot {
            OptionSlot::MintMark1 => self.mint_marks[0],
            OptionSlot::MintMark2 => self.mint_marks[1],
            OptionSlot::MintMark3 => self.mint_marks[2],
            OptionSlot::MintMark4 => self.mint_marks[3],
            OptionSlot::MintMark5 => self.mint_marks[4],
            OptionSlot::Checkbox1 => self.checkboxes[0],
            OptionSlot::Checkbox2 => self.checkboxes[1],
            OptionSlot::Checkbox3 => self.checkboxes[2],
            OptionSlot::Checkbox4 => self.checkboxes[3],
        }
    }

    pub fn set(&mut self, slot: OptionSlot, value: bool) {
        let target = match slot {
            OptionSlot::MintMark1 => &mut self.mint_marks[0],
            OptionSlot::MintMark2 => &mut self.mint_marks[1],
            OptionSlot::MintMark3 => &mut self.mint_marks[2],
            OptionSlot::MintMark4 => &mut self.mint_marks[3],
            OptionSlot::MintMark5 => &mut self.mint_marks[4],
            OptionSlot::Checkbox1 => &mut self.checkboxes[0],
            OptionSlot::Checkbox2 => &mut self.checkboxes[1],
            OptionSlot::Checkbox3 => &mut self.checkboxes[2],
            OptionSlot::Checkbox4 => &mut self.checkboxes[3],
        };
        *target = value;
    }

    /// Builder form of `set`
    pub fn with(mut self, slot: OptionSlot, value: bool) -> Self {
        self.set(slot, value);
        self
    }

    pub fn with_mint_marks(mut self, show: bool) -> Self {
        self.show_mint_marks = show;
        self
    }

    /// Every toggle on, used to enumerate a series' full catalogue
    pub fn everything(start_year: i32, stop_year: i32) -> Self {
        Self {
            start_year,
            stop_year,
            edit_date_range: false,
            show_mint_marks: true,
            mint_marks: [true; MINT_MARK_COUNT],
            checkboxes: [true; CHECKBOX_COUNT],
        }
    }

    pub fn years(&self) -> std::ops::RangeInclusive<i32> {
        self.start_year..=self.stop_year
    }
}

/// A toggle the series reads, with its label resource key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionField {
    pub slot: OptionSlot,
    pub label: &'static str,
}

/// Result of a series' option declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclaredOptions {
    pub defaults: CollectionOptions,
    pub fields: Vec<OptionField>,
}

impl DeclaredOptions {
    pub fn new(defaults: CollectionOptions) -> Self {
        Self {
            defaults,
            fields: Vec::new(),
        }
    }

    /// Declares a toggle with its default value and label
    pub fn field(mut self, slot: OptionSlot, default: bool, label: &'static str) -> Self {
        self.defaults.set(slot, default);
        self.fields.push(OptionField { slot, label });
        self
    }

    pub fn label(&self, slot: OptionSlot) -> Option<&'static str> {
        self.fields.iter().find(|f| f.slot == slot).map(|f| f.label)
    }

    pub fn is_declared(&self, slot: OptionSlot) -> bool {
        self.label(slot).is_some()
    }
}
