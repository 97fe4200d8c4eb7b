use serde::{Deserialize, Serialize};

/// Null value written when a file does not declare one.
pub const DEFAULT_NULL: f64 = -999.25;

/// Description used on parameter items that carry a categorical label.
pub const REFERENCE_DESCR: &str = "REFERENCE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MnemonicCase {
    #[default]
    Preserve,
    Upper,
    Lower,
}

impl MnemonicCase {
    pub fn apply(&self, mnemonic: &str) -> String {
        match self {
            MnemonicCase::Preserve => mnemonic.to_string(),
            MnemonicCase::Upper => mnemonic.to_uppercase(),
            MnemonicCase::Lower => mnemonic.to_lowercase(),
        }
    }
}

/// One `MNEM.UNIT VALUE : DESCRIPTION` line of a header section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeaderItem {
    pub mnemonic: String,
    pub unit: String,
    pub value: String,
    pub descr: String,
}

impl HeaderItem {
    pub fn new(mnemonic: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            mnemonic: mnemonic.into(),
            unit: String::new(),
            value: value.into(),
            descr: String::new(),
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_descr(mut self, descr: impl Into<String>) -> Self {
        self.descr = descr.into();
        self
    }

    /// Value parsed as a number, `None` when blank or not numeric.
    pub fn as_f64(&self) -> Option<f64> {
        self.value.trim().parse::<f64>().ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LasCurve {
    pub mnemonic: String,
    pub unit: String,
    pub descr: String,
    pub data: Vec<f64>,
}

impl LasCurve {
    pub fn new(mnemonic: impl Into<String>, data: Vec<f64>) -> Self {
        Self {
            mnemonic: mnemonic.into(),
            unit: String::new(),
            descr: String::new(),
            data,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = unit.into();
        self
    }

    pub fn with_descr(mut self, descr: impl Into<String>) -> Self {
        self.descr = descr.into();
        self
    }
}

/// In-memory LAS file: header sections plus curves sharing one index.
///
/// The first curve is the index. Null samples are held as `NaN`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LasFile {
    pub version: Vec<HeaderItem>,
    pub well: Vec<HeaderItem>,
    pub curves: Vec<LasCurve>,
    pub params: Vec<HeaderItem>,
    pub other: String,
}

impl LasFile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn well_item(&self, mnemonic: &str) -> Option<&HeaderItem> {
        self.well.iter().find(|item| item.mnemonic == mnemonic)
    }

    /// Trimmed, non-blank value of a well item.
    pub fn well_value(&self, mnemonic: &str) -> Option<&str> {
        self.well_item(mnemonic)
            .map(|item| item.value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Inserts or replaces a well item keyed by mnemonic.
    pub fn set_well(&mut self, item: HeaderItem) {
        match self.well.iter_mut().find(|k| k.mnemonic == item.mnemonic) {
            Some(existing) => *existing = item,
            None => self.well.push(item),
        }
    }

    /// Convenience for `set_well` keeping any unit/description already present.
    pub fn set_well_value(&mut self, mnemonic: &str, value: impl Into<String>) {
        match self.well.iter_mut().find(|k| k.mnemonic == mnemonic) {
            Some(existing) => existing.value = value.into(),
            None => self.well.push(HeaderItem::new(mnemonic, value)),
        }
    }

    pub fn null_value(&self) -> f64 {
        self.well_item("NULL")
            .and_then(HeaderItem::as_f64)
            .unwrap_or(DEFAULT_NULL)
    }

    pub fn curve(&self, mnemonic: &str) -> Option<&LasCurve> {
        self.curves.iter().find(|c| c.mnemonic == mnemonic)
    }

    pub fn has_curve(&self, mnemonic: &str) -> bool {
        self.curve(mnemonic).is_some()
    }

    pub fn curve_mnemonics(&self) -> Vec<&str> {
        self.curves.iter().map(|c| c.mnemonic.as_str()).collect()
    }

    pub fn append_curve(&mut self, curve: LasCurve) {
        self.curves.push(curve);
    }

    pub fn param(&self, mnemonic: &str) -> Option<&HeaderItem> {
        self.params.iter().find(|item| item.mnemonic == mnemonic)
    }

    /// Number of samples on the index curve.
    pub fn len(&self) -> usize {
        self.curves.first().map(|c| c.data.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
