//! Input records at the core's boundary.
//!
//! [`AnalysisInput`] is the fully-resolved record the analyzer accepts.
//! [`PartialInput`] is what resolution sources fill in piece by piece; it is
//! converted with [`PartialInput::into_input`], which is where absent fields
//! are rejected.

use serde::{Deserialize, Serialize};

use super::price_set::InputError;

/// Fully-resolved input for one symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisInput {
    pub symbol: String,
    pub current_price: f64,
    pub ma50: f64,
    pub resistance_level: f64,
    pub swing_low: f64,
    pub ma_uptrend: bool,
    pub volume_confirmed: bool,
    pub capital: f64,
}

/// Partially-populated input, filled by successive resolution sources.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialInput {
    pub current_price: Option<f64>,
    pub ma50: Option<f64>,
    pub resistance_level: Option<f64>,
    pub swing_low: Option<f64>,
    pub ma_uptrend: Option<bool>,
    pub volume_confirmed: Option<bool>,
    pub capital: Option<f64>,
}

/// A field of [`PartialInput`], in resolution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputField {
    CurrentPrice,
    Ma50,
    ResistanceLevel,
    MaUptrend,
    VolumeConfirmed,
    SwingLow,
    Capital,
}

impl InputField {
    pub const ALL: [InputField; 7] = [
        InputField::CurrentPrice,
        InputField::Ma50,
        InputField::ResistanceLevel,
        InputField::MaUptrend,
        InputField::VolumeConfirmed,
        InputField::SwingLow,
        InputField::Capital,
    ];

    pub fn label(self) -> &'static str {
        match self {
            InputField::CurrentPrice => "current price",
            InputField::Ma50 => "MA50",
            InputField::ResistanceLevel => "resistance level",
            InputField::MaUptrend => "MA50 uptrend",
            InputField::VolumeConfirmed => "volume confirmation",
            InputField::SwingLow => "swing low",
            InputField::Capital => "capital",
        }
    }

    /// True for yes/no fields, false for numeric ones.
    pub fn is_flag(self) -> bool {
        matches!(self, InputField::MaUptrend | InputField::VolumeConfirmed)
    }
}

impl PartialInput {
    pub fn is_set(&self, field: InputField) -> bool {
        match field {
            InputField::CurrentPrice => self.current_price.is_some(),
            InputField::Ma50 => self.ma50.is_some(),
            InputField::ResistanceLevel => self.resistance_level.is_some(),
            InputField::MaUptrend => self.ma_uptrend.is_some(),
            InputField::VolumeConfirmed => self.volume_confirmed.is_some(),
            InputField::SwingLow => self.swing_low.is_some(),
            InputField::Capital => self.capital.is_some(),
        }
    }

    /// Fields still unset, in resolution order.
    pub fn missing(&self) -> Vec<InputField> {
        InputField::ALL
            .iter()
            .copied()
            .filter(|&f| !self.is_set(f))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// Fill every unset field from `other`. Fields already set are kept.
    pub fn fill_from(&mut self, other: &PartialInput) {
        self.current_price = self.current_price.or(other.current_price);
        self.ma50 = self.ma50.or(other.ma50);
        self.resistance_level = self.resistance_level.or(other.resistance_level);
        self.swing_low = self.swing_low.or(other.swing_low);
        self.ma_uptrend = self.ma_uptrend.or(other.ma_uptrend);
        self.volume_confirmed = self.volume_confirmed.or(other.volume_confirmed);
        self.capital = self.capital.or(other.capital);
    }

    /// Set a numeric field. Ignored for yes/no fields.
    pub fn set_number(&mut self, field: InputField, value: f64) {
        match field {
            InputField::CurrentPrice => self.current_price = Some(value),
            InputField::Ma50 => self.ma50 = Some(value),
            InputField::ResistanceLevel => self.resistance_level = Some(value),
            InputField::SwingLow => self.swing_low = Some(value),
            InputField::Capital => self.capital = Some(value),
            InputField::MaUptrend | InputField::VolumeConfirmed => {}
        }
    }

    /// Set a yes/no field. Ignored for numeric fields.
    pub fn set_flag(&mut self, field: InputField, value: bool) {
        match field {
            InputField::MaUptrend => self.ma_uptrend = Some(value),
            InputField::VolumeConfirmed => self.volume_confirmed = Some(value),
            _ => {}
        }
    }

    /// Convert into a complete record, failing on the first absent field
    /// in resolution order.
    pub fn into_input(self, symbol: impl Into<String>) -> Result<AnalysisInput, InputError> {
        let missing = |field: InputField| InputError::MissingInput {
            field: field.label(),
        };
        let current_price = self.current_price.ok_or_else(|| missing(InputField::CurrentPrice))?;
        let ma50 = self.ma50.ok_or_else(|| missing(InputField::Ma50))?;
        let resistance_level = self
            .resistance_level
            .ok_or_else(|| missing(InputField::ResistanceLevel))?;
        let ma_uptrend = self.ma_uptrend.ok_or_else(|| missing(InputField::MaUptrend))?;
        let volume_confirmed = self
            .volume_confirmed
            .ok_or_else(|| missing(InputField::VolumeConfirmed))?;
        let swing_low = self.swing_low.ok_or_else(|| missing(InputField::SwingLow))?;
        let capital = self.capital.ok_or_else(|| missing(InputField::Capital))?;

        Ok(AnalysisInput {
            symbol: symbol.into(),
            current_price,
            ma50,
            resistance_level,
            swing_low,
            ma_uptrend,
            volume_confirmed,
            capital,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> PartialInput {
        PartialInput {
            current_price: Some(105.0),
            ma50: Some(100.0),
            resistance_level: Some(104.0),
            swing_low: Some(98.0),
            ma_uptrend: Some(true),
            volume_confirmed: Some(true),
            capital: Some(100_000.0),
        }
    }

    #[test]
    fn complete_partial_converts() {
        let input = complete().into_input("SAMP.N0000").unwrap();
        assert_eq!(input.symbol, "SAMP.N0000");
        assert_eq!(input.swing_low, 98.0);
        assert!(input.volume_confirmed);
    }

    #[test]
    fn first_missing_field_is_reported_in_resolution_order() {
        let mut partial = complete();
        partial.swing_low = None;
        partial.ma50 = None;
        let err = partial.into_input("X").unwrap_err();
        assert_eq!(err, InputError::MissingInput { field: "MA50" });
    }

    #[test]
    fn error_matches_first_entry_of_missing() {
        let mut partial = complete();
        partial.swing_low = None;
        partial.volume_confirmed = None;
        let expected = partial.missing()[0];
        assert_eq!(expected, InputField::VolumeConfirmed);
        let err = partial.into_input("X").unwrap_err();
        assert_eq!(err, InputError::MissingInput { field: expected.label() });
    }

    #[test]
    fn fill_from_keeps_existing_values() {
        let mut flags = PartialInput {
            current_price: Some(110.0),
            ..Default::default()
        };
        flags.fill_from(&complete());
        assert_eq!(flags.current_price, Some(110.0));
        assert_eq!(flags.ma50, Some(100.0));
        assert!(flags.is_complete());
    }

    #[test]
    fn setters_ignore_mismatched_kinds() {
        let mut partial = PartialInput::default();
        partial.set_number(InputField::MaUptrend, 1.0);
        partial.set_flag(InputField::Ma50, true);
        assert_eq!(partial, PartialInput::default());

        partial.set_number(InputField::SwingLow, 97.5);
        partial.set_flag(InputField::VolumeConfirmed, false);
        assert_eq!(partial.swing_low, Some(97.5));
        assert_eq!(partial.volume_confirmed, Some(false));
    }

    #[test]
    fn missing_lists_unset_fields() {
        let partial = PartialInput {
            capital: Some(1.0),
            ..Default::default()
        };
        assert_eq!(partial.missing().len(), 6);
        assert!(!partial.missing().contains(&InputField::Capital));
    }
}
