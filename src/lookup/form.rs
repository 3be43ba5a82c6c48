//! Lookup input state: exchange, pair and a bounded date field.

use crate::error::LookupError;
use crate::shared::{parse_date, previous_day, ExchangeId, LookupKey, PairId, DATE_FORMAT};
use chrono::{Local, NaiveDate};

// ─── DateField ───────────────────────────────────────────────────────────────

/// Date input capped at the most recent complete day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateField {
    value: NaiveDate,
    max: NaiveDate,
}

impl DateField {
    /// `max` is the day before `today`, and the field starts at `max`.
    pub fn new(today: NaiveDate) -> Self {
        let max = previous_day(today);
        Self { value: max, max }
    }

    /// Field for the client's local calendar day.
    pub fn today_local() -> Self {
        Self::new(Local::now().date_naive())
    }

    pub fn value(&self) -> NaiveDate {
        self.value
    }

    pub fn max(&self) -> NaiveDate {
        self.max
    }

    pub fn set(&mut self, date: NaiveDate) -> Result<(), LookupError> {
        if date > self.max {
            return Err(LookupError::DateAfterMax {
                date,
                max: self.max,
            });
        }
        self.value = date;
        Ok(())
    }

    /// Set from `YYYY-MM-DD` text.
    pub fn set_text(&mut self, raw: &str) -> Result<(), LookupError> {
        let date =
            parse_date(raw.trim()).map_err(|_| LookupError::InvalidDate(raw.to_string()))?;
        self.set(date)
    }

    pub fn text(&self) -> String {
        self.value.format(DATE_FORMAT).to_string()
    }

    pub fn max_text(&self) -> String {
        self.max.format(DATE_FORMAT).to_string()
    }
}

// ─── Input events ────────────────────────────────────────────────────────────

pub const ENTER_KEY: &str = "Enter";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Exchange,
    Pair,
    Date,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// The lookup button was activated.
    Submit,
    /// A key was released inside one of the inputs. `key` is the key name.
    KeyUp { field: InputField, key: String },
}

impl InputEvent {
    pub fn key_up(field: InputField, key: impl Into<String>) -> Self {
        Self::KeyUp {
            field,
            key: key.into(),
        }
    }
}

// ─── LookupForm ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupForm {
    pub exchange: String,
    pub pair: String,
    pub date: DateField,
}

impl LookupForm {
    pub fn new(exchange: impl Into<String>, pair: impl Into<String>, date: DateField) -> Self {
        Self {
            exchange: exchange.into(),
            pair: pair.into(),
            date,
        }
    }

    /// Empty identifiers, date defaulted to yesterday on the local clock.
    pub fn today_local() -> Self {
        Self::new("", "", DateField::today_local())
    }

    /// Whether `event` starts a lookup: submit, or Enter on the pair or date input.
    pub fn triggers(event: &InputEvent) -> bool {
        match event {
            InputEvent::Submit => true,
            InputEvent::KeyUp { field, key } => {
                key == ENTER_KEY && matches!(field, InputField::Pair | InputField::Date)
            }
        }
    }

    /// Validated key for the current input.
    ///
    /// Identifiers are sent exactly as typed, surrounding whitespace
    /// included; only blank and dot-only values are refused.
    pub fn key(&self) -> Result<LookupKey, LookupError> {
        let exchange = identifier("exchange", &self.exchange)?;
        let pair = identifier("pair", &self.pair)?;
        Ok(LookupKey::new(
            ExchangeId::new(exchange),
            PairId::new(pair),
            self.date.value(),
        ))
    }
}

fn identifier(field: &'static str, raw: &str) -> Result<String, LookupError> {
    if raw.trim().is_empty() {
        return Err(LookupError::EmptyIdentifier(field));
    }
    if raw == "." || raw == ".." {
        return Err(LookupError::ReservedIdentifier {
            field,
            value: raw.to_string(),
        });
    }
    Ok(raw.to_string())
}
