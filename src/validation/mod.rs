// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Per-kind record validation.
//!
//! Validation is a predicate: a record either passes or is rejected, and a
//! rejection is a value the caller filters on, never a failure of the call.
//! Only presence and the documented numeric ranges are checked. A field
//! that must satisfy a numeric comparison but is not a number cannot
//! satisfy it, so the record is rejected; nothing else about field types is
//! enforced.

use std::ops::RangeInclusive;
use thiserror::Error;

use crate::records::{fields, Record, RecordKind};

/// Sensor temperatures outside this range (°C) are rejected.
pub const TEMPERATURE_RANGE: RangeInclusive<f64> = 0.0..=50.0;
/// Relative humidity outside this range (%) is rejected.
pub const HUMIDITY_RANGE: RangeInclusive<f64> = 0.0..=100.0;
/// Currencies a transaction may be denominated in.
pub const ALLOWED_CURRENCIES: [&str; 3] = ["USD", "EUR", "GBP"];

/// Why a record was rejected. The first failing rule wins.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Rejection {
    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{0}' is not numeric")]
    NotNumeric(&'static str),

    #[error("field '{field}' value {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("amount {0} must be greater than zero")]
    NonPositiveAmount(f64),

    #[error("unsupported currency {0}")]
    UnsupportedCurrency(String),
}

impl Rejection {
    /// Short label used when counting rejections by reason.
    pub fn reason(&self) -> &'static str {
        match self {
            Rejection::MissingField(_) => "missing_field",
            Rejection::NotNumeric(_) => "not_numeric",
            Rejection::OutOfRange { .. } => "out_of_range",
            Rejection::NonPositiveAmount(_) => "non_positive_amount",
            Rejection::UnsupportedCurrency(_) => "unsupported_currency",
        }
    }
}

/// `true` when `record` satisfies every rule for `kind`.
pub fn is_valid(record: &Record, kind: RecordKind) -> bool {
    validate(record, kind).is_ok()
}

/// Check `record` against the rules for `kind`, reporting the first failure.
pub fn validate(record: &Record, kind: RecordKind) -> Result<(), Rejection> {
    if let Some(missing) = record.first_missing(kind.required_fields()) {
        return Err(Rejection::MissingField(missing));
    }

    match kind {
        RecordKind::UserEvent => Ok(()),
        RecordKind::SensorReading => {
            check_range(record, fields::TEMPERATURE, &TEMPERATURE_RANGE)?;
            check_range(record, fields::HUMIDITY, &HUMIDITY_RANGE)
        }
        RecordKind::Transaction => {
            let amount = numeric(record, fields::AMOUNT)?;
            if amount <= 0.0 {
                return Err(Rejection::NonPositiveAmount(amount));
            }
            check_currency(record)
        }
    }
}

fn numeric(record: &Record, field: &'static str) -> Result<f64, Rejection> {
    record.number(field).ok_or(Rejection::NotNumeric(field))
}

fn check_range(
    record: &Record,
    field: &'static str,
    range: &RangeInclusive<f64>,
) -> Result<(), Rejection> {
    let value = numeric(record, field)?;
    if range.contains(&value) {
        Ok(())
    } else {
        Err(Rejection::OutOfRange {
            field,
            value,
            min: *range.start(),
            max: *range.end(),
        })
    }
}

fn check_currency(record: &Record) -> Result<(), Rejection> {
    match record.text(fields::CURRENCY) {
        Some(currency) if ALLOWED_CURRENCIES.contains(&currency) => Ok(()),
        _ => Err(Rejection::UnsupportedCurrency(
            record.key_or(fields::CURRENCY, fields::UNKNOWN),
        )),
    }
}
