// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::fields;
use crate::errors::RecordError;

/// The three record kinds flowing through the pipeline.
///
/// Each kind maps to one producer topic and selects the validation,
/// enrichment and aggregation rules that apply to its records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    #[serde(alias = "user_events")]
    UserEvent,
    #[serde(alias = "sensor_data")]
    SensorReading,
    #[serde(alias = "transactions")]
    Transaction,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [
        RecordKind::UserEvent,
        RecordKind::SensorReading,
        RecordKind::Transaction,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordKind::UserEvent => "user_event",
            RecordKind::SensorReading => "sensor_reading",
            RecordKind::Transaction => "transaction",
        }
    }

    /// Topic the producer publishes this kind on.
    pub fn topic(&self) -> &'static str {
        match self {
            RecordKind::UserEvent => "user_events",
            RecordKind::SensorReading => "sensor_data",
            RecordKind::Transaction => "transactions",
        }
    }

    /// Fields that must be present for a record of this kind to be valid.
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            RecordKind::UserEvent => &[fields::USER_ID, fields::EVENT_TYPE, fields::TIMESTAMP],
            RecordKind::SensorReading => &[
                fields::SENSOR_ID,
                fields::TEMPERATURE,
                fields::HUMIDITY,
                fields::PRESSURE,
                fields::TIMESTAMP,
            ],
            RecordKind::Transaction => &[
                fields::TRANSACTION_ID,
                fields::USER_ID,
                fields::AMOUNT,
                fields::CURRENCY,
                fields::TIMESTAMP,
            ],
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = RecordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s || kind.topic() == s)
            .ok_or_else(|| RecordError::UnknownKind(s.to_string()))
    }
}
