// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Rule-based enrichment of stream records.
//!
//! Enrichment copies the input record and appends derived fields; the input
//! is only ever borrowed. Every kind gets `processed_at` and `data_source`,
//! then its own derived fields:
//!
//! | Kind            | Derived fields                                              |
//! |-----------------|-------------------------------------------------------------|
//! | user event      | `user_segment`                                              |
//! | sensor reading  | `heat_index`, `temperature_alert`, `humidity_alert`         |
//! | transaction     | `transaction_category`, `fraud_risk`                        |
//!
//! Missing or non-numeric inputs read as `0`. Bucket thresholds are tested
//! top-down and the first match wins.

mod clock;

pub use clock::{Clock, FixedClock, SystemClock};

use std::sync::Arc;

use crate::config::consts::DEFAULT_DATA_SOURCE;
use crate::records::{fields, Record, RecordKind};

/// Appends derived fields to records, stamping them with its clock and tag.
#[derive(Clone)]
pub struct Enricher {
    clock: Arc<dyn Clock>,
    data_source: String,
}

impl Enricher {
    pub fn new(clock: Arc<dyn Clock>, data_source: impl Into<String>) -> Self {
        Self {
            clock,
            data_source: data_source.into(),
        }
    }

    /// Same clock, different `data_source` tag.
    pub fn with_data_source(&self, data_source: impl Into<String>) -> Self {
        Self {
            clock: Arc::clone(&self.clock),
            data_source: data_source.into(),
        }
    }

    pub fn data_source(&self) -> &str {
        &self.data_source
    }

    /// Return a copy of `record` with the derived fields for `kind` appended.
    pub fn enrich(&self, record: &Record, kind: RecordKind) -> Record {
        let mut enriched = record.clone();
        enriched.insert(fields::PROCESSED_AT, self.clock.now_iso());
        enriched.insert(fields::DATA_SOURCE, self.data_source.as_str());

        match kind {
            RecordKind::UserEvent => {
                let user_id = record.number_or(fields::USER_ID, 0.0);
                enriched.insert(fields::USER_SEGMENT, user_segment(user_id));
            }
            RecordKind::SensorReading => {
                let temperature = record.number_or(fields::TEMPERATURE, 0.0);
                let humidity = record.number_or(fields::HUMIDITY, 0.0);
                enriched.insert(fields::HEAT_INDEX, heat_index(temperature, humidity));
                enriched.insert(fields::TEMPERATURE_ALERT, temperature_alert(temperature));
                enriched.insert(fields::HUMIDITY_ALERT, humidity_alert(humidity));
            }
            RecordKind::Transaction => {
                let amount = record.number_or(fields::AMOUNT, 0.0);
                enriched.insert(fields::TRANSACTION_CATEGORY, transaction_category(amount));
                enriched.insert(fields::FRAUD_RISK, fraud_risk(amount));
            }
        }

        enriched
    }
}

impl Default for Enricher {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock), DEFAULT_DATA_SOURCE)
    }
}

impl std::fmt::Debug for Enricher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Enricher")
            .field("data_source", &self.data_source)
            .finish()
    }
}

/// Enrich with the wall clock and the default `data_source` tag.
pub fn enrich(record: &Record, kind: RecordKind) -> Record {
    Enricher::default().enrich(record, kind)
}

/// `premium` up to 100, `regular` up to 500, `new` above. Both bounds inclusive.
pub fn user_segment(user_id: f64) -> &'static str {
    if user_id <= 100.0 {
        "premium"
    } else if user_id <= 500.0 {
        "regular"
    } else {
        "new"
    }
}

/// Simplified heat index: adds half the humidity only in hot, humid air.
pub fn heat_index(temperature: f64, humidity: f64) -> f64 {
    if temperature > 27.0 && humidity > 40.0 {
        temperature + 0.5 * humidity
    } else {
        temperature
    }
}

pub fn temperature_alert(temperature: f64) -> bool {
    temperature > 35.0 || temperature < 5.0
}

pub fn humidity_alert(humidity: f64) -> bool {
    humidity > 90.0 || humidity < 10.0
}

pub fn transaction_category(amount: f64) -> &'static str {
    if amount < 50.0 {
        "small"
    } else if amount < 200.0 {
        "medium"
    } else {
        "large"
    }
}

pub fn fraud_risk(amount: f64) -> &'static str {
    if amount > 1000.0 {
        "high"
    } else if amount > 500.0 {
        "medium"
    } else {
        "low"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};

    fn record(value: Value) -> Record {
        Record::try_from(value).unwrap()
    }

    fn fixed_enricher() -> Enricher {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
        Enricher::new(Arc::new(clock), "kafka_stream")
    }

    #[test]
    fn test_enrich_does_not_mutate_input() {
        let input = record(json!({"user_id": 42, "event_type": "click", "timestamp": "t"}));
        let snapshot = input.clone();

        let enriched = fixed_enricher().enrich(&input, RecordKind::UserEvent);

        assert_eq!(input, snapshot);
        assert_ne!(enriched, input);
        for field in input.fields() {
            assert_eq!(enriched.get(field), input.get(field));
        }
    }

    #[test]
    fn test_common_fields() {
        let enriched = fixed_enricher().enrich(&Record::new(), RecordKind::UserEvent);
        assert_eq!(enriched.text("processed_at"), Some("2024-01-01T12:00:00.000000Z"));
        assert_eq!(enriched.text("data_source"), Some("kafka_stream"));
    }

    #[test]
    fn test_user_segment_boundaries() {
        let cases = [
            (json!(1), "premium"),
            (json!(100), "premium"),
            (json!(101), "regular"),
            (json!(500), "regular"),
            (json!(501), "new"),
            (json!(1000), "new"),
        ];

        let enricher = fixed_enricher();
        for (user_id, expected) in cases {
            let input = record(json!({"user_id": user_id.clone()}));
            let enriched = enricher.enrich(&input, RecordKind::UserEvent);
            assert_eq!(enriched.text("user_segment"), Some(expected), "user_id {}", user_id);
        }
    }

    #[test]
    fn test_missing_user_id_is_premium() {
        let enriched = fixed_enricher().enrich(&Record::new(), RecordKind::UserEvent);
        assert_eq!(enriched.text("user_segment"), Some("premium"));
    }

    #[test]
    fn test_sensor_heat_index_and_alerts() {
        let enricher = fixed_enricher();

        let hot = enricher.enrich(
            &record(json!({"temperature": 30, "humidity": 50})),
            RecordKind::SensorReading,
        );
        assert_eq!(hot.number("heat_index"), Some(55.0));
        assert!(!hot.flag("temperature_alert"));
        assert!(!hot.flag("humidity_alert"));

        let mild = enricher.enrich(
            &record(json!({"temperature": 10, "humidity": 20})),
            RecordKind::SensorReading,
        );
        assert_eq!(mild.number("heat_index"), Some(10.0));
    }

    #[test]
    fn test_heat_index_requires_both_conditions() {
        assert_eq!(heat_index(27.0, 80.0), 27.0);
        assert_eq!(heat_index(35.0, 40.0), 35.0);
        assert_eq!(heat_index(28.0, 41.0), 48.5);
    }

    #[test]
    fn test_alert_thresholds_are_strict() {
        assert!(temperature_alert(35.1));
        assert!(!temperature_alert(35.0));
        assert!(temperature_alert(4.9));
        assert!(!temperature_alert(5.0));
        assert!(humidity_alert(90.5));
        assert!(!humidity_alert(90.0));
        assert!(humidity_alert(9.0));
        assert!(!humidity_alert(10.0));
    }

    #[test]
    fn test_transaction_buckets() {
        let enricher = fixed_enricher();
        let cases = [
            (49.99, "small", "low"),
            (50.0, "medium", "low"),
            (199.99, "medium", "low"),
            (200.0, "large", "low"),
            (500.0, "large", "low"),
            (500.01, "large", "medium"),
            (1000.0, "large", "medium"),
            (1500.0, "large", "high"),
        ];

        for (amount, category, risk) in cases {
            let input = record(json!({"amount": amount, "currency": "USD"}));
            let enriched = enricher.enrich(&input, RecordKind::Transaction);
            assert_eq!(enriched.text("transaction_category"), Some(category), "amount {}", amount);
            assert_eq!(enriched.text("fraud_risk"), Some(risk), "amount {}", amount);
        }
    }

    #[test]
    fn test_with_data_source_keeps_clock() {
        let enricher = fixed_enricher().with_data_source("replay");
        let enriched = enricher.enrich(&Record::new(), RecordKind::Transaction);
        assert_eq!(enriched.text("data_source"), Some("replay"));
        assert_eq!(enriched.text("processed_at"), Some("2024-01-01T12:00:00.000000Z"));
        assert_eq!(enriched.text("transaction_category"), Some("small"));
    }

    #[test]
    fn test_free_function_uses_default_tag() {
        let enriched = enrich(&Record::new(), RecordKind::SensorReading);
        assert_eq!(enriched.text("data_source"), Some(DEFAULT_DATA_SOURCE));
        assert!(enriched.flag("temperature_alert"));
    }
}
