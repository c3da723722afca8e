// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Synthetic record producer.
//!
//! Stands in for the upstream producer when there is no live topic to read
//! from. Every record it emits passes validation for its kind.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

use crate::enrichment::{Clock, SystemClock};
use crate::records::{fields, Record, RecordKind};

pub const EVENT_TYPES: [&str; 5] = ["page_view", "click", "purchase", "login", "logout"];
pub const CURRENCIES: [&str; 3] = ["USD", "EUR", "GBP"];

/// Produces random, valid records of each kind.
pub struct RecordGenerator<R: Rng = StdRng> {
    rng: R,
    clock: Arc<dyn Clock>,
}

impl RecordGenerator<StdRng> {
    /// Reproducible generator; timestamps still come from the wall clock.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed), Arc::new(SystemClock))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy(), Arc::new(SystemClock))
    }
}

impl<R: Rng> RecordGenerator<R> {
    pub fn new(rng: R, clock: Arc<dyn Clock>) -> Self {
        Self { rng, clock }
    }

    pub fn next(&mut self, kind: RecordKind) -> Record {
        match kind {
            RecordKind::UserEvent => self.user_event(),
            RecordKind::SensorReading => self.sensor_reading(),
            RecordKind::Transaction => self.transaction(),
        }
    }

    pub fn user_event(&mut self) -> Record {
        let event_type = EVENT_TYPES[self.rng.gen_range(0..EVENT_TYPES.len())];
        Record::new()
            .with(fields::USER_ID, self.rng.gen_range(1..=1000_i64))
            .with(fields::EVENT_TYPE, event_type)
            .with(fields::TIMESTAMP, self.clock.now_iso())
            .with(fields::PAGE_URL, format!("/page/{}", self.rng.gen_range(1..=50)))
            .with(
                fields::SESSION_ID,
                format!("session_{}", self.rng.gen_range(1000..=9999)),
            )
    }

    pub fn sensor_reading(&mut self) -> Record {
        Record::new()
            .with(
                fields::SENSOR_ID,
                format!("sensor_{}", self.rng.gen_range(1..=10)),
            )
            .with(fields::TEMPERATURE, round2(self.rng.gen_range(20.0..=30.0)))
            .with(fields::HUMIDITY, round2(self.rng.gen_range(40.0..=80.0)))
            .with(fields::PRESSURE, round2(self.rng.gen_range(1000.0..=1100.0)))
            .with(fields::TIMESTAMP, self.clock.now_iso())
    }

    pub fn transaction(&mut self) -> Record {
        let currency = CURRENCIES[self.rng.gen_range(0..CURRENCIES.len())];
        Record::new()
            .with(
                fields::TRANSACTION_ID,
                format!("txn_{}", self.rng.gen_range(10000..=99999)),
            )
            .with(fields::USER_ID, self.rng.gen_range(1..=1000_i64))
            .with(fields::AMOUNT, round2(self.rng.gen_range(10.0..=1000.0)))
            .with(fields::CURRENCY, currency)
            .with(
                fields::MERCHANT,
                format!("merchant_{}", self.rng.gen_range(1..=20)),
            )
            .with(fields::TIMESTAMP, self.clock.now_iso())
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::FixedClock;
    use crate::validation::is_valid;
    use chrono::{TimeZone, Utc};

    fn generator(seed: u64) -> RecordGenerator {
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        RecordGenerator::new(StdRng::seed_from_u64(seed), Arc::new(clock))
    }

    #[test]
    fn test_generated_records_are_valid() {
        let mut gen = generator(7);
        for kind in RecordKind::ALL {
            for _ in 0..200 {
                let record = gen.next(kind);
                assert!(is_valid(&record, kind), "{} {:?}", kind, record);
            }
        }
    }

    #[test]
    fn test_sensor_values_stay_in_range() {
        let mut gen = generator(11);
        for _ in 0..200 {
            let r = gen.sensor_reading();
            let t = r.number("temperature").unwrap();
            let h = r.number("humidity").unwrap();
            assert!((20.0..=30.0).contains(&t));
            assert!((40.0..=80.0).contains(&h));
            assert_eq!(round2(t), t);
        }
    }

    #[test]
    fn test_same_seed_same_records() {
        let a: Vec<Record> = {
            let mut gen = generator(42);
            (0..10).map(|_| gen.transaction()).collect()
        };
        let b: Vec<Record> = {
            let mut gen = generator(42);
            (0..10).map(|_| gen.transaction()).collect()
        };
        assert_eq!(a, b);
    }

    #[test]
    fn test_user_event_shape() {
        let r = generator(3).user_event();
        assert!(EVENT_TYPES.contains(&r.text("event_type").unwrap()));
        assert!(r.text("page_url").unwrap().starts_with("/page/"));
        assert!(r.text("session_id").unwrap().starts_with("session_"));
        assert_eq!(r.text("timestamp"), Some("2024-01-01T00:00:00.000000Z"));
    }
}
