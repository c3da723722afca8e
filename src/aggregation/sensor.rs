// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;

use crate::records::{fields, Record};

/// Monitoring summary over a batch of sensor readings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensorSummary {
    pub total_readings: usize,
    pub avg_temperature: f64,
    pub avg_humidity: f64,
    pub avg_pressure: f64,
    pub max_temperature: f64,
    pub min_temperature: f64,
    pub alerts: usize,
}

/// Average the readings and count temperature alerts. `None` for an empty batch.
///
/// `alerts` counts readings whose `temperature_alert` flag is already set, so
/// the batch is expected to have been enriched. A raw reading has no flag and
/// does not count; the alert is never recomputed here.
pub fn aggregate_sensor_data(readings: &[Record]) -> Option<SensorSummary> {
    if readings.is_empty() {
        return None;
    }

    let count = readings.len() as f64;
    let mut temperature_sum = 0.0;
    let mut humidity_sum = 0.0;
    let mut pressure_sum = 0.0;
    let mut max_temperature = f64::NEG_INFINITY;
    let mut min_temperature = f64::INFINITY;
    let mut alerts = 0;

    for reading in readings {
        let temperature = reading.number_or(fields::TEMPERATURE, 0.0);
        temperature_sum += temperature;
        humidity_sum += reading.number_or(fields::HUMIDITY, 0.0);
        pressure_sum += reading.number_or(fields::PRESSURE, 0.0);
        max_temperature = max_temperature.max(temperature);
        min_temperature = min_temperature.min(temperature);
        if reading.flag(fields::TEMPERATURE_ALERT) {
            alerts += 1;
        }
    }

    Some(SensorSummary {
        total_readings: readings.len(),
        avg_temperature: temperature_sum / count,
        avg_humidity: humidity_sum / count,
        avg_pressure: pressure_sum / count,
        max_temperature,
        min_temperature,
        alerts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::Enricher;
    use crate::records::RecordKind;
    use serde_json::json;

    fn reading(temperature: f64, humidity: f64, pressure: f64) -> Record {
        Record::try_from(json!({
            "sensor_id": "sensor_1",
            "temperature": temperature,
            "humidity": humidity,
            "pressure": pressure,
            "timestamp": "2024-01-01T00:00:00",
        }))
        .unwrap()
    }

    #[test]
    fn test_averages_and_extremes() {
        let readings = vec![
            reading(30.0, 50.0, 1000.0),
            reading(10.0, 20.0, 1010.0),
            reading(20.0, 80.0, 1020.0),
        ];

        let summary = aggregate_sensor_data(&readings).unwrap();

        assert_eq!(summary.total_readings, 3);
        assert_eq!(summary.avg_temperature, 20.0);
        assert_eq!(summary.avg_humidity, 50.0);
        assert_eq!(summary.avg_pressure, 1010.0);
        assert_eq!(summary.max_temperature, 30.0);
        assert_eq!(summary.min_temperature, 10.0);
    }

    #[test]
    fn test_alerts_read_enriched_flag_only() {
        let raw = vec![reading(40.0, 50.0, 1000.0), reading(2.0, 50.0, 1000.0)];
        assert_eq!(aggregate_sensor_data(&raw).unwrap().alerts, 0);

        let enricher = Enricher::default();
        let enriched: Vec<Record> = raw
            .iter()
            .map(|r| enricher.enrich(r, RecordKind::SensorReading))
            .collect();
        assert_eq!(aggregate_sensor_data(&enriched).unwrap().alerts, 2);
    }

    #[test]
    fn test_empty_batch() {
        assert_eq!(aggregate_sensor_data(&[]), None);
    }
}
