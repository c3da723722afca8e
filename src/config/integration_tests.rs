// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::{load_and_validate_config, DependencyGraph, ProcessorMap, RuntimeBuilder};
use crate::enrichment::Enricher;
use crate::errors::FailureStrategy;
use crate::records::RecordKind;

/// Every shipped config loads, validates and builds a runtime
#[test]
fn test_shipped_configs_build() {
    let cases = [
        ("configs/user-events.yaml", RecordKind::UserEvent, 3),
        ("configs/sensor-readings.yaml", RecordKind::SensorReading, 3),
        ("configs/transactions.yaml", RecordKind::Transaction, 3),
        ("configs/transactions.toml", RecordKind::Transaction, 4),
    ];

    for (path, kind, processor_count) in cases {
        let config = load_and_validate_config(path)
            .unwrap_or_else(|e| panic!("{} failed to load: {}", path, e));
        assert_eq!(config.kind, kind, "{}", path);
        assert_eq!(config.processors.len(), processor_count, "{}", path);

        let executor = RuntimeBuilder::from_config(&config).unwrap();
        assert_eq!(executor.processor_count(), processor_count, "{}", path);
    }
}

#[test]
fn test_user_events_yaml_loading() {
    let config = load_and_validate_config("configs/user-events.yaml").unwrap();

    assert_eq!(config.data_source, "kafka_stream");
    assert_eq!(config.failure_strategy, FailureStrategy::FailFast);
    assert_eq!(config.executor_options.batch_size(), 100);
    assert_eq!(config.processors[0].id, "validate");
    assert_eq!(config.processors[1].depends_on, vec!["validate"]);
    assert_eq!(config.processors[2].processor, "aggregate");

    let window = config.window.unwrap();
    assert_eq!(window.size_seconds, 300);
    assert_eq!(window.watermark_seconds, 600);
}

#[test]
fn test_sensor_readings_yaml_options() {
    let config = load_and_validate_config("configs/sensor-readings.yaml").unwrap();

    assert_eq!(config.failure_strategy, FailureStrategy::ContinueOnError);
    assert_eq!(config.executor_options.batch_size(), 50);
    assert_eq!(
        config.processors[1]
            .options
            .get("data_source")
            .and_then(|v| v.as_str()),
        Some("sensor_gateway")
    );
}

#[test]
fn test_toml_config_order() {
    let config = load_and_validate_config("configs/transactions.toml").unwrap();
    let order = DependencyGraph::from_config(&config).topological_order().unwrap();

    assert_eq!(order, vec!["raw_summary", "validate", "enrich", "summary"]);
    assert!(config.window.is_none());

    let processors = ProcessorMap::from_config(&config, &Enricher::default()).unwrap();
    assert_eq!(processors.get("raw_summary").map(|p| p.name()), Some("aggregate"));
}
