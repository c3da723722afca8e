// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Field names used across record kinds.

pub const USER_ID: &str = "user_id";
pub const EVENT_TYPE: &str = "event_type";
pub const TIMESTAMP: &str = "timestamp";
pub const PAGE_URL: &str = "page_url";
pub const SESSION_ID: &str = "session_id";

pub const SENSOR_ID: &str = "sensor_id";
pub const TEMPERATURE: &str = "temperature";
pub const HUMIDITY: &str = "humidity";
pub const PRESSURE: &str = "pressure";

pub const TRANSACTION_ID: &str = "transaction_id";
pub const AMOUNT: &str = "amount";
pub const CURRENCY: &str = "currency";
pub const MERCHANT: &str = "merchant";

// Derived by enrichment
pub const PROCESSED_AT: &str = "processed_at";
pub const DATA_SOURCE: &str = "data_source";
pub const USER_SEGMENT: &str = "user_segment";
pub const HEAT_INDEX: &str = "heat_index";
pub const TEMPERATURE_ALERT: &str = "temperature_alert";
pub const HUMIDITY_ALERT: &str = "humidity_alert";
pub const TRANSACTION_CATEGORY: &str = "transaction_category";
pub const FRAUD_RISK: &str = "fraud_risk";

/// Key used when a grouping field is absent.
pub const UNKNOWN: &str = "unknown";
