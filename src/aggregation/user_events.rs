// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::Serialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashSet};

use crate::records::{fields, Record};

/// Activity summary over a batch of user events.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserEventSummary {
    pub total_events: usize,
    pub event_type_counts: BTreeMap<String, usize>,
    pub active_users: usize,
    pub avg_events_per_user: f64,
}

/// Distinct-user identity: numbers compare by value (`1` and `1.0` are one
/// user), strings only equal strings.
#[derive(Debug, PartialEq, Eq, Hash)]
enum UserKey {
    Number(u64),
    Text(String),
    Other(String),
}

impl UserKey {
    fn of(event: &Record) -> Self {
        match event.get(fields::USER_ID) {
            None => Self::number(0.0),
            Some(Value::String(s)) => Self::Text(s.clone()),
            Some(value) => match value.as_f64() {
                Some(n) => Self::number(n),
                None => Self::Other(value.to_string()),
            },
        }
    }

    fn number(n: f64) -> Self {
        // -0.0 and 0.0 are the same user
        Self::Number(if n == 0.0 { 0.0f64.to_bits() } else { n.to_bits() })
    }
}

/// Count events by type and by distinct user. `None` for an empty batch.
///
/// A missing `event_type` counts as `"unknown"`; a missing `user_id` counts
/// as user `0`.
pub fn aggregate_user_events(events: &[Record]) -> Option<UserEventSummary> {
    if events.is_empty() {
        return None;
    }

    let mut event_type_counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut users: HashSet<UserKey> = HashSet::new();

    for event in events {
        let event_type = event.key_or(fields::EVENT_TYPE, fields::UNKNOWN);
        *event_type_counts.entry(event_type).or_insert(0) += 1;
        users.insert(UserKey::of(event));
    }

    let active_users = users.len();
    let avg_events_per_user = if active_users > 0 {
        events.len() as f64 / active_users as f64
    } else {
        0.0
    };

    Some(UserEventSummary {
        total_events: events.len(),
        event_type_counts,
        active_users,
        avg_events_per_user,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(user_id: i64, event_type: &str) -> Record {
        Record::try_from(json!({
            "user_id": user_id,
            "event_type": event_type,
            "timestamp": "2024-01-01T00:00:00",
        }))
        .unwrap()
    }

    #[test]
    fn test_counts_users_and_types() {
        let events = vec![event(1, "a"), event(1, "a"), event(2, "b")];

        let summary = aggregate_user_events(&events).unwrap();

        assert_eq!(summary.total_events, 3);
        assert_eq!(summary.active_users, 2);
        assert_eq!(summary.avg_events_per_user, 1.5);
        assert_eq!(
            summary.event_type_counts,
            BTreeMap::from([("a".to_string(), 2), ("b".to_string(), 1)])
        );
    }

    #[test]
    fn test_user_ids_compare_by_value() {
        let events = vec![
            Record::new().with("user_id", 1),
            Record::new().with("user_id", 1.0),
            Record::new().with("user_id", "1"),
            Record::new(),
            Record::new().with("user_id", 0.0),
        ];

        let summary = aggregate_user_events(&events).unwrap();

        assert_eq!(summary.active_users, 3);
    }

    #[test]
    fn test_empty_batch() {
        assert_eq!(aggregate_user_events(&[]), None);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let events = vec![Record::new(), Record::new().with("user_id", 0)];

        let summary = aggregate_user_events(&events).unwrap();

        assert_eq!(summary.event_type_counts.get("unknown"), Some(&2));
        assert_eq!(summary.active_users, 1);
        assert_eq!(summary.avg_events_per_user, 2.0);
    }
}
