// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::records::{fields, Record, RecordKind};

/// A half-open event-time interval `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Window {
    /// The tumbling window of length `size` (aligned to the epoch) containing `ts`.
    pub fn containing(ts: DateTime<Utc>, size: Duration) -> Option<Self> {
        let size_ms = size.num_milliseconds().max(1);
        let start_ms = ts.timestamp_millis().div_euclid(size_ms) * size_ms;
        let start = DateTime::<Utc>::from_timestamp_millis(start_ms)?;
        let end = start.checked_add_signed(Duration::milliseconds(size_ms))?;
        Some(Self { start, end })
    }
}

/// One closed (window, key) group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowedSummary {
    pub kind: RecordKind,
    pub window_start: DateTime<Utc>,
    pub window_end: DateTime<Utc>,
    pub group_by: &'static str,
    pub key: String,
    pub count: usize,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub averages: BTreeMap<&'static str, f64>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub totals: BTreeMap<&'static str, f64>,
}

/// What each kind groups by and which numeric fields it reduces.
struct WindowPlan {
    group_by: &'static str,
    averaged: &'static [&'static str],
    totalled: &'static [&'static str],
}

impl WindowPlan {
    fn for_kind(kind: RecordKind) -> Self {
        match kind {
            RecordKind::UserEvent => Self {
                group_by: fields::EVENT_TYPE,
                averaged: &[],
                totalled: &[],
            },
            RecordKind::SensorReading => Self {
                group_by: fields::SENSOR_ID,
                averaged: &[fields::TEMPERATURE, fields::HUMIDITY, fields::PRESSURE],
                totalled: &[],
            },
            RecordKind::Transaction => Self {
                group_by: fields::CURRENCY,
                averaged: &[fields::AMOUNT],
                totalled: &[fields::AMOUNT],
            },
        }
    }

    fn reduced_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.averaged
            .iter()
            .chain(self.totalled.iter().filter(move |f| !self.averaged.contains(*f)))
            .copied()
    }
}

#[derive(Debug, Default)]
struct GroupState {
    count: usize,
    sums: BTreeMap<&'static str, f64>,
}

/// Event-time tumbling-window aggregation with a watermark.
///
/// The watermark trails the latest event time seen by `watermark_delay`.
/// A window closes once its end is at or before the watermark; records that
/// land in a closed window are dropped as late. Records without a parseable
/// `timestamp` are dropped as well. Both drops are counted.
pub struct WindowedAggregator {
    kind: RecordKind,
    plan: WindowPlan,
    size: Duration,
    watermark_delay: Duration,
    groups: BTreeMap<(Window, String), GroupState>,
    max_event_time: Option<DateTime<Utc>>,
    dropped_late: usize,
    dropped_unparseable: usize,
}

impl WindowedAggregator {
    pub fn new(kind: RecordKind, size: Duration, watermark_delay: Duration) -> Self {
        Self {
            kind,
            plan: WindowPlan::for_kind(kind),
            size,
            watermark_delay,
            groups: BTreeMap::new(),
            max_event_time: None,
            dropped_late: 0,
            dropped_unparseable: 0,
        }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// `None` until a record arrives, or when the delay reaches past the
    /// earliest representable time.
    pub fn watermark(&self) -> Option<DateTime<Utc>> {
        self.max_event_time
            .and_then(|t| t.checked_sub_signed(self.watermark_delay))
    }

    /// Add one record. Returns `false` when it was dropped.
    pub fn on_record(&mut self, record: &Record) -> bool {
        let window = match record
            .event_time(fields::TIMESTAMP)
            .and_then(|ts| Window::containing(ts, self.size).map(|w| (ts, w)))
        {
            Some(found) => found,
            None => {
                self.dropped_unparseable += 1;
                return false;
            }
        };
        let (ts, window) = window;

        if matches!(self.watermark(), Some(wm) if window.end <= wm) {
            self.dropped_late += 1;
            return false;
        }

        self.max_event_time = Some(self.max_event_time.map_or(ts, |max| max.max(ts)));

        let key = record.key_or(self.plan.group_by, fields::UNKNOWN);
        let state = self.groups.entry((window, key)).or_default();
        state.count += 1;
        for field in self.plan.reduced_fields() {
            *state.sums.entry(field).or_insert(0.0) += record.number_or(field, 0.0);
        }
        true
    }

    /// Emit and forget every group whose window the watermark has passed.
    pub fn drain_closed(&mut self) -> Vec<WindowedSummary> {
        let Some(watermark) = self.watermark() else {
            return Vec::new();
        };

        let closed: Vec<(Window, String)> = self
            .groups
            .keys()
            .filter(|(window, _)| window.end <= watermark)
            .cloned()
            .collect();

        closed
            .into_iter()
            .filter_map(|group| {
                let state = self.groups.remove(&group)?;
                Some(self.summarize(group, state))
            })
            .collect()
    }

    /// Emit every open group regardless of the watermark.
    pub fn flush(&mut self) -> Vec<WindowedSummary> {
        let groups = std::mem::take(&mut self.groups);
        groups
            .into_iter()
            .map(|(group, state)| self.summarize(group, state))
            .collect()
    }

    pub fn open_groups(&self) -> usize {
        self.groups.len()
    }

    pub fn dropped_late(&self) -> usize {
        self.dropped_late
    }

    pub fn dropped_unparseable(&self) -> usize {
        self.dropped_unparseable
    }

    fn summarize(&self, (window, key): (Window, String), state: GroupState) -> WindowedSummary {
        let count = state.count as f64;
        let averages = self
            .plan
            .averaged
            .iter()
            .map(|f| (*f, state.sums.get(f).copied().unwrap_or(0.0) / count))
            .collect();
        let totals = self
            .plan
            .totalled
            .iter()
            .map(|f| (*f, state.sums.get(f).copied().unwrap_or(0.0)))
            .collect();

        WindowedSummary {
            kind: self.kind,
            window_start: window.start,
            window_end: window.end,
            group_by: self.plan.group_by,
            key,
            count: state.count,
            averages,
            totals,
        }
    }
}
