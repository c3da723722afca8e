// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Tag stamped into `data_source` when the config does not name one
pub const DEFAULT_DATA_SOURCE: &str = "kafka_stream";
/// Records per pipeline batch in stream mode
pub const DEFAULT_BATCH_SIZE: usize = 100;
/// Tumbling window length (5 minutes)
pub const DEFAULT_WINDOW_SECONDS: u64 = 300;
/// How far the watermark trails the latest event time (10 minutes)
pub const DEFAULT_WATERMARK_SECONDS: u64 = 600;
/// Upper bound for window length and watermark delay (one year)
pub const MAX_WINDOW_SECONDS: u64 = 365 * 24 * 60 * 60;
