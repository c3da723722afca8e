// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod aggregation;   // per-kind summaries and event-time windows
pub mod backends;      // processor implementations
pub mod config;        // config loading + pipeline wiring
pub mod engine;        // batch executor and stream runner
pub mod enrichment;
pub mod errors;        // error handling
pub mod generator;     // synthetic records
pub mod observability;
pub mod records;       // record model and kinds
pub mod traits;        // processor abstraction
pub mod validation;
