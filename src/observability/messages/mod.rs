// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! ```rust
//! use record_pipeline::observability::messages::pipeline::PipelineStarted;
//!
//! let msg = PipelineStarted {
//!     kind: "sensor_reading",
//!     processor_count: 3,
//!     batch_size: 100,
//! };
//!
//! tracing::info!("{}", msg);
//! ```

pub mod pipeline;
pub mod processor;
pub mod records;
