// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging.
//!
//! Log lines are built from small message structs implementing `Display`
//! rather than format strings scattered through the code. Messages are
//! organized by subsystem:
//!
//! * `messages::pipeline` - configuration, batch and stream lifecycle events
//! * `messages::processor` - processor execution and lifecycle events
//! * `messages::records` - per-record drops and window emission
//!
//! # Usage
//!
//! ```rust
//! use record_pipeline::observability::messages::processor::ProcessorExecutionFailed;
//!
//! let msg = ProcessorExecutionFailed {
//!     processor_id: "validate",
//!     code: 500,
//!     message: "boom",
//! };
//!
//! tracing::error!("{}", msg);
//! ```

pub mod messages;
