// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Processor backend implementations.
//!
//! ## Local Backend
//! In-process processors over batches of records:
//! - **validate**: filters the batch down to valid records (Transform)
//! - **enrich**: appends derived fields to each record (Transform)
//! - **aggregate**: summarizes the batch into metadata (Analyze)
//!
//! ## Stub Backend (Test-Only)
//! Processors with scripted behavior for executor tests. Not available in
//! production builds.
//!
//! ```text
//! Configuration → LocalProcessorFactory → Arc<dyn Processor> → PipelineExecutor
//! ```

pub mod local;
#[cfg(test)]
pub mod stub;
