// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod executor;
pub mod pipeline_metadata;
pub mod stream;

pub use executor::{PipelineExecutor, PipelineResult};
pub use pipeline_metadata::PipelineMetadata;
pub use stream::{BatchSummary, StreamOutput, StreamRunner, StreamStats};
