// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Stream records and the kind discriminator that selects their rules.
//!
//! A record is a flat JSON object exactly as it arrives from the producer.
//! Nothing here enforces a schema: validation, enrichment and aggregation
//! each read the fields they need with tolerant accessors and decide what a
//! missing or oddly-typed value means for them.

pub mod fields;
mod kind;
mod record;

pub use kind::RecordKind;
pub use record::{parse_timestamp, Record};
