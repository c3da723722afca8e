// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod aggregate;
pub mod enrich;
pub mod validate;

pub use aggregate::*;
pub use enrich::*;
pub use validate::*;
