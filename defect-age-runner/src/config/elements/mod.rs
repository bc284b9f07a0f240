// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Config elements.

mod input;
mod naming;
mod report;

pub use input::*;
pub use naming::*;
pub use report::*;
