// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Response parsing for device answers.
//!
//! A response is raw bytes that may carry null padding and noise around a
//! single JSON object. [`extract_json`] finds and decodes that object;
//! [`parse_reading`] additionally pulls out its `value` as a [`Reading`].

mod extract;
mod reading;

pub use extract::{extract_json, find_object, scrub, try_extract_json};
pub use reading::{Reading, parse_reading};
