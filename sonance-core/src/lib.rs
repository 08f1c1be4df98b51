// Sonance
// Copyright (c) 2026 The Project Sonance Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

//! Shared types for Project Sonance: the error taxonomy, the PCM format descriptor and its
//! validator, the validated sample buffer, decoder and provider options, and byte-level I/O.

pub mod buffer;
pub mod codecs;
pub mod errors;
pub mod format;
pub mod io;
pub mod source;
pub mod util;
pub mod validate;
