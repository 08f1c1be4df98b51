// Sonance
// Copyright (c) 2026 The Project Sonance Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `validate` module checks a [`FormatDescriptor`] against the subset of sample formats
//! Sonance can hand to its callers.

use crate::errors::{format_error, FormatErrorKind, Result};
use crate::format::{Encoding, FormatDescriptor};

/// Validates a format descriptor.
///
/// The rules are checked in the following order, and the first rule that fails is reported:
///
/// 1. The byte order must be the native byte order.
/// 2. There must be 1 or 2 channels.
/// 3. Linear PCM samples must be 8 or 16 bits wide.
/// 4. The encoding must be linear PCM or IMA4 ADPCM.
///
/// The bit depth reported for IMA4 streams is not checked since they always decode to 16-bit
/// samples.
pub fn validate(desc: &FormatDescriptor) -> Result<()> {
    if !desc.byte_order.is_native() {
        return format_error(FormatErrorKind::Endianness);
    }

    if desc.channels != 1 && desc.channels != 2 {
        return format_error(FormatErrorKind::Channels);
    }

    if desc.encoding == Encoding::LinearPcm
        && desc.bits_per_channel != 8
        && desc.bits_per_channel != 16
    {
        return format_error(FormatErrorKind::Resolution);
    }

    match desc.encoding {
        Encoding::LinearPcm | Encoding::Ima4Adpcm => Ok(()),
        Encoding::Unknown(_) => format_error(FormatErrorKind::Encoding),
    }
}
