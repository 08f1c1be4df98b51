// Sonance
// Copyright (c) 2026 The Project Sonance Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use sonance_core::errors::{alloc_error, metadata_error, Result};
use sonance_core::format::ByteOrder;
use sonance_core::io::ReadBytes;
use sonance_core::source::ProviderOptions;

use log::debug;

/// The largest block of the payload read, and allocated, at once.
const READ_BLOCK_LEN: usize = 64 * 1024;

/// Reads the `len` byte sample payload into a newly allocated buffer.
///
/// The allocation is fallible: a payload larger than the configured limit, or one that cannot be
/// allocated, is reported as `CannotAllocateMemory`. The buffer grows one block at a time as the
/// payload is read, so a declared length the stream cannot supply never allocates more than the
/// bytes actually read plus one block.
pub fn read_payload<B: ReadBytes>(
    reader: &mut B,
    len: u64,
    options: &ProviderOptions,
) -> Result<Vec<u8>> {
    let len = match usize::try_from(len) {
        Ok(len) if len <= options.max_payload_len => len,
        _ => return alloc_error(usize::try_from(len).unwrap_or(usize::MAX)),
    };

    let mut data = Vec::new();

    while data.len() < len {
        let start = data.len();
        let block_len = (len - start).min(READ_BLOCK_LEN);

        if data.try_reserve(block_len).is_err() {
            return alloc_error(len);
        }
        data.resize(start + block_len, 0);

        reader.read_buf_exact(&mut data[start..])?;
    }

    debug!("read {} byte sample payload", len);

    Ok(data)
}

/// Checks that a sample rate read from a container is usable.
pub fn check_sample_rate(sample_rate: f64) -> Result<f64> {
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return metadata_error("riff: invalid sample rate");
    }
    Ok(sample_rate)
}

/// Gets the byte order to report for samples of the given width. Single byte samples have no
/// byte order, so they are reported as native.
pub fn sample_byte_order(bits_per_sample: u32, stored: ByteOrder) -> ByteOrder {
    if bits_per_sample <= 8 {
        ByteOrder::NATIVE
    }
    else {
        stored
    }
}
