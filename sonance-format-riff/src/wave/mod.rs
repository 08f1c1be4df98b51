// Sonance
// Copyright (c) 2026 The Project Sonance Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use sonance_core::errors::{metadata_error, Result};
use sonance_core::format::ByteOrder;
use sonance_core::io::ReadBytes;
use sonance_core::source::{ProviderOptions, RawMedia};

use log::debug;

use crate::chunks::ChunksReader;
use crate::common::read_payload;

mod chunks;

use chunks::*;

/// WAVE is a RIFF stream, with a "RIFF" ASCII stream marker.
pub const WAVE_STREAM_MARKER: [u8; 4] = *b"RIFF";
/// The only supported RIFF form is "WAVE".
const WAVE_RIFF_FORM: [u8; 4] = *b"WAVE";

/// Reads the format and sample data of a WAVE stream. The stream marker must already have been
/// consumed.
pub fn read_wave<B: ReadBytes>(reader: &mut B, options: &ProviderOptions) -> Result<RawMedia> {
    let riff_len = reader.read_u32()?;
    let riff_form = reader.read_quad_bytes()?;

    if riff_form != WAVE_RIFF_FORM {
        return metadata_error("wav: riff form is not wave");
    }

    let mut chunks =
        ChunksReader::<RiffWaveChunks>::new(riff_len.saturating_sub(4), ByteOrder::LittleEndian);

    let mut format = None;

    loop {
        let chunk = match chunks.next(reader)? {
            Some(chunk) => chunk,
            None if format.is_none() => return metadata_error("wav: missing fmt chunk"),
            None => return metadata_error("wav: missing data chunk"),
        };

        match chunk {
            RiffWaveChunks::Format(parser) => {
                let fmt = parser.parse(reader)?;
                debug!("{}", fmt);
                format = Some(fmt.format_descriptor()?);
            }
            RiffWaveChunks::Data(parser) => {
                // The format chunk must precede the data chunk.
                let format = match format {
                    Some(format) => format,
                    None => return metadata_error("wav: data chunk precedes fmt chunk"),
                };

                let data_chunk = parser.parse(reader)?;
                let data = read_payload(reader, u64::from(data_chunk.len), options)?;

                return Ok(RawMedia { format, data });
            }
        }
    }
}
