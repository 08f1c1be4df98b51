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

use log::{debug, warn};

use crate::chunks::ChunksReader;
use crate::common::read_payload;

mod chunks;

use chunks::*;

/// AIFF is an IFF stream, with a "FORM" ASCII stream marker.
pub const AIFF_STREAM_MARKER: [u8; 4] = *b"FORM";
/// A possible form is "AIFF", uncompressed data.
const AIFF_FORM: [u8; 4] = *b"AIFF";
/// A possible form is "AIFC", possibly compressed data.
const AIFC_FORM: [u8; 4] = *b"AIFC";

/// Reads the format and sound data of an AIFF or AIFF-C stream. The stream marker must already
/// have been consumed.
///
/// The common and sound chunks may appear in any order.
pub fn read_aiff<B: ReadBytes>(reader: &mut B, options: &ProviderOptions) -> Result<RawMedia> {
    // The file is one FORM chunk, with the format and sound data as local chunks. The length of
    // the FORM chunk includes the form type.
    let form_len = reader.read_be_u32()?;
    let form = reader.read_quad_bytes()?;

    if form != AIFF_FORM && form != AIFC_FORM {
        return metadata_error("aiff: form is not supported");
    }

    let mut chunks =
        ChunksReader::<RiffAiffChunks>::new(form_len.saturating_sub(4), ByteOrder::BigEndian);

    let mut common = None;
    let mut data = None;

    loop {
        (common, data) = match (common, data) {
            (Some(common), Some(data)) => return Ok(finish(common, data)),
            pair => pair,
        };

        let chunk = match chunks.next(reader)? {
            Some(chunk) => chunk,
            None if common.is_none() => return metadata_error("aiff: missing common chunk"),
            None => return metadata_error("aiff: missing sound chunk"),
        };

        match chunk {
            RiffAiffChunks::Common(parser) => {
                let comm = match form {
                    AIFC_FORM => parser.parse_aifc(reader)?,
                    _ => parser.parse_aiff(reader)?,
                };
                debug!("{}", comm);
                common = Some(comm);
            }
            RiffAiffChunks::Sound(parser) => {
                let sound = parser.parse(reader)?;
                data = Some(read_payload(reader, u64::from(sound.data_len), options)?);
            }
        }
    }
}

/// Pairs the sound data with its format. A frame count that disagrees with the sound data is
/// only logged.
fn finish(common: CommonChunk, data: Vec<u8>) -> RawMedia {
    if let Some(expected) = common.sound_data_len() {
        if expected != data.len() as u64 {
            warn!(
                "aiff: common chunk implies {} bytes of sound data, found {}",
                expected,
                data.len()
            );
        }
    }

    RawMedia { format: common.format_descriptor(), data }
}
