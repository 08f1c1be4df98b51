// Sonance
// Copyright (c) 2026 The Project Sonance Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

//! A media provider for the IFF family of containers: AIFF, AIFF-C, and WAVE.
//!
//! The provider extracts the format of the samples and the raw sample payload. It does not
//! validate or decode the samples.

use std::fs::File;
use std::io;
use std::path::Path;

use sonance_core::errors::{metadata_error, Result};
use sonance_core::io::{ReadBytes, SourceStream};
use sonance_core::source::{MediaProvider, ProviderOptions, RawMedia};

use log::debug;

#[cfg(feature = "aiff")]
mod aiff;
mod chunks;
mod common;
#[cfg(feature = "wav")]
mod wave;

#[cfg(feature = "aiff")]
pub use aiff::read_aiff;
#[cfg(feature = "wav")]
pub use wave::read_wave;

/// Reads the format and raw payload of an AIFF, AIFF-C, or WAVE stream. The container is detected
/// from the stream marker.
pub fn read_media_from<R: io::Read>(source: R, options: &ProviderOptions) -> Result<RawMedia> {
    let mut stream = SourceStream::new(source);

    let marker = stream.read_quad_bytes()?;

    let media: RawMedia = match marker {
        #[cfg(feature = "aiff")]
        aiff::AIFF_STREAM_MARKER => aiff::read_aiff(&mut stream, options)?,
        #[cfg(feature = "wav")]
        wave::WAVE_STREAM_MARKER => wave::read_wave(&mut stream, options)?,
        _ => return metadata_error("riff: unsupported container"),
    };

    debug!("found {} byte payload with format: {}", media.data.len(), media.format);

    Ok(media)
}

/// `RiffProvider` is a [`MediaProvider`] for AIFF, AIFF-C, and WAVE files on disk.
#[derive(Clone, Debug, Default)]
pub struct RiffProvider {
    options: ProviderOptions,
}

impl RiffProvider {
    /// Instantiate a new `RiffProvider` with the provided options.
    pub fn new(options: &ProviderOptions) -> Self {
        RiffProvider { options: *options }
    }
}

impl MediaProvider for RiffProvider {
    fn read_media(&self, path: &Path) -> Result<RawMedia> {
        debug!("opening {}", path.display());

        // The file is closed when the reader is dropped, on every return path.
        let file = File::open(path)?;
        read_media_from(io::BufReader::new(file), &self.options)
    }
}
