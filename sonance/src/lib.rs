// Sonance
// Copyright (c) 2026 The Project Sonance Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

//! # Project Sonance
//!
//! Sonance decodes an audio file on disk into a validated, in-memory buffer of linear PCM
//! samples.
//!
//! # Support
//!
//! | Container | Encodings                                   | Feature Flag | Default |
//! |-----------|---------------------------------------------|--------------|---------|
//! | AIFF      | Linear PCM                                  | `aiff`       | Yes     |
//! | AIFF-C    | Linear PCM (`NONE`, `twos`, `sowt`), IMA4   | `aiff`       | Yes     |
//! | WAVE      | Linear PCM                                  | `wav`        | Yes     |
//!
//! Only mono and stereo streams of 8 or 16-bit native-endian linear PCM, or IMA4 ADPCM, are
//! accepted. IMA4 streams are decoded to 16-bit linear PCM.
//!
//! # Usage
//!
//! For the common case, call [`decode_file`]. To customize how files are opened, or how IMA4 is
//! decoded, instantiate a [`SampleDecoder`] with a [`MediaProvider`][core::source::MediaProvider]
//! and [`DecoderOptions`][core::codecs::DecoderOptions].
//!
//! Decoding never yields a partial buffer: either the whole file is decoded, or an
//! [`Error`][core::errors::Error] describes why it could not be.

use std::path::Path;

use sonance_codec_ima4::Ima4Decoder;
use sonance_core::buffer::SampleBuffer;
use sonance_core::codecs::DecoderOptions;
use sonance_core::errors::{Error, Result};
use sonance_core::format::{ByteOrder, Encoding, FormatDescriptor};
use sonance_core::source::{MediaProvider, RawMedia};
use sonance_core::validate::validate;

pub use sonance_core as core;
pub use sonance_format_riff::RiffProvider;

use log::debug;

/// `SampleDecoder` turns media files into validated [`SampleBuffer`]s.
///
/// The decoder holds no state between calls. It may be shared between threads, and every call to
/// [`decode_file`](SampleDecoder::decode_file) is independent.
pub struct SampleDecoder<P: MediaProvider = RiffProvider> {
    provider: P,
    ima4: Ima4Decoder,
}

impl SampleDecoder<RiffProvider> {
    /// Instantiate a new `SampleDecoder` that reads files with the default provider and options.
    pub fn new() -> Self {
        Default::default()
    }
}

impl Default for SampleDecoder<RiffProvider> {
    fn default() -> Self {
        SampleDecoder::with_provider(RiffProvider::default(), &Default::default())
    }
}

impl<P: MediaProvider> SampleDecoder<P> {
    /// Instantiate a new `SampleDecoder` that reads files with the provided media provider.
    pub fn with_provider(provider: P, options: &DecoderOptions) -> Self {
        SampleDecoder { provider, ima4: Ima4Decoder::new(options) }
    }

    /// Gets the media provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Decodes the file at `path` into a sample buffer.
    ///
    /// Errors from the media provider are returned unchanged. If the format of the file is not
    /// supported, an `InvalidSampleFormat` error is returned. If an IMA4 stream is malformed, a
    /// `MalformedStream` error is returned. If the decoded samples do not form a valid buffer, a
    /// `CannotCreateBuffer` error wrapping the cause is returned.
    pub fn decode_file<T: AsRef<Path>>(&self, path: T) -> Result<SampleBuffer> {
        let media = self.provider.read_media(path.as_ref())?;
        self.decode_media(media)
    }

    /// Validates and decodes raw media, as read by a media provider, into a sample buffer.
    pub fn decode_media(&self, media: RawMedia) -> Result<SampleBuffer> {
        let RawMedia { format, data } = media;

        validate(&format)?;

        let (format, samples) = match format.encoding {
            Encoding::Ima4Adpcm => {
                debug!("decoding {} bytes of ima4", data.len());

                let pcm = self.ima4.decode(&data, format.channels as usize)?;

                let format = FormatDescriptor {
                    bits_per_channel: 16,
                    byte_order: ByteOrder::NATIVE,
                    encoding: Encoding::LinearPcm,
                    ..format
                };

                (format, pcm)
            }
            _ => (format, data),
        };

        SampleBuffer::new(format, samples).map_err(|err| Error::CannotCreateBuffer(Box::new(err)))
    }
}

/// Decodes the file at `path` into a sample buffer using the default media provider and options.
///
/// See [`SampleDecoder::decode_file`].
pub fn decode_file<T: AsRef<Path>>(path: T) -> Result<SampleBuffer> {
    SampleDecoder::new().decode_file(path)
}
