// Sonance
// Copyright (c) 2026 The Project Sonance Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

#![warn(rust_2018_idioms)]
#![forbid(unsafe_code)]

//! Apple IMA4 ADPCM decoding.
//!
//! An IMA4 stream is a sequence of 34 byte packets. Each packet holds 64 samples of a single
//! channel and is decoded independently of every other packet. For multi-channel streams, the
//! packets of each channel alternate one-for-one in channel order.

use sonance_core::codecs::{DecoderOptions, PredictorRange};
use sonance_core::errors::{alloc_error, stream_error, Result};
use sonance_core::io::BufReader;

use log::debug;

mod common;
mod packet;

pub use packet::{PACKET_SIZE, SAMPLES_PER_PACKET};

/// The number of bytes of 16-bit linear PCM produced by one IMA4 packet.
pub const DECODED_PACKET_SIZE: usize = 2 * SAMPLES_PER_PACKET;

/// IMA4 Adaptive Differential Pulse Code Modulation (ADPCM) decoder.
///
/// The decoder is stateless: decoding the same input twice yields the same output.
#[derive(Clone, Debug, Default)]
pub struct Ima4Decoder {
    predictor_range: PredictorRange,
}

impl Ima4Decoder {
    /// Instantiate a new `Ima4Decoder` with the provided options.
    pub fn new(options: &DecoderOptions) -> Self {
        Ima4Decoder { predictor_range: options.predictor_range }
    }

    /// Decodes an IMA4 stream of `n_channels` interleaved channels into frame-interleaved,
    /// native-endian, 16-bit linear PCM.
    ///
    /// The length of `buf` must be a positive multiple of `34 * n_channels` bytes, otherwise a
    /// `MalformedStream` error is returned and nothing is decoded.
    pub fn decode(&self, buf: &[u8], n_channels: usize) -> Result<Vec<u8>> {
        let group_size = PACKET_SIZE * n_channels;

        if group_size == 0 || buf.is_empty() || buf.len() % group_size != 0 {
            return stream_error("packet alignment");
        }

        let n_groups = buf.len() / group_size;
        let out_len = n_groups * n_channels * DECODED_PACKET_SIZE;

        debug!(
            "decoding {} ima4 packets per channel for {} channels into {} bytes",
            n_groups, n_channels, out_len
        );

        let mut out = Vec::new();
        if out.try_reserve_exact(out_len).is_err() {
            return alloc_error(out_len);
        }

        let bounds = self.predictor_range.bounds();
        let mut reader = BufReader::new(buf);
        let mut decoded = vec![[0i16; SAMPLES_PER_PACKET]; n_channels];

        for _ in 0..n_groups {
            for channel in decoded.iter_mut() {
                packet::decode_packet(&mut reader, channel, bounds)?;
            }

            // Interleave the packets of the group into frames.
            for i in 0..SAMPLES_PER_PACKET {
                for channel in decoded.iter() {
                    out.extend_from_slice(&channel[i].to_ne_bytes());
                }
            }
        }

        Ok(out)
    }
}

/// Decodes an IMA4 stream of `n_channels` interleaved channels with the default options.
///
/// See [`Ima4Decoder::decode`].
pub fn decode(buf: &[u8], n_channels: usize) -> Result<Vec<u8>> {
    Ima4Decoder::default().decode(buf, n_channels)
}
