// Sonance
// Copyright (c) 2026 The Project Sonance Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `format` module describes the layout of a stream of audio samples.

use std::fmt;

/// The order in which the bytes of a multi-byte sample are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    LittleEndian,
    BigEndian,
}

impl ByteOrder {
    /// The byte order of the platform.
    #[cfg(target_endian = "little")]
    pub const NATIVE: ByteOrder = ByteOrder::LittleEndian;

    /// The byte order of the platform.
    #[cfg(target_endian = "big")]
    pub const NATIVE: ByteOrder = ByteOrder::BigEndian;

    /// Returns true if this is the byte order of the platform.
    pub fn is_native(&self) -> bool {
        *self == ByteOrder::NATIVE
    }
}

/// The encoding of the samples in a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// Uncompressed, signed or unsigned, integer samples.
    LinearPcm,
    /// Apple IMA4 ADPCM, 34 byte packets of 64 samples each.
    Ima4Adpcm,
    /// Any other encoding, identified by the four character code the container used for it.
    Unknown([u8; 4]),
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Encoding::LinearPcm => write!(f, "linear pcm"),
            Encoding::Ima4Adpcm => write!(f, "ima4 adpcm"),
            Encoding::Unknown(fourcc) => write!(f, "unknown ({})", String::from_utf8_lossy(fourcc)),
        }
    }
}

/// `FormatDescriptor` describes a stream of samples: its rate, channel layout, sample width,
/// byte order, and encoding.
///
/// A descriptor is produced once by a media provider and never changes afterwards. It is not
/// necessarily valid; see [`validate`](crate::validate::validate).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormatDescriptor {
    /// The number of frames per second.
    pub sample_rate: f64,
    /// The number of interleaved channels.
    pub channels: u32,
    /// The number of bits in one sample of one channel.
    pub bits_per_channel: u32,
    /// The byte order of multi-byte samples.
    pub byte_order: ByteOrder,
    /// The sample encoding.
    pub encoding: Encoding,
}

impl FormatDescriptor {
    /// Instantiate a native-endian linear PCM descriptor.
    pub fn linear_pcm(sample_rate: f64, channels: u32, bits_per_channel: u32) -> Self {
        FormatDescriptor {
            sample_rate,
            channels,
            bits_per_channel,
            byte_order: ByteOrder::NATIVE,
            encoding: Encoding::LinearPcm,
        }
    }

    /// Get the number of bytes in one sample of one channel.
    pub fn bytes_per_sample(&self) -> usize {
        (self.bits_per_channel / 8) as usize
    }

    /// Get the number of bytes in one frame, that is, one sample for every channel.
    pub fn frame_size(&self) -> usize {
        self.channels as usize * self.bytes_per_sample()
    }
}

impl fmt::Display for FormatDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Hz, {} ch, {} bit, {:?}, {}",
            self.sample_rate, self.channels, self.bits_per_channel, self.byte_order, self.encoding
        )
    }
}
