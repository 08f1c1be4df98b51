// Sonance
// Copyright (c) 2026 The Project Sonance Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fmt;

use sonance_core::errors::{metadata_error, Result};
use sonance_core::format::{ByteOrder, Encoding, FormatDescriptor};
use sonance_core::io::ReadBytes;

use extended::Extended;
use log::warn;

use crate::chunks::{parser, ChunkParser, ParseChunk, ParseChunkTag};
use crate::common::{check_sample_rate, sample_byte_order};

/// The compression type of uncompressed AIFF, and of AIFF-C files that declare none.
const COMPRESSION_NONE: [u8; 4] = *b"NONE";

/// The length of one IMA4 packet in bytes.
const IMA4_PACKET_LEN: u64 = 34;

/// `CommonChunk` is a required AIFF chunk, containing the format of the sound data.
pub struct CommonChunk {
    /// The number of channels.
    pub n_channels: u32,
    /// The number of sample frames. For IMA4, the number of packets per channel.
    pub n_sample_frames: u32,
    /// The sample size in bits.
    pub sample_size: u32,
    /// The sample rate in Hz.
    pub sample_rate: f64,
    /// The AIFF-C compression type.
    pub compression: [u8; 4],
}

impl CommonChunk {
    fn read_fields<B: ReadBytes>(reader: &mut B) -> Result<Self> {
        let n_channels = reader.read_be_i16()?;
        let n_sample_frames = reader.read_be_u32()?;
        let sample_size = reader.read_be_i16()?;

        let mut sample_rate = [0u8; 10];
        reader.read_buf_exact(&mut sample_rate)?;

        let sample_rate = check_sample_rate(Extended::from_be_bytes(sample_rate).to_f64())?;

        if n_channels < 0 {
            return metadata_error("aiff: invalid channel count");
        }

        if sample_size < 0 {
            return metadata_error("aiff: invalid sample size");
        }

        Ok(CommonChunk {
            n_channels: n_channels as u32,
            n_sample_frames,
            sample_size: sample_size as u32,
            sample_rate,
            compression: COMPRESSION_NONE,
        })
    }

    /// Gets the length of the sound data, in bytes, implied by the frame count. Returns `None` if
    /// the compression type is unknown.
    pub fn sound_data_len(&self) -> Option<u64> {
        let frame_len = match self.format_descriptor().encoding {
            Encoding::LinearPcm => u64::from((self.sample_size + 7) / 8),
            Encoding::Ima4Adpcm => IMA4_PACKET_LEN,
            Encoding::Unknown(_) => return None,
        };
        Some(u64::from(self.n_sample_frames) * u64::from(self.n_channels) * frame_len)
    }

    /// Gets the raw format descriptor of the sound data.
    pub fn format_descriptor(&self) -> FormatDescriptor {
        let (encoding, byte_order) = match &self.compression {
            b"NONE" | b"none" | b"twos" | b"TWOS" => (Encoding::LinearPcm, ByteOrder::BigEndian),
            b"sowt" | b"SOWT" => (Encoding::LinearPcm, ByteOrder::LittleEndian),
            // IMA4 packets are a byte stream.
            b"ima4" | b"IMA4" => (Encoding::Ima4Adpcm, ByteOrder::NATIVE),
            other => (Encoding::Unknown(*other), ByteOrder::NATIVE),
        };

        FormatDescriptor {
            sample_rate: self.sample_rate,
            channels: self.n_channels,
            bits_per_channel: self.sample_size,
            byte_order: sample_byte_order(self.sample_size, byte_order),
            encoding,
        }
    }
}

impl ParseChunk for CommonChunk {
    fn parse<B: ReadBytes>(reader: &mut B, _tag: [u8; 4], len: u32) -> Result<CommonChunk> {
        if len < 18 {
            return metadata_error("aiff: malformed common chunk");
        }

        let common = CommonChunk::read_fields(reader)?;
        reader.ignore_bytes(u64::from(len - 18))?;

        Ok(common)
    }
}

pub trait CommonChunkParser {
    fn parse_aiff<B: ReadBytes>(self, reader: &mut B) -> Result<CommonChunk>;
    fn parse_aifc<B: ReadBytes>(self, reader: &mut B) -> Result<CommonChunk>;
}

impl CommonChunkParser for ChunkParser<CommonChunk> {
    fn parse_aiff<B: ReadBytes>(self, reader: &mut B) -> Result<CommonChunk> {
        self.parse(reader)
    }

    /// Parses the common chunk of an AIFF-C file, which extends the AIFF common chunk with a
    /// compression type and name.
    fn parse_aifc<B: ReadBytes>(self, reader: &mut B) -> Result<CommonChunk> {
        let len = self.chunk_len();

        if len < 22 {
            return metadata_error("aifc: malformed common chunk");
        }

        let mut common = CommonChunk::read_fields(reader)?;
        common.compression = reader.read_quad_bytes()?;

        // The remainder of the chunk is the compression name, a pascal string. It is only
        // informational.
        reader.ignore_bytes(u64::from(len - 22))?;

        Ok(common)
    }
}

impl fmt::Display for CommonChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CommonChunk {{")?;
        writeln!(f, "\tn_channels: {},", self.n_channels)?;
        writeln!(f, "\tn_sample_frames: {},", self.n_sample_frames)?;
        writeln!(f, "\tsample_size: {},", self.sample_size)?;
        writeln!(f, "\tsample_rate: {} Hz,", self.sample_rate)?;
        writeln!(f, "\tcompression: {},", String::from_utf8_lossy(&self.compression))?;
        writeln!(f, "}}")
    }
}

/// `SoundChunk` is a required AIFF chunk, containing the audio data. Parsing the chunk consumes
/// its header and leaves the reader at the first byte of sound data.
pub struct SoundChunk {
    /// The length of the sound data in bytes.
    pub data_len: u32,
}

impl ParseChunk for SoundChunk {
    fn parse<B: ReadBytes>(reader: &mut B, _: [u8; 4], len: u32) -> Result<SoundChunk> {
        if len < 8 {
            return metadata_error("aiff: malformed sound chunk");
        }

        let offset = reader.read_be_u32()?;
        let block_size = reader.read_be_u32()?;

        if block_size != 0 {
            warn!("ignoring sound chunk block size of {} bytes", block_size);
        }

        // The offset is the number of bytes preceding the first sample frame.
        if offset > len - 8 {
            return metadata_error("aiff: sound chunk offset exceeds chunk length");
        }

        reader.ignore_bytes(u64::from(offset))?;

        Ok(SoundChunk { data_len: len - 8 - offset })
    }
}

pub enum RiffAiffChunks {
    Common(ChunkParser<CommonChunk>),
    Sound(ChunkParser<SoundChunk>),
}

impl ParseChunkTag for RiffAiffChunks {
    fn parse_tag(tag: [u8; 4], len: u32) -> Option<Self> {
        match &tag {
            b"COMM" => parser!(RiffAiffChunks::Common, CommonChunk, tag, len),
            b"SSND" => parser!(RiffAiffChunks::Sound, SoundChunk, tag, len),
            _ => None,
        }
    }
}
