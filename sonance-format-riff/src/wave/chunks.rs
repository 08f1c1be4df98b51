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

use crate::chunks::{parser, ChunkParser, ParseChunk, ParseChunkTag};
use crate::common::{check_sample_rate, sample_byte_order};

const WAVE_FORMAT_PCM: u16 = 0x0001;
const WAVE_FORMAT_EXTENSIBLE: u16 = 0xfffe;

pub struct WaveFormatChunk {
    /// The format tag, or for the extensible format, the sub-format tag.
    pub format_tag: u16,
    /// The number of channels.
    pub n_channels: u16,
    /// The sample rate in Hz.
    pub sample_rate: u32,
    /// The byte alignment of one audio frame.
    pub block_align: u16,
    /// The number of bits per sample.
    pub bits_per_sample: u16,
}

impl WaveFormatChunk {
    /// Gets the raw format descriptor of the data chunk.
    pub fn format_descriptor(&self) -> Result<FormatDescriptor> {
        let encoding = match self.format_tag {
            WAVE_FORMAT_PCM => Encoding::LinearPcm,
            // Identify other formats by the hexadecimal format tag.
            tag => {
                let mut fourcc = [0u8; 4];
                fourcc.copy_from_slice(format!("{:04x}", tag).as_bytes());
                Encoding::Unknown(fourcc)
            }
        };

        let bits_per_channel = u32::from(self.bits_per_sample);

        Ok(FormatDescriptor {
            sample_rate: check_sample_rate(f64::from(self.sample_rate))?,
            channels: u32::from(self.n_channels),
            bits_per_channel,
            // Samples are always little-endian in a WAVE file.
            byte_order: sample_byte_order(bits_per_channel, ByteOrder::LittleEndian),
            encoding,
        })
    }
}

impl ParseChunk for WaveFormatChunk {
    fn parse<B: ReadBytes>(reader: &mut B, _tag: [u8; 4], len: u32) -> Result<WaveFormatChunk> {
        // WaveFormat has a minimal length of 16 bytes. This may be extended with format specific
        // data later.
        if len < 16 {
            return metadata_error("wav: malformed fmt chunk");
        }

        let mut format_tag = reader.read_u16()?;
        let n_channels = reader.read_u16()?;
        let sample_rate = reader.read_u32()?;
        let _avg_bytes_per_sec = reader.read_u32()?;
        let block_align = reader.read_u16()?;
        let bits_per_sample = reader.read_u16()?;

        let mut consumed = 16;

        // The extensible format replaces the format tag with the first two bytes of the
        // sub-format GUID.
        if format_tag == WAVE_FORMAT_EXTENSIBLE {
            if len < 40 {
                return metadata_error("wav: malformed fmt_ext chunk");
            }

            let _extension_len = reader.read_u16()?;
            let _valid_bits_per_sample = reader.read_u16()?;
            let _channel_mask = reader.read_u32()?;
            format_tag = reader.read_u16()?;
            reader.ignore_bytes(14)?;

            consumed = 40;
        }

        reader.ignore_bytes(u64::from(len - consumed))?;

        Ok(WaveFormatChunk { format_tag, n_channels, sample_rate, block_align, bits_per_sample })
    }
}

impl fmt::Display for WaveFormatChunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "WaveFormatChunk {{")?;
        writeln!(f, "\tformat_tag: {:#06x},", self.format_tag)?;
        writeln!(f, "\tn_channels: {},", self.n_channels)?;
        writeln!(f, "\tsample_rate: {} Hz,", self.sample_rate)?;
        writeln!(f, "\tblock_align: {},", self.block_align)?;
        writeln!(f, "\tbits_per_sample: {},", self.bits_per_sample)?;
        writeln!(f, "}}")
    }
}

/// `DataChunk` is a required WAVE chunk, the body of which is the sample data.
pub struct DataChunk {
    pub len: u32,
}

impl ParseChunk for DataChunk {
    fn parse<B: ReadBytes>(_: &mut B, _: [u8; 4], len: u32) -> Result<DataChunk> {
        Ok(DataChunk { len })
    }
}

pub enum RiffWaveChunks {
    Format(ChunkParser<WaveFormatChunk>),
    Data(ChunkParser<DataChunk>),
}

impl ParseChunkTag for RiffWaveChunks {
    fn parse_tag(tag: [u8; 4], len: u32) -> Option<Self> {
        match &tag {
            b"fmt " => parser!(RiffWaveChunks::Format, WaveFormatChunk, tag, len),
            b"data" => parser!(RiffWaveChunks::Data, DataChunk, tag, len),
            _ => None,
        }
    }
}
