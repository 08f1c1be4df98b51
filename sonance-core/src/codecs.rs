// Sonance
// Copyright (c) 2026 The Project Sonance Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `codecs` module provides the options shared by sample decoders.

/// The range an ADPCM predictor is clamped to after every nibble.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PredictorRange {
    /// Clamp the predictor to `[-65536, 65535]`. Emitted samples saturate to 16 bits.
    Extended,
    /// Clamp the predictor to the 16-bit sample range, `[-32768, 32767]`.
    Sample,
}

impl PredictorRange {
    /// Gets the inclusive lower and upper bounds of the range.
    pub fn bounds(&self) -> (i32, i32) {
        match self {
            PredictorRange::Extended => (-65536, 65535),
            PredictorRange::Sample => (i16::MIN as i32, i16::MAX as i32),
        }
    }
}

impl Default for PredictorRange {
    fn default() -> Self {
        PredictorRange::Extended
    }
}

/// `DecoderOptions` is a common set of options that all decoders use.
#[derive(Copy, Clone, Debug)]
pub struct DecoderOptions {
    /// The range the ADPCM predictor is clamped to. Default: `PredictorRange::Extended`.
    pub predictor_range: PredictorRange,
}

impl Default for DecoderOptions {
    fn default() -> Self {
        DecoderOptions { predictor_range: Default::default() }
    }
}
