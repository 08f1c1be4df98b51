// Sonance
// Copyright (c) 2026 The Project Sonance Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `buffer` module provides the validated, decoded sample buffer.

use crate::errors::{Error, Result};
use crate::format::FormatDescriptor;

/// `SampleBuffer` owns a whole number of interleaved linear PCM frames together with the
/// descriptor of their layout.
///
/// A `SampleBuffer` is immutable once constructed. The length of its sample data is always an
/// exact multiple of the frame size of its format.
#[derive(Clone, Debug)]
pub struct SampleBuffer {
    format: FormatDescriptor,
    samples: Vec<u8>,
}

impl SampleBuffer {
    /// Instantiate a new `SampleBuffer`, taking ownership of the provided sample data.
    ///
    /// Fails with [`Error::MalformedBuffer`] if the length of `samples` is not a multiple of the
    /// frame size of `format`, or if the frame size is zero.
    pub fn new(format: FormatDescriptor, samples: Vec<u8>) -> Result<Self> {
        let frame_size = format.frame_size();

        if frame_size == 0 || samples.len() % frame_size != 0 {
            return Err(Error::MalformedBuffer { len: samples.len(), frame_size });
        }

        Ok(SampleBuffer { format, samples })
    }

    /// Gets the format of the samples.
    pub fn format(&self) -> &FormatDescriptor {
        &self.format
    }

    /// Gets the interleaved sample data.
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Gets the number of frames in the buffer.
    pub fn frame_count(&self) -> usize {
        self.samples.len() / self.format.frame_size()
    }

    /// Gets the duration of the buffer in seconds.
    pub fn duration(&self) -> f64 {
        self.frame_count() as f64 / self.format.sample_rate
    }

    /// Returns true if the buffer contains no frames.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Consumes the buffer, returning the sample data.
    pub fn into_samples(self) -> Vec<u8> {
        self.samples
    }
}
