// Sonance
// Copyright (c) 2026 The Project Sonance Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `source` module defines the contract between the decoding pipeline and the providers that
//! open media files.

use std::path::Path;

use crate::errors::Result;
use crate::format::FormatDescriptor;

/// The raw contents of a media file: the descriptor of its samples, as reported by the container,
/// and the sample payload itself.
#[derive(Clone, Debug)]
pub struct RawMedia {
    /// The unvalidated format of the payload.
    pub format: FormatDescriptor,
    /// The raw sample payload.
    pub data: Vec<u8>,
}

/// `ProviderOptions` is a common set of options that all media providers use.
#[derive(Copy, Clone, Debug)]
pub struct ProviderOptions {
    /// The largest payload, in bytes, a provider will allocate. Default: 1 GiB.
    pub max_payload_len: usize,
}

impl Default for ProviderOptions {
    fn default() -> Self {
        ProviderOptions { max_payload_len: 1 << 30 }
    }
}

/// A `MediaProvider` opens a media file and extracts its format descriptor and raw payload.
///
/// Providers own all container parsing and all file handles. A handle must not outlive the call
/// to `read_media`.
pub trait MediaProvider: Send + Sync {
    /// Reads the format descriptor and raw payload of the file at `path`.
    ///
    /// Fails with `CannotReadFile` if the file cannot be opened or read, with
    /// `CannotAllocateMemory` if the payload cannot be buffered, or with `InvalidSampleFormat` if
    /// the container's format metadata cannot be understood.
    fn read_media(&self, path: &Path) -> Result<RawMedia>;
}

impl<F> MediaProvider for F
where
    F: Fn(&Path) -> Result<RawMedia> + Send + Sync,
{
    fn read_media(&self, path: &Path) -> Result<RawMedia> {
        self(path)
    }
}
