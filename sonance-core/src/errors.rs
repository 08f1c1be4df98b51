// Sonance
// Copyright (c) 2026 The Project Sonance Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `errors` module defines the common error type.

use std::error;
use std::fmt;
use std::io;
use std::result;

/// `FormatErrorKind` is a list of reasons why a format descriptor may be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatErrorKind {
    /// The samples are not in the native byte order of the platform.
    Endianness,
    /// The channel count is not mono or stereo.
    Channels,
    /// The bit depth of linear PCM samples is not 8 or 16 bits.
    Resolution,
    /// The sample encoding is neither linear PCM nor IMA4 ADPCM.
    Encoding,
    /// The container's format metadata could not be understood.
    Metadata(&'static str),
}

impl FormatErrorKind {
    fn as_str(&self) -> &'static str {
        match *self {
            FormatErrorKind::Endianness => "endianness",
            FormatErrorKind::Channels => "channels",
            FormatErrorKind::Resolution => "resolution",
            FormatErrorKind::Encoding => "encoding",
            FormatErrorKind::Metadata(msg) => msg,
        }
    }
}

/// `Error` provides an enumeration of all possible errors reported by Sonance.
#[derive(Debug)]
pub enum Error {
    /// The file could not be opened or read.
    CannotReadFile(io::Error),
    /// The format of the samples is not supported, or could not be determined.
    InvalidSampleFormat(FormatErrorKind),
    /// A buffer of the given length, in bytes, could not be allocated for the raw samples.
    CannotAllocateMemory(usize),
    /// The compressed stream is malformed and could not be decoded.
    MalformedStream(&'static str),
    /// The length of the sample data is not a whole number of frames.
    MalformedBuffer {
        /// The length of the sample data in bytes.
        len: usize,
        /// The size of one frame in bytes.
        frame_size: usize,
    },
    /// The sample buffer could not be created. The cause is wrapped.
    CannotCreateBuffer(Box<Error>),
}

impl Error {
    /// Returns the innermost error, following `CannotCreateBuffer` causes.
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::CannotCreateBuffer(cause) => cause.root_cause(),
            _ => self,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Error::CannotReadFile(ref err) => {
                write!(f, "cannot read file: {}", err)
            }
            Error::InvalidSampleFormat(ref kind) => {
                write!(f, "invalid sample format: {}", kind.as_str())
            }
            Error::CannotAllocateMemory(len) => {
                write!(f, "cannot allocate {} bytes for samples", len)
            }
            Error::MalformedStream(msg) => {
                write!(f, "malformed stream: {}", msg)
            }
            Error::MalformedBuffer { len, frame_size } => write!(
                f,
                "malformed buffer: {} bytes is not a multiple of the {} byte frame size",
                len, frame_size
            ),
            Error::CannotCreateBuffer(ref cause) => {
                write!(f, "cannot create buffer: {}", cause)
            }
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::CannotReadFile(ref err) => Some(err),
            Error::CannotCreateBuffer(ref cause) => Some(cause.as_ref()),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Error {
        Error::CannotReadFile(err)
    }
}

pub type Result<T> = result::Result<T, Error>;

/// Convenience function to create an invalid sample format error.
pub fn format_error<T>(kind: FormatErrorKind) -> Result<T> {
    Err(Error::InvalidSampleFormat(kind))
}

/// Convenience function to create an invalid sample format error for unreadable container
/// metadata.
pub fn metadata_error<T>(desc: &'static str) -> Result<T> {
    Err(Error::InvalidSampleFormat(FormatErrorKind::Metadata(desc)))
}

/// Convenience function to create a malformed stream error.
pub fn stream_error<T>(desc: &'static str) -> Result<T> {
    Err(Error::MalformedStream(desc))
}

/// Convenience function to create an allocation error.
pub fn alloc_error<T>(len: usize) -> Result<T> {
    Err(Error::CannotAllocateMemory(len))
}
