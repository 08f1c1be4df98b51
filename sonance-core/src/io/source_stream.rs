// Sonance
// Copyright (c) 2026 The Project Sonance Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::io;
use std::io::Read;

use super::ReadBytes;

/// A `SourceStream` reads bytes from any source implementing [`std::io::Read`], and tracks the
/// number of bytes consumed.
///
/// Wrap unbuffered sources, such as a `std::fs::File`, in a [`std::io::BufReader`] first.
pub struct SourceStream<R: Read> {
    inner: R,
    pos: u64,
}

impl<R: Read> SourceStream<R> {
    /// Instantiate a new `SourceStream` by taking ownership of the provided reader.
    pub fn new(inner: R) -> Self {
        SourceStream { inner, pos: 0 }
    }
}

impl<R: Read> ReadBytes for SourceStream<R> {
    #[inline(always)]
    fn read_byte(&mut self) -> io::Result<u8> {
        let mut byte = [0u8; 1];
        self.read_buf_exact(&mut byte)?;
        Ok(byte[0])
    }

    #[inline(always)]
    fn read_double_bytes(&mut self) -> io::Result<[u8; 2]> {
        let mut bytes = [0u8; 2];
        self.read_buf_exact(&mut bytes)?;
        Ok(bytes)
    }

    #[inline(always)]
    fn read_quad_bytes(&mut self) -> io::Result<[u8; 4]> {
        let mut bytes = [0u8; 4];
        self.read_buf_exact(&mut bytes)?;
        Ok(bytes)
    }

    fn read_buf_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        self.inner.read_exact(buf)?;
        self.pos += buf.len() as u64;
        Ok(())
    }

    fn ignore_bytes(&mut self, count: u64) -> io::Result<()> {
        let skipped = io::copy(&mut (&mut self.inner).take(count), &mut io::sink())?;
        self.pos += skipped;

        if skipped < count {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "end of stream"));
        }
        Ok(())
    }

    #[inline(always)]
    fn pos(&self) -> u64 {
        self.pos
    }
}
