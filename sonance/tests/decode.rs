// Sonance
// Copyright (c) 2026 The Project Sonance Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use sonance::core::errors::{Error, FormatErrorKind, Result};
use sonance::core::format::{ByteOrder, Encoding, FormatDescriptor};
use sonance::core::source::RawMedia;
use sonance::SampleDecoder;

/// A file in the temporary directory that is removed when dropped.
struct TempFile {
    path: PathBuf,
}

impl TempFile {
    fn new(name: &str, contents: &[u8]) -> Self {
        let path = std::env::temp_dir().join(format!("sonance-{}-{}", std::process::id(), name));
        fs::write(&path, contents).unwrap();
        TempFile { path }
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

fn chunk(tag: &[u8; 4], body: &[u8], big_endian: bool) -> Vec<u8> {
    let len = body.len() as u32;
    let mut buf = Vec::new();
    buf.extend_from_slice(tag);
    buf.extend_from_slice(&if big_endian { len.to_be_bytes() } else { len.to_le_bytes() });
    buf.extend_from_slice(body);
    if body.len() & 1 == 1 {
        buf.push(0);
    }
    buf
}

/// Builds an AIFF-C file.
fn aifc(channels: i16, compression: &[u8; 4], sound: &[u8]) -> Vec<u8> {
    // IMA4 counts packets per channel, the other compression types count 16-bit frames.
    let frame_len = if compression == b"ima4" { 34 } else { 2 };
    let frames = sound.len() / (frame_len * channels as usize);

    let mut comm = Vec::new();
    comm.extend_from_slice(&channels.to_be_bytes());
    comm.extend_from_slice(&(frames as u32).to_be_bytes());
    comm.extend_from_slice(&16i16.to_be_bytes());
    // 44100 Hz as an 80-bit extended float.
    comm.extend_from_slice(&[0x40, 0x0E, 0xAC, 0x44, 0, 0, 0, 0, 0, 0]);
    comm.extend_from_slice(compression);
    comm.extend_from_slice(&[0, 0]);

    let mut ssnd = vec![0; 8];
    ssnd.extend_from_slice(sound);

    let body = [
        chunk(b"FVER", &0xA2805140u32.to_be_bytes(), true),
        chunk(b"COMM", &comm, true),
        chunk(b"SSND", &ssnd, true),
    ]
    .concat();

    let mut buf = Vec::new();
    buf.extend_from_slice(b"FORM");
    buf.extend_from_slice(&(body.len() as u32 + 4).to_be_bytes());
    buf.extend_from_slice(b"AIFC");
    buf.extend_from_slice(&body);
    buf
}

/// Builds a 16-bit PCM WAVE file.
fn wave(channels: u16, rate: u32, data: &[u8]) -> Vec<u8> {
    let mut fmt = Vec::new();
    fmt.extend_from_slice(&1u16.to_le_bytes());
    fmt.extend_from_slice(&channels.to_le_bytes());
    fmt.extend_from_slice(&rate.to_le_bytes());
    fmt.extend_from_slice(&(rate * 2 * u32::from(channels)).to_le_bytes());
    fmt.extend_from_slice(&(2 * channels).to_le_bytes());
    fmt.extend_from_slice(&16u16.to_le_bytes());

    let body = [chunk(b"fmt ", &fmt, false), chunk(b"data", data, false)].concat();

    let mut buf = Vec::new();
    buf.extend_from_slice(b"RIFF");
    buf.extend_from_slice(&(body.len() as u32 + 4).to_le_bytes());
    buf.extend_from_slice(b"WAVE");
    buf.extend_from_slice(&body);
    buf
}

fn ima4_format(channels: u32) -> FormatDescriptor {
    FormatDescriptor {
        encoding: Encoding::Ima4Adpcm,
        ..FormatDescriptor::linear_pcm(44100.0, channels, 16)
    }
}

#[test]
fn decode_one_second_of_pcm() {
    let data: Vec<u8> = (0..88200u32).map(|i| (i % 251) as u8).collect();
    let expected = data.clone();

    let provider = move |_: &Path| -> Result<RawMedia> {
        Ok(RawMedia { format: FormatDescriptor::linear_pcm(44100.0, 1, 16), data: data.clone() })
    };

    let buf = SampleDecoder::with_provider(provider, &Default::default())
        .decode_file("one-second.aiff")
        .unwrap();

    assert_eq!(buf.frame_count(), 44100);
    assert_eq!(buf.duration(), 1.0);
    assert_eq!(buf.samples(), &expected[..]);
}

#[test]
fn decode_two_ima4_packets() {
    let provider = |_: &Path| -> Result<RawMedia> {
        Ok(RawMedia { format: ima4_format(1), data: vec![0x17; 68] })
    };

    let buf = SampleDecoder::with_provider(provider, &Default::default())
        .decode_file("two-packets.aifc")
        .unwrap();

    assert_eq!(buf.samples().len(), 256);
    assert_eq!(buf.frame_count(), 128);
    assert_eq!(buf.format().bits_per_channel, 16);
    assert_eq!(buf.format().encoding, Encoding::LinearPcm);
}

#[test]
fn provider_read_failure_is_propagated() {
    let provider = |path: &Path| -> Result<RawMedia> {
        Err(Error::CannotReadFile(io::Error::new(
            io::ErrorKind::PermissionDenied,
            format!("{} is not readable", path.display()),
        )))
    };

    let err = SampleDecoder::with_provider(provider, &Default::default())
        .decode_file("locked.aiff")
        .unwrap_err();

    match err {
        Error::CannotReadFile(err) => {
            assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
            assert_eq!(err.to_string(), "locked.aiff is not readable");
        }
        other => panic!("expected a cannot read file error, got {:?}", other),
    }
}

#[test]
fn provider_allocation_failure_is_propagated() {
    let provider = |_: &Path| -> Result<RawMedia> { Err(Error::CannotAllocateMemory(1 << 20)) };

    let err = SampleDecoder::with_provider(provider, &Default::default())
        .decode_file("huge.aiff")
        .unwrap_err();

    assert!(matches!(err, Error::CannotAllocateMemory(len) if len == 1 << 20));
}

#[test]
fn decode_missing_file() {
    let path = std::env::temp_dir().join("sonance-this-file-does-not-exist.aiff");
    assert!(matches!(sonance::decode_file(path), Err(Error::CannotReadFile(_))));
}

#[test]
fn decode_short_file_declaring_huge_sound_data() {
    let mut contents = aifc(1, b"sowt", &[0; 4]);
    let len = contents.len();

    // Claim an unbounded FORM chunk and a 900 MiB sound chunk in a file of a few dozen bytes.
    contents[4..8].copy_from_slice(&u32::MAX.to_be_bytes());
    contents[len - 16..len - 12].copy_from_slice(&((900u32 << 20) + 8).to_be_bytes());

    let file = TempFile::new("truncated.aifc", &contents);
    assert!(matches!(sonance::decode_file(&file.path), Err(Error::CannotReadFile(_))));
}

#[test]
fn decode_ima4_aifc_file() {
    // Two packets per channel, silence on the left and a rising signal on the right.
    let mut sound = Vec::new();
    for _ in 0..2 {
        sound.extend_from_slice(&[0x00, 0x00]);
        sound.extend_from_slice(&[0x08; 32]);
        sound.extend_from_slice(&[0x00, 0x00]);
        sound.extend_from_slice(&[0x11; 32]);
    }

    let file = TempFile::new("stereo.aifc", &aifc(2, b"ima4", &sound));
    let buf = sonance::decode_file(&file.path).unwrap();

    assert_eq!(buf.format(), &FormatDescriptor::linear_pcm(44100.0, 2, 16));
    assert_eq!(buf.frame_count(), 128);

    let samples: Vec<i16> =
        buf.samples().chunks_exact(2).map(|s| i16::from_ne_bytes([s[0], s[1]])).collect();

    for frame in samples.chunks_exact(2) {
        assert_eq!(frame[0], 0);
    }

    let right: Vec<i16> = samples.chunks_exact(2).map(|frame| frame[1]).collect();
    assert!(right[..64].windows(2).all(|w| w[0] <= w[1]));
    assert!(right[63] > 0);
}

#[test]
fn decode_sowt_aifc_file() {
    let pcm: Vec<u8> = [1i16, -1, 300, -300].iter().flat_map(|s| s.to_le_bytes()).collect();

    let file = TempFile::new("mono.sowt.aifc", &aifc(1, b"sowt", &pcm));
    let result = sonance::decode_file(&file.path);

    if ByteOrder::NATIVE == ByteOrder::LittleEndian {
        let buf = result.unwrap();
        assert_eq!(buf.frame_count(), 4);
        assert_eq!(buf.samples(), &pcm[..]);
    }
    else {
        assert!(matches!(result, Err(Error::InvalidSampleFormat(FormatErrorKind::Endianness))));
    }
}

#[test]
fn decode_unsupported_compression() {
    let file = TempFile::new("mono.alaw.aifc", &aifc(1, b"alaw", &[0; 8]));
    assert!(matches!(
        sonance::decode_file(&file.path),
        Err(Error::InvalidSampleFormat(FormatErrorKind::Encoding))
    ));
}

#[test]
fn decode_misaligned_wave_file() {
    // Three bytes of 16-bit stereo is not a whole frame.
    let file = TempFile::new("misaligned.wav", &wave(2, 8000, &[0, 0, 0]));
    let result = sonance::decode_file(&file.path);

    if ByteOrder::NATIVE == ByteOrder::LittleEndian {
        match result {
            Err(Error::CannotCreateBuffer(cause)) => {
                assert!(matches!(*cause, Error::MalformedBuffer { len: 3, frame_size: 4 }))
            }
            other => panic!("expected a cannot create buffer error, got {:?}", other),
        }
    }
    else {
        assert!(matches!(result, Err(Error::InvalidSampleFormat(FormatErrorKind::Endianness))));
    }
}

#[test]
fn decode_files_concurrently() {
    let files: Vec<TempFile> = (0..4)
        .map(|i| {
            let sound = vec![0x31; 34 * (i + 1)];
            TempFile::new(&format!("concurrent-{}.aifc", i), &aifc(1, b"ima4", &sound))
        })
        .collect();

    let decoder = &SampleDecoder::new();

    std::thread::scope(|s| {
        let handles: Vec<_> = files
            .iter()
            .map(|file| {
                s.spawn(move || decoder.decode_file(&file.path).map(|buf| buf.frame_count()))
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap().unwrap(), 64 * (i + 1));
        }
    });
}
