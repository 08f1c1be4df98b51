// Sonance
// Copyright (c) 2026 The Project Sonance Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use sonance_core::errors::Result;
use sonance_core::io::ReadBytes;
use sonance_core::util::clamp::{clamp_i16, clamp_to};

use crate::common::{u16_to_i32, Nibble};

/// The size of one IMA4 packet in bytes: a 2 byte preamble and 32 bytes of nibbles.
pub const PACKET_SIZE: usize = 34;

/// The number of samples decoded from one IMA4 packet.
pub const SAMPLES_PER_PACKET: usize = 64;

#[rustfmt::skip]
const IMA_INDEX_TABLE: [i32; 16] = [
    -1, -1, -1, -1, 2, 4, 6, 8,
    -1, -1, -1, -1, 2, 4, 6, 8,
];

#[rustfmt::skip]
const IMA_STEP_TABLE: [i32; 89] = [
    7, 8, 9, 10, 11, 12, 13, 14, 16, 17,
    19, 21, 23, 25, 28, 31, 34, 37, 41, 45,
    50, 55, 60, 66, 73, 80, 88, 97, 107, 118,
    130, 143, 157, 173, 190, 209, 230, 253, 279, 307,
    337, 371, 408, 449, 494, 544, 598, 658, 724, 796,
    876, 963, 1060, 1166, 1282, 1411, 1552, 1707, 1878, 2066,
    2272, 2499, 2749, 3024, 3327, 3660, 4026, 4428, 4871, 5358,
    5894, 6484, 7132, 7845, 8630, 9493, 10442, 11487, 12635, 13899,
    15289, 16818, 18500, 20350, 22385, 24623, 27086, 29794, 32767,
];

const MAX_STEP_INDEX: i32 = IMA_STEP_TABLE.len() as i32 - 1;

/// `PacketStatus` holds the decoder state of a single packet. It is seeded from the packet
/// preamble and discarded at the end of the packet.
struct PacketStatus {
    predictor: i32,
    step_index: i32,
    bounds: (i32, i32),
}

impl PacketStatus {
    fn read_preamble<B: ReadBytes>(stream: &mut B, bounds: (i32, i32)) -> Result<Self> {
        let preamble = stream.read_be_u16()?;
        let predictor = u16_to_i32!(preamble & 0xFF80);
        let step_index = i32::from(preamble & 0x7F).min(MAX_STEP_INDEX);

        Ok(PacketStatus { predictor, step_index, bounds })
    }

    fn expand_nibble(&mut self, byte: u8, nibble: Nibble) -> i16 {
        let nibble = nibble.get_nibble(byte);
        let step = IMA_STEP_TABLE[self.step_index as usize];
        let sign = (nibble & 0x08) != 0;
        let delta = (nibble & 0x07) as i32;
        // Integer form of (delta + 0.5) * step / 4.
        let diff = ((2 * delta + 1) * step) >> 3;
        let predictor = if sign { self.predictor - diff } else { self.predictor + diff };
        self.predictor = clamp_to(predictor, self.bounds);
        self.step_index =
            (self.step_index + IMA_INDEX_TABLE[nibble as usize]).clamp(0, MAX_STEP_INDEX);
        clamp_i16(self.predictor)
    }
}

/// Decodes one packet from `stream` into `out`. The samples are written in decode order: the
/// lower nibble of each byte, then the upper nibble.
pub(crate) fn decode_packet<B: ReadBytes>(
    stream: &mut B,
    out: &mut [i16; SAMPLES_PER_PACKET],
    bounds: (i32, i32),
) -> Result<()> {
    let mut status = PacketStatus::read_preamble(stream, bounds)?;
    for byte in 0..(PACKET_SIZE - 2) {
        let nibbles = stream.read_u8()?;
        out[byte * 2] = status.expand_nibble(nibbles, Nibble::Lower);
        out[byte * 2 + 1] = status.expand_nibble(nibbles, Nibble::Upper);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sonance_core::codecs::PredictorRange;
    use sonance_core::io::BufReader;

    fn decode(packet: &[u8], range: PredictorRange) -> [i16; SAMPLES_PER_PACKET] {
        let mut out = [0; SAMPLES_PER_PACKET];
        decode_packet(&mut BufReader::new(packet), &mut out, range.bounds()).unwrap();
        out
    }

    #[test]
    fn verify_step_table() {
        assert_eq!(IMA_STEP_TABLE[0], 7);
        assert_eq!(IMA_STEP_TABLE[88], 32767);
        assert!(IMA_STEP_TABLE.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn verify_preamble() {
        // Predictor 0x1280, step index 0x7F clamped to 88.
        let mut status =
            PacketStatus::read_preamble(&mut BufReader::new(&[0x12, 0xFF]), (-65536, 65535))
                .unwrap();
        assert_eq!(status.predictor, 0x1280);
        assert_eq!(status.step_index, 88);

        // The predictor is sign extended.
        status = PacketStatus::read_preamble(&mut BufReader::new(&[0xFF, 0x85]), (-65536, 65535))
            .unwrap();
        assert_eq!(status.predictor, -128);
        assert_eq!(status.step_index, 5);
    }

    #[test]
    fn verify_silence() {
        // With a zero predictor and step index, nibbles 0 and 8 alternately nudge the predictor by
        // +/- (7 >> 3) = 0, so the packet decodes to silence.
        let mut packet = [0x08u8; PACKET_SIZE];
        packet[0] = 0x00;
        packet[1] = 0x00;
        assert_eq!(decode(&packet, PredictorRange::Extended), [0; SAMPLES_PER_PACKET]);
    }

    #[test]
    fn verify_nibble_order() {
        // Step index 0 (step 7). The first byte is 0x07: the lower nibble (7) is decoded first.
        //   nibble 7: diff = (15 * 7) >> 3 = 13, predictor = 13, step index = 8 (step 16).
        //   nibble 0: diff = (1 * 16) >> 3 = 2, predictor = 15, step index = 7 (step 14).
        let mut packet = [0u8; PACKET_SIZE];
        packet[2] = 0x07;

        let out = decode(&packet, PredictorRange::Extended);
        assert_eq!(out[0], 13);
        assert_eq!(out[1], 15);

        // Swapping the nibbles changes the order.
        //   nibble 0: diff = 7 >> 3 = 0, predictor = 0, step index = 0.
        //   nibble 7: diff = 13, predictor = 13.
        packet[2] = 0x70;
        let out = decode(&packet, PredictorRange::Extended);
        assert_eq!(out[0], 0);
        assert_eq!(out[1], 13);
    }

    #[test]
    fn verify_negative_nibble() {
        // Predictor 0, step index 0. Nibble 0xF: diff = 13, negated.
        let mut packet = [0u8; PACKET_SIZE];
        packet[2] = 0x0F;
        let out = decode(&packet, PredictorRange::Extended);
        assert_eq!(out[0], -13);
    }

    #[test]
    fn verify_step_is_updated_every_nibble() {
        // Starting at step index 0, four consecutive 0x7 nibbles step the index by 8 each time:
        // 0 -> 8 -> 16 -> 24, so the steps used are 7, 16, 34, 73.
        let mut packet = [0u8; PACKET_SIZE];
        packet[2] = 0x77;
        packet[3] = 0x77;

        let out = decode(&packet, PredictorRange::Extended);

        let mut expected = 0;
        for (i, step) in [7, 16, 34, 73].iter().enumerate() {
            expected += (15 * step) >> 3;
            assert_eq!(i32::from(out[i]), expected);
        }
    }

    #[test]
    fn verify_clamp_positive() {
        // Predictor 0x7F80 (32640), step index 88. Every 0x7 nibble adds (15 * 32767) >> 3 = 61438.
        let mut packet = [0x77u8; PACKET_SIZE];
        packet[0] = 0x7F;
        packet[1] = 0xD8;

        for range in [PredictorRange::Extended, PredictorRange::Sample] {
            let out = decode(&packet, range);
            assert!(out.iter().all(|&s| s == i16::MAX));
        }
    }

    #[test]
    fn verify_clamp_negative() {
        // Predictor 0x8000 (-32768), step index 88. Every 0xF nibble subtracts 61438.
        let mut packet = [0xFFu8; PACKET_SIZE];
        packet[0] = 0x80;
        packet[1] = 0x58;

        for range in [PredictorRange::Extended, PredictorRange::Sample] {
            let out = decode(&packet, range);
            assert!(out.iter().all(|&s| s == i16::MIN));
        }
    }

    #[test]
    fn verify_predictor_range() {
        // Predictor 32640, step index 88. The first byte is 0xF7:
        //   nibble 0x7: 32640 + 61438 = 94078, clamped to the upper bound.
        //   nibble 0xF: upper bound - 61438.
        let mut packet = [0u8; PACKET_SIZE];
        packet[0] = 0x7F;
        packet[1] = 0xD8;
        packet[2] = 0xF7;

        let out = decode(&packet, PredictorRange::Extended);
        assert_eq!(out[0], i16::MAX);
        assert_eq!(out[1], (65535 - 61438) as i16);

        let out = decode(&packet, PredictorRange::Sample);
        assert_eq!(out[0], i16::MAX);
        assert_eq!(out[1], (32767 - 61438) as i16);
    }

    #[test]
    fn verify_truncated_packet() {
        let packet = [0u8; PACKET_SIZE - 1];
        let mut out = [0; SAMPLES_PER_PACKET];
        assert!(decode_packet(&mut BufReader::new(&packet), &mut out, (-65536, 65535)).is_err());
    }
}
