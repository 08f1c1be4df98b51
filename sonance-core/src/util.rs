// Sonance
// Copyright (c) 2026 The Project Sonance Developers.
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The `util` module provides a repository of commonly used utility functions sorted into
//! distinct categories.

pub mod clamp {
    //! The `clamp` module provides functions to clamp values to a range.

    /// Clamps the given value to the [-32_768, 32_767] range.
    #[inline]
    pub fn clamp_i16(val: i32) -> i16 {
        // Add 32_768 (0x8000) to map the valid range onto [0, 65_535]. If any bit above the 16th
        // is set, the value is out of range.
        if val.wrapping_add(0x8000) & !0xffff == 0 {
            val as i16
        }
        else {
            // The sign bit selects the limit: 0x7fff ^ 0x0000 = 0x7fff, 0x7fff ^ 0xffff = 0x8000.
            0x7fff ^ val.wrapping_shr(31) as i16
        }
    }

    /// Clamps the given value to the inclusive range given by `bounds`.
    #[inline]
    pub fn clamp_to(val: i32, bounds: (i32, i32)) -> i32 {
        val.clamp(bounds.0, bounds.1)
    }

}
