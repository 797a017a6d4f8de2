// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Custom assertions for frame comparisons

use super::fixtures::pixel;
use rspgfx::core::system::System;

/// Assert framebuffer pixel has expected color
#[allow(dead_code)]
pub fn assert_pixel(system: &System, x: u32, y: u32, expected: u16) {
    let actual = pixel(system, x, y);
    assert_eq!(
        actual, expected,
        "Pixel at ({}, {}) mismatch: expected 0x{:04X}, got 0x{:04X}",
        x, y, expected, actual
    );
}

/// Assert two systems scan out identical frames
///
/// Reports the first differing pixel rather than two opaque hashes.
#[allow(dead_code)]
pub fn assert_frames_equal(a: &System, b: &System) {
    let (fa, fb) = (a.framebuffer(), b.framebuffer());
    assert_eq!(
        (fa.width, fa.height),
        (fb.width, fb.height),
        "Frame size mismatch"
    );

    for y in 0..fa.height {
        for x in 0..fa.width {
            let (pa, pb) = (pixel(a, x, y), pixel(b, x, y));
            assert_eq!(
                pa, pb,
                "Frames differ at ({}, {}): 0x{:04X} vs 0x{:04X}",
                x, y, pa, pb
            );
        }
    }
    assert_eq!(a.frame_crc32(), b.frame_crc32());
}

/// Assert the frame has at least one pixel that is not `background`
#[allow(dead_code)]
pub fn assert_drew_something(system: &System, background: u16) {
    let fb = system.framebuffer();
    let drawn = (0..fb.height)
        .flat_map(|y| (0..fb.width).map(move |x| (x, y)))
        .any(|(x, y)| pixel(system, x, y) != background);
    assert!(drawn, "Frame is entirely 0x{:04X}", background);
}
