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

//! Framebuffer scanout
//!
//! Converts the 5/5/5/1 framebuffer to RGBA8888 the way the display sees
//! it, and hashes the result for frame comparisons.

use super::gfx::Color;
use super::memory::Memory;

/// Read a framebuffer out as RGBA8888
///
/// Alpha is always 0xFF. Pixels that cannot be read scan out as black.
///
/// # Arguments
///
/// * `mem` - Memory holding the framebuffer
/// * `origin` - Address of pixel (0, 0)
/// * `width` - Visible width in pixels
/// * `height` - Visible height in pixels
/// * `stride` - Row stride in pixels
pub fn scanout_rgba8888(
    mem: &dyn Memory,
    origin: u32,
    width: u32,
    height: u32,
    stride: u32,
) -> Vec<u8> {
    let mut out = Vec::with_capacity(width as usize * height as usize * 4);
    for y in 0..height {
        let row = origin.wrapping_add(y.wrapping_mul(stride).wrapping_mul(2));
        for x in 0..width {
            let pixel = mem.read16(row.wrapping_add(x * 2)).unwrap_or(0);
            out.extend_from_slice(&Color::from_packed(pixel).to_rgba8888());
        }
    }
    out
}

/// CRC32 of the RGBA8888 scanout
pub fn frame_crc32(mem: &dyn Memory, origin: u32, width: u32, height: u32, stride: u32) -> u32 {
    crc32fast::hash(&scanout_rgba8888(mem, origin, width, height, stride))
}
