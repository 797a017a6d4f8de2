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

//! Texel format decoders
//!
//! Pure conversions from packed N64 texel data to 5/5/5/1 packed colors.
//! The per-texel helpers are shared with the rasterizer's sampler so that a
//! decoded image and a sampled texture always agree.
//!
//! # Intensity Formats
//!
//! Intensity texels become a gray with R = G = B = `round(value * 31 / max)`:
//!
//! | Format | Intensity     | Alpha bit          |
//! |--------|---------------|--------------------|
//! | I4     | 4 bits        | intensity > 0      |
//! | I8     | 8 bits        | intensity > 0      |
//! | IA8    | high nibble   | low nibble >= 8    |
//! | IA16   | high byte     | low byte >= 128    |
//!
//! Short input never fails: decoding simply stops at the last complete texel.

use super::types::Color;

/// Scale an intensity in `0..=max` to 5 bits with rounding
#[inline(always)]
fn scale_to_5bit(value: u32, max: u32) -> u8 {
    ((value * 31 + max / 2) / max) as u8
}

/// Decode one 4-bit intensity texel
#[inline(always)]
pub fn i4_texel(value: u8) -> u16 {
    let v = value & 0x0F;
    Color::gray(scale_to_5bit(v as u32, 15), v > 0).to_packed()
}

/// Decode one 8-bit intensity texel
#[inline(always)]
pub fn i8_texel(value: u8) -> u16 {
    Color::gray(scale_to_5bit(value as u32, 255), value > 0).to_packed()
}

/// Decode one IA8 texel (intensity high nibble, alpha low nibble)
#[inline(always)]
pub fn ia8_texel(value: u8) -> u16 {
    let intensity = (value >> 4) as u32;
    let alpha = value & 0x0F;
    Color::gray(scale_to_5bit(intensity, 15), alpha >= 8).to_packed()
}

/// Decode one IA16 texel (intensity high byte, alpha low byte)
#[inline(always)]
pub fn ia16_texel(value: u16) -> u16 {
    let intensity = (value >> 8) as u32;
    let alpha = value & 0xFF;
    Color::gray(scale_to_5bit(intensity, 255), alpha >= 128).to_packed()
}

/// Palette lookup that treats a short palette as transparent black
#[inline(always)]
fn lookup(palette: &[u16], index: usize) -> u16 {
    palette.get(index).copied().unwrap_or(0)
}

/// Number of texels to produce: the requested size, capped by available data
fn texel_count(width: u32, height: u32, available: usize) -> usize {
    (width as usize * height as usize).min(available)
}

/// Decode a CI4 image through a 16-entry palette
///
/// Two indices per byte, high nibble first.
///
/// # Examples
///
/// ```
/// use rspgfx::core::gfx::texture::decode_ci4;
///
/// let palette = [0x0000, 0xF801, 0x07C1, 0x003F];
/// let pixels = decode_ci4(&[0x12, 0x30], &palette, 2, 2);
/// assert_eq!(pixels, [0xF801, 0x07C1, 0x003F, 0x0000]);
/// ```
pub fn decode_ci4(data: &[u8], palette: &[u16], width: u32, height: u32) -> Vec<u16> {
    let count = texel_count(width, height, data.len() * 2);
    (0..count)
        .map(|i| {
            let byte = data[i / 2];
            let index = if i % 2 == 0 { byte >> 4 } else { byte & 0x0F };
            lookup(palette, index as usize)
        })
        .collect()
}

/// Decode a CI8 image through a 256-entry palette
pub fn decode_ci8(data: &[u8], palette: &[u16], width: u32, height: u32) -> Vec<u16> {
    let count = texel_count(width, height, data.len());
    data[..count]
        .iter()
        .map(|&index| lookup(palette, index as usize))
        .collect()
}

/// Decode an I4 image (two texels per byte, high nibble first)
pub fn decode_i4(data: &[u8], width: u32, height: u32) -> Vec<u16> {
    let count = texel_count(width, height, data.len() * 2);
    (0..count)
        .map(|i| {
            let byte = data[i / 2];
            i4_texel(if i % 2 == 0 { byte >> 4 } else { byte })
        })
        .collect()
}

/// Decode an I8 image
pub fn decode_i8(data: &[u8], width: u32, height: u32) -> Vec<u16> {
    let count = texel_count(width, height, data.len());
    data[..count].iter().map(|&v| i8_texel(v)).collect()
}

/// Decode an IA8 image
pub fn decode_ia8(data: &[u8], width: u32, height: u32) -> Vec<u16> {
    let count = texel_count(width, height, data.len());
    data[..count].iter().map(|&v| ia8_texel(v)).collect()
}

/// Decode an IA16 image (big-endian halfwords)
pub fn decode_ia16(data: &[u8], width: u32, height: u32) -> Vec<u16> {
    let count = texel_count(width, height, data.len() / 2);
    data.chunks_exact(2)
        .take(count)
        .map(|pair| ia16_texel(u16::from_be_bytes([pair[0], pair[1]])))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ci4_high_nibble_first() {
        let mut palette = [0u16; 16];
        palette[0xA] = 0x1111;
        palette[0x5] = 0x2222;

        let pixels = decode_ci4(&[0xA5], &palette, 2, 1);
        assert_eq!(pixels, [0x1111, 0x2222]);
    }

    #[test]
    fn test_ci8_lookup() {
        let palette: Vec<u16> = (0..256).map(|i| i as u16 * 3).collect();
        let pixels = decode_ci8(&[0, 1, 255], &palette, 3, 1);
        assert_eq!(pixels, [0, 3, 765]);
    }

    #[test]
    fn test_short_palette_reads_transparent() {
        let pixels = decode_ci8(&[7], &[0xFFFF; 4], 1, 1);
        assert_eq!(pixels, [0x0000]);
    }

    #[test]
    fn test_short_input_decodes_fewer_pixels() {
        assert_eq!(decode_ci8(&[0, 1], &[0; 256], 4, 4).len(), 2);
        assert_eq!(decode_ci4(&[0x01], &[0; 16], 4, 4).len(), 2);
        assert_eq!(decode_ia16(&[0xFF, 0xFF, 0x12], 2, 2).len(), 1);
        assert!(decode_i8(&[], 8, 8).is_empty());
    }

    #[test]
    fn test_i4_scaling_and_alpha() {
        assert_eq!(i4_texel(0), 0x0000);
        // 15 -> 31 in all channels, alpha set
        assert_eq!(i4_texel(0xF), 0xFFFF);
        // 8 * 31 / 15 = 16.53 -> 17
        let c = Color::from_packed(i4_texel(8));
        assert_eq!((c.r, c.g, c.b, c.a), (17, 17, 17, true));
    }

    #[test]
    fn test_i8_scaling_and_alpha() {
        assert_eq!(i8_texel(0), 0x0000);
        assert_eq!(i8_texel(255), 0xFFFF);
        // 128 * 31 / 255 = 15.56 -> 16
        let c = Color::from_packed(i8_texel(128));
        assert_eq!((c.r, c.a), (16, true));
        // Tiny but nonzero intensity still sets alpha
        let c = Color::from_packed(i8_texel(1));
        assert_eq!((c.r, c.a), (0, true));
    }

    #[test]
    fn test_ia8_alpha_threshold() {
        assert!(!Color::from_packed(ia8_texel(0xF7)).a);
        assert!(Color::from_packed(ia8_texel(0xF8)).a);
        assert_eq!(Color::from_packed(ia8_texel(0xF8)).g, 31);
    }

    #[test]
    fn test_ia16_alpha_threshold() {
        assert!(!Color::from_packed(ia16_texel(0xFF7F)).a);
        assert!(Color::from_packed(ia16_texel(0xFF80)).a);
        assert_eq!(Color::from_packed(ia16_texel(0x0080)).b, 0);
    }

    #[test]
    fn test_decoders_match_texel_helpers() {
        let data = [0x00, 0x37, 0x80, 0xFF];
        let i4 = decode_i4(&data, 8, 1);
        assert_eq!(i4[3], i4_texel(0x7));
        assert_eq!(decode_i8(&data, 4, 1)[2], i8_texel(0x80));
        assert_eq!(decode_ia8(&data, 4, 1)[1], ia8_texel(0x37));
        assert_eq!(decode_ia16(&data, 2, 1)[1], ia16_texel(0x80FF));
    }
}
