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

//! Texture sampling
//!
//! Texel fetch for every supported format plus nearest and bilinear
//! filtering. Coordinates arrive as exact rationals from the rasterizer so
//! the sampler decides all rounding itself.
//!
//! # Bilinear Filtering
//!
//! The sample point is shifted by half a texel, the four neighbours are
//! folded independently through the S/T addressing modes and blended with
//! 8-bit fractional weights:
//!
//! ```text
//! w00 = (256 - fs) * (256 - ft)    w10 = fs * (256 - ft)
//! w01 = (256 - fs) * ft            w11 = fs * ft
//! c   = (Σ wᵢ·cᵢ + 0x8000) >> 16
//! ```

use crate::core::gfx::interp::{Interpreter, Tlut};
use crate::core::gfx::texture::{i4_texel, i8_texel, ia16_texel, ia8_texel};
use crate::core::gfx::types::{Color, TexelFormat, TextureFilter, TextureRef};

/// A texel-space coordinate pair as `s / den`, `t / den`
///
/// `den` is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(in crate::core::gfx) struct TexCoord {
    pub s: i128,
    pub t: i128,
    pub den: i128,
}

impl TexCoord {
    pub(in crate::core::gfx) const ORIGIN: Self = Self { s: 0, t: 0, den: 1 };
}

#[inline(always)]
fn saturate(value: i128) -> i32 {
    value.clamp(i32::MIN as i128, i32::MAX as i128) as i32
}

impl Interpreter<'_> {
    /// Sample `texture` at `coord` with the active filter and addressing
    pub(in crate::core::gfx) fn sample(
        &self,
        format: TexelFormat,
        texture: &TextureRef,
        coord: TexCoord,
    ) -> u16 {
        match self.state.filter {
            TextureFilter::Nearest => {
                let s = saturate(coord.s.div_euclid(coord.den));
                let t = saturate(coord.t.div_euclid(coord.den));
                self.fetch_folded(format, texture, s, t)
            }
            TextureFilter::Bilinear => self.sample_bilinear(format, texture, coord),
        }
    }

    fn sample_bilinear(&self, format: TexelFormat, texture: &TextureRef, coord: TexCoord) -> u16 {
        let den = coord.den * 2;
        let split = |num: i128| {
            let num = num * 2 - coord.den;
            let whole = num.div_euclid(den);
            let frac = (num - whole * den) * 256 / den;
            (saturate(whole), frac as u32)
        };
        let (s0, fs) = split(coord.s);
        let (t0, ft) = split(coord.t);
        let s1 = s0.saturating_add(1);
        let t1 = t0.saturating_add(1);

        let taps = [
            (self.fetch_folded(format, texture, s0, t0), (256 - fs) * (256 - ft)),
            (self.fetch_folded(format, texture, s1, t0), fs * (256 - ft)),
            (self.fetch_folded(format, texture, s0, t1), (256 - fs) * ft),
            (self.fetch_folded(format, texture, s1, t1), fs * ft),
        ];

        let mut sum = [0u32; 4];
        for (texel, weight) in taps {
            let c = Color::from_packed(texel);
            sum[0] += c.r as u32 * weight;
            sum[1] += c.g as u32 * weight;
            sum[2] += c.b as u32 * weight;
            sum[3] += c.a as u32 * weight;
        }
        let [r, g, b, a] = sum.map(|v| ((v + 0x8000) >> 16) as u8);

        Color::new(r, g, b, a != 0).to_packed()
    }

    #[inline]
    fn fetch_folded(&self, format: TexelFormat, texture: &TextureRef, s: i32, t: i32) -> u16 {
        let s = self.state.address_s.fold(s, texture.width);
        let t = self.state.address_t.fold(t, texture.height);
        self.fetch_texel(format, texture, s, t)
    }

    /// Read the texel at in-range (s, t)
    ///
    /// Unreadable memory reads as 0 (transparent black).
    pub(in crate::core::gfx) fn fetch_texel(
        &self,
        format: TexelFormat,
        texture: &TextureRef,
        s: i32,
        t: i32,
    ) -> u16 {
        let index = (t as u32)
            .wrapping_mul(texture.pitch)
            .wrapping_add(s as u32);
        let byte = |offset: u32| self.mem.read8(texture.addr.wrapping_add(offset)).unwrap_or(0);
        let half = || {
            self.mem
                .read16(texture.addr.wrapping_add(index.wrapping_mul(2)))
                .unwrap_or(0)
        };
        let tlut = |entry: usize| self.state.tlut.as_ref().map_or(0, |tlut| tlut.lookup(entry));

        match format {
            TexelFormat::Ci4 => {
                let bank = (self.state.ci4_palette & 0xF) as usize * Tlut::CI4_BANK;
                tlut(bank + nibble(byte(index / 2), index) as usize)
            }
            TexelFormat::Ci8 => tlut(byte(index) as usize),
            TexelFormat::I4 => i4_texel(nibble(byte(index / 2), index)),
            TexelFormat::I8 => i8_texel(byte(index)),
            TexelFormat::Ia8 => ia8_texel(byte(index)),
            TexelFormat::Ia16 => ia16_texel(half()),
            TexelFormat::Rgba16 => half(),
        }
    }
}

/// High nibble for even texel indices, low nibble for odd ones
#[inline(always)]
fn nibble(byte: u8, index: u32) -> u8 {
    if index % 2 == 0 {
        byte >> 4
    } else {
        byte & 0x0F
    }
}
