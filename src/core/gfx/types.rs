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

//! Graphics type definitions
//!
//! This module contains the types shared by the front-end translators, the
//! UC command set and the RSPDL interpreter: packed colors, texel formats,
//! renderer mode enums, vertices and texture references.

/// A color in the N64 5/5/5/1 packed format
///
/// Framebuffer pixels, TLUT entries and RGBA16 texels all use this layout:
/// - Bits 11-15: Red (5 bits)
/// - Bits 6-10: Green (5 bits)
/// - Bits 1-5: Blue (5 bits)
/// - Bit 0: Alpha (1 bit, punch-through)
///
/// # Examples
///
/// ```
/// use rspgfx::core::gfx::Color;
///
/// let color = Color::from_packed(0xF801);
/// assert_eq!((color.r, color.g, color.b), (31, 0, 0));
/// assert!(color.a);
/// assert_eq!(color.to_packed(), 0xF801);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    /// Red channel (0-31)
    pub r: u8,
    /// Green channel (0-31)
    pub g: u8,
    /// Blue channel (0-31)
    pub b: u8,
    /// Alpha bit
    pub a: bool,
}

impl Color {
    /// Create a color from 5-bit channels
    pub const fn new(r: u8, g: u8, b: u8, a: bool) -> Self {
        Self { r, g, b, a }
    }

    /// A gray with all three channels set to `level` (0-31)
    pub const fn gray(level: u8, a: bool) -> Self {
        Self::new(level, level, level, a)
    }

    /// Unpack a 5/5/5/1 color
    pub const fn from_packed(value: u16) -> Self {
        Self {
            r: ((value >> 11) & 0x1F) as u8,
            g: ((value >> 6) & 0x1F) as u8,
            b: ((value >> 1) & 0x1F) as u8,
            a: value & 1 != 0,
        }
    }

    /// Pack into 5/5/5/1
    pub const fn to_packed(self) -> u16 {
        ((self.r as u16 & 0x1F) << 11)
            | ((self.g as u16 & 0x1F) << 6)
            | ((self.b as u16 & 0x1F) << 1)
            | self.a as u16
    }

    /// Expand to 8-bit RGBA for scanout
    ///
    /// Each 5-bit channel is widened by bit replication. Alpha is always
    /// opaque: the VI does not scan out the coverage bit.
    pub const fn to_rgba8888(self) -> [u8; 4] {
        const fn widen(c: u8) -> u8 {
            (c << 3) | (c >> 2)
        }
        [widen(self.r), widen(self.g), widen(self.b), 0xFF]
    }
}

/// Texel formats understood by the decoders and the sampler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TexelFormat {
    /// 4-bit color index through a 16-entry TLUT bank
    Ci4,
    /// 8-bit color index through a 256-entry TLUT
    Ci8,
    /// 16-bit packed color
    Rgba16,
    /// 4-bit intensity
    I4,
    /// 8-bit intensity
    I8,
    /// 4-bit intensity + 4-bit alpha
    Ia8,
    /// 8-bit intensity + 8-bit alpha
    Ia16,
}

impl TexelFormat {
    /// Storage size of one texel in bits
    pub const fn bits_per_texel(self) -> u32 {
        match self {
            TexelFormat::Ci4 | TexelFormat::I4 => 4,
            TexelFormat::Ci8 | TexelFormat::I8 | TexelFormat::Ia8 => 8,
            TexelFormat::Rgba16 | TexelFormat::Ia16 => 16,
        }
    }

    /// True for formats that need an active TLUT
    pub const fn is_indexed(self) -> bool {
        matches!(self, TexelFormat::Ci4 | TexelFormat::Ci8)
    }
}

/// Texel formats that have textured-triangle opcodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TriangleTexture {
    Ci8,
    Ci4,
    Ia8,
    Ia16,
    Rgba16,
}

impl From<TriangleTexture> for TexelFormat {
    fn from(value: TriangleTexture) -> Self {
        match value {
            TriangleTexture::Ci8 => TexelFormat::Ci8,
            TriangleTexture::Ci4 => TexelFormat::Ci4,
            TriangleTexture::Ia8 => TexelFormat::Ia8,
            TriangleTexture::Ia16 => TexelFormat::Ia16,
            TriangleTexture::Rgba16 => TexelFormat::Rgba16,
        }
    }
}

impl TryFrom<TexelFormat> for TriangleTexture {
    type Error = TexelFormat;

    fn try_from(value: TexelFormat) -> Result<Self, Self::Error> {
        match value {
            TexelFormat::Ci8 => Ok(TriangleTexture::Ci8),
            TexelFormat::Ci4 => Ok(TriangleTexture::Ci4),
            TexelFormat::Ia8 => Ok(TriangleTexture::Ia8),
            TexelFormat::Ia16 => Ok(TriangleTexture::Ia16),
            TexelFormat::Rgba16 => Ok(TriangleTexture::Rgba16),
            other => Err(other),
        }
    }
}

/// Per-axis texture coordinate addressing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressMode {
    /// Hold the edge texel
    #[default]
    Clamp,
    /// Repeat with period `size`
    Wrap,
    /// Reflect with period `2 * size`
    Mirror,
}

impl AddressMode {
    /// Decode the RSPDL field (0 clamp, 1 wrap, 2 mirror)
    pub const fn from_bits(bits: u32) -> Self {
        match bits & 3 {
            1 => AddressMode::Wrap,
            2 => AddressMode::Mirror,
            _ => AddressMode::Clamp,
        }
    }

    /// RSPDL field value
    pub const fn to_bits(self) -> u32 {
        match self {
            AddressMode::Clamp => 0,
            AddressMode::Wrap => 1,
            AddressMode::Mirror => 2,
        }
    }

    /// Decode a tile descriptor `cm` field (bit 0 mirror, bit 1 clamp)
    pub const fn from_tile_bits(bits: u32) -> Self {
        match bits & 3 {
            0 => AddressMode::Wrap,
            1 => AddressMode::Mirror,
            _ => AddressMode::Clamp,
        }
    }

    /// Tile descriptor `cm` field for this mode
    pub const fn to_tile_bits(self) -> u32 {
        match self {
            AddressMode::Wrap => 0,
            AddressMode::Mirror => 1,
            AddressMode::Clamp => 2,
        }
    }

    /// Fold a texel coordinate into `0..size`
    ///
    /// # Examples
    ///
    /// ```
    /// use rspgfx::core::gfx::AddressMode;
    ///
    /// let mirrored: Vec<i32> = (0..6).map(|s| AddressMode::Mirror.fold(s, 2)).collect();
    /// assert_eq!(mirrored, [0, 1, 1, 0, 0, 1]);
    /// assert_eq!(AddressMode::Wrap.fold(-1, 4), 3);
    /// assert_eq!(AddressMode::Clamp.fold(9, 4), 3);
    /// ```
    #[inline(always)]
    pub fn fold(self, coord: i32, size: u32) -> i32 {
        let size = size.clamp(1, i32::MAX as u32 / 2) as i32;
        match self {
            AddressMode::Clamp => coord.clamp(0, size - 1),
            AddressMode::Wrap => coord.rem_euclid(size),
            AddressMode::Mirror => {
                let m = coord.rem_euclid(size * 2);
                if m < size {
                    m
                } else {
                    size * 2 - 1 - m
                }
            }
        }
    }
}

/// Texture filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextureFilter {
    #[default]
    Nearest,
    Bilinear,
}

impl TextureFilter {
    pub const fn from_bits(bits: u32) -> Self {
        if bits == 1 {
            TextureFilter::Bilinear
        } else {
            TextureFilter::Nearest
        }
    }

    pub const fn to_bits(self) -> u32 {
        match self {
            TextureFilter::Nearest => 0,
            TextureFilter::Bilinear => 1,
        }
    }
}

/// Framebuffer blend mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlendMode {
    /// Source overwrites destination
    #[default]
    Off,
    /// Per-channel average of source and destination, alpha bits ORed
    Average50,
    /// Source replaces destination only if its alpha bit is set
    SrcOverAlpha1Bit,
}

impl BlendMode {
    /// Decode the 3-way blend mode field
    pub const fn from_bits(bits: u32) -> Self {
        match bits {
            1 => BlendMode::Average50,
            2 => BlendMode::SrcOverAlpha1Bit,
            _ => BlendMode::Off,
        }
    }

    pub const fn to_bits(self) -> u32 {
        match self {
            BlendMode::Off => 0,
            BlendMode::Average50 => 1,
            BlendMode::SrcOverAlpha1Bit => 2,
        }
    }

    /// Decode the legacy on/off blend toggle
    ///
    /// The toggle predates the 3-way mode and can only reach `Off` and
    /// `Average50`.
    pub const fn from_legacy_toggle(value: u32) -> Self {
        if value != 0 {
            BlendMode::Average50
        } else {
            BlendMode::Off
        }
    }

    /// Blend `src` over `dst`
    ///
    /// # Returns
    ///
    /// The packed color to store, or `None` to leave the destination as is.
    ///
    /// # Examples
    ///
    /// ```
    /// use rspgfx::core::gfx::BlendMode;
    ///
    /// // White over black averages to mid gray, alpha ORed
    /// assert_eq!(BlendMode::Average50.blend(0x0000, 0xFFFF), Some(0x7BDF));
    /// // Source without alpha bit is dropped
    /// assert_eq!(BlendMode::SrcOverAlpha1Bit.blend(0x1234, 0xFFFE), None);
    /// ```
    pub fn blend(self, dst: u16, src: u16) -> Option<u16> {
        match self {
            BlendMode::Off => Some(src),
            BlendMode::Average50 => {
                let d = Color::from_packed(dst);
                let s = Color::from_packed(src);
                Some(
                    Color::new(
                        (d.r + s.r) >> 1,
                        (d.g + s.g) >> 1,
                        (d.b + s.b) >> 1,
                        d.a | s.a,
                    )
                    .to_packed(),
                )
            }
            BlendMode::SrcOverAlpha1Bit => (src & 1 != 0).then_some(src),
        }
    }
}

/// Color combiner selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CombineMode {
    /// Sample the texture (solid draws use the primitive color)
    #[default]
    Texel0,
    /// Fill with the primitive color
    Prim,
    /// Fill with the environment color
    Env,
}

impl CombineMode {
    pub const fn from_bits(bits: u32) -> Self {
        match bits & 3 {
            1 => CombineMode::Prim,
            2 => CombineMode::Env,
            _ => CombineMode::Texel0,
        }
    }

    pub const fn to_bits(self) -> u32 {
        match self {
            CombineMode::Texel0 => 0,
            CombineMode::Prim => 1,
            CombineMode::Env => 2,
        }
    }
}

/// Clip rectangle (x0/y0 inclusive, x1/y1 exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScissorRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl ScissorRect {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Rectangle covering a whole `width`×`height` framebuffer
    pub const fn full(width: u32, height: u32) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }

    /// Clamp to framebuffer bounds
    pub fn clamped(self, width: u32, height: u32) -> Self {
        let w = width as i32;
        let h = height as i32;
        Self {
            x0: self.x0.clamp(0, w),
            y0: self.y0.clamp(0, h),
            x1: self.x1.clamp(0, w),
            y1: self.y1.clamp(0, h),
        }
    }

    #[inline(always)]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }
}

/// Perspective handling of a textured triangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Linear (s, t) interpolation
    Affine,
    /// (s/q, t/q, 1/q) interpolation with a per-pixel divide
    Perspective,
}

/// A pixel-space vertex with optional texturing and depth attributes
///
/// Attributes a draw does not use are ignored by both the encoder and the
/// rasterizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TexVertex {
    pub x: i32,
    pub y: i32,
    /// Texel-space S coordinate
    pub s: i32,
    /// Texel-space T coordinate
    pub t: i32,
    /// Perspective weight
    pub q: u32,
    /// Depth (lower is nearer)
    pub z: u16,
}

impl TexVertex {
    /// Default perspective weight (1.0 in 16.16)
    pub const Q_ONE: u32 = 0x0001_0000;

    /// A position-only vertex
    pub const fn at(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            s: 0,
            t: 0,
            q: Self::Q_ONE,
            z: 0,
        }
    }

    /// A textured vertex
    pub const fn textured(x: i32, y: i32, s: i32, t: i32) -> Self {
        Self {
            x,
            y,
            s,
            t,
            q: Self::Q_ONE,
            z: 0,
        }
    }

    pub const fn with_q(mut self, q: u32) -> Self {
        self.q = q;
        self
    }

    pub const fn with_z(mut self, z: u16) -> Self {
        self.z = z;
        self
    }
}

/// Texture source in RDRAM
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureRef {
    /// Base address of texel (0, 0)
    pub addr: u32,
    /// Width in texels (addressing period for S)
    pub width: u32,
    /// Height in texels (addressing period for T)
    pub height: u32,
    /// Texels per source row
    pub pitch: u32,
}

impl TextureRef {
    /// A texture whose rows are exactly `width` texels apart
    pub const fn new(addr: u32, width: u32, height: u32) -> Self {
        Self {
            addr,
            width,
            height,
            pitch: width,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
