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

//! Renderer state

use crate::core::gfx::types::{
    AddressMode, BlendMode, CombineMode, ScissorRect, TextureFilter,
};

/// Texture lookup table snapshot
///
/// Entries are copied out of RDRAM when the TLUT is set, so later writes to
/// the source do not affect draws already queued behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tlut {
    /// Palette entries; indices at or beyond `count` read as 0
    pub entries: [u16; 256],
    /// Number of loaded entries (0-256)
    pub count: usize,
}

impl Tlut {
    /// Maximum TLUT size
    pub const SIZE: usize = 256;

    /// Entries per CI4 palette bank
    pub const CI4_BANK: usize = 16;

    pub fn empty() -> Self {
        Self {
            entries: [0; Self::SIZE],
            count: 0,
        }
    }

    #[inline(always)]
    pub fn lookup(&self, index: usize) -> u16 {
        self.entries[index & (Self::SIZE - 1)]
    }
}

/// Z-buffer placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZBuffer {
    /// Address of depth (0, 0)
    pub addr: u32,
    pub width: u32,
    pub height: u32,
}

impl ZBuffer {
    /// Depth reported for samples outside the declared extent
    pub const FAR: u16 = 0xFFFF;

    pub fn is_set(&self) -> bool {
        self.width != 0 && self.height != 0
    }

    #[inline(always)]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Address of the big-endian depth sample at (x, y)
    #[inline(always)]
    pub fn sample_addr(&self, x: i32, y: i32) -> u32 {
        let index = (y as u32).wrapping_mul(self.width).wrapping_add(x as u32);
        self.addr.wrapping_add(index.wrapping_mul(2))
    }
}

/// Mutable renderer state for one interpretation call
///
/// Created at hardware defaults at the start of every call and dropped at
/// the end of it.
#[derive(Debug, Clone)]
pub struct RendererState {
    /// Active TLUT (`None` until one is set)
    pub tlut: Option<Tlut>,

    /// CI4 palette bank (0-15)
    pub ci4_palette: u8,

    /// Primitive color (5/5/5/1)
    pub prim_color: u16,

    /// Environment color (5/5/5/1)
    pub env_color: u16,

    pub combine: CombineMode,

    /// S-axis texture addressing
    pub address_s: AddressMode,

    /// T-axis texture addressing
    pub address_t: AddressMode,

    pub filter: TextureFilter,

    pub blend: BlendMode,

    /// Z-test enable for depth-carrying draws
    pub z_enable: bool,

    pub z_buffer: ZBuffer,

    /// Clip rectangle, always within framebuffer bounds
    pub scissor: ScissorRect,
}

impl RendererState {
    /// Default primitive color: opaque white
    pub const DEFAULT_PRIM_COLOR: u16 = 0xFFFF;

    /// Default environment color: transparent black
    pub const DEFAULT_ENV_COLOR: u16 = 0x0000;

    /// Hardware defaults for a `width`×`height` framebuffer
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            tlut: None,
            ci4_palette: 0,
            prim_color: Self::DEFAULT_PRIM_COLOR,
            env_color: Self::DEFAULT_ENV_COLOR,
            combine: CombineMode::Texel0,
            address_s: AddressMode::Clamp,
            address_t: AddressMode::Clamp,
            filter: TextureFilter::Nearest,
            blend: BlendMode::Off,
            z_enable: false,
            z_buffer: ZBuffer::default(),
            scissor: ScissorRect::full(width, height),
        }
    }

    /// True if depth-carrying draws must test against the Z-buffer
    pub fn depth_active(&self) -> bool {
        self.z_enable && self.z_buffer.is_set()
    }
}
