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

//! Canonical microcode (UC) command set
//!
//! Both front-end translators emit [`UcCommand`] sequences. The [`encoder`]
//! flattens them into the RSPDL word stream that the interpreter executes.
//! There is no decoder: the interpreter consumes the stream directly.
//!
//! # Stream Layout
//!
//! Each instruction is one opcode word followed by a fixed number of argument
//! words (see [`opcode::arg_count`]). Signed coordinates are stored as the bit
//! pattern of an `i32` so off-screen vertices survive the round trip.

pub mod encoder;
pub mod opcode;

pub use encoder::{encode, write_stream};

use super::types::{
    AddressMode, BlendMode, CombineMode, Projection, ScissorRect, TexVertex, TexelFormat,
    TextureFilter, TextureRef, TriangleTexture,
};

/// A textured rectangle: 1:1 blit of a `width`×`height` texture at (x, y)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TexRect {
    pub format: TexelFormat,
    pub addr: u32,
    pub width: u32,
    pub height: u32,
    pub x: i32,
    pub y: i32,
}

/// One canonical microcode command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UcCommand {
    /// Stream terminator
    End,

    /// Horizontal gradient over the whole framebuffer
    GradientBackground { left: u16, right: u16 },

    /// Grid of `size`×`size` RGBA16 tiles, shifted right by `offset`
    TileSlice {
        addr: u32,
        size: u8,
        spacing: u8,
        offset: u16,
    },

    /// Load `count` TLUT entries from `addr`
    SetTlut { addr: u32, count: u32 },

    /// Select the 16-entry TLUT bank used by CI4 textures
    SetCi4Palette(u8),

    SetTexAddrMode { s: AddressMode, t: AddressMode },

    SetTexFilter(TextureFilter),

    /// Legacy on/off blend toggle (reaches only `Off` and `Average50`)
    SetBlendEnable(bool),

    SetBlendMode(BlendMode),

    SetScissor(ScissorRect),

    SetPrimColor(u16),

    SetEnvColor(u16),

    SetCombineMode(CombineMode),

    SetZEnable(bool),

    SetZBuffer { addr: u32, width: u32, height: u32 },

    /// Fill the declared Z-buffer with a depth value
    ClearZ(u16),

    /// Untextured triangle (position only)
    SolidTriangle([TexVertex; 3]),

    /// Untextured triangle with per-vertex depth
    SolidTriangleZ([TexVertex; 3]),

    DrawTexRect(TexRect),

    TexTriangle {
        format: TriangleTexture,
        projection: Projection,
        texture: TextureRef,
        vertices: [TexVertex; 3],
    },

    /// RGBA16 textured triangle with per-vertex depth
    Rgba16TriangleZ {
        projection: Projection,
        texture: TextureRef,
        vertices: [TexVertex; 3],
    },
}

impl UcCommand {
    /// Opcode tag this command encodes to
    pub fn opcode(&self) -> u32 {
        use opcode::*;

        match self {
            UcCommand::End => END,
            UcCommand::GradientBackground { .. } => GRADIENT_BACKGROUND,
            UcCommand::TileSlice { .. } => TILE_SLICE,
            UcCommand::SetTlut { .. } => SET_TLUT,
            UcCommand::SetCi4Palette(_) => SET_CI4_PALETTE,
            UcCommand::SetTexAddrMode { .. } => SET_TEX_ADDR_MODE,
            UcCommand::SetTexFilter(_) => SET_TEX_FILTER,
            UcCommand::SetBlendEnable(_) => SET_BLEND,
            UcCommand::SetBlendMode(_) => SET_BLEND_MODE,
            UcCommand::SetScissor(_) => SET_SCISSOR,
            UcCommand::SetPrimColor(_) => SET_PRIM_COLOR,
            UcCommand::SetEnvColor(_) => SET_ENV_COLOR,
            UcCommand::SetCombineMode(_) => SET_COMBINE_MODE,
            UcCommand::SetZEnable(_) => SET_Z_ENABLE,
            UcCommand::SetZBuffer { .. } => SET_Z_BUFFER,
            UcCommand::ClearZ(_) => CLEAR_Z,
            UcCommand::SolidTriangle(_) => SOLID_TRIANGLE,
            UcCommand::SolidTriangleZ(_) => SOLID_TRIANGLE_Z,
            UcCommand::DrawTexRect(rect) => rect_opcode(rect.format),
            UcCommand::TexTriangle {
                format, projection, ..
            } => triangle_opcode(*format, *projection),
            UcCommand::Rgba16TriangleZ { projection, .. } => match projection {
                Projection::Affine => RGBA16_TRIANGLE_Z,
                Projection::Perspective => RGBA16_TRIANGLE_Z_PERSP,
            },
        }
    }

    /// True for commands that put pixels in the framebuffer
    pub fn is_draw(&self) -> bool {
        matches!(
            self,
            UcCommand::GradientBackground { .. }
                | UcCommand::TileSlice { .. }
                | UcCommand::SolidTriangle(_)
                | UcCommand::SolidTriangleZ(_)
                | UcCommand::DrawTexRect(_)
                | UcCommand::TexTriangle { .. }
                | UcCommand::Rgba16TriangleZ { .. }
        )
    }
}

/// Rectangle opcode for a texel format
pub fn rect_opcode(format: TexelFormat) -> u32 {
    use opcode::*;

    match format {
        TexelFormat::Ci8 => DRAW_CI8_RECT,
        TexelFormat::Ci4 => DRAW_CI4_RECT,
        TexelFormat::Rgba16 => DRAW_RGBA16_RECT,
        TexelFormat::Ia8 => DRAW_IA8_RECT,
        TexelFormat::Ia16 => DRAW_IA16_RECT,
        TexelFormat::I4 => DRAW_I4_RECT,
        TexelFormat::I8 => DRAW_I8_RECT,
    }
}

/// Textured-triangle opcode for a format and projection
pub fn triangle_opcode(format: TriangleTexture, projection: Projection) -> u32 {
    use opcode::*;

    let affine = match format {
        TriangleTexture::Ci8 => CI8_TRIANGLE,
        TriangleTexture::Ci4 => CI4_TRIANGLE,
        TriangleTexture::Ia8 => IA8_TRIANGLE,
        TriangleTexture::Ia16 => IA16_TRIANGLE,
        TriangleTexture::Rgba16 => RGBA16_TRIANGLE,
    };

    match (format, projection) {
        (_, Projection::Affine) => affine,
        // CI8/CI4 perspective forms sit two tags above their affine forms,
        // the others are interleaved affine/perspective pairs
        (TriangleTexture::Ci8 | TriangleTexture::Ci4, Projection::Perspective) => affine + 2,
        (_, Projection::Perspective) => affine + 1,
    }
}
