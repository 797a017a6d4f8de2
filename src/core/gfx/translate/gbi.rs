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

//! Bytecode instruction builders
//!
//! Helpers that assemble `(w0, w1)` instruction pairs and vertex records in
//! the layout the bytecode translator reads. Coordinates taken as `fixed`
//! are 10.2 fixed point.

use super::bytecode::{op, VertexLayout};
use crate::core::error::Result;
use crate::core::gfx::types::{
    AddressMode, BlendMode, CombineMode, TexVertex, TexelFormat, TextureFilter,
};
use crate::core::memory::Memory;

/// One display-list instruction
pub type Instruction = [u32; 2];

#[inline(always)]
fn word0(opcode: u8, fields: u32) -> u32 {
    ((opcode as u32) << 24) | (fields & 0x00FF_FFFF)
}

#[inline(always)]
fn pair(hi: u32, lo: u32) -> u32 {
    ((hi & 0xFFF) << 12) | (lo & 0xFFF)
}

pub fn end_dl() -> Instruction {
    [word0(op::END_DL, 0), 0]
}

/// Call a display list and return here at its end
pub fn call_dl(addr: u32) -> Instruction {
    [word0(op::DL, 1), addr]
}

/// Jump to a display list without returning
pub fn branch_dl(addr: u32) -> Instruction {
    [word0(op::DL, 0), addr]
}

pub fn segment(id: u8, base: u32) -> Instruction {
    [word0(op::SEGMENT, (id & 0xF) as u32), base]
}

/// Set the texture image; formats other than CI4, CI8 and RGBA16 encode an
/// unsupported size and are ignored by the translator
pub fn set_texture_image(format: TexelFormat, width: u32, addr: u32) -> Instruction {
    let size = match format {
        TexelFormat::Ci4 => 0,
        TexelFormat::Ci8 => 1,
        TexelFormat::Rgba16 => 2,
        _ => 3,
    };
    let fields = (size << 19) | (width.saturating_sub(1) & 0xFFF);
    [word0(op::SET_TEXTURE_IMAGE, fields), addr]
}

pub fn load_tlut(count: u32, addr: u32) -> Instruction {
    [word0(op::LOAD_TLUT, count & 0x1FF), addr]
}

pub fn set_tile_size(uls: u32, ult: u32, lrs: u32, lrt: u32) -> Instruction {
    [word0(op::SET_TILE_SIZE, pair(uls, ult)), pair(lrs, lrt)]
}

pub fn set_scissor(ulx: u32, uly: u32, lrx: u32, lry: u32) -> Instruction {
    [word0(op::SET_SCISSOR, pair(ulx, uly)), pair(lrx, lry)]
}

pub fn texture_rectangle(ulx: u32, uly: u32, lrx: u32, lry: u32) -> Instruction {
    [word0(op::TEX_RECT, pair(lrx, lry)), pair(ulx, uly)]
}

pub fn set_tile(palette: u8, s: AddressMode, t: AddressMode) -> Instruction {
    let w1 = (((palette & 0xF) as u32) << 20) | (t.to_tile_bits() << 18) | (s.to_tile_bits() << 8);
    [word0(op::SET_TILE, 0), w1]
}

pub fn set_prim_color(color: u16) -> Instruction {
    [word0(op::SET_PRIM_COLOR, 0), color as u32]
}

pub fn set_env_color(color: u16) -> Instruction {
    [word0(op::SET_ENV_COLOR, 0), color as u32]
}

pub fn set_combine(mode: CombineMode) -> Instruction {
    [word0(op::SET_COMBINE, 0), mode.to_bits()]
}

/// Load `count` vertex records of `layout` from `addr`
pub fn vertices(layout: VertexLayout, count: u32, addr: u32) -> Instruction {
    let opcode = match layout {
        VertexLayout::Plain => op::VTX,
        VertexLayout::Tex => op::VTX_TEX,
        VertexLayout::TexZ => op::VTX_TEX_Z,
        VertexLayout::TexQz => op::VTX_TEX_QZ,
    };
    [word0(opcode, count.saturating_sub(1) & 0xFFF), addr]
}

/// Draw a triangle from three vertex-buffer slots
///
/// The variant matches the vertex layout: plain draws solid, the textured
/// layouts draw affine, affine with Z, and perspective with Z.
pub fn triangle(layout: VertexLayout, a: u8, b: u8, c: u8) -> Instruction {
    let opcode = match layout {
        VertexLayout::Plain => op::TRI,
        VertexLayout::Tex => op::TRI_TEX,
        VertexLayout::TexZ => op::TRI_TEX_Z,
        VertexLayout::TexQz => op::TRI_TEX_QZ,
    };
    let fields = (a as u32 & 0xF) | ((b as u32 & 0xF) << 4) | ((c as u32 & 0xF) << 8);
    [word0(opcode, fields), 0]
}

pub fn set_z_enable(enabled: bool) -> Instruction {
    [word0(op::SET_Z_ENABLE, 0), enabled as u32]
}

pub fn set_z_image(width: u32, height: u32, addr: u32) -> Instruction {
    [word0(op::SET_Z_IMAGE, pair(width, height)), addr]
}

pub fn clear_z(depth: u16) -> Instruction {
    [word0(op::CLEAR_Z, 0), depth as u32]
}

pub fn set_tex_filter(filter: TextureFilter) -> Instruction {
    [word0(op::SET_TEX_FILTER, 0), filter.to_bits()]
}

pub fn set_blend_mode(mode: BlendMode) -> Instruction {
    [word0(op::SET_BLEND_MODE, 0), mode.to_bits()]
}

/// Big-endian vertex records in `layout`
///
/// Coordinates are truncated to 16 bits.
pub fn vertex_records(layout: VertexLayout, vertices: &[TexVertex]) -> Vec<u8> {
    let mut out = Vec::with_capacity(vertices.len() * layout.stride() as usize);
    for v in vertices {
        out.extend_from_slice(&(v.x as i16).to_be_bytes());
        out.extend_from_slice(&(v.y as i16).to_be_bytes());
        if layout == VertexLayout::Plain {
            continue;
        }
        out.extend_from_slice(&(v.s as i16).to_be_bytes());
        out.extend_from_slice(&(v.t as i16).to_be_bytes());
        if layout == VertexLayout::TexQz {
            out.extend_from_slice(&v.q.to_be_bytes());
        }
        if layout != VertexLayout::Tex {
            out.extend_from_slice(&v.z.to_be_bytes());
            out.extend_from_slice(&[0, 0]);
        }
    }
    out
}

/// Write instructions back to back starting at `addr`
///
/// # Errors
///
/// Memory errors if the range is not writable word-aligned RDRAM
pub fn write_display_list(
    mem: &mut dyn Memory,
    addr: u32,
    instructions: &[Instruction],
) -> Result<()> {
    for (i, [w0, w1]) in instructions.iter().enumerate() {
        let at = addr.wrapping_add(i as u32 * 8);
        mem.write32(at, *w0)?;
        mem.write32(at.wrapping_add(4), *w1)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_record_strides() {
        let v = [TexVertex::textured(-1, 2, 3, 4).with_q(0x0002_0000).with_z(9)];
        for layout in [
            VertexLayout::Plain,
            VertexLayout::Tex,
            VertexLayout::TexZ,
            VertexLayout::TexQz,
        ] {
            assert_eq!(vertex_records(layout, &v).len(), layout.stride() as usize);
        }
        assert_eq!(
            vertex_records(VertexLayout::TexQz, &v),
            [0xFF, 0xFF, 0, 2, 0, 3, 0, 4, 0, 2, 0, 0, 0, 9, 0, 0]
        );
    }

    #[test]
    fn test_texture_rectangle_packs_lower_right_first() {
        let [w0, w1] = texture_rectangle(4, 8, 0x40, 0x80);
        assert_eq!(w0, 0xE404_0080);
        assert_eq!(w1, 0x0000_4008);
    }

    #[test]
    fn test_set_tile_fields() {
        let [_, w1] = set_tile(5, AddressMode::Mirror, AddressMode::Clamp);
        assert_eq!((w1 >> 20) & 0xF, 5);
        assert_eq!(AddressMode::from_tile_bits(w1 >> 18), AddressMode::Clamp);
        assert_eq!(AddressMode::from_tile_bits(w1 >> 8), AddressMode::Mirror);
    }
}
