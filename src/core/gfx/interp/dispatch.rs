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

//! Opcode dispatch table
//!
//! One table entry per known opcode byte holding its argument count and
//! handler. A missing entry is the single "unknown opcode" path.

use super::state::{Tlut, ZBuffer};
use super::Interpreter;
use crate::core::gfx::types::{
    AddressMode, BlendMode, CombineMode, Projection, ScissorRect, TexVertex, TexelFormat,
    TextureFilter, TextureRef,
};
use crate::core::gfx::ucode::opcode::{self, TEX_TRIANGLE_ARGS};
use crate::core::gfx::ucode::TexRect;

/// Handler for one opcode; receives exactly `args` argument words
pub(super) type Handler = fn(&mut Interpreter<'_>, &[u32]);

#[derive(Clone, Copy)]
pub(super) struct OpcodeEntry {
    pub name: &'static str,
    pub args: usize,
    pub handler: Handler,
}

/// Largest argument count of any opcode
pub(super) const MAX_ARGS: usize = TEX_TRIANGLE_ARGS + 6;

pub(super) static DISPATCH: [Option<OpcodeEntry>; 256] = build_table();

const fn entry(tag: u32, name: &'static str, handler: Handler) -> Option<OpcodeEntry> {
    let args = match opcode::arg_count(tag) {
        Some(args) => args,
        None => panic!("dispatch entry for an opcode without an argument count"),
    };
    Some(OpcodeEntry {
        name,
        args,
        handler,
    })
}

const fn build_table() -> [Option<OpcodeEntry>; 256] {
    use opcode::*;

    let mut table: [Option<OpcodeEntry>; 256] = [None; 256];

    table[GRADIENT_BACKGROUND as usize] = entry(GRADIENT_BACKGROUND, "gradient", op_gradient);
    table[TILE_SLICE as usize] = entry(TILE_SLICE, "tile_slice", op_tile_slice);

    table[SET_TLUT as usize] = entry(SET_TLUT, "set_tlut", op_set_tlut);
    table[DRAW_CI8_RECT as usize] = entry(DRAW_CI8_RECT, "ci8_rect", op_ci8_rect);
    table[DRAW_CI4_RECT as usize] = entry(DRAW_CI4_RECT, "ci4_rect", op_ci4_rect);
    table[DRAW_RGBA16_RECT as usize] = entry(DRAW_RGBA16_RECT, "rgba16_rect", op_rgba16_rect);
    table[DRAW_IA8_RECT as usize] = entry(DRAW_IA8_RECT, "ia8_rect", op_ia8_rect);
    table[DRAW_IA16_RECT as usize] = entry(DRAW_IA16_RECT, "ia16_rect", op_ia16_rect);
    table[DRAW_I4_RECT as usize] = entry(DRAW_I4_RECT, "i4_rect", op_i4_rect);
    table[DRAW_I8_RECT as usize] = entry(DRAW_I8_RECT, "i8_rect", op_i8_rect);

    table[SET_CI4_PALETTE as usize] = entry(SET_CI4_PALETTE, "ci4_palette", op_ci4_palette);
    table[SET_TEX_ADDR_MODE as usize] = entry(SET_TEX_ADDR_MODE, "addr_mode", op_addr_mode);
    table[SET_TEX_FILTER as usize] = entry(SET_TEX_FILTER, "tex_filter", op_tex_filter);
    table[SET_BLEND as usize] = entry(SET_BLEND, "blend", op_blend_toggle);
    table[SET_BLEND_MODE as usize] = entry(SET_BLEND_MODE, "blend_mode", op_blend_mode);
    table[SET_SCISSOR as usize] = entry(SET_SCISSOR, "scissor", op_scissor);

    table[SET_PRIM_COLOR as usize] = entry(SET_PRIM_COLOR, "prim_color", op_prim_color);
    table[SET_ENV_COLOR as usize] = entry(SET_ENV_COLOR, "env_color", op_env_color);
    table[SET_COMBINE_MODE as usize] = entry(SET_COMBINE_MODE, "combine", op_combine);

    table[SOLID_TRIANGLE as usize] = entry(SOLID_TRIANGLE, "solid_tri", op_solid_triangle);
    table[CI8_TRIANGLE as usize] = entry(CI8_TRIANGLE, "ci8_tri", op_ci8_triangle);
    table[CI4_TRIANGLE as usize] = entry(CI4_TRIANGLE, "ci4_tri", op_ci4_triangle);
    table[CI8_TRIANGLE_PERSP as usize] =
        entry(CI8_TRIANGLE_PERSP, "ci8_tri_persp", op_ci8_triangle_persp);
    table[CI4_TRIANGLE_PERSP as usize] =
        entry(CI4_TRIANGLE_PERSP, "ci4_tri_persp", op_ci4_triangle_persp);
    table[IA8_TRIANGLE as usize] = entry(IA8_TRIANGLE, "ia8_tri", op_ia8_triangle);
    table[IA8_TRIANGLE_PERSP as usize] =
        entry(IA8_TRIANGLE_PERSP, "ia8_tri_persp", op_ia8_triangle_persp);
    table[IA16_TRIANGLE as usize] = entry(IA16_TRIANGLE, "ia16_tri", op_ia16_triangle);
    table[IA16_TRIANGLE_PERSP as usize] =
        entry(IA16_TRIANGLE_PERSP, "ia16_tri_persp", op_ia16_triangle_persp);
    table[RGBA16_TRIANGLE as usize] = entry(RGBA16_TRIANGLE, "rgba16_tri", op_rgba16_triangle);
    table[RGBA16_TRIANGLE_PERSP as usize] =
        entry(RGBA16_TRIANGLE_PERSP, "rgba16_tri_persp", op_rgba16_triangle_persp);

    table[SET_Z_ENABLE as usize] = entry(SET_Z_ENABLE, "z_enable", op_z_enable);
    table[SET_Z_BUFFER as usize] = entry(SET_Z_BUFFER, "z_buffer", op_z_buffer);
    table[CLEAR_Z as usize] = entry(CLEAR_Z, "clear_z", op_clear_z);
    table[SOLID_TRIANGLE_Z as usize] =
        entry(SOLID_TRIANGLE_Z, "solid_tri_z", op_solid_triangle_z);
    table[RGBA16_TRIANGLE_Z as usize] =
        entry(RGBA16_TRIANGLE_Z, "rgba16_tri_z", op_rgba16_triangle_z);
    table[RGBA16_TRIANGLE_Z_PERSP as usize] = entry(
        RGBA16_TRIANGLE_Z_PERSP,
        "rgba16_tri_z_persp",
        op_rgba16_triangle_z_persp,
    );

    table
}

// ─── Argument decoding ───

fn texture_ref(args: &[u32]) -> TextureRef {
    TextureRef {
        addr: args[0],
        width: args[1],
        height: args[2],
        pitch: args[3],
    }
}

/// Vertices of a textured triangle, with optional q and z tails
fn textured_vertices(args: &[u32], q: Option<&[u32]>, z: Option<&[u32]>) -> [TexVertex; 3] {
    std::array::from_fn(|i| {
        let base = 4 + i * 4;
        let mut v = TexVertex::textured(
            args[base] as i32,
            args[base + 1] as i32,
            args[base + 2] as i32,
            args[base + 3] as i32,
        );
        if let Some(q) = q {
            v.q = q[i];
        }
        if let Some(z) = z {
            v.z = z[i] as u16;
        }
        v
    })
}

fn textured_triangle(
    it: &mut Interpreter<'_>,
    args: &[u32],
    format: TexelFormat,
    projection: Projection,
) {
    let texture = texture_ref(args);
    let q = match projection {
        Projection::Affine => None,
        Projection::Perspective => Some(&args[TEX_TRIANGLE_ARGS..TEX_TRIANGLE_ARGS + 3]),
    };
    let vertices = textured_vertices(args, q, None);
    it.draw_triangle(&vertices, Some((format, texture)), projection, false);
}

fn rect(it: &mut Interpreter<'_>, args: &[u32], format: TexelFormat) {
    it.draw_rect(TexRect {
        format,
        width: args[0],
        height: args[1],
        addr: args[2],
        x: args[3] as i32,
        y: args[4] as i32,
    });
}

// ─── Background helpers ───

fn op_gradient(it: &mut Interpreter<'_>, args: &[u32]) {
    it.draw_gradient(args[0] as u16, args[1] as u16);
}

fn op_tile_slice(it: &mut Interpreter<'_>, args: &[u32]) {
    let packed = args[1];
    it.draw_tile_slice(args[0], packed >> 24, (packed >> 16) & 0xFF, packed & 0xFFFF);
}

// ─── State ───

fn op_set_tlut(it: &mut Interpreter<'_>, args: &[u32]) {
    let addr = args[0];
    let count = (args[1] as usize).min(Tlut::SIZE);

    let mut tlut = Tlut::empty();
    for (i, entry) in tlut.entries.iter_mut().take(count).enumerate() {
        *entry = it
            .mem
            .read16(addr.wrapping_add(i as u32 * 2))
            .unwrap_or(0);
    }
    tlut.count = count;
    it.state.tlut = Some(tlut);
}

fn op_ci4_palette(it: &mut Interpreter<'_>, args: &[u32]) {
    it.state.ci4_palette = (args[0] & 0xF) as u8;
}

fn op_addr_mode(it: &mut Interpreter<'_>, args: &[u32]) {
    it.state.address_s = AddressMode::from_bits(args[0]);
    it.state.address_t = AddressMode::from_bits(args[0] >> 4);
}

fn op_tex_filter(it: &mut Interpreter<'_>, args: &[u32]) {
    it.state.filter = TextureFilter::from_bits(args[0]);
}

fn op_blend_toggle(it: &mut Interpreter<'_>, args: &[u32]) {
    it.state.blend = BlendMode::from_legacy_toggle(args[0]);
}

fn op_blend_mode(it: &mut Interpreter<'_>, args: &[u32]) {
    it.state.blend = BlendMode::from_bits(args[0]);
}

fn op_scissor(it: &mut Interpreter<'_>, args: &[u32]) {
    let rect = ScissorRect::new(
        args[0] as i32,
        args[1] as i32,
        args[2] as i32,
        args[3] as i32,
    );
    it.state.scissor = rect.clamped(it.fb.width, it.fb.height);
}

fn op_prim_color(it: &mut Interpreter<'_>, args: &[u32]) {
    it.state.prim_color = args[0] as u16;
}

fn op_env_color(it: &mut Interpreter<'_>, args: &[u32]) {
    it.state.env_color = args[0] as u16;
}

fn op_combine(it: &mut Interpreter<'_>, args: &[u32]) {
    it.state.combine = CombineMode::from_bits(args[0]);
}

fn op_z_enable(it: &mut Interpreter<'_>, args: &[u32]) {
    it.state.z_enable = args[0] & 1 != 0;
}

fn op_z_buffer(it: &mut Interpreter<'_>, args: &[u32]) {
    it.state.z_buffer = ZBuffer {
        addr: args[0],
        width: args[1],
        height: args[2],
    };
}

fn op_clear_z(it: &mut Interpreter<'_>, args: &[u32]) {
    it.clear_depth(args[0] as u16);
}

// ─── Rectangles ───

fn op_ci8_rect(it: &mut Interpreter<'_>, args: &[u32]) {
    rect(it, args, TexelFormat::Ci8);
}

fn op_ci4_rect(it: &mut Interpreter<'_>, args: &[u32]) {
    rect(it, args, TexelFormat::Ci4);
}

fn op_rgba16_rect(it: &mut Interpreter<'_>, args: &[u32]) {
    rect(it, args, TexelFormat::Rgba16);
}

fn op_ia8_rect(it: &mut Interpreter<'_>, args: &[u32]) {
    rect(it, args, TexelFormat::Ia8);
}

fn op_ia16_rect(it: &mut Interpreter<'_>, args: &[u32]) {
    rect(it, args, TexelFormat::Ia16);
}

fn op_i4_rect(it: &mut Interpreter<'_>, args: &[u32]) {
    rect(it, args, TexelFormat::I4);
}

fn op_i8_rect(it: &mut Interpreter<'_>, args: &[u32]) {
    rect(it, args, TexelFormat::I8);
}

// ─── Triangles ───

fn op_solid_triangle(it: &mut Interpreter<'_>, args: &[u32]) {
    let vertices: [TexVertex; 3] =
        std::array::from_fn(|i| TexVertex::at(args[i * 2] as i32, args[i * 2 + 1] as i32));
    it.draw_triangle(&vertices, None, Projection::Affine, false);
}

fn op_solid_triangle_z(it: &mut Interpreter<'_>, args: &[u32]) {
    let vertices: [TexVertex; 3] = std::array::from_fn(|i| {
        TexVertex::at(args[i * 3] as i32, args[i * 3 + 1] as i32).with_z(args[i * 3 + 2] as u16)
    });
    it.draw_triangle(&vertices, None, Projection::Affine, true);
}

fn op_ci8_triangle(it: &mut Interpreter<'_>, args: &[u32]) {
    textured_triangle(it, args, TexelFormat::Ci8, Projection::Affine);
}

fn op_ci4_triangle(it: &mut Interpreter<'_>, args: &[u32]) {
    textured_triangle(it, args, TexelFormat::Ci4, Projection::Affine);
}

fn op_ci8_triangle_persp(it: &mut Interpreter<'_>, args: &[u32]) {
    textured_triangle(it, args, TexelFormat::Ci8, Projection::Perspective);
}

fn op_ci4_triangle_persp(it: &mut Interpreter<'_>, args: &[u32]) {
    textured_triangle(it, args, TexelFormat::Ci4, Projection::Perspective);
}

fn op_ia8_triangle(it: &mut Interpreter<'_>, args: &[u32]) {
    textured_triangle(it, args, TexelFormat::Ia8, Projection::Affine);
}

fn op_ia8_triangle_persp(it: &mut Interpreter<'_>, args: &[u32]) {
    textured_triangle(it, args, TexelFormat::Ia8, Projection::Perspective);
}

fn op_ia16_triangle(it: &mut Interpreter<'_>, args: &[u32]) {
    textured_triangle(it, args, TexelFormat::Ia16, Projection::Affine);
}

fn op_ia16_triangle_persp(it: &mut Interpreter<'_>, args: &[u32]) {
    textured_triangle(it, args, TexelFormat::Ia16, Projection::Perspective);
}

fn op_rgba16_triangle(it: &mut Interpreter<'_>, args: &[u32]) {
    textured_triangle(it, args, TexelFormat::Rgba16, Projection::Affine);
}

fn op_rgba16_triangle_persp(it: &mut Interpreter<'_>, args: &[u32]) {
    textured_triangle(it, args, TexelFormat::Rgba16, Projection::Perspective);
}

fn op_rgba16_triangle_z(it: &mut Interpreter<'_>, args: &[u32]) {
    let texture = texture_ref(args);
    let z = &args[TEX_TRIANGLE_ARGS..TEX_TRIANGLE_ARGS + 3];
    let vertices = textured_vertices(args, None, Some(z));
    it.draw_triangle(
        &vertices,
        Some((TexelFormat::Rgba16, texture)),
        Projection::Affine,
        true,
    );
}

fn op_rgba16_triangle_z_persp(it: &mut Interpreter<'_>, args: &[u32]) {
    let texture = texture_ref(args);
    let q = &args[TEX_TRIANGLE_ARGS..TEX_TRIANGLE_ARGS + 3];
    let z = &args[TEX_TRIANGLE_ARGS + 3..TEX_TRIANGLE_ARGS + 6];
    let vertices = textured_vertices(args, Some(q), Some(z));
    it.draw_triangle(
        &vertices,
        Some((TexelFormat::Rgba16, texture)),
        Projection::Perspective,
        true,
    );
}
