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

//! RSPDL opcode tags and argument counts
//!
//! | Tag       | Command                               | Args    |
//! |-----------|---------------------------------------|---------|
//! | 0x00      | End                                   | 0       |
//! | 0x01      | Gradient background                   | 2       |
//! | 0x10      | Composite tile slice                  | 2       |
//! | 0x20      | Set TLUT                              | 2       |
//! | 0x21-0x22 | Draw CI8 / CI4 rect                   | 5       |
//! | 0x23      | Set CI4 palette                       | 1       |
//! | 0x24      | Set texture address mode              | 1       |
//! | 0x25      | Set texture filter                    | 1       |
//! | 0x26      | Set blend (legacy on/off)             | 1       |
//! | 0x27      | Set blend mode                        | 1       |
//! | 0x28      | Set scissor                           | 4       |
//! | 0x29-0x2D | Draw RGBA16 / IA8 / IA16 / I4 / I8 rect | 5     |
//! | 0x30-0x32 | Set prim / env color, combine mode    | 1       |
//! | 0x40      | Solid triangle                        | 6       |
//! | 0x41-0x4A | Textured triangles                    | 16 / 19 |
//! | 0x50      | Set Z enable                          | 1       |
//! | 0x51      | Set Z buffer                          | 3       |
//! | 0x52      | Clear Z                               | 1       |
//! | 0x53      | Solid triangle + Z                    | 9       |
//! | 0x58      | RGBA16 triangle + Z (affine)          | 19      |
//! | 0x5D      | RGBA16 triangle + Z (perspective)     | 22      |

pub const END: u32 = 0x00;
pub const GRADIENT_BACKGROUND: u32 = 0x01;
pub const TILE_SLICE: u32 = 0x10;

pub const SET_TLUT: u32 = 0x20;
pub const DRAW_CI8_RECT: u32 = 0x21;
pub const DRAW_CI4_RECT: u32 = 0x22;
pub const SET_CI4_PALETTE: u32 = 0x23;
pub const SET_TEX_ADDR_MODE: u32 = 0x24;
pub const SET_TEX_FILTER: u32 = 0x25;
pub const SET_BLEND: u32 = 0x26;
pub const SET_BLEND_MODE: u32 = 0x27;
pub const SET_SCISSOR: u32 = 0x28;
pub const DRAW_RGBA16_RECT: u32 = 0x29;
pub const DRAW_IA8_RECT: u32 = 0x2A;
pub const DRAW_IA16_RECT: u32 = 0x2B;
pub const DRAW_I4_RECT: u32 = 0x2C;
pub const DRAW_I8_RECT: u32 = 0x2D;

pub const SET_PRIM_COLOR: u32 = 0x30;
pub const SET_ENV_COLOR: u32 = 0x31;
pub const SET_COMBINE_MODE: u32 = 0x32;

pub const SOLID_TRIANGLE: u32 = 0x40;
pub const CI8_TRIANGLE: u32 = 0x41;
pub const CI4_TRIANGLE: u32 = 0x42;
pub const CI8_TRIANGLE_PERSP: u32 = 0x43;
pub const CI4_TRIANGLE_PERSP: u32 = 0x44;
pub const IA8_TRIANGLE: u32 = 0x45;
pub const IA8_TRIANGLE_PERSP: u32 = 0x46;
pub const IA16_TRIANGLE: u32 = 0x47;
pub const IA16_TRIANGLE_PERSP: u32 = 0x48;
pub const RGBA16_TRIANGLE: u32 = 0x49;
pub const RGBA16_TRIANGLE_PERSP: u32 = 0x4A;

pub const SET_Z_ENABLE: u32 = 0x50;
pub const SET_Z_BUFFER: u32 = 0x51;
pub const CLEAR_Z: u32 = 0x52;
pub const SOLID_TRIANGLE_Z: u32 = 0x53;
pub const RGBA16_TRIANGLE_Z: u32 = 0x58;
pub const RGBA16_TRIANGLE_Z_PERSP: u32 = 0x5D;

/// Argument words of a textured triangle: texture ref + 3 × (x, y, s, t)
pub const TEX_TRIANGLE_ARGS: usize = 16;

/// Argument words following `tag`, or `None` for an unknown tag
pub const fn arg_count(tag: u32) -> Option<usize> {
    match tag {
        END => Some(0),
        GRADIENT_BACKGROUND | TILE_SLICE | SET_TLUT => Some(2),
        DRAW_CI8_RECT | DRAW_CI4_RECT | DRAW_RGBA16_RECT | DRAW_IA8_RECT | DRAW_IA16_RECT
        | DRAW_I4_RECT | DRAW_I8_RECT => Some(5),
        SET_CI4_PALETTE | SET_TEX_ADDR_MODE | SET_TEX_FILTER | SET_BLEND | SET_BLEND_MODE
        | SET_PRIM_COLOR | SET_ENV_COLOR | SET_COMBINE_MODE | SET_Z_ENABLE | CLEAR_Z => Some(1),
        SET_SCISSOR => Some(4),
        SET_Z_BUFFER => Some(3),
        SOLID_TRIANGLE => Some(6),
        SOLID_TRIANGLE_Z => Some(9),
        CI8_TRIANGLE | CI4_TRIANGLE | IA8_TRIANGLE | IA16_TRIANGLE | RGBA16_TRIANGLE => {
            Some(TEX_TRIANGLE_ARGS)
        }
        CI8_TRIANGLE_PERSP | CI4_TRIANGLE_PERSP | IA8_TRIANGLE_PERSP | IA16_TRIANGLE_PERSP
        | RGBA16_TRIANGLE_PERSP | RGBA16_TRIANGLE_Z => Some(TEX_TRIANGLE_ARGS + 3),
        RGBA16_TRIANGLE_Z_PERSP => Some(TEX_TRIANGLE_ARGS + 6),
        _ => None,
    }
}
