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

//! Bytecode display-list translator
//!
//! Walks raw 8-byte display-list instructions in RDRAM and emits the
//! equivalent UC commands.
//!
//! # Instruction Format
//!
//! ```text
//! Word 0: CCxxxxxx - Opcode (top byte) + opcode-specific fields
//! Word 1: xxxxxxxx - Opcode-specific fields, usually a segmented address
//! ```
//!
//! Segmented addresses carry a 4-bit segment id in bits 24-27 and an offset
//! in bits 0-23. A segment whose base was never set passes the address
//! through unchanged.
//!
//! # Error Handling
//!
//! Nothing here fails. Unknown opcodes are skipped, draws missing their
//! image, tile or vertices are dropped, and an unreadable instruction or an
//! exhausted instruction budget ends the list.

use super::{texture_rect, triangle_texture, PendingImage, TileSize};
use crate::core::gfx::types::{
    AddressMode, BlendMode, CombineMode, Projection, ScissorRect, TexVertex, TexelFormat,
    TextureFilter, TriangleTexture,
};
use crate::core::gfx::ucode::UcCommand;
use crate::core::memory::Memory;

/// Bytecode opcodes (top byte of word 0)
pub mod op {
    pub const VTX: u8 = 0xB4;
    pub const TRI: u8 = 0xB5;
    pub const VTX_TEX: u8 = 0xB6;
    pub const TRI_TEX: u8 = 0xB7;
    pub const VTX_TEX_Z: u8 = 0xB8;
    pub const TRI_TEX_Z: u8 = 0xB9;
    pub const VTX_TEX_QZ: u8 = 0xBA;
    pub const TRI_TEX_QZ: u8 = 0xBB;
    pub const SEGMENT: u8 = 0xD7;
    pub const DL: u8 = 0xDE;
    pub const END_DL: u8 = 0xDF;
    pub const SET_SCISSOR: u8 = 0xE3;
    pub const TEX_RECT: u8 = 0xE4;
    pub const SET_TEX_FILTER: u8 = 0xEA;
    pub const SET_BLEND_MODE: u8 = 0xEB;
    pub const SET_Z_ENABLE: u8 = 0xEC;
    pub const SET_Z_IMAGE: u8 = 0xED;
    pub const CLEAR_Z: u8 = 0xEE;
    pub const LOAD_TLUT: u8 = 0xF0;
    pub const SET_TILE_SIZE: u8 = 0xF2;
    pub const SET_TILE: u8 = 0xF5;
    pub const SET_PRIM_COLOR: u8 = 0xFA;
    pub const SET_ENV_COLOR: u8 = 0xFB;
    pub const SET_COMBINE: u8 = 0xFC;
    pub const SET_TEXTURE_IMAGE: u8 = 0xFD;
}

/// Size of one instruction in bytes
pub const INSTRUCTION_SIZE: u32 = 8;

/// Vertex buffer capacity
pub const VERTEX_SLOTS: usize = 16;

/// Largest TLUT a single load can describe
const TLUT_MAX: u32 = 256;

/// Upper bound on call-stack depth
///
/// Every push costs an instruction, so the budget bounds the depth too; this
/// caps the allocation for very large budgets.
pub const CALL_STACK_LIMIT: usize = 4096;

/// Return-address stack with a fixed capacity
struct CallStack {
    frames: Box<[u32]>,
    depth: usize,
}

impl CallStack {
    fn new(capacity: usize) -> Self {
        Self {
            frames: vec![0; capacity].into_boxed_slice(),
            depth: 0,
        }
    }

    /// Push a return address; `false` if the stack is full
    fn push(&mut self, addr: u32) -> bool {
        let Some(slot) = self.frames.get_mut(self.depth) else {
            return false;
        };
        *slot = addr;
        self.depth += 1;
        true
    }

    fn pop(&mut self) -> Option<u32> {
        self.depth = self.depth.checked_sub(1)?;
        Some(self.frames[self.depth])
    }
}

/// Vertex record layouts, one per vertex-load opcode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VertexLayout {
    /// x, y
    Plain,
    /// x, y, s, t
    Tex,
    /// x, y, s, t, z, pad
    TexZ,
    /// x, y, s, t, q, z, pad
    TexQz,
}

impl VertexLayout {
    /// Record size in bytes
    pub const fn stride(self) -> u32 {
        match self {
            VertexLayout::Plain => 4,
            VertexLayout::Tex => 8,
            VertexLayout::TexZ => 12,
            VertexLayout::TexQz => 16,
        }
    }
}

/// Translation state for one call
struct BytecodeTranslator<'a> {
    mem: &'a dyn Memory,
    segments: [Option<u32>; 16],
    stack: CallStack,
    vertices: [Option<TexVertex>; VERTEX_SLOTS],
    vertex_count: usize,
    image: Option<PendingImage>,
    tile: Option<TileSize>,
    ci4_palette: u8,
    out: Vec<UcCommand>,
}

/// Translate the display list at `start`
///
/// At most `max_instructions` instructions are executed, counting every
/// instruction reached through calls and branches. The result always ends
/// with exactly one `End`.
///
/// # Arguments
///
/// * `mem` - RDRAM holding the display lists and vertex data
/// * `start` - Address of the first instruction (may be segmented)
/// * `max_instructions` - Instruction budget
///
/// # Examples
///
/// ```
/// use rspgfx::core::gfx::translate::bytecode::translate;
/// use rspgfx::core::gfx::ucode::UcCommand;
/// use rspgfx::core::memory::{Memory, Rdram};
///
/// let mut rdram = Rdram::new(0x1000);
/// // G_SETPRIMCOLOR 0xF801, G_ENDDL
/// rdram.write32(0x100, 0xFA00_0000).unwrap();
/// rdram.write32(0x104, 0x0000_F801).unwrap();
/// rdram.write32(0x108, 0xDF00_0000).unwrap();
///
/// let commands = translate(&rdram, 0x100, 64);
/// assert_eq!(commands, [UcCommand::SetPrimColor(0xF801), UcCommand::End]);
/// ```
pub fn translate(mem: &dyn Memory, start: u32, max_instructions: usize) -> Vec<UcCommand> {
    let mut translator = BytecodeTranslator {
        mem,
        segments: [None; 16],
        stack: CallStack::new(max_instructions.min(CALL_STACK_LIMIT)),
        vertices: [None; VERTEX_SLOTS],
        vertex_count: 0,
        image: None,
        tile: None,
        ci4_palette: 0,
        out: Vec::new(),
    };
    translator.run(start, max_instructions);
    translator.out
}

impl BytecodeTranslator<'_> {
    fn run(&mut self, start: u32, budget: usize) {
        let mut pc = self.resolve(start);
        let mut executed = 0;

        loop {
            if executed == budget {
                log::debug!("Bytecode DL: instruction budget {} exhausted", budget);
                break;
            }
            executed += 1;

            let (Ok(w0), Ok(w1)) = (self.mem.read32(pc), self.mem.read32(pc.wrapping_add(4)))
            else {
                log::warn!("Bytecode DL: unreadable instruction at 0x{:08X}", pc);
                break;
            };
            let opcode = (w0 >> 24) as u8;
            log::trace!("Bytecode DL: 0x{:08X}: {:08X} {:08X}", pc, w0, w1);

            let next = pc.wrapping_add(INSTRUCTION_SIZE);
            pc = match opcode {
                op::END_DL => match self.stack.pop() {
                    Some(ret) => ret,
                    None => break,
                },
                op::DL => {
                    if w0 & 1 != 0 && !self.stack.push(next) {
                        log::warn!("Bytecode DL: call stack full at 0x{:08X}, branching", pc);
                    }
                    self.resolve(w1)
                }
                _ => {
                    self.execute(opcode, w0, w1);
                    next
                }
            };
        }

        self.out.push(UcCommand::End);
        log::debug!(
            "Bytecode DL: {} instructions -> {} UC commands",
            executed,
            self.out.len()
        );
    }

    /// Resolve a segmented address
    fn resolve(&self, addr: u32) -> u32 {
        let segment = ((addr >> 24) & 0xF) as usize;
        match self.segments[segment] {
            Some(base) => base.wrapping_add(addr & 0x00FF_FFFF),
            None => addr,
        }
    }

    fn execute(&mut self, opcode: u8, w0: u32, w1: u32) {
        match opcode {
            op::SEGMENT => self.segments[(w0 & 0xF) as usize] = Some(w1),
            op::SET_TEXTURE_IMAGE => self.set_texture_image(w0, w1),
            op::LOAD_TLUT => {
                let count = match w0 & 0x1FF {
                    0 => TLUT_MAX,
                    n => n.min(TLUT_MAX),
                };
                let addr = self.resolve(w1);
                self.out.push(UcCommand::SetTlut { addr, count });
            }
            op::SET_TILE_SIZE => {
                let (uls, ult) = unpack_pair(w0);
                let (lrs, lrt) = unpack_pair(w1);
                self.tile = Some(TileSize::from_fixed(uls, ult, lrs, lrt));
            }
            op::SET_SCISSOR => {
                let (ulx, uly) = unpack_pair(w0);
                let (lrx, lry) = unpack_pair(w1);
                self.out.push(UcCommand::SetScissor(ScissorRect::new(
                    (ulx >> 2) as i32,
                    (uly >> 2) as i32,
                    (lrx >> 2) as i32,
                    (lry >> 2) as i32,
                )));
            }
            op::TEX_RECT => self.texture_rectangle(w0, w1),
            op::SET_TILE => {
                self.ci4_palette = ((w1 >> 20) & 0xF) as u8;
                self.out.push(UcCommand::SetTexAddrMode {
                    s: AddressMode::from_tile_bits(w1 >> 8),
                    t: AddressMode::from_tile_bits(w1 >> 18),
                });
            }
            op::SET_PRIM_COLOR => self.out.push(UcCommand::SetPrimColor(w1 as u16)),
            op::SET_ENV_COLOR => self.out.push(UcCommand::SetEnvColor(w1 as u16)),
            op::SET_COMBINE => self
                .out
                .push(UcCommand::SetCombineMode(CombineMode::from_bits(w1 & 3))),
            op::VTX => self.load_vertices(w0, w1, VertexLayout::Plain),
            op::VTX_TEX => self.load_vertices(w0, w1, VertexLayout::Tex),
            op::VTX_TEX_Z => self.load_vertices(w0, w1, VertexLayout::TexZ),
            op::VTX_TEX_QZ => self.load_vertices(w0, w1, VertexLayout::TexQz),
            op::TRI | op::TRI_TEX | op::TRI_TEX_Z | op::TRI_TEX_QZ => self.triangle(opcode, w0),
            op::SET_Z_ENABLE => self.out.push(UcCommand::SetZEnable(w1 & 1 != 0)),
            op::SET_Z_IMAGE => {
                let addr = self.resolve(w1);
                self.out.push(UcCommand::SetZBuffer {
                    addr,
                    width: (w0 >> 12) & 0xFFF,
                    height: w0 & 0xFFF,
                });
            }
            op::CLEAR_Z => self.out.push(UcCommand::ClearZ(w1 as u16)),
            op::SET_TEX_FILTER => self
                .out
                .push(UcCommand::SetTexFilter(TextureFilter::from_bits(w1 & 1))),
            op::SET_BLEND_MODE => self
                .out
                .push(UcCommand::SetBlendMode(BlendMode::from_bits(w1 & 3))),
            _ => log::trace!("Bytecode DL: ignoring opcode 0x{:02X}", opcode),
        }
    }

    /// 0xFD: size field in bits 19-20, width - 1 in bits 0-11
    fn set_texture_image(&mut self, w0: u32, w1: u32) {
        let format = match (w0 >> 19) & 3 {
            0 => TexelFormat::Ci4,
            1 => TexelFormat::Ci8,
            2 => TexelFormat::Rgba16,
            size => {
                log::debug!("Bytecode DL: unsupported texel size {}, image ignored", size);
                return;
            }
        };
        self.image = Some(PendingImage {
            format,
            addr: self.resolve(w1),
            width: (w0 & 0xFFF) + 1,
            height: 0,
        });
    }

    /// 0xE4: lower-right corner in word 0, upper-left in word 1
    fn texture_rectangle(&mut self, w0: u32, w1: u32) {
        let Some(image) = self.image else {
            log::debug!("Bytecode DL: texture rectangle without an image");
            return;
        };
        let (lrx, lry) = unpack_pair(w0);
        let (ulx, uly) = unpack_pair(w1);

        if image.format == TexelFormat::Ci4 {
            self.out.push(UcCommand::SetCi4Palette(self.ci4_palette));
        }
        self.out
            .push(texture_rect(&image, self.tile, (ulx, uly, lrx, lry)));
    }

    fn load_vertices(&mut self, w0: u32, w1: u32, layout: VertexLayout) {
        let count = (w0 & 0xFFF) + 1;
        let base = self.resolve(w1);

        for i in 0..count {
            if self.vertex_count >= VERTEX_SLOTS {
                log::debug!("Bytecode DL: vertex buffer full, dropping the rest");
                return;
            }
            let addr = base.wrapping_add(i * layout.stride());
            let Some(vertex) = self.read_vertex(addr, layout) else {
                log::warn!("Bytecode DL: unreadable vertex at 0x{:08X}", addr);
                return;
            };
            self.vertices[self.vertex_count] = Some(vertex);
            self.vertex_count += 1;
        }
    }

    fn read_vertex(&self, addr: u32, layout: VertexLayout) -> Option<TexVertex> {
        let half = |offset: u32| self.mem.read16(addr.wrapping_add(offset)).ok();

        let mut v = TexVertex::at(half(0)? as i16 as i32, half(2)? as i16 as i32);
        if layout != VertexLayout::Plain {
            v.s = half(4)? as i16 as i32;
            v.t = half(6)? as i16 as i32;
        }
        match layout {
            VertexLayout::TexZ => v.z = half(8)?,
            VertexLayout::TexQz => {
                v.q = self.mem.read32(addr.wrapping_add(8)).ok()?;
                v.z = half(12)?;
            }
            _ => {}
        }
        Some(v)
    }

    fn triangle(&mut self, opcode: u8, w0: u32) {
        let indices = [w0 & 0xF, (w0 >> 4) & 0xF, (w0 >> 8) & 0xF];
        let fetched = indices.map(|i| self.vertices[i as usize]);
        let [Some(a), Some(b), Some(c)] = fetched else {
            log::debug!("Bytecode DL: triangle {:?} uses an unloaded vertex", indices);
            return;
        };
        let vertices = [a, b, c];

        let (projection, depth) = match opcode {
            op::TRI => {
                self.out.push(UcCommand::SolidTriangle(vertices));
                return;
            }
            op::TRI_TEX => (Projection::Affine, false),
            op::TRI_TEX_Z => (Projection::Affine, true),
            _ => (Projection::Perspective, true),
        };

        let Some(image) = self.image else {
            self.out.push(if depth {
                UcCommand::SolidTriangleZ(vertices)
            } else {
                UcCommand::SolidTriangle(vertices)
            });
            return;
        };
        let Some(tile) = self.tile else {
            log::debug!("Bytecode DL: textured triangle before any tile size");
            return;
        };
        let Ok(format) = TriangleTexture::try_from(image.format) else {
            return;
        };
        let texture = triangle_texture(&image, tile);

        if format == TriangleTexture::Ci4 {
            self.out.push(UcCommand::SetCi4Palette(self.ci4_palette));
        }
        self.out.push(match (format, depth) {
            (TriangleTexture::Rgba16, true) => UcCommand::Rgba16TriangleZ {
                projection,
                texture,
                vertices,
            },
            _ => UcCommand::TexTriangle {
                format,
                projection,
                texture,
                vertices,
            },
        });
    }
}

/// Split `hi << 12 | lo` into two 12-bit fields
#[inline(always)]
fn unpack_pair(word: u32) -> (u32, u32) {
    ((word >> 12) & 0xFFF, word & 0xFFF)
}
