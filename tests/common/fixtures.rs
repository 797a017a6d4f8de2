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

//! Test fixtures for common frame scenarios
//!
//! Every fixture system uses the same RDRAM map so display lists, textures
//! and streams never overlap.

use rspgfx::core::gfx::translate::bytecode::VertexLayout;
use rspgfx::core::gfx::translate::gbi::{self, Instruction};
use rspgfx::core::gfx::translate::DlCommand;
use rspgfx::core::gfx::ucode::UcCommand;
use rspgfx::core::gfx::TexVertex;
use rspgfx::core::memory::Memory;
use rspgfx::core::system::System;

pub const RDRAM_SIZE: usize = 0x0008_0000;
pub const DL: u32 = 0x0000_1000;
pub const SUB_DL: u32 = 0x0000_1800;
pub const VTX: u32 = 0x0000_2000;
pub const TEX: u32 = 0x0000_4000;
pub const TLUT: u32 = 0x0000_6000;
pub const ZBUF: u32 = 0x0000_8000;
pub const FB: u32 = 0x0001_0000;
pub const SLOT: u32 = 0x0003_0000;
pub const SLOT_WORDS: usize = 0x4000;

/// Instruction budget for bytecode runs
pub const DL_BUDGET: usize = 1024;

/// A system with a `width`×`height` framebuffer at [`FB`]
#[allow(dead_code)]
pub fn system(width: u32, height: u32) -> System {
    let mut system = System::new(RDRAM_SIZE);
    system.set_framebuffer(FB, width, height, width);
    system
}

/// Write big-endian 16-bit values starting at `addr`
#[allow(dead_code)]
pub fn load16(system: &mut System, addr: u32, values: &[u16]) {
    for (i, &value) in values.iter().enumerate() {
        system
            .rdram_mut()
            .write16(addr + i as u32 * 2, value)
            .expect("Failed to write RDRAM");
    }
}

/// Copy raw bytes starting at `addr`
#[allow(dead_code)]
pub fn load8(system: &mut System, addr: u32, bytes: &[u8]) {
    system
        .rdram_mut()
        .load(addr, bytes)
        .expect("Failed to write RDRAM");
}

/// Write vertex records in `layout` starting at `addr`
#[allow(dead_code)]
pub fn load_vertices(system: &mut System, addr: u32, layout: VertexLayout, vertices: &[TexVertex]) {
    load8(system, addr, &gbi::vertex_records(layout, vertices));
}

/// Write a display list at `addr`
#[allow(dead_code)]
pub fn write_dl(system: &mut System, addr: u32, list: &[Instruction]) {
    gbi::write_display_list(system.rdram_mut(), addr, list).expect("Failed to write display list");
}

/// Write `list` at [`DL`] and run it through the bytecode front-end
#[allow(dead_code)]
pub fn run_bytecode(system: &mut System, list: &[Instruction]) {
    write_dl(system, DL, list);
    system
        .run_display_list(DL, DL_BUDGET, SLOT, SLOT_WORDS)
        .expect("Failed to run display list");
}

/// Run a structured display list
#[allow(dead_code)]
pub fn run_typed(system: &mut System, list: &[DlCommand]) {
    system
        .run_typed(list, SLOT, SLOT_WORDS)
        .expect("Failed to run display list");
}

/// Encode and run UC commands
#[allow(dead_code)]
pub fn run_ucode(system: &mut System, commands: &[UcCommand]) {
    system
        .run_ucode(commands, SLOT, SLOT_WORDS)
        .expect("Failed to run stream");
}

/// Framebuffer pixel at (x, y)
#[allow(dead_code)]
pub fn pixel(system: &System, x: u32, y: u32) -> u16 {
    let fb = system.framebuffer();
    system
        .rdram()
        .read16(fb.origin + (y * fb.stride + x) * 2)
        .expect("Failed to read framebuffer")
}

/// One framebuffer row
#[allow(dead_code)]
pub fn row(system: &System, y: u32) -> Vec<u16> {
    (0..system.framebuffer().width)
        .map(|x| pixel(system, x, y))
        .collect()
}

/// Pack 4-bit indices two per byte, even index in the high nibble
#[allow(dead_code)]
pub fn pack_ci4(indices: &[u8]) -> Vec<u8> {
    indices
        .chunks(2)
        .map(|pair| (pair[0] << 4) | pair.get(1).copied().unwrap_or(0))
        .collect()
}

/// Opaque 5-bit gray ramp, one entry per level
#[allow(dead_code)]
pub fn gray_palette(count: usize) -> Vec<u16> {
    (0..count)
        .map(|i| {
            let level = (i % 32) as u16;
            (level << 11) | (level << 6) | (level << 1) | 1
        })
        .collect()
}

/// Two triangles covering (x0, y0)-(x1, y1) with (s, t) mapped linearly
/// from (s0, t0) at the top-left to (s1, t1) at the bottom-right
#[allow(dead_code)]
pub fn quad(
    (x0, y0, x1, y1): (i32, i32, i32, i32),
    (s0, t0, s1, t1): (i32, i32, i32, i32),
) -> [[TexVertex; 3]; 2] {
    let tl = TexVertex::textured(x0, y0, s0, t0);
    let tr = TexVertex::textured(x1, y0, s1, t0);
    let bl = TexVertex::textured(x0, y1, s0, t1);
    let br = TexVertex::textured(x1, y1, s1, t1);
    [[tl, tr, bl], [tr, br, bl]]
}
