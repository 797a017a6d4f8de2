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

//! Graphics pipeline tests
//!
//! Tests are organized into the following modules:
//! - `rendering`: Triangles, rectangles, fill rule, combine and blend
//! - `sampling`: Texel formats, addressing modes and filtering
//! - `depth`: Z-buffer test, depth writes and Z clear

mod rendering;

use super::interp;
use super::types::TexVertex;
use super::ucode::{write_stream, UcCommand};
use crate::core::memory::{Memory, Rdram};
use crate::core::vi::ViRegisters;

pub(super) const FB: u32 = 0x0001_0000;
pub(super) const STREAM: u32 = 0x0000_0100;
pub(super) const TEX: u32 = 0x0000_4000;
pub(super) const TLUT: u32 = 0x0000_6000;
pub(super) const ZBUF: u32 = 0x0000_8000;

const SLOT_WORDS: usize = 0x0F00 / 4;

/// RDRAM with a small framebuffer and helpers to run streams against it
pub(super) struct Scene {
    pub rdram: Rdram,
    pub width: u32,
    pub height: u32,
}

impl Scene {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            rdram: Rdram::new(0x0002_0000),
            width,
            height,
        }
    }

    pub fn load16(&mut self, addr: u32, values: &[u16]) {
        for (i, &value) in values.iter().enumerate() {
            self.rdram.write16(addr + i as u32 * 2, value).unwrap();
        }
    }

    pub fn load8(&mut self, addr: u32, bytes: &[u8]) {
        self.rdram.load(addr, bytes).unwrap();
    }

    pub fn run(&mut self, commands: &[UcCommand]) {
        write_stream(&mut self.rdram, STREAM, SLOT_WORDS, commands).unwrap();
        let vi = ViRegisters::new(FB, self.width);
        interp::execute(
            &mut self.rdram,
            &vi,
            self.width,
            self.height,
            STREAM,
            SLOT_WORDS,
        );
    }

    pub fn pixel(&self, x: u32, y: u32) -> u16 {
        self.rdram.read16(FB + (y * self.width + x) * 2).unwrap()
    }

    pub fn row(&self, y: u32) -> Vec<u16> {
        (0..self.width).map(|x| self.pixel(x, y)).collect()
    }

    pub fn frame(&self) -> Vec<u16> {
        (0..self.height).flat_map(|y| self.row(y)).collect()
    }

    pub fn depth(&self, x: u32, y: u32, zb_width: u32) -> u16 {
        self.rdram.read16(ZBUF + (y * zb_width + x) * 2).unwrap()
    }
}

/// Two triangles covering (x0, y0)-(x1, y1) with (s, t) mapped linearly
/// from (s0, t0) at the top-left to (s1, t1) at the bottom-right
pub(super) fn quad(
    (x0, y0, x1, y1): (i32, i32, i32, i32),
    (s0, t0, s1, t1): (i32, i32, i32, i32),
) -> [[TexVertex; 3]; 2] {
    let tl = TexVertex::textured(x0, y0, s0, t0);
    let tr = TexVertex::textured(x1, y0, s1, t0);
    let bl = TexVertex::textured(x0, y1, s0, t1);
    let br = TexVertex::textured(x1, y1, s1, t1);
    [[tl, tr, bl], [tr, br, bl]]
}
