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

//! RSPDL interpreter
//!
//! Walks an RSPDL word stream in RDRAM and executes it against a
//! call-local [`RendererState`], rasterizing straight into the framebuffer
//! located by the VI registers.
//!
//! # Execution Model
//!
//! 1. Renderer state resets to hardware defaults
//! 2. Read one opcode word and look it up in the dispatch table
//! 3. If fewer words remain in the budget than the opcode needs, stop
//! 4. Read the argument words and run the handler
//!
//! `End`, an unknown opcode, an unreadable stream word or an exhausted word
//! budget all stop execution. None of these are errors: the caller sees a
//! frame that simply has less drawn in it.

mod dispatch;
mod state;

pub use state::{RendererState, Tlut, ZBuffer};

use super::ucode::opcode;
use crate::core::memory::Memory;
use crate::core::vi::ViRegisters;
use dispatch::{OpcodeEntry, DISPATCH, MAX_ARGS};

/// Framebuffer view over externally owned memory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Framebuffer {
    /// Base address of pixel (0, 0)
    pub origin: u32,
    /// Row stride in pixels
    pub stride: u32,
    /// Drawable width in pixels
    pub width: u32,
    /// Drawable height in pixels
    pub height: u32,
}

impl Framebuffer {
    /// Address of the big-endian pixel at (x, y)
    #[inline(always)]
    pub fn pixel_addr(&self, x: i32, y: i32) -> u32 {
        let index = (y as u32)
            .wrapping_mul(self.stride)
            .wrapping_add(x as u32);
        self.origin.wrapping_add(index.wrapping_mul(2))
    }

    #[inline(always)]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }
}

/// Why a stream stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stop {
    End,
    Budget,
    UnknownOpcode(u32),
    Fault(u32),
}

/// Execute the RSPDL stream at `start`
///
/// The framebuffer base address and row stride come from `vi`; `width` and
/// `height` bound rasterization. At most `budget` stream words are consumed.
///
/// # Arguments
///
/// * `mem` - RDRAM holding the stream, textures, TLUTs and the framebuffer
/// * `vi` - VI origin/width registers
/// * `width` - Framebuffer width in pixels
/// * `height` - Framebuffer height in pixels
/// * `start` - Address of the first stream word
/// * `budget` - Maximum number of stream words to consume
///
/// # Examples
///
/// ```
/// use rspgfx::core::gfx::interp;
/// use rspgfx::core::gfx::ucode::{write_stream, UcCommand};
/// use rspgfx::core::memory::{Memory, Rdram};
/// use rspgfx::core::vi::ViRegisters;
///
/// let mut rdram = Rdram::new(0x10000);
/// let vi = ViRegisters::new(0x8000, 4);
///
/// let frame = [UcCommand::GradientBackground { left: 0xFFFF, right: 0xFFFF }];
/// write_stream(&mut rdram, 0x100, 16, &frame).unwrap();
///
/// interp::execute(&mut rdram, &vi, 4, 4, 0x100, 16);
/// assert_eq!(rdram.read16(0x8000).unwrap(), 0xFFFF);
/// ```
pub fn execute(
    mem: &mut dyn Memory,
    vi: &ViRegisters,
    width: u32,
    height: u32,
    start: u32,
    budget: usize,
) {
    let framebuffer = Framebuffer {
        origin: vi.origin,
        stride: vi.width,
        width,
        height,
    };

    log::debug!(
        "RSPDL: executing stream at 0x{:08X} (budget {} words) into {}x{} @ 0x{:08X}",
        start,
        budget,
        width,
        height,
        vi.origin
    );

    let mut interpreter = Interpreter::new(mem, framebuffer);
    match interpreter.run(start, budget) {
        Stop::End => log::trace!("RSPDL: end of stream"),
        Stop::Budget => log::debug!("RSPDL: word budget exhausted"),
        Stop::UnknownOpcode(tag) => {
            log::warn!("RSPDL: unknown opcode 0x{:08X}, stopping", tag)
        }
        Stop::Fault(addr) => log::warn!("RSPDL: stream read fault at 0x{:08X}", addr),
    }
}

/// Interpreter for one stream execution
///
/// Owns the renderer state for the duration of a single call; nothing
/// survives into the next call.
pub(in crate::core::gfx) struct Interpreter<'a> {
    pub(in crate::core::gfx) mem: &'a mut dyn Memory,
    pub(in crate::core::gfx) fb: Framebuffer,
    pub(in crate::core::gfx) state: RendererState,
}

impl<'a> Interpreter<'a> {
    pub(in crate::core::gfx) fn new(mem: &'a mut dyn Memory, fb: Framebuffer) -> Self {
        Self {
            mem,
            fb,
            state: RendererState::new(fb.width, fb.height),
        }
    }

    fn run(&mut self, start: u32, budget: usize) -> Stop {
        let mut pc = start;
        let mut remaining = budget;
        let mut args = [0u32; MAX_ARGS];

        loop {
            if remaining == 0 {
                return Stop::Budget;
            }

            let Ok(tag) = self.mem.read32(pc) else {
                return Stop::Fault(pc);
            };
            pc = pc.wrapping_add(4);
            remaining -= 1;

            if tag == opcode::END {
                return Stop::End;
            }

            let Some(OpcodeEntry {
                name,
                args: count,
                handler,
            }) = DISPATCH.get(tag as usize).copied().flatten()
            else {
                return Stop::UnknownOpcode(tag);
            };

            if remaining < count {
                return Stop::Budget;
            }

            for slot in args.iter_mut().take(count) {
                let Ok(word) = self.mem.read32(pc) else {
                    return Stop::Fault(pc);
                };
                *slot = word;
                pc = pc.wrapping_add(4);
            }
            remaining -= count;

            log::trace!("RSPDL: {} {:08X?}", name, &args[..count]);
            handler(self, &args[..count]);
        }
    }
}
