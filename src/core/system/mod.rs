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

//! System integration module
//!
//! Ties RDRAM, the VI registers and the graphics pipeline together and runs
//! one frame at a time: translate, encode into a stream slot, interpret.

use super::config::{Config, Frontend};
use super::error::Result;
use super::gfx::interp::{self, Framebuffer};
use super::gfx::translate::{bytecode, typed, DlCommand};
use super::gfx::ucode::{self, UcCommand};
use super::memory::Rdram;
use super::scanout;
use super::vi::ViRegisters;
use serde::Serialize;
use std::path::Path;

/// What one frame run produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FrameStats {
    /// UC commands handed to the encoder, including the final `End`
    pub commands: usize,
    /// RSPDL words written to the stream slot
    pub words: usize,
}

/// N64 graphics system
///
/// Owns RDRAM and the VI registers. Renderer state is not kept here: each
/// interpretation starts from hardware defaults.
///
/// # Example
/// ```
/// use rspgfx::core::gfx::translate::DlCommand;
/// use rspgfx::core::system::System;
///
/// let mut system = System::new(0x10000);
/// system.set_framebuffer(0x8000, 8, 8, 8);
///
/// let dl = [
///     DlCommand::SetPrimColor(0x07C1),
///     DlCommand::FillTriangle([(0, 0), (8, 0), (0, 8)]),
///     DlCommand::End,
/// ];
/// let stats = system.run_typed(&dl, 0x100, 64).unwrap();
/// assert_eq!(stats.commands, 3);
/// ```
pub struct System {
    rdram: Rdram,
    vi: ViRegisters,
    /// Drawable width in pixels
    width: u32,
    /// Drawable height in pixels
    height: u32,
}

impl System {
    /// Create a system with `rdram_size` bytes of zeroed RDRAM
    ///
    /// The framebuffer starts out empty; call [`System::set_framebuffer`]
    /// before running a frame.
    pub fn new(rdram_size: usize) -> Self {
        Self {
            rdram: Rdram::new(rdram_size),
            vi: ViRegisters::default(),
            width: 0,
            height: 0,
        }
    }

    /// Create a system with default-sized RDRAM and the configured framebuffer
    pub fn from_config(config: &Config) -> Self {
        let mut system = Self::new(Rdram::DEFAULT_SIZE);
        let fb = config.framebuffer;
        system.set_framebuffer(fb.origin, fb.width, fb.height, fb.stride);
        system
    }

    /// Place the framebuffer
    ///
    /// `origin` and `stride` go to the VI registers, where the interpreter
    /// reads them.
    pub fn set_framebuffer(&mut self, origin: u32, width: u32, height: u32, stride: u32) {
        self.vi.write(ViRegisters::ORIGIN, origin);
        self.vi.write(ViRegisters::WIDTH, stride);
        self.width = width;
        self.height = height;
        log::debug!(
            "Framebuffer {}x{} (stride {}) at 0x{:08X}",
            width,
            height,
            self.vi.width,
            self.vi.origin
        );
    }

    /// Current framebuffer placement
    pub fn framebuffer(&self) -> Framebuffer {
        Framebuffer {
            origin: self.vi.origin,
            stride: self.vi.width,
            width: self.width,
            height: self.height,
        }
    }

    pub fn rdram(&self) -> &Rdram {
        &self.rdram
    }

    pub fn rdram_mut(&mut self) -> &mut Rdram {
        &mut self.rdram
    }

    pub fn vi(&self) -> &ViRegisters {
        &self.vi
    }

    pub fn vi_mut(&mut self) -> &mut ViRegisters {
        &mut self.vi
    }

    /// Load a raw RDRAM image at physical address 0
    ///
    /// # Errors
    ///
    /// - `Io` if the file cannot be read
    /// - `ImageTooLarge` if the image does not fit
    pub fn load_image<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.rdram.load_image(path)
    }

    /// Interpret the RSPDL stream at `start`, consuming at most `budget` words
    pub fn run_stream(&mut self, start: u32, budget: usize) {
        interp::execute(
            &mut self.rdram,
            &self.vi,
            self.width,
            self.height,
            start,
            budget,
        );
    }

    /// Encode UC commands into the stream slot and interpret them
    ///
    /// # Errors
    ///
    /// - `StreamOverflow` if the commands do not fit in `slot_words`
    /// - Memory errors if the slot lies outside RDRAM
    pub fn run_ucode(
        &mut self,
        commands: &[UcCommand],
        slot_addr: u32,
        slot_words: usize,
    ) -> Result<FrameStats> {
        let words = ucode::write_stream(&mut self.rdram, slot_addr, slot_words, commands)?;
        self.run_stream(slot_addr, words);
        Ok(FrameStats {
            commands: commands.len(),
            words,
        })
    }

    /// Translate a structured display list and run it
    ///
    /// # Errors
    ///
    /// Same as [`System::run_ucode`]
    pub fn run_typed(
        &mut self,
        display_list: &[DlCommand],
        slot_addr: u32,
        slot_words: usize,
    ) -> Result<FrameStats> {
        let commands = typed::translate(display_list);
        self.run_ucode(&commands, slot_addr, slot_words)
    }

    /// Translate the bytecode display list at `start` and run it
    ///
    /// # Errors
    ///
    /// Same as [`System::run_ucode`]
    pub fn run_display_list(
        &mut self,
        start: u32,
        max_instructions: usize,
        slot_addr: u32,
        slot_words: usize,
    ) -> Result<FrameStats> {
        let commands = bytecode::translate(&self.rdram, start, max_instructions);
        self.run_ucode(&commands, slot_addr, slot_words)
    }

    /// Run one frame as configured
    ///
    /// For `rspdl` the stream at `start` is interpreted in place and no
    /// commands are translated.
    ///
    /// # Errors
    ///
    /// Same as [`System::run_ucode`]
    pub fn run_frame(&mut self, config: &Config) -> Result<FrameStats> {
        let pipeline = config.pipeline;
        match pipeline.frontend {
            Frontend::Bytecode => self.run_display_list(
                pipeline.start,
                pipeline.budget,
                pipeline.slot_addr,
                pipeline.slot_words,
            ),
            Frontend::Rspdl => {
                self.run_stream(pipeline.start, pipeline.budget);
                Ok(FrameStats::default())
            }
        }
    }

    /// RGBA8888 scanout of the framebuffer
    pub fn scanout(&self) -> Vec<u8> {
        scanout::scanout_rgba8888(
            &self.rdram,
            self.vi.origin,
            self.width,
            self.height,
            self.vi.width,
        )
    }

    /// CRC32 of the RGBA8888 scanout
    pub fn frame_crc32(&self) -> u32 {
        scanout::frame_crc32(
            &self.rdram,
            self.vi.origin,
            self.width,
            self.height,
            self.vi.width,
        )
    }
}
