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

//! Video Interface registers
//!
//! The RSPDL interpreter does not receive the framebuffer location as an
//! argument; it reads it from the VI origin and width registers, the same way
//! scanout does.

/// VI_ORIGIN / VI_WIDTH register pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViRegisters {
    /// Framebuffer base address in RDRAM
    pub origin: u32,

    /// Row stride in pixels
    pub width: u32,
}

impl ViRegisters {
    /// VI_ORIGIN_REG offset
    pub const ORIGIN: u32 = 0x04;

    /// VI_WIDTH_REG offset
    pub const WIDTH: u32 = 0x08;

    pub fn new(origin: u32, width: u32) -> Self {
        Self { origin, width }
    }

    /// Register read by offset from the VI base
    pub fn read(&self, offset: u32) -> u32 {
        match offset {
            Self::ORIGIN => self.origin,
            Self::WIDTH => self.width,
            _ => {
                log::trace!("VI read from unhandled register 0x{:02X}", offset);
                0
            }
        }
    }

    /// Register write by offset from the VI base
    ///
    /// Only the low 24 bits of the origin and 12 bits of the width are wired.
    pub fn write(&mut self, offset: u32, value: u32) {
        match offset {
            Self::ORIGIN => self.origin = value & 0x00FF_FFFF,
            Self::WIDTH => self.width = value & 0x0FFF,
            _ => log::trace!(
                "VI write 0x{:08X} to unhandled register 0x{:02X}",
                value,
                offset
            ),
        }
    }
}
