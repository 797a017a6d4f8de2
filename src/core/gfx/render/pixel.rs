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

//! Pixel pipeline
//!
//! Fill resolution (combine mode), the punch-through/blend write path and
//! the Z-buffer test shared by every draw.

use crate::core::gfx::interp::{Interpreter, ZBuffer};
use crate::core::gfx::types::{BlendMode, CombineMode, TexelFormat, TextureRef};

/// Color source of one draw after the combine mode is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(in crate::core::gfx) enum Fill {
    /// Constant color, written without an alpha test
    Solid(u16),
    /// Texture samples, subject to punch-through
    Texture(TexelFormat, TextureRef),
}

impl Interpreter<'_> {
    /// Decide where a draw's colors come from
    ///
    /// # Returns
    ///
    /// `None` if the draw needs state that is missing (an indexed texture
    /// before any TLUT, or an empty texture), in which case it is a no-op.
    pub(in crate::core::gfx) fn resolve_fill(
        &self,
        texture: Option<(TexelFormat, TextureRef)>,
    ) -> Option<Fill> {
        match self.state.combine {
            CombineMode::Prim => Some(Fill::Solid(self.state.prim_color)),
            CombineMode::Env => Some(Fill::Solid(self.state.env_color)),
            CombineMode::Texel0 => match texture {
                None => Some(Fill::Solid(self.state.prim_color)),
                Some((format, texture)) => {
                    if texture.is_empty() {
                        return None;
                    }
                    if format.is_indexed() && self.state.tlut.is_none() {
                        log::trace!("RSPDL: {:?} draw before any TLUT, skipped", format);
                        return None;
                    }
                    Some(Fill::Texture(format, texture))
                }
            },
        }
    }

    /// Write one fragment through the blend unit
    ///
    /// With `punch_through` set and blending off, a color whose alpha bit is
    /// clear is discarded.
    ///
    /// # Returns
    ///
    /// `true` if the framebuffer pixel was written
    #[inline]
    pub(in crate::core::gfx) fn plot(
        &mut self,
        x: i32,
        y: i32,
        color: u16,
        punch_through: bool,
    ) -> bool {
        if !self.fb.contains(x, y) || !self.state.scissor.contains(x, y) {
            return false;
        }

        let blend = self.state.blend;
        if punch_through && blend == BlendMode::Off && color & 1 == 0 {
            return false;
        }

        let addr = self.fb.pixel_addr(x, y);
        let dst = match blend {
            BlendMode::Average50 => self.mem.read16(addr).unwrap_or(0),
            _ => 0,
        };

        match blend.blend(dst, color) {
            Some(out) => self.mem.write16(addr, out).is_ok(),
            None => false,
        }
    }

    /// Z test: passes iff `z` is nearer than the stored depth
    #[inline]
    pub(in crate::core::gfx) fn depth_passes(&self, x: i32, y: i32, z: u16) -> bool {
        let zb = self.state.z_buffer;
        let stored = if zb.contains(x, y) {
            self.mem.read16(zb.sample_addr(x, y)).unwrap_or(ZBuffer::FAR)
        } else {
            ZBuffer::FAR
        };
        z < stored
    }

    /// Store a depth sample; samples outside the Z extent are dropped
    #[inline]
    pub(in crate::core::gfx) fn depth_write(&mut self, x: i32, y: i32, z: u16) {
        let zb = self.state.z_buffer;
        if zb.contains(x, y) {
            let _ = self.mem.write16(zb.sample_addr(x, y), z);
        }
    }

    /// Fill the declared Z rectangle with `value`
    pub(in crate::core::gfx) fn clear_depth(&mut self, value: u16) {
        let zb = self.state.z_buffer;
        let samples = zb.width as u64 * zb.height as u64;

        log::debug!(
            "RSPDL: clear Z {}x{} @ 0x{:08X} to 0x{:04X}",
            zb.width,
            zb.height,
            zb.addr,
            value
        );

        for i in 0..samples {
            let addr = zb.addr.wrapping_add((i as u32).wrapping_mul(2));
            if self.mem.write16(addr, value).is_err() {
                log::warn!("RSPDL: Z clear ran off memory at 0x{:08X}", addr);
                break;
            }
        }
    }
}
