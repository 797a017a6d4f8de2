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

//! Textured rectangle blits

use super::pixel::Fill;
use crate::core::gfx::interp::Interpreter;
use crate::core::gfx::types::TextureRef;
use crate::core::gfx::ucode::TexRect;

impl Interpreter<'_> {
    /// Blit a texture 1:1 with its top-left texel at (`rect.x`, `rect.y`)
    ///
    /// Only the part inside the scissor is visited. Texels use the same
    /// punch-through and blend path as triangles; a PRIM/ENV combine mode
    /// fills the rectangle with a solid color instead.
    pub(in crate::core::gfx) fn draw_rect(&mut self, rect: TexRect) {
        let texture = TextureRef::new(rect.addr, rect.width, rect.height);
        let Some(fill) = self.resolve_fill(Some((rect.format, texture))) else {
            return;
        };

        let scissor = self.state.scissor;
        let x0 = rect.x as i64;
        let y0 = rect.y as i64;
        let x_start = x0.max(scissor.x0 as i64);
        let x_end = (x0 + rect.width as i64).min(scissor.x1 as i64);
        let y_start = y0.max(scissor.y0 as i64);
        let y_end = (y0 + rect.height as i64).min(scissor.y1 as i64);

        if x_start >= x_end || y_start >= y_end {
            return;
        }

        log::trace!(
            "RSPDL: {:?} rect {}x{} @ ({}, {}) from 0x{:08X}",
            rect.format,
            rect.width,
            rect.height,
            rect.x,
            rect.y,
            rect.addr
        );

        for y in y_start..y_end {
            for x in x_start..x_end {
                let (color, punch_through) = match fill {
                    Fill::Solid(color) => (color, false),
                    Fill::Texture(format, texture) => {
                        let s = (x - x0) as i32;
                        let t = (y - y0) as i32;
                        (self.fetch_texel(format, &texture, s, t), true)
                    }
                };
                self.plot(x as i32, y as i32, color, punch_through);
            }
        }
    }
}
