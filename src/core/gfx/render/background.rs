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

//! Background helpers
//!
//! Full-width horizontal gradients and the repeating tile slice used to
//! compose scrolling backgrounds.

use crate::core::gfx::interp::Interpreter;
use crate::core::gfx::types::{Color, TexelFormat};
use crate::core::gfx::ucode::TexRect;

/// Interpolate one 5-bit channel at column `x` of a `span`-wide ramp
///
/// `span` is the framebuffer width minus one and must be nonzero.
#[inline(always)]
fn lerp_channel(c0: u8, c1: u8, x: u32, span: u32) -> u8 {
    let c0 = c0 as u32;
    let c1 = c1 as u32;
    ((c0 * (span - x) + c1 * x + span / 2) / span) as u8
}

/// Gradient color at column `x` of a `width`-pixel framebuffer
pub(super) fn gradient_color(left: Color, right: Color, x: u32, width: u32) -> u16 {
    if width <= 1 {
        return Color { a: true, ..left }.to_packed();
    }
    let span = width - 1;
    Color::new(
        lerp_channel(left.r, right.r, x, span),
        lerp_channel(left.g, right.g, x, span),
        lerp_channel(left.b, right.b, x, span),
        true,
    )
    .to_packed()
}

impl Interpreter<'_> {
    /// Fill the scissor with a left-to-right gradient
    ///
    /// Pixels are written directly: no blending, no combine override.
    pub(in crate::core::gfx) fn draw_gradient(&mut self, left: u16, right: u16) {
        let left = Color::from_packed(left);
        let right = Color::from_packed(right);
        let scissor = self.state.scissor;

        log::debug!(
            "RSPDL: gradient {:?} -> {:?} over ({}, {})-({}, {})",
            left,
            right,
            scissor.x0,
            scissor.y0,
            scissor.x1,
            scissor.y1
        );

        for x in scissor.x0..scissor.x1 {
            let color = gradient_color(left, right, x as u32, self.fb.width);
            for y in scissor.y0..scissor.y1 {
                let _ = self.mem.write16(self.fb.pixel_addr(x, y), color);
            }
        }
    }

    /// Draw a grid of `size`×`size` RGBA16 tiles
    ///
    /// Tiles repeat every `size + spacing` pixels in both directions; the
    /// grid is shifted right by `offset` modulo that period. Each tile goes
    /// through the rectangle path.
    pub(in crate::core::gfx) fn draw_tile_slice(
        &mut self,
        addr: u32,
        size: u32,
        spacing: u32,
        offset: u32,
    ) {
        if size == 0 {
            return;
        }
        let period = (size + spacing) as i64;
        let width = self.fb.width as i64;
        let height = self.fb.height as i64;

        log::debug!(
            "RSPDL: tile slice {}px every {}px, offset {} from 0x{:08X}",
            size,
            period,
            offset,
            addr
        );

        let x_first = offset as i64 % period - period;
        let mut y = 0;
        while y < height {
            let mut x = x_first;
            while x < width {
                self.draw_rect(TexRect {
                    format: TexelFormat::Rgba16,
                    addr,
                    width: size,
                    height: size,
                    x: x as i32,
                    y: y as i32,
                });
                x += period;
            }
            y += period;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_endpoints() {
        let blue = Color::new(0, 0, 31, true);
        let cyan = Color::new(0, 31, 31, true);
        assert_eq!(gradient_color(blue, cyan, 0, 192), blue.to_packed());
        assert_eq!(gradient_color(blue, cyan, 191, 192), cyan.to_packed());
    }

    #[test]
    fn test_gradient_midpoint_rounds() {
        let black = Color::new(0, 0, 0, false);
        let white = Color::new(31, 31, 31, false);
        // x = 1 of 3 columns: (31 * 1 + 1) / 2 = 16
        let mid = Color::from_packed(gradient_color(black, white, 1, 3));
        assert_eq!(mid, Color::gray(16, true));
    }

    #[test]
    fn test_gradient_single_column_uses_left() {
        let red = Color::new(31, 0, 0, false);
        let green = Color::new(0, 31, 0, false);
        assert_eq!(gradient_color(red, green, 0, 1), 0xF801);
    }
}
