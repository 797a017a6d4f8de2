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

//! A 2×2 texture stretched over a 5×5 region through the bytecode
//! front-end, once per addressing mode

mod common;

use common::fixtures::*;
use rspgfx::core::gfx::translate::bytecode::VertexLayout;
use rspgfx::core::gfx::translate::gbi;
use rspgfx::core::gfx::{AddressMode, TexelFormat};
use rspgfx::core::system::System;

const A: u16 = 0xF801;
const B: u16 = 0x07C1;
const C: u16 = 0x003F;
const D: u16 = 0xFFFF;

fn draw(s: AddressMode, t: AddressMode) -> System {
    let mut system = system(5, 5);
    load16(&mut system, TEX, &[A, B, C, D]);

    let [first, second] = quad((0, 0, 5, 5), (0, 0, 5, 5));
    let vertices: Vec<_> = first.into_iter().chain(second).collect();
    load_vertices(&mut system, VTX, VertexLayout::Tex, &vertices);

    run_bytecode(
        &mut system,
        &[
            gbi::set_texture_image(TexelFormat::Rgba16, 2, TEX),
            gbi::set_tile(0, s, t),
            gbi::set_tile_size(0, 0, 1 << 2, 1 << 2),
            gbi::vertices(VertexLayout::Tex, 6, VTX),
            gbi::triangle(VertexLayout::Tex, 0, 1, 2),
            gbi::triangle(VertexLayout::Tex, 3, 4, 5),
            gbi::end_dl(),
        ],
    );
    system
}

#[test]
fn test_wrap_repeats_with_period_two() {
    let system = draw(AddressMode::Wrap, AddressMode::Wrap);
    for y in 0..5 {
        let expected = if y % 2 == 0 {
            [A, B, A, B, A]
        } else {
            [C, D, C, D, C]
        };
        assert_eq!(row(&system, y), expected, "row {}", y);
    }
}

#[test]
fn test_mirror_reflects() {
    let system = draw(AddressMode::Mirror, AddressMode::Mirror);
    let top = [A, B, B, A, A];
    let bottom = [C, D, D, C, C];
    for (y, expected) in [top, bottom, bottom, top, top].iter().enumerate() {
        assert_eq!(&row(&system, y as u32), expected, "row {}", y);
    }
}

#[test]
fn test_clamp_holds_edge() {
    let system = draw(AddressMode::Clamp, AddressMode::Clamp);
    assert_eq!(row(&system, 0), [A, B, B, B, B]);
    for y in 1..5 {
        assert_eq!(row(&system, y), [C, D, D, D, D], "row {}", y);
    }
}

#[test]
fn test_axes_are_independent() {
    let system = draw(AddressMode::Wrap, AddressMode::Clamp);
    assert_eq!(row(&system, 0), [A, B, A, B, A]);
    assert_eq!(row(&system, 4), [C, D, C, D, C]);

    let system = draw(AddressMode::Clamp, AddressMode::Mirror);
    assert_eq!(row(&system, 2), [C, D, D, D, D]);
    assert_eq!(row(&system, 3), [A, B, B, B, B]);
}
