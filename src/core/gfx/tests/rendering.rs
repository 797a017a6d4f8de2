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

//! Rendering primitive tests
//! Tests for triangles, rectangles, backgrounds, combine and blend modes

use super::*;
use crate::core::gfx::types::{
    BlendMode, CombineMode, Projection, ScissorRect, TexelFormat, TextureRef, TriangleTexture,
};
use crate::core::gfx::ucode::TexRect;

const RED: u16 = 0xF801;
const GREEN: u16 = 0x07C1;
const BLUE: u16 = 0x003F;
const WHITE: u16 = 0xFFFF;

/// White averaged over black
const HALF_WHITE: u16 = 0x7BDF;

fn solid(vertices: [(i32, i32); 3]) -> UcCommand {
    UcCommand::SolidTriangle(vertices.map(|(x, y)| TexVertex::at(x, y)))
}

fn rect(format: TexelFormat, addr: u32, width: u32, height: u32, x: i32, y: i32) -> UcCommand {
    UcCommand::DrawTexRect(TexRect {
        format,
        addr,
        width,
        height,
        x,
        y,
    })
}

#[test]
fn test_solid_triangle_uses_prim_color() {
    let mut scene = Scene::new(4, 4);
    scene.run(&[UcCommand::SetPrimColor(RED), solid([(0, 0), (4, 0), (0, 4)])]);

    assert_eq!(scene.pixel(0, 0), RED);
    assert_eq!(scene.pixel(2, 0), RED);
    assert_eq!(scene.pixel(3, 3), 0);
}

#[test]
fn test_shared_edge_drawn_once() {
    let mut scene = Scene::new(4, 4);
    // Averaging makes a second write to the same pixel visible
    scene.run(&[
        UcCommand::SetBlendMode(BlendMode::Average50),
        solid([(0, 0), (4, 0), (0, 4)]),
        solid([(4, 0), (4, 4), (0, 4)]),
    ]);

    assert!(scene.frame().iter().all(|&p| p == HALF_WHITE));
}

#[test]
fn test_winding_does_not_matter() {
    let mut cw = Scene::new(8, 8);
    let mut ccw = Scene::new(8, 8);
    cw.run(&[solid([(1, 1), (7, 2), (3, 7)])]);
    ccw.run(&[solid([(1, 1), (3, 7), (7, 2)])]);

    assert_eq!(cw.frame(), ccw.frame());
    assert!(cw.frame().contains(&WHITE));
}

#[test]
fn test_zero_area_triangle_is_noop() {
    let mut scene = Scene::new(4, 4);
    scene.run(&[
        solid([(0, 0), (2, 2), (4, 4)]),
        solid([(1, 1), (1, 1), (1, 1)]),
    ]);
    assert!(scene.frame().iter().all(|&p| p == 0));
}

#[test]
fn test_offscreen_vertices_are_clipped() {
    let mut scene = Scene::new(4, 4);
    scene.run(&[solid([(-100, -100), (200, -100), (-100, 200)])]);

    // The hypotenuse passes well outside the framebuffer
    assert!(scene.frame().iter().all(|&p| p == WHITE));
}

#[test]
fn test_huge_coordinates_do_not_overflow() {
    let mut scene = Scene::new(4, 4);
    scene.run(&[solid([(i32::MIN, 0), (i32::MAX, 0), (0, i32::MAX)])]);
    assert!(scene.frame().iter().all(|&p| p == WHITE));
}

#[test]
fn test_scissor_clips_triangle() {
    let mut scene = Scene::new(4, 4);
    scene.run(&[
        UcCommand::SetScissor(ScissorRect::new(1, 1, 3, 3)),
        solid([(0, 0), (8, 0), (0, 8)]),
    ]);

    assert_eq!(scene.pixel(0, 0), 0);
    assert_eq!(scene.pixel(1, 1), WHITE);
    assert_eq!(scene.pixel(2, 2), WHITE);
    assert_eq!(scene.pixel(3, 0), 0);
}

#[test]
fn test_ci8_before_tlut_is_noop() {
    let mut scene = Scene::new(4, 4);
    scene.load8(TEX, &[1; 16]);
    let [a, b] = quad((0, 0, 4, 4), (0, 0, 4, 4));
    let texture = TextureRef::new(TEX, 4, 4);

    scene.run(&[
        rect(TexelFormat::Ci8, TEX, 4, 4, 0, 0),
        UcCommand::TexTriangle {
            format: TriangleTexture::Ci8,
            projection: Projection::Affine,
            texture,
            vertices: a,
        },
        UcCommand::TexTriangle {
            format: TriangleTexture::Ci4,
            projection: Projection::Perspective,
            texture,
            vertices: b,
        },
    ]);
    assert!(scene.frame().iter().all(|&p| p == 0));
}

#[test]
fn test_empty_texture_is_noop() {
    let mut scene = Scene::new(4, 4);
    let [a, _] = quad((0, 0, 4, 4), (0, 0, 4, 4));
    scene.run(&[UcCommand::TexTriangle {
        format: TriangleTexture::Rgba16,
        projection: Projection::Affine,
        texture: TextureRef::new(TEX, 0, 4),
        vertices: a,
    }]);
    assert!(scene.frame().iter().all(|&p| p == 0));
}

#[test]
fn test_combine_prim_overrides_texture() {
    let mut scene = Scene::new(4, 4);
    scene.load16(TEX, &[0; 16]);

    // No TLUT: under PRIM the texture is never consulted
    scene.run(&[
        UcCommand::SetPrimColor(GREEN),
        UcCommand::SetCombineMode(CombineMode::Prim),
        rect(TexelFormat::Ci8, TEX, 2, 2, 0, 0),
        rect(TexelFormat::Rgba16, TEX, 2, 2, 2, 2),
    ]);

    assert_eq!(scene.pixel(0, 0), GREEN);
    assert_eq!(scene.pixel(1, 1), GREEN);
    assert_eq!(scene.pixel(3, 3), GREEN);
    assert_eq!(scene.pixel(3, 0), 0);
}

#[test]
fn test_combine_env_fills_with_env_color() {
    let mut scene = Scene::new(4, 4);
    scene.run(&[
        UcCommand::SetEnvColor(BLUE),
        UcCommand::SetCombineMode(CombineMode::Env),
        solid([(0, 0), (4, 0), (0, 4)]),
    ]);
    assert_eq!(scene.pixel(0, 0), BLUE);
}

#[test]
fn test_solid_fill_has_no_punch_through() {
    let mut scene = Scene::new(4, 4);
    // Alpha bit clear, still written
    scene.run(&[UcCommand::SetPrimColor(0xF800), solid([(0, 0), (4, 0), (0, 4)])]);
    assert_eq!(scene.pixel(0, 0), 0xF800);
}

#[test]
fn test_rgba16_rect_blit_with_punch_through() {
    let mut scene = Scene::new(4, 4);
    scene.load16(TEX, &[RED, 0xF800, GREEN, BLUE]);
    scene.run(&[
        UcCommand::GradientBackground {
            left: WHITE,
            right: WHITE,
        },
        rect(TexelFormat::Rgba16, TEX, 2, 2, 1, 1),
    ]);

    assert_eq!(scene.pixel(1, 1), RED);
    // Alpha-clear texel leaves the background
    assert_eq!(scene.pixel(2, 1), WHITE);
    assert_eq!(scene.pixel(1, 2), GREEN);
    assert_eq!(scene.pixel(2, 2), BLUE);
    assert_eq!(scene.pixel(0, 0), WHITE);
}

#[test]
fn test_rect_clipped_at_negative_position() {
    let mut scene = Scene::new(4, 4);
    scene.load16(TEX, &[RED, GREEN, BLUE, WHITE]);
    scene.run(&[rect(TexelFormat::Rgba16, TEX, 2, 2, -1, -1)]);

    assert_eq!(scene.pixel(0, 0), WHITE);
    assert_eq!(scene.pixel(1, 0), 0);
}

#[test]
fn test_average_blend_ignores_punch_through() {
    let mut scene = Scene::new(2, 1);
    scene.load16(TEX, &[0xFFFE]);
    scene.run(&[
        UcCommand::SetBlendMode(BlendMode::Average50),
        rect(TexelFormat::Rgba16, TEX, 1, 1, 0, 0),
    ]);
    // Averaged with the black destination, alpha ORed (still clear)
    assert_eq!(scene.pixel(0, 0), 0x7BDE);
}

#[test]
fn test_src_over_alpha_blend() {
    let mut scene = Scene::new(2, 1);
    scene.load16(TEX, &[0xF800, GREEN]);
    scene.run(&[
        UcCommand::GradientBackground {
            left: BLUE,
            right: BLUE,
        },
        UcCommand::SetBlendMode(BlendMode::SrcOverAlpha1Bit),
        rect(TexelFormat::Rgba16, TEX, 2, 1, 0, 0),
    ]);
    assert_eq!(scene.pixel(0, 0), BLUE);
    assert_eq!(scene.pixel(1, 0), GREEN);
}

#[test]
fn test_legacy_blend_toggle_selects_average() {
    let mut scene = Scene::new(1, 1);
    scene.run(&[
        UcCommand::SetBlendEnable(true),
        solid([(0, 0), (2, 0), (0, 2)]),
    ]);
    assert_eq!(scene.pixel(0, 0), HALF_WHITE);

    let mut scene = Scene::new(1, 1);
    scene.run(&[
        UcCommand::SetBlendMode(BlendMode::Average50),
        UcCommand::SetBlendEnable(false),
        solid([(0, 0), (2, 0), (0, 2)]),
    ]);
    assert_eq!(scene.pixel(0, 0), WHITE);
}

#[test]
fn test_ci4_palette_banks() {
    let mut tlut = vec![0u16; 32];
    tlut[1] = RED;
    tlut[17] = GREEN;

    let mut scene = Scene::new(2, 2);
    scene.load16(TLUT, &tlut);
    scene.load8(TEX, &[0x11, 0x10]);

    scene.run(&[
        UcCommand::SetTlut {
            addr: TLUT,
            count: 32,
        },
        rect(TexelFormat::Ci4, TEX, 2, 1, 0, 0),
        UcCommand::SetCi4Palette(1),
        rect(TexelFormat::Ci4, TEX, 2, 1, 0, 1),
    ]);

    assert_eq!(scene.row(0), [RED, RED]);
    assert_eq!(scene.row(1), [GREEN, GREEN]);

    // Index 0 in bank 1 is transparent black
    let mut scene2 = Scene::new(2, 1);
    scene2.load16(TLUT, &tlut);
    scene2.load8(TEX, &[0x10]);
    scene2.run(&[
        UcCommand::SetTlut {
            addr: TLUT,
            count: 32,
        },
        UcCommand::SetCi4Palette(1),
        rect(TexelFormat::Ci4, TEX, 2, 1, 0, 0),
    ]);
    assert_eq!(scene2.row(0), [GREEN, 0]);
}

#[test]
fn test_tlut_entries_past_count_read_zero() {
    let mut scene = Scene::new(2, 1);
    scene.load16(TLUT, &[RED, GREEN]);
    scene.load8(TEX, &[0, 1]);

    scene.run(&[
        UcCommand::SetTlut {
            addr: TLUT,
            count: 1,
        },
        rect(TexelFormat::Ci8, TEX, 2, 1, 0, 0),
    ]);
    assert_eq!(scene.row(0), [RED, 0]);
}

#[test]
fn test_tlut_is_snapshot() {
    let mut scene = Scene::new(1, 1);
    scene.load16(TLUT, &[RED]);
    scene.load8(TEX, &[0]);

    // The stream overwrites the TLUT source only after SetTlut copied it
    scene.run(&[
        UcCommand::SetTlut {
            addr: TLUT,
            count: 1,
        },
        UcCommand::SetZBuffer {
            addr: TLUT,
            width: 1,
            height: 1,
        },
        UcCommand::ClearZ(GREEN),
        rect(TexelFormat::Ci8, TEX, 1, 1, 0, 0),
    ]);
    assert_eq!(scene.pixel(0, 0), RED);
}

#[test]
fn test_gradient_spans_framebuffer_width() {
    let mut scene = Scene::new(3, 2);
    scene.run(&[UcCommand::GradientBackground {
        left: 0x0000,
        right: 0xFFFE,
    }]);
    let mid = crate::core::gfx::Color::gray(16, true).to_packed();
    assert_eq!(scene.row(0), [0x0001, mid, WHITE]);
    assert_eq!(scene.row(1), scene.row(0));
}

#[test]
fn test_gradient_respects_scissor() {
    let mut scene = Scene::new(4, 1);
    scene.run(&[
        UcCommand::SetScissor(ScissorRect::new(1, 0, 3, 1)),
        UcCommand::GradientBackground {
            left: RED,
            right: RED,
        },
    ]);
    assert_eq!(scene.row(0), [0, RED, RED, 0]);
}

#[test]
fn test_tile_slice_grid() {
    let mut scene = Scene::new(8, 8);
    scene.load16(TEX, &[RED; 4]);
    scene.run(&[UcCommand::TileSlice {
        addr: TEX,
        size: 2,
        spacing: 2,
        offset: 1,
    }]);

    // Period 4, shifted right by one: columns 1-2 and 5-6 in rows 0-1, 4-5
    assert_eq!(scene.row(0), [0, RED, RED, 0, 0, RED, RED, 0]);
    assert_eq!(scene.row(1), scene.row(0));
    assert!(scene.row(2).iter().all(|&p| p == 0));
    assert_eq!(scene.row(4), scene.row(0));
}

#[test]
fn test_tile_slice_offset_wraps_at_period() {
    let tile = [RED, GREEN, BLUE, WHITE];
    let render = |offset: u16| {
        let mut scene = Scene::new(12, 6);
        scene.load16(TEX, &tile);
        scene.run(&[UcCommand::TileSlice {
            addr: TEX,
            size: 2,
            spacing: 3,
            offset,
        }]);
        scene.frame()
    };

    assert_eq!(render(0), render(5));
    assert_ne!(render(0), render(1));
}

#[test]
fn test_tile_slice_zero_size_is_noop() {
    let mut scene = Scene::new(4, 4);
    scene.run(&[UcCommand::TileSlice {
        addr: TEX,
        size: 0,
        spacing: 4,
        offset: 0,
    }]);
    assert!(scene.frame().iter().all(|&p| p == 0));
}
