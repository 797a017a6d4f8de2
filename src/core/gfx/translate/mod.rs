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

//! Display-list front-ends
//!
//! Two translators turn N64 display lists into [`UcCommand`] sequences:
//! - `typed`: an already-structured command list
//! - `bytecode`: raw 8-byte instructions read from RDRAM
//!
//! A display list expressible in both dialects translates to the same
//! commands and therefore renders identical pixels.
//!
//! # Fixed Point
//!
//! Tile and rectangle coordinates are 10.2 fixed point. A tile spans
//! `floor((lr - ul) / 4) + 1` texels, a rectangle `floor((lr - ul) / 4)`
//! pixels.

pub mod bytecode;
pub mod gbi;
pub mod typed;

pub use typed::DlCommand;

use super::types::{TexelFormat, TextureRef};
use super::ucode::{TexRect, UcCommand};

/// Texture image waiting for a draw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PendingImage {
    pub format: TexelFormat,
    pub addr: u32,
    /// Row width in texels
    pub width: u32,
    /// Height in texels, when the dialect declares one
    pub height: u32,
}

/// Tile extent in texels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct TileSize {
    pub width: u32,
    pub height: u32,
}

impl TileSize {
    /// Tile size from 10.2 corner coordinates
    pub fn from_fixed(uls: u32, ult: u32, lrs: u32, lrt: u32) -> Self {
        Self {
            width: tile_extent(uls, lrs),
            height: tile_extent(ult, lrt),
        }
    }
}

/// floor((lr - ul) / 4) + 1, never negative
pub(crate) fn tile_extent(ul: u32, lr: u32) -> u32 {
    ((lr as i64 - ul as i64).div_euclid(4) + 1).max(0) as u32
}

/// floor((lr - ul) / 4), never negative
pub(crate) fn rect_span(ul: u32, lr: u32) -> u32 {
    (lr as i64 - ul as i64).div_euclid(4).max(0) as u32
}

/// Integer pixel position of a 10.2 coordinate
pub(crate) fn fixed_to_pixel(value: u32) -> i32 {
    (value >> 2) as i32
}

/// Build a rectangle draw from the pending image
///
/// The most recent tile size wins over the rectangle's own span.
pub(crate) fn texture_rect(
    image: &PendingImage,
    tile: Option<TileSize>,
    (ulx, uly, lrx, lry): (u32, u32, u32, u32),
) -> UcCommand {
    let (width, height) = match tile {
        Some(tile) => (tile.width, tile.height),
        None => (rect_span(ulx, lrx), rect_span(uly, lry)),
    };
    UcCommand::DrawTexRect(TexRect {
        format: image.format,
        addr: image.addr,
        width,
        height,
        x: fixed_to_pixel(ulx),
        y: fixed_to_pixel(uly),
    })
}

/// Texture reference for a triangle: tile extent over image rows
pub(crate) fn triangle_texture(image: &PendingImage, tile: TileSize) -> TextureRef {
    TextureRef {
        addr: image.addr,
        width: tile.width,
        height: tile.height,
        pitch: image.width,
    }
}
