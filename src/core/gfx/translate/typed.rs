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

//! Typed display-list translator
//!
//! Translates an already-structured display list. Image, TLUT and tile
//! state live only for the duration of one [`translate`] call.

use super::{texture_rect, PendingImage, TileSize};
use crate::core::gfx::types::{
    AddressMode, BlendMode, CombineMode, ScissorRect, TexVertex, TexelFormat, TextureFilter,
};
use crate::core::gfx::ucode::{TexRect, UcCommand};

/// One structured display-list command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DlCommand {
    /// Declare the render target
    ///
    /// The framebuffer location comes from the VI registers, so this only
    /// documents intent.
    SetColorImage { addr: u32, width: u32 },

    /// Make an image the pending texture source
    SetTextureImage {
        format: TexelFormat,
        addr: u32,
        width: u32,
        height: u32,
    },

    /// Describe a TLUT for the next `LoadTlut`
    SetTlut { addr: u32, count: u32 },

    /// Load the described TLUT
    LoadTlut,

    /// Tile extent in 10.2 fixed point
    SetTileSize {
        uls: u32,
        ult: u32,
        lrs: u32,
        lrt: u32,
    },

    /// Draw the pending image in a 10.2 fixed-point rectangle
    TextureRectangle {
        ulx: u32,
        uly: u32,
        lrx: u32,
        lry: u32,
    },

    SetCi4Palette(u8),

    SetPrimColor(u16),

    SetEnvColor(u16),

    SetCombineMode(CombineMode),

    /// Draw the whole pending image with its top-left texel at (x, y)
    DrawSprite { x: i32, y: i32 },

    /// Flat triangle in the primitive color
    FillTriangle([(i32, i32); 3]),

    /// Gradient background followed by a repeating tile grid
    BackgroundGrid {
        left: u16,
        right: u16,
        tile_addr: u32,
        tile_size: u8,
        spacing: u8,
        offset: u16,
    },

    SetScissor(ScissorRect),

    SetTextureFilter(TextureFilter),

    SetBlendMode(BlendMode),

    SetAddressMode { s: AddressMode, t: AddressMode },

    SetZEnable(bool),

    SetZBuffer { addr: u32, width: u32, height: u32 },

    ClearZ(u16),

    /// End of the display list; later commands are ignored
    End,
}

/// Per-call translation state
#[derive(Debug, Default)]
struct TypedTranslator {
    image: Option<PendingImage>,
    tlut: Option<(u32, u32)>,
    tile: Option<TileSize>,
    out: Vec<UcCommand>,
}

/// Translate a structured display list into UC commands
///
/// The result always ends with exactly one `End`.
///
/// # Examples
///
/// ```
/// use rspgfx::core::gfx::translate::typed::{translate, DlCommand};
/// use rspgfx::core::gfx::ucode::UcCommand;
///
/// let commands = translate(&[DlCommand::SetPrimColor(0xF801), DlCommand::End]);
/// assert_eq!(commands, [UcCommand::SetPrimColor(0xF801), UcCommand::End]);
/// ```
pub fn translate(commands: &[DlCommand]) -> Vec<UcCommand> {
    let mut translator = TypedTranslator {
        out: Vec::with_capacity(commands.len() + 1),
        ..Default::default()
    };

    for command in commands {
        if *command == DlCommand::End {
            break;
        }
        translator.step(command);
    }

    translator.out.push(UcCommand::End);
    log::debug!(
        "Typed DL: {} commands -> {} UC commands",
        commands.len(),
        translator.out.len()
    );
    translator.out
}

impl TypedTranslator {
    fn step(&mut self, command: &DlCommand) {
        match *command {
            DlCommand::SetColorImage { addr, width } => {
                log::trace!("Typed DL: color image 0x{:08X} width {}", addr, width);
            }
            DlCommand::SetTextureImage {
                format,
                addr,
                width,
                height,
            } => {
                self.image = Some(PendingImage {
                    format,
                    addr,
                    width,
                    height,
                });
            }
            DlCommand::SetTlut { addr, count } => self.tlut = Some((addr, count)),
            DlCommand::LoadTlut => match self.tlut {
                Some((addr, count)) => self.out.push(UcCommand::SetTlut { addr, count }),
                None => log::warn!("Typed DL: LoadTlut without a TLUT description"),
            },
            DlCommand::SetTileSize { uls, ult, lrs, lrt } => {
                self.tile = Some(TileSize::from_fixed(uls, ult, lrs, lrt));
            }
            DlCommand::TextureRectangle { ulx, uly, lrx, lry } => match self.image {
                Some(image) => {
                    self.out
                        .push(texture_rect(&image, self.tile, (ulx, uly, lrx, lry)));
                }
                None => log::debug!("Typed DL: texture rectangle without an image"),
            },
            DlCommand::SetCi4Palette(palette) => {
                self.out.push(UcCommand::SetCi4Palette(palette & 0xF));
            }
            DlCommand::SetPrimColor(color) => self.out.push(UcCommand::SetPrimColor(color)),
            DlCommand::SetEnvColor(color) => self.out.push(UcCommand::SetEnvColor(color)),
            DlCommand::SetCombineMode(mode) => self.out.push(UcCommand::SetCombineMode(mode)),
            DlCommand::DrawSprite { x, y } => match self.image {
                Some(image) => self.out.push(UcCommand::DrawTexRect(TexRect {
                    format: image.format,
                    addr: image.addr,
                    width: image.width,
                    height: image.height,
                    x,
                    y,
                })),
                None => log::debug!("Typed DL: sprite without an image"),
            },
            DlCommand::FillTriangle(points) => {
                let vertices = points.map(|(x, y)| TexVertex::at(x, y));
                self.out.push(UcCommand::SolidTriangle(vertices));
            }
            DlCommand::BackgroundGrid {
                left,
                right,
                tile_addr,
                tile_size,
                spacing,
                offset,
            } => {
                self.out.push(UcCommand::GradientBackground { left, right });
                self.out.push(UcCommand::TileSlice {
                    addr: tile_addr,
                    size: tile_size,
                    spacing,
                    offset,
                });
            }
            DlCommand::SetScissor(rect) => self.out.push(UcCommand::SetScissor(rect)),
            DlCommand::SetTextureFilter(filter) => {
                self.out.push(UcCommand::SetTexFilter(filter));
            }
            DlCommand::SetBlendMode(mode) => self.out.push(UcCommand::SetBlendMode(mode)),
            DlCommand::SetAddressMode { s, t } => {
                self.out.push(UcCommand::SetTexAddrMode { s, t });
            }
            DlCommand::SetZEnable(enabled) => self.out.push(UcCommand::SetZEnable(enabled)),
            DlCommand::SetZBuffer {
                addr,
                width,
                height,
            } => self.out.push(UcCommand::SetZBuffer {
                addr,
                width,
                height,
            }),
            DlCommand::ClearZ(depth) => self.out.push(UcCommand::ClearZ(depth)),
            DlCommand::End => {}
        }
    }
}
