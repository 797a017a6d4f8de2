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

//! UC → RSPDL stream encoder

use super::{TexRect, UcCommand};
use crate::core::error::{EmulatorError, Result};
use crate::core::gfx::types::{Projection, TexVertex, TextureRef};
use crate::core::memory::Memory;

/// Encode a command sequence into RSPDL words
///
/// A terminal `End` is appended unless the sequence already ends with one.
/// Commands after an embedded `End` are still encoded; the interpreter simply
/// never reaches them.
///
/// # Examples
///
/// ```
/// use rspgfx::core::gfx::ucode::{encode, UcCommand};
///
/// let words = encode(&[UcCommand::SetPrimColor(0xF801)]);
/// assert_eq!(words, [0x30, 0xF801, 0x00]);
/// ```
pub fn encode(commands: &[UcCommand]) -> Vec<u32> {
    let mut words = Vec::with_capacity(commands.len() * 8 + 1);
    for command in commands {
        encode_command(command, &mut words);
    }
    if commands.last() != Some(&UcCommand::End) {
        words.push(super::opcode::END);
    }
    words
}

/// Encode `commands` into an RDRAM slot of `slot_words` words at `addr`
///
/// Several per-frame streams can be laid out back to back by giving each one
/// its own slot.
///
/// # Returns
///
/// Number of words written
///
/// # Errors
///
/// - `StreamOverflow` if the encoded stream does not fit in the slot
/// - Memory errors if the slot is not writable word-aligned RDRAM
pub fn write_stream(
    mem: &mut dyn Memory,
    addr: u32,
    slot_words: usize,
    commands: &[UcCommand],
) -> Result<usize> {
    let words = encode(commands);
    if words.len() > slot_words {
        return Err(EmulatorError::StreamOverflow {
            needed: words.len(),
            slot: slot_words,
        });
    }

    for (i, &word) in words.iter().enumerate() {
        mem.write32(addr.wrapping_add(i as u32 * 4), word)?;
    }

    log::debug!(
        "RSPDL: wrote {} words ({} commands) at 0x{:08X}",
        words.len(),
        commands.len(),
        addr
    );
    Ok(words.len())
}

fn encode_command(command: &UcCommand, out: &mut Vec<u32>) {
    out.push(command.opcode());

    match *command {
        UcCommand::End => {}
        UcCommand::GradientBackground { left, right } => {
            out.extend_from_slice(&[left as u32, right as u32]);
        }
        UcCommand::TileSlice {
            addr,
            size,
            spacing,
            offset,
        } => {
            out.push(addr);
            out.push(((size as u32) << 24) | ((spacing as u32) << 16) | offset as u32);
        }
        UcCommand::SetTlut { addr, count } => out.extend_from_slice(&[addr, count]),
        UcCommand::SetCi4Palette(palette) => out.push(palette as u32),
        UcCommand::SetTexAddrMode { s, t } => out.push(s.to_bits() | (t.to_bits() << 4)),
        UcCommand::SetTexFilter(filter) => out.push(filter.to_bits()),
        UcCommand::SetBlendEnable(enabled) => out.push(enabled as u32),
        UcCommand::SetBlendMode(mode) => out.push(mode.to_bits()),
        UcCommand::SetScissor(rect) => out.extend_from_slice(&[
            rect.x0 as u32,
            rect.y0 as u32,
            rect.x1 as u32,
            rect.y1 as u32,
        ]),
        UcCommand::SetPrimColor(color) | UcCommand::SetEnvColor(color) => out.push(color as u32),
        UcCommand::SetCombineMode(mode) => out.push(mode.to_bits()),
        UcCommand::SetZEnable(enabled) => out.push(enabled as u32),
        UcCommand::SetZBuffer {
            addr,
            width,
            height,
        } => out.extend_from_slice(&[addr, width, height]),
        UcCommand::ClearZ(depth) => out.push(depth as u32),
        UcCommand::SolidTriangle(vertices) => {
            for v in &vertices {
                out.extend_from_slice(&[v.x as u32, v.y as u32]);
            }
        }
        UcCommand::SolidTriangleZ(vertices) => {
            for v in &vertices {
                out.extend_from_slice(&[v.x as u32, v.y as u32, v.z as u32]);
            }
        }
        UcCommand::DrawTexRect(TexRect {
            addr,
            width,
            height,
            x,
            y,
            ..
        }) => out.extend_from_slice(&[width, height, addr, x as u32, y as u32]),
        UcCommand::TexTriangle {
            projection,
            texture,
            vertices,
            ..
        } => {
            encode_textured(out, &texture, &vertices);
            if projection == Projection::Perspective {
                encode_q(out, &vertices);
            }
        }
        UcCommand::Rgba16TriangleZ {
            projection,
            texture,
            vertices,
        } => {
            encode_textured(out, &texture, &vertices);
            if projection == Projection::Perspective {
                encode_q(out, &vertices);
            }
            out.extend(vertices.iter().map(|v| v.z as u32));
        }
    }
}

fn encode_textured(out: &mut Vec<u32>, texture: &TextureRef, vertices: &[TexVertex; 3]) {
    out.extend_from_slice(&[texture.addr, texture.width, texture.height, texture.pitch]);
    for v in vertices {
        out.extend_from_slice(&[v.x as u32, v.y as u32, v.s as u32, v.t as u32]);
    }
}

fn encode_q(out: &mut Vec<u32>, vertices: &[TexVertex; 3]) {
    out.extend(vertices.iter().map(|v| v.q));
}
