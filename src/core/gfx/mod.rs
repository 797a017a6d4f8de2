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

//! Graphics pipeline
//!
//! Display lists flow through the pipeline in three stages:
//!
//! 1. A front-end translator (`translate::typed` or `translate::bytecode`)
//!    turns N64 commands into [`ucode::UcCommand`]s
//! 2. The encoder serializes them into an RSPDL word stream in RDRAM
//! 3. The interpreter executes the stream and rasterizes into the
//!    framebuffer
//!
//! # Framebuffer Format
//!
//! Pixels are big-endian 16-bit 5/5/5/1 colors (see [`Color`]). The
//! framebuffer base and row stride come from the VI registers.

pub mod interp;
mod render;
pub mod texture;
pub mod translate;
pub mod types;
pub mod ucode;

pub use types::{
    AddressMode, BlendMode, Color, CombineMode, Projection, ScissorRect, TexVertex, TexelFormat,
    TextureFilter, TextureRef, TriangleTexture,
};

#[cfg(test)]
mod tests;
