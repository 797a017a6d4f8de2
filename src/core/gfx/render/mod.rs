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

//! Rendering primitives
//!
//! Drawing operations implemented on the interpreter:
//! - `rasterizer`: Solid, textured and depth-tested triangles
//! - `rect`: 1:1 textured rectangles
//! - `background`: Gradient fill and repeating tile slice
//! - `sampler`: Texel fetch with nearest/bilinear filtering
//! - `pixel`: Combine resolution, blending and the Z test

mod background;
mod pixel;
mod rasterizer;
mod rect;
mod sampler;
