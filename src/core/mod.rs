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

//! Core components
//!
//! - Memory: flat big-endian RDRAM
//! - VI: framebuffer origin and stride registers
//! - Graphics: display-list translation, RSPDL encoding and rasterization
//! - Scanout: RGBA8888 conversion and frame hashing
//! - System integration

pub mod config;
pub mod error;
pub mod gfx;
pub mod memory;
pub mod scanout;
pub mod system;
pub mod vi;

// Re-export commonly used types
pub use config::Config;
pub use error::{EmulatorError, Result};
pub use memory::{Memory, Rdram};
pub use system::System;
pub use vi::ViRegisters;
