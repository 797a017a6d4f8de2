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

//! N64 graphics-command pipeline
//!
//! This library translates N64 display lists into the canonical RSPDL
//! opcode stream and rasterizes that stream into a 16-bit framebuffer
//! living in emulated RDRAM.
//!
//! # Example
//!
//! ```
//! use rspgfx::core::gfx::ucode::UcCommand;
//! use rspgfx::core::system::System;
//!
//! let mut system = System::new(0x0040_0000);
//! system.set_framebuffer(0x0010_0000, 32, 32, 32);
//!
//! // Fill the frame with a red-to-blue gradient
//! let frame = [
//!     UcCommand::GradientBackground { left: 0xF801, right: 0x003F },
//!     UcCommand::End,
//! ];
//! system.run_ucode(&frame, 0x0020_0000, 64).unwrap();
//!
//! let crc = system.frame_crc32();
//! assert_ne!(crc, 0);
//! ```

pub mod core;
