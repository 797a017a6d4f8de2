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

/// Emulator error types
use thiserror::Error;

/// Result type for emulator operations
pub type Result<T> = std::result::Result<T, EmulatorError>;

/// Main error type for the graphics pipeline
///
/// Translation and interpretation never surface these: a malformed display
/// list only ever draws less. Errors are reported at the host edges, i.e.
/// memory image loading, stream slot writes and configuration parsing.
#[derive(Error, Debug)]
pub enum EmulatorError {
    #[error("Invalid memory access at 0x{address:08X}")]
    InvalidMemoryAccess { address: u32 },

    #[error("Unaligned memory access: {size}-byte access at 0x{address:08X}")]
    UnalignedAccess { address: u32, size: u8 },

    #[error("RSPDL stream needs {needed} words but the slot holds {slot}")]
    StreamOverflow { needed: usize, slot: usize },

    #[error("RDRAM image too large: {got} bytes (RDRAM is {capacity} bytes)")]
    ImageTooLarge { got: usize, capacity: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<toml::de::Error> for EmulatorError {
    fn from(err: toml::de::Error) -> Self {
        EmulatorError::Config(err.to_string())
    }
}
